use crate::data::CalendarEvent;
use crate::data::view_state::days_in_month;
use crate::grid::{DayBucket, events_on, week_start};
use chrono::{Datelike, Duration, NaiveDate};

/// A month laid out as whole Sunday-started weeks. Days borrowed from the
/// adjacent months to square off the first and last rows are included with
/// `in_focus_month = false`.
#[derive(Debug)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<Vec<DayBucket>>,
}

pub fn month_grid(events: &[CalendarEvent], selected_date: NaiveDate) -> MonthGrid {
    let year = selected_date.year();
    let month = selected_date.month();
    let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(selected_date);
    let last = first + Duration::days(days_in_month(year, month) as i64 - 1);

    let grid_start = week_start(first);
    let grid_end = week_start(last) + Duration::days(6);

    let mut weeks = Vec::new();
    let mut cursor = grid_start;
    while cursor <= grid_end {
        let week: Vec<DayBucket> = (0..7)
            .map(|offset| {
                let date = cursor + Duration::days(offset);
                DayBucket {
                    date,
                    in_focus_month: date.month() == month && date.year() == year,
                    events: events_on(events, date),
                }
            })
            .collect();
        weeks.push(week);
        cursor += Duration::days(7);
    }

    MonthGrid { year, month, weeks }
}

impl MonthGrid {
    /// The bucket holding `date`, if the grid covers it.
    pub fn bucket(&self, date: NaiveDate) -> Option<&DayBucket> {
        self.weeks
            .iter()
            .flatten()
            .find(|bucket| bucket.date == date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::test_util::*;

    #[test]
    fn test_month_grid_is_whole_weeks() {
        // March 2024: Fri Mar 1 .. Sun Mar 31 → 6 Sunday-started rows
        let grid = month_grid(&[], d(2024, 3, 15));
        for week in &grid.weeks {
            assert_eq!(week.len(), 7);
        }
        assert_eq!(grid.weeks.len(), 6);
    }

    #[test]
    fn test_month_grid_covers_every_day_of_the_month() {
        let grid = month_grid(&[], d(2024, 3, 15));
        for day in 1..=31 {
            let date = d(2024, 3, day);
            let bucket = grid.bucket(date).expect("day missing from grid");
            assert!(bucket.in_focus_month);
        }
    }

    #[test]
    fn test_month_grid_pads_with_adjacent_month_days() {
        let grid = month_grid(&[], d(2024, 3, 15));
        // March 2024 starts on a Friday: the first row leads with Feb 25-29.
        let first_row = &grid.weeks[0];
        assert_eq!(first_row[0].date, d(2024, 2, 25));
        assert!(!first_row[0].in_focus_month);
        assert_eq!(first_row[5].date, d(2024, 3, 1));
        assert!(first_row[5].in_focus_month);
    }

    #[test]
    fn test_month_exactly_filling_its_weeks_has_no_padding() {
        // February 2026: Sun Feb 1 .. Sat Feb 28, exactly 4 rows
        let grid = month_grid(&[], d(2026, 2, 10));
        assert_eq!(grid.weeks.len(), 4);
        assert_eq!(grid.weeks[0][0].date, d(2026, 2, 1));
        assert_eq!(grid.weeks[3][6].date, d(2026, 2, 28));
        assert!(grid.weeks.iter().flatten().all(|b| b.in_focus_month));
    }

    #[test]
    fn test_events_land_in_their_day_bucket() {
        let events = vec![
            event(1, 2024, 3, 10, 9, 0),
            event(2, 2024, 3, 10, 14, 0),
            event(3, 2024, 3, 12, 9, 0),
        ];
        let grid = month_grid(&events, d(2024, 3, 1));
        let tenth = grid.bucket(d(2024, 3, 10)).unwrap();
        assert_eq!(tenth.events.len(), 2);
        assert_eq!(tenth.events[0].id, 1);
        let eleventh = grid.bucket(d(2024, 3, 11)).unwrap();
        assert!(eleventh.events.is_empty());
    }

    #[test]
    fn test_padding_days_still_collect_their_events() {
        // Feb 29 2024 sits in the March grid's first row
        let events = vec![event(1, 2024, 2, 29, 9, 0)];
        let grid = month_grid(&events, d(2024, 3, 15));
        let bucket = grid.bucket(d(2024, 2, 29)).unwrap();
        assert!(!bucket.in_focus_month);
        assert_eq!(bucket.events.len(), 1);
    }
}
