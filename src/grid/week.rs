use crate::data::CalendarEvent;
use crate::grid::{DayBucket, events_on, week_start};
use chrono::{Duration, NaiveDate};

/// The Sunday-started 7-day span containing the selected date.
#[derive(Debug)]
pub struct WeekGrid {
    pub start: NaiveDate,
    pub days: Vec<DayBucket>,
}

pub fn week_grid(events: &[CalendarEvent], selected_date: NaiveDate) -> WeekGrid {
    let start = week_start(selected_date);
    let days = (0..7)
        .map(|offset| {
            let date = start + Duration::days(offset);
            DayBucket {
                date,
                in_focus_month: true,
                events: events_on(events, date),
            }
        })
        .collect();
    WeekGrid { start, days }
}
