//! Pure derivation of view grids from (events, selected date, view mode).
//! Nothing in here holds state or touches I/O; the TUI recomputes a grid
//! every frame from the stores.

pub mod day;
pub mod month;
pub mod week;

pub use day::{DayGrid, HourBucket};
pub use month::MonthGrid;
pub use week::WeekGrid;

use crate::data::{CalendarEvent, ViewMode};
use chrono::{Datelike, Duration, NaiveDate};

/// The one shape presentation code consumes.
pub enum Grid {
    Month(MonthGrid),
    Week(WeekGrid),
    Day(DayGrid),
}

/// Shared contract for the three views.
pub fn derive(events: &[CalendarEvent], selected_date: NaiveDate, view: ViewMode) -> Grid {
    match view {
        ViewMode::Month => Grid::Month(month::month_grid(events, selected_date)),
        ViewMode::Week => Grid::Week(week::week_grid(events, selected_date)),
        ViewMode::Day => Grid::Day(day::day_grid(events, selected_date)),
    }
}

/// One day cell, shared by the month and week grids.
#[derive(Debug, Clone)]
pub struct DayBucket {
    pub date: NaiveDate,
    /// False for the leading/trailing days that pad the month grid to whole
    /// weeks; the renderer de-emphasizes them.
    pub in_focus_month: bool,
    pub events: Vec<CalendarEvent>,
}

/// Weeks start on Sunday, matching the `Su Mo Tu We Th Fr Sa` header row.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

/// Stable in-bucket order: timestamp ascending, ties broken by id ascending.
pub(crate) fn sort_bucket(events: &mut [CalendarEvent]) {
    events.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));
}

/// All events whose UTC timestamp falls on `date`, sorted. A midnight
/// timestamp belongs to the day it starts, never the day before.
pub(crate) fn events_on(events: &[CalendarEvent], date: NaiveDate) -> Vec<CalendarEvent> {
    let mut hits: Vec<CalendarEvent> = events
        .iter()
        .filter(|e| e.date.date_naive() == date)
        .cloned()
        .collect();
    sort_bucket(&mut hits);
    hits
}

#[cfg(test)]
pub(crate) mod test_util {
    use super::*;
    use chrono::{TimeZone, Utc};

    pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    pub fn event(id: i64, y: i32, m: u32, day: u32, h: u32, min: u32) -> CalendarEvent {
        CalendarEvent {
            id,
            date: Utc.with_ymd_and_hms(y, m, day, h, min, 0).unwrap(),
            title: format!("event {id}"),
            description: String::new(),
        }
    }
}
