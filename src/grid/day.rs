use crate::data::CalendarEvent;
use crate::grid::sort_bucket;
use chrono::{NaiveDate, Timelike};

/// One hour slot of the day view.
#[derive(Debug)]
pub struct HourBucket {
    pub hour: u32,
    pub events: Vec<CalendarEvent>,
}

/// 24 hourly buckets for the selected date. An event on an exact hour
/// boundary lands in the bucket it starts (09:00:00 → hour 9).
#[derive(Debug)]
pub struct DayGrid {
    pub date: NaiveDate,
    pub hours: Vec<HourBucket>,
}

pub fn day_grid(events: &[CalendarEvent], selected_date: NaiveDate) -> DayGrid {
    let hours = (0..24)
        .map(|hour| {
            let mut hits: Vec<CalendarEvent> = events
                .iter()
                .filter(|e| e.date.date_naive() == selected_date && e.date.hour() == hour)
                .cloned()
                .collect();
            sort_bucket(&mut hits);
            HourBucket { hour, events: hits }
        })
        .collect();
    DayGrid {
        date: selected_date,
        hours,
    }
}
