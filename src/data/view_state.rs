use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Grid granularity. A closed enum: the only way in from a string is
/// `ViewMode::parse`, which rejects anything but the three variants.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Month,
    Week,
    Day,
}

impl ViewMode {
    pub fn parse(s: &str) -> Option<ViewMode> {
        match s.trim().to_ascii_lowercase().as_str() {
            "month" => Some(ViewMode::Month),
            "week" => Some(ViewMode::Week),
            "day" => Some(ViewMode::Day),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Month => "Month",
            ViewMode::Week => "Week",
            ViewMode::Day => "Day",
        }
    }
}

/// Session-scoped navigation state: the selected date and the active view.
/// Resets to today/Month each run; never persisted.
#[derive(Debug)]
pub struct ViewState {
    selected_date: NaiveDate,
    active_view: ViewMode,
}

impl ViewState {
    pub fn new(today: NaiveDate, view: ViewMode) -> Self {
        ViewState {
            selected_date: today,
            active_view: view,
        }
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn set_selected_date(&mut self, date: NaiveDate) {
        self.selected_date = date;
    }

    pub fn view(&self) -> ViewMode {
        self.active_view
    }

    pub fn set_view(&mut self, view: ViewMode) {
        self.active_view = view;
    }

    /// Boundary setter for loosely-typed input. Invalid strings are rejected
    /// with an operator log and the current view is kept.
    pub fn set_view_str(&mut self, s: &str) -> bool {
        match ViewMode::parse(s) {
            Some(view) => {
                self.active_view = view;
                true
            }
            None => {
                eprintln!("ignoring unknown view mode '{s}'");
                false
            }
        }
    }

    /// Moves the selection forward or backward by one step of the active
    /// view's granularity: a day in Day view, a week in Week view, a month
    /// in Month view.
    pub fn step(&mut self, forward: bool) {
        let sign = if forward { 1 } else { -1 };
        self.selected_date = match self.active_view {
            ViewMode::Day => self.selected_date + Duration::days(sign),
            ViewMode::Week => self.selected_date + Duration::days(7 * sign),
            ViewMode::Month => add_months(self.selected_date, sign as i32),
        };
    }
}

pub(crate) fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap()
        .signed_duration_since(NaiveDate::from_ymd_opt(year, month, 1).unwrap())
        .num_days() as u32
}

/// Month arithmetic that clamps the day-of-month (Jan 31 + 1 month = Feb 28/29).
pub(crate) fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let year = date.year();
    let month = date.month() as i32;
    let new_total = month - 1 + months;
    let new_month = ((new_total % 12 + 12) % 12 + 1) as u32;
    let year_delta = new_total.div_euclid(12);
    let new_year = year + year_delta;
    let max_day = days_in_month(new_year, new_month);
    let new_day = date.day().min(max_day);
    NaiveDate::from_ymd_opt(new_year, new_month, new_day).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_parse_accepts_the_three_modes() {
        assert_eq!(ViewMode::parse("month"), Some(ViewMode::Month));
        assert_eq!(ViewMode::parse("week"), Some(ViewMode::Week));
        assert_eq!(ViewMode::parse("day"), Some(ViewMode::Day));
    }

    #[test]
    fn test_parse_is_case_insensitive_and_trims() {
        assert_eq!(ViewMode::parse(" Month "), Some(ViewMode::Month));
        assert_eq!(ViewMode::parse("WEEK"), Some(ViewMode::Week));
    }

    #[test]
    fn test_parse_rejects_anything_else() {
        assert_eq!(ViewMode::parse("year"), None);
        assert_eq!(ViewMode::parse(""), None);
        assert_eq!(ViewMode::parse("months"), None);
    }

    #[test]
    fn test_initial_state_is_today_and_given_view() {
        let state = ViewState::new(d(2024, 3, 10), ViewMode::Month);
        assert_eq!(state.selected_date(), d(2024, 3, 10));
        assert_eq!(state.view(), ViewMode::Month);
    }

    #[test]
    fn test_set_view_str_rejects_invalid_and_keeps_current() {
        let mut state = ViewState::new(d(2024, 3, 10), ViewMode::Week);
        assert!(!state.set_view_str("bogus"));
        assert_eq!(state.view(), ViewMode::Week);
    }

    #[test]
    fn test_set_view_str_accepts_valid() {
        let mut state = ViewState::new(d(2024, 3, 10), ViewMode::Month);
        assert!(state.set_view_str("day"));
        assert_eq!(state.view(), ViewMode::Day);
    }

    #[test]
    fn test_step_by_day() {
        let mut state = ViewState::new(d(2024, 3, 10), ViewMode::Day);
        state.step(true);
        assert_eq!(state.selected_date(), d(2024, 3, 11));
        state.step(false);
        state.step(false);
        assert_eq!(state.selected_date(), d(2024, 3, 9));
    }

    #[test]
    fn test_step_by_week() {
        let mut state = ViewState::new(d(2024, 3, 10), ViewMode::Week);
        state.step(true);
        assert_eq!(state.selected_date(), d(2024, 3, 17));
    }

    #[test]
    fn test_step_by_month_clamps_day() {
        let mut state = ViewState::new(d(2024, 1, 31), ViewMode::Month);
        state.step(true);
        // 2024 is a leap year
        assert_eq!(state.selected_date(), d(2024, 2, 29));
    }

    #[test]
    fn test_add_months_across_year_boundary() {
        assert_eq!(add_months(d(2024, 11, 15), 3), d(2025, 2, 15));
        assert_eq!(add_months(d(2024, 1, 15), -2), d(2023, 11, 15));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(2024, 12), 31);
    }
}
