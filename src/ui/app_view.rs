use crate::data::{CalendarEvent, EventStore, ThemeStore, ViewMode, ViewState};
use crate::editor::{DraftField, Editor};
use crate::grid::{self, DayGrid, Grid, MonthGrid, WeekGrid};
use crate::ui::palette::Palette;
use anyhow::Result;
use chrono::{Datelike, Duration, NaiveDate};
use crossterm::event::{self, Event as CEvent, KeyCode, KeyModifiers};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use std::io::Stdout;
use std::time::Duration as StdDuration;

/// Hour a new event defaults to when created from the month or week view,
/// where no hour slot is selected.
const DEFAULT_EVENT_HOUR: u32 = 9;

/// What to do with the event chosen from the pick list.
#[derive(Clone, Copy, Debug, PartialEq)]
enum PickIntent {
    Edit,
    Delete,
}

#[derive(Debug, PartialEq)]
enum Mode {
    Normal,
    /// Choosing one of the selected date's events with Up/Down + Enter.
    Pick(PickIntent),
}

pub struct App<'a> {
    event_store: &'a mut EventStore,
    theme_store: &'a mut ThemeStore,
    view_state: &'a mut ViewState,
    editor: Editor,
    today: NaiveDate,
    /// Hour slot cursor, only meaningful in Day view.
    selected_hour: u32,
    mode: Mode,
    pick_cursor: usize,
    /// One-line status message. Cleared on the next keypress.
    status: Option<String>,
}

impl<'a> App<'a> {
    pub fn new(
        event_store: &'a mut EventStore,
        theme_store: &'a mut ThemeStore,
        view_state: &'a mut ViewState,
        today: NaiveDate,
    ) -> Self {
        App {
            event_store,
            theme_store,
            view_state,
            editor: Editor::default(),
            today,
            selected_hour: DEFAULT_EVENT_HOUR,
            mode: Mode::Normal,
            pick_cursor: 0,
            status: None,
        }
    }

    /// Events on the selected date, in bucket order.
    fn selected_events(&self) -> Vec<CalendarEvent> {
        grid::events_on(self.event_store.events(), self.view_state.selected_date())
    }

    /// Timestamp for a new event on the selected slot.
    fn slot_timestamp(&self) -> chrono::DateTime<chrono::Utc> {
        let hour = match self.view_state.view() {
            ViewMode::Day => self.selected_hour,
            _ => DEFAULT_EVENT_HOUR,
        };
        self.view_state
            .selected_date()
            .and_hms_opt(hour, 0, 0)
            .unwrap_or_else(|| {
                self.view_state
                    .selected_date()
                    .and_hms_opt(0, 0, 0)
                    .unwrap()
            })
            .and_utc()
    }

    /// Returns true if the app should quit.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        if self.editor.is_open() {
            self.handle_editor_key(code);
            return false;
        }
        if let Mode::Pick(intent) = self.mode {
            self.handle_pick_key(code, intent);
            return false;
        }

        // Clear the status message on every keypress
        self.status = None;

        match code {
            KeyCode::Left => {
                let d = self.view_state.selected_date() - Duration::days(1);
                self.view_state.set_selected_date(d);
            }
            KeyCode::Right => {
                let d = self.view_state.selected_date() + Duration::days(1);
                self.view_state.set_selected_date(d);
            }
            KeyCode::Up => {
                if self.view_state.view() == ViewMode::Day {
                    self.selected_hour = self.selected_hour.saturating_sub(1);
                } else {
                    let d = self.view_state.selected_date() - Duration::days(7);
                    self.view_state.set_selected_date(d);
                }
            }
            KeyCode::Down => {
                if self.view_state.view() == ViewMode::Day {
                    self.selected_hour = (self.selected_hour + 1).min(23);
                } else {
                    let d = self.view_state.selected_date() + Duration::days(7);
                    self.view_state.set_selected_date(d);
                }
            }
            KeyCode::Char('n') => self.view_state.step(true),
            KeyCode::Char('p') => self.view_state.step(false),
            KeyCode::Char('m') => self.view_state.set_view(ViewMode::Month),
            KeyCode::Char('w') => self.view_state.set_view(ViewMode::Week),
            KeyCode::Char('d') => self.view_state.set_view(ViewMode::Day),
            KeyCode::Char('t') => self.theme_store.toggle(),
            KeyCode::Char('g') => {
                self.view_state.set_selected_date(self.today);
                self.selected_hour = DEFAULT_EVENT_HOUR;
            }
            KeyCode::Char('a') => self.editor.open_new(self.slot_timestamp()),
            KeyCode::Char('e') | KeyCode::Enter => self.enter_pick(PickIntent::Edit),
            KeyCode::Char('x') => self.enter_pick(PickIntent::Delete),
            KeyCode::Char('q') => return true,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return true,
            _ => {}
        }
        false
    }

    fn enter_pick(&mut self, intent: PickIntent) {
        if self.selected_events().is_empty() {
            self.status = Some(format!(
                "No events on {}",
                self.view_state.selected_date().format("%Y-%m-%d")
            ));
            return;
        }
        self.mode = Mode::Pick(intent);
        self.pick_cursor = 0;
    }

    fn handle_pick_key(&mut self, code: KeyCode, intent: PickIntent) {
        let events = self.selected_events();
        match code {
            KeyCode::Esc => self.mode = Mode::Normal,
            KeyCode::Up => {
                if self.pick_cursor > 0 {
                    self.pick_cursor -= 1;
                }
            }
            KeyCode::Down => {
                if !events.is_empty() && self.pick_cursor < events.len() - 1 {
                    self.pick_cursor += 1;
                }
            }
            KeyCode::Enter => {
                if let Some(event) = events.get(self.pick_cursor) {
                    match intent {
                        PickIntent::Edit => {
                            if let Some(latest) = self.event_store.get(event.id) {
                                self.editor.open_edit(latest);
                            }
                        }
                        PickIntent::Delete => match self.event_store.remove(event.id) {
                            Ok(removed) => {
                                self.status = Some(format!("Deleted \"{}\"", removed.title));
                            }
                            Err(e) => {
                                // Stale UI reference; surface it, don't swallow it.
                                eprintln!("delete failed: {e}");
                                self.status = Some(format!("Delete failed: {e}"));
                            }
                        },
                    }
                }
                self.mode = Mode::Normal;
            }
            _ => {}
        }
    }

    fn handle_editor_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => self.editor.cancel(),
            KeyCode::Tab => self.editor.next_field(),
            KeyCode::Backspace => self.editor.pop_char(),
            KeyCode::Enter => match self.editor.commit(self.event_store) {
                Ok(event) => self.status = Some(format!("Saved \"{}\"", event.title)),
                // Editor stays open and shows the error inline.
                Err(_) => {}
            },
            KeyCode::Char(c) => self.editor.push_char(c),
            _ => {}
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    pub fn render(&mut self, f: &mut Frame) {
        let palette = Palette::for_theme(self.theme_store.theme());
        let size = f.area();

        // Root styling follows the theme so every widget below inherits it.
        let root = Block::default().style(Style::default().bg(palette.bg).fg(palette.fg));
        f.render_widget(root, size);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // header
                Constraint::Min(10),   // grid
                Constraint::Length(2), // status + help
            ])
            .split(size);

        self.render_header(f, chunks[0], &palette);
        let derived = grid::derive(
            self.event_store.events(),
            self.view_state.selected_date(),
            self.view_state.view(),
        );
        match &derived {
            Grid::Month(month) => self.render_month(f, chunks[1], &palette, month),
            Grid::Week(week) => self.render_week(f, chunks[1], &palette, week),
            Grid::Day(day) => self.render_day(f, chunks[1], &palette, day),
        }
        self.render_status(f, chunks[2], &palette);

        if let Mode::Pick(intent) = self.mode {
            self.render_pick_popover(f, size, &palette, intent);
        }
        if self.editor.is_open() {
            self.render_editor_popover(f, size, &palette);
        }
    }

    fn render_header(&self, f: &mut Frame, area: Rect, palette: &Palette) {
        let date = self.view_state.selected_date();
        let title = format!(
            " {}  ·  {} view  ·  {:?} theme  ·  {} events",
            date.format("%Y-%m-%d"),
            self.view_state.view().label(),
            self.theme_store.theme(),
            self.event_store.len(),
        );
        let header = Paragraph::new(Line::from(Span::styled(
            title,
            Style::default()
                .fg(palette.header)
                .add_modifier(Modifier::BOLD),
        )));
        f.render_widget(header, area);
    }

    fn render_month(&self, f: &mut Frame, area: Rect, palette: &Palette, month: &MonthGrid) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(9), Constraint::Min(0)])
            .split(area);

        let title = format!("{} {}", month_name(month.month), month.year);
        let mut lines: Vec<Line> = vec![
            Line::from(Span::styled(
                format!("{title:^28}"),
                Style::default()
                    .fg(palette.header)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                " Su  Mo  Tu  We  Th  Fr  Sa",
                Style::default().fg(palette.dim),
            )),
        ];
        for week in &month.weeks {
            let mut spans = Vec::new();
            for bucket in week {
                let marker = if bucket.events.is_empty() { ' ' } else { '•' };
                let cell = format!(" {:>2}{}", bucket.date.day(), marker);
                let style = day_cell_style(
                    palette,
                    bucket.date == self.view_state.selected_date(),
                    bucket.in_focus_month,
                    bucket.date == self.today,
                    !bucket.events.is_empty(),
                );
                spans.push(Span::styled(cell, style));
            }
            lines.push(Line::from(spans));
        }
        f.render_widget(Paragraph::new(lines), chunks[0]);

        let selected = month
            .bucket(self.view_state.selected_date())
            .map(|bucket| bucket.events.as_slice())
            .unwrap_or_default();
        self.render_agenda(f, chunks[1], palette, selected);
    }

    /// The selected date's events, listed under the month grid.
    fn render_agenda(&self, f: &mut Frame, area: Rect, palette: &Palette, events: &[CalendarEvent]) {
        let date = self.view_state.selected_date();
        let mut lines: Vec<Line> = vec![Line::from(Span::styled(
            format!("{}", date.format("%A, %B %e")),
            Style::default().add_modifier(Modifier::BOLD),
        ))];
        if events.is_empty() {
            lines.push(Line::from(Span::styled(
                "  no events",
                Style::default().fg(palette.dim),
            )));
        }
        for event in events {
            lines.push(event_line(event, palette));
        }
        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(palette.dim));
        f.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_week(&self, f: &mut Frame, area: Rect, palette: &Palette, week: &WeekGrid) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(area);
        let caption = format!(" Week of {}", week.start.format("%B %e, %Y"));
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                caption,
                Style::default().fg(palette.dim),
            ))),
            rows[0],
        );
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 7); 7])
            .split(rows[1]);

        for (bucket, column) in week.days.iter().zip(columns.iter()) {
            let selected = bucket.date == self.view_state.selected_date();
            let title = format!("{} {:>2}", weekday_abbrev(bucket.date), bucket.date.day());
            let border_style = if selected {
                Style::default()
                    .fg(palette.selected_bg)
                    .add_modifier(Modifier::BOLD)
            } else if bucket.date == self.today {
                Style::default().fg(palette.header)
            } else {
                Style::default().fg(palette.dim)
            };
            let block = Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(border_style);

            let lines: Vec<Line> = bucket
                .events
                .iter()
                .map(|event| {
                    Line::from(Span::styled(
                        format!("{} {}", event.date.format("%H:%M"), event.title),
                        Style::default().fg(palette.event),
                    ))
                })
                .collect();
            f.render_widget(Paragraph::new(lines).block(block), *column);
        }
    }

    fn render_day(&self, f: &mut Frame, area: Rect, palette: &Palette, day: &DayGrid) {
        let mut lines: Vec<Line> = Vec::with_capacity(24);
        for bucket in &day.hours {
            let selected = bucket.hour == self.selected_hour;
            let label_style = if selected {
                Style::default()
                    .fg(palette.selected_fg)
                    .bg(palette.selected_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(palette.dim)
            };
            let mut spans = vec![
                Span::styled(format!("{:02}:00", bucket.hour), label_style),
                Span::raw(" │ "),
            ];
            for (i, event) in bucket.events.iter().enumerate() {
                if i > 0 {
                    spans.push(Span::styled(";  ", Style::default().fg(palette.dim)));
                }
                spans.push(Span::styled(
                    event.title.clone(),
                    Style::default().fg(palette.event),
                ));
            }
            lines.push(Line::from(spans));
        }
        let title = format!("{}", day.date.format("%A, %B %e"));
        let block = Block::default()
            .borders(Borders::TOP)
            .title(title)
            .border_style(Style::default().fg(palette.dim));
        f.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_status(&self, f: &mut Frame, area: Rect, palette: &Palette) {
        let status = match &self.status {
            Some(message) => message.clone(),
            None if self.event_store.is_empty() => {
                "No events yet. Press a to add one".to_string()
            }
            None => String::new(),
        };
        let lines = vec![
            Line::from(Span::styled(status, Style::default().fg(palette.header))),
            Line::from(Span::styled(
                "←→↑↓ move · m/w/d view · n/p page · a add · e edit · x delete · t theme · g today · q quit",
                Style::default().fg(palette.dim),
            )),
        ];
        f.render_widget(Paragraph::new(lines), area);
    }

    fn render_pick_popover(&self, f: &mut Frame, area: Rect, palette: &Palette, intent: PickIntent) {
        let events = self.selected_events();
        let height = (events.len() as u16 + 4).min(area.height);
        let popup = centered_rect(46, height, area);
        f.render_widget(Clear, popup);

        let title = match intent {
            PickIntent::Edit => "Edit which event?",
            PickIntent::Delete => "Delete which event?",
        };
        let mut lines = Vec::new();
        for (i, event) in events.iter().enumerate() {
            let style = if i == self.pick_cursor {
                Style::default()
                    .fg(palette.selected_fg)
                    .bg(palette.selected_bg)
            } else {
                Style::default().fg(palette.fg)
            };
            lines.push(Line::from(Span::styled(
                format!(" {} {}", event.date.format("%H:%M"), event.title),
                style,
            )));
        }
        lines.push(Line::from(Span::styled(
            " ↑↓ choose · Enter confirm · Esc cancel",
            Style::default().fg(palette.dim),
        )));
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .style(Style::default().bg(palette.bg).fg(palette.fg));
        f.render_widget(Paragraph::new(lines).block(block), popup);
    }

    fn render_editor_popover(&self, f: &mut Frame, area: Rect, palette: &Palette) {
        let draft = match self.editor.draft() {
            Some(d) => d,
            None => return,
        };
        let popup = centered_rect(52, 9, area);
        f.render_widget(Clear, popup);

        let active = |field: DraftField| {
            if self.editor.field() == field {
                Style::default()
                    .fg(palette.fg)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(palette.fg)
            }
        };
        let when = draft
            .date
            .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();

        let mut lines = vec![
            Line::from(Span::styled(
                format!(" {when}"),
                Style::default().fg(palette.dim),
            )),
            Line::from(vec![
                Span::raw(" Title:       "),
                Span::styled(draft.title.clone(), active(DraftField::Title)),
            ]),
            Line::from(vec![
                Span::raw(" Description: "),
                Span::styled(draft.description.clone(), active(DraftField::Description)),
            ]),
        ];
        if let Some(error) = self.editor.error() {
            lines.push(Line::from(Span::styled(
                format!(" {error}"),
                Style::default()
                    .fg(palette.error)
                    .add_modifier(Modifier::BOLD),
            )));
        }
        lines.push(Line::from(Span::styled(
            " Enter save · Tab field · Esc cancel",
            Style::default().fg(palette.dim),
        )));

        let title = if draft.id.is_some() { "Edit event" } else { "New event" };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .style(Style::default().bg(palette.bg).fg(palette.fg));
        f.render_widget(Paragraph::new(lines).block(block), popup);
    }
}

// ── App event loop ────────────────────────────────────────────────────────────

pub fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;
        if event::poll(StdDuration::from_millis(16))? {
            if let CEvent::Key(key) = event::read()? {
                if app.handle_key(key.code, key.modifiers) {
                    break;
                }
            }
        }
    }
    Ok(())
}

// ── Calendar helpers ──────────────────────────────────────────────────────────

pub(crate) fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}

fn weekday_abbrev(date: NaiveDate) -> &'static str {
    match date.weekday() {
        chrono::Weekday::Sun => "Su",
        chrono::Weekday::Mon => "Mo",
        chrono::Weekday::Tue => "Tu",
        chrono::Weekday::Wed => "We",
        chrono::Weekday::Thu => "Th",
        chrono::Weekday::Fri => "Fr",
        chrono::Weekday::Sat => "Sa",
    }
}

fn event_line(event: &CalendarEvent, palette: &Palette) -> Line<'static> {
    let mut spans = vec![
        Span::styled(
            format!("  {}  ", event.date.format("%H:%M")),
            Style::default().fg(palette.dim),
        ),
        Span::styled(event.title.clone(), Style::default().fg(palette.event)),
    ];
    if !event.description.is_empty() {
        spans.push(Span::styled(
            format!("  {}", event.description),
            Style::default().fg(palette.dim),
        ));
    }
    Line::from(spans)
}

/// Style for one day cell of the month grid.
pub(crate) fn day_cell_style(
    palette: &Palette,
    is_selected: bool,
    in_focus_month: bool,
    is_today: bool,
    has_event: bool,
) -> Style {
    if is_selected {
        Style::default()
            .fg(palette.selected_fg)
            .bg(palette.selected_bg)
            .add_modifier(Modifier::BOLD)
    } else if is_today {
        Style::default()
            .fg(palette.header)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else if !in_focus_month {
        // Adjacent-month padding days are de-emphasized.
        Style::default().fg(palette.dim).add_modifier(Modifier::DIM)
    } else if has_event {
        Style::default().fg(palette.event)
    } else {
        Style::default().fg(palette.fg)
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
