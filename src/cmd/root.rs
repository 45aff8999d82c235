use crate::data::{AppSettings, EventStore, ThemeStore, ViewState, persistence::get_data_dir, source};
use crate::ui::app_view::{App, run_app};
use crate::ui::{restore_terminal, setup_terminal};
use anyhow::Result;
use chrono::Local;

pub fn run(view_override: Option<&str>) -> Result<()> {
    let settings = AppSettings::load()?;
    let mut theme_store = ThemeStore::load();
    let mut event_store = EventStore::default();
    // The one startup load; failure degrades to an empty calendar.
    event_store.load_initial(source::fetch_events());

    let today = Local::now().date_naive();
    let mut view_state = ViewState::new(today, settings.default_view);
    if let Some(v) = view_override {
        // Unknown values are rejected with a log; the configured view stays.
        view_state.set_view_str(v);
    }

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen
        );
        original_hook(info);
    }));

    let mut terminal = setup_terminal()?;

    let mut app = App::new(&mut event_store, &mut theme_store, &mut view_state, today);
    let result = run_app(&mut terminal, &mut app);

    restore_terminal(&mut terminal)?;

    // Drop app to release its borrows before saving
    drop(app);

    let data_dir = get_data_dir().unwrap_or_else(|_| std::path::PathBuf::from("./config"));
    if let Err(e) = source::save_events(event_store.events(), &data_dir) {
        // Non-fatal: the session's edits are lost but the exit stays clean.
        eprintln!("failed to save events: {e:#}");
    }

    result
}
