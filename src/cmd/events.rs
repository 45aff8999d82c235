use crate::data::CalendarEvent;
use crate::data::source;
use anyhow::Result;

pub fn run() -> Result<()> {
    let mut events = source::fetch_events();
    sort_for_listing(&mut events);
    if events.is_empty() {
        println!("No events.");
        return Ok(());
    }
    for event in &events {
        let mut line = format!(
            "{:>4}  {}  {}",
            event.id,
            event.date.format("%Y-%m-%d %H:%M"),
            event.title
        );
        if !event.description.is_empty() {
            line.push_str(&format!("  ({})", event.description));
        }
        println!("{line}");
    }
    Ok(())
}

fn sort_for_listing(events: &mut [CalendarEvent]) {
    events.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));
}
