pub mod event;
pub mod persistence;
pub mod settings;
pub mod source;
pub mod theme;
pub mod view_state;

pub use event::{CalendarEvent, EventDraft, EventPatch, EventStore, StoreError};
pub use persistence::Persist;
pub use settings::AppSettings;
pub use theme::{Theme, ThemeStore};
pub use view_state::{ViewMode, ViewState};
