mod cursor;
mod popup;
mod progress;
mod status_bar;
mod strip;

pub use cursor::CursorWidget;
pub use popup::PopupWidget;
pub use progress::ProgressWidget;
pub use status_bar::StatusBarWidget;
pub use strip::StripWidget;
