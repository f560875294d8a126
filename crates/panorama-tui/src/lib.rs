pub mod app;
pub mod clipboard;
pub mod event;
pub mod input;
pub mod keymap;
pub mod scene;
pub mod scroll;
pub mod surface;
pub mod text;
pub mod theme;
pub mod themes;
pub mod ui;
pub mod widgets;

pub use app::App;
pub use theme::Theme;
pub use themes::load_theme;
