pub mod clipboard;
pub mod config;
pub mod content;
pub mod error;
pub mod hover;
pub mod motion;
pub mod page;
pub mod reveal;
pub mod surface;
pub mod timers;

pub use config::{AppConfig, EasingType, MotionConfig};
pub use error::{Error, Result};
pub use page::{Dispatch, Page, PageEvent};
pub use surface::{ElementId, Rect, Refs, RenderSurface, StyleUpdate, Viewport};
