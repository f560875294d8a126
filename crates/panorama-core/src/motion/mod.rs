//! Motion system for the Panorama page
//!
//! # Architecture
//!
//! ## L4 Atomic Layer
//! - `lerp` - Interpolation and time-progress primitives
//! - `easing` - Easing curves for time-based transitions
//! - `transform` - Ordered transform lists and their matrices
//! - `state` - Scroll and cursor state records
//!
//! ## L3 Molecular Layer
//! - `input` - Pointer and wheel capture
//! - `layout` - Layout measurement and responsive mode
//! - `frame` - The per-frame animation tick

// L4 Atomic Layer
pub mod easing;
pub mod lerp;
pub mod state;
pub mod transform;

// L3 Molecular Layer
pub mod frame;
pub mod input;
pub mod layout;

pub use easing::{EasingType, EasingTypeExt};
pub use frame::{FrameLoop, FrameReport, MotionState};
pub use input::WheelOutcome;
pub use layout::{LayoutMetrics, LayoutMode};
pub use lerp::lerp;
pub use state::{CursorState, ScrollState};
pub use transform::{Affine, Transform, TransformOp};
