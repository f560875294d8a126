//! Native vertical scrolling for the stacked layout
//!
//! In vertical mode the engine passes wheel input through and the host
//! scrolls the page itself. This module eases that scroll over a fixed
//! duration instead of jumping row by row.
//!
//! # Architecture
//!
//! ## L4 Atomic Layer
//! - `panorama_core::motion` - easing curves, progress and lerp
//!
//! ## L3 Molecular Layer
//! - `animation` - Scroll animation controller combining atoms
//!
//! # Usage
//!
//! ```ignore
//! use panorama_tui::scroll::ScrollAnimator;
//!
//! let mut animator = ScrollAnimator::new(Duration::from_millis(150), EasingType::Cubic);
//!
//! // Queue a scroll; deltas are batched until the next update
//! animator.scroll_by(3);
//!
//! // In main loop, update each frame and get current position
//! let rows = animator.update(max_scroll, Instant::now());
//! ```

// L3 Molecular Layer
pub mod animation;

pub use animation::ScrollAnimator;
