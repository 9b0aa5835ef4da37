//! Eased stepping for discrete pan/zoom actions.
//!
//! Keyboard steps and double-taps animate instead of jumping. A
//! [`Glide`] is an explicit stepping function over an injected clock:
//! each tick it yields the incremental pan delta or zoom multiplier to
//! apply, which keeps the math unit-testable without a frame scheduler.

/// Easing curves.
pub mod easing;
/// The eased pan/zoom stepper.
pub mod glide;

pub use easing::EasingFunction;
pub use glide::{Glide, GlideStep, GlideTarget};
