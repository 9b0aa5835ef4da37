//! Platform-agnostic input events and gesture classification.
//!
//! Hosts translate their windowing system's events into [`InputEvent`]
//! values; the [`gesture::GestureTracker`] state machine turns those
//! into pan/zoom intents for the controller to apply.

/// Platform-agnostic input event types.
pub mod event;
/// Gesture interpretation state machine.
pub mod gesture;
/// Keyboard actions bindable to pan/zoom steps.
pub mod keyboard;

pub use event::{InputEvent, TouchPoint};
pub use gesture::{GestureIntent, GestureTracker, InteractionState};
pub use keyboard::KeyAction;
