//! Gesture interpretation state machine.
//!
//! Classifies raw pointer/touch events into pan and zoom intents over
//! time: single-pointer drags, two-touch pinches, and double-taps. The
//! tracker is deliberately camera-blind — intents stay in screen
//! pixels, and the controller owns the conversion to camera space.

use glam::Vec2;
use web_time::{Duration, Instant};

use super::event::{squared_touch_distance, InputEvent, TouchPoint};

/// Default window within which two single-touch starts count as a
/// double-tap.
pub const DOUBLE_TAP_WINDOW: Duration = Duration::from_millis(400);

/// Current interaction mode.
///
/// Exactly one variant is active at a time; transitions are driven by
/// pointer-down/up and touch-count changes. Keeping the pointer sample
/// and pinch distance inside the variants makes stale-sample states
/// unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionState {
    /// No gesture in progress.
    Idle,
    /// Single pointer or touch held down.
    Dragging {
        /// Last known pointer position; refreshed on every move.
        last: Vec2,
    },
    /// Two touches held down.
    Pinching {
        /// Midpoint of the two touches at the last move.
        last: Vec2,
        /// Squared pixel distance between the touches. Only the sign
        /// of its change is used, which avoids coordinate-offset bias.
        squared_distance: f32,
    },
}

/// What a classified event asks the controller to do.
///
/// All distances are in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureIntent {
    /// Continue a drag by the given pixel delta.
    PanBy {
        /// Pointer movement since the last sample.
        delta: Vec2,
    },
    /// Apply one pinch zoom step.
    PinchStep {
        /// Midpoint of the two touches; the zoom anchor.
        anchor: Vec2,
        /// Direction token: `+1` when the pinch region shrank, `-1`
        /// when it grew, `0` when unchanged.
        direction: f32,
    },
    /// The active drag or pinch ended (zero touches remain).
    DragEnd,
    /// Two quick single-touch starts; zoom toward the tap point.
    DoubleTap {
        /// Position of the second tap.
        anchor: Vec2,
    },
}

/// Tracks interaction state and classifies events into intents.
///
/// Owns nothing but gesture state; feed it pointer/touch events via
/// [`handle`](Self::handle) and apply the returned intents. Wheel and
/// keyboard input never reach the tracker — they are discrete and need
/// no disambiguation over time.
#[derive(Debug)]
pub struct GestureTracker {
    state: InteractionState,
    last_tap: Option<Instant>,
    double_tap_window: Duration,
}

impl GestureTracker {
    /// Tracker in the idle state with the default double-tap window.
    #[must_use]
    pub fn new() -> Self {
        Self::with_double_tap_window(DOUBLE_TAP_WINDOW)
    }

    /// Tracker with a custom double-tap window.
    #[must_use]
    pub fn with_double_tap_window(window: Duration) -> Self {
        Self {
            state: InteractionState::Idle,
            last_tap: None,
            double_tap_window: window,
        }
    }

    /// Current interaction state.
    #[must_use]
    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// Whether a single-pointer drag is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, InteractionState::Dragging { .. })
    }

    /// Whether a two-touch pinch is active.
    #[must_use]
    pub fn is_pinching(&self) -> bool {
        matches!(self.state, InteractionState::Pinching { .. })
    }

    /// Last known pointer sample, if a gesture is active.
    #[must_use]
    pub fn pointer_sample(&self) -> Option<Vec2> {
        match self.state {
            InteractionState::Idle => None,
            InteractionState::Dragging { last }
            | InteractionState::Pinching { last, .. } => Some(last),
        }
    }

    /// Drop any in-progress gesture and tap memory.
    pub fn reset(&mut self) {
        self.state = InteractionState::Idle;
        self.last_tap = None;
    }

    /// Classify one event, returning the intent it produces (if any).
    ///
    /// Events that make no sense in the current state (a move with no
    /// drag active, a touch list of unexpected size) are guarded
    /// no-ops, never errors.
    pub fn handle(
        &mut self,
        event: &InputEvent,
        now: Instant,
    ) -> Option<GestureIntent> {
        match event {
            InputEvent::PointerDown { position } => {
                self.state = InteractionState::Dragging { last: *position };
                None
            }
            InputEvent::PointerMove { position } => self.drag_to(*position),
            InputEvent::PointerUp | InputEvent::TouchCancel => self.end_all(),
            InputEvent::TouchStart { touches } => {
                self.touch_start(touches, now)
            }
            InputEvent::TouchMove { touches } => self.touch_move(touches),
            InputEvent::TouchEnd { remaining } => self.touch_end(remaining),
            // Wheel is discrete; the controller applies it directly.
            InputEvent::Wheel { .. } => None,
        }
    }

    /// Advance a drag to a new position, yielding the pixel delta.
    fn drag_to(&mut self, position: Vec2) -> Option<GestureIntent> {
        let InteractionState::Dragging { last } = self.state else {
            return None;
        };
        let delta = position - last;
        self.state = InteractionState::Dragging { last: position };
        Some(GestureIntent::PanBy { delta })
    }

    /// End whatever gesture is active.
    fn end_all(&mut self) -> Option<GestureIntent> {
        if self.state == InteractionState::Idle {
            return None;
        }
        self.state = InteractionState::Idle;
        Some(GestureIntent::DragEnd)
    }

    fn touch_start(
        &mut self,
        touches: &[TouchPoint],
        now: Instant,
    ) -> Option<GestureIntent> {
        match touches {
            [] => None,
            [touch] => {
                let position = touch.position;
                let is_double_tap = self
                    .last_tap
                    .is_some_and(|t| now.duration_since(t) < self.double_tap_window);

                if is_double_tap {
                    // Short-circuit: the second tap zooms instead of
                    // starting another drag.
                    self.last_tap = None;
                    self.state = InteractionState::Idle;
                    log::debug!("double tap at {position}");
                    Some(GestureIntent::DoubleTap { anchor: position })
                } else {
                    self.last_tap = Some(now);
                    self.state =
                        InteractionState::Dragging { last: position };
                    None
                }
            }
            [a, b, ..] => {
                // A second finger promotes any drag to a pinch and
                // invalidates tap memory.
                self.last_tap = None;
                self.state = InteractionState::Pinching {
                    last: (a.position + b.position) / 2.0,
                    squared_distance: squared_touch_distance(*a, *b),
                };
                None
            }
        }
    }

    fn touch_move(&mut self, touches: &[TouchPoint]) -> Option<GestureIntent> {
        match touches {
            [] => None,
            [touch] => match self.state {
                InteractionState::Dragging { .. } => {
                    self.drag_to(touch.position)
                }
                // A pinch that lost a finger without a touch-end event:
                // fall back to dragging from a fresh sample.
                InteractionState::Pinching { .. } => {
                    self.state = InteractionState::Dragging {
                        last: touch.position,
                    };
                    None
                }
                InteractionState::Idle => None,
            },
            [a, b, ..] => self.pinch_to(*a, *b),
        }
    }

    /// Advance a pinch, yielding a zoom direction token.
    fn pinch_to(
        &mut self,
        a: TouchPoint,
        b: TouchPoint,
    ) -> Option<GestureIntent> {
        let current = squared_touch_distance(a, b);
        let anchor = (a.position + b.position) / 2.0;

        let InteractionState::Pinching {
            squared_distance, ..
        } = self.state
        else {
            // Two-touch move without a recorded start: record state
            // now, produce a step on the next move.
            self.state = InteractionState::Pinching {
                last: anchor,
                squared_distance: current,
            };
            return None;
        };

        let direction = if current < squared_distance {
            1.0
        } else if current > squared_distance {
            -1.0
        } else {
            0.0
        };

        self.state = InteractionState::Pinching {
            last: anchor,
            squared_distance: current,
        };
        Some(GestureIntent::PinchStep { anchor, direction })
    }

    fn touch_end(
        &mut self,
        remaining: &[TouchPoint],
    ) -> Option<GestureIntent> {
        match remaining {
            [] => self.end_all(),
            [touch, ..] => {
                // Refresh the sample from the surviving touch so the
                // next move's delta is relative to it, and drop from
                // pinch to drag when below two contacts.
                match self.state {
                    InteractionState::Idle => {}
                    InteractionState::Dragging { .. } => {
                        self.state = InteractionState::Dragging {
                            last: touch.position,
                        };
                    }
                    InteractionState::Pinching { .. } => {
                        if let [a, b, ..] = remaining {
                            self.state = InteractionState::Pinching {
                                last: (a.position + b.position) / 2.0,
                                squared_distance: squared_touch_distance(
                                    *a, *b,
                                ),
                            };
                        } else {
                            self.state = InteractionState::Dragging {
                                last: touch.position,
                            };
                        }
                    }
                }
                None
            }
        }
    }
}

impl Default for GestureTracker {
    fn default() -> Self {
        Self::new()
    }
}
