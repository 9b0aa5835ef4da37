use glam::Vec2;

/// Platform-agnostic input events.
///
/// All coordinates are in pixels relative to the owning surface's
/// top-left corner — the same space as
/// [`Viewport`](crate::camera::Viewport). Hosts whose events arrive in
/// client or window coordinates must translate before calling in; the
/// two bases differ whenever the surface is offset within its parent.
///
/// # Example
///
/// ```ignore
/// controller.handle_event(
///     &InputEvent::PointerMove { position: Vec2::new(100.0, 200.0) },
///     viewport,
///     Instant::now(),
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Primary pointer button pressed.
    PointerDown {
        /// Press position.
        position: Vec2,
    },
    /// Pointer moved to an absolute position.
    PointerMove {
        /// New position.
        position: Vec2,
    },
    /// Primary pointer button released.
    PointerUp,
    /// One or more touches began; carries every active touch.
    TouchStart {
        /// All currently active touches.
        touches: Vec<TouchPoint>,
    },
    /// Active touches moved; carries every active touch.
    TouchMove {
        /// All currently active touches.
        touches: Vec<TouchPoint>,
    },
    /// Touches lifted; carries the touches that remain down.
    TouchEnd {
        /// Touches still in contact after the lift.
        remaining: Vec<TouchPoint>,
    },
    /// The platform cancelled the touch sequence.
    TouchCancel,
    /// Scroll wheel turned (positive `delta` zooms the camera out).
    Wheel {
        /// Signed wheel delta, in line/notch units.
        delta: f32,
        /// Cursor position when the wheel turned; the zoom anchor.
        position: Vec2,
    },
}

/// A single tracked touch contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    /// Contact position.
    pub position: Vec2,
}

impl TouchPoint {
    /// Touch contact at the given surface position.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
        }
    }
}

/// Squared pixel distance between two touch contacts.
///
/// Pinch handling compares squared distances only for their sign of
/// change, so the square root is never taken.
#[must_use]
pub fn squared_touch_distance(a: TouchPoint, b: TouchPoint) -> f32 {
    let d = a.position - b.position;
    d.length_squared()
}
