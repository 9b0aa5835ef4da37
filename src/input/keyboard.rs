use serde::{Deserialize, Serialize};

/// Controller actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable:
/// ```toml
/// [keybindings]
/// pan_left = "ArrowLeft"
/// zoom_in = "Equal"
/// ```
///
/// Every action triggers an eased glide rather than an instantaneous
/// jump; see
/// [`PanZoomController::handle_key`](crate::controller::PanZoomController::handle_key).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Reveal content to the left (camera x decreases).
    PanLeft,
    /// Reveal content to the right.
    PanRight,
    /// Reveal content above.
    PanUp,
    /// Reveal content below.
    PanDown,
    /// Step the camera closer.
    ZoomIn,
    /// Step the camera away.
    ZoomOut,
}
