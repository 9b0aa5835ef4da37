use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Control", inline)]
#[serde(default)]
/// Pan/zoom speed, clamp and timing parameters.
pub struct ControlOptions {
    /// Zoom sensitivity: distance multiplier per unit of wheel delta.
    #[schemars(title = "Zoom Speed", range(min = 0.001, max = 0.3), extend("step" = 0.005))]
    pub speed: f32,
    /// Smallest allowed camera distance.
    #[schemars(title = "Min Distance", range(min = 0.0))]
    pub min_scale: f32,
    /// Largest allowed camera distance (unbounded by default).
    #[schemars(title = "Max Distance", range(min = 0.0))]
    pub max_scale: f32,
    /// Two taps within this window count as a double-tap.
    #[schemars(skip)]
    pub double_tap_window_ms: u64,
    /// Content magnification applied by a double-tap.
    #[schemars(title = "Double-Tap Zoom", range(min = 1.0, max = 4.0), extend("step" = 0.25))]
    pub double_tap_zoom: f32,
    /// Duration of keyboard/double-tap glide animations.
    #[schemars(skip)]
    pub glide_duration_ms: u64,
    /// Arrow-key pan step in pixels.
    #[schemars(title = "Key Pan Step", range(min = 1.0, max = 400.0), extend("step" = 1.0))]
    pub key_pan_step: f32,
    /// Wheel-delta equivalent of one keyboard zoom step.
    #[schemars(title = "Key Zoom Step", range(min = 1.0, max = 10.0), extend("step" = 0.5))]
    pub key_zoom_delta: f32,
}

impl Default for ControlOptions {
    fn default() -> Self {
        Self {
            speed: 0.03,
            min_scale: 1e-4,
            max_scale: f32::INFINITY,
            double_tap_window_ms: 400,
            double_tap_zoom: 1.75,
            glide_duration_ms: 200,
            key_pan_step: 40.0,
            key_zoom_delta: 5.0,
        }
    }
}
