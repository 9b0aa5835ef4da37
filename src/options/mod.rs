//! Centralized controller options with TOML preset support.
//!
//! All tuning knobs (zoom speed, distance clamps, gesture timing,
//! keyboard bindings) are consolidated here. Options serialize to/from
//! TOML so applications can ship interaction presets.

mod control;
mod keybindings;

use std::path::Path;

pub use control::ControlOptions;
pub use keybindings::KeybindingOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::DriftError;

/// Top-level options container. Both sub-structs use `#[serde(default)]`
/// so partial TOML files (e.g. only overriding `[control]`) work
/// correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Speed, clamp and timing knobs.
    pub control: ControlOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, DriftError> {
        let content = std::fs::read_to_string(path).map_err(DriftError::Io)?;
        let mut options: Self = toml::from_str(&content)
            .map_err(|e| DriftError::OptionsParse(e.to_string()))?;
        options.keybindings.rebuild_reverse_map();
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), DriftError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| DriftError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(DriftError::Io)?;
        }
        std::fs::write(path, content).map_err(DriftError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyAction;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[control]
speed = 0.05
";
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.control.speed, 0.05);
        // Everything else should be default
        assert_eq!(opts.control.min_scale, 1e-4);
        assert_eq!(opts.control.double_tap_window_ms, 400);
    }

    #[test]
    fn keybinding_lookup() {
        let opts = Options::default();
        assert_eq!(
            opts.keybindings.lookup("ArrowLeft"),
            Some(KeyAction::PanLeft)
        );
        assert_eq!(opts.keybindings.lookup("Equal"), Some(KeyAction::ZoomIn));
        assert_eq!(opts.keybindings.lookup("KeyZ"), None);
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        // Control knobs are UI-exposed
        assert!(props.contains_key("control"));
        // Keybindings are not
        assert!(!props.contains_key("keybindings"));

        let control = &props["control"]["properties"];
        assert!(control.get("speed").is_some());
        assert!(control.get("max_scale").is_some());
    }
}
