use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::input::KeyAction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Configurable keyboard bindings mapping actions to key codes.
///
/// Key strings use the `winit::keyboard::KeyCode` debug format:
/// `"ArrowLeft"`, `"Equal"`, `"Minus"`, etc. Several keys may map to
/// the same action (main row and numpad zoom keys do by default).
pub struct KeybindingOptions {
    /// Maps action → key strings (e.g. `ZoomIn` → `["Equal", "NumpadAdd"]`).
    pub bindings: HashMap<KeyAction, Vec<String>>,
    /// Reverse lookup cache (key string → action). Rebuilt on load.
    #[serde(skip)]
    key_to_action: HashMap<String, KeyAction>,
}

impl Default for KeybindingOptions {
    fn default() -> Self {
        let bindings = HashMap::from([
            (KeyAction::PanLeft, vec!["ArrowLeft".into()]),
            (KeyAction::PanRight, vec!["ArrowRight".into()]),
            (KeyAction::PanUp, vec!["ArrowUp".into()]),
            (KeyAction::PanDown, vec!["ArrowDown".into()]),
            (
                KeyAction::ZoomIn,
                vec!["Equal".into(), "NumpadAdd".into()],
            ),
            (
                KeyAction::ZoomOut,
                vec!["Minus".into(), "NumpadSubtract".into()],
            ),
        ]);

        let mut opts = Self {
            bindings,
            key_to_action: HashMap::new(),
        };
        opts.rebuild_reverse_map();
        opts
    }
}

impl KeybindingOptions {
    /// Rebuild the reverse lookup map (key string → action).
    pub fn rebuild_reverse_map(&mut self) {
        self.key_to_action.clear();
        for (action, keys) in &self.bindings {
            for key in keys {
                let _ = self.key_to_action.insert(key.clone(), *action);
            }
        }
    }

    /// Look up the action for a key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<KeyAction> {
        self.key_to_action.get(key).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings_cover_all_actions() {
        let opts = KeybindingOptions::default();
        assert_eq!(opts.lookup("ArrowUp"), Some(KeyAction::PanUp));
        assert_eq!(opts.lookup("ArrowDown"), Some(KeyAction::PanDown));
        assert_eq!(opts.lookup("NumpadAdd"), Some(KeyAction::ZoomIn));
        assert_eq!(opts.lookup("NumpadSubtract"), Some(KeyAction::ZoomOut));
    }

    #[test]
    fn test_reverse_map_rebuild_after_edit() {
        let mut opts = KeybindingOptions::default();
        let _ = opts
            .bindings
            .insert(KeyAction::ZoomIn, vec!["KeyI".into()]);
        opts.rebuild_reverse_map();
        assert_eq!(opts.lookup("KeyI"), Some(KeyAction::ZoomIn));
        assert_eq!(opts.lookup("Equal"), None);
    }
}
