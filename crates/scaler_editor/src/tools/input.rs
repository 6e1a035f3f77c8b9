//! Key bindings and per-frame input.

use std::collections::HashMap;

use scaler_math::Vec2;

use crate::core::ScalerSettings;

/// Abstract editor actions the scaler responds to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EditorAction {
    /// Hold to drag a handle
    Grab,
    /// Enable or disable the scaler tool
    ToggleTool,
}

/// Maps key names to actions. Key names compare case-insensitively.
#[derive(Clone, Debug, Default)]
pub struct ActionMap {
    bindings: HashMap<String, EditorAction>,
}

impl ActionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: &ScalerSettings) -> Self {
        let mut map = Self::new();
        map.bind(&settings.grab_key, EditorAction::Grab);
        map.bind(&settings.toggle_key, EditorAction::ToggleTool);
        map
    }

    /// Bind `key` to `action`, replacing the key's previous action.
    pub fn bind(&mut self, key: &str, action: EditorAction) {
        if let Some(previous) = self.bindings.insert(normalize_key(key), action) {
            if previous != action {
                log::warn!("Key '{}' rebound from {:?} to {:?}", key, previous, action);
            }
        }
    }

    pub fn action_for(&self, key: &str) -> Option<EditorAction> {
        self.bindings.get(&normalize_key(key)).copied()
    }

    /// Whether a key bound to `action` went down this frame
    pub fn pressed(&self, input: &InputFrame, action: EditorAction) -> bool {
        input.pressed.iter().any(|key| self.action_for(key) == Some(action))
    }

    /// Whether a key bound to `action` went up this frame
    pub fn released(&self, input: &InputFrame, action: EditorAction) -> bool {
        input.released.iter().any(|key| self.action_for(key) == Some(action))
    }
}

fn normalize_key(key: &str) -> String {
    key.trim().to_ascii_lowercase()
}

/// Input gathered for one frame.
#[derive(Clone, Debug, Default)]
pub struct InputFrame {
    /// Pointer position in screen pixels, origin top-left
    pub pointer: Vec2,
    /// Keys that went down this frame
    pub pressed: Vec<String>,
    /// Keys that went up this frame
    pub released: Vec<String>,
}

impl InputFrame {
    pub fn at(pointer: Vec2) -> Self {
        Self {
            pointer,
            ..Default::default()
        }
    }

    pub fn press(mut self, key: impl Into<String>) -> Self {
        self.pressed.push(key.into());
        self
    }

    pub fn release(mut self, key: impl Into<String>) -> Self {
        self.released.push(key.into());
        self
    }
}
