//! Scaler configuration

use serde::{Deserialize, Serialize};

use crate::host::RaycastLayer;
use crate::snap::DEFAULT_ZERO_STEP;

/// Tunables of the scaler gizmo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScalerConfig {
    /// Step used when the host grid step is zero or negative
    pub zero_step: f32,

    /// Camera distance divided by this gives a handle's visual scale
    pub handle_screen_divisor: f32,

    /// Raycast layer the handles live on
    pub handle_layer: RaycastLayer,

    /// Tolerance for "has this position/rotation changed" tests
    pub change_epsilon: f32,
}

impl Default for ScalerConfig {
    fn default() -> Self {
        Self {
            zero_step: DEFAULT_ZERO_STEP,
            handle_screen_divisor: 30.0,
            handle_layer: RaycastLayer::GIZMO,
            change_epsilon: 1e-5,
        }
    }
}

impl ScalerConfig {
    /// Visual scale for a handle `distance` units from the camera
    pub fn handle_visual_scale(&self, distance: f32) -> f32 {
        if self.handle_screen_divisor > 0.0 {
            distance / self.handle_screen_divisor
        } else {
            distance
        }
    }
}
