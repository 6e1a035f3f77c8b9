//! On-screen readout of the dragged axis length.

use scaler_core::Scaler;
use scaler_math::Vec2;

use crate::core::TooltipSettings;

/// A box drawn next to the pointer.
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipBox {
    /// Top-left corner, screen pixels
    pub position: Vec2,
    pub size: Vec2,
    pub text: String,
}

/// Builds the dimension tooltip shown while a handle is held.
#[derive(Clone, Debug, Default)]
pub struct DimensionTooltip {
    settings: TooltipSettings,
}

impl DimensionTooltip {
    pub fn new(settings: TooltipSettings) -> Self {
        Self { settings }
    }

    /// The box to draw this frame, if a handle is being dragged.
    pub fn layout(&self, scaler: &Scaler, pointer: Vec2) -> Option<TooltipBox> {
        let text = scaler.dragged_dimension_text()?;
        Some(TooltipBox {
            position: Vec2::new(pointer.x + self.settings.offset_x, pointer.y - self.settings.offset_y),
            size: Vec2::new(self.settings.width, self.settings.height),
            text: text.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_without_drag() {
        let tooltip = DimensionTooltip::default();
        assert!(tooltip.layout(&Scaler::default(), Vec2::new(50.0, 50.0)).is_none());
    }
}
