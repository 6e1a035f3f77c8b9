//! On-screen feedback.

mod tooltip;

pub use tooltip::{DimensionTooltip, TooltipBox};
