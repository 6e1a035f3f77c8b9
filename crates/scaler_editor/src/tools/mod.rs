//! Editor tools and their input handling.

mod input;
mod scaler_tool;

pub use input::{ActionMap, EditorAction, InputFrame};
pub use scaler_tool::ScalerTool;
