//! Core editor types and state management.

pub mod editor_state;
mod history;
mod selection;
mod settings;

pub use editor_state::EditorState;
pub use history::{HistoryError, HistoryResult, Transaction, UndoHistory};
pub use selection::{SelectionManager, SelectionMode};
pub use settings::{ScalerSettings, SettingsError, TooltipSettings, SETTINGS_FILE_NAME};
