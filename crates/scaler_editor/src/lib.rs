//! Grid Scaler level-editor integration
//!
//! Hosts the [`scaler_core::Scaler`] inside a level editor.
//!
//! ## Features
//!
//! - **Settings**: key bindings, snap fallback, handle layer and tooltip layout in a TOML file
//! - **Input**: key names mapped to grab and toggle actions
//! - **Scene**: in-memory block store the scaler resizes
//! - **Selection**: ordered multi-select; the last block anchors the box
//! - **Undo/Redo**: each drag recorded as one transaction of JSON snapshots
//! - **Tooltip**: dragged axis length drawn next to the pointer
//!
//! ## Architecture
//!
//! ```text
//! InputFrame → ScalerTool → Scaler::tick → Scene
//!                  │
//!                  └──► UndoHistory (grab → release)
//! ```

pub mod core;
pub mod scene;
pub mod tools;
pub mod ui;
pub mod viewport;

// Re-export commonly used types
pub use self::core::{
    EditorState,
    HistoryError,
    ScalerSettings,
    SelectionManager,
    SelectionMode,
    SettingsError,
    SETTINGS_FILE_NAME,
    TooltipSettings,
    UndoHistory,
};

pub use scene::{Scene, SceneObject, SceneSnapshot};

pub use tools::{ActionMap, EditorAction, InputFrame, ScalerTool};

pub use ui::{DimensionTooltip, TooltipBox};

pub use viewport::ViewportCamera;
