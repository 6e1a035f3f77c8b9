//! Editor state shared with tools.

use scaler_core::TargetId;

use super::history::{HistoryResult, UndoHistory};
use super::selection::SelectionManager;
use crate::scene::Scene;

/// Everything the level editor owns that the scaler reads or writes.
#[derive(Debug)]
pub struct EditorState {
    pub scene: Scene,
    pub selection: SelectionManager,
    pub history: UndoHistory,
    /// Editor grid size, used as the snap step
    pub grid_step: f32,
    /// False once the level editor session has closed
    pub session_alive: bool,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            scene: Scene::new(),
            selection: SelectionManager::new(),
            history: UndoHistory::new(),
            grid_step: 1.0,
            session_alive: true,
        }
    }
}

impl EditorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Undo the last transaction and restore the selection it was made with.
    pub fn undo(&mut self) -> HistoryResult<()> {
        let selection = self.history.undo(&mut self.scene)?;
        self.reselect(selection);
        Ok(())
    }

    /// Redo the last undone transaction and restore its selection.
    pub fn redo(&mut self) -> HistoryResult<()> {
        let selection = self.history.redo(&mut self.scene)?;
        self.reselect(selection);
        Ok(())
    }

    /// Delete an object from the scene and the selection.
    pub fn delete_object(&mut self, id: TargetId) -> bool {
        self.selection.remove_object(id);
        self.scene.remove(id).is_some()
    }

    fn reselect(&mut self, selection: Vec<TargetId>) {
        let live: Vec<_> = selection
            .into_iter()
            .filter(|&id| self.scene.get(id).is_some())
            .collect();
        self.selection.select_multiple(live);
    }
}
