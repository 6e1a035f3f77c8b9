//! Undo/redo history of scaler drags.
//!
//! Each grab→release cycle is one transaction holding JSON snapshots of the
//! selection before and after the drag. Undo and redo write those snapshots
//! back into the scene.

use scaler_core::{TargetId, TargetStore};
use thiserror::Error;

use crate::scene::SceneSnapshot;

/// Undo history errors
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("snapshot serialization failed: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("nothing to undo")]
    NothingToUndo,

    #[error("nothing to redo")]
    NothingToRedo,
}

pub type HistoryResult<T> = Result<T, HistoryError>;

/// One recorded resize.
#[derive(Clone, Debug, PartialEq)]
pub struct Transaction {
    /// Identifier of the tool that recorded it
    pub key: String,
    /// Selection at the time, in selection order
    pub selection: Vec<TargetId>,
    before: String,
    after: String,
}

impl Transaction {
    pub fn new(
        key: impl Into<String>,
        selection: Vec<TargetId>,
        before: &SceneSnapshot,
        after: &SceneSnapshot,
    ) -> HistoryResult<Self> {
        Ok(Self {
            key: key.into(),
            selection,
            before: before.to_json()?,
            after: after.to_json()?,
        })
    }

    pub fn before(&self) -> HistoryResult<SceneSnapshot> {
        Ok(SceneSnapshot::from_json(&self.before)?)
    }

    pub fn after(&self) -> HistoryResult<SceneSnapshot> {
        Ok(SceneSnapshot::from_json(&self.after)?)
    }
}

/// Undo/redo history stack.
#[derive(Debug)]
pub struct UndoHistory {
    /// Transactions that can be undone
    undo_stack: Vec<Transaction>,
    /// Transactions that can be redone
    redo_stack: Vec<Transaction>,
    /// Maximum history size
    max_size: usize,
}

impl Default for UndoHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoHistory {
    /// Default maximum history size.
    pub const DEFAULT_MAX_SIZE: usize = 100;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_MAX_SIZE)
    }

    pub fn with_capacity(max_size: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_size,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Key of the next transaction to undo.
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack.last().map(|t| t.key.as_str())
    }

    /// Key of the next transaction to redo.
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack.last().map(|t| t.key.as_str())
    }

    /// Record a finished resize as one undoable step.
    pub fn commit(
        &mut self,
        key: &str,
        selection: &[TargetId],
        before: &SceneSnapshot,
        after: &SceneSnapshot,
    ) -> HistoryResult<()> {
        if before == after {
            log::debug!("Skipping '{}' transaction: nothing changed", key);
            return Ok(());
        }
        let transaction = Transaction::new(key, selection.to_vec(), before, after)?;
        log::info!("Recorded '{}' for {} object(s)", key, after.objects.len());

        self.undo_stack.push(transaction);
        self.redo_stack.clear(); // Clear redo on new action

        // Trim if over limit
        if self.undo_stack.len() > self.max_size {
            let excess = self.undo_stack.len() - self.max_size;
            self.undo_stack.drain(..excess);
        }
        Ok(())
    }

    /// Restore the state before the last transaction. Returns the selection
    /// it was recorded with.
    pub fn undo(&mut self, store: &mut dyn TargetStore) -> HistoryResult<Vec<TargetId>> {
        let transaction = self.undo_stack.pop().ok_or(HistoryError::NothingToUndo)?;
        let restored = match transaction.before() {
            Ok(snapshot) => snapshot.apply(store),
            Err(e) => {
                self.undo_stack.push(transaction);
                return Err(e);
            }
        };
        log::info!("Undo '{}': {} object(s) restored", transaction.key, restored);

        let selection = transaction.selection.clone();
        self.redo_stack.push(transaction);
        Ok(selection)
    }

    /// Re-apply the last undone transaction.
    pub fn redo(&mut self, store: &mut dyn TargetStore) -> HistoryResult<Vec<TargetId>> {
        let transaction = self.redo_stack.pop().ok_or(HistoryError::NothingToRedo)?;
        let restored = match transaction.after() {
            Ok(snapshot) => snapshot.apply(store),
            Err(e) => {
                self.redo_stack.push(transaction);
                return Err(e);
            }
        };
        log::info!("Redo '{}': {} object(s) restored", transaction.key, restored);

        let selection = transaction.selection.clone();
        self.undo_stack.push(transaction);
        Ok(selection)
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Scene;
    use scaler_core::LocalBounds;
    use scaler_math::{Transform, Vec3};

    fn scene_with_block() -> (Scene, TargetId) {
        let mut scene = Scene::new();
        let id = scene.spawn("Block", Transform::IDENTITY, LocalBounds::UNIT);
        (scene, id)
    }

    fn stretch(scene: &mut Scene, id: TargetId, x: f32) {
        let transform = Transform::IDENTITY.with_scale(Vec3::new(x, 1.0, 1.0));
        scene.set_transform(id, transform);
    }

    #[test]
    fn test_history_basic() {
        let (mut scene, id) = scene_with_block();
        let mut history = UndoHistory::new();
        assert!(!history.can_undo());
        assert!(!history.can_redo());

        let before = SceneSnapshot::capture(&scene, &[id]);
        stretch(&mut scene, id, 3.0);
        let after = SceneSnapshot::capture(&scene, &[id]);
        history.commit("Gizmo1", &[id], &before, &after).unwrap();

        assert!(history.can_undo());
        assert_eq!(history.undo_description(), Some("Gizmo1"));
    }

    #[test]
    fn test_history_undo_redo() {
        let (mut scene, id) = scene_with_block();
        let mut history = UndoHistory::new();

        let before = SceneSnapshot::capture(&scene, &[id]);
        stretch(&mut scene, id, 3.0);
        let after = SceneSnapshot::capture(&scene, &[id]);
        history.commit("Gizmo1", &[id], &before, &after).unwrap();

        assert_eq!(history.undo(&mut scene).unwrap(), vec![id]);
        assert_eq!(scene.transform(id).map(|t| t.scale), Some(Vec3::ONE));
        assert_eq!(history.undo_count(), 0);
        assert_eq!(history.redo_count(), 1);
        assert_eq!(history.redo_description(), Some("Gizmo1"));
        assert_eq!(history.undo_description(), None);

        history.redo(&mut scene).unwrap();
        assert_eq!(scene.transform(id).map(|t| t.scale.x), Some(3.0));
        assert_eq!(history.undo_count(), 1);
        assert_eq!(history.redo_count(), 0);
    }

    #[test]
    fn test_empty_stacks() {
        let (mut scene, _) = scene_with_block();
        let mut history = UndoHistory::new();
        assert!(matches!(history.undo(&mut scene), Err(HistoryError::NothingToUndo)));
        assert!(matches!(history.redo(&mut scene), Err(HistoryError::NothingToRedo)));
    }

    #[test]
    fn test_unchanged_drag_not_recorded() {
        let (scene, id) = scene_with_block();
        let mut history = UndoHistory::new();
        let snapshot = SceneSnapshot::capture(&scene, &[id]);
        history.commit("Gizmo1", &[id], &snapshot, &snapshot).unwrap();
        assert!(!history.can_undo());
    }

    #[test]
    fn test_capacity_trims_oldest() {
        let (mut scene, id) = scene_with_block();
        let mut history = UndoHistory::with_capacity(3);
        for step in 1..=5 {
            let before = SceneSnapshot::capture(&scene, &[id]);
            stretch(&mut scene, id, step as f32 + 1.0);
            let after = SceneSnapshot::capture(&scene, &[id]);
            history.commit("Gizmo1", &[id], &before, &after).unwrap();
        }
        assert_eq!(history.undo_count(), 3);

        while history.can_undo() {
            history.undo(&mut scene).unwrap();
        }
        // The oldest surviving step started from a 3x stretch.
        assert_eq!(scene.transform(id).map(|t| t.scale.x), Some(3.0));
    }
}
