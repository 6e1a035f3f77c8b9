//! Block selection with multi-select support.
//!
//! Selection order matters to the scaler: the last selected block is the
//! primary one and becomes the anchor the box is oriented to.

use scaler_core::TargetId;

/// How a click changes the selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// Replace current selection (normal click)
    #[default]
    Replace,
    /// Add to current selection (Shift+click)
    Add,
    /// Remove from current selection (Ctrl+click)
    Remove,
    /// Toggle selection state (Ctrl+Shift+click)
    Toggle,
}

impl SelectionMode {
    /// Determine selection mode from modifier keys.
    pub fn from_modifiers(shift: bool, ctrl: bool) -> Self {
        match (shift, ctrl) {
            (true, true) => Self::Toggle,
            (true, false) => Self::Add,
            (false, true) => Self::Remove,
            (false, false) => Self::Replace,
        }
    }
}

/// Ordered selection of scene objects.
#[derive(Clone, Debug, Default)]
pub struct SelectionManager {
    /// Currently selected objects (in selection order)
    selected: Vec<TargetId>,
    /// Whether selection has changed since last checked
    dirty: bool,
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the primary (last selected) object.
    pub fn primary(&self) -> Option<TargetId> {
        self.selected.last().copied()
    }

    /// Get all selected objects, in selection order.
    pub fn selected(&self) -> &[TargetId] {
        &self.selected
    }

    pub fn count(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn is_selected(&self, id: TargetId) -> bool {
        self.selected.contains(&id)
    }

    pub fn is_primary(&self, id: TargetId) -> bool {
        self.primary() == Some(id)
    }

    /// Check and clear the dirty flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Select an object with the given mode.
    pub fn select(&mut self, id: TargetId, mode: SelectionMode) {
        match mode {
            SelectionMode::Replace => {
                self.selected.clear();
                self.selected.push(id);
            }
            SelectionMode::Add => {
                // Re-adding moves the object to the end so it becomes primary.
                self.selected.retain(|&e| e != id);
                self.selected.push(id);
            }
            SelectionMode::Remove => {
                self.selected.retain(|&e| e != id);
            }
            SelectionMode::Toggle => {
                if self.selected.contains(&id) {
                    self.selected.retain(|&e| e != id);
                } else {
                    self.selected.push(id);
                }
            }
        }
        self.dirty = true;
    }

    /// Replace the selection with `ids`, in order.
    pub fn select_multiple(&mut self, ids: impl IntoIterator<Item = TargetId>) {
        self.selected.clear();
        for id in ids {
            if !self.selected.contains(&id) {
                self.selected.push(id);
            }
        }
        self.dirty = true;
    }

    /// Clear all selection.
    pub fn clear(&mut self) {
        if !self.selected.is_empty() {
            self.selected.clear();
            self.dirty = true;
        }
    }

    /// Remove an object from selection (e.g., when it is deleted).
    pub fn remove_object(&mut self, id: TargetId) {
        let before = self.selected.len();
        self.selected.retain(|&e| e != id);
        if self.selected.len() != before {
            self.dirty = true;
        }
    }
}
