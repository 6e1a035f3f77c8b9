//! JSON snapshots of object transforms, the payload of undo transactions.

use scaler_core::{TargetId, TargetStore};
use scaler_math::Transform;
use serde::{Deserialize, Serialize};

/// Saved transform of one object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectSnapshot {
    pub id: TargetId,
    pub transform: Transform,
}

/// Saved transforms of a set of objects, in selection order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub objects: Vec<ObjectSnapshot>,
}

impl SceneSnapshot {
    /// Record the current transform of each id. Ids the store no longer knows
    /// are skipped.
    pub fn capture(store: &dyn TargetStore, ids: &[TargetId]) -> Self {
        let objects = ids
            .iter()
            .filter_map(|&id| store.transform(id).map(|transform| ObjectSnapshot { id, transform }))
            .collect();
        Self { objects }
    }

    /// Write the recorded transforms back. Returns how many objects were
    /// restored.
    pub fn apply(&self, store: &mut dyn TargetStore) -> usize {
        let mut restored = 0;
        for object in &self.objects {
            if store.set_transform(object.id, object.transform) {
                store.notify_geometry_changed(object.id);
                restored += 1;
            } else {
                log::warn!("Cannot restore {}: no longer in the scene", object.id);
            }
        }
        restored
    }

    pub fn ids(&self) -> Vec<TargetId> {
        self.objects.iter().map(|o| o.id).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
