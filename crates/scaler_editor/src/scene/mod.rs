//! In-memory level scene: the objects the scaler resizes.

mod snapshot;

pub use snapshot::{ObjectSnapshot, SceneSnapshot};

use std::collections::BTreeMap;

use scaler_core::{LocalBounds, TargetId, TargetStore};
use scaler_math::Transform;
use serde::{Deserialize, Serialize};

/// A block placed in the level.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub id: TargetId,
    pub name: String,
    pub transform: Transform,
    pub bounds: LocalBounds,
    /// Bumped every time the object's geometry is reported changed
    pub revision: u64,
}

impl SceneObject {
    pub fn new(id: TargetId, name: impl Into<String>, transform: Transform, bounds: LocalBounds) -> Self {
        Self {
            id,
            name: name.into(),
            transform,
            bounds,
            revision: 0,
        }
    }
}

/// Scene object storage.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    objects: BTreeMap<TargetId, SceneObject>,
    next_id: u32,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object and return its id.
    pub fn spawn(&mut self, name: impl Into<String>, transform: Transform, bounds: LocalBounds) -> TargetId {
        self.next_id += 1;
        let id = TargetId(self.next_id);
        let object = SceneObject::new(id, name, transform, bounds);
        log::debug!("Spawned {} '{}'", id, object.name);
        self.objects.insert(id, object);
        id
    }

    /// Remove an object. Any reference to it stops resolving.
    pub fn remove(&mut self, id: TargetId) -> Option<SceneObject> {
        let removed = self.objects.remove(&id);
        if removed.is_some() {
            log::debug!("Removed {}", id);
        }
        removed
    }

    pub fn get(&self, id: TargetId) -> Option<&SceneObject> {
        self.objects.get(&id)
    }

    pub fn get_mut(&mut self, id: TargetId) -> Option<&mut SceneObject> {
        self.objects.get_mut(&id)
    }

    pub fn ids(&self) -> impl Iterator<Item = TargetId> + '_ {
        self.objects.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.values()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Revision counter of an object
    pub fn revision(&self, id: TargetId) -> Option<u64> {
        self.objects.get(&id).map(|o| o.revision)
    }
}

impl TargetStore for Scene {
    fn transform(&self, id: TargetId) -> Option<Transform> {
        self.objects.get(&id).map(|o| o.transform)
    }

    fn local_bounds(&self, id: TargetId) -> Option<LocalBounds> {
        self.objects.get(&id).map(|o| o.bounds)
    }

    fn set_transform(&mut self, id: TargetId, transform: Transform) -> bool {
        match self.objects.get_mut(&id) {
            Some(object) => {
                object.transform = transform;
                true
            }
            None => false,
        }
    }

    fn notify_geometry_changed(&mut self, id: TargetId) {
        if let Some(object) = self.objects.get_mut(&id) {
            object.revision += 1;
        }
    }

    fn contains(&self, id: TargetId) -> bool {
        self.objects.contains_key(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scaler_math::Vec3;

    #[test]
    fn test_spawn_and_remove() {
        let mut scene = Scene::new();
        let a = scene.spawn("Floor", Transform::IDENTITY, LocalBounds::UNIT);
        let b = scene.spawn("Wall", Transform::from_position(Vec3::X), LocalBounds::UNIT);
        assert_ne!(a, b);
        assert_eq!(scene.len(), 2);

        assert!(scene.remove(a).is_some());
        assert!(!scene.contains(a));
        assert_eq!(scene.transform(a), None);
        assert!(scene.remove(a).is_none());
        assert_eq!(scene.ids().collect::<Vec<_>>(), vec![b]);
    }

    #[test]
    fn test_notify_bumps_revision() {
        let mut scene = Scene::new();
        let id = scene.spawn("Block", Transform::IDENTITY, LocalBounds::UNIT);
        assert_eq!(scene.revision(id), Some(0));

        assert!(scene.set_transform(id, Transform::from_position(Vec3::Y)));
        scene.notify_geometry_changed(id);
        scene.notify_geometry_changed(id);
        assert_eq!(scene.revision(id), Some(2));
        assert_eq!(scene.get(id).map(|o| o.transform.position), Some(Vec3::Y));

        assert!(!scene.set_transform(TargetId(99), Transform::IDENTITY));
    }
}
