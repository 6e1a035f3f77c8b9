//! In-memory host doubles for unit tests

use std::collections::HashMap;

use scaler_math::{Ray, Transform, Vec2, Vec3};

use crate::host::{CameraRig, LocalBounds, TargetId, TargetStore};

#[derive(Default)]
pub struct MemoryStore {
    objects: HashMap<TargetId, (Transform, LocalBounds)>,
    pub notifications: Vec<TargetId>,
}

impl MemoryStore {
    pub fn insert_cube(&mut self, id: TargetId, transform: Transform, size: f32) {
        self.objects
            .insert(id, (transform, LocalBounds::new(Vec3::splat(size), Vec3::ZERO)));
    }

    pub fn set_position(&mut self, id: TargetId, position: Vec3) {
        if let Some((transform, _)) = self.objects.get_mut(&id) {
            transform.position = position;
        }
    }

    pub fn remove(&mut self, id: TargetId) {
        self.objects.remove(&id);
    }
}

impl TargetStore for MemoryStore {
    fn transform(&self, id: TargetId) -> Option<Transform> {
        self.objects.get(&id).map(|(t, _)| *t)
    }

    fn local_bounds(&self, id: TargetId) -> Option<LocalBounds> {
        self.objects.get(&id).map(|(_, b)| *b)
    }

    fn set_transform(&mut self, id: TargetId, transform: Transform) -> bool {
        match self.objects.get_mut(&id) {
            Some(entry) => {
                entry.0 = transform;
                true
            }
            None => false,
        }
    }

    fn notify_geometry_changed(&mut self, id: TargetId) {
        self.notifications.push(id);
    }
}

/// Camera whose pointer coordinates are world x/y on the z = 0 plane.
pub struct PointerPlaneCamera {
    pub position: Vec3,
}

impl PointerPlaneCamera {
    pub fn new(position: Vec3) -> Self {
        Self { position }
    }
}

impl CameraRig for PointerPlaneCamera {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn screen_point_to_ray(&self, screen: Vec2) -> Ray {
        Ray::from_points(self.position, Vec3::new(screen.x, screen.y, 0.0))
    }
}
