//! Combined bounding box of a selection, oriented like its anchor object.

use scaler_math::{AABB, CORNER_SIGNS, Quat, Transform, Vec3};

use crate::error::{Result, ScalerError};
use crate::host::{LocalBounds, TargetId, TargetStore};

/// A resolved target: its world transform and its local bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundedObject {
    pub transform: Transform,
    pub bounds: LocalBounds,
}

impl BoundedObject {
    pub fn new(transform: Transform, bounds: LocalBounds) -> Self {
        Self { transform, bounds }
    }

    /// The eight corners of the object's local box, in world space
    pub fn world_corners(&self) -> [Vec3; 8] {
        let half = self.bounds.half_extents();
        CORNER_SIGNS.map(|sign| {
            self.transform
                .transform_point(self.bounds.offset + sign.mul_elem(half))
        })
    }
}

/// Oriented box enclosing a selection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    /// World-space center
    pub center: Vec3,
    /// Orientation of the anchor object
    pub rotation: Quat,
    /// Extents along the anchor's local axes, in world units
    pub size: Vec3,
}

/// Resolve every target through the host store.
///
/// Fails on an empty list, or on the first id the store no longer knows.
pub fn gather_objects(targets: &[TargetId], store: &dyn TargetStore) -> Result<Vec<BoundedObject>> {
    if targets.is_empty() {
        return Err(ScalerError::EmptySelection);
    }
    targets
        .iter()
        .map(|&id| {
            let transform = store.transform(id).ok_or(ScalerError::TargetMissing(id))?;
            let bounds = store.local_bounds(id).ok_or(ScalerError::TargetMissing(id))?;
            Ok(BoundedObject::new(transform, bounds))
        })
        .collect()
}

/// Compute the box enclosing `objects` in the frame of the last one (the
/// anchor).
pub fn compute_bounding_box(objects: &[BoundedObject]) -> Result<BoundingBox> {
    let anchor = objects.last().ok_or(ScalerError::EmptySelection)?.transform;
    // A flattened anchor axis cannot be inverted; measure that axis unscaled.
    let frame = anchor.with_scale(safe_scale(anchor.scale));

    let local_box = objects
        .iter()
        .flat_map(|object| object.world_corners())
        .fold(AABB::EMPTY, |aabb, corner| {
            aabb.expand_to_include(frame.inverse_transform_point(corner))
        });

    let center = frame.transform_point(local_box.center());
    let size = local_box.size().mul_elem(frame.scale.abs());
    log::trace!("Bounding box of {} objects: center {:?}, size {:?}", objects.len(), center, size);

    Ok(BoundingBox {
        center,
        rotation: anchor.rotation,
        size,
    })
}

fn safe_scale(scale: Vec3) -> Vec3 {
    let mut safe = scale;
    for i in 0..3 {
        if safe[i].abs() <= f32::EPSILON {
            safe[i] = 1.0;
        }
    }
    safe
}
