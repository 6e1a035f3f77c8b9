//! Pivot frame of the scaler box.

use scaler_math::{Quat, Vec3};

use crate::handle::{axis_of, outward_of};

/// Position, orientation and extents of the box the handles sit on.
///
/// The frame is unscaled: `dimensions` are world-space lengths along the
/// rotated local axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PivotFrame {
    pub position: Vec3,
    pub rotation: Quat,
    pub dimensions: Vec3,
}

impl PivotFrame {
    pub const fn new(position: Vec3, rotation: Quat, dimensions: Vec3) -> Self {
        Self { position, rotation, dimensions }
    }

    #[inline]
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation * local
    }

    #[inline]
    pub fn inverse_transform_point(&self, world: Vec3) -> Vec3 {
        self.rotation.inverse() * (world - self.position)
    }

    #[inline]
    pub fn transform_direction(&self, local: Vec3) -> Vec3 {
        self.rotation * local
    }

    /// World position of the handle in `slot`
    pub fn handle_position(&self, slot: usize) -> Vec3 {
        let half_length = self.dimensions[axis_of(slot).index()] * 0.5;
        self.transform_point(outward_of(slot) * half_length)
    }

    /// World-space outward direction of the handle in `slot`
    pub fn handle_direction(&self, slot: usize) -> Vec3 {
        self.transform_direction(outward_of(slot)).normalize()
    }

    /// Express a world point as a 0..1 fraction along each box axis, measured
    /// from the box's minimum corner.
    ///
    /// A zero-length axis has no interior; points on it map to 0.5.
    pub fn world_to_percentage(&self, world: Vec3) -> Vec3 {
        let local = self.inverse_transform_point(world);
        let mut percentage = Vec3::splat(0.5);
        for i in 0..3 {
            let length = self.dimensions[i];
            if length.abs() > f32::EPSILON {
                percentage[i] = (local[i] + length * 0.5) / length;
            }
        }
        percentage
    }

    /// Inverse of [`world_to_percentage`](Self::world_to_percentage)
    pub fn percentage_to_world(&self, percentage: Vec3) -> Vec3 {
        let min = self.dimensions * -0.5;
        self.transform_point(min + percentage.mul_elem(self.dimensions))
    }
}

impl Default for PivotFrame {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Quat::IDENTITY, Vec3::ONE)
    }
}
