//! Infinite planes

use crate::intersect::ray_plane;
use crate::ray::Ray;
use crate::vector::Vec3;

/// Plane in Hessian normal form: `normal · p + distance = 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    /// Plane normal (unit vector, or zero for a degenerate plane)
    pub normal: Vec3,
    /// Signed distance term
    pub distance: f32,
}

impl Plane {
    /// Create a plane from a point on the plane and its normal.
    ///
    /// A zero normal produces a degenerate plane that no ray intersects.
    pub fn from_point_normal(point: Vec3, normal: Vec3) -> Self {
        let normal = normal.normalize();
        Self {
            normal,
            distance: -normal.dot(point),
        }
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.normal.length_squared() < 1e-12
    }

    /// Distance along `ray` to the plane, if it is hit in front of the origin.
    pub fn raycast(&self, ray: &Ray) -> Option<f32> {
        if self.is_degenerate() {
            return None;
        }
        ray_plane(ray, self.normal * -self.distance, self.normal)
    }
}
