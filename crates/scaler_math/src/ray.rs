//! Pointer rays.

use crate::vector::Vec3;

/// Half-line used for handle picking and for resolving the pointer against a
/// drag plane. `direction` is unit length, or zero if built from a zero vector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    #[inline]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction: direction.normalize() }
    }

    /// Ray starting at `start` and passing through `through`
    #[inline]
    pub fn from_points(start: Vec3, through: Vec3) -> Self {
        Self::new(start, through - start)
    }

    /// Point `t` units along the ray
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Shortest distance from `point` to the ray. Points behind the origin
    /// measure to the origin.
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        let t = (point - self.origin).dot(self.direction).max(0.0);
        point.distance(self.at(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points_normalizes() {
        let ray = Ray::from_points(Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.0, 0.0, -8.0));
        assert_eq!(ray.direction, Vec3::NEG_Z);
        assert_eq!(ray.at(2.0), Vec3::new(1.0, 0.0, -2.0));
    }

    #[test]
    fn test_distance_to_point() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert!((ray.distance_to_point(Vec3::new(4.0, 3.0, 0.0)) - 3.0).abs() < 1e-5);
        // Behind the origin
        assert!((ray.distance_to_point(Vec3::new(-4.0, 3.0, 0.0)) - 5.0).abs() < 1e-5);
    }
}
