//! Axis-aligned bounds

use crate::vector::Vec3;

/// Sign pattern of the eight corners of a box, one `±1` per axis. Multiply
/// element-wise with half extents and add the center to get a corner.
pub const CORNER_SIGNS: [Vec3; 8] = [
    Vec3::new(-1.0, -1.0, -1.0),
    Vec3::new(1.0, -1.0, -1.0),
    Vec3::new(-1.0, 1.0, -1.0),
    Vec3::new(1.0, 1.0, -1.0),
    Vec3::new(-1.0, -1.0, 1.0),
    Vec3::new(1.0, -1.0, 1.0),
    Vec3::new(-1.0, 1.0, 1.0),
    Vec3::new(1.0, 1.0, 1.0),
];

/// Min/max box, grown one point at a time.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AABB {
    pub min: Vec3,
    pub max: Vec3,
}

impl AABB {
    /// Inverted box that contains nothing; the first point added becomes both
    /// corners.
    pub const EMPTY: Self = Self { min: Vec3::MAX, max: Vec3::MIN };

    #[inline]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn expand_to_include(self, point: Vec3) -> Self {
        Self::new(self.min.min(point), self.max.max(point))
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Full extents along each axis
    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        (0..3).any(|i| self.min[i] > self.max[i])
    }
}

impl Default for AABB {
    fn default() -> Self {
        Self::EMPTY
    }
}
