//! Unit quaternions for orientations

use crate::vector::Vec3;
use core::ops::Mul;

/// Rotation stored as a unit quaternion `(x, y, z, w)`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quat {
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Rotation by Euler angles in radians, X applied first, then Y, then Z.
    pub fn from_euler(x: f32, y: f32, z: f32) -> Self {
        Self::from_rotation_z(z) * Self::from_rotation_y(y) * Self::from_rotation_x(x)
    }

    #[inline]
    pub fn from_rotation_x(angle: f32) -> Self {
        let (s, c) = (angle * 0.5).sin_cos();
        Self::new(s, 0.0, 0.0, c)
    }

    #[inline]
    pub fn from_rotation_y(angle: f32) -> Self {
        let (s, c) = (angle * 0.5).sin_cos();
        Self::new(0.0, s, 0.0, c)
    }

    #[inline]
    pub fn from_rotation_z(angle: f32) -> Self {
        let (s, c) = (angle * 0.5).sin_cos();
        Self::new(0.0, 0.0, s, c)
    }

    #[inline]
    fn imaginary(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        self.imaginary().dot(other.imaginary()) + self.w * other.w
    }

    /// Opposite rotation. A zero quaternion has none and yields identity.
    pub fn inverse(self) -> Self {
        let norm = self.dot(self);
        if norm <= 0.0 {
            return Self::IDENTITY;
        }
        let v = self.imaginary() * (-1.0 / norm);
        Self::new(v.x, v.y, v.z, self.w / norm)
    }

    /// Whether two rotations match within `epsilon`, treating `q` and `-q` as
    /// the same rotation.
    pub fn abs_diff_eq(self, other: Self, epsilon: f32) -> bool {
        1.0 - self.dot(other).abs() <= epsilon
    }
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Composition: `a * b` applies `b` first.
impl Mul for Quat {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let (a, b) = (self.imaginary(), rhs.imaginary());
        let v = b * self.w + a * rhs.w + a.cross(b);
        Self::new(v.x, v.y, v.z, self.w * rhs.w - a.dot(b))
    }
}

impl Mul<Vec3> for Quat {
    type Output = Vec3;

    fn mul(self, v: Vec3) -> Vec3 {
        let q = self.imaginary();
        let t = q.cross(v) * 2.0;
        v + t * self.w + q.cross(t)
    }
}
