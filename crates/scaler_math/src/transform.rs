//! Object placement: translation, rotation and non-uniform scale

use crate::quaternion::Quat;
use crate::vector::Vec3;

/// World placement of an object.
///
/// A local point `p` lands at `position + rotation * (scale ⊙ p)`. Local
/// forward is -Z.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self::new(Vec3::ZERO, Quat::IDENTITY, Vec3::ONE);

    #[inline]
    pub const fn new(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self { position, rotation, scale }
    }

    #[inline]
    pub fn from_position(position: Vec3) -> Self {
        Self { position, ..Self::IDENTITY }
    }

    #[inline]
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation, ..Self::IDENTITY }
    }

    #[must_use]
    pub fn with_position(self, position: Vec3) -> Self {
        Self { position, ..self }
    }

    #[must_use]
    pub fn with_rotation(self, rotation: Quat) -> Self {
        Self { rotation, ..self }
    }

    #[must_use]
    pub fn with_scale(self, scale: Vec3) -> Self {
        Self { scale, ..self }
    }

    #[inline]
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation * local.mul_elem(self.scale)
    }

    /// Undo [`transform_point`](Self::transform_point). A zero scale
    /// component yields a non-finite result on that axis.
    #[inline]
    pub fn inverse_transform_point(&self, world: Vec3) -> Vec3 {
        (self.rotation.inverse() * (world - self.position)).div_elem(self.scale)
    }

    #[inline]
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    #[inline]
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    pub fn abs_diff_eq(&self, other: &Transform, epsilon: f32) -> bool {
        self.position.abs_diff_eq(other.position, epsilon)
            && self.rotation.abs_diff_eq(other.rotation, epsilon)
            && self.scale.abs_diff_eq(other.scale, epsilon)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAC_PI_2;

    #[test]
    fn test_scale_applies_before_translation() {
        let t = Transform::from_position(Vec3::X).with_scale(Vec3::new(2.0, 3.0, 4.0));
        assert!(t.transform_point(Vec3::ONE).abs_diff_eq(Vec3::new(3.0, 3.0, 4.0), 1e-6));
        assert_eq!(Transform::IDENTITY.transform_point(Vec3::ONE), Vec3::ONE);
    }

    #[test]
    fn test_inverse_point_round_trip() {
        let t = Transform::new(
            Vec3::new(4.0, -2.0, 1.5),
            Quat::from_euler(0.2, 0.9, -0.4),
            Vec3::new(1.5, 0.5, 2.0),
        );
        let p = Vec3::new(-0.7, 3.2, 1.1);
        assert!(t.inverse_transform_point(t.transform_point(p)).abs_diff_eq(p, 1e-4));
    }

    #[test]
    fn test_basis_follows_rotation() {
        let t = Transform::from_position_rotation(Vec3::ZERO, Quat::from_rotation_y(FRAC_PI_2));
        assert!(t.right().abs_diff_eq(Vec3::NEG_Z, 1e-5));
        assert!(t.up().abs_diff_eq(Vec3::Y, 1e-5));
        assert!(t.forward().abs_diff_eq(Vec3::NEG_X, 1e-5));
    }
}
