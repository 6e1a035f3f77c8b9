//! Host-facing interfaces.
//!
//! The gizmo never owns the objects it resizes. It refers to them by
//! [`TargetId`] and reaches them through a [`TargetStore`] supplied by the
//! host on every call, so a target deleted by the host simply stops
//! resolving.

use std::fmt;

use scaler_math::{Ray, Transform, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Identifier of a host object that can be resized by the gizmo.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TargetId(pub u32);

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Target({})", self.0)
    }
}

/// An object's own bounding box, in its local (unscaled) frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocalBounds {
    /// Full extents along the local axes
    pub size: Vec3,
    /// Center of the box relative to the object's origin
    pub offset: Vec3,
}

impl LocalBounds {
    pub const UNIT: Self = Self {
        size: Vec3::ONE,
        offset: Vec3::ZERO,
    };

    pub fn new(size: Vec3, offset: Vec3) -> Self {
        Self { size, offset }
    }

    #[inline]
    pub fn half_extents(&self) -> Vec3 {
        self.size * 0.5
    }
}

impl Default for LocalBounds {
    fn default() -> Self {
        Self::UNIT
    }
}

/// Access to the host's objects.
///
/// A lookup returning `None` means the object no longer exists.
pub trait TargetStore {
    /// World transform of a target
    fn transform(&self, id: TargetId) -> Option<Transform>;

    /// Local bounding box of a target
    fn local_bounds(&self, id: TargetId) -> Option<LocalBounds>;

    /// Write a new world transform. Returns false if the target is gone.
    fn set_transform(&mut self, id: TargetId, transform: Transform) -> bool;

    /// Tell the host the target's geometry changed.
    fn notify_geometry_changed(&mut self, id: TargetId);

    fn contains(&self, id: TargetId) -> bool {
        self.transform(id).is_some()
    }
}

/// The camera the user is looking through.
pub trait CameraRig {
    /// Camera position in world space
    fn position(&self) -> Vec3;

    /// Ray from the camera through a screen-space point
    fn screen_point_to_ray(&self, screen: Vec2) -> Ray;
}

/// Raycast layer occupied by the gizmo's handles.
///
/// Hosts put the handle colliders on this layer and exclude it from their own
/// scene raycasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RaycastLayer(pub u32);

impl RaycastLayer {
    /// Layer reserved for gizmo geometry
    pub const GIZMO: Self = Self(31);

    /// Get the layer as a bitmask
    pub fn as_mask(&self) -> u32 {
        1u32.checked_shl(self.0).unwrap_or(0)
    }
}

impl Default for RaycastLayer {
    fn default() -> Self {
        Self::GIZMO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_mask() {
        assert_eq!(RaycastLayer(0).as_mask(), 1);
        assert_eq!(RaycastLayer::GIZMO.as_mask(), 1 << 31);
        assert_eq!(RaycastLayer(40).as_mask(), 0);
    }

    #[test]
    fn test_target_id_display() {
        assert_eq!(TargetId(7).to_string(), "Target(7)");
    }
}
