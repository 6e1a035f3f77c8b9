//! The six face handles of the scaler box.
//!
//! Handles come in three opposing pairs. Slot `i` sits on the face along
//! [`Axis`] `i / 2`, pointing toward `+axis` for even slots and `-axis` for
//! odd ones; its twin is the handle on the opposite face, `i ^ 1`.

use std::fmt;

use scaler_math::{ray_sphere_at, Quat, Ray, Vec3};
use serde::{Deserialize, Serialize};

/// Number of handles on the box
pub const HANDLE_COUNT: usize = 6;

/// A local box axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Positive unit vector along this axis
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        }
    }

    /// RGBA color of the handles on this axis.
    pub fn color(self) -> [f32; 4] {
        match self {
            Axis::X => [1.0, 0.0, 0.0, 1.0],
            Axis::Y => [0.0, 1.0, 0.0, 1.0],
            Axis::Z => [0.0, 0.0, 1.0, 1.0],
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Slot of the handle on the opposite face
#[inline]
pub const fn twin_of(slot: usize) -> usize {
    slot ^ 1
}

/// Axis a handle slot lies on
#[inline]
pub fn axis_of(slot: usize) -> Axis {
    match slot / 2 {
        0 => Axis::X,
        1 => Axis::Y,
        _ => Axis::Z,
    }
}

/// Local outward direction of a handle slot
pub fn outward_of(slot: usize) -> Vec3 {
    let unit = axis_of(slot).unit();
    if slot % 2 == 0 {
        unit
    } else {
        -unit
    }
}

/// One directional marker on a face of the box.
///
/// Identity is fixed at creation; placement, orientation and visual scale are
/// driven by the [`Scaler`](crate::Scaler).
#[derive(Clone, Debug, PartialEq)]
pub struct Handle {
    slot: usize,
    twin: usize,
    axis: Axis,
    outward: Vec3,
    pub(crate) position: Vec3,
    pub(crate) rotation: Quat,
    pub(crate) visual_scale: f32,
    pub(crate) visible: bool,
}

impl Handle {
    pub(crate) fn new(slot: usize) -> Self {
        debug_assert!(slot < HANDLE_COUNT);
        Self {
            slot,
            twin: twin_of(slot),
            axis: axis_of(slot),
            outward: outward_of(slot),
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            visual_scale: 1.0,
            visible: false,
        }
    }

    /// All six handles in slot order
    pub(crate) fn create_set() -> [Handle; HANDLE_COUNT] {
        std::array::from_fn(Handle::new)
    }

    #[inline]
    pub fn slot(&self) -> usize {
        self.slot
    }

    #[inline]
    pub fn twin(&self) -> usize {
        self.twin
    }

    #[inline]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Outward direction in the box's local frame
    #[inline]
    pub fn outward_direction(&self) -> Vec3 {
        self.outward
    }

    /// World-space position
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// World-space orientation (same as the pivot)
    #[inline]
    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// Uniform scale of the handle's unit-sphere visual
    #[inline]
    pub fn visual_scale(&self) -> f32 {
        self.visual_scale
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn color(&self) -> [f32; 4] {
        self.axis.color()
    }

    /// Radius of the handle's collider
    #[inline]
    pub fn pick_radius(&self) -> f32 {
        self.visual_scale * 0.5
    }

    /// Distance along `ray` to this handle's collider, if hit.
    pub(crate) fn raycast(&self, ray: &Ray) -> Option<f32> {
        if !self.visible {
            return None;
        }
        ray_sphere_at(ray, self.position, self.pick_radius())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twin_and_axis_identities() {
        for slot in 0..HANDLE_COUNT {
            assert_eq!(twin_of(twin_of(slot)), slot);
            assert_eq!(axis_of(slot).index(), slot / 2);
            assert_ne!(twin_of(slot), slot);
            assert_eq!(axis_of(twin_of(slot)), axis_of(slot));
        }
    }

    #[test]
    fn test_slot_table() {
        let expected = [
            (1, Axis::X, Vec3::X),
            (0, Axis::X, Vec3::NEG_X),
            (3, Axis::Y, Vec3::Y),
            (2, Axis::Y, Vec3::NEG_Y),
            (5, Axis::Z, Vec3::Z),
            (4, Axis::Z, Vec3::NEG_Z),
        ];
        for (handle, (twin, axis, outward)) in Handle::create_set().iter().zip(expected) {
            assert_eq!(handle.twin(), twin);
            assert_eq!(handle.axis(), axis);
            assert_eq!(handle.outward_direction(), outward);
        }
    }

    #[test]
    fn test_pairs_point_in_opposite_directions() {
        let handles = Handle::create_set();
        for handle in &handles {
            let twin = &handles[handle.twin()];
            assert_eq!(handle.outward_direction(), -twin.outward_direction());
        }
    }

    #[test]
    fn test_hidden_handle_is_not_pickable() {
        let mut handle = Handle::new(0);
        handle.position = Vec3::new(0.0, 0.0, -5.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(handle.raycast(&ray).is_none());

        handle.visible = true;
        let t = handle.raycast(&ray).unwrap();
        assert!((t - 4.5).abs() < 1e-4);
    }

    #[test]
    fn test_axis_round_trip() {
        for axis in Axis::ALL {
            assert_eq!(Axis::from_index(axis.index()), Some(axis));
        }
        assert_eq!(Axis::from_index(3), None);
    }
}
