//! Pushing a box resize down to the selected objects.

use scaler_math::{Transform, Vec3};

use crate::frame::PivotFrame;
use crate::handle::Axis;
use crate::host::TargetStore;
use crate::selection::SelectionSnapshot;

/// One axis of the box changed length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DimensionChange {
    pub axis: Axis,
    pub previous: f32,
    pub current: f32,
    /// World-space outward direction of the dragged handle
    pub outward: Vec3,
}

impl DimensionChange {
    /// Scale factor for the changed axis. A zero previous length has no
    /// meaningful ratio and yields 1.
    pub fn ratio(&self) -> f32 {
        if self.previous.abs() <= f32::EPSILON {
            1.0
        } else {
            self.current / self.previous
        }
    }
}

/// The object's local axis that best lines up with `direction`.
///
/// Candidates are tested as +right, -right, +up, -up, +forward, -forward;
/// the first smallest angle wins.
pub fn closest_axis(transform: &Transform, direction: Vec3) -> Axis {
    let candidates = [
        (transform.right(), Axis::X),
        (-transform.right(), Axis::X),
        (transform.up(), Axis::Y),
        (-transform.up(), Axis::Y),
        (transform.forward(), Axis::Z),
        (-transform.forward(), Axis::Z),
    ];

    let mut best = Axis::X;
    let mut best_angle = f32::INFINITY;
    for (axis_direction, axis) in candidates {
        let angle = axis_direction.angle_between(direction);
        if angle < best_angle {
            best_angle = angle;
            best = axis;
        }
    }
    best
}

/// Scale every selected object along its axis closest to the change and put
/// it back at its recorded percentage inside the resized `frame`.
///
/// Returns how many objects were updated; targets the store no longer
/// resolves are skipped.
pub fn apply_dimension_change(
    frame: &PivotFrame,
    change: &DimensionChange,
    selection: &SelectionSnapshot,
    store: &mut dyn TargetStore,
) -> usize {
    if change.previous.abs() <= f32::EPSILON {
        log::warn!(
            "{} axis had zero length before resize, repositioning without scaling",
            change.axis
        );
    }
    let ratio = change.ratio();

    let mut updated = 0;
    for placement in selection.placements() {
        let Some(mut transform) = store.transform(placement.target) else {
            log::debug!("Skipping {}: no longer in the scene", placement.target);
            continue;
        };

        let axis = closest_axis(&transform, change.outward);
        transform.scale[axis.index()] *= ratio;
        transform.position = frame.percentage_to_world(placement.percentage);

        if store.set_transform(placement.target, transform) {
            store.notify_geometry_changed(placement.target);
            updated += 1;
        }
    }
    updated
}

#[cfg(test)]
mod tests {
    use super::*;
    use scaler_math::consts::FRAC_PI_2;
    use scaler_math::Quat;

    #[test]
    fn test_closest_axis_identity() {
        let t = Transform::IDENTITY;
        assert_eq!(closest_axis(&t, Vec3::X), Axis::X);
        assert_eq!(closest_axis(&t, Vec3::NEG_X), Axis::X);
        assert_eq!(closest_axis(&t, Vec3::Y), Axis::Y);
        assert_eq!(closest_axis(&t, Vec3::Z), Axis::Z);
        assert_eq!(closest_axis(&t, Vec3::new(0.2, 0.1, -0.9)), Axis::Z);
    }

    #[test]
    fn test_closest_axis_rotated_object() {
        // Turned a quarter around Y, the object's right points along world -Z.
        let t = Transform::from_position_rotation(Vec3::ZERO, Quat::from_rotation_y(FRAC_PI_2));
        assert_eq!(closest_axis(&t, Vec3::Z), Axis::X);
        assert_eq!(closest_axis(&t, Vec3::X), Axis::Z);
    }

    #[test]
    fn test_closest_axis_tie_prefers_first() {
        let t = Transform::IDENTITY;
        let diagonal = Vec3::new(1.0, 1.0, 0.0).normalize();
        assert_eq!(closest_axis(&t, diagonal), Axis::X);
    }

    #[test]
    fn test_ratio() {
        let change = DimensionChange {
            axis: Axis::X,
            previous: 2.0,
            current: 3.0,
            outward: Vec3::X,
        };
        assert_eq!(change.ratio(), 1.5);

        let flat = DimensionChange { previous: 0.0, ..change };
        assert_eq!(flat.ratio(), 1.0);
    }
}
