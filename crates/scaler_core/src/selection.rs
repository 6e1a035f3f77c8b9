//! The selection the gizmo is attached to.

use scaler_math::{Quat, Transform, Vec3};

use crate::frame::PivotFrame;
use crate::host::TargetId;

/// Where one target sat inside the box when the selection was taken.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TargetPlacement {
    pub target: TargetId,
    /// Position as a 0..1 fraction along each box axis
    pub percentage: Vec3,
}

/// Ordered targets plus their fixed percentage positions.
///
/// The last target is the anchor. Percentages are taken against the box placed
/// at attach time and retaken whenever the box follows a moved anchor; a drag
/// never changes them.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectionSnapshot {
    placements: Vec<TargetPlacement>,
    anchor_position: Vec3,
    anchor_rotation: Quat,
}

impl SelectionSnapshot {
    /// Record each target's position inside `frame`.
    ///
    /// `targets` and `transforms` are parallel; both must be non-empty.
    pub(crate) fn capture(frame: &PivotFrame, targets: &[TargetId], transforms: &[Transform]) -> Self {
        debug_assert_eq!(targets.len(), transforms.len());
        let placements = targets
            .iter()
            .zip(transforms)
            .map(|(&target, transform)| TargetPlacement {
                target,
                percentage: frame.world_to_percentage(transform.position),
            })
            .collect();
        let anchor = transforms.last().copied().unwrap_or_default();
        Self {
            placements,
            anchor_position: anchor.position,
            anchor_rotation: anchor.rotation,
        }
    }

    /// The anchor target (last in selection order)
    pub fn anchor(&self) -> Option<TargetId> {
        self.placements.last().map(|p| p.target)
    }

    pub fn targets(&self) -> impl Iterator<Item = TargetId> + '_ {
        self.placements.iter().map(|p| p.target)
    }

    pub fn placements(&self) -> &[TargetPlacement] {
        &self.placements
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn contains(&self, target: TargetId) -> bool {
        self.placements.iter().any(|p| p.target == target)
    }

    /// Whether the anchor moved or turned since its pose was last recorded
    pub fn anchor_moved(&self, current: &Transform, epsilon: f32) -> bool {
        !current.position.abs_diff_eq(self.anchor_position, epsilon)
            || !current.rotation.abs_diff_eq(self.anchor_rotation, epsilon)
    }

    pub(crate) fn record_anchor_pose(&mut self, current: &Transform) {
        self.anchor_position = current.position;
        self.anchor_rotation = current.rotation;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> SelectionSnapshot {
        let frame = PivotFrame::new(Vec3::ZERO, Quat::IDENTITY, Vec3::splat(4.0));
        let targets = [TargetId(1), TargetId(2)];
        let transforms = [
            Transform::from_position(Vec3::new(-1.0, 0.0, 0.0)),
            Transform::from_position(Vec3::new(1.0, 2.0, 0.0)),
        ];
        SelectionSnapshot::capture(&frame, &targets, &transforms)
    }

    #[test]
    fn test_anchor_is_last() {
        let snap = snapshot();
        assert_eq!(snap.anchor(), Some(TargetId(2)));
        assert_eq!(snap.targets().collect::<Vec<_>>(), vec![TargetId(1), TargetId(2)]);
        assert!(snap.contains(TargetId(1)));
        assert!(!snap.contains(TargetId(3)));
    }

    #[test]
    fn test_percentages() {
        let snap = snapshot();
        assert!(snap.placements()[0].percentage.abs_diff_eq(Vec3::new(0.25, 0.5, 0.5), 1e-6));
        assert!(snap.placements()[1].percentage.abs_diff_eq(Vec3::new(0.75, 1.0, 0.5), 1e-6));
    }

    #[test]
    fn test_anchor_moved() {
        let mut snap = snapshot();
        let still = Transform::from_position(Vec3::new(1.0, 2.0, 0.0));
        assert!(!snap.anchor_moved(&still, 1e-5));
        assert!(!snap.anchor_moved(&still.with_position(Vec3::new(1.0, 2.000001, 0.0)), 1e-5));

        let moved = still.with_position(Vec3::new(1.5, 2.0, 0.0));
        assert!(snap.anchor_moved(&moved, 1e-5));
        snap.record_anchor_pose(&moved);
        assert!(!snap.anchor_moved(&moved, 1e-5));

        let turned = moved.with_rotation(Quat::from_rotation_z(0.3));
        assert!(snap.anchor_moved(&turned, 1e-5));
    }
}
