//! Scaler state machine: selection attachment, grab/release and the per-frame
//! update that turns handle drags into object resizes.

use scaler_math::{Plane, Quat, Ray, Vec2, Vec3};

use crate::bounds::{compute_bounding_box, gather_objects, BoundedObject, BoundingBox};
use crate::config::ScalerConfig;
use crate::error::{Result, ScalerError};
use crate::frame::PivotFrame;
use crate::handle::{axis_of, twin_of, Axis, Handle, HANDLE_COUNT};
use crate::host::{CameraRig, RaycastLayer, TargetId, TargetStore};
use crate::propagate::{apply_dimension_change, DimensionChange};
use crate::selection::SelectionSnapshot;
use crate::snap::{decimal_places, effective_step, format_length, round_to_places, snap_length};

/// Where the scaler is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScalerState {
    /// Tool not in use
    Inactive,
    /// Tool enabled, nothing selected
    Hidden,
    /// Box placed around a selection, handles shown
    Visible,
    /// A handle is held
    Dragging,
}

/// Things that happened during a [`Scaler::tick`] which the host may need to
/// react to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScalerEvent {
    /// The anchor object disappeared; the scaler detached and the host should
    /// clear its selection.
    AnchorLost,
    /// A drag changed one axis of the box and the targets were resized.
    DimensionChanged { axis: Axis, previous: f32, current: f32 },
    /// The box followed an anchor that moved or turned outside a drag.
    Refitted,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct DragSession {
    handle: usize,
    lengths_before_drag: Vec3,
}

/// The scaler gizmo.
///
/// Holds no references to host objects: targets are named by [`TargetId`] and
/// resolved through the [`TargetStore`] passed to each call.
#[derive(Debug)]
pub struct Scaler {
    config: ScalerConfig,
    active: bool,
    visible: bool,
    frame: PivotFrame,
    handles: [Handle; HANDLE_COUNT],
    selection: Option<SelectionSnapshot>,
    drag: Option<DragSession>,
    step: f32,
    decimal_places: usize,
    dimension_text: [String; 3],
}

impl Scaler {
    pub fn new(config: ScalerConfig) -> Self {
        let step = effective_step(0.0, config.zero_step);
        let mut scaler = Self {
            config,
            active: false,
            visible: false,
            frame: PivotFrame::default(),
            handles: Handle::create_set(),
            selection: None,
            drag: None,
            step,
            decimal_places: decimal_places(step),
            dimension_text: Default::default(),
        };
        scaler.refresh_all_text();
        scaler
    }

    pub fn config(&self) -> &ScalerConfig {
        &self.config
    }

    /// Layer the host should put handle colliders on and leave out of its own
    /// raycasts
    pub fn handle_layer(&self) -> RaycastLayer {
        self.config.handle_layer
    }

    // ---- lifecycle ----

    /// Enable the tool. Does nothing if it is already active.
    pub fn activate(&mut self) {
        if !self.active {
            self.active = true;
            log::debug!("Scaler activated");
        }
    }

    /// Disable the tool, detaching from any selection first.
    pub fn deactivate(&mut self) {
        if self.active {
            self.detach();
            self.active = false;
            log::debug!("Scaler deactivated");
        }
    }

    /// Attach to `targets`, the last of which becomes the anchor.
    ///
    /// Nothing changes if this fails. A drag in progress is released.
    pub fn set_selection(&mut self, targets: &[TargetId], store: &dyn TargetStore) -> Result<()> {
        if !self.active {
            return Err(ScalerError::Inactive);
        }
        let objects = gather_objects(targets, store)?;
        let bbox = compute_bounding_box(&objects)?;

        if let Some(drag) = self.drag.take() {
            log::debug!("Selection replaced while dragging handle {}, releasing", drag.handle);
        }

        self.place(bbox.center, bbox.rotation, bbox.size);
        let transforms: Vec<_> = objects.iter().map(|object| object.transform).collect();
        self.selection = Some(SelectionSnapshot::capture(&self.frame, targets, &transforms));
        self.set_handles_visible(true);
        self.refresh_all_text();

        log::info!(
            "Scaler attached to {} object(s), box {:?}",
            targets.len(),
            self.frame.dimensions.to_array()
        );
        Ok(())
    }

    /// Observer entry point for host selection changes.
    ///
    /// An empty selection detaches; anything else re-attaches.
    pub fn on_selection_changed(&mut self, targets: &[TargetId], store: &dyn TargetStore) -> Result<()> {
        if targets.is_empty() {
            self.detach();
            Ok(())
        } else {
            self.set_selection(targets, store)
        }
    }

    /// Drop the selection and hide the handles. The tool stays active.
    pub fn detach(&mut self) {
        if let Some(drag) = self.drag.take() {
            log::debug!("Detaching mid-drag, handle {} released", drag.handle);
        }
        if self.visible || self.selection.is_some() {
            log::debug!("Scaler detached");
        }
        self.selection = None;
        self.set_handles_visible(false);
    }

    /// Put the box at `position` with `rotation` and `dimensions`, and move the
    /// handles onto its faces.
    pub fn place(&mut self, position: Vec3, rotation: Quat, dimensions: Vec3) {
        self.frame = PivotFrame::new(position, rotation, dimensions);
        self.sync_handles();
    }

    // ---- interaction ----

    /// Pick the handle nearest along `ray` and start dragging it.
    ///
    /// Returns the grabbed slot.
    pub fn try_grab_handle(&mut self, ray: &Ray) -> Result<usize> {
        if !self.active {
            return Err(ScalerError::Inactive);
        }
        if self.drag.is_some() {
            return Err(ScalerError::AlreadyDragging);
        }
        if !self.visible {
            return Err(ScalerError::NotVisible);
        }

        let (slot, distance) = self
            .handles
            .iter()
            .filter_map(|handle| handle.raycast(ray).map(|t| (handle.slot(), t)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .ok_or(ScalerError::NoHandleHit)?;

        self.drag = Some(DragSession {
            handle: slot,
            lengths_before_drag: self.frame.dimensions,
        });
        log::debug!("Grabbed handle {} ({} axis) at distance {:.3}", slot, axis_of(slot), distance);
        Ok(slot)
    }

    /// Let go of the held handle.
    pub fn release_handle(&mut self) -> Result<()> {
        let drag = self.drag.take().ok_or(ScalerError::NotDragging)?;
        log::debug!(
            "Released handle {}, {} axis {} -> {}",
            drag.handle,
            axis_of(drag.handle),
            drag.lengths_before_drag[axis_of(drag.handle).index()],
            self.frame.dimensions[axis_of(drag.handle).index()]
        );
        Ok(())
    }

    /// Update the snapping increment from the host grid.
    pub fn set_step(&mut self, grid_step: f32) {
        let step = effective_step(grid_step, self.config.zero_step);
        if step != self.step {
            log::trace!("Step {} -> {}", self.step, step);
            self.step = step;
            self.decimal_places = decimal_places(step);
            self.refresh_all_text();
        }
    }

    // ---- per-frame update ----

    /// Advance one frame.
    ///
    /// Does nothing unless the box is visible. Otherwise validates the anchor,
    /// applies the drag or follows a moved anchor, and rescales the handles
    /// for the camera distance.
    pub fn tick(&mut self, camera: &dyn CameraRig, pointer: Vec2, store: &mut dyn TargetStore) -> Vec<ScalerEvent> {
        let mut events = Vec::new();
        if !self.active || !self.visible {
            return events;
        }

        let Some(anchor) = self.selection.as_ref().and_then(SelectionSnapshot::anchor) else {
            return events;
        };
        let Some(anchor_transform) = store.transform(anchor) else {
            log::error!("Anchor {} no longer exists, detaching scaler", anchor);
            self.detach();
            events.push(ScalerEvent::AnchorLost);
            return events;
        };

        if self.drag.is_some() {
            if let Some(event) = self.update_drag(camera, pointer, store) {
                events.push(event);
            }
        } else if self
            .selection
            .as_ref()
            .is_some_and(|s| s.anchor_moved(&anchor_transform, self.config.change_epsilon))
        {
            self.refit(store);
            if let Some(selection) = self.selection.as_mut() {
                selection.record_anchor_pose(&anchor_transform);
            }
            events.push(ScalerEvent::Refitted);
        }

        self.update_handle_scale(camera.position());
        events
    }

    fn update_drag(&mut self, camera: &dyn CameraRig, pointer: Vec2, store: &mut dyn TargetStore) -> Option<ScalerEvent> {
        let drag = self.drag?;
        let slot = drag.handle;
        let axis = axis_of(slot);
        let handle_position = self.frame.handle_position(slot);
        let twin_position = self.frame.handle_position(twin_of(slot));

        let plane = self.drag_plane(camera.position(), axis);
        let ray = camera.screen_point_to_ray(pointer);
        let hit = ray.at(plane.raycast(&ray)?);

        let mut direction = (handle_position - twin_position).normalize();
        if direction == Vec3::ZERO {
            direction = self.frame.handle_direction(slot);
        }
        let projected = twin_position + (hit - twin_position).project_onto(direction);
        let clamped = snap_length(twin_position.distance(projected), self.step);
        let new_handle_position = twin_position + direction * clamped;

        if new_handle_position.abs_diff_eq(handle_position, self.config.change_epsilon) {
            return None;
        }

        let previous = self.frame.dimensions[axis.index()];
        let current = round_to_places(new_handle_position.distance(twin_position), self.decimal_places);
        let mut dimensions = self.frame.dimensions;
        dimensions[axis.index()] = current;
        let center = twin_position + direction * (current * 0.5);
        self.place(center, self.frame.rotation, dimensions);

        let change = DimensionChange {
            axis,
            previous,
            current,
            outward: self.frame.handle_direction(slot),
        };
        if let Some(selection) = self.selection.as_ref() {
            let updated = apply_dimension_change(&self.frame, &change, selection, store);
            log::trace!("{} axis {} -> {}, {} object(s) updated", axis, previous, current, updated);
        }
        self.refresh_text(axis);

        Some(ScalerEvent::DimensionChanged { axis, previous, current })
    }

    /// Plane through the pivot that contains the dragged axis and faces the
    /// camera as squarely as that allows.
    fn drag_plane(&self, camera_position: Vec3, axis: Axis) -> Plane {
        let mut to_camera = self.frame.inverse_transform_point(camera_position).normalize();
        to_camera[axis.index()] = 0.0;
        let normal = self.frame.transform_direction(to_camera);
        Plane::from_point_normal(self.frame.position, normal)
    }

    /// Recompute the box around the current target transforms and recapture
    /// every target's percentage inside it. Targets the host no longer knows
    /// are dropped from the selection.
    fn refit(&mut self, store: &dyn TargetStore) {
        let Some(selection) = self.selection.as_ref() else {
            return;
        };
        let mut ids = Vec::with_capacity(selection.len());
        let mut objects = Vec::with_capacity(selection.len());
        for id in selection.targets() {
            match (store.transform(id), store.local_bounds(id)) {
                (Some(transform), Some(bounds)) => {
                    ids.push(id);
                    objects.push(BoundedObject::new(transform, bounds));
                }
                _ => log::warn!("{} vanished from the selection, dropping it", id),
            }
        }

        if let Ok(BoundingBox { center, rotation, size }) = compute_bounding_box(&objects) {
            log::trace!("Refit box to moved anchor, center {:?}", center);
            self.place(center, rotation, size);
            let transforms: Vec<_> = objects.iter().map(|object| object.transform).collect();
            self.selection = Some(SelectionSnapshot::capture(&self.frame, &ids, &transforms));
            self.refresh_all_text();
        }
    }

    fn update_handle_scale(&mut self, camera_position: Vec3) {
        for handle in &mut self.handles {
            handle.visual_scale = self
                .config
                .handle_visual_scale(camera_position.distance(handle.position));
        }
    }

    fn sync_handles(&mut self) {
        for handle in &mut self.handles {
            handle.position = self.frame.handle_position(handle.slot());
            handle.rotation = self.frame.rotation;
        }
    }

    fn set_handles_visible(&mut self, visible: bool) {
        self.visible = visible;
        for handle in &mut self.handles {
            handle.visible = visible;
        }
    }

    fn refresh_text(&mut self, axis: Axis) {
        self.dimension_text[axis.index()] = format_length(self.frame.dimensions[axis.index()], self.decimal_places);
    }

    fn refresh_all_text(&mut self) {
        for axis in Axis::ALL {
            self.refresh_text(axis);
        }
    }

    // ---- queries ----

    pub fn state(&self) -> ScalerState {
        if !self.active {
            ScalerState::Inactive
        } else if self.drag.is_some() {
            ScalerState::Dragging
        } else if self.visible {
            ScalerState::Visible
        } else {
            ScalerState::Hidden
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Slot of the held handle
    pub fn dragged_handle(&self) -> Option<usize> {
        self.drag.map(|d| d.handle)
    }

    pub fn dragged_axis(&self) -> Option<Axis> {
        self.drag.map(|d| axis_of(d.handle))
    }

    /// Box dimensions when the current drag started
    pub fn drag_start_dimensions(&self) -> Option<Vec3> {
        self.drag.map(|d| d.lengths_before_drag)
    }

    pub fn dimensions(&self) -> Vec3 {
        self.frame.dimensions
    }

    pub fn dimension(&self, axis: Axis) -> f32 {
        self.frame.dimensions[axis.index()]
    }

    /// Display string for one axis length
    pub fn dimension_text(&self, axis: Axis) -> &str {
        &self.dimension_text[axis.index()]
    }

    /// Display string for the axis being dragged
    pub fn dragged_dimension_text(&self) -> Option<&str> {
        self.dragged_axis().map(|axis| self.dimension_text(axis))
    }

    pub fn handles(&self) -> &[Handle; HANDLE_COUNT] {
        &self.handles
    }

    pub fn handle(&self, slot: usize) -> Option<&Handle> {
        self.handles.get(slot)
    }

    pub fn visible_handle_count(&self) -> usize {
        self.handles.iter().filter(|h| h.is_visible()).count()
    }

    pub fn frame(&self) -> &PivotFrame {
        &self.frame
    }

    /// Current snapping increment, always positive
    pub fn step(&self) -> f32 {
        self.step
    }

    pub fn decimal_places(&self) -> usize {
        self.decimal_places
    }

    pub fn selection(&self) -> Option<&SelectionSnapshot> {
        self.selection.as_ref()
    }
}

impl Default for Scaler {
    fn default() -> Self {
        Self::new(ScalerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MemoryStore, PointerPlaneCamera};
    use scaler_math::Transform;

    fn attached() -> (Scaler, MemoryStore) {
        let mut store = MemoryStore::default();
        store.insert_cube(TargetId(1), Transform::IDENTITY, 2.0);
        let mut scaler = Scaler::default();
        scaler.activate();
        scaler.set_selection(&[TargetId(1)], &store).unwrap();
        (scaler, store)
    }

    #[test]
    fn test_state_transitions() {
        let mut scaler = Scaler::default();
        assert_eq!(scaler.state(), ScalerState::Inactive);

        scaler.activate();
        assert_eq!(scaler.state(), ScalerState::Hidden);

        let mut store = MemoryStore::default();
        store.insert_cube(TargetId(1), Transform::IDENTITY, 2.0);
        scaler.set_selection(&[TargetId(1)], &store).unwrap();
        assert_eq!(scaler.state(), ScalerState::Visible);

        scaler.try_grab_handle(&Ray::new(Vec3::new(1.0, 0.0, 10.0), Vec3::NEG_Z)).unwrap();
        assert_eq!(scaler.state(), ScalerState::Dragging);

        scaler.release_handle().unwrap();
        assert_eq!(scaler.state(), ScalerState::Visible);

        scaler.detach();
        assert_eq!(scaler.state(), ScalerState::Hidden);

        scaler.deactivate();
        assert_eq!(scaler.state(), ScalerState::Inactive);
    }

    #[test]
    fn test_set_selection_requires_active() {
        let mut store = MemoryStore::default();
        store.insert_cube(TargetId(1), Transform::IDENTITY, 2.0);
        let mut scaler = Scaler::default();
        assert_eq!(scaler.set_selection(&[TargetId(1)], &store), Err(ScalerError::Inactive));
        assert!(scaler.selection().is_none());
    }

    #[test]
    fn test_missing_target_leaves_state_untouched() {
        let (mut scaler, store) = attached();
        let before = *scaler.frame();
        assert_eq!(
            scaler.set_selection(&[TargetId(1), TargetId(9)], &store),
            Err(ScalerError::TargetMissing(TargetId(9)))
        );
        assert_eq!(*scaler.frame(), before);
        assert_eq!(scaler.selection().and_then(|s| s.anchor()), Some(TargetId(1)));
    }

    #[test]
    fn test_grab_picks_nearest_handle() {
        let (mut scaler, _) = attached();
        // Looking down -X hits the +X handle before the -X one.
        let ray = Ray::new(Vec3::new(10.0, 0.0, 0.0), Vec3::NEG_X);
        assert_eq!(scaler.try_grab_handle(&ray), Ok(0));
        assert_eq!(scaler.dragged_axis(), Some(Axis::X));
        assert_eq!(scaler.drag_start_dimensions(), Some(Vec3::splat(2.0)));
        assert_eq!(scaler.try_grab_handle(&ray), Err(ScalerError::AlreadyDragging));
    }

    #[test]
    fn test_grab_errors() {
        let mut scaler = Scaler::default();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z);
        assert_eq!(scaler.try_grab_handle(&ray), Err(ScalerError::Inactive));
        scaler.activate();
        assert_eq!(scaler.try_grab_handle(&ray), Err(ScalerError::NotVisible));
        assert_eq!(scaler.release_handle(), Err(ScalerError::NotDragging));

        let (mut scaler, _) = attached();
        let miss = Ray::new(Vec3::new(50.0, 50.0, 10.0), Vec3::NEG_Z);
        assert_eq!(scaler.try_grab_handle(&miss), Err(ScalerError::NoHandleHit));
        assert_eq!(scaler.state(), ScalerState::Visible);
    }

    #[test]
    fn test_handles_scale_with_camera_distance() {
        let (mut scaler, mut store) = attached();
        let camera = PointerPlaneCamera::new(Vec3::new(1.0, 0.0, 30.0));
        scaler.tick(&camera, Vec2::ZERO, &mut store);
        let handle = &scaler.handles()[0];
        assert!((handle.visual_scale() - 1.0).abs() < 1e-4);
        assert!((handle.pick_radius() - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_refit_follows_moved_anchor() {
        let (mut scaler, mut store) = attached();
        let camera = PointerPlaneCamera::new(Vec3::new(0.0, 0.0, 10.0));

        store.set_position(TargetId(1), Vec3::new(5.0, 0.0, 0.0));
        let events = scaler.tick(&camera, Vec2::ZERO, &mut store);
        assert_eq!(events, vec![ScalerEvent::Refitted]);
        assert!(scaler.frame().position.abs_diff_eq(Vec3::new(5.0, 0.0, 0.0), 1e-5));

        let events = scaler.tick(&camera, Vec2::ZERO, &mut store);
        assert!(events.is_empty());
    }

    #[test]
    fn test_drag_notifies_targets() {
        let (mut scaler, mut store) = attached();
        scaler.set_step(1.0);
        let camera = PointerPlaneCamera::new(Vec3::new(1.0, 0.0, 10.0));
        scaler.try_grab_handle(&camera.screen_point_to_ray(Vec2::new(1.0, 0.0))).unwrap();

        let events = scaler.tick(&camera, Vec2::new(2.1, 0.0), &mut store);
        assert_eq!(
            events,
            vec![ScalerEvent::DimensionChanged { axis: Axis::X, previous: 2.0, current: 3.0 }]
        );
        assert_eq!(store.notifications, vec![TargetId(1)]);
        assert_eq!(scaler.dragged_dimension_text(), Some("3"));

        // Same pointer, same snapped length: nothing to push.
        assert!(scaler.tick(&camera, Vec2::new(2.1, 0.0), &mut store).is_empty());
        assert_eq!(store.notifications.len(), 1);
    }

    #[test]
    fn test_anchor_lost_detaches() {
        let (mut scaler, mut store) = attached();
        let camera = PointerPlaneCamera::new(Vec3::new(0.0, 0.0, 10.0));
        store.remove(TargetId(1));
        assert_eq!(scaler.tick(&camera, Vec2::ZERO, &mut store), vec![ScalerEvent::AnchorLost]);
        assert_eq!(scaler.state(), ScalerState::Hidden);
        assert_eq!(scaler.visible_handle_count(), 0);
    }

    #[test]
    fn test_set_step_updates_precision() {
        let (mut scaler, _) = attached();
        scaler.set_step(0.25);
        assert_eq!(scaler.step(), 0.25);
        assert_eq!(scaler.decimal_places(), 2);
        scaler.set_step(-3.0);
        assert_eq!(scaler.step(), 0.001);
        assert_eq!(scaler.decimal_places(), 3);
        assert_eq!(scaler.dimension_text(Axis::Y), "2");
    }

    #[test]
    fn test_place_is_idempotent() {
        let mut scaler = Scaler::default();
        let rotation = Quat::from_euler(0.1, 0.7, -0.2);
        scaler.place(Vec3::new(1.0, 2.0, 3.0), rotation, Vec3::new(2.0, 3.0, 4.0));
        let first: Vec<_> = scaler.handles().iter().map(Handle::position).collect();
        scaler.place(Vec3::new(1.0, 2.0, 3.0), rotation, Vec3::new(2.0, 3.0, 4.0));
        let second: Vec<_> = scaler.handles().iter().map(Handle::position).collect();
        assert_eq!(first, second);
    }
}
