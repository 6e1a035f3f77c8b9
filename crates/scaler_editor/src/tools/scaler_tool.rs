//! Level-editor integration of the scaler gizmo.
//!
//! Translates editor input and selection changes into [`Scaler`] calls, and
//! brackets every grab→release cycle with before/after snapshots recorded as
//! one undo transaction.

use scaler_core::{CameraRig, Scaler, ScalerError, ScalerEvent, TargetId};
use scaler_math::Vec2;

use super::input::{ActionMap, EditorAction, InputFrame};
use crate::core::{EditorState, ScalerSettings};
use crate::scene::SceneSnapshot;
use crate::ui::{DimensionTooltip, TooltipBox};

/// Snapshot taken when a handle was grabbed
#[derive(Debug)]
struct PendingTransaction {
    selection: Vec<TargetId>,
    before: SceneSnapshot,
}

/// The scaler as an editor tool.
#[derive(Debug)]
pub struct ScalerTool {
    scaler: Scaler,
    actions: ActionMap,
    tooltip: DimensionTooltip,
    undo_key: String,
    pending: Option<PendingTransaction>,
}

impl ScalerTool {
    pub fn new(settings: &ScalerSettings) -> Self {
        Self {
            scaler: Scaler::new(settings.scaler_config()),
            actions: ActionMap::from_settings(settings),
            tooltip: DimensionTooltip::new(settings.tooltip.clone()),
            undo_key: settings.undo_key.clone(),
            pending: None,
        }
    }

    pub fn scaler(&self) -> &Scaler {
        &self.scaler
    }

    pub fn actions(&self) -> &ActionMap {
        &self.actions
    }

    /// Enable the tool and attach to the current selection, if any.
    pub fn activate(&mut self, state: &mut EditorState) {
        self.scaler.activate();
        if !state.selection.is_empty() {
            self.sync_selection(state);
        }
    }

    /// Disable the tool. A drag in progress is committed first.
    pub fn deactivate(&mut self, state: &mut EditorState) {
        self.finish_transaction(state);
        self.scaler.deactivate();
    }

    /// Hide the box without disabling the tool.
    pub fn hide(&mut self, state: &mut EditorState) {
        self.finish_transaction(state);
        self.scaler.detach();
    }

    /// React to a change of the editor selection.
    pub fn on_selection_changed(&mut self, state: &mut EditorState) -> Result<(), ScalerError> {
        if !self.scaler.is_active() {
            return Ok(());
        }
        self.finish_transaction(state);
        self.scaler
            .on_selection_changed(state.selection.selected(), &state.scene)
    }

    /// Run one editor frame.
    pub fn update(&mut self, state: &mut EditorState, camera: &dyn CameraRig, input: &InputFrame) -> Vec<ScalerEvent> {
        if !state.session_alive {
            if self.scaler.is_visible() {
                log::info!("Editor session closed, hiding scaler");
                self.hide(state);
            }
            return Vec::new();
        }

        if self.actions.pressed(input, EditorAction::ToggleTool) {
            if self.scaler.is_active() {
                self.deactivate(state);
            } else {
                self.activate(state);
            }
        }

        if state.selection.take_dirty() {
            self.sync_selection(state);
        }

        if self.scaler.is_active() {
            if self.actions.pressed(input, EditorAction::Grab) {
                self.grab(state, camera, input.pointer);
            }
            if self.actions.released(input, EditorAction::Grab) && self.scaler.release_handle().is_ok() {
                self.finish_transaction(state);
            }
            self.scaler.set_step(state.grid_step);
        }

        let events = self.scaler.tick(camera, input.pointer, &mut state.scene);
        if events.contains(&ScalerEvent::AnchorLost) {
            self.finish_transaction(state);
            state.selection.clear();
            // The scaler already detached; don't re-evaluate our own clear.
            state.selection.take_dirty();
        }
        events
    }

    /// Tooltip to draw this frame
    pub fn tooltip(&self, pointer: Vec2) -> Option<TooltipBox> {
        self.tooltip.layout(&self.scaler, pointer)
    }

    fn sync_selection(&mut self, state: &mut EditorState) {
        if let Err(e) = self.on_selection_changed(state) {
            log::warn!("Scaler could not attach to selection: {}", e);
        }
    }

    fn grab(&mut self, state: &EditorState, camera: &dyn CameraRig, pointer: Vec2) {
        let ray = camera.screen_point_to_ray(pointer);
        match self.scaler.try_grab_handle(&ray) {
            Ok(_) => {
                let selection: Vec<_> = self
                    .scaler
                    .selection()
                    .map(|s| s.targets().collect())
                    .unwrap_or_default();
                let before = SceneSnapshot::capture(&state.scene, &selection);
                self.pending = Some(PendingTransaction { selection, before });
            }
            Err(e) => log::debug!("Grab ignored: {}", e),
        }
    }

    /// Record the pending drag, if any, as an undo transaction.
    fn finish_transaction(&mut self, state: &mut EditorState) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        let after = SceneSnapshot::capture(&state.scene, &pending.selection);
        if let Err(e) = state
            .history
            .commit(&self.undo_key, &pending.selection, &pending.before, &after)
        {
            log::error!("Failed to record scaler undo step: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scaler_core::{LocalBounds, ScalerState};
    use scaler_math::{Transform, Vec3};

    use crate::viewport::ViewportCamera;

    fn setup() -> (ScalerTool, EditorState, ViewportCamera) {
        let mut state = EditorState::new();
        let id = state.scene.spawn("Block", Transform::IDENTITY, LocalBounds::new(Vec3::splat(2.0), Vec3::ZERO));
        state.selection.select_multiple([id]);
        let mut camera = ViewportCamera::new(Vec3::new(0.0, 0.0, 10.0), 800, 600);
        camera.look_at(Vec3::ZERO);
        (ScalerTool::new(&ScalerSettings::default()), state, camera)
    }

    #[test]
    fn test_toggle_key() {
        let (mut tool, mut state, camera) = setup();
        assert_eq!(tool.scaler().state(), ScalerState::Inactive);

        tool.update(&mut state, &camera, &InputFrame::default().press("g"));
        assert_eq!(tool.scaler().state(), ScalerState::Visible);

        tool.update(&mut state, &camera, &InputFrame::default().press("G"));
        assert_eq!(tool.scaler().state(), ScalerState::Inactive);
    }

    #[test]
    fn test_session_closed_hides() {
        let (mut tool, mut state, camera) = setup();
        tool.activate(&mut state);
        assert!(tool.scaler().is_visible());

        state.session_alive = false;
        tool.update(&mut state, &camera, &InputFrame::default());
        assert_eq!(tool.scaler().state(), ScalerState::Hidden);
    }

    #[test]
    fn test_grab_miss_records_nothing() {
        let (mut tool, mut state, camera) = setup();
        tool.activate(&mut state);
        let input = InputFrame::at(Vec2::new(5.0, 5.0)).press("Y");
        tool.update(&mut state, &camera, &input);
        assert!(!tool.scaler().is_dragging());

        tool.update(&mut state, &camera, &InputFrame::default().release("Y"));
        assert!(!state.history.can_undo());
    }
}
