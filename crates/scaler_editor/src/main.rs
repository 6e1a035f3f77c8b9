//! Grid Scaler demo
//!
//! Headless scripted editor session: builds a small level, selects two
//! blocks, drags the +X handle of the scaler box across a few frames,
//! releases it and undoes the resize. Run with `RUST_LOG=debug` to follow the
//! scaler's state transitions.

use scaler_core::{Axis, LocalBounds, TargetStore};
use scaler_math::{Transform, Vec2, Vec3};

use scaler_editor::{EditorState, InputFrame, ScalerSettings, ScalerTool, ViewportCamera};

fn build_level(state: &mut EditorState) -> Vec<scaler_core::TargetId> {
    let block = LocalBounds::new(Vec3::splat(1.0), Vec3::ZERO);
    let floor = state.scene.spawn(
        "Floor",
        Transform::from_position(Vec3::new(0.0, -0.5, 0.0)).with_scale(Vec3::new(4.0, 1.0, 4.0)),
        block,
    );
    let pillar = state.scene.spawn(
        "Pillar",
        Transform::from_position(Vec3::new(1.5, 1.0, 1.5)).with_scale(Vec3::new(1.0, 2.0, 1.0)),
        block,
    );
    state.scene.spawn("Ramp", Transform::from_position(Vec3::new(-4.0, 0.0, 0.0)), block);
    vec![floor, pillar]
}

fn log_objects(state: &EditorState, ids: &[scaler_core::TargetId]) {
    for &id in ids {
        if let Some(object) = state.scene.get(id) {
            log::info!(
                "  {} '{}': position {:?}, scale {:?}, revision {}",
                id,
                object.name,
                object.transform.position.to_array(),
                object.transform.scale.to_array(),
                object.revision
            );
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let settings = ScalerSettings::load_default().unwrap_or_else(|e| {
        log::warn!("{}; falling back to default settings", e);
        ScalerSettings::default()
    });

    let mut state = EditorState::new();
    state.grid_step = 0.5;
    let selected = build_level(&mut state);
    state.selection.select_multiple(selected.iter().copied());

    let mut camera = ViewportCamera::new(Vec3::new(6.0, 5.0, 12.0), 1280, 720);
    camera.look_at(Vec3::ZERO);

    let mut tool = ScalerTool::new(&settings);
    tool.update(&mut state, &camera, &InputFrame::default().press(settings.toggle_key.as_str()));
    log::info!(
        "Scaler {:?}, box {} x {} x {}",
        tool.scaler().state(),
        tool.scaler().dimension_text(Axis::X),
        tool.scaler().dimension_text(Axis::Y),
        tool.scaler().dimension_text(Axis::Z)
    );
    log_objects(&state, &selected);

    let handle = tool.scaler().handles()[0].position();
    let pointer = camera
        .world_to_screen(handle)
        .ok_or("+X handle is behind the camera")?;
    tool.update(&mut state, &camera, &InputFrame::at(pointer).press(settings.grab_key.as_str()));
    log::info!("Grabbed: {:?}", tool.scaler().dragged_axis());

    let mut last_pointer = pointer;
    for frame in 1..=6 {
        let target = handle + Vec3::X * (frame as f32 * 0.4);
        let Some(pointer) = camera.world_to_screen(target) else {
            continue;
        };
        last_pointer = pointer;
        let events = tool.update(&mut state, &camera, &InputFrame::at(pointer));
        if let Some(tooltip) = tool.tooltip(pointer) {
            log::info!(
                "Frame {}: {:?}, tooltip '{}' at ({:.0}, {:.0})",
                frame,
                events,
                tooltip.text,
                tooltip.position.x,
                tooltip.position.y
            );
        }
    }

    tool.update(&mut state, &camera, &InputFrame::at(last_pointer).release(settings.grab_key.as_str()));
    log::info!("Released, undo steps: {}", state.history.undo_count());
    log_objects(&state, &selected);

    state.undo()?;
    tool.update(&mut state, &camera, &InputFrame::at(Vec2::ZERO));
    log::info!(
        "After undo, box {} x {} x {}",
        tool.scaler().dimension_text(Axis::X),
        tool.scaler().dimension_text(Axis::Y),
        tool.scaler().dimension_text(Axis::Z)
    );
    log_objects(&state, &selected);

    let anchor = selected.last().copied().ok_or("nothing selected")?;
    log::info!("Anchor {} still present: {}", anchor, state.scene.contains(anchor));
    Ok(())
}
