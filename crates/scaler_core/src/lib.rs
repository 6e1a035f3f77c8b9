//! Scaler Core - bounding-box resize gizmo
//!
//! Six handles sit on the faces of the box enclosing a selection. Dragging one
//! lengthens or shortens that axis of the box in grid steps, and every
//! selected object is rescaled and repositioned so it keeps its place inside
//! the box.
//!
//! # Architecture
//!
//! ```text
//!   host selection ──► Scaler::set_selection ──► bounds ──► PivotFrame + Handles
//!                                                             │
//!   camera + pointer ─► Scaler::tick ──► drag plane ──► snap ─┘
//!                                │
//!                                └──► propagate ──► TargetStore (scale, position)
//! ```
//!
//! The host owns the objects. The scaler only ever sees [`TargetId`]s and
//! resolves them through the [`TargetStore`] passed into each call.
//!
//! # Example
//!
//! ```ignore
//! use scaler_core::prelude::*;
//!
//! let mut scaler = Scaler::new(ScalerConfig::default());
//! scaler.activate();
//! scaler.set_selection(&selected_ids, &scene)?;
//!
//! // every frame
//! scaler.set_step(grid.size);
//! for event in scaler.tick(&camera, pointer, &mut scene) {
//!     if event == ScalerEvent::AnchorLost {
//!         selection.clear();
//!     }
//! }
//! ```

pub mod bounds;
pub mod config;
pub mod error;
pub mod frame;
pub mod handle;
pub mod host;
pub mod propagate;
pub mod scaler;
pub mod selection;
pub mod snap;

#[cfg(test)]
mod test_support;

pub use bounds::{compute_bounding_box, gather_objects, BoundedObject, BoundingBox};
pub use config::ScalerConfig;
pub use error::{Result, ScalerError};
pub use frame::PivotFrame;
pub use handle::{axis_of, outward_of, twin_of, Axis, Handle, HANDLE_COUNT};
pub use host::{CameraRig, LocalBounds, RaycastLayer, TargetId, TargetStore};
pub use propagate::{apply_dimension_change, closest_axis, DimensionChange};
pub use scaler::{Scaler, ScalerEvent, ScalerState};
pub use selection::{SelectionSnapshot, TargetPlacement};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        Axis, CameraRig, LocalBounds, RaycastLayer, Scaler, ScalerConfig, ScalerError, ScalerEvent,
        ScalerState, TargetId, TargetStore,
    };
}
