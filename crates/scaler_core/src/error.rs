//! Error types for the scaler gizmo

use thiserror::Error;

use crate::host::TargetId;

/// Reasons a scaler operation was refused.
///
/// None of these leave the gizmo in a partially updated state; the host is
/// free to treat any of them as a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScalerError {
    /// The selection handed to the gizmo was empty, so there is no anchor
    #[error("selection is empty, there is no anchor object to attach to")]
    EmptySelection,

    /// The tool has not been activated
    #[error("scaler tool is not active")]
    Inactive,

    /// No box is placed, so there is nothing to grab
    #[error("scaler handles are not visible")]
    NotVisible,

    /// A handle is already held
    #[error("a handle is already being dragged")]
    AlreadyDragging,

    /// Release was requested without an active drag
    #[error("no handle is being dragged")]
    NotDragging,

    /// The pointer ray missed every handle
    #[error("pointer ray did not hit any handle")]
    NoHandleHit,

    /// A target could not be resolved by the host
    #[error("target not found: {0}")]
    TargetMissing(TargetId),
}

/// Result type for scaler operations
pub type Result<T> = std::result::Result<T, ScalerError>;
