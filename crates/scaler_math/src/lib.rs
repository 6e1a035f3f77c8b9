//! # scaler_math - Gizmo Math Primitives
//!
//! Vectors, rotations and transforms used by the grid scaler gizmo, plus the
//! handful of ray queries the gizmo needs to resolve pointer input in 3D.

pub mod vector;
pub mod quaternion;
pub mod transform;
pub mod bounds;
pub mod plane;
pub mod ray;
pub mod intersect;

pub use vector::*;
pub use quaternion::*;
pub use transform::*;
pub use bounds::*;
pub use plane::*;
pub use ray::*;
pub use intersect::*;

/// Angles used across the workspace
pub mod consts {
    pub const PI: f32 = core::f32::consts::PI;
    pub const FRAC_PI_2: f32 = PI / 2.0;
}
