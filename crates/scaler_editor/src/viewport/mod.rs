//! Viewport camera and screen-space helpers.

mod camera;

pub use camera::ViewportCamera;
