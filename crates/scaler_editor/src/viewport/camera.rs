//! Viewport camera.

use scaler_core::CameraRig;
use scaler_math::{Quat, Ray, Vec2, Vec3};

/// Perspective camera looking through the editor viewport.
///
/// Screen coordinates are pixels with the origin at the top-left corner and y
/// growing downwards.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewportCamera {
    pub position: Vec3,
    /// Rotation around world Y, radians
    pub yaw: f32,
    /// Rotation around the camera's X, radians, clamped to avoid flipping
    pub pitch: f32,
    /// Vertical field of view, radians
    pub fov_y: f32,
    pub width: u32,
    pub height: u32,
}

impl Default for ViewportCamera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 2.0, 5.0),
            yaw: 0.0,
            pitch: -0.3,
            fov_y: 60f32.to_radians(),
            width: 1280,
            height: 720,
        }
    }
}

impl ViewportCamera {
    const PITCH_LIMIT: f32 = 1.5;

    pub fn new(position: Vec3, width: u32, height: u32) -> Self {
        Self {
            position,
            width,
            height,
            ..Default::default()
        }
    }

    /// Turn the camera towards `target`.
    pub fn look_at(&mut self, target: Vec3) {
        let direction = (target - self.position).normalize();
        if direction == Vec3::ZERO {
            return;
        }
        self.yaw = (-direction.x).atan2(-direction.z);
        self.pitch = direction.y.clamp(-1.0, 1.0).asin().clamp(-Self::PITCH_LIMIT, Self::PITCH_LIMIT);
    }

    /// Get the aspect ratio.
    pub fn aspect_ratio(&self) -> f32 {
        if self.height > 0 {
            self.width as f32 / self.height as f32
        } else {
            1.0
        }
    }

    /// Update viewport size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw) * Quat::from_rotation_x(self.pitch)
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::NEG_Z
    }

    /// Screen pixel where `point` appears, or `None` if it is behind the camera.
    pub fn world_to_screen(&self, point: Vec3) -> Option<Vec2> {
        let local = self.rotation().inverse() * (point - self.position);
        if local.z >= -1e-6 {
            return None;
        }
        let tan = (self.fov_y * 0.5).tan();
        let depth = -local.z;
        let ndc_x = local.x / (depth * tan * self.aspect_ratio());
        let ndc_y = local.y / (depth * tan);
        Some(Vec2::new(
            (ndc_x + 1.0) * 0.5 * self.width as f32,
            (1.0 - ndc_y) * 0.5 * self.height as f32,
        ))
    }
}

impl CameraRig for ViewportCamera {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn screen_point_to_ray(&self, screen: Vec2) -> Ray {
        let width = self.width.max(1) as f32;
        let height = self.height.max(1) as f32;
        let ndc_x = screen.x / width * 2.0 - 1.0;
        let ndc_y = 1.0 - screen.y / height * 2.0;
        let tan = (self.fov_y * 0.5).tan();
        let local = Vec3::new(ndc_x * tan * self.aspect_ratio(), ndc_y * tan, -1.0);
        Ray::new(self.position, self.rotation() * local)
    }
}
