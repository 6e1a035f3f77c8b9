//! Ray intersection queries.

use crate::ray::Ray;
use crate::vector::Vec3;

/// Distance along `ray` to the sphere at `center`, nearest hit in front of
/// the origin first. An origin inside the sphere reports the exit point.
pub fn ray_sphere_at(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let to_origin = ray.origin - center;
    let a = ray.direction.length_squared();
    if a < 1e-12 {
        return None;
    }
    let half_b = to_origin.dot(ray.direction);
    let c = to_origin.length_squared() - radius * radius;
    let discriminant = half_b * half_b - a * c;
    if discriminant < 0.0 {
        return None;
    }

    let root = discriminant.sqrt();
    [(-half_b - root) / a, (-half_b + root) / a]
        .into_iter()
        .find(|&t| t > 0.0)
}

/// Distance along `ray` to the plane through `point` with `normal`.
///
/// Rays parallel to the plane, and planes behind the origin, miss.
pub fn ray_plane(ray: &Ray, point: Vec3, normal: Vec3) -> Option<f32> {
    let facing = normal.dot(ray.direction);
    if facing.abs() < 1e-4 {
        return None;
    }
    let t = (point - ray.origin).dot(normal) / facing;
    (t >= 0.0).then_some(t)
}
