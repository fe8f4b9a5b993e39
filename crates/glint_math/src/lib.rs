// Re-export glam for convenience
pub use glam::*;

// Glint math types
mod camera;
mod interval;
mod ray;

pub use camera::{Camera, RayGenerator};
pub use interval::Interval;
pub use ray::Ray;

/// Reflect `v` about the unit normal `n`.
///
/// Returns `v - 2 (v·n) n`, the mirror image of an incident direction.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}
