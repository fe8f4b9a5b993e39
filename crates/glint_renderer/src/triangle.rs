//! Triangle primitive for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use glint_math::{Interval, Ray, Vec3};

/// A world-space triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// Vertices
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
    /// Pre-computed geometric normal (unit length, zero if degenerate)
    normal: Vec3,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    ///
    /// The normal follows the winding: `(v1 - v0) × (v2 - v0)`.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        let normal = (v1 - v0).cross(v2 - v0).normalize_or_zero();
        Self { v0, v1, v2, normal }
    }

    /// Geometric normal, or zero for a degenerate triangle.
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// True when the vertices are collinear or coincident.
    pub fn is_degenerate(&self) -> bool {
        self.normal == Vec3::ZERO
    }

    /// Möller-Trumbore ray-triangle intersection.
    ///
    /// Both faces are hit. Returns the ray parameter `t` when it lies in
    /// `ray_t`; with a unit direction `t` is the distance from the origin.
    pub fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<f32> {
        if self.is_degenerate() {
            return None;
        }

        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;

        let h = ray.direction().cross(edge2);
        let a = edge1.dot(h);

        // Ray is parallel to triangle
        if a.abs() < 1e-8 {
            return None;
        }

        let f = 1.0 / a;
        let s = ray.origin() - self.v0;
        let u = f * s.dot(h);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = f * ray.direction().dot(q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * edge2.dot(q);
        ray_t.contains(t).then_some(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facing_camera() -> Triangle {
        // Triangle in XY plane at z=-1
        Triangle::new(
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(0.0, 1.0, -1.0),
        )
    }

    #[test]
    fn test_triangle_hit() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let t = facing_camera().intersect(&ray, Interval::FORWARD).unwrap();
        assert!((t - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_triangle_miss() {
        // Ray pointing away
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0));
        assert!(facing_camera().intersect(&ray, Interval::FORWARD).is_none());

        // Ray passing beside the triangle
        let ray = Ray::new(Vec3::new(3.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(facing_camera().intersect(&ray, Interval::FORWARD).is_none());
    }

    #[test]
    fn test_back_face_is_hit() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, -2.0), Vec3::new(0.0, 0.0, 1.0));
        let t = facing_camera().intersect(&ray, Interval::FORWARD).unwrap();
        assert!((t - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_interval_limits_hit() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert!(facing_camera()
            .intersect(&ray, Interval::new(0.0, 0.5))
            .is_none());
    }

    #[test]
    fn test_normal_follows_winding() {
        assert!((facing_camera().normal() - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_degenerate_triangle_never_hits() {
        let tri = Triangle::new(Vec3::ZERO, Vec3::X, Vec3::X * 2.0);
        assert!(tri.is_degenerate());

        let ray = Ray::new(Vec3::new(1.0, 0.0, 1.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(tri.intersect(&ray, Interval::FORWARD).is_none());
    }
}
