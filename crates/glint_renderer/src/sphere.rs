//! Analytic sphere primitive.
//!
//! Intersection works geometrically from the closest approach of the ray to
//! the center instead of solving the quadratic.

use glint_math::{Ray, Vec3};

/// A sphere primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
}

/// Where a ray enters and leaves a sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereCrossing {
    /// Near ray parameter, clamped to zero when the origin is inside
    pub t0: f32,
    /// Far ray parameter
    pub t1: f32,
    /// Point at `t0`
    pub near: Vec3,
    /// Point at `t1`
    pub far: Vec3,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Intersect a ray whose direction is unit length.
    ///
    /// Returns `None` when the center lies behind the origin (`tca < 0`) or
    /// the ray passes farther than `radius` from the center.
    pub fn intersect(&self, ray: &Ray) -> Option<SphereCrossing> {
        let dir = ray.direction();
        let tca = dir.dot(self.center - ray.origin());
        if tca < 0.0 {
            return None;
        }

        let closest = ray.at(tca);
        let y = (self.center - closest).length();
        if y > self.radius {
            return None;
        }

        let thc = (self.radius * self.radius - y * y).max(0.0).sqrt();
        let t0 = (tca - thc).max(0.0);
        let t1 = tca + thc;

        Some(SphereCrossing {
            t0,
            t1,
            near: ray.at(t0),
            far: ray.at(t1),
        })
    }

    /// Outward unit normal at a surface point.
    ///
    /// Returns `None` if `point` coincides with the center.
    pub fn normal_at(&self, point: Vec3) -> Option<Vec3> {
        (point - self.center).try_normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn along_z() -> Ray {
        Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0))
    }

    #[test]
    fn test_near_and_far_roots() {
        // tca = 5, r = 1
        let sphere = Sphere::new(Vec3::ZERO, 1.0);
        let hit = sphere.intersect(&along_z()).unwrap();

        assert!((hit.t0 - 4.0).abs() < 1e-5);
        assert!((hit.t1 - 6.0).abs() < 1e-5);
        assert!((hit.near - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-5);
        assert!((hit.far - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_sphere_behind_origin() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, 10.0), 1.0);
        assert!(sphere.intersect(&along_z()).is_none());
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = Sphere::new(Vec3::new(1.5, 0.0, 0.0), 1.0);
        assert!(sphere.intersect(&along_z()).is_none());
    }

    #[test]
    fn test_grazing_ray_hits_once() {
        let sphere = Sphere::new(Vec3::new(1.0, 0.0, 0.0), 1.0);
        let hit = sphere.intersect(&along_z()).unwrap();
        assert!((hit.t0 - hit.t1).abs() < 1e-4);
    }

    #[test]
    fn test_origin_inside_clamps_near_root() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, 4.5), 1.0);
        let hit = sphere.intersect(&along_z()).unwrap();

        assert_eq!(hit.t0, 0.0);
        assert_eq!(hit.near, Vec3::new(0.0, 0.0, 5.0));
        assert!((hit.t1 - 1.5).abs() < 1e-5);
    }

    #[test]
    fn test_normal_at() {
        let sphere = Sphere::new(Vec3::new(1.0, 0.0, 0.0), 2.0);
        let n = sphere.normal_at(Vec3::new(1.0, 2.0, 0.0)).unwrap();
        assert_eq!(n, Vec3::Y);
        assert!(sphere.normal_at(sphere.center()).is_none());
    }
}
