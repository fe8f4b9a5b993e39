//! Primitives and nearest-hit queries.
//!
//! A scene object is flattened into one or more [`Primitive`]s that share
//! its [`ObjectId`]. Spheres contribute both their tessellated facets and an
//! analytic [`Sphere`]; [`SphereMode`] decides which of the two is visible
//! to a query.

use crate::{Sphere, Triangle};
use glint_math::{Interval, Ray, Vec3};

/// Index of the scene object a primitive belongs to.
pub type ObjectId = usize;

/// Which representation of spheres intersection queries use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SphereMode {
    /// Spheres are hit through their tessellated facets.
    #[default]
    Tessellated,
    /// Spheres are hit analytically; their facets are ignored.
    Exact,
}

/// Primitive shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    Sphere(Sphere),
    Triangle(Triangle),
}

/// A world-space primitive tagged with its owning object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Primitive {
    pub geometry: Geometry,
    pub object: ObjectId,
    /// True for triangles that approximate a sphere
    pub sphere_facet: bool,
}

impl Primitive {
    pub fn triangle(triangle: Triangle, object: ObjectId) -> Self {
        Self {
            geometry: Geometry::Triangle(triangle),
            object,
            sphere_facet: false,
        }
    }

    pub fn sphere_facet(triangle: Triangle, object: ObjectId) -> Self {
        Self {
            sphere_facet: true,
            ..Self::triangle(triangle, object)
        }
    }

    pub fn sphere(sphere: Sphere, object: ObjectId) -> Self {
        Self {
            geometry: Geometry::Sphere(sphere),
            object,
            sphere_facet: false,
        }
    }

    /// Whether queries in `mode` consider this primitive.
    pub fn is_visible(&self, mode: SphereMode) -> bool {
        match (self.geometry, mode) {
            (Geometry::Sphere(_), SphereMode::Exact) => true,
            (Geometry::Sphere(_), SphereMode::Tessellated) => false,
            (Geometry::Triangle(_), SphereMode::Exact) => !self.sphere_facet,
            (Geometry::Triangle(_), SphereMode::Tessellated) => true,
        }
    }

    /// Intersect a unit-direction ray. Returns the distance and the outward
    /// (not yet ray-facing) normal.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<(f32, Vec3)> {
        match &self.geometry {
            Geometry::Triangle(tri) => tri.intersect(ray, ray_t).map(|t| (t, tri.normal())),
            Geometry::Sphere(sphere) => {
                let crossing = sphere.intersect(ray)?;
                if !ray_t.contains(crossing.t0) {
                    return None;
                }
                let normal = sphere
                    .normal_at(crossing.near)
                    .unwrap_or(-ray.direction());
                Some((crossing.t0, normal))
            }
        }
    }
}

/// Result of a nearest-hit query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Distance from the ray origin
    pub t: f32,
    /// Point of intersection
    pub p: Vec3,
    /// Unit surface normal, facing the ray origin
    pub normal: Vec3,
    /// Object that was hit
    pub object: ObjectId,
}

/// Orient `outward` so it points back toward the incoming ray.
#[inline]
fn face_normal(ray: &Ray, outward: Vec3) -> Vec3 {
    if ray.direction().dot(outward) > 0.0 {
        -outward
    } else {
        outward
    }
}

/// Find the nearest hit along `ray` within `ray_t`.
///
/// Primitives of the `exclude`d object are skipped. The ray direction is
/// normalized first; a zero-length direction hits nothing. Analytic spheres
/// compete by their near-root distance, the same measure triangles use.
pub fn closest_hit(
    ray: &Ray,
    primitives: &[Primitive],
    ray_t: Interval,
    exclude: Option<ObjectId>,
    mode: SphereMode,
) -> Option<Hit> {
    let ray = ray.normalized()?;
    let mut closest: Option<(f32, Vec3, ObjectId)> = None;
    let mut closest_so_far = ray_t.max;

    for prim in primitives {
        if !prim.is_visible(mode) || Some(prim.object) == exclude {
            continue;
        }
        if let Some((t, normal)) = prim.hit(&ray, ray_t.with_max(closest_so_far)) {
            closest_so_far = t;
            closest = Some((t, normal, prim.object));
        }
    }

    closest.map(|(t, normal, object)| Hit {
        t,
        p: ray.at(t),
        normal: face_normal(&ray, normal),
        object,
    })
}

/// True if anything other than `exclude` is hit strictly inside `ray_t`.
pub fn any_hit(
    ray: &Ray,
    primitives: &[Primitive],
    ray_t: Interval,
    exclude: Option<ObjectId>,
    mode: SphereMode,
) -> bool {
    let Some(ray) = ray.normalized() else {
        return false;
    };

    primitives
        .iter()
        .filter(|prim| prim.is_visible(mode) && Some(prim.object) != exclude)
        .filter_map(|prim| prim.hit(&ray, ray_t))
        .any(|(t, _)| ray_t.surrounds(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Quad whose diagonal stays clear of the z axis
    fn wall(z: f32, object: ObjectId) -> [Primitive; 2] {
        let a = Vec3::new(-1.0, -1.0, z);
        let b = Vec3::new(2.0, -1.0, z);
        let c = Vec3::new(2.0, 3.0, z);
        let d = Vec3::new(-1.0, 3.0, z);
        [
            Primitive::triangle(Triangle::new(a, b, c), object),
            Primitive::triangle(Triangle::new(a, c, d), object),
        ]
    }

    fn forward() -> Ray {
        Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0))
    }

    #[test]
    fn test_nearest_of_two_walls() {
        let mut prims = Vec::new();
        prims.extend(wall(-5.0, 0));
        prims.extend(wall(-2.0, 1));

        let hit = closest_hit(&forward(), &prims, Interval::FORWARD, None, SphereMode::Exact)
            .unwrap();
        assert_eq!(hit.object, 1);
        assert!((hit.t - 2.0).abs() < 1e-5);
        assert!((hit.p - Vec3::new(0.0, 0.0, -2.0)).length() < 1e-5);
    }

    #[test]
    fn test_exclude_skips_object() {
        let mut prims = Vec::new();
        prims.extend(wall(-5.0, 0));
        prims.extend(wall(-2.0, 1));

        let hit = closest_hit(&forward(), &prims, Interval::FORWARD, Some(1), SphereMode::Exact)
            .unwrap();
        assert_eq!(hit.object, 0);
    }

    #[test]
    fn test_no_primitives_no_hit() {
        assert!(closest_hit(&forward(), &[], Interval::FORWARD, None, SphereMode::Exact).is_none());
    }

    #[test]
    fn test_unnormalized_direction_reports_distance() {
        let prims = wall(-3.0, 0);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -10.0));

        let hit = closest_hit(&ray, &prims, Interval::FORWARD, None, SphereMode::Exact).unwrap();
        assert!((hit.t - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_zero_direction_is_a_miss() {
        let prims = wall(-3.0, 0);
        let ray = Ray::new(Vec3::ZERO, Vec3::ZERO);

        assert!(closest_hit(&ray, &prims, Interval::FORWARD, None, SphereMode::Exact).is_none());
        assert!(!any_hit(&ray, &prims, Interval::FORWARD, None, SphereMode::Exact));
    }

    #[test]
    fn test_normal_faces_ray_origin() {
        // Wall winding makes its normal +Z; hit it from behind
        let prims = wall(-3.0, 0);
        let ray = Ray::new(Vec3::new(0.0, 0.0, -6.0), Vec3::Z);

        let hit = closest_hit(&ray, &prims, Interval::FORWARD, None, SphereMode::Exact).unwrap();
        assert!((hit.normal - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-6);
    }

    #[test]
    fn test_sphere_mode_selects_representation() {
        let facet = Triangle::new(
            Vec3::new(-1.0, -1.0, -4.0),
            Vec3::new(1.0, -1.0, -4.0),
            Vec3::new(0.0, 1.0, -4.0),
        );
        let prims = [
            Primitive::sphere_facet(facet, 0),
            Primitive::sphere(Sphere::new(Vec3::new(0.0, 0.0, -5.0), 0.5), 0),
        ];

        let coarse = closest_hit(&forward(), &prims, Interval::FORWARD, None, SphereMode::Tessellated)
            .unwrap();
        assert!((coarse.t - 4.0).abs() < 1e-5);

        let exact = closest_hit(&forward(), &prims, Interval::FORWARD, None, SphereMode::Exact)
            .unwrap();
        assert!((exact.t - 4.5).abs() < 1e-5);
        assert!((exact.normal - Vec3::Z).length() < 1e-5);
    }

    // Analytic spheres are ranked by the distance to their surface, not the
    // distance to their center. Here the wall sits between the sphere's
    // surface (t = 4) and its center (t = 5); the sphere must win.
    #[test]
    fn test_exact_sphere_ranked_by_surface_distance() {
        let mut prims = vec![Primitive::sphere(Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0), 0)];
        prims.extend(wall(-4.5, 1));

        let hit = closest_hit(&forward(), &prims, Interval::FORWARD, None, SphereMode::Exact)
            .unwrap();
        assert_eq!(hit.object, 0);
        assert!((hit.t - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_any_hit_respects_interval() {
        let prims = wall(-3.0, 0);

        assert!(any_hit(&forward(), &prims, Interval::new(1e-4, 10.0), None, SphereMode::Exact));
        assert!(!any_hit(&forward(), &prims, Interval::new(1e-4, 2.0), None, SphereMode::Exact));
        assert!(!any_hit(&forward(), &prims, Interval::new(1e-4, 10.0), Some(0), SphereMode::Exact));
    }
}
