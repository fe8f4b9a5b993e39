//! Render-ready flattening of a [`Scene`].

use std::sync::Arc;

use glint_core::{Material, PointLight, Scene};
use glint_math::{Camera, Interval, Ray, Vec3};

use crate::hittable::{any_hit, closest_hit, ObjectId, Primitive, SphereMode};
use crate::{Sphere, Triangle};

/// Record of a ray-object intersection.
#[derive(Clone, Copy, Debug)]
pub struct HitRecord<'a> {
    /// Distance along the ray
    pub t: f32,
    /// Point of intersection
    pub p: Vec3,
    /// Unit surface normal, facing the ray origin
    pub normal: Vec3,
    /// Object that was hit
    pub object: ObjectId,
    /// Material at the intersection point
    pub material: &'a Material,
}

/// World-space primitives plus the camera and lights of one scene.
///
/// Built once per scene and only read while rendering.
pub struct World {
    primitives: Vec<Primitive>,
    materials: Vec<Arc<Material>>,
    lights: Vec<PointLight>,
    camera: Camera,
}

impl World {
    /// Flatten a scene into world-space primitives.
    ///
    /// Every object contributes its tessellated triangles; spheres also
    /// contribute an analytic sphere so both sphere modes are available.
    pub fn from_scene(scene: &Scene) -> Self {
        let mut primitives = Vec::new();
        let mut materials = Vec::with_capacity(scene.objects.len());

        for (object, scene_object) in scene.objects.iter().enumerate() {
            let sphere = scene_object.sphere_bounds();

            for [v0, v1, v2] in scene_object.world_mesh().extract_triangle_vertices() {
                let triangle = Triangle::new(v0, v1, v2);
                if triangle.is_degenerate() {
                    continue;
                }
                primitives.push(if sphere.is_some() {
                    Primitive::sphere_facet(triangle, object)
                } else {
                    Primitive::triangle(triangle, object)
                });
            }

            if let Some((center, radius)) = sphere {
                primitives.push(Primitive::sphere(Sphere::new(center, radius), object));
            }

            materials.push(scene_object.material.clone());
        }

        log::info!(
            "World '{}': {} objects, {} primitives, {} lights",
            scene.name,
            materials.len(),
            primitives.len(),
            scene.lights.len()
        );

        Self {
            primitives,
            materials,
            lights: scene.lights.clone(),
            camera: scene.camera,
        }
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Lights in scene order; the first is the primary light.
    pub fn lights(&self) -> &[PointLight] {
        &self.lights
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Material of an object.
    pub fn material(&self, object: ObjectId) -> &Material {
        &self.materials[object]
    }

    /// Nearest hit in front of the ray origin.
    pub fn closest_hit(
        &self,
        ray: &Ray,
        exclude: Option<ObjectId>,
        mode: SphereMode,
    ) -> Option<HitRecord<'_>> {
        closest_hit(ray, &self.primitives, Interval::FORWARD, exclude, mode).map(|hit| HitRecord {
            t: hit.t,
            p: hit.p,
            normal: hit.normal,
            object: hit.object,
            material: self.material(hit.object),
        })
    }

    /// True if any object other than `exclude` blocks the ray inside `ray_t`.
    pub fn occluded(
        &self,
        ray: &Ray,
        ray_t: Interval,
        exclude: Option<ObjectId>,
        mode: SphereMode,
    ) -> bool {
        any_hit(ray, &self.primitives, ray_t, exclude, mode)
    }
}
