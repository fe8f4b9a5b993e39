//! Scene description types.
//!
//! A scene is a list of objects (shape + material + transform), an ordered
//! list of point lights and a camera. It is renderer-agnostic: the renderer
//! flattens it into world-space primitives once per scene.

use std::sync::Arc;

use glint_math::{Camera, EulerRot, Mat4, Quat, Vec3};

use crate::light::PointLight;
use crate::material::Material;
use crate::mesh::Mesh;

/// Transform components that can be composed into a matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct Transform {
    /// Translation
    pub translation: Vec3,

    /// Rotation (as quaternion)
    pub rotation: Quat,

    /// Scale
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Create a new transform with only translation.
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    /// Set the rotation from Euler angles in radians, applied X, then Y, then Z
    /// (intrinsic), i.e. `R = Rx · Ry · Rz`.
    pub fn with_euler_xyz(mut self, x: f32, y: f32, z: f32) -> Self {
        self.rotation = Quat::from_euler(EulerRot::XYZ, x, y, z);
        self
    }

    /// Set the scale.
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Convert to a 4x4 transformation matrix.
    ///
    /// Order: Scale -> Rotate -> Translate (SRT)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

/// Object-space geometry of a scene object.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// Sphere centered at the object origin. The segment counts control the
    /// tessellation used when analytic spheres are disabled.
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
    /// Box centered at the object origin.
    Cuboid { size: Vec3 },
    /// Rectangle in the object's XY plane, facing +Z.
    Plane { width: f32, height: f32 },
}

impl Shape {
    /// Sphere with the default 8 × 4 tessellation.
    pub fn sphere(radius: f32) -> Self {
        Shape::Sphere {
            radius,
            width_segments: 8,
            height_segments: 4,
        }
    }

    /// Tessellate the shape in object space.
    pub fn to_mesh(&self) -> Mesh {
        match *self {
            Shape::Sphere {
                radius,
                width_segments,
                height_segments,
            } => Mesh::uv_sphere(radius, width_segments, height_segments),
            Shape::Cuboid { size } => Mesh::cuboid(size),
            Shape::Plane { width, height } => Mesh::plane(width, height),
        }
    }
}

/// A shape placed in the world with a material.
#[derive(Clone, Debug)]
pub struct SceneObject {
    pub name: String,
    pub shape: Shape,
    pub material: Arc<Material>,
    pub transform: Transform,
}

impl SceneObject {
    pub fn new(
        name: impl Into<String>,
        shape: Shape,
        material: Arc<Material>,
        transform: Transform,
    ) -> Self {
        Self {
            name: name.into(),
            shape,
            material,
            transform,
        }
    }

    /// World-space tessellation of the object.
    pub fn world_mesh(&self) -> Mesh {
        self.shape.to_mesh().transformed(&self.transform.to_matrix())
    }

    /// World-space center and radius when the object is a sphere.
    ///
    /// Non-uniform scale is approximated by the largest axis scale.
    pub fn sphere_bounds(&self) -> Option<(Vec3, f32)> {
        match self.shape {
            Shape::Sphere { radius, .. } => Some((
                self.transform.translation,
                radius * self.transform.scale.abs().max_element(),
            )),
            _ => None,
        }
    }
}

/// A complete scene: objects, lights and camera.
#[derive(Clone, Debug)]
pub struct Scene {
    /// Scene name
    pub name: String,

    /// Objects in insertion order
    pub objects: Vec<SceneObject>,

    /// Point lights; the first one is the primary light
    pub lights: Vec<PointLight>,

    /// Viewing camera
    pub camera: Camera,
}

impl Scene {
    /// Create an empty scene viewed by `camera`.
    pub fn new(name: impl Into<String>, camera: Camera) -> Self {
        Self {
            name: name.into(),
            objects: Vec::new(),
            lights: Vec::new(),
            camera,
        }
    }

    /// Add an object and return its index.
    pub fn add_object(&mut self, object: SceneObject) -> usize {
        let id = self.objects.len();
        self.objects.push(object);
        id
    }

    /// Add a light. Lights keep insertion order.
    pub fn add_light(&mut self, light: PointLight) {
        self.lights.push(light);
    }

    /// Get object count.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Get total triangle count across all objects.
    pub fn total_triangle_count(&self) -> usize {
        self.objects
            .iter()
            .map(|object| object.shape.to_mesh().triangle_count())
            .sum()
    }
}
