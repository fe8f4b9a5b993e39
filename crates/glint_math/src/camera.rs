use glam::{Mat4, Vec2, Vec3};

use crate::Ray;

/// Pinhole camera used to generate primary rays.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians
    pub fov_y: f32,
}

impl Camera {
    /// Create a new camera looking from `position` at `target`.
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self {
            position,
            target,
            up: Vec3::Y,
            fov_y: 60.0_f32.to_radians(),
        }
    }

    /// Set the vertical field of view in degrees.
    pub fn with_fov_degrees(mut self, fov_y: f32) -> Self {
        self.fov_y = fov_y.to_radians();
        self
    }

    /// Get the view matrix (world → camera space)
    ///
    /// When the view direction is parallel to `up`, the direction is nudged
    /// slightly off axis so the basis stays well defined. A camera sitting on
    /// its target looks down -Z.
    pub fn view_matrix(&self) -> Mat4 {
        let mut back = self.position - self.target;
        if back.length_squared() == 0.0 {
            back = Vec3::Z;
        }
        if back.cross(self.up).length_squared() <= f32::EPSILON * back.length_squared() {
            if self.up.z.abs() > 0.999 {
                back.x += 1e-4;
            } else {
                back.z += 1e-4;
            }
        }
        Mat4::look_to_rh(self.position, -back, self.up)
    }

    /// Precompute what primary ray generation needs for an image plane with
    /// the given width / height `aspect`.
    pub fn ray_generator(&self, aspect: f32) -> RayGenerator {
        RayGenerator {
            origin: self.position,
            camera_to_world: self.view_matrix().inverse(),
            half_height: (self.fov_y * 0.5).tan(),
            aspect,
        }
    }

    /// Build the ray through a point in normalized device coordinates.
    ///
    /// `ndc` spans [-1, 1] on both axes with +y pointing up. `aspect` is
    /// width / height of the image plane. The ray starts at the camera
    /// position and its direction is unit length.
    pub fn ray_through(&self, ndc: Vec2, aspect: f32) -> Ray {
        self.ray_generator(aspect).ray(ndc)
    }
}

/// Primary ray factory for one camera pose and image aspect.
#[derive(Debug, Clone, Copy)]
pub struct RayGenerator {
    origin: Vec3,
    camera_to_world: Mat4,
    half_height: f32,
    aspect: f32,
}

impl RayGenerator {
    /// Ray through `ndc`; see [`Camera::ray_through`].
    pub fn ray(&self, ndc: Vec2) -> Ray {
        let local = Vec3::new(
            ndc.x * self.half_height * self.aspect,
            ndc.y * self.half_height,
            -1.0,
        );
        let direction = self.camera_to_world.transform_vector3(local).normalize();
        Ray::new(self.origin, direction)
    }
}
