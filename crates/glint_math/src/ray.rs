use crate::Vec3;

/// A ray in 3D space with an origin and a direction.
///
/// The direction is not required to be unit length. Intersection code
/// normalizes it (see [`Ray::normalized`]) before measuring distances.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Get the direction vector of the ray.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Return the same ray with a unit-length direction.
    ///
    /// Returns `None` for a zero-length or non-finite direction, which the
    /// tracer treats as a ray that hits nothing.
    pub fn normalized(&self) -> Option<Ray> {
        let direction = self.direction.try_normalize()?;
        Some(Ray::new(self.origin, direction))
    }
}
