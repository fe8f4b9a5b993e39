//! Recursive Whitted-style ray tracing.
//!
//! Local color is the sum of Phong contributions of the active lights.
//! Mirror materials blend in the color seen along the reflected ray, up to a
//! fixed recursion depth.

use glint_core::Color;
use glint_math::{reflect, Ray, RayGenerator};

use crate::{shade, Settings, SphereMode, World};

/// Offset applied to reflected ray origins along the surface normal.
pub const MIRROR_BIAS: f32 = 0.001;

/// Everything a trace needs, passed explicitly down the call tree.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub world: &'a World,
    pub settings: &'a Settings,
    /// Primary rays for the world's camera at the settings' aspect
    pub rays: RayGenerator,
}

impl<'a> RenderContext<'a> {
    pub fn new(world: &'a World, settings: &'a Settings) -> Self {
        let rays = world.camera().ray_generator(settings.aspect());
        Self::with_rays(world, settings, rays)
    }

    /// Reuse a ray generator prepared earlier for the same camera and aspect.
    pub fn with_rays(world: &'a World, settings: &'a Settings, rays: RayGenerator) -> Self {
        Self {
            world,
            settings,
            rays,
        }
    }

    pub fn sphere_mode(&self) -> SphereMode {
        self.settings.sphere_mode()
    }
}

/// Compute the color seen along a ray.
///
/// `depth` is the number of mirror bounces still allowed; at zero mirrors
/// show only their local color. Misses are black.
pub fn trace_color(ray: &Ray, depth: u32, ctx: &RenderContext<'_>) -> Color {
    let Some(ray) = ray.normalized() else {
        return Color::ZERO;
    };
    let Some(hit) = ctx.world.closest_hit(&ray, None, ctx.sphere_mode()) else {
        return Color::ZERO;
    };

    let settings = ctx.settings;
    if !settings.phong {
        return hit.material.diffuse;
    }

    let lights = ctx.world.lights();
    let active = if settings.all_lights {
        lights
    } else {
        &lights[..lights.len().min(1)]
    };
    let local = active
        .iter()
        .fold(Color::ZERO, |acc, light| acc + shade(light, &hit, ctx));

    if settings.mirrors && hit.material.mirror && depth > 0 {
        let reflected = Ray::new(
            hit.p + hit.normal * MIRROR_BIAS,
            reflect(ray.direction(), hit.normal),
        );
        let reflected_color = trace_color(&reflected, depth - 1, ctx);
        return local.lerp(reflected_color, hit.material.reflectivity);
    }

    local
}
