//! Phong lighting for a single point light.

use glint_core::{Color, PointLight};
use glint_math::{Interval, Ray};

use crate::{HitRecord, RenderContext};

/// Offset along the normal for shadow ray origins, and the shadow ray's
/// minimum distance.
pub const SHADOW_EPSILON: f32 = 1e-4;

/// Light reaching the camera from `light` via the surface at `hit`.
///
/// Diffuse plus specular, no ambient term. The specular lobe uses
/// `shininess / 5` as its exponent and is only evaluated when the light is
/// in front of the surface. Returns black when shadows are enabled and
/// another object lies between the point and the light.
pub fn shade(light: &PointLight, hit: &HitRecord<'_>, ctx: &RenderContext<'_>) -> Color {
    let to_light = light.position - hit.p;
    let dist_sq = to_light.length_squared();
    if dist_sq <= 0.0 {
        return Color::ZERO;
    }
    let dist = dist_sq.sqrt();
    let light_dir = to_light / dist;

    if ctx.settings.shadows {
        let shadow_ray = Ray::new(hit.p + hit.normal * SHADOW_EPSILON, light_dir);
        if ctx.world.occluded(
            &shadow_ray,
            Interval::new(SHADOW_EPSILON, dist),
            Some(hit.object),
            ctx.sphere_mode(),
        ) {
            return Color::ZERO;
        }
    }

    let material = hit.material;
    let n = hit.normal;
    let cos_theta = n.dot(light_dir).max(0.0);
    let light_intensity = light.color * light.intensity * 4.0 / dist_sq;

    let diffuse = material.diffuse * light_intensity * cos_theta;

    let mut specular = Color::ZERO;
    if cos_theta > 0.0 {
        let reflected = 2.0 * n.dot(light_dir) * n - light_dir;
        let view_dir = (ctx.world.camera().position - hit.p).normalize_or_zero();
        let cos_gamma = reflected.dot(view_dir).max(0.0);
        let exponent = material.shininess / 5.0;
        specular =
            material.specular * light_intensity * (exponent / 4.0) * cos_gamma.powf(exponent);
    }

    diffuse + specular
}
