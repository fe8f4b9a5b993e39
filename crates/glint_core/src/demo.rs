//! Built-in demo scene: an open box room with two spheres, two boxes and
//! mirrored back wall, lit by a white key light and two tinted fill lights.
//!
//! Distances are authored in room units (the room is 600 units across) and
//! scaled by 1/300, so the room spans [-1, 1] on X and Y.

use std::sync::Arc;

use glint_math::{Camera, Vec3};

use crate::light::PointLight;
use crate::material::{rgb_from_hex, Material};
use crate::scene::{Scene, SceneObject, Shape, Transform};

const UNIT: f32 = 1.0 / 300.0;

/// Right angle as used for the wall rotations.
const QUARTER_TURN: f32 = 1.57;

fn units(x: f32, y: f32, z: f32) -> Vec3 {
    Vec3::new(x, y, z) * UNIT
}

fn phong(name: &str, diffuse: u32, specular: u32, shininess: f32) -> Arc<Material> {
    Arc::new(
        Material::new(name, rgb_from_hex(diffuse))
            .with_specular(rgb_from_hex(specular), shininess),
    )
}

/// Build the demo scene.
pub fn demo_scene() -> Scene {
    let camera = Camera::new(Vec3::new(0.0, 0.0, 540.0 * UNIT), Vec3::ZERO).with_fov_degrees(60.0);
    let mut scene = Scene::new("box room", camera);

    let red = phong("red", 0x9e0059, 0xaaaaaa, 150.0);
    let green = phong("green", 0x52b788, 0xaaaaaa, 150.0);
    let blue = phong("blue", 0x62b6cb, 0xaaaaaa, 150.0);
    let top = phong("top", 0xffffff, 0x111111, 100.0);
    let ground = phong("ground", 0x806443, 0x111111, 100.0);
    let mirror = Arc::new(
        Material::new("mirror", rgb_from_hex(0xe0b1cb))
            .with_specular(rgb_from_hex(0xffffff), 10000.0)
            .with_mirror(0.8),
    );

    let ball = Shape::sphere(40.0 * UNIT);
    let block = Shape::Cuboid {
        size: units(200.0, 100.0, 100.0),
    };
    let wall = Shape::Plane {
        width: 602.0 * UNIT,
        height: 602.0 * UNIT,
    };
    let wall_scale = Vec3::new(1.0, 0.6, 1.0);

    scene.add_object(SceneObject::new(
        "red sphere",
        ball.clone(),
        red.clone(),
        Transform::from_translation(units(-130.0, -155.0, -50.0)),
    ));
    scene.add_object(SceneObject::new(
        "green box",
        block.clone(),
        green,
        Transform::from_translation(units(200.0, -195.0, -50.0)).with_euler_xyz(0.0, 0.2, QUARTER_TURN),
    ));
    scene.add_object(SceneObject::new(
        "blue sphere",
        ball,
        blue.clone(),
        Transform::from_translation(units(30.0, -260.0, -75.0)).with_euler_xyz(0.0, 0.5, 0.0),
    ));
    scene.add_object(SceneObject::new(
        "mirror box",
        block,
        mirror.clone(),
        Transform::from_translation(units(-100.0, -247.5, -100.0)).with_euler_xyz(0.0, 0.75, 0.0),
    ));

    scene.add_object(SceneObject::new(
        "floor",
        wall.clone(),
        ground,
        Transform::from_translation(units(0.0, -300.0, -150.0))
            .with_euler_xyz(-QUARTER_TURN, 0.0, 0.0)
            .with_scale(wall_scale),
    ));
    scene.add_object(SceneObject::new(
        "ceiling",
        wall.clone(),
        top,
        Transform::from_translation(units(0.0, 300.0, -150.0))
            .with_euler_xyz(QUARTER_TURN, 0.0, 0.0)
            .with_scale(wall_scale),
    ));
    scene.add_object(SceneObject::new(
        "back wall",
        wall.clone(),
        mirror,
        Transform::from_translation(units(0.0, 0.0, -300.0)),
    ));
    scene.add_object(SceneObject::new(
        "left wall",
        wall.clone(),
        red,
        Transform::from_translation(units(-300.0, 0.0, -150.0))
            .with_euler_xyz(0.0, QUARTER_TURN, QUARTER_TURN)
            .with_scale(wall_scale),
    ));
    scene.add_object(SceneObject::new(
        "right wall",
        wall,
        blue,
        Transform::from_translation(units(300.0, 0.0, -150.0))
            .with_euler_xyz(0.0, -QUARTER_TURN, QUARTER_TURN)
            .with_scale(wall_scale),
    ));

    let intensity = 0.25;
    scene.add_light(PointLight::new(
        units(0.0, 0.0, 300.0),
        rgb_from_hex(0xffffff),
        intensity * 2.0,
    ));
    scene.add_light(PointLight::new(
        units(-300.0, 100.0, 100.0),
        rgb_from_hex(0xffaa55),
        intensity,
    ));
    scene.add_light(PointLight::new(
        units(100.0, 200.0, 100.0),
        rgb_from_hex(0x55aaff),
        intensity,
    ));

    log::debug!(
        "Built demo scene: {} objects, {} triangles, {} lights",
        scene.object_count(),
        scene.total_triangle_count(),
        scene.lights.len()
    );

    scene
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_scene_contents() {
        let scene = demo_scene();

        assert_eq!(scene.object_count(), 9);
        assert_eq!(scene.lights.len(), 3);

        let spheres = scene
            .objects
            .iter()
            .filter(|o| o.sphere_bounds().is_some())
            .count();
        assert_eq!(spheres, 2);
    }

    #[test]
    fn test_primary_light_is_white_key() {
        let scene = demo_scene();
        let key = scene.lights[0];

        assert_eq!(key.color, Vec3::ONE);
        assert!((key.intensity - 0.5).abs() < 1e-6);
        assert!((key.position.z - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_mirror_materials() {
        let scene = demo_scene();
        let mirrors: Vec<_> = scene
            .objects
            .iter()
            .filter(|o| o.material.mirror)
            .map(|o| o.name.as_str())
            .collect();

        assert_eq!(mirrors, vec!["mirror box", "back wall"]);
        assert!(scene
            .objects
            .iter()
            .filter(|o| o.material.mirror)
            .all(|o| (o.material.reflectivity - 0.8).abs() < 1e-6));
    }

    #[test]
    fn test_floor_is_horizontal() {
        let scene = demo_scene();
        let floor = scene.objects.iter().find(|o| o.name == "floor").unwrap();

        for p in floor.world_mesh().positions {
            assert!((p.y + 1.0).abs() < 0.01);
        }
    }
}
