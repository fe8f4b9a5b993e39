//! Phong material definition.

use glint_math::Vec3;

/// Color type alias (linear RGB, nominally 0-1 per channel)
pub type Color = Vec3;

/// Convert a packed `0xRRGGBB` value to a color with channels in [0, 1].
pub fn rgb_from_hex(hex: u32) -> Color {
    let r = ((hex >> 16) & 0xff) as f32;
    let g = ((hex >> 8) & 0xff) as f32;
    let b = (hex & 0xff) as f32;
    Color::new(r, g, b) / 255.0
}

/// Surface appearance for the Phong shading model.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    /// Material name
    pub name: String,

    /// Diffuse color (RGB, 0-1)
    pub diffuse: Color,

    /// Specular color (RGB, 0-1)
    pub specular: Color,

    /// Phong exponent before the renderer's empirical scaling
    pub shininess: f32,

    /// Whether the surface reflects the scene
    pub mirror: bool,

    /// Blend weight toward the reflected color (0 = none, 1 = pure mirror)
    pub reflectivity: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            diffuse: Color::splat(0.5),
            specular: Color::splat(0.0666),
            shininess: 30.0,
            mirror: false,
            reflectivity: 0.0,
        }
    }
}

impl Material {
    /// Create a new material with just a name and diffuse color.
    pub fn new(name: impl Into<String>, diffuse: Color) -> Self {
        Self {
            name: name.into(),
            diffuse,
            ..Default::default()
        }
    }

    /// Set the specular color and shininess.
    pub fn with_specular(mut self, specular: Color, shininess: f32) -> Self {
        self.specular = specular;
        self.shininess = shininess.max(f32::EPSILON);
        self
    }

    /// Turn the material into a mirror that blends `reflectivity` of the
    /// reflected color into its own.
    pub fn with_mirror(mut self, reflectivity: f32) -> Self {
        self.mirror = true;
        self.reflectivity = reflectivity.clamp(0.0, 1.0);
        self
    }
}
