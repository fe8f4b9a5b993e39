//! Glint Core - Scene description for the Glint ray tracer.
//!
//! This crate provides:
//!
//! - **Scene types**: `Scene`, `SceneObject`, `Shape`, `Transform`
//! - **Appearance**: Phong `Material` and `PointLight`
//! - **Tessellation**: `Mesh` generators for spheres, boxes and planes
//! - **Demo content**: the built-in box room scene
//!
//! # Example
//!
//! ```ignore
//! use glint_core::demo::demo_scene;
//!
//! let scene = demo_scene();
//! println!("{} objects, {} lights", scene.object_count(), scene.lights.len());
//! ```

pub mod demo;
pub mod light;
pub mod material;
pub mod mesh;
pub mod scene;

// Re-export commonly used types
pub use light::PointLight;
pub use material::{rgb_from_hex, Color, Material};
pub use mesh::Mesh;
pub use scene::{Scene, SceneObject, Shape, Transform};
