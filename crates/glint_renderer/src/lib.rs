//! Glint Renderer - CPU Whitted-style ray tracing
//!
//! Renders a [`glint_core::Scene`] with Phong shading, hard shadows and
//! mirror reflections. Frames are produced progressively: the image is split
//! into chunks and a [`Scheduler`] hands one chunk at a time to the host's
//! task queue, so a newer render can supersede an older one between chunks.
//!
//! # Example
//!
//! ```ignore
//! use glint_core::demo::demo_scene;
//! use glint_renderer::{ImageBuffer, LocalQueue, Scheduler, Settings, World};
//!
//! let world = World::from_scene(&demo_scene());
//! let mut image = ImageBuffer::new(1, 1);
//! let mut queue = LocalQueue::new();
//!
//! Scheduler::new().render(&mut image, &Settings::default(), &mut queue);
//! queue.run_until_idle(&world, &mut image);
//! image.save_png("render.png")?;
//! ```

mod chunk;
mod frame;
mod hittable;
mod scheduler;
mod settings;
mod shading;
mod sphere;
mod tracer;
mod triangle;
mod world;

pub use chunk::{generate_chunks, render_chunk, render_pixel, Chunk, CHUNK_SIZE};
pub use frame::{clamp_01, color_to_rgba, ExportError, FrameSink, ImageBuffer};
pub use hittable::{any_hit, closest_hit, Geometry, Hit, ObjectId, Primitive, SphereMode};
pub use scheduler::{JobStatus, LocalQueue, RenderGeneration, RenderJob, Scheduler, TaskQueue};
pub use settings::{Settings, SettingsError, MAX_SUBSAMPLES};
pub use shading::{shade, SHADOW_EPSILON};
pub use sphere::{Sphere, SphereCrossing};
pub use tracer::{trace_color, RenderContext, MIRROR_BIAS};
pub use triangle::Triangle;
pub use world::{HitRecord, World};
