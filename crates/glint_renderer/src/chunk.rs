//! Chunked image traversal.
//!
//! The image is split into square chunks that are rendered one at a time;
//! the scheduler yields to its host between chunks.

use glint_core::Color;
use glint_math::Vec2;

use crate::{trace_color, FrameSink, RenderContext};

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    /// X coordinate of the chunk's top-left corner
    pub x: u32,
    /// Y coordinate of the chunk's top-left corner
    pub y: u32,
    /// Width of the chunk in pixels
    pub width: u32,
    /// Height of the chunk in pixels
    pub height: u32,
    /// Index of this chunk in the render order
    pub index: usize,
}

impl Chunk {
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    /// Get the total number of pixels in this chunk.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }
}

/// Edge length of a chunk in pixels.
pub const CHUNK_SIZE: u32 = 32;

/// Split an image into chunks in row-major block order.
///
/// Chunks on the right and bottom edges are clipped to the image.
pub fn generate_chunks(width: u32, height: u32, chunk_size: u32) -> Vec<Chunk> {
    let chunk_size = chunk_size.max(1);
    let mut chunks = Vec::new();

    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let cw = chunk_size.min(width - x);
            let ch = chunk_size.min(height - y);
            chunks.push(Chunk::new(x, y, cw, ch, chunks.len()));
            x += chunk_size;
        }
        y += chunk_size;
    }

    chunks
}

/// Render a single pixel with `subsamples²` evenly spaced samples.
///
/// Each sample sits at the center of its cell in an `n × n` grid over the
/// pixel. Samples are averaged with equal weight.
pub fn render_pixel(x: u32, y: u32, ctx: &RenderContext<'_>) -> Color {
    let settings = ctx.settings;
    let n = settings.subsamples.max(1);
    let width = settings.width.max(1) as f32;
    let height = settings.height.max(1) as f32;

    let mut pixel_color = Color::ZERO;
    for i in 0..n {
        for j in 0..n {
            let sx = x as f32 + (i as f32 + 0.5) / n as f32;
            let sy = y as f32 + (j as f32 + 0.5) / n as f32;
            let ndc = Vec2::new(sx / width * 2.0 - 1.0, -(sy / height) * 2.0 + 1.0);
            let ray = ctx.rays.ray(ndc);
            pixel_color += trace_color(&ray, settings.max_depth, ctx);
        }
    }

    pixel_color / (n as f32 * n as f32)
}

/// Render every pixel of a chunk into `sink`, row by row.
pub fn render_chunk(chunk: &Chunk, ctx: &RenderContext<'_>, sink: &mut dyn FrameSink) {
    for local_y in 0..chunk.height {
        for local_x in 0..chunk.width {
            let x = chunk.x + local_x;
            let y = chunk.y + local_y;
            sink.set_pixel(x, y, render_pixel(x, y, ctx));
        }
    }
}
