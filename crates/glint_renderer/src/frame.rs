//! Pixel destinations for the renderer.

use std::path::Path;

use glint_core::Color;
use thiserror::Error;

/// Errors that can occur while exporting a frame.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Where rendered pixels go.
///
/// Coordinates are zero-based with the origin at the top-left corner.
pub trait FrameSink {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Write one pixel. Out-of-range coordinates are ignored.
    fn set_pixel(&mut self, x: u32, y: u32, color: Color);

    /// Fill every pixel with black.
    fn clear(&mut self);

    /// Change the dimensions. Contents are unspecified until cleared.
    fn resize(&mut self, width: u32, height: u32);
}

/// Clamp a value to [0, 1] range.
#[inline]
pub fn clamp_01(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

/// Convert a linear color to 8-bit RGBA.
///
/// Channels saturate at 0 and 255; no gamma curve is applied.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let r = (255.0 * clamp_01(color.x)).round() as u8;
    let g = (255.0 * clamp_01(color.y)).round() as u8;
    let b = (255.0 * clamp_01(color.z)).round() as u8;
    [r, g, b, 255]
}

/// Linear RGB frame held in memory.
///
/// Pixels keep their unclamped values; clamping only happens when the frame
/// is converted to bytes.
#[derive(Debug, Clone)]
pub struct ImageBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width * height) as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Convert to RGBA bytes (for display or saving).
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgba(*color));
        }
        bytes
    }

    /// Write the frame as an 8-bit PNG.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), ExportError> {
        image::save_buffer(
            path.as_ref(),
            &self.to_rgba(),
            self.width,
            self.height,
            image::ColorType::Rgba8,
        )?;
        log::info!(
            "Saved {}x{} image to {}",
            self.width,
            self.height,
            path.as_ref().display()
        );
        Ok(())
    }
}

impl FrameSink for ImageBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        if x < self.width && y < self.height {
            self.pixels[(y * self.width + x) as usize] = color;
        }
    }

    fn clear(&mut self) {
        self.pixels.fill(Color::ZERO);
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels.resize((width * height) as usize, Color::ZERO);
    }
}
