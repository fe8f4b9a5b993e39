//! Render settings.
//!
//! Settings are read once at the start of every render. Hosts may load them
//! from JSON; missing fields take their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::SphereMode;

/// Largest accepted subsample count per pixel axis.
pub const MAX_SUBSAMPLES: u32 = 64;

/// Errors that can occur while loading settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// User-adjustable render settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Maximum mirror recursion depth
    pub max_depth: u32,
    /// Subsamples per pixel axis (the pixel is traced `subsamples²` times)
    pub subsamples: u32,
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Intersect spheres analytically instead of through their facets
    pub exact_spheres: bool,
    /// Phong shading; when off every hit shows its flat diffuse color
    pub phong: bool,
    /// Light with every light instead of only the first
    pub all_lights: bool,
    /// Cast shadow rays
    pub shadows: bool,
    /// Follow reflections off mirror materials
    pub mirrors: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_depth: 2,
            subsamples: 1,
            width: 256,
            height: 256,
            exact_spheres: false,
            phong: false,
            all_lights: false,
            shadows: false,
            mirrors: false,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&contents)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Copy with zero subsamples or dimensions raised to 1 and subsamples
    /// capped at [`MAX_SUBSAMPLES`].
    pub fn sanitized(self) -> Self {
        let mut out = self;
        out.subsamples = at_least_one("subsamples", self.subsamples);
        if out.subsamples > MAX_SUBSAMPLES {
            log::warn!(
                "Settings: subsamples {} exceeds {}, clamping",
                out.subsamples,
                MAX_SUBSAMPLES
            );
            out.subsamples = MAX_SUBSAMPLES;
        }
        out.width = at_least_one("width", self.width);
        out.height = at_least_one("height", self.height);
        out
    }

    pub fn sphere_mode(&self) -> SphereMode {
        if self.exact_spheres {
            SphereMode::Exact
        } else {
            SphereMode::Tessellated
        }
    }

    /// Width over height of the output image. Non-square renders keep square
    /// pixels instead of using a fixed aspect of 1.
    pub fn aspect(&self) -> f32 {
        self.width.max(1) as f32 / self.height.max(1) as f32
    }
}

fn at_least_one(field: &str, value: u32) -> u32 {
    if value == 0 {
        log::warn!("Settings: {} is 0, using 1", field);
        1
    } else {
        value
    }
}
