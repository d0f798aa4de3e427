use crate::plane::ExtractedPlane;

use image::{GrayImage, ImageBuffer};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Radiological window: the raw intensity span mapped onto 0..=255.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowLevel {
    /// Center of the window
    pub level: f64,
    /// Span of the window, never below 1
    pub width: f64,
}

impl Default for WindowLevel {
    /// Soft tissue window
    fn default() -> Self {
        Self {
            level: 40.0,
            width: 400.0,
        }
    }
}

impl WindowLevel {
    pub fn new(level: f64, width: f64) -> Self {
        Self {
            level,
            width: width.max(1.0),
        }
    }

    /// Lower bound of the window; everything at or below maps to black.
    pub fn lower(&self) -> f64 {
        self.level - self.range() / 2.0
    }

    fn range(&self) -> f64 {
        // fields are public, so clamp again on use
        self.width.max(1.0)
    }

    #[inline]
    pub fn apply(&self, value: i16) -> u8 {
        let lower = self.lower();
        let range = self.range();
        let value = f64::from(value);

        if value <= lower {
            0
        } else if value >= lower + range {
            255
        } else {
            ((value - lower) / range * 255.0).round() as u8
        }
    }

    /// Window every sample of `plane` into an 8-bit image of the same size.
    pub fn apply_plane(&self, plane: &ExtractedPlane) -> Option<GrayImage> {
        let pixel_data: Vec<u8> = plane
            .data
            .as_standard_layout()
            .as_slice()?
            .par_iter()
            .map(|&v| self.apply(v))
            .collect();
        ImageBuffer::from_raw(plane.width() as u32, plane.height() as u32, pixel_data)
    }
}
