//! CPU alpha mask
//!
//! A width x height grid of 0/1 alpha. This is the authoritative terrain
//! raster for play-time queries; a renderer mirrors it into GPU textures.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::MaskSurface;
use crate::consts::{COURSE_WIDTH, MAX_COURSE_HEIGHT};
use crate::course::BrushSize;
use crate::error::CourseError;

/// Largest mask a stored course may carry
const MAX_MASK_PIXELS: u64 = COURSE_WIDTH as u64 * MAX_COURSE_HEIGHT as u64;

/// Binary alpha raster, row-major, top-down
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EncodedMask", into = "EncodedMask")]
pub struct AlphaMask {
    width: u32,
    height: u32,
    alpha: Vec<u8>,
}

impl fmt::Debug for AlphaMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlphaMask")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("painted", &self.painted_count())
            .finish()
    }
}

impl AlphaMask {
    /// Fully transparent mask
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            alpha: vec![0; width as usize * height as usize],
        }
    }

    /// Mask from decoded RGBA image pixels; any non-zero alpha counts as painted
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> Result<Self, CourseError> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(CourseError::InvalidMaskEncoding(format!(
                "expected {expected} RGBA bytes, got {}",
                rgba.len()
            )));
        }
        let alpha = rgba.chunks_exact(4).map(|px| u8::from(px[3] > 0)).collect();
        Ok(Self {
            width,
            height,
            alpha,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Alpha of the pixel at integer coordinates; 0 outside the mask
    #[inline]
    pub fn alpha_at(&self, x: i64, y: i64) -> u8 {
        self.index(x, y).map_or(0, |i| self.alpha[i])
    }

    /// Alpha of the pixel containing `p`; 0 outside the mask
    #[inline]
    pub fn sample(&self, p: Vec2) -> u8 {
        if !p.is_finite() {
            return 0;
        }
        self.alpha_at(p.x.floor() as i64, p.y.floor() as i64)
    }

    pub fn is_painted(&self, p: Vec2) -> bool {
        self.sample(p) > 0
    }

    /// Set every pixel whose center lies within `radius` of `center`
    pub fn fill_circle(&mut self, center: Vec2, radius: f32, value: u8) {
        if self.width == 0 || self.height == 0 || radius <= 0.0 {
            return;
        }
        let r2 = radius * radius;
        let x0 = ((center.x - radius).floor() as i64).max(0);
        let y0 = ((center.y - radius).floor() as i64).max(0);
        let x1 = ((center.x + radius).ceil() as i64).min(self.width as i64 - 1);
        let y1 = ((center.y + radius).ceil() as i64).min(self.height as i64 - 1);

        for y in y0..=y1 {
            let dy = y as f32 + 0.5 - center.y;
            let row = y as usize * self.width as usize;
            for x in x0..=x1 {
                let dx = x as f32 + 0.5 - center.x;
                if dx * dx + dy * dy <= r2 {
                    self.alpha[row + x as usize] = value;
                }
            }
        }
    }

    /// Number of painted pixels
    pub fn painted_count(&self) -> usize {
        self.alpha.iter().filter(|&&a| a > 0).count()
    }

    pub fn is_blank(&self) -> bool {
        self.alpha.iter().all(|&a| a == 0)
    }

    /// Raw alpha bytes (0 or 1), row-major
    pub fn as_bytes(&self) -> &[u8] {
        &self.alpha
    }
}

/// Center of the disc a brush stamp covers when drawn with its top-left at `origin`.
///
/// The brush image is a circle of the brush radius centered at
/// `(radius / 2, radius / 2)` in its own frame.
#[inline]
pub fn brush_center(brush: BrushSize, origin: Vec2) -> Vec2 {
    origin + Vec2::splat(brush.radius() / 2.0)
}

impl MaskSurface for AlphaMask {
    fn draw_circle_stamp(&mut self, brush: BrushSize, x: f32, y: f32) {
        self.fill_circle(brush_center(brush, Vec2::new(x, y)), brush.radius(), 1);
    }

    fn erase_circle_stamp(&mut self, brush: BrushSize, x: f32, y: f32) {
        self.fill_circle(brush_center(brush, Vec2::new(x, y)), brush.radius(), 0);
    }

    fn sample_alpha(&self, x: f32, y: f32) -> u8 {
        self.sample(Vec2::new(x, y))
    }
}

/// Run-length form of an [`AlphaMask`].
///
/// `runs` alternates transparent and painted run lengths over the row-major
/// pixels, starting with a (possibly empty) transparent run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedMask {
    pub width: u32,
    pub height: u32,
    pub runs: Vec<u32>,
}

impl From<AlphaMask> for EncodedMask {
    fn from(mask: AlphaMask) -> Self {
        EncodedMask::from(&mask)
    }
}

impl From<&AlphaMask> for EncodedMask {
    fn from(mask: &AlphaMask) -> Self {
        let mut runs = Vec::new();
        let mut painted = false;
        let mut run = 0u32;
        for &a in &mask.alpha {
            if (a > 0) == painted {
                run += 1;
            } else {
                runs.push(run);
                painted = !painted;
                run = 1;
            }
        }
        if run > 0 || runs.is_empty() {
            runs.push(run);
        }
        Self {
            width: mask.width,
            height: mask.height,
            runs,
        }
    }
}

impl TryFrom<EncodedMask> for AlphaMask {
    type Error = CourseError;

    fn try_from(encoded: EncodedMask) -> Result<Self, Self::Error> {
        let total = encoded.width as u64 * encoded.height as u64;
        if total > MAX_MASK_PIXELS {
            return Err(CourseError::InvalidDimensions {
                width: encoded.width,
                height: encoded.height,
            });
        }
        let sum: u64 = encoded.runs.iter().map(|&r| r as u64).sum();
        if sum != total {
            return Err(CourseError::InvalidMaskEncoding(format!(
                "runs cover {sum} pixels, mask has {total}"
            )));
        }

        let mut alpha = Vec::with_capacity(total as usize);
        for (i, &run) in encoded.runs.iter().enumerate() {
            let value = (i % 2) as u8;
            alpha.extend(std::iter::repeat_n(value, run as usize));
        }
        Ok(Self {
            width: encoded.width,
            height: encoded.height,
            alpha,
        })
    }
}
