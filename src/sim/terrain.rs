//! Terrain classification
//!
//! A world point is, in order of precedence: in the hole, on sand, on grass,
//! or in the water. Mask reads may be asynchronous on some rendering
//! backends, so besides the direct [`TerrainClassifier::classify`] there is a
//! two-step form: [`TerrainClassifier::request`] says what to sample, the
//! caller resolves both reads, then [`PendingSample::finish`] combines them.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::shapes::Circle;
use crate::consts::{HOLE_OFFSET_X, HOLE_OFFSET_Y, HOLE_RADIUS};
use crate::course::{CourseFrame, CoursePoint};
use crate::raster::{AlphaMask, MaskLayers, MaskSurface};

/// What lies under a point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerrainClass {
    Hole,
    Sand,
    Grass,
    Water,
}

impl TerrainClass {
    /// Grass or sand: the ball can roll here
    pub fn is_land(&self) -> bool {
        matches!(self, TerrainClass::Grass | TerrainClass::Sand)
    }

    /// Combine mask alphas; sand wins over grass
    pub fn from_alphas(grass: u8, sand: u8) -> Self {
        if sand > 0 {
            TerrainClass::Sand
        } else if grass > 0 {
            TerrainClass::Grass
        } else {
            TerrainClass::Water
        }
    }
}

/// Hole hitbox for a flag placed at `flag` (world space).
///
/// The flag anchor is the pole, so the hitbox is shifted onto the hole.
pub fn hole_hitbox(flag: Vec2) -> Circle {
    Circle::new(flag + Vec2::new(HOLE_OFFSET_X, HOLE_OFFSET_Y), HOLE_RADIUS)
}

/// Which mask a read targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskLayer {
    Grass,
    Sand,
}

/// Outcome of starting a classification
#[derive(Debug, Clone, PartialEq)]
pub enum TerrainQuery {
    /// Decided without reading the masks
    Resolved(TerrainClass),
    /// Both masks must be read at `local` first
    Pending(PendingSample),
}

/// A classification waiting on its two mask reads
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSample {
    /// Raster-local point to read in both masks
    pub local: Vec2,
    grass: Option<u8>,
    sand: Option<u8>,
}

impl PendingSample {
    fn new(local: Vec2) -> Self {
        Self {
            local,
            grass: None,
            sand: None,
        }
    }

    /// Record the alpha read back from one mask
    pub fn resolve(&mut self, layer: MaskLayer, alpha: u8) {
        match layer {
            MaskLayer::Grass => self.grass = Some(alpha),
            MaskLayer::Sand => self.sand = Some(alpha),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.grass.is_some() && self.sand.is_some()
    }

    /// The class, once both reads are in; otherwise the sample back
    pub fn finish(self) -> Result<TerrainClass, PendingSample> {
        match (self.grass, self.sand) {
            (Some(grass), Some(sand)) => Ok(TerrainClass::from_alphas(grass, sand)),
            _ => Err(self),
        }
    }
}

/// Classifies world points against one course's hole and masks
#[derive(Debug, Clone)]
pub struct TerrainClassifier<S = AlphaMask> {
    frame: CourseFrame,
    hole: Option<Circle>,
    layers: MaskLayers<S>,
    size: (f32, f32),
}

impl TerrainClassifier<AlphaMask> {
    pub fn new(frame: CourseFrame, flag: Option<CoursePoint>, layers: MaskLayers) -> Self {
        let (w, h) = layers.size();
        Self::with_surfaces(frame, flag, layers, (w as f32, h as f32))
    }
}

impl<S: MaskSurface> TerrainClassifier<S> {
    /// Classifier over arbitrary mask surfaces of the given raster size
    pub fn with_surfaces(
        frame: CourseFrame,
        flag: Option<CoursePoint>,
        layers: MaskLayers<S>,
        size: (f32, f32),
    ) -> Self {
        Self {
            frame,
            hole: flag.map(|f| hole_hitbox(frame.to_world(f))),
            layers,
            size,
        }
    }

    pub fn hole(&self) -> Option<Circle> {
        self.hole
    }

    pub fn frame(&self) -> CourseFrame {
        self.frame
    }

    pub fn layers(&self) -> &MaskLayers<S> {
        &self.layers
    }

    fn in_raster(&self, local: Vec2) -> bool {
        local.x >= 0.0 && local.y >= 0.0 && local.x < self.size.0 && local.y < self.size.1
    }

    /// Start classifying a world point
    pub fn request(&self, world: Vec2) -> TerrainQuery {
        if self.hole.is_some_and(|h| h.contains(world)) {
            return TerrainQuery::Resolved(TerrainClass::Hole);
        }
        let local = self.frame.to_local(world);
        if !self.in_raster(local) {
            return TerrainQuery::Resolved(TerrainClass::Water);
        }
        TerrainQuery::Pending(PendingSample::new(local))
    }

    /// Classify a world point, reading the masks directly
    pub fn classify(&self, world: Vec2) -> TerrainClass {
        match self.request(world) {
            TerrainQuery::Resolved(class) => class,
            TerrainQuery::Pending(mut sample) => {
                let (x, y) = (sample.local.x, sample.local.y);
                sample.resolve(MaskLayer::Grass, self.layers.grass.sample_alpha(x, y));
                sample.resolve(MaskLayer::Sand, self.layers.sand.sample_alpha(x, y));
                sample.finish().unwrap_or(TerrainClass::Water)
            }
        }
    }
}
