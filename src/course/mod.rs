//! Course Document
//!
//! The persisted shape of a course. All points stored here are
//! [`CoursePoint`]s: Y = 0 at the bottom of the course, growing upward. The
//! play field and the raster masks are top-down; [`CourseFrame`] is the only
//! place that converts between the two.

pub mod document;
pub mod frame;
pub mod portals;
pub mod strokes;

pub use document::{CourseDocument, Terrain};
pub use frame::CourseFrame;
pub use portals::{PortalEnd, PortalPair, PortalPairs, PortalRemoval};
pub use strokes::{BrushSize, Stroke, StrokeGroup, StrokeHistory, TerrainKind};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A point in course space (bottom-up Y)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CoursePoint {
    pub x: f32,
    pub y: f32,
}

impl CoursePoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Raw components, with no frame conversion
    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}
