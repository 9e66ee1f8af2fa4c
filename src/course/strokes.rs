//! Terrain paint history
//!
//! A course painted in the editor is stored as the ordered list of brush
//! strokes that produced it. Replaying them (see `raster::build_masks`)
//! rebuilds the grass and sand masks exactly.

use serde::{Deserialize, Serialize};

use super::CoursePoint;
use crate::consts::BRUSH_RADII;

/// What a brush paints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TerrainKind {
    #[default]
    Grass,
    Sand,
    Water,
}

impl TerrainKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TerrainKind::Grass => "grass",
            TerrainKind::Sand => "sand",
            TerrainKind::Water => "water",
        }
    }

    /// Editor tool order: grass -> sand -> water -> grass
    pub fn next(self) -> Self {
        match self {
            TerrainKind::Grass => TerrainKind::Sand,
            TerrainKind::Sand => TerrainKind::Water,
            TerrainKind::Water => TerrainKind::Grass,
        }
    }

    /// Whether strokes of this kind add paint to at least one mask
    pub fn adds_paint(&self) -> bool {
        !matches!(self, TerrainKind::Water)
    }
}

/// Brush radius selector. Persisted as its index (0, 1, 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum BrushSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl BrushSize {
    pub const ALL: [BrushSize; 3] = [BrushSize::Small, BrushSize::Medium, BrushSize::Large];

    pub fn index(&self) -> usize {
        match self {
            BrushSize::Small => 0,
            BrushSize::Medium => 1,
            BrushSize::Large => 2,
        }
    }

    /// Brush for a persisted index. Panics on anything but 0, 1 or 2.
    pub fn from_index(index: usize) -> Self {
        assert!(index < Self::ALL.len(), "brush size index {index} out of range");
        Self::ALL[index]
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        BRUSH_RADII[self.index()]
    }

    /// Editor tool order: small -> medium -> large -> small
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }
}

impl From<BrushSize> for u8 {
    fn from(size: BrushSize) -> u8 {
        size.index() as u8
    }
}

impl TryFrom<u8> for BrushSize {
    type Error = String;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(index as usize)
            .copied()
            .ok_or_else(|| format!("brush size index {index} out of range"))
    }
}

/// One drag segment, in course space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub from: CoursePoint,
    pub to: CoursePoint,
}

/// Consecutive strokes sharing a terrain kind and brush size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeGroup {
    pub kind: TerrainKind,
    pub size: BrushSize,
    pub strokes: Vec<Stroke>,
}

/// Ordered paint history
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StrokeHistory {
    groups: Vec<StrokeGroup>,
}

impl StrokeHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_groups(groups: Vec<StrokeGroup>) -> Self {
        Self { groups }
    }

    /// Append a stroke, extending the last group when kind and size match
    pub fn push(&mut self, kind: TerrainKind, size: BrushSize, stroke: Stroke) {
        match self.groups.last_mut() {
            Some(last) if last.kind == kind && last.size == size => last.strokes.push(stroke),
            _ => self.groups.push(StrokeGroup {
                kind,
                size,
                strokes: vec![stroke],
            }),
        }
    }

    pub fn groups(&self) -> &[StrokeGroup] {
        &self.groups
    }

    pub fn stroke_count(&self) -> usize {
        self.groups.iter().map(|g| g.strokes.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
