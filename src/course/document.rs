//! The Course Document

use serde::{Deserialize, Serialize};

use super::{CourseFrame, CoursePoint, PortalPairs, StrokeHistory};
use crate::consts::{COURSE_WIDTH, MAX_COURSE_HEIGHT};
use crate::error::CourseError;
use crate::raster::{AlphaMask, MaskLayers, build_masks};

/// How a course's terrain is represented
#[derive(Debug, Clone, PartialEq)]
pub enum Terrain {
    /// Painted in the editor; replayed into masks on load
    FromStrokes(StrokeHistory),
    /// Authored elsewhere as finished masks
    FromRasters { grass: AlphaMask, sand: AlphaMask },
}

impl Terrain {
    /// Materialize grass and sand masks for a course of the given size
    pub fn build_layers(&self, width: u32, height: u32) -> MaskLayers {
        match self {
            Terrain::FromStrokes(history) => build_masks(history, width, height),
            Terrain::FromRasters { grass, sand } => MaskLayers {
                grass: grass.clone(),
                sand: sand.clone(),
            },
        }
    }
}

/// A complete course: dimensions, terrain, flag and hazards.
///
/// Serialized in the flat shape the game has always exchanged courses in:
/// either `terrainHistory` or both `grassMask` and `sandMask` are present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCourse", into = "RawCourse")]
pub struct CourseDocument {
    pub title: String,
    pub subtitle: String,
    pub width: u32,
    pub height: u32,
    pub terrain: Terrain,
    /// Absent only while authoring
    pub flag: Option<CoursePoint>,
    pub windmills: Vec<CoursePoint>,
    pub portals: PortalPairs,
}

impl CourseDocument {
    /// Empty course of the standard width
    pub fn new(title: impl Into<String>, subtitle: impl Into<String>, height: u32, terrain: Terrain) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            width: COURSE_WIDTH,
            height,
            terrain,
            flag: None,
            windmills: Vec::new(),
            portals: PortalPairs::new(),
        }
    }

    /// Check the document against its own invariants
    pub fn validate(&self) -> Result<(), CourseError> {
        if self.width != COURSE_WIDTH || self.height == 0 || self.height > MAX_COURSE_HEIGHT {
            return Err(CourseError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if let Terrain::FromRasters { grass, sand } = &self.terrain {
            for mask in [grass, sand] {
                if mask.size() != (self.width, self.height) {
                    return Err(CourseError::MaskSizeMismatch {
                        expected: (self.width, self.height),
                        found: mask.size(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Everything play needs: a valid document with a flag
    pub fn validate_for_play(&self) -> Result<CoursePoint, CourseError> {
        self.validate()?;
        self.flag.ok_or(CourseError::MissingFlag)
    }

    pub fn build_layers(&self) -> MaskLayers {
        self.terrain.build_layers(self.width, self.height)
    }

    /// Frame placing this course at `origin_y` in the world
    pub fn frame(&self, origin_y: f32) -> CourseFrame {
        CourseFrame::new(self.height, origin_y)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCourse {
    #[serde(default)]
    title: String,
    #[serde(default)]
    subtitle: String,
    width: u32,
    height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    terrain_history: Option<StrokeHistory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    grass_mask: Option<AlphaMask>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sand_mask: Option<AlphaMask>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    flag: Option<CoursePoint>,
    #[serde(default)]
    windmills: Vec<CoursePoint>,
    #[serde(default)]
    portals: PortalPairs,
}

impl TryFrom<RawCourse> for CourseDocument {
    type Error = CourseError;

    fn try_from(raw: RawCourse) -> Result<Self, Self::Error> {
        let terrain = match (raw.terrain_history, raw.grass_mask, raw.sand_mask) {
            (Some(history), None, None) => Terrain::FromStrokes(history),
            (None, Some(grass), Some(sand)) => Terrain::FromRasters { grass, sand },
            (Some(_), _, _) => return Err(CourseError::AmbiguousTerrain),
            (None, _, _) => return Err(CourseError::MissingTerrain),
        };
        let doc = CourseDocument {
            title: raw.title,
            subtitle: raw.subtitle,
            width: raw.width,
            height: raw.height,
            terrain,
            flag: raw.flag,
            windmills: raw.windmills,
            portals: raw.portals,
        };
        doc.validate()?;
        Ok(doc)
    }
}

impl From<CourseDocument> for RawCourse {
    fn from(doc: CourseDocument) -> Self {
        let (terrain_history, grass_mask, sand_mask) = match doc.terrain {
            Terrain::FromStrokes(history) => (Some(history), None, None),
            Terrain::FromRasters { grass, sand } => (None, Some(grass), Some(sand)),
        };
        Self {
            title: doc.title,
            subtitle: doc.subtitle,
            width: doc.width,
            height: doc.height,
            terrain_history,
            grass_mask,
            sand_mask,
            flag: doc.flag,
            windmills: doc.windmills,
            portals: doc.portals,
        }
    }
}
