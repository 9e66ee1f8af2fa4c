//! Course save/load
//!
//! Courses travel as a versioned JSON envelope. Loading validates the course
//! (dimensions, exactly one terrain representation, mask sizes).

use serde::{Deserialize, Serialize};

use crate::course::CourseDocument;
use crate::error::CourseError;
use crate::platform::storage;

/// Envelope format version written by this build
pub const CURRENT_VERSION: u32 = 1;

/// LocalStorage key prefix for saved courses
const STORAGE_PREFIX: &str = "mini_golf_course_";

/// A course plus the format version it was written with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseEnvelope {
    pub version: u32,
    pub course: CourseDocument,
}

impl CourseEnvelope {
    pub fn new(course: CourseDocument) -> Self {
        Self {
            version: CURRENT_VERSION,
            course,
        }
    }

    pub fn to_json(&self) -> Result<String, CourseError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse and validate an envelope
    pub fn from_json(json: &str) -> Result<Self, CourseError> {
        // Version before shape: a newer course may not parse at all
        #[derive(Deserialize)]
        struct Version {
            version: u32,
        }
        let Version { version } = serde_json::from_str(json)?;
        if version != CURRENT_VERSION {
            return Err(CourseError::UnsupportedVersion(version));
        }

        let envelope: Self = serde_json::from_str(json)?;
        envelope.course.validate()?;
        Ok(envelope)
    }
}

/// Save a course under `name`; false if storage is unavailable
pub fn save_course(name: &str, course: &CourseDocument) -> Result<bool, CourseError> {
    let json = CourseEnvelope::new(course.clone()).to_json()?;
    let saved = storage::set_item(&format!("{STORAGE_PREFIX}{name}"), &json);
    if saved {
        log::info!("Saved course '{name}' ({} bytes)", json.len());
    }
    Ok(saved)
}

/// Load a saved course; `Ok(None)` if there is none
pub fn load_course(name: &str) -> Result<Option<CourseDocument>, CourseError> {
    let Some(json) = storage::get_item(&format!("{STORAGE_PREFIX}{name}")) else {
        return Ok(None);
    };
    let envelope = CourseEnvelope::from_json(&json)?;
    log::info!("Loaded course '{name}'");
    Ok(Some(envelope.course))
}
