//! Gameplay and editor tuning
//!
//! Timings and penalties the game applies. Persisted separately from courses
//! in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::platform::storage;

/// Tunable timings and penalties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Play ===
    /// Re-check the marker position this often while a move is held still
    pub position_check_interval_ms: u64,
    /// At most one sand penalty per window while the marker stays on sand
    pub sand_penalty_cooldown_ms: u64,
    /// Time added per sand penalty
    pub sand_penalty_ms: u64,
    /// Screen band at the top/bottom edge that scrolls the course
    pub bumper_height: f32,
    /// How long a portal hop keeps the marker busy
    pub teleport_duration_ms: u64,

    // === Editor ===
    /// Hold this long before a press starts painting (room for a second finger)
    pub pointer_down_delay_ms: u64,
    /// Height of the editor's blank course
    pub editor_course_height: u32,
    /// Empty space kept above the highest object of an exported course
    pub top_of_course_buffer: f32,

    // === Scrolling ===
    /// Mouse wheel delta -> scroll distance
    pub wheel_scroll_factor: f32,
    /// Two-finger drags shorter than this are ignored
    pub touch_scroll_threshold: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            position_check_interval_ms: 100,
            sand_penalty_cooldown_ms: 500,
            sand_penalty_ms: 3000,
            bumper_height: 20.0,
            teleport_duration_ms: 1000,

            pointer_down_delay_ms: 50,
            editor_course_height: 10_000,
            top_of_course_buffer: 50.0,

            wheel_scroll_factor: 0.5,
            touch_scroll_threshold: 5.0,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "mini_golf_settings";

    /// Load settings from LocalStorage, falling back to defaults
    pub fn load() -> Self {
        match storage::get_item(Self::STORAGE_KEY).map(|json| serde_json::from_str(&json)) {
            Some(Ok(settings)) => {
                log::info!("Loaded settings from LocalStorage");
                settings
            }
            Some(Err(err)) => {
                log::warn!("Ignoring stored settings: {err}");
                Self::default()
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings to LocalStorage
    pub fn save(&self) {
        if let Ok(json) = serde_json::to_string(self) {
            if storage::set_item(Self::STORAGE_KEY, &json) {
                log::info!("Settings saved");
            }
        }
    }
}
