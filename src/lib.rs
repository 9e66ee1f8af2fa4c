//! Mini Golf - paint a course, then putt through it
//!
//! Core modules:
//! - `course`: Course Document data model and coordinate frames
//! - `raster`: Alpha mask surfaces and stroke replay
//! - `sim`: Deterministic play rules (terrain, hazards, movement)
//! - `editor`: Course authoring session (Draw mode)
//! - `platform`: Browser/native platform abstraction
//! - `persistence`: Versioned course save/load
//! - `settings`: Data-driven timings and penalties

pub mod course;
pub mod editor;
pub mod error;
pub mod persistence;
pub mod platform;
pub mod raster;
pub mod settings;
pub mod sim;

pub use course::{CourseDocument, CourseFrame, CoursePoint};
pub use editor::AuthoringSession;
pub use error::CourseError;
pub use settings::Settings;
pub use sim::{PlaySession, TerrainClass};

use glam::Vec2;

/// Course format constants
///
/// Changing any of these changes what a saved course means, so they are not
/// part of [`Settings`].
pub mod consts {
    /// Every course is this wide
    pub const COURSE_WIDTH: u32 = 750;
    /// Tallest course a document may describe
    pub const MAX_COURSE_HEIGHT: u32 = 20_000;

    /// Brush radii for Small / Medium / Large
    pub const BRUSH_RADII: [f32; 3] = [30.0, 60.0, 90.0];
    /// Interpolated stamps per recorded stroke
    pub const STROKE_STEPS: usize = 30;

    /// Hole hitbox
    pub const HOLE_RADIUS: f32 = 30.0;
    /// The flag anchor is the pole; the hole sits below and right of it
    pub const HOLE_OFFSET_X: f32 = 10.0;
    pub const HOLE_OFFSET_Y: f32 = 50.0;
    /// Flag sprite size; the height also sizes an exported course
    pub const FLAG_WIDTH: f32 = 50.0;
    pub const FLAG_HEIGHT: f32 = 100.0;

    /// Portal hitbox radius
    pub const PORTAL_RADIUS: f32 = 20.0;

    /// Blade reach from the fan center, on each side
    pub const FAN_REACH: f32 = 325.0;
    /// Hitbox cells along one arm, center to tip
    pub const FAN_CELLS_PER_ARM: usize = 21;
    /// Precomputed hitbox sets every this many degrees
    pub const FAN_ANGLE_STEP: u32 = 5;
    /// Milliseconds per quarter turn
    pub const FAN_MS_PER_QUARTER_TURN: u64 = 400;
    /// Tower image bounds, centered 10 units below the fan anchor
    pub const TOWER_WIDTH: f32 = 64.0;
    pub const TOWER_HEIGHT: f32 = 128.0;
    pub const TOWER_OFFSET_Y: f32 = 10.0;

    /// Start marker (tee) half-size; its hitbox is a square
    pub const START_HALF_SIZE: f32 = 80.0;
}

/// Hermite smoothstep of `t` in [0, 1]
#[inline]
pub fn smoothstep(t: f32) -> f32 {
    if t <= 0.0 {
        0.0
    } else if t >= 1.0 {
        1.0
    } else {
        t * t * (3.0 - 2.0 * t)
    }
}

/// Points between `from` and `to`, eased with smoothstep on each axis.
///
/// Yields `steps` points for `t = i / steps`, so `from` is included and `to`
/// is not; the next segment of a drag starts there.
pub fn interpolate_stroke(from: Vec2, to: Vec2, steps: usize) -> impl Iterator<Item = Vec2> {
    (0..steps).map(move |i| {
        let s = smoothstep(i as f32 / steps as f32);
        from + (to - from) * s
    })
}

/// Flip a Y coordinate between bottom-up and top-down within `height`
#[inline]
pub fn invert_y(y: f32, height: f32) -> f32 {
    height - y
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn smoothstep_endpoints() {
        assert_eq!(smoothstep(0.0), 0.0);
        assert_eq!(smoothstep(1.0), 1.0);
        assert!((smoothstep(0.5) - 0.5).abs() < 1e-6);
        assert_eq!(smoothstep(-2.0), 0.0);
    }

    #[test]
    fn interpolation_starts_at_from_and_stops_short_of_to() {
        let points: Vec<Vec2> =
            interpolate_stroke(Vec2::new(0.0, 0.0), Vec2::new(30.0, 60.0), 30).collect();
        assert_eq!(points.len(), 30);
        assert_eq!(points[0], Vec2::ZERO);
        let last = points[29];
        assert!(last.x < 30.0 && last.x > 29.0);
        // Monotonic along both axes
        for pair in points.windows(2) {
            assert!(pair[1].x >= pair[0].x);
            assert!(pair[1].y >= pair[0].y);
        }
    }

    proptest! {
        #[test]
        fn invert_y_round_trips(y in -20_000i32..20_000, h in 1i32..20_000) {
            // Course coordinates are whole units
            let (y, h) = (y as f32, h as f32);
            prop_assert_eq!(invert_y(invert_y(y, h), h), y);
        }
    }
}
