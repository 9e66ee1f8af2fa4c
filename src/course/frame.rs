//! Conversion between course space and the play field

use glam::Vec2;

use super::CoursePoint;
use crate::invert_y;

/// Where a course sits in the scrollable world.
///
/// The course raster is `height` tall and its top edge is at world
/// `origin_y`. World and raster coordinates are top-down; course coordinates
/// are bottom-up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CourseFrame {
    pub height: f32,
    pub origin_y: f32,
}

impl CourseFrame {
    pub fn new(height: u32, origin_y: f32) -> Self {
        Self {
            height: height as f32,
            origin_y,
        }
    }

    /// Frame for a course placed so its bottom edge sits on top of the footer,
    /// or at the world origin when the course is taller than the view.
    pub fn above_footer(height: u32, view_height: f32, footer_height: f32) -> Self {
        let origin_y = (view_height - height as f32 - footer_height).max(0.0);
        Self::new(height, origin_y)
    }

    /// Course point -> world point
    #[inline]
    pub fn to_world(&self, p: CoursePoint) -> Vec2 {
        Vec2::new(p.x, self.origin_y + invert_y(p.y, self.height))
    }

    /// World point -> course point
    #[inline]
    pub fn to_course(&self, p: Vec2) -> CoursePoint {
        CoursePoint::new(p.x, invert_y(p.y - self.origin_y, self.height))
    }

    /// World point -> raster-local point (top-down, origin at the raster's corner)
    #[inline]
    pub fn to_local(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x, p.y - self.origin_y)
    }

    /// Course point -> raster-local point
    #[inline]
    pub fn course_to_local(&self, p: CoursePoint) -> Vec2 {
        Vec2::new(p.x, invert_y(p.y, self.height))
    }

    /// World Y of the course's bottom edge
    pub fn bottom(&self) -> f32 {
        self.origin_y + self.height
    }
}
