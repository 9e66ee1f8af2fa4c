//! Camera viewport
//!
//! A vertical-scrolling camera over the world. The footer is drawn over the
//! bottom of the display, so the world's scroll bounds include it.

use glam::Vec2;

/// Vertical camera over a scrollable world
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    /// World y at the top edge of the display
    scroll_y: f32,
    pub display_width: f32,
    pub display_height: f32,
    pub footer_height: f32,
    /// Total scrollable world height
    bounds_height: f32,
}

impl Viewport {
    pub fn new(display_width: f32, display_height: f32, footer_height: f32, bounds_height: f32) -> Self {
        Self {
            scroll_y: 0.0,
            display_width,
            display_height,
            footer_height,
            bounds_height,
        }
    }

    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    pub fn bounds_height(&self) -> f32 {
        self.bounds_height
    }

    /// World y at the middle of the display
    pub fn center_y(&self) -> f32 {
        self.scroll_y + self.display_height / 2.0
    }

    #[inline]
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        Vec2::new(screen.x, screen.y + self.scroll_y)
    }

    #[inline]
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        Vec2::new(world.x, world.y - self.scroll_y)
    }

    pub fn max_scroll(&self) -> f32 {
        (self.bounds_height - self.display_height).max(0.0)
    }

    pub fn can_scroll_up(&self) -> bool {
        self.scroll_y > 0.0
    }

    pub fn can_scroll_down(&self) -> bool {
        self.scroll_y < self.max_scroll()
    }

    /// Set the scroll position, clamped to the world bounds
    pub fn set_scroll(&mut self, scroll_y: f32) {
        self.scroll_y = scroll_y.clamp(0.0, self.max_scroll());
    }

    /// Scroll by `dy` (positive is down); returns the distance actually moved
    pub fn scroll_by(&mut self, dy: f32) -> f32 {
        let before = self.scroll_y;
        self.set_scroll(before + dy);
        self.scroll_y - before
    }

    /// Center the display on world `center_y`
    pub fn pan_to(&mut self, center_y: f32) {
        self.set_scroll(center_y - self.display_height / 2.0);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_y = self.max_scroll();
    }

    /// Mouse wheel
    pub fn wheel(&mut self, delta_y: f32, factor: f32) -> f32 {
        self.scroll_by(delta_y * factor)
    }

    pub fn in_top_bumper(&self, screen_y: f32, bumper: f32) -> bool {
        screen_y < bumper
    }

    pub fn in_bottom_bumper(&self, screen_y: f32, bumper: f32) -> bool {
        screen_y > self.display_height - bumper
    }

    /// Above the footer
    pub fn in_draw_bounds(&self, screen_y: f32) -> bool {
        screen_y < self.display_height - self.footer_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(750.0, 1000.0, 100.0, 3100.0)
    }

    #[test]
    fn test_screen_world_conversion() {
        let mut v = viewport();
        v.set_scroll(500.0);
        let world = v.screen_to_world(Vec2::new(10.0, 20.0));
        assert_eq!(world, Vec2::new(10.0, 520.0));
        assert_eq!(v.world_to_screen(world), Vec2::new(10.0, 20.0));
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut v = viewport();
        assert_eq!(v.max_scroll(), 2100.0);
        assert_eq!(v.scroll_by(-50.0), 0.0);
        assert!(!v.can_scroll_up());
        v.scroll_to_bottom();
        assert_eq!(v.scroll_y(), 2100.0);
        assert!(!v.can_scroll_down());
        assert_eq!(v.scroll_by(100.0), 0.0);
        assert_eq!(v.wheel(-100.0, 0.5), -50.0);
    }

    #[test]
    fn test_pan_centers() {
        let mut v = viewport();
        v.pan_to(1500.0);
        assert_eq!(v.center_y(), 1500.0);
        v.pan_to(0.0);
        assert_eq!(v.scroll_y(), 0.0);
    }

    #[test]
    fn test_short_world_does_not_scroll() {
        let mut v = Viewport::new(750.0, 1000.0, 100.0, 600.0);
        v.scroll_to_bottom();
        assert_eq!(v.scroll_y(), 0.0);
    }

    #[test]
    fn test_zones() {
        let v = viewport();
        assert!(v.in_top_bumper(10.0, 20.0));
        assert!(!v.in_top_bumper(20.0, 20.0));
        assert!(v.in_bottom_bumper(990.0, 20.0));
        assert!(v.in_draw_bounds(899.0));
        assert!(!v.in_draw_bounds(900.0));
    }
}
