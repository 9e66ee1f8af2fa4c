//! Pointer input
//!
//! Events arrive in screen coordinates. One finger (or the mouse) drives
//! gestures; while a second pointer is down, drags of the primary pointer
//! scroll the camera instead.

use glam::Vec2;

/// Pointer id that drives two-finger scrolling
pub const PRIMARY_POINTER_ID: u32 = 1;

/// A pointer sample in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub is_down: bool,
}

impl PointerEvent {
    pub fn new(id: u32, x: f32, y: f32, is_down: bool) -> Self {
        Self { id, x, y, is_down }
    }

    #[inline]
    pub fn screen(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Input events the sessions understand
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown(PointerEvent),
    PointerMove(PointerEvent),
    PointerUp(PointerEvent),
    /// Mouse wheel, positive scrolls down
    Wheel { delta_y: f32 },
}

/// Which pointers are currently pressed
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    down: Vec<u32>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, id: u32) {
        if !self.down.contains(&id) {
            self.down.push(id);
        }
    }

    pub fn release(&mut self, id: u32) {
        self.down.retain(|&d| d != id);
    }

    pub fn is_down(&self, id: u32) -> bool {
        self.down.contains(&id)
    }

    pub fn active_count(&self) -> usize {
        self.down.len()
    }

    /// Two or more pointers down: gestures become scrolling
    pub fn is_multi_touch(&self) -> bool {
        self.down.len() >= 2
    }
}

/// Two-finger scroll tracking on the primary pointer
#[derive(Debug, Clone)]
pub struct TouchScroll {
    prev: Option<Vec2>,
    threshold: f32,
}

impl TouchScroll {
    pub fn new(threshold: f32) -> Self {
        Self {
            prev: None,
            threshold,
        }
    }

    /// Feed a primary pointer position; returns how far to scroll, if at all.
    ///
    /// The first sample only sets the reference point. Moves shorter than the
    /// threshold accumulate until they pass it.
    pub fn drag(&mut self, screen: Vec2) -> Option<f32> {
        let Some(prev) = self.prev else {
            self.prev = Some(screen);
            return None;
        };
        let delta = prev.y - screen.y;
        if delta.abs() > self.threshold {
            self.prev = Some(screen);
            Some(delta)
        } else {
            None
        }
    }

    pub fn reset(&mut self) {
        self.prev = None;
    }
}
