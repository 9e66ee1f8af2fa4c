//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (pointer, wheel, multi-touch scrolling)
//! - Camera viewport (screen <-> world, panning)
//! - Timers driven by the host clock
//! - Storage (LocalStorage on web)

pub mod input;
pub mod storage;
pub mod time;
pub mod viewport;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use input::{InputEvent, PRIMARY_POINTER_ID, PointerEvent, PointerTracker, TouchScroll};
pub use time::IntervalTimer;
pub use viewport::Viewport;

/// Opaque handle to whatever the renderer draws for an entity.
///
/// Entities own their behavior; the renderer owns the visuals and hands back
/// a handle so it can find them again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteHandle(pub u32);
