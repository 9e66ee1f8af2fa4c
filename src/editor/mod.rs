//! Draw mode: course authoring
//!
//! Paint grass, sand and water with a round brush, drop in the flag,
//! windmills and portals, then export a course to play.

pub mod session;
pub mod tools;

pub use session::AuthoringSession;
pub use tools::{Brush, Drag, Placeable};
