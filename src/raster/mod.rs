//! Terrain rasters
//!
//! Two alpha masks describe a course's terrain: grass and sand. Anything
//! painted in neither is water. The masks are produced by replaying brush
//! strokes (see [`compositor`]) or decoded from images.

pub mod compositor;
pub mod mask;

pub use compositor::{LayerOp, MaskLayers, build_masks, layer_ops};
pub use mask::{AlphaMask, EncodedMask, brush_center};

use crate::course::BrushSize;

/// A surface brush stamps can be drawn onto and alpha read back from.
///
/// `x`, `y` are the top-left of the brush image, as with a texture draw call.
/// [`AlphaMask`] is the CPU implementation; a renderer can implement this for
/// its own render targets to paint them in lockstep.
pub trait MaskSurface {
    /// Union the brush disc into the surface
    fn draw_circle_stamp(&mut self, brush: BrushSize, x: f32, y: f32);
    /// Clear the surface wherever the brush disc covers it
    fn erase_circle_stamp(&mut self, brush: BrushSize, x: f32, y: f32);
    /// Alpha at a surface-local point; 0 outside the surface
    fn sample_alpha(&self, x: f32, y: f32) -> u8;
}
