//! Stroke replay onto the grass and sand masks
//!
//! Each terrain kind draws into or erases from the two layers:
//!
//! | kind  | grass | sand  |
//! |-------|-------|-------|
//! | grass | draw  | erase |
//! | sand  | draw  | draw  |
//! | water | erase | erase |
//!
//! Sand therefore always sits on grass, and water clears both. Later stamps
//! overwrite earlier ones inside their footprint.

use glam::Vec2;

use super::{AlphaMask, MaskSurface};
use crate::consts::STROKE_STEPS;
use crate::course::{BrushSize, CourseFrame, Stroke, StrokeHistory, TerrainKind};
use crate::interpolate_stroke;

/// What a stamp does to one layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerOp {
    Draw,
    Erase,
}

/// (grass op, sand op) for a terrain kind
pub fn layer_ops(kind: TerrainKind) -> (LayerOp, LayerOp) {
    match kind {
        TerrainKind::Grass => (LayerOp::Draw, LayerOp::Erase),
        TerrainKind::Sand => (LayerOp::Draw, LayerOp::Draw),
        TerrainKind::Water => (LayerOp::Erase, LayerOp::Erase),
    }
}

fn apply<S: MaskSurface>(surface: &mut S, op: LayerOp, brush: BrushSize, origin: Vec2) {
    match op {
        LayerOp::Draw => surface.draw_circle_stamp(brush, origin.x, origin.y),
        LayerOp::Erase => surface.erase_circle_stamp(brush, origin.x, origin.y),
    }
}

/// The grass and sand layers of one course
#[derive(Debug, Clone, PartialEq)]
pub struct MaskLayers<S = AlphaMask> {
    pub grass: S,
    pub sand: S,
}

impl MaskLayers<AlphaMask> {
    /// Blank layers
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            grass: AlphaMask::new(width, height),
            sand: AlphaMask::new(width, height),
        }
    }

    pub fn size(&self) -> (u32, u32) {
        self.grass.size()
    }
}

impl<S: MaskSurface> MaskLayers<S> {
    /// Stamp one brush disc centered at a raster-local point
    pub fn stamp(&mut self, kind: TerrainKind, brush: BrushSize, center: Vec2) {
        let origin = center - Vec2::splat(brush.radius() / 2.0);
        let (grass_op, sand_op) = layer_ops(kind);
        apply(&mut self.grass, grass_op, brush, origin);
        apply(&mut self.sand, sand_op, brush, origin);
    }

    /// Stamp along a drag between two raster-local points.
    ///
    /// Used live by the editor while the pointer moves, and by replay.
    pub fn stamp_segment(&mut self, kind: TerrainKind, brush: BrushSize, from: Vec2, to: Vec2) {
        for p in interpolate_stroke(from, to, STROKE_STEPS) {
            self.stamp(kind, brush, p);
        }
    }

    /// Stamp a persisted stroke onto layers `height` pixels tall
    pub fn replay_stroke(&mut self, kind: TerrainKind, brush: BrushSize, stroke: &Stroke, height: u32) {
        let frame = CourseFrame::new(height, 0.0);
        self.stamp_segment(
            kind,
            brush,
            frame.course_to_local(stroke.from),
            frame.course_to_local(stroke.to),
        );
    }

    /// Replay a whole history, in order
    pub fn replay(&mut self, history: &StrokeHistory, height: u32) {
        for group in history.groups() {
            for stroke in &group.strokes {
                self.replay_stroke(group.kind, group.size, stroke, height);
            }
        }
    }
}

/// Rebuild the grass and sand masks of a course from its paint history
pub fn build_masks(history: &StrokeHistory, width: u32, height: u32) -> MaskLayers {
    let mut layers = MaskLayers::new(width, height);
    layers.replay(history, height);
    log::debug!(
        "built {width}x{height} masks from {} strokes",
        history.stroke_count()
    );
    layers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course::CoursePoint;
    use proptest::prelude::*;

    fn stroke(from: (f32, f32), to: (f32, f32)) -> Stroke {
        Stroke {
            from: CoursePoint::new(from.0, from.1),
            to: CoursePoint::new(to.0, to.1),
        }
    }

    #[test]
    fn test_grass_stroke_lands_inverted() {
        let mut history = StrokeHistory::new();
        history.push(
            TerrainKind::Grass,
            BrushSize::Medium,
            stroke((0.0, 50.0), (100.0, 50.0)),
        );
        let layers = build_masks(&history, 200, 200);

        // Bottom-up y = 50 is top-down y = 150
        assert!(layers.grass.is_painted(Vec2::new(50.0, 150.0)));
        assert!(!layers.grass.is_painted(Vec2::new(50.0, 50.0)));
        assert!(layers.sand.is_blank());
    }

    #[test]
    fn test_sand_paints_both_and_grass_erases_sand() {
        let mut layers = MaskLayers::new(300, 300);
        let c = Vec2::new(150.0, 150.0);

        layers.stamp(TerrainKind::Sand, BrushSize::Small, c);
        assert!(layers.grass.is_painted(c));
        assert!(layers.sand.is_painted(c));

        layers.stamp(TerrainKind::Grass, BrushSize::Small, c);
        assert!(layers.grass.is_painted(c));
        assert!(!layers.sand.is_painted(c));

        layers.stamp(TerrainKind::Water, BrushSize::Large, c);
        assert!(layers.grass.is_blank());
        assert!(layers.sand.is_blank());
    }

    #[test]
    fn test_later_strokes_win() {
        let mut history = StrokeHistory::new();
        history.push(TerrainKind::Water, BrushSize::Large, stroke((100.0, 100.0), (100.0, 100.0)));
        history.push(TerrainKind::Grass, BrushSize::Small, stroke((100.0, 100.0), (100.0, 100.0)));
        let layers = build_masks(&history, 200, 200);
        assert!(layers.grass.is_painted(Vec2::new(100.0, 100.0)));

        let mut reversed = StrokeHistory::new();
        reversed.push(TerrainKind::Grass, BrushSize::Small, stroke((100.0, 100.0), (100.0, 100.0)));
        reversed.push(TerrainKind::Water, BrushSize::Large, stroke((100.0, 100.0), (100.0, 100.0)));
        let layers = build_masks(&reversed, 200, 200);
        assert!(layers.grass.is_blank());
    }

    #[test]
    fn test_fast_drag_leaves_no_gaps() {
        let mut layers = MaskLayers::new(750, 200);
        layers.stamp_segment(
            TerrainKind::Grass,
            BrushSize::Small,
            Vec2::new(20.0, 100.0),
            Vec2::new(730.0, 100.0),
        );
        // Smoothstep spacing peaks at ~1.5 * 710 / 30 = 36 < 2 * 30
        for x in 20..700 {
            assert!(layers.grass.is_painted(Vec2::new(x as f32, 100.0)), "gap at x={x}");
        }
    }

    fn arb_history() -> impl Strategy<Value = StrokeHistory> {
        let kind = prop_oneof![
            Just(TerrainKind::Grass),
            Just(TerrainKind::Sand),
            Just(TerrainKind::Water)
        ];
        let size = prop_oneof![
            Just(BrushSize::Small),
            Just(BrushSize::Medium),
            Just(BrushSize::Large)
        ];
        let pt = (0.0f32..120.0, 0.0f32..120.0);
        prop::collection::vec((kind, size, pt.clone(), pt), 0..12).prop_map(|items| {
            let mut history = StrokeHistory::new();
            for (kind, size, from, to) in items {
                history.push(kind, size, stroke(from, to));
            }
            history
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn replay_is_deterministic(history in arb_history()) {
            let first = build_masks(&history, 120, 120);
            let second = build_masks(&history, 120, 120);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn sand_never_without_grass(history in arb_history(), x in 0u32..120, y in 0u32..120) {
            let layers = build_masks(&history, 120, 120);
            let p = Vec2::new(x as f32, y as f32);
            if layers.sand.is_painted(p) {
                prop_assert!(layers.grass.is_painted(p));
            }
        }
    }
}
