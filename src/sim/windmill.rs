//! Windmill hazard
//!
//! The fan is four blade arms reaching out from its center, spinning a
//! quarter turn every 400 ms. Rotated rectangles are awkward to hit-test, so
//! each arm is approximated by a row of axis-aligned square cells, precomputed
//! for every 5 degree step of the first quarter turn (the fan looks the same
//! every 90 degrees). Each tick picks one precomputed set.

use glam::Vec2;

use super::shapes::Rect;
use super::state::Tickable;
use crate::consts::{
    FAN_ANGLE_STEP, FAN_CELLS_PER_ARM, FAN_MS_PER_QUARTER_TURN, FAN_REACH, TOWER_HEIGHT,
    TOWER_OFFSET_Y, TOWER_WIDTH,
};
use crate::platform::SpriteHandle;

/// Number of precomputed rotation steps
pub const FAN_STEPS: usize = (90 / FAN_ANGLE_STEP) as usize;

/// Side of one square hitbox cell; neighbouring cells touch
pub fn cell_size() -> f32 {
    FAN_REACH / (FAN_CELLS_PER_ARM - 1) as f32
}

/// Fan rotation in whole degrees [0, 90) at `now_ms`
pub fn fan_angle(now_ms: u64) -> u32 {
    (90 * (now_ms % FAN_MS_PER_QUARTER_TURN) / FAN_MS_PER_QUARTER_TURN) as u32
}

/// Hitbox step (0, 5, .., 85) to use for a fan angle.
///
/// Looks one step ahead so the hitboxes lead the drawn blades slightly.
pub fn hitbox_step(fan_angle: u32) -> u32 {
    let ahead = (fan_angle + FAN_ANGLE_STEP) % 90;
    ahead / FAN_ANGLE_STEP * FAN_ANGLE_STEP
}

/// Cells along one arm, from `center` out to the tip at `angle_deg`
fn arm_cells(center: Vec2, angle_deg: f32, out: &mut Vec<Rect>) {
    let size = cell_size();
    let step = Vec2::from_angle(angle_deg.to_radians()) * size;
    for i in 0..FAN_CELLS_PER_ARM {
        out.push(Rect::from_center(center + step * i as f32, Vec2::splat(size)));
    }
}

/// Tower bounds for a windmill anchored at `anchor`
pub fn tower_bounds(anchor: Vec2) -> Rect {
    Rect::from_center(
        anchor + Vec2::new(0.0, TOWER_OFFSET_Y),
        Vec2::new(TOWER_WIDTH, TOWER_HEIGHT),
    )
}

/// A windmill on the play field (world space)
#[derive(Debug, Clone)]
pub struct Windmill {
    anchor: Vec2,
    /// Indexed by step / FAN_ANGLE_STEP
    cells: Vec<Vec<Rect>>,
    tower: Rect,
    active_step: u32,
    pub sprite: Option<SpriteHandle>,
}

impl Windmill {
    pub fn new(anchor: Vec2) -> Self {
        let cells = (0..FAN_STEPS)
            .map(|i| {
                let angle = (i as u32 * FAN_ANGLE_STEP) as f32;
                let mut set = Vec::with_capacity(FAN_CELLS_PER_ARM * 4);
                for arm in 0..4 {
                    arm_cells(anchor, angle + 90.0 * arm as f32, &mut set);
                }
                set
            })
            .collect();
        Self {
            anchor,
            cells,
            tower: tower_bounds(anchor),
            active_step: 0,
            sprite: None,
        }
    }

    pub fn anchor(&self) -> Vec2 {
        self.anchor
    }

    pub fn tower(&self) -> Rect {
        self.tower
    }

    /// Currently active hitbox step in degrees
    pub fn active_step(&self) -> u32 {
        self.active_step
    }

    /// Precomputed cells for a step (degrees, multiple of 5 below 90)
    pub fn cells_at(&self, step: u32) -> &[Rect] {
        &self.cells[(step / FAN_ANGLE_STEP) as usize % FAN_STEPS]
    }

    pub fn active_cells(&self) -> &[Rect] {
        self.cells_at(self.active_step)
    }

    /// Blades at the active step, or the tower
    pub fn collides_with(&self, p: Vec2) -> bool {
        self.active_cells().iter().any(|cell| cell.contains(p)) || self.tower.contains(p)
    }
}

impl Tickable for Windmill {
    fn tick(&mut self, now_ms: u64) {
        self.active_step = hitbox_step(fan_angle(now_ms));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_precomputed_sets() {
        let w = Windmill::new(Vec2::new(400.0, 400.0));
        assert_eq!(w.cells.len(), 18);
        assert!(w.cells.iter().all(|set| set.len() == 84));
        assert_eq!(cell_size(), 16.25);
    }

    #[test]
    fn test_near_miss_beside_a_blade_is_clear() {
        let center = Vec2::new(400.0, 400.0);
        let w = Windmill::new(center);
        assert_eq!(w.active_step(), 0);
        assert!(w.collides_with(center + Vec2::new(100.0, 8.0)));
        assert!(!w.collides_with(center + Vec2::new(100.0, 15.0)));
        assert!(!w.collides_with(center + Vec2::new(-15.0, -200.0)));
    }

    #[test]
    fn test_fan_angle_is_a_sawtooth() {
        assert_eq!(fan_angle(0), 0);
        assert_eq!(fan_angle(200), 45);
        assert_eq!(fan_angle(399), 89);
        assert_eq!(fan_angle(400), 0);
        assert_eq!(fan_angle(1_000_000_100), 22);
    }

    #[test]
    fn test_hitbox_step_looks_ahead_and_wraps() {
        assert_eq!(hitbox_step(0), 5);
        assert_eq!(hitbox_step(4), 5);
        assert_eq!(hitbox_step(5), 10);
        assert_eq!(hitbox_step(84), 85);
        assert_eq!(hitbox_step(85), 0);
        assert_eq!(hitbox_step(89), 0);
    }

    #[test]
    fn test_tick_selects_active_cells() {
        let center = Vec2::new(300.0, 300.0);
        let mut w = Windmill::new(center);

        // 200 ms: fan at 45 degrees, hitboxes at 50
        w.tick(200);
        assert_eq!(w.active_step(), 50);
        let on_blade = center + Vec2::from_angle(50f32.to_radians()) * 250.0;
        let off_blade = center + Vec2::from_angle(5f32.to_radians()) * 250.0;
        assert!(w.collides_with(on_blade));
        assert!(!w.collides_with(off_blade));

        w.tick(0);
        assert!(w.collides_with(off_blade));
    }

    #[test]
    fn test_tower_always_collides() {
        let center = Vec2::new(300.0, 300.0);
        let mut w = Windmill::new(center);
        let foot = center + Vec2::new(20.0, 60.0);
        for t in (0..400).step_by(20) {
            w.tick(t);
            assert!(w.collides_with(foot));
        }
    }

    proptest! {
        #[test]
        fn blades_cover_both_axes(
            step_index in 0u32..18,
            d in -FAN_REACH..=FAN_REACH,
            vertical in any::<bool>(),
        ) {
            let center = Vec2::new(375.0, 1000.0);
            let w = Windmill::new(center);
            let step = step_index * FAN_ANGLE_STEP;
            let angle = step as f32 + if vertical { 90.0 } else { 0.0 };
            let p = center + Vec2::from_angle(angle.to_radians()) * d;
            prop_assert!(w.cells_at(step).iter().any(|c| c.contains(p)));
        }

        #[test]
        fn between_the_blades_is_clear(step_index in 0u32..18, quadrant in 0u32..4, d in 120.0f32..600.0) {
            let center = Vec2::new(375.0, 1000.0);
            let mut w = Windmill::new(center);
            let step = step_index * FAN_ANGLE_STEP;
            // Pick a time whose active step is `step`
            let t = (0..FAN_MS_PER_QUARTER_TURN)
                .find(|&t| hitbox_step(fan_angle(t)) == step)
                .unwrap();
            w.tick(t);
            let angle = step as f32 + 45.0 + 90.0 * quadrant as f32;
            let p = center + Vec2::from_angle(angle.to_radians()) * d;
            prop_assert!(!w.collides_with(p));
        }

        #[test]
        fn far_points_never_collide(t in 0u64..10_000, angle in 0.0f32..360.0, d in 360.0f32..2000.0) {
            let center = Vec2::new(375.0, 1000.0);
            let mut w = Windmill::new(center);
            w.tick(t);
            let p = center + Vec2::from_angle(angle.to_radians()) * d;
            prop_assert!(!w.collides_with(p));
        }
    }
}
