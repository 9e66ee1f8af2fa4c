//! Editor tools: the paint brush and the placeable objects

use glam::Vec2;

use crate::consts::{FLAG_HEIGHT, FLAG_WIDTH, PORTAL_RADIUS};
use crate::course::{BrushSize, PortalEnd, TerrainKind};
use crate::sim::Rect;
use crate::sim::windmill::tower_bounds;

/// Current brush: what it paints and how big
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Brush {
    pub kind: TerrainKind,
    pub size: BrushSize,
}

impl Brush {
    /// Size tool: small -> medium -> large -> small
    pub fn cycle_size(&mut self) -> BrushSize {
        self.size = self.size.next();
        self.size
    }

    /// Terrain tool: grass -> sand -> water -> grass
    pub fn cycle_kind(&mut self) -> TerrainKind {
        self.kind = self.kind.next();
        self.kind
    }

    pub fn radius(&self) -> f32 {
        self.size.radius()
    }
}

/// Objects that can be dragged onto the course
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeable {
    Flag,
    Windmill,
    Portal,
}

impl Placeable {
    /// Grab area of a placed object at world `position`
    pub fn bounds(self, position: Vec2) -> Rect {
        match self {
            Placeable::Flag => Rect::from_center(position, Vec2::new(FLAG_WIDTH, FLAG_HEIGHT)),
            Placeable::Windmill => tower_bounds(position),
            Placeable::Portal => Rect::from_center(position, Vec2::splat(PORTAL_RADIUS * 2.0)),
        }
    }
}

/// An object following the pointer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drag {
    pub item: Placeable,
    /// World position under the pointer
    pub position: Vec2,
    /// The pair slot a picked-up portal endpoint came from
    pub portal_slot: Option<(u32, PortalEnd)>,
}

impl Drag {
    pub fn new(item: Placeable, position: Vec2) -> Self {
        Self {
            item,
            position,
            portal_slot: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brush_cycles() {
        let mut brush = Brush::default();
        assert_eq!(brush.size, BrushSize::Medium);
        assert_eq!(brush.kind, TerrainKind::Grass);
        assert_eq!(brush.cycle_size(), BrushSize::Large);
        assert_eq!(brush.cycle_size(), BrushSize::Small);
        assert_eq!(brush.radius(), 30.0);
        assert_eq!(brush.cycle_kind(), TerrainKind::Sand);
        assert_eq!(brush.cycle_kind(), TerrainKind::Water);
        assert_eq!(brush.cycle_kind(), TerrainKind::Grass);
    }

    #[test]
    fn test_grab_bounds() {
        let p = Vec2::new(100.0, 100.0);
        assert!(Placeable::Portal.bounds(p).contains(p + Vec2::new(20.0, -20.0)));
        assert!(!Placeable::Portal.bounds(p).contains(p + Vec2::new(21.0, 0.0)));
        assert!(Placeable::Windmill.bounds(p).contains(p + Vec2::new(0.0, 70.0)));
        assert!(Placeable::Flag.bounds(p).contains(p + Vec2::new(0.0, -50.0)));
    }
}
