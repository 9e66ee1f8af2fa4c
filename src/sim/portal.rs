//! Portal hazard
//!
//! Each complete pair in the course becomes two live portals, one per
//! endpoint, each pointing at its mate. Half-placed pairs are skipped.

use glam::Vec2;

use super::shapes::Circle;
use crate::consts::PORTAL_RADIUS;
use crate::course::{CourseFrame, PortalEnd, PortalPairs};
use crate::platform::SpriteHandle;

/// One live portal endpoint (world space)
#[derive(Debug, Clone)]
pub struct Portal {
    pub pair_id: u32,
    pub end: PortalEnd,
    position: Vec2,
    dest: Vec2,
    hitbox: Circle,
    pub sprite: Option<SpriteHandle>,
}

impl Portal {
    pub fn new(pair_id: u32, end: PortalEnd, position: Vec2, dest: Vec2) -> Self {
        Self {
            pair_id,
            end,
            position,
            dest,
            hitbox: Circle::new(position, PORTAL_RADIUS),
            sprite: None,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Where the marker comes out: the mate's position
    pub fn dest(&self) -> Vec2 {
        self.dest
    }

    pub fn collides_with(&self, p: Vec2) -> bool {
        self.hitbox.contains(p)
    }
}

/// Materialize the live portals of a course
pub fn build_portals(pairs: &PortalPairs, frame: &CourseFrame) -> Vec<Portal> {
    let mut portals = Vec::new();
    for pair in pairs.iter() {
        let Some((a, b)) = pair.endpoints() else {
            log::debug!("skipping half-placed portal pair {}", pair.id);
            continue;
        };
        let (a, b) = (frame.to_world(a), frame.to_world(b));
        portals.push(Portal::new(pair.id, PortalEnd::A, a, b));
        portals.push(Portal::new(pair.id, PortalEnd::B, b, a));
    }
    portals
}

/// First portal hit at `p`, ignoring portals for which `covered` is true
/// (a portal sitting under the resting marker must not fire again).
pub fn first_collision<'a>(
    portals: &'a [Portal],
    p: Vec2,
    covered: impl Fn(Vec2) -> bool,
) -> Option<&'a Portal> {
    portals
        .iter()
        .filter(|portal| !covered(portal.position))
        .find(|portal| portal.collides_with(p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course::CoursePoint;

    fn course_pairs() -> PortalPairs {
        let mut pairs = PortalPairs::new();
        pairs.place(CoursePoint::new(200.0, 450.0));
        pairs.place(CoursePoint::new(500.0, 1500.0));
        pairs.place(CoursePoint::new(100.0, 100.0));
        pairs
    }

    #[test]
    fn test_complete_pairs_link_both_ways() {
        let frame = CourseFrame::new(3000, 0.0);
        let portals = build_portals(&course_pairs(), &frame);
        // The pending third endpoint is skipped
        assert_eq!(portals.len(), 2);

        let p1 = frame.to_world(CoursePoint::new(200.0, 450.0));
        let p2 = frame.to_world(CoursePoint::new(500.0, 1500.0));

        let hit = first_collision(&portals, p1, |_| false).unwrap();
        assert_eq!(hit.dest(), p2);
        let hit = first_collision(&portals, p2 + Vec2::new(5.0, -5.0), |_| false).unwrap();
        assert_eq!(hit.dest(), p1);
        assert!(first_collision(&portals, p1 + Vec2::new(25.0, 0.0), |_| false).is_none());
    }

    #[test]
    fn test_covered_portals_are_ignored() {
        let frame = CourseFrame::new(3000, 0.0);
        let portals = build_portals(&course_pairs(), &frame);
        let p1 = frame.to_world(CoursePoint::new(200.0, 450.0));

        assert!(first_collision(&portals, p1, |pos| pos == p1).is_none());
    }
}
