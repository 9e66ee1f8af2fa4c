//! Portal pairs
//!
//! Portals are placed one endpoint at a time. A placement completes the most
//! recent pair if it is missing exactly one endpoint, otherwise it opens a new
//! pair. Removing an endpoint whose mate is present removes the whole pair.

use serde::{Deserialize, Serialize};

use super::CoursePoint;
use crate::error::CourseError;

/// Which side of a pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortalEnd {
    A,
    B,
}

impl PortalEnd {
    pub fn mate(self) -> Self {
        match self {
            PortalEnd::A => PortalEnd::B,
            PortalEnd::B => PortalEnd::A,
        }
    }
}

/// Two linked portal endpoints, either of which may be unplaced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortalPair {
    pub id: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a: Option<CoursePoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b: Option<CoursePoint>,
}

impl PortalPair {
    pub fn get(&self, end: PortalEnd) -> Option<CoursePoint> {
        match end {
            PortalEnd::A => self.a,
            PortalEnd::B => self.b,
        }
    }

    fn slot(&mut self, end: PortalEnd) -> &mut Option<CoursePoint> {
        match end {
            PortalEnd::A => &mut self.a,
            PortalEnd::B => &mut self.b,
        }
    }

    /// Both endpoints, when both are placed
    pub fn endpoints(&self) -> Option<(CoursePoint, CoursePoint)> {
        self.a.zip(self.b)
    }

    pub fn is_complete(&self) -> bool {
        self.a.is_some() && self.b.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.a.is_none() && self.b.is_none()
    }

    /// The missing end of a half-placed pair
    pub fn open_end(&self) -> Option<PortalEnd> {
        match (self.a, self.b) {
            (Some(_), None) => Some(PortalEnd::B),
            (None, Some(_)) => Some(PortalEnd::A),
            _ => None,
        }
    }
}

/// What a removal did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortalRemoval {
    /// The endpoint had a mate, so the pair is gone
    Pair,
    /// Only the endpoint went; its pair had no mate placed
    Endpoint,
    /// No such pair
    NotFound,
}

/// All portal pairs of a course, in placement order
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<PortalPair>", into = "Vec<PortalPair>")]
pub struct PortalPairs {
    pairs: Vec<PortalPair>,
    next_id: u32,
}

impl TryFrom<Vec<PortalPair>> for PortalPairs {
    type Error = CourseError;

    fn try_from(pairs: Vec<PortalPair>) -> Result<Self, Self::Error> {
        let mut ids: Vec<u32> = pairs.iter().map(|p| p.id).collect();
        ids.sort_unstable();
        if let Some(dup) = ids.windows(2).find(|w| w[0] == w[1]) {
            return Err(CourseError::DuplicatePortalId(dup[0]));
        }
        let next_id = ids.last().map_or(0, |id| id.saturating_add(1));
        Ok(Self { pairs, next_id })
    }
}

impl From<PortalPairs> for Vec<PortalPair> {
    fn from(portals: PortalPairs) -> Self {
        portals.pairs
    }
}

impl PortalPairs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a new endpoint. Returns the pair id and the end it filled.
    pub fn place(&mut self, point: CoursePoint) -> (u32, PortalEnd) {
        if let Some(last) = self.pairs.last_mut() {
            if let Some(end) = last.open_end() {
                *last.slot(end) = Some(point);
                return (last.id, end);
            }
        }

        let id = self.allocate_id();
        self.pairs.push(PortalPair {
            id,
            a: Some(point),
            b: None,
        });
        (id, PortalEnd::A)
    }

    /// A pair id no pair uses yet. Ids count up; once they run out at the
    /// top, the lowest free id is reused.
    fn allocate_id(&mut self) -> u32 {
        let id = if self.get(self.next_id).is_none() {
            self.next_id
        } else {
            (0..=u32::MAX)
                .find(|&id| self.get(id).is_none())
                .unwrap_or(self.next_id)
        };
        self.next_id = id.saturating_add(1);
        id
    }

    /// Put an endpoint back at a specific slot (a dragged endpoint being dropped)
    pub fn place_at(&mut self, id: u32, end: PortalEnd, point: CoursePoint) -> bool {
        match self.pairs.iter_mut().find(|p| p.id == id) {
            Some(pair) => {
                *pair.slot(end) = Some(point);
                true
            }
            None => false,
        }
    }

    /// Lift an endpoint out of its pair, keeping the pair record so the
    /// endpoint can be dropped back into it.
    pub fn take(&mut self, id: u32, end: PortalEnd) -> Option<CoursePoint> {
        self.pairs
            .iter_mut()
            .find(|p| p.id == id)
            .and_then(|pair| pair.slot(end).take())
    }

    /// Delete an endpoint, applying the mate rule
    pub fn remove(&mut self, id: u32, end: PortalEnd) -> PortalRemoval {
        let Some(index) = self.pairs.iter().position(|p| p.id == id) else {
            return PortalRemoval::NotFound;
        };

        let pair = &mut self.pairs[index];
        if pair.get(end.mate()).is_some() {
            self.pairs.remove(index);
            log::debug!("portal pair {id} removed with its mate");
            return PortalRemoval::Pair;
        }

        *pair.slot(end) = None;
        self.prune_empty();
        PortalRemoval::Endpoint
    }

    /// Drop pair records with no endpoints left
    pub fn prune_empty(&mut self) {
        self.pairs.retain(|p| !p.is_empty());
    }

    pub fn get(&self, id: u32) -> Option<&PortalPair> {
        self.pairs.iter().find(|p| p.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PortalPair> {
        self.pairs.iter()
    }

    /// Pairs with both endpoints placed
    pub fn complete(&self) -> impl Iterator<Item = (u32, CoursePoint, CoursePoint)> + '_ {
        self.pairs
            .iter()
            .filter_map(|p| p.endpoints().map(|(a, b)| (p.id, a, b)))
    }

    /// Every placed endpoint
    pub fn endpoints(&self) -> impl Iterator<Item = (u32, PortalEnd, CoursePoint)> + '_ {
        self.pairs.iter().flat_map(|p| {
            [PortalEnd::A, PortalEnd::B]
                .into_iter()
                .filter_map(move |end| p.get(end).map(|point| (p.id, end, point)))
        })
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
