//! Play state and core play types
//!
//! Everything the play session mutates per gesture lives in [`PlayState`];
//! hazards live in the session's owning collections.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::shapes::Rect;
use crate::consts::START_HALF_SIZE;

/// Entities that advance with the host clock
pub trait Tickable {
    fn tick(&mut self, now_ms: u64);
}

/// Where the marker is in a movement gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayPhase {
    /// Waiting for a press on the start marker
    Idle,
    /// Marker follows the pointer
    Moving,
    /// Hopping through a portal; input ignored until `until_ms`
    Teleporting { until_ms: u64 },
    /// Ball is in the hole; the round is over
    Holed,
}

/// The tee the player drags from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StartMarker {
    position: Vec2,
}

impl StartMarker {
    pub fn new(position: Vec2) -> Self {
        Self { position }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn place(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn hitbox(&self) -> Rect {
        Rect::from_center(self.position, Vec2::splat(START_HALF_SIZE * 2.0))
    }

    pub fn contains(&self, p: Vec2) -> bool {
        self.hitbox().contains(p)
    }
}

/// Final score of a holed round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub strokes: u32,
    pub elapsed_ms: u64,
    pub sand_penalties: u32,
}

/// Which notice to flash
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToastKind {
    /// Went through a portal
    Portal,
    /// Camera moved by a scroll bumper
    Scroll,
}

/// Things the presentation layer should animate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlayEvent {
    StrokePenalty,
    SandPenalty,
    /// Dragged off the tee straight into the water; nothing charged
    MoveCancelled,
    /// Fan or tower hit; draw the miss marker here
    WindmillHit { at: Vec2 },
    Teleported { from: Vec2, to: Vec2 },
    CameraPan { center_y: f32 },
    Toast(ToastKind),
    Holed(RoundResult),
}

/// Per-round play state
#[derive(Debug, Clone)]
pub struct PlayState {
    pub phase: PlayPhase,
    /// Current stroke, starting at 1
    pub strokes: u32,
    /// The marker left the tee; the course is covered until the move ends
    pub map_hidden: bool,
    pub marker: StartMarker,
    /// Where the last windmill hit happened, cleared on the next move
    pub miss_marker: Option<Vec2>,
    pub start_ms: Option<u64>,
    pub final_ms: Option<u64>,
    /// Time added by sand penalties
    pub penalty_ms: u64,
    pub sand_penalty_count: u32,
    pub last_sand_penalty_ms: Option<u64>,
    events: Vec<PlayEvent>,
}

impl PlayState {
    pub fn new(marker: Vec2) -> Self {
        Self {
            phase: PlayPhase::Idle,
            strokes: 1,
            map_hidden: false,
            marker: StartMarker::new(marker),
            miss_marker: None,
            start_ms: None,
            final_ms: None,
            penalty_ms: 0,
            sand_penalty_count: 0,
            last_sand_penalty_ms: None,
            events: Vec::new(),
        }
    }

    pub fn is_moving(&self) -> bool {
        self.phase == PlayPhase::Moving
    }

    pub fn is_holed(&self) -> bool {
        self.phase == PlayPhase::Holed
    }

    /// Elapsed round time including penalties; frozen once holed
    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        if let Some(final_ms) = self.final_ms {
            return final_ms;
        }
        match self.start_ms {
            Some(start) => now_ms.saturating_sub(start) + self.penalty_ms,
            None => 0,
        }
    }

    pub fn result(&self) -> Option<RoundResult> {
        self.final_ms.map(|elapsed_ms| RoundResult {
            strokes: self.strokes,
            elapsed_ms,
            sand_penalties: self.sand_penalty_count,
        })
    }

    pub(crate) fn emit(&mut self, event: PlayEvent) {
        self.events.push(event);
    }

    pub fn drain_events(&mut self) -> Vec<PlayEvent> {
        std::mem::take(&mut self.events)
    }

    /// End the move and charge a stroke
    pub fn issue_stroke_penalty(&mut self) {
        self.phase = PlayPhase::Idle;
        self.map_hidden = false;
        self.strokes += 1;
        self.emit(PlayEvent::StrokePenalty);
    }

    fn issue_sand_penalty(&mut self, now_ms: u64, penalty_ms: u64) {
        self.last_sand_penalty_ms = Some(now_ms);
        self.penalty_ms += penalty_ms;
        self.sand_penalty_count += 1;
        self.emit(PlayEvent::SandPenalty);
    }

    /// Debounced sand penalty: at most once per `cooldown_ms` while on sand.
    /// Leaving the sand resets the cooldown.
    pub fn update_sand(&mut self, on_sand: bool, now_ms: u64, cooldown_ms: u64, penalty_ms: u64) {
        if !on_sand {
            self.last_sand_penalty_ms = None;
            return;
        }
        let due = match self.last_sand_penalty_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= cooldown_ms,
        };
        if due {
            self.issue_sand_penalty(now_ms, penalty_ms);
        }
    }
}
