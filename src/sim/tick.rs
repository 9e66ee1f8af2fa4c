//! Play session
//!
//! Drives one round on one course. The host forwards pointer and wheel
//! events and calls [`PlaySession::tick`] every frame with its clock; the
//! session decides movement, penalties, teleports and the win, and queues
//! [`PlayEvent`]s for the presentation layer.

use glam::Vec2;

use super::portal::{Portal, build_portals, first_collision};
use super::state::{PlayEvent, PlayPhase, PlayState, RoundResult, Tickable, ToastKind};
use super::terrain::{TerrainClass, TerrainClassifier};
use super::windmill::Windmill;
use crate::consts::{COURSE_WIDTH, START_HALF_SIZE};
use crate::course::{CourseDocument, CourseFrame};
use crate::error::CourseError;
use crate::platform::{
    InputEvent, IntervalTimer, PRIMARY_POINTER_ID, PointerEvent, PointerTracker, TouchScroll,
    Viewport,
};
use crate::settings::Settings;

/// Where the marker goes once it drops into the hole
const OFF_COURSE: Vec2 = Vec2::new(-500.0, -500.0);

/// One round of play on a course
#[derive(Debug)]
pub struct PlaySession {
    settings: Settings,
    state: PlayState,
    classifier: TerrainClassifier,
    windmills: Vec<Windmill>,
    portals: Vec<Portal>,
    viewport: Viewport,
    pointers: PointerTracker,
    touch_scroll: TouchScroll,
    /// Re-evaluates a stationary pointer while moving
    recheck: IntervalTimer,
    last_pointer: Option<PointerEvent>,
}

impl PlaySession {
    /// Set up a round. Fails if the course can't be played (no flag, bad
    /// dimensions or masks).
    pub fn start(
        course: &CourseDocument,
        settings: Settings,
        display: Vec2,
        footer_height: f32,
    ) -> Result<Self, CourseError> {
        let flag = course.validate_for_play()?;
        let frame = CourseFrame::above_footer(course.height, display.y, footer_height);

        let classifier = TerrainClassifier::new(frame, Some(flag), course.build_layers());
        let windmills = course
            .windmills
            .iter()
            .map(|&anchor| Windmill::new(frame.to_world(anchor)))
            .collect();
        let portals = build_portals(&course.portals, &frame);

        let mut viewport = Viewport::new(display.x, display.y, footer_height, frame.bottom() + footer_height);
        viewport.scroll_to_bottom();

        let marker = Vec2::new(COURSE_WIDTH as f32 / 2.0, frame.bottom() - START_HALF_SIZE);

        log::info!(
            "Play started: '{}' ({}x{}), {} windmills, {} portals",
            course.title,
            course.width,
            course.height,
            course.windmills.len(),
            portals.len()
        );

        Ok(Self {
            touch_scroll: TouchScroll::new(settings.touch_scroll_threshold),
            recheck: IntervalTimer::new(settings.position_check_interval_ms),
            settings,
            state: PlayState::new(marker),
            classifier,
            windmills,
            portals,
            viewport,
            pointers: PointerTracker::new(),
            last_pointer: None,
        })
    }

    pub fn state(&self) -> &PlayState {
        &self.state
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn classifier(&self) -> &TerrainClassifier {
        &self.classifier
    }

    pub fn frame(&self) -> CourseFrame {
        self.classifier.frame()
    }

    pub fn windmills(&self) -> &[Windmill] {
        &self.windmills
    }

    pub fn portals(&self) -> &[Portal] {
        &self.portals
    }

    pub fn is_recheck_running(&self) -> bool {
        self.recheck.is_running()
    }

    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        self.state.elapsed_ms(now_ms)
    }

    pub fn result(&self) -> Option<RoundResult> {
        self.state.result()
    }

    pub fn drain_events(&mut self) -> Vec<PlayEvent> {
        self.state.drain_events()
    }

    /// Classify a world point on this course
    pub fn classify(&self, world: Vec2) -> TerrainClass {
        self.classifier.classify(world)
    }

    pub fn handle(&mut self, event: InputEvent, now_ms: u64) {
        match event {
            InputEvent::PointerDown(p) => self.pointer_down(p, now_ms),
            InputEvent::PointerMove(p) => self.pointer_move(p, now_ms),
            InputEvent::PointerUp(p) => self.pointer_up(p, now_ms),
            InputEvent::Wheel { delta_y } => self.wheel(delta_y),
        }
    }

    /// A press on the start marker begins a move
    pub fn pointer_down(&mut self, pointer: PointerEvent, now_ms: u64) {
        self.pointers.press(pointer.id);
        self.settle_teleport(now_ms);
        if self.state.phase != PlayPhase::Idle {
            return;
        }

        let world = self.viewport.screen_to_world(pointer.screen());
        if !self.state.marker.contains(world) {
            return;
        }

        self.state.phase = PlayPhase::Moving;
        self.state.map_hidden = false;
        self.state.miss_marker = None;
        self.state.start_ms.get_or_insert(now_ms);
        self.last_pointer = Some(pointer);
        self.recheck.start(now_ms);
        log::debug!("Move started at {world}");
    }

    pub fn pointer_move(&mut self, pointer: PointerEvent, now_ms: u64) {
        if pointer.id == PRIMARY_POINTER_ID && self.pointers.is_multi_touch() {
            self.touch_scroll_move(pointer);
            return;
        }
        if self.state.is_moving() {
            self.last_pointer = Some(pointer);
            self.evaluate(pointer, now_ms);
        }
    }

    /// Letting go mid-move is the shot: a stroke, and the marker stays where it was released
    pub fn pointer_up(&mut self, pointer: PointerEvent, _now_ms: u64) {
        self.pointers.release(pointer.id);
        self.touch_scroll.reset();
        self.last_pointer = None;

        if self.state.is_moving() {
            let world = self.viewport.screen_to_world(pointer.screen());
            self.state.issue_stroke_penalty();
            self.state.marker.place(world);
            log::debug!("Stroke taken at {world}, now on stroke {}", self.state.strokes);
        }
        self.sync_timer();
    }

    pub fn wheel(&mut self, delta_y: f32) {
        self.viewport.wheel(delta_y, self.settings.wheel_scroll_factor);
    }

    /// Per-frame update: spin the windmills, land teleports, and re-check a
    /// held pointer when the interval comes due
    pub fn tick(&mut self, now_ms: u64) {
        for windmill in &mut self.windmills {
            windmill.tick(now_ms);
        }
        self.settle_teleport(now_ms);

        if self.recheck.poll(now_ms) {
            match self.last_pointer {
                Some(pointer) if self.state.is_moving() => self.evaluate(pointer, now_ms),
                _ => self.recheck.cancel(),
            }
        }
    }

    /// Tear the round down, stopping every timer
    pub fn end(mut self) -> Option<RoundResult> {
        self.recheck.cancel();
        log::info!("Play session ended");
        self.state.result()
    }

    fn settle_teleport(&mut self, now_ms: u64) {
        if let PlayPhase::Teleporting { until_ms } = self.state.phase {
            if now_ms >= until_ms {
                self.state.phase = PlayPhase::Idle;
            }
        }
    }

    /// The timer only runs while moving
    fn sync_timer(&mut self) {
        if !self.state.is_moving() {
            self.recheck.cancel();
        }
    }

    fn touch_scroll_move(&mut self, pointer: PointerEvent) {
        if self.state.is_moving() {
            log::debug!("Scrolled mid-move");
            self.state.issue_stroke_penalty();
            self.sync_timer();
        }
        if let Some(dy) = self.touch_scroll.drag(pointer.screen()) {
            self.viewport.scroll_by(dy);
        }
    }

    fn pan(&mut self, center_y: f32) {
        self.viewport.pan_to(center_y);
        self.state.emit(PlayEvent::CameraPan { center_y });
    }

    /// Decide what a pointer sample during a move means
    fn evaluate(&mut self, pointer: PointerEvent, now_ms: u64) {
        let world = self.viewport.screen_to_world(pointer.screen());
        let on_start = self.state.marker.contains(world);
        let class = self.classifier.classify(world);

        self.state.update_sand(
            class == TerrainClass::Sand,
            now_ms,
            self.settings.sand_penalty_cooldown_ms,
            self.settings.sand_penalty_ms,
        );

        // Off the tee straight into the water: call it off, no stroke
        if !self.state.map_hidden && !on_start && !class.is_land() {
            self.state.phase = PlayPhase::Idle;
            self.state.emit(PlayEvent::MoveCancelled);
            log::debug!("Move cancelled at {world}");
            self.sync_timer();
            return;
        }

        if self.windmills.iter().any(|w| w.collides_with(world)) {
            self.state.miss_marker = Some(world);
            self.state.emit(PlayEvent::WindmillHit { at: world });
            self.state.issue_stroke_penalty();
            log::debug!("Windmill hit at {world}");
            self.sync_timer();
            return;
        }

        let marker = self.state.marker;
        let teleport = first_collision(&self.portals, world, |p| marker.contains(p)).map(|p| p.dest());
        if let Some(dest) = teleport {
            self.pan(dest.y);
            self.state.phase = PlayPhase::Teleporting {
                until_ms: now_ms + self.settings.teleport_duration_ms,
            };
            self.state.map_hidden = false;
            self.state.marker.place(dest);
            self.state.emit(PlayEvent::Teleported { from: world, to: dest });
            self.state.emit(PlayEvent::Toast(ToastKind::Portal));
            log::debug!("Teleported {world} -> {dest}");
            self.sync_timer();
            return;
        }

        if !on_start {
            self.state.map_hidden = true;
        }

        if class == TerrainClass::Hole {
            self.state.phase = PlayPhase::Holed;
            self.state.map_hidden = false;
            self.state.final_ms = Some(self.state.elapsed_ms(now_ms));
            self.state.marker.place(OFF_COURSE);
            if let Some(result) = self.state.result() {
                log::info!(
                    "Holed in {} strokes, {} ms ({} sand penalties)",
                    result.strokes,
                    result.elapsed_ms,
                    result.sand_penalties
                );
                self.state.emit(PlayEvent::Holed(result));
            }
        } else if !class.is_land() && !on_start {
            // Sinks at the water's edge
            self.state.issue_stroke_penalty();
            self.state.marker.place(world);
            log::debug!("In the water at {world}");
        } else if self.viewport.can_scroll_up()
            && self.viewport.in_top_bumper(pointer.y, self.settings.bumper_height)
        {
            let v = &self.viewport;
            let center_y = v.scroll_y() - v.display_height * 0.5 + v.footer_height;
            let nudge = Vec2::new(0.0, -v.footer_height * 0.5);
            self.bump(center_y, world + nudge);
        } else if self.viewport.can_scroll_down()
            && self.viewport.in_bottom_bumper(pointer.y, self.settings.bumper_height)
        {
            let v = &self.viewport;
            let center_y = v.scroll_y() + v.display_height * 1.5 - v.footer_height;
            let nudge = Vec2::new(0.0, v.footer_height * 0.5);
            self.bump(center_y, world + nudge);
        }
        self.sync_timer();
    }

    /// Scroll bumper: pan a screen's worth, park the marker, no stroke
    fn bump(&mut self, center_y: f32, marker: Vec2) {
        self.pan(center_y);
        self.state.phase = PlayPhase::Idle;
        self.state.map_hidden = false;
        self.state.marker.place(marker);
        self.state.emit(PlayEvent::Toast(ToastKind::Scroll));
        log::debug!("Scroll bumper, marker parked at {marker}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course::{BrushSize, CoursePoint, PortalPairs, Stroke, StrokeHistory, Terrain, TerrainKind};

    const DISPLAY: Vec2 = Vec2::new(750.0, 1000.0);
    const FOOTER: f32 = 100.0;

    /// 3000 tall course: a grass fairway up the middle with a sand trap,
    /// flag, one windmill and one portal pair. The course sits at the world
    /// origin; the camera starts at scroll 2100.
    fn course() -> CourseDocument {
        let mut history = StrokeHistory::new();
        history.push(
            TerrainKind::Grass,
            BrushSize::Large,
            Stroke {
                from: CoursePoint::new(375.0, 80.0),
                to: CoursePoint::new(375.0, 1000.0),
            },
        );
        history.push(
            TerrainKind::Sand,
            BrushSize::Small,
            Stroke {
                from: CoursePoint::new(375.0, 250.0),
                to: CoursePoint::new(375.0, 250.0),
            },
        );
        let mut doc = CourseDocument::new("Test", "", 3000, Terrain::FromStrokes(history));
        doc.flag = Some(CoursePoint::new(375.0, 500.0));
        doc.windmills.push(CoursePoint::new(650.0, 900.0));
        let mut portals = PortalPairs::new();
        portals.place(CoursePoint::new(420.0, 300.0));
        portals.place(CoursePoint::new(100.0, 2000.0));
        doc.portals = portals;
        doc
    }

    fn session() -> PlaySession {
        PlaySession::start(&course(), Settings::default(), DISPLAY, FOOTER).unwrap()
    }

    fn at(session: &PlaySession, id: u32, world: Vec2, is_down: bool) -> PointerEvent {
        let screen = session.viewport().world_to_screen(world);
        PointerEvent::new(id, screen.x, screen.y, is_down)
    }

    fn down(session: &mut PlaySession, world: Vec2, now: u64) {
        let p = at(session, 1, world, true);
        session.pointer_down(p, now);
    }

    fn move_to(session: &mut PlaySession, world: Vec2, now: u64) {
        let p = at(session, 1, world, true);
        session.pointer_move(p, now);
    }

    const TEE: Vec2 = Vec2::new(375.0, 2920.0);
    const FAIRWAY: Vec2 = Vec2::new(375.0, 2700.0);
    const SAND: Vec2 = Vec2::new(375.0, 2750.0);
    const WATER: Vec2 = Vec2::new(700.0, 2900.0);
    const HOLE: Vec2 = Vec2::new(385.0, 2550.0);
    const TOWER: Vec2 = Vec2::new(650.0, 2110.0);
    const PORTAL_A: Vec2 = Vec2::new(420.0, 2700.0);
    const PORTAL_B: Vec2 = Vec2::new(100.0, 1000.0);

    #[test]
    fn test_start_layout() {
        let s = session();
        assert_eq!(s.state().marker.position(), TEE);
        assert_eq!(s.viewport().scroll_y(), 2100.0);
        assert_eq!(s.state().strokes, 1);
        assert_eq!(s.windmills().len(), 1);
        assert_eq!(s.portals().len(), 2);
        assert_eq!(s.classify(FAIRWAY), TerrainClass::Grass);
        assert_eq!(s.classify(SAND), TerrainClass::Sand);
        assert_eq!(s.classify(WATER), TerrainClass::Water);
        assert_eq!(s.classify(HOLE), TerrainClass::Hole);
    }

    #[test]
    fn test_requires_flag() {
        let mut doc = course();
        doc.flag = None;
        let err = PlaySession::start(&doc, Settings::default(), DISPLAY, FOOTER).unwrap_err();
        assert!(matches!(err, CourseError::MissingFlag));
    }

    #[test]
    fn test_half_placed_portals_are_skipped() {
        let mut doc = course();
        doc.portals.place(CoursePoint::new(600.0, 600.0));
        let s = PlaySession::start(&doc, Settings::default(), DISPLAY, FOOTER).unwrap();
        assert_eq!(s.portals().len(), 2);
    }

    #[test]
    fn test_press_off_the_tee_does_nothing() {
        let mut s = session();
        down(&mut s, FAIRWAY, 0);
        assert_eq!(s.state().phase, PlayPhase::Idle);
        assert!(!s.is_recheck_running());
    }

    #[test]
    fn test_drag_from_tee_into_water_is_free() {
        let mut s = session();
        down(&mut s, TEE, 0);
        assert!(s.is_recheck_running());
        move_to(&mut s, WATER, 10);
        assert_eq!(s.state().phase, PlayPhase::Idle);
        assert_eq!(s.state().strokes, 1);
        assert_eq!(s.drain_events(), vec![PlayEvent::MoveCancelled]);
        assert!(!s.is_recheck_running());
    }

    #[test]
    fn test_water_after_leaving_the_tee_costs_a_stroke() {
        let mut s = session();
        down(&mut s, TEE, 0);
        move_to(&mut s, FAIRWAY, 10);
        assert!(s.state().map_hidden);
        move_to(&mut s, WATER, 20);
        assert_eq!(s.state().strokes, 2);
        assert_eq!(s.state().marker.position(), WATER);
        assert!(!s.state().map_hidden);
        assert_eq!(s.drain_events(), vec![PlayEvent::StrokePenalty]);
        assert!(!s.is_recheck_running());
    }

    #[test]
    fn test_release_is_a_stroke() {
        let mut s = session();
        down(&mut s, TEE, 0);
        move_to(&mut s, FAIRWAY, 10);
        let p = at(&s, 1, FAIRWAY, false);
        s.pointer_up(p, 20);
        assert_eq!(s.state().strokes, 2);
        assert_eq!(s.state().marker.position(), FAIRWAY);
        assert!(!s.is_recheck_running());
    }

    #[test]
    fn test_windmill_hit() {
        let mut s = session();
        down(&mut s, TEE, 0);
        move_to(&mut s, FAIRWAY, 10);
        move_to(&mut s, TOWER, 20);
        assert_eq!(s.state().strokes, 2);
        assert_eq!(s.state().miss_marker, Some(TOWER));
        assert_eq!(
            s.drain_events(),
            vec![PlayEvent::WindmillHit { at: TOWER }, PlayEvent::StrokePenalty]
        );

        // The miss marker clears on the next move
        let tee = s.state().marker.position();
        down(&mut s, tee, 30);
        assert_eq!(s.state().miss_marker, None);
    }

    #[test]
    fn test_portal_teleports_without_a_stroke() {
        let mut s = session();
        down(&mut s, TEE, 0);
        move_to(&mut s, FAIRWAY, 10);
        move_to(&mut s, PORTAL_A, 20);

        assert_eq!(s.state().phase, PlayPhase::Teleporting { until_ms: 1_020 });
        assert_eq!(s.state().strokes, 1);
        assert_eq!(s.state().marker.position(), PORTAL_B);
        assert_eq!(s.viewport().center_y(), PORTAL_B.y);
        assert!(!s.is_recheck_running());
        assert_eq!(
            s.drain_events(),
            vec![
                PlayEvent::CameraPan { center_y: PORTAL_B.y },
                PlayEvent::Teleported { from: PORTAL_A, to: PORTAL_B },
                PlayEvent::Toast(ToastKind::Portal),
            ]
        );

        // Input is ignored until the hop lands
        down(&mut s, PORTAL_B, 500);
        assert_eq!(s.state().phase, PlayPhase::Teleporting { until_ms: 1_020 });
        s.tick(1_020);
        assert_eq!(s.state().phase, PlayPhase::Idle);

        // Resting on the exit portal doesn't send us straight back
        down(&mut s, PORTAL_B, 1_100);
        assert!(s.state().is_moving());
        move_to(&mut s, PORTAL_B + Vec2::new(0.0, 5.0), 1_110);
        assert!(s.state().is_moving());
        assert_eq!(s.state().marker.position(), PORTAL_B);
    }

    #[test]
    fn test_holed() {
        let mut s = session();
        down(&mut s, TEE, 1_000);
        move_to(&mut s, FAIRWAY, 2_000);
        move_to(&mut s, HOLE, 4_500);

        let result = RoundResult {
            strokes: 1,
            elapsed_ms: 3_500,
            sand_penalties: 0,
        };
        assert!(s.state().is_holed());
        assert_eq!(s.result(), Some(result));
        assert_eq!(s.drain_events(), vec![PlayEvent::Holed(result)]);
        assert!(!s.is_recheck_running());
        assert_eq!(s.elapsed_ms(100_000), 3_500);

        // Nothing moves after the hole
        let marker = s.state().marker.position();
        down(&mut s, marker, 5_000);
        assert!(s.state().is_holed());
        assert_eq!(s.end(), Some(result));
    }

    #[test]
    fn test_sand_penalties_via_recheck() {
        let mut s = session();
        down(&mut s, TEE, 0);
        move_to(&mut s, SAND, 20);
        assert_eq!(s.state().sand_penalty_count, 1);

        // Holding still: the interval keeps checking
        s.tick(100);
        assert_eq!(s.state().sand_penalty_count, 1);
        s.tick(600);
        assert_eq!(s.state().sand_penalty_count, 2);
        assert!(s.is_recheck_running());

        let p = at(&s, 1, SAND, false);
        s.pointer_up(p, 650);
        assert!(!s.is_recheck_running());
        s.tick(5_000);
        assert_eq!(s.state().sand_penalty_count, 2);
        assert_eq!(s.elapsed_ms(1_000), 1_000 + 6_000);
    }

    #[test]
    fn test_top_bumper_scrolls_without_a_stroke() {
        let mut s = session();
        down(&mut s, TEE, 0);
        let edge = Vec2::new(300.0, 2110.0);
        move_to(&mut s, edge, 10);

        assert_eq!(s.state().phase, PlayPhase::Idle);
        assert_eq!(s.state().strokes, 1);
        assert!(!s.state().map_hidden);
        assert_eq!(s.state().marker.position(), edge - Vec2::new(0.0, 50.0));
        assert_eq!(s.viewport().scroll_y(), 1_200.0);
        assert_eq!(
            s.drain_events(),
            vec![PlayEvent::CameraPan { center_y: 1_700.0 }, PlayEvent::Toast(ToastKind::Scroll)]
        );
    }

    #[test]
    fn test_bottom_bumper_scrolls_down() {
        let mut s = session();
        down(&mut s, TEE, 0);
        s.wheel(-400.0);
        assert_eq!(s.viewport().scroll_y(), 1_900.0);
        move_to(&mut s, Vec2::new(375.0, 1_900.0 + 990.0), 20);
        assert_eq!(s.state().phase, PlayPhase::Idle);
        assert_eq!(s.state().strokes, 1);
        assert_eq!(s.viewport().scroll_y(), 2_100.0);
        assert_eq!(s.state().marker.position(), Vec2::new(375.0, 2_940.0));
    }

    #[test]
    fn test_two_finger_scroll_mid_move_costs_a_stroke() {
        let mut s = session();
        down(&mut s, TEE, 0);
        s.pointer_down(PointerEvent::new(2, 600.0, 300.0, true), 5);

        s.pointer_move(PointerEvent::new(1, 375.0, 820.0, true), 10);
        assert_eq!(s.state().strokes, 2);
        assert!(!s.is_recheck_running());

        // Later drags scroll the camera
        s.pointer_move(PointerEvent::new(1, 375.0, 900.0, true), 20);
        assert_eq!(s.viewport().scroll_y(), 2_020.0);
        s.pointer_move(PointerEvent::new(1, 375.0, 903.0, true), 30);
        assert_eq!(s.viewport().scroll_y(), 2_020.0);
        assert_eq!(s.state().strokes, 2);
    }

    #[test]
    fn test_handle_dispatches() {
        let mut s = session();
        s.handle(InputEvent::Wheel { delta_y: -200.0 }, 0);
        assert_eq!(s.viewport().scroll_y(), 2_000.0);
        let tee = at(&s, 1, TEE, true);
        s.handle(InputEvent::PointerDown(tee), 10);
        assert!(s.state().is_moving());
        s.handle(InputEvent::PointerUp(tee), 20);
        assert_eq!(s.state().strokes, 2);
    }
}
