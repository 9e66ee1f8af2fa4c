//! Authoring session
//!
//! Paints terrain live onto the editor's masks while recording every stroke,
//! and manages the flag, windmills and portal endpoints. `export` turns the
//! session into a playable [`CourseDocument`].

use glam::Vec2;

use super::tools::{Brush, Drag, Placeable};
use crate::consts::{COURSE_WIDTH, FAN_REACH, FLAG_HEIGHT, MAX_COURSE_HEIGHT};
use crate::course::{
    BrushSize, CourseDocument, CourseFrame, CoursePoint, PortalPairs, Stroke, StrokeHistory,
    Terrain, TerrainKind,
};
use crate::error::CourseError;
use crate::platform::{
    InputEvent, PRIMARY_POINTER_ID, PointerEvent, PointerTracker, TouchScroll, Viewport,
};
use crate::raster::MaskLayers;
use crate::settings::Settings;
use crate::sim::{PlaySession, Rect};

/// Side of the trash drop zone
const TRASH_SIZE: f32 = 100.0;

pub const EXPORT_TITLE: &str = "Play Test";
pub const EXPORT_SUBTITLE: &str = "Make the goal to publish.";

/// Draw mode: one course being authored
#[derive(Debug)]
pub struct AuthoringSession {
    settings: Settings,
    frame: CourseFrame,
    layers: MaskLayers,
    history: StrokeHistory,
    brush: Brush,
    /// Top of the highest grass or sand paint, bottom-up
    highest_drawn_y: f32,
    flag: Option<CoursePoint>,
    windmills: Vec<CoursePoint>,
    portals: PortalPairs,
    dragging: Option<Drag>,
    viewport: Viewport,
    /// Drop zone in screen space, shown while dragging
    trash: Rect,
    pointers: PointerTracker,
    touch_scroll: TouchScroll,
    down_since_ms: Option<u64>,
    /// Previous pointer sample (world), the start of the next stroke
    prev_world: Option<Vec2>,
}

impl AuthoringSession {
    pub fn new(settings: Settings, display: Vec2, footer_height: f32) -> Self {
        let height = settings.editor_course_height.clamp(1, MAX_COURSE_HEIGHT);
        let frame = CourseFrame::above_footer(height, display.y, footer_height);
        let layers = MaskLayers::new(COURSE_WIDTH, height);

        let mut viewport = Viewport::new(display.x, display.y, footer_height, frame.bottom() + footer_height);
        viewport.scroll_to_bottom();

        let trash = Rect::from_center(
            Vec2::new(display.x / 2.0, display.y - footer_height - TRASH_SIZE / 2.0),
            Vec2::splat(TRASH_SIZE),
        );

        log::info!("Editor opened on a {height} tall course");

        Self {
            touch_scroll: TouchScroll::new(settings.touch_scroll_threshold),
            settings,
            frame,
            layers,
            history: StrokeHistory::new(),
            brush: Brush::default(),
            highest_drawn_y: 0.0,
            flag: None,
            windmills: Vec::new(),
            portals: PortalPairs::new(),
            dragging: None,
            viewport,
            trash,
            pointers: PointerTracker::new(),
            down_since_ms: None,
            prev_world: None,
        }
    }

    pub fn frame(&self) -> CourseFrame {
        self.frame
    }

    pub fn layers(&self) -> &MaskLayers {
        &self.layers
    }

    pub fn history(&self) -> &StrokeHistory {
        &self.history
    }

    pub fn brush(&self) -> Brush {
        self.brush
    }

    pub fn highest_drawn_y(&self) -> f32 {
        self.highest_drawn_y
    }

    pub fn flag(&self) -> Option<CoursePoint> {
        self.flag
    }

    pub fn windmills(&self) -> &[CoursePoint] {
        &self.windmills
    }

    pub fn portals(&self) -> &PortalPairs {
        &self.portals
    }

    pub fn dragging(&self) -> Option<&Drag> {
        self.dragging.as_ref()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn trash(&self) -> Rect {
        self.trash
    }

    /// The trash only shows while something is being dragged
    pub fn is_trash_visible(&self) -> bool {
        self.dragging.is_some()
    }

    pub fn cycle_brush_size(&mut self) -> BrushSize {
        self.brush.cycle_size()
    }

    pub fn cycle_terrain_kind(&mut self) -> TerrainKind {
        self.brush.cycle_kind()
    }

    /// A placement tool was pressed: start dragging a new object from the pointer
    pub fn begin_drag(&mut self, item: Placeable, screen: Vec2) {
        self.abandon_drag();
        self.dragging = Some(Drag::new(item, self.viewport.screen_to_world(screen)));
    }

    pub fn handle(&mut self, event: InputEvent, now_ms: u64) {
        match event {
            InputEvent::PointerDown(p) => self.pointer_down(p, now_ms),
            InputEvent::PointerMove(p) => self.pointer_move(p, now_ms),
            InputEvent::PointerUp(p) => self.pointer_up(p, now_ms),
            InputEvent::Wheel { delta_y } => self.wheel(delta_y),
        }
    }

    /// Pressing a placed object picks it up
    pub fn pointer_down(&mut self, pointer: PointerEvent, now_ms: u64) {
        self.pointers.press(pointer.id);
        let world = self.viewport.screen_to_world(pointer.screen());
        if self.dragging.is_none() {
            self.dragging = self.pick_up(world);
        }
        self.down_since_ms = Some(now_ms);
        self.prev_world = Some(world);
    }

    pub fn pointer_move(&mut self, pointer: PointerEvent, now_ms: u64) {
        if self.pointers.is_multi_touch() {
            if pointer.id == PRIMARY_POINTER_ID {
                if let Some(dy) = self.touch_scroll.drag(pointer.screen()) {
                    self.viewport.scroll_by(dy);
                }
            }
            return;
        }

        let world = self.viewport.screen_to_world(pointer.screen());
        let held = self
            .down_since_ms
            .is_some_and(|t| now_ms.saturating_sub(t) > self.settings.pointer_down_delay_ms);
        if pointer.is_down && held {
            if let Some(drag) = self.dragging.as_mut() {
                drag.position = world;
            } else if self.viewport.in_draw_bounds(pointer.y) {
                let from = self.prev_world.unwrap_or(world);
                self.paint(from, world);
            }
        }
        self.prev_world = Some(world);
    }

    /// Drop whatever is being dragged: into the trash, onto the course, or nowhere
    pub fn pointer_up(&mut self, pointer: PointerEvent, _now_ms: u64) {
        self.pointers.release(pointer.id);
        if let Some(drag) = self.dragging.take() {
            let screen = pointer.screen();
            if self.trash.contains(screen) {
                self.trash_drag(drag);
            } else if self.viewport.in_draw_bounds(screen.y) {
                let world = self.viewport.screen_to_world(screen);
                self.drop_at(drag, self.frame.to_course(world));
            } else {
                self.abandon(drag);
            }
        }
        self.touch_scroll.reset();
        self.down_since_ms = None;
        self.prev_world = None;
    }

    pub fn wheel(&mut self, delta_y: f32) {
        self.viewport.wheel(delta_y, self.settings.wheel_scroll_factor);
    }

    /// Record a stroke between two world points and stamp it live
    pub fn paint(&mut self, from: Vec2, to: Vec2) {
        let (from, to) = (from.floor(), to.floor());
        let stroke = Stroke {
            from: self.frame.to_course(from),
            to: self.frame.to_course(to),
        };
        let Brush { kind, size } = self.brush;
        self.history.push(kind, size, stroke);

        if kind.adds_paint() {
            self.highest_drawn_y = self.highest_drawn_y.max(stroke.to.y + size.radius());
        }
        self.layers
            .stamp_segment(kind, size, self.frame.to_local(from), self.frame.to_local(to));
    }

    fn pick_up(&mut self, world: Vec2) -> Option<Drag> {
        let to_world = |p: CoursePoint| self.frame.to_world(p);

        let portal = self
            .portals
            .endpoints()
            .find(|&(_, _, p)| Placeable::Portal.bounds(to_world(p)).contains(world));
        if let Some((id, end, point)) = portal {
            self.portals.take(id, end);
            log::debug!("Picked up portal {id} {end:?}");
            return Some(Drag {
                portal_slot: Some((id, end)),
                ..Drag::new(Placeable::Portal, to_world(point))
            });
        }

        if let Some(flag) = self.flag.filter(|&f| Placeable::Flag.bounds(to_world(f)).contains(world)) {
            self.flag = None;
            return Some(Drag::new(Placeable::Flag, to_world(flag)));
        }

        let index = self
            .windmills
            .iter()
            .position(|&w| Placeable::Windmill.bounds(to_world(w)).contains(world))?;
        let windmill = self.windmills.remove(index);
        Some(Drag::new(Placeable::Windmill, to_world(windmill)))
    }

    fn drop_at(&mut self, drag: Drag, point: CoursePoint) {
        match drag.item {
            Placeable::Flag => self.flag = Some(point),
            Placeable::Windmill => self.windmills.push(point),
            Placeable::Portal => {
                let restored = drag
                    .portal_slot
                    .is_some_and(|(id, end)| self.portals.place_at(id, end, point));
                if !restored {
                    self.portals.place(point);
                }
            }
        }
        log::debug!("Placed {:?} at ({}, {})", drag.item, point.x, point.y);
    }

    fn trash_drag(&mut self, drag: Drag) {
        if let Some((id, end)) = drag.portal_slot {
            self.portals.remove(id, end);
        }
        log::debug!("Trashed {:?}", drag.item);
    }

    /// Released outside the course: the object is gone, but a portal's mate stays
    fn abandon(&mut self, drag: Drag) {
        if drag.portal_slot.is_some() {
            self.portals.prune_empty();
        }
    }

    fn abandon_drag(&mut self) {
        if let Some(drag) = self.dragging.take() {
            self.abandon(drag);
        }
    }

    /// Height an exported course needs: everything placed or painted, plus headroom
    pub fn export_height(&self) -> u32 {
        let portal_top = self.portals.endpoints().map(|(_, _, p)| p.y).fold(0.0, f32::max);
        let flag_top = self.flag.map_or(0.0, |f| f.y + FLAG_HEIGHT / 2.0);
        let windmill_top = self
            .windmills
            .iter()
            .map(|w| w.y + FAN_REACH / 2.0)
            .fold(0.0, f32::max);

        let top = self.highest_drawn_y.max(portal_top).max(flag_top).max(windmill_top);
        let height = (top + self.settings.top_of_course_buffer).ceil().max(1.0) as u32;
        height.min(MAX_COURSE_HEIGHT)
    }

    /// The course as authored so far. Needs a flag.
    pub fn export(&self) -> Result<CourseDocument, CourseError> {
        let Some(flag) = self.flag else {
            log::warn!("Export refused: no flag placed");
            return Err(CourseError::MissingFlag);
        };

        let mut doc = CourseDocument::new(
            EXPORT_TITLE,
            EXPORT_SUBTITLE,
            self.export_height(),
            Terrain::FromStrokes(self.history.clone()),
        );
        doc.flag = Some(flag);
        doc.windmills = self.windmills.clone();
        doc.portals = self.portals.clone();

        log::info!(
            "Exported course: height {}, {} strokes",
            doc.height,
            self.history.stroke_count()
        );
        Ok(doc)
    }

    /// Export and start playing it
    pub fn play_test(&self) -> Result<PlaySession, CourseError> {
        let doc = self.export()?;
        let display = Vec2::new(self.viewport.display_width, self.viewport.display_height);
        PlaySession::start(&doc, self.settings.clone(), display, self.viewport.footer_height)
    }
}
