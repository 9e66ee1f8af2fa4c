//! Browser bindings
//!
//! Thin wasm-bindgen handles over the two sessions. Courses and events cross
//! the boundary as JSON; times are `performance.now()` milliseconds.

use glam::Vec2;
use wasm_bindgen::prelude::*;

use super::{InputEvent, PointerEvent};
use crate::course::{CourseDocument, TerrainKind};
use crate::editor::{AuthoringSession, Placeable};
use crate::error::CourseError;
use crate::persistence::CourseEnvelope;
use crate::settings::Settings;
use crate::sim::PlaySession;

/// Install the console logger and panic hook
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_ok() {
        log::info!("Mini Golf core loaded");
    }
}

fn js_error(err: CourseError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

fn pointer(id: u32, x: f32, y: f32, is_down: bool) -> PointerEvent {
    PointerEvent::new(id, x, y, is_down)
}

/// Draw mode handle
#[wasm_bindgen]
pub struct WebEditor {
    inner: AuthoringSession,
}

#[wasm_bindgen]
impl WebEditor {
    #[wasm_bindgen(constructor)]
    pub fn new(display_width: f32, display_height: f32, footer_height: f32) -> Self {
        Self {
            inner: AuthoringSession::new(
                Settings::load(),
                Vec2::new(display_width, display_height),
                footer_height,
            ),
        }
    }

    pub fn pointer_down(&mut self, id: u32, x: f32, y: f32, now_ms: f64) {
        self.inner
            .handle(InputEvent::PointerDown(pointer(id, x, y, true)), now_ms as u64);
    }

    pub fn pointer_move(&mut self, id: u32, x: f32, y: f32, is_down: bool, now_ms: f64) {
        self.inner
            .handle(InputEvent::PointerMove(pointer(id, x, y, is_down)), now_ms as u64);
    }

    pub fn pointer_up(&mut self, id: u32, x: f32, y: f32, now_ms: f64) {
        self.inner
            .handle(InputEvent::PointerUp(pointer(id, x, y, false)), now_ms as u64);
    }

    pub fn wheel(&mut self, delta_y: f32) {
        self.inner.wheel(delta_y);
    }

    pub fn scroll_y(&self) -> f32 {
        self.inner.viewport().scroll_y()
    }

    /// New brush size index (0 small, 1 medium, 2 large)
    pub fn cycle_brush_size(&mut self) -> u8 {
        self.inner.cycle_brush_size().index() as u8
    }

    /// New terrain kind name
    pub fn cycle_terrain_kind(&mut self) -> String {
        let kind: TerrainKind = self.inner.cycle_terrain_kind();
        kind.as_str().to_string()
    }

    /// Start dragging a new "flag", "windmill" or "portal" from screen (x, y)
    pub fn begin_drag(&mut self, item: &str, x: f32, y: f32) -> Result<(), JsValue> {
        let item = match item {
            "flag" => Placeable::Flag,
            "windmill" => Placeable::Windmill,
            "portal" => Placeable::Portal,
            other => return Err(js_sys::Error::new(&format!("unknown object '{other}'")).into()),
        };
        self.inner.begin_drag(item, Vec2::new(x, y));
        Ok(())
    }

    pub fn is_trash_visible(&self) -> bool {
        self.inner.is_trash_visible()
    }

    /// The authored course as an envelope JSON string
    pub fn export_json(&self) -> Result<String, JsValue> {
        let course = self.inner.export().map_err(js_error)?;
        CourseEnvelope::new(course).to_json().map_err(js_error)
    }

    pub fn play_test(&self) -> Result<WebPlay, JsValue> {
        let inner = self.inner.play_test().map_err(js_error)?;
        Ok(WebPlay { inner })
    }
}

/// Game mode handle
#[wasm_bindgen]
pub struct WebPlay {
    inner: PlaySession,
}

#[wasm_bindgen]
impl WebPlay {
    /// Start a round on an envelope JSON course
    pub fn from_json(
        json: &str,
        display_width: f32,
        display_height: f32,
        footer_height: f32,
    ) -> Result<WebPlay, JsValue> {
        let course: CourseDocument = CourseEnvelope::from_json(json).map_err(js_error)?.course;
        let inner = PlaySession::start(
            &course,
            Settings::load(),
            Vec2::new(display_width, display_height),
            footer_height,
        )
        .map_err(js_error)?;
        Ok(WebPlay { inner })
    }

    pub fn pointer_down(&mut self, id: u32, x: f32, y: f32, now_ms: f64) {
        self.inner
            .handle(InputEvent::PointerDown(pointer(id, x, y, true)), now_ms as u64);
    }

    pub fn pointer_move(&mut self, id: u32, x: f32, y: f32, is_down: bool, now_ms: f64) {
        self.inner
            .handle(InputEvent::PointerMove(pointer(id, x, y, is_down)), now_ms as u64);
    }

    pub fn pointer_up(&mut self, id: u32, x: f32, y: f32, now_ms: f64) {
        self.inner
            .handle(InputEvent::PointerUp(pointer(id, x, y, false)), now_ms as u64);
    }

    pub fn wheel(&mut self, delta_y: f32) {
        self.inner.wheel(delta_y);
    }

    pub fn tick(&mut self, now_ms: f64) {
        self.inner.tick(now_ms as u64);
    }

    /// Events since the last call, as a JSON array
    pub fn drain_events_json(&mut self) -> Result<String, JsValue> {
        let events = self.inner.drain_events();
        serde_json::to_string(&events).map_err(|e| js_error(e.into()))
    }

    pub fn scroll_y(&self) -> f32 {
        self.inner.viewport().scroll_y()
    }

    pub fn marker_x(&self) -> f32 {
        self.inner.state().marker.position().x
    }

    pub fn marker_y(&self) -> f32 {
        self.inner.state().marker.position().y
    }

    pub fn strokes(&self) -> u32 {
        self.inner.state().strokes
    }

    pub fn map_hidden(&self) -> bool {
        self.inner.state().map_hidden
    }

    pub fn elapsed_ms(&self, now_ms: f64) -> f64 {
        self.inner.elapsed_ms(now_ms as u64) as f64
    }

    pub fn is_holed(&self) -> bool {
        self.inner.state().is_holed()
    }
}
