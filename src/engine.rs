use std::collections::HashMap;

use tracing::{debug, info, trace, warn};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::assets::AssetCache;
use crate::config::EngineConfig;
use crate::error::CanvasError;
use crate::hit::{self, Hit, HitPart, ResizeAnchor};
use crate::input::{Button, Cursor, InputState, Key, Modifiers, UiState, WheelDelta};
use crate::registry::{AssetRef, Bounds, ObjectId, PlacedImage, Registry, Size};
use crate::render;
use crate::viewport::{Point, Viewport};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ObjectCreated(PlacedImage),
    ObjectUpdated(PlacedImage),
    ObjectDeleted { id: ObjectId },
    SelectionChanged(Option<ObjectId>),
    /// Fetch and decode this asset, then call `on_asset_loaded`.
    LoadAsset(AssetRef),
    SetCursor(Cursor),
    /// Suppress the browser's default handling of the current event.
    PreventDefault,
    RenderNeeded,
}

/// Callback receiving every action the engine emits.
pub type Observer = Box<dyn FnMut(&Action)>;

/// Core engine state — all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    pub registry: Registry,
    pub viewport: Viewport,
    pub ui: UiState,
    pub input: InputState,
    pub assets: AssetCache,
    pub config: EngineConfig,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub dpr: f64,
    observer: Option<Observer>,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self {
            registry: Registry::new(),
            viewport: Viewport::default(),
            ui: UiState::default(),
            input: InputState::default(),
            assets: AssetCache::new(),
            config: EngineConfig::default(),
            viewport_width: 0.0,
            viewport_height: 0.0,
            dpr: 1.0,
            observer: None,
        }
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with custom tunables.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `config` fails validation.
    pub fn with_config(config: EngineConfig) -> Result<Self, CanvasError> {
        config.validate()?;
        Ok(Self { config, ..Self::default() })
    }

    /// Install a callback that sees every emitted action.
    pub fn set_observer(&mut self, observer: Observer) {
        self.observer = Some(observer);
    }

    /// Remove the observer, if any.
    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    /// Update viewport dimensions and device pixel ratio.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.viewport_width = width_css;
        self.viewport_height = height_css;
        self.dpr = dpr;
    }

    // --- Thumbnail tray drag and drop ---

    /// A thumbnail drag began; remember which asset is in flight.
    pub fn on_drag_start(&mut self, asset: AssetRef) {
        debug!(asset = asset.as_str(), "thumbnail drag started");
        self.ui.pending_asset = Some(asset);
    }

    /// A tray drag is over the canvas. The host must prevent the default so
    /// the browser allows the drop.
    pub fn on_drag_over(&mut self) -> Vec<Action> {
        self.finish(vec![Action::PreventDefault])
    }

    /// Place the in-flight asset centered at the drop point.
    pub fn on_drop(&mut self, screen_pt: Point) -> Vec<Action> {
        let mut actions = vec![Action::PreventDefault];
        let Some(asset) = self.ui.pending_asset.take() else {
            debug!("drop without a pending thumbnail; ignoring");
            return self.finish(actions);
        };

        let position = self.viewport.screen_to_canvas(screen_pt);
        let size = self.assets.natural_size(&asset).map(|s| s.floored(self.config.min_size));
        let id = self.registry.add(asset.clone(), position, size);
        info!(%id, asset = asset.as_str(), x = position.x, y = position.y, "image placed");

        if let Some(record) = self.registry.get(&id) {
            actions.push(Action::ObjectCreated(record.clone()));
        }
        if self.assets.request(&asset) {
            actions.push(Action::LoadAsset(asset));
        }
        actions.push(Action::RenderNeeded);
        self.finish(actions)
    }

    // --- Asset loading ---

    /// The host finished decoding an asset.
    pub fn on_asset_loaded(&mut self, asset: &AssetRef, natural_width: f64, natural_height: f64) -> Vec<Action> {
        let natural = Size::new(natural_width, natural_height);
        self.assets.mark_ready(asset, natural);
        let resolved = self.registry.resolve_asset(asset, natural, self.config.min_size);
        debug!(asset = asset.as_str(), count = resolved.len(), "asset loaded");

        let mut actions: Vec<Action> = resolved
            .iter()
            .filter_map(|id| self.registry.get(id))
            .map(|r| Action::ObjectUpdated(r.clone()))
            .collect();
        if !actions.is_empty() {
            actions.push(Action::RenderNeeded);
        }
        self.finish(actions)
    }

    /// The host could not load an asset. Records stay unsized; the next drop
    /// of the same asset requests it again.
    pub fn on_asset_failed(&mut self, asset: &AssetRef) {
        warn!(asset = asset.as_str(), "asset failed to load");
        self.assets.mark_failed(asset);
    }

    // --- Pointer input ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        let mut actions = Vec::new();
        if !matches!(self.input, InputState::Idle) {
            self.end_gesture(&mut actions);
        }

        match button {
            Button::Middle => self.start_pan(screen_pt, &mut actions),
            Button::Secondary => {}
            Button::Primary => {
                let canvas_pt = self.viewport.screen_to_canvas(screen_pt);
                match self.hit(canvas_pt) {
                    Some(Hit { object_id, part: HitPart::DeleteHandle }) => {
                        self.delete_into(&object_id, &mut actions);
                        self.update_hover(canvas_pt, &mut actions);
                    }
                    Some(Hit { object_id, part: HitPart::ResizeHandle(anchor) }) => {
                        self.start_resize(object_id, anchor, canvas_pt, &mut actions);
                    }
                    Some(Hit { object_id, part: HitPart::Body }) => {
                        self.start_drag(object_id, canvas_pt, &mut actions);
                    }
                    None => {
                        self.deselect_into(&mut actions);
                        self.start_pan(screen_pt, &mut actions);
                    }
                }
            }
        }
        trace!(?modifiers, "pointer down");
        self.finish(actions)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        let mut actions = Vec::new();
        let canvas_pt = self.viewport.screen_to_canvas(screen_pt);
        let keep_ratio = self.config.keep_ratio != modifiers.shift;
        let min = self.config.min_size;

        if matches!(self.input, InputState::Idle) {
            self.update_hover(canvas_pt, &mut actions);
            return self.finish(actions);
        }

        match &mut self.input {
            InputState::Idle => {}
            InputState::Panning { last_screen } => {
                let (dx, dy) = (screen_pt.x - last_screen.x, screen_pt.y - last_screen.y);
                *last_screen = screen_pt;
                self.viewport = self.viewport.pan_by(dx, dy);
                trace!(dx, dy, "pan");
                actions.push(Action::RenderNeeded);
            }
            InputState::DraggingImage { grab, center, moved, .. } => {
                let next = Point::new(canvas_pt.x - grab.x, canvas_pt.y - grab.y);
                if next != *center {
                    *center = next;
                    *moved = true;
                    actions.push(Action::RenderNeeded);
                }
            }
            InputState::ResizingImage { anchor, start, orig, current, .. } => {
                let proposed = propose_resize(*anchor, orig, *start, canvas_pt, keep_ratio);
                // Boxes under the floor are rejected; the gesture keeps the last good box.
                if proposed.size.width >= min && proposed.size.height >= min && proposed != *current {
                    *current = proposed;
                    actions.push(Action::RenderNeeded);
                }
            }
        }
        self.finish(actions)
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        let mut actions = Vec::new();
        if button == Button::Secondary {
            return self.finish(actions);
        }
        self.end_gesture(&mut actions);
        let canvas_pt = self.viewport.screen_to_canvas(screen_pt);
        self.update_hover(canvas_pt, &mut actions);
        self.finish(actions)
    }

    /// The pointer left the canvas element.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        if matches!(self.input, InputState::Idle) {
            self.set_cursor(Cursor::Default, &mut actions);
        }
        self.finish(actions)
    }

    /// Zoom one step about the pointer. Horizontal-only scrolls are ignored.
    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, _modifiers: Modifiers) -> Vec<Action> {
        let mut actions = vec![Action::PreventDefault];
        if delta.dy == 0.0 {
            return self.finish(actions);
        }
        let next = self
            .viewport
            .apply_zoom(screen_pt, delta.dy, self.config.zoom_factor)
            .clamp_zoom(screen_pt, self.config.min_scale, self.config.max_scale);
        // Already at a zoom limit: keep the viewport bit-for-bit.
        if (next.scale - self.viewport.scale).abs() <= f64::EPSILON * self.viewport.scale {
            return self.finish(actions);
        }
        self.viewport = next;
        debug!(scale = self.viewport.scale, "zoom");
        actions.push(Action::RenderNeeded);
        self.finish(actions)
    }

    // --- Keyboard ---

    pub fn on_key_down(&mut self, key: Key, _modifiers: Modifiers) -> Vec<Action> {
        let mut actions = Vec::new();
        match key.0.as_str() {
            "Delete" | "Backspace" => {
                if let Some(id) = self.ui.selection.selected() {
                    self.delete_into(&id, &mut actions);
                }
            }
            "Escape" => self.deselect_into(&mut actions),
            _ => {}
        }
        self.finish(actions)
    }

    // --- Programmatic selection / deletion ---

    /// Select a placed image. Unknown ids are ignored.
    pub fn select(&mut self, id: &ObjectId) -> Vec<Action> {
        let mut actions = Vec::new();
        self.select_into(*id, &mut actions);
        self.finish(actions)
    }

    /// Clear the selection.
    pub fn deselect(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        self.deselect_into(&mut actions);
        self.finish(actions)
    }

    /// Remove a placed image, clearing the selection first if it was selected.
    pub fn delete(&mut self, id: &ObjectId) -> Vec<Action> {
        let mut actions = Vec::new();
        self.delete_into(id, &mut actions);
        self.finish(actions)
    }

    /// Remove the selected image, if any.
    pub fn delete_selected(&mut self) -> Vec<Action> {
        match self.ui.selection.selected() {
            Some(id) => self.delete(&id),
            None => Vec::new(),
        }
    }

    // --- Queries ---

    /// The currently selected image, if any.
    #[must_use]
    pub fn selection(&self) -> Option<ObjectId> {
        self.ui.selection.selected()
    }

    /// The current viewport.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Look up a placed image by id.
    #[must_use]
    pub fn image(&self, id: &ObjectId) -> Option<&PlacedImage> {
        self.registry.get(id)
    }

    /// Cursor last requested from the host.
    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.ui.cursor
    }

    // --- Internals ---

    fn hit(&self, canvas_pt: Point) -> Option<Hit> {
        hit::hit_test(canvas_pt, &self.registry, &self.viewport, self.ui.selection.selected(), &self.config)
    }

    fn start_pan(&mut self, screen_pt: Point, actions: &mut Vec<Action>) {
        self.input = InputState::Panning { last_screen: screen_pt };
        self.set_cursor(Cursor::Grabbing, actions);
    }

    fn start_drag(&mut self, id: ObjectId, canvas_pt: Point, actions: &mut Vec<Action>) {
        let Some(record) = self.registry.get(&id) else {
            return;
        };
        let center = record.position;
        self.select_into(id, actions);
        self.input = InputState::DraggingImage {
            id,
            grab: Point::new(canvas_pt.x - center.x, canvas_pt.y - center.y),
            center,
            moved: false,
        };
        self.set_cursor(Cursor::Move, actions);
    }

    fn start_resize(&mut self, id: ObjectId, anchor: ResizeAnchor, canvas_pt: Point, actions: &mut Vec<Action>) {
        let Some(bounds) = self.registry.bounds(&id) else {
            return;
        };
        self.input = InputState::ResizingImage { id, anchor, start: canvas_pt, orig: bounds, current: bounds };
        self.set_cursor(anchor.cursor(), actions);
    }

    /// Commit the active gesture, if any, and return to idle.
    fn end_gesture(&mut self, actions: &mut Vec<Action>) {
        match std::mem::take(&mut self.input) {
            InputState::Idle => {}
            InputState::Panning { .. } => {
                debug!(x = self.viewport.offset.x, y = self.viewport.offset.y, "pan finished");
            }
            InputState::DraggingImage { moved: false, .. } => {}
            InputState::DraggingImage { id, center, moved: true, .. } => match self.registry.move_to(&id, center) {
                Ok(()) => {
                    debug!(%id, x = center.x, y = center.y, "image moved");
                    self.push_updated(&id, actions);
                }
                Err(e) => debug!(error = %e, "move ignored"),
            },
            InputState::ResizingImage { id, orig, current, .. } => {
                if current == orig {
                    return;
                }
                let scale_x = current.size.width / orig.size.width;
                let scale_y = current.size.height / orig.size.height;
                match self.registry.resize(&id, current.center, scale_x, scale_y, self.config.min_size) {
                    Ok(size) => {
                        debug!(%id, width = size.width, height = size.height, "image resized");
                        self.push_updated(&id, actions);
                    }
                    Err(e) => debug!(error = %e, "resize ignored"),
                }
            }
        }
    }

    fn push_updated(&self, id: &ObjectId, actions: &mut Vec<Action>) {
        if let Some(record) = self.registry.get(id) {
            actions.push(Action::ObjectUpdated(record.clone()));
            actions.push(Action::RenderNeeded);
        }
    }

    fn select_into(&mut self, id: ObjectId, actions: &mut Vec<Action>) {
        if self.registry.get(&id).is_none() {
            debug!(%id, "select ignored: not on canvas");
            return;
        }
        if self.ui.selection.select(id) {
            debug!(%id, "selected");
            actions.push(Action::SelectionChanged(Some(id)));
            actions.push(Action::RenderNeeded);
        }
    }

    fn deselect_into(&mut self, actions: &mut Vec<Action>) {
        if self.ui.selection.deselect() {
            debug!("deselected");
            actions.push(Action::SelectionChanged(None));
            actions.push(Action::RenderNeeded);
        }
    }

    fn delete_into(&mut self, id: &ObjectId, actions: &mut Vec<Action>) {
        if self.ui.selection.is_selected(id) {
            self.ui.selection.deselect();
            actions.push(Action::SelectionChanged(None));
        }
        let targets_gesture = match &self.input {
            InputState::DraggingImage { id: g, .. } | InputState::ResizingImage { id: g, .. } => g == id,
            InputState::Idle | InputState::Panning { .. } => false,
        };
        if targets_gesture {
            self.input = InputState::Idle;
        }
        match self.registry.remove(id) {
            Some(_) => {
                info!(%id, remaining = self.registry.len(), "image deleted");
                actions.push(Action::ObjectDeleted { id: *id });
                actions.push(Action::RenderNeeded);
            }
            None => debug!(%id, "delete ignored: not on canvas"),
        }
    }

    fn update_hover(&mut self, canvas_pt: Point, actions: &mut Vec<Action>) {
        let cursor = match self.hit(canvas_pt) {
            Some(Hit { part: HitPart::DeleteHandle, .. }) => Cursor::Pointer,
            Some(Hit { part: HitPart::ResizeHandle(anchor), .. }) => anchor.cursor(),
            Some(Hit { object_id, part: HitPart::Body }) if self.ui.selection.is_selected(&object_id) => Cursor::Move,
            Some(Hit { part: HitPart::Body, .. }) => Cursor::Pointer,
            None => Cursor::Default,
        };
        self.set_cursor(cursor, actions);
    }

    fn set_cursor(&mut self, cursor: Cursor, actions: &mut Vec<Action>) {
        if self.ui.cursor != cursor {
            self.ui.cursor = cursor;
            actions.push(Action::SetCursor(cursor));
        }
    }

    fn finish(&mut self, actions: Vec<Action>) -> Vec<Action> {
        if let Some(observer) = self.observer.as_mut() {
            for action in &actions {
                observer(action);
            }
        }
        actions
    }
}

/// Box produced by dragging `anchor` from `start` to `pointer`, with the
/// opposite edges held fixed. Corner anchors scale both axes by the same
/// factor when `keep_ratio` is set.
fn propose_resize(anchor: ResizeAnchor, orig: &Bounds, start: Point, pointer: Point, keep_ratio: bool) -> Bounds {
    let (dx, dy) = (pointer.x - start.x, pointer.y - start.y);
    let (mut left, mut top, mut right, mut bottom) = (orig.left(), orig.top(), orig.right(), orig.bottom());
    if anchor.moves_left() {
        left += dx;
    }
    if anchor.moves_right() {
        right += dx;
    }
    if anchor.moves_top() {
        top += dy;
    }
    if anchor.moves_bottom() {
        bottom += dy;
    }

    if keep_ratio && anchor.is_corner() {
        let sx = (right - left) / orig.size.width;
        let sy = (bottom - top) / orig.size.height;
        let s = if sx.abs() >= sy.abs() { sx } else { sy };
        let (w, h) = (orig.size.width * s, orig.size.height * s);
        if anchor.moves_left() {
            left = right - w;
        } else {
            right = left + w;
        }
        if anchor.moves_top() {
            top = bottom - h;
        } else {
            bottom = top + h;
        }
    }

    Bounds::from_edges(left, top, right, bottom)
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element
/// plus the decoded image elements it draws.
pub struct Engine {
    canvas: HtmlCanvasElement,
    images: HashMap<AssetRef, HtmlImageElement>,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas, images: HashMap::new(), core: EngineCore::new() }
    }

    /// Create an engine with custom tunables.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `config` fails validation.
    pub fn with_config(canvas: HtmlCanvasElement, config: EngineConfig) -> Result<Self, CanvasError> {
        Ok(Self { canvas, images: HashMap::new(), core: EngineCore::with_config(config)? })
    }

    pub fn set_observer(&mut self, observer: Observer) {
        self.core.set_observer(observer);
    }

    // --- Viewport ---

    /// Update viewport dimensions and device pixel ratio, resizing the backing store.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.core.set_viewport(width_css, height_css, dpr);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let (w, h) = ((width_css * dpr).round().max(0.0) as u32, (height_css * dpr).round().max(0.0) as u32);
        self.canvas.set_width(w);
        self.canvas.set_height(h);
    }

    // --- Drag and drop / assets ---

    pub fn on_drag_start(&mut self, asset: AssetRef) {
        self.core.on_drag_start(asset);
    }

    pub fn on_drag_over(&mut self) -> Vec<Action> {
        self.core.on_drag_over()
    }

    pub fn on_drop(&mut self, screen_pt: Point) -> Vec<Action> {
        self.core.on_drop(screen_pt)
    }

    /// Keep the decoded image for drawing and size every record waiting on it.
    pub fn on_asset_loaded(&mut self, asset: AssetRef, image: HtmlImageElement) -> Vec<Action> {
        let (w, h) = (f64::from(image.natural_width()), f64::from(image.natural_height()));
        self.images.insert(asset.clone(), image);
        self.core.on_asset_loaded(&asset, w, h)
    }

    pub fn on_asset_failed(&mut self, asset: &AssetRef) {
        self.core.on_asset_failed(asset);
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_down(screen_pt, button, modifiers)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_move(screen_pt, modifiers)
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_up(screen_pt, button, modifiers)
    }

    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.core.on_pointer_leave()
    }

    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_wheel(screen_pt, delta, modifiers)
    }

    pub fn on_key_down(&mut self, key: Key, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_key_down(key, modifiers)
    }

    pub fn delete_selected(&mut self) -> Vec<Action> {
        self.core.delete_selected()
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a draw call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let Some(ctx) = self.canvas.get_context("2d")? else {
            return Err(JsValue::from_str("2d context unavailable"));
        };
        let ctx: CanvasRenderingContext2d = ctx.dyn_into()?;
        let scene = render::build_scene(&self.core);
        render::draw(&ctx, &scene, &self.images, self.core.viewport_width, self.core.viewport_height, self.core.dpr)
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn selection(&self) -> Option<ObjectId> {
        self.core.selection()
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.core.viewport()
    }

    #[must_use]
    pub fn image(&self, id: &ObjectId) -> Option<&PlacedImage> {
        self.core.image(id)
    }
}
