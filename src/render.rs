//! Rendering: projects engine state into a [`Scene`] and paints it to a 2D context.
//!
//! [`build_scene`] is a pure function of the registry, selection, viewport and
//! active gesture. [`draw`] is the only place that touches
//! [`web_sys::CanvasRenderingContext2d`]; it never mutates application state.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::collections::HashMap;
use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use crate::engine::EngineCore;
use crate::hit::{self, ResizeAnchor};
use crate::registry::{AssetRef, Bounds, ObjectId};
use crate::viewport::{Point, Viewport};

const SELECTION_STROKE: &str = "#0099FF";
const HANDLE_FILL: &str = "#FFFFFF";
const DELETE_FILL: &str = "red";

/// One image to draw, in canvas coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneImage {
    pub id: ObjectId,
    pub asset: AssetRef,
    /// Draw order; equals the record's registry index.
    pub index: usize,
    /// Top-left corner, i.e. center minus half the size.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Affordances drawn around the selected image, in canvas coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionOverlay {
    pub id: ObjectId,
    pub outline: Bounds,
    /// Resize handle centers, in [`ResizeAnchor::ALL`] order.
    pub handles: Vec<Point>,
    /// Handle radius converted to canvas units.
    pub handle_radius: f64,
    pub delete_center: Point,
    pub delete_radius: f64,
}

/// Everything needed to paint one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub viewport: Viewport,
    pub images: Vec<SceneImage>,
    pub overlay: Option<SelectionOverlay>,
}

/// Project engine state into a scene. Images whose asset has not loaded are
/// left out; gesture previews replace the committed box of the image being
/// dragged or resized.
#[must_use]
pub fn build_scene(core: &EngineCore) -> Scene {
    let viewport = core.viewport;
    let selected = core.ui.selection.selected();
    let mut overlay = None;

    let images = core
        .registry
        .iter()
        .enumerate()
        .filter_map(|(index, record)| {
            let bounds = core.input.preview(&record.id, record.bounds()?);
            if selected == Some(record.id) {
                overlay = Some(selection_overlay(record.id, &bounds, &viewport, core));
            }
            Some(SceneImage {
                id: record.id,
                asset: record.asset.clone(),
                index,
                x: bounds.left(),
                y: bounds.top(),
                width: bounds.size.width,
                height: bounds.size.height,
            })
        })
        .collect();

    Scene { viewport, images, overlay }
}

fn selection_overlay(id: ObjectId, bounds: &Bounds, viewport: &Viewport, core: &EngineCore) -> SelectionOverlay {
    SelectionOverlay {
        id,
        outline: *bounds,
        handles: ResizeAnchor::ALL.iter().map(|a| a.point_on(bounds)).collect(),
        handle_radius: viewport.screen_dist_to_canvas(core.config.handle_radius_px),
        delete_center: hit::delete_handle_point(bounds, viewport),
        delete_radius: viewport.screen_dist_to_canvas(core.config.delete_radius_px),
    }
}

/// Paint a scene.
///
/// `viewport_w` and `viewport_h` are in CSS pixels. `dpr` is the device pixel ratio.
/// Images whose element is not in `images` yet are skipped.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(
    ctx: &CanvasRenderingContext2d,
    scene: &Scene,
    images: &HashMap<AssetRef, HtmlImageElement>,
    viewport_w: f64,
    viewport_h: f64,
    dpr: f64,
) -> Result<(), JsValue> {
    // Layer 1: clear and set up transforms.
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, viewport_w, viewport_h);
    ctx.translate(scene.viewport.offset.x, scene.viewport.offset.y)?;
    ctx.scale(scene.viewport.scale, scene.viewport.scale)?;

    // Layer 2: images in registry order (bottom first).
    for item in &scene.images {
        if let Some(element) = images.get(&item.asset) {
            ctx.draw_image_with_html_image_element_and_dw_and_dh(element, item.x, item.y, item.width, item.height)?;
        }
    }

    // Layer 3: selection UI.
    if let Some(overlay) = &scene.overlay {
        draw_overlay(ctx, overlay, scene.viewport.scale)?;
    }

    Ok(())
}

fn draw_overlay(ctx: &CanvasRenderingContext2d, overlay: &SelectionOverlay, scale: f64) -> Result<(), JsValue> {
    let px = 1.0 / scale;
    let outline = &overlay.outline;

    ctx.save();
    ctx.set_stroke_style_str(SELECTION_STROKE);
    ctx.set_line_width(px);
    ctx.stroke_rect(outline.left(), outline.top(), outline.size.width, outline.size.height);

    // Square handles, constant size on screen.
    let half = overlay.handle_radius / 2.0;
    ctx.set_fill_style_str(HANDLE_FILL);
    for h in &overlay.handles {
        ctx.fill_rect(h.x - half, h.y - half, half * 2.0, half * 2.0);
        ctx.stroke_rect(h.x - half, h.y - half, half * 2.0, half * 2.0);
    }

    // Delete control: red disc with a white cross.
    let c = overlay.delete_center;
    let r = overlay.delete_radius;
    ctx.begin_path();
    ctx.arc(c.x, c.y, r, 0.0, 2.0 * PI)?;
    ctx.set_fill_style_str(DELETE_FILL);
    ctx.fill();

    let arm = r * 0.45;
    ctx.begin_path();
    ctx.move_to(c.x - arm, c.y - arm);
    ctx.line_to(c.x + arm, c.y + arm);
    ctx.move_to(c.x + arm, c.y - arm);
    ctx.line_to(c.x - arm, c.y + arm);
    ctx.set_stroke_style_str(HANDLE_FILL);
    ctx.set_line_width(2.0 * px);
    ctx.stroke();

    ctx.restore();
    Ok(())
}
