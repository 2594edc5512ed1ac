use super::*;
use crate::registry::{AssetRef, Size};

// =============================================================
// Helpers
// =============================================================

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn add_sized(registry: &mut Registry, x: f64, y: f64, w: f64, h: f64) -> ObjectId {
    registry.add(AssetRef::new("/assets/beer.jpeg"), pt(x, y), Some(Size::new(w, h)))
}

fn hit(registry: &Registry, at: Point, selected: Option<ObjectId>) -> Option<Hit> {
    hit_test(at, registry, &Viewport::default(), selected, &EngineConfig::default())
}

// =============================================================
// ResizeAnchor
// =============================================================

#[test]
fn anchor_edges_are_consistent() {
    for a in ResizeAnchor::ALL {
        assert!(!(a.moves_left() && a.moves_right()), "{a:?}");
        assert!(!(a.moves_top() && a.moves_bottom()), "{a:?}");
        let axes = [a.moves_left() || a.moves_right(), a.moves_top() || a.moves_bottom()];
        assert_eq!(a.is_corner(), axes[0] && axes[1], "{a:?}");
    }
}

#[test]
fn anchor_points_sit_on_box() {
    let b = Bounds::new(pt(50.0, 50.0), Size::new(40.0, 20.0));
    assert_eq!(ResizeAnchor::Nw.point_on(&b), pt(30.0, 40.0));
    assert_eq!(ResizeAnchor::N.point_on(&b), pt(50.0, 40.0));
    assert_eq!(ResizeAnchor::E.point_on(&b), pt(70.0, 50.0));
    assert_eq!(ResizeAnchor::Se.point_on(&b), pt(70.0, 60.0));
    assert_eq!(ResizeAnchor::Sw.point_on(&b), pt(30.0, 60.0));
}

#[test]
fn anchor_cursors_follow_axis() {
    assert_eq!(ResizeAnchor::N.cursor(), Cursor::NsResize);
    assert_eq!(ResizeAnchor::W.cursor(), Cursor::EwResize);
    assert_eq!(ResizeAnchor::Ne.cursor(), Cursor::NeswResize);
    assert_eq!(ResizeAnchor::Se.cursor(), Cursor::NwseResize);
}

// =============================================================
// Body hits
// =============================================================

#[test]
fn empty_registry_hits_nothing() {
    assert!(hit(&Registry::new(), pt(0.0, 0.0), None).is_none());
}

#[test]
fn body_hit_is_center_anchored() {
    let mut registry = Registry::new();
    let id = add_sized(&mut registry, 100.0, 100.0, 40.0, 40.0);
    assert_eq!(hit(&registry, pt(81.0, 119.0), None), Some(Hit { object_id: id, part: HitPart::Body }));
    assert!(hit(&registry, pt(121.0, 100.0), None).is_none());
}

#[test]
fn topmost_image_wins() {
    let mut registry = Registry::new();
    add_sized(&mut registry, 0.0, 0.0, 100.0, 100.0);
    let top = add_sized(&mut registry, 10.0, 10.0, 20.0, 20.0);
    assert_eq!(hit(&registry, pt(10.0, 10.0), None).map(|h| h.object_id), Some(top));
}

#[test]
fn unloaded_image_is_not_hittable() {
    let mut registry = Registry::new();
    registry.add(AssetRef::new("/assets/slow.png"), pt(0.0, 0.0), None);
    assert!(hit(&registry, pt(0.0, 0.0), None).is_none());
}

#[test]
fn body_hit_respects_viewport_through_caller() {
    let mut registry = Registry::new();
    let id = add_sized(&mut registry, 0.0, 0.0, 10.0, 10.0);
    let viewport = Viewport { offset: pt(200.0, 200.0), scale: 4.0 };
    let canvas_pt = viewport.screen_to_canvas(pt(215.0, 190.0));
    let found = hit_test(canvas_pt, &registry, &viewport, None, &EngineConfig::default());
    assert_eq!(found.map(|h| h.object_id), Some(id));
}

// =============================================================
// Handles
// =============================================================

#[test]
fn handles_ignored_when_not_selected() {
    let mut registry = Registry::new();
    let id = add_sized(&mut registry, 50.0, 50.0, 40.0, 40.0);
    // SE corner is on the body edge, so only a body hit without selection.
    assert_eq!(hit(&registry, pt(70.0, 70.0), None).map(|h| h.part), Some(HitPart::Body));
    assert_eq!(hit(&registry, pt(70.0, 70.0), Some(id)).map(|h| h.part), Some(HitPart::ResizeHandle(ResizeAnchor::Se)));
}

#[test]
fn resize_handle_reachable_just_outside_box() {
    let mut registry = Registry::new();
    let id = add_sized(&mut registry, 50.0, 50.0, 40.0, 40.0);
    let found = hit(&registry, pt(75.0, 50.0), Some(id));
    assert_eq!(found, Some(Hit { object_id: id, part: HitPart::ResizeHandle(ResizeAnchor::E) }));
}

#[test]
fn delete_handle_sits_above_top_right_corner() {
    let mut registry = Registry::new();
    let id = add_sized(&mut registry, 50.0, 50.0, 40.0, 40.0);
    let b = registry.bounds(&id).unwrap();
    let p = delete_handle_point(&b, &Viewport::default());
    assert_eq!(p, pt(70.0, 30.0 - DELETE_OFFSET_PX));
    assert_eq!(hit(&registry, p, Some(id)).map(|h| h.part), Some(HitPart::DeleteHandle));
}

#[test]
fn handle_radius_is_constant_on_screen() {
    let mut registry = Registry::new();
    let id = add_sized(&mut registry, 0.0, 0.0, 100.0, 100.0);
    let zoomed = Viewport { offset: pt(0.0, 0.0), scale: 4.0 };
    let config = EngineConfig::default();
    // 6 screen px right of the E handle = 1.5 canvas units at scale 4.
    let near = pt(51.5, 0.0);
    let found = hit_test(near, &registry, &zoomed, Some(id), &config);
    assert_eq!(found.map(|h| h.part), Some(HitPart::ResizeHandle(ResizeAnchor::E)));
    // 12 screen px away is outside the 8 px handle.
    let far = pt(53.0, 0.0);
    assert!(hit_test(far, &registry, &zoomed, Some(id), &config).is_none());
}

#[test]
fn selected_handles_beat_images_above() {
    let mut registry = Registry::new();
    let below = add_sized(&mut registry, 0.0, 0.0, 40.0, 40.0);
    add_sized(&mut registry, 20.0, 20.0, 40.0, 40.0);
    let found = hit(&registry, pt(20.0, 20.0), Some(below));
    assert_eq!(found, Some(Hit { object_id: below, part: HitPart::ResizeHandle(ResizeAnchor::Se) }));
}
