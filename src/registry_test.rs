#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// Helpers
// =============================================================

fn asset(name: &str) -> AssetRef {
    AssetRef::new(format!("/assets/{name}.jpeg"))
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn sized(registry: &mut Registry, x: f64, y: f64, w: f64, h: f64) -> ObjectId {
    registry.add(asset("beer"), pt(x, y), Some(Size::new(w, h)))
}

// =============================================================
// add
// =============================================================

#[test]
fn new_registry_is_empty() {
    let registry = Registry::new();
    assert!(registry.is_empty());
    assert_eq!(registry.len(), 0);
}

#[test]
fn add_appends_in_order() {
    let mut registry = Registry::new();
    let a = registry.add(asset("beer"), pt(0.0, 0.0), None);
    let b = registry.add(asset("gokart"), pt(10.0, 10.0), None);
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.index_of(&a), Some(0));
    assert_eq!(registry.index_of(&b), Some(1));
    let order: Vec<ObjectId> = registry.iter().map(|r| r.id).collect();
    assert_eq!(order, vec![a, b]);
}

#[test]
fn add_stores_asset_and_position() {
    let mut registry = Registry::new();
    let id = registry.add(asset("beer"), pt(100.0, 100.0), None);
    let record = registry.get(&id).unwrap();
    assert_eq!(record.asset, asset("beer"));
    assert_eq!(record.position, pt(100.0, 100.0));
    assert!(record.size.is_none());
    assert!(record.bounds().is_none());
}

#[test]
fn add_same_position_twice_gives_distinct_ids() {
    let mut registry = Registry::new();
    let a = registry.add(asset("beer"), pt(5.0, 5.0), None);
    let b = registry.add(asset("beer"), pt(5.0, 5.0), None);
    assert_ne!(a, b);
    assert_eq!(registry.len(), 2);
}

// =============================================================
// move_to
// =============================================================

#[test]
fn move_to_replaces_position() {
    let mut registry = Registry::new();
    let id = sized(&mut registry, 0.0, 0.0, 40.0, 40.0);
    registry.move_to(&id, pt(-3.0, 12.5)).unwrap();
    assert_eq!(registry.get(&id).unwrap().position, pt(-3.0, 12.5));
    assert_eq!(registry.get(&id).unwrap().size, Some(Size::new(40.0, 40.0)));
}

#[test]
fn move_to_missing_is_not_found_and_changes_nothing() {
    let mut registry = Registry::new();
    let id = sized(&mut registry, 1.0, 1.0, 40.0, 40.0);
    let stale = Uuid::new_v4();
    let err = registry.move_to(&stale, pt(9.0, 9.0)).unwrap_err();
    assert!(matches!(err, CanvasError::NotFound(x) if x == stale));
    assert_eq!(registry.get(&id).unwrap().position, pt(1.0, 1.0));
}

// =============================================================
// resize
// =============================================================

#[test]
fn resize_scales_and_recenters() {
    let mut registry = Registry::new();
    let id = sized(&mut registry, 0.0, 0.0, 40.0, 20.0);
    let size = registry.resize(&id, pt(10.0, 5.0), 1.5, 2.0, 5.0).unwrap();
    assert_eq!(size, Size::new(60.0, 40.0));
    let record = registry.get(&id).unwrap();
    assert_eq!(record.size, Some(size));
    assert_eq!(record.position, pt(10.0, 5.0));
}

#[test]
fn resize_tiny_scale_clamps_to_floor() {
    let mut registry = Registry::new();
    let id = sized(&mut registry, 0.0, 0.0, 40.0, 40.0);
    let size = registry.resize(&id, pt(0.0, 0.0), 0.01, 0.01, 5.0).unwrap();
    assert_eq!(size, Size::new(5.0, 5.0));
}

#[test]
fn resize_floors_both_dimensions_for_any_factor() {
    let factors = [0.0, -1.0, -250.0, 1e-12, f64::NAN, f64::NEG_INFINITY, f64::INFINITY];
    for sx in factors {
        for sy in factors {
            let mut registry = Registry::new();
            let id = sized(&mut registry, 0.0, 0.0, 40.0, 30.0);
            let size = registry.resize(&id, pt(0.0, 0.0), sx, sy, 5.0).unwrap();
            assert!(size.width >= 5.0 && size.width.is_finite(), "sx={sx} gave {size:?}");
            assert!(size.height >= 5.0 && size.height.is_finite(), "sy={sy} gave {size:?}");
        }
    }
}

#[test]
fn resize_height_only_below_floor_clamps_height() {
    let mut registry = Registry::new();
    let id = sized(&mut registry, 0.0, 0.0, 40.0, 40.0);
    let size = registry.resize(&id, pt(0.0, 0.0), 1.0, 0.05, 5.0).unwrap();
    assert_eq!(size, Size::new(40.0, 5.0));
}

#[test]
fn resize_identity_keeps_size() {
    let mut registry = Registry::new();
    let id = sized(&mut registry, 0.0, 0.0, 33.0, 44.0);
    let size = registry.resize(&id, pt(0.0, 0.0), 1.0, 1.0, 5.0).unwrap();
    assert_eq!(size, Size::new(33.0, 44.0));
}

#[test]
fn resize_unsized_record_is_unresolved() {
    let mut registry = Registry::new();
    let id = registry.add(asset("beer"), pt(0.0, 0.0), None);
    let err = registry.resize(&id, pt(1.0, 1.0), 2.0, 2.0, 5.0).unwrap_err();
    assert!(matches!(err, CanvasError::UnresolvedAsset(_)));
    assert_eq!(registry.get(&id).unwrap().position, pt(0.0, 0.0));
}

#[test]
fn resize_missing_is_not_found() {
    let mut registry = Registry::new();
    let err = registry.resize(&Uuid::new_v4(), pt(0.0, 0.0), 1.0, 1.0, 5.0).unwrap_err();
    assert!(matches!(err, CanvasError::NotFound(_)));
}

// =============================================================
// remove
// =============================================================

#[test]
fn remove_splices_and_shifts_later_records() {
    let mut registry = Registry::new();
    let a = sized(&mut registry, 0.0, 0.0, 10.0, 10.0);
    let b = sized(&mut registry, 1.0, 0.0, 10.0, 10.0);
    let c = sized(&mut registry, 2.0, 0.0, 10.0, 10.0);

    let removed = registry.remove(&b).unwrap();
    assert_eq!(removed.id, b);
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.index_of(&a), Some(0));
    assert_eq!(registry.index_of(&c), Some(1));
    assert!(registry.get(&b).is_none());
}

#[test]
fn remove_missing_returns_none() {
    let mut registry = Registry::new();
    sized(&mut registry, 0.0, 0.0, 10.0, 10.0);
    assert!(registry.remove(&Uuid::new_v4()).is_none());
    assert_eq!(registry.len(), 1);
}

#[test]
fn remove_unsized_record_removes_it_outright() {
    let mut registry = Registry::new();
    let id = registry.add(asset("beer"), pt(0.0, 0.0), None);
    assert!(registry.remove(&id).is_some());
    assert!(registry.is_empty());
    assert!(registry.resolve_asset(&asset("beer"), Size::new(64.0, 48.0), 5.0).is_empty());
}

#[test]
fn remove_at_out_of_range_is_none() {
    let mut registry = Registry::new();
    let a = sized(&mut registry, 0.0, 0.0, 10.0, 10.0);
    assert!(registry.remove_at(3).is_none());
    assert_eq!(registry.remove_at(0).map(|r| r.id), Some(a));
    assert!(registry.remove_at(0).is_none());
}

#[test]
fn length_tracks_adds_minus_effective_removes() {
    let mut registry = Registry::new();
    let mut ids = Vec::new();
    let mut adds = 0usize;
    let mut effective_removes = 0usize;
    for step in 0..40u32 {
        match step % 5 {
            0 | 1 | 3 => {
                ids.push(sized(&mut registry, f64::from(step), 0.0, 20.0, 20.0));
                adds += 1;
            }
            2 => {
                let target = ids[ids.len() / 2];
                if registry.remove(&target).is_some() {
                    effective_removes += 1;
                }
                // Removing the same id again must not count.
                assert!(registry.remove(&target).is_none());
            }
            _ => {
                let target = ids[0];
                let moved = registry.move_to(&target, pt(1.0, 1.0));
                let resized = registry.resize(&target, pt(1.0, 1.0), 0.5, 0.5, 5.0);
                assert_eq!(moved.is_ok(), resized.is_ok());
            }
        }
        assert_eq!(registry.len(), adds - effective_removes);
    }
}

// =============================================================
// resolve_asset
// =============================================================

#[test]
fn resolve_asset_sizes_only_matching_unsized_records() {
    let mut registry = Registry::new();
    let beer_a = registry.add(asset("beer"), pt(0.0, 0.0), None);
    let kart = registry.add(asset("gokart"), pt(0.0, 0.0), None);
    let beer_b = registry.add(asset("beer"), pt(0.0, 0.0), Some(Size::new(12.0, 12.0)));

    let resolved = registry.resolve_asset(&asset("beer"), Size::new(320.0, 240.0), 5.0);
    assert_eq!(resolved, vec![beer_a]);
    assert_eq!(registry.get(&beer_a).unwrap().size, Some(Size::new(320.0, 240.0)));
    assert!(registry.get(&kart).unwrap().size.is_none());
    assert_eq!(registry.get(&beer_b).unwrap().size, Some(Size::new(12.0, 12.0)));
}

#[test]
fn resolve_asset_floors_tiny_natural_size() {
    let mut registry = Registry::new();
    let id = registry.add(asset("pixel"), pt(0.0, 0.0), None);
    registry.resolve_asset(&asset("pixel"), Size::new(1.0, 0.0), 5.0);
    assert_eq!(registry.get(&id).unwrap().size, Some(Size::new(5.0, 5.0)));
}

// =============================================================
// Bounds
// =============================================================

#[test]
fn bounds_are_center_anchored() {
    let b = Bounds::new(pt(50.0, 40.0), Size::new(20.0, 10.0));
    assert_eq!(b.left(), 40.0);
    assert_eq!(b.right(), 60.0);
    assert_eq!(b.top(), 35.0);
    assert_eq!(b.bottom(), 45.0);
    assert!(b.contains(pt(40.0, 35.0)));
    assert!(!b.contains(pt(39.9, 40.0)));
}

#[test]
fn bounds_from_edges_round_trips() {
    let b = Bounds::from_edges(-10.0, 0.0, 30.0, 20.0);
    assert_eq!(b.center, pt(10.0, 10.0));
    assert_eq!(b.size, Size::new(40.0, 20.0));
}

#[test]
fn asset_ref_serializes_as_plain_string() {
    let json = serde_json::to_string(&asset("beer")).unwrap();
    assert_eq!(json, "\"/assets/beer.jpeg\"");
}
