//! Placed-image registry: the ordered, single source of truth for what is on
//! the canvas.
//!
//! Records are plain values addressed by a stable [`ObjectId`]. Their index
//! in the sequence is derived, never stored: it is the draw order (first is
//! bottom-most) and shifts down when an earlier record is removed. The
//! interaction engine computes the next state of a record and hands it here;
//! nothing outside the registry holds a mutable handle to a record.

#[cfg(test)]
#[path = "registry_test.rs"]
mod registry_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CanvasError;
use crate::viewport::Point;

/// Unique identifier for a placed image.
pub type ObjectId = Uuid;

/// Identifier of a source image, typically its URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetRef(pub String);

impl AssetRef {
    #[must_use]
    pub fn new(src: impl Into<String>) -> Self {
        Self(src.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Width and height in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Floor both dimensions at `min`. Non-finite dimensions become `min`.
    #[must_use]
    pub fn floored(self, min: f64) -> Self {
        Self { width: floor_dim(self.width, min), height: floor_dim(self.height, min) }
    }
}

fn floor_dim(value: f64, min: f64) -> f64 {
    if value.is_finite() { value.max(min) } else { min }
}

/// Axis-aligned box described by its center, as placed images are.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub center: Point,
    pub size: Size,
}

impl Bounds {
    #[must_use]
    pub fn new(center: Point, size: Size) -> Self {
        Self { center, size }
    }

    /// Build from edge coordinates. Inverted edges produce a negative size.
    #[must_use]
    pub fn from_edges(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            center: Point::new((left + right) / 2.0, (top + bottom) / 2.0),
            size: Size::new(right - left, bottom - top),
        }
    }

    #[must_use]
    pub fn left(&self) -> f64 {
        self.center.x - self.size.width / 2.0
    }

    #[must_use]
    pub fn top(&self) -> f64 {
        self.center.y - self.size.height / 2.0
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.center.x + self.size.width / 2.0
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.center.y + self.size.height / 2.0
    }

    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.left() && pt.x <= self.right() && pt.y >= self.top() && pt.y <= self.bottom()
    }
}

/// One image placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedImage {
    /// Stable identifier, assigned on add.
    pub id: ObjectId,
    /// Source image this record draws.
    pub asset: AssetRef,
    /// Geometric center in canvas coordinates.
    pub position: Point,
    /// Display size; `None` until the asset's natural size is known.
    pub size: Option<Size>,
}

impl PlacedImage {
    /// The record's box, if its size is known.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        self.size.map(|size| Bounds::new(self.position, size))
    }
}

/// Ordered store of placed images.
#[derive(Debug, Default)]
pub struct Registry {
    records: Vec<PlacedImage>,
}

impl Registry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { records: Vec::new() }
    }

    /// Append a record on top of everything else and return its id.
    pub fn add(&mut self, asset: AssetRef, position: Point, size: Option<Size>) -> ObjectId {
        let id = Uuid::new_v4();
        self.records.push(PlacedImage { id, asset, position, size });
        id
    }

    /// Replace the center of a record.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no record has this id.
    pub fn move_to(&mut self, id: &ObjectId, position: Point) -> Result<(), CanvasError> {
        let record = self.get_mut(id)?;
        record.position = position;
        Ok(())
    }

    /// Apply a finished resize gesture: scale the current size by the
    /// gesture's factors (1.0 = unchanged), floor each dimension at `min`,
    /// and move the center to `center`. Returns the new size.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no record has this id, or `UnresolvedAsset` if
    /// the record has no size yet.
    pub fn resize(
        &mut self,
        id: &ObjectId,
        center: Point,
        scale_x: f64,
        scale_y: f64,
        min: f64,
    ) -> Result<Size, CanvasError> {
        let record = self.get_mut(id)?;
        let Some(size) = record.size else {
            return Err(CanvasError::UnresolvedAsset(*id));
        };
        let resized = Size::new(size.width * scale_x, size.height * scale_y).floored(min);
        record.size = Some(resized);
        record.position = center;
        Ok(resized)
    }

    /// Remove a record, shifting every later record down one index.
    pub fn remove(&mut self, id: &ObjectId) -> Option<PlacedImage> {
        let index = self.index_of(id)?;
        Some(self.records.remove(index))
    }

    /// Remove the record at a structural index, if in range.
    pub fn remove_at(&mut self, index: usize) -> Option<PlacedImage> {
        if index < self.records.len() { Some(self.records.remove(index)) } else { None }
    }

    /// Give every unsized record of `asset` its natural size, floored at
    /// `min`. Returns the ids that changed.
    pub fn resolve_asset(&mut self, asset: &AssetRef, natural: Size, min: f64) -> Vec<ObjectId> {
        let size = natural.floored(min);
        self.records
            .iter_mut()
            .filter(|r| r.size.is_none() && &r.asset == asset)
            .map(|r| {
                r.size = Some(size);
                r.id
            })
            .collect()
    }

    #[must_use]
    pub fn get(&self, id: &ObjectId) -> Option<&PlacedImage> {
        self.records.iter().find(|r| &r.id == id)
    }

    /// Draw-order index of a record.
    #[must_use]
    pub fn index_of(&self, id: &ObjectId) -> Option<usize> {
        self.records.iter().position(|r| &r.id == id)
    }

    /// The record's box, if present and sized.
    #[must_use]
    pub fn bounds(&self, id: &ObjectId) -> Option<Bounds> {
        self.get(id).and_then(PlacedImage::bounds)
    }

    /// Records in draw order, bottom first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &PlacedImage> {
        self.records.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn get_mut(&mut self, id: &ObjectId) -> Result<&mut PlacedImage, CanvasError> {
        self.records.iter_mut().find(|r| &r.id == id).ok_or(CanvasError::NotFound(*id))
    }
}
