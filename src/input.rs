//! Input model: mouse buttons, modifier keys, cursors, and the gesture state machine.
//!
//! `InputState` is the active gesture being tracked between pointer-down and
//! pointer-up. Drag and resize gestures carry a preview of the record's next
//! state; the registry is only written when the gesture ends.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::hit::ResizeAnchor;
use crate::registry::{AssetRef, Bounds, ObjectId};
use crate::selection::Selection;
use crate::viewport::Point;

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

/// Mouse button identifier. Touch contacts arrive as `Primary`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// A keyboard key, holding the name the browser reports (e.g. `"Delete"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// Pointer cursor the host should show over the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    /// Over an unselected image or the delete control.
    Pointer,
    /// Over the selected image.
    Move,
    /// While panning the canvas.
    Grabbing,
    NsResize,
    EwResize,
    NeswResize,
    NwseResize,
}

impl Cursor {
    /// The CSS `cursor` value.
    #[must_use]
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Pointer => "pointer",
            Self::Move => "move",
            Self::Grabbing => "grabbing",
            Self::NsResize => "ns-resize",
            Self::EwResize => "ew-resize",
            Self::NeswResize => "nesw-resize",
            Self::NwseResize => "nwse-resize",
        }
    }
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// The single selected image, if any.
    pub selection: Selection,
    /// Cursor last sent to the host.
    pub cursor: Cursor,
    /// Asset picked up from the thumbnail tray and not yet dropped.
    pub pending_asset: Option<AssetRef>,
}

/// Internal state for the input state machine.
///
/// Each active variant carries gesture context needed to compute deltas and
/// emit final actions on pointer-up.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is panning the canvas by dragging the background.
    Panning {
        /// Screen-space position of the previous pointer event, used to compute pan delta.
        last_screen: Point,
    },
    /// The user is moving a placed image.
    DraggingImage {
        /// Id of the image being dragged.
        id: ObjectId,
        /// Pointer position minus image center at pointer-down, in canvas units.
        grab: Point,
        /// Live center; written to the registry on release.
        center: Point,
        /// Whether the pointer has moved since pointer-down.
        moved: bool,
    },
    /// The user is resizing the selected image by one of its eight handles.
    ResizingImage {
        /// Id of the image being resized.
        id: ObjectId,
        /// Which corner/edge handle is being dragged.
        anchor: ResizeAnchor,
        /// Canvas-space pointer position at the start of the resize.
        start: Point,
        /// Box at the start of the gesture; scale factors are relative to it.
        orig: Bounds,
        /// Last accepted box; written to the registry on release.
        current: Bounds,
    },
}

impl InputState {
    /// Preview box for `id` while it is being dragged or resized.
    #[must_use]
    pub fn preview(&self, id: &ObjectId, committed: Bounds) -> Bounds {
        match self {
            Self::DraggingImage { id: drag_id, center, .. } if drag_id == id => Bounds::new(*center, committed.size),
            Self::ResizingImage { id: resize_id, current, .. } if resize_id == id => *current,
            _ => committed,
        }
    }
}
