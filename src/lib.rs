//! Canvas-state engine for an image drop board.
//!
//! Thumbnails are dragged from a tray onto a pannable, zoomable canvas, where
//! the placed images can be selected, moved, resized, and deleted. The crate
//! compiles to WebAssembly and runs in the browser; the host page only wires
//! DOM events into the engine and carries out the [`engine::Action`]s it
//! returns (cursor changes, asset loads, redraws).
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`registry`] | Ordered store of placed-image records |
//! | [`assets`] | Load status and natural size of each image asset |
//! | [`selection`] | The single selected record |
//! | [`viewport`] | Pan/zoom viewport and coordinate conversions |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`hit`] | Hit-testing against placed images and their handles |
//! | [`render`] | Scene projection and 2D-context painting |
//! | [`config`] | Engine tunables |
//! | [`error`] | Error taxonomy |
//! | [`consts`] | Shared numeric constants (zoom limits, minimum sizes, etc.) |

pub mod assets;
pub mod config;
pub mod consts;
pub mod engine;
pub mod error;
pub mod hit;
pub mod input;
pub mod registry;
pub mod render;
pub mod selection;
pub mod viewport;
