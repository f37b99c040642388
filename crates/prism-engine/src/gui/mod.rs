//! GUI-library seam.
//!
//! The immediate-mode GUI library itself is an external collaborator. This
//! module fixes what the surface lifecycle and frame loop need from it: an
//! explicit per-window context handle and a backend-neutral draw-data format.

mod context;
mod draw_data;

pub use context::GuiContext;
pub use draw_data::{ClipRect, DrawCommand, DrawData, DrawList, DrawVertex};
