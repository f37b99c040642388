//! Frame rendering.
//!
//! `RenderLoop` sequences one frame against the surface manager and the GUI
//! context. Renderers own their own GPU resources (pipelines, buffers).
//!
//! Convention:
//! - draw data is in display pixels (top-left origin, +Y down)
//! - the vertex shader converts to NDC using a viewport uniform

mod frame_loop;
mod gui_renderer;

pub use frame_loop::{DrawDataRenderer, ExtensionHook, FrameResources, NoHook, RenderLoop, DEFAULT_CLEAR_COLOR};
pub use gui_renderer::WgpuDrawRenderer;
