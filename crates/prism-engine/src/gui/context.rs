use crate::coords::Viewport;
use crate::input::InputEvent;

use super::draw_data::DrawData;

/// One GUI-library context, owned by one window.
///
/// Libraries that keep process-global state switch to this context in
/// `make_current`; libraries with fully explicit state can make it a no-op.
/// Every window entry point calls `make_current` before any other method, and
/// a window's whole frame completes before another window's frame begins.
pub trait GuiContext {
    /// Selects this context as the library's active one.
    fn make_current(&mut self);

    /// Per-frame timing input, in seconds.
    fn set_delta_time(&mut self, dt: f32);

    /// Display geometry, kept equal to the live surface's pixel size.
    fn set_display_size(&mut self, size: Viewport);

    fn display_size(&self) -> Viewport;

    /// Feeds one translated input event to the library.
    fn push_input(&mut self, event: InputEvent);

    /// Starts collecting draw commands for a new frame.
    fn new_frame(&mut self);

    /// Finalizes the frame's draw data.
    fn render(&mut self);

    /// Draw data finalized by the last `render` call.
    fn draw_data(&self) -> &DrawData;

    /// Whether the library is currently consuming pointer input.
    fn wants_capture_mouse(&self) -> bool {
        false
    }

    /// Whether the library is currently consuming keyboard/text input.
    fn wants_capture_keyboard(&self) -> bool {
        false
    }
}
