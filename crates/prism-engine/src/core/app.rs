use winit::event::WindowEvent;
use winit::window::WindowId;

use crate::device::WgpuDevice;
use crate::gui::GuiContext;
use crate::render::ExtensionHook;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
///
/// The runtime owns windows, surfaces and clocks; the app supplies one GUI
/// context and one extension hook per window and issues GUI calls each frame.
pub trait App {
    /// Immediate-mode GUI context driven for each window.
    type Gui: GuiContext;

    /// Extra drawing run after GUI content, before present.
    type Hook: ExtensionHook<WgpuDevice>;

    /// Creates the GUI context for a newly opened window.
    fn create_gui(&mut self, window_id: WindowId) -> Self::Gui;

    fn create_hook(&mut self, window_id: WindowId, device: &WgpuDevice) -> Self::Hook;

    /// Called for every window event before the runtime handles it.
    fn on_window_event(&mut self, window_id: WindowId, event: &WindowEvent) -> AppControl {
        let _ = (window_id, event);
        AppControl::Continue
    }

    /// Issues this frame's GUI calls, between `new_frame` and `render`.
    fn build_ui(&mut self, window_id: WindowId, gui: &mut Self::Gui) -> AppControl;
}
