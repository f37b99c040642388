mod gui;
mod overlay;

use std::collections::HashMap;

use prism_engine::core::{App, AppControl};
use prism_engine::device::{DeviceInit, WgpuDevice};
use prism_engine::logging::{init_logging, LoggingConfig};
use prism_engine::window::{Runtime, RuntimeConfig};
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowId;

use gui::StudioGui;
use overlay::{CursorOverlay, SharedCursor};

#[derive(Default)]
struct Studio {
    cursors: HashMap<WindowId, SharedCursor>,
    show_graph: bool,
    frames: u64,
}

impl Studio {
    fn cursor(&mut self, id: WindowId) -> SharedCursor {
        self.cursors.entry(id).or_default().clone()
    }
}

impl App for Studio {
    type Gui = StudioGui;
    type Hook = CursorOverlay;

    fn create_gui(&mut self, _window_id: WindowId) -> StudioGui {
        StudioGui::new()
    }

    fn create_hook(&mut self, window_id: WindowId, _device: &WgpuDevice) -> CursorOverlay {
        CursorOverlay::new(self.cursor(window_id))
    }

    fn on_window_event(&mut self, window_id: WindowId, event: &WindowEvent) -> AppControl {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor(window_id)
                    .set(Some([position.x as f32, position.y as f32]));
            }
            WindowEvent::CursorLeft { .. } => self.cursor(window_id).set(None),
            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed
                    && event.physical_key == PhysicalKey::Code(KeyCode::Escape) =>
            {
                return AppControl::Exit;
            }
            _ => {}
        }
        AppControl::Continue
    }

    fn build_ui(&mut self, _window_id: WindowId, gui: &mut StudioGui) -> AppControl {
        self.frames += 1;
        if self.frames % 600 == 0 {
            log::debug!("frame {} (dt {:.2} ms)", self.frames, gui.delta_time() * 1000.0);
        }

        gui.panel([20.0, 20.0], [360.0, 200.0]);
        if gui.button([36.0, 36.0], [96.0, 60.0], self.show_graph) {
            self.show_graph = !self.show_graph;
            log::info!("frame graph {}", if self.show_graph { "shown" } else { "hidden" });
        }
        if self.show_graph {
            gui.frame_graph([36.0, 76.0], [344.0, 184.0]);
        }

        AppControl::Continue
    }
}

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig {
        title: "Prism Studio".to_string(),
        initial_size: LogicalSize::new(1280.0, 800.0),
    };
    let device_init = DeviceInit {
        alpha_mode: Some(wgpu::CompositeAlphaMode::Opaque),
        ..DeviceInit::default()
    };

    let studio = Studio {
        show_graph: true,
        ..Studio::default()
    };
    Runtime::run(config, device_init, studio)
}
