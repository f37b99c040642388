use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl};
use crate::device::{DeviceInit, SurfaceError, SurfaceManager, WgpuDevice};
use crate::input::platform::winit::{translate_text, translate_window_event};
use crate::input::InputQueue;
use crate::render::WgpuDrawRenderer;
use crate::time::FrameClock;

use super::app_window::AppWindow;
use super::descriptor::WindowDescriptor;
use super::message::{SizeKind, WindowMessage};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "prism".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens one window and drives it until it closes or the app exits.
    pub fn run<A>(config: RuntimeConfig, device_init: DeviceInit, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, device_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        Ok(())
    }
}

type RuntimeWindow<A> =
    AppWindow<WgpuDevice, <A as App>::Gui, InputQueue, WgpuDrawRenderer, <A as App>::Hook>;

/// Fields drop in declaration order: the surface goes before the window it presents to.
struct WindowEntry<A: App> {
    app_window: RuntimeWindow<A>,
    window: Arc<Window>,
}

impl<A: App> WindowEntry<A> {
    fn resize(&mut self, size: PhysicalSize<u32>) -> Result<(), SurfaceError> {
        let kind = size_kind(&self.window, size);
        self.app_window
            .process_message(&WindowMessage::size(kind, size.width, size.height))
            .map(|_| ())
    }

    fn forward_input(&mut self, event: &WindowEvent) -> Result<(), SurfaceError> {
        let modifiers = self.app_window.input().modifiers();

        if let Some(ev) = translate_window_event(modifiers, event) {
            self.app_window.process_message(&WindowMessage::Input(ev))?;
        }
        if let Some(text) = translate_text(modifiers, event) {
            self.app_window.process_message(&WindowMessage::Input(text))?;
        }
        Ok(())
    }
}

fn size_kind(window: &Window, size: PhysicalSize<u32>) -> SizeKind {
    if window.is_minimized() == Some(true) || size.width == 0 || size.height == 0 {
        SizeKind::Minimized
    } else if window.is_maximized() {
        SizeKind::Maximized
    } else {
        SizeKind::Restored
    }
}

struct AppState<A>
where
    A: App + 'static,
{
    config: RuntimeConfig,
    device_init: DeviceInit,
    app: A,

    windows: HashMap<WindowId, WindowEntry<A>>,
    exit_requested: bool,
}

impl<A> AppState<A>
where
    A: App + 'static,
{
    fn new(config: RuntimeConfig, device_init: DeviceInit, app: A) -> Self {
        Self {
            config,
            device_init,
            app,
            windows: HashMap::new(),
            exit_requested: false,
        }
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<WindowId> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );
        let id = window.id();

        let device = pollster::block_on(WgpuDevice::new(window.clone(), self.device_init.clone()))
            .context("GPU initialization failed for window")?;
        let format = device.preferred_format();

        let hook = self.app.create_hook(id, &device);
        let gui = self.app.create_gui(id);

        let size = window.inner_size();
        let mut app_window = AppWindow::new(
            WindowDescriptor::new(window.clone(), size.width, size.height),
            SurfaceManager::new(device, format),
            FrameClock::new(),
            gui,
            InputQueue::new(),
            WgpuDrawRenderer::new(),
            hook,
        );
        app_window
            .show()
            .context("failed to create presentation surface")?;

        log::info!("window {id:?} opened at {}x{}", size.width, size.height);
        self.windows.insert(id, WindowEntry { app_window, window });
        Ok(id)
    }

    fn destroy_window_entry(&mut self, id: WindowId) {
        if self.windows.remove(&id).is_some() {
            log::info!("window {id:?} closed");
        }
        if self.windows.is_empty() {
            self.exit_requested = true;
        }
    }

    fn handle_surface_result(&mut self, id: WindowId, result: Result<(), SurfaceError>) {
        let Err(e) = result else { return };
        let cause = std::error::Error::source(&e)
            .map(|s| format!(" ({s})"))
            .unwrap_or_default();

        if e.is_fatal() {
            log::error!("window {id:?}: {e}{cause}; closing");
            self.destroy_window_entry(id);
        } else {
            log::warn!("window {id:?}: {e}{cause}");
        }
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if !self.windows.is_empty() {
            return;
        }

        if let Err(e) = self.create_window_entry(event_loop) {
            log::error!("failed to create initial window: {e:#}");
            self.exit_requested = true;
            event_loop.exit();
            return;
        }

        for entry in self.windows.values() {
            entry.window.request_redraw();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw; minimized windows skip the frame themselves.
        for entry in self.windows.values() {
            entry.window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let Some(entry) = self.windows.get_mut(&window_id) else {
            return;
        };

        if self.app.on_window_event(window_id, &event) == AppControl::Exit {
            self.exit_requested = true;
            event_loop.exit();
            return;
        }

        let result = match &event {
            WindowEvent::CloseRequested => {
                self.destroy_window_entry(window_id);
                Ok(())
            }

            WindowEvent::Resized(new_size) => {
                let result = entry.resize(*new_size);
                entry.window.request_redraw();
                result
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = entry.window.inner_size();
                entry.resize(new_size)
            }

            WindowEvent::RedrawRequested => {
                let app = &mut self.app;
                let mut control = AppControl::Continue;

                let result = entry
                    .app_window
                    .update_and_draw(|gui| control = app.build_ui(window_id, gui))
                    .map(|_| ());

                if control == AppControl::Exit {
                    self.exit_requested = true;
                }
                result
            }

            other => entry.forward_input(other),
        };

        self.handle_surface_result(window_id, result);

        if self.exit_requested {
            event_loop.exit();
        }
    }
}
