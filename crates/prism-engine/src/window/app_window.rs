use crate::coords::Viewport;
use crate::device::{GraphicsDevice, SurfaceError, SurfaceManager};
use crate::gui::GuiContext;
use crate::input::InputHandler;
use crate::render::{DrawDataRenderer, ExtensionHook, FrameResources, RenderLoop};
use crate::time::{FrameClock, FrameTime, Stopwatch, TimeSource};

use super::descriptor::WindowDescriptor;
use super::message::{hiword, loword, SizeKind, WindowMessage};

/// Outcome of `AppWindow::update_and_draw`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum FrameStatus {
    Rendered(FrameTime),
    /// Window is minimized or has no client area; nothing was touched.
    Skipped,
}

/// One on-screen window: its descriptor, surface, clock and GUI context.
///
/// Every entry point selects this window's GUI context before doing anything
/// else, so several windows can share a GUI library with global state as long
/// as their calls do not interleave.
pub struct AppWindow<D, C, I, R, H, T = Stopwatch>
where
    D: GraphicsDevice,
    T: TimeSource,
{
    descriptor: WindowDescriptor<D::Window>,
    surface: SurfaceManager<D>,
    clock: FrameClock<T>,
    gui: C,
    input: I,
    renderer: R,
    hook: H,
    render_loop: RenderLoop,
}

impl<D, C, I, R, H, T> AppWindow<D, C, I, R, H, T>
where
    D: GraphicsDevice,
    C: GuiContext,
    I: InputHandler<C>,
    R: DrawDataRenderer<D>,
    H: ExtensionHook<D>,
    T: TimeSource,
{
    /// Wires a window together and publishes its initial display size.
    ///
    /// The surface stays uninitialized until `show` or the first restore/maximize message.
    pub fn new(
        descriptor: WindowDescriptor<D::Window>,
        surface: SurfaceManager<D>,
        clock: FrameClock<T>,
        mut gui: C,
        input: I,
        renderer: R,
        hook: H,
    ) -> Self {
        gui.make_current();
        gui.set_display_size(Viewport::from_pixels(descriptor.width, descriptor.height));

        Self {
            descriptor,
            surface,
            clock,
            gui,
            input,
            renderer,
            hook,
            render_loop: RenderLoop::new(),
        }
    }

    pub fn with_render_loop(mut self, render_loop: RenderLoop) -> Self {
        self.render_loop = render_loop;
        self
    }

    pub fn descriptor(&self) -> &WindowDescriptor<D::Window> {
        &self.descriptor
    }

    pub fn surface(&self) -> &SurfaceManager<D> {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut SurfaceManager<D> {
        &mut self.surface
    }

    pub fn gui(&self) -> &C {
        &self.gui
    }

    pub fn gui_mut(&mut self) -> &mut C {
        self.gui.make_current();
        &mut self.gui
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn clock(&self) -> &FrameClock<T> {
        &self.clock
    }

    pub fn render_loop(&self) -> &RenderLoop {
        &self.render_loop
    }

    /// Issues the implicit first resize at the descriptor's current size.
    pub fn show(&mut self) -> Result<(), SurfaceError> {
        self.gui.make_current();

        if !self.descriptor.is_renderable() {
            log::debug!("show deferred: window has no client area");
            return Ok(());
        }

        self.surface.ensure_surface(
            &self.descriptor.handle,
            self.descriptor.width,
            self.descriptor.height,
            &mut self.gui,
        )
    }

    /// Handles one window-system message.
    ///
    /// Returns `Ok(true)` when the input handler claimed the message, in which
    /// case nothing else happens. Restore/maximize with a new size (or before
    /// the surface is live) rebuilds the surface; an unchanged size does not.
    /// Minimize only sets the flag.
    pub fn process_message(&mut self, message: &WindowMessage) -> Result<bool, SurfaceError> {
        self.gui.make_current();

        if self.input.process_message(&mut self.gui, message) {
            return Ok(true);
        }

        if let WindowMessage::Size { kind, packed } = *message {
            let (width, height) = (loword(packed), hiword(packed));

            match kind {
                SizeKind::Minimized => self.descriptor.minimized = true,
                SizeKind::Restored | SizeKind::Maximized if width == 0 || height == 0 => {
                    self.descriptor.minimized = true;
                }
                SizeKind::Restored | SizeKind::Maximized => {
                    self.descriptor.minimized = false;
                    self.resize_to(width, height)?;
                }
            }
        }

        Ok(false)
    }

    fn resize_to(&mut self, width: u32, height: u32) -> Result<(), SurfaceError> {
        let unchanged = self.surface.size() == Some((width, height));

        self.descriptor.width = width;
        self.descriptor.height = height;

        if unchanged {
            log::trace!("size notification {width}x{height} unchanged; surface kept");
            return Ok(());
        }

        self.surface
            .ensure_surface(&self.descriptor.handle, width, height, &mut self.gui)
    }

    /// Runs one frame unless the window is minimized.
    ///
    /// `ui` issues this frame's GUI calls between `new_frame` and `render`.
    pub fn update_and_draw<U>(&mut self, ui: U) -> Result<FrameStatus, SurfaceError>
    where
        U: FnOnce(&mut C),
    {
        if !self.descriptor.is_renderable() {
            return Ok(FrameStatus::Skipped);
        }

        let time = self.render_loop.run_frame(
            FrameResources {
                surface: &mut self.surface,
                clock: &mut self.clock,
                gui: &mut self.gui,
                input: &mut self.input,
                renderer: &mut self.renderer,
                hook: &mut self.hook,
            },
            ui,
        )?;

        Ok(FrameStatus::Rendered(time))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::device::{PresentFormat, RenderTargetView, SurfacePhase};
    use crate::input::{InputEvent, InputQueue, MouseButton};
    use crate::testing::{Call, CallLog, MockDevice, MockGui, MockRenderer, RecordingHook};
    use crate::time::ManualTime;

    type TestWindow = AppWindow<MockDevice, MockGui, InputQueue, MockRenderer, RecordingHook, ManualTime>;

    fn window(log: &CallLog, time: &ManualTime, width: u32, height: u32) -> TestWindow {
        AppWindow::new(
            WindowDescriptor::new(3, width, height),
            SurfaceManager::new(MockDevice::new(log.clone()), PresentFormat::Rgba8Unorm),
            FrameClock::with_source(time.clone()),
            MockGui::new(log.clone()),
            InputQueue::new(),
            MockRenderer::new(log.clone()),
            RecordingHook::new(log.clone()),
        )
    }

    fn ensure_count(log: &CallLog) -> usize {
        log.count(|c| {
            matches!(c, Call::CreateSwapChain { .. } | Call::ResizeBuffers { .. })
        })
    }

    #[test]
    fn construction_publishes_size_without_surface() {
        let log = CallLog::default();
        let w = window(&log, &ManualTime::new(), 800, 600);

        assert_eq!(w.gui().display_size(), Viewport::new(800.0, 600.0));
        assert_eq!(w.surface().phase(), SurfacePhase::Uninitialized);
        assert_eq!(log.take(), vec![Call::MakeCurrent, Call::SetDisplaySize(800, 600)]);
    }

    #[test]
    fn end_to_end_scenario() {
        let log = CallLog::default();
        let time = ManualTime::new();
        let mut w = window(&log, &time, 800, 600);

        w.show().unwrap();
        assert!(w.surface().is_live());
        assert_eq!(w.surface().current_render_target().map(|v| v.size()).ok(), Some((800, 600)));

        log.take();
        w.process_message(&WindowMessage::size(SizeKind::Restored, 1024, 768))
            .unwrap();

        let calls = log.take();
        assert_eq!(calls.iter().filter(|c| **c == Call::ReleaseView { buffer: 1 }).count(), 1);
        assert_eq!(calls.iter().filter(|c| **c == Call::ReleaseBackBuffer { id: 1 }).count(), 1);
        assert_eq!(w.surface().size(), Some((1024, 768)));
        assert_eq!(w.gui().display_size(), Viewport::new(1024.0, 768.0));
        assert_eq!(w.descriptor().size(), (1024, 768));

        time.advance(Duration::from_millis(16));
        let status = w.update_and_draw(|gui| gui.queue_rect()).unwrap();
        assert!(matches!(status, FrameStatus::Rendered(t) if t.frame_index == 0));

        let order: Vec<Call> = log
            .take()
            .into_iter()
            .filter(|c| {
                matches!(
                    c,
                    Call::SetDeltaTime(_)
                        | Call::NewFrame
                        | Call::Bind { .. }
                        | Call::Clear { .. }
                        | Call::SubmitDrawData { .. }
                        | Call::Hook { .. }
                        | Call::Present { .. }
                )
            })
            .collect();
        assert_eq!(
            order,
            vec![
                Call::SetDeltaTime(Duration::from_millis(16).as_secs_f32()),
                Call::NewFrame,
                Call::Bind { buffer: 2 },
                Call::Clear {
                    buffer: 2,
                    color: crate::render::DEFAULT_CLEAR_COLOR.to_array(),
                },
                Call::SubmitDrawData { buffer: 2, indices: 6 },
                Call::Hook { buffer: 2 },
                Call::Present { sync_interval: 1 },
            ]
        );
    }

    #[test]
    fn minimize_then_restore_same_size_keeps_surface() {
        let log = CallLog::default();
        let mut w = window(&log, &ManualTime::new(), 800, 600);
        w.show().unwrap();
        assert_eq!(ensure_count(&log), 1);

        w.process_message(&WindowMessage::size(SizeKind::Minimized, 0, 0))
            .unwrap();
        assert!(w.descriptor().minimized);
        assert_eq!(w.descriptor().size(), (800, 600));

        w.process_message(&WindowMessage::size(SizeKind::Restored, 800, 600))
            .unwrap();
        assert!(!w.descriptor().minimized);
        assert_eq!(ensure_count(&log), 1);

        w.process_message(&WindowMessage::size(SizeKind::Maximized, 1920, 1080))
            .unwrap();
        assert_eq!(ensure_count(&log), 2);
    }

    #[test]
    fn first_restore_creates_surface_even_at_descriptor_size() {
        let log = CallLog::default();
        let mut w = window(&log, &ManualTime::new(), 800, 600);

        w.process_message(&WindowMessage::size(SizeKind::Restored, 800, 600))
            .unwrap();

        assert!(w.surface().is_live());
        assert_eq!(ensure_count(&log), 1);
    }

    #[test]
    fn zero_size_restore_counts_as_minimized() {
        let log = CallLog::default();
        let mut w = window(&log, &ManualTime::new(), 800, 600);
        w.show().unwrap();

        w.process_message(&WindowMessage::size(SizeKind::Restored, 0, 0))
            .unwrap();

        assert!(w.descriptor().minimized);
        assert_eq!(ensure_count(&log), 1);
    }

    #[test]
    fn frames_are_skipped_while_minimized() {
        let log = CallLog::default();
        let mut w = window(&log, &ManualTime::new(), 800, 600);
        w.show().unwrap();
        w.process_message(&WindowMessage::size(SizeKind::Minimized, 0, 0))
            .unwrap();
        log.take();

        assert_eq!(w.update_and_draw(|_| {}).unwrap(), FrameStatus::Skipped);
        assert!(log.take().is_empty());
    }

    #[test]
    fn frame_before_show_is_not_ready() {
        let log = CallLog::default();
        let mut w = window(&log, &ManualTime::new(), 800, 600);
        log.take();

        let err = w.update_and_draw(|_| {}).unwrap_err();
        assert!(matches!(err, SurfaceError::NotReady));
        assert!(log.take().is_empty());
    }

    #[test]
    fn claimed_input_short_circuits() {
        let log = CallLog::default();
        let mut w = window(&log, &ManualTime::new(), 800, 600);
        w.gui_mut().capture_mouse = true;

        let click = WindowMessage::Input(InputEvent::PointerButton {
            button: MouseButton::Left,
            pressed: true,
        });
        assert!(w.process_message(&click).unwrap());

        let moved = WindowMessage::Input(InputEvent::Focused(true));
        assert!(!w.process_message(&moved).unwrap());
    }

    #[test]
    fn queued_input_reaches_gui_before_new_frame() {
        let log = CallLog::default();
        let mut w = window(&log, &ManualTime::new(), 800, 600);
        w.show().unwrap();

        let moved = InputEvent::PointerMoved { x: 5.0, y: 6.0 };
        w.process_message(&WindowMessage::Input(moved.clone())).unwrap();
        log.take();

        w.update_and_draw(|_| {}).unwrap();
        let calls = log.take();
        let push = calls.iter().position(|c| *c == Call::PushInput(moved.clone()));
        let new_frame = calls.iter().position(|c| *c == Call::NewFrame);
        assert!(push.is_some() && push < new_frame);
    }

    #[test]
    fn every_entry_point_selects_context_first() {
        let log = CallLog::default();
        let mut w = window(&log, &ManualTime::new(), 800, 600);
        log.take();

        w.show().unwrap();
        assert_eq!(log.take().first(), Some(&Call::MakeCurrent));

        w.process_message(&WindowMessage::size(SizeKind::Restored, 640, 480))
            .unwrap();
        assert_eq!(log.take().first(), Some(&Call::MakeCurrent));

        w.update_and_draw(|_| {}).unwrap();
        assert_eq!(log.take().first(), Some(&Call::MakeCurrent));
    }
}
