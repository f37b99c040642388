use crate::coords::ColorRgba;
use crate::device::{DeviceError, GraphicsDevice, SurfaceError, SurfaceManager};
use crate::gui::{DrawData, GuiContext};
use crate::input::InputHandler;
use crate::time::{FrameClock, FrameTime, TimeSource};

/// Background the target is cleared to before GUI content.
pub const DEFAULT_CLEAR_COLOR: ColorRgba = ColorRgba::new(0.45, 0.55, 0.60, 1.00);

/// Rasterizes finalized GUI draw data into a bound render target.
pub trait DrawDataRenderer<D: GraphicsDevice> {
    fn render(
        &mut self,
        device: &mut D,
        target: &D::RenderTargetView,
        data: &DrawData,
    ) -> Result<(), DeviceError>;
}

/// Extra drawing supplied by the embedding application.
///
/// Runs after GUI content is rasterized and before present, into the same bound target.
pub trait ExtensionHook<D: GraphicsDevice> {
    fn draw(&mut self, device: &mut D, target: &D::RenderTargetView) -> Result<(), DeviceError>;
}

/// Hook that draws nothing.
#[derive(Debug, Default, Copy, Clone)]
pub struct NoHook;

impl<D: GraphicsDevice> ExtensionHook<D> for NoHook {
    fn draw(&mut self, _device: &mut D, _target: &D::RenderTargetView) -> Result<(), DeviceError> {
        Ok(())
    }
}

/// Everything one frame touches, borrowed from the owning window.
pub struct FrameResources<'a, D, T, C, I, R, H>
where
    D: GraphicsDevice,
    T: TimeSource,
{
    pub surface: &'a mut SurfaceManager<D>,
    pub clock: &'a mut FrameClock<T>,
    pub gui: &'a mut C,
    pub input: &'a mut I,
    pub renderer: &'a mut R,
    pub hook: &'a mut H,
}

/// Drives one frame from clock tick to present.
///
/// Holds only fixed settings; all cross-frame state lives in the surface
/// manager, the clock and the GUI context.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RenderLoop {
    clear_color: ColorRgba,
    sync_interval: u32,
}

impl Default for RenderLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderLoop {
    /// Default background, presenting on every vertical sync.
    pub const fn new() -> Self {
        Self {
            clear_color: DEFAULT_CLEAR_COLOR,
            sync_interval: 1,
        }
    }

    pub const fn with_clear_color(mut self, color: ColorRgba) -> Self {
        self.clear_color = color;
        self
    }

    pub fn clear_color(&self) -> ColorRgba {
        self.clear_color
    }

    pub fn sync_interval(&self) -> u32 {
        self.sync_interval
    }

    /// Runs one frame.
    ///
    /// Order: select context, tick clock and publish delta, flush input,
    /// `new_frame`, `ui`, `render`, bind target, clear, submit draw data,
    /// extension hook, present. Fails with `NotReady` before touching anything
    /// if the surface was never made live.
    pub fn run_frame<D, T, C, I, R, H, U>(
        &self,
        frame: FrameResources<'_, D, T, C, I, R, H>,
        ui: U,
    ) -> Result<FrameTime, SurfaceError>
    where
        D: GraphicsDevice,
        T: TimeSource,
        C: GuiContext,
        I: InputHandler<C>,
        R: DrawDataRenderer<D>,
        H: ExtensionHook<D>,
        U: FnOnce(&mut C),
    {
        let FrameResources {
            surface,
            clock,
            gui,
            input,
            renderer,
            hook,
        } = frame;

        surface.current_render_target()?;

        gui.make_current();

        let time = clock.tick();
        gui.set_delta_time(time.dt);

        input.update(&mut *gui);
        gui.new_frame();

        ui(&mut *gui);

        gui.render();

        {
            let (device, target) = surface.device_and_target()?;

            device
                .bind_render_target(target)
                .map_err(SurfaceError::FrameFailed)?;
            device
                .clear_render_target(target, self.clear_color)
                .map_err(SurfaceError::FrameFailed)?;

            renderer
                .render(device, target, gui.draw_data())
                .map_err(SurfaceError::FrameFailed)?;

            hook.draw(device, target).map_err(SurfaceError::FrameFailed)?;
        }

        surface.present(self.sync_interval)?;

        Ok(time)
    }
}
