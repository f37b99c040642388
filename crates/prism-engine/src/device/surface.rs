use crate::coords::Viewport;
use crate::gui::GuiContext;

use super::backend::{GraphicsDevice, PresentFormat, RenderTargetView, SwapChain, SwapChainDesc};
use super::error::{DeviceError, SurfaceError};

/// Resources of a live surface.
///
/// Field order is drop order: the view goes before the buffer it targets, and
/// both go before the swap chain that owns the buffer.
struct LiveSurface<D: GraphicsDevice> {
    view: D::RenderTargetView,
    back_buffer: D::Texture,
    swap_chain: D::SwapChain,
    width: u32,
    height: u32,
}

enum SurfaceState<D: GraphicsDevice> {
    Uninitialized,
    Live(LiveSurface<D>),
    /// A create or resize failed. Holds nothing; terminal.
    Faulted,
}

/// Coarse lifecycle phase, for callers and diagnostics.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfacePhase {
    Uninitialized,
    Live,
    Faulted,
}

/// Owns a window's swap chain, back buffer and render-target view.
///
/// The surface is created lazily by the first `ensure_surface` call and
/// rebuilt in place by every later one. Swap chain, back buffer and view exist
/// together or not at all; when a transition fails the manager drops whatever
/// it held and stays `Faulted`.
pub struct SurfaceManager<D: GraphicsDevice> {
    device: D,
    format: PresentFormat,
    state: SurfaceState<D>,
}

impl<D: GraphicsDevice> SurfaceManager<D> {
    /// Creates an uninitialized manager presenting in `format`.
    pub fn new(device: D, format: PresentFormat) -> Self {
        Self {
            device,
            format,
            state: SurfaceState::Uninitialized,
        }
    }

    pub fn format(&self) -> PresentFormat {
        self.format
    }

    pub fn phase(&self) -> SurfacePhase {
        match self.state {
            SurfaceState::Uninitialized => SurfacePhase::Uninitialized,
            SurfaceState::Live(_) => SurfacePhase::Live,
            SurfaceState::Faulted => SurfacePhase::Faulted,
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self.state, SurfaceState::Live(_))
    }

    /// Pixel size of the live surface.
    pub fn size(&self) -> Option<(u32, u32)> {
        match &self.state {
            SurfaceState::Live(live) => Some((live.width, live.height)),
            _ => None,
        }
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    /// Produces a live surface of `width` x `height` pixels and publishes that
    /// size to `gui` as its display size.
    ///
    /// The first call creates the swap chain; later calls release the view and
    /// back buffer, resize the buffers in place and rebuild both. Repeating a
    /// call with unchanged dimensions performs the full rebuild; redundant size
    /// notifications are filtered by the caller.
    pub fn ensure_surface<G>(
        &mut self,
        window: &D::Window,
        width: u32,
        height: u32,
        gui: &mut G,
    ) -> Result<(), SurfaceError>
    where
        G: GuiContext + ?Sized,
    {
        if width == 0 || height == 0 {
            return Err(SurfaceError::InvalidSize { width, height });
        }

        let live = match std::mem::replace(&mut self.state, SurfaceState::Faulted) {
            SurfaceState::Uninitialized => self
                .create(window, width, height)
                .map_err(SurfaceError::CreationFailed)?,
            SurfaceState::Live(live) => {
                self.recreate(live, width, height)
                    .map_err(|source| SurfaceError::ResizeFailed {
                        width,
                        height,
                        source,
                    })?
            }
            SurfaceState::Faulted => return Err(SurfaceError::Faulted),
        };

        self.state = SurfaceState::Live(live);
        gui.set_display_size(Viewport::from_pixels(width, height));

        Ok(())
    }

    fn create(
        &mut self,
        window: &D::Window,
        width: u32,
        height: u32,
    ) -> Result<LiveSurface<D>, DeviceError> {
        let desc = SwapChainDesc::windowed(width, height, self.format);
        let swap_chain = self.device.create_swap_chain(window, &desc)?;

        log::debug!("swap chain created ({width}x{height}, {:?})", self.format);
        self.attach_view(swap_chain, width, height)
    }

    fn recreate(
        &mut self,
        live: LiveSurface<D>,
        width: u32,
        height: u32,
    ) -> Result<LiveSurface<D>, DeviceError> {
        let LiveSurface {
            view,
            back_buffer,
            mut swap_chain,
            width: old_width,
            height: old_height,
        } = live;

        drop(view);
        drop(back_buffer);

        swap_chain.resize_buffers(1, width, height, self.format)?;

        log::debug!("swap chain resized {old_width}x{old_height} -> {width}x{height}");
        self.attach_view(swap_chain, width, height)
    }

    /// Shared tail of both transitions: fetch the back buffer, build its view.
    fn attach_view(
        &mut self,
        mut swap_chain: D::SwapChain,
        width: u32,
        height: u32,
    ) -> Result<LiveSurface<D>, DeviceError> {
        let back_buffer = swap_chain.back_buffer()?;
        let view = self.device.create_render_target_view(&back_buffer)?;

        debug_assert_eq!(view.size(), (width, height));

        Ok(LiveSurface {
            view,
            back_buffer,
            swap_chain,
            width,
            height,
        })
    }

    /// Render-target view of the live surface.
    pub fn current_render_target(&self) -> Result<&D::RenderTargetView, SurfaceError> {
        match &self.state {
            SurfaceState::Live(live) => Ok(&live.view),
            SurfaceState::Uninitialized => Err(SurfaceError::NotReady),
            SurfaceState::Faulted => Err(SurfaceError::Faulted),
        }
    }

    /// Device and live render target borrowed together, for issuing draw calls.
    pub fn device_and_target(
        &mut self,
    ) -> Result<(&mut D, &D::RenderTargetView), SurfaceError> {
        match &self.state {
            SurfaceState::Live(live) => Ok((&mut self.device, &live.view)),
            SurfaceState::Uninitialized => Err(SurfaceError::NotReady),
            SurfaceState::Faulted => Err(SurfaceError::Faulted),
        }
    }

    /// Presents the back buffer.
    pub fn present(&mut self, sync_interval: u32) -> Result<(), SurfaceError> {
        match &mut self.state {
            SurfaceState::Live(live) => live
                .swap_chain
                .present(sync_interval)
                .map_err(SurfaceError::FrameFailed),
            SurfaceState::Uninitialized => Err(SurfaceError::NotReady),
            SurfaceState::Faulted => Err(SurfaceError::Faulted),
        }
    }
}

impl<D: GraphicsDevice> std::fmt::Debug for SurfaceManager<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurfaceManager")
            .field("format", &self.format)
            .field("phase", &self.phase())
            .field("size", &self.size())
            .finish()
    }
}
