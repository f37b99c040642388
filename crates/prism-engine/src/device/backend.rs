use crate::coords::ColorRgba;

use super::error::DeviceError;

/// 32-bit normalized presentation format.
///
/// Picked once when a `SurfaceManager` is built and held fixed across every
/// swap chain creation and resize.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum PresentFormat {
    #[default]
    Rgba8Unorm,
    /// Fallback for platforms whose surfaces do not expose RGBA ordering.
    Bgra8Unorm,
}

impl PresentFormat {
    pub const fn bits_per_pixel(self) -> u32 {
        32
    }

    pub fn to_wgpu(self) -> wgpu::TextureFormat {
        match self {
            PresentFormat::Rgba8Unorm => wgpu::TextureFormat::Rgba8Unorm,
            PresentFormat::Bgra8Unorm => wgpu::TextureFormat::Bgra8Unorm,
        }
    }
}

/// How presented buffers are treated after display.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SwapEffect {
    /// Contents are undefined after present.
    Discard,
}

/// Swap chain creation parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SwapChainDesc {
    pub buffer_count: u32,
    pub width: u32,
    pub height: u32,
    pub format: PresentFormat,
    pub windowed: bool,
    pub swap_effect: SwapEffect,
    /// Buffers are used as render-target output.
    pub render_target_output: bool,
    /// Suppress the platform's automatic fullscreen toggling (alt-enter and friends).
    pub ignore_fullscreen_toggle: bool,
}

impl SwapChainDesc {
    /// Single-buffered, windowed, discard-style description at the given size.
    pub fn windowed(width: u32, height: u32, format: PresentFormat) -> Self {
        Self {
            buffer_count: 1,
            width,
            height,
            format,
            windowed: true,
            swap_effect: SwapEffect::Discard,
            render_target_output: true,
            ignore_fullscreen_toggle: true,
        }
    }
}

/// View through which draws land in a back buffer.
pub trait RenderTargetView {
    /// Pixel size of the targeted buffer.
    fn size(&self) -> (u32, u32);
}

/// Presentation swap chain bound to one window.
pub trait SwapChain {
    type Texture;

    /// Retrieves the current back buffer.
    fn back_buffer(&mut self) -> Result<Self::Texture, DeviceError>;

    /// Resizes buffers in place.
    ///
    /// Every texture and view obtained from this swap chain must have been
    /// released before the call.
    fn resize_buffers(
        &mut self,
        buffer_count: u32,
        width: u32,
        height: u32,
        format: PresentFormat,
    ) -> Result<(), DeviceError>;

    /// Makes the back buffer visible. `sync_interval` counts vertical blanks to wait for.
    fn present(&mut self, sync_interval: u32) -> Result<(), DeviceError>;
}

/// Graphics device collaborator.
///
/// Only the operations the surface lifecycle and frame loop need are exposed;
/// backends may offer more on their concrete types.
pub trait GraphicsDevice {
    /// Native window the swap chain presents into.
    type Window;
    type Texture;
    type SwapChain: SwapChain<Texture = Self::Texture>;
    type RenderTargetView: RenderTargetView;

    /// Creates a swap chain for `window`.
    ///
    /// Implementations resolve their presentation factory from the device
    /// itself and honor `desc.ignore_fullscreen_toggle` for the window.
    fn create_swap_chain(
        &mut self,
        window: &Self::Window,
        desc: &SwapChainDesc,
    ) -> Result<Self::SwapChain, DeviceError>;

    fn create_render_target_view(
        &mut self,
        back_buffer: &Self::Texture,
    ) -> Result<Self::RenderTargetView, DeviceError>;

    /// Binds `view` as the sole render target for subsequent draws.
    fn bind_render_target(&mut self, view: &Self::RenderTargetView) -> Result<(), DeviceError>;

    fn clear_render_target(
        &mut self,
        view: &Self::RenderTargetView,
        color: ColorRgba,
    ) -> Result<(), DeviceError>;
}
