//! Graphics device + presentation surface management.
//!
//! This module is responsible for:
//! - the backend-neutral swap-chain contract (`GraphicsDevice`, `SwapChain`)
//! - the per-window `SurfaceManager` lifecycle
//! - the wgpu implementation of that contract (`WgpuDevice`)

mod backend;
mod error;
mod gpu;
mod init;
mod surface;
mod swap_chain;

pub use backend::{GraphicsDevice, PresentFormat, RenderTargetView, SwapChain, SwapChainDesc, SwapEffect};
pub use error::{DeviceError, SurfaceError};
pub use gpu::WgpuDevice;
pub use init::DeviceInit;
pub use surface::{SurfaceManager, SurfacePhase};
pub use swap_chain::{WgpuBackBuffer, WgpuRenderTarget, WgpuSwapChain};
