use std::cell::RefCell;
use std::rc::Rc;

use super::backend::{PresentFormat, RenderTargetView, SwapChain};
use super::error::DeviceError;

struct AcquiredFrame {
    view: wgpu::TextureView,
    texture: wgpu::SurfaceTexture,
}

/// Configured surface plus the texture acquired for the frame in flight.
///
/// Shared by a swap chain, its back buffer and the view over that buffer.
pub(super) struct Presentation {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    config: wgpu::SurfaceConfiguration,
    frame: Option<AcquiredFrame>,
}

impl Presentation {
    fn acquire(&mut self) -> Result<&wgpu::TextureView, DeviceError> {
        if self.frame.is_none() {
            let texture = self
                .surface
                .get_current_texture()
                .map_err(|e| DeviceError::new("acquire back buffer", e.to_string()))?;

            if texture.suboptimal {
                log::trace!("acquired suboptimal surface texture");
            }

            let view = texture.texture.create_view(&wgpu::TextureViewDescriptor {
                label: Some("prism back buffer view"),
                ..Default::default()
            });
            self.frame = Some(AcquiredFrame { view, texture });
        }

        match &self.frame {
            Some(frame) => Ok(&frame.view),
            None => Err(DeviceError::new("acquire back buffer", "no frame")),
        }
    }

    /// Drops an acquired but unpresented texture.
    fn discard_frame(&mut self) {
        self.frame = None;
    }
}

/// wgpu surface presented as a swap chain.
///
/// wgpu hands out one surface texture per frame; the back buffer is whichever
/// texture is acquired for the frame in flight. It is acquired on first use
/// after a present and released by present, by dropping the back buffer, or by
/// a resize.
pub struct WgpuSwapChain {
    shared: Rc<RefCell<Presentation>>,
    max_dimension: u32,
}

impl WgpuSwapChain {
    pub(super) fn new(
        surface: wgpu::Surface<'static>,
        device: wgpu::Device,
        config: wgpu::SurfaceConfiguration,
    ) -> Self {
        let max_dimension = device.limits().max_texture_dimension_2d;
        surface.configure(&device, &config);

        Self {
            shared: Rc::new(RefCell::new(Presentation {
                surface,
                device,
                config,
                frame: None,
            })),
            max_dimension,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        let p = self.shared.borrow();
        (p.config.width, p.config.height)
    }
}

impl SwapChain for WgpuSwapChain {
    type Texture = WgpuBackBuffer;

    fn back_buffer(&mut self) -> Result<WgpuBackBuffer, DeviceError> {
        let p = self.shared.borrow();
        Ok(WgpuBackBuffer {
            shared: self.shared.clone(),
            width: p.config.width,
            height: p.config.height,
            format: p.config.format,
        })
    }

    fn resize_buffers(
        &mut self,
        buffer_count: u32,
        width: u32,
        height: u32,
        format: PresentFormat,
    ) -> Result<(), DeviceError> {
        if width > self.max_dimension || height > self.max_dimension {
            return Err(DeviceError::new(
                "resize_buffers",
                format!("{width}x{height} exceeds device limit {}", self.max_dimension),
            ));
        }

        let mut p = self
            .shared
            .try_borrow_mut()
            .map_err(|_| DeviceError::new("resize_buffers", "back buffer still in use"))?;

        p.discard_frame();
        p.config.width = width;
        p.config.height = height;
        p.config.format = format.to_wgpu();
        p.config.desired_maximum_frame_latency = buffer_count.max(1);

        let Presentation {
            surface,
            device,
            config,
            ..
        } = &*p;
        surface.configure(device, config);

        Ok(())
    }

    fn present(&mut self, sync_interval: u32) -> Result<(), DeviceError> {
        // The present mode is fixed at configure time; AutoVsync corresponds
        // to an interval of one.
        if sync_interval != 1 {
            log::trace!("sync interval {sync_interval} requested; surface presents with vsync");
        }

        let frame = self
            .shared
            .try_borrow_mut()
            .map_err(|_| DeviceError::new("present", "back buffer still in use"))?
            .frame
            .take();

        match frame {
            Some(AcquiredFrame { view, texture }) => {
                drop(view);
                texture.present();
            }
            None => log::trace!("present with nothing rendered; skipped"),
        }

        Ok(())
    }
}

/// Handle to the swap chain's back buffer.
pub struct WgpuBackBuffer {
    shared: Rc<RefCell<Presentation>>,
    width: u32,
    height: u32,
    format: wgpu::TextureFormat,
}

impl Drop for WgpuBackBuffer {
    fn drop(&mut self) {
        if let Ok(mut p) = self.shared.try_borrow_mut() {
            p.discard_frame();
        }
    }
}

/// Render-target view over the back buffer.
pub struct WgpuRenderTarget {
    shared: Rc<RefCell<Presentation>>,
    width: u32,
    height: u32,
    format: wgpu::TextureFormat,
}

impl WgpuRenderTarget {
    pub(super) fn over(buffer: &WgpuBackBuffer) -> Self {
        Self {
            shared: buffer.shared.clone(),
            width: buffer.width,
            height: buffer.height,
            format: buffer.format,
        }
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }

    /// Runs `f` with a texture view of the current back buffer, acquiring it if needed.
    pub fn with_view<R>(
        &self,
        f: impl FnOnce(&wgpu::TextureView) -> R,
    ) -> Result<R, DeviceError> {
        let mut p = self
            .shared
            .try_borrow_mut()
            .map_err(|_| DeviceError::new("render target", "presentation busy"))?;
        let view = p.acquire()?;
        Ok(f(view))
    }
}

impl RenderTargetView for WgpuRenderTarget {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
