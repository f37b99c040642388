use std::sync::Arc;

use anyhow::{Context, Result};
use winit::window::{Window, WindowId};

use crate::coords::ColorRgba;

use super::backend::{GraphicsDevice, PresentFormat, SwapChainDesc};
use super::error::DeviceError;
use super::init::DeviceInit;
use super::swap_chain::{WgpuBackBuffer, WgpuRenderTarget, WgpuSwapChain};

/// Owns the wgpu instance, adapter, device and queue.
///
/// Plays the graphics-device role for `SurfaceManager`: swap chains are wgpu
/// surfaces created from the instance this device came from, so the factory
/// chain is device → adapter → instance.
pub struct WgpuDevice {
    /// wgpu instance used to create the adapter and surfaces.
    instance: wgpu::Instance,

    /// Selected adapter.
    adapter: wgpu::Adapter,

    /// Logical device.
    device: wgpu::Device,

    /// Command queue.
    queue: wgpu::Queue,

    /// Surface created while picking a compatible adapter, reused by the
    /// first swap chain for the same window.
    probe: Option<(WindowId, wgpu::Surface<'static>)>,

    /// Best 32-bit normalized format the probe surface supports.
    preferred_format: PresentFormat,

    alpha_mode: Option<wgpu::CompositeAlphaMode>,
}

impl WgpuDevice {
    /// Creates a device able to present into `window`.
    ///
    /// Adapter/device acquisition is asynchronous under wgpu.
    pub async fn new(window: Arc<Window>, init: DeviceInit) -> Result<Self> {
        let DeviceInit {
            backends,
            power_preference,
            alpha_mode,
            required_features,
            required_limits,
        } = init;

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends,
            ..Default::default()
        });

        let window_id = window.id();
        let probe = instance
            .create_surface(window)
            .context("failed to create wgpu surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference,
                compatible_surface: Some(&probe),
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("prism-engine device"),
                required_features,
                required_limits,
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        let caps = probe.get_capabilities(&adapter);
        let preferred_format = choose_present_format(&caps.formats)
            .context("surface supports neither Rgba8Unorm nor Bgra8Unorm")?;

        log::info!(
            "graphics device ready: {} ({:?}), present format {preferred_format:?}",
            adapter.get_info().name,
            adapter.get_info().backend,
        );

        Ok(Self {
            instance,
            adapter,
            device,
            queue,
            probe: Some((window_id, probe)),
            preferred_format,
            alpha_mode,
        })
    }

    /// Format new surface managers should be built with.
    pub fn preferred_format(&self) -> PresentFormat {
        self.preferred_format
    }

    /// Returns a reference to the logical device.
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    /// Returns a reference to the command queue.
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    fn presentation_surface(&mut self, window: &Arc<Window>) -> Result<wgpu::Surface<'static>, DeviceError> {
        let probe_matches = matches!(&self.probe, Some((id, _)) if *id == window.id());
        if probe_matches {
            if let Some((_, surface)) = self.probe.take() {
                return Ok(surface);
            }
        }

        self.instance
            .create_surface(window.clone())
            .map_err(|e| DeviceError::new("create surface", e.to_string()))
    }
}

impl GraphicsDevice for WgpuDevice {
    type Window = Arc<Window>;
    type Texture = WgpuBackBuffer;
    type SwapChain = WgpuSwapChain;
    type RenderTargetView = WgpuRenderTarget;

    fn create_swap_chain(
        &mut self,
        window: &Arc<Window>,
        desc: &SwapChainDesc,
    ) -> Result<WgpuSwapChain, DeviceError> {
        let surface = self.presentation_surface(window)?;
        let caps = surface.get_capabilities(&self.adapter);

        let format = desc.format.to_wgpu();
        if !caps.formats.contains(&format) {
            return Err(DeviceError::new(
                "create_swap_chain",
                format!("{format:?} is not supported by this surface"),
            ));
        }
        if desc.render_target_output && !caps.usages.contains(wgpu::TextureUsages::RENDER_ATTACHMENT) {
            return Err(DeviceError::new(
                "create_swap_chain",
                "surface cannot be used as a render attachment",
            ));
        }

        let max = self.device.limits().max_texture_dimension_2d;
        if desc.width > max || desc.height > max {
            return Err(DeviceError::new(
                "create_swap_chain",
                format!("{}x{} exceeds device limit {max}", desc.width, desc.height),
            ));
        }

        // winit never toggles fullscreen on its own, so `ignore_fullscreen_toggle`
        // needs no extra call here.
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: desc.width,
            height: desc.height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: choose_alpha_mode(&caps, self.alpha_mode),
            view_formats: vec![],
            desired_maximum_frame_latency: desc.buffer_count.max(1),
        };

        Ok(WgpuSwapChain::new(surface, self.device.clone(), config))
    }

    fn create_render_target_view(
        &mut self,
        back_buffer: &WgpuBackBuffer,
    ) -> Result<WgpuRenderTarget, DeviceError> {
        Ok(WgpuRenderTarget::over(back_buffer))
    }

    fn bind_render_target(&mut self, view: &WgpuRenderTarget) -> Result<(), DeviceError> {
        // wgpu has no global binding point; binding acquires the frame's texture
        // so that later passes all land on the same back buffer.
        view.with_view(|_| ())
    }

    fn clear_render_target(
        &mut self,
        view: &WgpuRenderTarget,
        color: ColorRgba,
    ) -> Result<(), DeviceError> {
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("prism clear encoder"),
            });

        view.with_view(|target| {
            let _rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("prism clear"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: f64::from(color.r),
                            g: f64::from(color.g),
                            b: f64::from(color.b),
                            a: f64::from(color.a),
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
        })?;

        self.queue.submit(std::iter::once(encoder.finish()));
        Ok(())
    }
}

/// Picks the 32-bit normalized format to present in, preferring RGBA order.
pub(crate) fn choose_present_format(formats: &[wgpu::TextureFormat]) -> Option<PresentFormat> {
    [PresentFormat::Rgba8Unorm, PresentFormat::Bgra8Unorm]
        .into_iter()
        .find(|f| formats.contains(&f.to_wgpu()))
}

fn choose_alpha_mode(
    caps: &wgpu::SurfaceCapabilities,
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| caps.alpha_modes.contains(m))
        .or_else(|| caps.alpha_modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::TextureFormat;

    #[test]
    fn prefers_rgba_when_available() {
        let formats = [TextureFormat::Bgra8UnormSrgb, TextureFormat::Bgra8Unorm, TextureFormat::Rgba8Unorm];
        assert_eq!(choose_present_format(&formats), Some(PresentFormat::Rgba8Unorm));
    }

    #[test]
    fn falls_back_to_bgra() {
        let formats = [TextureFormat::Bgra8UnormSrgb, TextureFormat::Bgra8Unorm];
        assert_eq!(choose_present_format(&formats), Some(PresentFormat::Bgra8Unorm));
    }

    #[test]
    fn srgb_only_surfaces_are_rejected() {
        let formats = [TextureFormat::Rgba8UnormSrgb, TextureFormat::Rgba16Float];
        assert_eq!(choose_present_format(&formats), None);
    }
}
