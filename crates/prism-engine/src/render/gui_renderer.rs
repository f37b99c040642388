use std::ops::Range;

use bytemuck::{Pod, Zeroable};

use crate::coords::Viewport;
use crate::device::{DeviceError, RenderTargetView, WgpuDevice, WgpuRenderTarget};
use crate::gui::{DrawData, DrawVertex};

use super::frame_loop::DrawDataRenderer;

/// Rasterizes GUI draw data with wgpu.
///
/// Geometry arrives in display pixels and is converted to NDC in the vertex
/// shader from a viewport uniform. Vertex colors are straight alpha.
#[derive(Default)]
pub struct WgpuDrawRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,

    vertex_buffer: Option<wgpu::Buffer>,
    vertex_capacity: usize,
    index_buffer: Option<wgpu::Buffer>,
    index_capacity: usize,
}

impl WgpuDrawRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_pipeline(&mut self, device: &wgpu::Device, format: wgpu::TextureFormat) {
        if self.pipeline_format == Some(format) && self.pipeline.is_some() {
            return;
        }

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("prism gui shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/gui.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("prism gui bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<ViewportUniform>() as u64,
                    ),
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("prism gui pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("prism gui pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[vertex_layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::debug!("gui pipeline built for {format:?}");

        self.pipeline_format = Some(format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);

        self.bind_group = None;
        self.viewport_ubo = None;
    }

    fn ensure_bindings(&mut self, device: &wgpu::Device) {
        if self.bind_group.is_some() && self.viewport_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let viewport_ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("prism gui viewport ubo"),
            size: std::mem::size_of::<ViewportUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("prism gui bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_ubo.as_entire_binding(),
            }],
        });

        self.viewport_ubo = Some(viewport_ubo);
        self.bind_group = Some(bind_group);
    }

    fn ensure_capacity(&mut self, device: &wgpu::Device, vertices: usize, indices: usize) {
        if vertices > self.vertex_capacity || self.vertex_buffer.is_none() {
            let cap = vertices.next_power_of_two().max(1024);
            self.vertex_buffer = Some(device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("prism gui vbo"),
                size: (cap * std::mem::size_of::<DrawVertex>()) as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.vertex_capacity = cap;
        }

        if indices > self.index_capacity || self.index_buffer.is_none() {
            let cap = indices.next_power_of_two().max(2048);
            self.index_buffer = Some(device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("prism gui ibo"),
                size: (cap * std::mem::size_of::<u32>()) as u64,
                usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.index_capacity = cap;
        }
    }
}

impl DrawDataRenderer<WgpuDevice> for WgpuDrawRenderer {
    fn render(
        &mut self,
        device: &mut WgpuDevice,
        target: &WgpuRenderTarget,
        data: &DrawData,
    ) -> Result<(), DeviceError> {
        if data.is_empty() || !data.display_size.is_valid() {
            return Ok(());
        }

        let (target_w, target_h) = target.size();
        let merged = merge_draw_data(data, Viewport::from_pixels(target_w, target_h));
        if merged.batches.is_empty() {
            return Ok(());
        }

        self.ensure_pipeline(device.device(), target.format());
        self.ensure_bindings(device.device());
        self.ensure_capacity(device.device(), merged.vertices.len(), merged.indices.len());

        let (Some(pipeline), Some(bind_group), Some(ubo), Some(vbo), Some(ibo)) = (
            self.pipeline.as_ref(),
            self.bind_group.as_ref(),
            self.viewport_ubo.as_ref(),
            self.vertex_buffer.as_ref(),
            self.index_buffer.as_ref(),
        ) else {
            return Err(DeviceError::new("gui render", "pipeline resources missing"));
        };

        let queue = device.queue();
        let uniform = ViewportUniform {
            size: [data.display_size.width, data.display_size.height],
            _pad: [0.0; 2],
        };
        queue.write_buffer(ubo, 0, bytemuck::bytes_of(&uniform));
        queue.write_buffer(vbo, 0, bytemuck::cast_slice(&merged.vertices));
        queue.write_buffer(ibo, 0, bytemuck::cast_slice(&merged.indices));

        let mut encoder = device
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("prism gui encoder"),
            });

        target.with_view(|view| {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("prism gui pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            rpass.set_pipeline(pipeline);
            rpass.set_bind_group(0, bind_group, &[]);
            rpass.set_vertex_buffer(0, vbo.slice(..));
            rpass.set_index_buffer(ibo.slice(..), wgpu::IndexFormat::Uint32);

            for batch in &merged.batches {
                let (x, y, w, h) = batch.scissor;
                rpass.set_scissor_rect(x, y, w, h);
                rpass.draw_indexed(batch.indices.clone(), batch.base_vertex, 0..1);
            }
        })?;

        queue.submit(std::iter::once(encoder.finish()));
        Ok(())
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ViewportUniform {
    size: [f32; 2],
    _pad: [f32; 2],
}

const VERTEX_ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
    0 => Float32x2, // pos
    1 => Float32x4  // color
];

fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<DrawVertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &VERTEX_ATTRS,
    }
}

/// One `draw_indexed` call.
#[derive(Debug, Clone, PartialEq)]
struct Batch {
    scissor: (u32, u32, u32, u32),
    indices: Range<u32>,
    base_vertex: i32,
}

#[derive(Debug, Default)]
struct MergedDrawData {
    vertices: Vec<DrawVertex>,
    indices: Vec<u32>,
    batches: Vec<Batch>,
}

/// Concatenates every list into single vertex/index streams.
///
/// Index values stay list-relative; each batch carries its list's base vertex.
/// Commands clipped away entirely are dropped.
fn merge_draw_data(data: &DrawData, target: Viewport) -> MergedDrawData {
    let mut out = MergedDrawData::default();
    let full = (0, 0, target.width as u32, target.height as u32);

    for list in &data.lists {
        if list.is_empty() {
            continue;
        }

        let base_vertex = out.vertices.len() as i32;
        let base_index = out.indices.len() as u32;
        out.vertices.extend_from_slice(&list.vertices);
        out.indices.extend_from_slice(&list.indices);

        for cmd in &list.commands {
            if cmd.index_count == 0 {
                continue;
            }
            let scissor = match cmd.clip_rect {
                Some(clip) => match clip.to_scissor(target) {
                    Some(s) => s,
                    None => continue,
                },
                None => full,
            };
            let start = base_index + cmd.index_offset;
            out.batches.push(Batch {
                scissor,
                indices: start..start + cmd.index_count,
                base_vertex,
            });
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::ColorRgba;
    use crate::gui::{ClipRect, DrawList};

    fn data_with(lists: Vec<DrawList>) -> DrawData {
        DrawData {
            display_size: Viewport::new(100.0, 50.0),
            lists,
        }
    }

    #[test]
    fn lists_are_concatenated_with_base_vertex() {
        let mut a = DrawList::new();
        a.add_rect_filled([0.0, 0.0], [10.0, 10.0], ColorRgba::white());
        let mut b = DrawList::new();
        b.add_rect_filled([5.0, 5.0], [20.0, 20.0], ColorRgba::black());

        let merged = merge_draw_data(&data_with(vec![a, b]), Viewport::new(100.0, 50.0));

        assert_eq!(merged.vertices.len(), 8);
        assert_eq!(merged.indices.len(), 12);
        assert_eq!(
            merged.batches,
            vec![
                Batch { scissor: (0, 0, 100, 50), indices: 0..6, base_vertex: 0 },
                Batch { scissor: (0, 0, 100, 50), indices: 6..12, base_vertex: 4 },
            ]
        );
    }

    #[test]
    fn clip_rects_become_scissors_clamped_to_target() {
        let mut list = DrawList::new();
        list.push_clip_rect(ClipRect::new([10.0, 10.0], [500.0, 30.0]));
        list.add_rect_filled([0.0, 0.0], [40.0, 40.0], ColorRgba::white());
        list.pop_clip_rect();

        let merged = merge_draw_data(&data_with(vec![list]), Viewport::new(100.0, 50.0));

        assert_eq!(merged.batches.len(), 1);
        assert_eq!(merged.batches[0].scissor, (10, 10, 90, 20));
    }

    #[test]
    fn fully_clipped_commands_are_dropped() {
        let mut list = DrawList::new();
        list.push_clip_rect(ClipRect::new([200.0, 200.0], [300.0, 300.0]));
        list.add_rect_filled([0.0, 0.0], [40.0, 40.0], ColorRgba::white());

        let merged = merge_draw_data(&data_with(vec![list]), Viewport::new(100.0, 50.0));

        assert!(merged.batches.is_empty());
    }
}
