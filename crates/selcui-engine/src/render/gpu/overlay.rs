use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};

use crate::render::error::RenderError;
use crate::render::format::{DrawMode, VertexFormat};
use crate::render::sink::BlendMode;
use crate::render::vertex::{Batch, PositionColorNormalVertex, PositionColorVertex};

use super::ctx::{RenderCtx, RenderTarget};

/// Depth attachment format the overlay pipelines are built for.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

const RIBBON_ATTRIBUTES: u32 = 4;
const RIBBON_VERTICES: u32 = 6;
const QUAD_TRIANGLES: [u32; 6] = [0, 1, 2, 0, 2, 3];

// ── vertex layouts ────────────────────────────────────────────────────────

impl PositionColorVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x4];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PositionColorVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

impl PositionColorNormalVertex {
    // Read two vertices per instance: the first fully, the second for its position.
    const SEGMENT_ATTRS: [wgpu::VertexAttribute; 4] = [
        wgpu::VertexAttribute { format: wgpu::VertexFormat::Float32x3, offset: 0, shader_location: 0 },
        wgpu::VertexAttribute { format: wgpu::VertexFormat::Float32x4, offset: 12, shader_location: 1 },
        wgpu::VertexAttribute { format: wgpu::VertexFormat::Float32x3, offset: 28, shader_location: 2 },
        wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x3,
            offset: std::mem::size_of::<PositionColorNormalVertex>() as u64,
            shader_location: 3,
        },
    ];

    fn segment_layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: 2 * std::mem::size_of::<PositionColorNormalVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::SEGMENT_ATTRS,
        }
    }
}

// ── frame uniform ─────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct FrameUniform {
    view_proj: [[f32; 4]; 4],
    viewport: [f32; 2],
    line_width: f32,
    _pad: f32, // 16-byte alignment
}

const FRAME_UNIFORM_SIZE: u64 = std::mem::size_of::<FrameUniform>() as u64;

// ── pending draws ─────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
enum DrawShape {
    /// Screen-space quads extruded from segments.
    Ribbon,
    /// Hardware 1px lines.
    Lines,
    Triangles,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
struct PipelineKey {
    shape: DrawShape,
    depth_compare: wgpu::CompareFunction,
    depth_write: bool,
    blend: BlendMode,
    cull: bool,
}

struct PendingDraw {
    key: PipelineKey,
    line_width: f32,
    vertices: Vec<u8>,
    indices: Vec<u32>,
    /// Instances for ribbons, vertices for lines, indices for triangles.
    count: u32,
}

/// Device limits the overlay checks batches against.
#[derive(Debug, Copy, Clone)]
pub struct OverlayCaps {
    pub max_buffer_size: u64,
    pub max_vertex_attributes: u32,
    pub uniform_alignment: u32,
}

impl OverlayCaps {
    pub fn from_device(device: &wgpu::Device) -> Self {
        let limits = device.limits();
        Self {
            max_buffer_size: limits.max_buffer_size,
            max_vertex_attributes: limits.max_vertex_attributes,
            uniform_alignment: limits.min_uniform_buffer_offset_alignment,
        }
    }

    #[inline]
    pub fn supports_ribbons(&self) -> bool {
        self.max_vertex_attributes >= RIBBON_ATTRIBUTES
    }
}

/// Collects overlay batches during a frame and records them into the host's
/// render pass.
///
/// Batches arrive through [`super::GpuTarget`]; [`GpuOverlay::encode`] uploads
/// them into shared buffers and draws them in submission order.
pub struct GpuOverlay {
    caps: OverlayCaps,
    pending: Vec<PendingDraw>,

    pipeline_format: Option<wgpu::TextureFormat>,
    shader: Option<wgpu::ShaderModule>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,
    pipeline_layout: Option<wgpu::PipelineLayout>,
    pipelines: HashMap<PipelineKey, wgpu::RenderPipeline>,

    uniform_ubo: Option<wgpu::Buffer>,
    uniform_capacity: usize,
    bind_group: Option<wgpu::BindGroup>,

    vertex_vbo: Option<wgpu::Buffer>,
    vertex_capacity: u64,
    index_ibo: Option<wgpu::Buffer>,
    index_capacity: u64,
}

impl GpuOverlay {
    pub fn new(caps: OverlayCaps) -> Self {
        Self {
            caps,
            pending: Vec::new(),
            pipeline_format: None,
            shader: None,
            bind_group_layout: None,
            pipeline_layout: None,
            pipelines: HashMap::new(),
            uniform_ubo: None,
            uniform_capacity: 0,
            bind_group: None,
            vertex_vbo: None,
            vertex_capacity: 0,
            index_ibo: None,
            index_capacity: 0,
        }
    }

    #[inline]
    pub fn caps(&self) -> OverlayCaps {
        self.caps
    }

    /// Draws queued since the last `encode`.
    #[inline]
    pub fn pending_draws(&self) -> usize {
        self.pending.len()
    }

    /// Converts a finished batch into a pending draw.
    pub fn queue_batch(&mut self, batch: Batch) -> Result<(), RenderError> {
        let shape = match (batch.mode, batch.format) {
            (DrawMode::Lines, VertexFormat::PositionColorNormal) => DrawShape::Ribbon,
            (DrawMode::Lines, VertexFormat::PositionColor) => DrawShape::Lines,
            (DrawMode::Quads, VertexFormat::PositionColor) => DrawShape::Triangles,
            (mode, format) => {
                return Err(RenderError::Backend(format!(
                    "unsupported batch layout {:?}/{:?}",
                    mode, format
                )));
            }
        };
        if shape == DrawShape::Ribbon && !self.caps.supports_ribbons() {
            return Err(RenderError::Backend("device cannot draw ribbons".into()));
        }

        let bytes = batch.data.as_bytes();
        if bytes.len() as u64 > self.caps.max_buffer_size {
            return Err(RenderError::Backend(format!(
                "batch of {} bytes exceeds the device buffer limit",
                bytes.len()
            )));
        }

        let vertices = batch.data.len();
        let (count, indices) = match shape {
            DrawShape::Ribbon => ((vertices / 2) as u32, Vec::new()),
            DrawShape::Lines => ((vertices - vertices % 2) as u32, Vec::new()),
            DrawShape::Triangles => {
                let quads = (vertices / 4) as u32;
                let indices: Vec<u32> =
                    (0..quads).flat_map(|q| QUAD_TRIANGLES.map(|i| q * 4 + i)).collect();
                (indices.len() as u32, indices)
            }
        };

        let key = PipelineKey {
            shape,
            depth_compare: batch.state.effective_depth(batch.depth_func).to_wgpu(),
            depth_write: batch.state.depth_write,
            blend: batch.state.blend,
            cull: batch.state.cull,
        };

        self.pending.push(PendingDraw {
            key,
            line_width: batch.line_width,
            vertices: bytes.to_vec(),
            indices,
            count,
        });
        Ok(())
    }

    /// Discards queued draws (e.g. when a frame is skipped).
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Uploads and records all queued draws into one pass over `target`.
    ///
    /// Color and depth are loaded, not cleared.
    pub fn encode(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        if self.pending.is_empty() {
            return;
        }
        if !ctx.viewport.is_valid() {
            self.pending.clear();
            return;
        }

        let draws = std::mem::take(&mut self.pending);

        // Mutating methods must happen before borrowing pipelines/buffers immutably.
        self.ensure_layout(ctx);
        for d in &draws {
            self.ensure_pipeline(ctx, d.key);
        }
        self.ensure_uniform_capacity(ctx, draws.len());
        self.write_uniforms(ctx, &draws);

        let mut vertex_bytes: Vec<u8> = Vec::new();
        let mut index_data: Vec<u32> = Vec::new();
        let mut ranges = Vec::with_capacity(draws.len());
        for d in &draws {
            let v0 = vertex_bytes.len() as u64;
            vertex_bytes.extend_from_slice(&d.vertices);
            let i0 = (index_data.len() * 4) as u64;
            index_data.extend_from_slice(&d.indices);
            ranges.push((
                v0..vertex_bytes.len() as u64,
                i0..(index_data.len() * 4) as u64,
            ));
        }

        self.ensure_vertex_capacity(ctx, vertex_bytes.len() as u64);
        self.ensure_index_capacity(ctx, (index_data.len() * 4) as u64);

        if let Some(vbo) = self.vertex_vbo.as_ref() {
            ctx.queue.write_buffer(vbo, 0, &vertex_bytes);
        }
        if let (Some(ibo), false) = (self.index_ibo.as_ref(), index_data.is_empty()) {
            ctx.queue.write_buffer(ibo, 0, bytemuck::cast_slice(&index_data));
        }

        // Now take immutable borrows.
        let Some(vbo) = self.vertex_vbo.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };
        let stride = self.uniform_stride();

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("selcui overlay pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: target.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        for (i, (d, (vr, ir))) in draws.iter().zip(ranges).enumerate() {
            if d.count == 0 {
                continue;
            }
            let Some(pipeline) = self.pipelines.get(&d.key) else { continue };

            rpass.set_pipeline(pipeline);
            rpass.set_bind_group(0, bind_group, &[(i as u64 * stride) as u32]);
            rpass.set_vertex_buffer(0, vbo.slice(vr));

            match d.key.shape {
                DrawShape::Ribbon => rpass.draw(0..RIBBON_VERTICES, 0..d.count),
                DrawShape::Lines => rpass.draw(0..d.count, 0..1),
                DrawShape::Triangles => {
                    let Some(ibo) = self.index_ibo.as_ref() else { continue };
                    rpass.set_index_buffer(ibo.slice(ir), wgpu::IndexFormat::Uint32);
                    rpass.draw_indexed(0..d.count, 0, 0..1);
                }
            }
        }
    }

    #[inline]
    fn uniform_stride(&self) -> u64 {
        let align = (self.caps.uniform_alignment as u64).max(1);
        FRAME_UNIFORM_SIZE.div_ceil(align) * align
    }

    fn ensure_layout(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format != Some(ctx.surface_format) {
            self.pipelines.clear();
            self.pipeline_format = Some(ctx.surface_format);
        }
        if self.shader.is_some() && self.pipeline_layout.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("selcui overlay shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/overlay.wgsl").into()),
        });

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("selcui overlay bgl"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: true,
                            min_binding_size: wgpu::BufferSize::new(FRAME_UNIFORM_SIZE),
                        },
                        count: None,
                    }],
                });

        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("selcui overlay pipeline layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    immediate_size: 0,
                });

        self.shader = Some(shader);
        self.bind_group_layout = Some(bind_group_layout);
        self.pipeline_layout = Some(pipeline_layout);
        self.pipelines.clear();

        self.bind_group = None;
        self.uniform_ubo = None;
        self.uniform_capacity = 0;
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>, key: PipelineKey) {
        if self.pipelines.contains_key(&key) {
            return;
        }
        let (Some(shader), Some(layout)) = (self.shader.as_ref(), self.pipeline_layout.as_ref())
        else {
            return;
        };

        let (entry_point, buffers, topology) = match key.shape {
            DrawShape::Ribbon => (
                "vs_ribbon",
                [PositionColorNormalVertex::segment_layout()],
                wgpu::PrimitiveTopology::TriangleList,
            ),
            DrawShape::Lines => (
                "vs_plain",
                [PositionColorVertex::layout()],
                wgpu::PrimitiveTopology::LineList,
            ),
            DrawShape::Triangles => (
                "vs_plain",
                [PositionColorVertex::layout()],
                wgpu::PrimitiveTopology::TriangleList,
            ),
        };

        let blend = match key.blend {
            BlendMode::Alpha => Some(wgpu::BlendState::ALPHA_BLENDING),
            BlendMode::Opaque => None,
        };

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("selcui overlay pipeline"),
            layout: Some(layout),

            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some(entry_point),
                compilation_options: Default::default(),
                buffers: &buffers,
            },

            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: key.cull.then_some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: key.depth_write,
                depth_compare: key.depth_compare,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),

            multiview_mask: None,
            cache: None,
        });

        log::debug!("built overlay pipeline {:?}", key);
        self.pipelines.insert(key, pipeline);
    }

    fn ensure_uniform_capacity(&mut self, ctx: &RenderCtx<'_>, draws: usize) {
        if draws <= self.uniform_capacity && self.uniform_ubo.is_some() && self.bind_group.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let new_cap = draws.next_power_of_two().max(16);
        let ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("selcui overlay frame ubo"),
            size: new_cap as u64 * self.uniform_stride(),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("selcui overlay bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &ubo,
                    offset: 0,
                    size: wgpu::BufferSize::new(FRAME_UNIFORM_SIZE),
                }),
            }],
        });

        self.uniform_ubo = Some(ubo);
        self.bind_group = Some(bind_group);
        self.uniform_capacity = new_cap;
    }

    fn write_uniforms(&self, ctx: &RenderCtx<'_>, draws: &[PendingDraw]) {
        let Some(ubo) = self.uniform_ubo.as_ref() else { return };
        let stride = self.uniform_stride() as usize;

        let mut bytes = vec![0u8; stride * draws.len()];
        for (i, d) in draws.iter().enumerate() {
            let u = FrameUniform {
                view_proj: ctx.view_proj.to_cols_array_2d(),
                viewport: [ctx.viewport.width.max(1.0), ctx.viewport.height.max(1.0)],
                line_width: d.line_width,
                _pad: 0.0,
            };
            let at = i * stride;
            bytes[at..at + FRAME_UNIFORM_SIZE as usize].copy_from_slice(bytemuck::bytes_of(&u));
        }
        ctx.queue.write_buffer(ubo, 0, &bytes);
    }

    fn ensure_vertex_capacity(&mut self, ctx: &RenderCtx<'_>, required: u64) {
        if required <= self.vertex_capacity && self.vertex_vbo.is_some() {
            return;
        }
        let new_cap = required.next_power_of_two().max(4096);
        self.vertex_vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("selcui overlay vbo"),
            size: new_cap,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.vertex_capacity = new_cap;
    }

    fn ensure_index_capacity(&mut self, ctx: &RenderCtx<'_>, required: u64) {
        if required == 0 || (required <= self.index_capacity && self.index_ibo.is_some()) {
            return;
        }
        let new_cap = required.next_power_of_two().max(1024);
        self.index_ibo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("selcui overlay ibo"),
            size: new_cap,
            usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.index_capacity = new_cap;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::sink::GpuState;
    use crate::render::vertex::VertexData;
    use crate::style::DepthFunc;

    fn caps() -> OverlayCaps {
        OverlayCaps { max_buffer_size: 1 << 20, max_vertex_attributes: 16, uniform_alignment: 256 }
    }

    fn batch(mode: DrawMode, format: VertexFormat, vertices: usize) -> Batch {
        let mut data = VertexData::new(format);
        for i in 0..vertices {
            data.push([i as f32, 0.0, 0.0], [1.0; 4], Some([1.0, 0.0, 0.0]));
        }
        Batch {
            mode,
            format,
            line_width: 2.0,
            depth_func: DepthFunc::Greater,
            state: GpuState::overlay(),
            data,
        }
    }

    #[test]
    fn quads_become_indexed_triangles() {
        let mut o = GpuOverlay::new(caps());
        o.queue_batch(batch(DrawMode::Quads, VertexFormat::PositionColor, 8)).unwrap();
        let d = &o.pending[0];
        assert_eq!(d.key.shape, DrawShape::Triangles);
        assert_eq!(d.indices, vec![0, 1, 2, 0, 2, 3, 4, 5, 6, 4, 6, 7]);
        assert_eq!(d.count, 12);
    }

    #[test]
    fn normal_lines_become_ribbon_instances() {
        let mut o = GpuOverlay::new(caps());
        o.queue_batch(batch(DrawMode::Lines, VertexFormat::PositionColorNormal, 6)).unwrap();
        let d = &o.pending[0];
        assert_eq!(d.key.shape, DrawShape::Ribbon);
        assert_eq!(d.count, 3);
        assert_eq!(d.key.depth_compare, wgpu::CompareFunction::Greater);
        assert_eq!(d.vertices.len(), 6 * std::mem::size_of::<PositionColorNormalVertex>());
    }

    #[test]
    fn depth_test_off_forces_always() {
        let mut o = GpuOverlay::new(caps());
        let mut b = batch(DrawMode::Lines, VertexFormat::PositionColor, 2);
        b.state.depth_test = false;
        o.queue_batch(b).unwrap();
        assert_eq!(o.pending[0].key.depth_compare, wgpu::CompareFunction::Always);
    }

    #[test]
    fn rejects_what_the_device_cannot_take() {
        let mut o = GpuOverlay::new(OverlayCaps { max_buffer_size: 64, ..caps() });
        assert!(matches!(
            o.queue_batch(batch(DrawMode::Lines, VertexFormat::PositionColor, 100)),
            Err(RenderError::Backend(_))
        ));
        assert!(matches!(
            o.queue_batch(batch(DrawMode::Quads, VertexFormat::PositionColorNormal, 4)),
            Err(RenderError::Backend(_))
        ));
        assert_eq!(o.pending_draws(), 0);
    }

    #[test]
    fn uniform_stride_respects_alignment() {
        let o = GpuOverlay::new(caps());
        assert_eq!(o.uniform_stride(), 256);
        let o = GpuOverlay::new(OverlayCaps { uniform_alignment: 32, ..caps() });
        assert_eq!(o.uniform_stride(), 96);
    }
}
