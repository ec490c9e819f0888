use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::coords::Transform;
use crate::paint::Paint;
use crate::path::Mesh;

use super::{RenderCtx, RenderTarget};

/// Handle to a mesh registered with the renderer.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct MeshId(usize);

/// One draw of a registered mesh: transform into window pixels plus paint.
///
/// Draws are rendered in submission order (painter's order).
#[derive(Debug, Clone)]
pub struct PathDraw {
    pub mesh: MeshId,
    pub transform: Transform,
    pub paint: Paint,
}

/// Renderer for tessellated path meshes.
///
/// Supported paints:
/// - `Paint::Solid`
/// - `Paint::Radial` (up to 4 stops; larger gradients use the first three
///   stops and the last)
///
/// CPU meshes are registered once and kept for the renderer's lifetime; all
/// GPU state (pipeline, buffers) is cached per device generation and rebuilt
/// from the CPU copies after a device loss.
#[derive(Default)]
pub struct PathRenderer {
    meshes: Vec<MeshEntry>,

    generation: Option<u64>,

    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,

    instance_vbo: Option<wgpu::Buffer>,
    instance_capacity: usize,

    warned_many_stops: bool,
}

struct MeshEntry {
    cpu: Mesh,
    gpu: Option<GpuMesh>,
}

struct GpuMesh {
    vbo: wgpu::Buffer,
    ibo: wgpu::Buffer,
    index_count: u32,
}

impl PathRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a CPU mesh and returns its handle.
    ///
    /// The CPU copy is retained so GPU buffers can be re-uploaded after a
    /// device loss.
    pub fn register_mesh(&mut self, mesh: Mesh) -> MeshId {
        let id = MeshId(self.meshes.len());
        self.meshes.push(MeshEntry { cpu: mesh, gpu: None });
        id
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draws: &[PathDraw],
    ) {
        if draws.is_empty() {
            return;
        }

        self.invalidate_stale_generation(ctx);
        self.ensure_pipeline(ctx);
        self.ensure_bindings(ctx);
        self.ensure_mesh_buffers(ctx);
        self.write_viewport_uniform(ctx);

        let instances: Vec<PathInstance> = draws
            .iter()
            .map(|d| self.resolve_instance(d))
            .collect();

        self.ensure_instance_capacity(ctx, instances.len());

        let Some(instance_vbo) = self.instance_vbo.as_ref() else { return };
        ctx.queue
            .write_buffer(instance_vbo, 0, bytemuck::cast_slice(&instances));

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("grum path pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
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
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));

        for (i, draw) in draws.iter().enumerate() {
            let Some(entry) = self.meshes.get(draw.mesh.0) else { continue };
            let Some(gpu) = entry.gpu.as_ref() else { continue };
            if gpu.index_count == 0 {
                continue;
            }

            rpass.set_vertex_buffer(0, gpu.vbo.slice(..));
            rpass.set_index_buffer(gpu.ibo.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..gpu.index_count, 0, i as u32..i as u32 + 1);
        }
    }

    // ── private helpers ────────────────────────────────────────────────────

    /// Drops every device-owned object when the device tier has been rebuilt.
    fn invalidate_stale_generation(&mut self, ctx: &RenderCtx<'_>) {
        if self.generation == Some(ctx.device_generation) {
            return;
        }

        self.pipeline = None;
        self.pipeline_format = None;
        self.bind_group_layout = None;
        self.bind_group = None;
        self.viewport_ubo = None;
        self.instance_vbo = None;
        self.instance_capacity = 0;
        for entry in &mut self.meshes {
            entry.gpu = None;
        }

        self.generation = Some(ctx.device_generation);
    }

    fn resolve_instance(&mut self, draw: &PathDraw) -> PathInstance {
        let [m11, m12, m21, m22, dx, dy] = draw.transform.to_array();

        let mut inst = PathInstance {
            xform0: [m11, m12, m21, m22],
            xform1: [dx, dy],
            grad_center_focal: [0.0; 4],
            grad_radii_kind: [1.0, 1.0, 0.0, 0.0],
            stop_pos: [0.0; 4],
            colors: [[0.0; 4]; 4],
        };

        match &draw.paint {
            Paint::Solid(c) => {
                inst.colors[0] = c.to_array();
            }
            Paint::Radial(g) => {
                if g.stops.len() > 4 && !self.warned_many_stops {
                    log::debug!("radial gradients support at most 4 stops; extra stops dropped");
                    self.warned_many_stops = true;
                }

                inst.grad_center_focal = [g.center.x, g.center.y, g.focal.x, g.focal.y];

                // Degenerate gradient (< 2 stops): solid fill from the stop.
                if g.stops.len() < 2 {
                    inst.colors[0] = g
                        .stops
                        .first()
                        .map_or([0.0; 4], |s| s.color.to_array());
                    return inst;
                }

                let count = g.stops.len().min(4);
                for i in 0..count {
                    // First three stops plus the last when over capacity.
                    let s = if i + 1 == count {
                        g.stops[g.stops.len() - 1]
                    } else {
                        g.stops[i]
                    };
                    inst.stop_pos[i] = s.t;
                    inst.colors[i] = s.color.to_array();
                }

                inst.grad_radii_kind = [
                    g.radii.x.max(1e-6),
                    g.radii.y.max(1e-6),
                    1.0,
                    count as f32,
                ];
            }
        }

        inst
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("grum path shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/path.wgsl").into()),
        });

        let bind_group_layout =
            ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("grum path bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: viewport_ubo_min_binding_size(),
                    },
                    count: None,
                }],
            });

        let pipeline_layout =
            ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("grum path pipeline layout"),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("grum path pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[mesh_vertex_layout(), PathInstance::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(premul_alpha_blend()),
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

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);
        self.bind_group = None;
        self.viewport_ubo = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.viewport_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let viewport_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("grum path viewport ubo"),
            size: std::mem::size_of::<ViewportUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("grum path bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_ubo.as_entire_binding(),
            }],
        });

        self.viewport_ubo = Some(viewport_ubo);
        self.bind_group = Some(bind_group);
    }

    fn ensure_mesh_buffers(&mut self, ctx: &RenderCtx<'_>) {
        for entry in &mut self.meshes {
            if entry.gpu.is_some() || entry.cpu.is_empty() {
                continue;
            }

            let vbo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("grum path mesh vbo"),
                contents: bytemuck::cast_slice(&entry.cpu.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
            let ibo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("grum path mesh ibo"),
                contents: bytemuck::cast_slice(&entry.cpu.indices),
                usage: wgpu::BufferUsages::INDEX,
            });

            entry.gpu = Some(GpuMesh {
                vbo,
                ibo,
                index_count: entry.cpu.indices.len() as u32,
            });
        }
    }

    fn write_viewport_uniform(&mut self, ctx: &RenderCtx<'_>) {
        let Some(ubo) = self.viewport_ubo.as_ref() else { return };
        ctx.queue.write_buffer(
            ubo,
            0,
            bytemuck::bytes_of(&ViewportUniform {
                viewport: [ctx.viewport.width.max(1.0), ctx.viewport.height.max(1.0)],
                _pad: [0.0; 2],
            }),
        );
    }

    fn ensure_instance_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.instance_capacity && self.instance_vbo.is_some() {
            return;
        }
        let new_cap = required.next_power_of_two().max(16);
        let new_size = (new_cap * std::mem::size_of::<PathInstance>()) as u64;
        self.instance_vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("grum path instance vbo"),
            size: new_size,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.instance_capacity = new_cap;
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

fn premul_alpha_blend() -> wgpu::BlendState {
    wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ViewportUniform {
    viewport: [f32; 2],
    _pad: [f32; 2], // 16-byte alignment
}

/// Returns the `wgpu` minimum binding size for the viewport uniform buffer.
fn viewport_ubo_min_binding_size() -> Option<std::num::NonZeroU64> {
    std::num::NonZeroU64::new(std::mem::size_of::<ViewportUniform>() as u64)
}

fn mesh_vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];
    wgpu::VertexBufferLayout {
        array_stride: (std::mem::size_of::<f32>() * 2) as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &ATTRS,
    }
}

/// Instance data layout (136 bytes):
///
///  offset   0  xform0             [f32; 4]   loc 1  (m11 m12 m21 m22)
///  offset  16  xform1             [f32; 2]   loc 2  (dx dy)
///  offset  24  grad_center_focal  [f32; 4]   loc 3
///  offset  40  grad_radii_kind    [f32; 4]   loc 4  (rx, ry, kind, stop count)
///  offset  56  stop_pos           [f32; 4]   loc 5
///  offset  72  colors             [[f32;4];4] loc 6..9
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct PathInstance {
    xform0: [f32; 4],
    xform1: [f32; 2],
    grad_center_focal: [f32; 4],
    grad_radii_kind: [f32; 4],
    stop_pos: [f32; 4],
    colors: [[f32; 4]; 4],
}

impl PathInstance {
    const ATTRS: [wgpu::VertexAttribute; 9] = wgpu::vertex_attr_array![
        1 => Float32x4, // xform0
        2 => Float32x2, // xform1
        3 => Float32x4, // grad_center_focal
        4 => Float32x4, // grad_radii_kind
        5 => Float32x4, // stop_pos
        6 => Float32x4, // color0
        7 => Float32x4, // color1
        8 => Float32x4, // color2
        9 => Float32x4  // color3
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PathInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::{Color, ColorStop, Paint, RadialGradient};

    fn draw_with(paint: Paint) -> PathDraw {
        PathDraw {
            mesh: MeshId(0),
            transform: Transform::IDENTITY,
            paint,
        }
    }

    #[test]
    fn solid_paint_resolves_to_kind_zero() {
        let mut r = PathRenderer::new();
        let inst = r.resolve_instance(&draw_with(Paint::solid(Color::opaque(0.4, 0.4, 0.4))));

        assert_eq!(inst.grad_radii_kind[2], 0.0);
        assert_eq!(inst.colors[0], [0.4, 0.4, 0.4, 1.0]);
    }

    #[test]
    fn radial_paint_carries_stops_in_order() {
        let mut r = PathRenderer::new();
        let g = RadialGradient::centered(
            150.0,
            vec![
                ColorStop::new(0.0, Color::opaque(0.0, 1.0, 0.0)),
                ColorStop::new(0.6, Color::opaque(0.0, 0.7, 0.0)),
                ColorStop::new(1.0, Color::opaque(0.0, 0.3, 0.0)),
            ],
        );
        let inst = r.resolve_instance(&draw_with(Paint::Radial(g)));

        assert_eq!(inst.grad_radii_kind, [150.0, 150.0, 1.0, 3.0]);
        assert_eq!(inst.stop_pos[0], 0.0);
        assert_eq!(inst.stop_pos[1], 0.6);
        assert_eq!(inst.stop_pos[2], 1.0);
    }

    #[test]
    fn oversized_gradient_keeps_first_three_and_last() {
        let mut r = PathRenderer::new();
        let stops = (0..6)
            .map(|i| ColorStop::new(i as f32 / 5.0, Color::opaque(0.0, 0.0, i as f32 / 5.0)))
            .collect();
        let inst = r.resolve_instance(&draw_with(Paint::Radial(RadialGradient::centered(10.0, stops))));

        assert_eq!(inst.grad_radii_kind[3], 4.0);
        assert_eq!(inst.stop_pos[3], 1.0, "last stop preserved");
    }

    #[test]
    fn transform_lands_in_instance_fields() {
        let mut r = PathRenderer::new();
        let t = Transform::scale(3.0) * Transform::translation(400.0, 300.0);
        let inst = r.resolve_instance(&PathDraw {
            mesh: MeshId(0),
            transform: t,
            paint: Paint::solid(Color::opaque(0.0, 0.0, 0.0)),
        });

        assert_eq!(inst.xform0, [3.0, 0.0, 0.0, 3.0]);
        assert_eq!(inst.xform1, [400.0, 300.0]);
    }

    #[test]
    fn register_mesh_hands_out_sequential_ids() {
        let mut r = PathRenderer::new();
        let a = r.register_mesh(Mesh::default());
        let b = r.register_mesh(Mesh::default());
        assert_ne!(a, b);
    }

    #[test]
    fn instance_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<PathInstance>(), 136);
    }
}
