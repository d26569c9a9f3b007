use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::coords::Rect;
use crate::paint::Color;
use crate::scene::{ClipRegion, RectCmd, RoundedRectCmd};

use super::common::{
    create_viewport_ubo, ensure_instance_buffer, pack_clip, premul_alpha_blend, triangle_list,
    viewport_layout_entry, QuadVertex, ViewportUniform, QUAD_INDICES, QUAD_VERTICES,
};
use super::RenderCtx;

/// Renders rects and rounded rects as SDF quads.
///
/// Fill and a centred stroke are resolved in one fragment pass from the same
/// signed distance, so the outline never drifts from the fill. Usage per frame:
/// `begin`, `push_*` in paint order, `prepare`, then `draw` per batch.
#[derive(Default)]
pub struct ShapeRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,

    quad_vbo: Option<wgpu::Buffer>,
    quad_ibo: Option<wgpu::Buffer>,

    instances: Vec<ShapeInstance>,
    instance_vbo: Option<wgpu::Buffer>,
    instance_capacity: usize,
}

impl ShapeRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) {
        self.instances.clear();
    }

    /// Returns the number of instances added (0 or 1).
    pub fn push_rect(&mut self, cmd: &RectCmd, clip: Option<ClipRegion>) -> u32 {
        self.push(cmd.rect, 0.0, Some(cmd.color), None, clip)
    }

    pub fn push_rounded_rect(&mut self, cmd: &RoundedRectCmd, clip: Option<ClipRegion>) -> u32 {
        let stroke = cmd.stroke.map(|s| (s.width, s.color));
        self.push(cmd.rect, cmd.radius, cmd.fill, stroke, clip)
    }

    fn push(
        &mut self,
        r: Rect,
        radius: f32,
        fill: Option<Color>,
        stroke: Option<(f32, Color)>,
        clip: Option<ClipRegion>,
    ) -> u32 {
        // Negative extents are degenerate, not flipped; hit tests agree.
        if r.is_empty() || !r.is_finite() {
            return 0;
        }
        let Some(clip) = pack_clip(clip) else {
            return 0;
        };
        let (stroke_width, stroke_color) = match stroke {
            Some((w, c)) if w > 0.0 => (w, c),
            _ => (0.0, Color::transparent()),
        };
        let fill = fill.unwrap_or_else(Color::transparent);
        if fill.a <= 0.0 && stroke_color.a <= 0.0 {
            return 0;
        }

        self.instances.push(ShapeInstance {
            origin: [r.origin.x, r.origin.y],
            size: [r.size.x, r.size.y],
            radius_stroke: [r.clamp_radius(radius), stroke_width],
            fill: fill.to_array(),
            stroke: stroke_color.to_array(),
            clip_rect: clip.rect,
            clip_params: clip.params,
        });
        1
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    /// Creates GPU resources on first use and uploads this frame's instances.
    pub fn prepare(&mut self, ctx: &RenderCtx<'_>) {
        self.ensure_pipeline(ctx);
        self.ensure_static_buffers(ctx);

        if let Some(ubo) = self.viewport_ubo.as_ref() {
            ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&ViewportUniform::new(ctx.viewport)));
        }

        if self.instances.is_empty() {
            return;
        }
        ensure_instance_buffer(
            ctx.device,
            "lumen shape instance vbo",
            &mut self.instance_vbo,
            &mut self.instance_capacity,
            self.instances.len(),
            std::mem::size_of::<ShapeInstance>(),
        );
        if let Some(vbo) = self.instance_vbo.as_ref() {
            ctx.queue.write_buffer(vbo, 0, bytemuck::cast_slice(&self.instances));
        }
    }

    /// Draws `range` of this frame's instances into an open pass.
    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, range: std::ops::Range<u32>) {
        let (Some(pipeline), Some(bind_group), Some(quad_vbo), Some(quad_ibo), Some(instance_vbo)) = (
            self.pipeline.as_ref(),
            self.bind_group.as_ref(),
            self.quad_vbo.as_ref(),
            self.quad_ibo.as_ref(),
            self.instance_vbo.as_ref(),
        ) else {
            return;
        };

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, quad_vbo.slice(..));
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.set_index_buffer(quad_ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..6, 0, range);
    }

    // ── lazy init ──────────────────────────────────────────────────────────

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("lumen shape shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/shape.wgsl").into()),
        });

        let bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("lumen shape bgl"),
            entries: &[viewport_layout_entry()],
        });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("lumen shape pipeline layout"),
            bind_group_layouts: &[&bgl],
            immediate_size: 0,
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("lumen shape pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[QuadVertex::layout(), ShapeInstance::layout()],
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
            primitive: triangle_list(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let viewport_ubo = create_viewport_ubo(ctx.device, "lumen shape viewport ubo");
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("lumen shape bind group"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_ubo.as_entire_binding(),
            }],
        });

        log::debug!("shape pipeline built for {:?}", ctx.surface_format);
        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group = Some(bind_group);
        self.viewport_ubo = Some(viewport_ubo);
    }

    fn ensure_static_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.quad_vbo.is_some() && self.quad_ibo.is_some() {
            return;
        }
        self.quad_vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("lumen shape quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        }));
        self.quad_ibo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("lumen shape quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }
}

/// Instance data layout (80 bytes):
///
///  offset  0  origin         [f32; 2]   loc 1
///  offset  8  size           [f32; 2]   loc 2
///  offset 16  radius_stroke  [f32; 2]   loc 3  (.x radius, .y stroke width)
///  offset 24  fill           [f32; 4]   loc 4
///  offset 40  stroke         [f32; 4]   loc 5
///  offset 56  clip_rect      [f32; 4]   loc 6  (min.xy, max.xy)
///  offset 72  clip_params    [f32; 2]   loc 7  (.x radius, .y enabled)
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ShapeInstance {
    origin: [f32; 2],
    size: [f32; 2],
    radius_stroke: [f32; 2],
    fill: [f32; 4],
    stroke: [f32; 4],
    clip_rect: [f32; 4],
    clip_params: [f32; 2],
}

impl ShapeInstance {
    const ATTRS: [wgpu::VertexAttribute; 7] = wgpu::vertex_attr_array![
        1 => Float32x2,
        2 => Float32x2,
        3 => Float32x2,
        4 => Float32x4,
        5 => Float32x4,
        6 => Float32x4,
        7 => Float32x2
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ShapeInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Stroke;

    fn color() -> Color {
        Color::from_premul(1.0, 1.0, 1.0, 1.0)
    }

    #[test]
    fn degenerate_rect_is_skipped() {
        let mut r = ShapeRenderer::new();
        let cmd = RectCmd { rect: Rect::new(0.0, 0.0, 0.0, 10.0), color: color() };
        assert_eq!(r.push_rect(&cmd, None), 0);
        assert_eq!(r.instance_count(), 0);
    }

    #[test]
    fn negative_extent_is_skipped_not_flipped() {
        let mut r = ShapeRenderer::new();
        let cmd = RoundedRectCmd::new(Rect::new(100.0, 100.0, -50.0, 30.0), 10.0, Some(color()), None);
        assert_eq!(r.push_rounded_rect(&cmd, None), 0);
        let cmd = RectCmd { rect: Rect::new(0.0, 0.0, 10.0, -1.0), color: color() };
        assert_eq!(r.push_rect(&cmd, None), 0);
        assert_eq!(r.instance_count(), 0);
    }

    #[test]
    fn fully_clipped_shape_is_skipped() {
        let mut r = ShapeRenderer::new();
        let cmd = RectCmd { rect: Rect::new(0.0, 0.0, 10.0, 10.0), color: color() };
        assert_eq!(r.push_rect(&cmd, Some(ClipRegion::empty())), 0);
    }

    #[test]
    fn stroke_only_rounded_rect_is_kept() {
        let mut r = ShapeRenderer::new();
        let cmd = RoundedRectCmd::new(
            Rect::new(0.0, 0.0, 40.0, 20.0),
            30.0,
            None,
            Some(Stroke::new(1.0, color())),
        );
        assert_eq!(r.push_rounded_rect(&cmd, None), 1);
        assert_eq!(r.instances[0].radius_stroke, [10.0, 1.0]);
    }

    #[test]
    fn invisible_shape_is_skipped() {
        let mut r = ShapeRenderer::new();
        let cmd = RoundedRectCmd::new(Rect::new(0.0, 0.0, 40.0, 20.0), 4.0, None, None);
        assert_eq!(r.push_rounded_rect(&cmd, None), 0);
    }

    #[test]
    fn instance_stride_matches_layout_doc() {
        assert_eq!(std::mem::size_of::<ShapeInstance>(), 80);
    }
}
