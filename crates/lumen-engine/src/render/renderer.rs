use crate::scene::{DrawCmd, DrawList};
use crate::text::FontSystem;

use super::batch::{plan_batches, BatchKind};
use super::{RenderCtx, RenderTarget, ShapeRenderer, TextRenderer};

/// Replays a `DrawList` in recorded order.
///
/// All commands go through one render pass; the pipeline switches only where
/// the command kind changes, so text painted after a shape stays on top of it
/// and vice versa.
#[derive(Default)]
pub struct Renderer {
    shapes: ShapeRenderer,
    text: TextRenderer,
    runs: Vec<(BatchKind, u32)>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws `list` into `target`. Returns `true` when glyphs were dropped
    /// because the atlas filled up; the next frame redraws them.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        list: &DrawList,
        fonts: &FontSystem,
    ) -> bool {
        self.shapes.begin();
        self.text.begin();
        self.runs.clear();

        for item in list.items() {
            let run = match &item.cmd {
                DrawCmd::Rect(cmd) => (BatchKind::Shape, self.shapes.push_rect(cmd, item.clip)),
                DrawCmd::RoundedRect(cmd) => {
                    (BatchKind::Shape, self.shapes.push_rounded_rect(cmd, item.clip))
                }
                DrawCmd::Text(cmd) => (BatchKind::Text, self.text.push(ctx, cmd, item.clip, fonts)),
            };
            self.runs.push(run);
        }

        let atlas_full = self.text.atlas_full();
        let batches = plan_batches(self.runs.iter().copied());
        if batches.is_empty() {
            return atlas_full;
        }

        self.shapes.prepare(ctx);
        self.text.prepare(ctx);

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("lumen draw list pass"),
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

        for batch in &batches {
            match batch.kind {
                BatchKind::Shape => self.shapes.draw(&mut rpass, batch.instances.clone()),
                BatchKind::Text => self.text.draw(&mut rpass, batch.instances.clone()),
            }
        }

        log::trace!(
            "drew {} items in {} batches ({} shapes, {} glyph runs)",
            list.len(),
            batches.len(),
            self.shapes.instance_count(),
            self.runs.iter().filter(|(k, n)| *k == BatchKind::Text && *n > 0).count(),
        );
        atlas_full
    }
}
