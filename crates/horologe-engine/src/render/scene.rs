use std::ops::Range;

use crate::scene::{DrawCmd, DrawList};
use crate::text::FontSystem;

use super::shapes::{GlyphInstance, ShapeInstance, ShapeRenderer, TextRenderer};
use super::{RenderCtx, RenderTarget};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum BatchKind {
    Shapes,
    Glyphs,
}

/// A contiguous run of instances drawn by one pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Batch {
    kind: BatchKind,
    range: Range<u32>,
}

/// Extends the trailing batch with `count` instances of `kind` starting at
/// `first`, or opens a new one when the pipeline changes.
fn extend_batches(batches: &mut Vec<Batch>, kind: BatchKind, first: u32, count: u32) {
    if count == 0 {
        return;
    }
    match batches.last_mut() {
        Some(last) if last.kind == kind && last.range.end == first => {
            last.range.end += count;
        }
        _ => batches.push(Batch { kind, range: first..first + count }),
    }
}

/// Draws a [`DrawList`] in paint order.
///
/// Shapes and glyphs live in separate pipelines, but a clock face interleaves
/// them (numerals sit above the rims and below the hands). Commands are walked
/// once in paint order and grouped into runs; each run becomes one instanced
/// draw so later commands always composite over earlier ones.
#[derive(Default)]
pub struct SceneRenderer {
    shapes: ShapeRenderer,
    text: TextRenderer,

    shape_instances: Vec<ShapeInstance>,
    glyph_instances: Vec<GlyphInstance>,
    batches: Vec<Batch>,
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encodes one render pass that draws `draw_list` over the target's
    /// current contents.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
        fonts: &FontSystem,
    ) {
        let Self { shapes, text, shape_instances, glyph_instances, batches } = self;
        shape_instances.clear();
        glyph_instances.clear();
        batches.clear();

        for item in draw_list.iter_in_paint_order() {
            match &item.cmd {
                DrawCmd::Text(cmd) => {
                    let first = glyph_instances.len() as u32;
                    text.layout(ctx, cmd, fonts, glyph_instances);
                    let count = glyph_instances.len() as u32 - first;
                    extend_batches(batches, BatchKind::Glyphs, first, count);
                }
                cmd => {
                    if let Some(inst) = ShapeInstance::from_cmd(cmd) {
                        let first = shape_instances.len() as u32;
                        shape_instances.push(inst);
                        extend_batches(batches, BatchKind::Shapes, first, 1);
                    }
                }
            }
        }

        if batches.is_empty() {
            return;
        }

        shapes.prepare(ctx, shape_instances);
        text.prepare(ctx, glyph_instances);

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("horologe scene pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                depth_slice: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        for batch in batches.iter() {
            match batch.kind {
                BatchKind::Shapes => shapes.draw(&mut rpass, batch.range.clone()),
                BatchKind::Glyphs => text.draw(&mut rpass, batch.range.clone()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(kind: BatchKind, range: Range<u32>) -> Batch {
        Batch { kind, range }
    }

    #[test]
    fn same_kind_runs_merge() {
        let mut b = Vec::new();
        extend_batches(&mut b, BatchKind::Shapes, 0, 1);
        extend_batches(&mut b, BatchKind::Shapes, 1, 1);
        extend_batches(&mut b, BatchKind::Shapes, 2, 1);
        assert_eq!(b, vec![batch(BatchKind::Shapes, 0..3)]);
    }

    #[test]
    fn kind_change_splits_and_ranges_stay_per_buffer() {
        let mut b = Vec::new();
        extend_batches(&mut b, BatchKind::Shapes, 0, 1);
        extend_batches(&mut b, BatchKind::Glyphs, 0, 2);
        extend_batches(&mut b, BatchKind::Shapes, 1, 1);
        extend_batches(&mut b, BatchKind::Glyphs, 2, 5);
        assert_eq!(b, vec![
            batch(BatchKind::Shapes, 0..1),
            batch(BatchKind::Glyphs, 0..2),
            batch(BatchKind::Shapes, 1..2),
            batch(BatchKind::Glyphs, 2..7),
        ]);
    }

    #[test]
    fn empty_runs_do_not_split() {
        let mut b = Vec::new();
        extend_batches(&mut b, BatchKind::Shapes, 0, 1);
        extend_batches(&mut b, BatchKind::Glyphs, 0, 0);
        extend_batches(&mut b, BatchKind::Shapes, 1, 1);
        assert_eq!(b, vec![batch(BatchKind::Shapes, 0..2)]);
    }
}
