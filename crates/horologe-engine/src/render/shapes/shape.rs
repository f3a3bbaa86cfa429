use std::ops::Range;

use bytemuck::{Pod, Zeroable};

use crate::render::RenderCtx;
use crate::scene::{DrawCmd, LineCap};

use super::common::{
    create_instanced_pipeline, create_viewport_ubo, viewport_ubo_layout_entry, InstanceBuffer,
    UnitQuad, ViewportUniform, QUAD_INDEX_COUNT,
};

const KIND_ROUNDED_RECT: f32 = 0.0;
const KIND_ELLIPSE: f32 = 1.0;
const KIND_LINE: f32 = 2.0;

const CAP_BUTT: f32 = 0.0;
const CAP_ROUND: f32 = 1.0;

/// Renderer for every non-text `DrawCmd`.
///
/// Rounded rectangles, ellipses and stroked segments share one signed-distance
/// pipeline, so an arbitrary interleaving of them costs one instanced draw per
/// contiguous run instead of one pass per shape type. Coverage is computed per
/// fragment with a one-pixel analytic AA ramp.
#[derive(Default)]
pub struct ShapeRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,

    quad: Option<UnitQuad>,
    instances: InstanceBuffer,
}

impl ShapeRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates GPU resources on first use and uploads this frame's instances.
    pub fn prepare(&mut self, ctx: &RenderCtx<'_>, instances: &[ShapeInstance]) {
        self.ensure_pipeline(ctx);
        self.ensure_bindings(ctx);
        if self.quad.is_none() {
            self.quad = Some(UnitQuad::new(ctx, "horologe shape"));
        }

        if let Some(ubo) = self.viewport_ubo.as_ref() {
            ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&ViewportUniform::from_ctx(ctx)));
        }
        self.instances.upload(ctx, "horologe shape instance vbo", instances);
    }

    /// Draws `range` of the instances uploaded by the last [`prepare`](Self::prepare).
    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, range: Range<u32>) {
        if range.is_empty() {
            return;
        }

        let Some(pipeline)     = self.pipeline.as_ref()    else { return; };
        let Some(bind_group)   = self.bind_group.as_ref()  else { return; };
        let Some(quad)         = self.quad.as_ref()        else { return; };
        let Some(instance_vbo) = self.instances.buffer()   else { return; };

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, quad.vbo.slice(..));
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.set_index_buffer(quad.ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..QUAD_INDEX_COUNT, 0, range);
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("horologe shape bgl"),
            entries: &[viewport_ubo_layout_entry()],
        });

        let pipeline = create_instanced_pipeline(
            ctx,
            "horologe shape",
            include_str!("shaders/shape.wgsl"),
            &bgl,
            ShapeInstance::layout(),
        );

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bgl);
        self.bind_group = None;
        self.viewport_ubo = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.viewport_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return; };

        let viewport_ubo = create_viewport_ubo(ctx, "horologe shape viewport ubo");
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("horologe shape bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_ubo.as_entire_binding(),
            }],
        });

        self.viewport_ubo = Some(viewport_ubo);
        self.bind_group = Some(bind_group);
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Instance data layout (64 bytes):
///
///  offset  0  p0      [f32; 2]   loc 1  rect min | ellipse center | line start
///  offset  8  p1      [f32; 2]   loc 2  rect max | ellipse radii  | line end
///  offset 16  params  [f32; 4]   loc 3  rect corner radii (tl, tr, br, bl)
///                                       | line (half width, cap, 0, 0)
///  offset 32  color   [f32; 4]   loc 4  premultiplied
///  offset 48  kind    [f32; 4]   loc 5  .x = shape kind
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ShapeInstance {
    p0: [f32; 2],
    p1: [f32; 2],
    params: [f32; 4],
    color: [f32; 4],
    kind: [f32; 4],
}

impl ShapeInstance {
    const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        1 => Float32x2, // p0
        2 => Float32x2, // p1
        3 => Float32x4, // params
        4 => Float32x4, // color
        5 => Float32x4  // kind
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ShapeInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }

    /// Converts a scene command into instance data.
    ///
    /// Returns `None` for text (handled by the glyph pipeline) and for shapes
    /// that would not cover a single fragment.
    pub fn from_cmd(cmd: &DrawCmd) -> Option<Self> {
        match cmd {
            DrawCmd::RoundedRect(rr) => {
                let r = rr.rect.normalized();
                if r.is_empty() || !r.is_finite() {
                    return None;
                }
                let limit = r.size.x.min(r.size.y) * 0.5;
                let max = r.max();
                Some(Self {
                    p0: [r.origin.x, r.origin.y],
                    p1: [max.x, max.y],
                    params: rr.radii.clamped(limit).to_array(),
                    color: rr.color.to_array(),
                    kind: [KIND_ROUNDED_RECT, 0.0, 0.0, 0.0],
                })
            }
            DrawCmd::Ellipse(e) => {
                if e.radii.x <= 0.0 || e.radii.y <= 0.0 || !e.center.is_finite() {
                    return None;
                }
                Some(Self {
                    p0: [e.center.x, e.center.y],
                    p1: [e.radii.x, e.radii.y],
                    params: [0.0; 4],
                    color: e.color.to_array(),
                    kind: [KIND_ELLIPSE, 0.0, 0.0, 0.0],
                })
            }
            DrawCmd::Line(l) => {
                if l.width <= 0.0 || !l.from.is_finite() || !l.to.is_finite() {
                    return None;
                }
                // A butt-capped segment of zero length has no area; a round
                // one still paints a dot.
                if l.cap == LineCap::Butt && l.length() <= 0.0 {
                    return None;
                }
                let cap = match l.cap {
                    LineCap::Butt => CAP_BUTT,
                    LineCap::Round => CAP_ROUND,
                };
                Some(Self {
                    p0: [l.from.x, l.from.y],
                    p1: [l.to.x, l.to.y],
                    params: [l.width * 0.5, cap, 0.0, 0.0],
                    color: l.color.to_array(),
                    kind: [KIND_LINE, 0.0, 0.0, 0.0],
                })
            }
            DrawCmd::Text(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{CornerRadii, Rect, Vec2};
    use crate::paint::Color;
    use crate::scene::DrawList;
    use crate::scene::ZIndex;
    use crate::text::FontId;

    fn single(f: impl FnOnce(&mut DrawList)) -> DrawCmd {
        let mut list = DrawList::new();
        f(&mut list);
        list.into_commands().remove(0)
    }

    const Z: ZIndex = ZIndex::new(0);

    #[test]
    fn instance_is_64_bytes() {
        assert_eq!(std::mem::size_of::<ShapeInstance>(), 64);
    }

    // ── rounded rect ──────────────────────────────────────────────────────

    #[test]
    fn rounded_rect_radii_clamped_to_half_side() {
        let cmd = single(|l| {
            l.push_rounded_rect(Z, Rect::new(0.0, 0.0, 10.0, 20.0), CornerRadii::all(50.0), Color::WHITE)
        });
        let inst = ShapeInstance::from_cmd(&cmd).unwrap();
        assert_eq!(inst.params, [5.0; 4]);
        assert_eq!(inst.p1, [10.0, 20.0]);
    }

    #[test]
    fn empty_rounded_rect_is_skipped() {
        let cmd = single(|l| l.push_solid_rounded_rect(Z, Rect::new(4.0, 4.0, 0.0, 0.0), 2.0, Color::WHITE));
        assert!(ShapeInstance::from_cmd(&cmd).is_none());
    }

    // ── ellipse ───────────────────────────────────────────────────────────

    #[test]
    fn circle_becomes_ellipse_instance() {
        let cmd = single(|l| l.push_solid_circle(Z, Vec2::new(3.0, 4.0), 8.0, Color::BLACK));
        let inst = ShapeInstance::from_cmd(&cmd).unwrap();
        assert_eq!(inst.kind[0], KIND_ELLIPSE);
        assert_eq!(inst.p0, [3.0, 4.0]);
        assert_eq!(inst.p1, [8.0, 8.0]);
    }

    #[test]
    fn zero_radius_circle_is_skipped() {
        let cmd = single(|l| l.push_solid_circle(Z, Vec2::zero(), 0.0, Color::BLACK));
        assert!(ShapeInstance::from_cmd(&cmd).is_none());
    }

    // ── line ──────────────────────────────────────────────────────────────

    #[test]
    fn line_stores_half_width_and_cap() {
        let cmd = single(|l| {
            l.push_line(Z, Vec2::zero(), Vec2::new(0.0, 10.0), 3.0, LineCap::Round, Color::BLACK)
        });
        let inst = ShapeInstance::from_cmd(&cmd).unwrap();
        assert_eq!(inst.params[0], 1.5);
        assert_eq!(inst.params[1], CAP_ROUND);
    }

    #[test]
    fn degenerate_lines() {
        let round_dot = single(|l| {
            l.push_line(Z, Vec2::zero(), Vec2::zero(), 2.0, LineCap::Round, Color::BLACK)
        });
        let butt_dot = single(|l| {
            l.push_line(Z, Vec2::zero(), Vec2::zero(), 2.0, LineCap::Butt, Color::BLACK)
        });
        let hairline = single(|l| {
            l.push_line(Z, Vec2::zero(), Vec2::new(5.0, 0.0), 0.0, LineCap::Round, Color::BLACK)
        });
        assert!(ShapeInstance::from_cmd(&round_dot).is_some());
        assert!(ShapeInstance::from_cmd(&butt_dot).is_none());
        assert!(ShapeInstance::from_cmd(&hairline).is_none());
    }

    #[test]
    fn text_is_not_a_shape() {
        let cmd = single(|l| l.push_text(Z, "12", FontId::default(), 12.0, Color::BLACK, Vec2::zero()));
        assert!(ShapeInstance::from_cmd(&cmd).is_none());
    }
}
