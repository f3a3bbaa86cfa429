use std::collections::HashMap;
use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use fontdue::layout::{CoordinateSystem, GlyphRasterConfig, Layout, LayoutSettings, TextStyle};

use crate::coords::Vec2;
use crate::render::RenderCtx;
use crate::scene::shapes::text::TextCmd;
use crate::text::FontSystem;

use super::common::{
    create_instanced_pipeline, create_viewport_ubo, viewport_ubo_layout_entry, InstanceBuffer,
    UnitQuad, ViewportUniform, QUAD_INDEX_COUNT,
};

// ── atlas constants ────────────────────────────────────────────────────────

const ATLAS_SIZE: u32 = 1024;
const GLYPH_PADDING: u32 = 1; // pixels between glyphs in the atlas

struct CachedGlyph {
    uv_min: [f32; 2],
    uv_max: [f32; 2],
}

/// Renderer for `DrawCmd::Text`.
///
/// Maintains a 1024 × 1024 R8Unorm glyph atlas. Glyphs are rasterized on first
/// use via fontdue at the window's physical scale and cached for the renderer's
/// lifetime. A clock face only ever shows digits, a colon, a space and "AM"/"PM"
/// in a couple of sizes, so the atlas fills once and stays warm; it is rebuilt
/// only when it runs out of room after a resize to a new size class.
pub struct TextRenderer {
    // pipeline
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,

    // bindings (rebuilt when the atlas changes)
    bind_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,
    sampler: Option<wgpu::Sampler>,

    // atlas
    atlas_texture: Option<wgpu::Texture>,
    atlas_view: Option<wgpu::TextureView>,
    shelf: ShelfPacker,
    atlas_generation: u64,
    bind_group_generation: u64,

    glyph_cache: HashMap<GlyphRasterConfig, CachedGlyph>,

    quad: Option<UnitQuad>,
    instances: InstanceBuffer,

    layout: Layout<()>,
    warned_missing_font: bool,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            pipeline_format: None,
            pipeline: None,
            bind_group_layout: None,
            bind_group: None,
            viewport_ubo: None,
            sampler: None,
            atlas_texture: None,
            atlas_view: None,
            shelf: ShelfPacker::new(ATLAS_SIZE),
            atlas_generation: 0,
            bind_group_generation: u64::MAX,
            glyph_cache: HashMap::new(),
            quad: None,
            instances: InstanceBuffer::default(),
            layout: Layout::new(CoordinateSystem::PositiveYDown),
            warned_missing_font: false,
        }
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lays out `cmd` centered on its anchor and appends one instance per
    /// visible glyph to `out`, rasterizing glyphs into the atlas as needed.
    pub fn layout(
        &mut self,
        ctx: &RenderCtx<'_>,
        cmd: &TextCmd,
        fonts: &FontSystem,
        out: &mut Vec<GlyphInstance>,
    ) {
        if cmd.text.is_empty() || cmd.size <= 0.0 {
            return;
        }

        let Some(font) = fonts.get(cmd.font) else {
            if !self.warned_missing_font {
                log::warn!("TextRenderer: unknown FontId {:?}, text will not be drawn", cmd.font);
                self.warned_missing_font = true;
            }
            return;
        };

        self.ensure_atlas(ctx);

        let scale = raster_scale(ctx.scale_factor);
        let extent = fonts.measure_text_scaled(&cmd.text, cmd.font, cmd.size, scale);
        let origin = centered_origin(cmd.center, extent, scale);
        let color = cmd.color.to_array();

        self.layout.reset(&LayoutSettings {
            x: origin.x,
            y: origin.y,
            ..LayoutSettings::default()
        });
        self.layout.append(&[font], &TextStyle::new(&cmd.text, cmd.size * scale, 0));

        // Snapshot glyph positions so the borrow on `self.layout` ends before
        // `self.place_glyph` needs `&mut self`.
        let glyphs: Vec<(GlyphRasterConfig, f32, f32, usize, usize)> = self
            .layout
            .glyphs()
            .iter()
            .filter(|g| g.char_data.rasterize() && g.width > 0 && g.height > 0)
            .map(|g| (g.key, g.x, g.y, g.width, g.height))
            .collect();

        for (key, x, y, w, h) in glyphs {
            if !self.glyph_cache.contains_key(&key) {
                let (metrics, bitmap) = font.rasterize_config(key);
                if metrics.width == 0 || metrics.height == 0 {
                    continue;
                }
                let Some(entry) =
                    self.place_glyph(ctx, &bitmap, metrics.width as u32, metrics.height as u32)
                else {
                    continue;
                };
                self.glyph_cache.insert(key, entry);
            }

            let Some(cached) = self.glyph_cache.get(&key) else { continue; };

            // Layout ran in physical pixels; instances are in logical pixels.
            out.push(GlyphInstance {
                dst_min: [x / scale, y / scale],
                dst_max: [(x + w as f32) / scale, (y + h as f32) / scale],
                uv_min: cached.uv_min,
                uv_max: cached.uv_max,
                color,
            });
        }
    }

    /// Creates GPU resources on first use and uploads this frame's glyphs.
    pub fn prepare(&mut self, ctx: &RenderCtx<'_>, instances: &[GlyphInstance]) {
        self.ensure_pipeline(ctx);
        self.ensure_atlas(ctx);
        self.ensure_sampler(ctx);
        self.ensure_bindings(ctx);
        if self.quad.is_none() {
            self.quad = Some(UnitQuad::new(ctx, "horologe text"));
        }

        if let Some(ubo) = self.viewport_ubo.as_ref() {
            ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&ViewportUniform::from_ctx(ctx)));
        }
        self.instances.upload(ctx, "horologe text instance vbo", instances);
    }

    /// Draws `range` of the glyphs uploaded by the last [`prepare`](Self::prepare).
    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, range: Range<u32>) {
        if range.is_empty() {
            return;
        }

        let Some(pipeline)     = self.pipeline.as_ref()   else { return; };
        let Some(bind_group)   = self.bind_group.as_ref() else { return; };
        let Some(quad)         = self.quad.as_ref()       else { return; };
        let Some(instance_vbo) = self.instances.buffer()  else { return; };

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, quad.vbo.slice(..));
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.set_index_buffer(quad.ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..QUAD_INDEX_COUNT, 0, range);
    }

    // ── atlas helpers ──────────────────────────────────────────────────────

    fn place_glyph(
        &mut self,
        ctx: &RenderCtx<'_>,
        bitmap: &[u8],
        w: u32,
        h: u32,
    ) -> Option<CachedGlyph> {
        let (gx, gy) = match self.shelf.allocate(w, h) {
            Some(pos) => pos,
            None => {
                // Drop every cached glyph and start over; glyphs already laid
                // out this frame would point at stale cells, so this frame may
                // show a few wrong glyphs before the next one repopulates.
                log::warn!("TextRenderer: glyph atlas full ({ATLAS_SIZE}×{ATLAS_SIZE}), resetting");
                self.reset_atlas();
                self.shelf.allocate(w, h)?
            }
        };

        let atlas = self.atlas_texture.as_ref()?;

        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: atlas,
                mip_level: 0,
                origin: wgpu::Origin3d { x: gx, y: gy, z: 0 },
                aspect: wgpu::TextureAspect::All,
            },
            bitmap,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(w),
                rows_per_image: Some(h),
            },
            wgpu::Extent3d { width: w, height: h, depth_or_array_layers: 1 },
        );

        let atlas_f = ATLAS_SIZE as f32;
        Some(CachedGlyph {
            uv_min: [gx as f32 / atlas_f,       gy as f32 / atlas_f],
            uv_max: [(gx + w) as f32 / atlas_f, (gy + h) as f32 / atlas_f],
        })
    }

    fn reset_atlas(&mut self) {
        self.glyph_cache.clear();
        self.shelf = ShelfPacker::new(ATLAS_SIZE);
    }

    // ── lazy-init helpers ──────────────────────────────────────────────────

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("horologe text bgl"),
            entries: &[
                viewport_ubo_layout_entry(),
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline = create_instanced_pipeline(
            ctx,
            "horologe text",
            include_str!("shaders/text.wgsl"),
            &bgl,
            GlyphInstance::layout(),
        );

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bgl);
        self.bind_group = None;
        self.viewport_ubo = None;
        self.bind_group_generation = u64::MAX;
    }

    fn ensure_atlas(&mut self, ctx: &RenderCtx<'_>) {
        if self.atlas_texture.is_some() {
            return;
        }

        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("horologe text atlas"),
            size: wgpu::Extent3d {
                width: ATLAS_SIZE,
                height: ATLAS_SIZE,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        self.atlas_view = Some(texture.create_view(&wgpu::TextureViewDescriptor::default()));
        self.atlas_texture = Some(texture);
        self.atlas_generation += 1;
        self.reset_atlas();
    }

    fn ensure_sampler(&mut self, ctx: &RenderCtx<'_>) {
        if self.sampler.is_some() {
            return;
        }
        self.sampler = Some(ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("horologe text sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        }));
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group_generation == self.atlas_generation
            && self.bind_group.is_some()
            && self.viewport_ubo.is_some()
        {
            return;
        }

        let Some(bgl)        = self.bind_group_layout.as_ref() else { return; };
        let Some(atlas_view) = self.atlas_view.as_ref()        else { return; };
        let Some(sampler)    = self.sampler.as_ref()           else { return; };

        let viewport_ubo = create_viewport_ubo(ctx, "horologe text viewport ubo");
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("horologe text bind group"),
            layout: bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: viewport_ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(atlas_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });

        self.viewport_ubo = Some(viewport_ubo);
        self.bind_group = Some(bind_group);
        self.bind_group_generation = self.atlas_generation;
    }
}

// ── placement math ────────────────────────────────────────────────────────

/// Rasterization scale, quantized to quarter steps so fractional OS scale
/// factors do not fragment the glyph cache.
fn raster_scale(scale_factor: f32) -> f32 {
    if !scale_factor.is_finite() || scale_factor <= 0.0 {
        return 1.0;
    }
    ((scale_factor * 4.0).round() / 4.0).max(0.25)
}

/// Top-left of a text block of logical `extent` centered on `center`, in
/// physical pixels snapped to the pixel grid.
fn centered_origin(center: Vec2, extent: Vec2, scale: f32) -> Vec2 {
    Vec2::new(
        ((center.x - extent.x * 0.5) * scale).round(),
        ((center.y - extent.y * 0.5) * scale).round(),
    )
}

/// Row-based ("shelf") rectangle packer for the glyph atlas.
#[derive(Debug, Clone)]
struct ShelfPacker {
    size: u32,
    cursor_x: u32,
    cursor_y: u32,
    row_height: u32,
}

impl ShelfPacker {
    fn new(size: u32) -> Self {
        Self { size, cursor_x: GLYPH_PADDING, cursor_y: GLYPH_PADDING, row_height: 0 }
    }

    /// Reserves a `w × h` cell and returns its top-left, or `None` when full.
    fn allocate(&mut self, w: u32, h: u32) -> Option<(u32, u32)> {
        if w + 2 * GLYPH_PADDING > self.size {
            return None;
        }

        if self.cursor_x + w + GLYPH_PADDING > self.size {
            self.cursor_y += self.row_height + GLYPH_PADDING;
            self.cursor_x = GLYPH_PADDING;
            self.row_height = 0;
        }

        if self.cursor_y + h + GLYPH_PADDING > self.size {
            return None;
        }

        let pos = (self.cursor_x, self.cursor_y);
        self.cursor_x += w + GLYPH_PADDING;
        self.row_height = self.row_height.max(h);
        Some(pos)
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Instance data layout (48 bytes):
///
///  offset  0  dst_min  [f32; 2]   loc 1
///  offset  8  dst_max  [f32; 2]   loc 2
///  offset 16  uv_min   [f32; 2]   loc 3
///  offset 24  uv_max   [f32; 2]   loc 4
///  offset 32  color    [f32; 4]   loc 5
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct GlyphInstance {
    dst_min: [f32; 2],
    dst_max: [f32; 2],
    uv_min:  [f32; 2],
    uv_max:  [f32; 2],
    color:   [f32; 4],
}

impl GlyphInstance {
    const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        1 => Float32x2, // dst_min
        2 => Float32x2, // dst_max
        3 => Float32x2, // uv_min
        4 => Float32x2, // uv_max
        5 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GlyphInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── raster_scale ──────────────────────────────────────────────────────

    #[test]
    fn raster_scale_quantizes_to_quarters() {
        assert_eq!(raster_scale(1.0), 1.0);
        assert_eq!(raster_scale(1.3), 1.25);
        assert_eq!(raster_scale(2.0), 2.0);
    }

    #[test]
    fn raster_scale_rejects_nonsense() {
        assert_eq!(raster_scale(0.0), 1.0);
        assert_eq!(raster_scale(f32::NAN), 1.0);
        assert_eq!(raster_scale(0.01), 0.25);
    }

    // ── centered_origin ───────────────────────────────────────────────────

    #[test]
    fn centered_origin_offsets_by_half_extent() {
        let o = centered_origin(Vec2::new(100.0, 50.0), Vec2::new(40.0, 20.0), 1.0);
        assert_eq!(o, Vec2::new(80.0, 40.0));
    }

    #[test]
    fn centered_origin_is_physical_and_snapped() {
        let o = centered_origin(Vec2::new(10.3, 10.0), Vec2::new(0.0, 0.0), 2.0);
        assert_eq!(o, Vec2::new(21.0, 20.0));
    }

    // ── ShelfPacker ───────────────────────────────────────────────────────

    #[test]
    fn shelf_packs_left_to_right_then_wraps() {
        let mut p = ShelfPacker::new(32);
        assert_eq!(p.allocate(10, 5), Some((1, 1)));
        assert_eq!(p.allocate(10, 8), Some((12, 1)));
        // 23 + 10 + 1 > 32: wraps below the tallest glyph of the row.
        assert_eq!(p.allocate(10, 4), Some((1, 10)));
    }

    #[test]
    fn shelf_reports_full() {
        let mut p = ShelfPacker::new(16);
        assert!(p.allocate(14, 14).is_some());
        assert!(p.allocate(14, 14).is_none());
        assert!(ShelfPacker::new(16).allocate(20, 1).is_none());
    }
}
