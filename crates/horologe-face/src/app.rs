use winit::dpi::LogicalSize;

use horologe_engine::coords::Vec2;
use horologe_engine::core::{App as EngineApp, AppControl, FrameCtx};
use horologe_engine::device::GpuInit;
use horologe_engine::paint::Color;
use horologe_engine::render::SceneRenderer;
use horologe_engine::scene::DrawList;
use horologe_engine::text::FontSystem;
use horologe_engine::time::{FrameTicker, SystemClock, WallClock};
use horologe_engine::window::{Runtime, RuntimeConfig};

use crate::renderer::ClockRenderer;
use crate::style::FaceStyle;
use crate::surface::Surface;

// ── Application ───────────────────────────────────────────────────────────

/// Desktop host for a clock face.
///
/// Builder-style: configure, then [`run`](Self::run) the event loop. The face
/// fills a centered square of `window_fraction * min(width, height)` and is
/// redrawn at `refresh_rate` Hz and on every resize.
///
/// ```rust,ignore
/// Application::new()
///     .title("Horologe")
///     .font(std::fs::read("DejaVuSans.ttf")?)
///     .refresh_rate(30.0)
///     .run();
/// ```
pub struct Application {
    title:           String,
    width:           f64,
    height:          f64,
    font:            Option<Vec<u8>>,
    refresh_rate:    f32,
    window_fraction: f32,
    style:           FaceStyle,
    background:      Color,
}

impl Application {
    pub fn new() -> Self {
        Self {
            title:           "horologe".to_string(),
            width:           600.0,
            height:          600.0,
            font:            None,
            refresh_rate:    30.0,
            window_fraction: 0.9,
            style:           FaceStyle::default(),
            background:      Color::BLACK,
        }
    }

    /// Set the window title.
    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.title = t.into();
        self
    }

    /// Set the initial window size in logical pixels.
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width  = width;
        self.height = height;
        self
    }

    /// TrueType/OpenType bytes for the numerals and readout.
    ///
    /// Without a font (or if it fails to parse) the face still draws, minus
    /// its text.
    pub fn font(mut self, data: Vec<u8>) -> Self {
        self.font = Some(data);
        self
    }

    /// Redraws per second. Clamped to the ticker's accepted range.
    pub fn refresh_rate(mut self, hz: f32) -> Self {
        self.refresh_rate = hz;
        self
    }

    /// Share of the window's shorter side taken by the face.
    pub fn window_fraction(mut self, f: f32) -> Self {
        self.window_fraction = f;
        self
    }

    pub fn style(mut self, style: FaceStyle) -> Self {
        self.style = style;
        self
    }

    /// Color behind the face.
    pub fn background(mut self, c: Color) -> Self {
        self.background = c;
        self
    }

    /// Start the event loop.
    ///
    /// This never returns.
    pub fn run(self) -> ! {
        let config = RuntimeConfig {
            title:          self.title.clone(),
            initial_size:   LogicalSize::new(self.width, self.height),
            frame_interval: FrameTicker::interval_for_rate(self.refresh_rate),
        };
        // Face colors are authored as display values; skip the sRGB encode.
        let gpu_init = GpuInit { prefer_srgb: false, ..GpuInit::default() };

        let state = FaceAppState::new(self, SystemClock::new());
        match Runtime::run(config, gpu_init, state) {
            Ok(()) => std::process::exit(0),
            Err(e) => {
                log::error!("horologe runtime error: {e:#}");
                eprintln!("horologe runtime error: {e:#}");
                std::process::exit(1);
            }
        }
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}

// ── FaceAppState ──────────────────────────────────────────────────────────

/// Implements the engine's `App`: fits the face to the window, paints it and
/// hands the draw list to the scene renderer.
struct FaceAppState<C: WallClock> {
    clock:           C,
    face:            ClockRenderer,
    window_fraction: f32,
    background:      Color,

    fonts:     FontSystem,
    draw_list: DrawList,
    renderer:  SceneRenderer,

    last_window: Option<Vec2>,
}

impl<C: WallClock> FaceAppState<C> {
    fn new(app: Application, clock: C) -> Self {
        let mut fonts = FontSystem::new();
        let mut style = app.style;

        match app.font.as_deref().map(|bytes| fonts.load_font(bytes)) {
            Some(Ok(id)) => style.font = id,
            Some(Err(e)) => log::warn!("{e}; numerals and readout will not be drawn"),
            None => log::warn!("no font configured; numerals and readout will not be drawn"),
        }

        Self {
            clock,
            face: ClockRenderer::new().with_style(style),
            window_fraction: app.window_fraction,
            background: app.background,
            fonts,
            draw_list: DrawList::new(),
            renderer: SceneRenderer::new(),
            last_window: None,
        }
    }
}

impl<C: WallClock> EngineApp for FaceAppState<C> {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let (w, h) = ctx.window.logical_size();
        let window = Vec2::new(w, h);
        let surface = Surface::fit_square(window, self.window_fraction);

        self.draw_list.clear();
        let frame = self.face.paint(&surface, self.clock.now(), &mut self.draw_list);

        if self.last_window != Some(window) {
            self.last_window = Some(window);
            match frame {
                Some(f) => log::debug!(
                    "window {w}x{h}: face {} px, radius {} px, center ({}, {})",
                    f.face_size, f.radius, f.center.x, f.center.y,
                ),
                None => log::debug!("window {w}x{h}: nothing to draw"),
            }
        }

        let dl       = &mut self.draw_list;
        let fonts    = &self.fonts;
        let renderer = &mut self.renderer;

        ctx.render(self.background, |rctx, target| {
            renderer.render(rctx, target, dl, fonts);
        })
    }
}
