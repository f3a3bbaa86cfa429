use anyhow::{Context, Result};

use horologe_engine::logging::{init_logging, LoggingConfig};
use horologe_face::Application;

/// Checked in order when `HOROLOGE_FONT` is not set.
const FONT_SEARCH_PATHS: &[&str] = &[
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

fn main() {
    init_logging(LoggingConfig::default());
    log::info!("horologe {}", env!("CARGO_PKG_VERSION"));

    let mut app = Application::new()
        .title("Horologe")
        .size(600.0, 600.0)
        .refresh_rate(30.0)
        .window_fraction(0.9);

    match load_font() {
        Ok(bytes) => app = app.font(bytes),
        Err(e) => log::warn!("{e:#}"),
    }

    app.run()
}

fn load_font() -> Result<Vec<u8>> {
    if let Ok(path) = std::env::var("HOROLOGE_FONT") {
        return std::fs::read(&path).with_context(|| format!("failed to read HOROLOGE_FONT={path}"));
    }

    FONT_SEARCH_PATHS
        .iter()
        .find_map(|p| {
            let bytes = std::fs::read(p).ok()?;
            log::debug!("using font {p}");
            Some(bytes)
        })
        .context("no system font found; set HOROLOGE_FONT to a .ttf/.otf file")
}
