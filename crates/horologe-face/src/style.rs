use horologe_engine::paint::Color;
use horologe_engine::scene::LineCap;
use horologe_engine::text::FontId;

// ── Palette ───────────────────────────────────────────────────────────────

/// Colors of the face. All components are in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FacePalette {
    pub rim_outer: Color,
    pub rim: Color,
    pub face: Color,
    pub marks: Color,
    pub readout: Color,
}

impl FacePalette {
    pub const GOLD: Color = Color::rgb(0.86, 0.74, 0.28);
    pub const DARK_GOLD: Color = Color::rgb(0.65, 0.51, 0.12);
    pub const SECOND_RED: Color = Color::rgb(0.85, 0.1, 0.15);
}

impl Default for FacePalette {
    fn default() -> Self {
        Self {
            rim_outer: Self::DARK_GOLD,
            rim: Self::GOLD,
            face: Color::WHITE,
            marks: Color::BLACK,
            readout: Color::BLACK,
        }
    }
}

// ── Metrics ───────────────────────────────────────────────────────────────

/// Fixed distances, in device-independent units, and ratios of the radius.
///
/// Distances are multiplied by the surface unit before use; ratios are
/// applied to lengths that are already in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceMetrics {
    /// Gap between the surface edge and the white face.
    pub padding: f32,
    /// Corner radius of the face as a fraction of `min(width, height)`.
    pub corner_ratio: f32,

    pub rim_outer_outset: f32,
    pub rim_outset: f32,
    pub inner_rim_inset: f32,
    /// Amount the inner rim's corner radius shrinks relative to the face.
    pub inner_rim_corner: f32,
    pub inner_disk_inset: f32,
    pub inner_disk_corner: f32,

    pub numeral_distance: f32,
    pub numeral_size: f32,

    /// Tick outer radius is `radius + tick_reach`.
    pub tick_reach: f32,
    pub hour_tick_length: f32,
    pub hour_tick_width: f32,
    pub minute_tick_length: f32,
    pub minute_tick_width: f32,
    pub tick_cap: LineCap,

    pub pin_outer: f32,
    pub pin_inner: f32,

    /// Readout sits this fraction of the radius below the center.
    pub readout_offset: f32,
    pub readout_size: f32,
}

impl Default for FaceMetrics {
    fn default() -> Self {
        Self {
            padding: 16.0,
            corner_ratio: 0.06,

            rim_outer_outset: 8.0,
            rim_outset: 6.0,
            inner_rim_inset: 10.0,
            inner_rim_corner: 3.0,
            inner_disk_inset: 14.0,
            inner_disk_corner: 7.0,

            numeral_distance: 0.82,
            numeral_size: 0.18,

            tick_reach: 14.0 * 0.4,
            hour_tick_length: 14.0,
            hour_tick_width: 2.0,
            minute_tick_length: 8.0,
            minute_tick_width: 1.0,
            tick_cap: LineCap::Round,

            pin_outer: 8.0,
            pin_inner: 4.0,

            readout_offset: 0.65,
            readout_size: 0.12,
        }
    }
}

// ── Hands ─────────────────────────────────────────────────────────────────

/// One clock hand: a segment from the center outward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandStyle {
    /// Length as a fraction of the face radius.
    pub length: f32,
    /// Stroke width in device-independent units.
    pub width: f32,
    pub color: Color,
    pub cap: LineCap,
}

impl HandStyle {
    pub const fn new(length: f32, width: f32, color: Color) -> Self {
        Self { length, width, color, cap: LineCap::Round }
    }

    pub fn cap(mut self, cap: LineCap) -> Self { self.cap = cap; self }

    pub fn second() -> Self { Self::new(0.90, 1.6, FacePalette::SECOND_RED) }
    pub fn minute() -> Self { Self::new(0.75, 3.0, Color::BLACK) }
    pub fn hour() -> Self { Self::new(0.48, 5.0, Color::BLACK) }
}

// ── FaceStyle ─────────────────────────────────────────────────────────────

/// Everything that controls how a face looks, independent of time and size.
///
/// ```rust,ignore
/// let style = FaceStyle::default()
///     .font(font)
///     .second_hand(HandStyle::second().cap(LineCap::Butt));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceStyle {
    pub palette: FacePalette,
    pub metrics: FaceMetrics,
    pub hour_hand: HandStyle,
    pub minute_hand: HandStyle,
    pub second_hand: HandStyle,
    /// Font for the numerals and the digital readout.
    pub font: FontId,
}

impl FaceStyle {
    pub fn palette(mut self, v: FacePalette) -> Self { self.palette = v; self }
    pub fn metrics(mut self, v: FaceMetrics) -> Self { self.metrics = v; self }
    pub fn hour_hand(mut self, v: HandStyle) -> Self { self.hour_hand = v; self }
    pub fn minute_hand(mut self, v: HandStyle) -> Self { self.minute_hand = v; self }
    pub fn second_hand(mut self, v: HandStyle) -> Self { self.second_hand = v; self }
    pub fn font(mut self, v: FontId) -> Self { self.font = v; self }
}

impl Default for FaceStyle {
    fn default() -> Self {
        Self {
            palette: FacePalette::default(),
            metrics: FaceMetrics::default(),
            hour_hand: HandStyle::hour(),
            minute_hand: HandStyle::minute(),
            second_hand: HandStyle::second(),
            font: FontId::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_hands_are_round_capped_and_ordered_by_length() {
        let s = FaceStyle::default();
        for hand in [s.second_hand, s.minute_hand, s.hour_hand] {
            assert_eq!(hand.cap, LineCap::Round);
        }
        assert!(s.second_hand.length > s.minute_hand.length);
        assert!(s.minute_hand.length > s.hour_hand.length);
        assert!(s.hour_hand.width > s.minute_hand.width);
    }

    #[test]
    fn builders_replace_single_parts() {
        let hand = HandStyle::second().cap(LineCap::Butt);
        let s = FaceStyle::default().second_hand(hand);
        assert_eq!(s.second_hand.cap, LineCap::Butt);
        assert_eq!(s.minute_hand, HandStyle::minute());
        assert_eq!(s.palette, FacePalette::default());
    }
}
