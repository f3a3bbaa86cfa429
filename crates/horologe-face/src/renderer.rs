use chrono::NaiveTime;

use horologe_engine::scene::{DrawCmd, DrawList};
use horologe_engine::time::WallClock;

use crate::digital::format_digital;
use crate::frame::ClockFrame;
use crate::geometry::{hand_angle, on_ray, DEGREES_PER_HOUR, DEGREES_PER_MINUTE};
use crate::style::{FaceStyle, HandStyle};
use crate::surface::Surface;
use crate::time_sample::TimeSample;

/// Paint layers, back to front. Within a layer commands keep emission order.
pub mod layers {
    use horologe_engine::scene::ZIndex;

    pub const FACE: ZIndex = ZIndex::new(0);
    pub const MARKS: ZIndex = ZIndex::new(1);
    pub const HANDS: ZIndex = ZIndex::new(2);
    pub const PIN: ZIndex = ZIndex::new(3);
    pub const READOUT: ZIndex = ZIndex::new(4);
}

/// Turns a time and a surface into the draw commands of one clock face.
///
/// Holds only the style. Every call lays the face out from scratch, so the
/// output depends on nothing but its arguments.
#[derive(Debug, Clone, Default)]
pub struct ClockRenderer {
    style: FaceStyle,
}

impl ClockRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(mut self, style: FaceStyle) -> Self {
        self.style = style;
        self
    }

    #[inline]
    pub fn style(&self) -> &FaceStyle {
        &self.style
    }

    /// Reads `clock` once and returns the face in paint order.
    pub fn render(&self, surface: &Surface, clock: &impl WallClock) -> Vec<DrawCmd> {
        self.render_at(surface, clock.now())
    }

    /// The face for a given `time`, in paint order. Empty when the surface has
    /// no area.
    pub fn render_at(&self, surface: &Surface, time: NaiveTime) -> Vec<DrawCmd> {
        let mut list = DrawList::new();
        self.paint(surface, time, &mut list);
        list.into_commands()
    }

    /// Appends the face to `out` on the [`layers`] z-indices.
    ///
    /// Returns the frame that was laid out, or `None` if nothing was drawn.
    pub fn paint(&self, surface: &Surface, time: NaiveTime, out: &mut DrawList) -> Option<ClockFrame> {
        let frame = ClockFrame::compute(surface, &self.style.metrics)?;

        self.paint_case(&frame, out);
        self.paint_numerals(&frame, out);
        self.paint_ticks(&frame, out);
        self.paint_hands(&frame, TimeSample::from_time(time), out);
        self.paint_pin(&frame, out);
        self.paint_readout(&frame, time, out);

        Some(frame)
    }

    // ── layers ────────────────────────────────────────────────────────────

    fn paint_case(&self, frame: &ClockFrame, out: &mut DrawList) {
        let m = &self.style.metrics;
        let p = &self.style.palette;

        // (outset, corner delta, color), outermost first.
        let squares = [
            (m.rim_outer_outset, m.rim_outer_outset, p.rim_outer),
            (m.rim_outset, m.rim_outset, p.rim),
            (0.0, 0.0, p.face),
            (-m.inner_rim_inset, -m.inner_rim_corner, p.rim),
            (-m.inner_disk_inset, -m.inner_disk_corner, p.face),
        ];

        for (outset, corner, color) in squares {
            out.push_solid_rounded_rect(layers::FACE, frame.square(outset), frame.corner(corner), color);
        }
    }

    fn paint_numerals(&self, frame: &ClockFrame, out: &mut DrawList) {
        let m = &self.style.metrics;
        let Some(size) = font_size(frame.radius * m.numeral_size) else { return; };
        let distance = frame.radius * m.numeral_distance;

        for hour in 1..=12u32 {
            let angle = hand_angle(f64::from(hour), DEGREES_PER_HOUR);
            out.push_text(
                layers::MARKS,
                hour.to_string(),
                self.style.font,
                size,
                self.style.palette.marks,
                on_ray(frame.center, distance, angle),
            );
        }
    }

    fn paint_ticks(&self, frame: &ClockFrame, out: &mut DrawList) {
        let m = &self.style.metrics;
        let outer = (frame.radius + frame.px(m.tick_reach)).max(0.0);

        for index in 0..60u32 {
            let (length, width) = if index % 5 == 0 {
                (m.hour_tick_length, m.hour_tick_width)
            } else {
                (m.minute_tick_length, m.minute_tick_width)
            };
            let inner = (outer - frame.px(length)).max(0.0);
            let angle = hand_angle(f64::from(index), DEGREES_PER_MINUTE);

            out.push_line(
                layers::MARKS,
                on_ray(frame.center, inner, angle),
                on_ray(frame.center, outer, angle),
                frame.px(width),
                m.tick_cap,
                self.style.palette.marks,
            );
        }
    }

    fn paint_hands(&self, frame: &ClockFrame, sample: TimeSample, out: &mut DrawList) {
        let angles = sample.angles();
        let hands = [
            (&self.style.second_hand, angles.second),
            (&self.style.minute_hand, angles.minute),
            (&self.style.hour_hand, angles.hour),
        ];

        for (hand, angle) in hands {
            push_hand(out, frame, hand, angle);
        }
    }

    fn paint_pin(&self, frame: &ClockFrame, out: &mut DrawList) {
        let m = &self.style.metrics;
        let p = &self.style.palette;
        out.push_solid_circle(layers::PIN, frame.center, frame.px(m.pin_outer), p.rim);
        out.push_solid_circle(layers::PIN, frame.center, frame.px(m.pin_inner), p.rim_outer);
    }

    fn paint_readout(&self, frame: &ClockFrame, time: NaiveTime, out: &mut DrawList) {
        let m = &self.style.metrics;
        let Some(size) = font_size(frame.radius * m.readout_size) else { return; };

        // Below the center on screen.
        let mut anchor = frame.center;
        anchor.y += frame.radius * m.readout_offset;

        out.push_text(
            layers::READOUT,
            format_digital(time),
            self.style.font,
            size,
            self.style.palette.readout,
            anchor,
        );
    }
}

fn push_hand(out: &mut DrawList, frame: &ClockFrame, hand: &HandStyle, angle: f64) {
    let tip = on_ray(frame.center, (frame.radius * hand.length).max(0.0), angle);
    out.push_line(layers::HANDS, frame.center, tip, frame.px(hand.width), hand.cap, hand.color);
}

/// Whole-pixel font size, or `None` when it truncates to nothing.
fn font_size(raw: f32) -> Option<f32> {
    let size = raw.trunc();
    (size >= 1.0).then_some(size)
}
