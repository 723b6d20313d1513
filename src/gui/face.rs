//! Clock face and ambient backdrop painting.

use crate::clock::designs::{ClockDesign, DigitStyle};
use crate::clock::ClockTime;
use egui::{Align2, Color32, FontId, Pos2, Rect, Stroke, StrokeKind, Ui, Vec2};

/// Half periods (seconds) and start offsets of the red, green and blue
/// backdrop waves. Different periods keep the mix from repeating quickly.
const WAVES: [(f32, f32); 3] = [(8.0, 0.0), (7.0, 2.7), (9.0, 5.3)];

/// How far the backdrop drifts from the base colour per channel
const TINT_STRENGTH: f32 = 48.0;

/// Triangle wave in [0, 1] rising for `half_period` seconds then falling.
fn triangle(t: f32, half_period: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    let phase = (t % (2.0 * half_period)) / half_period;
    if phase < 1.0 {
        phase
    } else {
        2.0 - phase
    }
}

/// Backdrop colour `elapsed` seconds after start-up
pub fn backdrop_color(elapsed: f32, dark: bool) -> Color32 {
    let base: [f32; 3] = if dark { [14.0, 14.0, 20.0] } else { [232.0, 232.0, 238.0] };
    let mut rgb = [0u8; 3];
    for (channel, (&(half_period, offset), base)) in rgb.iter_mut().zip(WAVES.iter().zip(base)) {
        let tint = triangle(elapsed - offset, half_period) * TINT_STRENGTH;
        let value = if dark { base + tint } else { base - tint };
        *channel = value.clamp(0.0, 255.0) as u8;
    }
    Color32::from_rgb(rgb[0], rgb[1], rgb[2])
}

/// Paint `time` in `design` centred in `rect`.
pub fn paint_clock(ui: &Ui, rect: Rect, design: &ClockDesign, time: ClockTime, use_24_hour: bool, dark: bool) {
    let painter = ui.painter_at(rect);
    let digit_height = rect.height() * design.scale;
    let font = if design.monospace {
        FontId::monospace(digit_height)
    } else {
        FontId::proportional(digit_height)
    };

    let cell = Vec2::new(digit_height * 0.72, digit_height * 1.15);
    let gap = digit_height * 0.08;
    let colon_width = digit_height * 0.35;
    let total_width = cell.x * 4.0 + gap * 2.0 + colon_width;
    let origin = Pos2::new(rect.center().x - total_width / 2.0, rect.center().y - cell.y / 2.0);

    let ink = if dark { design.accent } else { darken(design.accent) };
    let card = if dark { Color32::from_gray(34) } else { Color32::from_gray(250) };
    let rim = if dark { Color32::from_gray(70) } else { Color32::from_gray(190) };

    if design.digit_style == DigitStyle::Outlined {
        let panel = Rect::from_min_size(origin, Vec2::new(total_width, cell.y)).expand(gap * 2.0);
        painter.rect_stroke(panel, gap * 2.0, Stroke::new(2.0, rim), StrokeKind::Outside);
    }

    let mut x = origin.x;
    for (index, digit) in time.digits().iter().enumerate() {
        if index == 2 {
            // Colon blinks on odd seconds
            if time.second % 2 == 0 {
                painter.text(
                    Pos2::new(x + colon_width / 2.0, origin.y + cell.y / 2.0),
                    Align2::CENTER_CENTER,
                    ":",
                    font.clone(),
                    ink,
                );
            }
            x += colon_width;
        }

        let digit_rect = Rect::from_min_size(Pos2::new(x, origin.y), cell);
        if design.digit_style == DigitStyle::Cards {
            painter.rect_filled(digit_rect, gap, card);
            painter.line_segment(
                [digit_rect.left_center(), digit_rect.right_center()],
                Stroke::new(1.5, rim),
            );
        }
        painter.text(digit_rect.center(), Align2::CENTER_CENTER, digit.to_string(), font.clone(), ink);

        x += cell.x + if index % 2 == 0 { gap } else { 0.0 };
    }

    if !use_24_hour {
        painter.text(
            Pos2::new(origin.x + total_width + gap, origin.y),
            Align2::LEFT_TOP,
            if time.is_am { "AM" } else { "PM" },
            FontId::proportional(digit_height * 0.2),
            ink,
        );
    }
}

fn darken(color: Color32) -> Color32 {
    Color32::from_rgb(color.r() / 2, color.g() / 2, color.b() / 2)
}
