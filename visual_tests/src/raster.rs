use floatlabel::prelude::{Color, DrawCommand, Frame, Rect};
use image::{Rgba, RgbaImage};

/// Advance of a proxy glyph, as a fraction of the font size
const GLYPH_ADVANCE: f32 = 0.55;
/// Height of a proxy glyph, as a fraction of the font size
const GLYPH_HEIGHT: f32 = 0.7;

/// Rasterize a recorded frame.
///
/// Text is drawn as one solid box per character so the output only depends
/// on the draw commands, not on the fonts installed on the machine.
pub fn render_frame(frame: &Frame) -> RgbaImage {
    let mut image = RgbaImage::from_pixel(frame.width, frame.height, to_rgba(frame.background_color));

    for command in &frame.commands {
        match command {
            DrawCommand::Rect {
                rect,
                color,
                radius,
                clip,
            } => fill_rect(&mut image, *rect, *color, *radius, *clip),
            DrawCommand::Text {
                text,
                rect,
                color,
                font_size,
                clip,
                ..
            } => {
                let advance = font_size * GLYPH_ADVANCE;
                let height = font_size * GLYPH_HEIGHT;
                let top = rect.y + (rect.height - height).max(0.0) / 2.0;
                for (i, c) in text.chars().enumerate() {
                    if c.is_whitespace() {
                        continue;
                    }
                    let glyph = Rect::new(
                        rect.x + i as f32 * advance + advance * 0.1,
                        top,
                        advance * 0.8,
                        height,
                    );
                    fill_rect(&mut image, glyph, *color, 0.0, *clip);
                }
            }
        }
    }

    image
}

fn fill_rect(image: &mut RgbaImage, rect: Rect, color: Color, radius: f32, clip: Option<Rect>) {
    if color.a <= 0.0 {
        return;
    }
    let area = match clip {
        Some(clip) => match intersect(rect, clip) {
            Some(area) => area,
            None => return,
        },
        None => rect,
    };

    let (width, height) = image.dimensions();
    let x0 = area.x.max(0.0).floor() as u32;
    let y0 = area.y.max(0.0).floor() as u32;
    let x1 = ((area.x + area.width).ceil().max(0.0) as u32).min(width);
    let y1 = ((area.y + area.height).ceil().max(0.0) as u32).min(height);

    for y in y0..y1 {
        for x in x0..x1 {
            let (px, py) = (x as f32, y as f32);
            if !inside_corners(rect, radius, px + 0.5, py + 0.5) {
                continue;
            }
            // Fraction of the pixel covered, so hairlines stay visible
            let covered_w = (px + 1.0).min(area.x + area.width) - px.max(area.x);
            let covered_h = (py + 1.0).min(area.y + area.height) - py.max(area.y);
            let coverage = covered_w.max(0.0) * covered_h.max(0.0);
            if coverage > 0.0 {
                blend(image.get_pixel_mut(x, y), color, coverage);
            }
        }
    }
}

fn inside_corners(rect: Rect, radius: f32, x: f32, y: f32) -> bool {
    if radius <= 0.0 {
        return true;
    }
    let r = radius.min(rect.width / 2.0).min(rect.height / 2.0);
    let cx = x.clamp(rect.x + r, rect.x + rect.width - r);
    let cy = y.clamp(rect.y + r, rect.y + rect.height - r);
    (x - cx).powi(2) + (y - cy).powi(2) <= r * r
}

fn intersect(a: Rect, b: Rect) -> Option<Rect> {
    let x = a.x.max(b.x);
    let y = a.y.max(b.y);
    let right = (a.x + a.width).min(b.x + b.width);
    let bottom = (a.y + a.height).min(b.y + b.height);
    (right > x && bottom > y).then(|| Rect::new(x, y, right - x, bottom - y))
}

fn blend(pixel: &mut Rgba<u8>, color: Color, coverage: f32) {
    let alpha = (color.a * coverage).clamp(0.0, 1.0);
    let source = [color.r, color.g, color.b];
    for (channel, value) in pixel.0.iter_mut().take(3).zip(source) {
        let dest = *channel as f32 / 255.0;
        *channel = ((value * alpha + dest * (1.0 - alpha)) * 255.0).round() as u8;
    }
    pixel.0[3] = 255;
}

fn to_rgba(color: Color) -> Rgba<u8> {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    Rgba([
        channel(color.r),
        channel(color.g),
        channel(color.b),
        channel(color.a),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(commands: Vec<DrawCommand>) -> Frame {
        Frame {
            width: 10,
            height: 10,
            background_color: Color::WHITE,
            commands,
            animating: false,
        }
    }

    #[test]
    fn test_fill_rect() {
        let image = render_frame(&frame(vec![DrawCommand::Rect {
            rect: Rect::new(2.0, 2.0, 4.0, 4.0),
            color: Color::BLACK,
            radius: 0.0,
            clip: None,
        }]));
        assert_eq!(image.get_pixel(3, 3), &Rgba([0, 0, 0, 255]));
        assert_eq!(image.get_pixel(7, 7), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_clip_limits_fill() {
        let image = render_frame(&frame(vec![DrawCommand::Rect {
            rect: Rect::new(0.0, 0.0, 10.0, 10.0),
            color: Color::BLACK,
            radius: 0.0,
            clip: Some(Rect::new(0.0, 0.0, 5.0, 10.0)),
        }]));
        assert_eq!(image.get_pixel(4, 4), &Rgba([0, 0, 0, 255]));
        assert_eq!(image.get_pixel(6, 4), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_half_alpha_blends() {
        let image = render_frame(&frame(vec![DrawCommand::Rect {
            rect: Rect::new(0.0, 0.0, 10.0, 10.0),
            color: Color::BLACK.with_alpha(0.5),
            radius: 0.0,
            clip: None,
        }]));
        assert_eq!(image.get_pixel(5, 5), &Rgba([128, 128, 128, 255]));
    }
}
