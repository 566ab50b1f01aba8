use std::cell::RefCell;

use cosmic_text::{Attrs, Buffer, FontSystem, Metrics, Shaping};

use crate::layout::Size;
use crate::widgets::font::FontFamily;

/// Average advance of a glyph, as a fraction of the font size, used when no
/// fonts are installed (headless CI machines).
const FALLBACK_ADVANCE: f32 = 0.55;

/// Line height as a multiple of the font size
const LINE_HEIGHT: f32 = 1.2;

pub struct TextMeasurer {
    font_system: FontSystem,
    has_fonts: bool,
}

impl TextMeasurer {
    pub fn new() -> Self {
        let font_system = FontSystem::new();
        let has_fonts = !font_system.db().is_empty();
        if !has_fonts {
            log::warn!("no system fonts found, text is measured with a fixed advance");
        }
        Self {
            font_system,
            has_fonts,
        }
    }

    pub fn measure(
        &mut self,
        text: &str,
        font_size: f32,
        family: &FontFamily,
        max_width: Option<f32>,
    ) -> Size {
        // cosmic-text rejects a zero line height
        if !self.has_fonts || font_size <= 0.0 {
            return approximate(text, font_size.max(0.0), max_width);
        }

        let metrics = Metrics::new(font_size, font_size * LINE_HEIGHT);
        let mut buffer = Buffer::new(&mut self.font_system, metrics);

        buffer.set_size(&mut self.font_system, max_width, None);
        buffer.set_text(
            &mut self.font_system,
            text,
            &Attrs::new().family(family.to_cosmic()),
            Shaping::Advanced,
            None,
        );
        buffer.shape_until_scroll(&mut self.font_system, true);

        let mut width = 0.0f32;
        let mut height = 0.0f32;
        for run in buffer.layout_runs() {
            width = width.max(run.line_w);
            height += run.line_height;
        }

        // Empty text still occupies one line
        if height == 0.0 {
            height = font_size * LINE_HEIGHT;
        }

        Size::new(width, height)
    }

    /// Width of `text` up to (not including) the character at `char_index`.
    pub fn measure_to_char(
        &mut self,
        text: &str,
        font_size: f32,
        family: &FontFamily,
        char_index: usize,
    ) -> f32 {
        if char_index == 0 || text.is_empty() {
            return 0.0;
        }

        let byte_pos = text
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(text.len());

        self.measure(&text[..byte_pos], font_size, family, None).width
    }

    /// Character index closest to `x`, for click-to-position.
    pub fn char_from_x(&mut self, text: &str, font_size: f32, family: &FontFamily, x: f32) -> usize {
        if text.is_empty() || x <= 0.0 {
            return 0;
        }

        let char_count = text.chars().count();
        if x >= self.measure(text, font_size, family, None).width {
            return char_count;
        }

        let mut left = 0;
        let mut right = char_count;
        while left < right {
            let mid = (left + right) / 2;
            if self.measure_to_char(text, font_size, family, mid) < x {
                left = mid + 1;
            } else {
                right = mid;
            }
        }

        // Snap to the nearer side of the character
        if left > 0 {
            let prev = self.measure_to_char(text, font_size, family, left - 1);
            let curr = self.measure_to_char(text, font_size, family, left);
            if (x - prev) < (curr - x) {
                return left - 1;
            }
        }

        left.min(char_count)
    }
}

impl Default for TextMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

fn approximate(text: &str, font_size: f32, max_width: Option<f32>) -> Size {
    let advance = font_size * FALLBACK_ADVANCE;
    let line = text.chars().count() as f32 * advance;
    let line_height = font_size * LINE_HEIGHT;
    match max_width {
        Some(max) if max > 0.0 && line > max => {
            let lines = (line / max).ceil();
            Size::new(max, lines * line_height)
        }
        _ => Size::new(line, line_height),
    }
}

thread_local! {
    static TEXT_MEASURER: RefCell<TextMeasurer> = RefCell::new(TextMeasurer::new());
}

pub fn measure_text(text: &str, font_size: f32, family: &FontFamily, max_width: Option<f32>) -> Size {
    TEXT_MEASURER.with_borrow_mut(|m| m.measure(text, font_size, family, max_width))
}

pub fn measure_text_to_char(text: &str, font_size: f32, family: &FontFamily, char_index: usize) -> f32 {
    TEXT_MEASURER.with_borrow_mut(|m| m.measure_to_char(text, font_size, family, char_index))
}

pub fn char_index_from_x(text: &str, font_size: f32, family: &FontFamily, x: f32) -> usize {
    TEXT_MEASURER.with_borrow_mut(|m| m.char_from_x(text, font_size, family, x))
}
