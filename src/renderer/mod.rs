//! Headless paint recording.
//!
//! Widgets paint into a [`PaintContext`], which records [`DrawCommand`]s in
//! surface coordinates. A backend (or the snapshot rasterizer in
//! `visual_tests`) turns the command list into pixels.

pub mod commands;
pub mod text_measurer;

pub use commands::DrawCommand;
pub use text_measurer::{char_index_from_x, measure_text, measure_text_to_char, TextMeasurer};

use crate::widgets::font::{FontFamily, FontWeight};
use crate::widgets::{Color, Rect};

#[derive(Default)]
pub struct PaintContext {
    commands: Vec<DrawCommand>,
    /// Clip stack, each entry already intersected with its parent
    clip_stack: Vec<Rect>,
    /// Opacity stack, each entry already multiplied with its parent
    opacity_stack: Vec<f32>,
}

impl PaintContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a PaintContext with pre-allocated capacity
    pub fn with_capacity(commands: usize) -> Self {
        Self {
            commands: Vec::with_capacity(commands),
            clip_stack: Vec::with_capacity(4),
            opacity_stack: Vec::with_capacity(4),
        }
    }

    /// Clear all buffers for reuse, preserving allocated capacity
    pub fn clear(&mut self) {
        self.commands.clear();
        self.clip_stack.clear();
        self.opacity_stack.clear();
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn draw_rect(&mut self, rect: Rect, color: Color) {
        self.draw_rounded_rect(rect, color, 0.0);
    }

    pub fn draw_rounded_rect(&mut self, rect: Rect, color: Color, radius: f32) {
        let Some(color) = self.apply_opacity(color) else {
            return;
        };
        self.commands.push(DrawCommand::Rect {
            rect,
            color,
            radius,
            clip: self.current_clip(),
        });
    }

    /// Draw text with default font (SansSerif, normal weight).
    pub fn draw_text(&mut self, text: &str, rect: Rect, color: Color, font_size: f32) {
        self.draw_text_styled(
            text,
            rect,
            color,
            font_size,
            FontFamily::default(),
            FontWeight::NORMAL,
        );
    }

    /// Draw text with specified font family and weight.
    pub fn draw_text_styled(
        &mut self,
        text: &str,
        rect: Rect,
        color: Color,
        font_size: f32,
        font_family: FontFamily,
        font_weight: FontWeight,
    ) {
        if text.is_empty() {
            return;
        }
        let Some(color) = self.apply_opacity(color) else {
            return;
        };
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            rect,
            color,
            font_size,
            font_family,
            font_weight,
            clip: self.current_clip(),
        });
    }

    /// Clip everything drawn until the matching [`pop_clip`](Self::pop_clip).
    pub fn push_clip(&mut self, rect: Rect) {
        let clip = match self.clip_stack.last() {
            Some(parent) => intersect(parent, &rect),
            None => rect,
        };
        self.clip_stack.push(clip);
    }

    pub fn pop_clip(&mut self) {
        self.clip_stack.pop();
    }

    /// Multiply the alpha of everything drawn until the matching
    /// [`pop_opacity`](Self::pop_opacity).
    pub fn push_opacity(&mut self, opacity: f32) {
        let parent = self.opacity_stack.last().copied().unwrap_or(1.0);
        self.opacity_stack.push(parent * opacity.clamp(0.0, 1.0));
    }

    pub fn pop_opacity(&mut self) {
        self.opacity_stack.pop();
    }

    fn current_clip(&self) -> Option<Rect> {
        self.clip_stack.last().copied()
    }

    /// Fully transparent draws are dropped.
    fn apply_opacity(&self, color: Color) -> Option<Color> {
        let opacity = self.opacity_stack.last().copied().unwrap_or(1.0);
        let alpha = color.a * opacity;
        (alpha > 0.0).then_some(Color { a: alpha, ..color })
    }
}

/// Intersection of two rects; empty (zero-sized) when they do not overlap.
fn intersect(a: &Rect, b: &Rect) -> Rect {
    let left = a.x.max(b.x);
    let top = a.y.max(b.y);
    let right = (a.x + a.width).min(b.x + b.width);
    let bottom = (a.y + a.height).min(b.y + b.height);
    Rect::new(left, top, (right - left).max(0.0), (bottom - top).max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let mut ctx = PaintContext::new();
        ctx.draw_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::BLACK);
        ctx.draw_text("Email", Rect::new(0.0, 0.0, 50.0, 20.0), Color::WHITE, 17.0);
        assert_eq!(ctx.commands().len(), 2);
        assert_eq!(ctx.commands()[1].text(), Some("Email"));
    }

    #[test]
    fn test_opacity_multiplies_and_drops_invisible() {
        let mut ctx = PaintContext::new();
        ctx.push_opacity(0.5);
        ctx.push_opacity(0.5);
        ctx.draw_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::BLACK);
        ctx.pop_opacity();
        ctx.pop_opacity();
        assert_eq!(ctx.commands()[0].color().a, 0.25);

        ctx.push_opacity(0.0);
        ctx.draw_text("hidden", Rect::default(), Color::BLACK, 12.0);
        ctx.pop_opacity();
        assert_eq!(ctx.commands().len(), 1);
    }

    #[test]
    fn test_nested_clips_intersect() {
        let mut ctx = PaintContext::new();
        ctx.push_clip(Rect::new(0.0, 0.0, 100.0, 100.0));
        ctx.push_clip(Rect::new(50.0, 50.0, 100.0, 100.0));
        ctx.draw_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::BLACK);
        ctx.pop_clip();
        ctx.draw_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::BLACK);
        ctx.pop_clip();

        assert_eq!(
            ctx.commands()[0].clip(),
            Some(Rect::new(50.0, 50.0, 50.0, 50.0))
        );
        assert_eq!(
            ctx.commands()[1].clip(),
            Some(Rect::new(0.0, 0.0, 100.0, 100.0))
        );
    }
}
