use crate::layout::{Constraints, Size};
use crate::reactive::{ChangeFlags, WidgetId};
use crate::renderer::{measure_text, PaintContext};

use super::font::Font;
use super::impl_dirty_flags;
use super::widget::{Color, Rect, Widget};

/// A single line of text with a model opacity and a presented opacity.
///
/// The model alpha is what the label is meant to be; the presented alpha is
/// what is painted while an animation catches up with the model.
pub struct Label {
    widget_id: WidgetId,
    dirty_flags: ChangeFlags,
    text: String,
    color: Color,
    font: Font,
    alpha: f32,
    presented_alpha: f32,
    bounds: Rect,
    text_height: f32,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        let font = Font::default();
        Self {
            widget_id: WidgetId::next(),
            dirty_flags: ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT,
            text: text.into(),
            color: Color::BLACK,
            text_height: font.size * 1.2,
            font,
            alpha: 1.0,
            presented_alpha: 1.0,
            bounds: Rect::default(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.invalidate_layout();
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        if self.color != color {
            self.color = color;
            self.invalidate_paint();
        }
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    pub fn font_size(&self) -> f32 {
        self.font.size
    }

    pub fn set_font(&mut self, font: Font) {
        if self.font != font {
            self.font = font;
            self.invalidate_layout();
        }
    }

    /// Model opacity
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    /// Opacity currently on screen
    pub fn presented_alpha(&self) -> f32 {
        self.presented_alpha
    }

    pub(crate) fn set_presented_alpha(&mut self, alpha: f32) {
        let alpha = alpha.clamp(0.0, 1.0);
        if self.presented_alpha != alpha {
            self.presented_alpha = alpha;
            self.invalidate_paint();
        }
    }

    /// Natural size of the text
    pub fn intrinsic_size(&self) -> Size {
        measure_text(&self.text, self.font.size, &self.font.family, None)
    }

    fn invalidate_layout(&mut self) {
        self.dirty_flags |= ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT;
        self.widget_id.request_layout();
    }

    fn invalidate_paint(&mut self) {
        self.dirty_flags |= ChangeFlags::NEEDS_PAINT;
        self.widget_id.request_paint();
    }
}

impl Widget for Label {
    fn layout(&mut self, constraints: Constraints) -> Size {
        let measured = self.intrinsic_size();
        self.text_height = measured.height;

        let size = constraints.constrain(measured);
        self.bounds.width = size.width;
        self.bounds.height = size.height;
        self.dirty_flags.remove(ChangeFlags::NEEDS_LAYOUT);
        size
    }

    fn paint(&self, ctx: &mut PaintContext) {
        if self.presented_alpha <= 0.0 {
            return;
        }
        // One line, vertically centered like the text it stands in for
        let y = self.bounds.y + ((self.bounds.height - self.text_height) / 2.0).max(0.0);
        let line = Rect::new(self.bounds.x, y, self.bounds.width, self.text_height);

        ctx.push_opacity(self.presented_alpha);
        ctx.draw_text_styled(
            &self.text,
            line,
            self.color,
            self.font.size,
            self.font.family.clone(),
            self.font.weight,
        );
        ctx.pop_opacity();
    }

    fn set_origin(&mut self, x: f32, y: f32) {
        self.bounds.x = x;
        self.bounds.y = y;
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn id(&self) -> WidgetId {
        self.widget_id
    }

    impl_dirty_flags!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alpha_is_clamped() {
        let mut label = Label::new("Name");
        label.set_alpha(3.0);
        assert_eq!(label.alpha(), 1.0);
        label.set_presented_alpha(-1.0);
        assert_eq!(label.presented_alpha(), 0.0);
    }

    #[test]
    fn test_paint_applies_presented_alpha() {
        let mut label = Label::new("Name");
        label.set_color(Color::LIGHT_GRAY);
        label.layout(Constraints::tight(Size::new(100.0, 40.0)));
        label.set_presented_alpha(0.5);

        let mut ctx = PaintContext::new();
        label.paint(&mut ctx);
        let command = &ctx.commands()[0];
        assert_eq!(command.text(), Some("Name"));
        assert_eq!(command.color().a, 0.5);
    }

    #[test]
    fn test_invisible_label_paints_nothing() {
        let mut label = Label::new("Name");
        label.set_presented_alpha(0.0);
        let mut ctx = PaintContext::new();
        label.paint(&mut ctx);
        assert!(ctx.commands().is_empty());
    }

    #[test]
    fn test_text_centered_in_frame() {
        let mut label = Label::new("Name");
        label.layout(Constraints::tight(Size::new(100.0, 100.0)));
        let mut ctx = PaintContext::new();
        label.paint(&mut ctx);
        let rect = ctx.commands()[0].rect();
        assert!(rect.y > 0.0);
        assert!((rect.y * 2.0 + rect.height - 100.0).abs() < 1e-3);
    }
}
