use crate::layout::{Constraints, Size};
use crate::reactive::{ChangeFlags, WidgetId};
use crate::renderer::PaintContext;

use super::font::Font;
use super::impl_dirty_flags;
use super::widget::{Color, Rect, Widget};

/// Fixed-width trailing view, e.g. a clear button glyph.
///
/// ```ignore
/// field.set_accessory(Some(Accessory::new(30.0).glyph("×")));
/// ```
pub struct Accessory {
    widget_id: WidgetId,
    dirty_flags: ChangeFlags,
    width: f32,
    glyph: Option<String>,
    color: Color,
    font: Font,
    bounds: Rect,
}

impl Accessory {
    pub fn new(width: f32) -> Self {
        Self {
            widget_id: WidgetId::next(),
            dirty_flags: ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT,
            width: width.max(0.0),
            glyph: None,
            color: Color::GRAY,
            font: Font::default(),
            bounds: Rect::default(),
        }
    }

    pub fn glyph(mut self, glyph: impl Into<String>) -> Self {
        self.glyph = Some(glyph.into());
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn set_width(&mut self, width: f32) {
        self.width = width.max(0.0);
        self.dirty_flags |= ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT;
        self.widget_id.request_layout();
    }
}

impl Widget for Accessory {
    fn layout(&mut self, constraints: Constraints) -> Size {
        let size = constraints.constrain(Size::new(self.width, constraints.max_height));
        self.bounds.width = size.width;
        self.bounds.height = size.height;
        self.dirty_flags.remove(ChangeFlags::NEEDS_LAYOUT);
        size
    }

    fn paint(&self, ctx: &mut PaintContext) {
        if let Some(glyph) = &self.glyph {
            ctx.draw_text_styled(
                glyph,
                self.bounds,
                self.color,
                self.font.size,
                self.font.family.clone(),
                self.font.weight,
            );
        }
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
    fn test_negative_width_clamped() {
        assert_eq!(Accessory::new(-4.0).width(), 0.0);
    }

    #[test]
    fn test_glyph_painted_in_bounds() {
        let mut accessory = Accessory::new(30.0).glyph("×");
        accessory.layout(Constraints::tight(Size::new(30.0, 40.0)));
        accessory.set_origin(170.0, 0.0);

        let mut ctx = PaintContext::new();
        accessory.paint(&mut ctx);
        assert_eq!(ctx.commands()[0].text(), Some("×"));
        assert_eq!(ctx.commands()[0].rect(), Rect::new(170.0, 0.0, 30.0, 40.0));
    }
}
