use crate::layout::{Constraints, Size};
use crate::reactive::{ChangeFlags, WidgetId};
use crate::renderer::PaintContext;

use super::impl_dirty_flags;
use super::widget::{Color, Rect, Widget};

/// Thin decorative bar drawn under a field. Its frame comes from anchors
/// owned by the field.
pub struct Underline {
    widget_id: WidgetId,
    dirty_flags: ChangeFlags,
    color: Color,
    bounds: Rect,
}

impl Underline {
    /// Bar thickness in logical pixels
    pub const THICKNESS: f32 = 0.5;
    /// Distance below the field's bottom edge
    pub const BOTTOM_INSET: f32 = 4.0;

    pub fn new() -> Self {
        Self {
            widget_id: WidgetId::next(),
            dirty_flags: ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT,
            color: Color::GRAY,
            bounds: Rect::default(),
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn current_color(&self) -> Color {
        self.color
    }
}

impl Default for Underline {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Underline {
    fn layout(&mut self, constraints: Constraints) -> Size {
        let size = constraints.constrain(Size::new(constraints.max_width, Self::THICKNESS));
        self.bounds.width = size.width;
        self.bounds.height = size.height;
        self.dirty_flags.remove(ChangeFlags::NEEDS_LAYOUT);
        size
    }

    fn paint(&self, ctx: &mut PaintContext) {
        ctx.draw_rect(self.bounds, self.color);
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
    fn test_paints_one_gray_bar() {
        let mut underline = Underline::new();
        underline.layout(Constraints::tight(Size::new(200.0, 0.5)));
        underline.set_origin(10.0, 144.0);

        let mut ctx = PaintContext::new();
        underline.paint(&mut ctx);
        assert_eq!(ctx.commands().len(), 1);
        assert_eq!(ctx.commands()[0].rect(), Rect::new(10.0, 144.0, 200.0, 0.5));
        assert_eq!(ctx.commands()[0].color(), Color::GRAY);
    }
}
