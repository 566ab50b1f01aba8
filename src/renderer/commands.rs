//! Draw command definitions recorded by [`PaintContext`](super::PaintContext).

use crate::widgets::font::{FontFamily, FontWeight};
use crate::widgets::{Color, Rect};

/// A single draw operation in surface coordinates.
///
/// Colors already include the opacity of every enclosing opacity layer.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill a (possibly rounded) rectangle.
    Rect {
        rect: Rect,
        color: Color,
        /// Corner radius in logical pixels
        radius: f32,
        /// Intersection of the active clip regions
        clip: Option<Rect>,
    },

    /// Draw a run of text.
    Text {
        text: String,
        /// The bounding rectangle for the text
        rect: Rect,
        color: Color,
        font_size: f32,
        font_family: FontFamily,
        font_weight: FontWeight,
        clip: Option<Rect>,
    },
}

impl DrawCommand {
    pub fn rect(&self) -> Rect {
        match self {
            DrawCommand::Rect { rect, .. } | DrawCommand::Text { rect, .. } => *rect,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            DrawCommand::Rect { color, .. } | DrawCommand::Text { color, .. } => *color,
        }
    }

    pub fn clip(&self) -> Option<Rect> {
        match self {
            DrawCommand::Rect { clip, .. } | DrawCommand::Text { clip, .. } => *clip,
        }
    }

    /// The text of a text command
    pub fn text(&self) -> Option<&str> {
        match self {
            DrawCommand::Text { text, .. } => Some(text),
            DrawCommand::Rect { .. } => None,
        }
    }
}
