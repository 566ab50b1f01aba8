pub mod accessory;
pub mod floating_field;
pub mod font;
pub mod label;
pub mod text_input;
pub mod underline;
pub mod widget;

/// Macro to implement common dirty flag methods for simple widgets.
///
/// `FloatingPlaceholderField` keeps its own implementation because it
/// recurses to its parts.
macro_rules! impl_dirty_flags {
    () => {
        fn mark_dirty(&mut self, flags: crate::reactive::ChangeFlags) {
            self.dirty_flags |= flags;
        }
        fn needs_layout(&self) -> bool {
            self.dirty_flags
                .contains(crate::reactive::ChangeFlags::NEEDS_LAYOUT)
        }
        fn needs_paint(&self) -> bool {
            self.dirty_flags
                .contains(crate::reactive::ChangeFlags::NEEDS_PAINT)
        }
        fn clear_dirty(&mut self) {
            self.dirty_flags = crate::reactive::ChangeFlags::empty();
        }
    };
}
pub(crate) use impl_dirty_flags;

pub use accessory::Accessory;
pub use floating_field::{FloatingPlaceholderField, LabelPresentation, PlaceholderState};
pub use font::{Font, FontFamily, FontWeight};
pub use label::Label;
pub use text_input::{text_input, Selection, TextInput};
pub use underline::Underline;
pub use widget::{
    Color, ColorParseError, Event, EventResponse, Key, Modifiers, MouseButton, Rect, Widget,
};

use crate::reactive::{IntoMaybeDyn, MaybeDyn};

impl IntoMaybeDyn<Color> for Color {
    fn into_maybe_dyn(self) -> MaybeDyn<Color> {
        MaybeDyn::Static(self)
    }
}
