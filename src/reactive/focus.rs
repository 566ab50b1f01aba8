//! Keyboard focus tracking. Only one widget can have focus at a time.

use std::cell::RefCell;

use super::invalidation::WidgetId;

thread_local! {
    static FOCUSED_WIDGET: RefCell<Option<WidgetId>> = const { RefCell::new(None) };
}

/// Request keyboard focus for a widget.
/// The previously focused widget, if any, is repainted.
pub fn request_focus(id: WidgetId) {
    FOCUSED_WIDGET.with(|cell| {
        let mut focused = cell.borrow_mut();
        if let Some(old_id) = *focused
            && old_id != id
        {
            old_id.request_paint();
        }
        *focused = Some(id);
    });
    id.request_paint();
}

/// Release keyboard focus if `id` currently holds it.
pub fn release_focus(id: WidgetId) {
    FOCUSED_WIDGET.with(|cell| {
        let mut focused = cell.borrow_mut();
        if *focused == Some(id) {
            id.request_paint();
            *focused = None;
        }
    });
}

pub fn has_focus(id: WidgetId) -> bool {
    FOCUSED_WIDGET.with(|cell| *cell.borrow() == Some(id))
}

pub fn focused_widget() -> Option<WidgetId> {
    FOCUSED_WIDGET.with(|cell| *cell.borrow())
}
