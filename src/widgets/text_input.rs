//! TextInput widget for single-line text editing.
//!
//! The TextInput widget handles:
//! - Text display and editing
//! - An inline placeholder shown while the text is empty
//! - Cursor blinking and positioning
//! - Text selection with mouse and keyboard
//! - Password masking mode

use std::time::{Duration, Instant};

use crate::layout::{Constraints, Size};
use crate::reactive::{
    has_focus, release_focus, request_animation_frame, request_focus, ChangeFlags, IntoMaybeDyn,
    MaybeDyn, WidgetId,
};
use crate::renderer::{char_index_from_x, measure_text, measure_text_to_char, PaintContext};

use super::font::Font;
use super::impl_dirty_flags;
use super::widget::{Color, Event, EventResponse, Key, MouseButton, Rect, Widget};

/// Cursor blink interval in milliseconds
const CURSOR_BLINK_MS: u64 = 530;

type TextCallback = Box<dyn Fn(&str)>;

/// Selection state tracking anchor and cursor positions
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    /// Where selection started (anchor point)
    pub anchor: usize,
    /// Current cursor position
    pub cursor: usize,
}

impl Selection {
    /// Create a new selection with cursor at given position (no selection)
    pub fn new(pos: usize) -> Self {
        Self {
            anchor: pos,
            cursor: pos,
        }
    }

    pub fn has_selection(&self) -> bool {
        self.anchor != self.cursor
    }

    /// Get the start and end of the selection (min, max)
    pub fn range(&self) -> (usize, usize) {
        if self.anchor <= self.cursor {
            (self.anchor, self.cursor)
        } else {
            (self.cursor, self.anchor)
        }
    }

    /// Collapse selection to cursor position
    pub fn collapse(&mut self) {
        self.anchor = self.cursor;
    }
}

pub struct TextInput {
    widget_id: WidgetId,
    dirty_flags: ChangeFlags,

    // Content (actual value, never masked)
    value: MaybeDyn<String>,
    /// Last value read from `value`, so edits are only overridden when the
    /// source itself changes
    last_source: Option<String>,
    cached_value: String,

    placeholder: String,
    placeholder_color: Color,

    // Styling
    text_color: MaybeDyn<Color>,
    cursor_color: MaybeDyn<Color>,
    selection_color: MaybeDyn<Color>,
    font: Font,

    // Password mode
    is_password: bool,
    mask_char: char,

    selection: Selection,

    // Cursor blinking
    cursor_visible: bool,
    last_cursor_toggle: Option<Instant>,

    // Mouse drag selection
    is_dragging: bool,

    // Layout
    bounds: Rect,
    text_height: f32,

    change_subscribers: Vec<TextCallback>,
    on_submit: Option<TextCallback>,
}

impl TextInput {
    pub fn new(value: impl IntoMaybeDyn<String>) -> Self {
        let value = value.into_maybe_dyn();
        let cached_value = value.get();
        let font = Font::default();
        Self {
            widget_id: WidgetId::next(),
            dirty_flags: ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT,
            value,
            last_source: Some(cached_value.clone()),
            cached_value,
            placeholder: String::new(),
            placeholder_color: Color::LIGHT_GRAY,
            text_color: MaybeDyn::Static(Color::BLACK),
            cursor_color: MaybeDyn::Static(Color::rgb(0.0, 0.48, 1.0)),
            selection_color: MaybeDyn::Static(Color::rgba(0.0, 0.48, 1.0, 0.25)),
            text_height: font.size * 1.2,
            font,
            is_password: false,
            mask_char: '•',
            selection: Selection::new(0),
            cursor_visible: true,
            last_cursor_toggle: None,
            is_dragging: false,
            bounds: Rect::default(),
            change_subscribers: Vec::new(),
            on_submit: None,
        }
    }

    pub fn text_color(mut self, color: impl IntoMaybeDyn<Color>) -> Self {
        self.text_color = color.into_maybe_dyn();
        self
    }

    pub fn cursor_color(mut self, color: impl IntoMaybeDyn<Color>) -> Self {
        self.cursor_color = color.into_maybe_dyn();
        self
    }

    pub fn selection_color(mut self, color: impl IntoMaybeDyn<Color>) -> Self {
        self.selection_color = color.into_maybe_dyn();
        self
    }

    pub fn font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Enable password mode (masks text with bullet characters)
    pub fn password(mut self, enabled: bool) -> Self {
        self.is_password = enabled;
        self
    }

    /// Set custom mask character for password mode (default: '•')
    pub fn mask_char(mut self, c: char) -> Self {
        self.mask_char = c;
        self
    }

    /// Add a callback for text changes made by editing
    pub fn on_change<F: Fn(&str) + 'static>(mut self, callback: F) -> Self {
        self.subscribe(callback);
        self
    }

    /// Set callback for submit (Enter key)
    pub fn on_submit<F: Fn(&str) + 'static>(mut self, callback: F) -> Self {
        self.on_submit = Some(Box::new(callback));
        self
    }

    /// Register another change subscriber. Subscribers run after every edit
    /// that changes the text, in registration order.
    pub fn subscribe<F: Fn(&str) + 'static>(&mut self, callback: F) {
        self.change_subscribers.push(Box::new(callback));
    }

    pub fn text(&self) -> &str {
        &self.cached_value
    }

    /// Replace the text programmatically. Subscribers are not notified.
    /// Returns whether the text changed.
    pub fn set_text(&mut self, value: impl Into<String>) -> bool {
        let value = value.into();
        self.value = MaybeDyn::Static(value.clone());
        self.last_source = Some(value.clone());
        if value == self.cached_value {
            return false;
        }
        self.cached_value = value;
        self.clamp_selection();
        self.invalidate_layout();
        true
    }

    /// Read the text from a reactive source from now on.
    pub fn bind(&mut self, value: impl IntoMaybeDyn<String>) {
        self.value = value.into_maybe_dyn();
        self.last_source = None;
        self.invalidate_layout();
    }

    pub fn placeholder_text(&self) -> &str {
        &self.placeholder
    }

    pub fn set_placeholder(&mut self, placeholder: impl Into<String>) {
        self.placeholder = placeholder.into();
        self.invalidate_layout();
    }

    pub fn placeholder_color(&self) -> Color {
        self.placeholder_color
    }

    pub fn set_placeholder_color(&mut self, color: Color) {
        self.placeholder_color = color;
        self.dirty_flags |= ChangeFlags::NEEDS_PAINT;
        self.widget_id.request_paint();
    }

    pub fn font_ref(&self) -> &Font {
        &self.font
    }

    pub fn set_font(&mut self, font: Font) {
        self.font = font;
        self.invalidate_layout();
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn is_focused(&self) -> bool {
        has_focus(self.widget_id)
    }

    pub fn is_cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    fn invalidate_layout(&mut self) {
        self.dirty_flags |= ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT;
        self.widget_id.request_layout();
    }

    /// Get the display text (masked if password mode)
    fn display_text(&self) -> String {
        if self.is_password {
            self.mask_char
                .to_string()
                .repeat(self.cached_value.chars().count())
        } else {
            self.cached_value.clone()
        }
    }

    /// Pick up a changed value from the text source.
    /// Returns true if the text changed.
    pub(crate) fn refresh(&mut self) -> bool {
        let source = self.value.get();
        if self.last_source.as_deref() == Some(source.as_str()) {
            return false;
        }
        self.last_source = Some(source.clone());
        if source == self.cached_value {
            return false;
        }
        self.cached_value = source;
        self.clamp_selection();
        self.dirty_flags |= ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT;
        true
    }

    fn clamp_selection(&mut self) {
        let char_count = self.cached_value.chars().count();
        self.selection.cursor = self.selection.cursor.min(char_count);
        self.selection.anchor = self.selection.anchor.min(char_count);
    }

    /// Reset cursor to visible (called on input)
    fn reset_cursor_blink(&mut self) {
        self.cursor_visible = true;
        self.last_cursor_toggle = None;
    }

    /// Get character index from x coordinate in surface space
    fn char_index_at_x(&self, x: f32) -> usize {
        let display = self.display_text();
        char_index_from_x(&display, self.font.size, &self.font.family, x - self.bounds.x)
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.cached_value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.cached_value.len())
    }

    /// Insert text at cursor, replacing any selection
    fn insert_text(&mut self, text: &str) {
        let (start, end) = self.selection.range();
        let byte_start = self.byte_index(start);
        let byte_end = self.byte_index(end);

        let mut new_value = String::with_capacity(self.cached_value.len() + text.len());
        new_value.push_str(&self.cached_value[..byte_start]);
        new_value.push_str(text);
        new_value.push_str(&self.cached_value[byte_end..]);

        self.cached_value = new_value;
        self.selection = Selection::new(start + text.chars().count());

        self.notify_change();
        self.reset_cursor_blink();
    }

    /// Delete selected text or character before/after cursor
    fn delete(&mut self, forward: bool) {
        if self.selection.has_selection() {
            let (start, end) = self.selection.range();
            self.delete_range(start, end);
            self.selection = Selection::new(start);
        } else if forward {
            let char_count = self.cached_value.chars().count();
            if self.selection.cursor < char_count {
                self.delete_range(self.selection.cursor, self.selection.cursor + 1);
            }
        } else if self.selection.cursor > 0 {
            self.delete_range(self.selection.cursor - 1, self.selection.cursor);
            self.selection = Selection::new(self.selection.cursor - 1);
        }
        self.reset_cursor_blink();
    }

    fn delete_range(&mut self, start: usize, end: usize) {
        let byte_start = self.byte_index(start);
        let byte_end = self.byte_index(end);
        self.cached_value.replace_range(byte_start..byte_end, "");
        self.notify_change();
    }

    /// Move cursor left/right, optionally extending selection
    fn move_cursor(&mut self, direction: i32, extend_selection: bool, word: bool) {
        let char_count = self.cached_value.chars().count();
        let new_pos = if word {
            self.find_word_boundary(self.selection.cursor, direction)
        } else if direction < 0 {
            self.selection.cursor.saturating_sub(1)
        } else {
            (self.selection.cursor + 1).min(char_count)
        };

        self.selection.cursor = new_pos;
        if !extend_selection {
            self.selection.collapse();
        }
        self.reset_cursor_blink();
    }

    fn find_word_boundary(&self, start: usize, direction: i32) -> usize {
        let chars: Vec<char> = self.cached_value.chars().collect();
        let len = chars.len();

        if direction < 0 {
            if start == 0 {
                return 0;
            }
            let mut pos = start - 1;
            while pos > 0 && chars[pos].is_whitespace() {
                pos -= 1;
            }
            while pos > 0 && !chars[pos - 1].is_whitespace() {
                pos -= 1;
            }
            pos
        } else {
            if start >= len {
                return len;
            }
            let mut pos = start;
            while pos < len && !chars[pos].is_whitespace() {
                pos += 1;
            }
            while pos < len && chars[pos].is_whitespace() {
                pos += 1;
            }
            pos
        }
    }

    fn move_to_edge(&mut self, to_start: bool, extend_selection: bool) {
        self.selection.cursor = if to_start {
            0
        } else {
            self.cached_value.chars().count()
        };
        if !extend_selection {
            self.selection.collapse();
        }
        self.reset_cursor_blink();
    }

    fn select_all(&mut self) {
        self.selection.anchor = 0;
        self.selection.cursor = self.cached_value.chars().count();
        self.reset_cursor_blink();
    }

    fn notify_change(&mut self) {
        // Edits are sticky: a static source now holds the edited text
        if !self.value.is_dynamic() {
            self.value = MaybeDyn::Static(self.cached_value.clone());
            self.last_source = Some(self.cached_value.clone());
        }
        self.dirty_flags |= ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT;
        for callback in &self.change_subscribers {
            callback(&self.cached_value);
        }
    }

    fn handle_key(&mut self, key: &Key, ctrl: bool, shift: bool) -> EventResponse {
        match key {
            Key::Backspace => {
                self.delete(false);
                EventResponse::Handled
            }
            Key::Delete => {
                self.delete(true);
                EventResponse::Handled
            }
            Key::Enter => {
                if let Some(ref callback) = self.on_submit {
                    callback(&self.cached_value);
                }
                EventResponse::Handled
            }
            Key::Left => {
                if !shift && self.selection.has_selection() {
                    let (start, _) = self.selection.range();
                    self.selection = Selection::new(start);
                    self.reset_cursor_blink();
                } else {
                    self.move_cursor(-1, shift, ctrl);
                }
                EventResponse::Handled
            }
            Key::Right => {
                if !shift && self.selection.has_selection() {
                    let (_, end) = self.selection.range();
                    self.selection = Selection::new(end);
                    self.reset_cursor_blink();
                } else {
                    self.move_cursor(1, shift, ctrl);
                }
                EventResponse::Handled
            }
            Key::Home => {
                self.move_to_edge(true, shift);
                EventResponse::Handled
            }
            Key::End => {
                self.move_to_edge(false, shift);
                EventResponse::Handled
            }
            Key::Char(c) => {
                if ctrl {
                    match c.to_ascii_lowercase() {
                        'a' => {
                            self.select_all();
                            EventResponse::Handled
                        }
                        _ => EventResponse::Ignored,
                    }
                } else if !c.is_control() {
                    self.insert_text(&c.to_string());
                    EventResponse::Handled
                } else {
                    EventResponse::Ignored
                }
            }
            Key::Tab | Key::Escape => EventResponse::Ignored,
        }
    }

    /// Rect of one text line, vertically centered in the bounds
    fn line_rect(&self) -> Rect {
        let y = self.bounds.y + ((self.bounds.height - self.text_height) / 2.0).max(0.0);
        Rect::new(self.bounds.x, y, self.bounds.width, self.text_height)
    }
}

impl Widget for TextInput {
    fn advance_animations(&mut self, now: Instant) -> bool {
        if !has_focus(self.widget_id) {
            return false;
        }
        match self.last_cursor_toggle {
            None => self.last_cursor_toggle = Some(now),
            Some(last)
                if now.saturating_duration_since(last)
                    >= Duration::from_millis(CURSOR_BLINK_MS) =>
            {
                self.cursor_visible = !self.cursor_visible;
                self.last_cursor_toggle = Some(now);
                self.dirty_flags |= ChangeFlags::NEEDS_PAINT;
            }
            Some(_) => {}
        }
        // Keep requesting frames for blinking
        request_animation_frame();
        true
    }

    fn layout(&mut self, constraints: Constraints) -> Size {
        let content_changed = self.refresh();

        // Skip re-measurement if nothing changed and we don't need layout
        if !content_changed && !self.needs_layout() && self.bounds.width > 0.0 {
            return Size::new(self.bounds.width, self.bounds.height);
        }

        let display = self.display_text();
        let shown = if display.is_empty() {
            self.placeholder.as_str()
        } else {
            display.as_str()
        };
        let measured = measure_text(shown, self.font.size, &self.font.family, None);
        self.text_height = measured.height.max(self.font.size * 1.2);

        let size = constraints.constrain(Size::new(measured.width, self.text_height));
        self.bounds.width = size.width;
        self.bounds.height = size.height;
        self.dirty_flags.remove(ChangeFlags::NEEDS_LAYOUT);

        size
    }

    fn paint(&self, ctx: &mut PaintContext) {
        let display = self.display_text();
        let is_focused = has_focus(self.widget_id);
        let line = self.line_rect();

        ctx.push_clip(self.bounds);

        if is_focused && self.selection.has_selection() {
            let (start, end) = self.selection.range();
            let start_x = measure_text_to_char(&display, self.font.size, &self.font.family, start);
            let end_x = measure_text_to_char(&display, self.font.size, &self.font.family, end);
            let selection_rect = Rect::new(line.x + start_x, line.y, end_x - start_x, line.height);
            ctx.draw_rect(selection_rect, self.selection_color.get());
        }

        if display.is_empty() {
            ctx.draw_text_styled(
                &self.placeholder,
                line,
                self.placeholder_color,
                self.font.size,
                self.font.family.clone(),
                self.font.weight,
            );
        } else {
            ctx.draw_text_styled(
                &display,
                line,
                self.text_color.get(),
                self.font.size,
                self.font.family.clone(),
                self.font.weight,
            );
        }

        if is_focused && self.cursor_visible {
            let cursor_x = measure_text_to_char(
                &display,
                self.font.size,
                &self.font.family,
                self.selection.cursor,
            );
            let cursor_rect = Rect::new(line.x + cursor_x, line.y, 1.5, line.height);
            ctx.draw_rect(cursor_rect, self.cursor_color.get());
        }

        ctx.pop_clip();
    }

    fn event(&mut self, event: &Event) -> EventResponse {
        match event {
            Event::MouseDown { x, y, button } => {
                if self.bounds.contains(*x, *y) && *button == MouseButton::Left {
                    request_focus(self.widget_id);
                    request_animation_frame();

                    let char_index = self.char_index_at_x(*x);
                    self.selection = Selection::new(char_index);
                    self.is_dragging = true;
                    self.reset_cursor_blink();

                    return EventResponse::Handled;
                }
            }
            Event::MouseMove { x, .. } => {
                if self.is_dragging {
                    // Extend selection while dragging
                    self.selection.cursor = self.char_index_at_x(*x);
                    request_animation_frame();
                    return EventResponse::Handled;
                }
            }
            Event::MouseUp { button, .. } => {
                if *button == MouseButton::Left && self.is_dragging {
                    self.is_dragging = false;
                    return EventResponse::Handled;
                }
            }
            Event::KeyDown { key, modifiers } => {
                if has_focus(self.widget_id) {
                    let response = self.handle_key(key, modifiers.ctrl, modifiers.shift);
                    if response == EventResponse::Handled {
                        request_animation_frame();
                    }
                    return response;
                }
            }
            Event::FocusIn => {
                request_focus(self.widget_id);
                self.reset_cursor_blink();
                request_animation_frame();
                return EventResponse::Handled;
            }
            Event::FocusOut => {
                if has_focus(self.widget_id) {
                    release_focus(self.widget_id);
                    self.cursor_visible = false;
                    self.is_dragging = false;
                    request_animation_frame();
                    return EventResponse::Handled;
                }
            }
            Event::KeyUp { .. } => {}
        }

        EventResponse::Ignored
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

/// Create a text input widget
///
/// Accepts static strings, closures, or signals:
/// ```ignore
/// text_input(username)  // reactive signal
/// text_input("default value")  // static initial value
/// ```
pub fn text_input(value: impl IntoMaybeDyn<String>) -> TextInput {
    TextInput::new(value)
}
