//! Text field whose placeholder floats above the text once there is content.
//!
//! The field wraps a [`TextInput`] and owns a [`Label`] that mirrors the
//! placeholder. While the field is empty the input shows its inline
//! placeholder and the label is invisible. As soon as there is text, the
//! label shrinks by two points, moves up by `font size + 2` and fades in:
//!
//! ```ignore
//! let mut field = FloatingPlaceholderField::new(Rect::new(20.0, 60.0, 280.0, 40.0));
//! field.set_placeholder("Email");
//! field.set_text("me@example.com"); // label floats above the text
//! ```
//!
//! Font size and anchor constants are model values and change at once; the
//! label's on-screen opacity and offsets follow with the transition from
//! [`AnimationSettings`].

mod presentation;

pub use presentation::{LabelPresentation, PlaceholderState};

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

use crate::animation::{AdvanceResult, AnimationSettings, AnimationState};
use crate::layout::{AnchorSet, Attribute, Constraints, Size};
use crate::reactive::{request_animation_frame, ChangeFlags, IntoMaybeDyn, WidgetId};
use crate::renderer::PaintContext;

use super::accessory::Accessory;
use super::font::Font;
use super::label::Label;
use super::text_input::TextInput;
use super::underline::Underline;
use super::widget::{Color, Event, EventResponse, Rect, Widget};

pub struct FloatingPlaceholderField {
    widget_id: WidgetId,
    dirty_flags: ChangeFlags,
    bounds: Rect,

    input: TextInput,
    label: Label,
    label_anchors: AnchorSet,
    underline: Option<Underline>,
    accessory: Option<Accessory>,

    placeholder_color: Color,
    font: Font,
    underline_enabled: bool,
    material_placeholder: bool,
    clips_to_bounds: bool,

    initialized: bool,
    change_subscribed: bool,
    /// Set by the input's change subscriber, consumed after event dispatch
    text_edited: Rc<Cell<bool>>,

    settings: AnimationSettings,
    presentation: AnimationState<LabelPresentation>,
    /// Time of the last frame; transitions started between frames begin here
    clock: Instant,
}

impl FloatingPlaceholderField {
    /// Create a field at `frame`, animating with the app's
    /// [`AnimationSettings`] context (or the defaults).
    pub fn new(frame: Rect) -> Self {
        Self::with_settings(frame, AnimationSettings::current())
    }

    pub fn with_settings(frame: Rect, settings: AnimationSettings) -> Self {
        let font = Font::default();
        let placeholder_color = Color::LIGHT_GRAY;

        let input = TextInput::new(String::new()).font(font.clone());
        let mut label = Label::new("");
        label.set_color(placeholder_color);
        label.set_font(font.clone());
        label.set_alpha(0.0);
        label.set_presented_alpha(0.0);

        let mut field = Self {
            widget_id: WidgetId::next(),
            dirty_flags: ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT,
            bounds: frame,
            input,
            label,
            label_anchors: AnchorSet::new(),
            underline: None,
            accessory: None,
            placeholder_color,
            font,
            underline_enabled: true,
            material_placeholder: true,
            clips_to_bounds: true,
            initialized: false,
            change_subscribed: false,
            text_edited: Rc::new(Cell::new(false)),
            presentation: AnimationState::new(LabelPresentation::default(), settings.transition()),
            settings,
            clock: Instant::now(),
        };
        field.initialize();
        field
    }

    /// Bring the field into a consistent state. Safe to call any number of
    /// times; construction and UI descriptions both end here.
    pub fn initialize(&mut self) {
        // The floating label sits above the field's top edge
        self.clips_to_bounds = false;

        if !self.change_subscribed {
            let edited = self.text_edited.clone();
            self.input.subscribe(move |_| edited.set(true));
            self.change_subscribed = true;
        }

        if self.underline_enabled {
            self.underline = None;
            self.attach_underline();
        }

        if self.label_anchors.is_empty() {
            self.label_anchors = AnchorSet::new()
                .pin(Attribute::Left, Attribute::Left, 0.0)
                .pin(Attribute::Height, Attribute::Height, 0.0)
                .pin(Attribute::Bottom, Attribute::Bottom, 0.0)
                .pin(Attribute::Right, Attribute::Right, 0.0);
        }

        self.apply_state(false);
        self.initialized = true;
        log::debug!(
            "floating field {:?} initialized ({:?}, underline: {})",
            self.widget_id,
            self.state(),
            self.underline.is_some()
        );
    }

    /// Replace the text and move the label to match.
    pub fn set_text(&mut self, value: impl Into<String>) {
        if !self.initialized {
            self.initialize();
        }
        self.input.set_text(value);
        self.apply_state(true);
    }

    /// Read the text from a reactive source. Changes are picked up at the
    /// next layout and animate like edits.
    pub fn bind_text(&mut self, source: impl IntoMaybeDyn<String>) {
        self.input.bind(source);
        self.invalidate_layout();
    }

    pub fn text(&self) -> &str {
        self.input.text()
    }

    pub fn state(&self) -> PlaceholderState {
        PlaceholderState::for_text(self.input.text())
    }

    /// Set the placeholder text. The label is reconfigured without animation.
    /// Returns false, doing nothing, when the text is unchanged.
    pub fn set_placeholder(&mut self, value: impl Into<String>) -> bool {
        let value = value.into();
        if value == self.label.text() {
            log::trace!("placeholder unchanged: {:?}", value);
            return false;
        }

        let state = self.state();
        self.label.set_text(value.clone());
        self.label.set_color(self.placeholder_color);
        self.label
            .set_font(self.font.with_size(state.font_size(self.font.size)));
        self.label.set_alpha(state.alpha());

        let snapped = LabelPresentation {
            alpha: state.alpha(),
            ..self.model_presentation()
        };
        self.presentation.set_immediate(snapped);
        self.label.set_presented_alpha(snapped.alpha);

        self.input.set_placeholder(value);
        self.place_label();
        self.invalidate_layout();
        true
    }

    pub fn placeholder(&self) -> &str {
        self.label.text()
    }

    pub fn set_placeholder_color(&mut self, color: Color) {
        self.placeholder_color = color;
        self.label.set_color(color);
        self.input.set_placeholder_color(color);
        self.invalidate_paint();
    }

    pub fn placeholder_color(&self) -> Color {
        self.placeholder_color
    }

    /// Add or remove the underline. Enabling twice keeps a single underline.
    pub fn enable_underline(&mut self, enabled: bool) {
        self.underline_enabled = enabled;
        if enabled {
            if self.underline.is_some() {
                log::trace!("underline already attached");
                return;
            }
            self.attach_underline();
        } else if self.underline.take().is_some() {
            log::debug!("underline detached from {:?}", self.widget_id);
            self.invalidate_layout();
        }
    }

    pub fn is_underline_enabled(&self) -> bool {
        self.underline_enabled
    }

    /// Turn the floating behavior on or off. The flag is read on the next
    /// transition only; a label already on screen stays where it is.
    pub fn enable_material_placeholder(&mut self, enabled: bool) {
        self.material_placeholder = enabled;
    }

    pub fn is_material_placeholder_enabled(&self) -> bool {
        self.material_placeholder
    }

    /// Set the trailing accessory. Its width becomes the label's horizontal
    /// offset from the next transition on.
    pub fn set_accessory(&mut self, accessory: Option<Accessory>) {
        self.accessory = accessory;
        self.invalidate_layout();
    }

    pub fn accessory(&self) -> Option<&Accessory> {
        self.accessory.as_ref()
    }

    pub fn accessory_mut(&mut self) -> Option<&mut Accessory> {
        self.accessory.as_mut()
    }

    /// Set the base font of the text; the label follows it.
    pub fn set_font(&mut self, font: Font) {
        if self.font == font {
            return;
        }
        self.font = font.clone();
        self.input.set_font(font);
        self.apply_state(false);
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    pub fn set_animation_settings(&mut self, settings: AnimationSettings) {
        self.settings = settings;
    }

    pub fn animation_settings(&self) -> &AnimationSettings {
        &self.settings
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn underline(&self) -> Option<&Underline> {
        self.underline.as_ref()
    }

    pub fn input(&self) -> &TextInput {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut TextInput {
        &mut self.input
    }

    pub fn clips_to_bounds(&self) -> bool {
        self.clips_to_bounds
    }

    /// Model vertical offset of the label (bottom anchor constant)
    pub fn label_vertical_offset(&self) -> f32 {
        self.label_anchors
            .constant(Attribute::Bottom)
            .unwrap_or_default()
    }

    /// Model horizontal offset of the label (right anchor constant)
    pub fn label_horizontal_offset(&self) -> f32 {
        self.label_anchors
            .constant(Attribute::Right)
            .unwrap_or_default()
    }

    /// What is on screen right now
    pub fn presented_label(&self) -> LabelPresentation {
        *self.presentation.current()
    }

    pub fn is_animating(&self) -> bool {
        self.presentation.is_animating()
    }

    fn model_presentation(&self) -> LabelPresentation {
        LabelPresentation {
            alpha: self.label.alpha(),
            offset_x: self.label_horizontal_offset(),
            offset_y: self.label_vertical_offset(),
        }
    }

    fn attach_underline(&mut self) {
        self.underline = Some(Underline::new());
        self.layout_children();
        self.invalidate_layout();
        log::debug!("underline attached to {:?}", self.widget_id);
    }

    fn underline_anchors() -> AnchorSet {
        AnchorSet::new()
            .pin(Attribute::Left, Attribute::Left, 0.0)
            .pin(Attribute::Right, Attribute::Right, 0.0)
            .pin(Attribute::Bottom, Attribute::Bottom, Underline::BOTTOM_INSET)
            .fixed(Attribute::Height, Underline::THICKNESS)
    }

    /// Move the label to the Empty or Filled configuration for the current
    /// text. Model values change at once; the presentation animates when
    /// `animated` is set and the settings allow it.
    fn apply_state(&mut self, animated: bool) {
        if !self.material_placeholder {
            log::trace!("material placeholder disabled, label left as is");
            return;
        }

        let state = self.state();
        let base = self.font.size;
        let offset_x = self.accessory.as_ref().map_or(0.0, |a| -a.width());

        self.label.set_font(self.font.with_size(state.font_size(base)));
        self.label.set_alpha(state.alpha());
        self.label_anchors
            .set_constant(Attribute::Bottom, state.vertical_offset(base));
        self.label_anchors.set_constant(Attribute::Right, offset_x);

        let target = LabelPresentation::for_state(state, base, offset_x);
        if animated {
            self.presentation.set_transition(self.settings.transition());
            if self.presentation.is_animating() {
                // Re-target from where the running animation has got to
                self.presentation.animate_to(target, self.clock);
            } else {
                // The host may have been idle; start on the next frame
                self.presentation.queue_to(target);
            }
            if self.presentation.is_animating() {
                request_animation_frame();
            }
        } else {
            self.presentation.set_immediate(target);
        }
        self.label
            .set_presented_alpha(self.presentation.current().alpha);

        self.place_label();
        self.invalidate_layout();
        log::debug!(
            "placeholder {:?} -> {:?} (animating: {})",
            self.widget_id,
            state,
            self.presentation.is_animating()
        );
    }

    /// Resolve the label frame from its anchors, using the presented offsets
    fn place_label(&mut self) {
        let presented = self.presented_label();
        let mut anchors = self.label_anchors.clone();
        anchors.set_constant(Attribute::Bottom, presented.offset_y);
        anchors.set_constant(Attribute::Right, presented.offset_x);

        let frame = anchors.resolve(self.bounds, Size::zero());
        self.label.layout(Constraints::tight(frame.size()));
        self.label.set_origin(frame.x, frame.y);
    }

    fn layout_children(&mut self) {
        let frame = self.bounds;
        let accessory_width = self
            .accessory
            .as_ref()
            .map_or(0.0, |a| a.width().min(frame.width));

        // The input leaves room for the trailing accessory
        let input_width = (frame.width - accessory_width).max(0.0);
        self.input
            .layout(Constraints::tight(Size::new(input_width, frame.height)));
        self.input.set_origin(frame.x, frame.y);

        if let Some(accessory) = &mut self.accessory {
            accessory.layout(Constraints::tight(Size::new(accessory_width, frame.height)));
            accessory.set_origin(frame.x + input_width, frame.y);
        }

        if let Some(underline) = &mut self.underline {
            let line = Self::underline_anchors().resolve(frame, Size::zero());
            underline.layout(Constraints::tight(line.size()));
            underline.set_origin(line.x, line.y);
        }

        self.place_label();
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

impl Widget for FloatingPlaceholderField {
    fn advance_animations(&mut self, now: Instant) -> bool {
        self.clock = now;
        let blinking = self.input.advance_animations(now);

        if let AdvanceResult::Changed(presented) = self.presentation.advance(now) {
            self.label.set_presented_alpha(presented.alpha);
            self.place_label();
            self.invalidate_paint();
        }

        let animating = self.presentation.is_animating();
        if animating {
            request_animation_frame();
        }
        blinking || animating
    }

    fn layout(&mut self, constraints: Constraints) -> Size {
        if self.input.refresh() {
            log::debug!("text of {:?} changed by its source", self.widget_id);
            self.apply_state(true);
        }

        let size = constraints.constrain(self.bounds.size());
        self.bounds.width = size.width;
        self.bounds.height = size.height;
        self.layout_children();
        self.dirty_flags.remove(ChangeFlags::NEEDS_LAYOUT);
        size
    }

    fn paint(&self, ctx: &mut PaintContext) {
        if self.clips_to_bounds {
            ctx.push_clip(self.bounds);
        }

        self.input.paint(ctx);
        if let Some(accessory) = &self.accessory {
            accessory.paint(ctx);
        }
        if let Some(underline) = &self.underline {
            underline.paint(ctx);
        }
        self.label.paint(ctx);

        if self.clips_to_bounds {
            ctx.pop_clip();
        }
    }

    fn event(&mut self, event: &Event) -> EventResponse {
        let response = self.input.event(event);
        if self.text_edited.replace(false) {
            self.apply_state(true);
        }
        response
    }

    fn set_origin(&mut self, x: f32, y: f32) {
        self.bounds.x = x;
        self.bounds.y = y;
        self.layout_children();
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn id(&self) -> WidgetId {
        self.widget_id
    }

    fn mark_dirty(&mut self, flags: ChangeFlags) {
        self.dirty_flags |= flags;
    }

    fn needs_layout(&self) -> bool {
        self.dirty_flags.contains(ChangeFlags::NEEDS_LAYOUT)
            || self.input.needs_layout()
            || self.label.needs_layout()
    }

    fn needs_paint(&self) -> bool {
        self.dirty_flags.contains(ChangeFlags::NEEDS_PAINT)
            || self.input.needs_paint()
            || self.label.needs_paint()
    }

    fn clear_dirty(&mut self) {
        self.dirty_flags = ChangeFlags::empty();
        self.input.clear_dirty();
        self.label.clear_dirty();
        if let Some(underline) = &mut self.underline {
            underline.clear_dirty();
        }
        if let Some(accessory) = &mut self.accessory {
            accessory.clear_dirty();
        }
    }
}
