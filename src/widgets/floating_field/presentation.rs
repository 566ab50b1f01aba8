use crate::animation::Animatable;

/// Smallest font size the floated label shrinks to
pub const MIN_LABEL_FONT_SIZE: f32 = 1.0;

/// Whether the field currently has content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderState {
    Empty,
    Filled,
}

impl PlaceholderState {
    pub fn for_text(text: &str) -> Self {
        if text.is_empty() {
            PlaceholderState::Empty
        } else {
            PlaceholderState::Filled
        }
    }

    /// Label font size for this state, given the field's base size
    pub fn font_size(self, base: f32) -> f32 {
        match self {
            PlaceholderState::Empty => base,
            PlaceholderState::Filled => (base - 2.0).max(MIN_LABEL_FONT_SIZE),
        }
    }

    /// Label vertical offset for this state. Negative is up.
    pub fn vertical_offset(self, base: f32) -> f32 {
        match self {
            PlaceholderState::Empty => 0.0,
            PlaceholderState::Filled => -(base + 2.0),
        }
    }

    pub fn alpha(self) -> f32 {
        match self {
            PlaceholderState::Empty => 0.0,
            PlaceholderState::Filled => 1.0,
        }
    }
}

/// The animated part of the floating label: what is on screen while the
/// model values already hold the end state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LabelPresentation {
    pub alpha: f32,
    /// Constant of the label's right anchor
    pub offset_x: f32,
    /// Constant of the label's bottom anchor
    pub offset_y: f32,
}

impl LabelPresentation {
    pub fn for_state(state: PlaceholderState, base: f32, offset_x: f32) -> Self {
        Self {
            alpha: state.alpha(),
            offset_x,
            offset_y: state.vertical_offset(base),
        }
    }
}

impl Animatable for LabelPresentation {
    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        Self {
            alpha: f32::lerp(&from.alpha, &to.alpha, t),
            offset_x: f32::lerp(&from.offset_x, &to.offset_x, t),
            offset_y: f32::lerp(&from.offset_y, &to.offset_y, t),
        }
    }
}
