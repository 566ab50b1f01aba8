//! Edge anchors between a child view and its parent.
//!
//! An [`Anchor`] says "this attribute of the child equals that attribute of
//! the parent plus a constant", or "this attribute equals a constant". The
//! constants stay mutable after creation, which is how the floating label is
//! moved between its inline and floating positions.
//!
//! ```ignore
//! let label = AnchorSet::new()
//!     .pin(Attribute::Left, Attribute::Left, 0.0)
//!     .pin(Attribute::Height, Attribute::Height, 0.0)
//!     .pin(Attribute::Bottom, Attribute::Bottom, 0.0)
//!     .pin(Attribute::Right, Attribute::Right, 0.0);
//! label_frame = label.resolve(field_frame, intrinsic);
//! ```

use bitflags::bitflags;

use super::Size;
use crate::widgets::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Left,
    Right,
    Top,
    Bottom,
    Width,
    Height,
}

impl Attribute {
    fn flag(self) -> Edges {
        match self {
            Attribute::Left => Edges::LEFT,
            Attribute::Right => Edges::RIGHT,
            Attribute::Top => Edges::TOP,
            Attribute::Bottom => Edges::BOTTOM,
            Attribute::Width => Edges::WIDTH,
            Attribute::Height => Edges::HEIGHT,
        }
    }

    /// Value of this attribute on a resolved frame
    pub fn of(self, rect: Rect) -> f32 {
        match self {
            Attribute::Left => rect.x,
            Attribute::Right => rect.x + rect.width,
            Attribute::Top => rect.y,
            Attribute::Bottom => rect.y + rect.height,
            Attribute::Width => rect.width,
            Attribute::Height => rect.height,
        }
    }
}

bitflags! {
    /// Set of attributes that carry an anchor
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Edges: u8 {
        const LEFT   = 0b00_0001;
        const RIGHT  = 0b00_0010;
        const TOP    = 0b00_0100;
        const BOTTOM = 0b00_1000;
        const WIDTH  = 0b01_0000;
        const HEIGHT = 0b10_0000;
    }
}

/// What an anchored attribute is measured against
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Target {
    /// The given attribute of the parent frame
    Parent(Attribute),
    /// No second item, the constant alone
    Fixed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub attribute: Attribute,
    pub target: Target,
    pub constant: f32,
}

impl Anchor {
    fn value(&self, parent: Rect) -> f32 {
        match self.target {
            Target::Parent(attribute) => attribute.of(parent) + self.constant,
            Target::Fixed => self.constant,
        }
    }
}

/// The anchors of one child, at most one per attribute.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnchorSet {
    anchors: Vec<Anchor>,
}

impl AnchorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Anchor `attribute` to the parent's `to` attribute plus `constant`.
    /// Replaces an existing anchor on the same attribute.
    pub fn pin(self, attribute: Attribute, to: Attribute, constant: f32) -> Self {
        self.with(Anchor {
            attribute,
            target: Target::Parent(to),
            constant,
        })
    }

    /// Fix `attribute` to `constant`, independent of the parent.
    pub fn fixed(self, attribute: Attribute, constant: f32) -> Self {
        self.with(Anchor {
            attribute,
            target: Target::Fixed,
            constant,
        })
    }

    fn with(mut self, anchor: Anchor) -> Self {
        self.anchors.retain(|a| a.attribute != anchor.attribute);
        self.anchors.push(anchor);
        self
    }

    pub fn get(&self, attribute: Attribute) -> Option<&Anchor> {
        self.anchors.iter().find(|a| a.attribute == attribute)
    }

    pub fn constant(&self, attribute: Attribute) -> Option<f32> {
        self.get(attribute).map(|a| a.constant)
    }

    /// Change the constant of an existing anchor. Returns false when
    /// `attribute` is not anchored.
    pub fn set_constant(&mut self, attribute: Attribute, constant: f32) -> bool {
        match self.anchors.iter_mut().find(|a| a.attribute == attribute) {
            Some(anchor) => {
                anchor.constant = constant;
                true
            }
            None => false,
        }
    }

    pub fn pinned(&self) -> Edges {
        self.anchors
            .iter()
            .fold(Edges::empty(), |edges, a| edges | a.attribute.flag())
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// Compute the child frame inside `parent`.
    ///
    /// Attributes without an anchor fall back to `intrinsic` for sizes and to
    /// the parent's leading edge for positions.
    pub fn resolve(&self, parent: Rect, intrinsic: Size) -> Rect {
        let value = |attribute| self.get(attribute).map(|a| a.value(parent));

        let (x, width) = resolve_axis(
            value(Attribute::Left),
            value(Attribute::Right),
            value(Attribute::Width),
            parent.x,
            intrinsic.width,
        );
        let (y, height) = resolve_axis(
            value(Attribute::Top),
            value(Attribute::Bottom),
            value(Attribute::Height),
            parent.y,
            intrinsic.height,
        );
        Rect::new(x, y, width.max(0.0), height)
    }
}

fn resolve_axis(
    start: Option<f32>,
    end: Option<f32>,
    length: Option<f32>,
    origin: f32,
    intrinsic: f32,
) -> (f32, f32) {
    match (start, end, length) {
        (Some(start), Some(end), _) => (start, end - start),
        (Some(start), None, length) => (start, length.unwrap_or(intrinsic)),
        (None, Some(end), length) => {
            let length = length.unwrap_or(intrinsic);
            (end - length, length)
        }
        (None, None, length) => (origin, length.unwrap_or(intrinsic)),
    }
}
