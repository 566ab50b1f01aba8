pub mod anchor;
pub mod constraints;

pub use anchor::{Anchor, AnchorSet, Attribute, Edges, Target};
pub use constraints::{Constraints, Size};
