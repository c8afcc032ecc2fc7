//! Squarified treemap layout for weighted category hierarchies.
//!
//! A pure geometric transform: a container size and a weighted, optionally
//! nested list of entries go in; a proportionally tiled rectangle layout
//! comes out. Fetching the data, formatting labels, picking colors, and
//! drawing are all the caller's business.

pub mod layout;
pub mod model;

pub use layout::flex::{pack_flex, FlexItem, FlexNode};
pub use layout::squarify::Flow;
pub use layout::{pack, Block, Layout, Rect};
pub use model::Entry;
