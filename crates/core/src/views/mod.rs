pub mod indented_tree;
pub mod summarize;

pub use indented_tree::{GraphLayoutEngine, LayoutError};
pub use summarize::{Aggregate, OrdinalMapping};
