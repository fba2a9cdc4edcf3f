// src/tree/mod.rs
// =============================================================================
// This module contains the tree data and how it is displayed.
//
// Submodules:
// - node: the TreeNode built from each listing entry
// - render: ordering of a listing and the text of one visible row
// =============================================================================

mod node;
mod render;

pub use node::{NodeKind, TreeNode};
pub use render::{sort_nodes, RowKind, TreeRow};
