// src/tree/render.rs
// =============================================================================
// This module decides how a listing is ordered and what one tree row shows.
//
// Ordering rule (same for every listing):
// 1. Directories before files
// 2. Within the same kind, names ascending, ignoring case first; when two
//    names differ only by case the lowercase one comes first
//
// Everything here is a pure function of its input: no hidden state, the same
// unsorted list always sorts the same way.
//
// Rust concepts:
// - std::cmp::Ordering and then_with: chaining comparison rules
// - sort_by: a stable sort driven by our comparator
// =============================================================================

use std::cmp::Ordering;

use super::{NodeKind, TreeNode};

const INDENT: &str = "  ";

/// The strict comparator used for every listing
fn compare_nodes(a: &TreeNode, b: &TreeNode) -> Ordering {
    let kind_rank = |node: &TreeNode| match node.kind {
        NodeKind::Dir => 0,
        NodeKind::File => 1,
    };

    kind_rank(a)
        .cmp(&kind_rank(b))
        .then_with(|| compare_names(&a.name, &b.name))
}

// "a" < "B" < "b" < "c": case-insensitive first, lowercase wins a tie
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

/// Sorts a listing in place: directories first, then files, each by name
pub fn sort_nodes(nodes: &mut [TreeNode]) {
    nodes.sort_by(compare_nodes);
}

/// What a row in the tree pane represents
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowKind {
    /// A directory; `expanded` picks the caret glyph
    Dir { expanded: bool },
    /// A file
    File,
    /// A status line under a directory: loading, empty or an error
    Notice { error: bool },
}

/// One visible line of the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    pub depth: usize,
    pub kind: RowKind,
    pub label: String,
    /// For Dir/File rows the node path; for Notice rows the directory the
    /// notice belongs to
    pub path: String,
}

impl TreeRow {
    pub fn node(node: &TreeNode, depth: usize, expanded: bool) -> Self {
        let kind = match node.kind {
            NodeKind::Dir => RowKind::Dir { expanded },
            NodeKind::File => RowKind::File,
        };

        TreeRow {
            depth,
            kind,
            label: node.name.clone(),
            path: node.path.clone(),
        }
    }

    pub fn notice(dir_path: &str, depth: usize, label: impl Into<String>, error: bool) -> Self {
        TreeRow {
            depth,
            kind: RowKind::Notice { error },
            label: label.into(),
            path: dir_path.to_string(),
        }
    }

    /// The directional indicator: ▸ collapsed, ▾ expanded
    pub fn glyph(&self) -> &'static str {
        match self.kind {
            RowKind::Dir { expanded: true } => "▾ ",
            RowKind::Dir { expanded: false } => "▸ ",
            RowKind::File => "  ",
            RowKind::Notice { error: true } => "! ",
            RowKind::Notice { error: false } => "  ",
        }
    }

    /// Indented text for the row, e.g. "  ▾ src/"
    pub fn display(&self) -> String {
        let suffix = if matches!(self.kind, RowKind::Dir { .. }) {
            "/"
        } else {
            ""
        };

        format!(
            "{}{}{}{}",
            INDENT.repeat(self.depth),
            self.glyph(),
            self.label,
            suffix
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(nodes: &[TreeNode]) -> Vec<String> {
        nodes
            .iter()
            .map(|n| format!("{}:{}", if n.is_dir() { "dir" } else { "file" }, n.name))
            .collect()
    }

    #[test]
    fn test_directories_before_files() {
        let mut nodes = vec![
            TreeNode::file("", "b", None),
            TreeNode::dir("", "z"),
            TreeNode::dir("", "a"),
            TreeNode::file("", "a", None),
        ];

        sort_nodes(&mut nodes);

        assert_eq!(names(&nodes), vec!["dir:a", "dir:z", "file:a", "file:b"]);
    }

    #[test]
    fn test_name_order_ignores_case_first() {
        let mut nodes = vec![
            TreeNode::file("", "b", None),
            TreeNode::file("", "B", None),
            TreeNode::file("", "Cargo.toml", None),
            TreeNode::file("", "a", None),
        ];

        sort_nodes(&mut nodes);

        assert_eq!(
            names(&nodes),
            vec!["file:a", "file:b", "file:B", "file:Cargo.toml"]
        );
    }

    #[test]
    fn test_sort_is_deterministic() {
        let input = vec![
            TreeNode::file("", "main.rs", None),
            TreeNode::dir("", "tests"),
            TreeNode::file("", "lib.rs", None),
            TreeNode::dir("", "benches"),
        ];

        let mut first = input.clone();
        let mut second: Vec<TreeNode> = input.into_iter().rev().collect();
        sort_nodes(&mut first);
        sort_nodes(&mut second);

        assert_eq!(first, second);
    }

    #[test]
    fn test_row_display() {
        let dir = TreeNode::dir("", "src");
        assert_eq!(TreeRow::node(&dir, 0, false).display(), "▸ src/");
        assert_eq!(TreeRow::node(&dir, 1, true).display(), "  ▾ src/");

        let file = TreeNode::file("src", "main.rs", None);
        assert_eq!(TreeRow::node(&file, 1, false).display(), "    main.rs");

        let notice = TreeRow::notice("src", 1, "Loading...", false);
        assert_eq!(notice.display(), "    Loading...");
    }
}
