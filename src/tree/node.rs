// src/tree/node.rs
// =============================================================================
// The node type shown in the tree.
//
// A node is built fresh from every listing response and never mutated:
// expanding a directory stores its children next to it, it does not edit the
// node itself (see explorer/).
//
// Rust concepts:
// - Enums: a node is either a directory or a file
// - Option<String>: only files carry a download URL
// =============================================================================

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Dir,
    File,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    pub name: String,
    pub kind: NodeKind,
    /// Parent path + name, e.g. "src/tree/node.rs"
    pub path: String,
    /// Raw download URL; only present for files
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
}

impl TreeNode {
    pub fn dir(parent: &str, name: &str) -> Self {
        TreeNode {
            name: name.to_string(),
            kind: NodeKind::Dir,
            path: join_path(parent, name),
            download_url: None,
        }
    }

    pub fn file(parent: &str, name: &str, download_url: Option<String>) -> Self {
        TreeNode {
            name: name.to_string(),
            kind: NodeKind::File,
            path: join_path(parent, name),
            download_url,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Dir
    }
}

/// Joins a parent path and a child name with '/', without a leading slash
/// for top-level entries ("" + "src" = "src").
pub fn join_path(parent: &str, name: &str) -> String {
    let parent = parent.trim_end_matches('/');
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}
