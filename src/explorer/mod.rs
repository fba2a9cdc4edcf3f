// src/explorer/mod.rs
// =============================================================================
// This module is the expansion controller: which directories are open, which
// are loading, and what the tree looks like right now.
//
// State per directory path (absent from the map = never opened):
//
//   (absent) --toggle--> Loading --finish(ok)--> Expanded <--toggle--> Collapsed
//                           |
//                           +--finish(err)--> Failed --toggle--> Loading (retry)
//
// Rules:
// - A directory is fetched at most once; later toggles only flip visibility
// - A directory that is Loading ignores toggles (no duplicate request)
// - A response is only applied to a directory that is still Loading
//
// The explorer never talks to the network. `toggle` says whether a fetch is
// needed and the caller issues it, then reports back through `finish`.
//
// Rust concepts:
// - HashMap: path -> state and path -> children
// - Recursion: flattening the open part of the tree into rows
// =============================================================================

use std::collections::HashMap;

use crate::tree::{sort_nodes, TreeNode, TreeRow};

const ROOT: &str = "";
const LOADING_LABEL: &str = "Loading...";
const EMPTY_LABEL: &str = "(empty)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirState {
    Loading,
    Expanded,
    /// Fetched, children kept, currently hidden
    Collapsed,
    /// Fetch failed; the message is shown under the directory
    Failed(String),
}

/// What a toggle asks the caller to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Issue a listing request for the path
    Fetch,
    /// Already fetched; children are visible again
    Shown,
    /// Already fetched; children are hidden
    Hidden,
    /// A request is in flight; nothing to do
    Pending,
}

#[derive(Debug, Default)]
pub struct Explorer {
    states: HashMap<String, DirState>,
    // Sorted children per fetched directory; "" holds the root listing
    children: HashMap<String, Vec<TreeNode>>,
}

impl Explorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets the whole tree (new root load or reset)
    pub fn clear(&mut self) {
        self.states.clear();
        self.children.clear();
    }

    /// Replaces everything with a fresh root listing
    pub fn set_root(&mut self, mut nodes: Vec<TreeNode>) {
        self.clear();
        sort_nodes(&mut nodes);
        self.children.insert(ROOT.to_string(), nodes);
    }

    #[cfg(test)]
    pub fn state(&self, path: &str) -> Option<&DirState> {
        self.states.get(path)
    }

    pub fn children(&self, path: &str) -> Option<&[TreeNode]> {
        self.children.get(path).map(Vec::as_slice)
    }

    /// Looks a fetched node up by its full path
    pub fn find(&self, path: &str) -> Option<&TreeNode> {
        let parent = path.rsplit_once('/').map_or(ROOT, |(parent, _)| parent);
        self.children(parent)?
            .iter()
            .find(|node| node.path == path)
    }

    /// Activation of a directory row
    pub fn toggle(&mut self, path: &str) -> ToggleOutcome {
        match self.states.get(path) {
            Some(DirState::Loading) => ToggleOutcome::Pending,
            Some(DirState::Expanded) => {
                self.states.insert(path.to_string(), DirState::Collapsed);
                ToggleOutcome::Hidden
            }
            Some(DirState::Collapsed) => {
                self.states.insert(path.to_string(), DirState::Expanded);
                ToggleOutcome::Shown
            }
            Some(DirState::Failed(_)) | None => {
                self.states.insert(path.to_string(), DirState::Loading);
                ToggleOutcome::Fetch
            }
        }
    }

    /// Applies a listing response for `path`.
    ///
    /// Returns false (and changes nothing) when the directory is not waiting
    /// for a response, e.g. the tree was replaced in the meantime.
    pub fn finish(&mut self, path: &str, result: Result<Vec<TreeNode>, String>) -> bool {
        if self.states.get(path) != Some(&DirState::Loading) {
            return false;
        }

        match result {
            Ok(mut nodes) => {
                sort_nodes(&mut nodes);
                self.children.insert(path.to_string(), nodes);
                self.states.insert(path.to_string(), DirState::Expanded);
            }
            Err(message) => {
                self.states
                    .insert(path.to_string(), DirState::Failed(message));
            }
        }

        true
    }

    /// Flattens the visible part of the tree into display rows
    pub fn visible_rows(&self) -> Vec<TreeRow> {
        let mut rows = Vec::new();
        if let Some(nodes) = self.children.get(ROOT) {
            self.push_rows(nodes, 0, &mut rows);
        }
        rows
    }

    fn push_rows(&self, nodes: &[TreeNode], depth: usize, rows: &mut Vec<TreeRow>) {
        for node in nodes {
            if !node.is_dir() {
                rows.push(TreeRow::node(node, depth, false));
                continue;
            }

            let state = self.states.get(&node.path);
            let expanded = matches!(
                state,
                Some(DirState::Expanded) | Some(DirState::Loading)
            );
            rows.push(TreeRow::node(node, depth, expanded));

            match state {
                Some(DirState::Loading) => {
                    rows.push(TreeRow::notice(&node.path, depth + 1, LOADING_LABEL, false));
                }
                Some(DirState::Failed(message)) => {
                    rows.push(TreeRow::notice(&node.path, depth + 1, message.clone(), true));
                }
                Some(DirState::Expanded) => match self.children.get(&node.path) {
                    Some(children) if !children.is_empty() => {
                        self.push_rows(children, depth + 1, rows);
                    }
                    _ => rows.push(TreeRow::notice(&node.path, depth + 1, EMPTY_LABEL, false)),
                },
                Some(DirState::Collapsed) | None => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::RowKind;

    fn root_explorer() -> Explorer {
        let mut explorer = Explorer::new();
        explorer.set_root(vec![
            TreeNode::file("", "README.md", Some("https://raw/README.md".to_string())),
            TreeNode::dir("", "src"),
        ]);
        explorer
    }

    fn labels(explorer: &Explorer) -> Vec<String> {
        explorer
            .visible_rows()
            .iter()
            .map(TreeRow::display)
            .collect()
    }

    #[test]
    fn test_first_toggle_fetches_then_only_flips_visibility() {
        let mut explorer = root_explorer();

        assert_eq!(explorer.toggle("src"), ToggleOutcome::Fetch);
        assert!(explorer.finish("src", Ok(vec![TreeNode::file("src", "main.rs", None)])));
        assert_eq!(explorer.state("src"), Some(&DirState::Expanded));

        assert_eq!(explorer.toggle("src"), ToggleOutcome::Hidden);
        assert_eq!(explorer.toggle("src"), ToggleOutcome::Shown);
        assert_eq!(explorer.state("src"), Some(&DirState::Expanded));
    }

    #[test]
    fn test_loading_directory_ignores_toggles() {
        let mut explorer = root_explorer();

        assert_eq!(explorer.toggle("src"), ToggleOutcome::Fetch);
        assert_eq!(explorer.toggle("src"), ToggleOutcome::Pending);
        assert_eq!(explorer.state("src"), Some(&DirState::Loading));
    }

    #[test]
    fn test_failed_directory_shows_error_and_retries() {
        let mut explorer = root_explorer();

        explorer.toggle("src");
        explorer.finish("src", Err("API rate limit exceeded. Try again later.".to_string()));

        let rows = explorer.visible_rows();
        assert_eq!(rows[1].kind, RowKind::Notice { error: true });
        assert_eq!(rows[1].label, "API rate limit exceeded. Try again later.");
        assert_eq!(rows[1].path, "src");

        assert_eq!(explorer.toggle("src"), ToggleOutcome::Fetch);
    }

    #[test]
    fn test_finish_ignored_when_not_loading() {
        let mut explorer = root_explorer();
        assert!(!explorer.finish("src", Ok(vec![])));
        assert_eq!(explorer.state("src"), None);
    }

    #[test]
    fn test_visible_rows_nested_and_sorted() {
        let mut explorer = root_explorer();
        explorer.toggle("src");
        explorer.finish(
            "src",
            Ok(vec![
                TreeNode::file("src", "main.rs", None),
                TreeNode::dir("src", "tree"),
            ]),
        );

        assert_eq!(
            labels(&explorer),
            vec!["▾ src/", "  ▸ tree/", "    main.rs", "  README.md"]
        );

        explorer.toggle("src");
        assert_eq!(labels(&explorer), vec!["▸ src/", "  README.md"]);
    }

    #[test]
    fn test_loading_and_empty_notices() {
        let mut explorer = root_explorer();
        explorer.toggle("src");
        assert_eq!(
            labels(&explorer),
            vec!["▾ src/", "    Loading...", "  README.md"]
        );

        explorer.finish("src", Ok(vec![]));
        assert_eq!(
            labels(&explorer),
            vec!["▾ src/", "    (empty)", "  README.md"]
        );
    }

    #[test]
    fn test_find_by_path() {
        let mut explorer = root_explorer();
        explorer.toggle("src");
        explorer.finish("src", Ok(vec![TreeNode::file("src", "main.rs", None)]));

        assert_eq!(explorer.find("README.md").map(|n| n.name.as_str()), Some("README.md"));
        assert_eq!(explorer.find("src/main.rs").map(|n| n.name.as_str()), Some("main.rs"));
        assert_eq!(explorer.children("src").map(<[TreeNode]>::len), Some(1));
        assert!(explorer.find("src/missing.rs").is_none());
    }

    #[test]
    fn test_set_root_discards_previous_tree() {
        let mut explorer = root_explorer();
        explorer.toggle("src");

        explorer.set_root(vec![TreeNode::file("", "other.txt", None)]);

        assert_eq!(explorer.state("src"), None);
        assert_eq!(labels(&explorer), vec!["  other.txt"]);

        explorer.clear();
        assert!(explorer.children("").is_none());
        assert!(explorer.visible_rows().is_empty());
    }
}
