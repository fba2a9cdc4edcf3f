// src/app.rs
// =============================================================================
// The application state and every user action.
//
// What happens here:
// 1. Loading a repository: validate the URL, persist it, fetch the root
// 2. Activating a tree row: expand/collapse a directory or open a file
// 3. Reset: forget the repository, the tree, the content and the saved URL
// 4. Applying responses that come back from spawned requests
//
// Requests never block the UI. Each one runs on its own tokio task and comes
// back as a Message tagged with the session generation it was issued under;
// handle_message drops anything from an older generation.
//
// Rust concepts:
// - Arc<dyn RepoClient>: shared ownership of a trait object across tasks
// - mpsc channels: tasks report results back to the event loop
// =============================================================================

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

use crate::explorer::{Explorer, ToggleOutcome};
use crate::github::{
    normalize_input, resolve_reference, GithubError, RepoClient, RepositoryReference,
};
use crate::session::{Session, SessionStore};
use crate::tree::{RowKind, TreeNode, TreeRow};
use crate::viewer::ContentViewer;

pub const TREE_PLACEHOLDER: &str = "Please Load the Github Repo URL!";
pub const INVALID_URL_MESSAGE: &str = "Please enter a valid GitHub repository URL!";
const NO_FILES_MESSAGE: &str = "No files found or unable to fetch files.";
const LOAD_FAILED_MESSAGE: &str = "An error occurred while loading files. Please try again.";

const DEFAULT_SPLIT_PERCENT: u16 = 30;
const MIN_SPLIT_PERCENT: u16 = 10;
const MAX_SPLIT_PERCENT: u16 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Tree,
    Content,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Input => Focus::Tree,
            Focus::Tree => Focus::Content,
            Focus::Content => Focus::Input,
        }
    }
}

/// State of the root listing (the tree pane as a whole)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootStatus {
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// A finished request, sent back to the event loop
#[derive(Debug)]
pub enum Message {
    Listing {
        generation: u64,
        /// "" for the root listing
        path: String,
        result: Result<Vec<TreeNode>, GithubError>,
    },
    Content {
        generation: u64,
        ticket: u64,
        result: Result<String, GithubError>,
    },
}

pub struct App {
    pub input: String,
    /// Inline message under the input field (invalid URL)
    pub input_error: Option<String>,
    pub focus: Focus,
    pub root: RootStatus,
    pub explorer: Explorer,
    pub viewer: ContentViewer,
    /// Index into visible_rows()
    pub selected: usize,
    /// Width of the tree pane in percent
    pub split_percent: u16,
    pub should_quit: bool,
    session: Session,
    store: SessionStore,
    client: Arc<dyn RepoClient>,
    host: String,
    messages: UnboundedSender<Message>,
}

impl App {
    pub fn new(
        client: Arc<dyn RepoClient>,
        store: SessionStore,
        host: impl Into<String>,
        messages: UnboundedSender<Message>,
    ) -> Self {
        App {
            input: String::new(),
            input_error: None,
            focus: Focus::Input,
            root: RootStatus::Idle,
            explorer: Explorer::new(),
            viewer: ContentViewer::new(),
            selected: 0,
            split_percent: DEFAULT_SPLIT_PERCENT,
            should_quit: false,
            session: Session::default(),
            store,
            client,
            host: host.into(),
            messages,
        }
    }

    /// Startup: a URL from the command line wins, otherwise the saved one.
    /// Either way the input is pre-filled and the root load starts at once.
    pub fn restore(&mut self, cli_url: Option<String>) {
        let saved = match self.store.load() {
            Ok(state) => state.last_repository_url,
            Err(e) => {
                warn!(error = %e, "could not read session file");
                None
            }
        };

        if let Some(url) = cli_url.or(saved) {
            info!(url = %url, "restoring session");
            self.input = url.clone();
            if self.load_root(&url) {
                self.focus = Focus::Tree;
            }
        }
    }

    pub fn session_reference(&self) -> Option<&RepositoryReference> {
        self.session.reference()
    }

    /// Enter in the input field
    pub fn submit(&mut self) {
        let input = self.input.clone();
        if self.load_root(&input) {
            self.focus = Focus::Tree;
        }
    }

    /// Starts browsing the repository at `input`.
    ///
    /// Returns false when the URL is rejected; in that case nothing else
    /// changes: no request, no persistence, the current tree stays.
    pub fn load_root(&mut self, input: &str) -> bool {
        let url = normalize_input(input);

        let reference = match resolve_reference(&url, &self.host) {
            Ok(reference) => reference,
            Err(e) => {
                debug!(error = %e, "rejected repository url");
                self.input_error = Some(INVALID_URL_MESSAGE.to_string());
                return false;
            }
        };

        self.input_error = None;
        self.input = url.clone();

        if let Err(e) = self.store.save_url(&url) {
            warn!(error = %e, "could not persist repository url");
        }

        let generation = self.session.start(reference.clone());
        self.explorer.clear();
        self.viewer.reset();
        self.selected = 0;
        self.root = RootStatus::Loading;

        info!(repository = %reference, generation, "loading repository");
        self.request_listing(generation, reference, String::new());
        true
    }

    /// Enter on the selected tree row
    pub fn activate_selected(&mut self) {
        let Some(row) = self.visible_rows().into_iter().nth(self.selected) else {
            return;
        };

        match row.kind {
            RowKind::Dir { .. } => self.toggle_directory(&row.path),
            RowKind::File => self.open_file(&row.path),
            // Activating an error line retries its directory
            RowKind::Notice { error: true } => self.toggle_directory(&row.path),
            RowKind::Notice { error: false } => {}
        }
    }

    /// Expands, collapses or retries the directory at `path`
    pub fn toggle_directory(&mut self, path: &str) {
        let Some(reference) = self.session.reference().cloned() else {
            return;
        };

        match self.explorer.toggle(path) {
            ToggleOutcome::Fetch => {
                let generation = self.session.generation();
                self.request_listing(generation, reference, path.to_string());
            }
            outcome => debug!(path, ?outcome, "toggled directory"),
        }
    }

    /// Shows the file at `path` in the content pane
    pub fn open_file(&mut self, path: &str) {
        let Some(node) = self.explorer.find(path) else {
            return;
        };
        let name = node.name.clone();

        match node.download_url.clone() {
            Some(url) => {
                let ticket = self.viewer.begin(&name);
                let generation = self.session.generation();
                debug!(path, %url, ticket, "requesting file content");

                let request = self.client.fetch_content(url);
                let messages = self.messages.clone();
                tokio::spawn(async move {
                    let result = request.await;
                    let _ = messages.send(Message::Content {
                        generation,
                        ticket,
                        result,
                    });
                });
            }
            None => self
                .viewer
                .fail(&name, "No downloadable content for this entry"),
        }
    }

    /// Forgets everything: repository, tree, content, input and saved URL
    pub fn reset(&mut self) {
        self.session.reset();
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "could not clear session file");
        }

        self.input.clear();
        self.input_error = None;
        self.explorer.clear();
        self.viewer.reset();
        self.root = RootStatus::Idle;
        self.selected = 0;
        self.focus = Focus::Input;

        info!("session reset");
    }

    /// Applies a finished request, unless it belongs to an older generation
    pub fn handle_message(&mut self, message: Message) {
        match message {
            Message::Listing {
                generation,
                path,
                result,
            } => {
                if !self.session.is_current(generation) {
                    debug!(path = %path, generation, "dropping stale listing");
                    return;
                }

                if path.is_empty() {
                    self.finish_root(result);
                } else {
                    if let Err(e) = &result {
                        warn!(path = %path, error = %e, "directory listing failed");
                    }
                    self.explorer
                        .finish(&path, result.map_err(|e| directory_error_message(&e)));
                }
                self.clamp_selection();
            }
            Message::Content {
                generation,
                ticket,
                result,
            } => {
                if !self.session.is_current(generation) {
                    debug!(ticket, generation, "dropping stale file content");
                    return;
                }
                if let Err(e) = &result {
                    warn!(ticket, status = ?e.status(), error = %e, "file download failed");
                }
                self.viewer.finish(ticket, result);
            }
        }
    }

    pub fn visible_rows(&self) -> Vec<TreeRow> {
        self.explorer.visible_rows()
    }

    pub fn move_selection(&mut self, delta: i32) {
        let len = self.visible_rows().len();
        if len == 0 {
            self.selected = 0;
            return;
        }

        let next = i64::try_from(self.selected).unwrap_or(0) + i64::from(delta);
        let last = i64::try_from(len - 1).unwrap_or(0);
        self.selected = usize::try_from(next.clamp(0, last)).unwrap_or(0);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.visible_rows().len().saturating_sub(1);
    }

    /// Widens (positive) or narrows (negative) the tree pane
    pub fn resize_tree(&mut self, delta: i16) {
        let next = i32::from(self.split_percent) + i32::from(delta);
        let clamped = next.clamp(
            i32::from(MIN_SPLIT_PERCENT),
            i32::from(MAX_SPLIT_PERCENT),
        );
        self.split_percent = u16::try_from(clamped).unwrap_or(DEFAULT_SPLIT_PERCENT);
    }

    fn finish_root(&mut self, result: Result<Vec<TreeNode>, GithubError>) {
        match result {
            Ok(nodes) => {
                info!(entries = nodes.len(), "root listing loaded");
                self.explorer.set_root(nodes);
                self.root = RootStatus::Ready;
            }
            Err(e) => {
                warn!(error = %e, "root listing failed");
                self.root = RootStatus::Failed(root_error_message(&e));
            }
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_rows().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    // The request is created here, synchronously, so one call is exactly one
    // request; only waiting for the response happens on the spawned task.
    fn request_listing(&self, generation: u64, reference: RepositoryReference, path: String) {
        debug!(repository = %reference, path = %path, generation, "requesting listing");

        let request = self.client.list_directory(reference, path.clone());
        let messages = self.messages.clone();
        tokio::spawn(async move {
            let result = request.await;
            let _ = messages.send(Message::Listing {
                generation,
                path,
                result,
            });
        });
    }
}

fn root_error_message(error: &GithubError) -> String {
    match error {
        GithubError::RateLimited => error.to_string(),
        e if e.is_transport() => LOAD_FAILED_MESSAGE.to_string(),
        _ => NO_FILES_MESSAGE.to_string(),
    }
}

fn directory_error_message(error: &GithubError) -> String {
    match error {
        GithubError::RateLimited => error.to_string(),
        GithubError::Api { message } => message.clone(),
        _ => format!("Failed to load directory: {}", error),
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why is the request created before tokio::spawn?
//    - Calling list_directory() builds the request future right away
//    - Only the waiting happens on the spawned task
//    - So "one toggle = one request" holds even before the task runs
//
// 2. Why `let _ = messages.send(...)`?
//    - send only fails when the receiver is gone, i.e. the app is quitting
//    - There is nobody left to tell, so the error is ignored on purpose
//
// 3. What is `let ... else`?
//    - Pattern-match or leave early: `let Some(x) = opt else { return; };`
// -----------------------------------------------------------------------------
