// src/viewer.rs
// =============================================================================
// The content pane: shows the raw text of one selected file.
//
// Flow for one file:
// 1. begin()  -> previous content cleared, "Loading..." shown, ticket issued
// 2. finish() -> text shown, or "Error: <message>" if the download failed
//
// Every begin() issues a new ticket. A response carrying an older ticket is
// dropped, so a slow download for file A cannot replace file B that the user
// opened afterwards.
//
// No highlighting and no type detection: bytes come back as text.
// =============================================================================

use crate::github::GithubError;

pub const PLACEHOLDER: &str = "Please select a file to view content";
const LOADING: &str = "Loading...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerState {
    Placeholder,
    Loading,
    Text(String),
    Error(String),
}

#[derive(Debug)]
pub struct ContentViewer {
    state: ViewerState,
    title: Option<String>,
    ticket: u64,
    /// Vertical scroll offset in lines
    pub scroll: u16,
}

impl Default for ContentViewer {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentViewer {
    pub fn new() -> Self {
        ContentViewer {
            state: ViewerState::Placeholder,
            title: None,
            ticket: 0,
            scroll: 0,
        }
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[cfg(test)]
    pub fn ticket(&self) -> u64 {
        self.ticket
    }

    /// Starts showing `title` and returns the ticket its response must carry
    pub fn begin(&mut self, title: &str) -> u64 {
        self.ticket += 1;
        self.state = ViewerState::Loading;
        self.title = Some(title.to_string());
        self.scroll = 0;
        self.ticket
    }

    /// Shows a failure that happened before any request was made
    pub fn fail(&mut self, title: &str, message: &str) {
        self.begin(title);
        self.state = ViewerState::Error(format!("Error: {}", message));
    }

    /// Applies a download result; returns false for a stale ticket
    pub fn finish(&mut self, ticket: u64, result: Result<String, GithubError>) -> bool {
        if ticket != self.ticket || self.state != ViewerState::Loading {
            return false;
        }

        self.state = match result {
            Ok(text) => ViewerState::Text(text),
            Err(err) => ViewerState::Error(format!("Error: {}", err)),
        };
        true
    }

    /// Back to the placeholder; in-flight downloads become stale
    pub fn reset(&mut self) {
        self.ticket += 1;
        self.state = ViewerState::Placeholder;
        self.title = None;
        self.scroll = 0;
    }

    /// The text the pane displays for the current state
    pub fn text(&self) -> &str {
        match &self.state {
            ViewerState::Placeholder => PLACEHOLDER,
            ViewerState::Loading => LOADING,
            ViewerState::Text(text) | ViewerState::Error(text) => text,
        }
    }

    pub fn scroll_by(&mut self, delta: i32) {
        let max = self.text().lines().count().saturating_sub(1);
        let max = u16::try_from(max).unwrap_or(u16::MAX);
        let next = i32::from(self.scroll) + delta;
        self.scroll = u16::try_from(next.max(0)).unwrap_or(u16::MAX).min(max);
    }
}
