// src/github/error.rs
// =============================================================================
// Every way a request to GitHub can fail.
//
// The rest of the app decides how each failure is shown:
// - a bad repository URL is an inline message under the input field
// - a rate limit or API error on a directory marks only that directory
// - a failed file download becomes "Error: ..." in the content pane
//
// Rust concepts:
// - thiserror: derives Display and std::error::Error from attributes
// - #[from]: lets `?` convert a reqwest::Error into GithubError
// =============================================================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GithubError {
    /// The input is not a `https://<host>/<owner>/<name>` URL
    #[error("Not a valid repository URL: {0}")]
    InvalidUrl(String),

    /// GitHub answered with a message mentioning its rate limit
    #[error("API rate limit exceeded. Try again later.")]
    RateLimited,

    /// GitHub answered with a JSON `message` instead of a listing
    /// (e.g. "Not Found" for a missing repository)
    #[error("GitHub API error: {message}")]
    Api { message: String },

    /// A raw download answered with a non-success status
    #[error("Failed to fetch file: {reason}")]
    Status { status: u16, reason: String },

    /// Connection, TLS, timeout or body read failure
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not the JSON shape we expected
    #[error("Unexpected response from GitHub: {0}")]
    Decode(String),
}

impl GithubError {
    /// True for failures where no usable response came back at all
    pub fn is_transport(&self) -> bool {
        matches!(self, GithubError::Transport(_) | GithubError::Decode(_))
    }

    /// HTTP status of a failed download, if that is what failed
    pub fn status(&self) -> Option<u16> {
        match self {
            GithubError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
