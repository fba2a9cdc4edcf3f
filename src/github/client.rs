// src/github/client.rs
// =============================================================================
// This module talks to the GitHub REST API.
//
// Two requests, nothing else:
// - GET <api-root>/repos/{owner}/{name}/contents/{path}  -> directory listing
// - GET {download_url}                                   -> raw file text
//
// One call = one request. There is no cache, no retry and no deduplication;
// the explorer decides when a request is worth making.
//
// The RepoClient trait is the seam the rest of the app depends on, so tests
// can swap in a mock and count requests without a network.
//
// Rust concepts:
// - Traits: an interface the app uses without knowing the implementation
// - Pin<Box<dyn Future>>: an async result that can live inside a trait
// - Clone on reqwest::Client: cheap, it is a reference-counted pool
// =============================================================================

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::{GithubError, RepositoryReference};
use crate::tree::TreeNode;

/// Boxed async result returned by [`RepoClient`] methods
pub type ClientFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// Read-only access to one hosting provider's repository contents.
///
/// Production uses [`GithubClient`]; tests inject `MockRepoClient`.
#[cfg_attr(test, mockall::automock)]
pub trait RepoClient: Send + Sync {
    /// Lists the entries of `path` ("" for the repository root).
    ///
    /// # Errors
    /// `RateLimited` when GitHub reports its rate limit, `Api` for any other
    /// JSON message, `Transport`/`Decode` when no usable listing came back.
    fn list_directory(
        &self,
        reference: RepositoryReference,
        path: String,
    ) -> ClientFuture<Result<Vec<TreeNode>, GithubError>>;

    /// Downloads the raw text behind a file's `download_url`.
    ///
    /// # Errors
    /// `Status` for any non-success HTTP status, `Transport` otherwise.
    fn fetch_content(&self, download_url: String) -> ClientFuture<Result<String, GithubError>>;
}

// One entry of a contents listing, exactly as GitHub sends it.
// Fields we do not show (sha, size, html_url, ...) are ignored by serde.
#[derive(Debug, Deserialize)]
struct ContentEntry {
    name: String,
    #[serde(rename = "type")]
    entry_type: String,
    #[serde(default)]
    download_url: Option<String>,
}

impl ContentEntry {
    // Everything that is not "dir" is shown as a file (symlinks and
    // submodules included); submodules simply have no download URL.
    fn into_node(self, parent: &str) -> TreeNode {
        if self.entry_type == "dir" {
            TreeNode::dir(parent, &self.name)
        } else {
            TreeNode::file(parent, &self.name, self.download_url)
        }
    }
}

/// The real client backed by reqwest
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: Client,
    api_root: Url,
}

impl GithubClient {
    /// Creates a client for `api_root` (normally https://api.github.com)
    ///
    /// GitHub rejects requests without a User-Agent, so one is always set.
    pub fn new(api_root: Url, timeout: Duration) -> Result<Self, GithubError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("repo-viewer/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(GithubClient { http, api_root })
    }
}

impl RepoClient for GithubClient {
    fn list_directory(
        &self,
        reference: RepositoryReference,
        path: String,
    ) -> ClientFuture<Result<Vec<TreeNode>, GithubError>> {
        let http = self.http.clone();
        let api_root = self.api_root.clone();

        Box::pin(async move {
            let url = reference.contents_url(&api_root, &path)?;
            debug!(%url, "listing directory");

            // The status code is not checked here: GitHub explains failures
            // (rate limit, not found) in the JSON body's `message` field.
            let body = http
                .get(url)
                .header(ACCEPT, "application/vnd.github+json")
                .send()
                .await?
                .text()
                .await?;

            parse_listing(&body, &path)
        })
    }

    fn fetch_content(&self, download_url: String) -> ClientFuture<Result<String, GithubError>> {
        let http = self.http.clone();

        Box::pin(async move {
            debug!(url = %download_url, "fetching file content");
            let response = http.get(&download_url).send().await?;
            check_status(response.status())?;
            Ok(response.text().await?)
        })
    }
}

// Turns a contents response body into nodes under `parent`.
//
// A JSON object with a `message` is an error report, not a listing.
fn parse_listing(body: &str, parent: &str) -> Result<Vec<TreeNode>, GithubError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| GithubError::Decode(e.to_string()))?;

    if let Some(message) = value.get("message").and_then(Value::as_str) {
        if message.contains("rate limit") {
            return Err(GithubError::RateLimited);
        }
        return Err(GithubError::Api {
            message: message.to_string(),
        });
    }

    let entries: Vec<ContentEntry> =
        serde_json::from_value(value).map_err(|e| GithubError::Decode(e.to_string()))?;

    Ok(entries
        .into_iter()
        .map(|entry| entry.into_node(parent))
        .collect())
}

fn check_status(status: StatusCode) -> Result<(), GithubError> {
    if status.is_success() {
        return Ok(());
    }

    Err(GithubError::Status {
        status: status.as_u16(),
        reason: status
            .canonical_reason()
            .unwrap_or("Unknown status")
            .to_string(),
    })
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why return Pin<Box<dyn Future>> instead of writing `async fn`?
//    - The app stores the client as `Arc<dyn RepoClient>` (a trait object)
//    - Trait objects need every method to have one concrete return type
//    - Boxing the future gives exactly that, at the cost of one allocation
//
// 2. Why clone `http` and `api_root` before `async move`?
//    - The returned future must not borrow `self` (it may outlive the call)
//    - Moving owned clones into the block makes the future 'static
//
// 3. Why serde_json::Value first, then Vec<ContentEntry>?
//    - The same endpoint returns either an array (success) or an object
//      with a `message` (failure); looking at the raw value tells them apart
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::NodeKind;

    #[test]
    fn test_parse_listing() {
        let body = r#"[
            {"name": "src", "path": "src", "type": "dir", "download_url": null},
            {"name": "README.md", "path": "README.md", "type": "file",
             "download_url": "https://raw.githubusercontent.com/o/r/main/README.md"}
        ]"#;

        let nodes = parse_listing(body, "").unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].kind, NodeKind::Dir);
        assert_eq!(nodes[0].path, "src");
        assert_eq!(nodes[1].kind, NodeKind::File);
        assert_eq!(
            nodes[1].download_url.as_deref(),
            Some("https://raw.githubusercontent.com/o/r/main/README.md")
        );
    }

    #[test]
    fn test_parse_listing_nested_paths() {
        let body = r#"[{"name": "mod.rs", "type": "file", "download_url": "https://raw/mod.rs"}]"#;
        let nodes = parse_listing(body, "src/tree").unwrap();
        assert_eq!(nodes[0].path, "src/tree/mod.rs");
    }

    #[test]
    fn test_parse_listing_detects_rate_limit() {
        let body = r#"{"message": "API rate limit exceeded for 1.2.3.4. (But here's the good news...)",
                       "documentation_url": "https://docs.github.com"}"#;
        assert!(matches!(
            parse_listing(body, ""),
            Err(GithubError::RateLimited)
        ));
    }

    #[test]
    fn test_parse_listing_api_message() {
        let body = r#"{"message": "Not Found"}"#;
        match parse_listing(body, "") {
            Err(GithubError::Api { message }) => assert_eq!(message, "Not Found"),
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_listing_rejects_garbage() {
        assert!(matches!(
            parse_listing("<html>", ""),
            Err(GithubError::Decode(_))
        ));
        // A single file object is not a directory listing
        assert!(matches!(
            parse_listing(r#"{"name": "a", "type": "file"}"#, ""),
            Err(GithubError::Decode(_))
        ));
    }

    #[test]
    fn test_check_status() {
        assert!(check_status(StatusCode::OK).is_ok());

        let err = check_status(StatusCode::NOT_FOUND).unwrap_err();
        assert!(matches!(err, GithubError::Status { status: 404, .. }));
        assert_eq!(err.to_string(), "Failed to fetch file: Not Found");
    }
}
