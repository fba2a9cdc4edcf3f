// src/github/mod.rs
// =============================================================================
// This module handles everything that talks to GitHub.
//
// Currently implements:
// - Parsing repository URLs into an owner/name reference
// - Listing one directory through the contents API
// - Downloading the raw text of one file
//
// Rust concepts:
// - Modules: Organizing related functionality
// - Public API: What other parts of the app can use
// =============================================================================

mod client;
mod error;
mod reference;

pub use client::{GithubClient, RepoClient};
pub use error::GithubError;
pub use reference::{normalize_input, resolve_reference, RepositoryReference};

#[cfg(test)]
pub use client::MockRepoClient;
