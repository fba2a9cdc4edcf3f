// src/logging.rs
// =============================================================================
// Logging setup with tracing-subscriber.
//
// The interactive browser draws over the whole terminal, so anything printed
// to stderr would corrupt the screen: it logs to a file instead. The one-shot
// subcommands log to stderr.
//
// The filter comes from REPO_VIEWER_LOG (e.g. "debug" or
// "repo_viewer=debug,reqwest=warn"), defaulting to "info".
// =============================================================================

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

const FILTER_ENV: &str = "REPO_VIEWER_LOG";
const DEFAULT_FILTER: &str = "info";

fn filter() -> EnvFilter {
    build_filter(std::env::var(FILTER_ENV).ok().as_deref())
}

// Unset or unparsable directives fall back to DEFAULT_FILTER
fn build_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Appends log lines to `path`, creating its directory if needed
pub fn init_file(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();

    Ok(())
}

/// Logs to stderr, for the subcommands that do not take over the terminal
pub fn init_stderr() {
    tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn test_default_filter_is_info() {
        assert_eq!(build_filter(None).max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn test_filter_directives_override_default() {
        assert_eq!(
            build_filter(Some("debug")).max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
        // Garbage falls back to the default instead of failing startup
        assert_eq!(
            build_filter(Some("repo_viewer=loudest")).max_level_hint(),
            Some(LevelFilter::INFO)
        );
    }
}
