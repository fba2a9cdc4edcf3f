// src/config.rs
// =============================================================================
// Resolved runtime configuration.
//
// The CLI gives us strings and optional paths; this turns them into values
// the rest of the program can use directly (a parsed API URL, a Duration,
// concrete file locations).
//
// Default file locations:
// - session: <config dir>/repo-viewer/session.json
// - log:     <local data dir>/repo-viewer/repo-viewer.log
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use url::Url;

use crate::cli::GlobalOptions;

const APP_DIR: &str = "repo-viewer";
const SESSION_FILE: &str = "session.json";
const LOG_FILE: &str = "repo-viewer.log";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_root: Url,
    pub host: String,
    pub request_timeout: Duration,
    pub session_file: PathBuf,
    pub log_file: PathBuf,
}

impl Config {
    pub fn from_cli(options: &GlobalOptions) -> Result<Self> {
        let api_root = Url::parse(&options.api_root)
            .with_context(|| format!("Invalid --api-root '{}'", options.api_root))?;

        if !matches!(api_root.scheme(), "http" | "https") || api_root.cannot_be_a_base() {
            bail!("--api-root must be an http(s) URL, got '{}'", api_root);
        }

        let session_file = options
            .session_file
            .clone()
            .unwrap_or_else(|| app_dir(dirs::config_dir()).join(SESSION_FILE));

        let log_file = options
            .log_file
            .clone()
            .unwrap_or_else(|| app_dir(dirs::data_local_dir()).join(LOG_FILE));

        Ok(Config {
            api_root,
            host: options.host.trim().to_string(),
            request_timeout: Duration::from_secs(options.timeout_secs),
            session_file,
            log_file,
        })
    }
}

// Falls back to the current directory on platforms without one
fn app_dir(base: Option<PathBuf>) -> PathBuf {
    base.unwrap_or_else(|| PathBuf::from(".")).join(APP_DIR)
}
