// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Without a subcommand the interactive browser opens, so
//   repo-viewer https://github.com/octocat/hello-world
// is all most people ever type.
// =============================================================================

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "repo-viewer",
    version,
    about = "Browse a public GitHub repository from the terminal",
    long_about = "repo-viewer lists a GitHub repository through the contents API, \
                  expands directories on demand and shows the raw text of any file. \
                  The last repository you opened is remembered between runs."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Repository URL to open (same as `repo-viewer browse <URL>`)
    pub repo_url: Option<String>,

    #[command(flatten)]
    pub options: GlobalOptions,
}

// Options shared by every subcommand
//
// `global = true` lets them appear before or after the subcommand name
#[derive(Args, Debug, Clone)]
pub struct GlobalOptions {
    /// Root of the GitHub REST API
    #[arg(
        long,
        global = true,
        env = "REPO_VIEWER_API_ROOT",
        default_value = "https://api.github.com"
    )]
    pub api_root: String,

    /// Host a repository URL must point at
    #[arg(long, global = true, env = "REPO_VIEWER_HOST", default_value = "github.com")]
    pub host: String,

    /// Timeout for each HTTP request, in seconds
    #[arg(long, global = true, default_value_t = 15)]
    pub timeout_secs: u64,

    /// Where the last repository URL is remembered
    #[arg(long, global = true, value_name = "PATH")]
    pub session_file: Option<PathBuf>,

    /// Where the interactive browser writes its log
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the interactive browser
    ///
    /// Example: repo-viewer browse https://github.com/octocat/hello-world
    Browse {
        /// Repository URL; defaults to the last one opened
        repo_url: Option<String>,
    },

    /// Print one directory listing and exit
    ///
    /// Example: repo-viewer list https://github.com/rust-lang/rust src --json
    List {
        /// Repository URL (e.g., https://github.com/user/repo)
        repo_url: String,

        /// Directory inside the repository; the root when omitted
        #[arg(default_value = "")]
        path: String,

        /// Output the listing as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Forget the remembered repository URL
    Forget,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_url_opens_browser() {
        let cli = Cli::parse_from(["repo-viewer", "https://github.com/octocat/hello-world"]);
        assert!(cli.command.is_none());
        assert_eq!(
            cli.repo_url.as_deref(),
            Some("https://github.com/octocat/hello-world")
        );
        assert_eq!(cli.options.host, "github.com");
        assert_eq!(cli.options.timeout_secs, 15);
    }

    #[test]
    fn test_list_subcommand_with_global_option() {
        let cli = Cli::parse_from([
            "repo-viewer",
            "list",
            "https://github.com/user/repo",
            "docs",
            "--json",
            "--timeout-secs",
            "3",
        ]);

        match cli.command {
            Some(Commands::List {
                repo_url,
                path,
                json,
            }) => {
                assert_eq!(repo_url, "https://github.com/user/repo");
                assert_eq!(path, "docs");
                assert!(json);
            }
            other => panic!("expected list, got {:?}", other),
        }
        assert_eq!(cli.options.timeout_secs, 3);
    }

    #[test]
    fn test_forget_subcommand() {
        let cli = Cli::parse_from(["repo-viewer", "forget"]);
        assert!(matches!(cli.command, Some(Commands::Forget)));
    }
}
