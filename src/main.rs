// src/main.rs
// =============================================================================
// This is the entry point of repo-viewer.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Resolve them into a Config (API root, host, file locations)
// 3. Dispatch: interactive browser, one-shot listing, or forgetting the
//    remembered repository
// 4. Exit with proper code (0 = success, 2 = error)
// =============================================================================

mod app;       // src/app.rs - application state and user actions
mod cli;       // src/cli.rs - command-line parsing
mod config;    // src/config.rs - resolved runtime configuration
mod explorer;  // src/explorer/ - which directories are open
mod github;    // src/github/ - everything that talks to GitHub
mod logging;   // src/logging.rs - tracing subscriber setup
mod runtime;   // src/runtime/ - the interactive event loop
mod session;   // src/session.rs - generation counter and saved URL
mod tree;      // src/tree/ - tree nodes, ordering and row text
mod ui;        // src/ui.rs - drawing with ratatui
mod viewer;    // src/viewer.rs - the file content pane

use std::io::IsTerminal;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tokio::sync::mpsc;

use app::App;
use cli::{Cli, Commands};
use config::Config;
use github::{GithubClient, RepoClient};
use session::SessionStore;
use tree::TreeNode;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    let config = Config::from_cli(&cli.options)?;

    match cli.command {
        None => handle_browse(&config, cli.repo_url).await,
        Some(Commands::Browse { repo_url }) => handle_browse(&config, repo_url).await,
        Some(Commands::List {
            repo_url,
            path,
            json,
        }) => handle_list(&config, &repo_url, &path, json).await,
        Some(Commands::Forget) => handle_forget(&config),
    }
}

// Opens the interactive browser
async fn handle_browse(config: &Config, repo_url: Option<String>) -> Result<i32> {
    if !std::io::stdout().is_terminal() {
        bail!("the browser needs an interactive terminal; try `repo-viewer list <URL>`");
    }

    logging::init_file(&config.log_file)?;

    let client = GithubClient::new(config.api_root.clone(), config.request_timeout)
        .context("Failed to create HTTP client")?;
    let store = SessionStore::new(config.session_file.clone());
    let (tx, mut rx) = mpsc::unbounded_channel();

    let mut app = App::new(Arc::new(client), store, config.host.clone(), tx);
    app.restore(repo_url);

    runtime::run(&mut app, &mut rx)
        .await
        .context("Terminal error")?;

    Ok(0)
}

// Handles the 'list' subcommand: one request, printed, done
async fn handle_list(config: &Config, repo_url: &str, path: &str, json: bool) -> Result<i32> {
    logging::init_stderr();

    let reference = github::resolve_reference(repo_url, &config.host)?;
    let client = GithubClient::new(config.api_root.clone(), config.request_timeout)
        .context("Failed to create HTTP client")?;

    let path = path.trim_matches('/').to_string();
    let mut nodes = client
        .list_directory(reference.clone(), path.clone())
        .await
        .with_context(|| format!("Failed to list '{}' in {}", path, reference))?;
    tree::sort_nodes(&mut nodes);

    print_listing(&nodes, json)?;
    Ok(0)
}

// Handles the 'forget' subcommand
fn handle_forget(config: &Config) -> Result<i32> {
    logging::init_stderr();

    let store = SessionStore::new(config.session_file.clone());
    store.clear()?;

    println!("Forgot the remembered repository ({})", store.path().display());
    Ok(0)
}

// Prints the listing either as a table or JSON
fn print_listing(nodes: &[TreeNode], json: bool) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(nodes)?;
        println!("{}", json_output);
        return Ok(());
    }

    println!("{:<6} {}", "TYPE", "NAME");
    println!("{}", "=".repeat(60));

    for node in nodes {
        let (kind, suffix) = if node.is_dir() { ("dir", "/") } else { ("file", "") };
        println!("{:<6} {}{}", kind, node.name, suffix);
    }

    let dirs = nodes.iter().filter(|n| n.is_dir()).count();
    println!();
    println!("{} director{}, {} file(s)", dirs, if dirs == 1 { "y" } else { "ies" }, nodes.len() - dirs);
    Ok(())
}
