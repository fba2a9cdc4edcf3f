// src/runtime/mod.rs
// =============================================================================
// The interactive event loop.
//
// Each iteration:
// 1. Draw the current App state
// 2. Wait for either a key press or a finished request
// 3. Apply it (and any other requests that finished meanwhile)
//
// Everything runs on the one task that owns the App, so state changes never
// race; requests only wait on their own spawned tasks.
// =============================================================================

use std::io;

use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::info;

use crate::app::{App, Message};
use crate::ui;

mod keys;
mod terminal;

pub(crate) type TuiTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Runs the browser until the user quits.
///
/// # Errors
/// Returns an error if terminal setup, drawing or event reading fails.
pub async fn run(app: &mut App, messages: &mut UnboundedReceiver<Message>) -> io::Result<()> {
    let _terminal_guard = terminal::TerminalGuard;
    let mut terminal = terminal::setup_terminal()?;
    let mut events = EventStream::new();

    info!("browser started");

    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        tokio::select! {
            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) => keys::handle_key(app, key),
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e),
                None => break,
            },
            Some(message) = messages.recv() => app.handle_message(message),
        }

        // Apply every response that is already waiting before redrawing
        while let Ok(message) = messages.try_recv() {
            app.handle_message(message);
        }

        if app.should_quit {
            break;
        }
    }

    terminal.show_cursor()?;
    info!("browser closed");
    Ok(())
}
