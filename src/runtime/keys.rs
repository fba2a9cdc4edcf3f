// src/runtime/keys.rs
// =============================================================================
// Key bindings.
//
// Input focus: typing edits the URL, Enter loads it, Esc leaves the field
// Tree focus:  j/k move, Enter/Space/l open, g/G jump to top/bottom
// Content:     j/k and PageUp/PageDown scroll
// Anywhere but the input: q quits, r resets, < and > resize the tree pane
// Everywhere: Tab cycles focus, Ctrl-C quits
// =============================================================================

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, Focus};

const RESIZE_STEP: i16 = 5;
const PAGE_LINES: i32 = 20;

pub(crate) fn handle_key(app: &mut App, key: KeyEvent) {
    // Some terminals also report releases; act on presses only
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    if key.code == KeyCode::Tab {
        app.focus = app.focus.next();
        return;
    }

    match app.focus {
        Focus::Input => handle_input_key(app, key),
        Focus::Tree => {
            if !handle_global_key(app, key) {
                handle_tree_key(app, key);
            }
        }
        Focus::Content => {
            if !handle_global_key(app, key) {
                handle_content_key(app, key);
            }
        }
    }
}

fn handle_input_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.submit(),
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Esc => app.focus = Focus::Tree,
        KeyCode::Char(c) => app.input.push(c),
        _ => {}
    }
}

// Returns true when the key was consumed
fn handle_global_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('r') => app.reset(),
        KeyCode::Char('<') => app.resize_tree(-RESIZE_STEP),
        KeyCode::Char('>') => app.resize_tree(RESIZE_STEP),
        KeyCode::Char('i') | KeyCode::Char('/') => app.focus = Focus::Input,
        _ => return false,
    }
    true
}

fn handle_tree_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.move_selection(1),
        KeyCode::Char('k') | KeyCode::Up => app.move_selection(-1),
        KeyCode::Char('g') | KeyCode::Home => app.select_first(),
        KeyCode::Char('G') | KeyCode::End => app.select_last(),
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('l') | KeyCode::Right => {
            app.activate_selected();
        }
        _ => {}
    }
}

fn handle_content_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.viewer.scroll_by(1),
        KeyCode::Char('k') | KeyCode::Up => app.viewer.scroll_by(-1),
        KeyCode::PageDown => app.viewer.scroll_by(PAGE_LINES),
        KeyCode::PageUp => app.viewer.scroll_by(-PAGE_LINES),
        KeyCode::Char('g') | KeyCode::Home => app.viewer.scroll = 0,
        _ => {}
    }
}
