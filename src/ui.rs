// src/ui.rs
// =============================================================================
// Drawing one frame with ratatui.
//
// Layout:
//   +---------------------------------------------+
//   | Repository URL                              |
//   +----------------+----------------------------+
//   | tree           | file content               |
//   |                |                            |
//   +----------------+----------------------------+
//   key help
//
// Rendering only reads the App; all state changes happen in app.rs.
// =============================================================================

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::{App, Focus, RootStatus, TREE_PLACEHOLDER};
use crate::tree::{RowKind, TreeRow};
use crate::viewer::ViewerState;

const EMPTY_REPOSITORY: &str = "This repository is empty.";
const LOADING: &str = "Loading...";

pub fn render(frame: &mut Frame, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(app.split_percent),
            Constraint::Percentage(100 - app.split_percent),
        ])
        .split(rows[1]);

    render_input(frame, rows[0], app);
    render_tree(frame, panes[0], app);
    render_content(frame, panes[1], app);
    render_footer(frame, rows[2], app);
}

fn pane_block(title: String, focused: bool) -> Block<'static> {
    let color = if focused { Color::Cyan } else { Color::DarkGray };

    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(Span::styled(title, Style::default().fg(Color::Cyan)))
}

fn render_input(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Input;
    let mut block = pane_block(" Repository URL ".to_string(), focused);

    if let Some(error) = &app.input_error {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {} ", error),
            Style::default().fg(Color::Red),
        )));
    }

    let text = if app.input.is_empty() && !focused {
        Span::styled(
            "https://github.com/<owner>/<name>",
            Style::default().fg(Color::DarkGray),
        )
    } else {
        Span::raw(app.input.as_str())
    };

    frame.render_widget(Paragraph::new(Line::from(text)).block(block), area);

    if focused {
        let width = u16::try_from(app.input.chars().count()).unwrap_or(u16::MAX);
        let x = area
            .x
            .saturating_add(1)
            .saturating_add(width)
            .min(area.right().saturating_sub(2));
        frame.set_cursor_position((x, area.y + 1));
    }
}

fn render_tree(frame: &mut Frame, area: Rect, app: &App) {
    let title = match app.session_reference() {
        Some(reference) => format!(" {} ", reference),
        None => " Files ".to_string(),
    };
    let block = pane_block(title, app.focus == Focus::Tree);

    let message = match &app.root {
        RootStatus::Idle => Some(Span::styled(
            TREE_PLACEHOLDER,
            Style::default().fg(Color::DarkGray),
        )),
        RootStatus::Loading => Some(Span::raw(LOADING)),
        RootStatus::Failed(message) => Some(Span::styled(
            message.as_str(),
            Style::default().fg(Color::Red),
        )),
        RootStatus::Ready => None,
    };

    if let Some(message) = message {
        frame.render_widget(
            Paragraph::new(Line::from(message))
                .block(block)
                .wrap(Wrap { trim: true }),
            area,
        );
        return;
    }

    let rows = app.visible_rows();
    if rows.is_empty() {
        frame.render_widget(Paragraph::new(EMPTY_REPOSITORY).block(block), area);
        return;
    }

    let items: Vec<ListItem> = rows.iter().map(row_item).collect();
    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    );

    let mut state = ListState::default().with_selected(Some(app.selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn row_item(row: &TreeRow) -> ListItem<'static> {
    let style = match row.kind {
        RowKind::Dir { .. } => Style::default().fg(Color::Blue),
        RowKind::File => Style::default(),
        RowKind::Notice { error: true } => Style::default().fg(Color::Red),
        RowKind::Notice { error: false } => Style::default().fg(Color::DarkGray),
    };

    ListItem::new(Line::from(Span::styled(row.display(), style)))
}

fn render_content(frame: &mut Frame, area: Rect, app: &App) {
    let title = match app.viewer.title() {
        Some(title) => format!(" {} ", title),
        None => " Content ".to_string(),
    };
    let block = pane_block(title, app.focus == Focus::Content);

    let style = match app.viewer.state() {
        ViewerState::Placeholder | ViewerState::Loading => Style::default().fg(Color::DarkGray),
        ViewerState::Error(_) => Style::default().fg(Color::Red),
        ViewerState::Text(_) => Style::default(),
    };

    let paragraph = Paragraph::new(app.viewer.text())
        .style(style)
        .block(block)
        .scroll((app.viewer.scroll, 0));

    frame.render_widget(paragraph, area);
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let help = match app.focus {
        Focus::Input => "Enter load · Esc/Tab leave · Ctrl-C quit",
        Focus::Tree => "j/k move · Enter open · r reset · </> resize · i edit URL · Tab focus · q quit",
        Focus::Content => "j/k scroll · PgUp/PgDn page · r reset · Tab focus · q quit",
    };

    frame.render_widget(
        Paragraph::new(Span::styled(help, Style::default().fg(Color::DarkGray))),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::MockRepoClient;
    use crate::session::SessionStore;
    use crate::tree::TreeNode;
    use crate::viewer::PLACEHOLDER;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::sync::Arc;

    fn app(dir: &tempfile::TempDir) -> App {
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        let store = SessionStore::new(dir.path().join("session.json"));
        App::new(Arc::new(MockRepoClient::new()), store, "github.com", tx)
    }

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(200, 20)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();

        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_placeholders_on_empty_session() {
        let dir = tempfile::tempdir().unwrap();
        let text = screen(&app(&dir));

        assert!(text.contains(TREE_PLACEHOLDER));
        assert!(text.contains(PLACEHOLDER));
    }

    #[test]
    fn test_tree_rows_and_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        app.explorer.set_root(vec![
            TreeNode::file("", "README.md", None),
            TreeNode::dir("", "src"),
        ]);
        app.root = RootStatus::Ready;
        app.input_error = Some("Please enter a valid GitHub repository URL!".to_string());

        let text = screen(&app);

        assert!(text.contains("▸ src/"));
        assert!(text.contains("README.md"));
        assert!(text.contains("Please enter a valid GitHub repository URL!"));
    }

    #[test]
    fn test_root_failure_message() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        app.root = RootStatus::Failed("No files found or unable to fetch files.".to_string());

        assert!(screen(&app).contains("No files found"));
    }
}
