use crate::tui::app::App;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Task list
            Constraint::Length(3), // Footer
        ])
        .split(frame.size());

    draw_header(frame, chunks[0], app);
    draw_task_list(frame, chunks[1], app);
    draw_footer(frame, chunks[2], app);

    if app.help_mode {
        draw_help_window(frame);
    }
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let history = app.session.history();
    let header_text = format!(
        "Tasks: {} | Completed: {} | Undo: {} | Redo: {}",
        app.total_tasks(),
        app.completed_tasks(),
        history.undo_len(),
        history.redo_len()
    );
    let header = Paragraph::new(header_text)
        .block(Block::default().borders(Borders::ALL).title("Todo"))
        .style(Style::default().fg(Color::Cyan));

    frame.render_widget(header, area);
}

fn draw_task_list(frame: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .session
        .snapshot()
        .map(|task| {
            let checkbox = if task.done { "☑" } else { "☐" };
            let content = format!("{:>3}. {} {}", task.index, checkbox, task.description);

            let style = if task.done {
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default().fg(Color::White)
            };

            ListItem::new(Line::from(Span::styled(content, style)))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Items"))
        .highlight_style(
            Style::default()
                .bg(Color::Yellow)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        );

    let mut list_state = ListState::default();
    if !app.session.store().is_empty() {
        list_state.select(Some(app.selected_index));
    }

    frame.render_stateful_widget(list, area, &mut list_state);
}

fn draw_footer(frame: &mut Frame, area: Rect, app: &App) {
    let (footer_text, color) = if app.input_mode {
        (format!("New task: {}█", app.input_buffer), Color::White)
    } else if let Some(message) = &app.status_message {
        (message.clone(), Color::Green)
    } else {
        (
            "a: add | d: remove | Enter: done | u: undo | r: redo | ?: help | q: quit".to_string(),
            Color::Yellow,
        )
    };

    let title = if app.input_mode {
        "Enter: confirm | Esc: cancel"
    } else {
        ""
    };

    let footer = Paragraph::new(footer_text)
        .block(Block::default().borders(Borders::ALL).title(title))
        .style(Style::default().fg(color));

    frame.render_widget(footer, area);
}

fn draw_help_window(frame: &mut Frame) {
    let help_text = [
        "Todo List - Keyboard Commands",
        "",
        "NAVIGATION:",
        "  ↑↓ / j/k          Navigate up/down",
        "",
        "TASKS:",
        "  a                 Add a new task",
        "  d / Delete        Remove selected task",
        "  Enter / x         Mark selected task as done",
        "",
        "HISTORY:",
        "  u                 Undo last change",
        "  r / Ctrl+R        Redo last undone change",
        "",
        "OTHER:",
        "  Esc               Clear status message",
        "  ?                 Show this help (press ? or Esc to close)",
        "  q / Ctrl+C        Quit application",
    ];

    let help_paragraph = Paragraph::new(help_text.join("\n"))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help - Keyboard Commands ")
                .style(Style::default().fg(Color::Yellow)),
        )
        .style(Style::default().fg(Color::White))
        .wrap(Wrap { trim: true });

    let area = centered_rect(70, 70, frame.size());

    frame.render_widget(Clear, area);
    frame.render_widget(help_paragraph, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;
    use ratatui::{Terminal, backend::TestBackend};

    fn render(app: &App) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer.get(x, y).symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_draw_tasks_and_counts() {
        let mut session = Session::new();
        session.add("buy milk").unwrap();
        session.add("call mom").unwrap();
        session.mark_done(0).unwrap();
        let app = App::new(session);

        let screen = render(&app);
        assert!(screen.contains("Tasks: 2 | Completed: 1 | Undo: 3 | Redo: 0"));
        assert!(screen.contains("buy milk"));
        assert!(screen.contains("call mom"));
    }

    #[test]
    fn test_draw_input_mode() {
        let mut app = App::new(Session::new());
        app.input_mode = true;
        app.input_buffer = "write tests".to_string();

        let screen = render(&app);
        assert!(screen.contains("New task: write tests"));
    }

    #[test]
    fn test_draw_help_overlay() {
        let mut app = App::new(Session::new());
        app.help_mode = true;

        let screen = render(&app);
        assert!(screen.contains("Help - Keyboard Commands"));
    }
}
