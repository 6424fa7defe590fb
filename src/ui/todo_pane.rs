use crate::app::AppState;
use crate::domain::{FilterMode, Task, UiMode};
use crate::ui::styles::{
    active_tab_style, border_style, default_style, done_style, error_style, focused_border_style,
    inactive_tab_style, muted_style, priority_style, selected_style, title_style,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Columns taken by the marker, checkbox and trailing date
const ROW_CHROME_WIDTH: usize = 20;

/// Cut `text` to `max` characters, ending with an ellipsis when shortened
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let keep = max.saturating_sub(1);
    let mut out: String = text.chars().take(keep).collect();
    out.push('…');
    out
}

/// Split `text` into chunks of at most `width` characters
fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let chars: Vec<char> = text.chars().collect();
    chars.chunks(width).map(|c| c.iter().collect()).collect()
}

/// Render the filter tabs as one line
fn filter_tabs(current: FilterMode, has_completed: bool) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, mode) in FilterMode::all().iter().enumerate() {
        let style = if *mode == current {
            active_tab_style()
        } else {
            inactive_tab_style()
        };
        spans.push(Span::styled(format!(" {} {} ", i + 1, mode.label()), style));
        spans.push(Span::raw(" "));
    }
    if has_completed {
        spans.push(Span::styled(" C Clear Completed ", muted_style()));
    }
    Line::from(spans)
}

/// Build the list row for one task.
/// Format: ▌ [x] Buy milk                       2024-03-01
fn create_task_line(
    task: &Task,
    edit_buffer: Option<&str>,
    expanded: bool,
    width: usize,
) -> Text<'static> {
    let text_width = width.saturating_sub(ROW_CHROME_WIDTH).max(8);
    let checkbox = if task.completed { "[x] " } else { "[ ] " };
    let text_style = if task.completed {
        done_style()
    } else {
        default_style()
    };

    let prefix = vec![
        Span::styled("▌ ", priority_style(task.priority)),
        Span::raw(checkbox),
    ];

    if let Some(buffer) = edit_buffer {
        let mut spans = prefix;
        spans.push(Span::styled(format!("{}█", buffer), title_style()));
        return Text::from(Line::from(spans));
    }

    let date = Span::styled(format!("  {}", task.created_date()), muted_style());

    if expanded {
        let mut lines = Vec::new();
        for (i, chunk) in wrap(&task.text, text_width).into_iter().enumerate() {
            let lead = if i == 0 {
                prefix.clone()
            } else {
                vec![Span::raw("      ")]
            };
            let mut spans = lead;
            spans.push(Span::styled(chunk, text_style));
            lines.push(Line::from(spans));
        }
        if let Some(first) = lines.first_mut() {
            first.spans.push(date);
        }
        return Text::from(lines);
    }

    let mut spans = prefix;
    spans.push(Span::styled(truncate(&task.text, text_width), text_style));
    spans.push(date);
    Text::from(Line::from(spans))
}

/// Render the to-do pane
pub fn render_todo_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let title = format!(
        " Tasks & To-Dos — {} active · {} completed ",
        app.tasks.active_count(),
        app.tasks.completed_count()
    );
    let typing = matches!(
        app.ui_mode,
        UiMode::AddingTask | UiMode::EditingTask | UiMode::Searching
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if typing {
            focused_border_style()
        } else {
            border_style()
        })
        .title(Span::styled(title, title_style()));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Filter tabs
            Constraint::Length(1), // Search line
            Constraint::Length(1), // Error line
            Constraint::Min(0),    // Task list
        ])
        .split(inner);

    let tabs = filter_tabs(app.session.filter, app.tasks.has_completed());
    f.render_widget(Paragraph::new(tabs), chunks[0]);

    let search_line = if app.ui_mode == UiMode::Searching {
        Line::from(vec![
            Span::raw("Search: "),
            Span::styled(format!("{}█", app.session.search), title_style()),
        ])
    } else if app.session.is_searching() {
        Line::from(vec![
            Span::raw("Search: "),
            Span::styled(app.session.search.clone(), default_style()),
        ])
    } else {
        Line::from(Span::styled("Search tasks... (/)", muted_style()))
    };
    f.render_widget(Paragraph::new(search_line), chunks[1]);

    // The add form shows its own error
    if app.ui_mode != UiMode::AddingTask {
        if let Some(err) = app.session.error {
            f.render_widget(
                Paragraph::new(Span::styled(err.to_string(), error_style())),
                chunks[2],
            );
        }
    }

    let rows = app.visible_tasks();
    if rows.is_empty() {
        f.render_widget(
            Paragraph::new(Span::styled(app.session.empty_message(), muted_style())),
            chunks[3],
        );
        return;
    }

    let width = chunks[3].width as usize;
    let editing = app.session.editing.as_ref();
    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .map(|(idx, task)| {
            let buffer = editing
                .filter(|e| e.id == task.id)
                .map(|e| e.buffer.as_str());
            let text = create_task_line(task, buffer, app.expanded.contains(&task.id), width);
            let style = if idx == app.selected_index {
                selected_style()
            } else {
                default_style()
            };
            ListItem::new(text).style(style)
        })
        .collect();

    f.render_widget(List::new(items), chunks[3]);
}
