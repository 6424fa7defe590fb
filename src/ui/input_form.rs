use crate::app::AppState;
use crate::domain::Priority;
use crate::ui::{
    layout::create_modal_area,
    styles::{error_style, modal_bg_style, modal_title_style, priority_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the input form for adding tasks
pub fn render_input_form(f: &mut Frame, app: &AppState, area: Rect) {
    if let Some(form) = &app.input_form {
        let modal_area = create_modal_area(area);

        // Clear the area behind the form
        f.render_widget(Clear, modal_area);

        let mut lines = Vec::new();

        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::raw("> "),
            Span::styled(&form.text, modal_title_style()),
            Span::styled("█", modal_title_style()), // Cursor
        ]));
        lines.push(Line::raw(""));

        // Priority selector
        let mut priority_spans = vec![Span::raw("Priority: ")];
        for priority in [Priority::Low, Priority::Medium, Priority::High] {
            let label = if priority == app.session.priority {
                format!("[{}] ", priority.label())
            } else {
                format!(" {}  ", priority.label())
            };
            priority_spans.push(Span::styled(label, priority_style(priority)));
        }
        lines.push(Line::from(priority_spans));
        lines.push(Line::raw(""));

        if let Some(err) = app.session.error {
            lines.push(Line::from(Span::styled(err.to_string(), error_style())));
        }
        lines.push(Line::raw("Tab priority  ·  Enter to add  ·  Esc to cancel"));

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(" Add a new task ", modal_title_style()))
                    .style(modal_bg_style()),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, modal_area);
    }
}
