use crate::app::AppState;
use crate::domain::UiMode;
use crate::ui::styles::{
    border_style, default_style, error_style, focused_border_style, muted_style, quote_style,
    title_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Render the Spotify player pane: current embed link, paste box, quote
pub fn render_spotify_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let entering = app.ui_mode == UiMode::EnteringLink;
    let mut lines = Vec::new();

    if let Some(err) = app.spotify.error {
        lines.push(Line::from(Span::styled(err.to_string(), error_style())));
        lines.push(Line::raw(""));
    }

    lines.push(Line::from(Span::styled("Now playing", muted_style())));
    lines.push(Line::from(Span::styled(app.spotify.link.clone(), default_style())));
    lines.push(Line::raw(""));

    let input_line = if entering {
        Line::from(vec![
            Span::raw("> "),
            Span::styled(format!("{}█", app.spotify.input), title_style()),
        ])
    } else {
        Line::from(Span::styled(
            "Enter Spotify album link (p)  ·  open in browser (o)",
            muted_style(),
        ))
    };
    lines.push(input_line);
    lines.push(Line::raw(""));

    let quote = app.quotes.current();
    lines.push(Line::from(Span::styled(format!("“{}”", quote.text), quote_style())));
    lines.push(Line::from(Span::styled(format!("  - {}", quote.author), muted_style())));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(if entering {
                    focused_border_style()
                } else {
                    border_style()
                })
                .title(Span::styled(" Spotify Player ♫ ", title_style())),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, area);
}
