use crate::domain::UiMode;
use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

/// Hints for the current mode
fn hints_for(mode: UiMode) -> &'static [&'static str] {
    match mode {
        UiMode::Normal => &[
            " ↑/↓ select   ",
            "a add   ",
            "e edit   ",
            "x/Enter done   ",
            "d delete   ",
            "C clear done   ",
            "1/2/3 filter   ",
            "/ search   ",
            "space expand   ",
            "p paste link   ",
            "o open   ",
            "s player   ",
            "q quit",
        ],
        UiMode::AddingTask => &[" Enter add   ", "Tab priority   ", "Esc cancel"],
        UiMode::EditingTask => &[" Enter save   ", "Esc cancel"],
        UiMode::Searching => &[" Enter keep   ", "Esc clear"],
        UiMode::EnteringLink => &[" Enter play   ", "Esc cancel"],
    }
}

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, mode: UiMode, area: Rect) {
    let hints = Line::from(
        hints_for(mode)
            .iter()
            .map(|h| Span::raw(*h))
            .collect::<Vec<_>>(),
    );

    let paragraph = Paragraph::new(hints).style(hint_style());
    f.render_widget(paragraph, area);
}
