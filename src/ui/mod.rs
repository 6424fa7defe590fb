pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod spotify_pane;
pub mod styles;
pub mod todo_pane;

use crate::app::AppState;
use input_form::render_input_form;
use keybindings::render_keybindings;
use layout::create_layout;
use ratatui::{text::Span, widgets::Paragraph, Frame};
use spotify_pane::render_spotify_pane;
use styles::hint_style;
use todo_pane::render_todo_pane;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size, app.show_spotify);

    render_keybindings(f, app.ui_mode, layout.keybindings_area);
    render_todo_pane(f, app, layout.todo_area);

    if let Some(spotify_area) = layout.spotify_area {
        render_spotify_pane(f, app, spotify_area);
    }

    if let Some(message) = &app.status_message {
        f.render_widget(
            Paragraph::new(Span::styled(format!(" {}", message), hint_style())),
            layout.status_area,
        );
    }

    // Render input form if active
    if app.input_form.is_some() {
        render_input_form(f, app, size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Priority;
    use crate::persistence::{Settings, Store};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use ratatui::{backend::TestBackend, Terminal};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_render_smoke() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut app = AppState::with_rng(
            Store::new(temp_dir.path()),
            &Settings::default(),
            StdRng::seed_from_u64(2),
        );
        app.tasks.add("Water plants", Priority::High).unwrap();

        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Water plants"));
        assert!(text.contains("Spotify Player"));
        assert!(text.contains("Steve Jobs"));
    }

    #[test]
    fn test_render_empty_state_and_form() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut app = AppState::with_rng(
            Store::new(temp_dir.path()),
            &Settings::default(),
            StdRng::seed_from_u64(2),
        );
        app.toggle_spotify_pane();
        app.start_add_task();

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Add a new task"));
        assert!(!text.contains("Spotify Player"));
    }
}
