use crate::app::AppState;
use crate::domain::{FilterMode, UiMode};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    // Ctrl+C quits from anywhere
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(true);
    }

    // Any key dismisses the last status line
    app.status_message = None;

    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::AddingTask => handle_input_form_mode(app, key),
        UiMode::EditingTask => handle_editing_mode(app, key),
        UiMode::Searching => handle_search_mode(app, key),
        UiMode::EnteringLink => handle_link_mode(app, key),
    }
}

/// Route pasted text into whichever input is active
pub fn handle_paste(app: &mut AppState, text: &str) {
    let text = text.trim_end_matches(['\r', '\n']);
    for c in text.chars().filter(|c| !c.is_control()) {
        match app.ui_mode {
            UiMode::AddingTask => app.input_form_add_char(c),
            UiMode::EditingTask => app.edit_add_char(c),
            UiMode::Searching => app.search_add_char(c),
            UiMode::EnteringLink => app.link_add_char(c),
            UiMode::Normal => {}
        }
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return Ok(true),

        // Navigation
        KeyCode::Up | KeyCode::Char('k') => app.move_selection_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection_down(),

        // Task actions
        KeyCode::Char('a') | KeyCode::Char('A') => app.start_add_task(),
        KeyCode::Char('e') | KeyCode::Char('E') => app.start_edit_selected(),
        KeyCode::Enter | KeyCode::Char('x') | KeyCode::Char('X') => app.toggle_selected(),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Delete => app.delete_selected(),
        KeyCode::Char('C') => app.clear_completed(),
        KeyCode::Char(' ') => app.toggle_expand(),

        // Filtering and search
        KeyCode::Char('1') => app.set_filter(FilterMode::All),
        KeyCode::Char('2') => app.set_filter(FilterMode::Active),
        KeyCode::Char('3') => app.set_filter(FilterMode::Completed),
        KeyCode::Tab => app.cycle_filter(),
        KeyCode::Char('/') => app.start_search(),

        // Spotify
        KeyCode::Char('p') | KeyCode::Char('P') => app.start_link_input(),
        KeyCode::Char('o') | KeyCode::Char('O') => app.open_link(),
        KeyCode::Char('s') | KeyCode::Char('S') => app.toggle_spotify_pane(),

        _ => {}
    }
    Ok(false)
}

/// Handle keys in the add-task form
fn handle_input_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => app.submit_input_form(),
        KeyCode::Esc => app.cancel_input_form(),
        KeyCode::Tab => app.cycle_priority(),
        KeyCode::Backspace => app.input_form_backspace(),
        KeyCode::Char(c) => app.input_form_add_char(c),
        _ => {}
    }
    Ok(false)
}

/// Handle keys while editing a task inline
fn handle_editing_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => app.save_edit(),
        KeyCode::Esc => app.cancel_edit(),
        KeyCode::Backspace => app.edit_backspace(),
        KeyCode::Char(c) => app.edit_add_char(c),
        _ => {}
    }
    Ok(false)
}

/// Handle keys in the search line
fn handle_search_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => app.finish_search(),
        KeyCode::Esc => app.clear_search(),
        KeyCode::Backspace => app.search_backspace(),
        KeyCode::Char(c) => app.search_add_char(c),
        _ => {}
    }
    Ok(false)
}

/// Handle keys in the Spotify link box
fn handle_link_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => app.submit_link(),
        KeyCode::Esc => app.cancel_link_input(),
        KeyCode::Backspace => app.link_backspace(),
        KeyCode::Char(c) => app.link_add_char(c),
        _ => {}
    }
    Ok(false)
}
