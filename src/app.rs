use crate::browser;
use crate::domain::{
    FilterMode, QuoteRotator, SpotifyWidget, Task, TaskList, TodoSession, UiMode,
    DEFAULT_EMBED_LINK,
};
use crate::persistence::{Settings, Store, SPOTIFY_KEY, TODO_KEY};
use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use std::time::Instant;

/// Input form state for adding tasks
#[derive(Debug, Clone, Default)]
pub struct InputFormState {
    pub text: String,
}

/// Main application state
pub struct AppState {
    pub store: Store,
    pub tasks: TaskList,
    pub session: TodoSession,
    pub spotify: SpotifyWidget,
    pub quotes: QuoteRotator,
    pub show_spotify: bool,
    pub selected_index: usize,
    pub ui_mode: UiMode,
    pub input_form: Option<InputFormState>,
    pub expanded: HashSet<i64>, // Rows showing their full text
    pub status_message: Option<String>,
    pub needs_save: bool,
    pub link_needs_save: bool,
    rng: StdRng,
}

impl AppState {
    /// Load persisted tasks and link from `store`
    pub fn load(store: Store, settings: &Settings) -> Self {
        Self::with_rng(store, settings, StdRng::from_entropy())
    }

    pub fn with_rng(store: Store, settings: &Settings, rng: StdRng) -> Self {
        let tasks: Vec<Task> = store.read(TODO_KEY, Vec::new());
        let link: String = store.read(SPOTIFY_KEY, DEFAULT_EMBED_LINK.to_string());
        log::info!("loaded {} task(s) from {}", tasks.len(), store.dir().display());

        let mut quotes = QuoteRotator::new(settings.quote_interval());
        quotes.show(Instant::now());

        Self {
            store,
            tasks: TaskList::from_tasks(tasks),
            session: TodoSession::new(settings.default_priority),
            spotify: SpotifyWidget::new(link),
            quotes,
            show_spotify: true,
            selected_index: 0,
            ui_mode: UiMode::Normal,
            input_form: None,
            expanded: HashSet::new(),
            status_message: None,
            needs_save: false,
            link_needs_save: false,
            rng,
        }
    }

    /// Rows currently on screen, in display order
    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.session.view(&self.tasks)
    }

    pub fn selected_task_id(&self) -> Option<i64> {
        self.visible_tasks().get(self.selected_index).map(|t| t.id)
    }

    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn move_selection_down(&mut self) {
        let count = self.visible_tasks().len();
        if self.selected_index + 1 < count {
            self.selected_index += 1;
        }
    }

    /// Keep the selection inside the visible rows after the view changes
    fn clamp_selection(&mut self) {
        let count = self.visible_tasks().len();
        if count == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= count {
            self.selected_index = count - 1;
        }
    }

    /// Start adding a new task (opens input form)
    pub fn start_add_task(&mut self) {
        self.input_form = Some(InputFormState::default());
        self.ui_mode = UiMode::AddingTask;
    }

    pub fn input_form_add_char(&mut self, c: char) {
        if let Some(form) = &mut self.input_form {
            form.text.push(c);
        }
    }

    pub fn input_form_backspace(&mut self) {
        if let Some(form) = &mut self.input_form {
            form.text.pop();
        }
    }

    pub fn cycle_priority(&mut self) {
        self.session.priority = self.session.priority.cycle();
    }

    /// Submit the add form. A blank task keeps the form open with the
    /// error shown.
    pub fn submit_input_form(&mut self) {
        let text = match &self.input_form {
            Some(form) => form.text.clone(),
            None => return,
        };

        if let Ok(id) = self.session.add(&mut self.tasks, &text) {
            self.input_form = None;
            self.ui_mode = UiMode::Normal;
            self.needs_save = true;
            self.select_task(id);
        }
    }

    /// Cancel input form
    pub fn cancel_input_form(&mut self) {
        self.input_form = None;
        self.ui_mode = UiMode::Normal;
    }

    /// Point the selection at `id` if it is visible
    fn select_task(&mut self, id: i64) {
        let pos = self.visible_tasks().iter().position(|t| t.id == id);
        if let Some(pos) = pos {
            self.selected_index = pos;
        }
    }

    pub fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            if self.tasks.toggle(id) {
                self.needs_save = true;
                self.clamp_selection();
            }
        }
    }

    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            if self.tasks.remove(id) {
                self.expanded.remove(&id);
                if self.session.editing_id() == Some(id) {
                    self.session.edit_cancel();
                }
                self.needs_save = true;
                self.clamp_selection();
            }
        }
    }

    pub fn clear_completed(&mut self) {
        let removed = self.tasks.clear_completed();
        if removed > 0 {
            self.status_message = Some(format!("Cleared {} completed task(s)", removed));
            self.needs_save = true;
            self.clamp_selection();
        }
    }

    /// Open inline editing for the selected task
    pub fn start_edit_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            if self.session.edit_start(&self.tasks, id) {
                self.ui_mode = UiMode::EditingTask;
            }
        }
    }

    pub fn edit_add_char(&mut self, c: char) {
        if let Some(edit) = &mut self.session.editing {
            edit.buffer.push(c);
        }
    }

    pub fn edit_backspace(&mut self) {
        if let Some(edit) = &mut self.session.editing {
            edit.buffer.pop();
        }
    }

    /// Save the inline edit; blank text keeps the editor open
    pub fn save_edit(&mut self) {
        if self.session.edit_commit(&mut self.tasks).is_ok() {
            self.ui_mode = UiMode::Normal;
            self.needs_save = true;
        }
    }

    pub fn cancel_edit(&mut self) {
        self.session.edit_cancel();
        self.ui_mode = UiMode::Normal;
    }

    pub fn start_search(&mut self) {
        self.ui_mode = UiMode::Searching;
    }

    pub fn search_add_char(&mut self, c: char) {
        self.session.search.push(c);
        self.selected_index = 0;
    }

    pub fn search_backspace(&mut self) {
        self.session.search.pop();
        self.selected_index = 0;
    }

    /// Leave search input, keeping the term applied
    pub fn finish_search(&mut self) {
        self.ui_mode = UiMode::Normal;
    }

    /// Leave search input and drop the term
    pub fn clear_search(&mut self) {
        self.session.search.clear();
        self.ui_mode = UiMode::Normal;
        self.clamp_selection();
    }

    pub fn set_filter(&mut self, filter: FilterMode) {
        self.session.filter = filter;
        self.selected_index = 0;
    }

    pub fn cycle_filter(&mut self) {
        self.set_filter(self.session.filter.next());
    }

    /// Toggle full-text display for the selected row
    pub fn toggle_expand(&mut self) {
        if let Some(id) = self.selected_task_id() {
            if !self.expanded.remove(&id) {
                self.expanded.insert(id);
            }
        }
    }

    pub fn start_link_input(&mut self) {
        if !self.show_spotify {
            self.toggle_spotify_pane();
        }
        self.ui_mode = UiMode::EnteringLink;
    }

    pub fn link_add_char(&mut self, c: char) {
        self.spotify.input.push(c);
    }

    pub fn link_backspace(&mut self) {
        self.spotify.input.pop();
    }

    /// Validate the pasted link. Invalid input stays in the box with the
    /// error shown.
    pub fn submit_link(&mut self) {
        if self.spotify.submit().is_ok() {
            self.link_needs_save = true;
            self.ui_mode = UiMode::Normal;
        }
    }

    pub fn cancel_link_input(&mut self) {
        self.spotify.input.clear();
        self.spotify.error = None;
        self.ui_mode = UiMode::Normal;
    }

    /// Show or hide the Spotify pane. Hiding cancels the quote timer.
    pub fn toggle_spotify_pane(&mut self) {
        self.show_spotify = !self.show_spotify;
        if self.show_spotify {
            self.quotes.show(Instant::now());
        } else {
            self.quotes.hide();
        }
    }

    pub fn open_link(&mut self) {
        match browser::open_url(&self.spotify.link) {
            Ok(()) => self.status_message = Some("Opened player in browser".to_string()),
            Err(e) => {
                log::warn!("{:#}", e);
                self.status_message = Some(format!("Could not open browser: {}", e));
            }
        }
    }

    /// Advance timers
    pub fn tick(&mut self) {
        self.quotes.tick(Instant::now(), &mut self.rng);
    }

    /// Stop timers before the view goes away
    pub fn shutdown(&mut self) {
        self.quotes.hide();
    }

    /// Persist whatever changed since the last save
    pub fn save(&mut self) -> Result<()> {
        if self.needs_save {
            self.store.write(TODO_KEY, self.tasks.tasks())?;
            self.needs_save = false;
        }
        if self.link_needs_save {
            self.store.write(SPOTIFY_KEY, &self.spotify.link)?;
            self.link_needs_save = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::ValidationError;
    use crate::domain::Priority;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn create_test_app() -> (TempDir, AppState) {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = Store::new(temp_dir.path());
        let app = AppState::with_rng(store, &Settings::default(), StdRng::seed_from_u64(5));
        (temp_dir, app)
    }

    fn add(app: &mut AppState, text: &str, priority: Priority) {
        app.session.priority = priority;
        app.start_add_task();
        for c in text.chars() {
            app.input_form_add_char(c);
        }
        app.submit_input_form();
    }

    fn visible_texts(app: &AppState) -> Vec<String> {
        app.visible_tasks().iter().map(|t| t.text.clone()).collect()
    }

    #[test]
    fn test_app_state_new() {
        let (_dir, app) = create_test_app();
        assert!(app.tasks.is_empty());
        assert_eq!(app.spotify.link, DEFAULT_EMBED_LINK);
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.quotes.is_running());
    }

    #[test]
    fn test_load_with_huge_quote_interval() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = Store::new(temp_dir.path());
        let settings = Settings {
            quote_interval_secs: u64::MAX,
            ..Settings::default()
        };

        let mut app = AppState::with_rng(store, &settings, StdRng::seed_from_u64(9));
        assert!(app.quotes.is_running());
        app.tick();
        assert_eq!(app.quotes.index(), 0);
    }

    #[test]
    fn test_add_task_via_form() {
        let (_dir, mut app) = create_test_app();
        add(&mut app, "Write notes", Priority::High);

        assert_eq!(app.tasks.len(), 1);
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.input_form.is_none());
        assert!(app.needs_save);
    }

    #[test]
    fn test_blank_task_keeps_form_open() {
        let (_dir, mut app) = create_test_app();
        add(&mut app, "   ", Priority::Low);

        assert!(app.tasks.is_empty());
        assert_eq!(app.ui_mode, UiMode::AddingTask);
        assert_eq!(app.session.error, Some(ValidationError::EmptyTask));
    }

    #[test]
    fn test_view_order_low_high_medium() {
        let (_dir, mut app) = create_test_app();
        add(&mut app, "low task", Priority::Low);
        add(&mut app, "high task", Priority::High);
        add(&mut app, "medium task", Priority::Medium);

        assert_eq!(visible_texts(&app), vec!["high task", "medium task", "low task"]);
    }

    #[test]
    fn test_toggle_under_active_filter_clamps_selection() {
        let (_dir, mut app) = create_test_app();
        add(&mut app, "one", Priority::Medium);
        add(&mut app, "two", Priority::Medium);
        app.set_filter(FilterMode::Active);
        app.move_selection_down();
        assert_eq!(app.selected_index, 1);

        app.toggle_selected();
        assert_eq!(visible_texts(&app), vec!["one"]);
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_inline_edit_flow() {
        let (_dir, mut app) = create_test_app();
        add(&mut app, "typo", Priority::Medium);

        app.start_edit_selected();
        assert_eq!(app.ui_mode, UiMode::EditingTask);
        for _ in 0..4 {
            app.edit_backspace();
        }
        app.save_edit();
        assert_eq!(app.ui_mode, UiMode::EditingTask);
        assert_eq!(app.tasks.tasks()[0].text, "typo");

        for c in "fixed".chars() {
            app.edit_add_char(c);
        }
        app.save_edit();
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.tasks.tasks()[0].text, "fixed");
        assert_eq!(app.session.error, None);
    }

    #[test]
    fn test_search_narrows_view() {
        let (_dir, mut app) = create_test_app();
        add(&mut app, "Groceries", Priority::Medium);
        add(&mut app, "Gym", Priority::Medium);

        app.start_search();
        for c in "GROC".chars() {
            app.search_add_char(c);
        }
        assert_eq!(visible_texts(&app), vec!["Groceries"]);

        app.clear_search();
        assert_eq!(visible_texts(&app).len(), 2);
    }

    #[test]
    fn test_clear_completed_reports() {
        let (_dir, mut app) = create_test_app();
        add(&mut app, "done soon", Priority::Medium);
        app.toggle_selected();

        app.clear_completed();
        assert!(app.tasks.is_empty());
        assert!(app.status_message.unwrap().contains("1"));
    }

    #[test]
    fn test_link_submit_and_reload() {
        let (dir, mut app) = create_test_app();
        app.start_link_input();
        for c in "https://open.spotify.com/album/72s".chars() {
            app.link_add_char(c);
        }
        app.submit_link();
        app.save().unwrap();

        assert_eq!(app.ui_mode, UiMode::Normal);
        let reloaded = AppState::with_rng(
            Store::new(dir.path()),
            &Settings::default(),
            StdRng::seed_from_u64(1),
        );
        assert_eq!(reloaded.spotify.link, "https://open.spotify.com/embed/album/72s");
    }

    #[test]
    fn test_invalid_link_keeps_input_mode() {
        let (_dir, mut app) = create_test_app();
        app.start_link_input();
        for c in "https://example.com/foo".chars() {
            app.link_add_char(c);
        }
        app.submit_link();

        assert_eq!(app.ui_mode, UiMode::EnteringLink);
        assert_eq!(app.spotify.link, DEFAULT_EMBED_LINK);
        assert_eq!(app.spotify.error, Some(ValidationError::InvalidSpotifyLink));
        assert!(!app.link_needs_save);
    }

    #[test]
    fn test_hiding_spotify_pane_cancels_timer() {
        let (_dir, mut app) = create_test_app();
        app.toggle_spotify_pane();
        assert!(!app.show_spotify);
        assert!(!app.quotes.is_running());

        app.toggle_spotify_pane();
        assert!(app.quotes.is_running());
    }

    #[test]
    fn test_tasks_persist_across_reload() {
        let (dir, mut app) = create_test_app();
        add(&mut app, "persist me", Priority::Low);
        app.save().unwrap();
        assert!(!app.needs_save);

        let reloaded = AppState::with_rng(
            Store::new(dir.path()),
            &Settings::default(),
            StdRng::seed_from_u64(1),
        );
        assert_eq!(reloaded.tasks.tasks()[0].text, "persist me");
    }
}
