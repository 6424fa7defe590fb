mod app;
mod browser;
mod domain;
mod input;
mod logging;
mod persistence;
mod ui;

use anyhow::{Context, Result};
use app::AppState;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::{random_quote, FilterMode, Priority, SpotifyWidget, Task, TaskList, TodoSession};
use persistence::{init_local_data_dir, resolve_data_dir, Settings, Store, SPOTIFY_KEY, TODO_KEY};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::Duration;

/// Event poll timeout; also the resolution of the quote timer
const TICK_RATE: Duration = Duration::from_millis(250);

#[derive(Parser)]
#[command(name = "tunedesk")]
#[command(about = "A terminal to-do list with a Spotify player link and a daily quote", long_about = None)]
struct Cli {
    /// Data directory (defaults to a local .tunedesk, then ~/.tunedesk)
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .tunedesk directory in the current directory
    Init,
    /// Add a task
    Add {
        /// Task text
        text: String,
        /// Task priority (defaults to the configured default)
        #[arg(short, long, value_enum)]
        priority: Option<Priority>,
    },
    /// List tasks, highest priority first
    List {
        #[arg(short, long, value_enum, default_value = "all")]
        filter: FilterMode,
        /// Case-insensitive text to search for
        #[arg(short, long, default_value = "")]
        search: String,
    },
    /// Toggle a task between active and completed
    Toggle { id: i64 },
    /// Replace the text of a task
    Edit { id: i64, text: String },
    /// Delete a task
    Remove { id: i64 },
    /// Delete every completed task
    ClearCompleted,
    /// Show or change the Spotify player link
    Spotify {
        #[command(subcommand)]
        action: SpotifyAction,
    },
    /// Print a random motivational quote
    Quote,
}

#[derive(Subcommand)]
enum SpotifyAction {
    /// Print the current embed link
    Show,
    /// Set the player from an album or playlist share link
    Set { url: String },
    /// Open the current embed link in the browser
    Open,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Init) = cli.command {
        let data_dir = init_local_data_dir()?;
        println!("Initialized tunedesk directory: {}", data_dir.display());
        println!();
        println!("tunedesk will now use this local directory for its data.");
        return Ok(());
    }

    let data_dir = resolve_data_dir(cli.dir.as_deref())?;
    persistence::ensure_dir(&data_dir)?;
    let store = Store::new(&data_dir);
    let settings = Settings::load(&store);

    let (level, fell_back) = pick_log_level(cli.log_level.as_deref(), &settings.log_level);
    let _logger = logging::init_logging(level, &data_dir.join("logs"))?;
    if fell_back {
        log::warn!(
            "unknown log_level {:?} in settings, using {}",
            settings.log_level,
            level
        );
    }

    match cli.command {
        None => run_tui(store, &settings),
        Some(command) => run_command(command, &store, &settings),
    }
}

/// An explicit `--log-level` is passed through as-is and rejected later if
/// bad; an unknown level from settings.json falls back to the default.
/// The flag is true when that fallback happened.
fn pick_log_level<'a>(flag: Option<&'a str>, configured: &'a str) -> (&'a str, bool) {
    match flag {
        Some(level) => (level, false),
        None if logging::is_known_level(configured) => (configured, false),
        None => (logging::DEFAULT_LEVEL, true),
    }
}

/// Execute a one-shot subcommand against the store
fn run_command(command: Commands, store: &Store, settings: &Settings) -> Result<()> {
    let load_tasks = || TaskList::from_tasks(store.read(TODO_KEY, Vec::<Task>::new()));

    match command {
        Commands::Init => anyhow::bail!("init must run before a data directory is opened"),
        Commands::Add { text, priority } => {
            let mut tasks = load_tasks();
            let priority = priority.unwrap_or(settings.default_priority);
            let task = tasks.add(&text, priority)?.clone();
            store.write(TODO_KEY, tasks.tasks())?;
            println!("Added #{} [{}] {}", task.id, priority.label(), task.text);
        }
        Commands::List { filter, search } => {
            let tasks = load_tasks();
            let session = TodoSession {
                filter,
                search,
                ..TodoSession::default()
            };
            println!(
                "{} active · {} completed",
                tasks.active_count(),
                tasks.completed_count()
            );
            let rows = session.view(&tasks);
            if rows.is_empty() {
                println!("{}", session.empty_message());
            }
            for task in rows {
                println!("{}", format_task_row(task));
            }
        }
        Commands::Toggle { id } => {
            let mut tasks = load_tasks();
            if !tasks.toggle(id) {
                anyhow::bail!("No task with id {}", id);
            }
            store.write(TODO_KEY, tasks.tasks())?;
            if let Some(task) = tasks.get(id) {
                println!("{}", format_task_row(task));
            }
        }
        Commands::Edit { id, text } => {
            let mut tasks = load_tasks();
            if !tasks.set_text(id, &text)? {
                anyhow::bail!("No task with id {}", id);
            }
            store.write(TODO_KEY, tasks.tasks())?;
            println!("Updated #{}", id);
        }
        Commands::Remove { id } => {
            let mut tasks = load_tasks();
            if !tasks.remove(id) {
                anyhow::bail!("No task with id {}", id);
            }
            store.write(TODO_KEY, tasks.tasks())?;
            println!("Removed #{}", id);
        }
        Commands::ClearCompleted => {
            let mut tasks = load_tasks();
            let removed = tasks.clear_completed();
            store.write(TODO_KEY, tasks.tasks())?;
            println!("Cleared {} completed task(s)", removed);
        }
        Commands::Spotify { action } => {
            let link: String = store.read(SPOTIFY_KEY, domain::DEFAULT_EMBED_LINK.to_string());
            let mut widget = SpotifyWidget::new(link);
            match action {
                SpotifyAction::Show => println!("{}", widget.link),
                SpotifyAction::Set { url } => {
                    widget.input = url;
                    widget.submit()?;
                    store.write(SPOTIFY_KEY, &widget.link)?;
                    println!("{}", widget.link);
                }
                SpotifyAction::Open => browser::open_url(&widget.link)?,
            }
        }
        Commands::Quote => {
            let quote = random_quote(&mut rand::thread_rng());
            println!("“{}”\n  - {}", quote.text, quote.author);
        }
    }
    Ok(())
}

/// One line per task for the `list` output
fn format_task_row(task: &Task) -> String {
    format!(
        "{:>15}  [{}] {:<6}  {}  ({})",
        task.id,
        if task.completed { "x" } else { " " },
        task.priority.label(),
        task.text,
        task.created_date()
    )
}

fn run_tui(store: Store, settings: &Settings) -> Result<()> {
    eprintln!("Using data directory: {}", store.dir().display());

    let mut app = AppState::load(store, settings);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    app.shutdown();

    // Save on exit
    if let Err(e) = app.save() {
        log::error!("final save failed: {:#}", e);
        eprintln!("Error saving state: {}", e);
    }

    result.context("TUI exited with an error")
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with timeout for ticking
        if event::poll(TICK_RATE)? {
            match event::read()? {
                // Only process key press events (ignore key release)
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if input::handle_key(app, key)? {
                        return Ok(());
                    }
                }
                Event::Paste(text) => input::handle_paste(app, &text),
                _ => {}
            }
        }

        app.tick();

        // Persist right away so every change survives a crash
        if app.needs_save || app.link_needs_save {
            app.save()?;
        }
    }
}
