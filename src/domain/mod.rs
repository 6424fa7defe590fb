pub mod enums;
pub mod error;
pub mod quotes;
pub mod session;
pub mod spotify;
pub mod task;

pub use enums::{FilterMode, Priority, UiMode};
pub use quotes::{random_quote, QuoteRotator};
pub use session::TodoSession;
pub use spotify::{SpotifyWidget, DEFAULT_EMBED_LINK};
pub use task::{Task, TaskList};
