pub mod files;
pub mod settings;
pub mod store;

pub use files::{ensure_dir, init_local_data_dir, resolve_data_dir};
pub use settings::Settings;
pub use store::{Store, SPOTIFY_KEY, TODO_KEY};
