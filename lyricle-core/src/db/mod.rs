//! SQLite persistence for games, songs, guesses and settings

pub mod guesses;
pub mod init;
pub mod settings;

pub use guesses::SqliteStore;
pub use init::{init_database, init_memory_database};
pub use settings::{get_setting, load_engine_config, set_setting};
