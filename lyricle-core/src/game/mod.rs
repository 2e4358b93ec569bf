//! Game progress, completion and state projection

pub mod policy;
pub mod progress;
pub mod state;

pub use policy::{is_game_complete, overall_progress, reveals, Reveals};
pub use progress::{
    calculate_game_progress, calculate_section_progress, GameProgress, MaskedSong,
    SectionProgress,
};
pub use state::{compute_game_state, found_words, GameState, GuessHit};
