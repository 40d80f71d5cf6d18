//! Planet Jumper - a vertical arcade jumper
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, game state)
//! - `game`: Host-facing facade (observers, accessors, frame driver)
//! - `highscores`: Persisted top-10 leaderboard
//! - `tuning`: Data-driven game balance
//! - `avatar`: Opaque player head image

pub mod avatar;
pub mod error;
pub mod game;
pub mod highscores;
pub mod sim;
pub mod tuning;

pub use avatar::{AvatarImage, HeadTexture};
pub use error::GameError;
pub use game::GameSimulation;
pub use highscores::{HighScoreStore, HighScores, ScoreStorage};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one display refresh at 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the driver will try to catch up on (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Default world size (portrait phone, points)
    pub const WORLD_WIDTH: f32 = 375.0;
    pub const WORLD_HEIGHT: f32 = 667.0;
}
