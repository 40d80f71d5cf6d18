//! Error types for construction, configuration and persistence.
//!
//! Ticking a running simulation never fails; errors only surface when a run is
//! built from bad parameters or when tuning/score files can't be read.

use std::fmt;

/// Top-level error enum for the jumper.
#[derive(Debug)]
pub enum GameError {
    /// World dimensions must be finite and strictly positive.
    InvalidWorldSize { width: f32, height: f32 },

    /// The world is too narrow to fit the spawn margins on both sides.
    WorldTooNarrow {
        width: f32,
        /// Smallest width that leaves room for spawning (2 × spawn margin).
        required: f32,
    },

    /// A tuning value is outside its usable range.
    InvalidTuning {
        /// Name of the field (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the constraint.
        reason: &'static str,
    },

    /// Avatar pixel buffer doesn't match its declared dimensions.
    InvalidAvatar { expected: usize, got: usize },

    /// Reading a tuning or score file failed.
    Io(std::io::Error),

    /// A tuning or score file isn't valid JSON for its schema.
    Parse(serde_json::Error),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidWorldSize { width, height } => write!(
                f,
                "invalid world size {}x{}: both dimensions must be positive",
                width, height
            ),
            GameError::WorldTooNarrow { width, required } => write!(
                f,
                "world width {} is too narrow to spawn platforms (need more than {})",
                width, required
            ),
            GameError::InvalidTuning {
                name,
                value,
                reason,
            } => write!(f, "invalid tuning value {} = {}: {}", name, value, reason),
            GameError::InvalidAvatar { expected, got } => write!(
                f,
                "avatar pixel buffer has {} bytes, expected {}",
                got, expected
            ),
            GameError::Io(err) => write!(f, "i/o error: {}", err),
            GameError::Parse(err) => write!(f, "parse error: {}", err),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Io(err) => Some(err),
            GameError::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GameError {
    fn from(err: std::io::Error) -> Self {
        GameError::Io(err)
    }
}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        GameError::Parse(err)
    }
}
