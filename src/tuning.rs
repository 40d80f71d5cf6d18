//! Data-driven game balance
//!
//! Every constant the simulation uses lives here so a run can be re-tuned from
//! a JSON file without recompiling. Missing fields fall back to the defaults.

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Game balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Physics ===
    /// Constant vertical acceleration (negative = downward)
    pub gravity: f32,
    /// Radius of the player's collision circle
    pub player_radius: f32,
    /// Horizontal speed at full input deflection
    pub horizontal_speed: f32,

    // === Bounce ===
    /// Upward speed applied on a falling contact at zero progress
    pub base_bounce: f32,
    /// Progress needed to double the bounce speed
    pub bounce_growth_factor: f32,

    // === Camera / game over ===
    /// Fraction of the player/camera gap closed each tick
    pub camera_smoothing: f32,
    /// Distance below the bottom of the view before the run ends
    pub fall_margin: f32,

    // === Spawning ===
    /// Spawn a new platform once the player is this close to the topmost one
    pub lookahead_margin: f32,
    /// Platforms seeded above the starting platform
    pub initial_platforms: u32,
    /// Platform radius at zero progress
    pub base_radius: f32,
    /// Smallest platform radius
    pub min_radius: f32,
    /// Progress needed to shrink a platform by one unit of radius
    pub radius_decay_factor: f32,
    /// Vertical gap range between consecutive platforms at zero progress
    pub min_gap: f32,
    pub max_gap: f32,
    /// Progress needed to double the gap
    pub gap_growth_factor: f32,
    /// Horizontal distance kept clear from each world edge
    pub spawn_margin: f32,
    /// Platforms further than this below the game-over line are dropped
    pub eviction_margin: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: -980.0,
            player_radius: 20.0,
            horizontal_speed: 400.0,

            base_bounce: 600.0,
            bounce_growth_factor: 1000.0,

            camera_smoothing: 0.1,
            fall_margin: 100.0,

            lookahead_margin: 300.0,
            initial_platforms: 10,
            base_radius: 50.0,
            min_radius: 20.0,
            radius_decay_factor: 2000.0,
            min_gap: 120.0,
            max_gap: 150.0,
            gap_growth_factor: 1000.0,
            spawn_margin: 80.0,
            eviction_margin: 1200.0,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON (partial documents are filled with defaults)
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, GameError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Check every field is in a range the simulation can run with
    pub fn validate(&self) -> Result<(), GameError> {
        let positive = [
            ("player_radius", self.player_radius),
            ("horizontal_speed", self.horizontal_speed),
            ("base_bounce", self.base_bounce),
            ("bounce_growth_factor", self.bounce_growth_factor),
            ("base_radius", self.base_radius),
            ("min_radius", self.min_radius),
            ("radius_decay_factor", self.radius_decay_factor),
            ("min_gap", self.min_gap),
            ("max_gap", self.max_gap),
            ("gap_growth_factor", self.gap_growth_factor),
            ("lookahead_margin", self.lookahead_margin),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(name, value, "must be finite and positive"));
            }
        }

        let non_negative = [
            ("fall_margin", self.fall_margin),
            ("spawn_margin", self.spawn_margin),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(name, value, "must be finite and non-negative"));
            }
        }

        if !self.gravity.is_finite() || self.gravity >= 0.0 {
            return Err(invalid("gravity", self.gravity, "must point downward"));
        }
        if !(self.camera_smoothing > 0.0 && self.camera_smoothing <= 1.0) {
            return Err(invalid(
                "camera_smoothing",
                self.camera_smoothing,
                "must be in (0, 1]",
            ));
        }
        if self.min_radius > self.base_radius {
            return Err(invalid(
                "min_radius",
                self.min_radius,
                "must not exceed base_radius",
            ));
        }
        if self.min_gap > self.max_gap {
            return Err(invalid("min_gap", self.min_gap, "must not exceed max_gap"));
        }
        if !self.eviction_margin.is_finite() || self.eviction_margin < 0.0 {
            return Err(invalid(
                "eviction_margin",
                self.eviction_margin,
                "must be non-negative",
            ));
        }
        Ok(())
    }
}

fn invalid(name: &'static str, value: f32, reason: &'static str) -> GameError {
    GameError::InvalidTuning {
        name,
        value,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "base_bounce": 700.0 }"#).unwrap();
        assert_eq!(tuning.base_bounce, 700.0);
        assert_eq!(tuning.min_gap, 120.0);
        assert_eq!(tuning.initial_platforms, 10);
    }

    #[test]
    fn test_upward_gravity_rejected() {
        let err = Tuning::from_json(r#"{ "gravity": 9.8 }"#).unwrap_err();
        assert!(matches!(
            err,
            GameError::InvalidTuning {
                name: "gravity",
                ..
            }
        ));
    }

    #[test]
    fn test_inverted_gap_range_rejected() {
        let tuning = Tuning {
            min_gap: 200.0,
            max_gap: 150.0,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_negative_eviction_margin_rejected() {
        let tuning = Tuning {
            eviction_margin: -1.0,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(GameError::Parse(_))
        ));
    }
}
