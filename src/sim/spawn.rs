//! Platform spawn policy
//!
//! Pure functions of progress (`max_height`): platforms shrink and gaps widen
//! the higher the player gets. Randomness comes only from the caller's RNG so
//! runs stay reproducible from their seed.

use rand::Rng;

use crate::tuning::Tuning;

/// Size/spacing rules for new platforms
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPolicy {
    pub base_radius: f32,
    pub min_radius: f32,
    pub radius_decay_factor: f32,
    pub min_gap: f32,
    pub max_gap: f32,
    pub gap_growth_factor: f32,
    pub margin: f32,
}

impl Default for SpawnPolicy {
    fn default() -> Self {
        Self::from_tuning(&Tuning::default())
    }
}

impl SpawnPolicy {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            base_radius: tuning.base_radius,
            min_radius: tuning.min_radius,
            radius_decay_factor: tuning.radius_decay_factor,
            min_gap: tuning.min_gap,
            max_gap: tuning.max_gap,
            gap_growth_factor: tuning.gap_growth_factor,
            margin: tuning.spawn_margin,
        }
    }

    /// Radius of a platform spawned at the given progress
    #[inline]
    pub fn platform_radius(&self, max_height: f32) -> f32 {
        (self.base_radius - max_height / self.radius_decay_factor).max(self.min_radius)
    }

    /// Multiplier applied to the base gap range at the given progress
    #[inline]
    pub fn gap_scale(&self, max_height: f32) -> f32 {
        1.0 + max_height / self.gap_growth_factor
    }

    /// Vertical distance from the topmost platform to the next one
    pub fn next_spacing<R: Rng + ?Sized>(&self, max_height: f32, rng: &mut R) -> f32 {
        rng.random_range(self.min_gap..=self.max_gap) * self.gap_scale(max_height)
    }

    /// Horizontal position for the next platform
    pub fn next_x<R: Rng + ?Sized>(&self, world_width: f32, rng: &mut R) -> f32 {
        let lo = self.margin;
        let hi = world_width - self.margin;
        if hi <= lo {
            return world_width / 2.0;
        }
        rng.random_range(lo..=hi)
    }

    /// Smallest world width that leaves a spawn band between the margins
    pub fn min_world_width(&self) -> f32 {
        self.margin * 2.0
    }
}
