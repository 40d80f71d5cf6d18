//! Game state and core simulation types
//!
//! Everything a run mutates lives in [`GameState`]; the tick in `tick.rs` is
//! the only code that advances it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::physics::PhysicsWorld;
use super::spawn::SpawnPolicy;
use crate::consts::SIM_DT;
use crate::error::GameError;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Run ended (terminal)
    GameOver,
}

/// A circular dynamic body (the player)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Body {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
        }
    }

    /// Is the body moving downward?
    #[inline]
    pub fn is_falling(&self) -> bool {
        self.vel.y < 0.0
    }
}

/// A static circular platform ("planet")
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Platform {
    /// Spawn order, unique for the run
    pub id: u64,
    pub pos: Vec2,
    pub radius: f32,
}

/// Vertical-only follow camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub pos: Vec2,
}

impl Camera {
    /// Ease toward `target_y`; x never moves
    #[inline]
    pub fn follow(&mut self, target_y: f32, smoothing: f32) {
        self.pos.y += (target_y - self.pos.y) * smoothing;
    }
}

/// Things that happened during a tick, in the order they happened
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Player bounced off a platform while falling
    Bounce { platform_id: u64, velocity: f32 },
    /// Score increased
    ScoreChanged { score: u64 },
    /// Player fell out of view; emitted once per run
    GameOver { final_score: u64 },
}

impl GameEvent {
    /// Sound file the presentation layer should play for this event
    pub fn sound_cue(&self) -> Option<&'static str> {
        match self {
            GameEvent::Bounce { .. } => Some("jump.wav"),
            _ => None,
        }
    }
}

/// Complete run state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub tuning: Tuning,
    pub policy: SpawnPolicy,
    /// World width and height
    pub world_size: Vec2,
    pub physics: PhysicsWorld,
    pub camera: Camera,
    pub phase: GamePhase,
    pub score: u64,
    /// Progress: the highest player y seen this run
    pub max_height: f32,
    /// Last horizontal input applied, in [-1, 1]
    pub horizontal_input: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events emitted by the most recent tick
    pub events: Vec<GameEvent>,
    /// How far a player falling from rest drops before the run ends
    pub fall_depth: f32,
}

impl GameState {
    /// Build a run and seed its lookahead buffer.
    ///
    /// The player starts at height 0, horizontally centred, resting on the
    /// first platform.
    pub fn new(
        world_width: f32,
        world_height: f32,
        seed: u64,
        tuning: Tuning,
    ) -> Result<Self, GameError> {
        if !(world_width.is_finite() && world_height.is_finite())
            || world_width <= 0.0
            || world_height <= 0.0
        {
            return Err(GameError::InvalidWorldSize {
                width: world_width,
                height: world_height,
            });
        }
        tuning.validate()?;

        let policy = SpawnPolicy::from_tuning(&tuning);
        if world_width <= policy.min_world_width() {
            return Err(GameError::WorldTooNarrow {
                width: world_width,
                required: policy.min_world_width(),
            });
        }

        let center_x = world_width / 2.0;
        let player = Body::new(Vec2::new(center_x, 0.0), tuning.player_radius);
        let mut physics = PhysicsWorld::new(player);
        physics.set_gravity(tuning.gravity);

        // Starting platform directly beneath the player
        let first_radius = policy.platform_radius(0.0);
        physics.add_platform(
            Vec2::new(center_x, -(first_radius + tuning.player_radius)),
            first_radius,
        );

        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            policy,
            world_size: Vec2::new(world_width, world_height),
            physics,
            camera: Camera {
                pos: Vec2::new(center_x, 0.0),
            },
            phase: GamePhase::Running,
            score: 0,
            max_height: 0.0,
            horizontal_input: 0.0,
            time_ticks: 0,
            events: Vec::new(),
            fall_depth: fall_depth(&tuning, world_height),
            tuning,
        };

        for _ in 0..state.tuning.initial_platforms {
            state.spawn_platform();
        }

        log::info!(
            "New run: seed={}, world={}x{}, platforms={}",
            seed,
            world_width,
            world_height,
            state.physics.platform_count()
        );

        Ok(state)
    }

    /// Append one platform above the current topmost, sized for current progress
    pub fn spawn_platform(&mut self) -> u64 {
        let spacing = self.policy.next_spacing(self.max_height, &mut self.rng);
        let x = self.policy.next_x(self.world_size.x, &mut self.rng);
        let y = self.physics.top_y() + spacing;
        let radius = self.policy.platform_radius(self.max_height);
        let id = self.physics.add_platform(Vec2::new(x, y), radius);
        log::debug!("Spawned platform {} at ({:.1}, {:.1}) r={:.1}", id, x, y, radius);
        id
    }

    /// Upward speed a falling contact receives at current progress
    #[inline]
    pub fn bounce_velocity(&self) -> f32 {
        self.tuning.base_bounce * (1.0 + self.max_height / self.tuning.bounce_growth_factor)
    }

    /// Player y below which the run ends
    #[inline]
    pub fn game_over_line(&self) -> f32 {
        self.camera.pos.y - self.world_size.y / 2.0 - self.tuning.fall_margin
    }

    /// Player y above which a new platform is spawned
    #[inline]
    pub fn spawn_line(&self) -> f32 {
        self.physics.top_y() - self.tuning.lookahead_margin
    }

    /// Platforms centred below this are dropped.
    ///
    /// A player who misses stays in play for [`fall_depth`](Self::fall_depth)
    /// below the best height, so the cutoff sits `eviction_margin` under that.
    /// Never above the highest platform under the player, so late-game gaps
    /// wider than the margin can't evict the next landing spot.
    pub fn eviction_line(&self) -> f32 {
        let line = self.max_height - self.fall_depth - self.tuning.eviction_margin;
        let player_y = self.physics.player.pos.y;
        self.physics
            .platforms()
            .rev()
            .map(|p| p.pos.y)
            .find(|&y| y <= player_y)
            .map_or(line, |floor| line.min(floor))
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}

/// Distance a player dropped from rest at the camera falls before crossing
/// the game-over line. Infinite if the camera keeps up forever.
fn fall_depth(tuning: &Tuning, world_height: f32) -> f32 {
    let limit = world_height / 2.0 + tuning.fall_margin;
    let (mut y, mut vy, mut camera) = (0.0f32, 0.0f32, 0.0f32);
    for _ in 0..MAX_FALL_TICKS {
        vy += tuning.gravity * SIM_DT;
        y += vy * SIM_DT;
        camera += (y - camera) * tuning.camera_smoothing;
        if y < camera - limit {
            return -y;
        }
    }
    f32::INFINITY
}

/// One minute of free fall
const MAX_FALL_TICKS: u32 = 60 * 60;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_seeds_lookahead() {
        let state = GameState::new(375.0, 667.0, 1, Tuning::default()).unwrap();
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.physics.platform_count(), 11);
        assert!(state.physics.top_y() >= state.physics.player.pos.y - 300.0);

        // Starting platform sits just under the player, touching but not overlapping
        let first = state.physics.platforms().next().unwrap();
        assert_eq!(first.id, 0);
        assert_eq!(first.pos.x, state.physics.player.pos.x);
        let gap = state.physics.player.pos.y - first.pos.y;
        assert!((gap - (first.radius + state.tuning.player_radius)).abs() < 1e-4);
    }

    #[test]
    fn test_initial_platforms_ascend() {
        let state = GameState::new(375.0, 667.0, 5, Tuning::default()).unwrap();
        let ys: Vec<f32> = state.physics.platforms().map(|p| p.pos.y).collect();
        for pair in ys.windows(2) {
            let gap = pair[1] - pair[0];
            assert!((120.0..=150.0).contains(&gap), "gap {}", gap);
        }
    }

    #[test]
    fn test_rejects_bad_world() {
        assert!(matches!(
            GameState::new(0.0, 667.0, 1, Tuning::default()),
            Err(GameError::InvalidWorldSize { .. })
        ));
        assert!(matches!(
            GameState::new(375.0, -1.0, 1, Tuning::default()),
            Err(GameError::InvalidWorldSize { .. })
        ));
        assert!(matches!(
            GameState::new(f32::NAN, 667.0, 1, Tuning::default()),
            Err(GameError::InvalidWorldSize { .. })
        ));
        assert!(matches!(
            GameState::new(150.0, 667.0, 1, Tuning::default()),
            Err(GameError::WorldTooNarrow { .. })
        ));
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = GameState::new(375.0, 667.0, 99, Tuning::default()).unwrap();
        let b = GameState::new(375.0, 667.0, 99, Tuning::default()).unwrap();
        let pa: Vec<Platform> = a.physics.platforms().copied().collect();
        let pb: Vec<Platform> = b.physics.platforms().copied().collect();
        assert_eq!(pa, pb);
    }

    #[test]
    fn test_bounce_scales_with_progress() {
        let mut state = GameState::new(375.0, 667.0, 1, Tuning::default()).unwrap();
        assert_eq!(state.bounce_velocity(), 600.0);
        state.max_height = 1000.0;
        assert_eq!(state.bounce_velocity(), 1200.0);
    }

    #[test]
    fn test_fall_depth_matches_camera_lag() {
        let state = GameState::new(375.0, 667.0, 1, Tuning::default()).unwrap();
        // ~3 s of free fall before the camera lags a half screen + margin
        assert!(state.fall_depth > 4_500.0 && state.fall_depth < 5_000.0);
        assert_eq!(
            state.eviction_line(),
            -state.fall_depth - state.tuning.eviction_margin
        );
    }

    #[test]
    fn test_eviction_line_ignores_camera() {
        let mut state = GameState::new(375.0, 667.0, 1, Tuning::default()).unwrap();
        let before = state.eviction_line();
        state.camera.pos.y = -3000.0;
        assert_eq!(state.eviction_line(), before);

        state.max_height = 2_000.0;
        assert_eq!(
            state.eviction_line(),
            2_000.0 - state.fall_depth - state.tuning.eviction_margin
        );
    }

    #[test]
    fn test_eviction_line_keeps_floor() {
        let mut state = GameState::new(375.0, 667.0, 1, Tuning::default()).unwrap();

        // Player far above every platform: the topmost one stays
        let high = state.physics.top_y() + 20_000.0;
        state.physics.player.pos.y = high;
        state.max_height = high;
        assert_eq!(state.eviction_line(), state.physics.top_y());
    }

    #[test]
    fn test_rigid_camera_never_evicts() {
        let tuning = Tuning {
            camera_smoothing: 1.0,
            ..Default::default()
        };
        let mut state = GameState::new(375.0, 667.0, 1, tuning).unwrap();
        assert_eq!(state.fall_depth, f32::INFINITY);
        state.max_height = 1.0e6;
        assert_eq!(state.physics.evict_below(state.eviction_line()), 0);
    }

    #[test]
    fn test_bounce_sound_cue() {
        let bounce = GameEvent::Bounce {
            platform_id: 3,
            velocity: 600.0,
        };
        assert_eq!(bounce.sound_cue(), Some("jump.wav"));
        assert_eq!(GameEvent::ScoreChanged { score: 1 }.sound_cue(), None);
    }
}
