//! Invariants that must hold for any seed and any input sequence.

use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use planet_jumper::Tuning;
use planet_jumper::consts::SIM_DT;
use planet_jumper::sim::{
    GameEvent, GamePhase, GameState, Platform, SpawnPolicy, TickInput, tick,
};

fn new_state(seed: u64) -> GameState {
    GameState::new(375.0, 667.0, seed, Tuning::default()).unwrap()
}

proptest! {
    #[test]
    fn radius_shrinks_with_progress(a in 0.0f32..1.0e6, b in 0.0f32..1.0e6) {
        let policy = SpawnPolicy::default();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(policy.platform_radius(hi) <= policy.platform_radius(lo));
        prop_assert!(policy.platform_radius(hi) >= policy.min_radius);
        prop_assert!(policy.platform_radius(lo) <= policy.base_radius);
    }

    #[test]
    fn spacing_within_scaled_gap(height in 0.0f32..50_000.0, seed in any::<u64>()) {
        let policy = SpawnPolicy::default();
        let mut rng = Pcg32::seed_from_u64(seed);
        let scale = policy.gap_scale(height);
        let gap = policy.next_spacing(height, &mut rng);
        let tol = 1e-3 * scale;
        prop_assert!(gap >= policy.min_gap * scale - tol);
        prop_assert!(gap <= policy.max_gap * scale + tol);
    }

    #[test]
    fn run_invariants_hold(
        seed in any::<u64>(),
        inputs in prop::collection::vec(prop_oneof![Just(-1.0f32), Just(0.0f32), Just(1.0f32)], 1..400),
    ) {
        let mut state = new_state(seed);
        let mut last_score = 0;
        let mut game_overs = 0;

        for horizontal in inputs {
            let was_over = state.phase == GamePhase::GameOver;
            let before_player = state.physics.player;
            let before_top = state.physics.top_y();
            let before_spawned = state.physics.total_spawned();
            let before_count = state.physics.platform_count();
            let before_platforms: Vec<Platform> = state.physics.platforms().copied().collect();
            let expected_vy = before_player.vel.y + state.tuning.gravity * SIM_DT;

            tick(&mut state, &TickInput { horizontal }, SIM_DT);

            if was_over {
                prop_assert_eq!(state.physics.player, before_player);
                prop_assert_eq!(state.score, last_score);
                prop_assert_eq!(state.physics.platform_count(), before_count);
                prop_assert!(state.events.is_empty());
                continue;
            }

            // Score follows best height and never drops
            prop_assert_eq!(state.score, state.max_height.floor() as u64);
            prop_assert!(state.score >= last_score);
            last_score = state.score;

            // Bounces happen exactly on falling contacts
            let bounced = state.events.iter().any(|e| matches!(e, GameEvent::Bounce { .. }));
            if bounced {
                prop_assert!(expected_vy < 0.0);
                prop_assert_eq!(state.physics.player.vel.y, state.bounce_velocity());
            } else {
                prop_assert_eq!(state.physics.player.vel.y, expected_vy);
            }

            // At most one spawn per tick, spaced for current progress
            let spawned = state.physics.total_spawned() - before_spawned;
            prop_assert!(spawned <= 1);
            if spawned == 1 {
                let policy = state.policy;
                let scale = policy.gap_scale(state.max_height);
                let gap = state.physics.top_y() - before_top;
                prop_assert!(gap >= policy.min_gap * scale - 0.05);
                prop_assert!(gap <= policy.max_gap * scale + 0.05);
            }

            // One spawn always outpaces one tick of climbing, so the buffer
            // never falls behind
            prop_assert!(state.physics.player.pos.y <= state.spawn_line());

            // Only platforms deeper than a full fall from the best height are evicted
            let first_live = state.physics.platforms().next().map_or(u64::MAX, |p| p.id);
            let deepest_reach = state.max_height - state.fall_depth;
            for evicted in before_platforms.iter().filter(|p| p.id < first_live) {
                prop_assert!(evicted.pos.y < deepest_reach);
            }

            game_overs += state
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::GameOver { .. }))
                .count();
        }

        prop_assert!(game_overs <= 1);
        prop_assert_eq!(game_overs == 1, state.phase == GamePhase::GameOver);
    }
}
