//! Simulation tick
//!
//! Core game loop that advances a run by one step.

use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Horizontal axis in [-1, 1]; the caller is responsible for clamping
    pub horizontal: f32,
}

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();

    // Terminal: nothing moves after game over
    if state.phase == GamePhase::GameOver {
        return;
    }

    state.time_ticks += 1;

    // Horizontal motion is input velocity, not force
    state.horizontal_input = input.horizontal;
    state.physics.player.vel.x = input.horizontal * state.tuning.horizontal_speed;

    state.physics.step(dt);

    // Bounce off platforms only while falling; rising through one is free
    for contact in state.physics.check_contacts() {
        if state.physics.player.is_falling() {
            let velocity = state.bounce_velocity();
            state.physics.player.vel.y = velocity;
            state.events.push(GameEvent::Bounce {
                platform_id: contact.platform_id,
                velocity,
            });
        }
    }

    let player_y = state.physics.player.pos.y;
    state.camera.follow(player_y, state.tuning.camera_smoothing);

    if player_y > state.max_height {
        state.max_height = player_y;
        let score = player_y.floor() as u64;
        if score > state.score {
            state.score = score;
            state.events.push(GameEvent::ScoreChanged { score });
        }
    }

    // At most one spawn per tick; later ticks catch up
    if player_y > state.spawn_line() {
        state.spawn_platform();
    }

    let evicted = state.physics.evict_below(state.eviction_line());
    if evicted > 0 {
        log::debug!(
            "Evicted {} platforms, {} live",
            evicted,
            state.physics.platform_count()
        );
    }

    if player_y < state.game_over_line() {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver {
            final_score: state.score,
        });
        log::info!(
            "Game over after {} ticks: score={}, platforms spawned={}",
            state.time_ticks,
            state.score,
            state.physics.total_spawned()
        );
    }
}
