//! Host-facing game instance
//!
//! Wraps a [`GameState`] with the pieces a presentation layer needs: an input
//! setter, observers for score and game over, read accessors for rendering and
//! an optional fixed-timestep frame driver. The simulation never holds a
//! renderer, an audio player or a score store; hosts subscribe instead.

use glam::Vec2;

use crate::avatar::{AvatarImage, HeadTexture};
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::error::GameError;
use crate::sim::{GameEvent, GamePhase, GameState, Platform, TickInput, tick};
use crate::tuning::Tuning;

type ScoreListener = Box<dyn FnMut(u64)>;
type GameOverListener = Box<dyn FnMut(u64)>;
type EventListener = Box<dyn FnMut(&GameEvent)>;

/// One run of the jumper
pub struct GameSimulation {
    state: GameState,
    avatar: Option<AvatarImage>,
    input: TickInput,
    accumulator: f32,
    score_listeners: Vec<ScoreListener>,
    game_over_listeners: Vec<GameOverListener>,
    event_listeners: Vec<EventListener>,
}

impl GameSimulation {
    /// Start a run with default tuning and a random seed
    pub fn new(
        world_width: f32,
        world_height: f32,
        avatar: Option<AvatarImage>,
    ) -> Result<Self, GameError> {
        Self::with_config(
            world_width,
            world_height,
            avatar,
            rand::random(),
            Tuning::default(),
        )
    }

    /// Start a reproducible run
    pub fn with_config(
        world_width: f32,
        world_height: f32,
        avatar: Option<AvatarImage>,
        seed: u64,
        tuning: Tuning,
    ) -> Result<Self, GameError> {
        let state = GameState::new(world_width, world_height, seed, tuning)?;
        Ok(Self {
            state,
            avatar,
            input: TickInput::default(),
            accumulator: 0.0,
            score_listeners: Vec::new(),
            game_over_listeners: Vec::new(),
            event_listeners: Vec::new(),
        })
    }

    /// Set the horizontal axis applied on following ticks.
    ///
    /// Expected in [-1, 1]; values are used as given.
    pub fn set_horizontal_input(&mut self, value: f32) {
        self.input.horizontal = value;
    }

    pub fn horizontal_input(&self) -> f32 {
        self.input.horizontal
    }

    /// Called with the new score whenever it increases
    pub fn on_score_changed(&mut self, listener: impl FnMut(u64) + 'static) {
        self.score_listeners.push(Box::new(listener));
    }

    /// Called once, with the final score, when the run ends
    pub fn on_game_over(&mut self, listener: impl FnMut(u64) + 'static) {
        self.game_over_listeners.push(Box::new(listener));
    }

    /// Called for every event (bounces included), in emission order
    pub fn on_event(&mut self, listener: impl FnMut(&GameEvent) + 'static) {
        self.event_listeners.push(Box::new(listener));
    }

    /// Advance the run by `dt` seconds and notify listeners
    pub fn step(&mut self, dt: f32) {
        tick(&mut self.state, &self.input, dt);

        for event in &self.state.events {
            for listener in &mut self.event_listeners {
                listener(event);
            }
            match *event {
                GameEvent::ScoreChanged { score } => {
                    for listener in &mut self.score_listeners {
                        listener(score);
                    }
                }
                GameEvent::GameOver { final_score } => {
                    for listener in &mut self.game_over_listeners {
                        listener(final_score);
                    }
                }
                GameEvent::Bounce { .. } => {}
            }
        }
    }

    /// Feed one display frame's worth of wall time; runs fixed `SIM_DT` steps.
    ///
    /// Returns the number of steps taken.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        // NaN and negative frames count as zero
        self.accumulator += frame_dt.max(0.0).min(MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.step(SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        substeps
    }

    /// Events emitted by the most recent step
    pub fn events(&self) -> &[GameEvent] {
        &self.state.events
    }

    pub fn current_score(&self) -> u64 {
        self.state.score
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn max_height(&self) -> f32 {
        self.state.max_height
    }

    pub fn player_position(&self) -> Vec2 {
        self.state.physics.player.pos
    }

    pub fn player_velocity(&self) -> Vec2 {
        self.state.physics.player.vel
    }

    pub fn player_radius(&self) -> f32 {
        self.state.physics.player.radius
    }

    pub fn camera_position(&self) -> Vec2 {
        self.state.camera.pos
    }

    /// Live platforms in spawn order (lowest first)
    pub fn platforms(&self) -> impl ExactSizeIterator<Item = &Platform> + DoubleEndedIterator {
        self.state.physics.platforms()
    }

    pub fn world_size(&self) -> Vec2 {
        self.state.world_size
    }

    pub fn seed(&self) -> u64 {
        self.state.seed
    }

    pub fn tuning(&self) -> &Tuning {
        &self.state.tuning
    }

    /// What to draw for the player's head
    pub fn head_texture(&self) -> HeadTexture<'_> {
        HeadTexture::for_avatar(self.avatar.as_ref())
    }

    /// Full run state (read-only)
    pub fn state(&self) -> &GameState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn new_game(seed: u64) -> GameSimulation {
        GameSimulation::with_config(375.0, 667.0, None, seed, Tuning::default()).unwrap()
    }

    #[test]
    fn test_new_rejects_bad_world() {
        assert!(GameSimulation::new(-375.0, 667.0, None).is_err());
        assert!(GameSimulation::new(375.0, 667.0, None).is_ok());
    }

    #[test]
    fn test_listeners_receive_scores() {
        let mut game = new_game(11);
        let scores = Rc::new(RefCell::new(Vec::new()));
        let sink = scores.clone();
        game.on_score_changed(move |score| sink.borrow_mut().push(score));

        for _ in 0..30 {
            game.step(SIM_DT);
        }

        let scores = scores.borrow();
        assert!(!scores.is_empty());
        assert!(scores.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(*scores.last().unwrap(), game.current_score());
    }

    #[test]
    fn test_event_listener_sees_bounce() {
        let mut game = new_game(2);
        let bounces = Rc::new(RefCell::new(0));
        let sink = bounces.clone();
        game.on_event(move |event| {
            if event.sound_cue().is_some() {
                *sink.borrow_mut() += 1;
            }
        });
        game.step(SIM_DT);
        assert_eq!(*bounces.borrow(), 1);
        assert_eq!(game.events().len(), 1);
    }

    #[test]
    fn test_advance_runs_fixed_substeps() {
        let mut game = new_game(5);
        assert_eq!(game.advance(SIM_DT * 0.5), 0);
        assert_eq!(game.advance(SIM_DT * 0.6), 1);
        assert_eq!(game.state().time_ticks, 1);

        // A long stall is clamped and capped
        let steps = game.advance(10.0);
        assert!(steps <= MAX_SUBSTEPS);
    }

    #[test]
    fn test_advance_ignores_bad_frame_times() {
        let mut game = new_game(5);
        assert_eq!(game.advance(f32::NAN), 0);
        assert_eq!(game.advance(-1.0), 0);
        assert_eq!(game.advance(SIM_DT), 1);
        assert_eq!(game.state().time_ticks, 1);
    }

    #[test]
    fn test_placeholder_head_without_avatar() {
        let game = new_game(1);
        assert!(matches!(
            game.head_texture(),
            HeadTexture::Placeholder { .. }
        ));
    }

    #[test]
    fn test_avatar_does_not_change_simulation() {
        let image = AvatarImage::from_rgba(1, 1, vec![10, 20, 30, 255]).unwrap();
        let mut with = GameSimulation::with_config(375.0, 667.0, Some(image), 77, Tuning::default())
            .unwrap();
        let mut without = new_game(77);
        with.set_horizontal_input(0.5);
        without.set_horizontal_input(0.5);
        for _ in 0..120 {
            with.step(SIM_DT);
            without.step(SIM_DT);
        }
        assert_eq!(with.player_position(), without.player_position());
        assert_eq!(with.current_score(), without.current_score());
        assert!(matches!(with.head_texture(), HeadTexture::Image(_)));
    }
}
