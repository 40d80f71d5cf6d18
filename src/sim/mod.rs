//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Platforms kept in spawn (= height) order
//! - No rendering, audio or persistence dependencies

pub mod collision;
pub mod physics;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, circle_circle_collision};
pub use physics::{Contact, PhysicsWorld};
pub use spawn::SpawnPolicy;
pub use state::{Body, Camera, GameEvent, GamePhase, GameState, Platform};
pub use tick::{TickInput, tick};
