//! Minimal 2D physics: one dynamic circle against many static circles
//!
//! Platforms are kept in spawn order, which is also ascending height, so
//! contact queries binary-search the window instead of scanning every
//! platform. Old platforms are evicted from the front.

use std::collections::VecDeque;

use glam::Vec2;

use super::collision::{CollisionResult, circle_circle_collision, vertical_extent};
use super::state::{Body, Platform};

/// An overlap between the player and a platform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub platform_id: u64,
    pub collision: CollisionResult,
}

#[derive(Debug, Clone)]
pub struct PhysicsWorld {
    /// Vertical acceleration (negative = down)
    gravity: f32,
    pub player: Body,
    /// Live platforms, ascending y
    platforms: VecDeque<Platform>,
    next_platform_id: u64,
    /// Height of the most recently spawned platform (survives eviction)
    top_y: f32,
    /// Largest radius ever added; bounds the contact search window
    max_platform_radius: f32,
}

impl PhysicsWorld {
    pub fn new(player: Body) -> Self {
        Self {
            gravity: 0.0,
            top_y: player.pos.y,
            player,
            platforms: VecDeque::new(),
            next_platform_id: 0,
            max_platform_radius: 0.0,
        }
    }

    pub fn set_gravity(&mut self, gravity: f32) {
        self.gravity = gravity;
    }

    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    /// Integrate the player (semi-implicit Euler)
    pub fn step(&mut self, dt: f32) {
        self.player.vel.y += self.gravity * dt;
        self.player.pos += self.player.vel * dt;
    }

    /// Add a static platform above every existing one; returns its id
    pub fn add_platform(&mut self, pos: Vec2, radius: f32) -> u64 {
        debug_assert!(
            self.platforms.back().is_none_or(|p| p.pos.y <= pos.y),
            "platforms must be added in ascending height"
        );
        let id = self.next_platform_id;
        self.next_platform_id += 1;
        self.platforms.push_back(Platform { id, pos, radius });
        self.top_y = pos.y;
        self.max_platform_radius = self.max_platform_radius.max(radius);
        id
    }

    /// Platforms currently overlapping the player, lowest first
    pub fn check_contacts(&self) -> Vec<Contact> {
        let (lo, hi) = vertical_extent(
            self.player.pos.y,
            self.player.radius + self.max_platform_radius,
        );

        let start = self.platforms.partition_point(|p| p.pos.y < lo);
        self.platforms
            .range(start..)
            .take_while(|p| p.pos.y <= hi)
            .filter_map(|p| {
                let collision =
                    circle_circle_collision(self.player.pos, self.player.radius, p.pos, p.radius);
                collision.hit.then_some(Contact {
                    platform_id: p.id,
                    collision,
                })
            })
            .collect()
    }

    /// Drop platforms whose centre is below `y`; returns how many were dropped
    pub fn evict_below(&mut self, y: f32) -> usize {
        let count = self.platforms.partition_point(|p| p.pos.y < y);
        self.platforms.drain(..count);
        count
    }

    pub fn platforms(&self) -> impl ExactSizeIterator<Item = &Platform> + DoubleEndedIterator {
        self.platforms.iter()
    }

    pub fn platform_count(&self) -> usize {
        self.platforms.len()
    }

    /// Platforms ever spawned, including evicted ones
    pub fn total_spawned(&self) -> u64 {
        self.next_platform_id
    }

    pub fn top_y(&self) -> f32 {
        self.top_y
    }
}
