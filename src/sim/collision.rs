//! Collision detection between circles
//!
//! The player and every platform are circles, so a single overlap test covers
//! all contacts. Response (the bounce) is decided by the tick, not here.

use glam::Vec2;

/// Result of a collision check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Contact point on the surface of `b` (if hit)
    pub point: Vec2,
    /// Unit normal pointing from `b` toward `a`
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check overlap between circle `a` and circle `b`
///
/// Touching circles (distance == sum of radii) don't count as overlapping.
pub fn circle_circle_collision(
    a_pos: Vec2,
    a_radius: f32,
    b_pos: Vec2,
    b_radius: f32,
) -> CollisionResult {
    let delta = a_pos - b_pos;
    let reach = a_radius + b_radius;
    let dist_sq = delta.length_squared();

    if dist_sq >= reach * reach {
        return CollisionResult::miss();
    }

    let dist = dist_sq.sqrt();
    // Concentric circles have no defined normal; push straight up
    let normal = if dist > f32::EPSILON {
        delta / dist
    } else {
        Vec2::Y
    };

    CollisionResult {
        hit: true,
        point: b_pos + normal * b_radius,
        normal,
        penetration: reach - dist,
    }
}

/// Vertical extent `[bottom, top]` a circle of `radius` at `y` covers
#[inline]
pub fn vertical_extent(y: f32, radius: f32) -> (f32, f32) {
    (y - radius, y + radius)
}
