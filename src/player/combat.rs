//! Bullets and the collision tests the world step resolves each frame.
//!
//! The functions here only *detect*: they return the ids that should be
//! removed and leave scoring, splitting, and effects to
//! [`crate::world::World::step`], which applies removals once per category.

use super::state::{BuffKind, Ship};
use crate::arena::{Arena, EntityId};
use crate::asteroid::Asteroid;
use crate::config::GameConfig;
use crate::geometry::{heading_vec, wrap_position};
use bevy::prelude::*;
use std::collections::HashSet;

/// A fired round.
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub position: Vec2,
    /// Units per frame; never scaled by slow-mo.
    pub velocity: Vec2,
    /// Frames remaining.
    pub life: i32,
}

impl Bullet {
    /// Move and wrap, then count down one frame of life.
    pub fn advance(&mut self, config: &GameConfig) {
        self.position = wrap_position(
            self.position + self.velocity,
            config.field_width,
            config.field_height,
        );
        self.life -= 1;
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        self.life <= 0
    }
}

/// Bullets produced by one fire press: one along the heading, or three at the
/// configured spread under the triple-shot buff.
pub fn fire_bullets(ship: &Ship, config: &GameConfig) -> Vec<Bullet> {
    let offsets: &[f32] = if ship.has_buff(BuffKind::TripleShot) {
        &config.triple_shot_spread
    } else {
        &[0.0]
    };
    offsets
        .iter()
        .map(|offset| Bullet {
            position: ship.position,
            velocity: heading_vec(ship.heading + offset) * config.bullet_speed,
            life: config.bullet_lifetime,
        })
        .collect()
}

/// Pair each bullet with at most one asteroid it hits.
///
/// Bullets are scanned in firing order and asteroids in spawn order; an
/// asteroid claimed by an earlier bullet is not available to later ones.
pub fn find_bullet_hits(
    bullets: &Arena<Bullet>,
    asteroids: &Arena<Asteroid>,
    config: &GameConfig,
) -> Vec<(EntityId, EntityId)> {
    let threshold_sq = config.bullet_hit_radius * config.bullet_hit_radius;
    let mut claimed: HashSet<EntityId> = HashSet::new();
    let mut hits = Vec::new();

    for (bullet_id, bullet) in bullets.iter() {
        let target = asteroids.iter().find(|(asteroid_id, asteroid)| {
            !claimed.contains(asteroid_id)
                && bullet.position.distance_squared(asteroid.position) < threshold_sq
        });
        if let Some((asteroid_id, _)) = target {
            claimed.insert(asteroid_id);
            hits.push((bullet_id, asteroid_id));
        }
    }
    hits
}

/// Asteroids whose centre lies within `radius + ship_hit_radius` of the ship.
pub fn find_ship_overlaps(
    ship: &Ship,
    asteroids: &Arena<Asteroid>,
    config: &GameConfig,
) -> Vec<EntityId> {
    asteroids
        .iter()
        .filter(|(_, asteroid)| {
            ship.position.distance(asteroid.position) < asteroid.radius + config.ship_hit_radius
        })
        .map(|(id, _)| id)
        .collect()
}

// ── Unit tests ────────────────────────────────────────────────────────────────
