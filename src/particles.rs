//! Particle effects: explosion bursts, bullet trails, and thrust exhaust.
//!
//! ## Design
//!
//! Particles are purely cosmetic.  They live in a [`ParticlePool`], a bounded
//! ring buffer: pushing into a full pool evicts the oldest particle first, so
//! the pool length never exceeds its capacity no matter how many bursts land
//! in one frame.
//!
//! | Helper                 | Emitted by                          |
//! |------------------------|-------------------------------------|
//! | [`spawn_explosion`]    | asteroid kills, ship hits, bomb, laser |
//! | [`spawn_bullet_trail`] | every live bullet, every frame      |
//! | [`spawn_exhaust`]      | ship while a thrust key is held     |
//!
//! Lifetimes are counted in frames; the renderer fades size by
//! [`Particle::life_fraction`].

use crate::config::GameConfig;
use crate::geometry::heading_vec;
use bevy::prelude::*;
use rand::Rng;
use std::collections::VecDeque;

/// Short-lived visual particle.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    /// Units per frame.
    pub velocity: Vec2,
    /// Frames remaining.
    pub life: i32,
    /// Lifetime at spawn, for fading.
    pub max_life: i32,
    pub size: f32,
    /// Fixed colour; `None` uses the renderer's lifetime gradient.
    pub color: Option<Color>,
    /// Emitted by a lost life; drawn in a forced red.
    pub life_loss: bool,
}

impl Particle {
    /// Remaining life in `[0, 1]`.
    #[inline]
    pub fn life_fraction(&self) -> f32 {
        if self.max_life <= 0 {
            0.0
        } else {
            (self.life as f32 / self.max_life as f32).clamp(0.0, 1.0)
        }
    }
}

/// Bounded FIFO of particles.
#[derive(Debug, Clone)]
pub struct ParticlePool {
    particles: VecDeque<Particle>,
    capacity: usize,
}

impl ParticlePool {
    pub fn new(capacity: usize) -> Self {
        Self {
            particles: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Insert, evicting the oldest particle when full.
    pub fn push(&mut self, particle: Particle) {
        if self.capacity == 0 {
            return;
        }
        while self.particles.len() >= self.capacity {
            self.particles.pop_front();
        }
        self.particles.push_back(particle);
    }

    /// Move every particle, decrement its life, and drop expired ones.
    pub fn age(&mut self) {
        for p in self.particles.iter_mut() {
            p.position += p.velocity;
            p.life -= 1;
        }
        self.particles.retain(|p| p.life > 0);
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }
}

impl Extend<Particle> for ParticlePool {
    fn extend<I: IntoIterator<Item = Particle>>(&mut self, iter: I) {
        for p in iter {
            self.push(p);
        }
    }
}

// ── Spawn helpers ─────────────────────────────────────────────────────────────

/// Spawn one explosion burst at `pos`: particles scattered ±20 units with
/// velocities in ±5 per axis.
pub fn spawn_explosion<R: Rng + ?Sized>(
    pool: &mut ParticlePool,
    pos: Vec2,
    color: Color,
    life_loss: bool,
    config: &GameConfig,
    rng: &mut R,
) {
    for _ in 0..config.explosion_particles {
        pool.push(Particle {
            position: pos + Vec2::new(rng.gen_range(-20.0..=20.0), rng.gen_range(-20.0..=20.0)),
            velocity: Vec2::new(rng.gen_range(-5.0..=5.0), rng.gen_range(-5.0..=5.0)),
            life: config.particle_lifetime,
            max_life: config.particle_lifetime,
            size: rng.gen_range(3..=6) as f32,
            color: Some(color),
            life_loss,
        });
    }
}

/// Spawn green trail sparks behind a bullet.
///
/// Each spark inherits 30 % of the bullet velocity plus ±0.5 jitter.
pub fn spawn_bullet_trail<R: Rng + ?Sized>(
    pool: &mut ParticlePool,
    pos: Vec2,
    bullet_vel: Vec2,
    config: &GameConfig,
    rng: &mut R,
) {
    for _ in 0..config.trail_particles {
        let green = Color::srgb_u8(rng.gen_range(0..=50), 255, rng.gen_range(0..=50));
        pool.push(Particle {
            position: pos + Vec2::new(rng.gen_range(-2.0..=2.0), rng.gen_range(-2.0..=2.0)),
            velocity: bullet_vel * 0.3
                + Vec2::new(rng.gen_range(-0.5..=0.5), rng.gen_range(-0.5..=0.5)),
            life: config.trail_lifetime,
            max_life: config.trail_lifetime,
            size: 3.0,
            color: Some(green),
            life_loss: false,
        });
    }
}

/// Spawn exhaust 25 units behind the ship, spraying opposite the heading
/// within ±0.3 rad.
pub fn spawn_exhaust<R: Rng + ?Sized>(
    pool: &mut ParticlePool,
    ship_pos: Vec2,
    heading: f32,
    config: &GameConfig,
    rng: &mut R,
) {
    let tail = ship_pos - heading_vec(heading) * 25.0;
    for _ in 0..config.exhaust_particles {
        let angle = heading + std::f32::consts::PI + rng.gen_range(-0.3..=0.3);
        let speed = rng.gen_range(1.0..=3.0);
        pool.push(Particle {
            position: tail,
            velocity: heading_vec(angle) * speed,
            life: config.particle_lifetime,
            max_life: config.particle_lifetime,
            size: rng.gen_range(2..=(config.particle_max_size as i32).max(2)) as f32,
            color: None,
            life_loss: false,
        });
    }
}
