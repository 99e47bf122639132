//! Power-ups and the transient effects they trigger.
//!
//! | Kind         | Effect on pickup                                          |
//! |--------------|-----------------------------------------------------------|
//! | `Life`       | +1 life, capped at `max_lives` (no-op at the cap)          |
//! | `TripleShot` | timed buff: each fire press spawns a 3-bullet spread       |
//! | `Invincible` | timed buff: shield for the buff's duration                 |
//! | `SlowMo`     | timed buff: asteroids move at `slowmo_factor` of base speed |
//! | `Laser`      | timed buff: continuous beam along the heading              |
//! | `Bomb`       | immediate [`Shockwave`] centred on the pickup point        |

use crate::config::GameConfig;
use crate::geometry::{distance_to_segment, heading_vec};
use crate::player::{BuffKind, Ship};
use bevy::prelude::*;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerUpKind {
    Life,
    TripleShot,
    Invincible,
    SlowMo,
    Laser,
    Bomb,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 6] = [
        PowerUpKind::Life,
        PowerUpKind::TripleShot,
        PowerUpKind::Invincible,
        PowerUpKind::SlowMo,
        PowerUpKind::Laser,
        PowerUpKind::Bomb,
    ];

    /// The timed buff this kind grants, if any.
    pub fn buff(self) -> Option<BuffKind> {
        match self {
            PowerUpKind::TripleShot => Some(BuffKind::TripleShot),
            PowerUpKind::Invincible => Some(BuffKind::Invincible),
            PowerUpKind::SlowMo => Some(BuffKind::SlowMo),
            PowerUpKind::Laser => Some(BuffKind::Laser),
            PowerUpKind::Life | PowerUpKind::Bomb => None,
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    pub fn color(self) -> Color {
        match self {
            PowerUpKind::Life => Color::srgb_u8(0, 255, 0),
            PowerUpKind::TripleShot => Color::srgb_u8(0, 200, 255),
            PowerUpKind::Invincible => Color::srgb_u8(255, 255, 0),
            PowerUpKind::SlowMo => Color::srgb_u8(180, 100, 255),
            PowerUpKind::Laser => Color::srgb_u8(255, 50, 200),
            PowerUpKind::Bomb => Color::srgb_u8(255, 120, 0),
        }
    }

    /// Single-letter glyph drawn on the disc.
    pub fn glyph(self) -> &'static str {
        match self {
            PowerUpKind::Life => "V",
            PowerUpKind::TripleShot => "T",
            PowerUpKind::Invincible => "S",
            PowerUpKind::SlowMo => "R",
            PowerUpKind::Laser => "L",
            PowerUpKind::Bomb => "B",
        }
    }

    /// Text shown above the ship when picked up.
    pub fn pickup_label(self) -> &'static str {
        match self {
            PowerUpKind::Life => "Life +1",
            PowerUpKind::Bomb => "Bomb",
            other => other.buff().map_or("", BuffKind::label),
        }
    }
}

/// A collectible dropped by a destroyed asteroid.  Never expires on its own.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerUp {
    pub position: Vec2,
    pub kind: PowerUpKind,
    pub spawned_ms: u64,
}

impl PowerUp {
    /// Pickup test: squared distance below `(radius + margin)²`.
    pub fn is_touching(&self, ship_pos: Vec2, config: &GameConfig) -> bool {
        let reach = config.powerup_radius + config.powerup_pickup_margin;
        self.position.distance_squared(ship_pos) < reach * reach
    }
}

/// Upward-drifting label that fades out over its lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatingText {
    pub text: String,
    pub position: Vec2,
    pub color: Color,
    pub spawned_ms: u64,
}

impl FloatingText {
    /// Drift one frame; returns `false` once the lifetime has elapsed.
    pub fn update(&mut self, now_ms: u64, config: &GameConfig) -> bool {
        self.position.y -= config.floating_text_drift;
        now_ms.saturating_sub(self.spawned_ms) < config.floating_text_ms
    }

    /// Linear fade from 1 at spawn to 0 at the end of the lifetime.
    pub fn opacity(&self, now_ms: u64, config: &GameConfig) -> f32 {
        let elapsed = now_ms.saturating_sub(self.spawned_ms) as f32;
        (1.0 - elapsed / config.floating_text_ms as f32).clamp(0.0, 1.0)
    }
}

// ── Bomb ──────────────────────────────────────────────────────────────────────

/// Expanding bomb shockwave.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shockwave {
    pub center: Vec2,
    pub started_ms: u64,
}

impl Shockwave {
    /// Progress in `[0, 1]`.
    pub fn progress(&self, now_ms: u64, config: &GameConfig) -> f32 {
        let elapsed = now_ms.saturating_sub(self.started_ms) as f32;
        (elapsed / config.bomb_duration_ms as f32).min(1.0)
    }

    /// Ease-out radius: `max_radius * progress^0.5`.
    pub fn radius(&self, now_ms: u64, config: &GameConfig) -> f32 {
        config.bomb_max_radius * self.progress(now_ms, config).sqrt()
    }

    /// `true` once the animation has run past its duration.
    pub fn is_finished(&self, now_ms: u64, config: &GameConfig) -> bool {
        now_ms.saturating_sub(self.started_ms) > config.bomb_duration_ms
    }

    pub fn contains(&self, point: Vec2, radius: f32) -> bool {
        self.center.distance_squared(point) < radius * radius
    }
}

// ── Laser ─────────────────────────────────────────────────────────────────────

/// Beam segment emitted from the ship nose while the laser buff is active.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaserBeam {
    pub start: Vec2,
    pub end: Vec2,
    pub width: f32,
}

impl LaserBeam {
    pub fn from_ship(ship: &Ship, config: &GameConfig) -> Self {
        let dir = heading_vec(ship.heading);
        let start = ship.position + dir * config.laser_nose_offset;
        Self {
            start,
            end: start + dir * config.laser_length,
            width: config.laser_width,
        }
    }

    /// Closest-point test against a circle of `radius` at `center`.
    pub fn hits(&self, center: Vec2, radius: f32) -> bool {
        distance_to_segment(center, self.start, self.end) < radius + self.width / 2.0
    }
}
