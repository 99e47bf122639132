//! Ship state and the per-frame input intent.
//!
//! Systems and helpers that mutate this state are in the sibling modules:
//! - [`super::control`]: input integration
//! - [`super::combat`]: bullets and collision tests
//! - [`super::rendering`]: gizmo drawing

use crate::config::GameConfig;
use bevy::prelude::*;
use std::collections::HashMap;

// ── Buffs ─────────────────────────────────────────────────────────────────────

/// Timed ship modifiers granted by power-ups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BuffKind {
    TripleShot,
    Invincible,
    SlowMo,
    Laser,
}

impl BuffKind {
    pub const ALL: [BuffKind; 4] = [
        BuffKind::TripleShot,
        BuffKind::Invincible,
        BuffKind::SlowMo,
        BuffKind::Laser,
    ];

    pub fn duration_ms(self, config: &GameConfig) -> u64 {
        match self {
            BuffKind::TripleShot => config.triple_shot_ms,
            BuffKind::Invincible => config.invincible_ms,
            BuffKind::SlowMo => config.slowmo_ms,
            BuffKind::Laser => config.laser_ms,
        }
    }

    /// HUD / pickup label.
    pub fn label(self) -> &'static str {
        match self {
            BuffKind::TripleShot => "Triple shot",
            BuffKind::Invincible => "Shield",
            BuffKind::SlowMo => "Slow-mo",
            BuffKind::Laser => "Laser",
        }
    }
}

// ── Ship ──────────────────────────────────────────────────────────────────────

/// The player ship.  Every field is declared up front; buffs live in a map
/// keyed by [`BuffKind`] whose presence is the "buff active" flag.
#[derive(Debug, Clone, PartialEq)]
pub struct Ship {
    pub position: Vec2,
    /// Heading in radians; 0 points along +x, positive turns toward +y.
    pub heading: f32,
    /// Units per frame.
    pub velocity: Vec2,
    pub lives: u32,
    pub score: u32,
    pub shield_active: bool,
    pub shield_end_ms: u64,
    /// Time of the last life lost; `None` until the first hit.
    pub last_hit_ms: Option<u64>,
    /// Active buffs and their expiry timestamps.
    pub buffs: HashMap<BuffKind, u64>,
}

impl Ship {
    /// A fresh ship at the field centre with the start-up shield active.
    pub fn new(config: &GameConfig, now_ms: u64) -> Self {
        let mut ship = Self {
            position: Vec2::new(config.field_width / 2.0, config.field_height / 2.0),
            heading: 0.0,
            velocity: Vec2::ZERO,
            lives: config.starting_lives,
            score: 0,
            shield_active: false,
            shield_end_ms: 0,
            last_hit_ms: None,
            buffs: HashMap::new(),
        };
        ship.activate_buff(BuffKind::Invincible, now_ms, config);
        ship
    }

    #[inline]
    pub fn has_buff(&self, kind: BuffKind) -> bool {
        self.buffs.contains_key(&kind)
    }

    /// Start or extend `kind` to `now + duration`.  The invincibility buff
    /// also raises the shield for the same window.
    pub fn activate_buff(&mut self, kind: BuffKind, now_ms: u64, config: &GameConfig) {
        let expiry = now_ms + kind.duration_ms(config);
        self.buffs.insert(kind, expiry);
        if kind == BuffKind::Invincible {
            self.raise_shield(now_ms, kind.duration_ms(config));
        }
    }

    /// Drop buffs whose expiry is strictly in the past; returns the kinds removed.
    pub fn expire_buffs(&mut self, now_ms: u64) -> Vec<BuffKind> {
        let mut expired: Vec<BuffKind> = self
            .buffs
            .iter()
            .filter(|&(_, &end)| now_ms > end)
            .map(|(&kind, _)| kind)
            .collect();
        expired.sort();
        for kind in &expired {
            self.buffs.remove(kind);
        }
        expired
    }

    pub fn raise_shield(&mut self, now_ms: u64, duration_ms: u64) {
        self.shield_active = true;
        self.shield_end_ms = now_ms + duration_ms;
    }

    /// Clear the shield once its window has passed.
    pub fn expire_shield(&mut self, now_ms: u64) {
        if self.shield_active && now_ms > self.shield_end_ms {
            self.shield_active = false;
        }
    }

    /// `true` while asteroid contact must not cost a life.
    pub fn is_invulnerable(&self, now_ms: u64, config: &GameConfig) -> bool {
        self.shield_active
            || self
                .last_hit_ms
                .is_some_and(|hit| now_ms.saturating_sub(hit) < config.invulnerability_ms)
    }

    /// Add a life unless already at the cap.  Returns whether a life was added.
    pub fn add_life(&mut self, config: &GameConfig) -> bool {
        if self.lives < config.max_lives {
            self.lives += 1;
            true
        } else {
            false
        }
    }

    /// Lose one life, start the cooldown, and raise the post-hit shield.
    pub fn register_hit(&mut self, now_ms: u64, config: &GameConfig) {
        self.lives = self.lives.saturating_sub(1);
        self.last_hit_ms = Some(now_ms);
        self.raise_shield(now_ms, config.hit_shield_ms);
    }

    #[inline]
    pub fn award(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.lives == 0
    }

    /// Whole seconds left on each active buff, in [`BuffKind::ALL`] order.
    pub fn buff_seconds_left(&self, now_ms: u64) -> Vec<(BuffKind, u64)> {
        BuffKind::ALL
            .iter()
            .filter_map(|kind| {
                self.buffs
                    .get(kind)
                    .map(|&end| (*kind, end.saturating_sub(now_ms) / 1000))
            })
            .collect()
    }
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Abstract per-frame input consumed by the simulation step.
///
/// Movement fields are levels (held keys).  `fire` is an edge: it is latched
/// by the keyboard system on press and cleared once a step consumes it.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerIntent {
    pub turn_left: bool,
    pub turn_right: bool,
    pub thrust_forward: bool,
    pub thrust_reverse: bool,
    pub fire: bool,
}

impl PlayerIntent {
    #[inline]
    pub fn is_thrusting(&self) -> bool {
        self.thrust_forward || self.thrust_reverse
    }
}
