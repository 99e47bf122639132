//! Runtime gameplay configuration loaded from `assets/game.toml`.
//!
//! [`GameConfig`] is a Bevy [`Resource`] that mirrors every constant in
//! [`crate::constants`].  At startup, [`load_game_config`] reads
//! `assets/game.toml` and overwrites the defaults with any values present in
//! the file.  Missing keys fall back to the compile-time defaults, so a minimal
//! TOML can override just the constants you care about.
//!
//! The config is immutable once the session starts: the world never reads
//! globals, it receives `&GameConfig` in [`World::new`] and [`World::step`].
//!
//! [`World::new`]: crate::world::World::new
//! [`World::step`]: crate::world::World::step

use crate::constants::*;
use crate::error::{require_ordered, require_positive, require_unit_interval, SimError, SimResult};
use bevy::prelude::*;
use serde::Deserialize;

/// Default location of the tuning file, relative to the working directory.
pub const CONFIG_PATH: &str = "assets/game.toml";

/// Runtime-tunable gameplay configuration.
///
/// All fields default to the corresponding compile-time constant from
/// `src/constants.rs`.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Field ────────────────────────────────────────────────────────────────
    pub field_width: f32,
    pub field_height: f32,

    // ── Ship ─────────────────────────────────────────────────────────────────
    pub starting_lives: u32,
    pub max_lives: u32,
    pub turn_step: f32,
    pub thrust_accel: f32,
    pub max_speed: f32,
    pub ship_hit_radius: f32,
    pub invulnerability_ms: u64,
    pub hit_shield_ms: u64,

    // ── Bullets ──────────────────────────────────────────────────────────────
    pub bullet_speed: f32,
    pub bullet_lifetime: i32,
    pub bullet_hit_radius: f32,
    pub triple_shot_spread: [f32; 3],

    // ── Asteroids ────────────────────────────────────────────────────────────
    pub base_asteroids: usize,
    pub level_score_step: u32,
    pub spawn_interval_ms: (u64, u64),
    pub asteroid_radius_per_tier: f32,
    pub asteroid_outline_points: usize,
    pub asteroid_jaggedness: (f32, f32),
    pub asteroid_base_speed: f32,
    pub asteroid_speed_factors: [f32; 3],
    pub score_per_tier: u32,

    // ── Particles ────────────────────────────────────────────────────────────
    pub particle_capacity: usize,
    pub particle_lifetime: i32,
    pub particle_max_size: f32,
    pub explosion_particles: usize,
    pub trail_particles: usize,
    pub trail_lifetime: i32,
    pub exhaust_particles: usize,

    // ── Power-ups ────────────────────────────────────────────────────────────
    pub powerup_drop_chance: f64,
    pub powerup_radius: f32,
    pub powerup_pickup_margin: f32,
    pub triple_shot_ms: u64,
    pub invincible_ms: u64,
    pub slowmo_ms: u64,
    pub laser_ms: u64,
    pub slowmo_factor: f32,
    pub bomb_max_radius: f32,
    pub bomb_duration_ms: u64,
    pub bomb_score: u32,
    pub laser_length: f32,
    pub laser_width: f32,
    pub laser_nose_offset: f32,
    pub laser_score: u32,

    // ── Floating text ────────────────────────────────────────────────────────
    pub floating_text_ms: u64,
    pub floating_text_drift: f32,
    pub floating_text_offset: f32,

    // ── Backdrop / HUD ───────────────────────────────────────────────────────
    pub star_count: usize,
    pub hud_font_size: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            // Field
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            // Ship
            starting_lives: STARTING_LIVES,
            max_lives: MAX_LIVES,
            turn_step: TURN_STEP,
            thrust_accel: THRUST_ACCEL,
            max_speed: MAX_SPEED,
            ship_hit_radius: SHIP_HIT_RADIUS,
            invulnerability_ms: INVULNERABILITY_MS,
            hit_shield_ms: HIT_SHIELD_MS,
            // Bullets
            bullet_speed: BULLET_SPEED,
            bullet_lifetime: BULLET_LIFETIME,
            bullet_hit_radius: BULLET_HIT_RADIUS,
            triple_shot_spread: TRIPLE_SHOT_SPREAD,
            // Asteroids
            base_asteroids: BASE_ASTEROIDS,
            level_score_step: LEVEL_SCORE_STEP,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            asteroid_radius_per_tier: ASTEROID_RADIUS_PER_TIER,
            asteroid_outline_points: ASTEROID_OUTLINE_POINTS,
            asteroid_jaggedness: ASTEROID_JAGGEDNESS,
            asteroid_base_speed: ASTEROID_BASE_SPEED,
            asteroid_speed_factors: ASTEROID_SPEED_FACTORS,
            score_per_tier: SCORE_PER_TIER,
            // Particles
            particle_capacity: PARTICLE_CAPACITY,
            particle_lifetime: PARTICLE_LIFETIME,
            particle_max_size: PARTICLE_MAX_SIZE,
            explosion_particles: EXPLOSION_PARTICLES,
            trail_particles: TRAIL_PARTICLES,
            trail_lifetime: TRAIL_LIFETIME,
            exhaust_particles: EXHAUST_PARTICLES,
            // Power-ups
            powerup_drop_chance: POWERUP_DROP_CHANCE,
            powerup_radius: POWERUP_RADIUS,
            powerup_pickup_margin: POWERUP_PICKUP_MARGIN,
            triple_shot_ms: TRIPLE_SHOT_MS,
            invincible_ms: INVINCIBLE_MS,
            slowmo_ms: SLOWMO_MS,
            laser_ms: LASER_MS,
            slowmo_factor: SLOWMO_FACTOR,
            bomb_max_radius: BOMB_MAX_RADIUS,
            bomb_duration_ms: BOMB_DURATION_MS,
            bomb_score: BOMB_SCORE,
            laser_length: LASER_LENGTH,
            laser_width: LASER_WIDTH,
            laser_nose_offset: LASER_NOSE_OFFSET,
            laser_score: LASER_SCORE,
            // Floating text
            floating_text_ms: FLOATING_TEXT_MS,
            floating_text_drift: FLOATING_TEXT_DRIFT,
            floating_text_offset: FLOATING_TEXT_OFFSET,
            // Backdrop / HUD
            star_count: STAR_COUNT,
            hud_font_size: HUD_FONT_SIZE,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) TOML document and validate the result.
    pub fn from_toml_str(contents: &str, path: &str) -> SimResult<Self> {
        let config: GameConfig = toml::from_str(contents).map_err(|e| SimError::ConfigParse {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would break the world's invariants.
    pub fn validate(&self) -> SimResult<()> {
        require_positive("field_width", self.field_width as f64)?;
        require_positive("field_height", self.field_height as f64)?;
        require_positive("max_speed", self.max_speed as f64)?;
        require_positive("bullet_lifetime", self.bullet_lifetime as f64)?;
        require_positive("particle_capacity", self.particle_capacity as f64)?;
        require_positive("bomb_duration_ms", self.bomb_duration_ms as f64)?;
        require_positive("level_score_step", self.level_score_step as f64)?;
        require_positive("floating_text_ms", self.floating_text_ms as f64)?;
        require_positive("starting_lives", self.starting_lives as f64)?;
        // Both feed `gen_range` bounds in asteroid creation.
        require_positive("asteroid_base_speed", self.asteroid_base_speed as f64)?;
        require_positive("asteroid_jaggedness", self.asteroid_jaggedness.0 as f64)?;
        if self.asteroid_outline_points < 3 {
            return Err(SimError::UnsafeConstant {
                name: "asteroid_outline_points",
                value: self.asteroid_outline_points as f64,
                safe_range: "[3, ∞)",
            });
        }
        require_ordered(
            "starting_lives..max_lives",
            self.starting_lives as f64,
            self.max_lives as f64,
        )?;
        require_ordered(
            "spawn_interval_ms",
            self.spawn_interval_ms.0 as f64,
            self.spawn_interval_ms.1 as f64,
        )?;
        require_ordered(
            "asteroid_jaggedness",
            self.asteroid_jaggedness.0 as f64,
            self.asteroid_jaggedness.1 as f64,
        )?;
        require_unit_interval("powerup_drop_chance", self.powerup_drop_chance)?;
        require_unit_interval("slowmo_factor", self.slowmo_factor as f64)?;
        Ok(())
    }

    /// Current level for a score: `1 + score / level_score_step`.
    #[inline]
    pub fn level_for_score(&self, score: u32) -> u32 {
        1 + score / self.level_score_step
    }

    /// Minimum live asteroid count at `level`.
    #[inline]
    pub fn minimum_asteroids(&self, level: u32) -> usize {
        self.base_asteroids + (level.saturating_sub(1)) as usize
    }
}

/// Startup system: attempt to load `assets/game.toml` and overwrite the
/// `GameConfig` resource with any values present in the file.
///
/// Parse and validation errors are logged and the compiled defaults are kept.
/// A missing file is not an error.
pub fn load_game_config(mut config: ResMut<GameConfig>) {
    match std::fs::read_to_string(CONFIG_PATH) {
        Ok(contents) => match GameConfig::from_toml_str(&contents, CONFIG_PATH) {
            Ok(loaded) => {
                *config = loaded;
                info!("Loaded game config from {CONFIG_PATH}");
            }
            Err(e) => {
                warn!("{e}; using defaults");
            }
        },
        Err(_) => {
            info!("No {CONFIG_PATH} found; using compiled defaults");
        }
    }
}
