//! Centralised gameplay constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place without source-diving across multiple modules.
//! [`crate::config::GameConfig::default`] is built from these values; the
//! runtime copy can be overridden from `assets/game.toml`.
//!
//! ## Units
//!
//! Velocities and accelerations are in world units **per frame** (the step is
//! frame-rate coupled at [`STEP_HZ`]).  Timers are in **milliseconds** of the
//! monotonic clock.  Lifetimes of bullets and particles are in **frames**.

// ── Field ─────────────────────────────────────────────────────────────────────

/// Width of the toroidal play field (world units, equal to window pixels).
pub const FIELD_WIDTH: f32 = 800.0;

/// Height of the toroidal play field.
pub const FIELD_HEIGHT: f32 = 600.0;

/// Fixed simulation rate (steps per second).
pub const STEP_HZ: f64 = 60.0;

// ── Ship ──────────────────────────────────────────────────────────────────────

/// Lives at the start of a session.
pub const STARTING_LIVES: u32 = 3;

/// Upper bound on lives; extra-life pickups at the cap are no-ops.
pub const MAX_LIVES: u32 = 5;

/// Heading change per frame while a turn key is held (radians).
pub const TURN_STEP: f32 = 0.1;

/// Velocity added along the heading per frame of thrust.
pub const THRUST_ACCEL: f32 = 0.3;

/// Per-component velocity clamp.
pub const MAX_SPEED: f32 = 3.0;

/// Ship–asteroid contact distance is `asteroid.radius + SHIP_HIT_RADIUS`.
pub const SHIP_HIT_RADIUS: f32 = 25.0;

/// Cooldown after a hit during which overlaps cost no life (ms).
pub const INVULNERABILITY_MS: u64 = 2000;

/// Shield granted after losing a life (ms).
pub const HIT_SHIELD_MS: u64 = 3000;

// ── Bullets ───────────────────────────────────────────────────────────────────

/// Bullet speed (units/frame).
pub const BULLET_SPEED: f32 = 7.0;

/// Bullet lifetime (frames).
pub const BULLET_LIFETIME: i32 = 60;

/// Bullet–asteroid contact distance, independent of asteroid tier.
pub const BULLET_HIT_RADIUS: f32 = 30.0;

/// Heading offsets of the triple-shot spread (radians).
pub const TRIPLE_SHOT_SPREAD: [f32; 3] = [-0.18, 0.0, 0.18];

// ── Asteroids ─────────────────────────────────────────────────────────────────

/// Minimum asteroid population at level 1.
pub const BASE_ASTEROIDS: usize = 3;

/// Score needed per level step: `level = 1 + score / LEVEL_SCORE_STEP`.
pub const LEVEL_SCORE_STEP: u32 = 1000;

/// Inclusive range (ms) the timed-spawn threshold is drawn from every frame.
pub const SPAWN_INTERVAL_MS: (u64, u64) = (5000, 10000);

/// Radius per tier: `radius = tier * ASTEROID_RADIUS_PER_TIER`.
pub const ASTEROID_RADIUS_PER_TIER: f32 = 10.0;

/// Number of vertices in an asteroid outline.
pub const ASTEROID_OUTLINE_POINTS: usize = 10;

/// Per-coordinate radius multiplier band for outline vertices.
pub const ASTEROID_JAGGEDNESS: (f32, f32) = (0.8, 1.2);

/// Each base-velocity component is drawn from `±ASTEROID_BASE_SPEED`, then
/// scaled by the tier's speed factor.
pub const ASTEROID_BASE_SPEED: f32 = 2.0;

/// Speed factor for tiers 1, 2, 3.
pub const ASTEROID_SPEED_FACTORS: [f32; 3] = [0.7, 1.2, 2.0];

/// Score per tier for a bullet kill: `points = tier * SCORE_PER_TIER`.
pub const SCORE_PER_TIER: u32 = 10;

// ── Particles ─────────────────────────────────────────────────────────────────

/// Ring-buffer capacity of the particle pool.
pub const PARTICLE_CAPACITY: usize = 300;

/// Lifetime of explosion and exhaust particles (frames).
pub const PARTICLE_LIFETIME: i32 = 40;

/// Largest exhaust particle size.
pub const PARTICLE_MAX_SIZE: f32 = 5.0;

/// Particles per explosion burst.
pub const EXPLOSION_PARTICLES: usize = 50;

/// Trail particles emitted per live bullet per frame.
pub const TRAIL_PARTICLES: usize = 3;

/// Lifetime of bullet trail particles (frames).
pub const TRAIL_LIFETIME: i32 = 25;

/// Exhaust particles emitted per frame of thrust.
pub const EXHAUST_PARTICLES: usize = 3;

// ── Power-ups ─────────────────────────────────────────────────────────────────

/// Chance that a bullet kill drops a power-up.
pub const POWERUP_DROP_CHANCE: f64 = 0.15;

/// Drawn radius of a power-up disc.
pub const POWERUP_RADIUS: f32 = 14.0;

/// Added to [`POWERUP_RADIUS`] for the pickup test.
pub const POWERUP_PICKUP_MARGIN: f32 = 20.0;

pub const TRIPLE_SHOT_MS: u64 = 10_000;
pub const INVINCIBLE_MS: u64 = 5_000;
pub const SLOWMO_MS: u64 = 5_000;
pub const LASER_MS: u64 = 3_000;

/// Asteroid speed multiplier while slow-mo is active.
pub const SLOWMO_FACTOR: f32 = 0.4;

/// Final shockwave radius of the bomb.
pub const BOMB_MAX_RADIUS: f32 = 450.0;

/// Time for the shockwave to reach full radius (ms).
pub const BOMB_DURATION_MS: u64 = 1200;

/// Score per asteroid caught by the shockwave.
pub const BOMB_SCORE: u32 = 20;

/// Beam length from its origin at the ship nose.
pub const LASER_LENGTH: f32 = 900.0;

/// Beam width; the hit test uses half of it.
pub const LASER_WIDTH: f32 = 12.0;

/// Offset of the beam origin ahead of the ship centre.
pub const LASER_NOSE_OFFSET: f32 = 20.0;

/// Score per asteroid cut by the laser.
pub const LASER_SCORE: u32 = 10;

// ── Floating text ─────────────────────────────────────────────────────────────

/// Lifetime of a pickup label (ms).
pub const FLOATING_TEXT_MS: u64 = 1200;

/// Upward drift per frame.
pub const FLOATING_TEXT_DRIFT: f32 = 0.7;

/// Spawn offset above the ship.
pub const FLOATING_TEXT_OFFSET: f32 = 40.0;

// ── Backdrop ──────────────────────────────────────────────────────────────────

/// Number of background stars.
pub const STAR_COUNT: usize = 120;

// ── HUD ───────────────────────────────────────────────────────────────────────

pub const HUD_FONT_SIZE: f32 = 26.0;
