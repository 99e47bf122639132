//! Asteroids: size tiers, procedural outlines, kinematics, and splitting.
//!
//! An asteroid's outline is generated once at creation (evenly spaced angles,
//! each coordinate scaled by a random multiplier inside the jaggedness band)
//! and is never mutated afterwards; it is stored in local space and drawn
//! translated to the current position.

use crate::config::GameConfig;
use crate::geometry::wrap_position;
use bevy::prelude::*;
use rand::Rng;

/// Number of fill shades the renderer picks from.
pub const ASTEROID_SHADES: u8 = 3;

/// Discrete size class.  Tier 0 cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AsteroidTier {
    Small = 1,
    Medium = 2,
    Large = 3,
}

impl AsteroidTier {
    /// Numeric tier (1–3) used for radius and score.
    #[inline]
    pub fn value(self) -> u32 {
        self as u32
    }

    /// The tier a split produces, or `None` for small asteroids.
    pub fn smaller(self) -> Option<Self> {
        match self {
            AsteroidTier::Large => Some(AsteroidTier::Medium),
            AsteroidTier::Medium => Some(AsteroidTier::Small),
            AsteroidTier::Small => None,
        }
    }

    /// Radius derived from the tier.
    #[inline]
    pub fn radius(self, config: &GameConfig) -> f32 {
        self.value() as f32 * config.asteroid_radius_per_tier
    }

    /// Velocity scale applied to freshly drawn base velocities.
    #[inline]
    pub fn speed_factor(self, config: &GameConfig) -> f32 {
        config.asteroid_speed_factors[self.value() as usize - 1]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Asteroid {
    pub position: Vec2,
    /// Velocity drawn at creation; never changes.
    pub base_velocity: Vec2,
    /// Velocity actually applied this frame (`base_velocity` scaled by slow-mo).
    pub velocity: Vec2,
    pub tier: AsteroidTier,
    pub radius: f32,
    /// Local-space polygon outline.
    pub outline: Vec<Vec2>,
    /// Index into the renderer's fill palette.
    pub shade: u8,
}

impl Asteroid {
    /// Build an asteroid of `tier` at `position` with random velocity and shape.
    pub fn new<R: Rng + ?Sized>(
        tier: AsteroidTier,
        position: Vec2,
        config: &GameConfig,
        rng: &mut R,
    ) -> Self {
        let radius = tier.radius(config);
        let speed = config.asteroid_base_speed;
        let factor = tier.speed_factor(config);
        let base_velocity = Vec2::new(
            rng.gen_range(-speed..=speed) * factor,
            rng.gen_range(-speed..=speed) * factor,
        );
        Self {
            position,
            base_velocity,
            velocity: base_velocity,
            tier,
            radius,
            outline: generate_outline(
                radius,
                config.asteroid_outline_points,
                config.asteroid_jaggedness,
                rng,
            ),
            shade: rng.gen_range(0..ASTEROID_SHADES),
        }
    }

    /// A large asteroid at a uniformly random point of the field.
    pub fn random_large<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Self {
        let position = Vec2::new(
            rng.gen_range(0.0..config.field_width),
            rng.gen_range(0.0..config.field_height),
        );
        Self::new(AsteroidTier::Large, position, config, rng)
    }

    /// Split products: two asteroids one tier smaller at the same position,
    /// each with independently re-randomised velocity and outline.  Small
    /// asteroids yield nothing.
    pub fn split<R: Rng + ?Sized>(&self, config: &GameConfig, rng: &mut R) -> Vec<Asteroid> {
        match self.tier.smaller() {
            Some(tier) => (0..2)
                .map(|_| Asteroid::new(tier, self.position, config, rng))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Advance by the effective velocity and wrap onto the field.
    pub fn advance(&mut self, config: &GameConfig) {
        self.position = wrap_position(
            self.position + self.velocity,
            config.field_width,
            config.field_height,
        );
    }

    /// Recompute the effective velocity from the base velocity.
    #[inline]
    pub fn apply_time_scale(&mut self, factor: f32) {
        self.velocity = self.base_velocity * factor;
    }
}

/// Generate an irregular polygon around the origin.
///
/// Vertices sit at `TAU * i / points`; each coordinate is scaled by
/// `radius * uniform(jaggedness)`.
pub fn generate_outline<R: Rng + ?Sized>(
    radius: f32,
    points: usize,
    jaggedness: (f32, f32),
    rng: &mut R,
) -> Vec<Vec2> {
    let step = std::f32::consts::TAU / points as f32;
    (0..points)
        .map(|i| {
            let angle = i as f32 * step;
            Vec2::new(
                angle.cos() * radius * rng.gen_range(jaggedness.0..=jaggedness.1),
                angle.sin() * radius * rng.gen_range(jaggedness.0..=jaggedness.1),
            )
        })
        .collect()
}
