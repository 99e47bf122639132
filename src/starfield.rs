//! Parallax star backdrop.
//!
//! Stars are generated once per session.  Each frame they slide opposite to
//! the ship's velocity scaled by a per-size parallax factor, so bigger
//! (nearer) stars move faster.

use crate::config::GameConfig;
use crate::geometry::wrap_position;
use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;

/// Base tints: soft white, pale yellow, soft red, pale blue.
const STAR_TINTS: [[u8; 3]; 4] = [
    [240, 240, 255],
    [255, 235, 120],
    [255, 120, 120],
    [140, 180, 255],
];

/// Share of each radius (1–4) per 120 stars; mostly small, a few large.
const SIZE_WEIGHTS: [(f32, usize); 4] = [(1.0, 65), (2.0, 35), (3.0, 15), (4.0, 5)];

#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub position: Vec2,
    pub radius: f32,
    pub color: Color,
    pub parallax: f32,
}

fn parallax_for(radius: f32) -> f32 {
    match radius as u32 {
        1 => 0.08,
        2 => 0.15,
        3 => 0.25,
        _ => 0.4,
    }
}

/// Nudge a colour channel by up to ±8 so stars of one tint still differ.
fn jitter<R: Rng + ?Sized>(channel: u8, rng: &mut R) -> u8 {
    (channel as i32 + rng.gen_range(-8..=8)).clamp(0, 255) as u8
}

/// Generate `config.star_count` stars with the size mix scaled to the count.
pub fn generate_stars<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Vec<Star> {
    let total_weight: usize = SIZE_WEIGHTS.iter().map(|(_, w)| w).sum();
    let mut sizes: Vec<f32> = SIZE_WEIGHTS
        .iter()
        .flat_map(|&(radius, weight)| {
            let n = (weight * config.star_count).div_ceil(total_weight);
            std::iter::repeat(radius).take(n)
        })
        .collect();
    sizes.truncate(config.star_count);
    sizes.shuffle(rng);

    sizes
        .into_iter()
        .map(|radius| {
            let tint = STAR_TINTS[rng.gen_range(0..STAR_TINTS.len())];
            let color = Color::srgb_u8(
                jitter(tint[0], rng),
                jitter(tint[1], rng),
                jitter(tint[2], rng),
            );
            Star {
                position: Vec2::new(
                    rng.gen_range(0.0..config.field_width),
                    rng.gen_range(0.0..config.field_height),
                ),
                radius,
                color,
                parallax: parallax_for(radius),
            }
        })
        .collect()
}

/// Slide every star against the ship's velocity and wrap.
pub fn drift_stars(stars: &mut [Star], ship_velocity: Vec2, config: &GameConfig) {
    for star in stars.iter_mut() {
        star.position = wrap_position(
            star.position - ship_velocity * star.parallax,
            config.field_width,
            config.field_height,
        );
    }
}
