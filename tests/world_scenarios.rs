//! End-to-end scenarios for [`World::step`] driven through the public API.
//!
//! Every test uses a seeded [`StdRng`] so runs are reproducible.  Scenario
//! tests zero `base_asteroids` so the population floor never injects
//! asteroids the test did not place.
//!
//! Covered scenarios:
//! 1. A bullet kill on a large asteroid scores 30 and leaves two mediums.
//! 2. Losing the last life ends the game and later steps do nothing.
//! 3. Triple shot fires three bullets at the spread angles.
//! 4. A bomb at half duration clears everything inside its eased radius.
//! 5. Long random sessions keep every bound (pool size, wrap, lives, score).
//! 6. Equal seeds and inputs reproduce the same session.

use asteroids::asteroid::{Asteroid, AsteroidTier};
use asteroids::config::GameConfig;
use asteroids::geometry::heading_vec;
use asteroids::player::{BuffKind, Bullet, PlayerIntent};
use asteroids::powerup::Shockwave;
use asteroids::world::{KillCause, World, WorldEvent};
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn scenario_config() -> GameConfig {
    GameConfig {
        base_asteroids: 0,
        powerup_drop_chance: 0.0,
        ..Default::default()
    }
}

fn resting(tier: AsteroidTier, pos: Vec2, cfg: &GameConfig, rng: &mut StdRng) -> Asteroid {
    let mut asteroid = Asteroid::new(tier, pos, cfg, rng);
    asteroid.base_velocity = Vec2::ZERO;
    asteroid.velocity = Vec2::ZERO;
    asteroid
}

fn idle() -> PlayerIntent {
    PlayerIntent::default()
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

#[test]
fn bullet_splits_large_asteroid_into_two_mediums() {
    let cfg = scenario_config();
    let mut rng = StdRng::seed_from_u64(1);
    let mut world = World::new(&cfg, 0, &mut rng);
    let target = Vec2::new(100.0, 100.0);
    world
        .asteroids
        .insert(resting(AsteroidTier::Large, target, &cfg, &mut rng));
    world.bullets.insert(Bullet {
        position: target - Vec2::new(7.0, 0.0),
        velocity: Vec2::new(7.0, 0.0),
        life: 20,
    });

    let report = world.step(&cfg, &idle(), 16, &mut rng);

    assert_eq!(world.ship.score, 30);
    assert_eq!(world.asteroids.len(), 2);
    for asteroid in world.asteroids.values() {
        assert_eq!(asteroid.tier, AsteroidTier::Medium);
        assert_eq!(asteroid.position, target);
        assert_eq!(asteroid.radius, 20.0);
    }
    assert!(report.events.iter().any(|e| matches!(
        e,
        WorldEvent::AsteroidDestroyed {
            tier: AsteroidTier::Large,
            cause: KillCause::Bullet,
            ..
        }
    )));
}

#[test]
fn last_life_lost_ends_the_session() {
    let cfg = scenario_config();
    let mut rng = StdRng::seed_from_u64(2);
    let mut world = World::new(&cfg, 0, &mut rng);
    world.ship.lives = 1;
    world.ship.shield_active = false;
    world.ship.buffs.clear();
    let at = world.ship.position;
    world
        .asteroids
        .insert(resting(AsteroidTier::Large, at, &cfg, &mut rng));

    let report = world.step(&cfg, &idle(), 16, &mut rng);

    assert_eq!(world.ship.lives, 0);
    assert!(report.ended_game());
    assert!(world.is_game_over());

    let before = world.ship.position;
    let frozen = world.step(
        &cfg,
        &PlayerIntent {
            thrust_forward: true,
            fire: true,
            ..Default::default()
        },
        32,
        &mut rng,
    );
    assert!(frozen.events.is_empty());
    assert_eq!(world.ship.position, before);
    assert!(world.bullets.is_empty());
}

#[test]
fn triple_shot_fires_a_three_way_spread() {
    let cfg = scenario_config();
    let mut rng = StdRng::seed_from_u64(3);
    let mut world = World::new(&cfg, 0, &mut rng);
    world.ship.heading = 1.0;
    world.ship.activate_buff(BuffKind::TripleShot, 0, &cfg);

    world.step(
        &cfg,
        &PlayerIntent {
            fire: true,
            ..Default::default()
        },
        16,
        &mut rng,
    );

    let velocities: Vec<Vec2> = world.bullets.values().map(|b| b.velocity).collect();
    assert_eq!(velocities.len(), 3);
    for (velocity, offset) in velocities.iter().zip([-0.18_f32, 0.0, 0.18]) {
        let expected = heading_vec(1.0 + offset) * cfg.bullet_speed;
        assert!((*velocity - expected).length() < 1e-4);
    }
}

#[test]
fn bomb_at_half_duration_clears_its_radius() {
    let cfg = scenario_config();
    let mut rng = StdRng::seed_from_u64(4);
    let mut world = World::new(&cfg, 0, &mut rng);
    let center = Vec2::new(400.0, 300.0);
    world.shockwave = Some(Shockwave {
        center,
        started_ms: 0,
    });
    let inside = world.asteroids.insert(resting(
        AsteroidTier::Large,
        center + Vec2::new(300.0, 0.0),
        &cfg,
        &mut rng,
    ));
    let outside = world.asteroids.insert(resting(
        AsteroidTier::Large,
        center - Vec2::new(340.0, 0.0),
        &cfg,
        &mut rng,
    ));

    let report = world.step(&cfg, &idle(), cfg.bomb_duration_ms / 2, &mut rng);

    let (_, radius) = world.shockwave_ring(&cfg).expect("shockwave still running");
    assert!((radius - 450.0 * 0.5_f32.sqrt()).abs() < 1e-3);
    assert!(!world.asteroids.contains(inside));
    assert!(world.asteroids.contains(outside));
    assert_eq!(report.score_delta(), cfg.bomb_score);
    // Bomb kills do not split.
    assert_eq!(world.asteroids.len(), 1);

    world.step(&cfg, &idle(), cfg.bomb_duration_ms + 1, &mut rng);
    assert!(world.shockwave.is_none());
}

#[test]
fn random_sessions_respect_world_bounds() {
    let cfg = GameConfig::default();
    for seed in 0..4u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut world = World::new(&cfg, 0, &mut rng);
        let mut last_score = 0;

        for frame in 1..=900u64 {
            let intent = PlayerIntent {
                turn_left: rng.gen_bool(0.3),
                turn_right: rng.gen_bool(0.3),
                thrust_forward: rng.gen_bool(0.5),
                thrust_reverse: rng.gen_bool(0.1),
                fire: rng.gen_bool(0.2),
            };
            world.step(&cfg, &intent, frame * 16, &mut rng);

            assert!(world.particles.len() <= cfg.particle_capacity);
            assert!(world.ship.lives <= cfg.max_lives);
            assert!(world.ship.score >= last_score);
            last_score = world.ship.score;
            assert!(world.ship.velocity.x.abs() <= cfg.max_speed + 1e-4);
            assert!(world.ship.velocity.y.abs() <= cfg.max_speed + 1e-4);

            let in_field = |p: Vec2| {
                (0.0..cfg.field_width).contains(&p.x) && (0.0..cfg.field_height).contains(&p.y)
            };
            assert!(in_field(world.ship.position));
            assert!(world.asteroids.values().all(|a| in_field(a.position)));
            assert!(world.bullets.values().all(|b| in_field(b.position) && b.life > 0));

            if world.is_game_over() {
                break;
            }
        }
    }
}

#[test]
fn same_seed_and_inputs_replay_identically() {
    let cfg = GameConfig::default();
    let run = || {
        let mut rng = StdRng::seed_from_u64(77);
        let mut world = World::new(&cfg, 0, &mut rng);
        for frame in 1..=300u64 {
            let intent = PlayerIntent {
                turn_right: frame % 7 < 3,
                thrust_forward: frame % 5 == 0,
                fire: frame % 11 == 0,
                ..Default::default()
            };
            world.step(&cfg, &intent, frame * 16, &mut rng);
        }
        let positions: Vec<Vec2> = world.asteroids.values().map(|a| a.position).collect();
        (world.ship.score, world.ship.position, positions)
    };
    assert_eq!(run(), run());
}
