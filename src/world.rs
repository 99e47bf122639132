//! The per-session world and its frame step.
//!
//! [`World`] owns every entity of one session.  [`World::step`] advances it by
//! exactly one frame given the held keys, the fire edge, the monotonic clock,
//! and an explicit random source, and reports what happened as a list of
//! [`WorldEvent`]s.  Nothing in here touches Bevy's ECS: the app layer in
//! [`crate::simulation`] wraps the world in a resource and calls `step` from
//! the fixed-rate schedule.
//!
//! ## Phase order
//!
//! | # | Phase                    | Notes                                           |
//! |---|--------------------------|-------------------------------------------------|
//! | 1 | timed spawn              | threshold re-drawn from `spawn_interval_ms` each frame |
//! | 2 | population floor         | `base + level - 1` asteroids minimum             |
//! | 3 | input integration        | fire, turn, thrust, clamp, wrap; exhaust; stars |
//! | 4 | asteroid/bullet motion   | bullet trails, bullet expiry                    |
//! | 5 | bullet vs asteroid       | score, split, explosion, power-up drop          |
//! | 6 | ship vs asteroid         | gated by shield and hit cooldown                |
//! | 7 | particle aging           |                                                 |
//! | 8 | buffs and power-ups      | expiry, pickup, bomb, slow-mo, texts, laser     |
//!
//! Later phases observe earlier phases' removals.  Every phase collects the
//! ids it wants gone and applies removals once, then compacts the arena.

use crate::arena::{Arena, EntityId};
use crate::asteroid::{Asteroid, AsteroidTier};
use crate::config::GameConfig;
use crate::particles::{spawn_bullet_trail, spawn_exhaust, spawn_explosion, ParticlePool};
use crate::player::{
    find_bullet_hits, find_ship_overlaps, fire_bullets, integrate_input, BuffKind, Bullet,
    PlayerIntent, Ship,
};
use crate::powerup::{FloatingText, LaserBeam, PowerUp, PowerUpKind, Shockwave};
use crate::starfield::{drift_stars, generate_stars, Star};
use bevy::prelude::*;
use rand::Rng;

// ── Step output ───────────────────────────────────────────────────────────────

/// What removed an asteroid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KillCause {
    Bullet,
    ShipCollision,
    Bomb,
    Laser,
}

/// Side effects of one step, in the order they happened.
#[derive(Debug, Clone, PartialEq)]
pub enum WorldEvent {
    AsteroidDestroyed {
        tier: AsteroidTier,
        position: Vec2,
        cause: KillCause,
    },
    ScoreAwarded {
        points: u32,
        total: u32,
    },
    PowerUpDropped(PowerUpKind),
    PowerUpCollected(PowerUpKind),
    BuffExpired(BuffKind),
    LifeLost {
        remaining: u32,
    },
    GameOver {
        score: u32,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    pub events: Vec<WorldEvent>,
}

impl StepReport {
    /// Total points awarded during the step.
    pub fn score_delta(&self) -> u32 {
        self.events
            .iter()
            .map(|e| match e {
                WorldEvent::ScoreAwarded { points, .. } => *points,
                _ => 0,
            })
            .sum()
    }

    pub fn lives_lost(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, WorldEvent::LifeLost { .. }))
            .count()
    }

    pub fn ended_game(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, WorldEvent::GameOver { .. }))
    }
}

/// Derived values the HUD shows.
#[derive(Debug, Clone, PartialEq)]
pub struct HudValues {
    pub lives: u32,
    pub score: u32,
    pub level: u32,
    /// Whole seconds left per active buff.
    pub buffs: Vec<(BuffKind, u64)>,
}

// ── World ─────────────────────────────────────────────────────────────────────

fn bullet_explosion_color() -> Color {
    Color::srgb_u8(255, 200, 0)
}
fn ship_hit_color() -> Color {
    Color::srgb_u8(255, 50, 50)
}
fn bomb_explosion_color() -> Color {
    Color::srgb_u8(255, 140, 0)
}
fn laser_explosion_color() -> Color {
    Color::srgb_u8(255, 0, 200)
}

/// All entities of one session.
#[derive(Debug, Clone)]
pub struct World {
    pub ship: Ship,
    pub asteroids: Arena<Asteroid>,
    pub bullets: Arena<Bullet>,
    pub particles: ParticlePool,
    pub powerups: Arena<PowerUp>,
    pub floating_texts: Arena<FloatingText>,
    pub stars: Vec<Star>,
    pub shockwave: Option<Shockwave>,
    last_spawn_ms: u64,
    now_ms: u64,
    game_over: bool,
}

impl World {
    /// A fresh session: shielded ship at the centre, the base asteroid batch,
    /// and a new star backdrop.
    pub fn new<R: Rng + ?Sized>(config: &GameConfig, now_ms: u64, rng: &mut R) -> Self {
        Self::with_arenas(
            config,
            now_ms,
            rng,
            (Arena::new(), Arena::new(), Arena::new(), Arena::new()),
        )
    }

    /// A fresh session whose entity ids continue after this world's, so
    /// nothing keyed on an old id can match an entity of the new session.
    pub fn restart<R: Rng + ?Sized>(&self, config: &GameConfig, now_ms: u64, rng: &mut R) -> Self {
        Self::with_arenas(
            config,
            now_ms,
            rng,
            (
                self.asteroids.successor(),
                self.bullets.successor(),
                self.powerups.successor(),
                self.floating_texts.successor(),
            ),
        )
    }

    fn with_arenas<R: Rng + ?Sized>(
        config: &GameConfig,
        now_ms: u64,
        rng: &mut R,
        (mut asteroids, bullets, powerups, floating_texts): (
            Arena<Asteroid>,
            Arena<Bullet>,
            Arena<PowerUp>,
            Arena<FloatingText>,
        ),
    ) -> Self {
        asteroids.extend((0..config.base_asteroids).map(|_| Asteroid::random_large(config, rng)));
        Self {
            ship: Ship::new(config, now_ms),
            asteroids,
            bullets,
            particles: ParticlePool::new(config.particle_capacity),
            powerups,
            floating_texts,
            stars: generate_stars(config, rng),
            shockwave: None,
            last_spawn_ms: now_ms,
            now_ms,
            game_over: false,
        }
    }

    /// Clock value of the most recent step (or of creation).
    #[inline]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    #[inline]
    pub fn level(&self, config: &GameConfig) -> u32 {
        config.level_for_score(self.ship.score)
    }

    pub fn hud(&self, config: &GameConfig) -> HudValues {
        HudValues {
            lives: self.ship.lives,
            score: self.ship.score,
            level: self.level(config),
            buffs: self.ship.buff_seconds_left(self.now_ms),
        }
    }

    /// The beam to draw this frame, if the laser buff is active.
    pub fn laser_beam(&self, config: &GameConfig) -> Option<LaserBeam> {
        self.ship
            .has_buff(BuffKind::Laser)
            .then(|| LaserBeam::from_ship(&self.ship, config))
    }

    /// Centre and current radius of the bomb shockwave, if one is running.
    pub fn shockwave_ring(&self, config: &GameConfig) -> Option<(Vec2, f32)> {
        self.shockwave
            .map(|wave| (wave.center, wave.radius(self.now_ms, config)))
    }

    /// Advance the world by one frame.
    ///
    /// Once the game is over the world is frozen and further calls return an
    /// empty report.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        config: &GameConfig,
        input: &PlayerIntent,
        now_ms: u64,
        rng: &mut R,
    ) -> StepReport {
        let mut report = StepReport::default();
        if self.game_over {
            return report;
        }
        self.now_ms = now_ms;

        self.spawn_on_timer(config, rng);
        self.enforce_population_floor(config, rng);
        self.integrate_ship(config, input, rng);
        self.advance_projectiles(config, rng);
        self.resolve_bullet_hits(config, rng, &mut report);
        self.resolve_ship_collisions(config, rng, &mut report);
        self.particles.age();
        self.update_buffs_and_powerups(config, rng, &mut report);

        report
    }

    // ── Phase 1 ──────────────────────────────────────────────────────────────

    /// Append one large asteroid if the time since the last timed spawn
    /// exceeds a threshold drawn from `spawn_interval_ms`.
    pub fn spawn_on_timer<R: Rng + ?Sized>(&mut self, config: &GameConfig, rng: &mut R) {
        let (lo, hi) = config.spawn_interval_ms;
        let threshold = rng.gen_range(lo..=hi);
        if self.now_ms.saturating_sub(self.last_spawn_ms) > threshold {
            self.asteroids.insert(Asteroid::random_large(config, rng));
            self.last_spawn_ms = self.now_ms;
        }
    }

    // ── Phase 2 ──────────────────────────────────────────────────────────────

    /// Top the field up to the level's minimum; returns how many were added.
    pub fn enforce_population_floor<R: Rng + ?Sized>(
        &mut self,
        config: &GameConfig,
        rng: &mut R,
    ) -> usize {
        let minimum = config.minimum_asteroids(self.level(config));
        let missing = minimum.saturating_sub(self.asteroids.len());
        for _ in 0..missing {
            self.asteroids.insert(Asteroid::random_large(config, rng));
        }
        missing
    }

    // ── Phase 3 ──────────────────────────────────────────────────────────────

    fn integrate_ship<R: Rng + ?Sized>(
        &mut self,
        config: &GameConfig,
        input: &PlayerIntent,
        rng: &mut R,
    ) {
        if input.fire {
            self.bullets.extend(fire_bullets(&self.ship, config));
        }
        self.ship.expire_shield(self.now_ms);
        integrate_input(&mut self.ship, input, config);
        if input.is_thrusting() {
            spawn_exhaust(
                &mut self.particles,
                self.ship.position,
                self.ship.heading,
                config,
                rng,
            );
        }
        drift_stars(&mut self.stars, self.ship.velocity, config);
    }

    // ── Phase 4 ──────────────────────────────────────────────────────────────

    fn advance_projectiles<R: Rng + ?Sized>(&mut self, config: &GameConfig, rng: &mut R) {
        for asteroid in self.asteroids.values_mut() {
            asteroid.advance(config);
        }

        let mut expired: Vec<EntityId> = Vec::new();
        for (id, bullet) in self.bullets.iter_mut() {
            bullet.advance(config);
            spawn_bullet_trail(
                &mut self.particles,
                bullet.position,
                bullet.velocity,
                config,
                rng,
            );
            if bullet.is_expired() {
                expired.push(id);
            }
        }
        for id in expired {
            self.bullets.remove(id);
        }
        self.bullets.compact();
    }

    // ── Phase 5 ──────────────────────────────────────────────────────────────

    fn resolve_bullet_hits<R: Rng + ?Sized>(
        &mut self,
        config: &GameConfig,
        rng: &mut R,
        report: &mut StepReport,
    ) {
        let hits = find_bullet_hits(&self.bullets, &self.asteroids, config);
        if hits.is_empty() {
            return;
        }

        let mut fragments: Vec<Asteroid> = Vec::new();
        for (bullet_id, asteroid_id) in hits {
            self.bullets.remove(bullet_id);
            let Some(asteroid) = self.asteroids.remove(asteroid_id) else {
                continue;
            };

            self.award(asteroid.tier.value() * config.score_per_tier, report);
            fragments.extend(asteroid.split(config, rng));
            for _ in 0..2 {
                spawn_explosion(
                    &mut self.particles,
                    asteroid.position,
                    bullet_explosion_color(),
                    false,
                    config,
                    rng,
                );
            }
            if rng.gen_bool(config.powerup_drop_chance) {
                let kind = PowerUpKind::random(rng);
                self.powerups.insert(PowerUp {
                    position: asteroid.position,
                    kind,
                    spawned_ms: self.now_ms,
                });
                report.events.push(WorldEvent::PowerUpDropped(kind));
            }
            report.events.push(WorldEvent::AsteroidDestroyed {
                tier: asteroid.tier,
                position: asteroid.position,
                cause: KillCause::Bullet,
            });
        }

        self.bullets.compact();
        self.asteroids.compact();
        self.asteroids.extend(fragments);
    }

    // ── Phase 6 ──────────────────────────────────────────────────────────────

    fn resolve_ship_collisions<R: Rng + ?Sized>(
        &mut self,
        config: &GameConfig,
        rng: &mut R,
        report: &mut StepReport,
    ) {
        if self.ship.is_invulnerable(self.now_ms, config) {
            return;
        }
        let overlaps = find_ship_overlaps(&self.ship, &self.asteroids, config);
        if overlaps.is_empty() {
            return;
        }

        let mut fragments: Vec<Asteroid> = Vec::new();
        for id in overlaps {
            if let Some(asteroid) = self.asteroids.remove(id) {
                fragments.extend(asteroid.split(config, rng));
                report.events.push(WorldEvent::AsteroidDestroyed {
                    tier: asteroid.tier,
                    position: asteroid.position,
                    cause: KillCause::ShipCollision,
                });
            }
        }
        self.asteroids.compact();
        self.asteroids.extend(fragments);

        // One life per frame, however many asteroids overlapped.
        self.ship.register_hit(self.now_ms, config);
        for _ in 0..2 {
            spawn_explosion(
                &mut self.particles,
                self.ship.position,
                ship_hit_color(),
                true,
                config,
                rng,
            );
        }
        report.events.push(WorldEvent::LifeLost {
            remaining: self.ship.lives,
        });

        if self.ship.is_dead() {
            self.game_over = true;
            report.events.push(WorldEvent::GameOver {
                score: self.ship.score,
            });
        }
    }

    // ── Phase 8 ──────────────────────────────────────────────────────────────

    fn update_buffs_and_powerups<R: Rng + ?Sized>(
        &mut self,
        config: &GameConfig,
        rng: &mut R,
        report: &mut StepReport,
    ) {
        for kind in self.ship.expire_buffs(self.now_ms) {
            report.events.push(WorldEvent::BuffExpired(kind));
        }

        self.collect_powerups(config, report);
        self.run_shockwave(config, rng, report);

        let factor = if self.ship.has_buff(BuffKind::SlowMo) {
            config.slowmo_factor
        } else {
            1.0
        };
        for asteroid in self.asteroids.values_mut() {
            asteroid.apply_time_scale(factor);
        }

        let mut faded: Vec<EntityId> = Vec::new();
        for (id, text) in self.floating_texts.iter_mut() {
            if !text.update(self.now_ms, config) {
                faded.push(id);
            }
        }
        for id in faded {
            self.floating_texts.remove(id);
        }
        self.floating_texts.compact();

        self.fire_laser(config, rng, report);
    }

    fn collect_powerups(&mut self, config: &GameConfig, report: &mut StepReport) {
        let touched: Vec<EntityId> = self
            .powerups
            .iter()
            .filter(|(_, pu)| pu.is_touching(self.ship.position, config))
            .map(|(id, _)| id)
            .collect();

        for id in touched {
            let Some(powerup) = self.powerups.remove(id) else {
                continue;
            };
            let kind = powerup.kind;
            let show_label = match kind {
                PowerUpKind::Life => self.ship.add_life(config),
                PowerUpKind::Bomb => {
                    self.shockwave = Some(Shockwave {
                        center: self.ship.position,
                        started_ms: self.now_ms,
                    });
                    true
                }
                _ => {
                    if let Some(buff) = kind.buff() {
                        self.ship.activate_buff(buff, self.now_ms, config);
                    }
                    true
                }
            };
            if show_label {
                self.floating_texts.insert(FloatingText {
                    text: kind.pickup_label().to_string(),
                    position: self.ship.position - Vec2::new(0.0, config.floating_text_offset),
                    color: kind.color(),
                    spawned_ms: self.now_ms,
                });
            }
            report.events.push(WorldEvent::PowerUpCollected(kind));
        }
        self.powerups.compact();
    }

    fn run_shockwave<R: Rng + ?Sized>(
        &mut self,
        config: &GameConfig,
        rng: &mut R,
        report: &mut StepReport,
    ) {
        let Some(wave) = self.shockwave else {
            return;
        };
        let radius = wave.radius(self.now_ms, config);
        let caught: Vec<EntityId> = self
            .asteroids
            .iter()
            .filter(|(_, a)| wave.contains(a.position, radius))
            .map(|(id, _)| id)
            .collect();
        self.destroy_without_split(
            caught,
            config.bomb_score,
            KillCause::Bomb,
            bomb_explosion_color(),
            config,
            rng,
            report,
        );

        if wave.is_finished(self.now_ms, config) {
            self.shockwave = None;
        }
    }

    fn fire_laser<R: Rng + ?Sized>(
        &mut self,
        config: &GameConfig,
        rng: &mut R,
        report: &mut StepReport,
    ) {
        let Some(beam) = self.laser_beam(config) else {
            return;
        };
        let cut: Vec<EntityId> = self
            .asteroids
            .iter()
            .filter(|(_, a)| beam.hits(a.position, a.radius))
            .map(|(id, _)| id)
            .collect();
        self.destroy_without_split(
            cut,
            config.laser_score,
            KillCause::Laser,
            laser_explosion_color(),
            config,
            rng,
            report,
        );
    }

    /// Remove asteroids outright (bomb and laser kills do not split).
    #[allow(clippy::too_many_arguments)]
    fn destroy_without_split<R: Rng + ?Sized>(
        &mut self,
        ids: Vec<EntityId>,
        points: u32,
        cause: KillCause,
        color: Color,
        config: &GameConfig,
        rng: &mut R,
        report: &mut StepReport,
    ) {
        for id in ids {
            let Some(asteroid) = self.asteroids.remove(id) else {
                continue;
            };
            self.award(points, report);
            spawn_explosion(
                &mut self.particles,
                asteroid.position,
                color,
                false,
                config,
                rng,
            );
            report.events.push(WorldEvent::AsteroidDestroyed {
                tier: asteroid.tier,
                position: asteroid.position,
                cause,
            });
        }
        self.asteroids.compact();
    }

    fn award(&mut self, points: u32, report: &mut StepReport) {
        self.ship.award(points);
        report.events.push(WorldEvent::ScoreAwarded {
            points,
            total: self.ship.score,
        });
    }
}

// ── Unit tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    /// Config with no population floor so tests control the asteroid set.
    fn quiet_config() -> GameConfig {
        GameConfig {
            base_asteroids: 0,
            powerup_drop_chance: 0.0,
            ..Default::default()
        }
    }

    fn still_asteroid(tier: AsteroidTier, pos: Vec2, cfg: &GameConfig, rng: &mut StdRng) -> Asteroid {
        let mut a = Asteroid::new(tier, pos, cfg, rng);
        a.base_velocity = Vec2::ZERO;
        a.velocity = Vec2::ZERO;
        a
    }

    fn unshielded(world: &mut World) {
        world.ship.shield_active = false;
        world.ship.buffs.clear();
        world.ship.last_hit_ms = None;
    }

    #[test]
    fn new_world_has_base_batch_and_stars() {
        let cfg = GameConfig::default();
        let world = World::new(&cfg, 0, &mut rng());
        assert_eq!(world.asteroids.len(), 3);
        assert!(world
            .asteroids
            .values()
            .all(|a| a.tier == AsteroidTier::Large));
        assert_eq!(world.stars.len(), cfg.star_count);
        assert!(world.ship.shield_active);
        assert!(!world.is_game_over());
    }

    #[test]
    fn population_floor_tops_up_for_any_prior_count_and_level() {
        let cfg = GameConfig::default();
        let mut rng = rng();
        for score in [0, 999, 1000, 2500, 9000] {
            for prior in [0usize, 2, 3, 20] {
                let mut world = World::new(&cfg, 0, &mut rng);
                world.asteroids.clear();
                for _ in 0..prior {
                    world.asteroids.insert(Asteroid::random_large(&cfg, &mut rng));
                }
                world.ship.score = score;
                world.enforce_population_floor(&cfg, &mut rng);
                let minimum = cfg.minimum_asteroids(cfg.level_for_score(score));
                assert!(world.asteroids.len() >= minimum);
                assert_eq!(world.asteroids.len(), prior.max(minimum));
            }
        }
    }

    #[test]
    fn timed_spawn_waits_for_the_interval() {
        let cfg = quiet_config();
        let mut rng = rng();
        let mut world = World::new(&cfg, 0, &mut rng);
        world.now_ms = 4_999;
        world.spawn_on_timer(&cfg, &mut rng);
        assert_eq!(world.asteroids.len(), 0);

        world.now_ms = 10_001;
        world.spawn_on_timer(&cfg, &mut rng);
        assert_eq!(world.asteroids.len(), 1);
        assert_eq!(world.last_spawn_ms, 10_001);
    }

    #[test]
    fn bullet_kill_scores_splits_and_explodes() {
        let cfg = quiet_config();
        let mut rng = rng();
        let mut world = World::new(&cfg, 0, &mut rng);
        let target = pos_100();
        world
            .asteroids
            .insert(still_asteroid(AsteroidTier::Large, target, &cfg, &mut rng));
        world.bullets.insert(Bullet {
            position: target,
            velocity: Vec2::ZERO,
            life: 10,
        });

        let report = world.step(&cfg, &PlayerIntent::default(), 16, &mut rng);

        assert_eq!(report.score_delta(), 30);
        assert_eq!(world.ship.score, 30);
        assert!(world.bullets.is_empty());
        let tiers: Vec<_> = world.asteroids.values().map(|a| a.tier).collect();
        assert_eq!(tiers, vec![AsteroidTier::Medium, AsteroidTier::Medium]);
        // Fragments spawn at the parent position and move from the next frame.
        assert!(world.asteroids.values().all(|a| a.position == target));
        assert!(world.particles.len() >= 100);
    }

    fn pos_100() -> Vec2 {
        Vec2::new(100.0, 100.0)
    }

    #[test]
    fn ship_overlap_costs_one_life_for_many_asteroids() {
        let cfg = quiet_config();
        let mut rng = rng();
        let mut world = World::new(&cfg, 0, &mut rng);
        unshielded(&mut world);
        let at = world.ship.position;
        for _ in 0..3 {
            world
                .asteroids
                .insert(still_asteroid(AsteroidTier::Medium, at, &cfg, &mut rng));
        }

        let report = world.step(&cfg, &PlayerIntent::default(), 16, &mut rng);

        assert_eq!(report.lives_lost(), 1);
        assert_eq!(world.ship.lives, 2);
        assert_eq!(world.asteroids.len(), 6, "each medium splits into two smalls");
        assert!(world.ship.shield_active);
        assert_eq!(world.ship.last_hit_ms, Some(16));
        assert!(world.particles.iter().any(|p| p.life_loss));
    }

    #[test]
    fn shield_and_cooldown_block_life_loss() {
        let cfg = quiet_config();
        let mut rng = rng();
        let mut world = World::new(&cfg, 0, &mut rng);
        let at = world.ship.position;
        world
            .asteroids
            .insert(still_asteroid(AsteroidTier::Large, at, &cfg, &mut rng));

        // Start-up shield.
        world.step(&cfg, &PlayerIntent::default(), 16, &mut rng);
        assert_eq!(world.ship.lives, 3);
        assert_eq!(world.asteroids.len(), 1);

        // Cooldown only.
        unshielded(&mut world);
        world.ship.last_hit_ms = Some(1_000);
        world.step(&cfg, &PlayerIntent::default(), 2_999, &mut rng);
        assert_eq!(world.ship.lives, 3);
    }

    #[test]
    fn last_life_ends_the_game_and_freezes_the_world() {
        let cfg = quiet_config();
        let mut rng = rng();
        let mut world = World::new(&cfg, 0, &mut rng);
        unshielded(&mut world);
        world.ship.lives = 1;
        let at = world.ship.position + Vec2::new(30.0, 0.0);
        world
            .asteroids
            .insert(still_asteroid(AsteroidTier::Small, at, &cfg, &mut rng));

        let report = world.step(&cfg, &PlayerIntent::default(), 16, &mut rng);
        assert!(report.ended_game());
        assert_eq!(world.ship.lives, 0);
        assert!(world.is_game_over());

        let after = world.step(&cfg, &PlayerIntent::default(), 32, &mut rng);
        assert!(after.events.is_empty());
    }

    #[test]
    fn life_pickup_at_max_changes_nothing() {
        let cfg = quiet_config();
        let mut rng = rng();
        let mut world = World::new(&cfg, 0, &mut rng);
        world.ship.lives = cfg.max_lives;
        world.powerups.insert(PowerUp {
            position: world.ship.position,
            kind: PowerUpKind::Life,
            spawned_ms: 0,
        });
        world.step(&cfg, &PlayerIntent::default(), 16, &mut rng);
        assert_eq!(world.ship.lives, cfg.max_lives);
        assert!(world.powerups.is_empty(), "pickup is consumed anyway");
        assert!(world.floating_texts.is_empty());
    }

    /// Drop a pickup of `kind` on the ship and run one frame at `t = 16`.
    fn pick_up(world: &mut World, kind: PowerUpKind, cfg: &GameConfig, rng: &mut StdRng) {
        world.powerups.insert(PowerUp {
            position: world.ship.position,
            kind,
            spawned_ms: 0,
        });
        let report = world.step(cfg, &PlayerIntent::default(), 16, rng);
        assert!(world.powerups.is_empty());
        assert!(report
            .events
            .iter()
            .any(|e| matches!(e, WorldEvent::PowerUpCollected(k) if *k == kind)));
    }

    #[test]
    fn triple_shot_pickup_spreads_the_next_volley() {
        use crate::geometry::heading_vec;

        let cfg = quiet_config();
        let mut rng = rng();
        let mut world = World::new(&cfg, 0, &mut rng);
        unshielded(&mut world);
        pick_up(&mut world, PowerUpKind::TripleShot, &cfg, &mut rng);
        assert!(world.ship.has_buff(BuffKind::TripleShot));

        let heading = world.ship.heading;
        let fire = PlayerIntent {
            fire: true,
            ..Default::default()
        };
        world.step(&cfg, &fire, 32, &mut rng);

        let velocities: Vec<Vec2> = world.bullets.values().map(|b| b.velocity).collect();
        assert_eq!(velocities.len(), 3);
        for (velocity, offset) in velocities.iter().zip([-0.18_f32, 0.0, 0.18]) {
            let expected = heading_vec(heading + offset) * cfg.bullet_speed;
            assert!((*velocity - expected).length() < 1e-4);
        }
    }

    #[test]
    fn bomb_pickup_starts_a_shockwave_at_the_ship() {
        let cfg = quiet_config();
        let mut rng = rng();
        let mut world = World::new(&cfg, 0, &mut rng);
        unshielded(&mut world);
        pick_up(&mut world, PowerUpKind::Bomb, &cfg, &mut rng);

        assert_eq!(
            world.shockwave,
            Some(Shockwave {
                center: world.ship.position,
                started_ms: 16,
            })
        );
        assert!(world.ship.buffs.is_empty(), "bomb is not a timed buff");
    }

    #[test]
    fn invincible_pickup_shields_the_ship_for_five_seconds() {
        let cfg = quiet_config();
        let mut rng = rng();
        let mut world = World::new(&cfg, 0, &mut rng);
        unshielded(&mut world);
        pick_up(&mut world, PowerUpKind::Invincible, &cfg, &mut rng);

        assert!(world.ship.shield_active);
        assert_eq!(world.ship.shield_end_ms, 16 + 5_000);

        let at = world.ship.position;
        world
            .asteroids
            .insert(still_asteroid(AsteroidTier::Large, at, &cfg, &mut rng));
        let report = world.step(&cfg, &PlayerIntent::default(), 2_000, &mut rng);
        assert_eq!(world.ship.lives, cfg.starting_lives);
        assert_eq!(report.lives_lost(), 0);
    }

    #[test]
    fn slowmo_scales_asteroids_but_not_bullets() {
        let cfg = quiet_config();
        let mut rng = rng();
        let mut world = World::new(&cfg, 0, &mut rng);
        let mut a = still_asteroid(AsteroidTier::Small, Vec2::new(10.0, 10.0), &cfg, &mut rng);
        a.base_velocity = Vec2::new(1.0, 0.0);
        a.velocity = a.base_velocity;
        let id = world.asteroids.insert(a);
        world.bullets.insert(Bullet {
            position: Vec2::new(700.0, 500.0),
            velocity: Vec2::new(7.0, 0.0),
            life: 30,
        });
        world.ship.activate_buff(BuffKind::SlowMo, 0, &cfg);

        world.step(&cfg, &PlayerIntent::default(), 16, &mut rng);
        assert!((world.asteroids.get(id).unwrap().velocity.x - 0.4).abs() < 1e-6);
        assert_eq!(world.bullets.values().next().unwrap().velocity.x, 7.0);

        world.ship.buffs.clear();
        world.step(&cfg, &PlayerIntent::default(), 32, &mut rng);
        assert_eq!(world.asteroids.get(id).unwrap().velocity.x, 1.0);
    }

    #[test]
    fn laser_cuts_asteroids_along_the_heading() {
        let cfg = quiet_config();
        let mut rng = rng();
        let mut world = World::new(&cfg, 0, &mut rng);
        world.ship.heading = 0.0;
        let ahead = world.ship.position + Vec2::new(200.0, 5.0);
        let beside = world.ship.position + Vec2::new(0.0, 120.0);
        world
            .asteroids
            .insert(still_asteroid(AsteroidTier::Large, ahead, &cfg, &mut rng));
        let kept = world
            .asteroids
            .insert(still_asteroid(AsteroidTier::Large, beside, &cfg, &mut rng));
        world.ship.activate_buff(BuffKind::Laser, 0, &cfg);

        let report = world.step(&cfg, &PlayerIntent::default(), 16, &mut rng);
        assert_eq!(report.score_delta(), cfg.laser_score);
        assert_eq!(world.asteroids.len(), 1, "laser kills do not split");
        assert!(world.asteroids.contains(kept));
        assert!(world.laser_beam(&cfg).is_some());
    }

    #[test]
    fn fire_edge_spawns_one_bullet() {
        let cfg = quiet_config();
        let mut rng = rng();
        let mut world = World::new(&cfg, 0, &mut rng);
        let fire = PlayerIntent {
            fire: true,
            ..Default::default()
        };
        world.step(&cfg, &fire, 16, &mut rng);
        assert_eq!(world.bullets.len(), 1);
        world.step(&cfg, &PlayerIntent::default(), 32, &mut rng);
        assert_eq!(world.bullets.len(), 1);
    }

    #[test]
    fn hud_reports_level_and_buff_seconds() {
        let cfg = quiet_config();
        let mut rng = rng();
        let mut world = World::new(&cfg, 0, &mut rng);
        world.ship.score = 2_340;
        world.step(&cfg, &PlayerIntent::default(), 1_500, &mut rng);
        let hud = world.hud(&cfg);
        assert_eq!(hud.level, 3);
        assert_eq!(hud.lives, 3);
        assert_eq!(hud.buffs, vec![(BuffKind::Invincible, 3)]);
    }
}
