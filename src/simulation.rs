//! Simulation plugin: owns the session [`World`] and steps it at a fixed rate.
//!
//! ## Systems
//!
//! | System                     | Schedule                    | Purpose                              |
//! |----------------------------|-----------------------------|--------------------------------------|
//! | `spawn_world_system`       | `Startup`                   | Build the first session's world      |
//! | `keyboard_to_intent_system`| `Update / in Playing`       | Sample held keys, latch fire edge    |
//! | `world_step_system`        | `FixedUpdate / in Playing`  | One [`World::step`] per fixed tick   |
//!
//! The step reads the fixed clock, so the world always sees a monotonic
//! millisecond timestamp that advances by one tick per call.

use crate::config::{load_game_config, GameConfig};
use crate::constants::STEP_HZ;
use crate::menu::GameState;
use crate::player::{keyboard_to_intent_system, PlayerIntent};
use crate::world::{KillCause, World, WorldEvent};
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::env;

/// Environment variable holding a `u64` seed for reproducible sessions.
pub const SEED_ENV: &str = "ASTEROIDS_SEED";

/// The live session world.
#[derive(Resource, Debug, Clone)]
pub struct ActiveWorld(pub World);

/// Random source shared by world creation and every step.
#[derive(Resource, Debug, Clone)]
pub struct GameRng(pub StdRng);

impl GameRng {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    /// Seed from [`SEED_ENV`] if it parses, otherwise from OS entropy.
    pub fn from_env() -> Self {
        match env::var(SEED_ENV).ok().map(|raw| raw.parse::<u64>()) {
            Some(Ok(seed)) => {
                info!("Using fixed RNG seed {}", seed);
                Self::seeded(seed)
            }
            Some(Err(err)) => {
                warn!("Ignoring {}: {}", SEED_ENV, err);
                Self(StdRng::from_entropy())
            }
            None => Self(StdRng::from_entropy()),
        }
    }
}

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_hz(STEP_HZ))
            .init_resource::<PlayerIntent>()
            .insert_resource(GameRng::from_env())
            .add_systems(Startup, spawn_world_system.after(load_game_config))
            .add_systems(
                Update,
                keyboard_to_intent_system.run_if(in_state(GameState::Playing)),
            )
            .add_systems(
                FixedUpdate,
                world_step_system.run_if(in_state(GameState::Playing)),
            );
    }
}

#[inline]
fn elapsed_ms(time: &Time<Fixed>) -> u64 {
    time.elapsed().as_millis() as u64
}

/// Create the first session.
pub fn spawn_world_system(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut rng: ResMut<GameRng>,
    time: Res<Time<Fixed>>,
) {
    let world = World::new(&config, elapsed_ms(&time), &mut rng.0);
    info!(
        "Session started with {} asteroids",
        world.asteroids.len()
    );
    commands.insert_resource(ActiveWorld(world));
}

/// Replace the world with a fresh session and clear any held input.
pub fn restart_session(
    world: &mut ActiveWorld,
    intent: &mut PlayerIntent,
    config: &GameConfig,
    rng: &mut GameRng,
    now_ms: u64,
) {
    world.0 = world.0.restart(config, now_ms, &mut rng.0);
    *intent = PlayerIntent::default();
}

/// Advance the world by one frame and hand off to `GameOver` when it ends.
///
/// The fire edge latched by the input system is consumed here so that one
/// key press fires exactly once even when several render frames pass
/// between fixed ticks.
pub fn world_step_system(
    mut world: ResMut<ActiveWorld>,
    mut intent: ResMut<PlayerIntent>,
    mut rng: ResMut<GameRng>,
    config: Res<GameConfig>,
    time: Res<Time<Fixed>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let report = world.0.step(&config, &intent, elapsed_ms(&time), &mut rng.0);
    intent.fire = false;

    for event in &report.events {
        log_event(event);
    }
    if report.ended_game() {
        next_state.set(GameState::GameOver);
    }
}

fn log_event(event: &WorldEvent) {
    match event {
        WorldEvent::AsteroidDestroyed {
            tier,
            position,
            cause,
        } => {
            let how = match cause {
                KillCause::Bullet => "shot",
                KillCause::ShipCollision => "rammed",
                KillCause::Bomb => "bombed",
                KillCause::Laser => "lasered",
            };
            debug!("Asteroid {:?} {} at {:?}", tier, how, position);
        }
        WorldEvent::ScoreAwarded { points, total } => debug!("+{} (score {})", points, total),
        WorldEvent::PowerUpDropped(kind) => debug!("Power-up {:?} dropped", kind),
        WorldEvent::PowerUpCollected(kind) => info!("Picked up {:?}", kind),
        WorldEvent::BuffExpired(kind) => debug!("{} expired", kind.label()),
        WorldEvent::LifeLost { remaining } => info!("Ship hit, {} lives left", remaining),
        WorldEvent::GameOver { score } => info!("Game over, final score {}", score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;

    fn app_with_world() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin));
        app.init_state::<GameState>();
        let config = GameConfig::default();
        let mut rng = GameRng::seeded(3);
        let world = World::new(&config, 0, &mut rng.0);
        app.insert_resource(config)
            .insert_resource(rng)
            .insert_resource(ActiveWorld(world))
            .init_resource::<PlayerIntent>()
            .add_systems(Update, world_step_system);
        app
    }

    #[test]
    fn step_system_consumes_fire_latch() {
        let mut app = app_with_world();
        app.world_mut().resource_mut::<PlayerIntent>().fire = true;
        app.update();
        assert!(!app.world().resource::<PlayerIntent>().fire);
        assert_eq!(app.world().resource::<ActiveWorld>().0.bullets.len(), 1);
    }

    #[test]
    fn losing_last_life_requests_game_over() {
        let mut app = app_with_world();
        {
            let mut active = app.world_mut().resource_mut::<ActiveWorld>();
            let world = &mut active.0;
            world.ship.lives = 1;
            world.ship.shield_active = false;
            world.ship.buffs.clear();
            let at = world.ship.position;
            for asteroid in world.asteroids.values_mut() {
                asteroid.position = at;
                asteroid.base_velocity = Vec2::ZERO;
                asteroid.velocity = Vec2::ZERO;
            }
        }
        app.update();
        app.update();
        assert!(app.world().resource::<ActiveWorld>().0.is_game_over());
        assert_eq!(
            *app.world().resource::<State<GameState>>().get(),
            GameState::GameOver
        );
    }

    #[test]
    fn restart_builds_a_fresh_world() {
        let config = GameConfig::default();
        let mut rng = GameRng::seeded(9);
        let mut active = ActiveWorld(World::new(&config, 0, &mut rng.0));
        let old_ids: Vec<_> = active.0.asteroids.iter().map(|(id, _)| id).collect();
        active.0.ship.score = 500;
        active.0.ship.lives = 0;
        let mut intent = PlayerIntent {
            thrust_forward: true,
            ..Default::default()
        };
        restart_session(&mut active, &mut intent, &config, &mut rng, 42_000);
        assert_eq!(active.0.ship.score, 0);
        assert_eq!(active.0.ship.lives, config.starting_lives);
        assert_eq!(active.0.now_ms(), 42_000);
        assert_eq!(intent, PlayerIntent::default());
        assert_eq!(active.0.asteroids.len(), config.base_asteroids);
        assert!(active.0.asteroids.iter().all(|(id, _)| !old_ids.contains(&id)));
    }
}
