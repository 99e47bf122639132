//! Session state machine: `GameState` definition and `GameOverPlugin`.
//!
//! ## States
//!
//! | State      | Description                                            |
//! |------------|--------------------------------------------------------|
//! | `Playing`  | Initial state; the world steps every fixed tick         |
//! | `GameOver` | World frozen; overlay shown until restart or quit       |
//!
//! Quitting is not a state: `Escape` on the game-over screen writes
//! [`AppExit::Success`] and the app shuts down.
//!
//! ## Systems (registered by `GameOverPlugin`)
//!
//! | System                    | Schedule                 | Purpose                        |
//! |---------------------------|--------------------------|--------------------------------|
//! | `setup_game_over`         | `OnEnter(GameOver)`      | Spawn the final-score overlay  |
//! | `cleanup_game_over`       | `OnExit(GameOver)`       | Despawn overlay entities       |
//! | `game_over_input_system`  | `Update / in GameOver`   | `R` restarts, `Escape` quits   |

use bevy::prelude::*;

mod game_over;

// ── Game state ────────────────────────────────────────────────────────────────

/// Top-level session state.
///
/// [`crate::simulation::SimulationPlugin`] gates input sampling and the world
/// step on `Playing`, so the world stays frozen while the overlay is up.
#[derive(States, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    #[default]
    Playing,
    GameOver,
}

/// Root node of the game-over overlay; despawned on `OnExit(GameOver)`.
#[derive(Component)]
pub struct GameOverRoot;

// ── Plugin ────────────────────────────────────────────────────────────────────

/// Registers `GameState` and the game-over overlay.
///
/// Must be added before [`crate::simulation::SimulationPlugin`] so the state
/// exists when its run conditions are evaluated.
pub struct GameOverPlugin;

impl Plugin for GameOverPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .add_systems(OnEnter(GameState::GameOver), game_over::setup_game_over)
            .add_systems(OnExit(GameState::GameOver), game_over::cleanup_game_over)
            .add_systems(
                Update,
                game_over::game_over_input_system.run_if(in_state(GameState::GameOver)),
            );
    }
}

// ── Colour helpers ────────────────────────────────────────────────────────────

fn title_color() -> Color {
    Color::srgb(1.0, 0.22, 0.22)
}
fn score_color() -> Color {
    Color::srgb(0.95, 0.88, 0.45)
}
fn hint_color() -> Color {
    Color::srgb(0.55, 0.55, 0.65)
}
