use asteroids::config::{self, GameConfig};
use asteroids::constants::{FIELD_HEIGHT, FIELD_WIDTH};
use asteroids::graphics;
use asteroids::menu::GameOverPlugin;
use asteroids::rendering::RenderingPlugin;
use asteroids::simulation::SimulationPlugin;
use bevy::prelude::*;
use bevy::window::WindowResolution;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Asteroids".into(),
                resolution: WindowResolution::new(FIELD_WIDTH as u32, FIELD_HEIGHT as u32),
                resizable: false,
                ..Default::default()
            }),
            ..Default::default()
        }))
        .insert_resource(ClearColor(Color::srgb_u8(0, 0, 10)))
        // Insert GameConfig with compiled defaults; load_game_config will
        // overwrite it from assets/game.toml (if present) in the Startup schedule.
        .insert_resource(GameConfig::default())
        // GameOverPlugin registers GameState, which SimulationPlugin's run
        // conditions depend on.
        .add_plugins(GameOverPlugin)
        .add_plugins(SimulationPlugin)
        .add_plugins(RenderingPlugin)
        .add_systems(
            Startup,
            (
                config::load_game_config,
                graphics::setup_camera.after(config::load_game_config),
            ),
        )
        .run();
}
