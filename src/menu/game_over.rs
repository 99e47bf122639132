use super::*;
use crate::config::GameConfig;
use crate::player::PlayerIntent;
use crate::simulation::{restart_session, ActiveWorld, GameRng};

/// Spawn the game-over overlay centred over the frozen world.
pub(super) fn setup_game_over(
    mut commands: Commands,
    world: Res<ActiveWorld>,
    config: Res<GameConfig>,
) {
    let hud = world.0.hud(&config);
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                top: Val::Px(0.0),
                row_gap: Val::Px(16.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
            ZIndex(300),
            GameOverRoot,
        ))
        .with_children(|overlay| {
            overlay.spawn((
                Text::new("GAME OVER"),
                TextFont {
                    font_size: 46.0,
                    ..default()
                },
                TextColor(title_color()),
            ));
            overlay.spawn((
                Text::new(format!("Score: {}   Level: {}", hud.score, hud.level)),
                TextFont {
                    font_size: config.hud_font_size,
                    ..default()
                },
                TextColor(score_color()),
            ));
            overlay.spawn((
                Text::new("Press R to play again, Escape to quit"),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(hint_color()),
            ));
        });
}

/// Despawn all game-over overlay entities.
pub(super) fn cleanup_game_over(mut commands: Commands, query: Query<Entity, With<GameOverRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

/// `R` starts a fresh session, `Escape` quits.
#[allow(clippy::too_many_arguments)]
pub(super) fn game_over_input_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut world: ResMut<ActiveWorld>,
    mut intent: ResMut<PlayerIntent>,
    mut rng: ResMut<GameRng>,
    config: Res<GameConfig>,
    time: Res<Time<Fixed>>,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit: MessageWriter<AppExit>,
) {
    if keys.just_pressed(KeyCode::KeyR) {
        let now_ms = time.elapsed().as_millis() as u64;
        restart_session(&mut world, &mut intent, &config, &mut rng, now_ms);
        info!("Restarting session");
        next_state.set(GameState::Playing);
    } else if keys.just_pressed(KeyCode::Escape) {
        info!("Quit requested from game-over screen");
        exit.write(AppExit::Success);
    }
}
