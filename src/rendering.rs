//! Rendering systems: gizmo layers, the HUD, and world-synced text labels.
//!
//! ## Layer Model
//!
//! | Layer             | Technology | Source                               |
//! |-------------------|------------|--------------------------------------|
//! | Stars             | Gizmos     | `World::stars`                       |
//! | Asteroid fills    | `Mesh2d`   | [`crate::asteroid_rendering`]        |
//! | Asteroid outlines | Gizmos     | `World::asteroids`                   |
//! | Particles         | Gizmos     | `World::particles`                   |
//! | Power-up discs    | Gizmos     | `World::powerups`                    |
//! | Power-up glyphs   | `Text2d`   | synced by id                         |
//! | Ship + shield     | Gizmos     | [`crate::player::rendering`]         |
//! | Bullets           | Gizmos     | [`crate::player::rendering`]         |
//! | Laser beam        | Gizmos     | `World::laser_beam`                  |
//! | Bomb shockwave    | Gizmos     | `World::shockwave_ring`              |
//! | Floating texts    | `Text2d`   | synced by id                         |
//! | HUD               | Bevy UI    | `World::hud`                         |
//!
//! The world uses a y-down frame with its origin in the top-left corner;
//! [`world_to_screen`] maps it onto the centred, y-up camera space.

use crate::arena::{Arena, EntityId};
use crate::asteroid_rendering::{despawn_orphan_fills, sync_asteroid_fills_system};
use crate::config::{load_game_config, GameConfig};
use crate::player::{bullet_gizmo_system, ship_gizmo_system};
use crate::simulation::ActiveWorld;
use bevy::prelude::*;
use std::collections::HashSet;

/// Particle colour at the end of its life.
const PARTICLE_FADED: [u8; 3] = [0, 0, 255];
/// Particle colour at spawn.
const PARTICLE_FRESH: [u8; 3] = [255, 160, 0];

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_hud.after(load_game_config))
            .add_systems(
                Update,
                (
                    star_gizmo_system,
                    asteroid_outline_gizmo_system,
                    particle_gizmo_system,
                    powerup_gizmo_system,
                    ship_gizmo_system,
                    bullet_gizmo_system,
                    laser_gizmo_system,
                    shockwave_gizmo_system,
                    hud_display_system,
                    floating_text_sync_system,
                    powerup_glyph_sync_system,
                    sync_asteroid_fills_system,
                    despawn_orphan_fills,
                )
                    .run_if(resource_exists::<ActiveWorld>),
            );
    }
}

/// Map a world point (y-down, origin top-left) to camera space (y-up, origin centre).
#[inline]
pub fn world_to_screen(point: Vec2, config: &GameConfig) -> Vec2 {
    Vec2::new(
        point.x - config.field_width / 2.0,
        config.field_height / 2.0 - point.y,
    )
}

/// Linear blend from the faded to the fresh particle colour.
pub fn particle_gradient(life_fraction: f32) -> Color {
    let t = life_fraction.clamp(0.0, 1.0);
    let channel = |i: usize| {
        let from = PARTICLE_FADED[i] as f32;
        let to = PARTICLE_FRESH[i] as f32;
        (from + (to - from) * t) as u8
    };
    Color::srgb_u8(channel(0), channel(1), channel(2))
}

// ── Gizmo layers ──────────────────────────────────────────────────────────────

pub fn star_gizmo_system(mut gizmos: Gizmos, world: Res<ActiveWorld>, config: Res<GameConfig>) {
    for star in &world.0.stars {
        gizmos.circle_2d(world_to_screen(star.position, &config), star.radius, star.color);
    }
}

/// Closed polygon outline per asteroid, drawn over the mesh fill.
pub fn asteroid_outline_gizmo_system(
    mut gizmos: Gizmos,
    world: Res<ActiveWorld>,
    config: Res<GameConfig>,
) {
    for asteroid in world.0.asteroids.values() {
        if asteroid.outline.len() < 2 {
            continue;
        }
        let points: Vec<Vec2> = asteroid
            .outline
            .iter()
            .chain(asteroid.outline.first())
            .map(|&local| world_to_screen(asteroid.position + local, &config))
            .collect();
        gizmos.linestrip_2d(points, Color::srgb_u8(220, 220, 220));
    }
}

/// Particles shrink with remaining life.  Life-loss bursts are always red;
/// otherwise a fixed colour wins over the lifetime gradient.
pub fn particle_gizmo_system(
    mut gizmos: Gizmos,
    world: Res<ActiveWorld>,
    config: Res<GameConfig>,
) {
    for particle in world.0.particles.iter() {
        let fraction = particle.life_fraction();
        let radius = particle.size * fraction;
        if radius < 0.5 {
            continue;
        }
        let color = if particle.life_loss {
            Color::srgb_u8(255, 0, 0)
        } else {
            particle.color.unwrap_or_else(|| particle_gradient(fraction))
        };
        gizmos.circle_2d(world_to_screen(particle.position, &config), radius, color);
    }
}

pub fn powerup_gizmo_system(mut gizmos: Gizmos, world: Res<ActiveWorld>, config: Res<GameConfig>) {
    for powerup in world.0.powerups.values() {
        let center = world_to_screen(powerup.position, &config);
        gizmos.circle_2d(center, config.powerup_radius, powerup.kind.color());
        gizmos.circle_2d(center, config.powerup_radius - 3.0, powerup.kind.color());
    }
}

/// Core beam plus two soft halo lines either side.
pub fn laser_gizmo_system(mut gizmos: Gizmos, world: Res<ActiveWorld>, config: Res<GameConfig>) {
    let Some(beam) = world.0.laser_beam(&config) else {
        return;
    };
    let start = world_to_screen(beam.start, &config);
    let end = world_to_screen(beam.end, &config);
    let normal = (end - start).normalize_or_zero().perp();

    gizmos.line_2d(start, end, Color::srgb_u8(255, 60, 220));
    for (offset, color) in [
        (beam.width / 4.0, Color::srgba_u8(255, 255, 255, 180)),
        (beam.width / 2.0, Color::srgba_u8(255, 120, 255, 100)),
        (beam.width, Color::srgba_u8(180, 80, 255, 60)),
    ] {
        gizmos.line_2d(start + normal * offset, end + normal * offset, color);
        gizmos.line_2d(start - normal * offset, end - normal * offset, color);
    }
}

pub fn shockwave_gizmo_system(
    mut gizmos: Gizmos,
    world: Res<ActiveWorld>,
    config: Res<GameConfig>,
) {
    let Some((center, radius)) = world.0.shockwave_ring(&config) else {
        return;
    };
    let center = world_to_screen(center, &config);
    gizmos.circle_2d(center, radius, Color::srgba_u8(255, 200, 60, 110));
    gizmos.circle_2d(center, radius + 12.0, Color::srgba_u8(255, 140, 0, 50));
}

// ── HUD ───────────────────────────────────────────────────────────────────────

/// Root node of the permanent HUD.
#[derive(Component)]
pub struct HudDisplay;

/// Spawn the HUD in the top-left corner.
pub fn setup_hud(mut commands: Commands, config: Res<GameConfig>) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(10.0),
                top: Val::Px(10.0),
                ..default()
            },
            HudDisplay,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(format!("Lives: {}", config.starting_lives)),
                TextFont {
                    font_size: config.hud_font_size,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}

/// Render the HUD text for a given world snapshot.
pub fn hud_text(world: &ActiveWorld, config: &GameConfig) -> String {
    let hud = world.0.hud(config);
    let mut text = format!(
        "Lives: {}   Score: {}   Level: {}",
        hud.lives, hud.score, hud.level
    );
    for (kind, seconds) in hud.buffs {
        text.push_str(&format!("\n{}: {}s", kind.label(), seconds));
    }
    text
}

/// Refresh the HUD whenever the world changed.
pub fn hud_display_system(
    world: Res<ActiveWorld>,
    config: Res<GameConfig>,
    parent_query: Query<&Children, With<HudDisplay>>,
    mut text_query: Query<&mut Text>,
) {
    if !world.is_changed() {
        return;
    }
    for children in parent_query.iter() {
        for child in children.iter() {
            if let Ok(mut text) = text_query.get_mut(child) {
                *text = Text::new(hud_text(&world, &config));
            }
        }
    }
}

// ── World-synced labels ───────────────────────────────────────────────────────

/// `Text2d` entity mirroring one floating text in the world.
#[derive(Component, Debug, Clone, Copy)]
pub struct FloatingLabel(pub EntityId);

/// `Text2d` entity mirroring one power-up's glyph.
#[derive(Component, Debug, Clone, Copy)]
pub struct PowerUpGlyph(pub EntityId);

/// Ids in `arena` without a mirror entity yet, given the ids already mirrored.
fn unmirrored<T>(arena: &Arena<T>, mirrored: &HashSet<EntityId>) -> Vec<EntityId> {
    arena
        .iter()
        .map(|(id, _)| id)
        .filter(|id| !mirrored.contains(id))
        .collect()
}

/// Spawn, move, fade, and despawn floating-text labels to match the world.
pub fn floating_text_sync_system(
    mut commands: Commands,
    world: Res<ActiveWorld>,
    config: Res<GameConfig>,
    mut labels: Query<(Entity, &FloatingLabel, &mut Transform, &mut TextColor)>,
) {
    let now_ms = world.0.now_ms();
    let texts = &world.0.floating_texts;
    let mut mirrored = HashSet::new();

    for (entity, label, mut transform, mut color) in labels.iter_mut() {
        match texts.get(label.0) {
            Some(text) => {
                mirrored.insert(label.0);
                transform.translation = world_to_screen(text.position, &config).extend(10.0);
                color.0 = text.color.with_alpha(text.opacity(now_ms, &config));
            }
            None => commands.entity(entity).despawn(),
        }
    }

    for id in unmirrored(texts, &mirrored) {
        let Some(text) = texts.get(id) else {
            continue;
        };
        commands.spawn((
            Text2d::new(text.text.clone()),
            TextFont {
                font_size: 22.0,
                ..default()
            },
            TextColor(text.color),
            Transform::from_translation(world_to_screen(text.position, &config).extend(10.0)),
            FloatingLabel(id),
        ));
    }
}

/// Keep one glyph label centred on each power-up.
pub fn powerup_glyph_sync_system(
    mut commands: Commands,
    world: Res<ActiveWorld>,
    config: Res<GameConfig>,
    mut glyphs: Query<(Entity, &PowerUpGlyph, &mut Transform)>,
) {
    let powerups = &world.0.powerups;
    let mut mirrored = HashSet::new();

    for (entity, glyph, mut transform) in glyphs.iter_mut() {
        match powerups.get(glyph.0) {
            Some(powerup) => {
                mirrored.insert(glyph.0);
                transform.translation = world_to_screen(powerup.position, &config).extend(5.0);
            }
            None => commands.entity(entity).despawn(),
        }
    }

    for id in unmirrored(powerups, &mirrored) {
        let Some(powerup) = powerups.get(id) else {
            continue;
        };
        commands.spawn((
            Text2d::new(powerup.kind.glyph()),
            TextFont {
                font_size: 18.0,
                ..default()
            },
            TextColor(Color::BLACK),
            Transform::from_translation(world_to_screen(powerup.position, &config).extend(5.0)),
            PowerUpGlyph(id),
        ));
    }
}
