//! Mesh2d-based filled polygon rendering for asteroids.
//!
//! The world owns asteroids as plain data, so the renderer mirrors each one
//! with a retained `Mesh2d` entity tagged by [`AsteroidFill`].  The mesh is
//! built once from the asteroid's outline when it first appears; afterwards
//! only its `Transform` is updated.  Fills whose asteroid has left the world
//! are despawned, which also drops their mesh asset.
//!
//! Gizmo outlines are drawn on top by
//! [`asteroid_outline_gizmo_system`](crate::rendering::asteroid_outline_gizmo_system).

use crate::arena::EntityId;
use crate::asteroid::ASTEROID_SHADES;
use crate::config::GameConfig;
use crate::rendering::world_to_screen;
use crate::simulation::ActiveWorld;
use bevy::prelude::*;
use bevy_asset::RenderAssetUsages;
use bevy_mesh::{Indices, PrimitiveTopology};
use std::collections::HashSet;

/// Mesh entity mirroring one world asteroid.
#[derive(Component, Debug, Clone, Copy)]
pub struct AsteroidFill(pub EntityId);

/// Grey fill for palette slot `shade`.
pub fn rock_color(shade: u8) -> Color {
    match shade % ASTEROID_SHADES {
        0 => Color::srgb_u8(180, 180, 180),
        1 => Color::srgb_u8(140, 140, 140),
        _ => Color::srgb_u8(100, 100, 100),
    }
}

/// Spawn fills for new asteroids and move existing ones.
pub fn sync_asteroid_fills_system(
    mut commands: Commands,
    world: Res<ActiveWorld>,
    config: Res<GameConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut palette: Local<Vec<Handle<ColorMaterial>>>,
    mut fills: Query<(&AsteroidFill, &mut Transform)>,
) {
    if palette.is_empty() {
        *palette = (0..ASTEROID_SHADES)
            .map(|shade| materials.add(ColorMaterial::from_color(rock_color(shade))))
            .collect();
    }

    let asteroids = &world.0.asteroids;
    let mut mirrored = HashSet::new();
    for (fill, mut transform) in fills.iter_mut() {
        if let Some(asteroid) = asteroids.get(fill.0) {
            mirrored.insert(fill.0);
            transform.translation = world_to_screen(asteroid.position, &config).extend(0.0);
        }
    }

    for (id, asteroid) in asteroids.iter() {
        if mirrored.contains(&id) || asteroid.outline.len() < 3 {
            continue;
        }
        // Outline is y-down; flip into camera space.
        let local: Vec<Vec2> = asteroid
            .outline
            .iter()
            .map(|v| Vec2::new(v.x, -v.y))
            .collect();
        let material = palette[(asteroid.shade % ASTEROID_SHADES) as usize].clone();
        commands.spawn((
            Mesh2d(meshes.add(filled_polygon_mesh(&local))),
            MeshMaterial2d(material),
            Transform::from_translation(world_to_screen(asteroid.position, &config).extend(0.0)),
            AsteroidFill(id),
        ));
    }
}

/// Despawn fills whose asteroid no longer exists.
pub fn despawn_orphan_fills(
    mut commands: Commands,
    world: Res<ActiveWorld>,
    fills: Query<(Entity, &AsteroidFill)>,
) {
    for (entity, fill) in fills.iter() {
        if !world.0.asteroids.contains(fill.0) {
            commands.entity(entity).despawn();
        }
    }
}

// ── Geometry helpers ──────────────────────────────────────────────────────────

/// Triangulate a polygon that is star-shaped around the origin.
///
/// A centre vertex is prepended and the rim is fanned around it:
/// triangles `(0, i, i+1)` for every rim edge, wrapping at the end.  Jagged
/// asteroid outlines are not convex, so fanning from a rim vertex would
/// overlap.
pub fn filled_polygon_mesh(vertices: &[Vec2]) -> Mesh {
    let n = vertices.len();
    debug_assert!(n >= 3, "polygon must have ≥ 3 vertices");

    let positions: Vec<[f32; 3]> = std::iter::once([0.0, 0.0, 0.0])
        .chain(vertices.iter().map(|v| [v.x, v.y, 0.0]))
        .collect();
    let normals: Vec<[f32; 3]> = vec![[0.0, 0.0, 1.0]; n + 1];
    // Map ±50 local units to roughly 0–1 UV range.
    let uvs: Vec<[f32; 2]> = positions
        .iter()
        .map(|p| [(p[0] / 100.0) + 0.5, (p[1] / 100.0) + 0.5])
        .collect();

    let rim = n as u32;
    let mut indices: Vec<u32> = Vec::with_capacity(n * 3);
    for i in 1..=rim {
        let next = if i == rim { 1 } else { i + 1 };
        indices.extend_from_slice(&[0, i, next]);
    }

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fan_covers_every_rim_edge() {
        let square = [
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(-1.0, 0.0),
            Vec2::new(0.0, -1.0),
        ];
        let mesh = filled_polygon_mesh(&square);
        let Some(Indices::U32(indices)) = mesh.indices() else {
            panic!("expected u32 indices");
        };
        assert_eq!(indices.len(), 12);
        assert_eq!(&indices[9..], &[0, 4, 1]);
        assert_eq!(mesh.count_vertices(), 5);
    }

    #[test]
    fn palette_has_three_greys() {
        assert_eq!(rock_color(0), Color::srgb_u8(180, 180, 180));
        assert_eq!(rock_color(2), Color::srgb_u8(100, 100, 100));
        assert_eq!(rock_color(5), rock_color(2));
    }
}
