//! Player-specific rendering: ship outline, shield ring, and bullets.
//!
//! Everything here is immediate-mode gizmos; the ship is three lines and the
//! bullets are small circles, so retained meshes would buy nothing.

use super::state::Ship;
use crate::config::GameConfig;
use crate::geometry::heading_vec;
use crate::rendering::world_to_screen;
use crate::simulation::ActiveWorld;
use bevy::prelude::*;

/// Radius of the shield ring drawn around a shielded ship.
const SHIELD_RING_RADIUS: f32 = 35.0;

/// World-space ship triangle: nose 20 units ahead, fins 15 units out at ±2.5 rad.
pub fn ship_points(ship: &Ship) -> [Vec2; 3] {
    [
        ship.position + heading_vec(ship.heading) * 20.0,
        ship.position + heading_vec(ship.heading + 2.5) * 15.0,
        ship.position + heading_vec(ship.heading - 2.5) * 15.0,
    ]
}

/// Draw the ship triangle, tinted while shielded, plus a fading shield ring.
///
/// The ring's alpha follows the remaining shield time over a 3 s scale.
pub fn ship_gizmo_system(
    mut gizmos: Gizmos,
    world: Res<ActiveWorld>,
    config: Res<GameConfig>,
) {
    let ship = &world.0.ship;
    let now_ms = world.0.now_ms();

    let color = if ship.shield_active {
        Color::srgb_u8(200, 200, 255)
    } else {
        Color::WHITE
    };
    let [nose, left, right] = ship_points(ship).map(|p| world_to_screen(p, &config));
    gizmos.linestrip_2d([nose, left, right, nose], color);

    if ship.shield_active {
        let left_ms = ship.shield_end_ms.saturating_sub(now_ms) as f32;
        let alpha = (left_ms / 3000.0).clamp(0.0, 1.0) * 0.4;
        gizmos.circle_2d(
            world_to_screen(ship.position, &config),
            SHIELD_RING_RADIUS,
            Color::srgba(0.0, 0.59, 1.0, alpha.max(0.08)),
        );
    }
}

/// Draw bullets as small green circles.
pub fn bullet_gizmo_system(mut gizmos: Gizmos, world: Res<ActiveWorld>, config: Res<GameConfig>) {
    for bullet in world.0.bullets.values() {
        gizmos.circle_2d(
            world_to_screen(bullet.position, &config),
            3.0,
            Color::srgb_u8(0, 255, 0),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nose_points_along_heading() {
        let cfg = GameConfig::default();
        let mut ship = Ship::new(&cfg, 0);
        ship.position = Vec2::new(50.0, 50.0);
        ship.heading = 0.0;
        let [nose, left, right] = ship_points(&ship);
        assert!((nose - Vec2::new(70.0, 50.0)).length() < 1e-4);
        // Fins sit behind the centre and mirror each other.
        assert!(left.x < 50.0 && right.x < 50.0);
        assert!((left.y - 50.0 + (right.y - 50.0)).abs() < 1e-4);
    }
}
