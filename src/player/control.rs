//! Ship input integration and keyboard mapping.
//!
//! ## Pipeline
//!
//! 1. [`keyboard_to_intent_system`] (`Update`) copies held arrow keys into
//!    [`PlayerIntent`] and latches a Space press into `intent.fire`.
//! 2. The fixed-rate world step reads the intent and calls [`integrate_input`].
//! 3. The step clears `fire` after consuming it so one press fires once even
//!    if several render frames pass between fixed steps.
//!
//! Keeping the input abstraction separate makes the movement logic testable
//! without a window: tests fill the intent directly.

use super::state::{PlayerIntent, Ship};
use crate::config::GameConfig;
use crate::geometry::{heading_vec, wrap_position};
use bevy::prelude::*;

/// Rotate, accelerate, clamp, and move the ship for one frame.
///
/// Each velocity component is clamped independently to `±max_speed` before
/// the position update, so the ship's speed along a diagonal can exceed
/// `max_speed` but neither axis can.
pub fn integrate_input(ship: &mut Ship, intent: &PlayerIntent, config: &GameConfig) {
    if intent.turn_left {
        ship.heading -= config.turn_step;
    }
    if intent.turn_right {
        ship.heading += config.turn_step;
    }

    let thrust = heading_vec(ship.heading) * config.thrust_accel;
    if intent.thrust_forward {
        ship.velocity += thrust;
    }
    if intent.thrust_reverse {
        ship.velocity -= thrust;
    }

    ship.velocity = ship
        .velocity
        .clamp(Vec2::splat(-config.max_speed), Vec2::splat(config.max_speed));
    ship.position = wrap_position(
        ship.position + ship.velocity,
        config.field_width,
        config.field_height,
    );
}

/// Translate the arrow keys and Space into [`PlayerIntent`].
///
/// - **←/→** → turn
/// - **↑** → thrust forward, **↓** → thrust in reverse
/// - **Space** (just pressed) → latch `fire`
pub fn keyboard_to_intent_system(keys: Res<ButtonInput<KeyCode>>, mut intent: ResMut<PlayerIntent>) {
    intent.turn_left = keys.pressed(KeyCode::ArrowLeft);
    intent.turn_right = keys.pressed(KeyCode::ArrowRight);
    intent.thrust_forward = keys.pressed(KeyCode::ArrowUp);
    intent.thrust_reverse = keys.pressed(KeyCode::ArrowDown);
    if keys.just_pressed(KeyCode::Space) {
        intent.fire = true;
    }
}

// ── Unit tests ────────────────────────────────────────────────────────────────
