//! Player module: ship state, input integration, bullets, and rendering.
//!
//! ## Sub-module layout
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`state`] | `Ship`, `BuffKind`, and the `PlayerIntent` input resource |
//! | [`control`] | Heading/thrust integration, velocity clamp, keyboard mapping |
//! | [`combat`] | Bullets, firing patterns, bullet/ship collision detection |
//! | [`rendering`] | Ship outline, shield ring, bullet gizmos |
//!
//! All public items are re-exported at this level so the rest of the crate
//! can use flat `crate::player::*` imports.

pub mod combat;
pub mod control;
pub mod rendering;
pub mod state;

pub use combat::{find_bullet_hits, find_ship_overlaps, fire_bullets, Bullet};
pub use control::{integrate_input, keyboard_to_intent_system};
pub use rendering::{bullet_gizmo_system, ship_gizmo_system, ship_points};
pub use state::{BuffKind, PlayerIntent, Ship};
