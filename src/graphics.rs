use bevy::prelude::*;

/// Setup camera for 2D rendering.
///
/// The default `Camera2d` maps one world unit to one pixel, so the 800×600
/// field exactly fills the window.
pub fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
    info!("Camera spawned");
}
