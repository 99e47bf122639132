//! Asteroids game library
//!
//! A frame-stepped arcade shooter: the [`world`] module holds the pure
//! simulation step, and the Bevy plugins in [`simulation`], [`menu`], and
//! [`rendering`] drive, present, and restart it.

pub mod arena;
pub mod asteroid;
pub mod asteroid_rendering;
pub mod config;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod graphics;
pub mod menu;
pub mod particles;
pub mod player;
pub mod powerup;
pub mod rendering;
pub mod simulation;
pub mod starfield;
pub mod world;
