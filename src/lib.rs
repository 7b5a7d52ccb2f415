//! Dark Matter presentation library.
//!
//! This module exposes the ECS components, resources, systems, and events
//! behind the game's camera shake and main menu, for use by the game binary
//! and integration tests.

pub mod components;
pub mod events;
pub mod resources;
pub mod systems;
