//! Animated frame cycling library.
//!
//! Cycles the frame an entity displays depending on whether it is moving,
//! on a fixed tick clock, and persists the minimal state across saves. This
//! module exposes the ECS components, resources, systems and events for the
//! driver binary and for integration tests.

pub mod components;
pub mod error;
pub mod events;
pub mod game;
pub mod resources;
pub mod savegame;
pub mod systems;
