//! Engine systems.
//!
//! Submodules overview
//! - [`animation`] – resolve animation frames per tick and on invalidation
//! - [`audio`] – bridge with the audio thread
//! - [`render`] – layered appearance rebuild and overlay draw collection
//! - [`time`] – advance the simulation clock

pub mod animation;
pub mod audio;
pub mod render;
pub mod time;
