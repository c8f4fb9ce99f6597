//! ECS components for animated entities.
//!
//! Submodules overview:
//! - [`animation`] – per-entity cycling state and the definition it points at
//! - [`bodykind`] – gender, life-stage graphics and race flags of creature-like entities
//! - [`graphic`] – frame handles passed between the resolver and the host
//! - [`layeredappearance`] – primary and derived layers of multi-layer entities
//! - [`mapposition`] – world-space position used as draw anchor and sound location
//! - [`pather`] – whether the entity is moving this tick
//! - [`saveid`] – stable id matching saved state to entities

pub mod animation;
pub mod bodykind;
pub mod graphic;
pub mod layeredappearance;
pub mod mapposition;
pub mod pather;
pub mod saveid;
