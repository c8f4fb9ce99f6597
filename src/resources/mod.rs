//! ECS resources made available to systems.
//!
//! Overview
//! - `animateddefs` – animation definitions shared by entities
//! - `audio` – bridge and channels for the background audio thread
//! - `erroronce` – report-once registry for configuration problems
//! - `gameconfig` – INI-backed settings of the simulation driver
//! - `tickmanager` – fixed-step simulation clock
pub mod animateddefs;
pub mod audio;
pub mod erroronce;
pub mod gameconfig;
pub mod tickmanager;
