//! Game configuration resource.
//!
//! Settings for the headless simulation driver, loaded from an INI file.
//! Missing keys keep their defaults so a partial or absent file still starts.
//!
//! # Configuration File Format
//!
//! ```ini
//! [simulation]
//! ticks_per_second = 60
//! ticks = 600
//!
//! [assets]
//! defs = ./animated_defs.json
//!
//! [save]
//! path = ./animated_save.json
//! ```

use std::path::PathBuf;

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;

use crate::error::{AnimError, Result};
use crate::resources::tickmanager::DEFAULT_TICKS_PER_SECOND;

const DEFAULT_TICKS: u64 = 600;
const DEFAULT_DEFS_PATH: &str = "./animated_defs.json";
const DEFAULT_SAVE_PATH: &str = "./animated_save.json";
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Ticks that make one in-game second.
    pub ticks_per_second: u32,
    /// Number of ticks the driver simulates.
    pub ticks: u64,
    /// Animation definitions file.
    pub defs_path: PathBuf,
    /// Save file used by `--load`/`--save`.
    pub save_path: PathBuf,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    pub fn new() -> Self {
        Self {
            ticks_per_second: DEFAULT_TICKS_PER_SECOND,
            ticks: DEFAULT_TICKS,
            defs_path: PathBuf::from(DEFAULT_DEFS_PATH),
            save_path: PathBuf::from(DEFAULT_SAVE_PATH),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current values.
    pub fn load_from_file(&mut self) -> Result<()> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| AnimError::Config(format!("Failed to load config file: {}", e)))?;

        // [simulation] section
        if let Some(tps) = config.getuint("simulation", "ticks_per_second").ok().flatten() {
            let tps = u32::try_from(tps).map_err(|_| {
                AnimError::Config(format!("simulation.ticks_per_second {} is out of range", tps))
            })?;
            if tps == 0 {
                return Err(AnimError::Config(
                    "simulation.ticks_per_second must be positive".to_string(),
                ));
            }
            self.ticks_per_second = tps;
        }
        if let Some(ticks) = config.getuint("simulation", "ticks").ok().flatten() {
            self.ticks = ticks;
        }

        // [assets] section
        if let Some(defs) = config.get("assets", "defs") {
            self.defs_path = PathBuf::from(defs);
        }

        // [save] section
        if let Some(save) = config.get("save", "path") {
            self.save_path = PathBuf::from(save);
        }

        info!(
            "Loaded config: {} ticks/s, {} ticks, defs={:?}, save={:?}",
            self.ticks_per_second, self.ticks, self.defs_path, self.save_path
        );

        Ok(())
    }

    /// Save configuration to the INI file, creating it if needed.
    pub fn save_to_file(&self) -> Result<()> {
        let mut config = Ini::new();

        config.set(
            "simulation",
            "ticks_per_second",
            Some(self.ticks_per_second.to_string()),
        );
        config.set("simulation", "ticks", Some(self.ticks.to_string()));
        config.set(
            "assets",
            "defs",
            Some(self.defs_path.to_string_lossy().into_owned()),
        );
        config.set(
            "save",
            "path",
            Some(self.save_path.to_string_lossy().into_owned()),
        );

        config
            .write(&self.config_path)
            .map_err(|e| AnimError::io(&self.config_path, e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");
        std::fs::write(&path, "[simulation]\nticks = 42\n").unwrap();

        let mut config = GameConfig::with_path(&path);
        config.load_from_file().unwrap();

        assert_eq!(config.ticks, 42);
        assert_eq!(config.ticks_per_second, DEFAULT_TICKS_PER_SECOND);
        assert_eq!(config.defs_path, PathBuf::from(DEFAULT_DEFS_PATH));
    }

    #[test]
    fn save_then_load_keeps_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");

        let mut config = GameConfig::with_path(&path);
        config.ticks_per_second = 30;
        config.ticks = 900;
        config.defs_path = PathBuf::from("defs/custom.json");
        config.save_to_file().unwrap();

        let mut loaded = GameConfig::with_path(&path);
        loaded.load_from_file().unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn zero_tick_rate_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");
        std::fs::write(&path, "[simulation]\nticks_per_second = 0\n").unwrap();

        let mut config = GameConfig::with_path(&path);
        assert!(matches!(config.load_from_file(), Err(AnimError::Config(_))));
    }

    #[test]
    fn out_of_range_tick_rate_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");
        std::fs::write(&path, "[simulation]\nticks_per_second = 4294967296\n").unwrap();

        let mut config = GameConfig::with_path(&path);
        assert!(matches!(config.load_from_file(), Err(AnimError::Config(_))));
        assert_eq!(config.ticks_per_second, DEFAULT_TICKS_PER_SECOND);
    }

    #[test]
    fn missing_file_is_an_error() {
        let mut config = GameConfig::with_path("/definitely/not/here.ini");
        assert!(config.load_from_file().is_err());
    }
}
