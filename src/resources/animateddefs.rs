//! Animation definition registry.
//!
//! Definitions are immutable and shared by every entity whose
//! [`Animated`](crate::components::animation::Animated) component names them.
//! They are usually loaded from a JSON object keyed by definition name:
//!
//! ```json
//! {
//!   "Muffalo": {
//!     "moving_frames": [{ "path": "Animal/Muffalo_walk_a" }, { "path": "Animal/Muffalo_walk_b" }],
//!     "seconds_between_frames": 0.25,
//!     "sound": "Hoof_Step"
//!   }
//! }
//! ```

use std::path::Path;

use bevy_ecs::prelude::Resource;
use log::info;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::components::graphic::Graphic;
use crate::error::{AnimError, Result};

fn default_use_base_graphic() -> bool {
    true
}

/// Immutable description of how one kind of entity animates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimatedProps {
    /// Frames cycled while the entity moves.
    #[serde(default)]
    pub moving_frames: Vec<Graphic>,
    /// Frames cycled while the entity stands still.
    #[serde(default)]
    pub still_frames: Vec<Graphic>,
    /// Must be positive; anything else disables cycling.
    pub seconds_between_frames: f32,
    /// Sound played on each moving-frame advance.
    #[serde(default)]
    pub sound: Option<String>,
    /// Idle multi-layer entities without still frames fall back to their stock look.
    #[serde(default = "default_use_base_graphic")]
    pub use_base_graphic: bool,
}

impl AnimatedProps {
    pub fn new(seconds_between_frames: f32) -> Self {
        Self {
            moving_frames: Vec::new(),
            still_frames: Vec::new(),
            seconds_between_frames,
            sound: None,
            use_base_graphic: true,
        }
    }

    pub fn with_moving_frames(mut self, frames: Vec<Graphic>) -> Self {
        self.moving_frames = frames;
        self
    }

    pub fn with_still_frames(mut self, frames: Vec<Graphic>) -> Self {
        self.still_frames = frames;
        self
    }

    pub fn with_sound(mut self, sound: impl Into<String>) -> Self {
        self.sound = Some(sound.into());
        self
    }

    pub fn with_use_base_graphic(mut self, use_base_graphic: bool) -> Self {
        self.use_base_graphic = use_base_graphic;
        self
    }

    pub fn is_valid(&self) -> bool {
        self.seconds_between_frames > 0.0
    }
}

/// Central registry of animation definitions keyed by name.
#[derive(Resource, Debug, Default)]
pub struct AnimatedDefs {
    pub defs: FxHashMap<String, AnimatedProps>,
}

impl AnimatedDefs {
    pub fn insert(&mut self, key: impl Into<String>, props: AnimatedProps) {
        self.defs.insert(key.into(), props);
    }

    pub fn get(&self, key: &str) -> Option<&AnimatedProps> {
        self.defs.get(key)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let defs: FxHashMap<String, AnimatedProps> = serde_json::from_str(json)?;
        Ok(Self { defs })
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| AnimError::io(path, e))?;
        let defs = Self::from_json_str(&text)?;
        info!("Loaded {} animation definitions from {:?}", defs.defs.len(), path);
        Ok(defs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_definitions_with_defaults() {
        let defs = AnimatedDefs::from_json_str(
            r#"{
                "Muffalo": {
                    "moving_frames": [{ "path": "walk_a" }, { "path": "walk_b" }],
                    "seconds_between_frames": 0.25,
                    "sound": "Hoof_Step"
                },
                "Beacon": {
                    "still_frames": [{ "path": "on" }, { "path": "off" }],
                    "seconds_between_frames": 1.0,
                    "use_base_graphic": false
                }
            }"#,
        )
        .unwrap();

        let muffalo = defs.get("Muffalo").unwrap();
        assert_eq!(muffalo.moving_frames.len(), 2);
        assert!(muffalo.still_frames.is_empty());
        assert_eq!(muffalo.sound.as_deref(), Some("Hoof_Step"));
        assert!(muffalo.use_base_graphic);

        let beacon = defs.get("Beacon").unwrap();
        assert_eq!(beacon.still_frames[1].path, "off");
        assert!(!beacon.use_base_graphic);
        assert!(defs.get("Missing").is_none());
    }

    #[test]
    fn rejects_missing_interval() {
        let err = AnimatedDefs::from_json_str(r#"{ "Bad": { "moving_frames": [] } }"#);
        assert!(matches!(err, Err(AnimError::Json(_))));
    }

    #[test]
    fn zero_interval_is_invalid() {
        assert!(!AnimatedProps::new(0.0).is_valid());
        assert!(!AnimatedProps::new(-1.0).is_valid());
        assert!(AnimatedProps::new(0.1).is_valid());
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = AnimatedDefs::load_from_file("/definitely/not/here.json");
        assert!(matches!(err, Err(AnimError::Io { .. })));
    }
}
