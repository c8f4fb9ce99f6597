//! Save and load of animation state.
//!
//! Only the frame index and the next cycle tick survive a save, per entity
//! matched by [`SaveId`]. The cached frame and the dirty flag are rebuilt: a
//! restored entity starts with an empty cache that the next resolve fills at
//! the restored index.
//!
//! Saves are JSON:
//!
//! ```json
//! { "ticks_game": 1200, "entities": [ { "save_id": 1, "def_key": "Muffalo", "cur_index": 2, "ticks_to_cycle": 1210 } ] }
//! ```

use std::path::Path;

use bevy_ecs::prelude::*;
use log::{info, warn};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::components::animation::{Animated, AnimationState, NEVER_CYCLED};
use crate::components::saveid::SaveId;
use crate::error::{AnimError, Result};
use crate::resources::tickmanager::TickManager;

fn never_cycled() -> i64 {
    NEVER_CYCLED
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedEntity {
    pub save_id: u32,
    pub def_key: String,
    #[serde(default)]
    pub cur_index: usize,
    /// First tick at which the next advance happens (inclusive).
    #[serde(default = "never_cycled")]
    pub ticks_to_cycle: i64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SaveGame {
    #[serde(default)]
    pub ticks_game: i64,
    #[serde(default)]
    pub entities: Vec<SavedEntity>,
}

/// Capture the persisted fields of every saveable animated entity.
pub fn snapshot(world: &mut World) -> SaveGame {
    let ticks_game = world
        .get_resource::<TickManager>()
        .map(|clock| clock.ticks_game)
        .unwrap_or_default();

    let mut query = world.query::<(&SaveId, &Animated)>();
    let mut entities: Vec<SavedEntity> = query
        .iter(world)
        .map(|(id, animated)| SavedEntity {
            save_id: id.0,
            def_key: animated.def_key.clone(),
            cur_index: animated.state.current_frame_index,
            ticks_to_cycle: animated.state.next_cycle_tick,
        })
        .collect();
    entities.sort_by_key(|e| e.save_id);

    SaveGame {
        ticks_game,
        entities,
    }
}

/// Write saved state back onto entities with a matching [`SaveId`].
///
/// Sets the clock to the saved tick. Entities matched but lacking
/// [`Animated`] get one. Returns the number of entities restored.
pub fn restore(world: &mut World, save: &SaveGame) -> usize {
    let clock = world
        .get_resource::<TickManager>()
        .copied()
        .unwrap_or_default()
        .with_ticks_game(save.ticks_game);
    world.insert_resource(clock);

    let by_id: FxHashMap<u32, &SavedEntity> =
        save.entities.iter().map(|e| (e.save_id, e)).collect();

    let targets: Vec<(Entity, u32)> = {
        let mut query = world.query::<(Entity, &SaveId)>();
        query.iter(world).map(|(entity, id)| (entity, id.0)).collect()
    };

    let mut restored = 0;
    for (entity, id) in targets {
        let Some(saved) = by_id.get(&id) else {
            continue;
        };
        world.entity_mut(entity).insert(Animated {
            def_key: saved.def_key.clone(),
            state: AnimationState::restored(saved.cur_index, saved.ticks_to_cycle),
        });
        restored += 1;
    }

    if restored < save.entities.len() {
        warn!(
            "{} saved animation entries had no matching entity",
            save.entities.len() - restored
        );
    }
    info!("Restored {} animated entities at tick {}", restored, save.ticks_game);
    restored
}

pub fn save_to_file(save: &SaveGame, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(save)?;
    std::fs::write(path, json).map_err(|e| AnimError::io(path, e))?;
    info!("Saved {} animated entities to {:?}", save.entities.len(), path);
    Ok(())
}

pub fn load_from_file(path: impl AsRef<Path>) -> Result<SaveGame> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| AnimError::io(path, e))?;
    Ok(serde_json::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let save: SaveGame =
            serde_json::from_str(r#"{ "entities": [ { "save_id": 3, "def_key": "Beacon" } ] }"#)
                .unwrap();
        assert_eq!(save.ticks_game, 0);
        assert_eq!(save.entities[0].cur_index, 0);
        assert_eq!(save.entities[0].ticks_to_cycle, -1);
    }

    #[test]
    fn restore_clears_cache_and_dirty() {
        let mut world = World::new();
        world.insert_resource(TickManager::default().with_ticks_per_second(30));
        let mut animated = Animated::new("Beacon");
        animated.state.dirty = true;
        animated.state.cached_frame = Some(crate::components::graphic::Graphic::new("x"));
        let entity = world.spawn((SaveId(7), animated)).id();
        let bystander = world.spawn(SaveId(8)).id();

        let save = SaveGame {
            ticks_game: 500,
            entities: vec![SavedEntity {
                save_id: 7,
                def_key: "Beacon".to_string(),
                cur_index: 3,
                ticks_to_cycle: 510,
            }],
        };
        assert_eq!(restore(&mut world, &save), 1);

        let state = &world.get::<Animated>(entity).unwrap().state;
        assert_eq!(state, &AnimationState::restored(3, 510));
        assert!(world.get::<Animated>(bystander).is_none());

        let clock = world.resource::<TickManager>();
        assert_eq!(clock.ticks_game, 500);
        assert_eq!(clock.ticks_per_second, 30);
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("save.json");
        let save = SaveGame {
            ticks_game: 42,
            entities: vec![SavedEntity {
                save_id: 1,
                def_key: "Muffalo".to_string(),
                cur_index: 2,
                ticks_to_cycle: 50,
            }],
        };
        save_to_file(&save, &path).unwrap();
        assert_eq!(load_from_file(&path).unwrap(), save);
    }

    #[test]
    fn load_garbage_is_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("save.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(load_from_file(&path), Err(AnimError::Json(_))));
    }
}
