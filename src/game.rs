//! World setup, schedules and the demo scene run by the driver binary.
//!
//! The tick schedule advances the clock, moves the demo wanderers and then
//! resolves every animation, so the render schedule always reads a fresh
//! cache.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::animation::Animated;
use crate::components::bodykind::{BodyKind, Gender, LifeStageGraphics};
use crate::components::graphic::Graphic;
use crate::components::layeredappearance::LayeredAppearance;
use crate::components::mapposition::MapPosition;
use crate::components::pather::Pather;
use crate::components::saveid::SaveId;
use crate::events::audio::AudioCmd;
use crate::resources::animateddefs::{AnimatedDefs, AnimatedProps};
use crate::resources::erroronce::ErrorOnce;
use crate::resources::gameconfig::GameConfig;
use crate::resources::tickmanager::TickManager;
use crate::systems::animation::{animated_tick, refresh_animation_observer};
use crate::systems::render::rebuild_layered_appearances;
use crate::systems::time::tick_clock;

/// Chance per tick that a wanderer starts or stops walking.
const WANDER_TOGGLE_ONE_IN: u32 = 90;
const WANDER_STEP: f32 = 0.05;

/// Insert the resources and observer the animation systems need.
///
/// Existing resources are kept.
pub fn register_animation(world: &mut World) {
    world.init_resource::<TickManager>();
    world.init_resource::<AnimatedDefs>();
    world.init_resource::<ErrorOnce>();
    world.init_resource::<Messages<AudioCmd>>();
    world.add_observer(refresh_animation_observer);
    world.flush();
}

/// Build a world for `config` with the given definitions.
pub fn setup_world(config: &GameConfig, defs: AnimatedDefs) -> World {
    let mut world = World::new();
    world.insert_resource(TickManager::default().with_ticks_per_second(config.ticks_per_second));
    world.insert_resource(defs);
    world.insert_resource(config.clone());
    register_animation(&mut world);
    world
}

/// Simulation phase: clock, movement, animation.
pub fn tick_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems((tick_clock, wander_system, animated_tick).chain());
    schedule
}

/// Render phase preparation. Runs after [`tick_schedule`].
pub fn render_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(rebuild_layered_appearances);
    schedule
}

/// Randomly start and stop walking, and move while walking.
pub fn wander_system(mut query: Query<(&mut Pather, &mut MapPosition)>) {
    for (mut pather, mut position) in query.iter_mut() {
        if fastrand::u32(..WANDER_TOGGLE_ONE_IN) == 0 {
            pather.moving_now = !pather.moving_now;
        }
        if pather.moving_now {
            position.x += (fastrand::f32() - 0.5) * WANDER_STEP;
            position.y += (fastrand::f32() - 0.5) * WANDER_STEP;
        }
    }
}

/// Definitions used when no definitions file is available.
pub fn demo_defs() -> AnimatedDefs {
    let mut defs = AnimatedDefs::default();
    defs.insert(
        "Muffalo",
        AnimatedProps::new(0.25)
            .with_moving_frames(
                (0..4)
                    .map(|i| Graphic::new(format!("Animal/Muffalo_walk_{i}")).with_draw_size(3.0, 3.0))
                    .collect(),
            )
            .with_sound("Hoof_Step"),
    );
    defs.insert(
        "Beacon",
        AnimatedProps::new(1.0).with_still_frames(vec![
            Graphic::new("Building/Beacon_on"),
            Graphic::new("Building/Beacon_off"),
        ]),
    );
    defs.insert(
        "Windmill",
        AnimatedProps::new(0.5).with_moving_frames(
            (0..3)
                .map(|i| Graphic::new(format!("Building/Windmill_{i}")))
                .collect(),
        ),
    );
    defs
}

/// Spawn one entity per demo definition. Save ids start at 1.
pub fn spawn_demo_entities(world: &mut World) {
    let muffalo_body = BodyKind::new(
        Gender::Female,
        LifeStageGraphics::new(Graphic::new("Animal/Muffalo").with_draw_size(3.0, 3.0))
            .with_female_body(Graphic::new("Animal/MuffaloFemale").with_draw_size(3.0, 3.0))
            .with_desiccated_body(Graphic::new("Animal/Dessicated_Muffalo")),
    )
    .with_pack_animal(true);
    let appearance = LayeredAppearance::from_base(muffalo_body.base_appearance());

    world.spawn((
        SaveId(1),
        Animated::new("Muffalo"),
        muffalo_body,
        appearance,
        Pather::default(),
        MapPosition::new(10.0, 10.0),
    ));
    world.spawn((SaveId(2), Animated::new("Beacon"), MapPosition::new(4.0, 8.0)));
    world.spawn((
        SaveId(3),
        Animated::new("Windmill"),
        Pather::moving(),
        MapPosition::new(20.0, 2.0),
    ));
    world.flush();
    debug!("Spawned demo entities");
}
