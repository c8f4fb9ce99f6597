//! Clock systems.
//!
//! Move the shared [`TickManager`](crate::resources::tickmanager::TickManager)
//! forward. Ticks never go backwards.
use bevy_ecs::prelude::*;

use crate::resources::tickmanager::TickManager;

/// One simulation step. Runs first in the tick schedule.
pub fn tick_clock(mut clock: ResMut<TickManager>) {
    clock.ticks_game += 1;
}

/// Skip the clock ahead by `ticks` without running the tick schedule.
/// Negative values are ignored.
pub fn advance_ticks(world: &mut World, ticks: i64) {
    let mut clock = world.resource_mut::<TickManager>();
    clock.ticks_game += ticks.max(0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_only_moves_forward() {
        let mut world = World::new();
        world.insert_resource(TickManager::default());

        advance_ticks(&mut world, 5);
        advance_ticks(&mut world, -3);
        assert_eq!(world.resource::<TickManager>().ticks_game, 5);

        let mut schedule = Schedule::default();
        schedule.add_systems(tick_clock);
        schedule.run(&mut world);
        assert_eq!(world.resource::<TickManager>().ticks_game, 6);
    }
}
