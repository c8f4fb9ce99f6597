//! Fixed-step simulation clock.
//!
//! [`TickManager`] is the clock collaborator of the animation resolver. The
//! tick counter only moves forward, advanced by
//! [`advance_ticks`](crate::systems::time::advance_ticks).

use bevy_ecs::prelude::Resource;

pub const DEFAULT_TICKS_PER_SECOND: u32 = 60;

/// Longest interval a duration converts to, about a year at 60 ticks/s.
pub const MAX_INTERVAL_TICKS: i64 = 1 << 31;

#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickManager {
    /// Ticks elapsed since the game started.
    pub ticks_game: i64,
    /// How many ticks make one in-game second.
    pub ticks_per_second: u32,
}

impl Default for TickManager {
    fn default() -> Self {
        TickManager {
            ticks_game: 0,
            ticks_per_second: DEFAULT_TICKS_PER_SECOND,
        }
    }
}

impl TickManager {
    pub fn with_ticks_per_second(mut self, ticks_per_second: u32) -> Self {
        self.ticks_per_second = ticks_per_second.max(1);
        self
    }

    pub fn with_ticks_game(mut self, ticks_game: i64) -> Self {
        self.ticks_game = ticks_game;
        self
    }

    /// Convert a duration to whole ticks, rounding to nearest.
    ///
    /// Clamped to `1..=MAX_INTERVAL_TICKS`: a positive interval always moves
    /// the next cycle tick past the current one, and a huge one cannot
    /// overflow the clock arithmetic.
    pub fn seconds_to_ticks(&self, seconds: f32) -> i64 {
        let ticks = (f64::from(seconds) * f64::from(self.ticks_per_second)).round();
        (ticks as i64).clamp(1, MAX_INTERVAL_TICKS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seconds_round_to_nearest_tick() {
        let clock = TickManager::default();
        assert_eq!(clock.seconds_to_ticks(1.0), 60);
        assert_eq!(clock.seconds_to_ticks(0.25), 15);
        assert_eq!(clock.seconds_to_ticks(0.009), 1);
    }

    #[test]
    fn custom_rate() {
        let clock = TickManager::default().with_ticks_per_second(10);
        assert_eq!(clock.seconds_to_ticks(1.0), 10);
        assert_eq!(clock.seconds_to_ticks(0.5), 5);
    }

    #[test]
    fn huge_interval_is_clamped() {
        let clock = TickManager::default();
        assert_eq!(clock.seconds_to_ticks(1.0e30), MAX_INTERVAL_TICKS);
        assert_eq!(clock.seconds_to_ticks(f32::INFINITY), MAX_INTERVAL_TICKS);
        assert_eq!(clock.seconds_to_ticks(f32::NAN), 1);
    }
}
