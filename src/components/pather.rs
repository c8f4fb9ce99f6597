//! Movement status of an entity.
//!
//! The animation resolver only asks one question of the path follower: is the
//! entity moving right now. Entities without a [`Pather`] never move.

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pather {
    pub moving_now: bool,
}

impl Pather {
    pub fn moving() -> Self {
        Self { moving_now: true }
    }
}
