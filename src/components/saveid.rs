//! Stable identifier used to match saved animation state to entities.

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SaveId(pub u32);
