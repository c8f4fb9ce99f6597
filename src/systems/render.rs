//! Render-phase collection.
//!
//! Drawing itself belongs to the host. This module prepares what it needs
//! after the tick phase has run:
//! - [`rebuild_layered_appearances`] regenerates derived layers that an
//!   animation change invalidated.
//! - [`collect_overlay_draws`] lists the overlays of single-layer entities.
//!   Layered entities show their animation through their own layers and never
//!   get an overlay.

use bevy_ecs::prelude::*;

use crate::components::animation::Animated;
use crate::components::graphic::Graphic;
use crate::components::layeredappearance::LayeredAppearance;
use crate::components::mapposition::MapPosition;

/// Facing of a drawn graphic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rot4 {
    #[default]
    North,
    East,
    South,
    West,
}

/// One overlay to draw on top of an entity.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayDraw {
    pub entity: Entity,
    pub frame: Graphic,
    pub position: MapPosition,
    pub rotation: Rot4,
    pub altitude_offset: f32,
}

pub fn rebuild_layered_appearances(mut query: Query<&mut LayeredAppearance>) {
    for mut appearance in query.iter_mut() {
        if !appearance.is_valid() {
            appearance.rebuild();
        }
    }
}

/// Overlays for every single-layer animated entity with a cached frame.
///
/// Anchored at the entity's position (origin when it has none), facing north,
/// with no extra offset. Does not touch animation state.
pub fn collect_overlay_draws(world: &mut World) -> Vec<OverlayDraw> {
    let mut query = world
        .query_filtered::<(Entity, &Animated, Option<&MapPosition>), Without<LayeredAppearance>>();
    query
        .iter(world)
        .filter_map(|(entity, animated, position)| {
            animated.cur_graphic().map(|frame| OverlayDraw {
                entity,
                frame: frame.clone(),
                position: position.copied().unwrap_or_default(),
                rotation: Rot4::North,
                altitude_offset: 0.0,
            })
        })
        .collect()
}
