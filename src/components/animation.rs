//! Per-entity animation state.
//!
//! [`Animated`] points at a definition in
//! [`AnimatedDefs`](crate::resources::animateddefs::AnimatedDefs) and owns the
//! mutable [`AnimationState`] the resolver reads and replaces every tick.

use bevy_ecs::prelude::Component;

use crate::components::graphic::Graphic;

/// Sentinel for "never cycled yet".
pub const NEVER_CYCLED: i64 = -1;

/// Cached cycling state for one entity.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationState {
    /// Index into whichever frame set is active. Always used modulo its length.
    pub current_frame_index: usize,
    /// First tick at which the next advance is permitted.
    pub next_cycle_tick: i64,
    /// Forces a recomputation on the next resolve.
    pub dirty: bool,
    pub cached_frame: Option<Graphic>,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self {
            current_frame_index: 0,
            next_cycle_tick: NEVER_CYCLED,
            dirty: false,
            cached_frame: None,
        }
    }
}

impl AnimationState {
    /// State restored from a save: the cache is empty and gets rehydrated.
    pub fn restored(current_frame_index: usize, next_cycle_tick: i64) -> Self {
        Self {
            current_frame_index,
            next_cycle_tick,
            ..Self::default()
        }
    }
}

/// Animation component attached to an entity.
#[derive(Debug, Clone, Component)]
pub struct Animated {
    /// Key of the definition in `AnimatedDefs`.
    pub def_key: String,
    pub state: AnimationState,
}

impl Animated {
    pub fn new(def_key: impl Into<String>) -> Self {
        Self {
            def_key: def_key.into(),
            state: AnimationState::default(),
        }
    }

    /// Request a recomputation on the next resolve, boundary or not.
    pub fn mark_dirty(&mut self) {
        self.state.dirty = true;
    }

    pub fn cur_graphic(&self) -> Option<&Graphic> {
        self.state.cached_frame.as_ref()
    }
}
