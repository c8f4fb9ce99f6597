//! Display-invalidation event.
//!
//! Triggering a [`RefreshAnimationEvent`] resolves the entity's animation right
//! away through
//! [`refresh_animation_observer`](crate::systems::animation::refresh_animation_observer).
//! Set `mark_dirty` when something outside the animation changed (for
//! example the entity's kind) so the frame is recomputed even before the next
//! cycle tick.
//!
//! # Example
//!
//! ```ignore
//! commands.trigger(RefreshAnimationEvent { entity, mark_dirty: true });
//! ```

use bevy_ecs::prelude::*;

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshAnimationEvent {
    /// The animated entity.
    pub entity: Entity,
    /// Force a recomputation before the next cycle tick.
    pub mark_dirty: bool,
}
