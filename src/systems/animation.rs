//! Animation frame resolution.
//!
//! - [`resolve`] is the state machine: given a definition, the cached
//!   [`AnimationState`], the clock and what the entity is doing, it returns a
//!   [`Resolution`] holding the frame to show, the replacement state and the
//!   side effects the caller must apply.
//! - [`animated_tick`] runs it for every animated entity once per tick so the
//!   cache is never stale when a draw is requested.
//! - [`refresh_animation_observer`] runs it on display invalidation.
//! - [`resolve_for_entity`] is the draw-time getter.
//!
//! # Resolution Flow
//!
//! 1. A definition with a non-positive interval never cycles and is reported once.
//! 2. Before the next cycle tick, and unless a refresh is forced, the cache is returned.
//! 3. On a boundary the next cycle tick is pushed forward and one branch runs:
//!    moving frames (advances, plays the cue), still frames (advances; wins
//!    over the base graphic), the entity's base graphic, or the moving frames
//!    at the current index.
//!
//! # Related
//!
//! - [`crate::components::animation::Animated`] – per-entity state
//! - [`crate::resources::animateddefs::AnimatedDefs`] – definitions

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::trace;

use crate::components::animation::{Animated, AnimationState};
use crate::components::bodykind::{BaseAppearance, BodyKind};
use crate::components::graphic::Graphic;
use crate::components::layeredappearance::LayeredAppearance;
use crate::components::mapposition::MapPosition;
use crate::components::pather::Pather;
use crate::events::audio::AudioCmd;
use crate::events::refresh::RefreshAnimationEvent;
use crate::resources::animateddefs::{AnimatedDefs, AnimatedProps};
use crate::resources::erroronce::ErrorOnce;
use crate::resources::tickmanager::TickManager;

/// How the animated entity renders.
#[derive(Debug, Clone, Copy)]
pub enum EntityShape<'a> {
    /// Single sprite; the animation is drawn as an overlay on top of it.
    Simple,
    /// Layer stack; the animation replaces its primary layer. The body is
    /// needed to fall back to the stock look.
    Layered { body: Option<&'a BodyKind> },
}

/// What the resolver needs to know about the entity this tick.
#[derive(Debug, Clone, Copy)]
pub struct ResolveInput<'a> {
    pub is_moving: bool,
    /// Recompute even if the cycle boundary has not been reached.
    pub force_refresh: bool,
    pub shape: EntityShape<'a>,
}

/// Change to apply to a layered entity's appearance.
#[derive(Debug, Clone, PartialEq)]
pub enum LayerUpdate {
    Keep,
    /// Invalidate the derived layers and swap the primary layer.
    SetPrimary(Graphic),
    /// Invalidate and reapply the stock look.
    ResetToBase(BaseAppearance),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub frame: Option<Graphic>,
    pub state: AnimationState,
    /// Play the definition's cue sound once.
    pub play_cue: bool,
    pub layer_update: LayerUpdate,
    /// The definition has a non-positive interval.
    pub misconfigured: bool,
}

impl Resolution {
    fn unchanged(state: AnimationState) -> Self {
        Self {
            frame: state.cached_frame.clone(),
            state,
            play_cue: false,
            layer_update: LayerUpdate::Keep,
            misconfigured: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Branch {
    Moving,
    Still,
    BaseGraphic,
    /// Moving frames at the current index, no advance.
    Fallback,
}

fn select_branch(props: &AnimatedProps, input: &ResolveInput) -> Branch {
    if input.is_moving && !props.moving_frames.is_empty() {
        return Branch::Moving;
    }
    if !props.still_frames.is_empty() {
        return Branch::Still;
    }
    match input.shape {
        EntityShape::Layered { body: Some(_) } if props.use_base_graphic => Branch::BaseGraphic,
        _ => Branch::Fallback,
    }
}

/// `(index + 1) % len`, without overflowing on an index read from a save.
fn cycled_index(index: usize, len: usize) -> usize {
    (index % len + 1) % len
}

/// Pick `frames[index]` and cache it. An empty set leaves the cache alone.
fn cycled_frame(frames: &[Graphic], state: &mut AnimationState, shape: EntityShape) -> LayerUpdate {
    if frames.is_empty() {
        return LayerUpdate::Keep;
    }
    let frame = frames[state.current_frame_index % frames.len()].clone();
    state.cached_frame = Some(frame.clone());
    match shape {
        EntityShape::Layered { .. } => LayerUpdate::SetPrimary(frame),
        EntityShape::Simple => LayerUpdate::Keep,
    }
}

fn base_graphic(body: &BodyKind, state: &mut AnimationState) -> LayerUpdate {
    let base = body.base_appearance();
    state.cached_frame = Some(base.naked.clone());
    LayerUpdate::ResetToBase(base)
}

fn apply_branch(
    branch: Branch,
    props: &AnimatedProps,
    state: &mut AnimationState,
    shape: EntityShape,
) -> LayerUpdate {
    match (branch, shape) {
        (Branch::Moving | Branch::Fallback, _) => cycled_frame(&props.moving_frames, state, shape),
        (Branch::Still, _) => cycled_frame(&props.still_frames, state, shape),
        (Branch::BaseGraphic, EntityShape::Layered { body: Some(body) }) => {
            base_graphic(body, state)
        }
        (Branch::BaseGraphic, _) => LayerUpdate::Keep,
    }
}

/// Decide which frame an entity shows now.
///
/// Pure: the returned [`Resolution`] carries the new state and the side
/// effects (cue sound, layer update) for the caller to apply. The boundary is
/// reached once `clock.ticks_game >= state.next_cycle_tick`.
///
/// A state whose cache is empty before the boundary (freshly restored from a
/// save) gets the frame at its current index without advancing.
pub fn resolve(
    props: &AnimatedProps,
    state: &AnimationState,
    clock: &TickManager,
    input: ResolveInput,
) -> Resolution {
    let mut next = state.clone();

    if !props.is_valid() {
        next.dirty = false;
        let mut resolution = Resolution::unchanged(next);
        resolution.misconfigured = true;
        return resolution;
    }

    let now = clock.ticks_game;
    let branch = select_branch(props, &input);
    let forced = state.dirty || input.force_refresh;

    if !forced && now < state.next_cycle_tick {
        if next.cached_frame.is_some() {
            return Resolution::unchanged(next);
        }
        let layer_update = apply_branch(branch, props, &mut next, input.shape);
        let mut resolution = Resolution::unchanged(next);
        resolution.layer_update = layer_update;
        return resolution;
    }

    next.next_cycle_tick =
        now.saturating_add(clock.seconds_to_ticks(props.seconds_between_frames));

    let mut play_cue = false;
    match branch {
        Branch::Moving => {
            next.current_frame_index =
                cycled_index(next.current_frame_index, props.moving_frames.len());
            play_cue = props.sound.is_some();
        }
        Branch::Still => {
            next.current_frame_index =
                cycled_index(next.current_frame_index, props.still_frames.len());
        }
        Branch::BaseGraphic | Branch::Fallback => {}
    }
    let layer_update = apply_branch(branch, props, &mut next, input.shape);
    next.dirty = false;

    trace!(
        "resolved {:?} at tick {}: index {} -> {}, next cycle {}",
        branch, now, state.current_frame_index, next.current_frame_index, next.next_cycle_tick
    );

    Resolution {
        frame: next.cached_frame.clone(),
        state: next,
        play_cue,
        layer_update,
        misconfigured: false,
    }
}

/// Components read and written when resolving one entity.
pub type AnimatedQueryData = (
    &'static mut Animated,
    Option<&'static Pather>,
    Option<&'static BodyKind>,
    Option<&'static mut LayeredAppearance>,
    Option<&'static MapPosition>,
);

/// Resolve one entity and apply the result. Returns the cue to play, if any.
#[allow(clippy::too_many_arguments)]
fn step_entity(
    animated: &mut Animated,
    pather: Option<&Pather>,
    body: Option<&BodyKind>,
    appearance: Option<Mut<LayeredAppearance>>,
    position: Option<&MapPosition>,
    defs: &AnimatedDefs,
    clock: &TickManager,
    errors: &mut ErrorOnce,
) -> Option<AudioCmd> {
    let Some(props) = defs.get(&animated.def_key) else {
        errors.error_once(
            &format!("missing-def:{}", animated.def_key),
            format_args!("Animated :: no definition named '{}'", animated.def_key),
        );
        return None;
    };

    let shape = match appearance {
        Some(_) => EntityShape::Layered { body },
        None => EntityShape::Simple,
    };
    let input = ResolveInput {
        is_moving: pather.is_some_and(|p| p.moving_now),
        force_refresh: false,
        shape,
    };

    let resolution = resolve(props, &animated.state, clock, input);
    if resolution.misconfigured {
        errors.error_once(
            &animated.def_key,
            format_args!(
                "Animated :: '{}' seconds_between_frames needs to be more than 0",
                animated.def_key
            ),
        );
    }

    if let Some(mut appearance) = appearance {
        match resolution.layer_update {
            LayerUpdate::Keep => {}
            LayerUpdate::SetPrimary(frame) => {
                appearance.invalidate();
                appearance.set_primary_layer(frame);
            }
            LayerUpdate::ResetToBase(base) => {
                appearance.invalidate();
                appearance.apply_base(base);
            }
        }
    }
    animated.state = resolution.state;

    if !resolution.play_cue {
        return None;
    }
    let position = position.copied().unwrap_or_default();
    props.sound.as_ref().map(|id| AudioCmd::PlayFxAt {
        id: id.clone(),
        x: position.x,
        y: position.y,
    })
}

/// Advance every animated entity against the current tick.
///
/// Contract
/// - Reads [`TickManager`] and [`AnimatedDefs`].
/// - Replaces each [`Animated`] state and updates [`LayeredAppearance`] layers.
/// - Writes an [`AudioCmd::PlayFxAt`] per moving-frame advance with a sound.
pub fn animated_tick(
    mut query: Query<AnimatedQueryData>,
    defs: Res<AnimatedDefs>,
    clock: Res<TickManager>,
    mut errors: ResMut<ErrorOnce>,
    mut audio: MessageWriter<AudioCmd>,
) {
    for (mut animated, pather, body, appearance, position) in query.iter_mut() {
        if let Some(cmd) = step_entity(
            &mut animated,
            pather,
            body,
            appearance,
            position,
            &defs,
            &clock,
            &mut errors,
        ) {
            audio.write(cmd);
        }
    }
}

/// Resolve a single entity immediately, optionally forcing a recomputation.
pub fn refresh_animation_observer(
    trigger: On<RefreshAnimationEvent>,
    mut query: Query<AnimatedQueryData>,
    defs: Res<AnimatedDefs>,
    clock: Res<TickManager>,
    mut errors: ResMut<ErrorOnce>,
    mut audio: MessageWriter<AudioCmd>,
) {
    let event = trigger.event();
    let Ok((mut animated, pather, body, appearance, position)) = query.get_mut(event.entity)
    else {
        return;
    };
    if event.mark_dirty {
        animated.mark_dirty();
    }
    if let Some(cmd) = step_entity(
        &mut animated,
        pather,
        body,
        appearance,
        position,
        &defs,
        &clock,
        &mut errors,
    ) {
        audio.write(cmd);
    }
}

/// Frame an entity should display right now.
///
/// Returns `None` for despawned entities and entities without [`Animated`].
/// Requires [`refresh_animation_observer`] to be registered.
pub fn resolve_for_entity(world: &mut World, entity: Entity) -> Option<Graphic> {
    world.get::<Animated>(entity)?;
    world.trigger(RefreshAnimationEvent {
        entity,
        mark_dirty: false,
    });
    world.flush();
    world
        .get::<Animated>(entity)
        .and_then(|animated| animated.cur_graphic().cloned())
}
