//! Layered appearance cache for multi-layer entities.
//!
//! Entities carrying [`LayeredAppearance`] render their animation as part of
//! their own layer stack instead of through an overlay. The primary ("naked")
//! layer is the one animation swaps; the dependent layers are derived from it
//! and regenerated by
//! [`rebuild_layered_appearances`](crate::systems::render::rebuild_layered_appearances)
//! after an invalidation.

use bevy_ecs::prelude::Component;

use crate::components::bodykind::{BaseAppearance, pack_variant};
use crate::components::graphic::{Graphic, Rgba, ShaderKind};

#[derive(Debug, Clone, Component, Default)]
pub struct LayeredAppearance {
    pub naked: Option<Graphic>,
    pub rotting: Option<Graphic>,
    pub pack: Option<Graphic>,
    /// Life-stage graphic, not derived from the primary layer.
    pub desiccated: Option<Graphic>,
    /// Regenerate a pack layer on rebuild.
    pub pack_animal: bool,
    valid: bool,
}

impl LayeredAppearance {
    pub fn from_base(base: BaseAppearance) -> Self {
        let mut appearance = Self::default();
        appearance.apply_base(base);
        appearance
    }

    pub fn with_pack_animal(mut self, pack_animal: bool) -> Self {
        self.pack_animal = pack_animal;
        self
    }

    /// Drop the layers derived from the primary one. The primary layer stays
    /// until replaced.
    pub fn invalidate(&mut self) {
        self.rotting = None;
        self.pack = None;
        self.valid = false;
    }

    pub fn set_primary_layer(&mut self, frame: Graphic) {
        self.naked = Some(frame);
    }

    /// Replace the whole stack with the stock look; leaves the cache valid.
    pub fn apply_base(&mut self, base: BaseAppearance) {
        self.naked = Some(base.naked);
        self.rotting = Some(base.rotting);
        self.pack_animal = base.pack.is_some();
        self.pack = base.pack;
        self.desiccated = base.desiccated;
        self.valid = true;
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Regenerate derived layers from the primary one if invalidated.
    pub fn rebuild(&mut self) {
        if self.valid {
            return;
        }
        self.rotting = self
            .naked
            .as_ref()
            .map(|naked| naked.colored(ShaderKind::CutoutSkin, Rgba::ROTTING));
        self.pack = match (&self.naked, self.pack_animal) {
            (Some(naked), true) => Some(pack_variant(naked)),
            _ => None,
        };
        self.valid = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalidate_then_rebuild_derives_from_new_primary() {
        let mut appearance = LayeredAppearance::from_base(BaseAppearance {
            naked: Graphic::new("a"),
            rotting: Graphic::new("a").colored(ShaderKind::CutoutSkin, Rgba::ROTTING),
            pack: Some(Graphic::new("aPack")),
            desiccated: Some(Graphic::new("dry")),
        });
        assert!(appearance.is_valid());
        assert!(appearance.pack_animal);

        appearance.invalidate();
        appearance.set_primary_layer(Graphic::new("b"));
        assert!(!appearance.is_valid());
        assert!(appearance.pack.is_none());
        assert!(appearance.rotting.is_none());

        appearance.rebuild();
        assert!(appearance.is_valid());
        assert_eq!(appearance.rotting.as_ref().unwrap().path, "b");
        assert_eq!(appearance.naked.as_ref().unwrap().path, "b");
        assert_eq!(appearance.pack.as_ref().unwrap().path, "bPack");
        assert_eq!(appearance.desiccated.as_ref().unwrap().path, "dry");
    }

    #[test]
    fn rebuild_without_pack_flag_has_no_pack_layer() {
        let mut appearance = LayeredAppearance::default();
        appearance.set_primary_layer(Graphic::new("b"));
        appearance.rebuild();
        assert!(appearance.pack.is_none());

        let mut appearance = LayeredAppearance::default().with_pack_animal(true);
        appearance.set_primary_layer(Graphic::new("b"));
        appearance.rebuild();
        assert_eq!(appearance.pack.as_ref().unwrap().path, "bPack");
    }
}
