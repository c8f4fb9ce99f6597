//! Descriptive attributes of a multi-layer (creature-like) entity.
//!
//! [`BodyKind`] holds what the default-appearance resolution needs: gender,
//! the graphics of the current life stage and race flags. The
//! [`BodyKind::base_appearance`] method is that resolution.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

use crate::components::graphic::{Graphic, Rgba, ShaderKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    None,
    Male,
    Female,
}

/// Graphics defined by the entity's current life stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifeStageGraphics {
    pub body: Graphic,
    #[serde(default)]
    pub female_body: Option<Graphic>,
    #[serde(default)]
    pub desiccated_body: Option<Graphic>,
}

impl LifeStageGraphics {
    pub fn new(body: Graphic) -> Self {
        Self {
            body,
            female_body: None,
            desiccated_body: None,
        }
    }

    pub fn with_female_body(mut self, graphic: Graphic) -> Self {
        self.female_body = Some(graphic);
        self
    }

    pub fn with_desiccated_body(mut self, graphic: Graphic) -> Self {
        self.desiccated_body = Some(graphic);
        self
    }
}

/// Full set of stock layers for a multi-layer entity.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseAppearance {
    pub naked: Graphic,
    pub rotting: Graphic,
    pub pack: Option<Graphic>,
    pub desiccated: Option<Graphic>,
}

/// `<path>Pack`, plain cutout, same draw size as `naked`.
pub fn pack_variant(naked: &Graphic) -> Graphic {
    Graphic {
        path: format!("{}Pack", naked.path),
        shader: ShaderKind::Cutout,
        color: Rgba::WHITE,
        draw_size: naked.draw_size,
    }
}

#[derive(Debug, Clone, Component)]
pub struct BodyKind {
    pub gender: Gender,
    pub life_stage: LifeStageGraphics,
    pub pack_animal: bool,
}

impl BodyKind {
    pub fn new(gender: Gender, life_stage: LifeStageGraphics) -> Self {
        Self {
            gender,
            life_stage,
            pack_animal: false,
        }
    }

    pub fn with_pack_animal(mut self, pack_animal: bool) -> Self {
        self.pack_animal = pack_animal;
        self
    }

    /// Resolve the stock look of this body.
    ///
    /// - naked: the female body when the entity is female and one exists,
    ///   otherwise the regular body.
    /// - rotting: the naked graphic redrawn with the skin shader and the fixed
    ///   rotting tint.
    /// - pack: `<naked path>Pack` for pack animals.
    /// - desiccated: only when the life stage defines one.
    pub fn base_appearance(&self) -> BaseAppearance {
        let naked = match (&self.gender, &self.life_stage.female_body) {
            (Gender::Female, Some(female)) => female.clone(),
            _ => self.life_stage.body.clone(),
        };
        let rotting = naked.colored(ShaderKind::CutoutSkin, Rgba::ROTTING);
        let pack = self.pack_animal.then(|| pack_variant(&naked));
        let desiccated = self.life_stage.desiccated_body.clone();

        BaseAppearance {
            naked,
            rotting,
            pack,
            desiccated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage() -> LifeStageGraphics {
        LifeStageGraphics::new(Graphic::new("Animal/Muffalo").with_draw_size(3.0, 3.0))
            .with_female_body(Graphic::new("Animal/MuffaloFemale"))
    }

    #[test]
    fn female_uses_female_body() {
        let body = BodyKind::new(Gender::Female, stage());
        assert_eq!(body.base_appearance().naked.path, "Animal/MuffaloFemale");
    }

    #[test]
    fn male_uses_regular_body() {
        let body = BodyKind::new(Gender::Male, stage());
        assert_eq!(body.base_appearance().naked.path, "Animal/Muffalo");
    }

    #[test]
    fn female_without_female_body_falls_back() {
        let body = BodyKind::new(
            Gender::Female,
            LifeStageGraphics::new(Graphic::new("Animal/Boomrat")),
        );
        assert_eq!(body.base_appearance().naked.path, "Animal/Boomrat");
    }

    #[test]
    fn rotting_variant_is_tinted() {
        let body = BodyKind::new(Gender::Male, stage());
        let base = body.base_appearance();
        assert_eq!(base.rotting.path, base.naked.path);
        assert_eq!(base.rotting.shader, ShaderKind::CutoutSkin);
        assert_eq!(base.rotting.color, Rgba::ROTTING);
    }

    #[test]
    fn pack_variant_only_for_pack_animals() {
        let plain = BodyKind::new(Gender::Male, stage());
        assert!(plain.base_appearance().pack.is_none());

        let pack = BodyKind::new(Gender::Male, stage()).with_pack_animal(true);
        let graphic = pack.base_appearance().pack.unwrap();
        assert_eq!(graphic.path, "Animal/MuffaloPack");
        assert_eq!(graphic.draw_size, (3.0, 3.0));
        assert_eq!(graphic.color, Rgba::WHITE);
    }

    #[test]
    fn desiccated_variant_follows_life_stage() {
        let body = BodyKind::new(Gender::Male, stage());
        assert!(body.base_appearance().desiccated.is_none());

        let dry = BodyKind::new(
            Gender::Male,
            stage().with_desiccated_body(Graphic::new("Animal/Dessicated")),
        );
        assert_eq!(
            dry.base_appearance().desiccated.map(|g| g.path),
            Some("Animal/Dessicated".to_string())
        );
    }
}
