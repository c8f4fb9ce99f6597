//! Frame handles.
//!
//! A [`Graphic`] is the opaque handle the animation code passes around: it
//! names a texture path and carries the few render hints the host needs to
//! draw it. Nothing here loads or rasterizes textures.

use serde::{Deserialize, Serialize};

/// Shader used by the host when drawing a graphic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShaderKind {
    #[default]
    Cutout,
    CutoutSkin,
}

/// Plain RGBA colour in the 0..=1 range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);
    /// Tint applied to a body graphic to obtain its rotting variant.
    pub const ROTTING: Rgba = Rgba::new(0.34, 0.32, 0.3, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Rgba::WHITE
    }
}

fn default_draw_size() -> (f32, f32) {
    (1.0, 1.0)
}

/// A renderable frame: texture path plus shader, tint and draw size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Graphic {
    pub path: String,
    #[serde(default)]
    pub shader: ShaderKind,
    #[serde(default)]
    pub color: Rgba,
    #[serde(default = "default_draw_size")]
    pub draw_size: (f32, f32),
}

impl Graphic {
    /// Create a graphic with the cutout shader, white tint and unit size.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            shader: ShaderKind::Cutout,
            color: Rgba::WHITE,
            draw_size: default_draw_size(),
        }
    }

    pub fn with_draw_size(mut self, width: f32, height: f32) -> Self {
        self.draw_size = (width, height);
        self
    }

    /// Same texture drawn with another shader and tint.
    pub fn colored(&self, shader: ShaderKind, color: Rgba) -> Graphic {
        Graphic {
            path: self.path.clone(),
            shader,
            color,
            draw_size: self.draw_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colored_keeps_path_and_size() {
        let base = Graphic::new("Things/Muffalo").with_draw_size(2.0, 2.0);
        let rotting = base.colored(ShaderKind::CutoutSkin, Rgba::ROTTING);
        assert_eq!(rotting.path, "Things/Muffalo");
        assert_eq!(rotting.draw_size, (2.0, 2.0));
        assert_eq!(rotting.shader, ShaderKind::CutoutSkin);
        assert_eq!(rotting.color, Rgba::ROTTING);
        assert_eq!(base.color, Rgba::WHITE);
    }

    #[test]
    fn deserialize_fills_defaults() {
        let g: Graphic = serde_json::from_str(r#"{ "path": "Things/Gear_a" }"#).unwrap();
        assert_eq!(g, Graphic::new("Things/Gear_a"));
    }
}
