//! Glyph rendering
//!
//! `SpriteFont::draw_string` hands each visible glyph to a `GlyphRenderer`:
//! - `RecordingRenderer` keeps the draw calls (layout dumps, tests)
//! - `CanvasRenderer` blits glyphs from the sprite sheet into an RGBA canvas

pub mod canvas;

pub use canvas::{render_text, Canvas, CanvasRenderer};

use crate::font::glyph::{Rect, Vec2};
use crate::utils::color::parse_hex_color_alpha;

/// Linear RGBA color (0.0-1.0 per channel)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse "RRGGBBAA" / "RRGGBB" / "RGB" (optional '#'); None on invalid input
    pub fn from_hex(hex: &str) -> Option<Self> {
        let (r, g, b, a) = parse_hex_color_alpha(hex)?;
        Some(Color::rgba(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        ))
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Receives one textured quad per visible glyph
pub trait GlyphRenderer {
    /// Draw the sprite sheet region `subrect` with its top-left at `position`
    fn draw_glyph(&mut self, position: Vec2, subrect: &Rect, color: Color);
}

/// One recorded `draw_glyph` call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub position: Vec2,
    pub subrect: Rect,
    pub color: Color,
}

/// Renderer that only records what it was asked to draw
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub calls: Vec<DrawCall>,
}

impl GlyphRenderer for RecordingRenderer {
    fn draw_glyph(&mut self, position: Vec2, subrect: &Rect, color: Color) {
        self.calls.push(DrawCall {
            position,
            subrect: *subrect,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_hex() {
        assert_eq!(Color::from_hex("ff0000"), Some(Color::rgba(1.0, 0.0, 0.0, 1.0)));
        assert_eq!(Color::from_hex("#fff"), Some(Color::WHITE));
        assert_eq!(Color::from_hex("00000000"), Some(Color::TRANSPARENT));
        assert_eq!(Color::from_hex("nope"), None);
    }

    #[test]
    fn test_recording_renderer() {
        let mut r = RecordingRenderer::default();
        r.draw_glyph(Vec2::new(1.0, 2.0), &Rect::new(0, 0, 4, 4), Color::BLACK);
        assert_eq!(r.calls.len(), 1);
        assert_eq!(r.calls[0].position, Vec2::new(1.0, 2.0));
        assert_eq!(r.calls[0].color, Color::BLACK);
    }
}
