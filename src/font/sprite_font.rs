//! Sprite font
//!
//! Sorted glyph table with default-glyph fallback, plus the measure/draw
//! entry points built on the shared layout iterator.
//!
//! Lookups, measurement and drawing take `&self` and never mutate.
//! Line spacing and the default character change through `&mut self`,
//! so a single writer is enforced by the borrow checker rather than a lock.

use crate::error::{FontError, Result};
use crate::font::glyph::{Glyph, Rect, Vec2};
use crate::font::layout::GlyphLayout;
use crate::font::texture::Texture;
use crate::render::{Color, GlyphRenderer};
use log::debug;

/// Bitmap font: glyph table, line spacing and optional sprite sheet
#[derive(Debug, Clone)]
pub struct SpriteFont {
    /// Strictly ascending by `character`
    glyphs: Vec<Glyph>,
    /// Index into `glyphs` used for missing characters
    default_glyph: Option<usize>,
    line_spacing: f32,
    texture: Option<Texture>,
}

impl SpriteFont {
    /// Build a font from caller-supplied glyphs.
    ///
    /// Glyphs must be strictly ascending by character (no duplicates),
    /// otherwise `FontError::UnsortedGlyphs` names the first offender.
    /// Subrects with a negative or overflowing size are `FontError::OutOfRange`.
    pub fn from_glyphs(glyphs: Vec<Glyph>, line_spacing: f32, texture: Option<Texture>) -> Result<Self> {
        if let Some(index) = glyphs.windows(2).position(|w| w[0].character >= w[1].character) {
            return Err(FontError::UnsortedGlyphs {
                index: index + 1,
                character: glyphs[index + 1].character,
            });
        }
        if let Some(g) = glyphs.iter().find(|g| !g.subrect.is_well_formed()) {
            return Err(FontError::OutOfRange(format!(
                "glyph U+{:04X} subrect {:?}",
                g.character, g.subrect
            )));
        }

        debug!("SpriteFont: {} glyphs, line spacing {:.1}", glyphs.len(), line_spacing);

        Ok(Self {
            glyphs,
            default_glyph: None,
            line_spacing,
            texture,
        })
    }

    /// Binary search for an exact match (no fallback)
    fn glyph_index(&self, character: char) -> Option<usize> {
        let key = character as u32;
        self.glyphs.binary_search_by_key(&key, |g| g.character).ok()
    }

    /// Look up a glyph, falling back to the default glyph
    pub fn find_glyph(&self, character: char) -> Result<&Glyph> {
        match self.glyph_index(character).or(self.default_glyph) {
            Some(index) => Ok(&self.glyphs[index]),
            None => Err(FontError::CharacterNotInFont(character)),
        }
    }

    /// True if the font has a glyph for `character` (default glyph not considered)
    pub fn contains_character(&self, character: char) -> bool {
        self.glyph_index(character).is_some()
    }

    /// Set the fallback glyph for missing characters.
    ///
    /// `'\0'` clears it. Any other character must exist in the font;
    /// on failure no default is set.
    pub fn set_default_character(&mut self, character: char) -> Result<()> {
        self.default_glyph = None;

        if character != '\0' {
            self.find_glyph(character)?;
            self.default_glyph = self.glyph_index(character);
        }
        Ok(())
    }

    /// Current fallback character, if any
    pub fn default_character(&self) -> Option<char> {
        self.default_glyph
            .and_then(|index| char::from_u32(self.glyphs[index].character))
    }

    pub fn line_spacing(&self) -> f32 {
        self.line_spacing
    }

    pub fn set_line_spacing(&mut self, spacing: f32) {
        self.line_spacing = spacing;
    }

    /// All glyphs, ascending by character
    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    /// Sprite sheet the glyph subrects refer to
    pub fn sprite_sheet(&self) -> Option<&Texture> {
        self.texture.as_ref()
    }

    /// Lay out `text`, yielding each visible glyph with its cursor position
    pub fn glyph_layout<'a>(&'a self, text: &'a str) -> GlyphLayout<'a> {
        GlyphLayout::new(self, text)
    }

    /// Callback form of `glyph_layout`: `visit(glyph, x, y, advance)`
    pub fn for_each_glyph<F>(&self, text: &str, mut visit: F) -> Result<()>
    where
        F: FnMut(&Glyph, f32, f32, f32),
    {
        for placed in self.glyph_layout(text) {
            let placed = placed?;
            visit(placed.glyph, placed.x, placed.y, placed.advance);
        }
        Ok(())
    }

    /// Size of the area `text` occupies when drawn at the origin.
    ///
    /// Each visible glyph extends the size to `x + max(width, advance)`
    /// horizontally and to its bottom edge (at least one line spacing)
    /// vertically. The line spacing minimum applies to the absolute bottom,
    /// so only the first line is padded to a full line height; later lines
    /// end at their tallest glyph. Line breaks extend the height to the last
    /// line's top.
    pub fn measure_string(&self, text: &str) -> Result<Vec2> {
        let mut size = Vec2::ZERO;
        let mut layout = self.glyph_layout(text);

        for placed in layout.by_ref() {
            let placed = placed?;
            let glyph = placed.glyph;
            let w = glyph.subrect.width() as f32;
            let h = glyph.subrect.height() as f32 + glyph.y_offset;

            let right = placed.x + w.max(placed.advance);
            let bottom = (placed.y + h).max(self.line_spacing);
            size = size.max(Vec2::new(right, bottom));
        }

        size.y = size.y.max(layout.cursor().y);
        Ok(size)
    }

    /// Pixel rectangle covered by `text` when drawn at `position`.
    ///
    /// Left/top are floored and right/bottom ceiled, so every glyph
    /// position `draw_string` emits lies inside. Returns an empty rect at
    /// (0, 0) when nothing is visible.
    pub fn measure_draw_bounds(&self, text: &str, position: Vec2) -> Result<Rect> {
        let mut bounds: Option<(f32, f32, f32, f32)> = None;

        for placed in self.glyph_layout(text) {
            let placed = placed?;
            let glyph = placed.glyph;
            let w = glyph.subrect.width() as f32;
            let h = glyph.subrect.height() as f32;

            let min_x = position.x + placed.x;
            let min_y = position.y + placed.y + glyph.y_offset;
            let max_x = (min_x + placed.advance).max(min_x + w);
            let max_y = min_y + h;

            bounds = Some(match bounds {
                None => (min_x, min_y, max_x, max_y),
                Some((l, t, r, b)) => (l.min(min_x), t.min(min_y), r.max(max_x), b.max(max_y)),
            });
        }

        Ok(match bounds {
            Some((l, t, r, b)) => Rect::new(l.floor() as i32, t.floor() as i32, r.ceil() as i32, b.ceil() as i32),
            None => Rect::default(),
        })
    }

    /// Draw `text` with its top-left at `position`.
    ///
    /// Lookup failures abort the call; glyphs before the missing character
    /// have already been submitted to the renderer.
    pub fn draw_string<R>(&self, renderer: &mut R, text: &str, position: Vec2, color: Color) -> Result<()>
    where
        R: GlyphRenderer + ?Sized,
    {
        for placed in self.glyph_layout(text) {
            let placed = placed?;
            renderer.draw_glyph(position + placed.draw_offset(), &placed.glyph.subrect, color);
        }
        Ok(())
    }
}
