//! Glyph layout
//!
//! The one layout algorithm shared by drawing and measurement.
//! Both walk the same `GlyphLayout` iterator, so drawn positions and
//! measured extents can never disagree.
//!
//! ## Cursor rules
//! - `\r`: skipped, cursor unchanged
//! - `\n`: x = 0, y += line spacing
//! - anything else: look up the glyph (default glyph fallback applies),
//!   x += x_offset clamped to >= 0, advance = subrect width + x_advance,
//!   yield the glyph if it is visible, then x += advance

use crate::constants::VISIBLE_WHITESPACE_THRESHOLD;
use crate::error::Result;
use crate::font::glyph::{Glyph, Vec2};
use crate::font::sprite_font::SpriteFont;
use log::trace;
use std::iter::FusedIterator;
use std::str::Chars;

/// One visible glyph placed on the layout cursor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedGlyph<'a> {
    pub glyph: &'a Glyph,
    /// Cursor X relative to the text origin
    pub x: f32,
    /// Line top relative to the text origin (before `y_offset`)
    pub y: f32,
    /// Horizontal distance the cursor moved past this glyph
    pub advance: f32,
}

impl PlacedGlyph<'_> {
    /// Position the glyph's top-left corner is drawn at, relative to the origin
    #[inline]
    pub fn draw_offset(&self) -> Vec2 {
        Vec2::new(self.x, self.y + self.glyph.y_offset)
    }
}

/// Whether a glyph produces output.
///
/// Whitespace is skipped unless its subrect is larger than the threshold
/// in either direction (fonts that draw a box for space-like code points).
#[inline]
pub fn is_visible(character: char, glyph: &Glyph) -> bool {
    !character.is_whitespace()
        || glyph.subrect.width() > VISIBLE_WHITESPACE_THRESHOLD
        || glyph.subrect.height() > VISIBLE_WHITESPACE_THRESHOLD
}

/// Lazy iterator over the visible glyphs of a string.
///
/// Yields `Err` once if a character is missing (and no default glyph is set),
/// then ends. Cloning before iterating restarts the layout from the beginning.
#[derive(Clone)]
pub struct GlyphLayout<'a> {
    font: &'a SpriteFont,
    chars: Chars<'a>,
    x: f32,
    y: f32,
    failed: bool,
}

impl<'a> GlyphLayout<'a> {
    pub(crate) fn new(font: &'a SpriteFont, text: &'a str) -> Self {
        Self {
            font,
            chars: text.chars(),
            x: 0.0,
            y: 0.0,
            failed: false,
        }
    }

    /// Current cursor position (after everything consumed so far)
    pub fn cursor(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

impl<'a> Iterator for GlyphLayout<'a> {
    type Item = Result<PlacedGlyph<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let font = self.font;
        for character in self.chars.by_ref() {
            match character {
                '\r' => continue,
                '\n' => {
                    self.x = 0.0;
                    self.y += font.line_spacing();
                }
                _ => {
                    let glyph = match font.find_glyph(character) {
                        Ok(glyph) => glyph,
                        Err(e) => {
                            self.failed = true;
                            return Some(Err(e));
                        }
                    };

                    self.x = (self.x + glyph.x_offset).max(0.0);
                    let advance = glyph.advance();
                    let x = self.x;
                    self.x += advance;

                    if is_visible(character, glyph) {
                        trace!("layout {:?} at ({:.1}, {:.1}) advance {:.1}", character, x, self.y, advance);
                        return Some(Ok(PlacedGlyph {
                            glyph,
                            x,
                            y: self.y,
                            advance,
                        }));
                    }
                }
            }
        }

        None
    }
}

impl FusedIterator for GlyphLayout<'_> {}
