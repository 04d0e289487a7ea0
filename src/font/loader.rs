//! SpriteFont binary loader
//!
//! Reads the `.spritefont` format produced by MakeSpriteFont.
//!
//! ## Layout (little endian)
//! ```text
//! "DXTKfont"                      8-byte magic
//! u32 glyph_count
//! glyph_count x Glyph             32 bytes each: u32 char, i32 l/t/r/b, f32 x_off/y_off/x_adv
//! f32 line_spacing
//! u32 default_character           0 = none
//! u32 width, height, dxgi_format, stride, rows
//! stride * rows bytes             sprite sheet pixels
//! ```

use crate::constants::{GLYPH_RECORD_SIZE, MAX_GLYPH_COUNT, SPRITEFONT_MAGIC};
use crate::error::{FontError, Result};
use crate::font::glyph::Glyph;
use crate::font::reader::BinaryReader;
use crate::font::sprite_font::SpriteFont;
use crate::font::texture::{PixelFormat, Texture};
use log::{debug, info, warn};
use std::path::Path;

/// Options applied while loading
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    /// Promote the sprite sheet format to its sRGB variant
    pub force_srgb: bool,
}

impl SpriteFont {
    /// Parse a `.spritefont` blob already in memory
    pub fn from_bytes(data: &[u8], options: LoadOptions) -> Result<Self> {
        let mut reader = BinaryReader::new(data);

        // Validate the header
        let magic = reader.read_bytes(SPRITEFONT_MAGIC.len()).map_err(|_| FontError::InvalidMagic)?;
        if magic != SPRITEFONT_MAGIC {
            warn!("SpriteFont: invalid magic {:?}", String::from_utf8_lossy(magic));
            return Err(FontError::InvalidMagic);
        }

        // Glyph table
        let glyph_count = reader.read::<u32>()?;
        if glyph_count > MAX_GLYPH_COUNT {
            return Err(FontError::OutOfRange(format!("glyph count {}", glyph_count)));
        }
        let glyphs: Vec<Glyph> = reader.read_array(glyph_count as usize)?;

        // Font properties
        let line_spacing = reader.read::<f32>()?;
        let default_code = reader.read::<u32>()?;
        let default_character = char::from_u32(default_code).ok_or(FontError::InvalidCharacterCode(default_code))?;

        // Sprite sheet
        let width = reader.read::<u32>()?;
        let height = reader.read::<u32>()?;
        let mut format = PixelFormat::from_dxgi(reader.read::<u32>()?);
        let stride = reader.read::<u32>()?;
        let rows = reader.read::<u32>()?;
        let pixels = reader.read_bytes(stride as usize * rows as usize)?;

        if options.force_srgb {
            format = format.to_srgb();
        }

        if reader.remaining() > 0 {
            debug!("SpriteFont: {} trailing bytes ignored", reader.remaining());
        }

        let texture = Texture::new(width, height, format, stride, rows, pixels.to_vec())?;
        let mut font = SpriteFont::from_glyphs(glyphs, line_spacing, Some(texture))?;
        font.set_default_character(default_character)?;

        info!(
            "SpriteFont loaded: {} glyphs, line spacing {:.1}, sheet {}x{} {}",
            glyph_count,
            line_spacing,
            width,
            height,
            format.name()
        );
        Ok(font)
    }

    /// Read and parse a `.spritefont` file
    pub fn from_file(path: impl AsRef<Path>, options: LoadOptions) -> anyhow::Result<Self> {
        use anyhow::Context;

        let path = path.as_ref();
        let data = std::fs::read(path).with_context(|| format!("Failed to read font file: {}", path.display()))?;
        let font = Self::from_bytes(&data, options)
            .with_context(|| format!("Failed to parse font file: {}", path.display()))?;
        Ok(font)
    }

    /// Serialize back to the `.spritefont` layout (None without a sprite sheet)
    pub fn to_bytes(&self) -> Option<Vec<u8>> {
        let sheet = self.sprite_sheet()?;
        let mut out = Vec::with_capacity(64 + self.glyphs().len() * GLYPH_RECORD_SIZE + sheet.data.len());

        out.extend_from_slice(SPRITEFONT_MAGIC);
        out.extend_from_slice(&(self.glyphs().len() as u32).to_le_bytes());
        for g in self.glyphs() {
            out.extend_from_slice(&g.character.to_le_bytes());
            for v in [g.subrect.left, g.subrect.top, g.subrect.right, g.subrect.bottom] {
                out.extend_from_slice(&v.to_le_bytes());
            }
            for v in [g.x_offset, g.y_offset, g.x_advance] {
                out.extend_from_slice(&v.to_le_bytes());
            }
        }
        out.extend_from_slice(&self.line_spacing().to_le_bytes());
        out.extend_from_slice(&self.default_character().map_or(0, |c| c as u32).to_le_bytes());
        for v in [sheet.width, sheet.height, sheet.format.to_dxgi(), sheet.stride, sheet.rows] {
            out.extend_from_slice(&v.to_le_bytes());
        }
        out.extend_from_slice(&sheet.data);
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::glyph::Rect;

    fn sample_font() -> SpriteFont {
        let glyphs = vec![
            Glyph::new('?', Rect::new(0, 0, 2, 2), 0.0, 0.0, 1.0),
            Glyph::new('A', Rect::new(2, 0, 4, 2), 0.5, 1.0, 1.0),
        ];
        let sheet = Texture::new(4, 2, PixelFormat::A8Unorm, 4, 2, vec![255; 8]).unwrap();
        let mut font = SpriteFont::from_glyphs(glyphs, 3.0, Some(sheet)).unwrap();
        font.set_default_character('?').unwrap();
        font
    }

    #[test]
    fn test_load_encoded_font() {
        let bytes = sample_font().to_bytes().unwrap();
        let font = SpriteFont::from_bytes(&bytes, LoadOptions::default()).unwrap();

        assert_eq!(font.glyphs().len(), 2);
        assert_eq!(font.default_character(), Some('?'));
        assert!((font.line_spacing() - 3.0).abs() < 1e-6);
        assert_eq!(font.find_glyph('A').unwrap().subrect, Rect::new(2, 0, 4, 2));
        let sheet = font.sprite_sheet().unwrap();
        assert_eq!(sheet.format, PixelFormat::A8Unorm);
        assert_eq!(sheet.data.len(), 8);
    }

    #[test]
    fn test_bad_magic() {
        let mut bytes = sample_font().to_bytes().unwrap();
        bytes[0] = b'X';
        assert_eq!(
            SpriteFont::from_bytes(&bytes, LoadOptions::default()).unwrap_err(),
            FontError::InvalidMagic
        );
        assert_eq!(
            SpriteFont::from_bytes(b"DXT", LoadOptions::default()).unwrap_err(),
            FontError::InvalidMagic
        );
    }

    #[test]
    fn test_truncated() {
        let bytes = sample_font().to_bytes().unwrap();
        for len in [12, 40, bytes.len() - 1] {
            let err = SpriteFont::from_bytes(&bytes[..len], LoadOptions::default()).unwrap_err();
            assert!(matches!(err, FontError::UnexpectedEof { .. }), "len {}: {:?}", len, err);
        }
    }

    #[test]
    fn test_unsorted_glyphs_in_file() {
        let mut bytes = sample_font().to_bytes().unwrap();
        // Swap character codes of the two records
        let first = 12;
        let second = 12 + 32;
        bytes[first..first + 4].copy_from_slice(&('A' as u32).to_le_bytes());
        bytes[second..second + 4].copy_from_slice(&('?' as u32).to_le_bytes());
        let err = SpriteFont::from_bytes(&bytes, LoadOptions::default()).unwrap_err();
        assert!(matches!(err, FontError::UnsortedGlyphs { index: 1, .. }));
    }

    #[test]
    fn test_overflowing_subrect_in_file() {
        let mut bytes = sample_font().to_bytes().unwrap();
        // Second record ('A'): subrect left at 48, right at 56
        bytes[48..52].copy_from_slice(&i32::MIN.to_le_bytes());
        bytes[56..60].copy_from_slice(&i32::MAX.to_le_bytes());
        let err = SpriteFont::from_bytes(&bytes, LoadOptions::default()).unwrap_err();
        assert!(matches!(err, FontError::OutOfRange(_)), "{:?}", err);
        assert!(err.is_format());
    }

    #[test]
    fn test_default_character_not_in_font() {
        let mut font = sample_font();
        font.set_default_character('\0').unwrap();
        let mut bytes = font.to_bytes().unwrap();
        let default_offset = 12 + 2 * 32 + 4;
        bytes[default_offset..default_offset + 4].copy_from_slice(&('Z' as u32).to_le_bytes());
        let err = SpriteFont::from_bytes(&bytes, LoadOptions::default()).unwrap_err();
        assert_eq!(err, FontError::CharacterNotInFont('Z'));
    }

    #[test]
    fn test_force_srgb() {
        let glyphs = vec![Glyph::new('A', Rect::new(0, 0, 1, 1), 0.0, 0.0, 0.0)];
        let sheet = Texture::from_rgba8(1, 1, vec![0; 4]).unwrap();
        let font = SpriteFont::from_glyphs(glyphs, 1.0, Some(sheet)).unwrap();
        let bytes = font.to_bytes().unwrap();

        let plain = SpriteFont::from_bytes(&bytes, LoadOptions::default()).unwrap();
        assert_eq!(plain.sprite_sheet().unwrap().format, PixelFormat::R8G8B8A8Unorm);

        let srgb = SpriteFont::from_bytes(&bytes, LoadOptions { force_srgb: true }).unwrap();
        assert_eq!(srgb.sprite_sheet().unwrap().format, PixelFormat::R8G8B8A8UnormSrgb);
        assert_eq!(srgb.default_character(), None);
    }

    #[test]
    fn test_from_file_missing() {
        let err = SpriteFont::from_file("/nonexistent/font.spritefont", LoadOptions::default()).unwrap_err();
        assert!(err.to_string().contains("Failed to read font file"));
    }
}
