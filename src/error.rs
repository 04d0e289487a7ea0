//! Error types
//!
//! Format errors are fatal at construction (no partial font is produced).
//! Lookup errors abort the single call that hit them; font state is untouched.

use thiserror::Error;

/// Errors produced while loading fonts or laying out text
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FontError {
    /// Blob does not start with the `DXTKfont` magic
    #[error("not a MakeSpriteFont output binary (bad magic)")]
    InvalidMagic,

    /// Blob ended before a complete value could be read
    #[error("unexpected end of font data: needed {needed} bytes at offset {offset}, {available} available")]
    UnexpectedEof {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// Glyphs are not in strictly ascending codepoint order
    #[error("glyphs must be in ascending codepoint order (glyph {index}: U+{character:04X})")]
    UnsortedGlyphs { index: usize, character: u32 },

    /// A stored code is not a Unicode scalar value
    #[error("invalid character code 0x{0:X}")]
    InvalidCharacterCode(u32),

    /// Glyph count or texture size outside accepted limits
    #[error("font data out of range: {0}")]
    OutOfRange(String),

    /// Texture pixel format cannot be decoded on the CPU
    #[error("unsupported pixel format: {0}")]
    UnsupportedPixelFormat(String),

    /// Character absent from the font and no default glyph configured
    #[error("character not in font: {}", describe_char(.0))]
    CharacterNotInFont(char),
}

impl FontError {
    /// True for errors raised by glyph lookup (as opposed to malformed data)
    pub fn is_lookup(&self) -> bool {
        matches!(self, FontError::CharacterNotInFont(_))
    }

    /// True for errors raised while validating font data
    pub fn is_format(&self) -> bool {
        matches!(
            self,
            FontError::InvalidMagic
                | FontError::UnexpectedEof { .. }
                | FontError::UnsortedGlyphs { .. }
                | FontError::InvalidCharacterCode(_)
                | FontError::OutOfRange(_)
        )
    }
}

fn describe_char(c: &char) -> String {
    format!("U+{:04X} ({:?})", *c as u32, c)
}

/// Crate result alias
pub type Result<T> = std::result::Result<T, FontError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert!(FontError::CharacterNotInFont('x').is_lookup());
        assert!(!FontError::CharacterNotInFont('x').is_format());
        assert!(FontError::InvalidMagic.is_format());
        assert!(FontError::UnsortedGlyphs { index: 1, character: 65 }.is_format());
        assert!(!FontError::UnsupportedPixelFormat("BC7".into()).is_format());
    }

    #[test]
    fn test_error_display() {
        let msg = FontError::CharacterNotInFont('A').to_string();
        assert!(msg.contains("U+0041"));
        let msg = FontError::UnsortedGlyphs { index: 3, character: 0x20 }.to_string();
        assert!(msg.contains("ascending"));
    }
}
