//! Sprite font loading, glyph lookup and text layout
//!
//! Handles:
//! - `.spritefont` binary parsing (MakeSpriteFont output)
//! - Sorted glyph table with default-character fallback
//! - Shared layout for drawing and measurement
//! - Sprite sheet decoding

pub mod glyph;
pub mod layout;
pub mod loader;
pub mod reader;
pub mod sprite_font;
pub mod texture;

pub use glyph::{Glyph, Rect, Vec2};
pub use layout::{GlyphLayout, PlacedGlyph};
pub use loader::LoadOptions;
pub use reader::{BinaryReader, ReadLe};
pub use sprite_font::SpriteFont;
pub use texture::{PixelFormat, Texture};
