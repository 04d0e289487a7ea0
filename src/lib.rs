//! spritefont - bitmap sprite fonts for DXTKfont (`.spritefont`) files
//!
//! Glyph lookup with default-character fallback, a single layout pass
//! shared by drawing and measurement, and a software renderer for the
//! sprite sheet.

pub mod config;
pub mod constants;
pub mod error;
pub mod font;
pub mod render;
pub mod utils;

pub use error::{FontError, Result};
pub use font::{Glyph, LoadOptions, Rect, SpriteFont, Vec2};
pub use render::{Color, GlyphRenderer};
