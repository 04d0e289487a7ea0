//! Global constants for spritefont
//!
//! Consolidates binary format and layout constants
//! to eliminate magic numbers throughout the codebase.

// ============================================================================
// Binary Format
// ============================================================================

/// File magic written by MakeSpriteFont
pub const SPRITEFONT_MAGIC: &[u8; 8] = b"DXTKfont";

/// Size of one glyph record: u32 character + 4x i32 subrect + 3x f32 metrics
pub const GLYPH_RECORD_SIZE: usize = 32;

/// Upper bound on glyph count accepted from a file (all of Unicode fits)
pub const MAX_GLYPH_COUNT: u32 = 0x11_0000;

/// Maximum texture dimension (16384 pixels, D3D11 limit)
pub const MAX_TEXTURE_DIMENSION: u32 = 16384;

// ============================================================================
// Layout
// ============================================================================

/// A whitespace glyph wider or taller than this (in texels) is still drawn.
/// Some fonts render a visible box for space-like code points.
pub const VISIBLE_WHITESPACE_THRESHOLD: i32 = 1;

// ============================================================================
// Rendering
// ============================================================================

/// Default padding around rendered text (pixels)
pub const DEFAULT_RENDER_PADDING: u32 = 4;

/// Alpha threshold for blending atlas texels (below this = skip)
pub const ALPHA_THRESHOLD: f32 = 0.01;
