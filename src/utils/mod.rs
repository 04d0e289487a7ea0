//! Utility functions shared across spritefont
//!
//! Common helpers that don't fit in specialized modules.

pub mod color;

pub use color::{blend_colors, parse_hex_color, parse_hex_color_alpha};
