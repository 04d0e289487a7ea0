//! Color parsing utilities
//!
//! Hex color parsing for config values and alpha blending for the canvas.

/// Parse 6-digit hex color (e.g., "ff0000" -> (255, 0, 0))
/// Also supports 3-digit short format (e.g., "f00" -> (255, 0, 0))
/// Returns None on invalid input.
pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some((r, g, b))
        }
        3 => {
            // Short format: expand F -> FF
            let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
            Some((r, g, b))
        }
        _ => None,
    }
}

/// Parse 8-digit hex color with alpha (e.g., "ff000080" -> (255, 0, 0, 128)).
/// 6/3-digit input is accepted as opaque.
pub fn parse_hex_color_alpha(hex: &str) -> Option<(u8, u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    if hex.len() == 8 && hex.is_ascii() {
        let (r, g, b) = parse_hex_color(&hex[0..6])?;
        let a = u8::from_str_radix(&hex[6..8], 16).ok()?;
        return Some((r, g, b, a));
    }
    parse_hex_color(hex).map(|(r, g, b)| (r, g, b, 255))
}

/// Blend two colors with alpha compositing.
///
/// # Arguments
/// * `base` - Background color [r, g, b, a]
/// * `overlay` - Foreground color [r, g, b, a]
/// * `alpha` - Blend factor (0.0 = all base, 1.0 = all overlay)
///
/// # Returns
/// Blended color with base alpha preserved.
pub fn blend_colors(base: [f32; 4], overlay: [f32; 4], alpha: f32) -> [f32; 4] {
    [
        overlay[0] * alpha + base[0] * (1.0 - alpha),
        overlay[1] * alpha + base[1] * (1.0 - alpha),
        overlay[2] * alpha + base[2] * (1.0 - alpha),
        base[3],
    ]
}
