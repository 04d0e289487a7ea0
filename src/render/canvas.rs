//! Software canvas
//!
//! CPU rasterizer for sprite font text: glyph subrects are copied from the
//! decoded sprite sheet, tinted by the draw color and alpha blended onto
//! an RGBA8 canvas. Output is written as PNG.

use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use std::path::Path;

use super::{Color, GlyphRenderer};
use crate::constants::ALPHA_THRESHOLD;
use crate::font::glyph::{Rect, Vec2};
use crate::font::sprite_font::SpriteFont;
use crate::utils::color::blend_colors;

/// RGBA8 image buffer
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA, 4 bytes per pixel
    pub pixels: Vec<u8>,
}

impl Canvas {
    /// Canvas filled with `background`
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        let px = to_rgba8(background.to_array());
        let pixels = px.iter().copied().cycle().take(width as usize * height as usize * 4).collect();
        Self { width, height, pixels }
    }

    /// Wrap already decoded RGBA8 pixels
    pub fn from_rgba8(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        if pixels.len() != width as usize * height as usize * 4 {
            return Err(anyhow!(
                "pixel buffer is {} bytes, expected {}x{}x4",
                pixels.len(),
                width,
                height
            ));
        }
        Ok(Self { width, height, pixels })
    }

    /// RGBA8 pixel at (x, y)
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let o = (y as usize * self.width as usize + x as usize) * 4;
        Some([self.pixels[o], self.pixels[o + 1], self.pixels[o + 2], self.pixels[o + 3]])
    }

    /// Alpha blend `color` over the pixel at (x, y); out-of-bounds is ignored
    fn blend(&mut self, x: i32, y: i32, color: [f32; 4]) {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return;
        }
        let o = (y as usize * self.width as usize + x as usize) * 4;
        let base = from_rgba8(&self.pixels[o..o + 4]);
        let alpha = color[3];
        let mut out = blend_colors(base, color, alpha);
        // Coverage accumulates in the destination alpha
        out[3] = alpha + base[3] * (1.0 - alpha);
        self.pixels[o..o + 4].copy_from_slice(&to_rgba8(out));
    }

    /// Write the canvas as an 8-bit RGBA PNG
    pub fn save_png(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        let w = std::io::BufWriter::new(file);

        let mut encoder = png::Encoder::new(w, self.width, self.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&self.pixels)?;

        info!("PNG saved: {} ({}x{})", path.display(), self.width, self.height);
        Ok(())
    }
}

fn to_rgba8(c: [f32; 4]) -> [u8; 4] {
    let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u8;
    [q(c[0]), q(c[1]), q(c[2]), q(c[3])]
}

fn from_rgba8(px: &[u8]) -> [f32; 4] {
    [
        px[0] as f32 / 255.0,
        px[1] as f32 / 255.0,
        px[2] as f32 / 255.0,
        px[3] as f32 / 255.0,
    ]
}

/// Renderer that blits sprite sheet regions onto a canvas
pub struct CanvasRenderer<'a> {
    canvas: &'a mut Canvas,
    /// Decoded sprite sheet (RGBA8)
    atlas: &'a [u8],
    atlas_width: u32,
    atlas_height: u32,
}

impl<'a> CanvasRenderer<'a> {
    pub fn new(canvas: &'a mut Canvas, atlas: &'a [u8], atlas_width: u32, atlas_height: u32) -> Self {
        Self {
            canvas,
            atlas,
            atlas_width,
            atlas_height,
        }
    }
}

impl GlyphRenderer for CanvasRenderer<'_> {
    fn draw_glyph(&mut self, position: Vec2, subrect: &Rect, color: Color) {
        // Snap to whole pixels (no filtering)
        let dst_x = position.x.round() as i32;
        let dst_y = position.y.round() as i32;

        // Clip the source rect to the sprite sheet
        let left = subrect.left.max(0);
        let top = subrect.top.max(0);
        let right = subrect.right.min(self.atlas_width as i32);
        let bottom = subrect.bottom.min(self.atlas_height as i32);

        for sy in top..bottom {
            for sx in left..right {
                let o = (sy as usize * self.atlas_width as usize + sx as usize) * 4;
                let texel = from_rgba8(&self.atlas[o..o + 4]);

                // Tint: sprite sheet color multiplied by the draw color
                let alpha = texel[3] * color.a;
                if alpha < ALPHA_THRESHOLD {
                    continue;
                }
                let tinted = [texel[0] * color.r, texel[1] * color.g, texel[2] * color.b, alpha];
                self.canvas
                    .blend(dst_x + (sx - subrect.left), dst_y + (sy - subrect.top), tinted);
            }
        }
    }
}

/// Rasterize `text` into a canvas sized to its draw bounds plus `padding`
pub fn render_text(font: &SpriteFont, text: &str, color: Color, background: Color, padding: u32) -> Result<Canvas> {
    let sheet = font
        .sprite_sheet()
        .ok_or_else(|| anyhow!("Font has no sprite sheet"))?;
    let atlas = sheet.to_rgba8()?;

    let bounds = font.measure_draw_bounds(text, Vec2::ZERO)?;
    let pad = padding as i32;
    let width = (bounds.width() + pad * 2).max(1) as u32;
    let height = (bounds.height() + pad * 2).max(1) as u32;
    debug!("render_text: bounds {:?}, canvas {}x{}", bounds, width, height);

    let mut canvas = Canvas::new(width, height, background);
    let origin = Vec2::new((pad - bounds.left) as f32, (pad - bounds.top) as f32);
    let mut renderer = CanvasRenderer::new(&mut canvas, &atlas, sheet.width, sheet.height);
    font.draw_string(&mut renderer, text, origin, color)?;

    Ok(canvas)
}
