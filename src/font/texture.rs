//! Sprite sheet texture
//!
//! CPU-side copy of the glyph sprite sheet as stored in the font file.
//! Pixel formats use DXGI numbering since that is what the file records.
//!
//! ## Decoding
//! `to_rgba8()` expands the supported formats to tightly packed RGBA8:
//! - `R8G8B8A8` / `B8G8R8A8` / `B8G8R8X8` (and their sRGB variants)
//! - `A8` (white with alpha)
//! - `B4G4R4A4` (MakeSpriteFont "Bgra4444")
//! - `BC2` (MakeSpriteFont "CompressedMono", the default for greyscale fonts)

use crate::constants::MAX_TEXTURE_DIMENSION;
use crate::error::{FontError, Result};

/// DXGI pixel formats a sprite font may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    R8G8B8A8Unorm,
    R8G8B8A8UnormSrgb,
    B8G8R8A8Unorm,
    B8G8R8A8UnormSrgb,
    B8G8R8X8Unorm,
    B8G8R8X8UnormSrgb,
    A8Unorm,
    B4G4R4A4Unorm,
    Bc1Unorm,
    Bc1UnormSrgb,
    Bc2Unorm,
    Bc2UnormSrgb,
    Bc3Unorm,
    Bc3UnormSrgb,
    Bc7Unorm,
    Bc7UnormSrgb,
    /// Any other DXGI format code (kept so the font still loads)
    Other(u32),
}

impl PixelFormat {
    pub fn from_dxgi(code: u32) -> Self {
        match code {
            28 => PixelFormat::R8G8B8A8Unorm,
            29 => PixelFormat::R8G8B8A8UnormSrgb,
            87 => PixelFormat::B8G8R8A8Unorm,
            91 => PixelFormat::B8G8R8A8UnormSrgb,
            88 => PixelFormat::B8G8R8X8Unorm,
            93 => PixelFormat::B8G8R8X8UnormSrgb,
            65 => PixelFormat::A8Unorm,
            115 => PixelFormat::B4G4R4A4Unorm,
            71 => PixelFormat::Bc1Unorm,
            72 => PixelFormat::Bc1UnormSrgb,
            74 => PixelFormat::Bc2Unorm,
            75 => PixelFormat::Bc2UnormSrgb,
            77 => PixelFormat::Bc3Unorm,
            78 => PixelFormat::Bc3UnormSrgb,
            98 => PixelFormat::Bc7Unorm,
            99 => PixelFormat::Bc7UnormSrgb,
            other => PixelFormat::Other(other),
        }
    }

    pub fn to_dxgi(self) -> u32 {
        match self {
            PixelFormat::R8G8B8A8Unorm => 28,
            PixelFormat::R8G8B8A8UnormSrgb => 29,
            PixelFormat::B8G8R8A8Unorm => 87,
            PixelFormat::B8G8R8A8UnormSrgb => 91,
            PixelFormat::B8G8R8X8Unorm => 88,
            PixelFormat::B8G8R8X8UnormSrgb => 93,
            PixelFormat::A8Unorm => 65,
            PixelFormat::B4G4R4A4Unorm => 115,
            PixelFormat::Bc1Unorm => 71,
            PixelFormat::Bc1UnormSrgb => 72,
            PixelFormat::Bc2Unorm => 74,
            PixelFormat::Bc2UnormSrgb => 75,
            PixelFormat::Bc3Unorm => 77,
            PixelFormat::Bc3UnormSrgb => 78,
            PixelFormat::Bc7Unorm => 98,
            PixelFormat::Bc7UnormSrgb => 99,
            PixelFormat::Other(code) => code,
        }
    }

    /// sRGB variant of this format (formats without one are returned unchanged)
    pub fn to_srgb(self) -> Self {
        match self {
            PixelFormat::R8G8B8A8Unorm => PixelFormat::R8G8B8A8UnormSrgb,
            PixelFormat::B8G8R8A8Unorm => PixelFormat::B8G8R8A8UnormSrgb,
            PixelFormat::B8G8R8X8Unorm => PixelFormat::B8G8R8X8UnormSrgb,
            PixelFormat::Bc1Unorm => PixelFormat::Bc1UnormSrgb,
            PixelFormat::Bc2Unorm => PixelFormat::Bc2UnormSrgb,
            PixelFormat::Bc3Unorm => PixelFormat::Bc3UnormSrgb,
            PixelFormat::Bc7Unorm => PixelFormat::Bc7UnormSrgb,
            other => other,
        }
    }

    pub fn is_srgb(self) -> bool {
        matches!(
            self,
            PixelFormat::R8G8B8A8UnormSrgb
                | PixelFormat::B8G8R8A8UnormSrgb
                | PixelFormat::B8G8R8X8UnormSrgb
                | PixelFormat::Bc1UnormSrgb
                | PixelFormat::Bc2UnormSrgb
                | PixelFormat::Bc3UnormSrgb
                | PixelFormat::Bc7UnormSrgb
        )
    }

    /// Human readable name (for CLI output and errors)
    pub fn name(self) -> String {
        match self {
            PixelFormat::Other(code) => format!("DXGI_FORMAT({})", code),
            known => format!("{:?}", known),
        }
    }
}

/// Sprite sheet pixels plus layout
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    /// Bytes per row (per block row for BC formats)
    pub stride: u32,
    /// Row count (block rows for BC formats)
    pub rows: u32,
    pub data: Vec<u8>,
}

impl Texture {
    /// Create a texture, validating that `data` holds exactly `stride * rows` bytes
    pub fn new(width: u32, height: u32, format: PixelFormat, stride: u32, rows: u32, data: Vec<u8>) -> Result<Self> {
        if width > MAX_TEXTURE_DIMENSION || height > MAX_TEXTURE_DIMENSION {
            return Err(FontError::OutOfRange(format!(
                "texture {}x{} exceeds {}",
                width, height, MAX_TEXTURE_DIMENSION
            )));
        }
        let expected = stride as usize * rows as usize;
        if data.len() != expected {
            return Err(FontError::OutOfRange(format!(
                "texture data is {} bytes, stride {} x rows {} = {}",
                data.len(),
                stride,
                rows,
                expected
            )));
        }
        Ok(Self {
            width,
            height,
            format,
            stride,
            rows,
            data,
        })
    }

    /// Tightly packed RGBA8 texture from pixel data (stride = width * 4)
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let stride = width
            .checked_mul(4)
            .ok_or_else(|| FontError::OutOfRange(format!("texture width {}", width)))?;
        Self::new(width, height, PixelFormat::R8G8B8A8Unorm, stride, height, data)
    }

    /// Expand to tightly packed RGBA8 (`width * height * 4` bytes)
    pub fn to_rgba8(&self) -> Result<Vec<u8>> {
        // Fields are public; data may no longer match the header
        if self.data.len() != self.stride as usize * self.rows as usize {
            return Err(FontError::OutOfRange(format!(
                "texture data is {} bytes, expected {}",
                self.data.len(),
                self.stride as usize * self.rows as usize
            )));
        }

        match self.format {
            PixelFormat::R8G8B8A8Unorm | PixelFormat::R8G8B8A8UnormSrgb => {
                self.expand_rows(4, |px, out| out.copy_from_slice(px))
            }
            PixelFormat::B8G8R8A8Unorm | PixelFormat::B8G8R8A8UnormSrgb => {
                self.expand_rows(4, |px, out| out.copy_from_slice(&[px[2], px[1], px[0], px[3]]))
            }
            PixelFormat::B8G8R8X8Unorm | PixelFormat::B8G8R8X8UnormSrgb => {
                self.expand_rows(4, |px, out| out.copy_from_slice(&[px[2], px[1], px[0], 255]))
            }
            PixelFormat::A8Unorm => self.expand_rows(1, |px, out| out.copy_from_slice(&[255, 255, 255, px[0]])),
            PixelFormat::B4G4R4A4Unorm => self.expand_rows(2, |px, out| {
                let v = u16::from_le_bytes([px[0], px[1]]);
                // 4-bit -> 8-bit: multiply by 17 (0xF -> 0xFF)
                let b = (v & 0xF) as u8 * 17;
                let g = ((v >> 4) & 0xF) as u8 * 17;
                let r = ((v >> 8) & 0xF) as u8 * 17;
                let a = ((v >> 12) & 0xF) as u8 * 17;
                out.copy_from_slice(&[r, g, b, a]);
            }),
            PixelFormat::Bc2Unorm | PixelFormat::Bc2UnormSrgb => self.decode_bc2(),
            other => Err(FontError::UnsupportedPixelFormat(other.name())),
        }
    }

    /// Expand an uncompressed format with `bpp` bytes per pixel
    fn expand_rows(&self, bpp: usize, convert: impl Fn(&[u8], &mut [u8])) -> Result<Vec<u8>> {
        let width = self.width as usize;
        let height = self.height as usize;
        let stride = self.stride as usize;
        if stride < width * bpp || (self.rows as usize) < height {
            return Err(FontError::OutOfRange(format!(
                "stride {} / rows {} too small for {}x{} {}",
                stride,
                self.rows,
                width,
                height,
                self.format.name()
            )));
        }

        let mut out = vec![0u8; width * height * 4];
        for y in 0..height {
            let src = &self.data[y * stride..y * stride + width * bpp];
            let dst = &mut out[y * width * 4..(y + 1) * width * 4];
            for (px, o) in src.chunks_exact(bpp).zip(dst.chunks_exact_mut(4)) {
                convert(px, o);
            }
        }
        Ok(out)
    }

    /// Decode BC2 (DXT3): 4-bit explicit alpha + BC1 color, 16 bytes per 4x4 block
    fn decode_bc2(&self) -> Result<Vec<u8>> {
        let width = self.width as usize;
        let height = self.height as usize;
        let blocks_x = width.div_ceil(4);
        let blocks_y = height.div_ceil(4);
        let stride = self.stride as usize;
        if stride < blocks_x * 16 || (self.rows as usize) < blocks_y {
            return Err(FontError::OutOfRange(format!(
                "stride {} / rows {} too small for {}x{} BC2",
                stride, self.rows, width, height
            )));
        }

        let mut out = vec![0u8; width * height * 4];
        for by in 0..blocks_y {
            for bx in 0..blocks_x {
                let offset = by * stride + bx * 16;
                let block = &self.data[offset..offset + 16];
                let texels = decode_bc2_block(block);

                for (i, texel) in texels.iter().enumerate() {
                    let x = bx * 4 + i % 4;
                    let y = by * 4 + i / 4;
                    if x < width && y < height {
                        let o = (y * width + x) * 4;
                        out[o..o + 4].copy_from_slice(texel);
                    }
                }
            }
        }
        Ok(out)
    }
}

/// Expand RGB565 to RGB888
fn rgb565(c: u16) -> [u8; 3] {
    let r = ((c >> 11) & 0x1F) as u32;
    let g = ((c >> 5) & 0x3F) as u32;
    let b = (c & 0x1F) as u32;
    [
        ((r * 255 + 15) / 31) as u8,
        ((g * 255 + 31) / 63) as u8,
        ((b * 255 + 15) / 31) as u8,
    ]
}

/// One BC2 block -> 16 RGBA texels in row-major order
fn decode_bc2_block(block: &[u8]) -> [[u8; 4]; 16] {
    let alpha = u64::from_le_bytes([
        block[0], block[1], block[2], block[3], block[4], block[5], block[6], block[7],
    ]);
    let c0 = rgb565(u16::from_le_bytes([block[8], block[9]]));
    let c1 = rgb565(u16::from_le_bytes([block[10], block[11]]));
    let indices = u32::from_le_bytes([block[12], block[13], block[14], block[15]]);

    // BC2 color blocks always use the four-color palette
    let mix = |a: u8, b: u8| ((2 * a as u32 + b as u32) / 3) as u8;
    let palette = [
        c0,
        c1,
        [mix(c0[0], c1[0]), mix(c0[1], c1[1]), mix(c0[2], c1[2])],
        [mix(c1[0], c0[0]), mix(c1[1], c0[1]), mix(c1[2], c0[2])],
    ];

    let mut texels = [[0u8; 4]; 16];
    for (i, texel) in texels.iter_mut().enumerate() {
        let rgb = palette[((indices >> (i * 2)) & 0x3) as usize];
        let a = ((alpha >> (i * 4)) & 0xF) as u8 * 17;
        *texel = [rgb[0], rgb[1], rgb[2], a];
    }
    texels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dxgi_roundtrip_known_codes() {
        for code in [28, 29, 87, 88, 91, 93, 65, 115, 71, 72, 74, 75, 77, 78, 98, 99, 12345] {
            assert_eq!(PixelFormat::from_dxgi(code).to_dxgi(), code);
        }
    }

    #[test]
    fn test_to_srgb() {
        assert_eq!(PixelFormat::R8G8B8A8Unorm.to_srgb(), PixelFormat::R8G8B8A8UnormSrgb);
        assert_eq!(PixelFormat::Bc2Unorm.to_srgb(), PixelFormat::Bc2UnormSrgb);
        assert_eq!(PixelFormat::A8Unorm.to_srgb(), PixelFormat::A8Unorm);
        assert!(PixelFormat::Bc3UnormSrgb.is_srgb());
        assert!(!PixelFormat::A8Unorm.is_srgb());
    }

    #[test]
    fn test_new_rejects_size_mismatch() {
        let err = Texture::new(2, 2, PixelFormat::A8Unorm, 2, 2, vec![0; 3]).unwrap_err();
        assert!(matches!(err, FontError::OutOfRange(_)));
    }

    #[test]
    fn test_from_rgba8_huge_width() {
        let err = Texture::from_rgba8(1 << 30, 1, Vec::new()).unwrap_err();
        assert!(matches!(err, FontError::OutOfRange(_)));
        let err = Texture::from_rgba8(MAX_TEXTURE_DIMENSION + 1, 1, Vec::new()).unwrap_err();
        assert!(matches!(err, FontError::OutOfRange(_)));
    }

    #[test]
    fn test_bgra_to_rgba_with_padding() {
        // 1x2 texture, stride 8 (4 bytes padding per row)
        let data = vec![1, 2, 3, 4, 0, 0, 0, 0, 5, 6, 7, 8, 0, 0, 0, 0];
        let tex = Texture::new(1, 2, PixelFormat::B8G8R8A8Unorm, 8, 2, data).unwrap();
        assert_eq!(tex.to_rgba8().unwrap(), vec![3, 2, 1, 4, 7, 6, 5, 8]);
    }

    #[test]
    fn test_a8_and_bgra4444() {
        let tex = Texture::new(2, 1, PixelFormat::A8Unorm, 2, 1, vec![0, 200]).unwrap();
        assert_eq!(tex.to_rgba8().unwrap(), vec![255, 255, 255, 0, 255, 255, 255, 200]);

        // A=F R=8 G=4 B=0 -> 0xF840
        let tex = Texture::new(1, 1, PixelFormat::B4G4R4A4Unorm, 2, 1, 0xF840u16.to_le_bytes().to_vec()).unwrap();
        assert_eq!(tex.to_rgba8().unwrap(), vec![136, 68, 0, 255]);
    }

    #[test]
    fn test_bc2_block() {
        // Alpha: first texel 0xF, rest 0. Color: c0 white, c1 black, all indices 0.
        let mut block = vec![0u8; 16];
        block[0] = 0x0F;
        block[8..10].copy_from_slice(&0xFFFFu16.to_le_bytes());
        let tex = Texture::new(4, 4, PixelFormat::Bc2Unorm, 16, 1, block).unwrap();
        let rgba = tex.to_rgba8().unwrap();
        assert_eq!(rgba.len(), 4 * 4 * 4);
        assert_eq!(&rgba[0..4], &[255, 255, 255, 255]);
        assert_eq!(&rgba[4..8], &[255, 255, 255, 0]);
    }

    #[test]
    fn test_bc2_partial_block_clipped() {
        let tex = Texture::new(2, 3, PixelFormat::Bc2Unorm, 16, 1, vec![0xFF; 16]).unwrap();
        assert_eq!(tex.to_rgba8().unwrap().len(), 2 * 3 * 4);
    }

    #[test]
    fn test_unsupported_format() {
        let tex = Texture::new(4, 4, PixelFormat::Bc7Unorm, 16, 1, vec![0; 16]).unwrap();
        assert!(matches!(tex.to_rgba8(), Err(FontError::UnsupportedPixelFormat(_))));
    }
}
