//! Binary reader
//!
//! Typed little-endian reads over an in-memory byte slice.
//! Every read is bounds checked; running past the end yields
//! `FontError::UnexpectedEof` instead of panicking.

use crate::error::{FontError, Result};
use crate::font::glyph::{Glyph, Rect};

/// A value with a fixed-size little-endian encoding
pub trait ReadLe: Sized {
    /// Encoded size in bytes
    const SIZE: usize;

    /// Decode from exactly `SIZE` bytes
    fn decode_le(bytes: &[u8]) -> Self;
}

macro_rules! impl_read_le {
    ($($ty:ty),*) => {
        $(
            impl ReadLe for $ty {
                const SIZE: usize = std::mem::size_of::<$ty>();

                #[inline]
                fn decode_le(bytes: &[u8]) -> Self {
                    let mut buf = [0u8; std::mem::size_of::<$ty>()];
                    buf.copy_from_slice(bytes);
                    <$ty>::from_le_bytes(buf)
                }
            }
        )*
    };
}

impl_read_le!(u8, u16, u32, i32, f32);

impl ReadLe for Rect {
    const SIZE: usize = 16;

    fn decode_le(bytes: &[u8]) -> Self {
        Rect::new(
            i32::decode_le(&bytes[0..4]),
            i32::decode_le(&bytes[4..8]),
            i32::decode_le(&bytes[8..12]),
            i32::decode_le(&bytes[12..16]),
        )
    }
}

/// On-disk glyph record: character, subrect, x/y offset, x advance
impl ReadLe for Glyph {
    const SIZE: usize = crate::constants::GLYPH_RECORD_SIZE;

    fn decode_le(bytes: &[u8]) -> Self {
        Glyph {
            character: u32::decode_le(&bytes[0..4]),
            subrect: Rect::decode_le(&bytes[4..20]),
            x_offset: f32::decode_le(&bytes[20..24]),
            y_offset: f32::decode_le(&bytes[24..28]),
            x_advance: f32::decode_le(&bytes[28..32]),
        }
    }
}

/// Cursor over a byte slice
pub struct BinaryReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> BinaryReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current read offset
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Borrow the next `len` bytes and advance past them
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.data.len())
            .ok_or(FontError::UnexpectedEof {
                offset: self.pos,
                needed: len,
                available: self.remaining(),
            })?;
        let bytes = &self.data[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    /// Read one value
    pub fn read<T: ReadLe>(&mut self) -> Result<T> {
        let bytes = self.read_bytes(T::SIZE)?;
        Ok(T::decode_le(bytes))
    }

    /// Read `count` consecutive values
    ///
    /// The whole array is bounds checked before anything is decoded,
    /// so a corrupt count cannot trigger a huge allocation.
    pub fn read_array<T: ReadLe>(&mut self, count: usize) -> Result<Vec<T>> {
        let len = count.checked_mul(T::SIZE).ok_or(FontError::UnexpectedEof {
            offset: self.pos,
            needed: usize::MAX,
            available: self.remaining(),
        })?;
        let bytes = self.read_bytes(len)?;
        Ok(bytes.chunks_exact(T::SIZE).map(T::decode_le).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_scalars() {
        let mut data = Vec::new();
        data.extend_from_slice(&7u32.to_le_bytes());
        data.extend_from_slice(&(-3i32).to_le_bytes());
        data.extend_from_slice(&1.5f32.to_le_bytes());
        data.push(0xAB);

        let mut r = BinaryReader::new(&data);
        assert_eq!(r.read::<u32>().unwrap(), 7);
        assert_eq!(r.read::<i32>().unwrap(), -3);
        assert!((r.read::<f32>().unwrap() - 1.5).abs() < 1e-6);
        assert_eq!(r.read::<u8>().unwrap(), 0xAB);
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn test_read_past_end() {
        let data = [1u8, 2, 3];
        let mut r = BinaryReader::new(&data);
        let err = r.read::<u32>().unwrap_err();
        assert_eq!(
            err,
            FontError::UnexpectedEof {
                offset: 0,
                needed: 4,
                available: 3
            }
        );
        // Failed read does not consume anything
        assert_eq!(r.position(), 0);
        assert_eq!(r.read::<u8>().unwrap(), 1);
    }

    #[test]
    fn test_read_glyph_array() {
        let mut data = Vec::new();
        for (ch, right) in [(b'A' as u32, 10i32), (b'B' as u32, 8)] {
            data.extend_from_slice(&ch.to_le_bytes());
            for v in [0i32, 0, right, 14] {
                data.extend_from_slice(&v.to_le_bytes());
            }
            for v in [0.5f32, 1.0, 2.0] {
                data.extend_from_slice(&v.to_le_bytes());
            }
        }

        let mut r = BinaryReader::new(&data);
        let glyphs: Vec<Glyph> = r.read_array(2).unwrap();
        assert_eq!(glyphs.len(), 2);
        assert_eq!(glyphs[0].character, 'A' as u32);
        assert_eq!(glyphs[1].subrect, Rect::new(0, 0, 8, 14));
        assert!((glyphs[1].y_offset - 1.0).abs() < 1e-6);
        assert!((glyphs[1].x_advance - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_read_array_huge_count() {
        let data = [0u8; 8];
        let mut r = BinaryReader::new(&data);
        assert!(r.read_array::<Glyph>(usize::MAX / 2).is_err());
    }
}
