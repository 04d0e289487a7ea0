//! Glyph metrics and geometry value types

/// Integer rectangle (left, top, right, bottom), edges exclusive on the right/bottom
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Non-negative width and height that fit in `i32`
    pub fn is_well_formed(&self) -> bool {
        matches!(self.right.checked_sub(self.left), Some(w) if w >= 0)
            && matches!(self.bottom.checked_sub(self.top), Some(h) if h >= 0)
    }

    /// True if the point lies inside the rectangle (edges inclusive)
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.left as f32 && x <= self.right as f32 && y >= self.top as f32 && y <= self.bottom as f32
    }
}

/// 2D position or extent
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Component-wise maximum
    #[inline]
    pub fn max(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x.max(other.x), self.y.max(other.y))
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Metrics and sprite sheet location for one character
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    /// Code point (unique key within a font)
    pub character: u32,
    /// Region of the glyph within the sprite sheet
    pub subrect: Rect,
    /// Horizontal offset applied before drawing
    pub x_offset: f32,
    /// Vertical offset from the line top
    pub y_offset: f32,
    /// Extra horizontal advance after the glyph's own width
    pub x_advance: f32,
}

impl Glyph {
    pub fn new(character: char, subrect: Rect, x_offset: f32, y_offset: f32, x_advance: f32) -> Self {
        Self {
            character: character as u32,
            subrect,
            x_offset,
            y_offset,
            x_advance,
        }
    }

    /// Glyph key as a `char` (None if the stored code is not a scalar value)
    pub fn as_char(&self) -> Option<char> {
        char::from_u32(self.character)
    }

    /// Cursor advance: subrect width plus `x_advance`
    #[inline]
    pub fn advance(&self) -> f32 {
        self.subrect.width() as f32 + self.x_advance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_size() {
        let r = Rect::new(2, 4, 12, 18);
        assert_eq!(r.width(), 10);
        assert_eq!(r.height(), 14);
        assert!(r.contains_point(2.0, 4.0));
        assert!(r.contains_point(12.0, 18.0));
        assert!(!r.contains_point(1.9, 5.0));
    }

    #[test]
    fn test_rect_well_formed() {
        assert!(Rect::new(2, 4, 12, 18).is_well_formed());
        assert!(Rect::default().is_well_formed());
        assert!(!Rect::new(10, 0, 2, 4).is_well_formed());
        assert!(!Rect::new(0, 8, 4, 2).is_well_formed());
        assert!(!Rect::new(i32::MIN, 0, i32::MAX, 1).is_well_formed());
    }

    #[test]
    fn test_glyph_advance() {
        let g = Glyph::new('A', Rect::new(0, 0, 10, 14), 0.0, 0.0, 2.0);
        assert!((g.advance() - 12.0).abs() < 1e-6);
        assert_eq!(g.as_char(), Some('A'));
    }

    #[test]
    fn test_vec2_max() {
        let v = Vec2::new(1.0, 5.0).max(Vec2::new(3.0, 2.0));
        assert_eq!(v, Vec2::new(3.0, 5.0));
    }
}
