pub use kurbo::{Affine, Point as PointF, Rect};

/// Integer pixel-space point.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Point {
    /// Column, growing to the right.
    pub x: i32,
    /// Row, growing downwards.
    pub y: i32,
}

impl Point {
    /// Construct a point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Convert a real-valued point by truncating each coordinate toward zero.
    ///
    /// Values beyond the `i32` range saturate; NaN maps to 0.
    pub fn from_real(p: PointF) -> Self {
        Self {
            x: p.x as i32,
            y: p.y as i32,
        }
    }

    /// Real-valued copy of this point.
    pub fn to_real(self) -> PointF {
        PointF::new(f64::from(self.x), f64::from(self.y))
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// 32-bit packed pixel color.
///
/// Layout: red in bits 16..24, green in 8..16, blue in 0..8. Bits 24..32 hold an alpha/format
/// byte that is carried through untouched and never blended.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Color(pub u32);

impl Color {
    /// All channels zero.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Full-intensity white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Pure red.
    pub const RED: Self = Self::rgb(255, 0, 0);
    /// Pure green.
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    /// Pure blue.
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    /// Red plus green.
    pub const YELLOW: Self = Self::rgb(255, 255, 0);

    /// Pack RGB channels, leaving the alpha/format byte at zero.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    /// Pack all four channels.
    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    /// Pack an `[r, g, b, a]` byte quad as produced by image decoders.
    pub const fn from_rgba8(px: [u8; 4]) -> Self {
        Self::argb(px[3], px[0], px[1], px[2])
    }

    /// Alpha/format byte.
    pub const fn a(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Red channel.
    pub const fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Green channel.
    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Blue channel.
    pub const fn b(self) -> u8 {
        self.0 as u8
    }

    /// `[r, g, b]` bytes, dropping the alpha/format byte.
    pub const fn to_rgb8(self) -> [u8; 3] {
        [self.r(), self.g(), self.b()]
    }
}

impl From<u32> for Color {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

impl From<Color> for u32 {
    fn from(c: Color) -> Self {
        c.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
