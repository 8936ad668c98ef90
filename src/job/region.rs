use std::ops::Range;

use crate::foundation::core::{Point, PointF, Rect};

/// Axis-aligned pixel rectangle, half-open on both axes: `[top_left, bottom_right)`.
///
/// A region is not required to be well-formed. Orientation is never swapped; a region whose
/// bottom-right lies above or left of its top-left simply covers no pixels.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Region {
    /// Inclusive corner.
    pub top_left: Point,
    /// Exclusive corner.
    pub bottom_right: Point,
}

impl Region {
    /// Construct from two corners.
    pub const fn new(top_left: Point, bottom_right: Point) -> Self {
        Self {
            top_left,
            bottom_right,
        }
    }

    /// Construct from raw coordinates `[x0, x1) x [y0, y1)`.
    pub const fn from_coords(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self::new(Point::new(x0, y0), Point::new(x1, y1))
    }

    /// Region covering a whole `width x height` buffer.
    pub fn full(width: u32, height: u32) -> Self {
        Self::from_coords(
            0,
            0,
            i32::try_from(width).unwrap_or(i32::MAX),
            i32::try_from(height).unwrap_or(i32::MAX),
        )
    }

    /// Convert a real-valued rectangle, truncating each corner toward zero.
    pub fn from_real(rect: Rect) -> Self {
        Self::new(
            Point::from_real(PointF::new(rect.x0, rect.y0)),
            Point::from_real(PointF::new(rect.x1, rect.y1)),
        )
    }

    /// Real-valued copy of this region. Corners keep their orientation.
    pub fn to_real(self) -> Rect {
        Rect::new(
            f64::from(self.top_left.x),
            f64::from(self.top_left.y),
            f64::from(self.bottom_right.x),
            f64::from(self.bottom_right.y),
        )
    }

    /// Translate both corners, saturating at the `i32` range.
    pub fn offset(self, by: Point) -> Self {
        let shift = |p: Point| Point::new(p.x.saturating_add(by.x), p.y.saturating_add(by.y));
        Self::new(shift(self.top_left), shift(self.bottom_right))
    }

    /// `true` when the region covers no pixels before any clamping.
    pub fn is_empty(self) -> bool {
        self.top_left.x >= self.bottom_right.x || self.top_left.y >= self.bottom_right.y
    }

    /// Restrict the region to a `width x height` buffer.
    ///
    /// Each coordinate is clamped independently to `[0, bound]`; the corners are not reordered.
    pub fn clamp(self, width: u32, height: u32) -> ClampedRegion {
        fn clamp_axis(v: i32, bound: u32) -> usize {
            i64::from(v).clamp(0, i64::from(bound)) as usize
        }

        ClampedRegion {
            x0: clamp_axis(self.top_left.x, width),
            y0: clamp_axis(self.top_left.y, height),
            x1: clamp_axis(self.bottom_right.x, width),
            y1: clamp_axis(self.bottom_right.y, height),
        }
    }
}

impl From<Rect> for Region {
    fn from(rect: Rect) -> Self {
        Self::from_real(rect)
    }
}

/// A region already restricted to buffer bounds. Safe to index with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ClampedRegion {
    /// First column.
    pub x0: usize,
    /// First row.
    pub y0: usize,
    /// One past the last column.
    pub x1: usize,
    /// One past the last row.
    pub y1: usize,
}

impl ClampedRegion {
    /// `true` when iterating the region performs no writes.
    pub fn is_empty(self) -> bool {
        self.x0 >= self.x1 || self.y0 >= self.y1
    }

    /// Column count, zero for inverted ranges.
    pub fn width(self) -> usize {
        self.x1.saturating_sub(self.x0)
    }

    /// Row count, zero for inverted ranges.
    pub fn height(self) -> usize {
        self.y1.saturating_sub(self.y0)
    }

    /// Number of pixels a fill over this region writes.
    pub fn pixel_count(self) -> usize {
        self.width() * self.height()
    }

    /// Column range; empty for inverted ranges.
    pub fn cols(self) -> Range<usize> {
        self.x0..self.x1.max(self.x0)
    }

    /// Row range; empty for inverted ranges.
    pub fn rows(self) -> Range<usize> {
        self.y0..self.y1.max(self.y0)
    }

    /// `true` when `(x, y)` is written by a fill over this region.
    pub fn contains(self, x: usize, y: usize) -> bool {
        self.cols().contains(&x) && self.rows().contains(&y)
    }

    /// `true` when the two regions share at least one pixel.
    pub fn overlaps(self, other: ClampedRegion) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x0 < other.x1
            && other.x0 < self.x1
            && self.y0 < other.y1
            && other.y0 < self.y1
    }

    /// Back to an unclamped [`Region`] with the same coordinates.
    pub fn to_region(self) -> Region {
        let c = |v: usize| i32::try_from(v).unwrap_or(i32::MAX);
        Region::from_coords(c(self.x0), c(self.y0), c(self.x1), c(self.y1))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/job/region.rs"]
mod tests;
