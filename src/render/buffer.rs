use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::foundation::core::Color;
use crate::foundation::error::{ParfillError, ParfillResult};

/// Fixed-size, row-major framebuffer. Index of `(x, y)` is `y * width + x`.
///
/// Two write paths exist:
///
/// - [`PixelBuffer::draw_pixel_locked`] takes `&self` and serializes writers through a mutex scoped
///   to the single write. Use it from threads sharing a `&PixelBuffer` outside the job scheduler.
/// - The bulk path used by the scheduler is crate-private and unsynchronized: it relies on the
///   caller having established that concurrent writers target disjoint pixels.
///
/// Cells are relaxed atomics so that even a broken disjointness promise is a logical race (some
/// writer wins) rather than undefined behavior.
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<AtomicU32>,
    write_lock: Mutex<()>,
}

impl PixelBuffer {
    /// Allocate a `width x height` buffer filled with `fill`.
    pub fn new(width: u32, height: u32, fill: Color) -> ParfillResult<Self> {
        let len = crate::foundation::config::pixel_count(width, height)?;
        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|e| ParfillError::allocation(format!("pixel buffer {width}x{height}: {e}")))?;
        pixels.extend((0..len).map(|_| AtomicU32::new(fill.0)));
        Ok(Self {
            width,
            height,
            pixels,
            write_lock: Mutex::new(()),
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total pixel count.
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Always `false`; buffers have at least one pixel.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let (x, y) = (usize::try_from(x).ok()?, usize::try_from(y).ok()?);
        let w = self.width as usize;
        (x < w && y < self.height as usize).then(|| y * w + x)
    }

    /// Color at `(x, y)`, or `None` outside the buffer.
    pub fn get(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y)
            .map(|i| Color(self.pixels[i].load(Ordering::Relaxed)))
    }

    /// Unsynchronized single-pixel write. Out-of-range coordinates are ignored.
    pub fn draw_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(i) = self.index(x, y) {
            *self.pixels[i].get_mut() = color.0;
        }
    }

    /// Mutex-guarded single-pixel write. Out-of-range coordinates are ignored.
    ///
    /// Meant for sparse writes from several threads (debug overlays and the like); bulk fills go
    /// through the scheduler instead.
    pub fn draw_pixel_locked(&self, x: i32, y: i32, color: Color) {
        let Some(i) = self.index(x, y) else {
            return;
        };
        // A poisoned lock only means another writer panicked; the cell is still a plain u32.
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        self.pixels[i].store(color.0, Ordering::Relaxed);
    }

    /// Overwrite every pixel with `color`.
    pub fn fill(&mut self, color: Color) {
        for px in &mut self.pixels {
            *px.get_mut() = color.0;
        }
    }

    /// Copy the current contents into a new [`Frame`].
    pub fn snapshot(&self) -> Frame {
        let mut frame = Frame::default();
        self.snapshot_into(&mut frame);
        frame
    }

    /// Copy the current contents into `frame`, reusing its allocation.
    pub fn snapshot_into(&self, frame: &mut Frame) {
        frame.width = self.width;
        frame.height = self.height;
        frame.pixels.clear();
        frame.pixels.extend(
            self.pixels
                .iter()
                .map(|px| Color(px.load(Ordering::Relaxed))),
        );
    }

    /// Exclusive access to all cells plus the row stride, for splitting into rows.
    pub(crate) fn cells_mut(&mut self) -> (&mut [AtomicU32], usize) {
        let w = self.width as usize;
        (&mut self.pixels, w)
    }

    /// Shared writer for fan-outs whose writers are promised disjoint.
    ///
    /// Requires `&mut self` so no locked or exclusive writer can run alongside it.
    pub(crate) fn shared_writer(&mut self) -> SharedWriter<'_> {
        SharedWriter {
            width: self.width as usize,
            cells: &self.pixels,
        }
    }
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// Unsynchronized write handle used by the overlap-unsafe multi-job fill.
#[derive(Clone, Copy)]
pub(crate) struct SharedWriter<'a> {
    width: usize,
    cells: &'a [AtomicU32],
}

impl SharedWriter<'_> {
    /// Write an in-bounds pixel. Callers index with a clamped region.
    #[inline]
    pub(crate) fn store(&self, x: usize, y: usize, color: Color) {
        self.cells[y * self.width + x].store(color.0, Ordering::Relaxed);
    }
}

/// A presentation snapshot of a [`PixelBuffer`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Frame {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major colors, `width * height` long.
    pub pixels: Vec<Color>,
}

impl Frame {
    /// Color at `(x, y)`, or `None` outside the frame.
    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Packed RGB8 bytes, three per pixel, dropping the alpha/format byte.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| c.to_rgb8()).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/buffer.rs"]
mod tests;
