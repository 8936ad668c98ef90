use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::foundation::core::{Color, Point};
use crate::foundation::error::{ParfillError, ParfillResult};
use crate::job::draw_job::DrawJob;
use crate::job::region::Region;

/// A rectangular, row-major block of packed colors.
///
/// Pixel storage is shared, so bitmaps and the jobs built from them clone cheaply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Arc<[Color]>,
}

impl Bitmap {
    /// Wrap `pixels`; its length must be exactly `width * height`.
    pub fn new(width: u32, height: u32, pixels: impl Into<Arc<[Color]>>) -> ParfillResult<Self> {
        let pixels = pixels.into();
        let expected = crate::foundation::config::pixel_count(width, height)?;
        if pixels.len() != expected {
            return Err(ParfillError::validation(format!(
                "bitmap {width}x{height} needs {expected} pixels, got {}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Decode encoded image bytes (any format `image` understands) into ARGB colors.
    pub fn decode(bytes: &[u8]) -> ParfillResult<Self> {
        let dyn_img = image::load_from_memory(bytes)
            .context("decode image from memory")
            .map_err(|e| ParfillError::image(format!("{e:#}")))?;
        Self::from_rgba8(dyn_img.to_rgba8())
    }

    /// Read and decode an image file.
    pub fn open(path: impl AsRef<Path>) -> ParfillResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| ParfillError::io(format!("read bitmap '{}': {e}", path.display())))?;
        Self::decode(&bytes)
    }

    fn from_rgba8(rgba: image::RgbaImage) -> ParfillResult<Self> {
        let (width, height) = rgba.dimensions();
        let pixels: Vec<Color> = rgba
            .as_raw()
            .chunks_exact(4)
            .map(|px| Color::from_rgba8([px[0], px[1], px[2], px[3]]))
            .collect();
        Self::new(width, height, pixels)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major pixel data.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Pixel at `(x, y)`, with out-of-range coordinates clamped to the nearest edge.
    #[inline]
    pub fn sample_clamped(&self, x: i32, y: i32) -> Color {
        let x = i64::from(x).clamp(0, i64::from(self.width) - 1) as usize;
        let y = i64::from(y).clamp(0, i64::from(self.height) - 1) as usize;
        self.pixels[y * self.width as usize + x]
    }
}

/// Job drawing `bitmap` with its top-left corner at `(x, y)`.
///
/// Build it once and re-enqueue it when the same bitmap is drawn at the same place every frame.
pub fn bitmap_job(bitmap: &Bitmap, x: i32, y: i32) -> DrawJob {
    let origin = Point::new(x, y);
    let region = Region::from_coords(
        0,
        0,
        i32::try_from(bitmap.width).unwrap_or(i32::MAX),
        i32::try_from(bitmap.height).unwrap_or(i32::MAX),
    )
    .offset(origin);
    DrawJob::with_context(region, bitmap.clone(), move |px, py, bmp: &Bitmap| {
        bmp.sample_clamped(px.saturating_sub(origin.x), py.saturating_sub(origin.y))
    })
}

/// Nearest-neighbour rescale. Output dimensions are the scaled dimensions rounded down.
pub fn scale_bitmap(bitmap: &Bitmap, scale: f64) -> ParfillResult<Bitmap> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(ParfillError::validation(format!(
            "bitmap scale must be finite and > 0, got {scale}"
        )));
    }
    let dim = |v: u32| (f64::from(v) * scale).floor();
    let (w, h) = (dim(bitmap.width), dim(bitmap.height));
    if w < 1.0 || h < 1.0 || w > f64::from(i32::MAX) || h > f64::from(i32::MAX) {
        return Err(ParfillError::validation(format!(
            "scaling {}x{} by {scale} gives an unusable {w}x{h} bitmap",
            bitmap.width, bitmap.height
        )));
    }
    let (w, h) = (w as u32, h as u32);

    let mut out = Vec::new();
    out.try_reserve_exact(crate::foundation::config::pixel_count(w, h)?)
        .map_err(|e| ParfillError::allocation(format!("scaled bitmap {w}x{h}: {e}")))?;
    for y in 0..h {
        let sy = (f64::from(y) / scale) as i32;
        for x in 0..w {
            let sx = (f64::from(x) / scale) as i32;
            out.push(bitmap.sample_clamped(sx, sy));
        }
    }
    Bitmap::new(w, h, out)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/bitmap.rs"]
mod tests;
