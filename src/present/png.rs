use std::path::{Path, PathBuf};

use crate::foundation::error::{ParfillError, ParfillResult};
use crate::present::surface::Presenter;
use crate::render::buffer::Frame;

/// Writes each presented frame to `<dir>/<prefix>_<NNNNN>.png` as RGB8.
///
/// The alpha/format byte of each color is not interpreted.
#[derive(Debug)]
pub struct PngPresenter {
    dir: PathBuf,
    prefix: String,
    next_index: u64,
}

impl PngPresenter {
    /// Presenter writing into `dir`, which is created on the first frame if missing.
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
            next_index: 0,
        }
    }

    /// Path the next presented frame will be written to.
    pub fn next_path(&self) -> PathBuf {
        self.dir
            .join(format!("{}_{:05}.png", self.prefix, self.next_index))
    }

    /// Number of frames written so far.
    pub fn frames_written(&self) -> u64 {
        self.next_index
    }
}

impl Presenter for PngPresenter {
    fn present(&mut self, frame: &Frame) -> ParfillResult<()> {
        let path = self.next_path();
        write_png(&path, frame)?;
        tracing::debug!(path = %path.display(), "wrote frame");
        self.next_index += 1;
        Ok(())
    }
}

/// Write one frame as an RGB8 PNG, creating parent directories as needed.
pub fn write_png(path: &Path, frame: &Frame) -> ParfillResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ParfillError::io(format!("create output dir '{}': {e}", parent.display()))
        })?;
    }
    image::save_buffer_with_format(
        path,
        &frame.to_rgb8(),
        frame.width,
        frame.height,
        image::ColorType::Rgb8,
        image::ImageFormat::Png,
    )
    .map_err(|e| ParfillError::image(format!("write png '{}': {e}", path.display())))
}

#[cfg(test)]
#[path = "../../tests/unit/present/png.rs"]
mod tests;
