use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::core::Color;
use crate::foundation::error::{ParfillError, ParfillResult};

/// Environment variable overriding [`SessionConfig::threads`].
pub const THREADS_ENV: &str = "PARFILL_THREADS";

/// Session construction options.
///
/// Every field has a default, so a JSON document only needs the keys it changes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Framebuffer width in pixels.
    pub width: u32,
    /// Framebuffer height in pixels.
    pub height: u32,
    /// Worker thread count; `None` uses the available hardware parallelism.
    pub threads: Option<usize>,
    /// Initial buffer contents and the value written by `clear`.
    pub clear_color: Color,
    /// First allocation of the draw queue, doubled whenever it fills up.
    pub queue_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 700,
            threads: None,
            clear_color: Color::BLACK,
            queue_capacity: 16,
        }
    }
}

impl SessionConfig {
    /// Config for a `width x height` buffer with every other field defaulted.
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Parse a config from a JSON string.
    pub fn from_json_str(s: &str) -> ParfillResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| ParfillError::serde(format!("parse session config JSON: {e}")))
    }

    /// Parse a config from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ParfillResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ParfillError::serde(format!("parse session config JSON: {e}")))
    }

    /// Parse a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ParfillResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ParfillError::io(format!("open session config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Apply `PARFILL_THREADS` when it is set.
    pub fn with_env_overrides(self) -> ParfillResult<Self> {
        match std::env::var(THREADS_ENV) {
            Ok(raw) => self.with_threads_override(&raw),
            Err(std::env::VarError::NotPresent) => Ok(self),
            Err(e) => Err(ParfillError::validation(format!(
                "failed to read {THREADS_ENV}: {e}"
            ))),
        }
    }

    fn with_threads_override(mut self, raw: &str) -> ParfillResult<Self> {
        let raw = raw.trim();
        let n = raw.parse::<usize>().map_err(|_| {
            ParfillError::validation(format!(
                "{THREADS_ENV}={raw:?} is not a valid positive integer"
            ))
        })?;
        if n == 0 {
            return Err(ParfillError::validation(format!(
                "{THREADS_ENV} must be >= 1"
            )));
        }
        self.threads = Some(n);
        Ok(self)
    }

    /// Number of pixels in the configured buffer.
    pub fn pixel_count(&self) -> ParfillResult<usize> {
        pixel_count(self.width, self.height)
    }

    /// Check the config for values a session cannot be built from.
    pub fn validate(&self) -> ParfillResult<()> {
        self.pixel_count()?;
        if self.threads == Some(0) {
            return Err(ParfillError::validation(
                "'threads' must be >= 1 when set",
            ));
        }
        if self.queue_capacity == 0 {
            return Err(ParfillError::validation("'queue_capacity' must be >= 1"));
        }
        Ok(())
    }
}

/// Pixel count of a `width x height` buffer.
///
/// Both dimensions must be addressable by `i32` region coordinates.
pub(crate) fn pixel_count(width: u32, height: u32) -> ParfillResult<usize> {
    let out_of_range =
        || ParfillError::validation(format!("buffer dimensions {width}x{height} are out of range"));
    if width == 0 || height == 0 {
        return Err(ParfillError::validation(
            "buffer width and height must be > 0",
        ));
    }
    if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
        return Err(out_of_range());
    }
    (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(out_of_range)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
