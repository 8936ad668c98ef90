/// Convenience result type used across parfill.
pub type ParfillResult<T> = Result<T, ParfillError>;

/// Top-level error taxonomy used by the session, queue and helper APIs.
///
/// The fill operations themselves are infallible: bad regions are clamped and empty work is a
/// no-op. Errors only surface from construction, queue growth, configuration, decoding and
/// presentation.
#[derive(thiserror::Error, Debug)]
pub enum ParfillError {
    /// Invalid user-provided dimensions, configuration or transform data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Backing storage could not be grown.
    #[error("allocation error: {0}")]
    Allocation(String),

    /// Filesystem failures while loading configuration or writing frames.
    #[error("io error: {0}")]
    Io(String),

    /// Image decoding or encoding failures.
    #[error("image error: {0}")]
    Image(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ParfillError {
    /// Build a [`ParfillError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ParfillError::Allocation`] value.
    pub fn allocation(msg: impl Into<String>) -> Self {
        Self::Allocation(msg.into())
    }

    /// Build a [`ParfillError::Io`] value.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    /// Build a [`ParfillError::Image`] value.
    pub fn image(msg: impl Into<String>) -> Self {
        Self::Image(msg.into())
    }

    /// Build a [`ParfillError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
