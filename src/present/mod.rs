//! Presentation surfaces.
//!
//! A presenter receives a snapshot of the finished buffer once per frame. Window and texture
//! management live outside this crate; the built-in presenters keep frames in memory or write
//! them to disk.

/// PNG file presenter.
pub mod png;
/// Presenter trait and the in-memory presenter.
pub mod surface;
