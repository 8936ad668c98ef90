//! parfill is a parallel software framebuffer renderer.
//!
//! User code describes what to draw as [`DrawJob`]s: a [`Region`] plus a pure per-pixel
//! [`ColorFn`]. The engine fills a shared [`PixelBuffer`] in parallel and hands the result to a
//! [`Presenter`] once per frame.
//!
//! # Pipeline overview
//!
//! 1. **Describe**: build jobs directly, from a [`Bitmap`], or via [`transform`] modifiers
//! 2. **Queue**: append jobs to the session's draw queue from any thread
//! 3. **Fill**: drain the queue (or fill jobs directly) on the scheduler's rayon pool
//! 4. **Present**: snapshot the buffer into a [`Frame`] for a presenter
//!
//! # Composition policies
//!
//! - [`RenderSession::draw_multiple_bounded`] runs jobs concurrently. Fast, and deterministic
//!   only when the jobs' clamped regions are pairwise disjoint.
//! - [`RenderSession::draw_multiple_bounded_safe`] runs jobs one after another (each one filled
//!   in parallel), so on overlap the later job always wins.
//!
//! Regions are clamped to the buffer, never rejected; empty regions and empty queues are no-ops.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;
mod job;
mod render;

/// Presentation surfaces for finished frames.
pub mod present;

pub use assets::bitmap::{Bitmap, bitmap_job, scale_bitmap};
pub use foundation::config::{SessionConfig, THREADS_ENV};
pub use foundation::core::{Affine, Color, Point, PointF, Rect};
pub use foundation::error::{ParfillError, ParfillResult};
pub use job::draw_job::{ColorFn, DrawJob, WithContext, solid};
pub use job::region::{ClampedRegion, Region};
pub use job::transform;
pub use job::transform::TransformationMatrix;
pub use present::png::{PngPresenter, write_png};
pub use present::surface::{InMemoryPresenter, Presenter};
pub use render::buffer::{Frame, PixelBuffer};
pub use render::queue::DrawQueue;
pub use render::scheduler::Scheduler;
pub use render::session::RenderSession;
