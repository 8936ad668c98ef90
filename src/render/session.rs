use std::sync::{Mutex, PoisonError};

use crate::foundation::config::SessionConfig;
use crate::foundation::core::Color;
use crate::foundation::error::ParfillResult;
use crate::job::draw_job::{ColorFn, DrawJob};
use crate::present::surface::Presenter;
use crate::render::buffer::{Frame, PixelBuffer};
use crate::render::queue::DrawQueue;
use crate::render::scheduler::Scheduler;

/// One rendering session: the framebuffer, the draw queue and the scheduler that fills one from
/// the other.
///
/// Producers on any thread may [`enqueue`](Self::enqueue) through a shared reference. Fills and
/// drains take `&mut self`, so a drain can never interleave with an enqueue or a present.
///
/// A typical frame: enqueue jobs, [`process_queue_safe`](Self::process_queue_safe) (or
/// [`process_queue`](Self::process_queue) for disjoint jobs), then [`present`](Self::present).
#[derive(Debug)]
pub struct RenderSession {
    config: SessionConfig,
    buffer: PixelBuffer,
    queue: Mutex<DrawQueue>,
    scheduler: Scheduler,
    frame: Frame,
}

impl RenderSession {
    /// Validate `config` and allocate the buffer, queue and worker pool.
    pub fn new(config: SessionConfig) -> ParfillResult<Self> {
        config.validate()?;
        let buffer = PixelBuffer::new(config.width, config.height, config.clear_color)?;
        let scheduler = Scheduler::new(config.threads)?;
        tracing::debug!(
            width = config.width,
            height = config.height,
            threads = scheduler.threads(),
            "render session created"
        );
        Ok(Self {
            queue: Mutex::new(DrawQueue::new(config.queue_capacity)),
            buffer,
            scheduler,
            frame: Frame::default(),
            config,
        })
    }

    /// The config this session was built from.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Read access to the framebuffer.
    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    /// The scheduler's worker count.
    pub fn threads(&self) -> usize {
        self.scheduler.threads()
    }

    /// Fill the whole buffer with `f`.
    pub fn draw(&mut self, f: impl ColorFn) {
        self.scheduler.draw(&mut self.buffer, &f);
    }

    /// Fill one job's region.
    pub fn draw_bounded(&mut self, job: &DrawJob) {
        self.scheduler.draw_bounded(&mut self.buffer, job);
    }

    /// Fill `jobs` in parallel; only deterministic when their regions are disjoint.
    pub fn draw_multiple_bounded(&mut self, jobs: &[DrawJob]) {
        self.scheduler.draw_multiple_bounded(&mut self.buffer, jobs);
    }

    /// Fill `jobs` in order; later jobs win on overlap.
    pub fn draw_multiple_bounded_safe(&mut self, jobs: &[DrawJob]) {
        self.scheduler
            .draw_multiple_bounded_safe(&mut self.buffer, jobs);
    }

    /// Append `job` to the draw queue.
    pub fn enqueue(&self, job: DrawJob) -> ParfillResult<()> {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .enqueue(job)
    }

    /// Number of jobs waiting in the draw queue.
    pub fn queue_len(&self) -> usize {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Drain the queue through the overlap-unsafe fill.
    pub fn process_queue(&mut self) {
        let queue = self.queue.get_mut().unwrap_or_else(PoisonError::into_inner);
        queue.drain_unsafe(&self.scheduler, &mut self.buffer);
    }

    /// Drain the queue through the overlap-safe fill, in enqueue order.
    pub fn process_queue_safe(&mut self) {
        let queue = self.queue.get_mut().unwrap_or_else(PoisonError::into_inner);
        queue.drain_safe(&self.scheduler, &mut self.buffer);
    }

    /// Unsynchronized single-pixel write.
    pub fn draw_pixel(&mut self, x: i32, y: i32, color: Color) {
        self.buffer.draw_pixel(x, y, color);
    }

    /// Mutex-guarded single-pixel write, callable from many threads.
    pub fn draw_pixel_locked(&self, x: i32, y: i32, color: Color) {
        self.buffer.draw_pixel_locked(x, y, color);
    }

    /// Reset every pixel to the configured clear color.
    pub fn clear(&mut self) {
        self.buffer.fill(self.config.clear_color);
    }

    /// Copy of the current buffer contents.
    pub fn snapshot(&self) -> Frame {
        self.buffer.snapshot()
    }

    /// Hand the current buffer contents to `presenter`.
    pub fn present(&mut self, presenter: &mut dyn Presenter) -> ParfillResult<()> {
        self.buffer.snapshot_into(&mut self.frame);
        tracing::debug!(
            width = self.frame.width,
            height = self.frame.height,
            "presenting frame"
        );
        presenter.present(&self.frame)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/session.rs"]
mod tests;
