use crate::foundation::error::{ParfillError, ParfillResult};
use crate::job::draw_job::DrawJob;
use crate::render::buffer::PixelBuffer;
use crate::render::scheduler::Scheduler;

/// Ordered, growable list of pending jobs, drained as a whole once per frame.
///
/// Storage starts at `initial_capacity` jobs and doubles whenever it is full. Draining keeps
/// the allocation for the next frame.
#[derive(Debug)]
pub struct DrawQueue {
    jobs: Vec<DrawJob>,
    initial_capacity: usize,
}

impl Default for DrawQueue {
    fn default() -> Self {
        Self::new(16)
    }
}

impl DrawQueue {
    /// Empty queue whose first allocation holds `initial_capacity` jobs.
    ///
    /// Nothing is allocated until the first enqueue.
    pub fn new(initial_capacity: usize) -> Self {
        Self {
            jobs: Vec::new(),
            initial_capacity: initial_capacity.max(1),
        }
    }

    /// Number of pending jobs.
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// `true` when nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Current storage capacity in jobs.
    pub fn capacity(&self) -> usize {
        self.jobs.capacity()
    }

    /// Pending jobs in enqueue order.
    pub fn jobs(&self) -> &[DrawJob] {
        &self.jobs
    }

    /// Append `job`, growing storage geometrically when full.
    ///
    /// Fails only when the larger allocation cannot be obtained; the job is not enqueued then.
    pub fn enqueue(&mut self, job: DrawJob) -> ParfillResult<()> {
        if self.jobs.len() == self.jobs.capacity() {
            let additional = if self.jobs.capacity() == 0 {
                self.initial_capacity
            } else {
                self.jobs.capacity()
            };
            self.jobs.try_reserve_exact(additional).map_err(|e| {
                ParfillError::allocation(format!(
                    "grow draw queue from {} jobs: {e}",
                    self.jobs.capacity()
                ))
            })?;
        }
        self.jobs.push(job);
        Ok(())
    }

    /// Run every pending job with the overlap-unsafe fill, then empty the queue.
    #[tracing::instrument(level = "debug", skip_all, fields(jobs = self.jobs.len()))]
    pub fn drain_unsafe(&mut self, scheduler: &Scheduler, buffer: &mut PixelBuffer) {
        scheduler.draw_multiple_bounded(buffer, &self.jobs);
        self.jobs.clear();
    }

    /// Run every pending job in enqueue order with the overlap-safe fill, then empty the queue.
    #[tracing::instrument(level = "debug", skip_all, fields(jobs = self.jobs.len()))]
    pub fn drain_safe(&mut self, scheduler: &Scheduler, buffer: &mut PixelBuffer) {
        scheduler.draw_multiple_bounded_safe(buffer, &self.jobs);
        self.jobs.clear();
    }

    /// Drop every pending job without drawing it.
    pub fn clear(&mut self) {
        self.jobs.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/queue.rs"]
mod tests;
