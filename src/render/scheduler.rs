use rayon::prelude::*;

use crate::foundation::error::{ParfillError, ParfillResult};
use crate::job::draw_job::{ColorFn, DrawJob};
use crate::job::region::{ClampedRegion, Region};
use crate::render::buffer::PixelBuffer;

/// Runs fills against a [`PixelBuffer`] on a dedicated rayon pool.
///
/// Every operation is synchronous: it returns once all of its pixels are written.
pub struct Scheduler {
    pool: rayon::ThreadPool,
}

impl Scheduler {
    /// Build a scheduler with `threads` workers, or one per available core when `None`.
    pub fn new(threads: Option<usize>) -> ParfillResult<Self> {
        Ok(Self {
            pool: build_thread_pool(threads)?,
        })
    }

    /// Worker count of the underlying pool.
    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Fill the whole buffer with `f`.
    pub fn draw(&self, buffer: &mut PixelBuffer, f: &dyn ColorFn) {
        let region = Region::full(buffer.width(), buffer.height());
        self.pool.install(|| fill_job(buffer, region, f));
    }

    /// Fill one job's clamped region, parallel across rows.
    pub fn draw_bounded(&self, buffer: &mut PixelBuffer, job: &DrawJob) {
        self.pool
            .install(|| fill_job(buffer, job.region, job.shader().as_ref()));
    }

    /// Fill many jobs at once, one job per unit of parallel work.
    ///
    /// Deterministic only when the jobs' clamped regions are pairwise disjoint. Where regions
    /// overlap, whichever job writes last wins and that order is unspecified.
    #[tracing::instrument(level = "debug", skip_all, fields(jobs = jobs.len()))]
    pub fn draw_multiple_bounded(&self, buffer: &mut PixelBuffer, jobs: &[DrawJob]) {
        if jobs.is_empty() {
            return;
        }
        let (width, height) = (buffer.width(), buffer.height());
        let writer = buffer.shared_writer();
        self.pool.install(|| {
            jobs.par_iter().for_each(|job| {
                let clamped = job.region.clamp(width, height);
                if clamped.is_empty() {
                    tracing::trace!(region = ?job.region, "job clamps to an empty region");
                    return;
                }
                for y in clamped.rows() {
                    for x in clamped.cols() {
                        writer.store(x, y, job.color(x as i32, y as i32));
                    }
                }
            });
        });
    }

    /// Fill jobs strictly in slice order; pixels within one job are filled in parallel.
    ///
    /// Job `i + 1` starts writing only after job `i` has finished, so on overlap the job with the
    /// highest index wins.
    #[tracing::instrument(level = "debug", skip_all, fields(jobs = jobs.len()))]
    pub fn draw_multiple_bounded_safe(&self, buffer: &mut PixelBuffer, jobs: &[DrawJob]) {
        if jobs.is_empty() {
            return;
        }
        self.pool.install(|| {
            for job in jobs {
                fill_job(buffer, job.region, job.shader().as_ref());
            }
        });
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("threads", &self.threads())
            .finish()
    }
}

fn fill_job(buffer: &mut PixelBuffer, region: Region, shader: &dyn ColorFn) {
    let clamped = region.clamp(buffer.width(), buffer.height());
    if clamped.is_empty() {
        tracing::trace!(?region, "job clamps to an empty region");
        return;
    }
    fill_rows(buffer, clamped, shader);
}

// Each row is owned by exactly one task, so writes need no synchronization.
fn fill_rows(buffer: &mut PixelBuffer, clamped: ClampedRegion, shader: &dyn ColorFn) {
    let (cells, stride) = buffer.cells_mut();
    let rows = &mut cells[clamped.y0 * stride..clamped.y1 * stride];
    rows.par_chunks_mut(stride)
        .enumerate()
        .for_each(|(i, row)| {
            let y = (clamped.y0 + i) as i32;
            for x in clamped.cols() {
                *row[x].get_mut() = shader.color(x as i32, y).0;
            }
        });
}

fn build_thread_pool(threads: Option<usize>) -> ParfillResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(ParfillError::validation(
            "scheduler 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new().thread_name(|i| format!("parfill-{i}"));
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ParfillError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/scheduler.rs"]
mod tests;
