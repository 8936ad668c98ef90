use std::fmt;
use std::sync::Arc;

use crate::foundation::core::Color;
use crate::job::region::Region;

/// Per-pixel color function evaluated by the scheduler.
///
/// Implementations must be pure: the same `(x, y)` always yields the same color, and evaluation
/// must not depend on the order or thread in which pixels are visited. The scheduler evaluates
/// pixels of one job in any order and in parallel.
pub trait ColorFn: Send + Sync {
    /// Color of the pixel at `(x, y)` in buffer coordinates.
    fn color(&self, x: i32, y: i32) -> Color;
}

impl<F> ColorFn for F
where
    F: Fn(i32, i32) -> Color + Send + Sync,
{
    #[inline]
    fn color(&self, x: i32, y: i32) -> Color {
        self(x, y)
    }
}

/// A context-carrying color function: `f(x, y, &ctx)`.
///
/// The context is owned by the adapter and handed to `f` unchanged on every evaluation.
pub struct WithContext<C, F> {
    ctx: C,
    f: F,
}

impl<C, F> WithContext<C, F>
where
    C: Send + Sync,
    F: Fn(i32, i32, &C) -> Color + Send + Sync,
{
    /// Bundle `ctx` with `f`.
    pub fn new(ctx: C, f: F) -> Self {
        Self { ctx, f }
    }

    /// Borrow the context.
    pub fn context(&self) -> &C {
        &self.ctx
    }
}

impl<C, F> ColorFn for WithContext<C, F>
where
    C: Send + Sync,
    F: Fn(i32, i32, &C) -> Color + Send + Sync,
{
    #[inline]
    fn color(&self, x: i32, y: i32) -> Color {
        (self.f)(x, y, &self.ctx)
    }
}

/// "Fill this region by evaluating this function at each pixel."
///
/// Cloning is cheap: the color function is shared.
#[derive(Clone)]
pub struct DrawJob {
    /// Target region; clamped to the buffer at fill time.
    pub region: Region,
    shader: Arc<dyn ColorFn>,
}

impl DrawJob {
    /// Job evaluating a plain `(x, y)` function.
    pub fn new(region: Region, f: impl ColorFn + 'static) -> Self {
        Self {
            region,
            shader: Arc::new(f),
        }
    }

    /// Job evaluating `f(x, y, &ctx)`.
    pub fn with_context<C, F>(region: Region, ctx: C, f: F) -> Self
    where
        C: Send + Sync + 'static,
        F: Fn(i32, i32, &C) -> Color + Send + Sync + 'static,
    {
        Self::new(region, WithContext::new(ctx, f))
    }

    /// Job over an already shared color function.
    pub fn from_shared(region: Region, shader: Arc<dyn ColorFn>) -> Self {
        Self { region, shader }
    }

    /// Same function, different region.
    pub fn with_region(&self, region: Region) -> Self {
        Self {
            region,
            shader: Arc::clone(&self.shader),
        }
    }

    /// Evaluate the job's function at `(x, y)`.
    #[inline]
    pub fn color(&self, x: i32, y: i32) -> Color {
        self.shader.color(x, y)
    }

    /// Shared handle to the color function.
    pub fn shader(&self) -> &Arc<dyn ColorFn> {
        &self.shader
    }
}

impl fmt::Debug for DrawJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawJob")
            .field("region", &self.region)
            .finish_non_exhaustive()
    }
}

/// Solid-color function, handy for tests and overlays.
pub fn solid(color: Color) -> impl ColorFn + Clone + 'static {
    move |_x: i32, _y: i32| color
}

#[cfg(test)]
#[path = "../../tests/unit/job/draw_job.rs"]
mod tests;
