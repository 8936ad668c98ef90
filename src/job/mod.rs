pub(crate) mod draw_job;
pub(crate) mod region;
/// Shift, rotate, shear and matrix modifiers for jobs.
pub mod transform;
