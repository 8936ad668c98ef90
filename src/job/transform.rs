//! Geometric modifiers producing new jobs from existing ones.
//!
//! A transformed job covers the bounding box of the transformed region. Each pixel samples the
//! original color function at the source pixel containing its inverse-mapped center. Pixels of the
//! bounding box that map outside the original region still evaluate the original function there;
//! color functions are total, so this is well defined.

use std::sync::Arc;

use crate::foundation::core::{Affine, Point, PointF, Rect};
use crate::foundation::error::{ParfillError, ParfillResult};
use crate::job::draw_job::{ColorFn, DrawJob};
use crate::job::region::Region;

// Coordinates this close to an integer are treated as that integer. Keeps quarter turns exact.
const SNAP_EPS: f64 = 1e-9;

/// A 2x2 matrix applied to job coordinates: `[x', y'] = M * [x, y]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransformationMatrix {
    /// Row-major coefficients.
    pub m: [[f64; 2]; 2],
}

impl TransformationMatrix {
    /// The identity matrix.
    pub const IDENTITY: Self = Self {
        m: [[1.0, 0.0], [0.0, 1.0]],
    };

    /// Construct from row-major coefficients.
    pub const fn new(m: [[f64; 2]; 2]) -> Self {
        Self { m }
    }

    /// Matrix determinant.
    pub fn determinant(self) -> f64 {
        self.m[0][0] * self.m[1][1] - self.m[0][1] * self.m[1][0]
    }

    /// Equivalent linear [`Affine`].
    pub fn to_affine(self) -> Affine {
        let [[a, c], [b, d]] = self.m;
        Affine::new([a, b, c, d, 0.0, 0.0])
    }
}

impl Default for TransformationMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Move the job's origin to `position`.
pub fn shift(job: &DrawJob, position: Point) -> DrawJob {
    let inner = Arc::clone(job.shader());
    DrawJob::new(job.region.offset(position), move |x: i32, y: i32| {
        inner.color(x.saturating_sub(position.x), y.saturating_sub(position.y))
    })
}

/// Rotate the job by `angle_rad` around `(0, 0)`.
pub fn rotate(job: &DrawJob, angle_rad: f64) -> DrawJob {
    apply_invertible(job, Affine::rotate(angle_rad))
}

/// Rotate the job by `angle_rad` around `center`.
pub fn rotate_about(job: &DrawJob, angle_rad: f64, center: PointF) -> DrawJob {
    apply_invertible(job, Affine::rotate_about(angle_rad, center))
}

/// Shear the job's coordinate system: `x' = x + shear_x * y`, `y' = y + shear_y * x`.
///
/// Fails when `shear_x * shear_y == 1`, which collapses the plane onto a line.
pub fn shear(job: &DrawJob, shear_x: f64, shear_y: f64) -> ParfillResult<DrawJob> {
    apply(job, Affine::skew(shear_x, shear_y))
}

/// Transform the job's coordinate system with `matrix`.
pub fn transform(job: &DrawJob, matrix: TransformationMatrix) -> ParfillResult<DrawJob> {
    apply(job, matrix.to_affine())
}

fn apply(job: &DrawJob, forward: Affine) -> ParfillResult<DrawJob> {
    let det = forward.determinant();
    if !forward.is_finite() || !det.is_finite() || det.abs() < SNAP_EPS {
        return Err(ParfillError::validation(format!(
            "job transform must be finite and invertible (determinant {det})"
        )));
    }
    Ok(apply_invertible(job, forward))
}

fn apply_invertible(job: &DrawJob, forward: Affine) -> DrawJob {
    let inverse = forward.inverse();
    let region = transformed_region(job.region, forward);
    let inner = Arc::clone(job.shader());
    DrawJob::new(region, move |x: i32, y: i32| {
        let src = inverse * PointF::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
        let src = Point::from_real(PointF::new(snap(src.x).floor(), snap(src.y).floor()));
        inner.color(src.x, src.y)
    })
}

fn transformed_region(region: Region, forward: Affine) -> Region {
    if region.is_empty() {
        // Nothing to cover; keep it empty at the mapped origin.
        let p = Point::from_real(forward * region.top_left.to_real());
        return Region::new(p, p);
    }
    let bbox = forward.transform_rect_bbox(region.to_real());
    Region::from_real(Rect::new(
        snap(bbox.x0).floor(),
        snap(bbox.y0).floor(),
        snap(bbox.x1).ceil(),
        snap(bbox.y1).ceil(),
    ))
}

fn snap(v: f64) -> f64 {
    let r = v.round();
    if (v - r).abs() < SNAP_EPS { r } else { v }
}

#[cfg(test)]
#[path = "../../tests/unit/job/transform.rs"]
mod tests;
