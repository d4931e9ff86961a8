//! Simplification diagnostics: point counts and reduction ratios.
//!
//! The plain entry points in [`simplify`](crate::simplify) are silent;
//! diagnostics are collected only when the caller asks for them through
//! the `*_with_stats` variants here. Intended for parameter tuning
//! (`mabiki-bench`) and for callers that want to surface reduction
//! numbers in their own UI or logs.

use serde::{Deserialize, Serialize};

use crate::simplify;
use crate::types::{Curve, Point, SimplifyError};

/// Diagnostics collected from a single simplification run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimplifyStats {
    /// Deviation tolerance the run was performed with.
    pub tolerance: f64,
    /// Whether the curve was treated as a closed loop.
    pub closed: bool,
    /// Total points before simplification.
    pub points_before: usize,
    /// Points classified as load-bearing (kept).
    pub points_after: usize,
}

impl SimplifyStats {
    /// Number of points classified as removable.
    #[must_use]
    pub const fn removed_count(&self) -> usize {
        self.points_before - self.points_after
    }

    /// Reduction ratio: `1.0 - (after / before)`, or `0.0` for an empty
    /// input.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn reduction_ratio(&self) -> f64 {
        if self.points_before == 0 {
            return 0.0;
        }
        1.0 - self.points_after as f64 / self.points_before as f64
    }

    /// Format the stats as a compact human-readable report line.
    #[must_use]
    pub fn report(&self) -> String {
        let shape = if self.closed { "closed" } else { "open" };
        format!(
            "tol={:.3} ({shape}) {}->{} pts ({:.1}% reduction)",
            self.tolerance,
            self.points_before,
            self.points_after,
            self.reduction_ratio() * 100.0,
        )
    }
}

/// Classify removable points and report counts for the run.
///
/// Behaves exactly like [`mark_removable`](crate::mark_removable), with
/// a [`SimplifyStats`] summarizing the classification on success.
///
/// # Errors
///
/// Returns [`SimplifyError::MaskLengthMismatch`] if `removable` does not
/// have exactly one entry per point.
pub fn mark_removable_with_stats(
    points: &[Point],
    closed: bool,
    tolerance: f64,
    removable: &mut [bool],
) -> Result<SimplifyStats, SimplifyError> {
    simplify::mark_removable(points, closed, tolerance, removable)?;
    let removed = removable.iter().filter(|&&r| r).count();
    Ok(SimplifyStats {
        tolerance,
        closed,
        points_before: points.len(),
        points_after: points.len() - removed,
    })
}

/// Simplify a curve and report counts for the run.
#[must_use = "returns the simplified curve and its stats"]
pub fn simplify_with_stats(curve: &Curve, tolerance: f64) -> (Curve, SimplifyStats) {
    let simplified = simplify::simplify(curve, tolerance);
    let stats = SimplifyStats {
        tolerance,
        closed: curve.is_closed(),
        points_before: curve.len(),
        points_after: simplified.len(),
    };
    (simplified, stats)
}
