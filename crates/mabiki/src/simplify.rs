//! Curve simplification using the Ramer-Douglas-Peucker algorithm.
//!
//! Classifies each point of a 3D polyline as load-bearing or removable:
//! a point is removable when it lies within a given tolerance of the
//! chord connecting the endpoints of its enclosing range. Classification
//! ([`mark_removable`]) and compaction ([`simplify`]) are separate
//! operations so callers that own their own point storage can apply the
//! mask themselves.
//!
//! Closed curves are handled by appending a synthetic copy of the first
//! point, so the reduction sees a chord that closes the loop. The
//! synthetic point's classification is discarded; the caller-visible
//! mask always has one entry per input point.

use crate::types::{Curve, Point, SimplifyError};

/// Classify each point of `points` as removable or load-bearing.
///
/// Overwrites `removable` in place: `true` at index `i` means point `i`
/// may be dropped without the curve deviating more than `tolerance` from
/// its original shape. The mask is reset to all-`false` on every
/// invocation; sequences with fewer than 3 points have no interior to
/// thin and come back entirely `false`.
///
/// A point exactly at distance `tolerance` counts as within tolerance
/// and is marked removable. With `tolerance` zero, only collinear (or
/// coincident) interior points are marked.
///
/// For open curves the first and last point are never marked. For closed
/// curves the first point is always kept (it anchors the chord that
/// closes the loop), while the last point may be marked when the seam
/// region is flat.
///
/// # Errors
///
/// Returns [`SimplifyError::MaskLengthMismatch`] if `removable` does not
/// have exactly one entry per point.
pub fn mark_removable(
    points: &[Point],
    closed: bool,
    tolerance: f64,
    removable: &mut [bool],
) -> Result<(), SimplifyError> {
    if removable.len() != points.len() {
        return Err(SimplifyError::MaskLengthMismatch {
            points: points.len(),
            mask: removable.len(),
        });
    }

    removable.fill(false);
    if points.len() < 3 {
        return Ok(());
    }

    if closed {
        reduce_cyclic(points, tolerance, removable);
    } else {
        reduce_range(points, 0, points.len() - 1, tolerance, removable);
    }

    Ok(())
}

/// Simplify a single curve, returning a new curve with removable points
/// dropped.
///
/// Curves with fewer than 3 points are returned unchanged (nothing to
/// simplify). The closed flag is preserved on the result.
#[must_use = "returns the simplified curve"]
pub fn simplify(curve: &Curve, tolerance: f64) -> Curve {
    let points = curve.points();
    if points.len() < 3 {
        return curve.clone();
    }

    let mut removable = vec![false; points.len()];
    if curve.is_closed() {
        reduce_cyclic(points, tolerance, &mut removable);
    } else {
        reduce_range(points, 0, points.len() - 1, tolerance, &mut removable);
    }

    let kept: Vec<Point> = points
        .iter()
        .zip(&removable)
        .filter(|&(_, r)| !*r)
        .map(|(&p, _)| p)
        .collect();

    Curve::new(kept, curve.is_closed())
}

/// Simplify multiple curves, applying the reduction to each independently.
#[must_use = "returns the simplified curves"]
pub fn simplify_curves(curves: &[Curve], tolerance: f64) -> Vec<Curve> {
    curves.iter().map(|c| simplify(c, tolerance)).collect()
}

/// Reduce the closed index range `[start, end]`, treating `points[start]`
/// and `points[end]` as fixed chord endpoints.
///
/// Finds the interior point farthest from the chord. If that distance
/// exceeds `tolerance`, the range splits there and both halves are
/// processed; otherwise every interior point is marked removable. On
/// equal maxima the earliest index wins.
///
/// Recursion depth is data-dependent and only guaranteed to shrink by
/// one point per split, so the ranges live on an explicit work-list
/// instead of the call stack.
fn reduce_range(
    points: &[Point],
    start: usize,
    end: usize,
    tolerance: f64,
    removable: &mut [bool],
) {
    let mut ranges = vec![(start, end)];

    while let Some((start, end)) = ranges.pop() {
        if end <= start + 1 {
            continue;
        }

        let mut max_dist = 0.0;
        let mut max_idx = start;

        for i in (start + 1)..end {
            let d = perpendicular_distance(points[i], points[start], points[end]);
            if d > max_dist {
                max_dist = d;
                max_idx = i;
            }
        }

        if max_dist > tolerance {
            ranges.push((start, max_idx));
            ranges.push((max_idx, end));
        } else {
            for flag in &mut removable[start + 1..end] {
                *flag = true;
            }
        }
    }
}

/// Reduce a closed curve by running [`reduce_range`] over an extended
/// sequence with `points[0]` appended, then discarding the synthetic
/// point's classification.
///
/// `removable` must have exactly one entry per point; the extension
/// always adds exactly one element, so both scratch buffers are
/// allocated at their final size up front.
fn reduce_cyclic(points: &[Point], tolerance: f64, removable: &mut [bool]) {
    let n = points.len();

    let mut extended = Vec::with_capacity(n + 1);
    extended.extend_from_slice(points);
    extended.push(points[0]);

    let mut extended_removable = vec![false; n + 1];
    reduce_range(&extended, 0, n, tolerance, &mut extended_removable);

    removable.copy_from_slice(&extended_removable[..n]);
}

/// Perpendicular distance from point `p` to the infinite line through
/// `a` and `b`.
///
/// Projects `p - a` onto `b - a` and measures the distance from `p` to
/// the projected point. When `a` and `b` coincide the projection is
/// undefined, so the distance from `p` to `a` is returned instead.
fn perpendicular_distance(p: Point, a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let dz = b.z - a.z;
    let length_sq = dz.mul_add(dz, dx.mul_add(dx, dy * dy));

    if length_sq == 0.0 {
        // a and b are the same point.
        return p.distance(a);
    }

    let t = dz.mul_add(p.z - a.z, dx.mul_add(p.x - a.x, dy * (p.y - a.y))) / length_sq;
    let projected = Point::new(t.mul_add(dx, a.x), t.mul_add(dy, a.y), t.mul_add(dz, a.z));
    p.distance(projected)
}
