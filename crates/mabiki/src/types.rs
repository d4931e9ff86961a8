//! Shared types for the mabiki curve simplification library.

use serde::{Deserialize, Serialize};

/// A point in 3D space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Position along the X axis.
    pub x: f64,
    /// Position along the Y axis.
    pub y: f64,
    /// Position along the Z axis.
    pub z: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Squared Euclidean distance to another point.
    ///
    /// Avoids the square root for comparison purposes.
    #[must_use]
    pub fn distance_squared(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dz.mul_add(dz, dx.mul_add(dx, dy * dy))
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        self.distance_squared(other).sqrt()
    }
}

/// An ordered sequence of 3D points forming an open or closed curve.
///
/// When `closed` is `true`, the last point is implicitly connected back
/// to the first, forming a loop. No duplicate closing point is stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    points: Vec<Point>,
    closed: bool,
}

impl Curve {
    /// Create a new curve from a vector of points.
    #[must_use]
    pub const fn new(points: Vec<Point>, closed: bool) -> Self {
        Self { points, closed }
    }

    /// Returns `true` if the curve has no points.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the number of points in the curve.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the last point connects back to the first.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    /// Returns the first point, if any.
    #[must_use]
    pub fn first(&self) -> Option<&Point> {
        self.points.first()
    }

    /// Returns the last point, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Point> {
        self.points.last()
    }

    /// Returns a slice of all points.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Consumes the curve and returns the underlying vector of points.
    #[must_use]
    pub fn into_points(self) -> Vec<Point> {
        self.points
    }
}

/// Errors that can occur during curve simplification.
#[derive(Debug, thiserror::Error)]
pub enum SimplifyError {
    /// The caller-provided mask does not have one entry per point.
    #[error("mask length {mask} does not match point count {points}")]
    MaskLengthMismatch {
        /// Number of points in the input curve.
        points: usize,
        /// Length of the caller-provided mask.
        mask: usize,
    },
}
