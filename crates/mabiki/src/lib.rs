//! mabiki: tolerance-based point thinning for 3D polylines (sans-IO).
//!
//! Given an ordered sequence of 3D points describing an open or closed
//! curve, classifies each point as load-bearing or removable: a point is
//! removable when dropping it keeps the simplified shape within a
//! perpendicular deviation tolerance of the original
//! (Ramer-Douglas-Peucker). Classification and compaction are separate
//! operations — [`mark_removable`] only fills a caller-owned boolean
//! mask, while [`simplify`] applies it and returns a new curve — so
//! callers that own their own point storage (splines, stroke buffers,
//! toolpaths) can do the removal themselves.
//!
//! The geometry is self-contained on purpose: a [`Point`] and a handful
//! of distance computations are all the algorithm needs, which is not
//! worth the `geo`/`glam` dependency trees.
//!
//! This crate has **no I/O dependencies** — it operates on in-memory
//! point slices and returns structured data. File reading/writing lives
//! in the `mabiki-bench` CLI.

pub mod diagnostics;
pub mod simplify;
pub mod types;

pub use diagnostics::{SimplifyStats, mark_removable_with_stats, simplify_with_stats};
pub use simplify::{mark_removable, simplify, simplify_curves};
pub use types::{Curve, Point, SimplifyError};
