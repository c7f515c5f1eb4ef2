//! Low-level building blocks for custom post-processing pipelines.
//!
//! These functions expose the individual stages for callers who want to
//! re-order, replace, or instrument them. Most users should prefer
//! [`PostProcessor`](crate::PostProcessor), which sequences the stages and
//! enforces the pipeline's error policy.

pub use crate::candidate::boxes::{filter_by_score, sort_boxes_desc};
pub use crate::candidate::nms::circle_nms;
pub use crate::decode::{decode_cell, decode_grid, DECODE_PARTITIONS};

#[cfg(feature = "rayon")]
pub use crate::decode::rayon::decode_grid_par;
