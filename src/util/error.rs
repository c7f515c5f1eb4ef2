//! Error types for bevpost.

use thiserror::Error;

/// Result alias for bevpost operations.
pub type BevPostResult<T> = std::result::Result<T, BevPostError>;

/// Errors produced when configuring or running the post-processing pipeline.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BevPostError {
    /// A configuration field failed validation.
    #[error("invalid config: {field} {reason}")]
    InvalidConfig {
        /// Name of the offending field.
        field: &'static str,
        /// Constraint that was violated.
        reason: &'static str,
    },
    /// A head tensor buffer is shorter than its channel layout requires.
    #[error("{tensor} buffer too small: needed {needed} elements, got {got}")]
    BufferTooSmall {
        /// Name of the tensor the buffer backs.
        tensor: &'static str,
        /// Minimum element count for the configured shape.
        needed: usize,
        /// Actual element count supplied.
        got: usize,
    },
    /// Tensor views were built for a different shape than the processor's config.
    #[error(
        "tensor shape mismatch: views cover {got_cells} cells x {got_classes} classes, \
         config expects {cells} cells x {classes} classes"
    )]
    ShapeMismatch {
        /// Grid cells the processor's config describes.
        cells: usize,
        /// Class channels the processor's config describes.
        classes: usize,
        /// Grid cells the tensor views were validated for.
        got_cells: usize,
        /// Class channels the tensor views were validated for.
        got_classes: usize,
    },
    /// No candidate survived score filtering for this frame.
    #[error("no detections: none of {candidates} candidates exceeded the score threshold")]
    NoDetections {
        /// Number of decoded candidates that were examined.
        candidates: usize,
    },
}
