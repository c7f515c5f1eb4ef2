//! Pipeline configuration shared read-only by every stage.
//!
//! `PostConfig` is a plain value describing the detection head's output grid,
//! the grid-to-world mapping, and the filtering/suppression thresholds. It is
//! constructed once per model and shared across frames; nothing in the
//! pipeline mutates it.

use crate::util::{BevPostError, BevPostResult};

/// Scope over which circle NMS suppresses duplicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NmsScope {
    /// Boxes suppress each other regardless of class label.
    #[default]
    Global,
    /// Only boxes sharing a class label suppress each other.
    PerClass,
}

/// Grid geometry and threshold parameters for the post-processing pipeline.
///
/// `grid_width * grid_height` is the per-channel stride used to index every
/// head tensor; buffers are validated against it when building
/// [`HeadTensors`](crate::tensor::HeadTensors).
#[derive(Debug, Clone, PartialEq)]
pub struct PostConfig {
    /// Width of the down-sampled output grid, in cells.
    pub grid_width: usize,
    /// Height of the down-sampled output grid, in cells.
    pub grid_height: usize,
    /// Number of object classes (heatmap channels).
    pub class_count: usize,
    /// Voxel edge length along x, in meters.
    pub voxel_size_x: f32,
    /// Voxel edge length along y, in meters.
    pub voxel_size_y: f32,
    /// Factor by which the head's grid is coarser than the voxel grid.
    pub downsample_factor: usize,
    /// World x coordinate of the grid origin, in meters.
    pub range_min_x: f32,
    /// World y coordinate of the grid origin, in meters.
    pub range_min_y: f32,
    /// Candidates must score strictly above this to survive filtering.
    pub score_threshold: f32,
    /// Cells whose (sin, cos) heading magnitude falls below this are zeroed.
    pub yaw_norm_threshold: f32,
    /// Planar center distance at or below which a lower-scored box is dropped.
    pub circle_nms_dist_threshold: f32,
    /// Whether suppression compares boxes across classes or per class.
    pub nms_scope: NmsScope,
    /// Decode the grid with the parallel path when the `rayon` feature is on.
    pub parallel: bool,
}

impl Default for PostConfig {
    fn default() -> Self {
        Self {
            grid_width: 280,
            grid_height: 280,
            class_count: 3,
            voxel_size_x: 0.32,
            voxel_size_y: 0.32,
            downsample_factor: 2,
            range_min_x: -89.6,
            range_min_y: -89.6,
            score_threshold: 0.35,
            yaw_norm_threshold: 0.3,
            circle_nms_dist_threshold: 1.5,
            nms_scope: NmsScope::Global,
            parallel: true,
        }
    }
}

impl PostConfig {
    /// Returns the number of grid cells, the per-channel tensor stride.
    pub fn grid_cells(&self) -> usize {
        self.grid_width * self.grid_height
    }

    /// Checks every field against its constraint.
    ///
    /// [`PostProcessor::new`](crate::PostProcessor::new) runs this,
    /// so a pipeline can only be built from a valid config. Out-of-range
    /// values fail here; they are never clamped.
    pub fn validate(&self) -> BevPostResult<()> {
        check_nonzero("grid_width", self.grid_width)?;
        check_nonzero("grid_height", self.grid_height)?;
        check_nonzero("class_count", self.class_count)?;
        check_nonzero("downsample_factor", self.downsample_factor)?;
        check_positive("voxel_size_x", self.voxel_size_x)?;
        check_positive("voxel_size_y", self.voxel_size_y)?;
        check_finite("range_min_x", self.range_min_x)?;
        check_finite("range_min_y", self.range_min_y)?;
        check_non_negative("score_threshold", self.score_threshold)?;
        check_non_negative("yaw_norm_threshold", self.yaw_norm_threshold)?;
        check_non_negative("circle_nms_dist_threshold", self.circle_nms_dist_threshold)?;
        Ok(())
    }
}

fn check_nonzero(field: &'static str, value: usize) -> BevPostResult<()> {
    if value == 0 {
        return Err(BevPostError::InvalidConfig {
            field,
            reason: "must be at least 1",
        });
    }
    Ok(())
}

fn check_positive(field: &'static str, value: f32) -> BevPostResult<()> {
    if !(value.is_finite() && value > 0.0) {
        return Err(BevPostError::InvalidConfig {
            field,
            reason: "must be positive and finite",
        });
    }
    Ok(())
}

fn check_non_negative(field: &'static str, value: f32) -> BevPostResult<()> {
    if !(value.is_finite() && value >= 0.0) {
        return Err(BevPostError::InvalidConfig {
            field,
            reason: "must be non-negative and finite",
        });
    }
    Ok(())
}

fn check_finite(field: &'static str, value: f32) -> BevPostResult<()> {
    if !value.is_finite() {
        return Err(BevPostError::InvalidConfig {
            field,
            reason: "must be finite",
        });
    }
    Ok(())
}
