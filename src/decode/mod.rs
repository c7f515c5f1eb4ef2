//! Per-cell box decoding over the bird's-eye-view grid.
//!
//! Decoding turns the six head tensors into one [`Box3D`] per grid cell:
//! sigmoid-argmax over the class heatmap, offset-corrected grid-to-world
//! center mapping, exponentiated log-scale dimensions, and a heading
//! recovered from its (sin, cos) encoding. Every cell produces a candidate;
//! cells failing the heading-magnitude gate get a zero score so the score
//! filter discards them later.
//!
//! [`decode_grid`] is the sequential reference path. With the `rayon`
//! feature, `rayon::decode_grid_par` decodes partitions of the grid in
//! parallel and produces bit-identical output.

use crate::candidate::boxes::Box3D;
use crate::config::PostConfig;
use crate::tensor::HeadTensors;
use crate::util::math::sigmoid;

#[cfg(feature = "rayon")]
pub mod rayon;

/// Number of contiguous index ranges the parallel path splits the grid into.
///
/// Fixed rather than derived from the grid size, so task granularity stays
/// coarse at real-time frame sizes.
pub const DECODE_PARTITIONS: usize = 32;

/// Decodes the head outputs at one linear grid index into a candidate box.
///
/// Pure arithmetic on the cell's channel values; the result does not depend
/// on any other cell.
pub fn decode_cell(tensors: &HeadTensors<'_>, config: &PostConfig, grid_idx: usize) -> Box3D {
    let xi = (grid_idx % config.grid_width) as f32;
    let yi = (grid_idx / config.grid_width) as f32;

    let mut label = 0usize;
    let mut max_score = sigmoid(tensors.heatmap.at(0, grid_idx));
    for channel in 1..tensors.classes() {
        let score = sigmoid(tensors.heatmap.at(channel, grid_idx));
        if score > max_score {
            label = channel;
            max_score = score;
        }
    }

    let step = config.downsample_factor as f32;
    let offset_x = tensors.offset.at(0, grid_idx);
    let offset_y = tensors.offset.at(1, grid_idx);
    let x = config.voxel_size_x * step * (xi + offset_x) + config.range_min_x;
    let y = config.voxel_size_y * step * (yi + offset_y) + config.range_min_y;
    let z = tensors.elevation.at(0, grid_idx);

    let width = tensors.dimensions.at(0, grid_idx).exp();
    let length = tensors.dimensions.at(1, grid_idx).exp();
    let height = tensors.dimensions.at(2, grid_idx).exp();

    let yaw_sin = tensors.rotation.at(0, grid_idx);
    let yaw_cos = tensors.rotation.at(1, grid_idx);
    let yaw_norm = (yaw_sin * yaw_sin + yaw_cos * yaw_cos).sqrt();
    let yaw = yaw_sin.atan2(yaw_cos);

    // A heading vector shorter than the threshold marks the cell as noise.
    let score = if yaw_norm >= config.yaw_norm_threshold {
        max_score
    } else {
        0.0
    };

    Box3D {
        label,
        score,
        x,
        y,
        z,
        width,
        length,
        height,
        yaw,
        vel_x: tensors.velocity.at(0, grid_idx),
        vel_y: tensors.velocity.at(1, grid_idx),
    }
}

/// Decodes every grid cell sequentially, in linear index order.
pub fn decode_grid(tensors: &HeadTensors<'_>, config: &PostConfig) -> Vec<Box3D> {
    (0..tensors.cells())
        .map(|grid_idx| decode_cell(tensors, config, grid_idx))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{decode_cell, decode_grid};
    use crate::config::PostConfig;
    use crate::tensor::HeadTensors;

    fn single_cell_config() -> PostConfig {
        PostConfig {
            grid_width: 1,
            grid_height: 1,
            class_count: 3,
            ..PostConfig::default()
        }
    }

    #[test]
    fn decodes_single_cell_fields() {
        let config = single_cell_config();
        let heatmap = [0.0f32, 2.0, -1.0];
        let offset = [0.5f32, -0.25];
        let elevation = [1.2f32];
        let dimensions = [0.0f32, 2.0f32.ln(), -0.5];
        let rotation = [0.6f32, 0.8];
        let velocity = [3.0f32, -1.5];
        let tensors = HeadTensors::new(
            &config, &heatmap, &offset, &elevation, &dimensions, &rotation, &velocity,
        )
        .unwrap();

        let cell = decode_cell(&tensors, &config, 0);

        assert_eq!(cell.label, 1);
        assert!((cell.score - 1.0 / (1.0 + (-2.0f32).exp())).abs() < 1e-6);
        // voxel 0.32, down-sample 2: one grid step is 0.64 m from -89.6.
        assert!((cell.x - (0.64 * 0.5 - 89.6)).abs() < 1e-4);
        assert!((cell.y - (0.64 * -0.25 - 89.6)).abs() < 1e-4);
        assert!((cell.z - 1.2).abs() < 1e-6);
        assert!((cell.width - 1.0).abs() < 1e-6);
        assert!((cell.length - 2.0).abs() < 1e-6);
        assert!((cell.height - (-0.5f32).exp()).abs() < 1e-6);
        assert!((cell.yaw - 0.6f32.atan2(0.8)).abs() < 1e-6);
        assert!((cell.vel_x - 3.0).abs() < 1e-6);
        assert!((cell.vel_y - -1.5).abs() < 1e-6);
    }

    #[test]
    fn heading_gate_zeroes_score_but_keeps_fields() {
        let config = single_cell_config();
        let heatmap = [0.0f32, 2.0, -1.0];
        let offset = [0.0f32, 0.0];
        let elevation = [0.0f32];
        let dimensions = [0.0f32, 0.0, 0.0];
        // Magnitude ~0.14, below the 0.3 threshold.
        let rotation = [0.1f32, 0.1];
        let velocity = [0.0f32, 0.0];
        let tensors = HeadTensors::new(
            &config, &heatmap, &offset, &elevation, &dimensions, &rotation, &velocity,
        )
        .unwrap();

        let cell = decode_cell(&tensors, &config, 0);

        assert_eq!(cell.score, 0.0);
        assert_eq!(cell.label, 1);
        assert!((cell.yaw - 0.1f32.atan2(0.1)).abs() < 1e-6);
    }

    #[test]
    fn grid_decode_is_one_box_per_cell_in_index_order() {
        let config = PostConfig {
            grid_width: 4,
            grid_height: 3,
            class_count: 2,
            ..PostConfig::default()
        };
        let cells = config.grid_cells();
        let heatmap: Vec<f32> = (0..2 * cells).map(|i| (i % 7) as f32 * 0.3 - 1.0).collect();
        let offset = vec![0.0f32; 2 * cells];
        let elevation = vec![0.0f32; cells];
        let dimensions = vec![0.0f32; 3 * cells];
        // sin channel all ones, cos channel all zeros: unit heading everywhere.
        let mut rotation = vec![1.0f32; cells];
        rotation.extend(vec![0.0f32; cells]);
        let velocity = vec![0.0f32; 2 * cells];
        let tensors = HeadTensors::new(
            &config, &heatmap, &offset, &elevation, &dimensions, &rotation, &velocity,
        )
        .unwrap();

        let boxes = decode_grid(&tensors, &config);

        assert_eq!(boxes.len(), cells);
        for (grid_idx, decoded) in boxes.iter().enumerate() {
            assert_eq!(*decoded, decode_cell(&tensors, &config, grid_idx));
        }
        // Column advances by one grid step per cell within a row.
        assert!((boxes[1].x - boxes[0].x - 0.64).abs() < 1e-4);
        assert!((boxes[4].y - boxes[0].y - 0.64).abs() < 1e-4);
    }
}
