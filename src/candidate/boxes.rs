//! Decoded detection candidates and score-based selection.

use std::cmp::Ordering;

/// One decoded detection candidate in the ego frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Box3D {
    /// Winning heatmap channel index.
    pub label: usize,
    /// Confidence in `[0, 1]`; zero when the heading gate rejected the cell.
    pub score: f32,
    /// Center x in meters.
    pub x: f32,
    /// Center y in meters.
    pub y: f32,
    /// Center z in meters.
    pub z: f32,
    /// Box width in meters.
    pub width: f32,
    /// Box length in meters.
    pub length: f32,
    /// Box height in meters.
    pub height: f32,
    /// Heading in radians, canonicalized to `(-pi, pi]` by `atan2`.
    pub yaw: f32,
    /// Velocity along x in meters per second.
    pub vel_x: f32,
    /// Velocity along y in meters per second.
    pub vel_y: f32,
}

fn box_cmp_desc(a: &Box3D, b: &Box3D) -> Ordering {
    b.score.total_cmp(&a.score)
}

/// Keeps candidates whose score strictly exceeds `threshold`, in input order.
pub fn filter_by_score(boxes: &[Box3D], threshold: f32) -> Vec<Box3D> {
    boxes
        .iter()
        .copied()
        .filter(|b| b.score > threshold)
        .collect()
}

/// Sorts boxes by descending score; equal scores keep their input order.
pub fn sort_boxes_desc(boxes: &mut [Box3D]) {
    boxes.sort_by(box_cmp_desc);
}
