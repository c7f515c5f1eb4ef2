//! Duplicate suppression over score-ordered candidates.

use crate::candidate::boxes::Box3D;
use crate::config::NmsScope;
use crate::util::math::planar_dist_sq;

/// Applies greedy circle NMS to boxes already sorted by descending score.
///
/// Returns a keep mask aligned with `boxes`. A box is dropped when its planar
/// center distance to some earlier kept box is at most `dist_threshold`;
/// distances are compared squared, so no square root is taken. With a zero
/// threshold only exactly coincident centers suppress each other. `scope`
/// decides whether boxes of different classes can suppress one another.
///
/// Worst case is quadratic in the number of boxes, which is fine at the
/// candidate counts a score filter lets through.
pub fn circle_nms(boxes: &[Box3D], dist_threshold: f32, scope: NmsScope) -> Vec<bool> {
    let dist_sq = dist_threshold * dist_threshold;
    let mut keep = vec![true; boxes.len()];
    let mut kept: Vec<usize> = Vec::new();

    'outer: for (idx, cand) in boxes.iter().enumerate() {
        for &prev in &kept {
            let other = &boxes[prev];
            if scope == NmsScope::PerClass && other.label != cand.label {
                continue;
            }
            if planar_dist_sq(cand.x, cand.y, other.x, other.y) <= dist_sq {
                keep[idx] = false;
                continue 'outer;
            }
        }
        kept.push(idx);
    }

    keep
}
