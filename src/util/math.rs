//! Mathematical helpers for box decoding.

/// Logistic sigmoid, mapping a raw logit to (0, 1).
#[inline]
pub(crate) fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// Squared planar distance between two points in the BEV plane.
#[inline]
pub(crate) fn planar_dist_sq(ax: f32, ay: f32, bx: f32, by: f32) -> f32 {
    let dx = ax - bx;
    let dy = ay - by;
    dx * dx + dy * dy
}

#[cfg(test)]
mod tests {
    use super::{planar_dist_sq, sigmoid};

    #[test]
    fn sigmoid_is_centered_at_half() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn sigmoid_saturates_toward_unit_range() {
        assert!(sigmoid(10.0) > 0.999);
        assert!(sigmoid(-10.0) < 0.001);
    }

    #[test]
    fn sigmoid_is_monotonic() {
        let mut prev = sigmoid(-6.0);
        for step in 1..25 {
            let value = sigmoid(-6.0 + step as f32 * 0.5);
            assert!(value > prev);
            prev = value;
        }
    }

    #[test]
    fn planar_dist_sq_matches_pythagoras() {
        assert!((planar_dist_sq(0.0, 0.0, 3.0, 4.0) - 25.0).abs() < 1e-6);
        assert_eq!(planar_dist_sq(1.5, -2.0, 1.5, -2.0), 0.0);
    }
}
