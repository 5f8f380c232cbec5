use crate::core::types::PixelPoint;

/// Default perpendicular pick distance for line hit-testing, in pixels.
pub const DEFAULT_HIT_TOLERANCE_PX: f64 = 2.0;

/// Perpendicular distance from `test` to the infinite line through `start`
/// and `end`. Falls back to point distance when both endpoints coincide.
#[must_use]
pub fn distance_to_line(start: PixelPoint, end: PixelPoint, test: PixelPoint) -> f64 {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let length = dx.hypot(dy);
    if length == 0.0 {
        return (test.x - start.x).hypot(test.y - start.y);
    }
    (dy * test.x - dx * test.y - start.x * end.y + end.x * start.y).abs() / length
}

#[must_use]
pub fn is_on_line(start: PixelPoint, end: PixelPoint, test: PixelPoint, tolerance: f64) -> bool {
    distance_to_line(start, end, test) <= tolerance
}

/// Index of the axis on the left of the inter-axis segment holding `x`.
///
/// `axis_xs` must be ascending. Returns `None` left of the first axis, right
/// of the last axis, or when fewer than two axes exist. A point exactly on
/// the last axis belongs to the last segment.
#[must_use]
pub fn locate_segment(axis_xs: &[f64], x: f64) -> Option<usize> {
    let (&first, &last) = (axis_xs.first()?, axis_xs.last()?);
    if axis_xs.len() < 2 || !x.is_finite() || x < first || x > last {
        return None;
    }
    match axis_xs.iter().position(|&axis_x| axis_x > x) {
        Some(right) => Some(right - 1),
        None => Some(axis_xs.len() - 2),
    }
}

#[cfg(test)]
mod tests {
    use super::{distance_to_line, is_on_line, locate_segment};
    use crate::core::PixelPoint;

    #[test]
    fn distance_matches_perpendicular_offset() {
        let start = PixelPoint::new(0.0, 0.0);
        let end = PixelPoint::new(10.0, 0.0);
        assert_eq!(distance_to_line(start, end, PixelPoint::new(4.0, 3.0)), 3.0);
        assert!(is_on_line(start, end, PixelPoint::new(4.0, -2.0), 2.0));
        assert!(!is_on_line(start, end, PixelPoint::new(4.0, -2.5), 2.0));
    }

    #[test]
    fn degenerate_segment_uses_point_distance() {
        let point = PixelPoint::new(1.0, 1.0);
        assert_eq!(distance_to_line(point, point, PixelPoint::new(4.0, 5.0)), 5.0);
    }

    #[test]
    fn locate_segment_respects_axis_range() {
        let axes = [10.0, 50.0, 90.0];
        assert_eq!(locate_segment(&axes, 9.9), None);
        assert_eq!(locate_segment(&axes, 10.0), Some(0));
        assert_eq!(locate_segment(&axes, 49.0), Some(0));
        assert_eq!(locate_segment(&axes, 50.0), Some(1));
        assert_eq!(locate_segment(&axes, 90.0), Some(1));
        assert_eq!(locate_segment(&axes, 90.1), None);
        assert_eq!(locate_segment(&[10.0], 10.0), None);
        assert_eq!(locate_segment(&[], 10.0), None);
    }
}
