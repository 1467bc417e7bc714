use super::types::Point;

/// Native extent of KanjiVG glyphs (the `viewBox` is `0 0 109 109`).
pub const GLYPH_WIDTH: f64 = 109.0;
pub const GLYPH_HEIGHT: f64 = 109.0;

/// Rescales points from glyph units into the unit square. Values are not
/// clamped; data outside the nominal extent stays outside `[0, 1]`.
pub fn normalize(points: &[Point], width: f64, height: f64) -> Vec<Point> {
    points
        .iter()
        .map(|p| Point::new(p.x / width, p.y / height))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scales_each_axis() {
        let points = [Point::new(54.5, 109.0), Point::new(0.0, 27.25)];
        assert_eq!(
            normalize(&points, GLYPH_WIDTH, GLYPH_HEIGHT),
            vec![Point::new(0.5, 1.0), Point::new(0.0, 0.25)]
        );
        assert_eq!(normalize(&points, 2.0, 1.0)[0], Point::new(27.25, 109.0));
    }

    #[test]
    fn test_invertible() {
        let points = [Point::new(13.7, 91.02), Point::new(-4.0, 120.5), Point::new(108.99, 0.01)];
        let normalized = normalize(&points, GLYPH_WIDTH, GLYPH_HEIGHT);
        for (n, p) in normalized.iter().zip(points.iter()) {
            assert!((n.x * GLYPH_WIDTH - p.x).abs() < 1e-9);
            assert!((n.y * GLYPH_HEIGHT - p.y).abs() < 1e-9);
        }
    }

    #[test]
    fn test_no_clamping() {
        let normalized = normalize(&[Point::new(218.0, -109.0)], GLYPH_WIDTH, GLYPH_HEIGHT);
        assert_eq!(normalized, vec![Point::new(2.0, -1.0)]);
    }
}
