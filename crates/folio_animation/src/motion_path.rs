//! Motion along a smooth curve through a list of points
//!
//! The curve is a cubic Hermite spline passing through every point. Tangents
//! blend the straight chord with the Catmull-Rom tangent by `curviness`:
//! 0 gives straight segments, 1 a classic Catmull-Rom, higher values bulge
//! further out. Segments are spaced uniformly in progress.

use folio_core::Point;

/// A path an element's translation follows
#[derive(Clone, Debug, PartialEq)]
pub struct MotionPath {
    pub points: Vec<Point>,
    pub curviness: f32,
    /// Rotate the element to follow the curve's direction
    pub auto_rotate: bool,
}

impl MotionPath {
    pub fn new(points: impl IntoIterator<Item = Point>) -> Self {
        Self {
            points: points.into_iter().collect(),
            curviness: 1.0,
            auto_rotate: false,
        }
    }

    pub fn curviness(mut self, curviness: f32) -> Self {
        self.curviness = curviness;
        self
    }

    pub fn auto_rotate(mut self, auto_rotate: bool) -> Self {
        self.auto_rotate = auto_rotate;
        self
    }

    /// Position at `progress`
    ///
    /// Progress outside 0..1 (from overshooting easings) extrapolates the
    /// first or last segment instead of clamping, so elastic motion keeps
    /// its swing.
    pub fn point_at(&self, progress: f32) -> Point {
        match self.points.len() {
            0 => Point::default(),
            1 => self.points[0],
            _ => {
                let (index, u) = self.segment(progress);
                let (p0, p1, m0, m1) = self.hermite_terms(index);
                let u2 = u * u;
                let u3 = u2 * u;
                let h00 = 2.0 * u3 - 3.0 * u2 + 1.0;
                let h10 = u3 - 2.0 * u2 + u;
                let h01 = -2.0 * u3 + 3.0 * u2;
                let h11 = u3 - u2;
                Point::new(
                    h00 * p0.x + h10 * m0.x + h01 * p1.x + h11 * m1.x,
                    h00 * p0.y + h10 * m0.y + h01 * p1.y + h11 * m1.y,
                )
            }
        }
    }

    /// Direction of travel at `progress`, in degrees clockwise from +x
    pub fn angle_at(&self, progress: f32) -> f32 {
        if self.points.len() < 2 {
            return 0.0;
        }
        let (index, u) = self.segment(progress);
        let (p0, p1, m0, m1) = self.hermite_terms(index);
        let u2 = u * u;
        let d00 = 6.0 * u2 - 6.0 * u;
        let d10 = 3.0 * u2 - 4.0 * u + 1.0;
        let d01 = -6.0 * u2 + 6.0 * u;
        let d11 = 3.0 * u2 - 2.0 * u;
        let dx = d00 * p0.x + d10 * m0.x + d01 * p1.x + d11 * m1.x;
        let dy = d00 * p0.y + d10 * m0.y + d01 * p1.y + d11 * m1.y;
        dy.atan2(dx).to_degrees()
    }

    fn segment(&self, progress: f32) -> (usize, f32) {
        let segments = self.points.len() - 1;
        let scaled = progress * segments as f32;
        let index = (scaled.floor().max(0.0) as usize).min(segments - 1);
        (index, scaled - index as f32)
    }

    fn hermite_terms(&self, index: usize) -> (Point, Point, Point, Point) {
        let last = self.points.len() - 1;
        let at = |i: usize| self.points[i.min(last)];
        let before = |i: usize| self.points[i.saturating_sub(1)];

        let p0 = at(index);
        let p1 = at(index + 1);
        // Blend of the chord (straight segment) and the Catmull-Rom tangent
        let c = self.curviness;
        let tangent = |prev: Point, next: Point| {
            Point::new(
                (1.0 - c) * (p1.x - p0.x) + c * 0.5 * (next.x - prev.x),
                (1.0 - c) * (p1.y - p0.y) + c * 0.5 * (next.y - prev.y),
            )
        };
        let m0 = tangent(before(index), at(index + 1));
        let m1 = tangent(p0, at(index + 2));
        (p0, p1, m0, m1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::Interpolate;

    fn linear_point_at(path: &MotionPath, progress: f32) -> Point {
        let (index, u) = path.segment(progress);
        path.points[index].lerp(&path.points[index + 1], u)
    }

    fn logo_path() -> MotionPath {
        MotionPath::new([
            Point::new(-100.0, -50.0),
            Point::new(0.0, 0.0),
            Point::new(50.0, -20.0),
            Point::new(0.0, 0.0),
        ])
        .curviness(1.5)
    }

    #[test]
    fn test_passes_through_points() {
        let path = logo_path();
        for (i, expected) in path.points.iter().enumerate() {
            let p = path.point_at(i as f32 / 3.0);
            assert!(p.approx_eq(expected, 1e-3), "point {i}: {p:?}");
        }
    }

    #[test]
    fn test_zero_curviness_is_linear() {
        let path = logo_path().curviness(0.0);
        for i in 0..=30 {
            let t = i as f32 / 30.0;
            assert!(path.point_at(t).approx_eq(&linear_point_at(&path, t), 1e-3));
        }
    }

    #[test]
    fn test_curviness_bends_the_path() {
        let path = logo_path();
        let t = 0.5 / 3.0;
        assert!(!path.point_at(t).approx_eq(&linear_point_at(&path, t), 0.5));
    }

    #[test]
    fn test_extrapolates_past_the_end() {
        let path = logo_path();
        let end = path.point_at(1.0);
        let beyond = path.point_at(1.05);
        assert!(!beyond.approx_eq(&end, 1e-3));
    }

    #[test]
    fn test_degenerate_paths() {
        assert_eq!(MotionPath::new(Vec::new()).point_at(0.5), Point::default());
        let single = MotionPath::new([Point::new(3.0, 4.0)]);
        assert_eq!(single.point_at(0.7), Point::new(3.0, 4.0));
        assert_eq!(single.angle_at(0.7), 0.0);
    }

    #[test]
    fn test_angle_follows_direction() {
        let path = MotionPath::new([Point::new(0.0, 0.0), Point::new(10.0, 0.0)]);
        assert!(path.angle_at(0.5).abs() < 1e-3);
        let down = MotionPath::new([Point::new(0.0, 0.0), Point::new(0.0, 10.0)]);
        assert!((down.angle_at(0.5) - 90.0).abs() < 1e-3);
    }
}
