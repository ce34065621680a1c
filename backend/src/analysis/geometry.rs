/// A 2D point in image coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A closed polygon outline, as emitted by the segmentation model.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    points: Vec<Point>,
}

impl Polygon {
    pub fn from_points(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Axis-aligned bounding box as (min, max) corners.
    pub fn bounding_box(&self) -> Option<(Point, Point)> {
        if self.points.is_empty() {
            return None;
        }

        let mut min = Point::new(f32::INFINITY, f32::INFINITY);
        let mut max = Point::new(f32::NEG_INFINITY, f32::NEG_INFINITY);

        for p in &self.points {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }

        Some((min, max))
    }

    /// Even-odd ray-cast containment test; the outline is treated as
    /// closed (last vertex connects back to the first).
    pub fn contains(&self, x: f32, y: f32) -> bool {
        if self.points.len() < 3 {
            return false;
        }

        let mut inside = false;
        let n = self.points.len();

        let mut j = n - 1;
        for i in 0..n {
            let vi = &self.points[i];
            let vj = &self.points[j];

            if ((vi.y > y) != (vj.y > y))
                && (x < (vj.x - vi.x) * (y - vi.y) / (vj.y - vi.y) + vi.x)
            {
                inside = !inside;
            }
            j = i;
        }

        inside
    }

    /// Scales every vertex, used to map model-input coordinates back to
    /// source image pixels.
    pub fn scale(&mut self, sx: f32, sy: f32) {
        for p in &mut self.points {
            p.x *= sx;
            p.y *= sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Polygon {
        Polygon::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 4.0),
            Point::new(0.0, 4.0),
        ])
    }

    #[test]
    fn contains_interior_points_only() {
        let square = unit_square();
        assert!(square.contains(2.0, 2.0));
        assert!(!square.contains(5.0, 2.0));
        assert!(!square.contains(-1.0, 2.0));
        assert!(!square.contains(2.0, 4.5));
    }

    #[test]
    fn concave_polygons_use_even_odd_rule() {
        // A "U" shape: the notch between the arms is outside.
        let u = Polygon::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(6.0, 0.0),
            Point::new(6.0, 6.0),
            Point::new(4.0, 6.0),
            Point::new(4.0, 2.0),
            Point::new(2.0, 2.0),
            Point::new(2.0, 6.0),
            Point::new(0.0, 6.0),
        ]);
        assert!(u.contains(1.0, 4.0));
        assert!(u.contains(5.0, 4.0));
        assert!(!u.contains(3.0, 4.0));
    }

    #[test]
    fn degenerate_outlines_contain_nothing() {
        let line = Polygon::from_points(vec![Point::new(0.0, 0.0), Point::new(4.0, 4.0)]);
        assert!(!line.contains(2.0, 2.0));
        assert!(Polygon::from_points(vec![]).bounding_box().is_none());
    }

    #[test]
    fn bounding_box_and_scale() {
        let mut square = unit_square();
        let (min, max) = square.bounding_box().unwrap();
        assert_eq!((min.x, min.y, max.x, max.y), (0.0, 0.0, 4.0, 4.0));

        square.scale(2.0, 0.5);
        let (_, max) = square.bounding_box().unwrap();
        assert_eq!((max.x, max.y), (8.0, 2.0));
    }
}
