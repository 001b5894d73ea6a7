//! Exact signed distances between line segments and convex polygons.

use glam::Vec2;

use crate::segment::LineSegment;

/// A half-plane `{p | normal · p <= offset}` with unit outward `normal`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HalfPlane {
    normal: Vec2,
    offset: f32,
}

impl HalfPlane {
    /// Creates the half-plane lying to the left of an edge going from `a` to
    /// `b`, i.e. the inner half-plane of a counter-clockwise polygon edge.
    ///
    /// A degenerate edge (`a == b`) yields a half-plane containing every
    /// point.
    pub fn left_of(a: Vec2, b: Vec2) -> Self {
        let dir = b - a;
        let normal = Vec2::new(dir.y, -dir.x).normalize_or_zero();
        Self {
            normal,
            offset: normal.dot(a),
        }
    }

    pub fn normal(&self) -> Vec2 {
        self.normal
    }

    /// Signed distance of `point` to the half-plane border. It is negative
    /// inside the half-plane.
    pub fn signed_distance(&self, point: Vec2) -> f32 {
        self.normal.dot(point) - self.offset
    }
}

/// A convex polygon represented by its counter-clockwise vertices and the
/// corresponding edge half-planes.
#[derive(Clone, Copy, Debug)]
pub struct ConvexOutline<const N: usize> {
    vertices: [Vec2; N],
    planes: [HalfPlane; N],
}

impl<const N: usize> ConvexOutline<N> {
    /// Creates a new outline.
    ///
    /// # Arguments
    ///
    /// * `vertices` - vertices of a convex polygon in counter-clockwise
    ///   order.
    pub fn new(vertices: [Vec2; N]) -> Self {
        let planes =
            std::array::from_fn(|i| HalfPlane::left_of(vertices[i], vertices[(i + 1) % N]));
        Self { vertices, planes }
    }

    pub fn vertices(&self) -> &[Vec2; N] {
        &self.vertices
    }

    pub fn edge(&self, index: usize) -> LineSegment {
        LineSegment::new(self.vertices[index], self.vertices[(index + 1) % N])
    }

    pub fn edges(&self) -> impl Iterator<Item = LineSegment> + '_ {
        (0..N).map(|i| self.edge(i))
    }

    /// Returns true if `point` lies inside the polygon or on its border.
    pub fn contains(&self, point: Vec2) -> bool {
        self.planes.iter().all(|p| p.signed_distance(point) <= 0.)
    }

    /// Signed distance between `point` and the polygon border, negative
    /// inside the polygon.
    pub fn signed_distance(&self, point: Vec2) -> f32 {
        if self.contains(point) {
            self.interior_distance(point)
        } else {
            self.edges()
                .map(|edge| edge.distance(point))
                .fold(f32::INFINITY, f32::min)
        }
    }

    /// Minimum of [`Self::signed_distance`] over all points of `segment`.
    pub fn segment_signed_distance(&self, segment: &LineSegment) -> f32 {
        match self.clip(segment) {
            Some((t0, t1)) => self.interior_minimum(segment, t0, t1),
            None => self
                .edges()
                .map(|edge| edge.distance_to_segment(segment))
                .fold(f32::INFINITY, f32::min),
        }
    }

    /// Inside a convex polygon, the distance to the nearest border point
    /// equals the distance to the nearest edge line.
    fn interior_distance(&self, point: Vec2) -> f32 {
        self.planes
            .iter()
            .map(|p| p.signed_distance(point))
            .fold(f32::NEG_INFINITY, f32::max)
    }

    /// Returns the parameter interval of the part of `segment` lying inside
    /// the polygon or None if the segment does not touch the polygon.
    fn clip(&self, segment: &LineSegment) -> Option<(f32, f32)> {
        let mut t0: f32 = 0.;
        let mut t1: f32 = 1.;

        for plane in self.planes.iter() {
            let s0 = plane.signed_distance(segment.a());
            let s1 = plane.signed_distance(segment.b());

            if s0 > 0. && s1 > 0. {
                return None;
            }
            if s0 <= 0. && s1 <= 0. {
                continue;
            }

            let crossing = s0 / (s0 - s1);
            if s0 > 0. {
                t0 = t0.max(crossing);
            } else {
                t1 = t1.min(crossing);
            }
            if t0 > t1 {
                return None;
            }
        }

        Some((t0, t1))
    }

    /// Minimizes the interior distance over segment parameters `[t0, t1]`.
    ///
    /// The interior distance is the maximum of linear functions of the
    /// parameter, therefore the minimum is attained either at the interval
    /// end points or where two of the functions cross.
    fn interior_minimum(&self, segment: &LineSegment, t0: f32, t1: f32) -> f32 {
        let mut distance = self
            .interior_distance(segment.point_at(t0))
            .min(self.interior_distance(segment.point_at(t1)));

        let slopes: [(f32, f32); N] = std::array::from_fn(|i| {
            let s0 = self.planes[i].signed_distance(segment.a());
            let s1 = self.planes[i].signed_distance(segment.b());
            (s0, s1 - s0)
        });

        for i in 0..N {
            for j in (i + 1)..N {
                let (base_i, slope_i) = slopes[i];
                let (base_j, slope_j) = slopes[j];
                let denominator = slope_i - slope_j;
                if denominator == 0. {
                    continue;
                }
                let t = (base_j - base_i) / denominator;
                if t > t0 && t < t1 {
                    distance = distance.min(self.interior_distance(segment.point_at(t)));
                }
            }
        }

        distance
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn square() -> ConvexOutline<4> {
        ConvexOutline::new([
            Vec2::new(0., 0.),
            Vec2::new(10., 0.),
            Vec2::new(10., 10.),
            Vec2::new(0., 10.),
        ])
    }

    #[test]
    fn test_half_plane() {
        let plane = HalfPlane::left_of(Vec2::new(0., 0.), Vec2::new(10., 0.));
        assert_eq!(plane.normal(), Vec2::new(0., -1.));
        assert_eq!(plane.signed_distance(Vec2::new(3., 2.)), -2.);
        assert_eq!(plane.signed_distance(Vec2::new(3., -4.)), 4.);
    }

    #[test]
    fn test_signed_distance() {
        let square = square();
        assert!(square.contains(Vec2::new(10., 3.)));
        assert!(!square.contains(Vec2::new(10.5, 3.)));
        assert_abs_diff_eq!(square.signed_distance(Vec2::new(20., 5.)), 10., epsilon = 1e-5);
        assert_abs_diff_eq!(square.signed_distance(Vec2::new(5., 5.)), -5., epsilon = 1e-5);
        assert_abs_diff_eq!(square.signed_distance(Vec2::new(1., 7.)), -1., epsilon = 1e-5);
        assert_abs_diff_eq!(square.signed_distance(Vec2::new(0., 7.)), 0., epsilon = 1e-5);
    }

    #[test]
    fn test_segment_outside() {
        let square = square();
        let segment = LineSegment::new(Vec2::new(-5., 13.), Vec2::new(15., 13.));
        assert_abs_diff_eq!(square.segment_signed_distance(&segment), 3., epsilon = 1e-5);

        let segment = LineSegment::new(Vec2::new(13., 14.), Vec2::new(20., 20.));
        assert_abs_diff_eq!(square.segment_signed_distance(&segment), 5., epsilon = 1e-5);
    }

    #[test]
    fn test_segment_through() {
        let square = square();

        // Passes through the center.
        let segment = LineSegment::new(Vec2::new(-5., 5.), Vec2::new(15., 5.));
        assert_abs_diff_eq!(square.segment_signed_distance(&segment), -5., epsilon = 1e-5);

        // Diagonal crossing the center far from both end points.
        let segment = LineSegment::new(Vec2::new(-10., -10.), Vec2::new(20., 20.));
        assert_abs_diff_eq!(square.segment_signed_distance(&segment), -5., epsilon = 1e-5);

        // Grazing a corner region.
        let segment = LineSegment::new(Vec2::new(-1., 2.), Vec2::new(2., -1.));
        assert_abs_diff_eq!(
            square.segment_signed_distance(&segment),
            -0.5,
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_segment_inside() {
        let square = square();
        let segment = LineSegment::new(Vec2::new(1., 1.), Vec2::new(1., 9.));
        assert_abs_diff_eq!(square.segment_signed_distance(&segment), -1., epsilon = 1e-5);

        let segment = LineSegment::new(Vec2::new(2., 5.), Vec2::new(2., 5.));
        assert_abs_diff_eq!(square.segment_signed_distance(&segment), -2., epsilon = 1e-5);
    }
}
