use glam::Vec2;

/// Line segment with end points `a` and `b`.
///
/// A segment whose end points coincide behaves like a single point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineSegment {
    a: Vec2,
    b: Vec2,
}

impl LineSegment {
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self { a, b }
    }

    pub fn a(&self) -> Vec2 {
        self.a
    }

    pub fn b(&self) -> Vec2 {
        self.b
    }

    /// Returns the vector pointing from `a` to `b`.
    pub fn dir(&self) -> Vec2 {
        self.b - self.a
    }

    pub fn length(&self) -> f32 {
        self.dir().length()
    }

    /// Returns the same segment with swapped end points.
    pub fn reversed(&self) -> Self {
        Self::new(self.b, self.a)
    }

    /// Returns a point on the segment (or on its supporting line for
    /// parameters outside of `[0, 1]`). Parameter 0 corresponds to `a`, 1 to
    /// `b`.
    pub fn point_at(&self, t: f32) -> Vec2 {
        self.a + t * self.dir()
    }

    /// Returns the parameter (see [`Self::point_at`]) of the point of the
    /// segment closest to `point`.
    pub fn closest_param(&self, point: Vec2) -> f32 {
        let dir = self.dir();
        let length_squared = dir.length_squared();
        if length_squared == 0. {
            return 0.;
        }
        ((point - self.a).dot(dir) / length_squared).clamp(0., 1.)
    }

    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        self.point_at(self.closest_param(point))
    }

    /// Euclidean distance between `point` and the closest point of the
    /// segment.
    pub fn distance(&self, point: Vec2) -> f32 {
        self.closest_point(point).distance(point)
    }

    /// Returns true if the two segments share at least one point.
    pub fn intersects(&self, other: &LineSegment) -> bool {
        let d1 = self.dir().perp_dot(other.a - self.a);
        let d2 = self.dir().perp_dot(other.b - self.a);
        let d3 = other.dir().perp_dot(self.a - other.a);
        let d4 = other.dir().perp_dot(self.b - other.a);

        if ((d1 > 0. && d2 < 0.) || (d1 < 0. && d2 > 0.))
            && ((d3 > 0. && d4 < 0.) || (d3 < 0. && d4 > 0.))
        {
            return true;
        }

        // Touching and collinear configurations.
        (d1 == 0. && self.contains_collinear(other.a))
            || (d2 == 0. && self.contains_collinear(other.b))
            || (d3 == 0. && other.contains_collinear(self.a))
            || (d4 == 0. && other.contains_collinear(self.b))
    }

    /// Euclidean distance between the closest points of the two segments.
    /// Zero if the segments intersect.
    pub fn distance_to_segment(&self, other: &LineSegment) -> f32 {
        if self.intersects(other) {
            return 0.;
        }

        self.distance(other.a)
            .min(self.distance(other.b))
            .min(other.distance(self.a))
            .min(other.distance(self.b))
    }

    /// Returns true if `point`, assumed to lie on the supporting line, lies
    /// within the bounding box of the segment.
    fn contains_collinear(&self, point: Vec2) -> bool {
        self.a.min(self.b).cmple(point).all() && self.a.max(self.b).cmpge(point).all()
    }
}
