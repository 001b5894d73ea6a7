//! Obstacle shapes.
//!
//! Every shape is convex and its distance functions return the distance to
//! the border of the (inflated) shape: positive outside, zero on the border,
//! negative inside. Inside the shape the distance is minus the distance to
//! the nearest border point. Obstacle movement checks rely on this, see
//! [`crate::ObstacleView::is_movement_allowed`].

use glam::Vec2;
use parry2d::{bounding_volume::Aabb, math::Point};
use rp_geometry::{ConvexOutline, LineSegment, Rect};

use crate::registry::ObstacleKind;

pub trait Shape {
    const KIND: ObstacleKind;

    /// Signed distance between `point` and the shape border.
    fn distance(&self, point: Vec2) -> f32;

    /// Minimum signed distance between points of `segment` and the shape
    /// border.
    fn distance_to_segment(&self, segment: &LineSegment) -> f32;

    /// Bounding box of the shape including its padding.
    fn aabb(&self) -> Aabb;
}

/// A disk.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    center: Vec2,
    radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl Shape for Circle {
    const KIND: ObstacleKind = ObstacleKind::Circle;

    fn distance(&self, point: Vec2) -> f32 {
        (point - self.center).length() - self.radius
    }

    fn distance_to_segment(&self, segment: &LineSegment) -> f32 {
        segment.distance(self.center) - self.radius
    }

    fn aabb(&self) -> Aabb {
        padded_aabb(self.center, self.center, self.radius)
    }
}

impl Shape for Rect {
    const KIND: ObstacleKind = ObstacleKind::Rect;

    fn distance(&self, point: Vec2) -> f32 {
        self.signed_distance(point)
    }

    fn distance_to_segment(&self, segment: &LineSegment) -> f32 {
        self.outline().segment_signed_distance(segment)
    }

    fn aabb(&self) -> Aabb {
        Rect::aabb(self)
    }
}

/// A filled triangle inflated by half of its line width.
#[derive(Clone, Copy, Debug)]
pub struct Triangle {
    outline: ConvexOutline<3>,
    line_width: f32,
}

impl Triangle {
    /// Creates a new triangle. The vertices might be given in any
    /// orientation.
    pub fn new(p1: Vec2, p2: Vec2, p3: Vec2, line_width: f32) -> Self {
        let vertices = if (p2 - p1).perp_dot(p3 - p1) < 0. {
            [p1, p3, p2]
        } else {
            [p1, p2, p3]
        };

        Self {
            outline: ConvexOutline::new(vertices),
            line_width,
        }
    }

    /// Returns the triangle vertices in counter-clockwise order.
    pub fn vertices(&self) -> &[Vec2; 3] {
        self.outline.vertices()
    }

    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    fn padding(&self) -> f32 {
        0.5 * self.line_width
    }
}

impl Shape for Triangle {
    const KIND: ObstacleKind = ObstacleKind::Triangle;

    fn distance(&self, point: Vec2) -> f32 {
        self.outline.signed_distance(point) - self.padding()
    }

    fn distance_to_segment(&self, segment: &LineSegment) -> f32 {
        self.outline.segment_signed_distance(segment) - self.padding()
    }

    fn aabb(&self) -> Aabb {
        let [a, b, c] = *self.vertices();
        padded_aabb(a.min(b).min(c), a.max(b).max(c), self.padding())
    }
}

/// A line segment inflated by half of its width, i.e. a capsule.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    segment: LineSegment,
    width: f32,
}

impl Line {
    pub fn new(segment: LineSegment, width: f32) -> Self {
        Self { segment, width }
    }

    pub fn segment(&self) -> &LineSegment {
        &self.segment
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    fn padding(&self) -> f32 {
        0.5 * self.width
    }
}

impl Shape for Line {
    const KIND: ObstacleKind = ObstacleKind::Line;

    fn distance(&self, point: Vec2) -> f32 {
        self.segment.distance(point) - self.padding()
    }

    fn distance_to_segment(&self, segment: &LineSegment) -> f32 {
        self.segment.distance_to_segment(segment) - self.padding()
    }

    fn aabb(&self) -> Aabb {
        let (a, b) = (self.segment.a(), self.segment.b());
        padded_aabb(a.min(b), a.max(b), self.padding())
    }
}

fn padded_aabb(min: Vec2, max: Vec2, padding: f32) -> Aabb {
    let padding = Vec2::splat(padding);
    Aabb::new(Point::from(min - padding), Point::from(max + padding))
}
