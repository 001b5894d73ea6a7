use std::borrow::Cow;

use glam::Vec2;
use parry2d::bounding_volume::Aabb;
use rp_geometry::{LineSegment, Rect};

use crate::{
    registry::ObstacleKind,
    shape::{Circle, Line, Shape, Triangle},
};

/// A shape together with its diagnostic identity.
#[derive(Clone, Debug)]
pub struct Obstacle<S> {
    shape: S,
    name: Cow<'static, str>,
    priority: i32,
}

impl<S: Shape> Obstacle<S> {
    /// Creates a new obstacle.
    ///
    /// # Arguments
    ///
    /// * `shape` - convex shape of the obstacle.
    ///
    /// * `name` - diagnostic label. It is not required to be unique.
    ///
    /// * `priority` - higher values are more important when ranking
    ///   violated obstacles.
    pub fn new(shape: S, name: impl Into<Cow<'static, str>>, priority: i32) -> Self {
        Self {
            shape,
            name: name.into(),
            priority,
        }
    }

    pub fn shape(&self) -> &S {
        &self.shape
    }

    pub fn name(&self) -> &str {
        self.name.as_ref()
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn distance(&self, point: Vec2) -> f32 {
        self.shape.distance(point)
    }

    pub fn distance_to_segment(&self, segment: &LineSegment) -> f32 {
        self.shape.distance_to_segment(segment)
    }
}

/// A borrowed obstacle of any kind.
#[derive(Clone, Copy, Debug)]
pub enum AnyObstacle<'a> {
    Circle(&'a Obstacle<Circle>),
    Rect(&'a Obstacle<Rect>),
    Triangle(&'a Obstacle<Triangle>),
    Line(&'a Obstacle<Line>),
}

impl<'a> AnyObstacle<'a> {
    pub fn kind(&self) -> ObstacleKind {
        match self {
            Self::Circle(_) => Circle::KIND,
            Self::Rect(_) => Rect::KIND,
            Self::Triangle(_) => Triangle::KIND,
            Self::Line(_) => Line::KIND,
        }
    }

    pub fn name(&self) -> &'a str {
        match *self {
            Self::Circle(o) => o.name(),
            Self::Rect(o) => o.name(),
            Self::Triangle(o) => o.name(),
            Self::Line(o) => o.name(),
        }
    }

    pub fn priority(&self) -> i32 {
        match self {
            Self::Circle(o) => o.priority(),
            Self::Rect(o) => o.priority(),
            Self::Triangle(o) => o.priority(),
            Self::Line(o) => o.priority(),
        }
    }

    /// Signed distance between `point` and the obstacle border, negative
    /// inside the obstacle.
    pub fn distance(&self, point: Vec2) -> f32 {
        match self {
            Self::Circle(o) => o.distance(point),
            Self::Rect(o) => o.distance(point),
            Self::Triangle(o) => o.distance(point),
            Self::Line(o) => o.distance(point),
        }
    }

    /// Minimum signed distance between points of `segment` and the obstacle
    /// border.
    pub fn distance_to_segment(&self, segment: &LineSegment) -> f32 {
        match self {
            Self::Circle(o) => o.distance_to_segment(segment),
            Self::Rect(o) => o.distance_to_segment(segment),
            Self::Triangle(o) => o.distance_to_segment(segment),
            Self::Line(o) => o.distance_to_segment(segment),
        }
    }

    pub fn aabb(&self) -> Aabb {
        match self {
            Self::Circle(o) => o.shape().aabb(),
            Self::Rect(o) => o.shape().aabb(),
            Self::Triangle(o) => o.shape().aabb(),
            Self::Line(o) => o.shape().aabb(),
        }
    }
}

impl<'a> From<&'a Obstacle<Circle>> for AnyObstacle<'a> {
    fn from(obstacle: &'a Obstacle<Circle>) -> Self {
        Self::Circle(obstacle)
    }
}

impl<'a> From<&'a Obstacle<Rect>> for AnyObstacle<'a> {
    fn from(obstacle: &'a Obstacle<Rect>) -> Self {
        Self::Rect(obstacle)
    }
}

impl<'a> From<&'a Obstacle<Triangle>> for AnyObstacle<'a> {
    fn from(obstacle: &'a Obstacle<Triangle>) -> Self {
        Self::Triangle(obstacle)
    }
}

impl<'a> From<&'a Obstacle<Line>> for AnyObstacle<'a> {
    fn from(obstacle: &'a Obstacle<Line>) -> Self {
        Self::Line(obstacle)
    }
}
