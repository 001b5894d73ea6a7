use glam::Vec2;
use parry2d::{bounding_volume::Aabb, math::Point, query::PointQuery};
use thiserror::Error;

use crate::convex::ConvexOutline;

/// Axis aligned rectangle. The corners are always normalized so that `min`
/// is component-wise smaller or equal to `max`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    min: Vec2,
    max: Vec2,
}

impl Rect {
    /// Creates a new rectangle spanning two arbitrary opposite corners.
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Bottom left corner.
    pub fn min(&self) -> Vec2 {
        self.min
    }

    /// Top right corner.
    pub fn max(&self) -> Vec2 {
        self.max
    }

    pub fn center(&self) -> Vec2 {
        0.5 * (self.min + self.max)
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Returns the rectangle shrunk by `amount` on every side. Returns None if
    /// nothing is left of the rectangle.
    pub fn shrunk(&self, amount: f32) -> Option<Self> {
        let offset = Vec2::splat(amount);
        let min = self.min + offset;
        let max = self.max - offset;
        if min.cmple(max).all() {
            Some(Self { min, max })
        } else {
            None
        }
    }

    /// Returns true if the point lies within the rectangle. Note that the
    /// rectangle edges are inclusive.
    pub fn contains(&self, point: Vec2) -> bool {
        self.min.cmple(point).all() && self.max.cmpge(point).all()
    }

    /// Returns true if a disc of a given `radius` centered at `center` fully
    /// lies within the rectangle. Touching the edges is allowed.
    pub fn contains_disc(&self, center: Vec2, radius: f32) -> bool {
        center.x - radius >= self.min.x
            && center.x + radius <= self.max.x
            && center.y - radius >= self.min.y
            && center.y + radius <= self.max.y
    }

    /// Returns distance between `point` and the closest point on the
    /// rectangle border. The distance is negative for points inside the
    /// rectangle.
    pub fn signed_distance(&self, point: Vec2) -> f32 {
        let projection = self
            .aabb()
            .project_local_point(&Point::from(point), false);
        let distance = Vec2::from(projection.point).distance(point);
        if projection.is_inside {
            -distance
        } else {
            distance
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(Point::from(self.min), Point::from(self.max))
    }

    /// Returns the four corners in counter-clockwise order starting at
    /// [`Self::min`].
    pub fn corners(&self) -> [Vec2; 4] {
        [
            self.min,
            Vec2::new(self.max.x, self.min.y),
            self.max,
            Vec2::new(self.min.x, self.max.y),
        ]
    }

    pub fn outline(&self) -> ConvexOutline<4> {
        ConvexOutline::new(self.corners())
    }

    /// Validates that the rectangle has finite corners and a non-zero area.
    pub fn validate(&self) -> Result<(), RectValidationError> {
        if !self.min.is_finite() || !self.max.is_finite() || self.size().cmple(Vec2::ZERO).any()
        {
            return Err(RectValidationError {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

impl Default for Rect {
    fn default() -> Self {
        Self {
            min: Vec2::ZERO,
            max: Vec2::ZERO,
        }
    }
}

impl From<Rect> for Aabb {
    fn from(rect: Rect) -> Self {
        rect.aabb()
    }
}

impl From<Aabb> for Rect {
    fn from(aabb: Aabb) -> Self {
        Self::from_corners(Vec2::from(aabb.mins), Vec2::from(aabb.maxs))
    }
}

#[derive(Error, Debug)]
#[error(
    "Rectangle has to be finite with positive size: got ({}, {}) - ({}, {})",
    .min.x, .min.y, .max.x, .max.y
)]
pub struct RectValidationError {
    min: Vec2,
    max: Vec2,
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_from_corners() {
        let rect = Rect::from_corners(Vec2::new(10., -2.), Vec2::new(-3., 5.));
        assert_eq!(rect.min(), Vec2::new(-3., -2.));
        assert_eq!(rect.max(), Vec2::new(10., 5.));
        assert_eq!(rect.center(), Vec2::new(3.5, 1.5));
        assert_eq!(rect.size(), Vec2::new(13., 7.));
    }

    #[test]
    fn test_contains() {
        let rect = Rect::from_corners(Vec2::ZERO, Vec2::new(2., 3.));
        assert!(rect.contains(Vec2::ZERO));
        assert!(rect.contains(Vec2::new(2., 3.)));
        assert!(!rect.contains(Vec2::new(3., 3.)));
        assert!(!rect.contains(Vec2::new(f32::INFINITY, 3.)));
        assert!(!rect.contains(Vec2::new(f32::NAN, 3.)));
    }

    #[test]
    fn test_contains_disc() {
        let rect = Rect::from_corners(Vec2::ZERO, Vec2::splat(100.));
        assert!(rect.contains_disc(Vec2::new(50., 50.), 5.));
        assert!(rect.contains_disc(Vec2::new(50., 95.), 5.));
        assert!(rect.contains_disc(Vec2::new(5., 5.), 5.));
        assert!(!rect.contains_disc(Vec2::new(50., 96.), 5.));
        assert!(!rect.contains_disc(Vec2::new(4., 50.), 5.));
        assert!(!rect.contains_disc(Vec2::new(96., 50.), 5.));
        assert!(!rect.contains_disc(Vec2::new(50., 4.), 5.));
    }

    #[test]
    fn test_signed_distance() {
        let rect = Rect::from_corners(Vec2::ZERO, Vec2::splat(10.));
        assert_abs_diff_eq!(rect.signed_distance(Vec2::new(20., 5.)), 10., epsilon = 1e-5);
        assert_abs_diff_eq!(rect.signed_distance(Vec2::new(13., 14.)), 5., epsilon = 1e-5);
        assert_abs_diff_eq!(rect.signed_distance(Vec2::new(10., 5.)), 0., epsilon = 1e-5);
        assert_abs_diff_eq!(rect.signed_distance(Vec2::new(5., 5.)), -5., epsilon = 1e-5);
        assert_abs_diff_eq!(rect.signed_distance(Vec2::new(2., 6.)), -2., epsilon = 1e-5);
    }

    #[test]
    fn test_shrunk() {
        let rect = Rect::from_corners(Vec2::ZERO, Vec2::new(10., 4.));
        assert_eq!(
            rect.shrunk(1.),
            Some(Rect::from_corners(Vec2::ONE, Vec2::new(9., 3.)))
        );
        assert_eq!(
            rect.shrunk(2.),
            Some(Rect::from_corners(Vec2::new(2., 2.), Vec2::new(8., 2.)))
        );
        assert!(rect.shrunk(2.5).is_none());
    }

    #[test]
    fn test_validate() {
        assert!(Rect::from_corners(Vec2::ZERO, Vec2::ONE).validate().is_ok());
        assert!(Rect::from_corners(Vec2::ZERO, Vec2::new(1., 0.))
            .validate()
            .is_err());
        assert!(Rect::from_corners(Vec2::ZERO, Vec2::new(f32::NAN, 1.))
            .validate()
            .is_err());

        match Rect::from_corners(Vec2::new(2., 0.), Vec2::new(-1., 0.)).validate() {
            Err(error) => {
                assert_eq!(
                    format!("{error}"),
                    "Rectangle has to be finite with positive size: got (-1, 0) - (2, 0)"
                );
            }
            Ok(()) => unreachable!(),
        }
    }
}
