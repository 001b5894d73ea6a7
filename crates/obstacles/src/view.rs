use std::cmp::Ordering;

use glam::Vec2;
use rp_geometry::LineSegment;

use crate::obstacle::AnyObstacle;

/// Numerical slack (in millimeters) used when comparing point and segment
/// distances computed along different code paths.
const MOVEMENT_TOLERANCE: f32 = 0.001;

/// An ordered view of all obstacles of a registry.
///
/// The view borrows the registry, thus it is not possible to add or clear
/// obstacles while the view is alive. Build a new view after every registry
/// mutation.
#[derive(Debug)]
pub struct ObstacleView<'a> {
    obstacles: Vec<AnyObstacle<'a>>,
}

impl<'a> ObstacleView<'a> {
    pub(crate) fn new(obstacles: Vec<AnyObstacle<'a>>) -> Self {
        Self { obstacles }
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<AnyObstacle<'a>> {
        self.obstacles.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = AnyObstacle<'a>> + '_ {
        self.obstacles.iter().copied()
    }

    /// Returns the obstacle closest to `point` together with its signed
    /// distance. Returns None if the view is empty.
    pub fn min_distance(&self, point: Vec2) -> Option<(AnyObstacle<'a>, f32)> {
        self.iter()
            .map(|obstacle| (obstacle, obstacle.distance(point)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Returns the obstacle closest to `segment` together with its signed
    /// distance. Returns None if the view is empty.
    pub fn min_segment_distance(&self, segment: &LineSegment) -> Option<(AnyObstacle<'a>, f32)> {
        self.iter()
            .map(|obstacle| (obstacle, obstacle.distance_to_segment(segment)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Returns the most important obstacle which a robot of a given `radius`
    /// would touch anywhere along `segment`.
    ///
    /// Obstacles with higher priority are more important. Among obstacles of
    /// equal priority, the most penetrated one is returned.
    pub fn worst_violation(&self, segment: &LineSegment, radius: f32) -> Option<Violation<'a>> {
        self.iter()
            .filter_map(|obstacle| {
                let distance = obstacle.distance_to_segment(segment);
                if distance < radius {
                    Some(Violation { obstacle, distance })
                } else {
                    None
                }
            })
            .max_by(Violation::cmp_severity)
    }

    /// Like [`Self::worst_violation`] but only obstacles which prevent the
    /// movement are considered, see [`Self::is_movement_allowed`]. Obstacles
    /// the robot is leaving are skipped.
    pub fn worst_blocker(&self, segment: &LineSegment, radius: f32) -> Option<Violation<'a>> {
        self.iter()
            .filter_map(|obstacle| blocking_violation(obstacle, segment, radius))
            .max_by(Violation::cmp_severity)
    }

    /// Returns true if a robot of a given `radius` might move along
    /// `segment`.
    ///
    /// A robot which already overlaps an obstacle at the start of the
    /// segment is allowed to move as long as it does not get any deeper into
    /// the obstacle. This relies on convexity of the obstacles: it is always
    /// possible to leave a convex obstacle with monotonically growing
    /// distance. All other obstacles must stay clear of the robot during the
    /// whole movement.
    pub fn is_movement_allowed(&self, segment: &LineSegment, radius: f32) -> bool {
        self.iter()
            .all(|obstacle| blocking_violation(obstacle, segment, radius).is_none())
    }
}

/// Returns a violation if `obstacle` prevents movement of a robot along
/// `segment`.
fn blocking_violation<'a>(
    obstacle: AnyObstacle<'a>,
    segment: &LineSegment,
    radius: f32,
) -> Option<Violation<'a>> {
    let start = obstacle.distance(segment.a());
    let distance = obstacle.distance_to_segment(segment);
    let allowed = if start < radius {
        distance >= start - MOVEMENT_TOLERANCE
    } else {
        distance >= radius
    };

    if allowed {
        None
    } else {
        Some(Violation { obstacle, distance })
    }
}

/// An obstacle hit by a movement.
#[derive(Clone, Copy, Debug)]
pub struct Violation<'a> {
    obstacle: AnyObstacle<'a>,
    distance: f32,
}

impl<'a> Violation<'a> {
    pub fn obstacle(&self) -> AnyObstacle<'a> {
        self.obstacle
    }

    /// Minimum signed distance between the movement and the obstacle.
    pub fn distance(&self) -> f32 {
        self.distance
    }

    fn cmp_severity(a: &Self, b: &Self) -> Ordering {
        a.obstacle
            .priority()
            .cmp(&b.obstacle.priority())
            .then_with(|| b.distance.total_cmp(&a.distance))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::ObstacleRegistry;

    fn registry() -> ObstacleRegistry {
        let mut registry = ObstacleRegistry::new();
        registry.add_circle(Vec2::new(50., 50.), 10., "ball", 1);
        registry.add_rect(Vec2::new(0., 0.), Vec2::new(10., 10.), "box", 5);
        registry.add_line(Vec2::new(30., 0.), Vec2::new(30., 100.), 4., "wall", 1);
        registry
    }

    #[test]
    fn test_min_distance() {
        let registry = registry();
        let view = registry.collect();
        assert_eq!(view.len(), 3);

        let (obstacle, distance) = view.min_distance(Vec2::new(20., 5.)).unwrap();
        assert_eq!(obstacle.name(), "wall");
        assert_abs_diff_eq!(distance, 8., epsilon = 1e-5);

        let (obstacle, distance) = view.min_distance(Vec2::new(50., 50.)).unwrap();
        assert_eq!(obstacle.name(), "ball");
        assert_eq!(distance, -10.);

        let segment = LineSegment::new(Vec2::new(15., 90.), Vec2::new(15., 95.));
        let (obstacle, distance) = view.min_segment_distance(&segment).unwrap();
        assert_eq!(obstacle.name(), "wall");
        assert_abs_diff_eq!(distance, 13., epsilon = 1e-5);

        let mut empty = ObstacleRegistry::new();
        assert!(empty.collect().min_distance(Vec2::ZERO).is_none());
        empty.clear();
        assert!(empty.collect().is_empty());
    }

    #[test]
    fn test_worst_violation() {
        let registry = registry();
        let view = registry.collect();

        // Crosses the wall and the ball.
        let segment = LineSegment::new(Vec2::new(20., 50.), Vec2::new(80., 50.));
        let violation = view.worst_violation(&segment, 5.).unwrap();
        // Equal priority: the ball is hit deeper than the wall.
        assert_eq!(violation.obstacle().name(), "ball");
        assert_eq!(violation.distance(), -10.);

        // Crosses the wall and touches the box.
        let segment = LineSegment::new(Vec2::new(14., 5.), Vec2::new(40., 5.));
        let violation = view.worst_violation(&segment, 5.).unwrap();
        assert_eq!(violation.obstacle().name(), "box");
        assert_abs_diff_eq!(violation.distance(), 4., epsilon = 1e-5);

        let segment = LineSegment::new(Vec2::new(40., 90.), Vec2::new(90., 90.));
        assert!(view.worst_violation(&segment, 5.).is_none());
    }

    #[test]
    fn test_worst_blocker() {
        let registry = registry();
        let view = registry.collect();

        // Leaving the box towards the wall.
        let segment = LineSegment::new(Vec2::new(5., 5.), Vec2::new(26., 5.));
        assert!(!view.is_movement_allowed(&segment, 3.));
        assert_eq!(
            view.worst_violation(&segment, 3.).unwrap().obstacle().name(),
            "box"
        );
        let blocker = view.worst_blocker(&segment, 3.).unwrap();
        assert_eq!(blocker.obstacle().name(), "wall");
        assert_abs_diff_eq!(blocker.distance(), 2., epsilon = 1e-5);

        // Leaving the box is fine on its own.
        let segment = LineSegment::new(Vec2::new(5., 5.), Vec2::new(20., 5.));
        assert!(view.is_movement_allowed(&segment, 3.));
        assert!(view.worst_blocker(&segment, 3.).is_none());
    }

    #[test]
    fn test_movement_allowed() {
        let registry = registry();
        let view = registry.collect();

        // Free movement.
        let segment = LineSegment::new(Vec2::new(40., 90.), Vec2::new(90., 90.));
        assert!(view.is_movement_allowed(&segment, 5.));
        // Passing too close to the ball.
        let segment = LineSegment::new(Vec2::new(40., 63.), Vec2::new(90., 63.));
        assert!(!view.is_movement_allowed(&segment, 5.));
        // Leaving the ball.
        let segment = LineSegment::new(Vec2::new(52., 50.), Vec2::new(70., 50.));
        assert!(view.is_movement_allowed(&segment, 5.));
        // Going deeper into the ball.
        let segment = LineSegment::new(Vec2::new(58., 50.), Vec2::new(53., 50.));
        assert!(!view.is_movement_allowed(&segment, 5.));
        // Moving through the ball center and out on the other side.
        let segment = LineSegment::new(Vec2::new(58., 50.), Vec2::new(30., 50.));
        assert!(!view.is_movement_allowed(&segment, 5.));
        // Leaving the box parallel to its border.
        let segment = LineSegment::new(Vec2::new(9., 5.), Vec2::new(9., 20.));
        assert!(view.is_movement_allowed(&segment, 3.));
    }
}
