use std::borrow::Cow;

use glam::Vec2;
use rp_obstacles::{ObstacleKey, ObstacleView};

use crate::state::PlannerState;

/// Lifecycle shared by all planners.
///
/// A planner is reused across many planning passes. Every pass clears the
/// obstacles, re-adds them, (re)configures the robot radius and the
/// playfield boundary and then queries the planner. Provided methods forward
/// to [`PlannerState`] and call planner hooks at the documented points.
pub trait Planner {
    fn state(&self) -> &PlannerState;

    fn state_mut(&mut self) -> &mut PlannerState;

    /// Clears planner specific state (caches, statistics, ...). Obstacles,
    /// robot radius and boundary are kept.
    fn reset(&mut self);

    /// Hook called by [`Self::clear_obstacles`] right after all obstacles
    /// were removed. Planners drop any data derived from obstacles here.
    fn clear_obstacles_custom(&mut self) {}

    /// Removes all obstacles and calls [`Self::clear_obstacles_custom`].
    fn clear_obstacles(&mut self) {
        self.state_mut().clear_obstacles();
        self.clear_obstacles_custom();
    }

    fn add_circle(
        &mut self,
        center: Vec2,
        radius: f32,
        name: impl Into<Cow<'static, str>>,
        priority: i32,
    ) -> ObstacleKey
    where
        Self: Sized,
    {
        self.state_mut().add_circle(center, radius, name, priority)
    }

    fn add_rect(
        &mut self,
        corner_a: Vec2,
        corner_b: Vec2,
        name: impl Into<Cow<'static, str>>,
        priority: i32,
    ) -> ObstacleKey
    where
        Self: Sized,
    {
        self.state_mut().add_rect(corner_a, corner_b, name, priority)
    }

    fn add_triangle(
        &mut self,
        p1: Vec2,
        p2: Vec2,
        p3: Vec2,
        line_width: f32,
        name: impl Into<Cow<'static, str>>,
        priority: i32,
    ) -> ObstacleKey
    where
        Self: Sized,
    {
        self.state_mut().add_triangle(p1, p2, p3, line_width, name, priority)
    }

    fn add_line(
        &mut self,
        p1: Vec2,
        p2: Vec2,
        width: f32,
        name: impl Into<Cow<'static, str>>,
        priority: i32,
    ) -> ObstacleKey
    where
        Self: Sized,
    {
        self.state_mut().add_line(p1, p2, width, name, priority)
    }

    fn set_radius(&mut self, radius: f32) {
        self.state_mut().set_radius(radius);
    }

    fn set_boundary(&mut self, corner_a: Vec2, corner_b: Vec2) {
        self.state_mut().set_boundary(corner_a, corner_b);
    }

    fn seed_random(&mut self, seed: u32) {
        self.state_mut().seed_random(seed);
    }

    fn collect_obstacles(&self) -> ObstacleView<'_> {
        self.state().collect_obstacles()
    }

    fn point_in_playfield(&self, point: Vec2, radius: f32) -> bool {
        self.state().point_in_playfield(point, radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Phase;

    struct CountingPlanner {
        state: PlannerState,
        cleared: usize,
        resets: usize,
    }

    impl CountingPlanner {
        fn new() -> Self {
            Self {
                state: PlannerState::new(0),
                cleared: 0,
                resets: 0,
            }
        }
    }

    impl Planner for CountingPlanner {
        fn state(&self) -> &PlannerState {
            &self.state
        }

        fn state_mut(&mut self) -> &mut PlannerState {
            &mut self.state
        }

        fn reset(&mut self) {
            self.resets += 1;
        }

        fn clear_obstacles_custom(&mut self) {
            assert!(self.state.obstacles().is_empty());
            self.cleared += 1;
        }
    }

    struct PlainPlanner(PlannerState);

    impl Planner for PlainPlanner {
        fn state(&self) -> &PlannerState {
            &self.0
        }

        fn state_mut(&mut self) -> &mut PlannerState {
            &mut self.0
        }

        fn reset(&mut self) {}
    }

    #[test]
    fn test_clear_hook() {
        let mut planner = CountingPlanner::new();
        planner.add_circle(Vec2::new(50., 50.), 10., "ball", 1);
        planner.add_line(Vec2::ZERO, Vec2::X, 1., "line", 0);
        assert_eq!(planner.collect_obstacles().len(), 2);

        planner.clear_obstacles();
        assert_eq!(planner.cleared, 1);
        assert!(planner.collect_obstacles().is_empty());

        planner.clear_obstacles();
        assert_eq!(planner.cleared, 2);
        assert_eq!(planner.resets, 0);
    }

    #[test]
    fn test_reset_keeps_world() {
        let mut planner = CountingPlanner::new();
        planner.set_boundary(Vec2::ZERO, Vec2::splat(100.));
        planner.set_radius(5.);
        planner.add_rect(Vec2::ZERO, Vec2::splat(10.), "box", 2);
        planner.add_triangle(Vec2::ZERO, Vec2::X, Vec2::Y, 0.5, "wedge", 3);

        planner.reset();
        assert_eq!(planner.resets, 1);
        assert_eq!(planner.cleared, 0);
        assert_eq!(planner.collect_obstacles().len(), 2);
        assert_eq!(planner.state().phase(), Phase::Configured);
        assert!(planner.point_in_playfield(Vec2::new(50., 95.), 5.));
    }

    #[test]
    fn test_default_hook() {
        let mut planner = PlainPlanner(PlannerState::new(3));
        planner.add_circle(Vec2::ZERO, 1., "ball", 0);
        planner.clear_obstacles();
        assert!(planner.collect_obstacles().is_empty());

        planner.seed_random(11);
        let draw = planner.state_mut().rng().u32(..);
        let mut other = PlannerState::new(11);
        assert_eq!(draw, other.rng().u32(..));
    }
}
