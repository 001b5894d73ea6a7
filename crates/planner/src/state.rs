use std::borrow::Cow;

use fastrand::Rng;
use glam::Vec2;
use rp_geometry::Rect;
use rp_obstacles::{ObstacleKey, ObstacleRegistry, ObstacleView};
use tracing::debug;

/// Configuration phase of a planner.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Robot radius has not been set yet.
    Unconfigured,
    /// Robot radius is set, the planner might be queried.
    Configured,
}

/// State shared by all planners: robot radius, playfield boundary, random
/// number generator and obstacles.
pub struct PlannerState {
    radius: f32,
    boundary: Rect,
    rng: Rng,
    obstacles: ObstacleRegistry,
}

impl PlannerState {
    /// Creates a new unconfigured state with an empty boundary at the origin
    /// and a random number generator seeded with `seed`.
    pub fn new(seed: u32) -> Self {
        Self {
            radius: -1.,
            boundary: Rect::default(),
            rng: Rng::with_seed(seed.into()),
            obstacles: ObstacleRegistry::new(),
        }
    }

    /// Re-seeds the random number generator. Generators seeded with the same
    /// value produce identical sequences.
    pub fn seed_random(&mut self, seed: u32) {
        debug!("Seeding planner random number generator with {seed}");
        self.rng.seed(seed.into());
    }

    pub fn set_radius(&mut self, radius: f32) {
        debug!("Setting robot radius to {radius}");
        self.radius = radius;
    }

    /// Robot radius, negative if unset.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn is_radius_valid(&self) -> bool {
        self.radius >= 0.
    }

    pub fn phase(&self) -> Phase {
        if self.is_radius_valid() {
            Phase::Configured
        } else {
            Phase::Unconfigured
        }
    }

    /// Sets the playfield boundary spanning two arbitrary opposite corners.
    pub fn set_boundary(&mut self, corner_a: Vec2, corner_b: Vec2) {
        self.boundary = Rect::from_corners(corner_a, corner_b);
        debug!(
            "Setting playfield boundary to {:?} - {:?}",
            self.boundary.min(),
            self.boundary.max()
        );
    }

    pub fn boundary(&self) -> Rect {
        self.boundary
    }

    pub fn rng(&mut self) -> &mut Rng {
        &mut self.rng
    }

    pub fn obstacles(&self) -> &ObstacleRegistry {
        &self.obstacles
    }

    /// Builds a view of all obstacles, see [`ObstacleRegistry::collect`].
    pub fn collect_obstacles(&self) -> ObstacleView<'_> {
        self.obstacles.collect()
    }

    /// See [`WorldView::point_in_playfield`].
    pub fn point_in_playfield(&self, point: Vec2, radius: f32) -> bool {
        self.world().point_in_playfield(point, radius)
    }

    /// Immutably borrows the world.
    pub fn world(&self) -> WorldView<'_> {
        WorldView {
            obstacles: &self.obstacles,
            boundary: self.boundary,
            radius: self.radius,
        }
    }

    /// Immutably borrows the world together with a mutable borrow of the
    /// random number generator.
    pub fn split(&mut self) -> (WorldView<'_>, &mut Rng) {
        let world = WorldView {
            obstacles: &self.obstacles,
            boundary: self.boundary,
            radius: self.radius,
        };
        (world, &mut self.rng)
    }

    pub fn add_circle(
        &mut self,
        center: Vec2,
        radius: f32,
        name: impl Into<Cow<'static, str>>,
        priority: i32,
    ) -> ObstacleKey {
        self.obstacles.add_circle(center, radius, name, priority)
    }

    pub fn add_rect(
        &mut self,
        corner_a: Vec2,
        corner_b: Vec2,
        name: impl Into<Cow<'static, str>>,
        priority: i32,
    ) -> ObstacleKey {
        self.obstacles.add_rect(corner_a, corner_b, name, priority)
    }

    pub fn add_triangle(
        &mut self,
        p1: Vec2,
        p2: Vec2,
        p3: Vec2,
        line_width: f32,
        name: impl Into<Cow<'static, str>>,
        priority: i32,
    ) -> ObstacleKey {
        self.obstacles.add_triangle(p1, p2, p3, line_width, name, priority)
    }

    pub fn add_line(
        &mut self,
        p1: Vec2,
        p2: Vec2,
        width: f32,
        name: impl Into<Cow<'static, str>>,
        priority: i32,
    ) -> ObstacleKey {
        self.obstacles.add_line(p1, p2, width, name, priority)
    }

    /// Removes all obstacles. Only reachable through
    /// [`crate::Planner::clear_obstacles`] so that the planner hook is never
    /// skipped.
    pub(crate) fn clear_obstacles(&mut self) {
        self.obstacles.clear();
    }
}

/// Read-only borrow of obstacles, boundary and robot radius of a planner.
#[derive(Clone, Copy)]
pub struct WorldView<'a> {
    obstacles: &'a ObstacleRegistry,
    boundary: Rect,
    radius: f32,
}

impl<'a> WorldView<'a> {
    pub fn obstacles(&self) -> &'a ObstacleRegistry {
        self.obstacles
    }

    pub fn collect_obstacles(&self) -> ObstacleView<'a> {
        self.obstacles.collect()
    }

    pub fn boundary(&self) -> Rect {
        self.boundary
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Returns true if a disc of a given `radius` centered at `point` fully
    /// lies within the playfield boundary. Touching the boundary is allowed.
    pub fn point_in_playfield(&self, point: Vec2, radius: f32) -> bool {
        self.boundary.contains_disc(point, radius)
    }

    /// Returns a uniformly distributed random point such that a disc of a
    /// given `radius` centered at the point lies within the playfield.
    ///
    /// Center of the playfield is returned if the disc does not fit into
    /// the playfield.
    pub fn random_point_in_playfield(&self, rng: &mut Rng, radius: f32) -> Vec2 {
        match self.boundary.shrunk(radius) {
            Some(area) => area.min() + Vec2::new(rng.f32(), rng.f32()) * area.size(),
            None => self.boundary.center(),
        }
    }
}
