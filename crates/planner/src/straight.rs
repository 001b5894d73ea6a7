//! A reference planner which only considers straight movement to the
//! target.

use glam::Vec2;
use rp_geometry::LineSegment;
use rp_obstacles::{ObstacleKey, ObstacleRegistry, Violation};
use rstar::{RTree, RTreeObject, AABB};
use thiserror::Error;
use tracing::{debug, trace};

use crate::{planner::Planner, state::PlannerState};

#[derive(Error, Debug, PartialEq)]
pub enum PlanError {
    #[error("Robot radius is not set")]
    RadiusUnset,
    #[error("Target ({}, {}) is outside of the playfield", .target.x, .target.y)]
    OutsidePlayfield { target: Vec2 },
    #[error("No free point found in {0} attempts")]
    NoFreePoint(usize),
}

/// Result of straight line planning.
#[derive(Clone, Debug)]
pub struct StraightPlan {
    segment: LineSegment,
    blocker: Option<Blocker>,
}

impl StraightPlan {
    pub fn segment(&self) -> &LineSegment {
        &self.segment
    }

    /// Returns true if the robot might move straight to the target.
    pub fn is_free(&self) -> bool {
        self.blocker.is_none()
    }

    /// Most important obstacle blocking the movement.
    pub fn blocker(&self) -> Option<&Blocker> {
        self.blocker.as_ref()
    }
}

/// Detached identity of an obstacle blocking a movement.
#[derive(Clone, Debug, PartialEq)]
pub struct Blocker {
    name: String,
    priority: i32,
    distance: f32,
}

impl Blocker {
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Minimum signed distance between the movement and the obstacle.
    pub fn distance(&self) -> f32 {
        self.distance
    }
}

impl From<Violation<'_>> for Blocker {
    fn from(violation: Violation<'_>) -> Self {
        let obstacle = violation.obstacle();
        Self {
            name: obstacle.name().to_owned(),
            priority: obstacle.priority(),
            distance: violation.distance(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlanStats {
    /// Number of successful [`StraightPlanner::plan`] calls.
    pub plans: u64,
    /// Number of plans blocked by an obstacle.
    pub blocked: u64,
    /// Number of spatial index (re)builds.
    pub index_builds: u64,
}

/// Planner checking straight movement from a start to a target.
///
/// Obstacle bounding boxes are kept in a spatial index built lazily on the
/// first query after any change of obstacles.
pub struct StraightPlanner {
    state: PlannerState,
    index: Option<ObstacleIndex>,
    stats: PlanStats,
}

impl StraightPlanner {
    pub fn new(seed: u32) -> Self {
        Self {
            state: PlannerState::new(seed),
            index: None,
            stats: PlanStats::default(),
        }
    }

    pub fn stats(&self) -> PlanStats {
        self.stats
    }

    /// Checks straight movement of the robot from `start` to `target`.
    ///
    /// # Errors
    ///
    /// Returns an error if the robot radius is not set or if the robot
    /// would not fit into the playfield at `target`.
    pub fn plan(&mut self, start: Vec2, target: Vec2) -> Result<StraightPlan, PlanError> {
        if !self.state.is_radius_valid() {
            return Err(PlanError::RadiusUnset);
        }
        let radius = self.state.radius();
        if !self.state.point_in_playfield(target, radius) {
            return Err(PlanError::OutsidePlayfield { target });
        }

        let registry = self.state.obstacles();
        let index = ObstacleIndex::ensure(&mut self.index, registry, &mut self.stats);
        let segment = LineSegment::new(start, target);
        let view = registry.select(index.candidates(&segment, radius));

        let blocker = view.worst_blocker(&segment, radius).map(Blocker::from);

        self.stats.plans += 1;
        match blocker {
            Some(ref blocker) => {
                self.stats.blocked += 1;
                trace!(
                    "Movement {:?} -> {:?} blocked by {:?} (priority {}, distance {})",
                    start,
                    target,
                    blocker.name(),
                    blocker.priority(),
                    blocker.distance()
                );
            }
            None => trace!("Movement {:?} -> {:?} is free", start, target),
        }

        Ok(StraightPlan { segment, blocker })
    }

    /// Returns a random playfield point with no obstacle within the robot
    /// radius.
    ///
    /// # Errors
    ///
    /// Returns an error if the robot radius is not set or if no free point
    /// was found in `max_attempts` attempts.
    pub fn random_free_point(&mut self, max_attempts: usize) -> Result<Vec2, PlanError> {
        if !self.state.is_radius_valid() {
            return Err(PlanError::RadiusUnset);
        }

        let index = ObstacleIndex::ensure(&mut self.index, self.state.obstacles(), &mut self.stats);
        let (world, rng) = self.state.split();
        let radius = world.radius();

        for _ in 0..max_attempts {
            let point = world.random_point_in_playfield(rng, radius);
            let segment = LineSegment::new(point, point);
            let view = world.obstacles().select(index.candidates(&segment, radius));
            if view
                .min_distance(point)
                .map_or(true, |(_, distance)| distance >= radius)
            {
                return Ok(point);
            }
        }

        Err(PlanError::NoFreePoint(max_attempts))
    }
}

impl Planner for StraightPlanner {
    fn state(&self) -> &PlannerState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut PlannerState {
        &mut self.state
    }

    fn reset(&mut self) {
        debug!("Resetting straight planner after {} plans", self.stats.plans);
        self.index = None;
        self.stats = PlanStats::default();
    }

    fn clear_obstacles_custom(&mut self) {
        self.index = None;
    }
}

/// Spatial index of obstacle bounding boxes valid for a single registry
/// generation.
struct ObstacleIndex {
    generation: u64,
    tree: RTree<IndexedObstacle>,
}

impl ObstacleIndex {
    /// Returns an index up to date with `registry`, (re)building it if
    /// needed.
    fn ensure<'a>(
        index: &'a mut Option<Self>,
        registry: &ObstacleRegistry,
        stats: &mut PlanStats,
    ) -> &'a Self {
        if index
            .as_ref()
            .map_or(false, |index| index.generation != registry.generation())
        {
            *index = None;
        }

        index.get_or_insert_with(|| {
            stats.index_builds += 1;
            Self::build(registry)
        })
    }

    fn build(registry: &ObstacleRegistry) -> Self {
        debug!(
            "Building obstacle index of {} obstacles at generation {}",
            registry.len(),
            registry.generation()
        );

        let collected = registry.collect_keys();
        let obstacles = collected
            .keys()
            .iter()
            .zip(registry.collect().iter())
            .map(|(&key, obstacle)| {
                let aabb = obstacle.aabb();
                IndexedObstacle {
                    key,
                    envelope: AABB::from_corners(
                        [aabb.mins.x, aabb.mins.y],
                        [aabb.maxs.x, aabb.maxs.y],
                    ),
                }
            })
            .collect();

        Self {
            generation: collected.generation(),
            tree: RTree::bulk_load(obstacles),
        }
    }

    /// Returns keys of all obstacles which might be closer than `radius` to
    /// `segment`.
    fn candidates(&self, segment: &LineSegment, radius: f32) -> Vec<ObstacleKey> {
        let (a, b) = (segment.a(), segment.b());
        let min = a.min(b) - Vec2::splat(radius);
        let max = a.max(b) + Vec2::splat(radius);
        let envelope = AABB::from_corners([min.x, min.y], [max.x, max.y]);
        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|obstacle| obstacle.key)
            .collect()
    }
}

struct IndexedObstacle {
    key: ObstacleKey,
    envelope: AABB<[f32; 2]>,
}

impl RTreeObject for IndexedObstacle {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}
