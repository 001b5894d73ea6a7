use std::borrow::Cow;

use glam::Vec2;
use rp_geometry::{LineSegment, Rect};
use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    obstacle::{AnyObstacle, Obstacle},
    shape::{Circle, Line, Triangle},
    view::ObstacleView,
};

/// Obstacle kinds ordered the same way as obstacles of an [`ObstacleView`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ObstacleKind {
    Circle,
    Rect,
    Triangle,
    Line,
}

/// Identifies an obstacle within a registry generation.
///
/// Keys are ordered the same way as obstacles of an [`ObstacleView`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObstacleKey {
    kind: ObstacleKind,
    index: usize,
}

impl ObstacleKey {
    fn new(kind: ObstacleKind, index: usize) -> Self {
        Self { kind, index }
    }

    pub fn kind(&self) -> ObstacleKind {
        self.kind
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

/// Keys of all obstacles of a registry stamped with the registry generation
/// at the time of collection.
///
/// Contrary to [`ObstacleView`], this structure does not borrow the
/// registry, thus it might be kept across calls. Any registry mutation makes
/// it stale, see [`ObstacleRegistry::resolve`].
#[derive(Clone, Debug, Default)]
pub struct CollectedObstacles {
    generation: u64,
    keys: Vec<ObstacleKey>,
}

impl CollectedObstacles {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn keys(&self) -> &[ObstacleKey] {
        self.keys.as_slice()
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error(
    "Collected obstacles are stale: collected at generation {collected}, registry is at \
     generation {current}"
)]
pub struct StaleViewError {
    collected: u64,
    current: u64,
}

/// Owner of all obstacles of a planning world.
///
/// Obstacles are stored by value in one container per obstacle kind. They
/// are only ever appended or bulk-cleared, never removed individually.
/// Every mutation increments the registry generation.
#[derive(Default)]
pub struct ObstacleRegistry {
    circles: Vec<Obstacle<Circle>>,
    rects: Vec<Obstacle<Rect>>,
    triangles: Vec<Obstacle<Triangle>>,
    lines: Vec<Obstacle<Line>>,
    generation: u64,
}

impl ObstacleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes all obstacles. Obstacles collected with
    /// [`Self::collect_keys`] become stale.
    pub fn clear(&mut self) {
        debug!("Clearing {} obstacles", self.len());
        self.circles.clear();
        self.rects.clear();
        self.triangles.clear();
        self.lines.clear();
        self.bump();
    }

    /// Adds a disk obstacle.
    pub fn add_circle(
        &mut self,
        center: Vec2,
        radius: f32,
        name: impl Into<Cow<'static, str>>,
        priority: i32,
    ) -> ObstacleKey {
        let obstacle = Obstacle::new(Circle::new(center, radius), name, priority);
        trace!(
            "Adding circle obstacle {:?} at {:?} with radius {}",
            obstacle.name(),
            center,
            radius
        );
        let key = ObstacleKey::new(ObstacleKind::Circle, self.circles.len());
        self.circles.push(obstacle);
        self.bump();
        key
    }

    /// Adds an axis aligned rectangle obstacle spanning two arbitrary
    /// opposite corners.
    pub fn add_rect(
        &mut self,
        corner_a: Vec2,
        corner_b: Vec2,
        name: impl Into<Cow<'static, str>>,
        priority: i32,
    ) -> ObstacleKey {
        let rect = Rect::from_corners(corner_a, corner_b);
        let obstacle = Obstacle::new(rect, name, priority);
        trace!(
            "Adding rect obstacle {:?} spanning {:?} - {:?}",
            obstacle.name(),
            rect.min(),
            rect.max()
        );
        let key = ObstacleKey::new(ObstacleKind::Rect, self.rects.len());
        self.rects.push(obstacle);
        self.bump();
        key
    }

    /// Adds a filled triangle obstacle padded by half of `line_width`.
    pub fn add_triangle(
        &mut self,
        p1: Vec2,
        p2: Vec2,
        p3: Vec2,
        line_width: f32,
        name: impl Into<Cow<'static, str>>,
        priority: i32,
    ) -> ObstacleKey {
        let obstacle = Obstacle::new(Triangle::new(p1, p2, p3, line_width), name, priority);
        trace!(
            "Adding triangle obstacle {:?} with vertices {:?}, {:?}, {:?}",
            obstacle.name(),
            p1,
            p2,
            p3
        );
        let key = ObstacleKey::new(ObstacleKind::Triangle, self.triangles.len());
        self.triangles.push(obstacle);
        self.bump();
        key
    }

    /// Adds a line obstacle of a total thickness `width`.
    pub fn add_line(
        &mut self,
        p1: Vec2,
        p2: Vec2,
        width: f32,
        name: impl Into<Cow<'static, str>>,
        priority: i32,
    ) -> ObstacleKey {
        let obstacle = Obstacle::new(Line::new(LineSegment::new(p1, p2), width), name, priority);
        trace!(
            "Adding line obstacle {:?} from {:?} to {:?} with width {}",
            obstacle.name(),
            p1,
            p2,
            width
        );
        let key = ObstacleKey::new(ObstacleKind::Line, self.lines.len());
        self.lines.push(obstacle);
        self.bump();
        key
    }

    pub fn circles(&self) -> &[Obstacle<Circle>] {
        self.circles.as_slice()
    }

    pub fn rects(&self) -> &[Obstacle<Rect>] {
        self.rects.as_slice()
    }

    pub fn triangles(&self) -> &[Obstacle<Triangle>] {
        self.triangles.as_slice()
    }

    pub fn lines(&self) -> &[Obstacle<Line>] {
        self.lines.as_slice()
    }

    /// Total number of obstacles of all kinds.
    pub fn len(&self) -> usize {
        self.circles.len() + self.rects.len() + self.triangles.len() + self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a number incremented by every mutation of the registry.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn get(&self, key: ObstacleKey) -> Option<AnyObstacle<'_>> {
        let index = key.index();
        match key.kind() {
            ObstacleKind::Circle => self.circles.get(index).map(AnyObstacle::from),
            ObstacleKind::Rect => self.rects.get(index).map(AnyObstacle::from),
            ObstacleKind::Triangle => self.triangles.get(index).map(AnyObstacle::from),
            ObstacleKind::Line => self.lines.get(index).map(AnyObstacle::from),
        }
    }

    /// Builds a view of all obstacles. Circles come first, followed by
    /// rectangles, triangles and lines. Obstacles of the same kind keep
    /// insertion order.
    pub fn collect(&self) -> ObstacleView<'_> {
        let mut obstacles = Vec::with_capacity(self.len());
        obstacles.extend(self.circles.iter().map(AnyObstacle::from));
        obstacles.extend(self.rects.iter().map(AnyObstacle::from));
        obstacles.extend(self.triangles.iter().map(AnyObstacle::from));
        obstacles.extend(self.lines.iter().map(AnyObstacle::from));
        ObstacleView::new(obstacles)
    }

    /// Collects keys of all obstacles in the same order as [`Self::collect`].
    pub fn collect_keys(&self) -> CollectedObstacles {
        let mut keys = Vec::with_capacity(self.len());
        for (kind, len) in [
            (ObstacleKind::Circle, self.circles.len()),
            (ObstacleKind::Rect, self.rects.len()),
            (ObstacleKind::Triangle, self.triangles.len()),
            (ObstacleKind::Line, self.lines.len()),
        ] {
            keys.extend((0..len).map(|index| ObstacleKey::new(kind, index)));
        }

        CollectedObstacles {
            generation: self.generation,
            keys,
        }
    }

    /// Builds a view of obstacles given by `keys`, ordered the same way as
    /// in [`Self::collect`]. Keys not present in the registry are skipped.
    ///
    /// The keys are not checked against the registry generation, see
    /// [`Self::check_generation`].
    pub fn select(&self, keys: impl IntoIterator<Item = ObstacleKey>) -> ObstacleView<'_> {
        let mut keys: Vec<ObstacleKey> = keys.into_iter().collect();
        keys.sort_unstable();
        keys.dedup();
        ObstacleView::new(keys.into_iter().filter_map(|key| self.get(key)).collect())
    }

    /// Builds a view from previously collected keys.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry has been mutated since the keys were
    /// collected.
    pub fn resolve(
        &self,
        collected: &CollectedObstacles,
    ) -> Result<ObstacleView<'_>, StaleViewError> {
        self.check_generation(collected.generation)?;
        let obstacles: Vec<AnyObstacle> = collected
            .keys
            .iter()
            .filter_map(|&key| self.get(key))
            .collect();
        debug_assert_eq!(obstacles.len(), collected.keys.len());
        Ok(ObstacleView::new(obstacles))
    }

    /// Returns an error if `generation` is not the current generation of the
    /// registry.
    pub fn check_generation(&self, generation: u64) -> Result<(), StaleViewError> {
        if generation == self.generation {
            Ok(())
        } else {
            Err(StaleViewError {
                collected: generation,
                current: self.generation,
            })
        }
    }

    fn bump(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}
