//! Obstacles of a planning world.
//!
//! Obstacles are convex shapes (disks, rectangles, filled triangles and
//! thick lines) tagged with a diagnostic name and a priority. They are owned
//! by an [`ObstacleRegistry`] and queried through an [`ObstacleView`], which
//! ranks violated obstacles and decides whether a robot might move along a
//! line segment.

pub use obstacle::{AnyObstacle, Obstacle};
pub use registry::{
    CollectedObstacles, ObstacleKey, ObstacleKind, ObstacleRegistry, StaleViewError,
};
pub use shape::{Circle, Line, Shape, Triangle};
pub use view::{ObstacleView, Violation};

mod obstacle;
mod registry;
mod shape;
mod view;
