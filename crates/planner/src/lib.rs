//! Planner substrate: robot radius, playfield boundary, seeded randomness
//! and obstacles shared by concrete planners, the [`Planner`] lifecycle and
//! the [`StraightPlanner`] reference planner.

pub use planner::Planner;
pub use state::{Phase, PlannerState, WorldView};
pub use straight::{Blocker, PlanError, PlanStats, StraightPlan, StraightPlanner};

mod planner;
mod state;
mod straight;
