//! Replay of configuration cycles: every control tick clears and re-adds
//! obstacles, reconfigures the planner and runs all configured queries.

use fastrand::Rng;
use glam::Vec2;
use rp_conf::{Configuration, ObstacleConf, ShapeConf};
use rp_planner::{Planner, StraightPlanner};
use tracing::{debug, info, info_span, warn};

/// Maximum number of attempts to find a single random free point.
const FREE_POINT_ATTEMPTS: usize = 100;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub ticks: u32,
    pub plans: u64,
    pub blocked: u64,
    pub failed: u64,
    pub free_points: u64,
}

/// Replays `ticks` configuration cycles of the scenario.
pub fn replay(conf: &Configuration, ticks: u32) -> Summary {
    let scenario = conf.scenario();
    let boundary = conf.field().boundary();
    let mut planner = StraightPlanner::new(conf.planner().seed());
    let mut summary = Summary {
        ticks,
        ..Default::default()
    };

    for tick in 0..ticks {
        let _span = info_span!("tick", tick).entered();

        planner.clear_obstacles();
        planner.set_boundary(boundary.min(), boundary.max());
        planner.set_radius(conf.planner().radius());
        for obstacle in scenario.obstacles() {
            let offset = jitter_offset(planner.state_mut().rng(), scenario.jitter());
            add_obstacle(&mut planner, obstacle, offset);
        }

        for movement in scenario.moves() {
            let (start, target) = (movement.start(), movement.target());
            match planner.plan(start, target) {
                Ok(plan) => match plan.blocker() {
                    Some(blocker) => info!(
                        "Movement {:?} -> {:?} blocked by {:?} (priority {}, distance {:.1})",
                        start,
                        target,
                        blocker.name(),
                        blocker.priority(),
                        blocker.distance()
                    ),
                    None => info!("Movement {:?} -> {:?} is free", start, target),
                },
                Err(error) => {
                    summary.failed += 1;
                    warn!("Movement {:?} -> {:?} not planned: {}", start, target, error);
                }
            }
        }

        for _ in 0..scenario.free_points() {
            match planner.random_free_point(FREE_POINT_ATTEMPTS) {
                Ok(point) => {
                    summary.free_points += 1;
                    debug!("Random free point {:?}", point);
                }
                Err(error) => warn!("{}", error),
            }
        }
    }

    let stats = planner.stats();
    summary.plans = stats.plans;
    summary.blocked = stats.blocked;
    summary
}

fn jitter_offset(rng: &mut Rng, jitter: f32) -> Vec2 {
    if jitter == 0. {
        return Vec2::ZERO;
    }
    jitter * (2. * Vec2::new(rng.f32(), rng.f32()) - Vec2::ONE)
}

fn add_obstacle(planner: &mut StraightPlanner, obstacle: &ObstacleConf, offset: Vec2) {
    let name = obstacle.name().to_owned();
    let priority = obstacle.priority();
    match obstacle.shape().translated(offset) {
        ShapeConf::Circle { center, radius } => {
            planner.add_circle(center, radius, name, priority);
        }
        ShapeConf::Rect { corner_a, corner_b } => {
            planner.add_rect(corner_a, corner_b, name, priority);
        }
        ShapeConf::Triangle {
            vertices: [p1, p2, p3],
            line_width,
        } => {
            planner.add_triangle(p1, p2, p3, line_width, name, priority);
        }
        ShapeConf::Line { start, end, width } => {
            planner.add_line(start, end, width, name, priority);
        }
    }
}
