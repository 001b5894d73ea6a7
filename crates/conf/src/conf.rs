//! This module implements final (i.e. parsed and validated) scenario
//! configuration objects and their building from persisted configuration.

use anyhow::{ensure, Context, Error, Result};
use glam::Vec2;
use rp_geometry::Rect;

use crate::persisted;

/// Robot radius of a small size league robot in millimeters.
const DEFAULT_RADIUS: f32 = 90.;
/// Half of the small size league division A field including boundary.
const DEFAULT_HALF_FIELD: Vec2 = Vec2::new(6300., 4800.);

#[derive(Debug, Clone, Default)]
pub struct Configuration {
    planner: PlannerConf,
    field: FieldConf,
    scenario: ScenarioConf,
}

impl Configuration {
    pub fn planner(&self) -> &PlannerConf {
        &self.planner
    }

    pub fn field(&self) -> &FieldConf {
        &self.field
    }

    pub fn scenario(&self) -> &ScenarioConf {
        &self.scenario
    }
}

impl TryFrom<persisted::Configuration> for Configuration {
    type Error = Error;

    fn try_from(conf: persisted::Configuration) -> Result<Self> {
        let planner = PlannerConf::try_from(conf.planner.unwrap_or_default())
            .context("Invalid `planner` configuration")?;
        let field = match conf.field {
            Some(field) => FieldConf::try_from(field).context("Invalid `field` configuration")?,
            None => FieldConf::default(),
        };
        let scenario = ScenarioConf::try_from(conf.scenario.unwrap_or_default())
            .context("Invalid `scenario` configuration")?;

        Ok(Self {
            planner,
            field,
            scenario,
        })
    }
}

#[derive(Debug, Clone)]
pub struct PlannerConf {
    seed: u32,
    radius: f32,
}

impl PlannerConf {
    /// Seed of the planner random number generator.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Robot radius in millimeters.
    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl Default for PlannerConf {
    fn default() -> Self {
        Self {
            seed: 0,
            radius: DEFAULT_RADIUS,
        }
    }
}

impl TryFrom<persisted::Planner> for PlannerConf {
    type Error = Error;

    fn try_from(conf: persisted::Planner) -> Result<Self> {
        let radius = conf.radius.unwrap_or(DEFAULT_RADIUS);
        ensure!(
            radius.is_finite() && radius >= 0.,
            "`radius` must be finite and non-negative, got {radius}."
        );

        Ok(Self {
            seed: conf.seed.unwrap_or(0),
            radius,
        })
    }
}

#[derive(Debug, Clone)]
pub struct FieldConf {
    boundary: Rect,
}

impl FieldConf {
    /// Playfield boundary.
    pub fn boundary(&self) -> Rect {
        self.boundary
    }
}

impl Default for FieldConf {
    fn default() -> Self {
        Self {
            boundary: Rect::from_corners(-DEFAULT_HALF_FIELD, DEFAULT_HALF_FIELD),
        }
    }
}

impl TryFrom<persisted::Field> for FieldConf {
    type Error = Error;

    fn try_from(conf: persisted::Field) -> Result<Self> {
        let boundary = Rect::from_corners(Vec2::from(conf.corner_a), Vec2::from(conf.corner_b));
        boundary.validate()?;
        Ok(Self { boundary })
    }
}

#[derive(Debug, Clone)]
pub struct ScenarioConf {
    ticks: u32,
    jitter: f32,
    free_points: u32,
    obstacles: Vec<ObstacleConf>,
    moves: Vec<MoveConf>,
}

impl ScenarioConf {
    /// Number of replayed control ticks.
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Maximum per-tick random displacement of obstacles along each axis.
    pub fn jitter(&self) -> f32 {
        self.jitter
    }

    /// Number of random free points drawn every tick.
    pub fn free_points(&self) -> u32 {
        self.free_points
    }

    pub fn obstacles(&self) -> &[ObstacleConf] {
        self.obstacles.as_slice()
    }

    /// Movements planned every tick.
    pub fn moves(&self) -> &[MoveConf] {
        self.moves.as_slice()
    }
}

impl Default for ScenarioConf {
    fn default() -> Self {
        Self {
            ticks: 1,
            jitter: 0.,
            free_points: 0,
            obstacles: Vec::new(),
            moves: Vec::new(),
        }
    }
}

impl TryFrom<persisted::Scenario> for ScenarioConf {
    type Error = Error;

    fn try_from(conf: persisted::Scenario) -> Result<Self> {
        let ticks = conf.ticks.unwrap_or(1);
        ensure!(ticks > 0, "`ticks` must be positive.");

        let jitter = conf.jitter.unwrap_or(0.);
        ensure!(
            jitter.is_finite() && jitter >= 0.,
            "`jitter` must be finite and non-negative, got {jitter}."
        );

        let obstacles = conf
            .obstacles
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(i, obstacle)| {
                ObstacleConf::try_from(obstacle).with_context(|| format!("Invalid obstacle #{i}"))
            })
            .collect::<Result<Vec<_>>>()?;

        let moves = conf
            .moves
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(i, movement)| {
                MoveConf::try_from(movement).with_context(|| format!("Invalid move #{i}"))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            ticks,
            jitter,
            free_points: conf.free_points.unwrap_or(0),
            obstacles,
            moves,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ObstacleConf {
    name: String,
    priority: i32,
    shape: ShapeConf,
}

impl ObstacleConf {
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn shape(&self) -> &ShapeConf {
        &self.shape
    }
}

impl TryFrom<persisted::Obstacle> for ObstacleConf {
    type Error = Error;

    fn try_from(conf: persisted::Obstacle) -> Result<Self> {
        let (name, priority, shape) = match conf {
            persisted::Obstacle::Circle {
                name,
                priority,
                center,
                radius,
            } => (
                name,
                priority,
                ShapeConf::Circle {
                    center: finite_point(center, "center")?,
                    radius: non_negative(radius, "radius")?,
                },
            ),
            persisted::Obstacle::Rect {
                name,
                priority,
                corner_a,
                corner_b,
            } => (
                name,
                priority,
                ShapeConf::Rect {
                    corner_a: finite_point(corner_a, "corner_a")?,
                    corner_b: finite_point(corner_b, "corner_b")?,
                },
            ),
            persisted::Obstacle::Triangle {
                name,
                priority,
                vertices,
                line_width,
            } => (
                name,
                priority,
                ShapeConf::Triangle {
                    vertices: [
                        finite_point(vertices[0], "vertices")?,
                        finite_point(vertices[1], "vertices")?,
                        finite_point(vertices[2], "vertices")?,
                    ],
                    line_width: non_negative(line_width.unwrap_or(0.), "line_width")?,
                },
            ),
            persisted::Obstacle::Line {
                name,
                priority,
                start,
                end,
                width,
            } => (
                name,
                priority,
                ShapeConf::Line {
                    start: finite_point(start, "start")?,
                    end: finite_point(end, "end")?,
                    width: non_negative(width, "width")?,
                },
            ),
        };

        Ok(Self {
            name,
            priority: priority.unwrap_or(0),
            shape,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeConf {
    Circle {
        center: Vec2,
        radius: f32,
    },
    Rect {
        corner_a: Vec2,
        corner_b: Vec2,
    },
    Triangle {
        vertices: [Vec2; 3],
        line_width: f32,
    },
    Line {
        start: Vec2,
        end: Vec2,
        width: f32,
    },
}

impl ShapeConf {
    /// Returns the shape moved by `offset`.
    pub fn translated(&self, offset: Vec2) -> Self {
        match *self {
            Self::Circle { center, radius } => Self::Circle {
                center: center + offset,
                radius,
            },
            Self::Rect { corner_a, corner_b } => Self::Rect {
                corner_a: corner_a + offset,
                corner_b: corner_b + offset,
            },
            Self::Triangle {
                vertices,
                line_width,
            } => Self::Triangle {
                vertices: vertices.map(|vertex| vertex + offset),
                line_width,
            },
            Self::Line { start, end, width } => Self::Line {
                start: start + offset,
                end: end + offset,
                width,
            },
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MoveConf {
    start: Vec2,
    target: Vec2,
}

impl MoveConf {
    pub fn start(&self) -> Vec2 {
        self.start
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }
}

impl TryFrom<persisted::Move> for MoveConf {
    type Error = Error;

    fn try_from(conf: persisted::Move) -> Result<Self> {
        Ok(Self {
            start: finite_point(conf.start, "start")?,
            target: finite_point(conf.target, "target")?,
        })
    }
}

fn finite_point(coords: [f32; 2], name: &str) -> Result<Vec2> {
    let point = Vec2::from(coords);
    ensure!(
        point.is_finite(),
        "`{name}` must be finite, got ({}, {}).",
        point.x,
        point.y
    );
    Ok(point)
}

fn non_negative(value: f32, name: &str) -> Result<f32> {
    ensure!(
        value.is_finite() && value >= 0.,
        "`{name}` must be finite and non-negative, got {value}."
    );
    Ok(value)
}
