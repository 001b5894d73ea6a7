//! This module contains configuration objects which can be deserialized from
//! a configuration file. It does not contain final configuration objects
//! which must be built and validated from the objects here.

use serde::Deserialize;

#[derive(Deserialize, Default)]
pub(super) struct Configuration {
    pub(super) planner: Option<Planner>,
    pub(super) field: Option<Field>,
    pub(super) scenario: Option<Scenario>,
}

#[derive(Deserialize, Default)]
pub(super) struct Planner {
    pub(super) seed: Option<u32>,
    pub(super) radius: Option<f32>,
}

#[derive(Deserialize)]
pub(super) struct Field {
    pub(super) corner_a: [f32; 2],
    pub(super) corner_b: [f32; 2],
}

#[derive(Deserialize, Default)]
pub(super) struct Scenario {
    pub(super) ticks: Option<u32>,
    pub(super) jitter: Option<f32>,
    pub(super) free_points: Option<u32>,
    pub(super) obstacles: Option<Vec<Obstacle>>,
    pub(super) moves: Option<Vec<Move>>,
}

#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub(super) enum Obstacle {
    Circle {
        name: String,
        priority: Option<i32>,
        center: [f32; 2],
        radius: f32,
    },
    Rect {
        name: String,
        priority: Option<i32>,
        corner_a: [f32; 2],
        corner_b: [f32; 2],
    },
    Triangle {
        name: String,
        priority: Option<i32>,
        vertices: [[f32; 2]; 3],
        line_width: Option<f32>,
    },
    Line {
        name: String,
        priority: Option<i32>,
        start: [f32; 2],
        end: [f32; 2],
        width: f32,
    },
}

#[derive(Deserialize)]
pub(super) struct Move {
    pub(super) start: [f32; 2],
    pub(super) target: [f32; 2],
}
