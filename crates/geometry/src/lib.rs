//! This crate implements the low level 2D geometry used by obstacle distance
//! queries: line segments, axis aligned rectangles and convex outlines.
//!
//! Points and directions are represented with [`glam::Vec2`]. All
//! coordinates are in millimeters.

mod convex;
mod rect;
mod segment;

pub use convex::{ConvexOutline, HalfPlane};
pub use glam::Vec2;
pub use rect::{Rect, RectValidationError};
pub use segment::LineSegment;
