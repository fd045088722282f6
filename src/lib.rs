//! Turtle Combat - a two-player arena combat simulation
//!
//! Core modules:
//! - `sim`: Deterministic step simulation (turtles, missiles, arena, collisions)
//! - `brains`: Built-in decision routines that drive turtles
//! - `config`: Data-driven game rules
//! - `error`: Construction-time error types

pub mod brains;
pub mod config;
pub mod error;
pub mod sim;

pub use config::Rules;
pub use error::{RulesError, SimError};

use glam::Vec2;

/// Fixed simulation constants that are not part of the tunable rules
pub mod consts {
    /// Maximum line-of-sight samples before giving up and reporting blocked
    pub const LOS_MAX_SAMPLES: u32 = 100;
    /// Distance of the synthetic point used when turning towards a bare heading
    pub const FAR_POINT_DISTANCE: f32 = 10_000.0;
    /// Overlap reported for an edge the turtle has not crossed
    pub const NO_PENETRATION: f32 = 1_000_000.0;
    /// Gap left between a pushed-out turtle and the block edge
    pub const PUSH_CLEARANCE: f32 = 1.0;
    /// Maximum number of trail points kept per missile
    pub const TRAIL_LENGTH: usize = 64;

    /// Player colors (RGB)
    pub const P1_COLOR: [u8; 3] = [220, 40, 40];
    pub const P2_COLOR: [u8; 3] = [40, 80, 220];
}

/// Unit vector for a heading in degrees, in arena coordinates.
///
/// The arena's y axis grows downward, so a heading of 90° points toward
/// smaller y values.
#[inline]
pub fn heading_vector(degrees: f32) -> Vec2 {
    let rad = degrees.to_radians();
    Vec2::new(rad.cos(), -rad.sin())
}

/// Heading in degrees from the origin toward `delta`, in arena coordinates
#[inline]
pub fn vector_heading(delta: Vec2) -> f32 {
    (-delta.y).atan2(delta.x).to_degrees()
}

/// Sign of a number as -1, 0 or 1
#[inline]
pub fn sign(value: f32) -> i8 {
    if value > 0.0 {
        1
    } else if value < 0.0 {
        -1
    } else {
        0
    }
}
