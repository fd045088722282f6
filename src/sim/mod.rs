//! Deterministic simulation module
//!
//! All match logic lives here. This module must stay deterministic:
//! - Discrete steps only
//! - Seeded RNG only
//! - Fixed update order (player 1 before player 2)
//! - No rendering or platform dependencies

pub mod angle;
pub mod arena;
pub mod block;
pub mod brain;
pub mod collision;
pub mod missile;
pub mod state;
pub mod tick;
pub mod turtle;

pub use angle::Angle;
pub use arena::{Arena, Layout, SpawnPoint};
pub use block::Block;
pub use brain::{Brain, Pilot, Target};
pub use collision::{PushEdge, PushOut, push_out, resolve_position};
pub use missile::{Missile, MissileEvent, MissilePhase, Trigger};
pub use state::{MatchState, Outcome};
pub use tick::tick;
pub use turtle::{Body, Intents, Side, Snapshot, Turtle, heading_towards, line_of_sight};
