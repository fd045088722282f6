//! Combat turtles
//!
//! A turtle is split in two: the `Body` holds everything the simulation owns
//! (pose, health, cooldown, opponent snapshot, fired missiles) and the brain
//! decides what the body should do each step. Brains never see the body
//! directly, only through a `Pilot`.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::angle::Angle;
use super::arena::{Arena, SpawnPoint};
use super::brain::{Brain, Pilot};
use super::collision::resolve_position;
use super::missile::Missile;
use crate::Rules;
use crate::consts::{LOS_MAX_SAMPLES, P1_COLOR, P2_COLOR};
use crate::{heading_vector, sign, vector_heading};

/// Which player a turtle (or missile) belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    P1,
    P2,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::P1, Side::P2];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Side::P1 => 0,
            Side::P2 => 1,
        }
    }

    #[inline]
    pub fn opponent(self) -> Side {
        match self {
            Side::P1 => Side::P2,
            Side::P2 => Side::P1,
        }
    }

    /// Display color (RGB)
    pub fn color(self) -> [u8; 3] {
        match self {
            Side::P1 => P1_COLOR,
            Side::P2 => P2_COLOR,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::P1 => write!(f, "Player 1"),
            Side::P2 => write!(f, "Player 2"),
        }
    }
}

/// What a brain asked for during the current step.
///
/// Speeds are already scaled by the rule maxima and truncated toward zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Intents {
    /// Linear speed (units/step, negative = backward)
    pub speed: f32,
    /// Turning speed (degrees/step, positive = counterclockwise)
    pub turn_speed: f32,
    pub shoot: bool,
}

/// Public state of a turtle as seen by its opponent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub position: Vec2,
    /// Heading in degrees
    pub heading: f32,
    pub speed: f32,
    pub turn_speed: f32,
    pub health: i32,
    pub cooldown: u32,
}

/// Simulation-owned turtle state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    side: Side,
    name: String,
    position: Vec2,
    heading: Angle,
    #[serde(skip)]
    intents: Intents,
    health: i32,
    cooldown: u32,
    /// Steps taken so far
    time: u64,
    /// Opponent state as of the end of its previous step
    other: Snapshot,
    missiles: Vec<Missile>,
}

impl Body {
    pub fn new(side: Side, name: impl Into<String>, spawn: SpawnPoint, rules: &Rules) -> Self {
        let mut body = Self {
            side,
            name: name.into(),
            position: spawn.position,
            heading: Angle::degrees(spawn.heading),
            intents: Intents::default(),
            health: rules.starting_health,
            cooldown: 0,
            time: 0,
            other: Snapshot {
                position: spawn.position,
                heading: 0.0,
                speed: 0.0,
                turn_speed: 0.0,
                health: rules.starting_health,
                cooldown: 0,
            },
            missiles: Vec::new(),
        };
        // Until the match syncs the opponent, the snapshot mirrors ourselves
        body.other = body.snapshot();
        body
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> [u8; 3] {
        self.side.color()
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Heading in degrees, in `(-180, 180]`
    #[inline]
    pub fn heading(&self) -> f32 {
        self.heading.measure()
    }

    pub fn heading_angle(&self) -> Angle {
        self.heading
    }

    pub fn intents(&self) -> Intents {
        self.intents
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn cooldown(&self) -> u32 {
        self.cooldown
    }

    pub fn can_shoot(&self) -> bool {
        self.cooldown == 0
    }

    pub fn time(&self) -> u64 {
        self.time
    }

    /// Cached opponent state
    pub fn other(&self) -> &Snapshot {
        &self.other
    }

    /// Live missiles fired by this turtle
    pub fn missiles(&self) -> &[Missile] {
        &self.missiles
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Public state for the opponent's cache
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            position: self.position,
            heading: self.heading.measure(),
            speed: self.intents.speed,
            turn_speed: self.intents.turn_speed,
            health: self.health,
            cooldown: self.cooldown,
        }
    }

    /// Refresh the opponent cache. Only the match calls this, after both
    /// turtles have finished their step.
    pub(crate) fn sync_opponent(&mut self, other: Snapshot) {
        self.other = other;
    }

    pub(crate) fn intents_mut(&mut self) -> &mut Intents {
        &mut self.intents
    }

    pub(crate) fn missiles_mut(&mut self) -> &mut Vec<Missile> {
        &mut self.missiles
    }

    /// Health may go negative
    pub(crate) fn damage(&mut self, hp: i32) {
        self.health -= hp;
    }

    /// Clear intents and decay both the own and the cached opponent cooldown
    pub(crate) fn begin_step(&mut self) {
        self.intents = Intents::default();
        self.cooldown = self.cooldown.saturating_sub(1);
        self.other.cooldown = self.other.cooldown.saturating_sub(1);
    }

    pub(crate) fn turn(&mut self) {
        self.heading = self.heading + self.intents.turn_speed.trunc();
    }

    /// Move along the current heading, then clamp and push out of blocks
    pub(crate) fn advance(&mut self, arena: &Arena) {
        let dir = heading_vector(self.heading.measure());
        let speed = self.intents.speed;
        let delta = Vec2::new((speed * dir.x).trunc(), (speed * dir.y).trunc());
        self.position = resolve_position(self.position + delta, arena);
    }

    /// Launch a missile if one was requested and the cooldown allows it
    pub(crate) fn fire(&mut self, rules: &Rules) -> bool {
        if !self.intents.shoot || self.cooldown > 0 {
            return false;
        }

        self.cooldown = rules.shoot_delay;
        self.missiles.push(Missile::launch(
            self.side,
            self.position,
            self.heading.measure(),
            rules,
        ));
        log::debug!(
            "{} fired from ({}, {}) heading {}",
            self.name,
            self.position.x,
            self.position.y,
            self.heading
        );
        true
    }

    pub(crate) fn finish_step(&mut self) {
        self.time += 1;
    }
}

/// A body paired with the brain that drives it
pub struct Turtle {
    body: Body,
    brain: Box<dyn Brain>,
}

impl Turtle {
    /// Create a turtle at a spawn pose. It takes the brain's name.
    pub fn new(side: Side, spawn: SpawnPoint, brain: Box<dyn Brain>, rules: &Rules) -> Self {
        let body = Body::new(side, brain.name(), spawn, rules);
        Self { body, brain }
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub(crate) fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    pub fn name(&self) -> &str {
        self.body.name()
    }

    /// One-time brain initialization before the first step
    pub(crate) fn setup(&mut self, arena: &Arena, rules: &Rules) {
        let mut pilot = Pilot::new(&mut self.body, arena, rules);
        self.brain.setup(&mut pilot);
    }

    /// Run the per-step resolution pipeline: reset, decide, turn, move, shoot
    pub fn step(&mut self, arena: &Arena, rules: &Rules) {
        self.body.begin_step();

        let mut pilot = Pilot::new(&mut self.body, arena, rules);
        self.brain.decide(&mut pilot);

        self.body.turn();
        self.body.advance(arena);
        self.body.fire(rules);
        self.body.finish_step();
    }
}

impl fmt::Debug for Turtle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Turtle")
            .field("body", &self.body)
            .field("brain", &self.brain.name())
            .finish()
    }
}

/// Heading in whole degrees from one point toward another
pub fn heading_towards(from: Vec2, to: Vec2) -> f32 {
    Angle::degrees(vector_heading(to - from).round()).measure()
}

/// Whether a missile fired from `from` straight at `target` would get there
/// before leaving the arena or hitting a block.
///
/// Samples are taken at missile speed along the heading toward the target.
/// Passing the target on either axis counts as arriving. Running out of
/// samples counts as blocked.
pub fn line_of_sight(from: Vec2, target: Vec2, arena: &Arena, rules: &Rules) -> bool {
    let sx = sign(target.x - from.x);
    let sy = sign(target.y - from.y);
    if sx == 0 && sy == 0 {
        return true;
    }

    let step = heading_vector(heading_towards(from, target)) * rules.missile_speed;
    let mut sample = from;
    for _ in 0..LOS_MAX_SAMPLES {
        sample += step;
        if !arena.in_bounds(sample) || arena.blocked(sample) {
            return false;
        }
        let passed_x = sx != 0 && sign(target.x - sample.x) != sx;
        let passed_y = sy != 0 && sign(target.y - sample.y) != sy;
        if passed_x || passed_y {
            return true;
        }
    }
    false
}
