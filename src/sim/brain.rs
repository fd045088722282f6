//! Decision routines and the handle they drive a turtle through
//!
//! A brain is called once per step with a `Pilot`. Everything it may read
//! (its own state, the cached opponent state, the rules and the arena) and
//! everything it may request (movement, turning, shooting) goes through the
//! pilot. Intents are overwritten by later calls, so only the last request
//! of each kind within a step counts.

use glam::Vec2;

use super::angle::Angle;
use super::arena::Arena;
use super::turtle::{self, Body, Intents};
use crate::Rules;
use crate::consts::FAR_POINT_DISTANCE;
use crate::heading_vector;

/// A decision routine driving one turtle
pub trait Brain {
    /// Display name, also used as the turtle's name
    fn name(&self) -> &str;

    /// Called once before the first step
    fn setup(&mut self, _pilot: &mut Pilot<'_>) {}

    /// Called once per step to set this step's intents
    fn decide(&mut self, pilot: &mut Pilot<'_>);
}

/// Something to aim at
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Target {
    /// The opponent's last synced position
    Opponent,
    /// An absolute heading in degrees
    Heading(f32),
    /// A point in the arena
    Point(Vec2),
}

impl From<Vec2> for Target {
    fn from(point: Vec2) -> Self {
        Target::Point(point)
    }
}

/// A brain's view of its turtle for one call
pub struct Pilot<'a> {
    body: &'a mut Body,
    arena: &'a Arena,
    rules: &'a Rules,
}

impl<'a> Pilot<'a> {
    pub(crate) fn new(body: &'a mut Body, arena: &'a Arena, rules: &'a Rules) -> Self {
        Self { body, arena, rules }
    }

    // === Intents ===

    /// Move forward at a fraction of max speed. Negative rates move backward.
    pub fn forward(&mut self, rate: f32) {
        let rate = rate.clamp(-1.0, 1.0);
        self.body.intents_mut().speed = (rate * self.rules.max_speed).trunc();
    }

    pub fn backward(&mut self, rate: f32) {
        self.forward(-rate);
    }

    /// Turn counterclockwise at a fraction of max turn speed
    pub fn left(&mut self, rate: f32) {
        let rate = rate.clamp(-1.0, 1.0);
        self.body.intents_mut().turn_speed = (rate * self.rules.max_turn_speed).trunc();
    }

    pub fn right(&mut self, rate: f32) {
        self.left(-rate);
    }

    /// Request a shot. Ignored while the cooldown is running.
    pub fn shoot(&mut self) {
        self.body.intents_mut().shoot = true;
    }

    /// Turn as far as allowed this step toward a target. Within one step of
    /// facing it, turns exactly onto it.
    pub fn turn_towards(&mut self, target: impl Into<Target>) {
        let max = self.rules.max_turn_speed;
        let turn = self.relative_heading_towards(target).clamp(-max, max);
        self.body.intents_mut().turn_speed = turn.trunc();
    }

    /// Intents set so far this step
    pub fn intents(&self) -> Intents {
        self.body.intents()
    }

    // === Geometry queries ===

    fn resolve(&self, target: Target) -> Vec2 {
        match target {
            Target::Opponent => self.body.other().position,
            Target::Heading(h) => self.body.position() + heading_vector(h) * FAR_POINT_DISTANCE,
            Target::Point(p) => p,
        }
    }

    /// Distance to the opponent
    pub fn distance(&self) -> f32 {
        self.distance_to(self.body.other().position)
    }

    pub fn distance_to(&self, point: Vec2) -> f32 {
        self.body.position().distance(point)
    }

    pub fn distance_between(&self, a: Vec2, b: Vec2) -> f32 {
        a.distance(b)
    }

    /// Offset from this turtle to a target
    pub fn relative_position(&self, target: impl Into<Target>) -> Vec2 {
        self.resolve(target.into()) - self.body.position()
    }

    /// Absolute heading toward a target in whole degrees, `(-180, 180]`
    pub fn heading_towards(&self, target: impl Into<Target>) -> f32 {
        turtle::heading_towards(self.body.position(), self.resolve(target.into()))
    }

    /// Smallest signed turn (degrees, positive = counterclockwise) that would
    /// face the target
    pub fn relative_heading_towards(&self, target: impl Into<Target>) -> f32 {
        (Angle::degrees(self.heading_towards(target)) - self.body.heading_angle()).measure()
    }

    /// Whether a point is inside the arena and not in a block
    pub fn free_space(&self, point: Vec2) -> bool {
        self.arena.in_bounds(point) && !self.arena.blocked(point)
    }

    /// Whether a missile fired now toward the target would reach it
    pub fn line_of_sight(&self, target: impl Into<Target>) -> bool {
        let point = self.resolve(target.into());
        turtle::line_of_sight(self.body.position(), point, self.arena, self.rules)
    }

    // === Own state ===

    pub fn position(&self) -> Vec2 {
        self.body.position()
    }

    pub fn heading(&self) -> f32 {
        self.body.heading()
    }

    pub fn speed(&self) -> f32 {
        self.body.intents().speed
    }

    pub fn turn_speed(&self) -> f32 {
        self.body.intents().turn_speed
    }

    pub fn health(&self) -> i32 {
        self.body.health()
    }

    pub fn cooldown(&self) -> u32 {
        self.body.cooldown()
    }

    pub fn can_shoot(&self) -> bool {
        self.body.can_shoot()
    }

    /// Steps this turtle has completed
    pub fn time(&self) -> u64 {
        self.body.time()
    }

    // === Opponent snapshot ===

    pub fn other_position(&self) -> Vec2 {
        self.body.other().position
    }

    pub fn other_heading(&self) -> f32 {
        self.body.other().heading
    }

    pub fn other_speed(&self) -> f32 {
        self.body.other().speed
    }

    pub fn other_turn_speed(&self) -> f32 {
        self.body.other().turn_speed
    }

    pub fn other_health(&self) -> i32 {
        self.body.other().health
    }

    /// Estimated opponent cooldown, decayed locally every step
    pub fn other_cooldown(&self) -> u32 {
        self.body.other().cooldown
    }

    pub fn other_can_shoot(&self) -> bool {
        self.body.other().cooldown == 0
    }

    // === Rules ===

    pub fn max_speed(&self) -> f32 {
        self.rules.max_speed
    }

    pub fn max_turn_speed(&self) -> f32 {
        self.rules.max_turn_speed
    }

    pub fn shoot_delay(&self) -> u32 {
        self.rules.shoot_delay
    }

    pub fn missile_speed(&self) -> f32 {
        self.rules.missile_speed
    }

    pub fn missile_range(&self) -> f32 {
        self.rules.missile_range()
    }

    pub fn missile_proximity(&self) -> f32 {
        self.rules.missile_proximity
    }

    pub fn missile_radius(&self) -> f32 {
        self.rules.missile_radius
    }

    pub fn missile_damage(&self) -> i32 {
        self.rules.missile_damage
    }

    pub fn arena_left(&self) -> f32 {
        self.arena.left()
    }

    pub fn arena_right(&self) -> f32 {
        self.arena.right()
    }

    pub fn arena_bottom(&self) -> f32 {
        self.arena.bottom()
    }

    pub fn arena_top(&self) -> f32 {
        self.arena.top()
    }
}
