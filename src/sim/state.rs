//! Match state
//!
//! Owns everything for one match: the rules, the arena and both turtles
//! (each carrying its own missiles). Turtles refer to each other only by
//! `Side`, never by reference.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arena::{Arena, Layout, SpawnPoint};
use super::brain::Brain;
use super::missile::Missile;
use super::tick::tick;
use super::turtle::{Body, Side, Turtle};
use crate::Rules;
use crate::error::SimError;

/// How a match ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// One turtle was destroyed, or was ahead on health at the step cutoff
    Winner(Side),
    /// Both turtles were destroyed on the same step
    Tie,
    /// Step cutoff reached with equal health
    Timeout,
}

/// Complete state of one match
#[derive(Debug)]
pub struct MatchState {
    /// Seed the arena was built from
    pub seed: u64,
    pub rules: Rules,
    pub arena: Arena,
    pub turtles: [Turtle; 2],
    /// Global steps taken
    pub steps: u64,
    /// Set once the match is over
    pub outcome: Option<Outcome>,
}

impl MatchState {
    /// Build a match on a named layout with the default spawn poses.
    ///
    /// `seed` drives the randomized layout; fixed layouts ignore it.
    pub fn new(
        rules: Rules,
        layout: Layout,
        seed: u64,
        brain1: Box<dyn Brain>,
        brain2: Box<dyn Brain>,
    ) -> Result<Self, SimError> {
        rules.validate()?;
        let mut rng = Pcg32::seed_from_u64(seed);
        let arena = Arena::build(rules.arena_width, rules.arena_height, layout, &mut rng);
        let spawns = arena.spawn_points();
        let mut state = Self::with_arena(rules, arena, spawns, brain1, brain2)?;
        state.seed = seed;
        Ok(state)
    }

    /// Build a match on an existing arena with explicit spawn poses
    pub fn with_arena(
        rules: Rules,
        arena: Arena,
        spawns: [SpawnPoint; 2],
        brain1: Box<dyn Brain>,
        brain2: Box<dyn Brain>,
    ) -> Result<Self, SimError> {
        rules.validate()?;

        let [spawn1, spawn2] = spawns;
        let turtles = [
            Turtle::new(Side::P1, spawn1, brain1, &rules),
            Turtle::new(Side::P2, spawn2, brain2, &rules),
        ];

        let mut state = Self {
            seed: 0,
            rules,
            arena,
            turtles,
            steps: 0,
            outcome: None,
        };

        state.sync_snapshots();
        let Self {
            rules,
            arena,
            turtles,
            ..
        } = &mut state;
        for turtle in turtles.iter_mut() {
            turtle.setup(arena, rules);
        }

        log::info!(
            "Match start: {} vs {} on {}",
            state.turtles[0].name(),
            state.turtles[1].name(),
            state.arena.layout().map_or("custom arena", |l| l.name())
        );
        Ok(state)
    }

    pub fn turtle(&self, side: Side) -> &Turtle {
        &self.turtles[side.index()]
    }

    pub fn body(&self, side: Side) -> &Body {
        self.turtles[side.index()].body()
    }

    /// All live missiles, player 1's first
    pub fn missiles(&self) -> impl Iterator<Item = &Missile> {
        self.turtles.iter().flat_map(|t| t.body().missiles())
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Copy each turtle's public state into its opponent's cache
    pub(crate) fn sync_snapshots(&mut self) {
        let snaps = [self.turtles[0].body().snapshot(), self.turtles[1].body().snapshot()];
        for side in Side::BOTH {
            self.turtles[side.index()]
                .body_mut()
                .sync_opponent(snaps[side.opponent().index()]);
        }
    }

    /// Decide the outcome after a step, if any
    pub(crate) fn check_outcome(&self) -> Option<Outcome> {
        let hp1 = self.body(Side::P1).health();
        let hp2 = self.body(Side::P2).health();

        if hp1 <= 0 && hp2 <= 0 {
            Some(Outcome::Tie)
        } else if hp1 <= 0 {
            Some(Outcome::Winner(Side::P2))
        } else if hp2 <= 0 {
            Some(Outcome::Winner(Side::P1))
        } else if self.rules.step_cutoff > 0 && self.steps >= self.rules.step_cutoff {
            Some(match hp1.cmp(&hp2) {
                std::cmp::Ordering::Greater => Outcome::Winner(Side::P1),
                std::cmp::Ordering::Less => Outcome::Winner(Side::P2),
                std::cmp::Ordering::Equal => Outcome::Timeout,
            })
        } else {
            None
        }
    }

    /// Step until the match ends or `max_steps` more steps have run
    pub fn run(&mut self, max_steps: u64) -> Option<Outcome> {
        for _ in 0..max_steps {
            if let Some(outcome) = tick(self) {
                return Some(outcome);
            }
        }
        self.outcome
    }
}
