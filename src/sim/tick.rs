//! Global simulation step
//!
//! One call to `tick` advances the whole match by one step, in a fixed
//! order: player 1's missiles, player 2's missiles, player 1's turtle,
//! player 2's turtle, then both opponent snapshots are refreshed and the
//! match is checked for an outcome. Both turtles finish stepping before
//! either snapshot changes, so neither sees the other's state from the
//! current step.

use super::arena::Arena;
use super::missile::MissileEvent;
use super::state::{MatchState, Outcome};
use super::turtle::{Side, Turtle};
use crate::Rules;

/// Advance the match by one step. Returns the outcome once the match is over;
/// further calls do nothing and keep returning it.
pub fn tick(state: &mut MatchState) -> Option<Outcome> {
    if let Some(outcome) = state.outcome {
        return Some(outcome);
    }

    state.steps += 1;

    {
        let MatchState {
            rules,
            arena,
            turtles,
            ..
        } = &mut *state;

        for side in Side::BOTH {
            step_missiles(turtles, side, arena, rules);
        }
        for turtle in turtles.iter_mut() {
            turtle.step(arena, rules);
        }
    }

    state.sync_snapshots();

    let p1 = state.body(Side::P1);
    let p2 = state.body(Side::P2);
    log::trace!(
        "Step {}: P1 ({:.0}, {:.0}) {} hp, P2 ({:.0}, {:.0}) {} hp, {} missiles",
        state.steps,
        p1.position().x,
        p1.position().y,
        p1.health(),
        p2.position().x,
        p2.position().y,
        p2.health(),
        p1.missiles().len() + p2.missiles().len()
    );

    let outcome = state.check_outcome();
    if let Some(outcome) = outcome {
        match outcome {
            Outcome::Winner(side) => log::info!(
                "{} ({}) wins after {} steps",
                state.turtle(side).name(),
                side,
                state.steps
            ),
            Outcome::Tie => log::info!("Tie after {} steps", state.steps),
            Outcome::Timeout => log::info!("Out of time after {} steps, even health", state.steps),
        }
        state.outcome = Some(outcome);
    }
    outcome
}

/// Update every missile fired by `side`, dropping those that are done
fn step_missiles(turtles: &mut [Turtle; 2], side: Side, arena: &Arena, rules: &Rules) {
    let (first, second) = turtles.split_at_mut(1);
    let (shooter, target) = match side {
        Side::P1 => (&mut first[0], &mut second[0]),
        Side::P2 => (&mut second[0], &mut first[0]),
    };

    // Turtles cannot fire while missiles update, so the list can be taken out
    let mut missiles = std::mem::take(shooter.body_mut().missiles_mut());
    for missile in &mut missiles {
        if let Some(MissileEvent::Removed) =
            missile.step(shooter.body_mut(), target.body_mut(), arena, rules)
        {
            log::trace!("{} missile removed", side);
        }
    }
    missiles.retain(|m| !m.is_removed());
    *shooter.body_mut().missiles_mut() = missiles;
}
