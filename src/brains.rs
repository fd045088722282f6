//! Built-in brains
//!
//! Simple reference opponents, from a sitting duck to a randomized wanderer.
//! Brains that use randomness own a seeded `Pcg32` so that a match is fully
//! reproducible from its seeds.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::error::SimError;
use crate::sim::{Brain, Pilot, Target};

/// Names accepted by `by_name`
pub const NAMES: [&str; 6] = ["idle", "direct", "turret", "circles", "drunken", "wanderer"];

/// Look up a built-in brain by name (case-insensitive). `seed` feeds the
/// randomized brains.
pub fn by_name(name: &str, seed: u64) -> Result<Box<dyn Brain>, SimError> {
    let brain: Box<dyn Brain> = match name.to_ascii_lowercase().as_str() {
        "idle" => Box::new(Idle),
        "direct" => Box::new(Direct),
        "turret" => Box::new(Turret),
        "circles" => Box::new(Circles::default()),
        "drunken" => Box::new(Drunken::new(seed)),
        "wanderer" => Box::new(Wanderer::new(seed)),
        _ => return Err(SimError::UnknownBrain(name.to_string())),
    };
    Ok(brain)
}

/// Does nothing at all
#[derive(Debug, Clone, Copy, Default)]
pub struct Idle;

impl Brain for Idle {
    fn name(&self) -> &str {
        "IdleTurtle"
    }

    fn decide(&mut self, _pilot: &mut Pilot<'_>) {}
}

/// Charges straight at the opponent, ignoring obstacles
#[derive(Debug, Clone, Copy, Default)]
pub struct Direct;

impl Brain for Direct {
    fn name(&self) -> &str {
        "DirectTurtle"
    }

    fn decide(&mut self, pilot: &mut Pilot<'_>) {
        pilot.turn_towards(Target::Opponent);

        // Hold position just outside blast range
        if pilot.distance() > 4.0 * pilot.missile_radius() {
            pilot.forward(1.0);
        } else {
            pilot.backward(1.0);
        }

        if pilot.can_shoot() && pilot.relative_heading_towards(Target::Opponent).abs() <= 10.0 {
            pilot.shoot();
        }
    }
}

/// Stands still and shoots whenever it has a clear shot in range
#[derive(Debug, Clone, Copy, Default)]
pub struct Turret;

impl Brain for Turret {
    fn name(&self) -> &str {
        "TurretTurtle"
    }

    fn decide(&mut self, pilot: &mut Pilot<'_>) {
        pilot.turn_towards(Target::Opponent);
        if pilot.can_shoot()
            && pilot.relative_heading_towards(Target::Opponent).abs() <= 5.0
            && pilot.line_of_sight(Target::Opponent)
            && pilot.distance() <= pilot.missile_range()
        {
            pilot.shoot();
        }
    }
}

/// Drives in circles and fires whenever it can
#[derive(Debug, Clone, Copy)]
pub struct Circles {
    speed: f32,
    turn_rate: f32,
}

impl Default for Circles {
    fn default() -> Self {
        Self {
            speed: 1.0,
            turn_rate: 0.5,
        }
    }
}

impl Brain for Circles {
    fn name(&self) -> &str {
        "CircleTurtle"
    }

    fn decide(&mut self, pilot: &mut Pilot<'_>) {
        pilot.forward(self.speed);
        pilot.left(self.turn_rate);
        if pilot.can_shoot() {
            pilot.shoot();
        }
    }
}

/// Heads for the opponent like `Direct`, but its aim and preferred distance
/// sway sinusoidally and it only sometimes takes a shot
#[derive(Debug, Clone)]
pub struct Drunken {
    rng: Pcg32,
    /// Heading sway amplitude (degrees)
    wander_amp: f32,
    /// Heading sway period (steps)
    wander_period: f32,
    /// Approach distance sway amplitude, set from the rules in `setup`
    approach_amp: f32,
    approach_period: f32,
    shoot_chance: f64,
}

impl Drunken {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            wander_amp: 15.0,
            wander_period: 43.0,
            approach_amp: 0.0,
            approach_period: 81.0,
            shoot_chance: 0.1,
        }
    }
}

impl Brain for Drunken {
    fn name(&self) -> &str {
        "DrunkenTurtle"
    }

    fn setup(&mut self, pilot: &mut Pilot<'_>) {
        self.approach_amp = 1.5 * pilot.missile_radius();
    }

    fn decide(&mut self, pilot: &mut Pilot<'_>) {
        let t = pilot.time() as f32;
        let phase = |period: f32| (std::f32::consts::TAU * t / period).sin();

        let heading = pilot.heading_towards(Target::Opponent) + self.wander_amp * phase(self.wander_period);
        pilot.turn_towards(Target::Heading(heading));

        let hold = 4.0 * pilot.missile_radius() + self.approach_amp * phase(self.approach_period);
        if pilot.distance() > hold {
            pilot.forward(1.0);
        } else {
            pilot.backward(1.0);
        }

        if pilot.can_shoot()
            && pilot.relative_heading_towards(Target::Opponent).abs() <= 10.0
            && pilot.line_of_sight(Target::Opponent)
            && self.rng.random_bool(self.shoot_chance)
        {
            pilot.shoot();
        }
    }
}

/// Roams on random headings until the opponent is close and visible, then
/// closes in like `Direct`
#[derive(Debug, Clone)]
pub struct Wanderer {
    rng: Pcg32,
    heading: f32,
    /// Steps until a new random heading is drawn
    wait: i32,
    pursuit_range: f32,
}

impl Wanderer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            heading: 0.0,
            wait: 0,
            pursuit_range: 0.0,
        }
    }

    fn rerandomize(&mut self) {
        self.heading = self.rng.random_range(-179..=180) as f32;
        self.wait = self.rng.random_range(5..30);
    }
}

impl Brain for Wanderer {
    fn name(&self) -> &str {
        "WandererTurtle"
    }

    fn setup(&mut self, pilot: &mut Pilot<'_>) {
        self.rerandomize();
        self.pursuit_range = 0.75 * pilot.missile_range();
    }

    fn decide(&mut self, pilot: &mut Pilot<'_>) {
        self.wait -= 1;
        if self.wait <= 0 {
            self.rerandomize();
        }

        if pilot.distance() <= self.pursuit_range && pilot.line_of_sight(Target::Opponent) {
            pilot.turn_towards(Target::Opponent);
            if pilot.distance() > 4.0 * pilot.missile_radius() {
                pilot.forward(1.0);
            } else {
                pilot.backward(1.0);
            }
            if pilot.can_shoot() && pilot.relative_heading_towards(Target::Opponent).abs() <= 10.0 {
                pilot.shoot();
            }
        } else {
            pilot.turn_towards(Target::Heading(self.heading));
            pilot.forward(1.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rules;
    use crate::sim::{Layout, MatchState, Side};

    #[test]
    fn test_by_name() {
        for name in NAMES {
            assert!(by_name(name, 0).is_ok(), "{name}");
        }
        assert_eq!(by_name("Direct", 0).unwrap().name(), "DirectTurtle");
        assert!(matches!(by_name("keyboard", 0), Err(SimError::UnknownBrain(_))));
    }

    #[test]
    fn test_idle_never_moves() {
        let mut state =
            MatchState::new(Rules::default(), Layout::Empty, 0, Box::new(Idle), Box::new(Idle)).unwrap();
        state.run(50);
        assert_eq!(state.body(Side::P1).position(), glam::Vec2::new(200.0, 400.0));
        assert_eq!(state.body(Side::P2).heading(), 90.0);
    }

    #[test]
    fn test_turret_stays_put_and_fires() {
        let mut state = MatchState::new(
            Rules::default(),
            Layout::Empty,
            0,
            Box::new(Turret),
            Box::new(Idle),
        )
        .unwrap();
        // 90° to turn at 15°/step, then a clear shot at 400 units
        state.run(8);
        let p1 = state.body(Side::P1);
        assert_eq!(p1.position(), glam::Vec2::new(200.0, 400.0));
        assert_eq!(p1.heading(), 0.0);
        assert_eq!(p1.missiles().len(), 1);
    }

    #[test]
    fn test_circles_keeps_turning() {
        let mut state = MatchState::new(
            Rules::default(),
            Layout::Empty,
            0,
            Box::new(Circles::default()),
            Box::new(Idle),
        )
        .unwrap();
        state.run(4);
        // 7°/step counterclockwise from -90°
        assert_eq!(state.body(Side::P1).heading(), -62.0);
        assert_eq!(state.body(Side::P1).missiles().len(), 1);
    }

    #[test]
    fn test_randomized_brains_are_reproducible() {
        let play = |seed: u64| {
            let mut state = MatchState::new(
                Rules::default(),
                Layout::CornerColumns,
                seed,
                Box::new(Drunken::new(seed)),
                Box::new(Wanderer::new(seed + 1)),
            )
            .unwrap();
            state.run(300);
            (
                state.body(Side::P1).position(),
                state.body(Side::P2).position(),
                state.body(Side::P1).health(),
                state.body(Side::P2).health(),
            )
        };
        assert_eq!(play(42), play(42));
    }
}
