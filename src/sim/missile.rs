//! Missiles
//!
//! A missile flies in a straight line at constant speed until one of its
//! triggers fires, explodes once (damaging every turtle inside the blast
//! radius, its own shooter included), lingers for a few frames and is then
//! dropped by its owner.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::turtle::{Body, Side};
use crate::Rules;
use crate::consts::TRAIL_LENGTH;
use crate::heading_vector;

/// Lifecycle of a missile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissilePhase {
    Flying,
    /// Exploded; `frame` counts steps since detonation, starting at 1
    Exploding { frame: u32 },
    /// Done; the owner drops it
    Removed,
}

/// What made a missile explode, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trigger {
    /// Countdown ran out
    Expired,
    /// Left the arena
    OutOfBounds,
    /// Came within proximity range of its target
    Proximity,
    /// Flew into a block
    Obstacle,
}

/// Something that happened to a missile during one step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MissileEvent {
    Exploded {
        trigger: Trigger,
        position: Vec2,
        shooter_hit: bool,
        target_hit: bool,
    },
    Removed,
}

/// A missile in flight or exploding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Missile {
    shooter: Side,
    target: Side,
    position: Vec2,
    /// Fixed heading in degrees
    heading: f32,
    speed: f32,
    countdown: u32,
    phase: MissilePhase,
    /// Past positions for rendering (oldest first)
    #[serde(skip)]
    trail: Vec<Vec2>,
}

impl Missile {
    /// Fire a missile from `position` along `heading`. The target is always
    /// the shooter's opponent.
    pub fn launch(shooter: Side, position: Vec2, heading: f32, rules: &Rules) -> Self {
        Self {
            shooter,
            target: shooter.opponent(),
            position,
            heading,
            speed: rules.missile_speed,
            countdown: rules.missile_lifespan,
            phase: MissilePhase::Flying,
            trail: vec![position],
        }
    }

    pub fn shooter(&self) -> Side {
        self.shooter
    }

    pub fn target(&self) -> Side {
        self.target
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn heading(&self) -> f32 {
        self.heading
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Steps left before the missile expires on its own
    pub fn countdown(&self) -> u32 {
        self.countdown
    }

    pub fn phase(&self) -> MissilePhase {
        self.phase
    }

    pub fn trail(&self) -> &[Vec2] {
        &self.trail
    }

    pub fn is_flying(&self) -> bool {
        self.phase == MissilePhase::Flying
    }

    pub fn is_removed(&self) -> bool {
        self.phase == MissilePhase::Removed
    }

    /// Advance the missile by one step.
    ///
    /// `shooter` and `target` are the two turtles; explosions read their
    /// current positions and write their health.
    pub fn step(
        &mut self,
        shooter: &mut Body,
        target: &mut Body,
        arena: &Arena,
        rules: &Rules,
    ) -> Option<MissileEvent> {
        let mut event = None;

        match self.phase {
            MissilePhase::Flying => {
                self.position += heading_vector(self.heading) * self.speed;
                self.trail.push(self.position);
                if self.trail.len() > TRAIL_LENGTH {
                    self.trail.remove(0);
                }
                self.countdown = self.countdown.saturating_sub(1);

                if let Some(trigger) = self.check_triggers(target, arena, rules) {
                    let (shooter_hit, target_hit) = self.splash(shooter, target, rules);
                    self.phase = MissilePhase::Exploding { frame: 1 };
                    log::debug!(
                        "{:?} missile exploded at ({:.1}, {:.1}) by {:?}",
                        self.shooter,
                        self.position.x,
                        self.position.y,
                        trigger
                    );
                    event = Some(MissileEvent::Exploded {
                        trigger,
                        position: self.position,
                        shooter_hit,
                        target_hit,
                    });
                }
            }
            MissilePhase::Exploding { frame } => {
                self.phase = MissilePhase::Exploding { frame: frame + 1 };
            }
            MissilePhase::Removed => return None,
        }

        if let MissilePhase::Exploding { frame } = self.phase {
            if frame >= rules.explosion_frames {
                self.phase = MissilePhase::Removed;
                // An explosion event on the same step takes precedence
                if event.is_none() {
                    event = Some(MissileEvent::Removed);
                }
            }
        }

        event
    }

    fn check_triggers(&self, target: &Body, arena: &Arena, rules: &Rules) -> Option<Trigger> {
        if self.countdown == 0 {
            Some(Trigger::Expired)
        } else if !arena.in_bounds(self.position) {
            Some(Trigger::OutOfBounds)
        } else if target.position().distance(self.position) < rules.missile_proximity {
            Some(Trigger::Proximity)
        } else if arena.blocked(self.position) {
            Some(Trigger::Obstacle)
        } else {
            None
        }
    }

    /// Apply blast damage. Returns whether the shooter and the target were hit.
    pub fn splash(&self, shooter: &mut Body, target: &mut Body, rules: &Rules) -> (bool, bool) {
        let mut hits = [false; 2];
        for (i, body) in [shooter, target].into_iter().enumerate() {
            if body.position().distance(self.position) < rules.missile_radius {
                body.damage(rules.missile_damage);
                hits[i] = true;
                log::debug!(
                    "{} took {} damage ({} left)",
                    body.name(),
                    rules.missile_damage,
                    body.health()
                );
            }
        }
        (hits[0], hits[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::arena::SpawnPoint;
    use crate::sim::block::Block;

    fn body(side: Side, x: f32, y: f32, rules: &Rules) -> Body {
        Body::new(
            side,
            "test",
            SpawnPoint {
                position: Vec2::new(x, y),
                heading: 0.0,
            },
            rules,
        )
    }

    fn empty_arena() -> Arena {
        Arena::with_blocks(800.0, 800.0, Vec::new())
    }

    #[test]
    fn test_expires_on_final_countdown_step() {
        let rules = Rules::default();
        let arena = empty_arena();
        let mut shooter = body(Side::P1, 100.0, 100.0, &rules);
        let mut target = body(Side::P2, 100.0, 700.0, &rules);

        // Heading east from x=100: 40 steps of 10 stays inside the arena
        let mut missile = Missile::launch(Side::P1, Vec2::new(100.0, 400.0), 0.0, &rules);
        for step in 1..rules.missile_lifespan {
            assert_eq!(missile.step(&mut shooter, &mut target, &arena, &rules), None, "step {step}");
            assert!(missile.is_flying());
        }

        let event = missile.step(&mut shooter, &mut target, &arena, &rules);
        assert!(matches!(
            event,
            Some(MissileEvent::Exploded { trigger: Trigger::Expired, .. })
        ));
        assert_eq!(missile.phase(), MissilePhase::Exploding { frame: 1 });
        assert!((missile.position().x - 500.0).abs() < 1e-3);
    }

    #[test]
    fn test_trigger_priority() {
        let rules = Rules::default();
        let arena = Arena::with_blocks(800.0, 800.0, vec![Block::new(150.0, 250.0, 350.0, 450.0)]);
        let mut shooter = body(Side::P1, 10.0, 10.0, &rules);
        // Target sits right where the missile lands, inside the block
        let mut target = body(Side::P2, 200.0, 400.0, &rules);

        let mut missile = Missile::launch(Side::P1, Vec2::new(190.0, 400.0), 0.0, &rules);
        let event = missile.step(&mut shooter, &mut target, &arena, &rules);
        assert!(matches!(
            event,
            Some(MissileEvent::Exploded { trigger: Trigger::Proximity, target_hit: true, .. })
        ));
    }

    #[test]
    fn test_out_of_bounds_and_obstacle_triggers() {
        let rules = Rules::default();
        let arena = Arena::with_blocks(800.0, 800.0, vec![Block::new(150.0, 250.0, 350.0, 450.0)]);
        let mut shooter = body(Side::P1, 10.0, 10.0, &rules);
        let mut target = body(Side::P2, 700.0, 700.0, &rules);

        let mut missile = Missile::launch(Side::P1, Vec2::new(795.0, 100.0), 0.0, &rules);
        let event = missile.step(&mut shooter, &mut target, &arena, &rules);
        assert!(matches!(
            event,
            Some(MissileEvent::Exploded { trigger: Trigger::OutOfBounds, .. })
        ));

        let mut missile = Missile::launch(Side::P1, Vec2::new(145.0, 400.0), 0.0, &rules);
        let event = missile.step(&mut shooter, &mut target, &arena, &rules);
        assert!(matches!(
            event,
            Some(MissileEvent::Exploded { trigger: Trigger::Obstacle, .. })
        ));
    }

    #[test]
    fn test_explosion_lingers_then_removed() {
        let rules = Rules {
            missile_lifespan: 1,
            ..Rules::default()
        };
        let arena = empty_arena();
        let mut shooter = body(Side::P1, 10.0, 10.0, &rules);
        let mut target = body(Side::P2, 700.0, 700.0, &rules);

        let mut missile = Missile::launch(Side::P1, Vec2::new(400.0, 400.0), 0.0, &rules);
        assert!(missile.step(&mut shooter, &mut target, &arena, &rules).is_some());
        for frame in 2..rules.explosion_frames {
            assert_eq!(missile.step(&mut shooter, &mut target, &arena, &rules), None);
            assert_eq!(missile.phase(), MissilePhase::Exploding { frame });
        }
        assert_eq!(
            missile.step(&mut shooter, &mut target, &arena, &rules),
            Some(MissileEvent::Removed)
        );
        assert!(missile.is_removed());
        assert_eq!(missile.step(&mut shooter, &mut target, &arena, &rules), None);
    }

    #[test]
    fn test_single_frame_explosion_removed_immediately() {
        let rules = Rules {
            missile_lifespan: 1,
            explosion_frames: 1,
            ..Rules::default()
        };
        let arena = empty_arena();
        let mut shooter = body(Side::P1, 10.0, 10.0, &rules);
        let mut target = body(Side::P2, 700.0, 700.0, &rules);

        let mut missile = Missile::launch(Side::P1, Vec2::new(400.0, 400.0), 0.0, &rules);
        let event = missile.step(&mut shooter, &mut target, &arena, &rules);
        assert!(matches!(event, Some(MissileEvent::Exploded { .. })));
        assert!(missile.is_removed());
    }

    #[test]
    fn test_splash_radius_is_strict_and_hits_shooter() {
        let rules = Rules::default();
        let missile = Missile::launch(Side::P1, Vec2::new(400.0, 400.0), 0.0, &rules);

        // Shooter just inside the radius, target exactly on it
        let mut shooter = body(Side::P1, 400.0 + rules.missile_radius - 1.0, 400.0, &rules);
        let mut target = body(Side::P2, 400.0, 400.0 + rules.missile_radius, &rules);
        let (shooter_hit, target_hit) = missile.splash(&mut shooter, &mut target, &rules);
        assert!(shooter_hit);
        assert!(!target_hit);
        assert_eq!(shooter.health(), rules.starting_health - rules.missile_damage);
        assert_eq!(target.health(), rules.starting_health);
    }

    #[test]
    fn test_trail_records_positions() {
        let rules = Rules::default();
        let arena = empty_arena();
        let mut shooter = body(Side::P1, 10.0, 10.0, &rules);
        let mut target = body(Side::P2, 700.0, 700.0, &rules);

        let mut missile = Missile::launch(Side::P2, Vec2::new(400.0, 400.0), 90.0, &rules);
        assert_eq!(missile.target(), Side::P1);
        missile.step(&mut shooter, &mut target, &arena, &rules);
        missile.step(&mut shooter, &mut target, &arena, &rules);
        assert_eq!(missile.trail().len(), 3);
        // Heading 90° flies toward smaller y
        assert!((missile.position().y - 380.0).abs() < 1e-3);
    }
}
