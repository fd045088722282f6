//! Game rules
//!
//! Every tunable constant lives here. A `Rules` value is built once, validated,
//! and then shared by reference with the arena, turtles and missiles for the
//! whole match.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{RulesError, SimError};

/// Immutable match configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    // === Arena ===
    /// Arena width (length units)
    pub arena_width: f32,
    /// Arena height (length units)
    pub arena_height: f32,

    // === Turtles ===
    /// Maximum linear speed (units/step)
    pub max_speed: f32,
    /// Maximum turning speed (degrees/step)
    pub max_turn_speed: f32,
    /// Cooldown between shots (steps)
    pub shoot_delay: u32,
    /// Health every turtle starts with
    pub starting_health: i32,

    // === Missiles ===
    /// Constant missile speed (units/step)
    pub missile_speed: f32,
    /// Steps before an untouched missile explodes on its own
    pub missile_lifespan: u32,
    /// A missile explodes once it is closer than this to its target
    pub missile_proximity: f32,
    /// Turtles closer than this to an explosion take damage
    pub missile_radius: f32,
    /// Damage dealt by one explosion
    pub missile_damage: i32,
    /// Steps an explosion lingers before the missile is removed
    pub explosion_frames: u32,

    // === Match ===
    /// Step limit for a match (0 = unlimited)
    pub step_cutoff: u64,
    /// Wall-clock cadence hint for real-time drivers (ms per step)
    pub step_millis: u64,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            arena_width: 800.0,
            arena_height: 800.0,

            max_speed: 4.0,
            max_turn_speed: 15.0,
            shoot_delay: 60,
            starting_health: 100,

            missile_speed: 10.0,
            missile_lifespan: 40,
            missile_proximity: 20.0,
            missile_radius: 20.0,
            missile_damage: 20,
            explosion_frames: 4,

            step_cutoff: 0,
            step_millis: 33,
        }
    }
}

impl Rules {
    /// Maximum distance a missile can travel before expiring
    pub fn missile_range(&self) -> f32 {
        self.missile_speed * self.missile_lifespan as f32
    }

    /// Check that the rules describe a playable match
    pub fn validate(&self) -> Result<(), SimError> {
        let positive = [
            ("arena_width", self.arena_width),
            ("arena_height", self.arena_height),
            ("missile_speed", self.missile_speed),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SimError::InvalidRules(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        let non_negative = [
            ("max_speed", self.max_speed),
            ("max_turn_speed", self.max_turn_speed),
            ("missile_proximity", self.missile_proximity),
            ("missile_radius", self.missile_radius),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SimError::InvalidRules(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }

        if self.missile_lifespan == 0 {
            return Err(SimError::InvalidRules(
                "missile_lifespan must be at least one step".into(),
            ));
        }
        if self.explosion_frames == 0 {
            return Err(SimError::InvalidRules(
                "explosion_frames must be at least one step".into(),
            ));
        }

        Ok(())
    }

    /// Parse and validate rules from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, RulesError> {
        let rules: Rules = serde_json::from_str(json)?;
        rules.validate()?;
        Ok(rules)
    }

    /// Load rules from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RulesError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let rules = Self::from_json(&json)?;
        log::info!("Loaded rules from {}", path.display());
        Ok(rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let rules = Rules::default();
        assert!(rules.validate().is_ok());
        assert_eq!(rules.missile_range(), 400.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let rules = Rules::from_json(r#"{ "max_speed": 6.0, "step_cutoff": 900 }"#).unwrap();
        assert_eq!(rules.max_speed, 6.0);
        assert_eq!(rules.step_cutoff, 900);
        assert_eq!(rules.shoot_delay, 60);
        assert_eq!(rules.starting_health, 100);
    }

    #[test]
    fn test_invalid_rules_rejected() {
        let err = Rules::from_json(r#"{ "missile_lifespan": 0 }"#).unwrap_err();
        assert!(matches!(err, RulesError::Invalid(SimError::InvalidRules(_))));

        let err = Rules::from_json(r#"{ "arena_width": -10.0 }"#).unwrap_err();
        assert!(matches!(err, RulesError::Invalid(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = Rules::from_json("{ not json").unwrap_err();
        assert!(matches!(err, RulesError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = Rules::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, RulesError::Io(_)));
    }
}
