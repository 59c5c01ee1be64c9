//! Vertical motion state machine: ground contact, falling, and the jump curve
//!
//! A jump does not use plain gravity. It seeds an override accumulator with
//! the negated jump velocity; while airborne the accumulator gains
//! `gravity * dt` per tick and vertical velocity is its negation. The
//! character rises while the accumulator is negative and falls once it turns
//! positive. Landing is only accepted after that point.

use serde::{Deserialize, Serialize};

/// Jump and gravity configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JumpConfig {
    /// Upward velocity at the start of a jump
    pub jump_velocity: f32,
    /// Downward acceleration in m/s²
    pub gravity: f32,
    /// Vertical velocity held while standing, slightly negative to keep ground contact
    pub ground_stick_velocity: f32,
}

impl Default for JumpConfig {
    fn default() -> Self {
        Self {
            jump_velocity: 5.0,
            gravity: 9.8,
            ground_stick_velocity: -0.1,
        }
    }
}

/// Where the character is in its vertical motion
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum VerticalMotionState {
    /// Standing on ground
    #[default]
    Grounded,
    /// Airborne without having jumped (walked off a ledge)
    Falling,
    /// Airborne on the jump curve
    JumpOverride { override_value: f32 },
}

/// Per-tick inputs to the vertical state machine
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VerticalInput {
    /// Jump was pressed this tick
    pub jump_pressed: bool,
    /// Ground contact reported by the collision resolver
    pub grounded: bool,
}

/// Result of advancing one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalStep {
    pub state: VerticalMotionState,
    pub vertical_velocity: f32,
}

impl VerticalMotionState {
    /// Accumulator value, 0 outside of a jump
    pub fn override_value(&self) -> f32 {
        match self {
            VerticalMotionState::JumpOverride { override_value } => *override_value,
            _ => 0.0,
        }
    }

    /// Whether the jump curve is active
    pub fn is_jumping(&self) -> bool {
        matches!(self, VerticalMotionState::JumpOverride { .. })
    }

    /// Advance one tick.
    ///
    /// Rules run in a fixed order: jump start, jump curve / landing, then
    /// plain gravity and ground stick for the non-jump states.
    pub fn advance(
        self,
        vertical_velocity: f32,
        input: VerticalInput,
        config: &JumpConfig,
        dt: f32,
    ) -> VerticalStep {
        debug_assert!(dt.is_finite() && dt >= 0.0, "invalid dt: {dt}");

        let mut state = self;
        let mut velocity = vertical_velocity;

        // Airborne presses are ignored
        if input.jump_pressed && input.grounded && !state.is_jumping() {
            state = VerticalMotionState::JumpOverride {
                override_value: -config.jump_velocity,
            };
            velocity = config.jump_velocity;
        }

        if let VerticalMotionState::JumpOverride { override_value } = state {
            if !input.grounded {
                let override_value = override_value + config.gravity * dt;
                state = VerticalMotionState::JumpOverride { override_value };
                velocity = -override_value;
            } else if override_value > 0.0 {
                state = VerticalMotionState::Grounded;
            }
        }

        if !state.is_jumping() {
            if input.grounded {
                state = VerticalMotionState::Grounded;
                if velocity < 0.0 {
                    velocity = config.ground_stick_velocity;
                }
            } else {
                state = VerticalMotionState::Falling;
                velocity -= config.gravity * dt;
            }
        }

        VerticalStep {
            state,
            vertical_velocity: velocity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn airborne() -> VerticalInput {
        VerticalInput {
            jump_pressed: false,
            grounded: false,
        }
    }

    fn landed() -> VerticalInput {
        VerticalInput {
            jump_pressed: false,
            grounded: true,
        }
    }

    #[test]
    fn test_jump_from_ground() {
        let config = JumpConfig::default();
        let step = VerticalMotionState::Grounded.advance(
            0.0,
            VerticalInput {
                jump_pressed: true,
                grounded: true,
            },
            &config,
            0.1,
        );
        assert_eq!(step.vertical_velocity, 5.0);
        assert_eq!(
            step.state,
            VerticalMotionState::JumpOverride {
                override_value: -5.0
            }
        );
    }

    #[test]
    fn test_jump_curve_scenario() {
        let config = JumpConfig {
            jump_velocity: 5.0,
            gravity: 9.8,
            ..Default::default()
        };
        let dt = 0.1;

        let mut step = VerticalMotionState::Grounded.advance(
            0.0,
            VerticalInput {
                jump_pressed: true,
                grounded: true,
            },
            &config,
            dt,
        );
        for _ in 0..3 {
            step = step.state.advance(step.vertical_velocity, airborne(), &config, dt);
        }
        assert!((step.state.override_value() - -2.06).abs() < 1e-4);
        assert!((step.vertical_velocity - 2.06).abs() < 1e-4);

        // Keep falling until the accumulator turns positive, then land
        while step.state.override_value() <= 0.0 {
            step = step.state.advance(step.vertical_velocity, airborne(), &config, dt);
        }
        assert!(step.vertical_velocity < 0.0);
        step = step.state.advance(step.vertical_velocity, landed(), &config, dt);
        assert_eq!(step.state, VerticalMotionState::Grounded);
        assert_eq!(step.state.override_value(), 0.0);
        assert_eq!(step.vertical_velocity, config.ground_stick_velocity);
    }

    #[test]
    fn test_ground_contact_while_rising_keeps_jump() {
        let config = JumpConfig::default();
        let state = VerticalMotionState::JumpOverride {
            override_value: -3.0,
        };
        let step = state.advance(3.0, landed(), &config, 0.1);
        assert_eq!(state, step.state);
        assert_eq!(step.vertical_velocity, 3.0);
    }

    #[test]
    fn test_airborne_jump_press_is_ignored() {
        let mut rng = StdRng::seed_from_u64(3);
        let config = JumpConfig::default();

        for _ in 0..500 {
            let state = match rng.gen_range(0..3) {
                0 => VerticalMotionState::Grounded,
                1 => VerticalMotionState::Falling,
                _ => VerticalMotionState::JumpOverride {
                    override_value: rng.gen_range(-8.0..8.0),
                },
            };
            let velocity = rng.gen_range(-20.0..20.0);
            let dt = rng.gen_range(0.001..0.1);

            let pressed = state.advance(
                velocity,
                VerticalInput {
                    jump_pressed: true,
                    grounded: false,
                },
                &config,
                dt,
            );
            let released = state.advance(velocity, airborne(), &config, dt);
            assert_eq!(pressed, released);
        }
    }

    #[test]
    fn test_override_never_decreases_while_airborne() {
        let config = JumpConfig::default();
        let mut step = VerticalStep {
            state: VerticalMotionState::JumpOverride {
                override_value: -config.jump_velocity,
            },
            vertical_velocity: config.jump_velocity,
        };
        for _ in 0..200 {
            let before = step.state.override_value();
            step = step.state.advance(step.vertical_velocity, airborne(), &config, 1.0 / 60.0);
            assert!(step.state.override_value() >= before);
        }
    }

    #[test]
    fn test_walking_off_ledge_falls_with_gravity() {
        let config = JumpConfig::default();
        let step = VerticalMotionState::Grounded.advance(-0.1, airborne(), &config, 0.1);
        assert_eq!(step.state, VerticalMotionState::Falling);
        assert!((step.vertical_velocity - (-0.1 - 0.98)).abs() < 1e-5);

        let step = step.state.advance(step.vertical_velocity, landed(), &config, 0.1);
        assert_eq!(step.state, VerticalMotionState::Grounded);
        assert_eq!(step.vertical_velocity, config.ground_stick_velocity);
    }

    #[test]
    fn test_standing_still_keeps_velocity() {
        let config = JumpConfig::default();
        let step = VerticalMotionState::Grounded.advance(0.0, landed(), &config, 0.1);
        assert_eq!(step.state, VerticalMotionState::Grounded);
        assert_eq!(step.vertical_velocity, 0.0);
    }
}
