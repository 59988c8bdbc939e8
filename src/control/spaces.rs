use crate::config::PhysicalConstants;
use crate::constants::{MAX_BURN_RATE, MAX_RADIAL_DISTANCE, MAX_SPEED};
use crate::control::design::Design;
use crate::trajectory_system::state::StateVector;
use std::f64::consts::FRAC_PI_2;

/// Closed interval `[low, high]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub low: f64,
    pub high: f64,
}

impl Interval {
    pub fn new(low: f64, high: f64) -> Self {
        Interval { low, high }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.low).min(self.high)
    }

    pub fn width(&self) -> f64 {
        self.high - self.low
    }
}

/// Region of interest for each bounded state component. The polar angle
/// accumulates freely and has no bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateSpace {
    pub speed: Interval,
    pub flight_path_angle: Interval,
    pub radial_distance: Interval,
    pub fuel_mass: Interval,
}

impl StateSpace {
    pub fn new(constants: &PhysicalConstants, design: &Design) -> Self {
        StateSpace {
            speed: Interval::new(0.0, MAX_SPEED),
            flight_path_angle: Interval::new(-FRAC_PI_2, FRAC_PI_2),
            radial_distance: Interval::new(constants.body_radius, MAX_RADIAL_DISTANCE),
            fuel_mass: Interval::new(0.0, design.initial_fuel_mass()),
        }
    }

    pub fn contains(&self, state: &StateVector) -> bool {
        self.speed.contains(state.speed)
            && self.flight_path_angle.contains(state.flight_path_angle)
            && self.radial_distance.contains(state.radial_distance)
            && self.fuel_mass.contains(state.fuel_mass)
            && state.polar_angle.is_finite()
    }
}

/// Burn-rate command bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionSpace {
    pub burn_rate: Interval,
}

impl Default for ActionSpace {
    fn default() -> Self {
        ActionSpace {
            burn_rate: Interval::new(0.0, MAX_BURN_RATE),
        }
    }
}

impl ActionSpace {
    pub fn contains(&self, action: f64) -> bool {
        self.burn_rate.contains(action)
    }

    /// `levels` evenly spaced burn rates covering the whole interval.
    pub fn discretize(&self, levels: usize) -> Vec<f64> {
        match levels {
            0 => Vec::new(),
            1 => vec![self.burn_rate.low],
            _ => {
                let spacing = self.burn_rate.width() / (levels - 1) as f64;
                (0..levels)
                    .map(|i| self.burn_rate.low + spacing * i as f64)
                    .collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_contains() {
        let interval = Interval::new(0.0, 10.0);
        assert!(interval.contains(0.0));
        assert!(interval.contains(10.0));
        assert!(!interval.contains(10.5));
        assert!(!interval.contains(f64::NAN));
        assert_eq!(interval.width(), 10.0);
    }

    #[test]
    fn test_interval_clamp() {
        let interval = Interval::new(0.0, 13e3);
        assert_eq!(interval.clamp(-250.0), 0.0);
        assert_eq!(interval.clamp(500.0), 500.0);
        assert_eq!(interval.clamp(0.0), 0.0);
        assert_eq!(interval.clamp(13e3), 13e3);
        assert_eq!(interval.clamp(20e3), 13e3);
    }

    #[test]
    fn test_state_space_bounds_follow_design() {
        let constants = PhysicalConstants::default();
        let design = Design::new(2.5e4).unwrap();
        let space = StateSpace::new(&constants, &design);
        assert_eq!(space.fuel_mass.high, 2.5e4);
        assert_eq!(space.radial_distance.low, constants.body_radius);
        assert_eq!(space.radial_distance.high, 42.2e6);
        assert_eq!(space.speed.high, 11.2e3);
    }

    #[test]
    fn test_state_space_rejects_underground_state() {
        let constants = PhysicalConstants::default();
        let design = Design::new(1e4).unwrap();
        let space = StateSpace::new(&constants, &design);
        let state = StateVector::new(100.0, 0.0, constants.body_radius - 1.0, 10.0, 0.0);
        assert!(!space.contains(&state));
    }

    #[test]
    fn test_action_space_default() {
        let space = ActionSpace::default();
        assert!(space.contains(0.0));
        assert!(space.contains(13e3));
        assert!(!space.contains(-1.0));
        assert!(!space.contains(13_001.0));
    }

    #[test]
    fn test_discretize_covers_endpoints() {
        let levels = ActionSpace::default().discretize(14);
        assert_eq!(levels.len(), 14);
        assert_eq!(levels[0], 0.0);
        assert_eq!(levels[1], 1000.0);
        assert_eq!(levels[13], 13e3);
    }

    #[test]
    fn test_discretize_degenerate_levels() {
        let space = ActionSpace::default();
        assert!(space.discretize(0).is_empty());
        assert_eq!(space.discretize(1), vec![0.0]);
    }
}
