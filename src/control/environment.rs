use std::f64::consts::PI;

use tracing::{debug, info, warn};

use crate::config::PhysicalConstants;
use crate::constants::SUB_STEPS;
use crate::control::design::Design;
use crate::control::propulsion::can_sustain;
use crate::control::spaces::{ActionSpace, StateSpace};
use crate::errors::{Result, SimulationError};
use crate::telemetry_system::trajectory::Trajectory;
use crate::trajectory_system::integrator::{odeint, Tolerances};
use crate::trajectory_system::kinematics::GravityTurn;
use crate::trajectory_system::state::StateVector;
use crate::utils::linspace;

/// Penalty for a non-horizontal flight path plus the squared deviation
/// from local circular-orbit speed. Zero exactly on a circular orbit.
pub fn reward(state: &StateVector, constants: &PhysicalConstants) -> f64 {
    let mu = constants.gravitational_parameter();
    let heading_error = (state.flight_path_angle / PI * 2.0).powi(2);
    let orbit_error = (1.0 - mu / state.radial_distance / state.speed.powi(2)).powi(2);
    -1000.0 * heading_error - orbit_error
}

/// Single-stage ascent environment driven one fixed time slice at a time.
#[derive(Debug, Clone)]
pub struct Environment<'a> {
    constants: PhysicalConstants,
    design: &'a Design,
    tolerances: Tolerances,
    state_space: StateSpace,
    action_space: ActionSpace,
    initial_state: StateVector,
    current_state: StateVector,
    current_altitude: f64,
    action: f64,
    trajectory: Trajectory,
}

impl<'a> Environment<'a> {
    pub fn new(design: &'a Design) -> Result<Self> {
        Self::with_constants(design, PhysicalConstants::default())
    }

    pub fn with_constants(design: &'a Design, constants: PhysicalConstants) -> Result<Self> {
        constants.validate()?;

        let initial_state = StateVector::initial(&constants, design.initial_fuel_mass());
        info!(
            fuel = design.initial_fuel_mass(),
            radius = constants.body_radius,
            "Environment initialised"
        );

        Ok(Environment {
            constants,
            design,
            tolerances: Tolerances::default(),
            state_space: StateSpace::new(&constants, design),
            action_space: ActionSpace::default(),
            initial_state,
            current_state: initial_state,
            current_altitude: initial_state.radial_distance,
            action: 0.0,
            trajectory: Trajectory::new(),
        })
    }

    pub fn with_tolerances(mut self, tolerances: Tolerances) -> Self {
        self.tolerances = tolerances;
        self
    }

    /// Swaps the design only. The fuel bound of the state space, the
    /// initial state, the current state and the trajectory log keep the
    /// values derived from the previous design.
    pub fn change_design(&mut self, design: &'a Design) {
        info!(
            old_fuel = self.design.initial_fuel_mass(),
            new_fuel = design.initial_fuel_mass(),
            "Design changed"
        );
        self.design = design;
    }

    /// Integrates one time slice from `state` at burn rate `action` and
    /// returns the resulting state and its reward.
    pub fn step(&mut self, state: StateVector, action: f64) -> Result<(StateVector, f64)> {
        if !action.is_finite() || !self.action_space.contains(action) {
            return Err(SimulationError::PhysicsDomainError(format!(
                "burn rate {} outside [{}, {}]",
                action, self.action_space.burn_rate.low, self.action_space.burn_rate.high
            )));
        }
        state.check_domain(&self.constants)?;

        self.current_state = state;
        self.action = action;
        self.current_altitude = state.radial_distance;

        if action > 0.0 && !can_sustain(action, state.fuel_mass, &self.constants) {
            warn!(
                action,
                fuel = state.fuel_mass,
                "Insufficient fuel for a full step, engine cut off"
            );
        }

        let times = linspace(0.0, self.constants.time_step, SUB_STEPS);
        let system = GravityTurn::new(&self.constants, action, state.fuel_mass);
        let solution = odeint(&system, &state.to_array(), &times, &self.tolerances)?;

        let sub_states: Vec<StateVector> = solution
            .into_iter()
            .map(|row| {
                let mut sub_state = StateVector::from_array(row);
                sub_state.fuel_mass = sub_state.fuel_mass.max(0.0);
                sub_state
            })
            .collect();
        let next_state = match sub_states.last() {
            Some(last) => *last,
            None => {
                return Err(SimulationError::IntegrationError(
                    "integrator returned no states".to_string(),
                ))
            }
        };
        self.trajectory.extend(sub_states);

        next_state.check_domain(&self.constants)?;

        let reward = reward(&next_state, &self.constants);
        debug!(
            action,
            reward,
            speed = next_state.speed,
            radial_distance = next_state.radial_distance,
            fuel = next_state.fuel_mass,
            "Step complete"
        );

        Ok((next_state, reward))
    }

    /// Episode continues while the vehicle holds or gains altitude against
    /// the reference taken at the start of the last step.
    pub fn is_running(&self, state: &StateVector) -> bool {
        state.radial_distance >= self.current_altitude
    }

    /// Like [`is_running`](Self::is_running), but a finished episode also
    /// resets the environment to its initial state.
    pub fn running(&mut self, state: &StateVector) -> bool {
        if self.is_running(state) {
            true
        } else {
            info!(
                altitude = state.altitude(self.constants.body_radius),
                reference = self.current_altitude - self.constants.body_radius,
                "Episode ended: vehicle lost altitude"
            );
            self.reset();
            false
        }
    }

    pub fn reset(&mut self) -> StateVector {
        debug!("Environment reset to initial state");
        self.current_state = self.initial_state;
        self.current_altitude = self.initial_state.radial_distance;
        self.initial_state
    }

    pub fn reward(&self, state: &StateVector) -> f64 {
        reward(state, &self.constants)
    }

    pub fn constants(&self) -> &PhysicalConstants {
        &self.constants
    }

    pub fn design(&self) -> &Design {
        self.design
    }

    pub fn state_space(&self) -> &StateSpace {
        &self.state_space
    }

    pub fn action_space(&self) -> &ActionSpace {
        &self.action_space
    }

    pub fn initial_state(&self) -> StateVector {
        self.initial_state
    }

    pub fn current_state(&self) -> StateVector {
        self.current_state
    }

    pub fn current_altitude(&self) -> f64 {
        self.current_altitude
    }

    pub fn action(&self) -> f64 {
        self.action
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trajectory_system::state::STATE_DIMENSION;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn design() -> Design {
        Design::new(1e4).unwrap()
    }

    #[test]
    fn test_fresh_environment_sits_at_initial_state() {
        let design = design();
        let env = Environment::new(&design).unwrap();
        assert_eq!(env.current_state(), env.initial_state());
        assert_eq!(env.current_altitude(), env.initial_state().radial_distance);
        assert_eq!(env.action(), 0.0);
        assert!(env.trajectory().is_empty());
    }

    #[test]
    fn test_invalid_constants_are_rejected() {
        let design = design();
        let constants = PhysicalConstants::default().with_time_step(-1.0);
        assert!(matches!(
            Environment::with_constants(&design, constants),
            Err(SimulationError::InitializationError(_))
        ));
    }

    #[test]
    fn test_reward_zero_on_circular_orbit() {
        let constants = PhysicalConstants::default();
        let r = constants.body_radius + 300_000.0;
        let state = StateVector::new(constants.circular_orbit_speed(r), 0.0, r, 0.0, 1.0);
        assert_abs_diff_eq!(reward(&state, &constants), 0.0, epsilon = 1e-20);
    }

    #[test]
    fn test_reward_heading_term() {
        let constants = PhysicalConstants::default();
        let r = constants.body_radius + 300_000.0;
        let v = constants.circular_orbit_speed(r);
        // vertical flight at orbital speed: -1000 * (2 * (π/2) / π)²
        let state = StateVector::new(v, PI / 2.0, r, 0.0, 0.0);
        assert_relative_eq!(reward(&state, &constants), -1000.0, max_relative = 1e-12);
    }

    #[test]
    fn test_reward_orbit_term() {
        let constants = PhysicalConstants::default();
        let r = constants.body_radius + 300_000.0;
        let v = 2.0 * constants.circular_orbit_speed(r);
        // GM/(r v²) = 1/4
        let state = StateVector::new(v, 0.0, r, 0.0, 0.0);
        assert_relative_eq!(reward(&state, &constants), -0.5625, max_relative = 1e-12);
    }

    #[test]
    fn test_step_records_sub_steps() {
        let design = design();
        let mut env = Environment::new(&design).unwrap();
        let start = env.initial_state();
        env.step(start, 500.0).unwrap();
        assert_eq!(env.trajectory().len(), SUB_STEPS);
        assert_eq!(env.trajectory().states()[0], start);

        let (next, _) = env.step(start, 500.0).unwrap();
        assert_eq!(env.trajectory().len(), 2 * SUB_STEPS);
        assert_eq!(*env.trajectory().last().unwrap(), next);
    }

    #[test]
    fn test_step_updates_references_to_step_input() {
        let design = design();
        let mut env = Environment::new(&design).unwrap();
        let start = env.initial_state();
        let (next, _) = env.step(start, 500.0).unwrap();
        let (_, _) = env.step(next, 250.0).unwrap();

        assert_eq!(env.current_state(), next);
        assert_eq!(env.current_altitude(), next.radial_distance);
        assert_eq!(env.action(), 250.0);
    }

    #[test]
    fn test_zero_action_keeps_fuel() {
        let design = design();
        let mut env = Environment::new(&design).unwrap();
        let (next, _) = env.step(env.initial_state(), 0.0).unwrap();
        assert_eq!(next.fuel_mass, 1e4);
    }

    #[test]
    fn test_burn_consumes_fuel() {
        let design = design();
        let mut env = Environment::new(&design).unwrap();
        let start = env.initial_state();
        let (next, reward) = env.step(start, 500.0).unwrap();
        assert_relative_eq!(next.fuel_mass, 9_500.0, max_relative = 1e-9);
        assert!(next.radial_distance > start.radial_distance);
        assert!(reward < 0.0);
    }

    #[test]
    fn test_fuel_is_floored_at_zero() {
        let design = Design::new(100.0).unwrap();
        let mut env = Environment::new(&design).unwrap();
        let (next, _) = env.step(env.initial_state(), 1000.0).unwrap();
        assert_eq!(next.fuel_mass, 0.0);
        assert!(env.trajectory().states().iter().all(|s| s.fuel_mass >= 0.0));
    }

    #[test]
    fn test_step_rejects_out_of_range_action() {
        let design = design();
        let mut env = Environment::new(&design).unwrap();
        let start = env.initial_state();
        for action in [-1.0, 13_001.0, f64::NAN] {
            assert!(matches!(
                env.step(start, action),
                Err(SimulationError::PhysicsDomainError(_))
            ));
        }
        assert!(env.trajectory().is_empty());
    }

    #[test]
    fn test_step_rejects_zero_speed() {
        let design = design();
        let mut env = Environment::new(&design).unwrap();
        let mut state = env.initial_state();
        state.speed = 0.0;
        assert!(matches!(
            env.step(state, 0.0),
            Err(SimulationError::PhysicsDomainError(_))
        ));
    }

    #[test]
    fn test_step_rejects_underground_start() {
        let design = design();
        let mut env = Environment::new(&design).unwrap();
        let mut state = env.initial_state();
        state.radial_distance = env.constants().body_radius - 10.0;
        assert!(env.step(state, 0.0).is_err());
    }

    #[test]
    fn test_stall_detected_on_step_output() {
        let design = design();
        let mut env = Environment::new(&design).unwrap();
        let mut hop = env.initial_state();
        hop.speed = 5.0;
        hop.flight_path_angle = PI / 2.0;
        assert!(hop.check_domain(env.constants()).is_ok());

        let logged_before = env.trajectory().len();
        let result = env.step(hop, 0.0);
        assert!(matches!(
            result,
            Err(SimulationError::PhysicsDomainError(_))
        ));
        // sub-steps of the failed step are still logged
        assert_eq!(env.trajectory().len(), logged_before + SUB_STEPS);
        assert!(env.trajectory().last().unwrap().speed < 0.0);
    }

    #[test]
    fn test_running_while_climbing() {
        let design = design();
        let mut env = Environment::new(&design).unwrap();
        let start = env.initial_state();
        let (next, _) = env.step(start, 500.0).unwrap();
        assert!(env.running(&next));
        assert_eq!(env.current_state(), start);
    }

    #[test]
    fn test_running_holds_at_same_altitude() {
        let design = design();
        let mut env = Environment::new(&design).unwrap();
        let start = env.initial_state();
        assert!(env.running(&start));
    }

    #[test]
    fn test_running_resets_on_descent() {
        let design = design();
        let mut env = Environment::new(&design).unwrap();
        let start = env.initial_state();
        let (first, _) = env.step(start, 500.0).unwrap();
        let (_, _) = env.step(first, 500.0).unwrap();
        assert_eq!(env.current_state(), first);

        let mut falling = first;
        falling.radial_distance -= 1.0;
        assert!(!env.running(&falling));
        assert_eq!(env.current_state(), env.initial_state());
        assert_eq!(env.current_altitude(), env.initial_state().radial_distance);
    }

    #[test]
    fn test_is_running_is_pure() {
        let design = design();
        let mut env = Environment::new(&design).unwrap();
        let start = env.initial_state();
        let (first, _) = env.step(start, 500.0).unwrap();
        let (_, _) = env.step(first, 500.0).unwrap();

        let mut falling = first;
        falling.radial_distance -= 1.0;
        assert!(!env.is_running(&falling));
        assert_eq!(env.current_state(), first);
    }

    #[test]
    fn test_change_design_leaves_derived_state() {
        let design = design();
        let bigger = Design::new(5e4).unwrap();
        let mut env = Environment::new(&design).unwrap();
        let (_, _) = env.step(env.initial_state(), 500.0).unwrap();
        let before = env.current_state();

        env.change_design(&bigger);
        assert_eq!(env.design().initial_fuel_mass(), 5e4);
        assert_eq!(env.initial_state().fuel_mass, 1e4);
        assert_eq!(env.state_space().fuel_mass.high, 1e4);
        assert_eq!(env.current_state(), before);
        assert_eq!(env.trajectory().len(), SUB_STEPS);
    }

    #[test]
    fn test_trajectory_rows_are_full_states() {
        let design = design();
        let mut env = Environment::new(&design).unwrap();
        let (_, _) = env.step(env.initial_state(), 500.0).unwrap();
        for state in env.trajectory().states() {
            assert_eq!(state.to_array().len(), STATE_DIMENSION);
            assert!(state.is_finite());
        }
    }
}
