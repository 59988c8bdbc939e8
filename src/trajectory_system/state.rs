use crate::config::PhysicalConstants;
use crate::errors::{Result, SimulationError};

pub const SPEED: usize = 0;
pub const FLIGHT_PATH_ANGLE: usize = 1;
pub const RADIAL_DISTANCE: usize = 2;
pub const FUEL_MASS: usize = 3;
pub const POLAR_ANGLE: usize = 4;

pub const STATE_DIMENSION: usize = 5;

/// Vehicle state in the 2-D polar frame of the central body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateVector {
    pub speed: f64,             // m/s
    pub flight_path_angle: f64, // rad, from local horizontal
    pub radial_distance: f64,   // m, from body centre
    pub fuel_mass: f64,         // kg
    pub polar_angle: f64,       // rad, ground-track angle
}

impl StateVector {
    pub fn new(
        speed: f64,
        flight_path_angle: f64,
        radial_distance: f64,
        fuel_mass: f64,
        polar_angle: f64,
    ) -> Self {
        StateVector {
            speed,
            flight_path_angle,
            radial_distance,
            fuel_mass,
            polar_angle,
        }
    }

    /// Launch state: pad height, initial speed and pitch, full tank.
    pub fn initial(constants: &PhysicalConstants, initial_fuel_mass: f64) -> Self {
        StateVector::new(
            constants.initial_speed,
            constants.initial_flight_path_angle,
            constants.launch_radius(),
            initial_fuel_mass,
            0.0,
        )
    }

    pub fn to_array(&self) -> [f64; STATE_DIMENSION] {
        [
            self.speed,
            self.flight_path_angle,
            self.radial_distance,
            self.fuel_mass,
            self.polar_angle,
        ]
    }

    pub fn from_array(values: [f64; STATE_DIMENSION]) -> Self {
        StateVector::new(
            values[SPEED],
            values[FLIGHT_PATH_ANGLE],
            values[RADIAL_DISTANCE],
            values[FUEL_MASS],
            values[POLAR_ANGLE],
        )
    }

    pub fn altitude(&self, body_radius: f64) -> f64 {
        self.radial_distance - body_radius
    }

    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|v| v.is_finite())
    }

    /// Fails when the equations of motion are undefined for this state:
    /// non-finite components, zero or negative speed, or a vehicle below
    /// the body surface.
    pub fn check_domain(&self, constants: &PhysicalConstants) -> Result<()> {
        if !self.is_finite() {
            return Err(SimulationError::PhysicsDomainError(format!(
                "non-finite state component: {:?}",
                self
            )));
        }
        if self.speed <= 0.0 {
            return Err(SimulationError::PhysicsDomainError(format!(
                "speed must stay positive, got {} m/s",
                self.speed
            )));
        }
        if self.radial_distance < constants.body_radius {
            return Err(SimulationError::PhysicsDomainError(format!(
                "crashed: radial distance {:.2} m is below body radius {:.2} m",
                self.radial_distance, constants.body_radius
            )));
        }
        Ok(())
    }
}

impl From<[f64; STATE_DIMENSION]> for StateVector {
    fn from(values: [f64; STATE_DIMENSION]) -> Self {
        StateVector::from_array(values)
    }
}

impl From<StateVector> for [f64; STATE_DIMENSION] {
    fn from(state: StateVector) -> Self {
        state.to_array()
    }
}
