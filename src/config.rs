use crate::constants::{
    EARTH_MASS, EARTH_RADIUS, EMPTY_ROCKET_MASS, ENGINE_THRUST, GRAVITATIONAL_CONSTANT,
    INITIAL_ALTITUDE, INITIAL_FLIGHT_PATH_ANGLE, INITIAL_SPEED, KERBIN_MASS, KERBIN_RADIUS,
    SPECIFIC_IMPULSE, TIME_STEP,
};
use crate::errors::{Result, SimulationError};

/// Physical parameters of one simulation. Fixed for the lifetime of an
/// [`Environment`](crate::Environment).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalConstants {
    pub gravitational_constant: f64,
    pub body_mass: f64,
    pub body_radius: f64,
    /// Rated engine thrust (N). Not read by the thrust-to-weight model.
    pub engine_thrust: f64,
    pub empty_mass: f64,
    pub specific_impulse: f64,
    pub time_step: f64,
    pub initial_speed: f64,
    pub initial_flight_path_angle: f64,
    /// Launch pad height above the body surface (m).
    pub initial_altitude: f64,
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        PhysicalConstants {
            gravitational_constant: GRAVITATIONAL_CONSTANT,
            body_mass: EARTH_MASS,
            body_radius: EARTH_RADIUS,
            engine_thrust: ENGINE_THRUST,
            empty_mass: EMPTY_ROCKET_MASS,
            specific_impulse: SPECIFIC_IMPULSE,
            time_step: TIME_STEP,
            initial_speed: INITIAL_SPEED,
            initial_flight_path_angle: INITIAL_FLIGHT_PATH_ANGLE,
            initial_altitude: INITIAL_ALTITUDE,
        }
    }
}

impl PhysicalConstants {
    /// Same vehicle launched from Kerbin instead of Earth.
    pub fn kerbin() -> Self {
        PhysicalConstants {
            body_mass: KERBIN_MASS,
            body_radius: KERBIN_RADIUS,
            ..Default::default()
        }
    }

    pub fn with_time_step(mut self, time_step: f64) -> Self {
        self.time_step = time_step;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let strictly_positive = [
            ("gravitational constant", self.gravitational_constant),
            ("body mass", self.body_mass),
            ("body radius", self.body_radius),
            ("empty mass", self.empty_mass),
            ("specific impulse", self.specific_impulse),
            ("time step", self.time_step),
            ("initial speed", self.initial_speed),
        ];
        for (name, value) in strictly_positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SimulationError::InitializationError(format!(
                    "{} must be positive and finite, got {}",
                    name, value
                )));
            }
        }

        if !(self.initial_altitude.is_finite() && self.initial_altitude >= 0.0) {
            return Err(SimulationError::InitializationError(format!(
                "initial altitude must be non-negative, got {}",
                self.initial_altitude
            )));
        }
        if !self.initial_flight_path_angle.is_finite()
            || self.initial_flight_path_angle.abs() > std::f64::consts::FRAC_PI_2
        {
            return Err(SimulationError::InitializationError(format!(
                "initial flight path angle {} outside [-π/2, π/2]",
                self.initial_flight_path_angle
            )));
        }

        Ok(())
    }

    /// G·M of the central body.
    pub fn gravitational_parameter(&self) -> f64 {
        self.gravitational_constant * self.body_mass
    }

    pub fn gravity_at(&self, radial_distance: f64) -> f64 {
        self.gravitational_parameter() / radial_distance.powi(2)
    }

    pub fn surface_gravity(&self) -> f64 {
        self.gravity_at(self.body_radius)
    }

    pub fn circular_orbit_speed(&self, radial_distance: f64) -> f64 {
        (self.gravitational_parameter() / radial_distance).sqrt()
    }

    pub fn launch_radius(&self) -> f64 {
        self.body_radius + self.initial_altitude
    }
}
