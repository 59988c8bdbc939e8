use crate::config::PhysicalConstants;
use crate::control::propulsion::thrust_to_weight;
use crate::trajectory_system::integrator::OdeSystem;
use crate::trajectory_system::state::{
    FLIGHT_PATH_ANGLE, FUEL_MASS, POLAR_ANGLE, RADIAL_DISTANCE, SPEED, STATE_DIMENSION,
};

/// Gravity-turn equations of motion for one step.
///
/// The burn rate and the fuel mass used by the thrust model are frozen at
/// the start of the step; the fuel component of the integrated state is
/// never read back.
#[derive(Debug, Clone, Copy)]
pub struct GravityTurn<'a> {
    pub constants: &'a PhysicalConstants,
    pub action: f64,
    pub fuel_at_step_start: f64,
}

impl<'a> GravityTurn<'a> {
    pub fn new(constants: &'a PhysicalConstants, action: f64, fuel_at_step_start: f64) -> Self {
        GravityTurn {
            constants,
            action,
            fuel_at_step_start,
        }
    }
}

impl OdeSystem<STATE_DIMENSION> for GravityTurn<'_> {
    fn rhs(&self, _t: f64, y: &[f64; STATE_DIMENSION], dydt: &mut [f64; STATE_DIMENSION]) {
        *dydt = derivatives(y, self.action, self.fuel_at_step_start, self.constants);
    }
}

/// Time derivative of `[speed, flight_path_angle, radial_distance,
/// fuel_mass, polar_angle]`.
///
/// Undefined for `speed == 0` or `r == 0`; callers keep states inside the
/// domain checked by `StateVector::check_domain`.
pub fn derivatives(
    y: &[f64; STATE_DIMENSION],
    action: f64,
    fuel_at_step_start: f64,
    constants: &PhysicalConstants,
) -> [f64; STATE_DIMENSION] {
    let speed = y[SPEED];
    let gamma = y[FLIGHT_PATH_ANGLE];
    let r = y[RADIAL_DISTANCE];

    let g = constants.gravity_at(r);
    let thrust_ratio = thrust_to_weight(g, action, fuel_at_step_start, constants);

    let mut dydt = [0.0; STATE_DIMENSION];
    dydt[SPEED] = -g * (gamma.sin() - thrust_ratio);
    dydt[FLIGHT_PATH_ANGLE] = (speed / r - g / speed) * gamma.cos();
    dydt[RADIAL_DISTANCE] = speed * gamma.sin();
    // burns even after the thrust model has cut the engine
    dydt[FUEL_MASS] = -action;
    dydt[POLAR_ANGLE] = (speed / r) * gamma.cos();
    dydt
}
