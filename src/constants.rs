use std::f64::consts::FRAC_PI_2;

// Physical Constants
pub const GRAVITATIONAL_CONSTANT: f64 = 6.672e-11; // N⋅m²/kg²
pub const EARTH_MASS: f64 = 5.97219e24; // kg
pub const EARTH_RADIUS: f64 = 6.378e6; // meters (mean)
pub const KERBIN_MASS: f64 = 5.2915793e22; // kg
pub const KERBIN_RADIUS: f64 = 6e5; // meters

// Rocket Constants (S-IC class)
pub const ENGINE_THRUST: f64 = 189e5; // N
pub const EMPTY_ROCKET_MASS: f64 = 13e4; // kg
pub const SPECIFIC_IMPULSE: f64 = 304.0; // s

// Launch Conditions
pub const INITIAL_SPEED: f64 = 50.0; // m/s
pub const INITIAL_FLIGHT_PATH_ANGLE: f64 = FRAC_PI_2 - 0.1; // rad
pub const INITIAL_ALTITUDE: f64 = 2.86875e2; // m above the surface

// State and Action Bounds
pub const MAX_SPEED: f64 = 11.2e3; // m/s
pub const MAX_RADIAL_DISTANCE: f64 = 42.2e6; // m
pub const MAX_BURN_RATE: f64 = 13e3; // kg/s

// Simulation Parameters
pub const TIME_STEP: f64 = 1.0; // s
pub const SUB_STEPS: usize = 10;

// Integrator Tolerances
pub const RELATIVE_TOLERANCE: f64 = 1.49012e-8;
pub const ABSOLUTE_TOLERANCE: f64 = 1.49012e-8;
pub const MAX_INTEGRATOR_STEPS: usize = 500;
pub const MIN_STEP_SIZE: f64 = 1e-12; // s
