pub mod config;
pub mod constants;
pub mod control;
pub mod errors;
pub mod telemetry_system;
pub mod trajectory_system;
pub mod utils;

pub use config::PhysicalConstants;
pub use constants::*;
pub use control::design::Design;
pub use control::environment::{reward, Environment};
pub use control::propulsion::thrust_to_weight;
pub use control::spaces::{ActionSpace, Interval, StateSpace};
pub use errors::{Result, SimulationError};

// Re-export commonly used items from trajectory_system
pub use trajectory_system::integrator::{odeint, OdeSystem, Tolerances};
pub use trajectory_system::kinematics::{derivatives, GravityTurn};
pub use trajectory_system::state::StateVector;

// Re-export commonly used items from telemetry_system
pub use telemetry_system::telemetry::Telemetry;
pub use telemetry_system::trajectory::{write_trajectory, write_trajectory_file, Trajectory};

// Re-export commonly used utilities
pub use utils::linspace;
pub use utils::vector2d::Vector2D;
