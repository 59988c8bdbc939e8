pub mod integrator;
pub mod kinematics;
pub mod state;
