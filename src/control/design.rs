use crate::errors::{Result, SimulationError};

/// Vehicle design choices fixed before launch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Design {
    initial_fuel_mass: f64, // kg
}

impl Design {
    pub fn new(initial_fuel_mass: f64) -> Result<Self> {
        if !(initial_fuel_mass.is_finite() && initial_fuel_mass > 0.0) {
            return Err(SimulationError::InitializationError(format!(
                "Initial fuel mass must be positive, got {} kg",
                initial_fuel_mass
            )));
        }
        Ok(Design { initial_fuel_mass })
    }

    pub fn initial_fuel_mass(&self) -> f64 {
        self.initial_fuel_mass
    }
}
