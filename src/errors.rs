use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimulationError {
    #[error("Physics domain error: {0}")]
    PhysicsDomainError(String),

    #[error("Integration error: {0}")]
    IntegrationError(String),

    #[error("Initialization error: {0}")]
    InitializationError(String),
}

pub type Result<T> = std::result::Result<T, SimulationError>;
