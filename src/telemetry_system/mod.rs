pub mod telemetry;
pub mod trajectory;
