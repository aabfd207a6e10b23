pub mod config;
pub mod error;
pub mod recruit;
pub mod telemetry;
