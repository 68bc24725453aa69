pub mod config;
pub mod error;
pub mod leave;
pub mod telemetry;
