// file: src/utils/mod.rs
// description: utility functions module exports
// reference: internal module structure

pub mod logging;
pub mod progress;
pub mod telemetry;
pub mod template;
pub mod validation;

pub use progress::IndexProgress;
pub use telemetry::{HealthCheck, HealthReport, HealthStatus, OperationTimer};
pub use template::PromptTemplate;
pub use validation::Validator;
