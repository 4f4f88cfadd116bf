//! Deployment configuration validator library.
//!
//! Validates a multi-site, multi-component cloud deployment configuration
//! before it is used to generate infrastructure definitions.

pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod validation;

pub use config::schema::DeployConfig;
pub use validation::{validate, validate_with, ValidationError};
