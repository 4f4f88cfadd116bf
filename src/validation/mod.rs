//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (components reference existing stores
//!   and endpoints)
//! - Enforce provider specific constraints (remote state, naming limits)
//!
//! # Data Flow
//! ```text
//! DeployConfig
//!     → general.rs    (cloud, terraform backend, sentry)
//!     → components.rs (global component rules)
//!     → site.rs       (per site: endpoints, stores, site components)
//!     → Ok(()) or the first ValidationError
//! ```
//!
//! # Design Decisions
//! - Fails on the first violated rule, rules run in a fixed order
//! - Validation is a pure function of the config; the only side effect is
//!   the advisory notice for custom Terraform provider versions
//! - Rule functions take exactly the entities they need

use thiserror::Error;

use crate::config::schema::DeployConfig;
use crate::observability::advisory::{Notifier, TracingNotifier};

/// A violated validation rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Human readable description of the violated rule.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Result type for validation rules.
pub type ValidationResult<T = ()> = Result<T, ValidationError>;

/// Return early with a [`ValidationError`] built from a format string.
macro_rules! invalid {
    ($($arg:tt)*) => {
        return Err($crate::validation::ValidationError::new(format!($($arg)*)))
    };
}

mod components;
mod general;
mod site;
mod stores;

pub use components::validate_global_components;
pub use general::{validate_general, validate_sentry_config, validate_terraform_config};
pub use site::{validate_endpoints, validate_site, validate_site_components};
pub use stores::{validate_commercetools, validate_store_keys};

/// Validate a configuration, reporting advisories through `tracing`.
pub fn validate(config: &DeployConfig) -> ValidationResult {
    validate_with(config, &TracingNotifier)
}

/// Validate a configuration, reporting advisories through `notifier`.
pub fn validate_with(config: &DeployConfig, notifier: &dyn Notifier) -> ValidationResult {
    validate_general(&config.general, notifier)?;
    validate_global_components(config)?;

    for site in &config.sites {
        tracing::debug!(site = %site.identifier, "Validating site");
        validate_site(site, config)?;
    }

    Ok(())
}
