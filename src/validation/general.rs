//! General config rules: cloud provider, Terraform backend and Sentry.

use crate::config::schema::{CloudTarget, GeneralConfig, SentryConfig, TerraformConfig};
use crate::observability::advisory::Notifier;

use super::ValidationResult;

const PROVIDER_VERSIONS_TITLE: &str = "Terraform provider versions";
const PROVIDER_VERSIONS_NOTICE: &str = "You are using custom Terraform provider versions.\n\
    Please be aware that some unexpected changes might occur compared to the defaults.";

/// Validate cloud, Terraform backend and Sentry settings.
pub fn validate_general(general: &GeneralConfig, notifier: &dyn Notifier) -> ValidationResult {
    let terraform = general.terraform_config.as_ref();
    let aws_state = terraform.is_some_and(|t| t.aws_remote_state.is_some());
    let azure_state = terraform.is_some_and(|t| t.azure_remote_state.is_some());

    match general.target() {
        CloudTarget::Aws(aws) => {
            if aws.is_none() {
                invalid!("Missing aws configuration");
            }
            if !aws_state {
                invalid!("Missing aws_remote_state configuration");
            }
            if azure_state {
                invalid!("Found azure_remote_state configuration, while cloud is set to 'aws'");
            }
        }
        CloudTarget::Azure(_) => {
            if !azure_state {
                invalid!("Missing azure_remote_state configuration");
            }
            if aws_state {
                invalid!("Found aws_remote_state configuration, while cloud is set to 'azure'");
            }
        }
    }

    if let Some(terraform) = terraform {
        validate_terraform_config(terraform, notifier);
    }

    if let Some(sentry) = &general.sentry {
        validate_sentry_config(sentry)?;
    }

    Ok(())
}

/// Advise about custom provider versions. Never fails.
pub fn validate_terraform_config(terraform: &TerraformConfig, notifier: &dyn Notifier) {
    if terraform.has_custom_providers() {
        notifier.warn(PROVIDER_VERSIONS_TITLE, PROVIDER_VERSIONS_NOTICE);
    }
}

pub fn validate_sentry_config(sentry: &SentryConfig) -> ValidationResult {
    match (sentry.has_dsn(), sentry.has_auth_token()) {
        (false, false) => invalid!("sentry: Either dsn or auth_token should be set"),
        (true, true) => invalid!("sentry: Only a dsn or auth_token should be defined"),
        _ => {}
    }

    if sentry.has_auth_token() && !(sentry.has_project() || sentry.has_organization()) {
        invalid!("sentry: A project and organization should be defined when using an auth_token");
    }

    Ok(())
}
