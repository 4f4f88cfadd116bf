//! Global component rules.

use crate::config::schema::{CloudProvider, DeployConfig};

use super::ValidationResult;

/// Maximum short name length for Azure; resource names such as storage
/// accounts are built from it.
pub const AZURE_SHORT_NAME_MAX_LEN: usize = 10;

/// Validate the global component list.
pub fn validate_global_components(config: &DeployConfig) -> ValidationResult {
    match config.general.cloud {
        CloudProvider::Aws => validate_aws_components(config),
        CloudProvider::Azure => validate_azure_components(config),
    }
}

fn validate_aws_components(_config: &DeployConfig) -> ValidationResult {
    Ok(())
}

fn validate_azure_components(config: &DeployConfig) -> ValidationResult {
    let integration = CloudProvider::Azure.as_str();

    for component in config.components.iter().filter(|c| c.has_integration(integration)) {
        let short_name = component.short_name();
        if short_name.chars().count() > AZURE_SHORT_NAME_MAX_LEN {
            invalid!(
                "Component ({}) short name '{}' cannot be more than {} characters.",
                component.name,
                short_name,
                AZURE_SHORT_NAME_MAX_LEN
            );
        }
    }

    Ok(())
}
