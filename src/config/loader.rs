//! Configuration loading from disk.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::{ComponentConfig, DeployConfig};
use crate::observability::advisory::{Notifier, TracingNotifier};
use crate::validation::{validate_with, ValidationError};

/// Serialization format of a config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "toml" => Some(ConfigFormat::Toml),
            "yml" | "yaml" => Some(ConfigFormat::Yaml),
            "json" => Some(ConfigFormat::Json),
            _ => None,
        }
    }
}

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported config file format: {0}")]
    UnsupportedFormat(String),

    #[error("No version defined in mach_composer section")]
    MissingVersion,

    #[error("Component {0} is duplicate")]
    DuplicateComponent(String),

    #[error("Component {component} on site {site} is not defined in the components list")]
    UndefinedComponent { component: String, site: String },

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
}

/// Load, normalize and validate configuration from a file.
pub fn load_config(path: &Path) -> Result<DeployConfig, ConfigError> {
    load_config_with(path, &TracingNotifier)
}

/// Like [`load_config`], reporting advisories through `notifier`.
pub fn load_config_with(path: &Path, notifier: &dyn Notifier) -> Result<DeployConfig, ConfigError> {
    let format = ConfigFormat::from_path(path)
        .ok_or_else(|| ConfigError::UnsupportedFormat(path.display().to_string()))?;
    let content = fs::read_to_string(path)?;

    tracing::debug!(path = %path.display(), ?format, "Loading configuration");

    let config = parse_config(&content, format)?;
    validate_with(&config, notifier)?;

    Ok(config)
}

/// Parse and normalize configuration content without validating it.
pub fn parse_config(content: &str, format: ConfigFormat) -> Result<DeployConfig, ConfigError> {
    let mut config: DeployConfig = match format {
        ConfigFormat::Toml => toml::from_str(content)?,
        ConfigFormat::Yaml => serde_yaml::from_str(content)?,
        ConfigFormat::Json => serde_json::from_str(content)?,
    };

    if !config.mach_composer.has_version() {
        return Err(ConfigError::MissingVersion);
    }

    normalize(&mut config)?;
    Ok(config)
}

/// Fill in defaults the validator and downstream generators rely on.
///
/// - Global components without integrations use the selected cloud.
/// - Global component names are unique.
/// - Site components inherit unset fields from the global definition of the
///   same name; a site component without one is an error.
pub fn normalize(config: &mut DeployConfig) -> Result<(), ConfigError> {
    let cloud = config.general.cloud.as_str();
    for component in &mut config.components {
        if component.integrations.is_empty() {
            component.integrations.insert(cloud.to_string());
        }
    }

    let mut definitions: HashMap<&str, &ComponentConfig> =
        HashMap::with_capacity(config.components.len());
    for component in &config.components {
        if definitions.insert(component.name.as_str(), component).is_some() {
            return Err(ConfigError::DuplicateComponent(component.name.clone()));
        }
    }

    for site in &mut config.sites {
        for component in &mut site.components {
            let Some(definition) = definitions.get(component.name.as_str()) else {
                return Err(ConfigError::UndefinedComponent {
                    component: component.name.clone(),
                    site: site.identifier.clone(),
                });
            };

            inherit(&mut component.short_name, &definition.short_name);
            inherit(&mut component.source, &definition.source);
            inherit(&mut component.version, &definition.version);
            inherit(&mut component.health_check_path, &definition.health_check_path);
            inherit(&mut component.endpoint, &definition.endpoint);
            if component.integrations.is_empty() {
                component.integrations = definition.integrations.clone();
            }
        }
    }

    Ok(())
}

fn inherit(target: &mut Option<String>, source: &Option<String>) {
    if target.is_none() {
        target.clone_from(source);
    }
}
