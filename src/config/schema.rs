//! Configuration schema definitions.
//!
//! This module defines the complete deployment configuration tree: general
//! cloud settings, the Terraform backend, sites and components.
//! All types derive Serde traits for deserialization from config files.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

/// Root of a deployment configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeployConfig {
    /// File format metadata.
    #[serde(default)]
    pub mach_composer: ComposerConfig,

    /// Cloud, Terraform and integration settings shared by all sites.
    pub general: GeneralConfig,

    /// Sites in declaration order.
    #[serde(default)]
    pub sites: Vec<SiteConfig>,

    /// Global component definitions.
    #[serde(default)]
    pub components: Vec<ComponentConfig>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ComposerConfig {
    /// Config format version, a string or a number. Required by the loader.
    #[serde(default)]
    pub version: Option<serde_json::Value>,
}

impl ComposerConfig {
    pub fn has_version(&self) -> bool {
        match &self.version {
            None | Some(serde_json::Value::Null) => false,
            Some(serde_json::Value::String(v)) => !v.is_empty(),
            Some(_) => true,
        }
    }
}

/// Supported cloud providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CloudProvider {
    Aws,
    Azure,
}

impl CloudProvider {
    /// Integration name used by components to opt into this cloud.
    pub fn as_str(&self) -> &'static str {
        match self {
            CloudProvider::Aws => "aws",
            CloudProvider::Azure => "azure",
        }
    }
}

impl fmt::Display for CloudProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settings shared by every site.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Deployment environment name (e.g., "test", "production").
    #[serde(default)]
    pub environment: String,

    /// Selected cloud provider.
    pub cloud: CloudProvider,

    pub aws: Option<AwsConfig>,

    pub azure: Option<AzureConfig>,

    /// Terraform backend and provider settings.
    pub terraform_config: Option<TerraformConfig>,

    /// Sentry error-tracking integration.
    pub sentry: Option<SentryConfig>,
}

/// The selected cloud together with its own provider settings.
#[derive(Debug, Clone, Copy)]
pub enum CloudTarget<'a> {
    Aws(Option<&'a AwsConfig>),
    Azure(Option<&'a AzureConfig>),
}

impl GeneralConfig {
    /// Resolve the selected cloud to a target carrying only its own payload.
    pub fn target(&self) -> CloudTarget<'_> {
        match self.cloud {
            CloudProvider::Aws => CloudTarget::Aws(self.aws.as_ref()),
            CloudProvider::Azure => CloudTarget::Azure(self.azure.as_ref()),
        }
    }
}

/// AWS provider settings. Used both globally and as a per-site override.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AwsConfig {
    pub account_id: Option<String>,

    pub region: Option<String>,

    /// Route53 zone all site endpoints must belong to.
    pub route53_zone_name: Option<String>,
}

/// Azure provider settings. Used both globally and as a per-site override.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AzureConfig {
    pub tenant_id: Option<String>,

    pub subscription_id: Option<String>,

    pub region: Option<String>,

    pub frontdoor: Option<FrontdoorConfig>,
}

/// Azure Front Door (edge router) settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct FrontdoorConfig {
    /// DNS zone all site endpoints must belong to.
    pub dns_zone: Option<String>,

    pub resource_group: Option<String>,
}

/// Terraform backend configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TerraformConfig {
    /// Custom provider version overrides, keyed by provider name.
    pub providers: BTreeMap<String, String>,

    pub aws_remote_state: Option<AwsRemoteState>,

    pub azure_remote_state: Option<AzureRemoteState>,
}

impl TerraformConfig {
    pub fn has_custom_providers(&self) -> bool {
        !self.providers.is_empty()
    }
}

/// S3 backed Terraform state.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AwsRemoteState {
    pub bucket: String,

    pub key_prefix: String,

    #[serde(default)]
    pub region: Option<String>,

    #[serde(default)]
    pub role_arn: Option<String>,

    #[serde(default)]
    pub lock_table: Option<String>,

    #[serde(default = "default_encrypt")]
    pub encrypt: bool,
}

fn default_encrypt() -> bool {
    true
}

/// Azure blob storage backed Terraform state.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AzureRemoteState {
    pub resource_group: String,

    pub storage_account: String,

    pub container_name: String,

    pub state_folder: String,
}

/// Sentry integration settings.
///
/// Exactly one of `dsn` or `auth_token` must be set. An empty string counts
/// as unset.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SentryConfig {
    pub dsn: Option<String>,

    pub auth_token: Option<String>,

    pub project: Option<String>,

    pub organization: Option<String>,
}

impl SentryConfig {
    pub fn has_dsn(&self) -> bool {
        is_set(&self.dsn)
    }

    pub fn has_auth_token(&self) -> bool {
        is_set(&self.auth_token)
    }

    pub fn has_project(&self) -> bool {
        is_set(&self.project)
    }

    pub fn has_organization(&self) -> bool {
        is_set(&self.organization)
    }
}

fn is_set(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

/// A single deployment site.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SiteConfig {
    /// Unique site identifier.
    pub identifier: String,

    pub aws: Option<AwsConfig>,

    pub azure: Option<AzureConfig>,

    /// Public endpoints in declaration order.
    #[serde(default)]
    pub endpoints: Vec<EndpointConfig>,

    /// Commerce backend settings.
    pub commercetools: Option<CommercetoolsSettings>,

    /// Components deployed on this site.
    #[serde(default)]
    pub components: Vec<ComponentConfig>,
}

impl SiteConfig {
    /// Keys of all stores defined for this site. Empty without commerce settings.
    pub fn store_keys(&self) -> BTreeSet<&str> {
        self.commercetools
            .iter()
            .flat_map(|ct| ct.stores.iter())
            .map(|s| s.key.as_str())
            .collect()
    }

    pub fn endpoint_keys(&self) -> BTreeSet<&str> {
        self.endpoints.iter().map(|e| e.key.as_str()).collect()
    }
}

/// A named public endpoint of a site.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EndpointConfig {
    pub key: String,

    pub url: String,
}

impl fmt::Display for EndpointConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.key, self.url)
    }
}

/// Commerce backend (commercetools) settings for a site.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CommercetoolsSettings {
    pub project_key: Option<String>,

    pub stores: Vec<StoreConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    pub key: String,

    #[serde(default)]
    pub name: Option<String>,
}

/// A component definition.
///
/// Appears both in the global component list and, as a site-scoped entry, in
/// each site's component list. Site entries reference a global definition by
/// `name`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ComponentConfig {
    pub name: String,

    /// Abbreviated name used for cloud resource naming.
    pub short_name: Option<String>,

    pub source: Option<String>,

    pub version: Option<String>,

    pub health_check_path: Option<String>,

    /// Key of the site endpoint this component is exposed on.
    pub endpoint: Option<String>,

    /// Enabled integrations (e.g., "aws", "azure", "sentry").
    pub integrations: BTreeSet<String>,

    /// Per-store variables, keyed by store key.
    pub store_variables: BTreeMap<String, serde_json::Value>,

    pub variables: BTreeMap<String, serde_json::Value>,

    pub secrets: BTreeMap<String, serde_json::Value>,
}

impl ComponentConfig {
    pub fn has_integration(&self, name: &str) -> bool {
        self.integrations.contains(name)
    }

    /// Short name, falling back to the full name when unset.
    pub fn short_name(&self) -> &str {
        self.short_name.as_deref().unwrap_or(&self.name)
    }
}
