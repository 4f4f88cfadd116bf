//! Per-site rules: provider settings, endpoints/DNS and site components.

use std::collections::BTreeSet;

use crate::config::schema::{CloudProvider, DeployConfig, SiteConfig};

use super::stores::validate_commercetools;
use super::ValidationResult;

/// Endpoint name that Azure always satisfies through the default Front Door
/// domain, without a custom endpoint on the site.
pub const AZURE_DEFAULT_ENDPOINT: &str = "default";

pub fn validate_site(site: &SiteConfig, config: &DeployConfig) -> ValidationResult {
    let cloud = config.general.cloud;

    if cloud == CloudProvider::Aws && site.aws.is_none() {
        invalid!("Site {} is missing an aws configuration", site.identifier);
    }

    validate_endpoints(site, cloud)?;
    validate_commercetools(site)?;

    if !site.components.is_empty() {
        validate_site_components(site)?;
    }

    Ok(())
}

/// Check that endpoint URLs belong to the site's DNS zone and that every
/// endpoint a component asks for is defined.
pub fn validate_endpoints(site: &SiteConfig, cloud: CloudProvider) -> ValidationResult {
    if !site.endpoints.is_empty() {
        let zone = dns_zone(site, cloud)?;

        for endpoint in &site.endpoints {
            if !endpoint.url.ends_with(zone) {
                invalid!("No match between endpoint {endpoint} and DNS zone {zone}");
            }
        }
    }

    let expected: BTreeSet<&str> = site
        .components
        .iter()
        .filter_map(|c| c.endpoint.as_deref())
        .filter(|e| !e.is_empty())
        .collect();

    let mut defined = site.endpoint_keys();
    if cloud == CloudProvider::Azure {
        defined.insert(AZURE_DEFAULT_ENDPOINT);
    }

    let missing: Vec<&str> = expected.difference(&defined).copied().collect();
    if !missing.is_empty() {
        invalid!(
            "Missing required endpoints {} on site {}",
            missing.join(", "),
            site.identifier
        );
    }

    Ok(())
}

fn dns_zone(site: &SiteConfig, cloud: CloudProvider) -> ValidationResult<&str> {
    let zone = match cloud {
        CloudProvider::Aws => site
            .aws
            .as_ref()
            .and_then(|aws| aws.route53_zone_name.as_deref()),
        CloudProvider::Azure => site
            .azure
            .as_ref()
            .and_then(|azure| azure.frontdoor.as_ref())
            .and_then(|frontdoor| frontdoor.dns_zone.as_deref()),
    };

    match (zone.filter(|z| !z.is_empty()), cloud) {
        (Some(zone), _) => Ok(zone),
        (None, CloudProvider::Aws) => invalid!(
            "Site {} needs to have a route53_zone_name defined before endpoints can be used.",
            site.identifier
        ),
        (None, CloudProvider::Azure) => invalid!(
            "Site {} needs to have a Frontdoor dns_zone defined before endpoints can be used.",
            site.identifier
        ),
    }
}

/// Sanity checks on component configuration per site.
pub fn validate_site_components(site: &SiteConfig) -> ValidationResult {
    let defined_stores = site.store_keys();

    for component in &site.components {
        if let Some(path) = component.health_check_path.as_deref() {
            if !path.is_empty() && !path.starts_with('/') {
                invalid!(
                    "Component {} health check {} does not start with '/'.",
                    component.name,
                    path
                );
            }
        }

        for store in component.store_variables.keys() {
            if !defined_stores.contains(store.as_str()) {
                invalid!(
                    "Store {} used by component {} is not defined in your commercetools stores definition",
                    store,
                    component.name
                );
            }
        }
    }

    Ok(())
}
