//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::collections::BTreeMap;

use deploy_validator::config::schema::{
    AwsConfig, AwsRemoteState, AzureConfig, AzureRemoteState, CloudProvider,
    CommercetoolsSettings, ComponentConfig, ComposerConfig, DeployConfig, EndpointConfig,
    FrontdoorConfig, GeneralConfig, SiteConfig, StoreConfig, TerraformConfig,
};

pub const ZONE: &str = "example.com";

/// A valid AWS config with one site using `ZONE`.
pub fn aws_config() -> DeployConfig {
    DeployConfig {
        mach_composer: composer(),
        general: GeneralConfig {
            environment: "test".into(),
            cloud: CloudProvider::Aws,
            aws: Some(AwsConfig::default()),
            azure: None,
            terraform_config: Some(TerraformConfig {
                providers: BTreeMap::new(),
                aws_remote_state: Some(aws_remote_state()),
                azure_remote_state: None,
            }),
            sentry: None,
        },
        sites: vec![site_with(
            "nl-unittest",
            Some(AwsConfig {
                account_id: Some("123456789".into()),
                region: Some("eu-central-1".into()),
                route53_zone_name: Some(ZONE.into()),
            }),
            None,
        )],
        components: Vec::new(),
    }
}

/// A valid Azure config with one site using `ZONE` on Front Door.
pub fn azure_config() -> DeployConfig {
    DeployConfig {
        mach_composer: composer(),
        general: GeneralConfig {
            environment: "test".into(),
            cloud: CloudProvider::Azure,
            aws: None,
            azure: Some(AzureConfig::default()),
            terraform_config: Some(TerraformConfig {
                providers: BTreeMap::new(),
                aws_remote_state: None,
                azure_remote_state: Some(azure_remote_state()),
            }),
            sentry: None,
        },
        sites: vec![site_with(
            "nl-unittest",
            None,
            Some(AzureConfig {
                frontdoor: Some(FrontdoorConfig {
                    dns_zone: Some(ZONE.into()),
                    resource_group: None,
                }),
                ..Default::default()
            }),
        )],
        components: Vec::new(),
    }
}

pub fn aws_remote_state() -> AwsRemoteState {
    AwsRemoteState {
        bucket: "tf-state".into(),
        key_prefix: "unittest".into(),
        region: None,
        role_arn: None,
        lock_table: None,
        encrypt: true,
    }
}

pub fn azure_remote_state() -> AzureRemoteState {
    AzureRemoteState {
        resource_group: "rg".into(),
        storage_account: "tfstate".into(),
        container_name: "state".into(),
        state_folder: "unittest".into(),
    }
}

pub fn site_with(identifier: &str, aws: Option<AwsConfig>, azure: Option<AzureConfig>) -> SiteConfig {
    SiteConfig {
        identifier: identifier.into(),
        aws,
        azure,
        endpoints: Vec::new(),
        commercetools: None,
        components: Vec::new(),
    }
}

pub fn endpoint(key: &str, url: &str) -> EndpointConfig {
    EndpointConfig {
        key: key.into(),
        url: url.into(),
    }
}

pub fn stores(keys: &[&str]) -> CommercetoolsSettings {
    CommercetoolsSettings {
        project_key: Some("unittest".into()),
        stores: keys
            .iter()
            .map(|k| StoreConfig {
                key: (*k).into(),
                name: None,
            })
            .collect(),
    }
}

pub fn component(name: &str) -> ComponentConfig {
    ComponentConfig {
        name: name.into(),
        ..Default::default()
    }
}

/// Register `component` globally and on the first site.
pub fn deploy(config: &mut DeployConfig, component: ComponentConfig) {
    config.components.push(ComponentConfig {
        name: component.name.clone(),
        short_name: component.short_name.clone(),
        integrations: component.integrations.clone(),
        ..Default::default()
    });
    config.sites[0].components.push(component);
}

fn composer() -> ComposerConfig {
    ComposerConfig {
        version: Some("1".into()),
    }
}
