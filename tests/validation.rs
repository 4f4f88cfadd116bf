//! Validation rules exercised through the public API.

use std::sync::Mutex;

use deploy_validator::config::schema::{AwsConfig, SentryConfig};
use deploy_validator::observability::advisory::Notifier;
use deploy_validator::{validate, validate_with};

mod common;

use common::{aws_config, azure_config, component, deploy, endpoint, stores, ZONE};

fn message(result: Result<(), deploy_validator::ValidationError>) -> String {
    result.expect_err("expected validation to fail").to_string()
}

#[test]
fn test_valid_configs() {
    assert!(validate(&aws_config()).is_ok());
    assert!(validate(&azure_config()).is_ok());
}

#[test]
fn test_aws_with_azure_remote_state_fails() {
    let mut config = aws_config();
    if let Some(terraform) = config.general.terraform_config.as_mut() {
        terraform.azure_remote_state = Some(common::azure_remote_state());
    }

    assert!(message(validate(&config)).contains("while cloud is set to 'aws'"));
}

#[test]
fn test_azure_without_remote_state_fails() {
    let mut config = azure_config();
    config.general.terraform_config = None;

    assert_eq!(message(validate(&config)), "Missing azure_remote_state configuration");
}

#[test]
fn test_sentry_rules() {
    let cases = [
        (Some("dsn"), Some("token"), None, None, false),
        (None, None, None, None, false),
        (None, Some("token"), None, None, false),
        (None, Some("token"), None, Some("acme"), true),
        (None, Some("token"), Some("shop"), None, true),
        (Some("dsn"), None, None, None, true),
    ];

    for (dsn, auth_token, project, organization, valid) in cases {
        let mut config = aws_config();
        config.general.sentry = Some(SentryConfig {
            dsn: dsn.map(Into::into),
            auth_token: auth_token.map(Into::into),
            project: project.map(Into::into),
            organization: organization.map(Into::into),
        });

        assert_eq!(
            validate(&config).is_ok(),
            valid,
            "dsn={dsn:?} auth_token={auth_token:?} project={project:?}"
        );
    }
}

#[test]
fn test_aws_site_without_aws_config_fails() {
    let mut config = aws_config();
    config.sites[0].identifier = "de-shop".into();
    config.sites[0].aws = None;

    assert_eq!(message(validate(&config)), "Site de-shop is missing an aws configuration");
}

#[test]
fn test_endpoint_suffix_round_trip() {
    let mut config = aws_config();
    config.sites[0].endpoints = vec![endpoint("main", &format!("api.{ZONE}"))];
    assert!(validate(&config).is_ok());

    config.sites[0].aws = Some(AwsConfig {
        route53_zone_name: Some("example.org".into()),
        ..Default::default()
    });
    assert!(message(validate(&config)).starts_with("No match between endpoint main"));
}

#[test]
fn test_azure_default_and_missing_endpoints() {
    let mut config = azure_config();
    let mut api = component("api");
    api.endpoint = Some("default".into());
    deploy(&mut config, api);
    assert!(validate(&config).is_ok());

    let mut checkout = component("checkout");
    checkout.endpoint = Some("checkout".into());
    deploy(&mut config, checkout);
    let err = message(validate(&config));
    assert!(err.contains("Missing required endpoints checkout"), "{err}");
}

#[test]
fn test_store_keys() {
    let mut config = aws_config();

    config.sites[0].commercetools = Some(stores(&["ab"]));
    assert!(validate(&config).is_ok());

    config.sites[0].commercetools = Some(stores(&["a"]));
    assert!(message(validate(&config)).contains("minimum two characters"));

    config.sites[0].commercetools = Some(stores(&["ab", "ab"]));
    assert_eq!(message(validate(&config)), "Store key ab must be unique.");

    config.sites[0].commercetools = Some(stores(&["ab!"]));
    assert!(message(validate(&config)).contains("may only contain"));
}

#[test]
fn test_health_check_path() {
    let mut config = aws_config();
    let mut api = component("api");
    api.health_check_path = Some("status".into());
    deploy(&mut config, api);
    assert!(message(validate(&config)).contains("health check status"));

    config.sites[0].components[0].health_check_path = Some("/status".into());
    assert!(validate(&config).is_ok());
}

#[test]
fn test_unknown_store_variable() {
    let mut config = aws_config();
    config.sites[0].commercetools = Some(stores(&["main"]));
    let mut api = component("api");
    api.store_variables
        .insert("unknown_store".into(), serde_json::json!("x"));
    deploy(&mut config, api);

    assert!(message(validate(&config)).contains("unknown_store"));
}

#[test]
fn test_azure_short_name_length() {
    for (short_name, integrations, valid) in [
        ("abcdefghijk", vec!["azure"], false),
        ("abcdefghij", vec!["azure"], true),
        ("abcdefghijk", vec!["sentry"], true),
    ] {
        let mut config = azure_config();
        let mut api = component("api");
        api.short_name = Some(short_name.into());
        api.integrations = integrations.into_iter().map(String::from).collect();
        deploy(&mut config, api);

        assert_eq!(validate(&config).is_ok(), valid, "short_name={short_name}");
    }
}

#[derive(Default)]
struct Recorder(Mutex<Vec<(String, String)>>);

impl Notifier for Recorder {
    fn warn(&self, title: &str, details: &str) {
        self.0.lock().unwrap().push((title.into(), details.into()));
    }
}

#[test]
fn test_provider_versions_advisory_does_not_fail() {
    let mut config = aws_config();
    if let Some(terraform) = config.general.terraform_config.as_mut() {
        terraform.providers.insert("aws".into(), "3.74.1".into());
    }

    let recorder = Recorder::default();
    assert!(validate_with(&config, &recorder).is_ok());

    let notices = recorder.0.lock().unwrap();
    assert_eq!(notices.len(), 1);
    assert!(notices[0].1.contains("custom Terraform provider versions"));
}

#[test]
fn test_component_resolution_is_left_to_the_loader() {
    let mut config = aws_config();
    config.components.push(component("api"));
    config.components.push(component("api"));
    config.sites[0].components.push(component("payment"));

    assert!(validate(&config).is_ok());
}
