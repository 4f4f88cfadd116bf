//! Commerce backend (commercetools) store rules.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::schema::{CommercetoolsSettings, SiteConfig};

use super::ValidationResult;

static STORE_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w_-]*$").expect("store key pattern is valid"));

pub fn validate_commercetools(site: &SiteConfig) -> ValidationResult {
    match &site.commercetools {
        Some(settings) => validate_store_keys(settings),
        None => Ok(()),
    }
}

/// Check every store key in declaration order: minimum length, uniqueness,
/// then character class. The first failing check of the first failing key
/// is reported.
pub fn validate_store_keys(settings: &CommercetoolsSettings) -> ValidationResult {
    let mut counts: HashMap<&str, usize> = HashMap::with_capacity(settings.stores.len());
    for store in &settings.stores {
        *counts.entry(store.key.as_str()).or_default() += 1;
    }

    for store in &settings.stores {
        let key = store.key.as_str();
        if key.chars().count() < 2 {
            invalid!("Store key {key} should be minimum two characters.");
        }
        if counts.get(key) != Some(&1) {
            invalid!("Store key {key} must be unique.");
        }
        if !STORE_KEY_RE.is_match(key) {
            invalid!("Store key {key} may only contain alphanumeric characters, underscores or hyphens");
        }
    }

    Ok(())
}
