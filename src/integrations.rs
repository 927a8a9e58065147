//! Integration enablement rules
//!
//! Every event can switch individual downstream integrations on or off.
//! Settings may live in three places for historical reasons: the
//! `integrations` map, the legacy `providers` map inside the options, and
//! flat keys inside the options themselves. [`resolve`] applies them in a
//! fixed precedence order on top of a per-integration default.

use crate::value::{Map, Value};

/// Integrations that stay off unless explicitly enabled
pub const DISABLED_BY_DEFAULT: &[&str] = &["Salesforce"];

/// Whether `integration` is on when nothing says otherwise
pub fn enabled_by_default(integration: &str) -> bool {
    !DISABLED_BY_DEFAULT.contains(&integration)
}

/// Decide whether `integration` is enabled
///
/// - `all` is the first boolean kill switch found, if any; it is combined
///   with the integration's default
/// - an entry for the integration under `settings.providers` overrides that
/// - an entry directly under `settings` has the last word: a bool is taken
///   as is, any other value (a settings object) means enabled
pub fn resolve(integration: &str, all: Option<bool>, settings: &Map) -> bool {
    let mut enabled = all.unwrap_or(true) && enabled_by_default(integration);

    if let Some(Value::Object(providers)) = settings.get("providers") {
        if let Some(value) = providers.get(integration) {
            enabled = value.is_truthy();
        }
    }

    if let Some(value) = settings.get(integration) {
        enabled = match value {
            Value::Bool(b) => *b,
            _ => true,
        };
    }

    enabled
}
