//! Postal address lookup shared by every facade
//!
//! Address parts may be nested under an `address` object or flat, and may
//! sit in the traits or the properties of an event. Sources are searched in
//! this order, first truthy hit wins:
//!
//! 1. `traits.address.<field>`
//! 2. `traits.<field>`
//! 3. `properties.address.<field>`
//! 4. `properties.<field>`
//!
//! An optional alias (`postalCode` for `zip`) is tried right after the field
//! name at each of those locations.

use crate::case;
use crate::value::{Map, Value};

/// Find an address part in `traits`, then `properties`
pub fn lookup(traits: &Map, properties: &Map, field: &str, alias: Option<&str>) -> Option<Value> {
    let names: Vec<&str> = std::iter::once(field).chain(alias).collect();

    for source in [traits, properties] {
        for prefix in ["address.", ""] {
            for name in &names {
                let hit = case::resolve_in(source, &format!("{prefix}{name}"))
                    .filter(|v| v.is_truthy());
                if let Some(value) = hit {
                    return Some(value.clone());
                }
            }
        }
    }
    None
}
