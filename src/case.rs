//! Case-insensitive field matching
//!
//! Payloads arrive with whatever casing the client library picked
//! (`user_id`, `userId`, `USER_ID`, `User Id`, ...). Keys are located by
//! trying, in order:
//!
//! 1. the exact key
//! 2. each casing convention in [`CONVENTIONS`]
//! 3. a normalized comparison that drops everything but `[A-Za-z0-9.]`
//!    and lowercases (`hub_spot` finds `HubSpot`)
//!
//! Dotted paths resolve one segment at a time. When a segment misses, or
//! leads to something that is not an object, the following segments are
//! joined back with `.` so keys that themselves contain dots (`Customer.io`)
//! still resolve.

use crate::value::{Map, Value};

/// A casing convention applied to a key before lookup
pub type Convention = fn(&str) -> String;

/// Casing conventions, in the order they are tried
pub const CONVENTIONS: [Convention; 6] = [
    snake_case,
    constant_case,
    dash_case,
    camel_case,
    human_case,
    title_case,
];

/// Split an identifier into words
///
/// Splits on any non-alphanumeric character, on lower/digit to upper
/// transitions, and before the last capital of an acronym (`HTTPServer`
/// becomes `HTTP`, `Server`).
pub fn words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    for chunk in input
        .split(|c: char| !c.is_alphanumeric())
        .filter(|c| !c.is_empty())
    {
        let chars: Vec<char> = chunk.chars().collect();
        let mut current = String::new();
        for (i, &c) in chars.iter().enumerate() {
            if i > 0 && c.is_uppercase() {
                let prev = chars[i - 1];
                let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
                if prev.is_lowercase() || prev.is_numeric() || (prev.is_uppercase() && next_lower)
                {
                    words.push(std::mem::take(&mut current));
                }
            }
            current.push(c);
        }
        if !current.is_empty() {
            words.push(current);
        }
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

pub fn snake_case(input: &str) -> String {
    words(input)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

pub fn constant_case(input: &str) -> String {
    words(input)
        .iter()
        .map(|w| w.to_uppercase())
        .collect::<Vec<_>>()
        .join("_")
}

pub fn dash_case(input: &str) -> String {
    words(input)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

pub fn camel_case(input: &str) -> String {
    words(input)
        .iter()
        .enumerate()
        .map(|(i, w)| if i == 0 { w.to_lowercase() } else { capitalize(w) })
        .collect()
}

pub fn human_case(input: &str) -> String {
    words(input)
        .iter()
        .enumerate()
        .map(|(i, w)| if i == 0 { capitalize(w) } else { w.to_lowercase() })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn title_case(input: &str) -> String {
    words(input)
        .iter()
        .map(|w| capitalize(w))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lowercase and strip everything but ASCII alphanumerics and dots
pub fn normalize(key: &str) -> String {
    key.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '.')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Locate `key` in `map`, tolerating casing differences
pub fn find<'m>(map: &'m Map, key: &str) -> Option<&'m Value> {
    if let Some(value) = map.get(key) {
        return Some(value);
    }

    for convert in CONVENTIONS {
        let candidate = convert(key);
        if candidate != key {
            if let Some(value) = map.get(&candidate) {
                return Some(value);
            }
        }
    }

    let wanted = normalize(key);
    if wanted.is_empty() {
        return None;
    }
    map.iter()
        .find(|(k, _)| normalize(k) == wanted)
        .map(|(_, v)| v)
}

/// Resolve a dotted path inside `map`
pub fn resolve_in<'v>(map: &'v Map, path: &str) -> Option<&'v Value> {
    let segments: Vec<&str> = path.split('.').collect();
    resolve_segments(map, &segments)
}

/// Shortest key first; a longer dotted key is tried whenever the shorter
/// one misses or leads nowhere
fn resolve_segments<'v>(map: &'v Map, segments: &[&str]) -> Option<&'v Value> {
    (1..=segments.len()).find_map(|n| {
        let value = find(map, &segments[..n].join("."))?;
        if n == segments.len() {
            return Some(value);
        }
        resolve_segments(value.as_object()?, &segments[n..])
    })
}

/// Resolve a dotted path below `root`; an empty path yields `root` itself
pub fn resolve<'v>(root: &'v Value, path: &str) -> Option<&'v Value> {
    if path.is_empty() {
        return Some(root);
    }
    resolve_in(root.as_object()?, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: serde_json::Value) -> Map {
        Value::from(value).into_object().unwrap()
    }

    #[test]
    fn test_words() {
        assert_eq!(words("userId"), vec!["user", "Id"]);
        assert_eq!(words("user_id"), vec!["user", "id"]);
        assert_eq!(words("HTTPServer"), vec!["HTTP", "Server"]);
        assert_eq!(words("Customer.io"), vec!["Customer", "io"]);
        assert_eq!(words("address2Line"), vec!["address2", "Line"]);
    }

    #[test]
    fn test_conventions() {
        assert_eq!(snake_case("firstName"), "first_name");
        assert_eq!(constant_case("firstName"), "FIRST_NAME");
        assert_eq!(dash_case("firstName"), "first-name");
        assert_eq!(camel_case("first_name"), "firstName");
        assert_eq!(human_case("first_name"), "First name");
        assert_eq!(title_case("first_name"), "First Name");
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("hub_spot"), "hubspot");
        assert_eq!(normalize("Customer.io"), "customer.io");
        assert_eq!(normalize("Google Analytics"), "googleanalytics");
    }

    #[test]
    fn test_find_prefers_exact_key() {
        let m = map(json!({"orderId": "camel", "order_id": "snake"}));
        assert_eq!(find(&m, "order_id").unwrap(), &json!("snake"));
        assert_eq!(find(&m, "orderId").unwrap(), &json!("camel"));
    }

    #[test]
    fn test_find_across_conventions() {
        for key in ["first_name", "firstName", "first-name", "FIRST_NAME"] {
            let m = map(json!({ key: "Freddie" }));
            for lookup in ["first_name", "firstName", "first-name", "FIRST_NAME"] {
                assert_eq!(find(&m, lookup).unwrap(), &json!("Freddie"), "{key} via {lookup}");
            }
        }
    }

    #[test]
    fn test_find_normalized_fallback() {
        let m = map(json!({"HubSpot": {"x": 1}}));
        assert_eq!(find(&m, "hub_spot").unwrap(), &json!({"x": 1}));
        assert_eq!(find(&m, "hubspot").unwrap(), &json!({"x": 1}));
        assert!(find(&m, "intercom").is_none());
    }

    #[test]
    fn test_resolve_nested() {
        let v = Value::from(json!({"band": {"meeting": {"present": true}}}));
        assert_eq!(resolve(&v, "band.meeting.present").unwrap(), &json!(true));
        assert_eq!(resolve(&v, "Band.Meeting").unwrap(), &json!({"present": true}));
        assert!(resolve(&v, "band.missing.present").is_none());
        assert!(resolve(&v, "band.meeting.present.deeper").is_none());
    }

    #[test]
    fn test_resolve_dotted_key() {
        let v = Value::from(json!({"options": {"Customer.io": {"setting": true}}}));
        assert_eq!(
            resolve(&v, "options.Customer.io.setting").unwrap(),
            &json!(true)
        );
    }

    #[test]
    fn test_resolve_dotted_key_behind_scalar() {
        let v = Value::from(json!({"options": {"Customer": "x", "Customer.io": {"k": 1}}}));
        assert_eq!(resolve(&v, "options.Customer.io.k").unwrap(), &json!(1));
        assert_eq!(resolve(&v, "options.Customer").unwrap(), &json!("x"));

        let m = map(json!({"a": 1, "a.b": 2}));
        assert_eq!(resolve_in(&m, "a.b").unwrap(), &json!(2));
        assert!(resolve_in(&m, "a.c").is_none());
    }

    #[test]
    fn test_resolve_through_null() {
        let v = Value::from(json!({"context": {"device": null}}));
        assert_eq!(resolve(&v, "context.device").unwrap(), &json!(null));
        assert!(resolve(&v, "context.device.type").is_none());
    }

    #[test]
    fn test_resolve_non_object_root() {
        let v = Value::from("text");
        assert!(resolve(&v, "a").is_none());
        assert_eq!(resolve(&v, "").unwrap(), &json!("text"));
    }
}
