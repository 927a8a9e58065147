//! Email validation used by the `email()` accessors

use crate::value::Value;
use regex::Regex;
use std::sync::OnceLock;

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"^[^\s@"(),:;<>\[\]\\]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)+$"#)
            .unwrap()
    })
}

/// Whether `s` is shaped like an email address
pub fn is_email(s: &str) -> bool {
    email_regex().is_match(s)
}

/// The value as a string, if it is a string holding an email address
pub(crate) fn email_value(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| is_email(s))
        .map(str::to_string)
}
