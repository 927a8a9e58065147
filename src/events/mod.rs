//! Concrete event facades
//!
//! Each type wraps a [`Facade`](crate::facade::Facade), fixes its
//! [`EventType`](crate::types::EventType) and adds the accessors specific to
//! that kind of event. Computed accessors are also registered through
//! [`Message::member`] so that dotted `proxy` paths and alias maps can
//! address them by their camelCase name.

pub mod alias;
pub mod delete;
pub mod group;
pub mod identify;
pub mod page;
pub mod screen;
pub mod track;

pub use alias::Alias;
pub use delete::Delete;
pub use group::Group;
pub use identify::Identify;
pub use page::Page;
pub use screen::Screen;
pub use track::Track;

use crate::date;
use crate::facade::{text, Message};
use crate::value::Value;
use chrono::{DateTime, Utc};
use std::borrow::Cow;

/// Proxy `path`, keeping the result only when it is truthy
pub(crate) fn truthy<M: Message + ?Sized>(msg: &M, path: &str) -> Option<Value> {
    msg.proxy(path)
        .filter(|v| v.is_truthy())
        .map(Cow::into_owned)
}

/// First truthy value among `paths`
pub(crate) fn first<M: Message + ?Sized>(msg: &M, paths: &[&str]) -> Option<Value> {
    paths.iter().find_map(|path| truthy(msg, path))
}

/// First non-empty string among `paths`
pub(crate) fn first_text<M: Message + ?Sized>(msg: &M, paths: &[&str]) -> Option<String> {
    paths
        .iter()
        .find_map(|path| text(msg.proxy(path)).filter(|s| !s.is_empty()))
}

/// First truthy value among `paths`, coerced to a date
pub(crate) fn first_date<M: Message + ?Sized>(msg: &M, paths: &[&str]) -> Option<DateTime<Utc>> {
    first(msg, paths).and_then(|v| date::to_date(&v))
}

/// Referring URL for page-like and track events
pub(crate) fn referrer<M: Message + ?Sized>(msg: &M) -> Option<String> {
    first_text(
        msg,
        &[
            "context.referrer.url",
            "context.page.referrer",
            "properties.referrer",
        ],
    )
}
