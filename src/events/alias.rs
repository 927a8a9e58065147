//! Alias events: two identities belong to the same user

use crate::facade::{base_member, producer, Facade, Message, Producer};
use crate::types::{EventType, FacadeOptions};
use crate::value::Value;
use std::borrow::Cow;

/// Merge of a previous identity into a new one
#[derive(Debug, Clone)]
pub struct Alias(Facade);

impl Alias {
    pub fn new(payload: impl Into<Value>) -> Self {
        Self(Facade::new(payload))
    }

    pub fn with_options(payload: impl Into<Value>, opts: FacadeOptions) -> Self {
        Self(Facade::with_options(payload, opts))
    }

    fn either(&self, preferred: &str, fallback: &str) -> Option<Value> {
        self.field(preferred)
            .filter(|v| v.is_truthy())
            .or_else(|| self.field(fallback))
            .map(Cow::into_owned)
    }

    /// The previous identity: `previousId`, else `from`
    pub fn from(&self) -> Option<Value> {
        self.either("previousId", "from")
    }

    pub fn previous_id(&self) -> Option<Value> {
        self.from()
    }

    /// The new identity: `userId`, else `to`
    pub fn to(&self) -> Option<Value> {
        self.either("userId", "to")
    }
}

impl Message for Alias {
    fn facade(&self) -> &Facade {
        &self.0
    }

    fn event_type(&self) -> Option<EventType> {
        Some(EventType::Alias)
    }

    fn member(&self, name: &str) -> Option<Producer<'_>> {
        match name {
            "from" | "previousId" => producer(move || self.from()),
            "to" => producer(move || self.to()),
            _ => base_member(self, name),
        }
    }

    fn user_id(&self) -> Option<Value> {
        self.to()
    }
}
