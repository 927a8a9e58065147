//! Delete events: a request to erase a user's data

use crate::facade::{Facade, Message};
use crate::types::{EventType, FacadeOptions};
use crate::value::Value;

/// Erasure request for a user
#[derive(Debug, Clone)]
pub struct Delete(Facade);

impl Delete {
    pub fn new(payload: impl Into<Value>) -> Self {
        Self(Facade::new(payload))
    }

    pub fn with_options(payload: impl Into<Value>, opts: FacadeOptions) -> Self {
        Self(Facade::with_options(payload, opts))
    }
}

impl Message for Delete {
    fn facade(&self) -> &Facade {
        &self.0
    }

    fn event_type(&self) -> Option<EventType> {
        Some(EventType::Delete)
    }
}
