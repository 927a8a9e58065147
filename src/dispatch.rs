//! Dispatch a raw message to the facade for its event type

use crate::error::{FacadeError, Result};
use crate::events::{Alias, Delete, Group, Identify, Page, Screen, Track};
use crate::facade::{Aliases, Facade, Message, Producer};
use crate::types::{EventType, FacadeOptions};
use crate::value::{Map, Value};
use serde::{Serialize, Serializer};

/// A facade of any event type
#[derive(Debug, Clone)]
pub enum EventFacade {
    Alias(Alias),
    Delete(Delete),
    Group(Group),
    Identify(Identify),
    Page(Page),
    Screen(Screen),
    Track(Track),
}

impl EventFacade {
    /// Wrap `payload` in the facade for `event_type`
    pub fn new(event_type: EventType, payload: impl Into<Value>, opts: FacadeOptions) -> Self {
        match event_type {
            EventType::Alias => Self::Alias(Alias::with_options(payload, opts)),
            EventType::Delete => Self::Delete(Delete::with_options(payload, opts)),
            EventType::Group => Self::Group(Group::with_options(payload, opts)),
            EventType::Identify => Self::Identify(Identify::with_options(payload, opts)),
            EventType::Page => Self::Page(Page::with_options(payload, opts)),
            EventType::Screen => Self::Screen(Screen::with_options(payload, opts)),
            EventType::Track => Self::Track(Track::with_options(payload, opts)),
        }
    }

    fn inner(&self) -> &dyn Message {
        match self {
            Self::Alias(m) => m,
            Self::Delete(m) => m,
            Self::Group(m) => m,
            Self::Identify(m) => m,
            Self::Page(m) => m,
            Self::Screen(m) => m,
            Self::Track(m) => m,
        }
    }
}

impl Message for EventFacade {
    fn facade(&self) -> &Facade {
        self.inner().facade()
    }

    fn event_type(&self) -> Option<EventType> {
        self.inner().event_type()
    }

    fn member(&self, name: &str) -> Option<Producer<'_>> {
        self.inner().member(name)
    }

    fn traits(&self, aliases: &Aliases) -> Map {
        self.inner().traits(aliases)
    }

    fn properties(&self, aliases: &Aliases) -> Map {
        self.inner().properties(aliases)
    }

    fn user_id(&self) -> Option<Value> {
        self.inner().user_id()
    }

    fn group_id(&self) -> Option<Value> {
        self.inner().group_id()
    }
}

impl Serialize for EventFacade {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        Value::from(self.json()).serialize(serializer)
    }
}

/// Conversion into an [`EventFacade`]
///
/// Raw payloads are dispatched on their `type` (or legacy `action`) field.
/// Facades pass through untouched, ignoring the options.
pub trait IntoFacade {
    fn into_facade(self, opts: FacadeOptions) -> Result<EventFacade>;
}

impl IntoFacade for Value {
    fn into_facade(self, opts: FacadeOptions) -> Result<EventFacade> {
        let event_type = declared_type(&self)?;
        Ok(EventFacade::new(event_type, self, opts))
    }
}

impl IntoFacade for serde_json::Value {
    fn into_facade(self, opts: FacadeOptions) -> Result<EventFacade> {
        Value::from(self).into_facade(opts)
    }
}

impl IntoFacade for EventFacade {
    fn into_facade(self, _opts: FacadeOptions) -> Result<EventFacade> {
        Ok(self)
    }
}

macro_rules! event_facade_variant {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for EventFacade {
                fn from(facade: $variant) -> Self {
                    Self::$variant(facade)
                }
            }

            impl IntoFacade for $variant {
                fn into_facade(self, _opts: FacadeOptions) -> Result<EventFacade> {
                    Ok(self.into())
                }
            }
        )*
    };
}

event_facade_variant!(Alias, Delete, Group, Identify, Page, Screen, Track);

/// The event type a raw message declares
fn declared_type(message: &Value) -> Result<EventType> {
    let declared = message.as_object().and_then(|obj| {
        ["type", "action"]
            .into_iter()
            .find_map(|key| obj.get(key).filter(|v| v.is_truthy()))
    });

    match declared {
        None => Err(FacadeError::MissingType),
        Some(Value::String(s)) => s.parse(),
        Some(other) => Err(FacadeError::UnknownType(
            serde_json::Value::from(other.clone()).to_string(),
        )),
    }
}

/// Wrap a message in the facade for its event type, with default options
pub fn to_facade(message: impl IntoFacade) -> Result<EventFacade> {
    to_facade_with(message, FacadeOptions::default())
}

/// Wrap a message in the facade for its event type
pub fn to_facade_with(message: impl IntoFacade, opts: FacadeOptions) -> Result<EventFacade> {
    match message.into_facade(opts) {
        Ok(facade) => {
            tracing::debug!(event_type = ?facade.event_type(), "Message dispatched");
            Ok(facade)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Message dispatch failed");
            Err(e)
        }
    }
}
