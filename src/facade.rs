//! Facade core: the resolution engine shared by every event type
//!
//! A [`Facade`] owns a normalized copy of one event payload. The [`Message`]
//! trait layers the accessor surface on top of it:
//!
//! - [`Message::field`]: exact, shallow property fetch
//! - [`Message::proxy`]: dotted, case-insensitive path resolution where the
//!   first segment may name a computed accessor instead of a stored field
//! - [`Message::multi`] / [`Message::one`]: "one item or a list" lookups
//!
//! Concrete event facades (see [`crate::events`]) wrap a `Facade`, implement
//! [`Message::facade`] and expose their computed accessors to `proxy` through
//! [`Message::member`].

use crate::address;
use crate::case;
use crate::date;
use crate::integrations;
use crate::types::{EventType, FacadeOptions, Library};
use crate::value::{Map, Value};
use chrono::{DateTime, Utc};
use std::borrow::Cow;

/// A zero-argument computation yielding a value
pub type Producer<'a> = Box<dyn FnOnce() -> Option<Value> + 'a>;

/// What the first segment of a `proxy` path resolves to
pub enum Slot<'a> {
    /// A computed accessor of the facade
    Producer(Producer<'a>),
    /// A field stored in the payload
    Field(&'a Value),
}

/// Box a closure as a [`Producer`]
pub fn producer<'a>(f: impl FnOnce() -> Option<Value> + 'a) -> Option<Producer<'a>> {
    Some(Box::new(f))
}

/// Alias pairs `(from, to)` applied by `traits` and `properties`
pub type Aliases<'a> = [(&'a str, &'a str)];

/// Normalized storage for one event payload
#[derive(Debug, Clone)]
pub struct Facade {
    obj: Map,
    raw: Value,
    opts: FacadeOptions,
}

impl Facade {
    /// Wrap a payload with default options
    pub fn new(payload: impl Into<Value>) -> Self {
        Self::with_options(payload, FacadeOptions::default())
    }

    /// Wrap a payload
    ///
    /// The input is kept verbatim for [`Message::raw_event`]. The stored copy
    /// gets a `timestamp` (now, when absent; otherwise coerced to a date) and,
    /// with `traverse` set, has every ISO-8601 string turned into a date.
    /// Anything other than an object is stored as an empty object.
    pub fn with_options(payload: impl Into<Value>, opts: FacadeOptions) -> Self {
        let raw = payload.into();
        let mut obj = raw.as_object().cloned().unwrap_or_default();

        let injected = match obj.remove("timestamp") {
            Some(timestamp) => {
                obj.insert("timestamp".to_string(), date::coerce(timestamp));
                false
            }
            None => {
                obj.insert("timestamp".to_string(), Value::Date(Utc::now()));
                true
            }
        };

        if opts.traverse {
            obj.values_mut().for_each(date::traverse);
        }

        tracing::trace!(
            keys = obj.len(),
            timestamp_injected = injected,
            clone = opts.clone,
            traverse = opts.traverse,
            "Facade constructed"
        );

        Self { obj, raw, opts }
    }

    pub fn opts(&self) -> FacadeOptions {
        self.opts
    }

    /// The normalized payload
    pub fn payload(&self) -> &Map {
        &self.obj
    }

    /// The input exactly as supplied
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Stored field by exact key
    pub fn stored(&self, name: &str) -> Option<&Value> {
        self.obj.get(name)
    }

    /// Stored field, tolerating casing differences
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        case::find(&self.obj, name)
    }

    /// Hand a value out according to the `clone` option
    pub fn share<'a>(&self, value: Cow<'a, Value>) -> Cow<'a, Value> {
        match value {
            Cow::Borrowed(v) if self.opts.clone => Cow::Owned(v.clone()),
            other => other,
        }
    }

    /// Date-normalize a computed value when `traverse` is set
    fn prepare(&self, mut value: Value) -> Value {
        if self.opts.traverse {
            date::traverse(&mut value);
        }
        value
    }
}

/// Shared accessor surface of every facade
pub trait Message {
    /// The underlying storage
    fn facade(&self) -> &Facade;

    /// Event type, for typed facades
    fn event_type(&self) -> Option<EventType> {
        None
    }

    /// Computed accessor addressable by its camelCase name from `proxy`
    fn member(&self, name: &str) -> Option<Producer<'_>> {
        base_member(self, name)
    }

    /// First-segment resolution: a computed accessor, else a stored field
    fn slot(&self, name: &str) -> Option<Slot<'_>> {
        if let Some(produce) = self.member(name) {
            return Some(Slot::Producer(produce));
        }
        self.facade().lookup(name).map(Slot::Field)
    }

    /// Exact, shallow property fetch
    fn field(&self, name: &str) -> Option<Cow<'_, Value>> {
        let facade = self.facade();
        facade
            .stored(name)
            .filter(|v| !v.is_null())
            .map(|v| facade.share(Cow::Borrowed(v)))
    }

    /// Resolve a dotted path
    fn proxy(&self, path: &str) -> Option<Cow<'_, Value>> {
        let facade = self.facade();
        let (head, rest) = match path.split_once('.') {
            Some((head, rest)) => (head, Some(rest)),
            None => (path, None),
        };

        let value = match (self.slot(head), rest) {
            (Some(Slot::Producer(produce)), None) => Cow::Owned(facade.prepare(produce()?)),
            (Some(Slot::Producer(produce)), Some(rest)) => {
                let base = produce()
                    .filter(Value::is_truthy)
                    .unwrap_or_else(Value::object);
                Cow::Owned(facade.prepare(case::resolve(&base, rest)?.clone()))
            }
            (Some(Slot::Field(stored)), None) => Cow::Borrowed(stored),
            // stored paths, including top-level keys that contain dots
            (Some(Slot::Field(_)), Some(_)) | (None, _) => {
                Cow::Borrowed(case::resolve_in(facade.payload(), path)?)
            }
        };

        if value.is_null() {
            return None;
        }
        Some(facade.share(value))
    }

    /// `path + "s"` when it is a list, else the singular value as a list
    fn multi(&self, path: &str) -> Vec<Value> {
        if let Some(Value::Array(items)) = self.proxy(&format!("{path}s")).map(Cow::into_owned) {
            return items;
        }
        match self.proxy(path) {
            Some(one) if one.is_truthy() => vec![one.into_owned()],
            _ => Vec::new(),
        }
    }

    /// The singular value, else the first entry of `path + "s"`
    fn one(&self, path: &str) -> Option<Value> {
        if let Some(one) = self.proxy(path).filter(|v| v.is_truthy()) {
            return Some(one.into_owned());
        }
        match self.proxy(&format!("{path}s"))?.into_owned() {
            Value::Array(items) => items.into_iter().next(),
            _ => None,
        }
    }

    /// Copy of the normalized payload, `type` set for typed facades
    fn json(&self) -> Map {
        let mut ret = self.facade().payload().clone();
        if let Some(event_type) = self.event_type() {
            ret.insert("type".to_string(), event_type.as_str().into());
        }
        ret
    }

    /// The input exactly as supplied
    fn raw_event(&self) -> &Value {
        self.facade().raw()
    }

    /// `context`, else `options`, else empty
    fn options(&self) -> Map {
        let obj = self.facade().payload();
        ["context", "options"]
            .into_iter()
            .find_map(|key| obj.get(key).and_then(Value::as_object))
            .cloned()
            .unwrap_or_default()
    }

    fn context(&self) -> Map {
        self.options()
    }

    /// Settings for one integration; `None` when it is disabled
    fn options_for(&self, integration: &str) -> Option<Map> {
        if !self.enabled(integration) {
            return None;
        }
        let settings = case::find(&self.integrations(), integration)
            .and_then(Value::as_object)
            .cloned()
            .or_else(|| {
                case::find(&self.options(), integration)
                    .and_then(Value::as_object)
                    .cloned()
            });
        Some(settings.unwrap_or_default())
    }

    fn context_for(&self, integration: &str) -> Option<Map> {
        self.options_for(integration)
    }

    /// Whether the event should be sent to `integration`
    fn enabled(&self, integration: &str) -> bool {
        let all = ["options.providers.all", "options.all", "integrations.all"]
            .into_iter()
            .find_map(|path| self.proxy(path).and_then(|v| v.as_bool()));
        integrations::resolve(integration, all, &self.integrations())
    }

    /// `integrations`, else `options.providers`, else `options()`
    fn integrations(&self) -> Map {
        if let Some(map) = self.facade().stored("integrations").and_then(Value::as_object) {
            return map.clone();
        }
        self.proxy("options.providers")
            .and_then(|v| v.into_owned().into_object())
            .unwrap_or_else(|| self.options())
    }

    /// `options.active`, `true` when absent
    fn active(&self) -> bool {
        match self.proxy("options.active") {
            Some(v) => v.as_bool().unwrap_or_else(|| v.is_truthy()),
            None => true,
        }
    }

    /// `options.traits`, else the stored `traits` object, plus `id`
    fn traits(&self, aliases: &Aliases) -> Map {
        let options_traits = self
            .proxy("options.traits")
            .and_then(|v| v.into_owned().into_object());
        let (mut ret, scope) = match options_traits {
            Some(map) => (map, "options.traits"),
            None => (object_field(self, "traits"), "traits"),
        };
        if let Some(id) = self.user_id().filter(Value::is_truthy) {
            ret.insert("id".to_string(), id);
        }
        apply_aliases(self, ret, scope, aliases)
    }

    fn properties(&self, aliases: &Aliases) -> Map {
        let ret = object_field(self, "properties");
        apply_aliases(self, ret, "properties", aliases)
    }

    fn user_id(&self) -> Option<Value> {
        self.field("userId").map(Cow::into_owned)
    }

    fn anonymous_id(&self) -> Option<Value> {
        self.field("anonymousId")
            .filter(|v| v.is_truthy())
            .or_else(|| self.field("sessionId"))
            .map(Cow::into_owned)
    }

    fn session_id(&self) -> Option<Value> {
        self.anonymous_id()
    }

    fn group_id(&self) -> Option<Value> {
        self.proxy("options.groupId").map(Cow::into_owned)
    }

    fn channel(&self) -> Option<String> {
        text(self.field("channel"))
    }

    fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.field("timestamp").and_then(|v| v.as_date())
    }

    fn user_agent(&self) -> Option<String> {
        text(self.proxy("context.userAgent"))
    }

    fn ip(&self) -> Option<String> {
        text(self.proxy("context.ip"))
    }

    fn timezone(&self) -> Option<String> {
        text(self.proxy("context.timezone"))
    }

    /// Client library from `options.library`
    fn library(&self) -> Library {
        match self.proxy("options.library").map(Cow::into_owned) {
            Some(Value::String(name)) if !name.is_empty() => Library {
                name,
                version: None,
                extra: Map::new(),
            },
            Some(Value::Object(mut extra)) => {
                let name = match extra.remove("name") {
                    Some(Value::String(name)) => name,
                    _ => "unknown".to_string(),
                };
                let version = extra.remove("version").filter(|v| !v.is_null());
                Library {
                    name,
                    version,
                    extra,
                }
            }
            _ => Library::unknown(),
        }
    }

    /// `context.device`, with `type` inferred from the library when missing
    fn device(&self) -> Map {
        let mut device = object_at(self, "context.device");
        if device.get("type").is_some_and(Value::is_truthy) {
            return device;
        }
        let library = self.library().name;
        if library.contains("ios") {
            device.insert("type".to_string(), "ios".into());
        }
        if library.contains("android") {
            device.insert("type".to_string(), "android".into());
        }
        device
    }

    fn zip(&self) -> Option<Value> {
        address_part(self, "zip", Some("postalCode"))
    }

    fn country(&self) -> Option<Value> {
        address_part(self, "country", None)
    }

    fn street(&self) -> Option<Value> {
        address_part(self, "street", None)
    }

    fn state(&self) -> Option<Value> {
        address_part(self, "state", None)
    }

    fn city(&self) -> Option<Value> {
        address_part(self, "city", None)
    }

    fn region(&self) -> Option<Value> {
        address_part(self, "region", None)
    }
}

impl Message for Facade {
    fn facade(&self) -> &Facade {
        self
    }
}

/// Accessors every facade exposes to `proxy`
pub fn base_member<'a, M: Message + ?Sized>(msg: &'a M, name: &str) -> Option<Producer<'a>> {
    match name {
        "options" | "context" => producer(move || Some(msg.options().into())),
        "integrations" => producer(move || Some(msg.integrations().into())),
        "traits" => producer(move || Some(msg.traits(&[]).into())),
        "userId" => producer(move || msg.user_id()),
        "anonymousId" | "sessionId" => producer(move || msg.anonymous_id()),
        "groupId" => producer(move || msg.group_id()),
        "userAgent" => producer(move || msg.user_agent().map(Value::from)),
        "ip" => producer(move || msg.ip().map(Value::from)),
        "timezone" => producer(move || msg.timezone().map(Value::from)),
        "active" => producer(move || Some(msg.active().into())),
        "library" => producer(move || match msg.proxy("options.library") {
            Some(library) if library.as_object().is_some() => Some(library.into_owned()),
            _ => Some(library_value(msg.library())),
        }),
        "device" => producer(move || Some(msg.device().into())),
        "zip" => producer(move || msg.zip()),
        "country" => producer(move || msg.country()),
        "street" => producer(move || msg.street()),
        "state" => producer(move || msg.state()),
        "city" => producer(move || msg.city()),
        "region" => producer(move || msg.region()),
        "type" | "action" => {
            let event_type = msg.event_type()?;
            producer(move || Some(event_type.as_str().into()))
        }
        _ => None,
    }
}

/// Remap `(from, to)` pairs in `ret`
///
/// The value comes from the facade's `from` accessor when it has one,
/// otherwise from `<scope>.<from>`. Missing values are skipped.
pub fn apply_aliases<M: Message + ?Sized>(
    msg: &M,
    mut ret: Map,
    scope: &str,
    aliases: &Aliases,
) -> Map {
    for &(from, to) in aliases {
        let value = match msg.member(from) {
            Some(produce) => produce(),
            None => msg
                .proxy(&format!("{scope}.{from}"))
                .map(Cow::into_owned),
        };
        let Some(value) = value.filter(|v| !v.is_null()) else {
            continue;
        };
        ret.insert(to.to_string(), value);
        if from != to {
            ret.remove(from);
        }
    }
    ret
}

/// Stored field as an object, empty when missing or not an object
pub(crate) fn object_field<M: Message + ?Sized>(msg: &M, name: &str) -> Map {
    msg.field(name)
        .and_then(|v| v.into_owned().into_object())
        .unwrap_or_default()
}

/// Proxied path as an object, empty when missing or not an object
pub(crate) fn object_at<M: Message + ?Sized>(msg: &M, path: &str) -> Map {
    msg.proxy(path)
        .and_then(|v| v.into_owned().into_object())
        .unwrap_or_default()
}

/// The value as an owned string, when it is one
pub(crate) fn text(value: Option<Cow<'_, Value>>) -> Option<String> {
    match value?.into_owned() {
        Value::String(s) => Some(s),
        _ => None,
    }
}

fn address_part<M: Message + ?Sized>(msg: &M, field: &str, alias: Option<&str>) -> Option<Value> {
    address::lookup(&msg.traits(&[]), &msg.properties(&[]), field, alias)
}

fn library_value(library: Library) -> Value {
    let mut map = library.extra;
    map.insert("name".to_string(), library.name.into());
    map.insert("version".to_string(), library.version.unwrap_or_default());
    map.into()
}
