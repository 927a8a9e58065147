//! Page events: a user viewed a web page

use super::{first, first_text, referrer, Track};
use crate::facade::{
    apply_aliases, base_member, object_field, producer, text, Aliases, Facade, Message, Producer,
};
use crate::types::{EventType, FacadeOptions};
use crate::validate;
use crate::value::{Map, Value};

/// A page view
#[derive(Debug, Clone)]
pub struct Page(Facade);

impl Page {
    pub fn new(payload: impl Into<Value>) -> Self {
        Self(Facade::new(payload))
    }

    pub fn with_options(payload: impl Into<Value>, opts: FacadeOptions) -> Self {
        Self(Facade::with_options(payload, opts))
    }

    pub fn category(&self) -> Option<String> {
        text(self.field("category"))
    }

    pub fn name(&self) -> Option<String> {
        text(self.field("name"))
    }

    pub fn title(&self) -> Option<Value> {
        first(self, &["properties.title"])
    }

    pub fn path(&self) -> Option<Value> {
        first(self, &["properties.path"])
    }

    pub fn url(&self) -> Option<Value> {
        first(self, &["properties.url"])
    }

    pub fn referrer(&self) -> Option<String> {
        referrer(self)
    }

    /// `context.traits.email`, then `properties.email`, then an email user id
    pub fn email(&self) -> Option<String> {
        first_text(self, &["context.traits.email", "properties.email"])
            .or_else(|| validate::email_value(self.user_id().as_ref()))
    }

    /// `"<category> <name>"`, or just the name
    pub fn full_name(&self) -> Option<String> {
        let name = self.name()?;
        match self.category() {
            Some(category) => Some(format!("{category} {name}")),
            None => Some(name),
        }
    }

    /// Track event name for viewing `name`
    pub fn event(&self, name: Option<&str>) -> String {
        event_name(name, "Page")
    }

    /// Convert to a track event named after the view
    pub fn track(&self, name: Option<&str>) -> Track {
        self.to_track(self, event_name(name, "Page"))
    }

    /// Build the track event for `view` (this page, or a screen wrapping it)
    pub(crate) fn to_track<M: Message + ?Sized>(&self, view: &M, event: String) -> Track {
        let mut json = view.json();
        json.insert("type".to_string(), EventType::Track.as_str().into());
        json.insert("event".to_string(), event.into());
        if let Some(timestamp) = view.timestamp() {
            json.insert("timestamp".to_string(), timestamp.into());
        }
        json.insert("properties".to_string(), view.properties(&[]).into());
        Track::with_options(json, self.0.opts())
    }

    /// Accessors shared by pages and screens
    pub(crate) fn view_member<'a, M: Message + ?Sized>(
        &'a self,
        view: &'a M,
        name: &str,
    ) -> Option<Producer<'a>> {
        match name {
            "category" => producer(move || self.category().map(Value::from)),
            "name" => producer(move || self.name().map(Value::from)),
            "title" => producer(move || self.title()),
            "path" => producer(move || self.path()),
            "url" => producer(move || self.url()),
            "referrer" => producer(move || self.referrer().map(Value::from)),
            "email" => producer(move || self.email().map(Value::from)),
            "fullName" => producer(move || self.full_name().map(Value::from)),
            "properties" => producer(move || Some(view.properties(&[]).into())),
            _ => base_member(view, name),
        }
    }

    /// `properties` with `category` and `name` mixed in
    pub(crate) fn view_properties<M: Message + ?Sized>(&self, view: &M, aliases: &Aliases) -> Map {
        let mut ret = object_field(self, "properties");
        if let Some(category) = self.category() {
            ret.insert("category".to_string(), category.into());
        }
        if let Some(name) = self.name() {
            ret.insert("name".to_string(), name.into());
        }
        apply_aliases(view, ret, "properties", aliases)
    }
}

pub(crate) fn event_name(name: Option<&str>, noun: &str) -> String {
    match name.filter(|n| !n.is_empty()) {
        Some(name) => format!("Viewed {name} {noun}"),
        None => format!("Loaded a {noun}"),
    }
}

impl Message for Page {
    fn facade(&self) -> &Facade {
        &self.0
    }

    fn event_type(&self) -> Option<EventType> {
        Some(EventType::Page)
    }

    fn member(&self, name: &str) -> Option<Producer<'_>> {
        self.view_member(self, name)
    }

    fn properties(&self, aliases: &Aliases) -> Map {
        self.view_properties(self, aliases)
    }
}
