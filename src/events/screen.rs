//! Screen events: the mobile counterpart of a page view

use super::page::event_name;
use super::{Page, Track};
use crate::facade::{Aliases, Facade, Message, Producer};
use crate::types::{EventType, FacadeOptions};
use crate::value::{Map, Value};

/// A screen view; behaves like a [`Page`] with "Screen" wording
#[derive(Debug, Clone)]
pub struct Screen(Page);

impl Screen {
    pub fn new(payload: impl Into<Value>) -> Self {
        Self(Page::new(payload))
    }

    pub fn with_options(payload: impl Into<Value>, opts: FacadeOptions) -> Self {
        Self(Page::with_options(payload, opts))
    }

    pub fn category(&self) -> Option<String> {
        self.0.category()
    }

    pub fn name(&self) -> Option<String> {
        self.0.name()
    }

    pub fn title(&self) -> Option<Value> {
        self.0.title()
    }

    pub fn path(&self) -> Option<Value> {
        self.0.path()
    }

    pub fn url(&self) -> Option<Value> {
        self.0.url()
    }

    pub fn referrer(&self) -> Option<String> {
        self.0.referrer()
    }

    pub fn email(&self) -> Option<String> {
        self.0.email()
    }

    pub fn full_name(&self) -> Option<String> {
        self.0.full_name()
    }

    pub fn event(&self, name: Option<&str>) -> String {
        event_name(name, "Screen")
    }

    pub fn track(&self, name: Option<&str>) -> Track {
        self.0.to_track(self, event_name(name, "Screen"))
    }
}

impl Message for Screen {
    fn facade(&self) -> &Facade {
        self.0.facade()
    }

    fn event_type(&self) -> Option<EventType> {
        Some(EventType::Screen)
    }

    fn member(&self, name: &str) -> Option<Producer<'_>> {
        self.0.view_member(self, name)
    }

    fn properties(&self, aliases: &Aliases) -> Map {
        self.0.view_properties(self, aliases)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn screen(value: serde_json::Value) -> Screen {
        Screen::new(value)
    }

    fn sample() -> Screen {
        screen(json!({
            "userId": 2,
            "sessionId": 3,
            "category": "songs",
            "name": "ab frank"
        }))
    }

    #[test]
    fn test_type_and_ids() {
        let s = sample();
        assert_eq!(s.event_type(), Some(EventType::Screen));
        assert_eq!(s.proxy("action").unwrap().as_ref(), &json!("screen"));
        assert_eq!(s.json()["type"], json!("screen"));
        assert_eq!(s.category().as_deref(), Some("songs"));
        assert_eq!(s.name().as_deref(), Some("ab frank"));
        assert_eq!(s.user_id().unwrap(), json!(2));
        assert_eq!(s.session_id().unwrap(), json!(3));
    }

    #[test]
    fn test_properties() {
        assert!(screen(json!({})).properties(&[]).is_empty());
        let s = screen(json!({"properties": {"prop": true}, "category": "category", "name": "name"}));
        assert_eq!(
            Value::from(s.properties(&[])),
            json!({"category": "category", "name": "name", "prop": true})
        );
    }

    #[test]
    fn test_email() {
        let email = "han@segment.com";
        assert_eq!(
            screen(json!({"userId": "x", "properties": {"email": email}}))
                .email()
                .as_deref(),
            Some(email)
        );
        assert_eq!(
            screen(json!({"context": {"traits": {"email": email}}}))
                .email()
                .as_deref(),
            Some(email)
        );
        assert!(screen(json!({})).email().is_none());
    }

    #[test]
    fn test_event_wording() {
        assert_eq!(screen(json!({})).event(Some("baz")), "Viewed baz Screen");
        assert_eq!(screen(json!({})).event(None), "Loaded a Screen");
    }

    #[test]
    fn test_track() {
        let s = screen(json!({
            "anonymousId": "anon-id",
            "userId": "user-id",
            "context": {"ip": "0.0.0.0"},
            "timestamp": "2014-01-01",
            "properties": {"prop": true},
            "category": "category",
            "name": "name"
        }));

        let track = s.track(Some("event"));
        assert_eq!(track.event_type(), Some(EventType::Track));
        assert_eq!(track.anonymous_id().unwrap(), json!("anon-id"));
        assert_eq!(track.user_id().unwrap(), json!("user-id"));
        assert_eq!(track.event().as_deref(), Some("Viewed event Screen"));
        assert_eq!(track.timestamp(), s.timestamp());
        assert_eq!(track.context(), s.context());
        assert_eq!(
            Value::from(track.properties(&[])),
            json!({"category": "category", "name": "name", "prop": true})
        );
        assert_eq!(s.track(None).event().as_deref(), Some("Loaded a Screen"));
    }

    #[test]
    fn test_full_name() {
        assert_eq!(screen(json!({"name": "baz"})).full_name().as_deref(), Some("baz"));
        assert_eq!(
            screen(json!({"category": "cat", "name": "baz"}))
                .full_name()
                .as_deref(),
            Some("cat baz")
        );
    }
}
