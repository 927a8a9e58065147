//! Group events: an account or organization a user belongs to

use super::{first, first_date, first_text};
use crate::facade::{apply_aliases, base_member, producer, Aliases, Facade, Message, Producer};
use crate::types::{EventType, FacadeOptions};
use crate::validate;
use crate::value::{Map, Value};
use chrono::{DateTime, Utc};
use std::borrow::Cow;

/// Association of a user with a group
#[derive(Debug, Clone)]
pub struct Group(Facade);

impl Group {
    pub fn new(payload: impl Into<Value>) -> Self {
        Self(Facade::new(payload))
    }

    pub fn with_options(payload: impl Into<Value>, opts: FacadeOptions) -> Self {
        Self(Facade::with_options(payload, opts))
    }

    pub fn created(&self) -> Option<DateTime<Utc>> {
        first_date(
            self,
            &[
                "traits.createdAt",
                "traits.created",
                "properties.createdAt",
                "properties.created",
            ],
        )
    }

    /// `traits.email`, else the group id when it is an email address
    pub fn email(&self) -> Option<String> {
        first_text(self, &["traits.email"])
            .or_else(|| validate::email_value(self.group_id().as_ref()))
    }

    pub fn name(&self) -> Option<Value> {
        first(self, &["traits.name"])
    }

    pub fn industry(&self) -> Option<Value> {
        first(self, &["traits.industry"])
    }

    pub fn employees(&self) -> Option<Value> {
        first(self, &["traits.employees"])
    }
}

impl Message for Group {
    fn facade(&self) -> &Facade {
        &self.0
    }

    fn event_type(&self) -> Option<EventType> {
        Some(EventType::Group)
    }

    fn member(&self, name: &str) -> Option<Producer<'_>> {
        match name {
            "traits" => producer(move || Some(self.traits(&[]).into())),
            "properties" => producer(move || Some(self.properties(&[]).into())),
            "created" => producer(move || self.created().map(Value::from)),
            "email" => producer(move || self.email().map(Value::from)),
            "name" => producer(move || self.name()),
            "industry" => producer(move || self.industry()),
            "employees" => producer(move || self.employees()),
            _ => base_member(self, name),
        }
    }

    /// The group's own id, stored at the top level
    fn group_id(&self) -> Option<Value> {
        self.field("groupId").map(Cow::into_owned)
    }

    /// `traits`, else `properties`
    fn properties(&self, aliases: &Aliases) -> Map {
        let ret = ["traits", "properties"]
            .into_iter()
            .find_map(|name| self.field(name).and_then(|v| v.into_owned().into_object()))
            .unwrap_or_default();
        apply_aliases(self, ret, "properties", aliases)
    }

    /// Group traits, with the group id mixed in as `id`
    fn traits(&self, aliases: &Aliases) -> Map {
        let mut ret = self.properties(&[]);
        if let Some(id) = self.group_id().filter(Value::is_truthy) {
            ret.insert("id".to_string(), id);
        }
        apply_aliases(self, ret, "traits", aliases)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn group(value: serde_json::Value) -> Group {
        Group::new(value)
    }

    fn sample() -> Group {
        group(json!({
            "userId": "1",
            "sessionId": "2",
            "groupId": "1",
            "traits": {"trait": true}
        }))
    }

    #[test]
    fn test_type_and_ids() {
        let g = sample();
        assert_eq!(g.event_type(), Some(EventType::Group));
        assert_eq!(g.json()["type"], json!("group"));
        assert_eq!(g.group_id().unwrap(), json!("1"));
        assert_eq!(g.user_id().unwrap(), json!("1"));
        assert_eq!(g.session_id().unwrap(), json!("2"));
    }

    #[test]
    fn test_group_id_ignores_options() {
        let g = group(json!({"context": {"groupId": "from-context"}}));
        assert!(g.group_id().is_none());
    }

    #[test]
    fn test_traits() {
        assert_eq!(
            Value::from(sample().traits(&[])),
            json!({"trait": true, "id": "1"})
        );
        assert!(group(json!({})).traits(&[]).is_empty());
    }

    #[test]
    fn test_traits_aliases() {
        let g = group(json!({"traits": {"a": 1, "b": 2}}));
        assert_eq!(
            Value::from(g.traits(&[("a", "1")])),
            json!({"1": 1, "b": 2})
        );
    }

    #[test]
    fn test_properties() {
        assert_eq!(Value::from(sample().properties(&[])), json!({"trait": true}));
        assert_eq!(
            Value::from(group(json!({"properties": {"prop": true}})).properties(&[])),
            json!({"prop": true})
        );
        assert!(group(json!({"properties": {}})).properties(&[]).is_empty());
    }

    #[test]
    fn test_created() {
        let iso = "2013-07-18T23:58:38.555Z";
        for payload in [
            json!({"traits": {"created": iso}}),
            json!({"traits": {"createdAt": iso}}),
            json!({"properties": {"created": iso}}),
        ] {
            assert_eq!(
                group(payload).created().unwrap().timestamp_millis(),
                1_374_191_918_555
            );
        }
        assert!(group(json!({"properties": {}})).created().is_none());
    }

    #[test]
    fn test_simple_traits() {
        let g = group(json!({"traits": {"employees": 50, "industry": "tech", "name": "tech"}}));
        assert_eq!(g.employees().unwrap(), json!(50));
        assert_eq!(g.industry().unwrap(), json!("tech"));
        assert_eq!(g.name().unwrap(), json!("tech"));
    }

    #[test]
    fn test_email() {
        assert_eq!(
            group(json!({"traits": {"email": "email@example.com"}}))
                .email()
                .as_deref(),
            Some("email@example.com")
        );
        assert_eq!(
            group(json!({"groupId": "email@example.com"})).email().as_deref(),
            Some("email@example.com")
        );
        assert!(group(json!({"groupId": 23})).email().is_none());
    }
}
