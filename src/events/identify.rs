//! Identify events: who a user is

use super::{first, first_date, first_text, truthy};
use crate::facade::{
    apply_aliases, base_member, object_field, producer, text, Aliases, Facade, Message, Producer,
};
use crate::types::{EventType, FacadeOptions};
use crate::validate;
use crate::value::{Map, Value};
use chrono::{DateTime, Datelike, Utc};
use std::borrow::Cow;

/// Traits describing a user
#[derive(Debug, Clone)]
pub struct Identify(Facade);

impl Identify {
    pub fn new(payload: impl Into<Value>) -> Self {
        Self(Facade::new(payload))
    }

    pub fn with_options(payload: impl Into<Value>, opts: FacadeOptions) -> Self {
        Self(Facade::with_options(payload, opts))
    }

    fn trait_text(&self, name: &str) -> Option<String> {
        text(self.proxy(&format!("traits.{name}")))
    }

    /// `traits.email`, else the user id when it is an email address
    pub fn email(&self) -> Option<String> {
        first_text(self, &["traits.email"])
            .or_else(|| validate::email_value(self.user_id().as_ref()))
    }

    pub fn created(&self) -> Option<DateTime<Utc>> {
        first_date(self, &["traits.created", "traits.createdAt"])
    }

    pub fn company_created(&self) -> Option<DateTime<Utc>> {
        first_date(
            self,
            &["traits.company.created", "traits.company.createdAt"],
        )
    }

    pub fn company_name(&self) -> Option<String> {
        self.trait_text("company.name")
    }

    /// Full name, composed from first and last name when not given
    pub fn name(&self) -> Option<String> {
        if let Some(name) = self.trait_text("name") {
            let name = name.trim();
            if !name.is_empty() {
                return Some(name.to_string());
            }
        }
        let first = self.first_name()?;
        let last = self.last_name()?;
        Some(format!("{first} {last}").trim().to_string())
    }

    /// `traits.firstName`, else the first word of `traits.name`
    pub fn first_name(&self) -> Option<String> {
        if let Some(first) = self.trait_text("firstName") {
            return Some(first.trim().to_string()).filter(|s| !s.is_empty());
        }
        let name = self.trait_text("name")?;
        name.trim()
            .split(' ')
            .next()
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    /// `traits.lastName`, else everything after the first space of `traits.name`
    pub fn last_name(&self) -> Option<String> {
        if let Some(last) = self.trait_text("lastName") {
            return Some(last.trim().to_string()).filter(|s| !s.is_empty());
        }
        let name = self.trait_text("name")?;
        let (_, rest) = name.trim().split_once(' ')?;
        Some(rest.trim().to_string())
    }

    /// Best unique identifier: user id, username, then email
    pub fn uid(&self) -> Option<Value> {
        self.user_id()
            .filter(Value::is_truthy)
            .or_else(|| self.username().map(Value::from))
            .or_else(|| self.email().map(Value::from))
    }

    pub fn username(&self) -> Option<String> {
        first_text(self, &["traits.username"])
    }

    pub fn description(&self) -> Option<Value> {
        first(self, &["traits.description", "traits.background"])
    }

    /// `traits.age`, else derived from a birthday date
    pub fn age(&self) -> Option<Value> {
        if let Some(age) = truthy(self, "traits.age") {
            return Some(age);
        }
        let birthday = self.birthday()?.as_date()?;
        Some(Value::from(i64::from(Utc::now().year() - birthday.year())))
    }

    pub fn avatar(&self) -> Option<Value> {
        first(
            self,
            &["traits.avatar", "traits.photoUrl", "traits.avatarUrl"],
        )
    }

    pub fn position(&self) -> Option<Value> {
        first(self, &["traits.position", "traits.jobTitle"])
    }

    pub fn website(&self) -> Option<Value> {
        self.one("traits.website")
    }

    pub fn websites(&self) -> Vec<Value> {
        self.multi("traits.website")
    }

    pub fn phone(&self) -> Option<Value> {
        self.one("traits.phone")
    }

    pub fn phones(&self) -> Vec<Value> {
        self.multi("traits.phone")
    }

    pub fn address(&self) -> Option<Value> {
        self.proxy("traits.address").map(Cow::into_owned)
    }

    pub fn gender(&self) -> Option<String> {
        self.trait_text("gender")
    }

    pub fn birthday(&self) -> Option<Value> {
        self.proxy("traits.birthday").map(Cow::into_owned)
    }
}

impl Message for Identify {
    fn facade(&self) -> &Facade {
        &self.0
    }

    fn event_type(&self) -> Option<EventType> {
        Some(EventType::Identify)
    }

    fn member(&self, name: &str) -> Option<Producer<'_>> {
        match name {
            "traits" => producer(move || Some(self.traits(&[]).into())),
            "email" => producer(move || self.email().map(Value::from)),
            "created" => producer(move || self.created().map(Value::from)),
            "companyCreated" => producer(move || self.company_created().map(Value::from)),
            "companyName" => producer(move || self.company_name().map(Value::from)),
            "name" => producer(move || self.name().map(Value::from)),
            "firstName" => producer(move || self.first_name().map(Value::from)),
            "lastName" => producer(move || self.last_name().map(Value::from)),
            "uid" => producer(move || self.uid()),
            "username" => producer(move || self.username().map(Value::from)),
            "description" => producer(move || self.description()),
            "age" => producer(move || self.age()),
            "avatar" => producer(move || self.avatar()),
            "position" => producer(move || self.position()),
            "website" => producer(move || self.website()),
            "websites" => producer(move || Some(self.websites().into())),
            "phone" => producer(move || self.phone()),
            "phones" => producer(move || Some(self.phones().into())),
            "address" => producer(move || self.address()),
            "gender" => producer(move || self.gender().map(Value::from)),
            "birthday" => producer(move || self.birthday()),
            _ => base_member(self, name),
        }
    }

    /// `traits`, with the user id mixed in as `id`
    fn traits(&self, aliases: &Aliases) -> Map {
        let mut ret = object_field(self, "traits");
        if let Some(id) = self.user_id().filter(Value::is_truthy) {
            ret.insert("id".to_string(), id);
        }
        apply_aliases(self, ret, "traits", aliases)
    }
}
