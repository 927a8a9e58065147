//! Track events: something a user did

use super::{first, first_text, referrer, Identify};
use crate::facade::{base_member, producer, text, Facade, Message, Producer};
use crate::types::{EventType, FacadeOptions};
use crate::validate;
use crate::value::Value;
use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

fn order_completed_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^[ _]?completed[ _]?order[ _]?|^[ _]?order[ _]?completed[ _]?$").unwrap()
    })
}

fn leading_number_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").unwrap())
}

/// Read a monetary amount
///
/// Numbers pass through. Strings lose every `$` and are read up to the first
/// character that cannot continue a number (`"$10.5 USD"` is `10.5`).
fn amount(value: Option<Cow<'_, Value>>) -> Option<f64> {
    let value = value.filter(|v| v.is_truthy())?;
    match &*value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let cleaned = s.replace('$', "");
            leading_number_regex()
                .find(&cleaned)?
                .as_str()
                .trim()
                .parse()
                .ok()
        }
        _ => None,
    }
}

/// An action performed by a user
#[derive(Debug, Clone)]
pub struct Track(Facade);

impl Track {
    pub fn new(payload: impl Into<Value>) -> Self {
        Self(Facade::new(payload))
    }

    pub fn with_options(payload: impl Into<Value>, opts: FacadeOptions) -> Self {
        Self(Facade::with_options(payload, opts))
    }

    fn prop(&self, name: &str) -> Option<Value> {
        self.proxy(&format!("properties.{name}"))
            .map(Cow::into_owned)
    }

    /// Name of the action
    pub fn event(&self) -> Option<String> {
        text(self.field("event"))
    }

    pub fn value(&self) -> Option<Value> {
        self.prop("value")
    }

    pub fn category(&self) -> Option<Value> {
        self.prop("category")
    }

    /// Identifier of the object acted upon
    ///
    /// With an object name, `<object>_id` and then `<object>Id` are tried
    /// before the plain `properties.id`.
    pub fn id(&self, object: Option<&str>) -> Option<Value> {
        if let Some(object) = object {
            let snake = format!("properties.{object}_id");
            let camel = format!("properties.{object}Id");
            let hit = first(self, &[snake.as_str(), camel.as_str()]);
            if hit.is_some() {
                return hit;
            }
        }
        self.prop("id")
    }

    pub fn sku(&self) -> Option<Value> {
        self.prop("sku")
    }

    pub fn tax(&self) -> Option<Value> {
        self.prop("tax")
    }

    pub fn name(&self) -> Option<Value> {
        self.prop("name")
    }

    pub fn price(&self) -> Option<Value> {
        self.prop("price")
    }

    pub fn total(&self) -> Option<Value> {
        self.prop("total")
    }

    pub fn repeat(&self) -> Option<Value> {
        self.prop("repeat")
    }

    pub fn coupon(&self) -> Option<Value> {
        self.prop("coupon")
    }

    pub fn shipping(&self) -> Option<Value> {
        self.prop("shipping")
    }

    pub fn discount(&self) -> Option<Value> {
        self.prop("discount")
    }

    pub fn shipping_method(&self) -> Option<Value> {
        self.prop("shippingMethod")
    }

    pub fn payment_method(&self) -> Option<Value> {
        self.prop("paymentMethod")
    }

    pub fn description(&self) -> Option<Value> {
        self.prop("description")
    }

    pub fn plan(&self) -> Option<Value> {
        self.prop("plan")
    }

    /// `properties.id`, then `orderId`, then `order_id`
    pub fn order_id(&self) -> Option<Value> {
        first(
            self,
            &["properties.id", "properties.orderId", "properties.order_id"],
        )
    }

    /// Order amount before tax and shipping
    ///
    /// An explicit `subtotal` wins. Otherwise an explicit `total` is reduced
    /// by tax and shipping and increased by discount; `revenue` is used as is.
    pub fn subtotal(&self) -> f64 {
        if let Some(subtotal) = amount(self.proxy("properties.subtotal")) {
            return subtotal;
        }

        let total = amount(self.proxy("properties.total"));
        let Some(mut subtotal) = total.or_else(|| self.revenue()) else {
            return 0.0;
        };
        if total.is_some() {
            let adjustment = |name: &str| amount(self.proxy(&format!("properties.{name}")));
            subtotal -= adjustment("tax").unwrap_or(0.0);
            subtotal -= adjustment("shipping").unwrap_or(0.0);
            subtotal += adjustment("discount").unwrap_or(0.0);
        }
        subtotal
    }

    /// The product list without `null` entries
    pub fn products(&self) -> Vec<Value> {
        match self.prop("products") {
            Some(Value::Array(items)) => items.into_iter().filter(|v| !v.is_null()).collect(),
            _ => Vec::new(),
        }
    }

    pub fn quantity(&self) -> f64 {
        self.prop("quantity")
            .and_then(|v| v.as_f64())
            .filter(|q| *q != 0.0)
            .unwrap_or(1.0)
    }

    /// ISO-4217 currency code, `USD` when absent
    pub fn currency(&self) -> String {
        first_text(self, &["properties.currency"]).unwrap_or_else(|| "USD".to_string())
    }

    pub fn referrer(&self) -> Option<String> {
        referrer(self)
    }

    pub fn query(&self) -> Option<Value> {
        self.proxy("options.query").map(Cow::into_owned)
    }

    pub fn username(&self) -> Option<Value> {
        first(self, &["traits.username", "properties.username"])
            .or_else(|| self.user_id().filter(Value::is_truthy))
            .or_else(|| self.session_id())
    }

    pub fn email(&self) -> Option<String> {
        first_text(
            self,
            &["traits.email", "properties.email", "options.traits.email"],
        )
        .or_else(|| validate::email_value(self.user_id().as_ref()))
    }

    /// Revenue as a number
    ///
    /// Falls back to `properties.total` for "order completed" events.
    pub fn revenue(&self) -> Option<f64> {
        let mut revenue = self.proxy("properties.revenue");
        if revenue.is_none()
            && self
                .event()
                .is_some_and(|event| order_completed_regex().is_match(&event))
        {
            revenue = self.proxy("properties.total");
        }
        amount(revenue)
    }

    /// Revenue in cents, else `value`, else 0
    pub fn cents(&self) -> f64 {
        match self.revenue() {
            Some(revenue) => revenue * 100.0,
            None => self.value().and_then(|v| v.as_f64()).unwrap_or(0.0),
        }
    }

    /// An identify event carrying this event's traits
    pub fn identify(&self) -> Identify {
        let mut json = self.json();
        json.insert("traits".to_string(), self.traits(&[]).into());
        json.insert("type".to_string(), EventType::Identify.as_str().into());
        Identify::with_options(json, self.0.opts())
    }
}

impl Message for Track {
    fn facade(&self) -> &Facade {
        &self.0
    }

    fn event_type(&self) -> Option<EventType> {
        Some(EventType::Track)
    }

    fn member(&self, name: &str) -> Option<Producer<'_>> {
        match name {
            "event" => producer(move || self.event().map(Value::from)),
            "properties" => producer(move || Some(self.properties(&[]).into())),
            "orderId" => producer(move || self.order_id()),
            "revenue" => producer(move || self.revenue().map(Value::from)),
            "subtotal" => producer(move || Some(self.subtotal().into())),
            "cents" => producer(move || Some(self.cents().into())),
            "products" => producer(move || Some(self.products().into())),
            "quantity" => producer(move || Some(self.quantity().into())),
            "currency" => producer(move || Some(self.currency().into())),
            "referrer" => producer(move || self.referrer().map(Value::from)),
            "query" => producer(move || self.query()),
            "username" => producer(move || self.username()),
            "email" => producer(move || self.email().map(Value::from)),
            _ => base_member(self, name),
        }
    }
}
