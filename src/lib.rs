//! # a3s-facade
//!
//! Normalized, case-insensitive accessors over loosely-typed analytics event
//! payloads for the A3S ecosystem.
//!
//! ## Overview
//!
//! Analytics events arrive from many client libraries, each with its own
//! opinion on key casing, where options live and how dates are encoded.
//! `a3s-facade` wraps one payload in a typed facade that answers questions
//! like "what is the user's email?" or "is this event enabled for
//! Salesforce?" without the caller caring about any of that.
//!
//! ## Quick Start
//!
//! ```rust
//! use a3s_facade::{to_facade, EventFacade, Message};
//!
//! # fn example() -> a3s_facade::Result<()> {
//! let facade = to_facade(serde_json::json!({
//!     "type": "track",
//!     "event": "Order Completed",
//!     "userId": "calvin@segment.io",
//!     "properties": { "Total": "$30", "tax": 2 },
//!     "context": { "Salesforce": { "object": "Lead" } }
//! }))?;
//!
//! if let EventFacade::Track(track) = &facade {
//!     assert_eq!(track.revenue(), Some(30.0));
//!     assert_eq!(track.subtotal(), 28.0);
//!     assert_eq!(track.email().as_deref(), Some("calvin@segment.io"));
//! }
//! assert!(facade.enabled("Salesforce"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Event types
//!
//! - **Track**: an action a user performed
//! - **Identify**: traits describing a user
//! - **Group**: the account a user belongs to
//! - **Page** / **Screen**: a web page or mobile screen view
//! - **Alias**: two identities of the same user
//! - **Delete**: a request to erase a user's data
//!
//! ## Architecture
//!
//! - **Value**: JSON with a native date variant
//! - **Facade**: owned, normalized storage for one payload
//! - **Message** trait: the shared accessor surface (`field`, `proxy`,
//!   `multi`, `one`, integrations, traits, ...)
//! - **EventFacade** / **to_facade**: dispatch on the payload's `type`

pub mod address;
pub mod case;
pub mod date;
pub mod dispatch;
pub mod error;
pub mod events;
pub mod facade;
pub mod integrations;
pub mod types;
pub mod validate;
pub mod value;

// Re-export core types
pub use dispatch::{to_facade, to_facade_with, EventFacade, IntoFacade};
pub use error::{FacadeError, Result};
pub use events::{Alias, Delete, Group, Identify, Page, Screen, Track};
pub use facade::{Facade, Message, Producer, Slot};
pub use types::{EventType, FacadeOptions, Library};
pub use value::{Map, Value};
