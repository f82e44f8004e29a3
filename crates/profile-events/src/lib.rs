//! Profile topology notifications
//!
//! Delivers "profile added" / "profile removed" signals for a user session
//! to typed handlers. Raw platform broadcasts arrive as JSON and are parsed
//! into [`TopologyEvent`]s; an [`EventPump`] drains a tokio channel into an
//! [`EventBus`].

pub mod bus;
pub mod error;
pub mod event;
pub mod pump;

pub use bus::{EventBus, Subscription, SubscriptionId};
pub use error::{EventError, Result};
pub use event::{TopologyChange, TopologyEvent};
pub use pump::{EventPump, PumpStats};
