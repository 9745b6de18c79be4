//! The subscriber record, its projections and the `SubscriberStore` capability
//! the web layer talks to.

mod memory;
mod postgres;

pub use memory::MemorySubscriberStore;
pub use postgres::PgSubscriberStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ###################################
// ->   STRUCTS
// ###################################
/// A persisted subscriber.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    pub id: Uuid,
    pub name: String,
    pub subscribed_channel: String,
    pub subscribed_date: DateTime<Utc>,
}

/// Projection of a `Subscriber` without its identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SubscriberName {
    pub name: String,
    pub subscribed_channel: String,
}

impl From<Subscriber> for SubscriberName {
    fn from(value: Subscriber) -> Self {
        SubscriberName {
            name: value.name,
            subscribed_channel: value.subscribed_channel,
        }
    }
}

/// The data a store needs to create a subscriber.
/// `id` is the raw, caller supplied identifier, when there is one.
#[derive(Debug, Clone)]
pub struct NewSubscriber {
    pub id: Option<String>,
    pub name: String,
    pub subscribed_channel: String,
}

impl NewSubscriber {
    /// Parses the caller supplied id or generates a fresh one.
    pub fn resolve_id(&self) -> StoreResult<Uuid> {
        match &self.id {
            Some(raw) => parse_id(raw),
            None => Ok(Uuid::new_v4()),
        }
    }
}

pub fn parse_id(raw: &str) -> StoreResult<Uuid> {
    Uuid::parse_str(raw).map_err(|er| StoreError::InvalidId {
        value: raw.to_string(),
        reason: er.to_string(),
    })
}

// ###################################
// ->   STORE
// ###################################
#[async_trait]
pub trait SubscriberStore: Send + Sync {
    async fn create(&self, subscriber: NewSubscriber) -> StoreResult<Subscriber>;

    /// All subscribers in creation order.
    async fn find_all(&self) -> StoreResult<Vec<Subscriber>>;

    /// All subscribers in creation order, projected to name and channel.
    async fn find_all_names(&self) -> StoreResult<Vec<SubscriberName>>;

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Subscriber>>;

    /// Removes the subscriber and hands back what was removed.
    async fn delete_by_id(&self, id: &str) -> StoreResult<Option<Subscriber>>;
}

// ###################################
// ->   ERROR
// ###################################
pub type StoreResult<T> = core::result::Result<T, StoreError>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Cast to UUID failed for value \"{value}\": {reason}")]
    InvalidId { value: String, reason: String },
    #[error("a subscriber with id \"{0}\" already exists")]
    DuplicateId(Uuid),

    #[error("{0}")]
    Sqlx(#[from] sqlx::Error),
}
