use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{
    parse_id, NewSubscriber, StoreError, StoreResult, Subscriber, SubscriberName, SubscriberStore,
};

/// A `SubscriberStore` that keeps everything in process memory.
/// Records are kept in insertion order.
#[derive(Debug, Default)]
pub struct MemorySubscriberStore {
    records: RwLock<Vec<Subscriber>>,
}

impl MemorySubscriberStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubscriberStore for MemorySubscriberStore {
    async fn create(&self, subscriber: NewSubscriber) -> StoreResult<Subscriber> {
        let id = subscriber.resolve_id()?;
        let mut records = self.records.write().await;
        if records.iter().any(|rec| rec.id == id) {
            return Err(StoreError::DuplicateId(id));
        }

        let created = Subscriber {
            id,
            name: subscriber.name,
            subscribed_channel: subscriber.subscribed_channel,
            subscribed_date: Utc::now(),
        };
        records.push(created.clone());

        Ok(created)
    }

    async fn find_all(&self) -> StoreResult<Vec<Subscriber>> {
        Ok(self.records.read().await.clone())
    }

    async fn find_all_names(&self) -> StoreResult<Vec<SubscriberName>> {
        let records = self.records.read().await;
        Ok(records.iter().cloned().map(SubscriberName::from).collect())
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Subscriber>> {
        let id = parse_id(id)?;
        let records = self.records.read().await;
        Ok(records.iter().find(|rec| rec.id == id).cloned())
    }

    async fn delete_by_id(&self, id: &str) -> StoreResult<Option<Subscriber>> {
        let id = parse_id(id)?;
        let mut records = self.records.write().await;
        let position = records.iter().position(|rec| rec.id == id);

        Ok(position.map(|idx| records.remove(idx)))
    }
}
