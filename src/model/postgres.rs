use async_trait::async_trait;
use sqlx::PgPool;
use tracing::Instrument;
use uuid::Uuid;

use super::{
    parse_id, NewSubscriber, StoreError, StoreResult, Subscriber, SubscriberName, SubscriberStore,
};
/// Postgres error code for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// A `SubscriberStore` backed by the `subscribers` table.
#[derive(Clone, Debug)]
pub struct PgSubscriberStore {
    db: PgPool,
}

impl PgSubscriberStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SubscriberStore for PgSubscriberStore {
    async fn create(&self, subscriber: NewSubscriber) -> StoreResult<Subscriber> {
        let id = subscriber.resolve_id()?;

        let q_span = tracing::info_span!("Inserting subscriber into the database", %id);
        let inserted = sqlx::query_as::<_, Subscriber>(
            r#"
            INSERT INTO subscribers (id, name, subscribed_channel, subscribed_date)
            VALUES ($1, $2, $3, now())
            RETURNING id, name, subscribed_channel, subscribed_date
        "#,
        )
        .bind(id)
        .bind(&subscriber.name)
        .bind(&subscriber.subscribed_channel)
        .fetch_one(&self.db)
        .instrument(q_span)
        .await;

        inserted.map_err(|er| map_insert_error(er, id))
    }

    async fn find_all(&self) -> StoreResult<Vec<Subscriber>> {
        let subscribers = sqlx::query_as::<_, Subscriber>(
            r#"SELECT id, name, subscribed_channel, subscribed_date FROM subscribers
            ORDER BY subscribed_date, id"#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(subscribers)
    }

    async fn find_all_names(&self) -> StoreResult<Vec<SubscriberName>> {
        let names = sqlx::query_as::<_, SubscriberName>(
            r#"SELECT name, subscribed_channel FROM subscribers
            ORDER BY subscribed_date, id"#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(names)
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Subscriber>> {
        let id = parse_id(id)?;
        let subscriber = sqlx::query_as::<_, Subscriber>(
            r#"SELECT id, name, subscribed_channel, subscribed_date FROM subscribers
            WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(subscriber)
    }

    async fn delete_by_id(&self, id: &str) -> StoreResult<Option<Subscriber>> {
        let id = parse_id(id)?;
        let deleted = sqlx::query_as::<_, Subscriber>(
            r#"DELETE FROM subscribers WHERE id = $1
            RETURNING id, name, subscribed_channel, subscribed_date"#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(deleted)
    }
}

/// A unique violation on insert can only come from the primary key,
/// so it is reported as a taken id. Everything else is propagated.
fn map_insert_error(error: sqlx::Error, id: Uuid) -> StoreError {
    match error {
        sqlx::Error::Database(ref er) if er.code().as_deref() == Some(UNIQUE_VIOLATION) => {
            StoreError::DuplicateId(id)
        }
        other => StoreError::Sqlx(other),
    }
}
