use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::info;

use crate::config::DbConfig;

/// Owns the Postgres connection pool.
#[derive(Clone, Debug)]
pub struct DbManager {
    db: PgPool,
}

impl DbManager {
    /// Connects the pool and brings the schema up to date.
    pub async fn init(db_config: &DbConfig) -> Result<Self> {
        info!("{:<20} - Initializing the DB pool", "init_db");
        let max_cons = if cfg!(test) { 1 } else { db_config.max_connections };

        let db_pool = PgPoolOptions::new()
            .max_connections(max_cons)
            .acquire_timeout(db_config.acquire_timeout())
            .connect_with(db_config.connection_options())
            .await
            .map_err(Error::FailToCreatePool)?;

        info!("{:<20} - Running migrations", "init_db");
        sqlx::migrate!("./migrations").run(&db_pool).await?;

        Ok(Self { db: db_pool })
    }

    pub fn db(&self) -> &PgPool {
        &self.db
    }
}

// ###################################
// ->   ERROR
// ###################################
pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to create db pool: {0}")]
    FailToCreatePool(sqlx::Error),
    #[error("sqlx migration error: {0}")]
    SqlxMigrate(#[from] sqlx::migrate::MigrateError),
}
