pub mod projects;
pub mod users;

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::{BoxFuture, FutureExt, Shared};
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use tokio::sync::{Mutex, OnceCell};

use crate::config::Config;

#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    #[error("DATABASE_URL is not configured")]
    MissingUri,
    #[error("invalid database URI: {0}")]
    InvalidUri(#[source] sqlx::Error),
    #[error("failed to connect to database: {0}")]
    Connect(#[source] sqlx::Error),
    #[error("failed to apply migrations: {0}")]
    Migrate(#[source] sqlx::migrate::MigrateError),
}

type ConnectAttempt = Shared<BoxFuture<'static, Result<PgPool, Arc<ConnectionError>>>>;

#[derive(Debug, Clone)]
struct ConnectSettings {
    url: Option<String>,
    name: String,
    max_connections: u32,
    acquire_timeout: Duration,
}

/// Process-wide database handle.
///
/// The pool is opened on the first call to [`Database::acquire_connection`]
/// and reused afterwards. Callers that arrive while an attempt is in flight
/// await that same attempt and all see its outcome. A failed attempt is
/// dropped once it settles, so the next caller starts a fresh one.
pub struct Database {
    settings: ConnectSettings,
    pool: OnceCell<PgPool>,
    attempt: Mutex<Option<ConnectAttempt>>,
}

impl Database {
    pub fn new(url: Option<String>, name: impl Into<String>) -> Self {
        Self {
            settings: ConnectSettings {
                url,
                name: name.into(),
                max_connections: 10,
                acquire_timeout: Duration::from_secs(5),
            },
            pool: OnceCell::new(),
            attempt: Mutex::new(None),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.database_url.clone(), config.database_name.clone())
            .with_max_connections(config.database_max_connections)
    }

    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.settings.max_connections = max_connections;
        self
    }

    pub fn with_acquire_timeout(mut self, timeout: Duration) -> Self {
        self.settings.acquire_timeout = timeout;
        self
    }

    pub fn is_connected(&self) -> bool {
        self.pool.initialized()
    }

    pub async fn acquire_connection(&self) -> Result<&PgPool, Arc<ConnectionError>> {
        if let Some(pool) = self.pool.get() {
            return Ok(pool);
        }

        let attempt = {
            let mut slot = self.attempt.lock().await;
            if let Some(pool) = self.pool.get() {
                return Ok(pool);
            }
            slot.get_or_insert_with(|| {
                let settings = self.settings.clone();
                async move { open_pool(settings).await.map_err(Arc::new) }
                    .boxed()
                    .shared()
            })
            .clone()
        };

        let outcome = attempt.clone().await;

        // The pool is stored before the slot is cleared so no caller can
        // observe both as empty after a success.
        let mut slot = self.attempt.lock().await;
        let result = match outcome {
            Ok(pool) => Ok(self.pool.get_or_init(|| async move { pool }).await),
            Err(e) => Err(e),
        };
        if slot.as_ref().is_some_and(|current| current.ptr_eq(&attempt)) {
            *slot = None;
        }
        result
    }
}

async fn open_pool(settings: ConnectSettings) -> Result<PgPool, ConnectionError> {
    let url = settings.url.as_deref().ok_or(ConnectionError::MissingUri)?;
    let options = PgConnectOptions::from_str(url)
        .map_err(ConnectionError::InvalidUri)?
        .database(&settings.name);

    tracing::info!(database = %settings.name, "Opening database connection pool");

    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.acquire_timeout)
        .connect_with(options)
        .await
        .map_err(ConnectionError::Connect)?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(ConnectionError::Migrate)?;

    tracing::info!(database = %settings.name, "Migrations applied");
    Ok(pool)
}
