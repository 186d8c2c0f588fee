//! PostgreSQL-backed content store.
//!
//! Diesel is blocking, so every query checks a connection out of the r2d2
//! pool inside `spawn_blocking`. The pool is the only shared state.

use crate::DatabaseResult;
use crate::schema::{ENSURE_SCHEMA_SQL, commands};
use async_trait::async_trait;
use bangbot_error::{BangbotResult, DatabaseError, DatabaseErrorKind};
use bangbot_interface::{ContentService, LivenessProbe};
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_types::Text;
use parking_lot::RwLock;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

/// Connection pool type used by the store.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Longest the liveness ping waits for a pooled connection.
///
/// Kept well under the health request timeout so an unreachable server is
/// reported as disconnected rather than as a timed-out request.
pub const PING_TIMEOUT: Duration = Duration::from_secs(2);

const RANDOM_CONTENT_SQL: &str =
    "SELECT content FROM commands WHERE command = $1 ORDER BY RANDOM() LIMIT 1";

#[derive(QueryableByName)]
struct ContentRow {
    #[diesel(sql_type = Text)]
    content: String,
}

/// Content provider backed by the `commands` table.
///
/// Construction is a fail-fast boundary: if the pool cannot be built, the
/// ping fails, or the schema cannot be ensured, no store is returned.
pub struct ContentStore {
    pool: RwLock<Option<PgPool>>,
}

impl ContentStore {
    /// Connect, verify liveness and ensure the schema exists.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The pool cannot establish a connection
    /// - The liveness ping fails
    /// - The table or index cannot be created
    #[instrument(skip(database_url))]
    pub async fn connect(database_url: &str) -> DatabaseResult<Self> {
        info!("Initializing content store");

        let manager = ConnectionManager::<PgConnection>::new(database_url);
        let pool = tokio::task::spawn_blocking(move || -> DatabaseResult<PgPool> {
            let pool = Pool::builder()
                .connection_timeout(CONNECT_TIMEOUT)
                .build(manager)
                .map_err(|e| {
                    error!(error = %e, "Failed to open database connection");
                    DatabaseError::new(DatabaseErrorKind::Connection(e.to_string()))
                })?;

            let mut conn = pool.get()?;
            ping_connection(&mut conn).inspect_err(|e| {
                error!(error = %e, "Failed to ping database");
            })?;
            ensure_schema(&mut conn).inspect_err(|e| {
                error!(error = %e, "Failed to ensure table exists");
            })?;

            Ok(pool)
        })
        .await
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Connection(e.to_string())))??;

        let store = Self::from_pool(pool);
        let categories = store.try_available_categories().await?;
        info!(
            total_commands = categories.len(),
            "Content store initialized successfully"
        );

        Ok(store)
    }

    /// Wrap an existing pool without touching the database.
    pub fn from_pool(pool: PgPool) -> Self {
        Self {
            pool: RwLock::new(Some(pool)),
        }
    }

    /// Release the pool. Calling it again is a no-op.
    ///
    /// Queries issued after closing fail with a connection error, which the
    /// `ContentService` impl collapses to an empty answer.
    pub fn close(&self) {
        match self.pool.write().take() {
            Some(pool) => {
                let state = pool.state();
                drop(pool);
                info!(
                    connections = state.connections,
                    idle = state.idle_connections,
                    "Content store closed"
                );
            }
            None => debug!("Content store already closed"),
        }
    }

    /// Whether [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.pool.read().is_none()
    }

    /// Random entry for `category`; `Ok(None)` when it has no rows.
    #[instrument(skip(self))]
    pub async fn try_random_content(&self, category: &str) -> DatabaseResult<Option<String>> {
        let category = category.to_string();
        self.with_connection(move |conn| {
            let row = diesel::sql_query(RANDOM_CONTENT_SQL)
                .bind::<Text, _>(category)
                .get_result::<ContentRow>(conn)
                .optional()?;
            Ok(row.map(|row| row.content))
        })
        .await
    }

    /// Number of rows stored for `category`.
    #[instrument(skip(self))]
    pub async fn try_content_count(&self, category: &str) -> DatabaseResult<usize> {
        let category = category.to_string();
        self.with_connection(move |conn| {
            let count: i64 = commands::table
                .filter(commands::command.eq(&category))
                .count()
                .get_result(conn)?;
            Ok(usize::try_from(count).unwrap_or(0))
        })
        .await
    }

    /// Distinct categories in lexicographic order.
    #[instrument(skip(self))]
    pub async fn try_available_categories(&self) -> DatabaseResult<Vec<String>> {
        self.with_connection(|conn| {
            let categories = commands::table
                .select(commands::command)
                .distinct()
                .order(commands::command.asc())
                .load::<String>(conn)?;
            Ok(categories)
        })
        .await
    }

    /// Run `SELECT 1` on a pooled connection.
    ///
    /// Gives up after [`PING_TIMEOUT`] if no connection can be checked out.
    #[instrument(skip(self))]
    pub async fn try_ping(&self) -> DatabaseResult<()> {
        let pool = self.pool()?;

        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get_timeout(PING_TIMEOUT)?;
            ping_connection(&mut conn)
        })
        .await
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Query(e.to_string())))?
    }

    fn pool(&self) -> DatabaseResult<PgPool> {
        self.pool.read().clone().ok_or_else(|| {
            DatabaseError::new(DatabaseErrorKind::Connection(
                "content store is closed".to_string(),
            ))
        })
    }

    async fn with_connection<T, F>(&self, op: F) -> DatabaseResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> DatabaseResult<T> + Send + 'static,
    {
        let pool = self.pool()?;

        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            op(&mut *conn)
        })
        .await
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Query(e.to_string())))?
    }
}

fn ping_connection(conn: &mut PgConnection) -> DatabaseResult<()> {
    diesel::sql_query("SELECT 1").execute(conn)?;
    Ok(())
}

fn ensure_schema(conn: &mut PgConnection) -> DatabaseResult<()> {
    conn.batch_execute(ENSURE_SCHEMA_SQL)
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Schema(e.to_string())))?;
    info!("Commands table ensured");
    Ok(())
}

#[async_trait]
impl ContentService for ContentStore {
    async fn random_content(&self, category: &str) -> String {
        match self.try_random_content(category).await {
            Ok(Some(content)) => {
                debug!(category, content_len = content.len(), "Retrieved content");
                content
            }
            Ok(None) => {
                debug!(category, "No content found for category");
                String::new()
            }
            Err(e) => {
                error!(category, error = %e, "Failed to get random content");
                String::new()
            }
        }
    }

    async fn content_count(&self, category: &str) -> usize {
        self.try_content_count(category).await.unwrap_or_else(|e| {
            error!(category, error = %e, "Failed to count content");
            0
        })
    }

    async fn available_categories(&self) -> Vec<String> {
        self.try_available_categories().await.unwrap_or_else(|e| {
            error!(error = %e, "Failed to query categories");
            Vec::new()
        })
    }
}

#[async_trait]
impl LivenessProbe for ContentStore {
    async fn ping(&self) -> BangbotResult<()> {
        Ok(self.try_ping().await?)
    }
}

impl std::fmt::Debug for ContentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentStore")
            .field("closed", &self.is_closed())
            .finish()
    }
}
