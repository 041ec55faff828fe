use async_trait::async_trait;
use hashlink_core::error::{Result, StorageError};
use hashlink_core::repository::{ReadRepository, Repository, StoredMapping, UrlMapping};
use hashlink_core::Identifier;
use jiff::Timestamp;
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};
use tracing::trace;

/// DDL for the `url_mappings` table.
pub const SCHEMA: &str = include_str!("../ddl/mysql/url_mappings.sql");

/// MySQL implementation of the repository contract.
///
/// The `hash` column carries a plain index rather than a unique constraint,
/// so resubmitting a URL appends another row. Reads return the row with the
/// lowest `id`. The column uses a binary no-pad collation, so lookups are
/// exact byte comparisons like the in-memory store.
#[derive(Debug, Clone)]
pub struct MySqlRepository {
    pool: MySqlPool,
}

impl MySqlRepository {
    /// Creates a repository from an existing MySQL connection pool.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Creates a repository by opening a new MySQL connection pool.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = MySqlPool::connect(database_url)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool))
    }

    /// Creates the `url_mappings` table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }

    /// Closes the pool, waiting for checked-out connections to return.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn parse_created_at(seconds: i64) -> Result<Timestamp> {
    Timestamp::from_second(seconds).map_err(|e| {
        StorageError::InvalidData(format!("invalid created_at timestamp '{}': {e}", seconds))
    })
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StorageError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        _ => StorageError::Query(message),
    }
}

fn row_to_mapping(row: MySqlRow) -> Result<StoredMapping> {
    let id: u64 = row.try_get("id").map_err(map_sqlx_error)?;
    let hash: String = row.try_get("hash").map_err(map_sqlx_error)?;
    let url: String = row.try_get("url").map_err(map_sqlx_error)?;
    let created_at: i64 = row.try_get("created_at").map_err(map_sqlx_error)?;

    Ok(StoredMapping {
        id,
        identifier: Identifier::from_path(hash),
        url,
        created_at: parse_created_at(created_at)?,
    })
}

#[async_trait]
impl ReadRepository for MySqlRepository {
    async fn find_first(&self, identifier: &Identifier) -> Result<Option<StoredMapping>> {
        trace!(identifier = %identifier, "querying url_mappings");

        let row = sqlx::query(
            r#"
            SELECT id, hash, url, created_at
            FROM url_mappings
            WHERE hash = ?
            ORDER BY id ASC
            LIMIT 1
            "#,
        )
        .bind(identifier.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(row_to_mapping).transpose()
    }
}

#[async_trait]
impl Repository for MySqlRepository {
    async fn insert(&self, mapping: UrlMapping) -> Result<StoredMapping> {
        let created_at = Timestamp::now().as_second();

        let result = sqlx::query(
            r#"
            INSERT INTO url_mappings (hash, url, created_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(mapping.identifier.as_str())
        .bind(&mapping.url)
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(StoredMapping {
            id: result.last_insert_id(),
            identifier: mapping.identifier,
            url: mapping.url,
            created_at: parse_created_at(created_at)?,
        })
    }
}
