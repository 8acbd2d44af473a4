use std::str::FromStr;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use crate::domain::auth::errors::StorageError;
use crate::domain::auth::models::AppId;
use crate::domain::auth::models::UserId;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// SQLite-backed record store for users and applications.
///
/// Implements `UserSaver`, `UserProvider` and `AppProvider`.
pub struct SqliteStorage {
    pub(super) pool: SqlitePool,
}

impl SqliteStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a connection pool, creating the database file if needed.
    ///
    /// Idle connections are never recycled so that `sqlite::memory:` databases
    /// survive for the lifetime of the pool.
    ///
    /// # Arguments
    /// * `url` - SQLite connection URL (e.g. `sqlite://storage/sso.db`)
    /// * `max_connections` - Pool size
    ///
    /// # Errors
    /// * `Database` - URL is invalid or the database cannot be opened
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| StorageError::Database(e.to_string()))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| StorageError::Database(e.to_string()))?;

        Ok(Self::new(pool))
    }

    /// Apply the migrations embedded in the binary.
    ///
    /// # Errors
    /// * `Database` - A migration failed
    pub async fn migrate(&self) -> Result<(), StorageError> {
        MIGRATOR
            .run(&self.pool)
            .await
            .map_err(|e| StorageError::Database(e.to_string()))
    }

    /// Register a tenant application.
    ///
    /// Applications are provisioned by operators; the authentication core only
    /// reads them.
    ///
    /// # Errors
    /// * `Database` - Name is taken or the insert failed
    pub async fn save_app(&self, name: &str, secret: &str) -> Result<AppId, StorageError> {
        let result = sqlx::query("INSERT INTO apps (name, secret) VALUES (?1, ?2)")
            .bind(name)
            .bind(secret)
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::Database(e.to_string()))?;

        AppId::new(result.last_insert_rowid())
            .map_err(|e| StorageError::CorruptRecord(e.to_string()))
    }

    /// Grant or revoke administrator privileges.
    ///
    /// # Errors
    /// * `UserNotFound` - User does not exist
    /// * `Database` - Update failed
    pub async fn set_admin(&self, user_id: UserId, is_admin: bool) -> Result<(), StorageError> {
        let result = sqlx::query("UPDATE users SET is_admin = ?1 WHERE id = ?2")
            .bind(is_admin)
            .bind(user_id.get())
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StorageError::UserNotFound);
        }

        Ok(())
    }
}
