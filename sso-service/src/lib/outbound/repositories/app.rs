use async_trait::async_trait;

use super::sqlite::SqliteStorage;
use crate::domain::auth::errors::StorageError;
use crate::domain::auth::models::App;
use crate::domain::auth::models::AppId;
use crate::domain::auth::ports::AppProvider;

#[derive(sqlx::FromRow)]
struct AppRow {
    id: i64,
    name: String,
    secret: String,
}

impl TryFrom<AppRow> for App {
    type Error = StorageError;

    fn try_from(row: AppRow) -> Result<Self, Self::Error> {
        Ok(App {
            id: AppId::new(row.id).map_err(|e| StorageError::CorruptRecord(e.to_string()))?,
            name: row.name,
            secret: row.secret,
        })
    }
}

#[async_trait]
impl AppProvider for SqliteStorage {
    async fn app(&self, app_id: AppId) -> Result<App, StorageError> {
        let row = sqlx::query_as::<_, AppRow>(
            r#"
            SELECT id, name, secret
            FROM apps
            WHERE id = ?1
            "#,
        )
        .bind(app_id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Database(e.to_string()))?;

        row.ok_or(StorageError::AppNotFound)?.try_into()
    }
}
