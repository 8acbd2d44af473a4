use std::collections::HashSet;
use std::path::PathBuf;

use clap::Parser;
use sqlx::migrate::Migrate;
use sqlx::migrate::MigrateDatabase;
use sqlx::migrate::Migrator;
use sqlx::Sqlite;
use sqlx::SqlitePool;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Apply pending SQL migrations to the SSO database.
#[derive(Debug, Parser)]
#[command(name = "migrator", version)]
struct Args {
    /// SQLite connection URL, e.g. sqlite://storage/sso.db
    #[arg(long)]
    storage_url: String,

    /// Directory holding the migration files
    #[arg(long, default_value = "./migrations")]
    migrations_path: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "migrator=info,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    if !Sqlite::database_exists(&args.storage_url).await? {
        Sqlite::create_database(&args.storage_url).await?;
        tracing::info!(storage_url = %args.storage_url, "Database created");
    }

    let migrator = Migrator::new(args.migrations_path.as_path()).await?;
    let pool = SqlitePool::connect(&args.storage_url).await?;

    let applied: HashSet<i64> = {
        let mut conn = pool.acquire().await?;
        conn.ensure_migrations_table().await?;
        conn.list_applied_migrations()
            .await?
            .into_iter()
            .map(|migration| migration.version)
            .collect()
    };

    let pending = migrator
        .iter()
        .filter(|m| !m.migration_type.is_down_migration())
        .filter(|m| !applied.contains(&m.version))
        .count();

    if pending == 0 {
        tracing::info!(storage_url = %args.storage_url, "no migrations to apply");
        return Ok(());
    }

    migrator.run(&pool).await?;
    pool.close().await;

    tracing::info!(storage_url = %args.storage_url, applied = pending, "migrated successfully");

    Ok(())
}
