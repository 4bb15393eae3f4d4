use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::state::AppState;
use crate::infra::notifier::broadcast_notifier::BroadcastNotifier;
use crate::infra::repositories::{
    postgres_post_repo::PostgresPostRepo, postgres_recipe_repo::PostgresRecipeRepo,
    postgres_user_repo::PostgresUserRepo,
    sqlite_post_repo::SqlitePostRepo, sqlite_recipe_repo::SqliteRecipeRepo,
    sqlite_user_repo::SqliteUserRepo,
};

/// Connects the store selected by `DATABASE_URL`, runs migrations and wires the state.
pub async fn bootstrap_state(config: &Config) -> Result<AppState, sqlx::Error> {
    let database_url = &config.database_url;
    let notifier = Arc::new(BroadcastNotifier::default());

    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let opts = PgConnectOptions::from_str(database_url)?
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await?;

        run_postgres_migrations(&pool).await?;

        Ok(AppState::new(
            config.clone(),
            Arc::new(PostgresUserRepo::new(pool.clone())),
            Arc::new(PostgresRecipeRepo::new(pool.clone())),
            Arc::new(PostgresPostRepo::new(pool)),
            notifier,
        ))
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await?;

        run_sqlite_migrations(&pool).await?;

        Ok(AppState::new(
            config.clone(),
            Arc::new(SqliteUserRepo::new(pool.clone())),
            Arc::new(SqliteRecipeRepo::new(pool.clone())),
            Arc::new(SqlitePostRepo::new(pool)),
            notifier,
        ))
    }
}

async fn run_postgres_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::migrate!("./migrations/postgres").run(pool).await?;
    Ok(())
}

async fn run_sqlite_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::migrate!("./migrations/sqlite").run(pool).await?;
    Ok(())
}
