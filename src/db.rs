use std::time::Duration;

use migration::{Migrator, MigratorTrait};
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, DbErr,
    RuntimeErr, SqlxSqliteConnector, Statement, sqlx::sqlite::SqlitePoolOptions,
};

use crate::{config::Config, error::AppResult};

pub async fn connect_and_migrate(config: &Config) -> AppResult<DatabaseConnection> {
    let db = if is_in_memory(&config.database_url) {
        connect_in_memory(&config.database_url).await?
    } else {
        let mut opts = ConnectOptions::new(config.database_url.clone());
        opts.max_connections(config.db_max_connections)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(30))
            .sqlx_logging(false);
        Database::connect(opts).await?
    };

    if db.get_database_backend() == DatabaseBackend::Sqlite
        && !is_in_memory(&config.database_url)
    {
        for pragma in ["PRAGMA journal_mode=WAL", "PRAGMA synchronous=NORMAL", "PRAGMA cache_size=-64000"]
        {
            db.execute(Statement::from_string(db.get_database_backend(), pragma.to_string()))
                .await?;
        }
    }

    Migrator::up(&db, None).await?;
    tracing::debug!(url = %config.database_url, "database ready");

    Ok(db)
}

/// One connection that is never recycled. Each connection sees its own empty
/// database, and closing the only one drops every table with it.
async fn connect_in_memory(url: &str) -> Result<DatabaseConnection, DbErr> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect(url)
        .await
        .map_err(|e| DbErr::Conn(RuntimeErr::SqlxError(e)))?;
    Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}
