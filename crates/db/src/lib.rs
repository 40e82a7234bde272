pub mod models;
pub mod repositories;
pub mod schema;

use std::path::Path;
use std::str::FromStr;

use eyre::{Result, WrapErr};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};

pub type DbPool = Pool<Sqlite>;

/// Opens a file-backed SQLite pool, creating the database file (and its
/// parent directory) when missing. Foreign keys are enforced and the
/// journal runs in WAL mode.
pub async fn create_pool(database_url: &str) -> Result<DbPool> {
    if let Some(parent) = database_file(database_url).and_then(|p| p.parent().map(Path::to_path_buf)) {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(&parent)
                .wrap_err_with(|| format!("creating database directory {}", parent.display()))?;
        }
    }

    let options = SqliteConnectOptions::from_str(database_url)
        .wrap_err("Invalid DATABASE_URL")?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Opens a private in-memory database on a single long-lived connection.
/// Every connection to `sqlite::memory:` sees its own database, so the pool
/// must never open a second one.
pub async fn create_memory_pool() -> Result<DbPool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Filesystem path behind a `sqlite:` URL, or `None` for in-memory databases.
pub fn database_file(database_url: &str) -> Option<&Path> {
    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or_default();

    if path.is_empty() || path == ":memory:" {
        return None;
    }

    Some(Path::new(path))
}
