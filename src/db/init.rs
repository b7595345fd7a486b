// Database initialization and migration handling
use std::path::Path;

use sqlx::{sqlite::SqlitePoolOptions, Pool, Row, Sqlite};

use crate::db::migrations::MIGRATION_001;
use crate::error::DbError;

/// Open (creating if needed) the database file and bring its schema up to date
pub async fn init_db(path: &Path) -> Result<Pool<Sqlite>, DbError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(sqlx::Error::Io)?;
    }
    let db_url = format!("sqlite:{}?mode=rwc", path.display());

    log::info!("Initializing database at: {}", path.display());

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&db_url)
        .await?;

    // Enable WAL mode for better performance
    sqlx::query("PRAGMA journal_mode=WAL;").execute(&pool).await?;

    run_migrations(&pool).await?;

    log::info!("Database initialization complete");
    Ok(pool)
}

/// Private in-memory database; one connection, since every connection to
/// `sqlite::memory:` sees its own database
pub async fn init_memory_db() -> Result<Pool<Sqlite>, DbError> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    run_migrations(&pool).await?;
    Ok(pool)
}

/// Statements of a migration script, comment lines removed
fn statements(script: &str) -> impl Iterator<Item = String> + '_ {
    script.split(';').filter_map(|statement| {
        let stmt: Vec<&str> = statement
            .lines()
            .filter(|line| !line.trim_start().starts_with("--"))
            .collect();
        let stmt = stmt.join("\n").trim().to_string();
        (!stmt.is_empty()).then_some(stmt)
    })
}

/// Run all pending migrations
async fn run_migrations(pool: &Pool<Sqlite>) -> Result<(), DbError> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS _migrations (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            applied_at TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    let applied: bool = sqlx::query("SELECT COUNT(*) as count FROM _migrations WHERE name = 'migration_001'")
        .fetch_one(pool)
        .await
        .map(|row| row.get::<i64, _>("count") > 0)?;

    if !applied {
        log::info!("Applying migration_001...");

        // SQLite executes one statement per query
        for stmt in statements(MIGRATION_001) {
            sqlx::query(&stmt)
                .execute(pool)
                .await
                .map_err(|source| DbError::Migration {
                    statement: stmt.clone(),
                    source,
                })?;
        }

        sqlx::query("INSERT INTO _migrations (name, applied_at) VALUES ('migration_001', datetime('now'))")
            .execute(pool)
            .await?;

        log::info!("Migration 001 applied successfully");
    }

    Ok(())
}

/// Get database stats for debugging
pub async fn get_db_stats(pool: &Pool<Sqlite>) -> Result<DbStats, DbError> {
    let session_count: i64 = sqlx::query("SELECT COUNT(*) as count FROM contest_sessions")
        .fetch_one(pool)
        .await?
        .get("count");

    let contact_count: i64 = sqlx::query("SELECT COUNT(*) as count FROM contacts")
        .fetch_one(pool)
        .await?
        .get("count");

    Ok(DbStats {
        session_count,
        contact_count,
    })
}

#[derive(Debug, serde::Serialize)]
pub struct DbStats {
    pub session_count: i64,
    pub contact_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statements_strip_comments() {
        let script = "-- header\nCREATE TABLE a (x TEXT); -- trailing\n\n-- only a comment\n;CREATE INDEX i ON a(x)\n";
        let stmts: Vec<String> = statements(script).collect();
        assert_eq!(stmts, vec!["CREATE TABLE a (x TEXT)", "CREATE INDEX i ON a(x)"]);
    }

    #[tokio::test]
    async fn test_migrations_run_once() {
        let pool = init_memory_db().await.unwrap();
        run_migrations(&pool).await.unwrap();
        let applied: i64 = sqlx::query("SELECT COUNT(*) as count FROM _migrations")
            .fetch_one(&pool)
            .await
            .unwrap()
            .get("count");
        assert_eq!(applied, 1);
        let stats = get_db_stats(&pool).await.unwrap();
        assert_eq!(stats.contact_count, 0);
    }

    #[tokio::test]
    async fn test_file_database() {
        let dir = std::env::temp_dir().join(format!("contestlog_db_{}", uuid::Uuid::new_v4().simple()));
        let pool = init_db(&dir.join("log.db")).await.unwrap();
        assert_eq!(get_db_stats(&pool).await.unwrap().session_count, 0);
        pool.close().await;
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
