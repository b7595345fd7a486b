// Contest session rows

use sqlx::{sqlite::SqliteRow, Pool, Row, Sqlite};

use crate::error::DbError;
use crate::session::{ContestSession, SessionConfig};

fn row_to_session(row: &SqliteRow) -> Result<ContestSession, DbError> {
    let id: i64 = row.try_get("id")?;
    let raw: String = row.try_get("config")?;
    let config: SessionConfig = serde_json::from_str(&raw).map_err(|e| DbError::Corrupt {
        table: "contest_sessions",
        reason: format!("session {}: {}", id, e),
    })?;
    Ok(ContestSession {
        id,
        contest: row.try_get("contest")?,
        config,
    })
}

fn config_json(config: &SessionConfig) -> Result<String, DbError> {
    serde_json::to_string(config).map_err(|e| DbError::Corrupt {
        table: "contest_sessions",
        reason: e.to_string(),
    })
}

/// Store a new session; the database assigns its id
pub async fn insert_session(pool: &Pool<Sqlite>, session: &ContestSession) -> Result<ContestSession, DbError> {
    let result = sqlx::query(
        "INSERT INTO contest_sessions (contest, config, created_at, updated_at)
         VALUES (?, ?, datetime('now'), datetime('now'))",
    )
    .bind(&session.contest)
    .bind(config_json(&session.config)?)
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();
    log::info!("Stored {} session as {}", session.contest, id);
    Ok(ContestSession {
        id,
        ..session.clone()
    })
}

pub async fn load_session(pool: &Pool<Sqlite>, id: i64) -> Result<ContestSession, DbError> {
    let row = sqlx::query("SELECT id, contest, config FROM contest_sessions WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(DbError::SessionNotFound(id))?;
    row_to_session(&row)
}

/// The most recently created session, if any
pub async fn latest_session(pool: &Pool<Sqlite>) -> Result<Option<ContestSession>, DbError> {
    let row = sqlx::query("SELECT id, contest, config FROM contest_sessions ORDER BY id DESC LIMIT 1")
        .fetch_optional(pool)
        .await?;
    row.as_ref().map(row_to_session).transpose()
}

pub async fn list_sessions(pool: &Pool<Sqlite>) -> Result<Vec<ContestSession>, DbError> {
    let rows = sqlx::query("SELECT id, contest, config FROM contest_sessions ORDER BY id")
        .fetch_all(pool)
        .await?;
    rows.iter().map(row_to_session).collect()
}

/// Categories and other settings may change; the contest and id may not
pub async fn update_session_config(pool: &Pool<Sqlite>, id: i64, config: &SessionConfig) -> Result<(), DbError> {
    let result = sqlx::query("UPDATE contest_sessions SET config = ?, updated_at = datetime('now') WHERE id = ?")
        .bind(config_json(config)?)
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(DbError::SessionNotFound(id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init::init_memory_db;

    fn ss_session() -> ContestSession {
        ContestSession {
            id: 0,
            contest: "ARRL SS CW".to_string(),
            config: SessionConfig {
                sent_exchange: "A 99 ORG".to_string(),
                ..Default::default()
            },
        }
    }

    #[tokio::test]
    async fn test_insert_and_load() {
        let pool = init_memory_db().await.unwrap();
        let stored = insert_session(&pool, &ss_session()).await.unwrap();
        assert!(stored.id > 0);
        let loaded = load_session(&pool, stored.id).await.unwrap();
        assert_eq!(loaded, stored);
        assert_eq!(latest_session(&pool).await.unwrap(), Some(stored));
    }

    #[tokio::test]
    async fn test_update_config() {
        let pool = init_memory_db().await.unwrap();
        let stored = insert_session(&pool, &ss_session()).await.unwrap();
        let mut config = stored.config.clone();
        config.soapbox = vec!["Fun".to_string()];
        update_session_config(&pool, stored.id, &config).await.unwrap();
        assert_eq!(load_session(&pool, stored.id).await.unwrap().config.soapbox, vec!["Fun"]);
        assert!(matches!(
            update_session_config(&pool, 999, &config).await,
            Err(DbError::SessionNotFound(999))
        ));
    }

    #[tokio::test]
    async fn test_missing_and_corrupt() {
        let pool = init_memory_db().await.unwrap();
        assert!(matches!(load_session(&pool, 7).await, Err(DbError::SessionNotFound(7))));
        assert!(latest_session(&pool).await.unwrap().is_none());
        sqlx::query("INSERT INTO contest_sessions (contest, config, created_at, updated_at) VALUES ('CWT', 'nope', '', '')")
            .execute(&pool)
            .await
            .unwrap();
        assert!(matches!(list_sessions(&pool).await, Err(DbError::Corrupt { .. })));
    }
}
