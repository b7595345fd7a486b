// Contact rows
//
// The scoring core works on a MemoryLogStore; these functions load a
// session's contacts into one and write its changes back.

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::{sqlite::SqliteRow, Pool, Row, Sqlite};
use uuid::Uuid;

use crate::contact::{Contact, MultiplierFlags};
use crate::error::DbError;
use crate::store::{ContactLogStore, MemoryLogStore, StoreChange};

const COLUMNS: &str = "uuid, session_id, ts, station_call, call, band, mode, freq, tx_freq, \
    rst_sent, rst_rcvd, sent_nr, rcv_nr, exchange1, sect, name, prec, ck, zone, \
    wpx_prefix, country_prefix, continent, grid, comment, \
    points, is_mult1, is_mult2, is_mult3, dupe, claimed";

fn timestamp_text(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn flag(row: &SqliteRow, column: &str) -> Result<bool, sqlx::Error> {
    Ok(row.try_get::<i64, _>(column)? != 0)
}

fn row_to_contact(row: &SqliteRow) -> Result<Contact, DbError> {
    let uuid: String = row.try_get("uuid")?;
    let id = Uuid::parse_str(&uuid).map_err(|e| DbError::Corrupt {
        table: "contacts",
        reason: format!("uuid '{}': {}", uuid, e),
    })?;
    let ts: String = row.try_get("ts")?;
    let timestamp = DateTime::parse_from_rfc3339(&ts)
        .map_err(|e| DbError::Corrupt {
            table: "contacts",
            reason: format!("{} timestamp '{}': {}", uuid, ts, e),
        })?
        .with_timezone(&Utc);
    let points: i64 = row.try_get("points")?;

    Ok(Contact {
        id,
        session_id: row.try_get("session_id")?,
        timestamp,
        station_call: row.try_get("station_call")?,
        call: row.try_get("call")?,
        band: row.try_get("band")?,
        mode: row.try_get("mode")?,
        freq: row.try_get("freq")?,
        tx_freq: row.try_get("tx_freq")?,
        rst_sent: row.try_get("rst_sent")?,
        rst_rcvd: row.try_get("rst_rcvd")?,
        sent_nr: row.try_get("sent_nr")?,
        rcv_nr: row.try_get("rcv_nr")?,
        exchange1: row.try_get("exchange1")?,
        sect: row.try_get("sect")?,
        name: row.try_get("name")?,
        prec: row.try_get("prec")?,
        ck: row.try_get("ck")?,
        zone: row.try_get("zone")?,
        wpx_prefix: row.try_get("wpx_prefix")?,
        country_prefix: row.try_get("country_prefix")?,
        continent: row.try_get("continent")?,
        grid: row.try_get("grid")?,
        comment: row.try_get("comment")?,
        points: u32::try_from(points).unwrap_or(0),
        mults: MultiplierFlags {
            m1: flag(row, "is_mult1")?,
            m2: flag(row, "is_mult2")?,
            m3: flag(row, "is_mult3")?,
        },
        dupe: flag(row, "dupe")?,
        claimed: flag(row, "claimed")?,
    })
}

/// Every readable contact of a session in time order. Rows whose id or
/// timestamp cannot be read are logged and left out.
pub async fn load_contacts(pool: &Pool<Sqlite>, session_id: i64) -> Result<Vec<Contact>, DbError> {
    let sql = format!("SELECT {} FROM contacts WHERE session_id = ? ORDER BY ts, uuid", COLUMNS);
    let rows = sqlx::query(&sql).bind(session_id).fetch_all(pool).await?;

    let mut contacts = Vec::with_capacity(rows.len());
    for row in &rows {
        match row_to_contact(row) {
            Ok(contact) => contacts.push(contact),
            Err(DbError::Corrupt { reason, .. }) => log::warn!("Skipping contact row: {}", reason),
            Err(e) => return Err(e),
        }
    }
    Ok(contacts)
}

pub async fn load_store(pool: &Pool<Sqlite>, session_id: i64) -> Result<MemoryLogStore, DbError> {
    let contacts = load_contacts(pool, session_id).await?;
    log::debug!("Loaded {} contacts for session {}", contacts.len(), session_id);
    Ok(MemoryLogStore::from_contacts(contacts))
}

async fn upsert<'e, E>(executor: E, contact: &Contact) -> Result<(), sqlx::Error>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let sql = format!(
        "INSERT OR REPLACE INTO contacts ({}, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, datetime('now'))",
        COLUMNS
    );
    sqlx::query(&sql)
        .bind(contact.id.to_string())
        .bind(contact.session_id)
        .bind(timestamp_text(&contact.timestamp))
        .bind(&contact.station_call)
        .bind(&contact.call)
        .bind(&contact.band)
        .bind(&contact.mode)
        .bind(&contact.freq)
        .bind(&contact.tx_freq)
        .bind(&contact.rst_sent)
        .bind(&contact.rst_rcvd)
        .bind(&contact.sent_nr)
        .bind(&contact.rcv_nr)
        .bind(&contact.exchange1)
        .bind(&contact.sect)
        .bind(&contact.name)
        .bind(&contact.prec)
        .bind(&contact.ck)
        .bind(&contact.zone)
        .bind(&contact.wpx_prefix)
        .bind(&contact.country_prefix)
        .bind(&contact.continent)
        .bind(&contact.grid)
        .bind(&contact.comment)
        .bind(i64::from(contact.points))
        .bind(contact.mults.m1 as i64)
        .bind(contact.mults.m2 as i64)
        .bind(contact.mults.m3 as i64)
        .bind(contact.dupe as i64)
        .bind(contact.claimed as i64)
        .execute(executor)
        .await?;
    Ok(())
}

pub async fn save_contact(pool: &Pool<Sqlite>, contact: &Contact) -> Result<(), DbError> {
    upsert(pool, contact).await?;
    Ok(())
}

pub async fn delete_contact(pool: &Pool<Sqlite>, id: Uuid) -> Result<bool, DbError> {
    let result = sqlx::query("DELETE FROM contacts WHERE uuid = ?")
        .bind(id.to_string())
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Write everything the store changed since the last flush, in one
/// transaction. Returns the number of rows touched.
pub async fn flush_store(pool: &Pool<Sqlite>, store: &mut MemoryLogStore) -> Result<usize, DbError> {
    let changes = store.take_changes();
    if changes.is_empty() {
        return Ok(0);
    }

    let mut tx = pool.begin().await?;
    for change in &changes {
        match *change {
            StoreChange::Persisted(id) => match store.get(id) {
                Ok(Some(contact)) => upsert(&mut *tx, &contact).await?,
                _ => log::warn!("Contact {} vanished before flush", id),
            },
            StoreChange::Deleted(id) => {
                sqlx::query("DELETE FROM contacts WHERE uuid = ?")
                    .bind(id.to_string())
                    .execute(&mut *tx)
                    .await?;
            }
        }
    }
    tx.commit().await?;

    log::debug!("Flushed {} contact changes", changes.len());
    Ok(changes.len())
}
