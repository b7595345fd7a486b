/// SQL migration for the initial schema
///
/// - One row per contest session; its configuration is a JSON blob
/// - One row per contact, every field a column so rows can be inspected
///   and repaired with plain SQL
/// - Timestamps are RFC 3339 UTC text, which sorts chronologically
pub const MIGRATION_001: &str = r#"
-- =============================================================================
-- Contest sessions
-- =============================================================================
CREATE TABLE IF NOT EXISTS contest_sessions (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    contest         TEXT NOT NULL,          -- registry name, e.g. "CQ WW CW"
    config          TEXT NOT NULL DEFAULT '{}',
    created_at      TEXT NOT NULL,
    updated_at      TEXT NOT NULL
);

-- =============================================================================
-- Contacts
-- =============================================================================
CREATE TABLE IF NOT EXISTS contacts (
    uuid            TEXT PRIMARY KEY,
    session_id      INTEGER NOT NULL REFERENCES contest_sessions(id),
    ts              TEXT NOT NULL,          -- 2026-11-28T00:00:00Z
    station_call    TEXT NOT NULL DEFAULT '',
    call            TEXT NOT NULL,
    band            TEXT NOT NULL,          -- e.g. "20"
    mode            TEXT NOT NULL,
    freq            TEXT NOT NULL,          -- kHz
    tx_freq         TEXT NOT NULL DEFAULT '',

    -- EXCHANGE
    rst_sent        TEXT NOT NULL DEFAULT '',
    rst_rcvd        TEXT NOT NULL DEFAULT '',
    sent_nr         TEXT NOT NULL DEFAULT '',
    rcv_nr          TEXT NOT NULL DEFAULT '',
    exchange1       TEXT NOT NULL DEFAULT '',
    sect            TEXT NOT NULL DEFAULT '',
    name            TEXT NOT NULL DEFAULT '',
    prec            TEXT NOT NULL DEFAULT '',
    ck              TEXT NOT NULL DEFAULT '',
    zone            TEXT NOT NULL DEFAULT '',

    -- GEOGRAPHY
    wpx_prefix      TEXT NOT NULL DEFAULT '',
    country_prefix  TEXT NOT NULL DEFAULT '',
    continent       TEXT NOT NULL DEFAULT '',
    grid            TEXT NOT NULL DEFAULT '',
    comment         TEXT NOT NULL DEFAULT '',

    -- SCORING
    points          INTEGER NOT NULL DEFAULT 0,
    is_mult1        INTEGER NOT NULL DEFAULT 0,
    is_mult2        INTEGER NOT NULL DEFAULT 0,
    is_mult3        INTEGER NOT NULL DEFAULT 0,
    dupe            INTEGER NOT NULL DEFAULT 0,
    claimed         INTEGER NOT NULL DEFAULT 1,

    updated_at      TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_contacts_session_ts ON contacts(session_id, ts);
CREATE INDEX IF NOT EXISTS idx_contacts_dupe ON contacts(session_id, call, band, mode)
"#;
