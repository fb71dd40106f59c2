//! TERRENO Storage - the prospect store
//!
//! One table in one local SQLite file. The store is append-only through its
//! public surface: `record_prospect` inserts, `list_prospects` reads
//! newest-first, and nothing updates or deletes individual rows. `reset`
//! clears the whole table and is only wired up outside production.
//!
//! Writes are durable before `record_prospect` returns (`synchronous=FULL`),
//! so a crash immediately after a successful call does not lose the record.
//! Callers share the store behind an `Arc`; a mutex around the single
//! connection serializes writers, which is the required single-writer
//! discipline for one local file.

use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection};

use terreno_core::{Language, NewProspect, Prospect, StorageError, StoreError, ValidationError, DEFAULT_SOURCE};

// ============================================================================
// SCHEMA
// ============================================================================

/// Idempotent schema, applied once when the store is opened - never again
/// on individual reads or writes.
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS prospects (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    name           TEXT NOT NULL,
    email          TEXT,
    phone          TEXT NOT NULL,
    source         TEXT NOT NULL DEFAULT 'direct',
    created_at     TEXT NOT NULL,
    property_label TEXT NOT NULL,
    language       TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_prospects_created_at
    ON prospects (created_at DESC, id DESC);
";

// ============================================================================
// PROSPECT STORE
// ============================================================================

/// SQLite-backed store for captured leads.
pub struct ProspectStore {
    conn: Mutex<Connection>,
}

impl ProspectStore {
    /// Open (or create) the store at `path` and apply the schema.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let conn = Connection::open(path.as_ref()).map_err(db_unavailable)?;
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(db_unavailable)?;
        // FULL so a committed insert survives a crash right after it returns.
        conn.pragma_update(None, "synchronous", "FULL")
            .map_err(db_unavailable)?;
        Self::from_connection(conn)
    }

    /// In-memory store for tests.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(db_unavailable)?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, StorageError> {
        conn.execute_batch(SCHEMA).map_err(db_unavailable)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Record a new lead.
    ///
    /// Fails with a validation error when `name` or `phone` is empty after
    /// trimming. On success the record is durably committed and returned
    /// with its store-assigned `id` and `created_at`.
    pub fn record_prospect(&self, input: NewProspect) -> Result<Prospect, StoreError> {
        self.record_prospect_at(input, Utc::now())
    }

    /// All captured leads, most recent first (ties broken by `id`
    /// descending). An unreachable or corrupt store is an error, never an
    /// empty list.
    pub fn list_prospects(&self) -> Result<Vec<Prospect>, StorageError> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, name, email, phone, source, created_at, property_label, language
                 FROM prospects
                 ORDER BY created_at DESC, id DESC",
            )
            .map_err(db_unavailable)?;

        let rows = stmt
            .query_map([], row_to_record)
            .map_err(db_unavailable)?
            .collect::<Result<Vec<RawRecord>, _>>()
            .map_err(db_unavailable)?;

        rows.into_iter().map(RawRecord::into_prospect).collect()
    }

    /// Number of captured leads.
    pub fn count(&self) -> Result<i64, StorageError> {
        let conn = self.lock()?;
        conn.query_row("SELECT COUNT(*) FROM prospects", [], |row| row.get(0))
            .map_err(db_unavailable)
    }

    /// Cheap connectivity probe for readiness checks.
    pub fn health_check(&self) -> Result<(), StorageError> {
        let conn = self.lock()?;
        conn.query_row("SELECT 1", [], |_| Ok(()))
            .map_err(db_unavailable)
    }

    /// Irreversibly discard all records. Non-production use only; the web
    /// layer does not register the corresponding route in production.
    pub fn reset(&self) -> Result<(), StorageError> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM prospects", [])
            .map_err(db_unavailable)?;
        tracing::warn!("prospect store reset: all records discarded");
        Ok(())
    }

    // internal: timestamp injectable so tests can pin tied timestamps
    fn record_prospect_at(
        &self,
        input: NewProspect,
        created_at: DateTime<Utc>,
    ) -> Result<Prospect, StoreError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(ValidationError::required("name").into());
        }
        let phone = input.phone.trim();
        if phone.is_empty() {
            return Err(ValidationError::required("phone").into());
        }

        let email = input
            .email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(str::to_string);
        let source = input
            .source
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SOURCE)
            .to_string();

        let conn = self.lock().map_err(StoreError::Storage)?;
        conn.execute(
            "INSERT INTO prospects (name, email, phone, source, created_at, property_label, language)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                name,
                email,
                phone,
                source,
                encode_timestamp(created_at),
                input.property_label,
                input.language.as_str(),
            ],
        )
        .map_err(|e| StoreError::Storage(db_unavailable(e)))?;
        let id = conn.last_insert_rowid();

        tracing::info!(id, source = %source, "prospect recorded");

        Ok(Prospect {
            id,
            name: name.to_string(),
            email,
            phone: phone.to_string(),
            source,
            created_at,
            property_label: input.property_label,
            language: input.language,
        })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, StorageError> {
        self.conn
            .lock()
            .map_err(|_| StorageError::unavailable("storage lock poisoned"))
    }
}

// ============================================================================
// ROW MAPPING
// ============================================================================

/// Row as read from SQLite, before the text columns are decoded. Keeping the
/// rusqlite mapping closure infallible-on-our-side lets column errors and
/// decode errors surface as distinct failures.
struct RawRecord {
    id: i64,
    name: String,
    email: Option<String>,
    phone: String,
    source: String,
    created_at: String,
    property_label: String,
    language: String,
}

fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawRecord> {
    Ok(RawRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        phone: row.get(3)?,
        source: row.get(4)?,
        created_at: row.get(5)?,
        property_label: row.get(6)?,
        language: row.get(7)?,
    })
}

impl RawRecord {
    fn into_prospect(self) -> Result<Prospect, StorageError> {
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|e| {
                StorageError::corrupt(format!(
                    "prospect {} has unreadable created_at {:?}: {}",
                    self.id, self.created_at, e
                ))
            })?
            .with_timezone(&Utc);
        let language = Language::parse(&self.language).ok_or_else(|| {
            StorageError::corrupt(format!(
                "prospect {} has unknown language {:?}",
                self.id, self.language
            ))
        })?;
        Ok(Prospect {
            id: self.id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            source: self.source,
            created_at,
            property_label: self.property_label,
            language,
        })
    }
}

/// Fixed-width RFC 3339 UTC so descending text order equals descending
/// chronological order.
fn encode_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn db_unavailable(err: rusqlite::Error) -> StorageError {
    tracing::error!(error = %err, "sqlite operation failed");
    StorageError::unavailable(err.to_string())
}

// ============================================================================
// TESTS
// ============================================================================
