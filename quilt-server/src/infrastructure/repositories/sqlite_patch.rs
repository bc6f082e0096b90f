use crate::application::ports::{PatchRepository, StoreError};
use crate::domain::{Clock, NewPatch, Patch, PatchId, Timestamp};
use crate::infrastructure::clock::SystemClock;
use async_trait::async_trait;
use chrono::DateTime;
use parking_lot::Mutex;
use rusqlite::{Connection, params};
use std::path::Path;
use std::sync::Arc;

pub const SCHEMA_VERSION: i64 = 1;

const SCHEMA_V1: &str = "
    CREATE TABLE IF NOT EXISTS patches (
        id        INTEGER PRIMARY KEY AUTOINCREMENT,
        color     TEXT    NOT NULL,
        message   TEXT    NOT NULL,
        ai_line   TEXT    NOT NULL DEFAULT '',
        timestamp INTEGER NOT NULL
    );
";

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}

/// SQLite-backed patch store
///
/// rusqlite::Connection is !Sync, so it lives behind a mutex together with
/// the last assigned timestamp. All statements run on the blocking pool.
pub struct SqlitePatchRepository {
    inner: Arc<Mutex<Inner>>,
    clock: Arc<dyn Clock>,
}

struct Inner {
    conn: Connection,
    /// Highest timestamp handed out so far, in microseconds
    last_micros: i64,
}

impl SqlitePatchRepository {
    /// Open (or create) a database file
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::open_with_clock(path, Arc::new(SystemClock::new()))
    }

    pub fn open_with_clock(
        path: impl AsRef<Path>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        // journal_mode answers with a row, so it can't go through execute()
        let _mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
        Self::from_connection(conn, clock)
    }

    /// Private database that vanishes with the repository
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::open_in_memory_with_clock(Arc::new(SystemClock::new()))
    }

    pub fn open_in_memory_with_clock(clock: Arc<dyn Clock>) -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?, clock)
    }

    fn from_connection(conn: Connection, clock: Arc<dyn Clock>) -> Result<Self, StoreError> {
        migrate(&conn)?;
        let last_micros: i64 =
            conn.query_row("SELECT COALESCE(MAX(timestamp), 0) FROM patches", [], |row| {
                row.get(0)
            })?;

        Ok(SqlitePatchRepository {
            inner: Arc::new(Mutex::new(Inner { conn, last_micros })),
            clock,
        })
    }

    pub fn schema_version(&self) -> Result<i64, StoreError> {
        let inner = self.inner.lock();
        Ok(inner
            .conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))?)
    }

    async fn run_blocking<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&mut Inner) -> Result<T, StoreError> + Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || {
            let mut guard = inner.lock();
            f(&mut *guard)
        })
        .await
        .map_err(|e| StoreError::TaskFailed(e.to_string()))?
    }
}

fn migrate(conn: &Connection) -> Result<(), StoreError> {
    let current: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
    if current > SCHEMA_VERSION {
        return Err(StoreError::UnsupportedSchema {
            found: current,
            supported: SCHEMA_VERSION,
        });
    }

    if current < 1 {
        conn.execute_batch(SCHEMA_V1)?;
        conn.execute("PRAGMA user_version = 1", [])?;
    }

    Ok(())
}

fn decode_timestamp(id: i64, micros: i64) -> Result<Timestamp, StoreError> {
    DateTime::from_timestamp_micros(micros).ok_or_else(|| StoreError::Corrupt {
        id,
        reason: format!("timestamp {} out of range", micros),
    })
}

#[async_trait]
impl PatchRepository for SqlitePatchRepository {
    async fn append(&self, patch: NewPatch) -> Result<Patch, StoreError> {
        let now_micros = self.clock.now_micros();

        self.run_blocking(move |inner| {
            // Never hand out a timestamp older than the previous one
            let micros = now_micros.max(inner.last_micros);

            inner.conn.execute(
                "INSERT INTO patches (color, message, ai_line, timestamp) VALUES (?1, ?2, ?3, ?4)",
                params![patch.color, patch.message, patch.ai_line, micros],
            )?;
            let id = inner.conn.last_insert_rowid();
            inner.last_micros = micros;

            let timestamp = decode_timestamp(id, micros)?;
            Ok(patch.into_patch(PatchId::new(id), timestamp))
        })
        .await
    }

    async fn list_all(&self) -> Result<Vec<Patch>, StoreError> {
        self.run_blocking(|inner| {
            let mut stmt = inner.conn.prepare(
                "SELECT id, color, message, ai_line, timestamp
                 FROM patches
                 ORDER BY timestamp ASC, id ASC",
            )?;

            let rows = stmt
                .query_map([], |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, i64>(4)?,
                    ))
                })?
                .collect::<Result<Vec<_>, _>>()?;

            rows.into_iter()
                .map(|(id, color, message, ai_line, micros)| -> Result<Patch, StoreError> {
                    Ok(NewPatch::new(color, message)
                        .with_ai_line(ai_line)
                        .into_patch(PatchId::new(id), decode_timestamp(id, micros)?))
                })
                .collect()
        })
        .await
    }

    async fn count(&self) -> Result<usize, StoreError> {
        self.run_blocking(|inner| {
            let count: i64 = inner
                .conn
                .query_row("SELECT COUNT(*) FROM patches", [], |row| row.get(0))?;
            Ok(count as usize)
        })
        .await
    }
}
