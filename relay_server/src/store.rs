//! Append-only SQLite store of observed quotes.
//!
//! Each append opens its own connection on a blocking thread, creates the
//! `cotacoes` table if it is missing and inserts one row. There is no separate
//! migration step and no read path. SQLite serialises concurrent writers;
//! `CREATE TABLE IF NOT EXISTS` makes repeated schema creation a no-op.
//!
//! The deadline lives in the orchestrator. When it fires, the append future is
//! dropped and the running statement is interrupted through rusqlite's
//! `InterruptHandle`, so the blocking thread is released promptly.
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use log::debug;
use quote_relay_common::Quote;
use rusqlite::{Connection, InterruptHandle, params};
use tokio::task::spawn_blocking;

use crate::error::PersistenceError;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS cotacoes (\
    id INTEGER PRIMARY KEY AUTOINCREMENT, \
    valor TEXT, \
    timestamp DATETIME DEFAULT CURRENT_TIMESTAMP)";

const INSERT_QUOTE: &str =
    "INSERT INTO cotacoes (valor) VALUES (?1) RETURNING id, valor, timestamp";

/// Persisted form of a `Quote`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRecord {
    /// Auto-incremented row id.
    pub id: i64,
    /// Bid value as written.
    pub value: String,
    /// Insertion time assigned by the database (UTC).
    pub observed_at: NaiveDateTime,
}

/// Durable sink for quotes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuoteStore: Send + Sync {
    /// Append one record for `quote`. A single attempt.
    async fn append(&self, quote: &Quote) -> Result<QuoteRecord, PersistenceError>;
}

/// `QuoteStore` writing to a SQLite file.
pub struct SqliteQuoteStore {
    path: PathBuf,
    busy_timeout: Duration,
}

impl SqliteQuoteStore {
    /// Store at `path`. `busy_timeout` bounds how long a write waits on a
    /// lock held by another connection.
    pub fn new(path: impl Into<PathBuf>, busy_timeout: Duration) -> Self {
        Self {
            path: path.into(),
            busy_timeout,
        }
    }

    /// Location of the database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the table if it is missing. Run once at start-up; appends repeat it.
    pub async fn ensure_schema(&self) -> Result<(), PersistenceError> {
        let path = self.path.clone();
        let busy_timeout = self.busy_timeout;
        spawn_blocking(move || -> Result<(), PersistenceError> {
            let conn = open(&path, busy_timeout)?;
            conn.execute(CREATE_TABLE, [])?;
            Ok(())
        })
        .await
        .map_err(|e| PersistenceError::Worker(e.to_string()))?
    }
}

#[async_trait]
impl QuoteStore for SqliteQuoteStore {
    async fn append(&self, quote: &Quote) -> Result<QuoteRecord, PersistenceError> {
        let path = self.path.clone();
        let busy_timeout = self.busy_timeout;
        let value = quote.bid().to_string();

        let slot = Arc::new(InterruptSlot::default());
        let mut guard = InterruptOnDrop::new(Arc::clone(&slot));

        let record = spawn_blocking(move || -> Result<QuoteRecord, PersistenceError> {
            let conn = open(&path, busy_timeout)?;
            slot.register(conn.get_interrupt_handle())?;
            conn.execute(CREATE_TABLE, [])?;
            let record = conn.query_row(INSERT_QUOTE, params![value], |row| {
                Ok(QuoteRecord {
                    id: row.get(0)?,
                    value: row.get(1)?,
                    observed_at: row.get(2)?,
                })
            })?;
            Ok(record)
        })
        .await
        .map_err(|e| PersistenceError::Worker(e.to_string()))??;

        guard.disarm();
        debug!("Quote record {} written to {}", record.id, self.path.display());
        Ok(record)
    }
}

fn open(path: &Path, busy_timeout: Duration) -> Result<Connection, PersistenceError> {
    let conn = Connection::open(path)?;
    conn.busy_timeout(busy_timeout)?;
    Ok(conn)
}

enum SlotState {
    Empty,
    Registered(InterruptHandle),
    Cancelled,
}

/// Hand-off point for the interrupt handle between the blocking worker and
/// the async caller.
struct InterruptSlot {
    state: Mutex<SlotState>,
}

impl Default for InterruptSlot {
    fn default() -> Self {
        Self {
            state: Mutex::new(SlotState::Empty),
        }
    }
}

impl InterruptSlot {
    /// Publish the worker's handle. Fails if the caller already gave up.
    fn register(&self, handle: InterruptHandle) -> Result<(), PersistenceError> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if matches!(*state, SlotState::Cancelled) {
            return Err(PersistenceError::Worker(
                "append cancelled before it started".to_string(),
            ));
        }
        *state = SlotState::Registered(handle);
        Ok(())
    }

    fn cancel(&self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if let SlotState::Registered(handle) = &*state {
            handle.interrupt();
        }
        *state = SlotState::Cancelled;
    }
}

/// Interrupts the worker's statement if the append future is dropped early.
struct InterruptOnDrop {
    slot: Arc<InterruptSlot>,
    armed: bool,
}

impl InterruptOnDrop {
    fn new(slot: Arc<InterruptSlot>) -> Self {
        Self { slot, armed: true }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for InterruptOnDrop {
    fn drop(&mut self) {
        if self.armed {
            self.slot.cancel();
        }
    }
}
