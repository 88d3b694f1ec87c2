//! Durable key-value slot holding the serialized store state.
//!
//! # Responsibility
//! - Provide `StateRepository`, the store's only persistence dependency.
//! - Implement it over a SQLite `kv_slots` table and over process memory.
//!
//! # Invariants
//! - One slot key maps to exactly one JSON record.
//! - `load_or_default` never propagates read or decode failures.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::state::StoreState;
use log::{debug, warn};
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Slot key used when callers do not pick one.
pub const DEFAULT_SLOT_KEY: &str = "flashcards_state";

pub type RepoResult<T> = Result<T, RepoError>;

/// Errors from reading or writing the state slot.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// State could not be serialized.
    Encode(serde_json::Error),
    /// Stored record is not a valid state document.
    Decode(serde_json::Error),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode state: {err}"),
            Self::Decode(err) => write!(f, "malformed stored state: {err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "state repository requires schema version {expected_version}, got {actual_version}"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) | Self::Decode(err) => Some(err),
            Self::UninitializedConnection { .. } => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Save/load contract between the store and durable storage.
pub trait StateRepository {
    /// Writes the full state, replacing any earlier record.
    fn save_state(&self, state: &StoreState) -> RepoResult<()>;

    /// Reads the last saved state; `Ok(None)` when nothing was saved yet.
    fn load_state(&self) -> RepoResult<Option<StoreState>>;

    /// Reads the last saved state, degrading to empty state on any failure.
    fn load_or_default(&self) -> StoreState {
        match self.load_state() {
            Ok(Some(state)) => {
                debug!(
                    "event=state_load module=repo status=ok decks={}",
                    state.decks.len()
                );
                state
            }
            Ok(None) => {
                debug!("event=state_load module=repo status=empty");
                StoreState::default()
            }
            Err(err) => {
                warn!("event=state_load module=repo status=error fallback=empty error={err}");
                StoreState::default()
            }
        }
    }
}

impl<T: StateRepository + ?Sized> StateRepository for &T {
    fn save_state(&self, state: &StoreState) -> RepoResult<()> {
        (**self).save_state(state)
    }

    fn load_state(&self) -> RepoResult<Option<StoreState>> {
        (**self).load_state()
    }
}

fn decode_slot(raw: Option<String>) -> RepoResult<Option<StoreState>> {
    raw.map(|text| StoreState::decode(&text).map_err(RepoError::Decode))
        .transpose()
}

/// SQLite-backed state slot.
pub struct SqliteStateRepository<'conn> {
    conn: &'conn Connection,
    slot_key: String,
}

impl<'conn> SqliteStateRepository<'conn> {
    /// Creates a repository over a migrated connection using the default slot.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        Self::with_slot_key(conn, DEFAULT_SLOT_KEY)
    }

    /// Creates a repository over a migrated connection and explicit slot key.
    pub fn with_slot_key(conn: &'conn Connection, slot_key: impl Into<String>) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self {
            conn,
            slot_key: slot_key.into(),
        })
    }

    pub fn slot_key(&self) -> &str {
        &self.slot_key
    }

    /// Returns the raw stored record text, if any.
    pub fn load_raw(&self) -> RepoResult<Option<String>> {
        let raw = self
            .conn
            .query_row(
                "SELECT value FROM kv_slots WHERE slot_key = ?1;",
                [self.slot_key.as_str()],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(raw)
    }

    /// Overwrites the slot with arbitrary text.
    pub fn save_raw(&self, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO kv_slots (slot_key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(slot_key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![self.slot_key.as_str(), value],
        )?;
        Ok(())
    }

    /// Removes the slot; later loads see no saved state.
    pub fn clear(&self) -> RepoResult<()> {
        self.conn.execute(
            "DELETE FROM kv_slots WHERE slot_key = ?1;",
            [self.slot_key.as_str()],
        )?;
        Ok(())
    }
}

impl StateRepository for SqliteStateRepository<'_> {
    fn save_state(&self, state: &StoreState) -> RepoResult<()> {
        let encoded = state.encode().map_err(RepoError::Encode)?;
        self.save_raw(&encoded)
    }

    fn load_state(&self) -> RepoResult<Option<StoreState>> {
        decode_slot(self.load_raw()?)
    }
}

/// In-process state slot.
///
/// Stores the encoded record so decoding behaves exactly like durable slots.
#[derive(Debug, Default)]
pub struct MemoryStateRepository {
    slot: RefCell<Option<String>>,
    saves: RefCell<usize>,
}

impl MemoryStateRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a slot pre-filled with raw record text.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: RefCell::new(Some(raw.into())),
            saves: RefCell::new(0),
        }
    }

    pub fn raw(&self) -> Option<String> {
        self.slot.borrow().clone()
    }

    /// Number of successful `save_state` calls.
    pub fn save_count(&self) -> usize {
        *self.saves.borrow()
    }
}

impl StateRepository for MemoryStateRepository {
    fn save_state(&self, state: &StoreState) -> RepoResult<()> {
        let encoded = state.encode().map_err(RepoError::Encode)?;
        *self.slot.borrow_mut() = Some(encoded);
        *self.saves.borrow_mut() += 1;
        Ok(())
    }

    fn load_state(&self) -> RepoResult<Option<StoreState>> {
        decode_slot(self.raw())
    }
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }
    Ok(())
}
