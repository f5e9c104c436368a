//! SQLite card record store
//!
//! One table of ten-field card records plus a store-assigned row id and
//! an optional image blob. The cardholder name is the unique human key
//! used by the edit form; the row id is the machine key.

use std::path::Path;

use rusqlite::{params, Connection, ErrorCode, Row};
use tracing::info;

use super::StoreError;
use crate::classify::CardRecord;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS cards (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    company_name  TEXT NOT NULL,
    card_holder   TEXT NOT NULL UNIQUE,
    designation   TEXT NOT NULL,
    mobile_number TEXT NOT NULL,
    email         TEXT NOT NULL,
    website       TEXT NOT NULL,
    area          TEXT NOT NULL,
    city          TEXT NOT NULL,
    state         TEXT NOT NULL,
    pin_code      TEXT NOT NULL,
    image         BLOB
)";

const RECORD_COLUMNS: &str = "id, company_name, card_holder, designation, mobile_number, \
     email, website, area, city, state, pin_code, image";

/// Embedded record store. The connection lives as long as the handle;
/// each operation borrows it for its own scope, so release is guaranteed
/// on every exit path.
pub struct CardStore {
    conn: Connection,
}

impl CardStore {
    /// Open (or create) the database at `path` and ensure the schema.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.ensure_schema()?;
        info!(path = %path.display(), "card store opened");
        Ok(store)
    }

    /// In-memory store for tests.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.ensure_schema()?;
        Ok(store)
    }

    /// Idempotent create-if-absent of the cards table.
    pub fn ensure_schema(&self) -> Result<(), StoreError> {
        self.conn.execute(SCHEMA, [])?;
        Ok(())
    }

    /// Append a new record, returning the assigned row id.
    ///
    /// A uniqueness violation on the cardholder name maps to
    /// [`StoreError::Duplicate`], which callers surface as "already
    /// exists" rather than propagating as fatal.
    pub fn insert(&self, record: &CardRecord) -> Result<i64, StoreError> {
        let result = self.conn.execute(
            "INSERT INTO cards (company_name, card_holder, designation, mobile_number, \
             email, website, area, city, state, pin_code, image) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                record.company_name,
                record.card_holder,
                record.designation,
                record.mobile_number,
                record.email,
                record.website,
                record.area,
                record.city,
                record.state,
                record.pin_code,
                record.image,
            ],
        );

        match result {
            Ok(_) => Ok(self.conn.last_insert_rowid()),
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == ErrorCode::ConstraintViolation =>
            {
                Err(StoreError::Duplicate(record.card_holder.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// All stored cardholder names, for selection lists.
    pub fn list_holder_names(&self) -> Result<Vec<String>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT card_holder FROM cards ORDER BY card_holder")?;
        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(names)
    }

    /// Full row lookup by cardholder name.
    pub fn fetch_by_holder(&self, name: &str) -> Result<Option<CardRecord>, StoreError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {RECORD_COLUMNS} FROM cards WHERE card_holder = ?1"
        ))?;
        let mut rows = stmt.query_map(params![name], row_to_record)?;
        match rows.next() {
            Some(record) => Ok(Some(record?)),
            None => Ok(None),
        }
    }

    /// Full-field overwrite of all non-key fields, keyed by the record's
    /// cardholder name. A missing holder is a no-op.
    pub fn update_by_holder(&self, record: &CardRecord) -> Result<(), StoreError> {
        self.conn.execute(
            "UPDATE cards SET company_name = ?1, designation = ?2, mobile_number = ?3, \
             email = ?4, website = ?5, area = ?6, city = ?7, state = ?8, pin_code = ?9 \
             WHERE card_holder = ?10",
            params![
                record.company_name,
                record.designation,
                record.mobile_number,
                record.email,
                record.website,
                record.area,
                record.city,
                record.state,
                record.pin_code,
                record.card_holder,
            ],
        )?;
        Ok(())
    }

    /// Remove a record by row id. Idempotent; a missing id is a no-op.
    pub fn delete_by_id(&self, id: i64) -> Result<(), StoreError> {
        self.conn
            .execute("DELETE FROM cards WHERE id = ?1", params![id])?;
        Ok(())
    }

    /// Remove a record by cardholder name. Idempotent; a missing name is
    /// a no-op.
    pub fn delete_by_holder(&self, name: &str) -> Result<(), StoreError> {
        self.conn
            .execute("DELETE FROM cards WHERE card_holder = ?1", params![name])?;
        Ok(())
    }
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<CardRecord> {
    Ok(CardRecord {
        id: Some(row.get(0)?),
        company_name: row.get(1)?,
        card_holder: row.get(2)?,
        designation: row.get(3)?,
        mobile_number: row.get(4)?,
        email: row.get(5)?,
        website: row.get(6)?,
        area: row.get(7)?,
        city: row.get(8)?,
        state: row.get(9)?,
        pin_code: row.get(10)?,
        image: row.get(11)?,
    })
}
