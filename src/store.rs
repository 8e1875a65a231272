//! Read-only SQLite access for health ranking lookups.
//!
//! Each lookup opens its own read-only connection and releases it when the
//! call returns, on every exit path. The service never writes; the table is
//! produced offline by the loader (see `ingest`).

use std::path::PathBuf;

use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};
use serde::{Deserialize, Serialize};

use crate::validate::LookupRequest;

/// Column order of the health rankings table. `HealthRecord` fields map to
/// these positionally, so the two sequences must stay in sync.
const COLUMNS: [&str; 14] = [
    "State",
    "County",
    "State_code",
    "County_code",
    "Year_span",
    "Measure_name",
    "Measure_id",
    "Numerator",
    "Denominator",
    "Raw_value",
    "Confidence_Interval_Lower_Bound",
    "Confidence_Interval_Upper_Bound",
    "Data_Release_Year",
    "fipscode",
];

/// One health-measure observation for a county.
///
/// Every field is text, preserving the source formatting (leading zeros in
/// codes, year spans like "2005-2011") with no lossy numeric coercion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthRecord {
    pub state: String,
    pub county: String,
    pub state_code: String,
    pub county_code: String,
    pub year_span: String,
    pub measure_name: String,
    pub measure_id: String,
    pub numerator: String,
    pub denominator: String,
    pub raw_value: String,
    pub confidence_interval_lower_bound: String,
    pub confidence_interval_upper_bound: String,
    pub data_release_year: String,
    pub fipscode: String,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The messages rusqlite produces here do not contain the database
    /// path, so they are safe to surface to callers.
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Handle to the persisted health rankings table.
///
/// Cheap to clone; holds no open connection. Connections are opened per
/// lookup inside [`Store::lookup`].
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
    table: String,
}

impl Store {
    /// Create a store for the given database file and table.
    ///
    /// The table name must already be validated as an SQL identifier
    /// (config load does this); it is the only value interpolated into SQL.
    pub fn new(path: PathBuf, table: String) -> Self {
        Self { path, table }
    }

    /// Fetch rows for a validated request, most recent year span first.
    ///
    /// Returns an empty Vec when nothing matches; the caller decides how to
    /// report that. The request's ZIP does not narrow the query: the table
    /// is keyed by county and carries no ZIP column.
    pub fn lookup(&self, request: &LookupRequest) -> Result<Vec<HealthRecord>, StoreError> {
        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        let sql = format!(
            "SELECT {columns} FROM \"{table}\" \
             WHERE Measure_name = ?1 \
             ORDER BY Year_span DESC \
             LIMIT ?2",
            columns = COLUMNS.join(", "),
            table = self.table,
        );

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(
            rusqlite::params![request.measure_name, request.limit],
            record_from_row,
        )?;

        rows.collect::<Result<Vec<_>, _>>().map_err(StoreError::from)
    }
}

fn record_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<HealthRecord> {
    Ok(HealthRecord {
        state: text_value(row, 0)?,
        county: text_value(row, 1)?,
        state_code: text_value(row, 2)?,
        county_code: text_value(row, 3)?,
        year_span: text_value(row, 4)?,
        measure_name: text_value(row, 5)?,
        measure_id: text_value(row, 6)?,
        numerator: text_value(row, 7)?,
        denominator: text_value(row, 8)?,
        raw_value: text_value(row, 9)?,
        confidence_interval_lower_bound: text_value(row, 10)?,
        confidence_interval_upper_bound: text_value(row, 11)?,
        data_release_year: text_value(row, 12)?,
        fipscode: text_value(row, 13)?,
    })
}

/// Read column `idx` as text, coercing non-text storage classes.
///
/// The loader writes everything as TEXT, but a hand-built database may
/// store numbers; render those instead of failing the row.
fn text_value(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<String> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Null => String::new(),
        ValueRef::Integer(n) => n.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        ValueRef::Blob(bytes) => String::from_utf8_lossy(bytes).into_owned(),
    })
}
