//! CSV to SQLite import, the library half of the `loader` binary.
//!
//! Rebuilds one table per CSV file: the table is named after the file's
//! base name, every column is TEXT, and any existing table of that name is
//! dropped first. Runs offline; the serving path never writes.

use std::path::Path;

use rusqlite::Connection;

use crate::config::is_sql_identifier;

/// What an import did, for logging and CLI output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub table: String,
    pub columns: usize,
    pub rows: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV file has no header row")]
    EmptyCsv,

    #[error("cannot derive a table name from {0:?}")]
    BadTableName(String),

    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Import `csv_path` into `db_path`, replacing the table named after the
/// CSV file's base name. All rows are inserted in a single transaction, so
/// a failed import leaves the previous table intact.
pub fn import_csv(db_path: &Path, csv_path: &Path) -> Result<ImportSummary, IngestError> {
    let table = table_name_for(csv_path)?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(csv_path)?;
    let header = reader.headers()?.clone();
    if header.is_empty() {
        return Err(IngestError::EmptyCsv);
    }

    let mut conn = Connection::open(db_path)?;
    let tx = conn.transaction()?;

    tx.execute_batch(&format!("DROP TABLE IF EXISTS \"{table}\""))?;

    let columns = header
        .iter()
        .map(|col| format!("\"{}\" TEXT", col.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(", ");
    tx.execute_batch(&format!("CREATE TABLE \"{table}\" ({columns})"))?;

    let placeholders = (1..=header.len())
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ");
    let mut rows = 0usize;
    {
        let mut insert =
            tx.prepare(&format!("INSERT INTO \"{table}\" VALUES ({placeholders})"))?;
        for record in reader.records() {
            let record = record?;
            insert.execute(rusqlite::params_from_iter(record.iter()))?;
            rows += 1;
        }
    }
    tx.commit()?;

    Ok(ImportSummary {
        table,
        columns: header.len(),
        rows,
    })
}

/// Derive the table name from the CSV file's base name, normalizing
/// characters SQLite identifiers cannot carry unquoted.
fn table_name_for(csv_path: &Path) -> Result<String, IngestError> {
    let stem = csv_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    let table: String = stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if is_sql_identifier(&table) {
        Ok(table)
    } else {
        Err(IngestError::BadTableName(csv_path.display().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn count_rows(db: &Path, table: &str) -> i64 {
        let conn = Connection::open(db).unwrap();
        conn.query_row(&format!("SELECT COUNT(*) FROM \"{table}\""), [], |row| {
            row.get(0)
        })
        .unwrap()
    }

    #[test]
    fn imports_rows_as_text() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("rankings.csv");
        fs::write(&csv_path, "State,County,fipscode\nMA,Middlesex County,25017\nMA,Suffolk County,25025\n").unwrap();
        let db_path = dir.path().join("data.db");

        let summary = import_csv(&db_path, &csv_path).unwrap();
        assert_eq!(
            summary,
            ImportSummary {
                table: "rankings".to_string(),
                columns: 3,
                rows: 2,
            }
        );

        let conn = Connection::open(&db_path).unwrap();
        let fips: String = conn
            .query_row(
                "SELECT fipscode FROM rankings WHERE County = 'Middlesex County'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        // Leading-zero-safe: stored as text, not coerced to a number.
        assert_eq!(fips, "25017");
    }

    #[test]
    fn reimport_replaces_existing_table() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("rankings.csv");
        let db_path = dir.path().join("data.db");

        fs::write(&csv_path, "a,b\n1,2\n3,4\n").unwrap();
        import_csv(&db_path, &csv_path).unwrap();
        assert_eq!(count_rows(&db_path, "rankings"), 2);

        fs::write(&csv_path, "a,b\n5,6\n").unwrap();
        import_csv(&db_path, &csv_path).unwrap();
        assert_eq!(count_rows(&db_path, "rankings"), 1);
    }

    #[test]
    fn empty_csv_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("rankings.csv");
        fs::write(&csv_path, "").unwrap();
        let db_path = dir.path().join("data.db");

        assert!(matches!(
            import_csv(&db_path, &csv_path),
            Err(IngestError::EmptyCsv)
        ));
    }

    #[test]
    fn header_only_csv_creates_empty_table() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("rankings.csv");
        fs::write(&csv_path, "a,b,c\n").unwrap();
        let db_path = dir.path().join("data.db");

        let summary = import_csv(&db_path, &csv_path).unwrap();
        assert_eq!(summary.rows, 0);
        assert_eq!(count_rows(&db_path, "rankings"), 0);
    }

    #[test]
    fn table_name_is_normalized_from_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("county-health rankings.csv");
        fs::write(&csv_path, "a\n1\n").unwrap();
        let db_path = dir.path().join("data.db");

        let summary = import_csv(&db_path, &csv_path).unwrap();
        assert_eq!(summary.table, "county_health_rankings");
    }
}
