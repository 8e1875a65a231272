//! loader: import a CSV file into the SQLite database the API serves from.
//!
//! Drops and recreates a table named after the CSV file's base name, with
//! every column typed as TEXT, then bulk-inserts all rows. Run once per
//! dataset refresh, never concurrently with the server.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use countyhealth::ingest::import_csv;

/// Import a CSV file into a SQLite database
#[derive(Parser, Debug)]
#[command(name = "loader", version, about)]
struct Args {
    /// Output SQLite database file (e.g., data.db)
    database: PathBuf,

    /// Input CSV file with a header row
    csvfile: PathBuf,
}

fn main() -> ExitCode {
    let args = Args::parse();

    match import_csv(&args.database, &args.csvfile) {
        Ok(summary) => {
            println!(
                "Imported {} rows ({} columns) into table {} of {}",
                summary.rows,
                summary.columns,
                summary.table,
                args.database.display()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
