//! File and database storage operations
//!
//! This module handles all I/O at the edges of the pipeline:
//! - Delimited text extraction
//! - SQLite table loading and read-back

mod delimited;
mod sqlite;

pub use delimited::CsvReader;
pub use sqlite::{SqliteReader, SqliteWriter};
