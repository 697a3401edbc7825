//! Titanic ETL
//!
//! Reads the Titanic passenger manifest from CSV, cleans it, and loads it
//! into an SQLite table.

pub mod cli;
pub mod dataset;
pub mod error;
pub mod etl;
pub mod storage;
pub mod transform;

// Re-exports for convenience
pub use dataset::{Column, DataType, Dataset, Value};
pub use error::EtlError;
pub use etl::{Chain, EventSink, Extractor, LogSink, Loader, MemorySink, Pipeline, Transformer};
pub use storage::{CsvReader, SqliteReader, SqliteWriter};
pub use transform::TitanicCleaner;
