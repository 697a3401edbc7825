//! CLI helper functions

use crate::{
    etl::{EventSink, Pipeline},
    storage::{CsvReader, SqliteWriter},
    transform::TitanicCleaner,
};
use eyre::Result;
use std::path::PathBuf;
use std::sync::Arc;

pub const DEFAULT_INPUT: &str = "train.csv";
pub const DEFAULT_DATABASE: &str = "titanic.db";
pub const DEFAULT_TABLE: &str = "train_cleaned";

/// The three parameters of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobConfig {
    /// CSV file to extract from
    pub input: PathBuf,
    /// SQLite database to load into
    pub database: PathBuf,
    /// Destination table, replaced on every run
    pub table: String,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            database: PathBuf::from(DEFAULT_DATABASE),
            table: DEFAULT_TABLE.to_string(),
        }
    }
}

impl JobConfig {
    /// Load the job configuration from environment variables
    ///
    /// Expected environment variables (all optional):
    /// - TITANIC_INPUT: CSV file to read (default `train.csv`)
    /// - TITANIC_DATABASE: SQLite database path (default `titanic.db`)
    /// - TITANIC_TABLE: destination table name (default `train_cleaned`)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            input: std::env::var("TITANIC_INPUT")
                .map(PathBuf::from)
                .unwrap_or(defaults.input),
            database: std::env::var("TITANIC_DATABASE")
                .map(PathBuf::from)
                .unwrap_or(defaults.database),
            table: std::env::var("TITANIC_TABLE").unwrap_or(defaults.table),
        }
    }

    /// Replace any field given on the command line
    pub fn with_overrides(
        mut self,
        input: Option<PathBuf>,
        database: Option<PathBuf>,
        table: Option<String>,
    ) -> Self {
        if let Some(input) = input {
            self.input = input;
        }
        if let Some(database) = database {
            self.database = database;
        }
        if let Some(table) = table {
            self.table = table;
        }
        self
    }
}

/// Run the whole job
///
/// Pipeline: CsvReader → TitanicCleaner → SqliteWriter
///
/// Returns the number of rows loaded. The first failing stage ends the run
/// and its error is returned as-is.
pub fn run_job(config: &JobConfig, sink: Arc<dyn EventSink>) -> Result<usize> {
    let extractor = CsvReader::new(&config.input).with_sink(sink.clone());
    let transformer = TitanicCleaner::new().with_sink(sink.clone());
    let loader = SqliteWriter::new(&config.database, config.table.as_str()).with_sink(sink.clone());

    Pipeline::new(extractor, transformer, loader)
        .with_sink(sink)
        .run()
}
