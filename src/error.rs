//! Error taxonomy for the ETL stages
//!
//! Every stage logs its failure through its [`EventSink`](crate::etl::EventSink)
//! and then returns one of these variants unchanged. The pipeline traits work
//! in `eyre::Result`, so callers holding a report can recover the kind with
//! `report.downcast_ref::<EtlError>()`.

use std::path::PathBuf;
use thiserror::Error;

/// Boxed cause of a read failure (CSV parser or SQLite driver)
pub type ReadCause = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum EtlError {
    /// The source is missing, unreadable, or not valid tabular data
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: ReadCause,
    },

    /// Columns the transformer depends on are absent from the dataset
    #[error("dataset is missing required column(s): {}", missing.join(", "))]
    SchemaMismatch { missing: Vec<String> },

    /// A column needs filling but holds no value to fill from
    #[error("column `{column}` has no non-missing values to impute from")]
    EmptyColumn { column: String },

    #[error("invalid table name {0:?}")]
    InvalidTableName(String),

    /// The store could not be opened or written
    #[error("failed to write table `{table}` in {}: {source}", location.display())]
    Write {
        location: PathBuf,
        table: String,
        #[source]
        source: rusqlite::Error,
    },
}

impl EtlError {
    pub fn read(path: impl Into<PathBuf>, source: impl Into<ReadCause>) -> Self {
        Self::Read {
            path: path.into(),
            source: source.into(),
        }
    }

    pub fn schema_mismatch<I, S>(missing: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::SchemaMismatch {
            missing: missing.into_iter().map(Into::into).collect(),
        }
    }

    pub fn empty_column(column: impl Into<String>) -> Self {
        Self::EmptyColumn {
            column: column.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_mismatch_lists_all_columns() {
        let err = EtlError::schema_mismatch(["Age", "Cabin"]);
        assert_eq!(
            err.to_string(),
            "dataset is missing required column(s): Age, Cabin"
        );
    }

    #[test]
    fn test_empty_column_message() {
        let err = EtlError::empty_column("Embarked");
        assert!(err.to_string().contains("`Embarked`"));
    }

    #[test]
    fn test_read_keeps_cause() {
        let cause = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = EtlError::read("train.csv", cause);
        assert_eq!(err.to_string(), "failed to read train.csv: no such file");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_downcast_from_report() {
        let report: eyre::Report = EtlError::schema_mismatch(["Age"]).into();
        match report.downcast_ref::<EtlError>() {
            Some(EtlError::SchemaMismatch { missing }) => assert_eq!(missing, &["Age"]),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
