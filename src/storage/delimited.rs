//! Delimited text (CSV) extraction

use crate::dataset::{Column, Dataset};
use crate::error::EtlError;
use crate::etl::{EventSink, Extractor, default_sink};

use csv::ReaderBuilder;
use eyre::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Read a delimited text file with a header row into a [`Dataset`]
///
/// Column types are inferred from the cells: all integers, then all
/// numbers, then text. Empty cells become missing values. Every row and
/// column of the file is kept.
pub struct CsvReader {
    path: PathBuf,
    delimiter: u8,
    sink: Arc<dyn EventSink>,
}

impl CsvReader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            delimiter: b',',
            sink: default_sink(),
        }
    }

    /// Use a field delimiter other than `,`
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Read the whole file
    ///
    /// # Errors
    /// [`EtlError::Read`] if the file is missing, unreadable, or malformed
    pub fn read(&self) -> Result<Dataset, EtlError> {
        self.sink.info(&format!("Extracting data from {}", self.path.display()));

        let dataset = self.parse().map_err(|err| {
            self.sink.error(&format!("Error reading CSV file: {}", err));
            err
        })?;

        let (rows, columns) = dataset.shape();
        self.sink.info(&format!("Data shape: ({}, {})", rows, columns));
        Ok(dataset)
    }

    fn parse(&self) -> Result<Dataset, EtlError> {
        let read_error = |source: csv::Error| EtlError::read(&self.path, source);

        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .from_path(&self.path)
            .map_err(read_error)?;

        let headers = dedupe_headers(reader.headers().map_err(read_error)?);
        if headers.is_empty() {
            return Err(EtlError::read(&self.path, "missing header row"));
        }

        let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
        for record in reader.records() {
            let record = record.map_err(read_error)?;
            for (column, field) in cells.iter_mut().zip(record.iter()) {
                column.push(field.to_string());
            }
        }

        let columns = headers
            .iter()
            .zip(&cells)
            .map(|(name, cells)| Column::from_cells(name.as_str(), cells))
            .collect();

        Dataset::from_columns(columns).map_err(|e| EtlError::read(&self.path, e.to_string()))
    }
}

/// Suffix repeated header names with `.1`, `.2`, ... so every column is addressable
fn dedupe_headers(headers: &csv::StringRecord) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(headers.len());
    for header in headers {
        let mut name = header.to_string();
        let mut suffix = 1;
        while names.contains(&name) {
            name = format!("{}.{}", header, suffix);
            suffix += 1;
        }
        names.push(name);
    }
    names
}

impl Extractor for CsvReader {
    type Output = Dataset;

    fn extract(&self) -> Result<Self::Output> {
        Ok(self.read()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{DataType, Value};
    use crate::etl::MemorySink;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_read_infers_types() {
        let file = write_csv(
            "PassengerId,Name,Age,Fare,Cabin\n\
             1,\"Braund, Mr. Owen Harris\",22,7.25,\n\
             2,\"Cumings, Mrs. John Bradley\",,71.2833,C85\n",
        );

        let dataset = CsvReader::new(file.path()).read().unwrap();

        assert_eq!(dataset.shape(), (2, 5));
        assert_eq!(
            dataset.column("PassengerId").unwrap().dtype(),
            DataType::Integer
        );
        assert_eq!(dataset.column("Age").unwrap().dtype(), DataType::Integer);
        assert_eq!(dataset.column("Fare").unwrap().dtype(), DataType::Float);
        assert_eq!(dataset.column("Cabin").unwrap().dtype(), DataType::Text);
        assert_eq!(
            dataset.column("Name").unwrap().values()[0],
            Value::Text("Braund, Mr. Owen Harris".to_string())
        );
        assert_eq!(dataset.missing_count(), 2);
    }

    #[test]
    fn test_read_logs_path_and_shape() {
        let file = write_csv("a,b\n1,2\n3,4\n5,6\n");
        let sink = Arc::new(MemorySink::new());

        CsvReader::new(file.path())
            .with_sink(sink.clone())
            .read()
            .unwrap();

        let info = sink.messages(log::Level::Info);
        assert_eq!(info.len(), 2);
        assert!(info[0].contains(&file.path().display().to_string()));
        assert_eq!(info[1], "Data shape: (3, 2)");
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("train.csv");
        let sink = Arc::new(MemorySink::new());

        let err = CsvReader::new(&path)
            .with_sink(sink.clone())
            .read()
            .unwrap_err();

        match err {
            EtlError::Read { path: failed, .. } => assert_eq!(failed, path),
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(sink.messages(log::Level::Error).len(), 1);
    }

    #[test]
    fn test_ragged_rows_are_read_error() {
        let file = write_csv("a,b\n1,2\n3\n");
        let err = CsvReader::new(file.path()).read().unwrap_err();
        assert!(matches!(err, EtlError::Read { .. }));
    }

    #[test]
    fn test_empty_file_is_read_error() {
        let file = write_csv("");
        let err = CsvReader::new(file.path()).read().unwrap_err();
        assert!(matches!(err, EtlError::Read { .. }));
    }

    #[test]
    fn test_header_only_file() {
        let file = write_csv("Age,Embarked\n");
        let dataset = CsvReader::new(file.path()).read().unwrap();
        assert_eq!(dataset.shape(), (0, 2));
    }

    #[test]
    fn test_custom_delimiter() {
        let file = write_csv("a;b\n1;x\n");
        let dataset = CsvReader::new(file.path())
            .with_delimiter(b';')
            .read()
            .unwrap();
        assert_eq!(dataset.column_names(), vec!["a", "b"]);
    }

    #[test]
    fn test_duplicate_headers_are_suffixed() {
        let file = write_csv("a,a,a\n1,2,3\n");
        let dataset = CsvReader::new(file.path()).read().unwrap();
        assert_eq!(dataset.column_names(), vec!["a", "a.1", "a.2"]);
    }

    #[test]
    fn test_extract_reports_typed_error() {
        let err = CsvReader::new("/nonexistent/train.csv")
            .extract()
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EtlError>(),
            Some(EtlError::Read { .. })
        ));
    }
}
