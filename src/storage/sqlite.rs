//! SQLite table loading and read-back

use crate::dataset::{Column, DataType, Dataset, Value};
use crate::error::EtlError;
use crate::etl::{EventSink, Extractor, Loader, default_sink};

use eyre::Result;
use rusqlite::types::{ToSqlOutput, ValueRef};
use rusqlite::{Connection, OpenFlags, ToSql, params_from_iter};
use std::path::{Path, PathBuf};
use std::sync::Arc;

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Value::Null => ToSqlOutput::Owned(rusqlite::types::Value::Null),
            Value::Integer(i) => ToSqlOutput::Owned(rusqlite::types::Value::Integer(*i)),
            Value::Float(f) => ToSqlOutput::Owned(rusqlite::types::Value::Real(*f)),
            Value::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
        })
    }
}

/// Quote an identifier so any name, spaces included, is usable as-is
fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Write a [`Dataset`] into a table, replacing any table of the same name
///
/// The drop, create, and inserts share one transaction, so a failed load
/// leaves the previous table (or no table) behind rather than a partial one.
/// The connection is opened for each load and closed before returning.
///
/// # Example
/// ```no_run
/// use titanic_etl::dataset::Dataset;
/// use titanic_etl::storage::SqliteWriter;
///
/// # fn example(dataset: Dataset) -> eyre::Result<()> {
/// let writer = SqliteWriter::new("titanic.db", "train_cleaned");
/// let rows = writer.write(&dataset)?;
/// # Ok(())
/// # }
/// ```
pub struct SqliteWriter {
    path: PathBuf,
    table: String,
    sink: Arc<dyn EventSink>,
}

impl SqliteWriter {
    pub fn new(path: impl AsRef<Path>, table: impl Into<String>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            table: table.into(),
            sink: default_sink(),
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Replace the destination table with `dataset`
    ///
    /// Returns the number of rows written
    ///
    /// # Errors
    /// - [`EtlError::InvalidTableName`] for an empty name or one containing NUL
    /// - [`EtlError::Write`] if the database cannot be opened or written
    pub fn write(&self, dataset: &Dataset) -> Result<usize, EtlError> {
        self.sink.info(&format!(
            "Loading data into database: {}, table: {}",
            self.path.display(),
            self.table
        ));

        if self.table.is_empty() || self.table.contains('\0') {
            self.sink.error(&format!("Invalid table name {:?}", self.table));
            return Err(EtlError::InvalidTableName(self.table.clone()));
        }

        match self.replace_table(dataset) {
            Ok(count) => {
                self.sink.info("Data loaded successfully");
                Ok(count)
            }
            Err(source) => {
                self.sink.error(&format!(
                    "Error loading data into database {}, table {}: {}",
                    self.path.display(),
                    self.table,
                    source
                ));
                Err(EtlError::Write {
                    location: self.path.clone(),
                    table: self.table.clone(),
                    source,
                })
            }
        }
    }

    fn replace_table(&self, dataset: &Dataset) -> rusqlite::Result<usize> {
        let mut conn = Connection::open(&self.path)?;
        let count = write_table(&mut conn, &self.table, dataset)?;
        conn.close().map_err(|(_, err)| err)?;
        Ok(count)
    }
}

fn write_table(conn: &mut Connection, table: &str, dataset: &Dataset) -> rusqlite::Result<usize> {
    let table = quote_identifier(table);
    let names: Vec<String> = dataset
        .columns()
        .iter()
        .map(|c| quote_identifier(c.name()))
        .collect();
    let definitions: Vec<String> = dataset
        .columns()
        .iter()
        .zip(&names)
        .map(|(column, name)| format!("{} {}", name, sql_type(column)))
        .collect();
    let placeholders: Vec<String> = (1..=names.len()).map(|i| format!("?{}", i)).collect();

    let tx = conn.transaction()?;
    tx.execute(&format!("DROP TABLE IF EXISTS {}", table), [])?;
    tx.execute(
        &format!("CREATE TABLE {} ({})", table, definitions.join(", ")),
        [],
    )?;
    {
        let mut insert = tx.prepare(&format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table,
            names.join(", "),
            placeholders.join(", ")
        ))?;
        for row in dataset.rows() {
            insert.execute(params_from_iter(row))?;
        }
    }
    tx.commit()?;

    Ok(dataset.row_count())
}

/// Categorical columns are stored as their text labels
fn sql_type(column: &Column) -> &'static str {
    if column.is_categorical() {
        "TEXT"
    } else {
        column.dtype().sql_type()
    }
}

impl Loader for SqliteWriter {
    type Input = Dataset;

    fn load(&self, input: Self::Input) -> Result<usize> {
        Ok(self.write(&input)?)
    }
}

/// Read a whole table back into a [`Dataset`]
///
/// The database is opened read-only, so a missing file is an error rather
/// than a new empty database. Column types follow the stored values: all
/// integers, then all numbers, then text.
pub struct SqliteReader {
    path: PathBuf,
    table: String,
    sink: Arc<dyn EventSink>,
}

impl SqliteReader {
    pub fn new(path: impl AsRef<Path>, table: impl Into<String>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            table: table.into(),
            sink: default_sink(),
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// # Errors
    /// [`EtlError::Read`] if the database or table cannot be read
    pub fn read(&self) -> Result<Dataset, EtlError> {
        self.sink.info(&format!(
            "Reading table {} from {}",
            self.table,
            self.path.display()
        ));

        let dataset = self.query().map_err(|err| {
            self.sink.error(&format!("Error reading table {}: {}", self.table, err));
            err
        })?;

        let (rows, columns) = dataset.shape();
        self.sink.info(&format!("Data shape: ({}, {})", rows, columns));
        Ok(dataset)
    }

    fn query(&self) -> Result<Dataset, EtlError> {
        let read_error = |source: rusqlite::Error| EtlError::read(&self.path, source);

        let conn = Connection::open_with_flags(&self.path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .map_err(read_error)?;
        let mut stmt = conn
            .prepare(&format!("SELECT * FROM {}", quote_identifier(&self.table)))
            .map_err(read_error)?;

        let names: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let mut values: Vec<Vec<Value>> = vec![Vec::new(); names.len()];

        let mut rows = stmt.query([]).map_err(read_error)?;
        while let Some(row) = rows.next().map_err(read_error)? {
            for (i, column) in values.iter_mut().enumerate() {
                column.push(from_sql(row.get_ref(i).map_err(read_error)?));
            }
        }

        let columns = names
            .into_iter()
            .zip(values)
            .map(|(name, values)| stored_column(name, values))
            .collect();

        Dataset::from_columns(columns).map_err(|e| EtlError::read(&self.path, e.to_string()))
    }
}

fn from_sql(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Integer(i),
        ValueRef::Real(f) => Value::Float(f),
        ValueRef::Text(t) | ValueRef::Blob(t) => {
            Value::Text(String::from_utf8_lossy(t).into_owned())
        }
    }
}

/// Settle one type for a column of stored values, widening integers to floats
fn stored_column(name: String, values: Vec<Value>) -> Column {
    let has_text = values.iter().any(|v| matches!(v, Value::Text(_)));
    let has_float = values.iter().any(|v| matches!(v, Value::Float(_)));
    let has_integer = values.iter().any(|v| matches!(v, Value::Integer(_)));

    let dtype = match (has_text, has_float, has_integer) {
        (true, _, _) => DataType::Text,
        (false, false, true) => DataType::Integer,
        (false, _, _) => DataType::Float,
    };

    let values = values
        .into_iter()
        .map(|value| match (dtype, value) {
            (DataType::Float, Value::Integer(i)) => Value::Float(i as f64),
            (DataType::Text, Value::Integer(i)) => Value::Text(i.to_string()),
            (DataType::Text, Value::Float(f)) => Value::Text(f.to_string()),
            (_, value) => value,
        })
        .collect();

    Column::new(name, dtype, values)
}

impl Extractor for SqliteReader {
    type Output = Dataset;

    fn extract(&self) -> Result<Self::Output> {
        Ok(self.read()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::etl::MemorySink;
    use tempfile::TempDir;

    fn sample() -> Dataset {
        let mut sex = Column::new(
            "Sex",
            DataType::Text,
            vec![Value::Text("male".into()), Value::Text("female".into())],
        );
        sex.set_categorical(true);

        Dataset::from_columns(vec![
            Column::new(
                "PassengerId",
                DataType::Integer,
                vec![Value::Integer(1), Value::Integer(2)],
            ),
            sex,
            Column::new(
                "Fare",
                DataType::Float,
                vec![Value::Float(7.25), Value::Null],
            ),
            Column::new(
                "Family Size",
                DataType::Integer,
                vec![Value::Integer(2), Value::Integer(1)],
            ),
        ])
        .unwrap()
    }

    fn declared_types(path: &Path, table: &str) -> Vec<(String, String)> {
        let conn = Connection::open(path).unwrap();
        let mut stmt = conn
            .prepare(&format!("PRAGMA table_info({})", quote_identifier(table)))
            .unwrap();
        stmt.query_map([], |row| {
            Ok((row.get::<_, String>(1)?, row.get::<_, String>(2)?))
        })
        .unwrap()
        .collect::<rusqlite::Result<_>>()
        .unwrap()
    }

    #[test]
    fn test_quote_identifier() {
        assert_eq!(quote_identifier("Family Size"), "\"Family Size\"");
        assert_eq!(quote_identifier("a\"b"), "\"a\"\"b\"");
    }

    #[test]
    fn test_write_creates_table_in_column_order() {
        let temp = TempDir::new().unwrap();
        let db = temp.path().join("titanic.db");

        let count = SqliteWriter::new(&db, "train_cleaned")
            .write(&sample())
            .unwrap();
        assert_eq!(count, 2);

        let types = declared_types(&db, "train_cleaned");
        assert_eq!(
            types,
            vec![
                ("PassengerId".to_string(), "INTEGER".to_string()),
                ("Sex".to_string(), "TEXT".to_string()),
                ("Fare".to_string(), "REAL".to_string()),
                ("Family Size".to_string(), "INTEGER".to_string()),
            ]
        );
    }

    #[test]
    fn test_write_replaces_existing_table() {
        let temp = TempDir::new().unwrap();
        let db = temp.path().join("titanic.db");
        let conn = Connection::open(&db).unwrap();
        conn.execute_batch(
            "CREATE TABLE train_cleaned (old TEXT); INSERT INTO train_cleaned VALUES ('x');",
        )
        .unwrap();
        drop(conn);

        SqliteWriter::new(&db, "train_cleaned")
            .write(&sample())
            .unwrap();

        let read = SqliteReader::new(&db, "train_cleaned").read().unwrap();
        assert_eq!(
            read.column_names(),
            vec!["PassengerId", "Sex", "Fare", "Family Size"]
        );
        assert_eq!(read.row_count(), 2);
    }

    #[test]
    fn test_round_trip_values() {
        let temp = TempDir::new().unwrap();
        let db = temp.path().join("titanic.db");
        let dataset = sample();

        SqliteWriter::new(&db, "t").write(&dataset).unwrap();
        let read = SqliteReader::new(&db, "t").read().unwrap();

        assert_eq!(read.shape(), dataset.shape());
        assert_eq!(
            read.column("Fare").unwrap().values(),
            &[Value::Float(7.25), Value::Null]
        );
        assert_eq!(read.column("Sex").unwrap().dtype(), DataType::Text);
        assert!(!read.column("Sex").unwrap().is_categorical());
    }

    #[test]
    fn test_invalid_table_name() {
        let temp = TempDir::new().unwrap();
        let db = temp.path().join("titanic.db");

        let err = SqliteWriter::new(&db, "").write(&sample()).unwrap_err();
        assert!(matches!(err, EtlError::InvalidTableName(_)));
        assert!(!db.exists());
    }

    #[test]
    fn test_unwritable_location_is_write_error() {
        let temp = TempDir::new().unwrap();
        let db = temp.path().join("missing").join("titanic.db");
        let sink = Arc::new(MemorySink::new());

        let err = SqliteWriter::new(&db, "train_cleaned")
            .with_sink(sink.clone())
            .write(&sample())
            .unwrap_err();

        match err {
            EtlError::Write {
                location, table, ..
            } => {
                assert_eq!(location, db);
                assert_eq!(table, "train_cleaned");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(!db.exists());
        assert_eq!(sink.messages(log::Level::Error).len(), 1);
    }

    #[test]
    fn test_failed_write_keeps_previous_table() {
        let temp = TempDir::new().unwrap();
        let db = temp.path().join("titanic.db");
        SqliteWriter::new(&db, "t").write(&sample()).unwrap();

        // A dataset without columns cannot be created as a table
        let err = SqliteWriter::new(&db, "t")
            .write(&Dataset::default())
            .unwrap_err();
        assert!(matches!(err, EtlError::Write { .. }));

        let read = SqliteReader::new(&db, "t").read().unwrap();
        assert_eq!(read.shape(), (2, 4));
    }

    #[test]
    fn test_read_missing_database() {
        let temp = TempDir::new().unwrap();
        let err = SqliteReader::new(temp.path().join("nope.db"), "t")
            .read()
            .unwrap_err();
        assert!(matches!(err, EtlError::Read { .. }));
    }

    #[test]
    fn test_stored_column_widens_mixed_numbers() {
        let column = stored_column("x".into(), vec![Value::Integer(1), Value::Float(1.5)]);
        assert_eq!(column.dtype(), DataType::Float);
        assert_eq!(column.values(), &[Value::Float(1.0), Value::Float(1.5)]);
    }
}
