//! Pipeline orchestration for ETL operations

use super::{EventSink, Extractor, Loader, Transformer, default_sink};
use eyre::Result;
use std::sync::Arc;

/// ETL Pipeline that orchestrates Extract, Transform, and Load operations
///
/// # Type Parameters
/// - `E`: Extractor type
/// - `T`: Transformer type (must transform from E::Output)
/// - `L`: Loader type (must load T::Output)
///
/// # Example
/// ```no_run
/// use titanic_etl::etl::Pipeline;
/// use titanic_etl::storage::{CsvReader, SqliteWriter};
/// use titanic_etl::transform::TitanicCleaner;
///
/// # fn example() -> eyre::Result<()> {
/// let pipeline = Pipeline::new(
///     CsvReader::new("train.csv"),
///     TitanicCleaner::new(),
///     SqliteWriter::new("titanic.db", "train_cleaned"),
/// );
///
/// let count = pipeline.run()?;
/// println!("Loaded {} rows", count);
/// # Ok(())
/// # }
/// ```
pub struct Pipeline<E, T, L> {
    extractor: E,
    transformer: T,
    loader: L,
    sink: Arc<dyn EventSink>,
}

impl<E, T, L> Pipeline<E, T, L>
where
    E: Extractor,
    T: Transformer<Input = E::Output>,
    L: Loader<Input = T::Output>,
{
    /// Create a new pipeline
    pub fn new(extractor: E, transformer: T, loader: L) -> Self {
        Self {
            extractor,
            transformer,
            loader,
            sink: default_sink(),
        }
    }

    /// Report pipeline progress to `sink` instead of the `log` facade
    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Run the complete ETL pipeline
    ///
    /// Steps:
    /// 1. Extract the whole source
    /// 2. Transform it
    /// 3. Load the result to the destination
    ///
    /// Returns the number of records loaded
    ///
    /// # Errors
    /// Returns the first stage error unchanged; later stages do not run
    pub fn run(&self) -> Result<usize> {
        self.sink.log(log::Level::Debug, "Starting ETL pipeline");

        let extracted = self.extractor.extract()?;
        let transformed = self.transformer.transform(extracted)?;
        let count = self.loader.load(transformed)?;

        self.sink.info("ETL process completed successfully");
        Ok(count)
    }
}
