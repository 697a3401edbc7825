//! Cleaning rules for the Titanic passenger manifest

use super::{CategoricalTagger, ColumnDropper, FamilySize, MedianFiller, ModeFiller};
use crate::dataset::Dataset;
use crate::error::EtlError;
use crate::etl::{Chain, EventSink, Transformer, default_sink};

use eyre::Result;
use std::sync::Arc;

/// Columns the cleaning steps read, checked before any step runs
pub const REQUIRED_COLUMNS: [&str; 6] = ["Age", "Embarked", "Cabin", "SibSp", "Parch", "Sex"];

type CleaningSteps =
    Chain<Chain<Chain<Chain<MedianFiller, ModeFiller>, ColumnDropper>, FamilySize>, CategoricalTagger>;

/// Transformer applying the fixed manifest cleaning sequence
///
/// 1. Fill missing `Age` with the median age
/// 2. Fill missing `Embarked` with the most frequent port
/// 3. Drop `Cabin`, which is mostly empty
/// 4. Derive `Family Size` as `SibSp + Parch + 1`
/// 5. Tag `Sex` and `Embarked` as categorical
///
/// The fills see the data exactly as extracted, since nothing before them
/// removes or derives columns. A dataset missing any of [`REQUIRED_COLUMNS`]
/// is rejected whole with [`EtlError::SchemaMismatch`].
///
/// # Example
/// ```no_run
/// use titanic_etl::etl::{Extractor, Transformer};
/// use titanic_etl::storage::CsvReader;
/// use titanic_etl::transform::TitanicCleaner;
///
/// # fn example() -> eyre::Result<()> {
/// let dataset = CsvReader::new("train.csv").extract()?;
/// let cleaned = TitanicCleaner::new().transform(dataset)?;
/// assert!(!cleaned.has_column("Cabin"));
/// # Ok(())
/// # }
/// ```
pub struct TitanicCleaner {
    steps: CleaningSteps,
    sink: Arc<dyn EventSink>,
}

impl TitanicCleaner {
    pub fn new() -> Self {
        let steps = MedianFiller::new("Age")
            .then(ModeFiller::new("Embarked"))
            .then(ColumnDropper::new(vec!["Cabin"]))
            .then(FamilySize::default())
            .then(CategoricalTagger::new(vec!["Sex", "Embarked"]));

        Self {
            steps,
            sink: default_sink(),
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    fn check_schema(&self, dataset: &Dataset) -> Result<(), EtlError> {
        let missing: Vec<&str> = REQUIRED_COLUMNS
            .into_iter()
            .filter(|name| !dataset.has_column(name))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(EtlError::schema_mismatch(missing))
        }
    }
}

impl Default for TitanicCleaner {
    fn default() -> Self {
        Self::new()
    }
}

impl Transformer for TitanicCleaner {
    type Input = Dataset;
    type Output = Dataset;

    fn transform(&self, input: Self::Input) -> Result<Self::Output> {
        self.sink.info("Starting data transformation");

        let output = self
            .check_schema(&input)
            .map_err(eyre::Report::from)
            .and_then(|()| self.steps.transform(input))
            .map_err(|err| {
                self.sink.error(&format!("Error transforming data: {}", err));
                err
            })?;

        self.sink.info(&format!(
            "Total missing values after cleaning: {}",
            output.missing_count()
        ));
        Ok(output)
    }
}
