//! Column dropper transformer
//!
//! Removes whole columns from a dataset, typically ones too sparse to be
//! worth keeping.

use crate::dataset::Dataset;
use crate::etl::Transformer;
use eyre::Result;

/// Transformer that drops the named columns from the schema
///
/// Columns that are not present are ignored.
///
/// # Example
/// ```
/// use titanic_etl::dataset::{Column, DataType, Dataset, Value};
/// use titanic_etl::etl::Transformer;
/// use titanic_etl::transform::ColumnDropper;
///
/// let dataset = Dataset::from_columns(vec![
///     Column::new("PassengerId", DataType::Integer, vec![Value::Integer(1)]),
///     Column::new("Cabin", DataType::Text, vec![Value::Null]),
/// ])
/// .unwrap();
///
/// let output = ColumnDropper::new(vec!["Cabin"]).transform(dataset).unwrap();
/// assert_eq!(output.column_names(), vec!["PassengerId"]);
/// ```
pub struct ColumnDropper {
    columns: Vec<String>,
}

impl ColumnDropper {
    /// Create a new column dropper with the specified columns to remove
    pub fn new(columns: Vec<&str>) -> Self {
        Self {
            columns: columns.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Transformer for ColumnDropper {
    type Input = Dataset;
    type Output = Dataset;

    fn transform(&self, mut input: Self::Input) -> Result<Self::Output> {
        for column in &self.columns {
            input.drop_column(column);
        }
        Ok(input)
    }
}
