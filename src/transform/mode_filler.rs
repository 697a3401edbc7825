//! Most-frequent-value imputation

use crate::dataset::{Dataset, Value};
use crate::error::EtlError;
use crate::etl::Transformer;
use eyre::Result;

/// Transformer that fills missing cells with the column's most frequent
/// non-missing value
///
/// Ties go to the value that occurs first in row order.
///
/// # Example
/// ```
/// use titanic_etl::dataset::{Column, Dataset, Value};
/// use titanic_etl::etl::Transformer;
/// use titanic_etl::transform::ModeFiller;
///
/// let cells: Vec<String> = ["S", "C", "", "S"].iter().map(|s| s.to_string()).collect();
/// let dataset = Dataset::from_columns(vec![Column::from_cells("Embarked", &cells)]).unwrap();
///
/// let output = ModeFiller::new("Embarked").transform(dataset).unwrap();
/// assert_eq!(output.column("Embarked").unwrap().values()[2], Value::Text("S".into()));
/// ```
pub struct ModeFiller {
    column: String,
}

impl ModeFiller {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }
}

/// Most frequent non-missing value, first occurrence winning ties
fn mode(values: &[Value]) -> Option<&Value> {
    let mut counts: Vec<(&Value, usize)> = Vec::new();
    for value in values.iter().filter(|v| !v.is_null()) {
        match counts.iter_mut().find(|(seen, _)| *seen == value) {
            Some((_, count)) => *count += 1,
            None => counts.push((value, 1)),
        }
    }

    let mut best: Option<(&Value, usize)> = None;
    for (value, count) in counts {
        if best.is_none_or(|(_, top)| count > top) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}

impl Transformer for ModeFiller {
    type Input = Dataset;
    type Output = Dataset;

    fn transform(&self, mut input: Self::Input) -> Result<Self::Output> {
        let column = input
            .column_mut(&self.column)
            .ok_or_else(|| EtlError::schema_mismatch([self.column.as_str()]))?;

        if column.missing_count() == 0 {
            return Ok(input);
        }

        let Some(fill) = mode(column.values()).cloned() else {
            return Err(EtlError::empty_column(&self.column).into());
        };
        column.fill_missing(&fill);
        Ok(input)
    }
}
