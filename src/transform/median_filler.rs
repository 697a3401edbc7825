//! Median imputation for numeric columns

use crate::dataset::{Dataset, Value};
use crate::error::EtlError;
use crate::etl::Transformer;
use eyre::{Result, bail};

/// Transformer that fills missing cells of a numeric column with the median
/// of its non-missing cells
///
/// The median of an even count is the mean of the two middle values. An
/// integer column receiving a fractional median becomes a float column.
pub struct MedianFiller {
    column: String,
}

impl MedianFiller {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }
}

/// Median of the numeric values, `None` when there are none
fn median(values: &[Value]) -> Option<f64> {
    let mut numbers: Vec<f64> = values.iter().filter_map(Value::as_f64).collect();
    if numbers.is_empty() {
        return None;
    }
    numbers.sort_by(f64::total_cmp);

    let mid = numbers.len() / 2;
    if numbers.len() % 2 == 0 {
        Some((numbers[mid - 1] + numbers[mid]) / 2.0)
    } else {
        Some(numbers[mid])
    }
}

impl Transformer for MedianFiller {
    type Input = Dataset;
    type Output = Dataset;

    fn transform(&self, mut input: Self::Input) -> Result<Self::Output> {
        let column = input
            .column_mut(&self.column)
            .ok_or_else(|| EtlError::schema_mismatch([self.column.as_str()]))?;

        if !column.dtype().is_numeric() {
            bail!("cannot take the median of non-numeric column `{}`", self.column);
        }
        if column.missing_count() == 0 {
            return Ok(input);
        }

        let Some(fill) = median(column.values()) else {
            return Err(EtlError::empty_column(&self.column).into());
        };
        column.fill_missing(&Value::Float(fill));
        Ok(input)
    }
}
