//! Categorical type tagging

use crate::dataset::Dataset;
use crate::error::EtlError;
use crate::etl::Transformer;
use eyre::Result;

/// Transformer that marks columns as low-cardinality categorical data
///
/// Stored values are left alone; only the declared representation changes.
pub struct CategoricalTagger {
    columns: Vec<String>,
}

impl CategoricalTagger {
    pub fn new(columns: Vec<&str>) -> Self {
        Self {
            columns: columns.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Transformer for CategoricalTagger {
    type Input = Dataset;
    type Output = Dataset;

    fn transform(&self, mut input: Self::Input) -> Result<Self::Output> {
        let missing: Vec<&str> = self
            .columns
            .iter()
            .map(String::as_str)
            .filter(|name| !input.has_column(name))
            .collect();
        if !missing.is_empty() {
            return Err(EtlError::schema_mismatch(missing).into());
        }

        for name in &self.columns {
            if let Some(column) = input.column_mut(name) {
                column.set_categorical(true);
            }
        }
        Ok(input)
    }
}
