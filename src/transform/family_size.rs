//! Family size feature derivation

use crate::dataset::{Column, DataType, Dataset, Value};
use crate::error::EtlError;
use crate::etl::Transformer;
use eyre::{Result, bail};

/// Transformer that appends `siblings + parents + 1` as a new column
///
/// Integer inputs give an integer column, anything else a float column. A
/// sum that overflows `i64` turns the whole column to float. A row missing
/// either count gets a missing family size.
pub struct FamilySize {
    siblings: String,
    parents: String,
    output: String,
}

impl FamilySize {
    pub fn new(
        siblings: impl Into<String>,
        parents: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Self {
            siblings: siblings.into(),
            parents: parents.into(),
            output: output.into(),
        }
    }
}

impl Default for FamilySize {
    /// `SibSp + Parch + 1` into `Family Size`
    fn default() -> Self {
        Self::new("SibSp", "Parch", "Family Size")
    }
}

fn family_size(siblings: &Value, parents: &Value) -> Value {
    match (siblings, parents) {
        (Value::Integer(s), Value::Integer(p)) => {
            match s.checked_add(*p).and_then(|v| v.checked_add(1)) {
                Some(size) => Value::Integer(size),
                None => Value::Float(*s as f64 + *p as f64 + 1.0),
            }
        }
        (s, p) => match (s.as_f64(), p.as_f64()) {
            (Some(s), Some(p)) => Value::Float(s + p + 1.0),
            _ => Value::Null,
        },
    }
}

impl Transformer for FamilySize {
    type Input = Dataset;
    type Output = Dataset;

    fn transform(&self, mut input: Self::Input) -> Result<Self::Output> {
        let (siblings, parents) = match (
            input.column(&self.siblings),
            input.column(&self.parents),
        ) {
            (Some(s), Some(p)) => (s, p),
            (s, p) => {
                let missing = [(s, &self.siblings), (p, &self.parents)]
                    .into_iter()
                    .filter(|(column, _)| column.is_none())
                    .map(|(_, name)| name.as_str());
                return Err(EtlError::schema_mismatch(missing).into());
            }
        };

        for column in [siblings, parents] {
            if !column.dtype().is_numeric() {
                bail!("column `{}` is not numeric", column.name());
            }
        }

        let values: Vec<Value> = siblings
            .values()
            .iter()
            .zip(parents.values())
            .map(|(s, p)| family_size(s, p))
            .collect();
        let dtype = match (siblings.dtype(), parents.dtype()) {
            (DataType::Integer, DataType::Integer)
                if !values.iter().any(|v| matches!(v, Value::Float(_))) =>
            {
                DataType::Integer
            }
            _ => DataType::Float,
        };
        let values = values
            .into_iter()
            .map(|value| match (dtype, value) {
                (DataType::Float, Value::Integer(i)) => Value::Float(i as f64),
                (_, value) => value,
            })
            .collect();

        input.insert_column(Column::new(&self.output, dtype, values))?;
        Ok(input)
    }
}
