//! A named, typed column

use super::{DataType, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    dtype: DataType,
    categorical: bool,
    values: Vec<Value>,
}

impl Column {
    pub fn new(name: impl Into<String>, dtype: DataType, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            dtype,
            categorical: false,
            values,
        }
    }

    /// Build a column from raw text cells, inferring its type
    pub fn from_cells(name: impl Into<String>, cells: &[String]) -> Self {
        let dtype = DataType::infer(cells.iter().map(String::as_str));
        let values = cells.iter().map(|c| Value::parse(c, dtype)).collect();
        Self::new(name, dtype, values)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dtype(&self) -> DataType {
        self.dtype
    }

    /// Whether the column is tagged as low-cardinality categorical data
    pub fn is_categorical(&self) -> bool {
        self.categorical
    }

    pub fn set_categorical(&mut self, categorical: bool) {
        self.categorical = categorical;
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_null()).count()
    }

    /// Replace every missing cell with `fill`, returning how many were filled.
    ///
    /// A fractional fill on an `Integer` column promotes it to `Float`.
    pub fn fill_missing(&mut self, fill: &Value) -> usize {
        if matches!(fill, Value::Float(f) if f.fract() != 0.0) && self.dtype == DataType::Integer
        {
            self.promote_to_float();
        }

        let fill = match (self.dtype, fill) {
            (DataType::Integer, Value::Float(f)) => Value::Integer(*f as i64),
            (DataType::Float, Value::Integer(i)) => Value::Float(*i as f64),
            _ => fill.clone(),
        };

        let mut filled = 0;
        for value in self.values.iter_mut().filter(|v| v.is_null()) {
            *value = fill.clone();
            filled += 1;
        }
        filled
    }

    fn promote_to_float(&mut self) {
        for value in &mut self.values {
            if let Value::Integer(i) = value {
                *value = Value::Float(*i as f64);
            }
        }
        self.dtype = DataType::Float;
    }
}
