//! Cell values and column data types

/// Cell texts read as missing, besides the empty cell
///
/// Matches the default NA markers of common dataframe readers. Comparison is
/// exact, so `Na` or `NONE` stay ordinary text.
const NA_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Whether a raw cell stands for a missing value
fn is_missing(cell: &str) -> bool {
    cell.is_empty() || NA_TOKENS.contains(&cell)
}

/// Any other spelling the float parser accepts as NaN (`NAN`, ` nan `)
fn is_nan(cell: &str) -> bool {
    cell.trim().parse::<f64>().is_ok_and(f64::is_nan)
}

/// Declared type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Integer,
    Float,
    Text,
}

impl DataType {
    /// Infer a column type from raw text cells.
    ///
    /// Missing cells (empty, an NA marker, or NaN) are ignored. A column of
    /// only missing cells is `Float`, which is how an all-missing numeric
    /// column reads back from a dataframe.
    pub fn infer<'a>(cells: impl IntoIterator<Item = &'a str>) -> Self {
        let mut seen = false;
        let mut all_integer = true;
        let mut all_float = true;

        for cell in cells.into_iter().filter(|c| !is_missing(c) && !is_nan(c)) {
            seen = true;
            let cell = cell.trim();
            if all_integer && cell.parse::<i64>().is_err() {
                all_integer = false;
            }
            if !all_integer && cell.parse::<f64>().is_err() {
                all_float = false;
                break;
            }
        }

        match (seen, all_integer, all_float) {
            (false, _, _) => DataType::Float,
            (true, true, _) => DataType::Integer,
            (true, false, true) => DataType::Float,
            (true, false, false) => DataType::Text,
        }
    }

    /// SQLite column affinity for this type
    pub fn sql_type(self) -> &'static str {
        match self {
            DataType::Integer => "INTEGER",
            DataType::Float => "REAL",
            DataType::Text => "TEXT",
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, DataType::Integer | DataType::Float)
    }
}

/// A single cell
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// Parse a raw cell according to an already inferred column type
    ///
    /// NA markers and any NaN spelling become [`Value::Null`], so a present
    /// float is never NaN.
    pub fn parse(cell: &str, dtype: DataType) -> Self {
        if is_missing(cell) || (dtype.is_numeric() && is_nan(cell)) {
            return Value::Null;
        }
        let trimmed = cell.trim();
        match dtype {
            DataType::Integer => trimmed
                .parse()
                .map(Value::Integer)
                .unwrap_or_else(|_| Value::Text(cell.to_string())),
            DataType::Float => trimmed
                .parse()
                .map(Value::Float)
                .unwrap_or_else(|_| Value::Text(cell.to_string())),
            DataType::Text => Value::Text(cell.to_string()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric view of the value, `None` for nulls and text
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::Null | Value::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_integer() {
        assert_eq!(DataType::infer(["1", "2", "", "30"]), DataType::Integer);
    }

    #[test]
    fn test_infer_float_from_mixed_numbers() {
        assert_eq!(DataType::infer(["22", "0.42", ""]), DataType::Float);
    }

    #[test]
    fn test_infer_text() {
        assert_eq!(DataType::infer(["S", "C", "", "Q"]), DataType::Text);
        assert_eq!(DataType::infer(["1", "C85"]), DataType::Text);
    }

    #[test]
    fn test_infer_all_missing_is_float() {
        assert_eq!(DataType::infer(["", ""]), DataType::Float);
        assert_eq!(DataType::infer(std::iter::empty()), DataType::Float);
    }

    #[test]
    fn test_parse_cells() {
        assert_eq!(Value::parse("", DataType::Text), Value::Null);
        assert_eq!(Value::parse("7", DataType::Integer), Value::Integer(7));
        assert_eq!(Value::parse("7.25", DataType::Float), Value::Float(7.25));
        assert_eq!(
            Value::parse("Braund, Mr. Owen Harris", DataType::Text),
            Value::Text("Braund, Mr. Owen Harris".to_string())
        );
    }

    #[test]
    fn test_na_tokens_are_missing() {
        assert_eq!(DataType::infer(["22", "NaN", "30"]), DataType::Integer);
        assert_eq!(DataType::infer(["22", "NA", "30.5"]), DataType::Float);
        assert_eq!(DataType::infer(["S", "N/A", "null"]), DataType::Text);
        assert_eq!(DataType::infer(["None", "#N/A", "nan"]), DataType::Float);

        for token in ["NaN", "nan", "NA", "N/A", "null", "None", "#N/A", "<NA>"] {
            assert_eq!(Value::parse(token, DataType::Float), Value::Null, "{}", token);
            assert_eq!(Value::parse(token, DataType::Text), Value::Null, "{}", token);
        }
        assert_eq!(Value::parse("Na", DataType::Text), Value::Text("Na".into()));
    }

    #[test]
    fn test_parse_never_yields_nan() {
        assert_eq!(DataType::infer(["1.5", "NAN"]), DataType::Float);
        assert_eq!(Value::parse("NAN", DataType::Float), Value::Null);
        assert_eq!(Value::parse(" nan ", DataType::Float), Value::Null);
        assert_eq!(Value::parse("NAN", DataType::Integer), Value::Null);
        assert_eq!(Value::parse("inf", DataType::Float), Value::Float(f64::INFINITY));
    }

    #[test]
    fn test_as_f64() {
        assert_eq!(Value::Integer(3).as_f64(), Some(3.0));
        assert_eq!(Value::Text("3".into()).as_f64(), None);
        assert_eq!(Value::Null.as_f64(), None);
    }
}
