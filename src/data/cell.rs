//! Dataset cell values

use std::fmt;

/// Field contents read as a missing value (besides the empty field).
pub const NA_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// A single scalar value in a dataset row
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Numeric value
    Number(f64),
    /// Free-form text (e.g. a class label)
    Text(String),
    /// Empty or NA field
    Missing,
}

impl Cell {
    /// Parse a raw CSV field
    ///
    /// Empty fields and exact [`NA_TOKENS`] matches become [`Cell::Missing`];
    /// surrounding whitespace does not make a token match. Fields that parse
    /// as a float (ignoring surrounding whitespace) become [`Cell::Number`],
    /// except NaN spellings outside [`NA_TOKENS`], which stay text like every
    /// other field.
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() || NA_TOKENS.contains(&raw) {
            return Cell::Missing;
        }
        match raw.trim().parse::<f64>() {
            Ok(value) if !value.is_nan() => Cell::Number(value),
            _ => Cell::Text(raw.to_string()),
        }
    }

    /// Whether the cell holds no value
    #[must_use]
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// Numeric value, if any
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Text key used to group rows by value; `None` for missing cells
    #[must_use]
    pub fn key(&self) -> Option<String> {
        match self {
            Cell::Missing => None,
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(value) => write!(f, "{value}"),
            Cell::Text(text) => f.write_str(text),
            Cell::Missing => Ok(()),
        }
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}
