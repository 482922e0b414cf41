//! Row and cell types for the working dataset.

use std::fmt;

use crate::manifest;

/// A single parsed cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Trimmed text.
    Text(String),
    /// Comma-decimal number parsed at scan time.
    Number(f64),
    /// Dense integer code assigned by a [`crate::LabelEncoder`].
    Code(u32),
    /// Absent cell, replaced by the sentinel before normalization.
    Missing,
}

impl Value {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
            Self::Code(c) => write!(f, "{c}"),
            Self::Missing => Ok(()),
        }
    }
}

/// One row of the working dataset, with cells in manifest order.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    values: Vec<Value>,
}

impl Record {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut [Value] {
        &mut self.values
    }

    /// Cell for a projected source column name.
    pub fn get(&self, source: &str) -> Option<&Value> {
        manifest::index_of(source).and_then(|i| self.values.get(i))
    }

    /// Text content of a projected column, if the cell holds text.
    pub fn text(&self, source: &str) -> Option<&str> {
        self.get(source).and_then(Value::as_text)
    }
}
