//! Dataset consolidator — accumulates filtered chunks into one in-memory
//! table and substitutes the sentinel for missing cells.

use crate::manifest::SENTINEL;
use crate::record::{Record, Value};

/// The consolidated working dataset.
///
/// Rows keep their source order: archive discovery order first, then
/// intra-archive stream order. The whole table is held in memory by
/// design; there is no spill-to-disk path.
#[derive(Debug, Default)]
pub struct Dataset {
    rows: Vec<Record>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one filtered chunk, preserving row order.
    pub fn push_chunk(&mut self, chunk: Vec<Record>) {
        self.rows.extend(chunk);
    }

    /// Merge per-archive datasets in the order given; row positions are
    /// re-assigned contiguously from zero.
    pub fn concat(parts: impl IntoIterator<Item = Dataset>) -> Self {
        let mut merged = Self::new();
        for part in parts {
            merged.rows.extend(part.rows);
        }
        merged
    }

    /// Replace every missing cell with the sentinel text.
    pub fn fill_missing(&mut self) {
        for row in &mut self.rows {
            for value in row.values_mut() {
                if value.is_missing() {
                    *value = Value::Text(SENTINEL.to_string());
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [Record] {
        &mut self.rows
    }
}
