//! Categorical encoder — maps each distinct text value of a column to a
//! dense integer code and persists the value↔code table.
//!
//! Codes are assigned in lexicographic order of the distinct values
//! (byte-wise `str` ordering), so identical inputs always produce
//! identical tables. Fit returns an immutable encoder; transform only
//! reads it.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use tracing::info;

use crate::dataset::Dataset;
use crate::error::ExtractError;
use crate::manifest::{self, ColumnSpec};
use crate::record::Value;

/// Immutable value↔code table for one categorical column.
#[derive(Debug, Clone)]
pub struct LabelEncoder {
    /// Distinct values in ascending order; position = assigned code.
    classes: Vec<String>,
    codes: HashMap<String, u32>,
}

impl LabelEncoder {
    /// Fit an encoder over the given values. Duplicates are collapsed;
    /// codes `0..n` follow the sorted order of the distinct set.
    pub fn fit<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let distinct: BTreeSet<String> = values.into_iter().map(Into::into).collect();
        let classes: Vec<String> = distinct.into_iter().collect();
        let codes = classes
            .iter()
            .enumerate()
            .map(|(code, class)| (class.clone(), code as u32))
            .collect();
        Self { classes, codes }
    }

    /// Fit over the text cells of one dataset column.
    pub fn fit_column(dataset: &Dataset, column_index: usize) -> Self {
        Self::fit(
            dataset
                .rows()
                .iter()
                .filter_map(|row| row.values()[column_index].as_text()),
        )
    }

    /// Code assigned to `value`.
    ///
    /// A miss means transform ran against data the encoder was not
    /// fitted on, which is an internal bug.
    pub fn transform(&self, column: &str, value: &str) -> Result<u32, ExtractError> {
        self.codes
            .get(value)
            .copied()
            .ok_or_else(|| ExtractError::EncoderMiss {
                column: column.to_string(),
                value: value.to_string(),
            })
    }

    /// Distinct values in code order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Persist the table as `<source column>.csv` under `dir`:
    /// header `<source>-ID,<source>`, one row per value in code order.
    /// Overwrites any previous table.
    pub fn write_table(&self, dir: &Path, column: &ColumnSpec) -> Result<(), ExtractError> {
        let path = dir.join(format!("{}.csv", column.source));
        let mut writer = csv::Writer::from_path(&path)?;
        writer.write_record([column.id_label().as_str(), column.source])?;
        for (code, class) in self.classes.iter().enumerate() {
            writer.write_record([code.to_string().as_str(), class.as_str()])?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Fit-then-transform every categorical column of the dataset, in
/// manifest order: persist each encoder table under `out_dir`, then
/// rewrite the column's cells in place as codes.
pub fn encode_dataset(dataset: &mut Dataset, out_dir: &Path) -> Result<(), ExtractError> {
    for (index, column) in manifest::categorical() {
        info!(column = column.source, "normalizing column");

        let encoder = LabelEncoder::fit_column(dataset, index);
        encoder.write_table(out_dir, column)?;

        for row in dataset.rows_mut() {
            let cell = &mut row.values_mut()[index];
            let code = match cell.as_text() {
                Some(text) => encoder.transform(column.source, text)?,
                None => {
                    return Err(ExtractError::EncoderMiss {
                        column: column.source.to_string(),
                        value: cell.to_string(),
                    })
                }
            };
            *cell = Value::Code(code);
        }

        info!(
            column = column.source,
            distinct = encoder.len(),
            "column normalized"
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;

    #[test]
    fn codes_follow_sorted_order() {
        let encoder = LabelEncoder::fit(["banana", "abacaxi", "caju", "banana"]);
        assert_eq!(encoder.classes(), ["abacaxi", "banana", "caju"]);
        assert_eq!(encoder.transform("c", "abacaxi").unwrap(), 0);
        assert_eq!(encoder.transform("c", "banana").unwrap(), 1);
        assert_eq!(encoder.transform("c", "caju").unwrap(), 2);
    }

    #[test]
    fn fit_is_deterministic_across_input_order() {
        let a = LabelEncoder::fit(["x", "y", "z"]);
        let b = LabelEncoder::fit(["z", "x", "y", "x"]);
        assert_eq!(a.classes(), b.classes());
    }

    #[test]
    fn unknown_value_is_a_consistency_error() {
        let encoder = LabelEncoder::fit(["a"]);
        let err = encoder.transform("Nome Órgao", "b").unwrap_err();
        assert!(err.is_consistency_bug());
    }

    #[test]
    fn codes_are_dense() {
        let encoder = LabelEncoder::fit(["d", "a", "c", "b"]);
        for (expected, class) in encoder.classes().iter().enumerate() {
            assert_eq!(encoder.transform("c", class).unwrap() as usize, expected);
        }
    }

    #[test]
    fn encode_dataset_rewrites_cells_and_persists_tables() {
        let dir = tempfile::tempdir().unwrap();

        let mut dataset = Dataset::new();
        for orgao in ["Y", "X", "Y"] {
            let mut values: Vec<Value> = (0..10)
                .map(|i| Value::Text(format!("v{i}")))
                .collect();
            values[0] = Value::Text(orgao.to_string());
            values[9] = Value::Number(1.0);
            dataset.push_chunk(vec![Record::new(values)]);
        }

        // Valor is numeric and not categorical, so Number cells survive.
        encode_dataset(&mut dataset, dir.path()).unwrap();

        let codes: Vec<_> = dataset
            .rows()
            .iter()
            .map(|r| r.values()[0].clone())
            .collect();
        assert_eq!(codes, [Value::Code(1), Value::Code(0), Value::Code(1)]);
        assert_eq!(dataset.rows()[0].values()[9], Value::Number(1.0));

        let table = std::fs::read_to_string(dir.path().join("Nome Órgao.csv")).unwrap();
        assert_eq!(table, "Nome Órgao-ID,Nome Órgao\n0,X\n1,Y\n");
    }
}
