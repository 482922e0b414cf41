//! Final dataset writer — public schema header plus UTF-8 comma-separated
//! serialization, no index column.

use std::path::Path;

use crate::dataset::Dataset;
use crate::error::ExtractError;
use crate::manifest;

/// Column names of the final dataset, in manifest order. Categorical
/// columns carry the `-ID` suffix since they now hold codes.
pub fn public_header() -> Vec<String> {
    manifest::COLUMNS.iter().map(|c| c.public_name()).collect()
}

/// Serialize the dataset to `path`.
///
/// On failure a partially written file may be left behind; callers get
/// the error and no cleanup.
pub fn write_dataset(dataset: &Dataset, path: &Path) -> Result<(), ExtractError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(public_header())?;
    for row in dataset.rows() {
        writer.write_record(row.values().iter().map(ToString::to_string))?;
    }
    writer.flush()?;
    Ok(())
}
