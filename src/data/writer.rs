//! CSV output

use std::path::Path;

use super::dataset::Dataset;
use super::error::{DataError, Result};

/// Write `dataset` to `path` as CSV with a header row
///
/// Missing cells are written as empty fields. The write is not atomic.
pub fn write_csv(dataset: &Dataset, path: &Path) -> Result<()> {
    let origin = path.display().to_string();
    let mut writer = csv::Writer::from_path(path).map_err(|e| DataError::csv(&origin, e))?;

    writer
        .write_record(dataset.columns())
        .map_err(|e| DataError::csv(&origin, e))?;
    for row in dataset.rows() {
        writer
            .write_record(row.iter().map(ToString::to_string))
            .map_err(|e| DataError::csv(&origin, e))?;
    }
    writer.flush()?;
    Ok(())
}
