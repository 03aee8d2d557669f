//! Output serialization module.
//!
//! Every document is written twice: as a flat CSV table and as a nested
//! JSON file (`{metadata, data}`). Both files are written through a
//! temporary file in the target directory and renamed into place, so a
//! failed run never leaves a half-written output behind.
//!
//! After the JSON file lands, a verification pass re-reads it and scans
//! for floats with a zero fractional part. Coercion upstream guarantees
//! integral counts are `Integer` before serialization, so any such float
//! in the file means the encoder widened a value - that is reported as a
//! warning naming the JSON path.

mod csv;
mod json;
mod verify;

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};

use crate::app::models::{Document, WarningLog};
use crate::constants::{CSV_OUTPUT_SUFFIX, JSON_OUTPUT_SUFFIX};
use crate::error::Result;

pub use verify::verify_json_integers;

/// Paths of one document's written output pair
#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub csv: PathBuf,
    pub json: PathBuf,
}

/// Writes document output pairs into one output directory
#[derive(Debug, Clone)]
pub struct OutputWriter {
    output_dir: PathBuf,
}

impl OutputWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Write both encodings of a document and run the post-write JSON
    /// verification. Returns the written paths.
    pub fn write_document(
        &self,
        document: &Document,
        warnings: &mut WarningLog,
    ) -> Result<OutputPaths> {
        let paths = self.paths_for(&document.source_id);
        csv::write_csv(document, &paths.csv)?;
        json::write_json(document, &paths.json)?;
        verify::verify_json_integers(&paths.json, warnings)?;
        Ok(paths)
    }

    pub fn paths_for(&self, source_id: &str) -> OutputPaths {
        OutputPaths {
            csv: self
                .output_dir
                .join(format!("{}{}", source_id, CSV_OUTPUT_SUFFIX)),
            json: self
                .output_dir
                .join(format!("{}{}", source_id, JSON_OUTPUT_SUFFIX)),
        }
    }
}

/// Persist a temporary file next to its final location
fn persist_temp(temp: tempfile::NamedTempFile, target: &Path) -> Result<()> {
    temp.persist(target).map_err(|e| e.error)?;
    Ok(())
}
