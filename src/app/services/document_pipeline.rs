//! Per-document processing pipeline.
//!
//! One call takes an extraction dump from disk to its written output
//! pair: registry lookup, page loading, strategy parsing, assembly,
//! integer coercion, serialization, verification. Fatal errors are caught
//! here, at the document boundary, and turned into a failure report so
//! the batch can continue with the next document.

use std::path::Path;

use tracing::{error, info};

use crate::app::adapters::extraction;
use crate::app::models::WarningLog;
use crate::app::services::output_writer::OutputWriter;
use crate::app::services::{assembler, attachment_registry, integer_coercion, table_parser};
use crate::error::{Error, Result};

/// Outcome of one document run
#[derive(Debug, Clone)]
pub enum DocumentOutcome {
    Completed {
        records: usize,
        warnings: Vec<String>,
    },
    Failed {
        error: String,
    },
}

/// Report for one processed document
#[derive(Debug, Clone)]
pub struct DocumentReport {
    pub source_id: String,
    pub outcome: DocumentOutcome,
}

impl DocumentReport {
    pub fn failed(&self) -> bool {
        matches!(self.outcome, DocumentOutcome::Failed { .. })
    }

    pub fn warning_count(&self) -> usize {
        match &self.outcome {
            DocumentOutcome::Completed { warnings, .. } => warnings.len(),
            DocumentOutcome::Failed { .. } => 0,
        }
    }
}

/// Process one extraction dump end to end. Never panics and never
/// propagates document-level failures.
pub fn process_file(path: &Path, writer: &OutputWriter) -> DocumentReport {
    let source_id = extraction::attachment_id(path)
        .unwrap_or("unknown")
        .to_string();
    match run(path, writer) {
        Ok((records, warnings)) => {
            info!(
                source_id = %source_id,
                records,
                warnings = warnings.len(),
                "document completed"
            );
            DocumentReport {
                source_id,
                outcome: DocumentOutcome::Completed { records, warnings },
            }
        }
        Err(e) => {
            error!(source_id = %source_id, error = %e, "document failed");
            DocumentReport {
                source_id,
                outcome: DocumentOutcome::Failed {
                    error: e.to_string(),
                },
            }
        }
    }
}

fn run(path: &Path, writer: &OutputWriter) -> Result<(usize, Vec<String>)> {
    let source_id = extraction::attachment_id(path).ok_or_else(|| Error::InvalidDump {
        path: path.to_path_buf(),
        reason: "file name is not a valid attachment id".to_string(),
    })?;
    let spec = attachment_registry::lookup(source_id)?;
    let pages = extraction::load_pages(path)?;

    let mut warnings = WarningLog::new();
    let records = table_parser::parse_document(&spec, &pages)?;
    // a dump whose pages hold no tables at all must not produce an
    // empty output pair
    if records.is_empty() {
        return Err(Error::EmptyTable {
            source_id: source_id.to_string(),
            page: 0,
            table: 0,
        });
    }
    let mut document = assembler::assemble(&spec, records, &mut warnings);
    integer_coercion::coerce(&mut document, &mut warnings);
    writer.write_document(&document, &mut warnings)?;

    Ok((document.records.len(), warnings.into_entries()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_dump(dir: &Path, id: &str, body: &str) -> std::path::PathBuf {
        let path = dir.join(format!("{}.json", id));
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn a_region_totals_dump_runs_end_to_end() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();
        // one table: two header rows, then three-cell data rows
        let dump = r#"[[[
            ["Landesstelle", "Refundierungen", "Rechnungsbeträge"],
            ["LST", "EUR", "EUR"],
            ["W", "44.992.965,36", "120.000.000,00"],
            ["V", "-", "-"]
        ]]]"#;
        let path = write_dump(input.path(), "Beilage_1", dump);

        let writer = OutputWriter::new(output.path());
        let report = process_file(&path, &writer);
        match report.outcome {
            DocumentOutcome::Completed { records, .. } => assert_eq!(records, 2),
            DocumentOutcome::Failed { error } => panic!("unexpected failure: {}", error),
        }
        assert!(output.path().join("Beilage_1_data.json").exists());
        assert!(output.path().join("Beilage_1_combined_tables.csv").exists());
    }

    #[test]
    fn an_empty_dump_fails_instead_of_writing_empty_outputs() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();
        let writer = OutputWriter::new(output.path());

        // no pages at all
        let report = process_file(&write_dump(input.path(), "Beilage_3", "[]"), &writer);
        assert!(report.failed());

        // one page without any tables
        let report = process_file(&write_dump(input.path(), "Beilage_3", "[[]]"), &writer);
        assert!(report.failed());

        assert!(!output.path().join("Beilage_3_data.json").exists());
        assert!(!output.path().join("Beilage_3_combined_tables.csv").exists());
    }

    #[test]
    fn unknown_attachments_fail_without_panicking() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();
        let path = write_dump(input.path(), "Beilage_99", "[]");
        let report = process_file(&path, &OutputWriter::new(output.path()));
        assert!(report.failed());
    }

    #[test]
    fn a_malformed_dump_fails_only_its_own_document() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();
        let bad = write_dump(input.path(), "Beilage_1", "not json");
        let report = process_file(&bad, &OutputWriter::new(output.path()));
        assert!(report.failed());
        assert_eq!(report.source_id, "Beilage_1");
    }
}
