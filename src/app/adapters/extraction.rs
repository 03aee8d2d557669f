//! Loading of extraction dumps.
//!
//! The PDF extraction step runs elsewhere and hands over one JSON file
//! per attachment, named `<AttachmentId>.json` and shaped as four nested
//! arrays: pages, tables, rows, cells. Cells may be `null` where the
//! extractor found nothing; they are read as empty strings. Any other
//! shape is a contract violation.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::app::models::{Page, RawTable};
use crate::error::{Error, Result};

type RawDump = Vec<Vec<Vec<Vec<Option<String>>>>>;

/// Load all pages of one attachment dump
pub fn load_pages(path: &Path) -> Result<Vec<Page>> {
    let text = fs::read_to_string(path).map_err(|e| Error::InvalidDump {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let dump: RawDump = serde_json::from_str(&text).map_err(|e| Error::InvalidDump {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let pages: Vec<Page> = dump
        .into_iter()
        .map(|tables| {
            Page::new(
                tables
                    .into_iter()
                    .map(|rows| {
                        RawTable::new(
                            rows.into_iter()
                                .map(|row| {
                                    row.into_iter().map(Option::unwrap_or_default).collect()
                                })
                                .collect(),
                        )
                    })
                    .collect(),
            )
        })
        .collect();
    debug!(path = %path.display(), pages = pages.len(), "loaded extraction dump");
    Ok(pages)
}

/// Attachment id of a dump file, taken from its file stem
pub fn attachment_id(path: &Path) -> Option<&str> {
    path.file_stem().and_then(|stem| stem.to_str())
}

/// All dump files in a directory, in name order
pub fn discover_dumps(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut dumps: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension().and_then(|e| e.to_str()) == Some("json")
                && path.is_file()
        })
        .collect();
    dumps.sort();
    Ok(dumps)
}
