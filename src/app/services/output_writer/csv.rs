//! Flat CSV encoding of a document.

use std::path::Path;

use csv::{QuoteStyle, WriterBuilder};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::app::models::Document;
use crate::error::Result;

/// Write the document's records as a CSV table.
///
/// The header and field order are fixed per document type. Text fields
/// are quoted, numbers are not; nulls render as empty fields and integers
/// carry no decimal point.
pub fn write_csv(document: &Document, target: &Path) -> Result<()> {
    let dir = target.parent().unwrap_or_else(|| Path::new("."));
    let temp = NamedTempFile::new_in(dir)?;

    let order = document.doc_type.field_order();
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::NonNumeric)
        .from_writer(&temp);

    writer.write_record(order)?;
    for record in &document.records {
        writer.write_record(order.iter().map(|field| record.get(field).to_csv_field()))?;
    }
    writer.flush()?;
    drop(writer);

    super::persist_temp(temp, target)?;
    debug!(path = %target.display(), rows = document.records.len(), "wrote csv output");
    Ok(())
}
