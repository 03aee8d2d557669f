//! Strategy for the per-region yearly totals shape.
//!
//! The simplest shape in the corpus: three separated cells per row
//! (region code, refunds, invoice amounts), spread over one or more
//! tables. The first table opens with two header rows, continuation
//! tables with one.

use crate::app::models::{DocumentType, FieldValue, Page, Record};
use crate::app::services::table_parser::numeric;
use crate::constants::{FIELD_INVOICE_AMOUNTS, FIELD_REFUNDS, FIELD_REGION};
use crate::error::{Error, Result};

pub fn parse(source_id: &str, pages: &[Page]) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    let mut first_table = true;

    for (page_index, page) in pages.iter().enumerate() {
        for (table_index, table) in page.tables.iter().enumerate() {
            if table.is_empty() {
                return Err(Error::EmptyTable {
                    source_id: source_id.to_string(),
                    page: page_index,
                    table: table_index,
                });
            }
            let header_rows = if first_table { 2 } else { 1 };
            first_table = false;

            for (row_index, row) in table.rows.iter().skip(header_rows).enumerate() {
                let record = parse_row(row).map_err(|_| {
                    Error::unparseable_row(source_id, row_index, row.join(" | "))
                })?;
                records.push(record);
            }
        }
    }
    Ok(records)
}

fn parse_row(row: &[String]) -> Result<Record> {
    let region = row.first().map(|c| c.trim()).unwrap_or_default();
    if region.is_empty() || row.len() < 3 {
        return Err(Error::EmptyNumber);
    }
    let mut record = Record::new(DocumentType::RegionTotals);
    record.set(FIELD_REGION, FieldValue::text(region));
    record.set(FIELD_REFUNDS, numeric::parse_decimal(&row[1])?);
    record.set(FIELD_INVOICE_AMOUNTS, numeric::parse_decimal(&row[2])?);
    Ok(record)
}
