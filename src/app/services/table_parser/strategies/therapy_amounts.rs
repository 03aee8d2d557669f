//! Strategy for the therapy-profession reimbursement shape.
//!
//! The extractor compresses each of these tables into four physical rows:
//! a header, one cell holding all the data rows stacked with newlines, and
//! two more cells holding the final data row and the totals row. The
//! logical rows are rebuilt first, then parsed as
//!
//! ```text
//! <region> <period> <code> <label> <refunds> <invoice>
//! ```
//!
//! The totals row inherits its region, rewrites the period to an average
//! label and, in one known document, carries its invoice amount split in
//! two tokens. A few listed data rows have the same split and are handled
//! through the override table rather than guessed.

use crate::app::models::{DocumentType, FieldValue, Page, Record};
use crate::app::services::attachment_registry::TherapyTuning;
use crate::app::services::table_parser::numeric;
use crate::app::services::table_parser::overrides::SliceRule;
use crate::app::services::table_parser::state::RowStateTracker;
use crate::app::services::table_parser::strategies::{parse_split_pair, sort_by_profession_code};
use crate::app::services::table_parser::tokens;
use crate::constants::{
    AVERAGE_PERIOD_PREFIX, FIELD_INVOICE_AMOUNTS, FIELD_PERIOD, FIELD_PROFESSION_CODE,
    FIELD_PROFESSION_LABEL, FIELD_REFUNDS, FIELD_REGION, TOTAL_ROW_LABEL,
};
use crate::error::{Error, Result};

/// Physical rows every compressed table must have: header, stacked data,
/// final data row, totals row
const EXPECTED_PHYSICAL_ROWS: usize = 4;

pub fn parse(source_id: &str, pages: &[Page], tuning: &TherapyTuning) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    for (page_index, page) in pages.iter().enumerate() {
        for (table_index, table) in page.tables.iter().enumerate() {
            if table.rows.len() < EXPECTED_PHYSICAL_ROWS {
                return Err(Error::MissingSubTables {
                    source_id: source_id.to_string(),
                    page: page_index,
                    expected: EXPECTED_PHYSICAL_ROWS,
                    found: table.rows.len(),
                });
            }
            let lines = unpack_rows(&table.rows);
            let table_records = parse_table(source_id, table_index, &lines, tuning)?;
            records.extend(table_records);
        }
    }
    Ok(records)
}

/// Rebuild the logical rows from the compressed physical layout
fn unpack_rows(rows: &[Vec<String>]) -> Vec<&str> {
    fn first_cell(row: &[String]) -> &str {
        row.first().map(String::as_str).unwrap_or_default()
    }
    let mut lines: Vec<&str> = tokens::split_lines(first_cell(&rows[1]));
    lines.push(first_cell(&rows[2]));
    lines.push(first_cell(&rows[3]));
    lines
}

fn parse_table(
    source_id: &str,
    table_index: usize,
    lines: &[&str],
    tuning: &TherapyTuning,
) -> Result<Vec<Record>> {
    let mut state = RowStateTracker::new();
    let mut records = Vec::with_capacity(lines.len());
    let last_index = lines.len() - 1;

    for (index, line) in lines.iter().enumerate() {
        let line = tokens::first_line(line);
        let record = parse_row(line, index, table_index, index == last_index, tuning, &mut state)
            .map_err(|_| Error::unparseable_row(source_id, index, line))?;
        records.push(record);
    }

    sort_by_profession_code(&mut records);
    Ok(records)
}

fn parse_row(
    line: &str,
    row_index: usize,
    table_index: usize,
    is_total_row: bool,
    tuning: &TherapyTuning,
    state: &mut RowStateTracker,
) -> Result<Record> {
    let toks = tokens::split_cell(line);
    let mut record = Record::new(DocumentType::TherapyAmounts);

    if is_total_row {
        if toks.len() < 3 {
            return Err(Error::EmptyNumber);
        }
        let (region, previous) = state.current().ok_or(Error::EmptyNumber)?;
        let period = format!(
            "{} {}",
            AVERAGE_PERIOD_PREFIX,
            tokens::period_year_suffix(&previous)
        );
        record.set(FIELD_REGION, FieldValue::text(region));
        record.set(FIELD_PERIOD, FieldValue::text(period));
        record.set(FIELD_PROFESSION_CODE, FieldValue::Null);
        record.set(FIELD_PROFESSION_LABEL, FieldValue::text(TOTAL_ROW_LABEL));
        record.set(FIELD_REFUNDS, numeric::parse_decimal(toks[1])?);
        let invoice = if tuning.merged_total_pair {
            let second = toks.get(3).copied().ok_or(Error::EmptyNumber)?;
            parse_split_pair(toks[2], second)?
        } else {
            numeric::parse_decimal(toks[2])?
        };
        record.set(FIELD_INVOICE_AMOUNTS, invoice);
        return Ok(record);
    }

    if toks.len() < 6 {
        return Err(Error::EmptyNumber);
    }
    let n = toks.len();
    let (region, period) = state
        .observe(Some(toks[0]), Some(toks[1]))
        .ok_or(Error::EmptyNumber)?;
    let code: i64 = toks[2].parse().map_err(|_| Error::EmptyNumber)?;

    record.set(FIELD_REGION, FieldValue::text(region.as_str()));
    record.set(FIELD_PERIOD, FieldValue::text(period));
    record.set(FIELD_PROFESSION_CODE, FieldValue::Integer(code));
    record.set(FIELD_PROFESSION_LABEL, FieldValue::text(toks[3]));

    let (refunds, invoice) = match tuning.overrides.rule(&region, table_index, row_index) {
        Some(SliceRule::MergedTrailingPair) => (
            numeric::parse_decimal(toks[n - 3])?,
            parse_split_pair(toks[n - 2], toks[n - 1])?,
        ),
        None => (
            numeric::parse_decimal(toks[n - 2])?,
            numeric::parse_decimal(toks[n - 1])?,
        ),
    };
    record.set(FIELD_REFUNDS, refunds);
    record.set(FIELD_INVOICE_AMOUNTS, invoice);
    Ok(record)
}
