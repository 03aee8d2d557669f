//! Strategy for the monthly application-count shapes.
//!
//! Rows arrive as one space-joined token stream:
//!
//! ```text
//! <region> <period> <code><label...> <postal> <online> <total>
//! ```
//!
//! with two complications. The profession code is usually glued to the
//! first label word, and the online count is sometimes split into two
//! adjacent tokens; the trailing-layout check on the 4th-from-last token
//! tells the two arities apart. Each table ends with a "Gesamt" totals
//! row that inherits region and period from the row above and carries no
//! profession code.
//!
//! The same grammar serves two layouts: one full-page table with five
//! header rows per page, or many per-page sub-tables with one header row
//! each. A handful of sub-tables are known to arrive merged with their
//! successor and are split by an explicit rule first.

use crate::app::models::{DocumentType, FieldValue, Page, RawTable, Record};
use crate::app::services::attachment_registry::MonthlyTuning;
use crate::app::services::table_parser::numeric;
use crate::app::services::table_parser::state::RowStateTracker;
use crate::app::services::table_parser::strategies::{parse_split_pair, sort_by_profession_code};
use crate::app::services::table_parser::tokens::{
    self, detect_trailing_layout, TrailingLayout,
};
use crate::constants::{
    FIELD_ONLINE, FIELD_PERIOD, FIELD_POSTAL, FIELD_PROFESSION_CODE, FIELD_PROFESSION_LABEL,
    FIELD_REGION, FIELD_TOTAL, TOTAL_ROW_LABEL,
};
use crate::error::{Error, Result};

/// Header rows preceding the data in the full-page layout
const FULL_PAGE_HEADER_ROWS: usize = 5;

/// Header rows preceding the data in each sub-table
const SUB_TABLE_HEADER_ROWS: usize = 1;

pub fn parse(
    source_id: &str,
    doc_type: DocumentType,
    pages: &[Page],
    tuning: &MonthlyTuning,
) -> Result<Vec<Record>> {
    let header_rows = if tuning.sub_table_mode {
        SUB_TABLE_HEADER_ROWS
    } else {
        FULL_PAGE_HEADER_ROWS
    };

    let mut records = Vec::new();
    for (page_index, page) in pages.iter().enumerate() {
        let tables = arrange_tables(page, page_index, tuning);
        let tables = if tuning.sub_table_mode {
            tables
        } else {
            // full-page extraction yields exactly one table per page
            tables.into_iter().take(1).collect()
        };

        for (table_index, table) in tables.iter().enumerate() {
            if table.rows.len() <= header_rows {
                return Err(Error::EmptyTable {
                    source_id: source_id.to_string(),
                    page: page_index,
                    table: table_index,
                });
            }
            let table_records =
                parse_table(source_id, doc_type, &table.rows[header_rows..])?;
            records.extend(table_records);
        }
    }
    Ok(records)
}

/// Apply the configured split rules, turning each known merged table into
/// two. The row at the split boundary is truncated to its first sub-line
/// and shared: it closes the first sub-table and is consumed as the header
/// of the second.
fn arrange_tables(page: &Page, page_index: usize, tuning: &MonthlyTuning) -> Vec<RawTable> {
    let mut tables = page.tables.clone();
    for rule in &tuning.table_splits {
        if !rule.pages.contains(&page_index) || tables.len() <= rule.table_index {
            continue;
        }
        let merged = &tables[rule.table_index];
        if merged.rows.len() <= rule.split_at_row {
            continue;
        }
        let mut rows = merged.rows.clone();
        let boundary = rows[rule.split_at_row]
            .first()
            .map(|cell| tokens::first_line(cell).to_string())
            .unwrap_or_default();
        rows[rule.split_at_row] = vec![boundary];

        let head = RawTable::new(rows[..=rule.split_at_row].to_vec());
        let tail = RawTable::new(rows[rule.split_at_row..].to_vec());
        tables.splice(rule.table_index..=rule.table_index, [head, tail]);
    }
    tables
}

/// Parse one logical table's data rows. The last row is always the
/// totals row; records are ordered by profession code with the totals
/// row last.
fn parse_table(
    source_id: &str,
    doc_type: DocumentType,
    rows: &[Vec<String>],
) -> Result<Vec<Record>> {
    let mut state = RowStateTracker::new();
    let mut records = Vec::with_capacity(rows.len());
    let last_index = rows.len() - 1;

    for (index, row) in rows.iter().enumerate() {
        let joined = tokens::join_row(row);
        let record = parse_row(doc_type, &joined, index == last_index, &mut state)
            .map_err(|_| Error::unparseable_row(source_id, index, joined.clone()))?;
        records.push(record);
    }

    sort_by_profession_code(&mut records);
    Ok(records)
}

fn parse_row(
    doc_type: DocumentType,
    joined: &str,
    is_total_row: bool,
    state: &mut RowStateTracker,
) -> Result<Record> {
    let toks = tokens::split_cell(joined);
    if toks.len() < 4 {
        return Err(Error::EmptyNumber);
    }
    let n = toks.len();
    let layout = detect_trailing_layout(&toks);

    let mut record = Record::new(doc_type);

    if is_total_row {
        let (region, period) = state.current().ok_or(Error::EmptyNumber)?;
        record.set(FIELD_REGION, FieldValue::text(region));
        record.set(FIELD_PERIOD, FieldValue::text(period));
        record.set(FIELD_PROFESSION_CODE, FieldValue::Null);
        record.set(FIELD_PROFESSION_LABEL, FieldValue::text(TOTAL_ROW_LABEL));
    } else {
        let (region, period) = state
            .observe(toks.first().copied(), toks.get(1).copied())
            .ok_or(Error::EmptyNumber)?;
        let (code, label_head) =
            tokens::split_leading_code(toks[2]).ok_or(Error::EmptyNumber)?;

        let min_tokens = match layout {
            TrailingLayout::SplitNumber => 7,
            TrailingLayout::Plain => 6,
        };
        if n < min_tokens {
            return Err(Error::EmptyNumber);
        }
        let label_tail = match layout {
            TrailingLayout::SplitNumber => &toks[3..n - 4],
            TrailingLayout::Plain => &toks[3..n - 3],
        };
        let mut label_parts: Vec<&str> = Vec::with_capacity(label_tail.len() + 1);
        if !label_head.is_empty() {
            label_parts.push(label_head);
        }
        label_parts.extend_from_slice(label_tail);

        record.set(FIELD_REGION, FieldValue::text(region));
        record.set(FIELD_PERIOD, FieldValue::text(period));
        record.set(FIELD_PROFESSION_CODE, FieldValue::Integer(code));
        record.set(
            FIELD_PROFESSION_LABEL,
            FieldValue::text(label_parts.join(" ").trim()),
        );
    }

    let (postal, online) = match layout {
        TrailingLayout::SplitNumber => (
            numeric::parse_nullable(toks[n - 4])?,
            parse_split_pair(toks[n - 3], toks[n - 2])?,
        ),
        TrailingLayout::Plain => (
            numeric::parse_nullable(toks[n - 3])?,
            numeric::parse_nullable(toks[n - 2])?,
        ),
    };
    record.set(FIELD_POSTAL, postal);
    record.set(FIELD_ONLINE, online);
    record.set(FIELD_TOTAL, numeric::parse_nullable(toks[n - 1])?);
    Ok(record)
}
