//! Strategies for the average-processing-time shapes.
//!
//! Two layouts share the same row grammar:
//!
//! ```text
//! <region> <period> <postal> <count> <online-app> <count> [<legacy> <count>]
//! ```
//!
//! The standard layout is one table per page with the legacy online
//! channel as a third metric, available per region only from a configured
//! month onwards (null before, never zero). The compact layout packs
//! several sub-tables per page and has no legacy column.
//!
//! Both layouts end each table with an average row that drops the region
//! column (every remaining token shifts left by one) and inherits the
//! region from the row above.

use crate::app::models::{DocumentType, FieldValue, Page, Record};
use crate::app::services::attachment_registry::{CompactTuning, ProcessingTimeTuning};
use crate::app::services::table_parser::availability::parse_period;
use crate::app::services::table_parser::numeric;
use crate::app::services::table_parser::state::RowStateTracker;
use crate::app::services::table_parser::tokens;
use crate::constants::{
    AVERAGE_PERIOD_PREFIX, FIELD_ONLINE_APP, FIELD_ONLINE_LEGACY, FIELD_PERIOD, FIELD_POSTAL,
    FIELD_REGION,
};
use crate::error::{Error, Result};

/// Parse the standard one-table-per-page layout
pub fn parse(
    source_id: &str,
    pages: &[Page],
    tuning: &ProcessingTimeTuning,
) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    for (page_index, page) in pages.iter().enumerate() {
        let table = page.tables.first().ok_or_else(|| Error::EmptyTable {
            source_id: source_id.to_string(),
            page: page_index,
            table: 0,
        })?;
        // two header rows, one decorative trailing row
        if table.rows.len() < 4 {
            return Err(Error::EmptyTable {
                source_id: source_id.to_string(),
                page: page_index,
                table: 0,
            });
        }

        let mut state = RowStateTracker::new();
        let last_index = table.rows.len() - 2;
        for (index, row) in table.rows.iter().enumerate() {
            if index < 2 || index > last_index {
                continue;
            }
            let cell = row.first().map(String::as_str).unwrap_or_default();
            // a wrapped region label pushes the data onto the last sub-line
            let line = tokens::last_line(cell);
            let record = parse_row(line, index == last_index, tuning, &mut state)
                .map_err(|_| Error::unparseable_row(source_id, index, line))?;
            records.push(record);
        }
    }
    Ok(records)
}

fn parse_row(
    line: &str,
    is_average_row: bool,
    tuning: &ProcessingTimeTuning,
    state: &mut RowStateTracker,
) -> Result<Record> {
    let toks = tokens::split_cell(line);
    let (region, period) = if is_average_row {
        let (region, _) = state.current().ok_or(Error::EmptyNumber)?;
        state.set_period(AVERAGE_PERIOD_PREFIX);
        (region, AVERAGE_PERIOD_PREFIX.to_string())
    } else {
        state
            .observe(toks.first().copied(), toks.get(1).copied())
            .ok_or(Error::EmptyNumber)?
    };
    // the average row drops the region token; everything shifts left
    let offset = usize::from(is_average_row);

    let primary_available = match tuning.all_channels_from {
        Some(from) => parse_period(&period).map_or(true, |key| key >= from),
        None => true,
    };
    let legacy_available = tuning.legacy_channel.available(&region, &period);

    let mut record = Record::new(DocumentType::ProcessingTime);
    record.set(FIELD_REGION, FieldValue::text(region));
    record.set(FIELD_PERIOD, FieldValue::text(period));
    record.set(
        FIELD_POSTAL,
        metric(&toks, 2 - offset, primary_available)?,
    );
    record.set(
        FIELD_ONLINE_APP,
        metric(&toks, 4 - offset, primary_available)?,
    );
    record.set(
        FIELD_ONLINE_LEGACY,
        metric(&toks, 6 - offset, legacy_available)?,
    );
    Ok(record)
}

/// Fetch and parse a metric token, or `Null` when the metric does not
/// exist for this region and period (the token may then be absent)
fn metric(toks: &[&str], index: usize, available: bool) -> Result<FieldValue> {
    if !available {
        return Ok(FieldValue::Null);
    }
    let token = toks.get(index).copied().ok_or(Error::EmptyNumber)?;
    numeric::parse_decimal(token)
}

/// Parse the compact multi-sub-table layout
pub fn parse_compact(
    source_id: &str,
    pages: &[Page],
    tuning: &CompactTuning,
) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    for (page_index, page) in pages.iter().enumerate() {
        for (table_index, table) in page.tables.iter().enumerate() {
            if tuning.is_skipped(page_index, table_index) {
                continue;
            }
            let header_rows = tuning.header_rows_for(table_index);
            let last_index = table
                .rows
                .len()
                .checked_sub(tuning.last_row_offset_for(table_index))
                .filter(|last| *last >= header_rows)
                .ok_or_else(|| Error::EmptyTable {
                    source_id: source_id.to_string(),
                    page: page_index,
                    table: table_index,
                })?;

            let mut state = RowStateTracker::new();
            for (index, row) in table.rows.iter().enumerate() {
                if index < header_rows || index > last_index {
                    continue;
                }
                let joined = tokens::join_row(row);
                let record = parse_compact_row(&joined, index == last_index, &mut state)
                    .map_err(|_| Error::unparseable_row(source_id, index, joined.clone()))?;
                records.push(record);
            }
        }
    }
    Ok(records)
}

fn parse_compact_row(
    line: &str,
    is_average_row: bool,
    state: &mut RowStateTracker,
) -> Result<Record> {
    let toks = tokens::split_cell(line);
    let (region, period) = if is_average_row {
        let (region, previous) = state.current().ok_or(Error::EmptyNumber)?;
        let label = format!(
            "{} {}",
            AVERAGE_PERIOD_PREFIX,
            tokens::period_year_suffix(&previous)
        );
        state.set_period(label.clone());
        (region, label)
    } else {
        state
            .observe(toks.first().copied(), toks.get(1).copied())
            .ok_or(Error::EmptyNumber)?
    };
    let offset = usize::from(is_average_row);

    let mut record = Record::new(DocumentType::ProcessingTimeCompact);
    record.set(FIELD_REGION, FieldValue::text(region));
    record.set(FIELD_PERIOD, FieldValue::text(period));
    record.set(FIELD_POSTAL, metric(&toks, 2 - offset, true)?);
    record.set(FIELD_ONLINE_APP, metric(&toks, 4 - offset, true)?);
    Ok(record)
}
