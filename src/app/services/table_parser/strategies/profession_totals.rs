//! Strategy for the per-profession yearly totals shape.
//!
//! A single-page table whose label column wraps unpredictably. Three row
//! forms occur:
//!
//! - stacked cells, where one visual cell holds a label line, then the
//!   numbers line of the row, then the label's continuation line;
//! - plain single-line rows, `<code> <label...> <refunds> <invoice>`;
//! - the final "Gesamt" row, whose two amounts each arrive split across
//!   two tokens.

use crate::app::models::{DocumentType, FieldValue, Page, Record};
use crate::app::services::table_parser::numeric;
use crate::app::services::table_parser::strategies::{parse_split_pair, sort_by_profession_code};
use crate::app::services::table_parser::tokens;
use crate::constants::{
    FIELD_INVOICE_AMOUNTS, FIELD_PROFESSION_CODE, FIELD_PROFESSION_LABEL, FIELD_REFUNDS,
    TOTAL_ROW_LABEL,
};
use crate::error::{Error, Result};

pub fn parse(source_id: &str, pages: &[Page]) -> Result<Vec<Record>> {
    let table = pages
        .first()
        .and_then(|page| page.tables.first())
        .ok_or_else(|| Error::EmptyTable {
            source_id: source_id.to_string(),
            page: 0,
            table: 0,
        })?;
    if table.rows.len() < 2 {
        return Err(Error::EmptyTable {
            source_id: source_id.to_string(),
            page: 0,
            table: 0,
        });
    }

    let rows = &table.rows[1..];
    let last_index = rows.len() - 1;
    let mut records = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        let cell = row.first().map(String::as_str).unwrap_or_default();
        let record = parse_row(cell, index == last_index)
            .map_err(|_| Error::unparseable_row(source_id, index, cell))?;
        records.push(record);
    }

    sort_by_profession_code(&mut records);
    Ok(records)
}

fn parse_row(cell: &str, is_total_row: bool) -> Result<Record> {
    let lines = tokens::split_lines(cell);
    let mut record = Record::new(DocumentType::ProfessionTotals);

    if lines.len() > 1 {
        // Stacked form: the middle line carries code and both amounts,
        // the label is split around it
        let continuation = lines.get(2).copied().ok_or(Error::EmptyNumber)?;
        let toks = tokens::split_cell(lines[1]);
        if toks.len() < 3 {
            return Err(Error::EmptyNumber);
        }
        let code: i64 = toks[0].parse().map_err(|_| Error::EmptyNumber)?;
        record.set(FIELD_PROFESSION_CODE, FieldValue::Integer(code));
        record.set(
            FIELD_PROFESSION_LABEL,
            FieldValue::text(format!("{} {}", lines[0].trim(), continuation.trim())),
        );
        record.set(FIELD_REFUNDS, numeric::parse_decimal(toks[toks.len() - 2])?);
        record.set(
            FIELD_INVOICE_AMOUNTS,
            numeric::parse_decimal(toks[toks.len() - 1])?,
        );
        return Ok(record);
    }

    let toks = tokens::split_cell(cell);
    if is_total_row {
        if toks.len() < 5 {
            return Err(Error::EmptyNumber);
        }
        record.set(FIELD_PROFESSION_CODE, FieldValue::Null);
        record.set(FIELD_PROFESSION_LABEL, FieldValue::text(TOTAL_ROW_LABEL));
        record.set(FIELD_REFUNDS, parse_split_pair(toks[1], toks[2])?);
        record.set(FIELD_INVOICE_AMOUNTS, parse_split_pair(toks[3], toks[4])?);
        return Ok(record);
    }

    if toks.len() < 3 {
        return Err(Error::EmptyNumber);
    }
    let n = toks.len();
    match tokens::split_leading_code(toks[0]) {
        Some((code, label_head)) => {
            let mut label_parts: Vec<&str> = Vec::with_capacity(n - 2);
            if !label_head.is_empty() {
                label_parts.push(label_head);
            }
            label_parts.extend_from_slice(&toks[1..n - 2]);
            record.set(FIELD_PROFESSION_CODE, FieldValue::Integer(code));
            record.set(
                FIELD_PROFESSION_LABEL,
                FieldValue::text(label_parts.join(" ").trim()),
            );
        }
        None => {
            record.set(FIELD_PROFESSION_CODE, FieldValue::Null);
            record.set(
                FIELD_PROFESSION_LABEL,
                FieldValue::text(toks[..n - 2].join(" ").trim()),
            );
        }
    }
    record.set(FIELD_REFUNDS, numeric::parse_decimal(toks[n - 2])?);
    record.set(FIELD_INVOICE_AMOUNTS, numeric::parse_decimal(toks[n - 1])?);
    Ok(record)
}
