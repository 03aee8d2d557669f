//! Per-document-type parsing strategies.
//!
//! One module per table shape. Every strategy consumes raw pages and emits
//! typed records; the shared helpers here cover the bits all shapes need
//! (profession-code ordering, the split-number token join).

use std::cmp::Ordering;

use crate::app::models::{FieldValue, Record};
use crate::app::services::table_parser::numeric;
use crate::app::services::table_parser::tokens;
use crate::constants::{FIELD_PROFESSION_CODE, NULL_SENTINEL};
use crate::error::Result;

pub mod monthly_applications;
pub mod processing_time;
pub mod profession_totals;
pub mod region_totals;
pub mod therapy_amounts;

/// Stable sort by profession code, records without a code last.
///
/// Applied per logical table, matching the source ordering convention
/// where the synthetic totals row sinks to the end.
pub(crate) fn sort_by_profession_code(records: &mut [Record]) {
    records.sort_by(|a, b| {
        let a_code = a.get(FIELD_PROFESSION_CODE).as_f64();
        let b_code = b.get(FIELD_PROFESSION_CODE).as_f64();
        match (a_code, b_code) {
            (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
}

/// Parse a number the extractor split across two adjacent tokens.
///
/// Grouping dots are removed from both halves before the join, so the
/// recovered literal always matches the ungrouped pattern. The null
/// sentinel only ever occupies the first half.
pub(crate) fn parse_split_pair(first: &str, second: &str) -> Result<FieldValue> {
    if first.trim() == NULL_SENTINEL {
        return Ok(FieldValue::Null);
    }
    let joined = format!("{}{}", tokens::degrouped(first), tokens::degrouped(second));
    numeric::parse_decimal(&joined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::DocumentType;

    fn record_with_code(code: Option<i64>) -> Record {
        let mut record = Record::new(DocumentType::MonthlyApplications);
        record.set(
            FIELD_PROFESSION_CODE,
            code.map_or(FieldValue::Null, FieldValue::Integer),
        );
        record
    }

    #[test]
    fn codeless_records_sort_last() {
        let mut records = vec![
            record_with_code(None),
            record_with_code(Some(27)),
            record_with_code(Some(2)),
        ];
        sort_by_profession_code(&mut records);
        let codes: Vec<_> = records
            .iter()
            .map(|r| r.get(FIELD_PROFESSION_CODE).as_f64())
            .collect();
        assert_eq!(codes, vec![Some(2.0), Some(27.0), None]);
    }

    #[test]
    fn split_pair_rejoins_a_grouped_number() {
        assert_eq!(
            parse_split_pair("44.992.", "965,36").unwrap(),
            FieldValue::Decimal(44992965.36)
        );
        assert_eq!(parse_split_pair("-", "965").unwrap(), FieldValue::Null);
    }
}
