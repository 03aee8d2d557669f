//! Document assembly.
//!
//! Merges the parsed records with the registered metadata block and, for
//! the application-count shapes, recomputes the reported total from its
//! components. A reported total that disagrees with the recomputed one is
//! a data anomaly in the source table: the recomputed value wins and the
//! discrepancy is logged with both values.

use crate::app::models::{Document, FieldValue, Record, WarningLog};
use crate::app::services::attachment_registry::AttachmentSpec;
use crate::config::RegionNames;
use crate::constants::{FIELD_ONLINE, FIELD_POSTAL, FIELD_REGION, FIELD_TOTAL, TOTAL_ROW_LABEL};

pub fn assemble(
    spec: &AttachmentSpec,
    records: Vec<Record>,
    warnings: &mut WarningLog,
) -> Document {
    let mut document = Document {
        source_id: spec.id.to_string(),
        doc_type: spec.doc_type,
        metadata: spec.metadata.clone(),
        records,
    };
    check_region_codes(&document, warnings);
    if document.doc_type.recomputes_total() {
        recompute_totals(&mut document, warnings);
    }
    document
}

/// Flag region tokens outside the known Landesstellen table. A typo here
/// usually means a mis-sliced row further up.
fn check_region_codes(document: &Document, warnings: &mut WarningLog) {
    let regions = RegionNames::default();
    let mut flagged: Vec<String> = Vec::new();
    for record in &document.records {
        if let FieldValue::Text(token) = record.get(FIELD_REGION) {
            // the overall totals row legitimately carries the totals
            // label in the region column
            if token == TOTAL_ROW_LABEL {
                continue;
            }
            if !regions.is_known(token) && !flagged.iter().any(|seen| seen == token) {
                flagged.push(token.clone());
                warnings.push(format!(
                    "{}: unknown region code '{}'",
                    document.source_id, token
                ));
            }
        }
    }
}

/// Recompute `Total = Postal + Online`, nulls counting as zero.
///
/// Rows where both components are null keep their reported total; there
/// is nothing to recompute a zero from without turning an explicit "no
/// data" into a figure.
fn recompute_totals(document: &mut Document, warnings: &mut WarningLog) {
    for (index, record) in document.records.iter_mut().enumerate() {
        let postal = record.number(FIELD_POSTAL);
        let online = record.number(FIELD_ONLINE);
        if postal.is_none() && online.is_none() {
            continue;
        }
        let computed = postal.unwrap_or(0.0) + online.unwrap_or(0.0);

        if let Some(reported) = record.number(FIELD_TOTAL) {
            if reported != computed {
                warnings.push(format!(
                    "{}: row {} total mismatch, reported {} but components sum to {}",
                    document.source_id, index, reported, computed
                ));
            }
        }
        record.set(FIELD_TOTAL, FieldValue::Decimal(computed));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::DocumentType;
    use crate::app::services::attachment_registry;

    fn count_record(postal: FieldValue, online: FieldValue, total: FieldValue) -> Record {
        let mut record = Record::new(DocumentType::MonthlyApplications);
        record.set(FIELD_POSTAL, postal);
        record.set(FIELD_ONLINE, online);
        record.set(FIELD_TOTAL, total);
        record
    }

    #[test]
    fn totals_are_recomputed_with_nulls_as_zero() {
        let spec = attachment_registry::lookup("Beilage_3").unwrap();
        let mut warnings = WarningLog::new();
        let document = assemble(
            &spec,
            vec![count_record(
                FieldValue::Decimal(5.0),
                FieldValue::Null,
                FieldValue::Decimal(5.0),
            )],
            &mut warnings,
        );
        assert_eq!(
            *document.records[0].get(FIELD_TOTAL),
            FieldValue::Decimal(5.0)
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn total_mismatch_is_a_warning_and_the_recomputed_value_wins() {
        let spec = attachment_registry::lookup("Beilage_3").unwrap();
        let mut warnings = WarningLog::new();
        let document = assemble(
            &spec,
            vec![count_record(
                FieldValue::Decimal(5.0),
                FieldValue::Decimal(2.0),
                FieldValue::Decimal(8.0),
            )],
            &mut warnings,
        );
        assert_eq!(
            *document.records[0].get(FIELD_TOTAL),
            FieldValue::Decimal(7.0)
        );
        assert_eq!(warnings.len(), 1);
        assert!(warnings.entries()[0].contains("reported 8"));
    }

    #[test]
    fn fully_null_rows_keep_their_reported_total() {
        let spec = attachment_registry::lookup("Beilage_3").unwrap();
        let mut warnings = WarningLog::new();
        let document = assemble(
            &spec,
            vec![count_record(FieldValue::Null, FieldValue::Null, FieldValue::Null)],
            &mut warnings,
        );
        assert!(document.records[0].get(FIELD_TOTAL).is_null());
    }

    #[test]
    fn totals_are_untouched_for_non_count_documents() {
        let spec = attachment_registry::lookup("Beilage_1").unwrap();
        let mut warnings = WarningLog::new();
        let mut record = Record::new(DocumentType::RegionTotals);
        record.set(FIELD_TOTAL, FieldValue::Decimal(8.0));
        let document = assemble(&spec, vec![record], &mut warnings);
        assert_eq!(
            *document.records[0].get(FIELD_TOTAL),
            FieldValue::Decimal(8.0)
        );
    }
}
