//! Tests for the output serialization module.


use std::collections::BTreeMap;

use crate::app::models::{Document, DocumentType, FieldValue, Metadata, Record};
use crate::constants::{
    FIELD_INVOICE_AMOUNTS, FIELD_REFUNDS, FIELD_REGION,
};

/// A small region-totals document with one integer-coerced value and one
/// genuine decimal
pub fn sample_document() -> Document {
    let mut record = Record::new(DocumentType::RegionTotals);
    record.set(FIELD_REGION, FieldValue::text("W"));
    record.set(FIELD_REFUNDS, FieldValue::Decimal(44992965.36));
    record.set(FIELD_INVOICE_AMOUNTS, FieldValue::Integer(120));

    let mut null_record = Record::new(DocumentType::RegionTotals);
    null_record.set(FIELD_REGION, FieldValue::text("V"));
    null_record.set(FIELD_REFUNDS, FieldValue::Null);
    null_record.set(FIELD_INVOICE_AMOUNTS, FieldValue::Null);

    Document {
        source_id: "Beilage_1".to_string(),
        doc_type: DocumentType::RegionTotals,
        metadata: Metadata {
            question: "Testfrage?".to_string(),
            units: BTreeMap::from([
                ("Refunds".to_string(), "EUR".to_string()),
                ("InvoiceAmounts".to_string(), "EUR".to_string()),
            ]),
            year: "2023".to_string(),
            description: BTreeMap::new(),
        },
        records: vec![record, null_record],
    }
}
