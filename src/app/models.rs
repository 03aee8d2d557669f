//! Data models for attachment processing
//!
//! This module contains the core data structures for representing raw table
//! extractions, typed field values, parsed records and assembled documents.

use serde::{Deserialize, Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};
use tracing::warn;

use crate::constants::{
    FIELD_INVOICE_AMOUNTS, FIELD_ONLINE, FIELD_ONLINE_APP, FIELD_ONLINE_LEGACY, FIELD_PERIOD,
    FIELD_POSTAL, FIELD_PROFESSION_CODE, FIELD_PROFESSION_LABEL, FIELD_REFUNDS, FIELD_REGION,
    FIELD_TOTAL,
};

// =============================================================================
// Raw extraction shapes
// =============================================================================

/// One extracted table row: an ordered sequence of cell strings.
///
/// Cells may contain embedded newlines where the source PDF stacked several
/// logical rows inside one visual cell.
pub type RawRow = Vec<String>;

/// One extracted table, scoped to a page or a logical sub-table of a page
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct RawTable {
    pub rows: Vec<RawRow>,
}

impl RawTable {
    pub fn new(rows: Vec<RawRow>) -> Self {
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One extracted page: an ordered sequence of tables
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Page {
    pub tables: Vec<RawTable>,
}

impl Page {
    pub fn new(tables: Vec<RawTable>) -> Self {
        Self { tables }
    }
}

// =============================================================================
// Typed field values
// =============================================================================

/// A single typed cell value after parsing.
///
/// `Null` represents the explicit "-" sentinel in the source data and is
/// distinct from zero. `Decimal` is the default numeric representation out of
/// the parser; integer coercion happens later, per value, so that the CSV and
/// JSON encodings can never disagree about a value's type.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Integer(i64),
    Decimal(f64),
    Text(String),
    Null,
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Numeric view of the value, if it has one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(v) => Some(*v as f64),
            FieldValue::Decimal(v) => Some(*v),
            _ => None,
        }
    }

    /// True for decimals whose fractional part is exactly zero
    pub fn is_integral_decimal(&self) -> bool {
        matches!(self, FieldValue::Decimal(v) if v.fract() == 0.0 && v.is_finite())
    }

    /// Render the value for the flat tabular output. Nulls become empty
    /// fields; integers carry no decimal point.
    pub fn to_csv_field(&self) -> String {
        match self {
            FieldValue::Integer(v) => v.to_string(),
            FieldValue::Decimal(v) => format!("{}", v),
            FieldValue::Text(v) => v.clone(),
            FieldValue::Null => String::new(),
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }
}

impl Serialize for FieldValue {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            FieldValue::Integer(v) => serializer.serialize_i64(*v),
            FieldValue::Decimal(v) => serializer.serialize_f64(*v),
            FieldValue::Text(v) => serializer.serialize_str(v),
            FieldValue::Null => serializer.serialize_unit(),
        }
    }
}

// =============================================================================
// Document types
// =============================================================================

/// Identifies the table shape of an attachment and therefore the parsing
/// strategy, the output column order and the integer-typed columns.
///
/// The variant is supplied by the attachment registry, derived once from the
/// attachment id - parsing code dispatches on this enum and never sniffs
/// filenames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    /// Per-region yearly reimbursement totals (three separated cells per row)
    RegionTotals,
    /// Per-profession yearly reimbursement totals with multi-line label cells
    ProfessionTotals,
    /// Monthly application counts per profession, one space-joined cell per row
    MonthlyApplications,
    /// Monthly application counts spread over many pages of sub-tables
    ProfessionMonthly,
    /// Average processing times with a trailing blank row before the totals row
    ProcessingTime,
    /// Processing times in the compact multi-sub-table layout
    ProcessingTimeCompact,
    /// Reimbursements for therapy professions with newline-compressed tables
    TherapyAmounts,
}

impl DocumentType {
    /// Fixed output column order for this document type
    pub fn field_order(&self) -> &'static [&'static str] {
        match self {
            DocumentType::RegionTotals => &[FIELD_REGION, FIELD_REFUNDS, FIELD_INVOICE_AMOUNTS],
            DocumentType::ProfessionTotals => &[
                FIELD_PROFESSION_CODE,
                FIELD_PROFESSION_LABEL,
                FIELD_REFUNDS,
                FIELD_INVOICE_AMOUNTS,
            ],
            DocumentType::MonthlyApplications | DocumentType::ProfessionMonthly => &[
                FIELD_REGION,
                FIELD_PERIOD,
                FIELD_PROFESSION_CODE,
                FIELD_PROFESSION_LABEL,
                FIELD_POSTAL,
                FIELD_ONLINE,
                FIELD_TOTAL,
            ],
            DocumentType::ProcessingTime => &[
                FIELD_REGION,
                FIELD_PERIOD,
                FIELD_POSTAL,
                FIELD_ONLINE_APP,
                FIELD_ONLINE_LEGACY,
            ],
            DocumentType::ProcessingTimeCompact => {
                &[FIELD_REGION, FIELD_PERIOD, FIELD_POSTAL, FIELD_ONLINE_APP]
            }
            DocumentType::TherapyAmounts => &[
                FIELD_REGION,
                FIELD_PERIOD,
                FIELD_PROFESSION_CODE,
                FIELD_PROFESSION_LABEL,
                FIELD_REFUNDS,
                FIELD_INVOICE_AMOUNTS,
            ],
        }
    }

    /// Columns whose values are integral counts and must never serialize
    /// with a fractional part
    pub fn integer_fields(&self) -> &'static [&'static str] {
        match self {
            DocumentType::RegionTotals => &[],
            DocumentType::ProfessionTotals | DocumentType::TherapyAmounts => {
                &[FIELD_PROFESSION_CODE]
            }
            DocumentType::MonthlyApplications | DocumentType::ProfessionMonthly => {
                &[FIELD_PROFESSION_CODE, FIELD_POSTAL, FIELD_ONLINE, FIELD_TOTAL]
            }
            DocumentType::ProcessingTime => {
                &[FIELD_POSTAL, FIELD_ONLINE_APP, FIELD_ONLINE_LEGACY]
            }
            DocumentType::ProcessingTimeCompact => &[FIELD_POSTAL, FIELD_ONLINE_APP],
        }
    }

    /// Whether the total column must be recomputed from its components
    /// during assembly
    pub fn recomputes_total(&self) -> bool {
        matches!(
            self,
            DocumentType::MonthlyApplications | DocumentType::ProfessionMonthly
        )
    }
}

// =============================================================================
// Records and documents
// =============================================================================

/// One parsed table row: field name to typed value, tagged with the
/// document type that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub doc_type: DocumentType,
    values: HashMap<&'static str, FieldValue>,
}

impl Record {
    pub fn new(doc_type: DocumentType) -> Self {
        Self {
            doc_type,
            values: HashMap::new(),
        }
    }

    pub fn set(&mut self, field: &'static str, value: FieldValue) {
        self.values.insert(field, value);
    }

    /// Value of a field; fields absent from the record read as Null
    pub fn get(&self, field: &str) -> &FieldValue {
        self.values.get(field).unwrap_or(&FieldValue::Null)
    }

    pub fn get_mut(&mut self, field: &str) -> Option<&mut FieldValue> {
        self.values.get_mut(field)
    }

    /// Numeric view of a field, if present and numeric
    pub fn number(&self, field: &str) -> Option<f64> {
        self.get(field).as_f64()
    }
}

/// Document metadata attached once per document, not per record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub question: String,
    pub units: BTreeMap<String, String>,
    pub year: String,
    pub description: BTreeMap<String, String>,
}

/// One fully assembled document, ready for serialization.
/// Immutable once written to its output file pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub source_id: String,
    pub doc_type: DocumentType,
    pub metadata: Metadata,
    pub records: Vec<Record>,
}

// =============================================================================
// Warning accumulation
// =============================================================================

/// Per-document warning log.
///
/// Every recoverable anomaly lands here with enough context to locate the
/// source row; entries are also emitted through tracing and end up in the
/// consolidated run log.
#[derive(Debug, Default, Clone)]
pub struct WarningLog {
    entries: Vec<String>,
}

impl WarningLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("{}", message);
        self.entries.push(message);
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<String> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_is_distinct_from_zero() {
        assert!(FieldValue::Null.is_null());
        assert!(!FieldValue::Integer(0).is_null());
        assert_eq!(FieldValue::Null.as_f64(), None);
    }

    #[test]
    fn csv_rendering_of_values() {
        assert_eq!(FieldValue::Integer(44992965).to_csv_field(), "44992965");
        assert_eq!(FieldValue::Decimal(12.5).to_csv_field(), "12.5");
        assert_eq!(FieldValue::Null.to_csv_field(), "");
        assert_eq!(FieldValue::text("Gesamt").to_csv_field(), "Gesamt");
    }

    #[test]
    fn integral_decimal_detection() {
        assert!(FieldValue::Decimal(5.0).is_integral_decimal());
        assert!(!FieldValue::Decimal(44992965.36).is_integral_decimal());
        assert!(!FieldValue::Integer(5).is_integral_decimal());
        assert!(!FieldValue::Null.is_integral_decimal());
    }

    #[test]
    fn json_serialization_of_values() {
        assert_eq!(
            serde_json::to_string(&FieldValue::Integer(7)).unwrap(),
            "7"
        );
        assert_eq!(
            serde_json::to_string(&FieldValue::Decimal(12.5)).unwrap(),
            "12.5"
        );
        assert_eq!(serde_json::to_string(&FieldValue::Null).unwrap(), "null");
    }

    #[test]
    fn absent_record_fields_read_as_null() {
        let record = Record::new(DocumentType::RegionTotals);
        assert!(record.get("Refunds").is_null());
    }

    #[test]
    fn field_order_is_stable_per_type() {
        let order = DocumentType::MonthlyApplications.field_order();
        assert_eq!(order.first(), Some(&FIELD_REGION));
        assert_eq!(order.last(), Some(&FIELD_TOTAL));
    }
}
