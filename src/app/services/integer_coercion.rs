//! Integer coercion for count-typed columns.
//!
//! Strategies always parse numbers as `Decimal` so no precision decision
//! happens mid-parse. Columns declared integral by the document type are
//! coerced here, per value: every decimal with a zero fractional part
//! becomes an `Integer`, values with a real fractional part stay
//! `Decimal` and make the column mixed, which is a warning, not an error.
//!
//! Coercion runs once, upstream of both serializers, so the flat and the
//! nested output can never disagree about a value's type.

use crate::app::models::{Document, FieldValue, WarningLog};

pub fn coerce(document: &mut Document, warnings: &mut WarningLog) {
    for field in document.doc_type.integer_fields() {
        coerce_column(document, field, warnings);
    }
}

fn coerce_column(document: &mut Document, field: &'static str, warnings: &mut WarningLog) {
    let mut coerced = 0usize;
    let mut fractional: Vec<String> = Vec::new();

    for (index, record) in document.records.iter_mut().enumerate() {
        let Some(value) = record.get_mut(field) else {
            continue;
        };
        match value {
            FieldValue::Decimal(v) if v.fract() == 0.0 && v.is_finite() => {
                *value = FieldValue::Integer(*v as i64);
                coerced += 1;
            }
            FieldValue::Decimal(v) => {
                fractional.push(format!("row {}: {}", index, v));
            }
            _ => {}
        }
    }

    if coerced > 0 && !fractional.is_empty() {
        warnings.push(format!(
            "{}: column '{}' mixes integral and fractional values; kept as decimal: {}",
            document.source_id,
            field,
            fractional.join(", ")
        ));
    }
}
