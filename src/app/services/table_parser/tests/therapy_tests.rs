//! Tests for the therapy-profession reimbursement strategy.

use crate::app::models::{FieldValue, Page, RawTable};
use crate::app::services::attachment_registry::{lookup, ParserTuning, TherapyTuning};
use crate::app::services::table_parser::overrides::{OverrideEntry, RowOverrides, SliceRule};
use crate::app::services::table_parser::strategies::therapy_amounts;
use crate::constants::{
    FIELD_INVOICE_AMOUNTS, FIELD_PERIOD, FIELD_PROFESSION_CODE, FIELD_PROFESSION_LABEL,
    FIELD_REFUNDS, FIELD_REGION,
};
use crate::error::Error;

fn compressed_table(stacked: &str, penultimate: &str, total: &str) -> RawTable {
    RawTable::new(vec![
        vec!["hdr".to_string()],
        vec![stacked.to_string()],
        vec![penultimate.to_string()],
        vec![total.to_string()],
    ])
}

#[test]
fn compressed_tables_are_unpacked_into_logical_rows() {
    let table = compressed_table(
        "ÖGK-K Jän.21 1 Physiotherapie 100,50 200,75\nÖGK-K Feb.21 2 Ergotherapie 10 20",
        "ÖGK-K Mär.21 3 Logopädie 1 2\nwrapped leftover",
        "Gesamt 111,50 222,75",
    );
    let pages = vec![Page::new(vec![table])];
    let records =
        therapy_amounts::parse("Beilage_8", &pages, &TherapyTuning::default()).unwrap();

    assert_eq!(records.len(), 4);
    assert_eq!(*records[0].get(FIELD_REGION), FieldValue::text("ÖGK-K"));
    assert_eq!(*records[0].get(FIELD_PROFESSION_CODE), FieldValue::Integer(1));
    assert_eq!(
        *records[0].get(FIELD_PROFESSION_LABEL),
        FieldValue::text("Physiotherapie")
    );
    assert_eq!(*records[0].get(FIELD_REFUNDS), FieldValue::Decimal(100.50));
    assert_eq!(
        *records[0].get(FIELD_INVOICE_AMOUNTS),
        FieldValue::Decimal(200.75)
    );

    // only the first sub-line of a wrapped physical row carries data
    assert_eq!(*records[2].get(FIELD_PROFESSION_CODE), FieldValue::Integer(3));

    let total = &records[3];
    assert!(total.get(FIELD_PROFESSION_CODE).is_null());
    assert_eq!(*total.get(FIELD_REGION), FieldValue::text("ÖGK-K"));
    assert_eq!(
        *total.get(FIELD_PERIOD),
        FieldValue::text("Durchschnitt 21")
    );
    assert_eq!(*total.get(FIELD_REFUNDS), FieldValue::Decimal(111.50));
}

#[test]
fn listed_rows_use_the_merged_pair_slicing() {
    let tuning = TherapyTuning {
        overrides: RowOverrides::new(vec![OverrideEntry {
            region: "ÖGK-K",
            sub_table: None,
            row_index: 0,
            rule: SliceRule::MergedTrailingPair,
        }]),
        merged_total_pair: true,
    };
    let table = compressed_table(
        "ÖGK-K Jän.21 1 Physiotherapie 100,50 5.123.4 56,78",
        "ÖGK-K Feb.21 2 Ergotherapie 10 20",
        "Gesamt 99 1.0 00,50",
    );
    let pages = vec![Page::new(vec![table])];
    let records = therapy_amounts::parse("Beilage_9", &pages, &tuning).unwrap();

    // overridden row: refunds from the 3rd-from-last token, invoice from
    // the rejoined trailing pair
    assert_eq!(*records[0].get(FIELD_REFUNDS), FieldValue::Decimal(100.50));
    assert_eq!(
        *records[0].get(FIELD_INVOICE_AMOUNTS),
        FieldValue::Decimal(5123456.78)
    );

    // unlisted row keeps the plain slicing
    assert_eq!(*records[1].get(FIELD_REFUNDS), FieldValue::Decimal(10.0));

    // the totals row of this document also carries a split invoice amount
    let total = &records[2];
    assert_eq!(*total.get(FIELD_REFUNDS), FieldValue::Decimal(99.0));
    assert_eq!(
        *total.get(FIELD_INVOICE_AMOUNTS),
        FieldValue::Decimal(1000.50)
    );
}

#[test]
fn the_registered_overrides_match_only_their_sub_table() {
    let tuning = match lookup("Beilage_9").unwrap().tuning {
        ParserTuning::Therapy(tuning) => tuning,
        other => panic!("unexpected tuning: {:?}", other),
    };
    // ÖGK-O row 1 is listed for sub-table 0 only
    assert_eq!(
        tuning.overrides.rule("ÖGK-O", 0, 1),
        Some(SliceRule::MergedTrailingPair)
    );
    assert_eq!(tuning.overrides.rule("ÖGK-O", 2, 1), None);
    // ÖGK-K rows 0 and 2 apply to every sub-table
    assert!(tuning.overrides.rule("ÖGK-K", 5, 0).is_some());
    assert!(tuning.overrides.rule("ÖGK-K", 5, 1).is_none());
}

#[test]
fn too_few_physical_rows_is_a_fatal_shape_error() {
    let table = RawTable::new(vec![
        vec!["hdr".to_string()],
        vec!["ÖGK-K Jän.21 1 Physiotherapie 1 2".to_string()],
    ]);
    let pages = vec![Page::new(vec![table])];
    let result = therapy_amounts::parse("Beilage_8", &pages, &TherapyTuning::default());
    match result {
        Err(Error::MissingSubTables {
            expected, found, ..
        }) => {
            assert_eq!(expected, 4);
            assert_eq!(found, 2);
        }
        other => panic!("expected MissingSubTables, got {:?}", other.map(|r| r.len())),
    }
}

#[test]
fn stable_sorting_puts_the_totals_row_last_per_table() {
    let table = compressed_table(
        "ÖGK-K Jän.21 9 Physiotherapie 1 2\nÖGK-K Feb.21 2 Ergotherapie 3 4",
        "ÖGK-K Mär.21 5 Logopädie 5 6",
        "Gesamt 9 12",
    );
    let pages = vec![Page::new(vec![table])];
    let records =
        therapy_amounts::parse("Beilage_8", &pages, &TherapyTuning::default()).unwrap();
    let codes: Vec<_> = records
        .iter()
        .map(|r| r.get(FIELD_PROFESSION_CODE).as_f64())
        .collect();
    assert_eq!(codes, vec![Some(2.0), Some(5.0), Some(9.0), None]);
}
