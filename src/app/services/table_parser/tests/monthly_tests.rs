//! Tests for the monthly application-count strategy.

use crate::app::models::{DocumentType, FieldValue, Page, RawTable};
use crate::app::services::attachment_registry::{lookup, MonthlyTuning, TableSplitRule};
use crate::app::services::table_parser::{parse_document, strategies::monthly_applications};
use crate::constants::{
    FIELD_ONLINE, FIELD_PERIOD, FIELD_POSTAL, FIELD_PROFESSION_CODE, FIELD_PROFESSION_LABEL,
    FIELD_REGION, FIELD_TOTAL,
};
use crate::error::Error;

use super::page_of;

const HEADERS: [&str; 5] = ["h1", "h2", "h3", "h4", "h5"];

fn full_page(data_rows: &[&str]) -> Vec<Page> {
    let mut rows: Vec<&str> = HEADERS.to_vec();
    rows.extend_from_slice(data_rows);
    vec![page_of(&rows)]
}

#[test]
fn a_small_table_parses_into_typed_records() {
    let pages = full_page(&[
        "W Jän.23 1 FA für X - 5 2 7",
        "W Jän.23 2 FA für Y 3 - 1 4",
        "Gesamt - 3 3 11",
    ]);
    let records = monthly_applications::parse(
        "Beilage_3",
        DocumentType::MonthlyApplications,
        &pages,
        &MonthlyTuning::default(),
    )
    .unwrap();

    assert_eq!(records.len(), 3);

    // plain trailing layout: three numeric tokens
    let first = &records[0];
    assert_eq!(*first.get(FIELD_REGION), FieldValue::text("W"));
    assert_eq!(*first.get(FIELD_PERIOD), FieldValue::text("Jän.23"));
    assert_eq!(*first.get(FIELD_PROFESSION_CODE), FieldValue::Integer(1));
    assert_eq!(*first.get(FIELD_POSTAL), FieldValue::Decimal(5.0));
    assert_eq!(*first.get(FIELD_ONLINE), FieldValue::Decimal(2.0));
    assert_eq!(*first.get(FIELD_TOTAL), FieldValue::Decimal(7.0));

    // split trailing layout: the online count is spread over two tokens,
    // here with the sentinel in the first half
    let second = &records[1];
    assert_eq!(*second.get(FIELD_POSTAL), FieldValue::Decimal(3.0));
    assert_eq!(*second.get(FIELD_ONLINE), FieldValue::Null);
    assert_eq!(*second.get(FIELD_TOTAL), FieldValue::Decimal(4.0));

    // totals row: inherited region and period, no code, sorted last
    let total = &records[2];
    assert_eq!(*total.get(FIELD_REGION), FieldValue::text("W"));
    assert_eq!(*total.get(FIELD_PERIOD), FieldValue::text("Jän.23"));
    assert!(total.get(FIELD_PROFESSION_CODE).is_null());
    assert_eq!(
        *total.get(FIELD_PROFESSION_LABEL),
        FieldValue::text("Gesamt")
    );
    assert_eq!(*total.get(FIELD_TOTAL), FieldValue::Decimal(11.0));
}

#[test]
fn split_online_numbers_are_rejoined() {
    let pages = full_page(&[
        "W Jän.23 1FA für X 3 1.2 34 1.237",
        "Gesamt 3 1.234 1.237",
    ]);
    let records = monthly_applications::parse(
        "Beilage_3",
        DocumentType::MonthlyApplications,
        &pages,
        &MonthlyTuning::default(),
    )
    .unwrap();

    assert_eq!(*records[0].get(FIELD_ONLINE), FieldValue::Decimal(1234.0));
    assert_eq!(
        *records[0].get(FIELD_PROFESSION_LABEL),
        FieldValue::text("FA für X")
    );
}

#[test]
fn records_sort_by_code_within_a_table() {
    let pages = full_page(&[
        "W Jän.23 27FA für Z 1 1 2",
        "W Jän.23 2FA für A 1 1 2",
        "Gesamt 2 2 4",
    ]);
    let records = monthly_applications::parse(
        "Beilage_3",
        DocumentType::MonthlyApplications,
        &pages,
        &MonthlyTuning::default(),
    )
    .unwrap();
    let codes: Vec<_> = records
        .iter()
        .map(|r| r.get(FIELD_PROFESSION_CODE).as_f64())
        .collect();
    assert_eq!(codes, vec![Some(2.0), Some(27.0), None]);
}

#[test]
fn an_unparseable_row_fails_the_document_with_its_index() {
    let pages = full_page(&[
        "W Jän.23 1FA für X 1 1 2",
        "W Jän.23 2FA für Y 1 1 2",
        "garbage",
        "Gesamt 2 2 4",
    ]);
    let result = monthly_applications::parse(
        "Beilage_3",
        DocumentType::MonthlyApplications,
        &pages,
        &MonthlyTuning::default(),
    );
    match result {
        Err(Error::UnparseableRow {
            source_id,
            row_index,
            raw,
        }) => {
            assert_eq!(source_id, "Beilage_3");
            assert_eq!(row_index, 2);
            assert_eq!(raw, "garbage");
        }
        other => panic!("expected UnparseableRow, got {:?}", other.map(|r| r.len())),
    }
}

#[test]
fn sub_table_mode_reads_every_table_with_one_header_row() {
    let table = |period: &str| {
        super::table_of(&[
            "hdr",
            &format!("W {} 1FA für X 1 2 3", period),
            "Gesamt 1 2 3",
        ])
    };
    let pages = vec![Page::new(vec![table("Jän.21"), table("Feb.21")])];
    let tuning = MonthlyTuning {
        sub_table_mode: true,
        table_splits: vec![],
    };
    let records = monthly_applications::parse(
        "Beilage_11",
        DocumentType::ProfessionMonthly,
        &pages,
        &tuning,
    )
    .unwrap();
    assert_eq!(records.len(), 4);
    assert_eq!(*records[2].get(FIELD_PERIOD), FieldValue::text("Feb.21"));
}

#[test]
fn a_merged_sub_table_is_split_at_the_boundary_row() {
    let merged = RawTable::new(vec![
        vec!["hdr".to_string()],
        vec!["W Feb.21 1FA für X 1 2 3".to_string()],
        vec!["W Feb.21 2FB für Y 1 2 3".to_string()],
        vec!["W Feb.21 3FC für Z 1 2 3".to_string()],
        // totals line of the first sub-table, stacked with the header
        // line of the second
        vec!["Gesamt 3 6 9\nhdr2".to_string()],
        vec!["W Mär.21 1FA für X 4 5 9".to_string()],
        vec!["Gesamt 4 5 9".to_string()],
    ]);
    let plain = super::table_of(&["hdr", "W Jän.21 1FA für X 1 2 3", "Gesamt 1 2 3"]);
    let pages = vec![Page::new(vec![plain.clone(), plain, merged])];

    let tuning = MonthlyTuning {
        sub_table_mode: true,
        table_splits: vec![TableSplitRule {
            pages: &[0],
            table_index: 2,
            split_at_row: 4,
        }],
    };
    let records = monthly_applications::parse(
        "Beilage_10",
        DocumentType::ProfessionMonthly,
        &pages,
        &tuning,
    )
    .unwrap();

    // 2 + 2 from the plain tables, 4 from the first half of the split,
    // 2 from the second half
    assert_eq!(records.len(), 10);
    let feb_total = records
        .iter()
        .find(|r| {
            *r.get(FIELD_PERIOD) == FieldValue::text("Feb.21")
                && r.get(FIELD_PROFESSION_CODE).is_null()
        })
        .expect("totals row of the first split half");
    assert_eq!(*feb_total.get(FIELD_TOTAL), FieldValue::Decimal(9.0));
    assert!(records
        .iter()
        .any(|r| *r.get(FIELD_PERIOD) == FieldValue::text("Mär.21")));
}

#[test]
fn a_dump_without_pages_is_fatal() {
    let spec = lookup("Beilage_3").unwrap();
    assert!(matches!(
        parse_document(&spec, &[]),
        Err(Error::EmptyTable { .. })
    ));
}

#[test]
fn an_empty_table_is_fatal() {
    let pages = vec![page_of(&HEADERS)];
    let result = monthly_applications::parse(
        "Beilage_3",
        DocumentType::MonthlyApplications,
        &pages,
        &MonthlyTuning::default(),
    );
    assert!(matches!(result, Err(Error::EmptyTable { .. })));
}
