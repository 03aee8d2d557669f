//! Tests for the table parsing engine.

pub mod availability_tests;
pub mod monthly_tests;
pub mod therapy_tests;

use crate::app::models::{Page, RawTable};

/// Build a table from single-cell rows
pub fn table_of(rows: &[&str]) -> RawTable {
    RawTable::new(rows.iter().map(|row| vec![row.to_string()]).collect())
}

/// Build a one-table page from single-cell rows
pub fn page_of(rows: &[&str]) -> Page {
    Page::new(vec![table_of(rows)])
}
