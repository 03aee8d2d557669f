//! Explicit row-slicing overrides.
//!
//! A handful of rows in known documents defeat the automatic trailing-token
//! disambiguation (the extractor split their final number). Those rows are
//! listed here explicitly, keyed by region, sub-table index and row index.
//! New rows that fail the heuristics are a fatal parse error, never a
//! silent guess - the override table is maintained by hand against the
//! known source documents.

/// Alternate token-slicing rule for one known-bad row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceRule {
    /// The final amount was split in two: take the 3rd-from-last token as
    /// the first amount and concatenate the last two for the second
    MergedTrailingPair,
}

/// One override entry. `sub_table` of `None` applies to every sub-table
/// of the region.
#[derive(Debug, Clone)]
pub struct OverrideEntry {
    pub region: &'static str,
    pub sub_table: Option<usize>,
    pub row_index: usize,
    pub rule: SliceRule,
}

/// Lookup table of known-bad rows for one attachment
#[derive(Debug, Clone, Default)]
pub struct RowOverrides {
    entries: Vec<OverrideEntry>,
}

impl RowOverrides {
    pub fn new(entries: Vec<OverrideEntry>) -> Self {
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rule for a row, if one is registered
    pub fn rule(&self, region: &str, sub_table: usize, row_index: usize) -> Option<SliceRule> {
        self.entries
            .iter()
            .find(|e| {
                e.region == region.trim()
                    && e.row_index == row_index
                    && e.sub_table.map_or(true, |t| t == sub_table)
            })
            .map(|e| e.rule)
    }
}
