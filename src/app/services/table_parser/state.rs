//! Carry-over state for row parsing.
//!
//! Many source rows omit their leading region/period columns and rely on
//! the reader inheriting them from the row above. The tracker makes that
//! carried state explicit: one instance lives for the duration of one
//! table and is reset between tables, never between rows. Rows must be
//! observed strictly in source order.

/// Mutable parsing state threaded through one table's rows
#[derive(Debug, Default, Clone)]
pub struct RowStateTracker {
    current_label: Option<String>,
    current_period: Option<String>,
}

impl RowStateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Observe a row's leading tokens.
    ///
    /// Non-blank tokens replace the carried values; blank/absent tokens
    /// leave them unchanged. Returns the effective (label, period) pair for
    /// the row, or `None` while the table has not yet produced both.
    pub fn observe(
        &mut self,
        label: Option<&str>,
        period: Option<&str>,
    ) -> Option<(String, String)> {
        if let Some(label) = label {
            let trimmed = label.trim();
            if !trimmed.is_empty() {
                self.current_label = Some(trimmed.to_string());
            }
        }
        if let Some(period) = period {
            let trimmed = period.trim();
            if !trimmed.is_empty() {
                self.current_period = Some(trimmed.to_string());
            }
        }
        self.current()
    }

    /// Effective state without observing anything; used by totals rows
    /// that inherit both columns from the preceding data row
    pub fn current(&self) -> Option<(String, String)> {
        match (&self.current_label, &self.current_period) {
            (Some(label), Some(period)) => Some((label.clone(), period.clone())),
            _ => None,
        }
    }

    /// Replace the carried period; used where a totals row rewrites the
    /// period to an average label derived from the previous one
    pub fn set_period(&mut self, period: impl Into<String>) {
        self.current_period = Some(period.into());
    }
}
