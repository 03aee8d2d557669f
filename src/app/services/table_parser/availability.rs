//! Per-region channel availability windows.
//!
//! Some metrics only exist from a specific month onwards in each region
//! (the legacy online channel went live region by region). Before the
//! window opens the value is an explicit null, never zero. The windows are
//! data passed in from the attachment registry, not inferred.

use crate::constants::month_number;

/// A month key with total ordering: (year, month)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PeriodKey {
    pub year: i32,
    pub month: u32,
}

impl PeriodKey {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }
}

/// Parse a period token like "Jän.23" into a month key.
///
/// Average labels ("Durchschnitt 23") and year tokens ("2023") do not
/// parse; callers treat those separately.
pub fn parse_period(token: &str) -> Option<PeriodKey> {
    let (name, year) = token.trim().split_once('.')?;
    let month = month_number(name)?;
    let year: i32 = year.parse().ok()?;
    Some(PeriodKey::new(2000 + year, month))
}

/// First available period per region for one metric
#[derive(Debug, Clone)]
pub struct ChannelAvailability {
    windows: Vec<(&'static str, PeriodKey)>,
}

impl ChannelAvailability {
    pub fn new(windows: Vec<(&'static str, PeriodKey)>) -> Self {
        Self { windows }
    }

    /// No region ever has the metric
    pub fn never() -> Self {
        Self { windows: vec![] }
    }

    fn first_available(&self, region: &str) -> Option<PeriodKey> {
        self.windows
            .iter()
            .find(|(r, _)| *r == region.trim())
            .map(|(_, first)| *first)
    }

    /// Whether the metric exists for `region` in `period`.
    ///
    /// Periods that do not parse as a month are the trailing average rows,
    /// which summarize only the available months - they count as available
    /// whenever the region has a window at all.
    pub fn available(&self, region: &str, period: &str) -> bool {
        match self.first_available(region) {
            None => false,
            Some(first) => match parse_period(period) {
                Some(key) => key >= first,
                None => true,
            },
        }
    }
}
