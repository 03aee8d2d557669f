//! Table parsing engine.
//!
//! Turns raw extracted pages into typed records. The entry point
//! dispatches on the attachment's registered tuning; the sub-modules hold
//! the shared machinery (tokenization, locale numerics, carry-over state,
//! availability windows, row overrides) and one strategy per table shape.

pub mod availability;
pub mod numeric;
pub mod overrides;
pub mod state;
pub mod strategies;
pub mod tokens;

#[cfg(test)]
mod tests;

use crate::app::models::{DocumentType, Page, Record};
use crate::app::services::attachment_registry::{AttachmentSpec, ParserTuning};
use crate::error::{Error, Result};

/// Parse all pages of one attachment into records, using the strategy
/// registered for it. Fatal parse errors abort this document only.
pub fn parse_document(spec: &AttachmentSpec, pages: &[Page]) -> Result<Vec<Record>> {
    if pages.is_empty() {
        return Err(Error::EmptyTable {
            source_id: spec.id.to_string(),
            page: 0,
            table: 0,
        });
    }
    match &spec.tuning {
        ParserTuning::RegionTotals => strategies::region_totals::parse(spec.id, pages),
        ParserTuning::ProfessionTotals => strategies::profession_totals::parse(spec.id, pages),
        ParserTuning::Monthly(tuning) => {
            debug_assert!(matches!(
                spec.doc_type,
                DocumentType::MonthlyApplications | DocumentType::ProfessionMonthly
            ));
            strategies::monthly_applications::parse(spec.id, spec.doc_type, pages, tuning)
        }
        ParserTuning::ProcessingTime(tuning) => {
            strategies::processing_time::parse(spec.id, pages, tuning)
        }
        ParserTuning::ProcessingTimeCompact(tuning) => {
            strategies::processing_time::parse_compact(spec.id, pages, tuning)
        }
        ParserTuning::Therapy(tuning) => {
            strategies::therapy_amounts::parse(spec.id, pages, tuning)
        }
    }
}
