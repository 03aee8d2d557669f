//! Attachment registry: document identity, metadata and parser tuning.
//!
//! Every attachment id resolves here to its document type, the metadata
//! block attached to its outputs, and the per-attachment tuning data the
//! strategies need (availability windows, known-bad-row overrides,
//! sub-table split rules). Parsing code receives all of this as explicit
//! configuration - nothing in the engine inspects filenames.

use std::collections::BTreeMap;

use crate::app::models::{DocumentType, Metadata};
use crate::app::services::table_parser::availability::{ChannelAvailability, PeriodKey};
use crate::app::services::table_parser::overrides::{OverrideEntry, RowOverrides, SliceRule};
use crate::constants::{
    FIELD_INVOICE_AMOUNTS, FIELD_ONLINE, FIELD_ONLINE_APP, FIELD_ONLINE_LEGACY, FIELD_POSTAL,
    FIELD_REFUNDS, FIELD_TOTAL,
};
use crate::error::{Error, Result};

// =============================================================================
// Parser tuning
// =============================================================================

/// Rule splitting one extracted table into two logical sub-tables.
///
/// On the listed pages the extractor merges the end of one sub-table with
/// the start of the next; the row at `split_at_row` is truncated to its
/// first line and becomes the boundary (last row of the first sub-table and
/// discarded header of the second).
#[derive(Debug, Clone)]
pub struct TableSplitRule {
    pub pages: &'static [usize],
    pub table_index: usize,
    pub split_at_row: usize,
}

/// Tuning for the monthly-count strategies
#[derive(Debug, Clone, Default)]
pub struct MonthlyTuning {
    /// Tables arrive as per-page sub-tables with one header row each
    pub sub_table_mode: bool,
    /// Sub-table split surgery for known merged pages
    pub table_splits: Vec<TableSplitRule>,
}

/// Tuning for the processing-time strategy
#[derive(Debug, Clone)]
pub struct ProcessingTimeTuning {
    /// Availability of the legacy online channel per region
    pub legacy_channel: ChannelAvailability,
    /// When set, every channel is unavailable before this period
    pub all_channels_from: Option<PeriodKey>,
}

/// Tuning for the compact processing-time layout
#[derive(Debug, Clone)]
pub struct CompactTuning {
    /// Header rows per sub-table index; the last entry repeats
    pub header_rows: &'static [usize],
    /// Distance of the totals row from the table end, per sub-table index;
    /// the last entry repeats (some tables carry a hidden trailing row)
    pub last_row_offsets: &'static [usize],
    /// (page index, table index) pairs holding no data at all
    pub skip_tables: &'static [(usize, usize)],
}

impl CompactTuning {
    fn per_table(values: &'static [usize], table_index: usize) -> usize {
        let idx = table_index.min(values.len().saturating_sub(1));
        values[idx]
    }

    pub fn header_rows_for(&self, table_index: usize) -> usize {
        Self::per_table(self.header_rows, table_index)
    }

    pub fn last_row_offset_for(&self, table_index: usize) -> usize {
        Self::per_table(self.last_row_offsets, table_index)
    }

    pub fn is_skipped(&self, page_index: usize, table_index: usize) -> bool {
        self.skip_tables.contains(&(page_index, table_index))
    }
}

/// Tuning for the therapy-amounts strategy
#[derive(Debug, Clone, Default)]
pub struct TherapyTuning {
    /// Known-bad rows where the invoice amount was split in two tokens
    pub overrides: RowOverrides,
    /// The totals row's invoice amount is split across two tokens
    pub merged_total_pair: bool,
}

/// Per-attachment strategy configuration, dispatched on by the engine
#[derive(Debug, Clone)]
pub enum ParserTuning {
    RegionTotals,
    ProfessionTotals,
    Monthly(MonthlyTuning),
    ProcessingTime(ProcessingTimeTuning),
    ProcessingTimeCompact(CompactTuning),
    Therapy(TherapyTuning),
}

/// Everything the pipeline needs to know about one attachment
#[derive(Debug, Clone)]
pub struct AttachmentSpec {
    pub id: &'static str,
    pub doc_type: DocumentType,
    pub metadata: Metadata,
    pub tuning: ParserTuning,
}

// =============================================================================
// Registry data
// =============================================================================

/// All attachment ids the registry can resolve
pub const KNOWN_ATTACHMENTS: [&str; 17] = [
    "Beilage_1",
    "Beilage_2",
    "Beilage_3",
    "Beilage_4",
    "Beilage_5",
    "Beilage_5a",
    "Beilage_6",
    "Beilage_6a",
    "Beilage_7",
    "Beilage_7a",
    "Beilage_8",
    "Beilage_9",
    "Beilage_10",
    "Beilage_11",
    "Beilage_12",
    // aliases used by later answer rounds with identical table shapes
    "Beilage_5b",
    "Beilage_6b",
];

fn string_map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn metadata(
    question: &str,
    year: &str,
    units: &[(&str, &str)],
    description: &[(&str, &str)],
) -> Metadata {
    Metadata {
        question: question.to_string(),
        units: string_map(units),
        year: year.to_string(),
        description: string_map(description),
    }
}

fn eur_units() -> Vec<(&'static str, &'static str)> {
    vec![(FIELD_REFUNDS, "EUR"), (FIELD_INVOICE_AMOUNTS, "EUR")]
}

fn count_units() -> Vec<(&'static str, &'static str)> {
    vec![
        (FIELD_POSTAL, "Anzahl"),
        (FIELD_ONLINE, "Anzahl"),
        (FIELD_TOTAL, "Anzahl"),
    ]
}

fn application_descriptions() -> Vec<(&'static str, &'static str)> {
    vec![
        (FIELD_POSTAL, "postalische Anträge nach Monat und Fachrichtung"),
        (FIELD_ONLINE, "online Anträge nach Monat und Fachrichtung"),
    ]
}

/// Legacy online channel launch months per region. Vorarlberg never
/// received the channel and is deliberately absent.
fn legacy_channel_windows() -> ChannelAvailability {
    let may_23 = PeriodKey::new(2023, 5);
    ChannelAvailability::new(vec![
        ("ÖGK-B", may_23),
        ("ÖGK-K", may_23),
        ("ÖGK-N", may_23),
        ("ÖGK-O", may_23),
        ("ÖGK-S", may_23),
        ("ÖGK-ST", may_23),
        ("ÖGK-T", may_23),
        ("ÖGK-W", PeriodKey::new(2023, 7)),
    ])
}

/// Known-bad rows of the per-region therapy tables: the extractor split
/// the invoice amount of these rows into two tokens.
fn therapy_row_overrides() -> RowOverrides {
    let entry = |region, sub_table, row_index| OverrideEntry {
        region,
        sub_table,
        row_index,
        rule: SliceRule::MergedTrailingPair,
    };
    RowOverrides::new(vec![
        entry("ÖGK-K", None, 0),
        entry("ÖGK-K", None, 2),
        entry("ÖGK-O", Some(0), 1),
        entry("ÖGK-S", Some(0), 2),
        entry("ÖGK-S", Some(1), 2),
        entry("ÖGK-S", Some(2), 1),
        entry("ÖGK-S", Some(2), 2),
        entry("ÖGK-ST", Some(0), 0),
        entry("ÖGK-ST", Some(0), 1),
        entry("ÖGK-ST", Some(1), 0),
        entry("ÖGK-ST", Some(1), 1),
        entry("ÖGK-ST", Some(2), 0),
        entry("ÖGK-ST", Some(2), 1),
        entry("ÖGK-ST", Some(2), 2),
        entry("ÖGK-T", None, 1),
    ])
}

/// Pages of the multi-page application tables where two logical sub-tables
/// were extracted as one; the merged table sits at index 2 and splits at
/// row 4.
const PROFESSION_MONTHLY_SPLIT_PAGES: [usize; 10] = [1, 9, 17, 25, 33, 41, 49, 57, 65, 73];

// =============================================================================
// Lookup
// =============================================================================

/// Resolve an attachment id to its processing spec
pub fn lookup(id: &str) -> Result<AttachmentSpec> {
    let spec = match id {
        "Beilage_1" => AttachmentSpec {
            id: "Beilage_1",
            doc_type: DocumentType::RegionTotals,
            metadata: metadata(
                "Wie hoch waren die Wahlarztkostenrefundierungen und die \
                 Wahlarztkostenrechnungsbeträge im Jahr 2023, aufgeschlüsselt \
                 nach Landesstellen?",
                "2023",
                &eur_units(),
                &[
                    (FIELD_REFUNDS, "Wahlarztkostenrefundierungen nach Landesstelle"),
                    (FIELD_INVOICE_AMOUNTS, "Wahlarztkostenrechnungsbeträge nach Landesstelle"),
                ],
            ),
            tuning: ParserTuning::RegionTotals,
        },
        "Beilage_2" => AttachmentSpec {
            id: "Beilage_2",
            doc_type: DocumentType::ProfessionTotals,
            metadata: metadata(
                "Wie verteilen sich die Wahlarztkostenrefundierungen und \
                 -rechnungsbeträge auf die einzelnen Fachrichtungen?",
                "2023",
                &eur_units(),
                &[
                    (FIELD_REFUNDS, "Wahlarztkostenrefundierungen nach Fachrichtung"),
                    (FIELD_INVOICE_AMOUNTS, "Wahlarztkostenrechnungsbeträge nach Fachrichtung"),
                ],
            ),
            tuning: ParserTuning::ProfessionTotals,
        },
        "Beilage_3" | "Beilage_4" | "Beilage_5" | "Beilage_5a" | "Beilage_5b" | "Beilage_6"
        | "Beilage_6a" | "Beilage_6b" => {
            let (question, year) = match id {
                "Beilage_3" => (
                    "Wie viele Anträge auf Wahlarztkostenrefundierung wurden pro \
                     Monat und Fachrichtung eingebracht (postalisch und online, \
                     bundesweit)?",
                    "2023",
                ),
                "Beilage_4" => (
                    "Wie viele Anträge auf Wahlarztkostenrefundierung wurden pro \
                     Monat und Fachrichtung eingebracht (postalisch und online, \
                     pro Bundesland)?",
                    "2023",
                ),
                "Beilage_5" | "Beilage_6" => (
                    "Wie viele Anträge auf Wahlarztkostenrefundierung wurden pro \
                     Monat und Fachrichtung abgearbeitet (postalisch und online)?",
                    "2023",
                ),
                _ => (
                    "Wie viele Anträge auf Wahlarztkostenrefundierung wurden von \
                     2021 bis Mai 2023 pro Monat und Fachrichtung abgearbeitet?",
                    "2021-2023Q2",
                ),
            };
            AttachmentSpec {
                id: KNOWN_ATTACHMENTS
                    .iter()
                    .find(|known| **known == id)
                    .copied()
                    .unwrap_or("Beilage_3"),
                doc_type: DocumentType::MonthlyApplications,
                metadata: metadata(question, year, &count_units(), &application_descriptions()),
                tuning: ParserTuning::Monthly(MonthlyTuning::default()),
            }
        }
        "Beilage_7" | "Beilage_12" => AttachmentSpec {
            id: if id == "Beilage_7" { "Beilage_7" } else { "Beilage_12" },
            doc_type: DocumentType::ProcessingTime,
            metadata: metadata(
                if id == "Beilage_7" {
                    "Mit welcher durchschnittlichen Bearbeitungszeit wurden Anträge \
                     auf Wahlarztkostenrefundierung pro Monat bearbeitet \
                     (postalisch und online, pro Landesstelle)?"
                } else {
                    "Mit welcher durchschnittlichen Bearbeitungszeit wurden Anträge \
                     für MTD-Berufe pro Monat bearbeitet (postalisch und online, \
                     pro Landesstelle)?"
                },
                "2023",
                &[
                    (FIELD_POSTAL, "Kalendertage"),
                    (FIELD_ONLINE_APP, "Kalendertage"),
                    (FIELD_ONLINE_LEGACY, "Kalendertage"),
                ],
                &[
                    (FIELD_POSTAL, "postalische Anträge nach Monat"),
                    (FIELD_ONLINE_APP, "online Anträge nach Monat"),
                    (FIELD_ONLINE_LEGACY, "online Anträge (Altverfahren) nach Monat"),
                ],
            ),
            tuning: ParserTuning::ProcessingTime(ProcessingTimeTuning {
                legacy_channel: legacy_channel_windows(),
                all_channels_from: if id == "Beilage_12" {
                    Some(PeriodKey::new(2023, 5))
                } else {
                    None
                },
            }),
        },
        "Beilage_7a" => AttachmentSpec {
            id: "Beilage_7a",
            doc_type: DocumentType::ProcessingTimeCompact,
            metadata: metadata(
                "Mit welcher durchschnittlichen Bearbeitungszeit wurden Anträge \
                 auf Wahlarztkostenrefundierung von 2021 bis Mai 2023 pro Monat \
                 bearbeitet (postalisch und online, pro Landesstelle)?",
                "2021-2023Q2",
                &[
                    (FIELD_POSTAL, "Kalendertage"),
                    (FIELD_ONLINE_APP, "Kalendertage"),
                ],
                &[
                    (FIELD_POSTAL, "postalische Anträge nach Monat"),
                    (FIELD_ONLINE_APP, "online Anträge nach Monat"),
                ],
            ),
            tuning: ParserTuning::ProcessingTimeCompact(CompactTuning {
                header_rows: &[2, 1],
                last_row_offsets: &[2, 1],
                skip_tables: &[(0, 3)],
            }),
        },
        "Beilage_8" | "Beilage_9" => AttachmentSpec {
            id: if id == "Beilage_8" { "Beilage_8" } else { "Beilage_9" },
            doc_type: DocumentType::TherapyAmounts,
            metadata: metadata(
                if id == "Beilage_8" {
                    "Wie hoch waren die Refundierungen und Rechnungsbeträge für \
                     MTD-Berufe 2021 bis 2023, bundesweit nach Fachrichtung?"
                } else {
                    "Wie hoch waren die Refundierungen und Rechnungsbeträge für \
                     MTD-Berufe 2021 bis 2023, pro Bundesland und Fachrichtung?"
                },
                "2021-2023",
                &eur_units(),
                &[
                    (FIELD_REFUNDS, "Refundierungen für MTD-Berufe nach Fachrichtung"),
                    (FIELD_INVOICE_AMOUNTS, "Rechnungsbeträge für MTD-Berufe nach Fachrichtung"),
                ],
            ),
            tuning: ParserTuning::Therapy(TherapyTuning {
                overrides: if id == "Beilage_9" {
                    therapy_row_overrides()
                } else {
                    RowOverrides::default()
                },
                merged_total_pair: id == "Beilage_9",
            }),
        },
        "Beilage_10" | "Beilage_11" => AttachmentSpec {
            id: if id == "Beilage_10" { "Beilage_10" } else { "Beilage_11" },
            doc_type: DocumentType::ProfessionMonthly,
            metadata: metadata(
                if id == "Beilage_10" {
                    "Wie viele Anträge für MTD-Berufe wurden pro Monat von 2021 \
                     bis 2023 eingebracht (postalisch und online, bundesweit und \
                     pro Bundesland)?"
                } else {
                    "Wie viele Anträge für MTD-Berufe wurden pro Monat von 2021 \
                     bis 2023 abgearbeitet (postalisch und online, bundesweit und \
                     pro Bundesland)?"
                },
                "2021-2023",
                &count_units(),
                &application_descriptions(),
            ),
            tuning: ParserTuning::Monthly(MonthlyTuning {
                sub_table_mode: true,
                table_splits: if id == "Beilage_10" {
                    vec![TableSplitRule {
                        pages: &PROFESSION_MONTHLY_SPLIT_PAGES,
                        table_index: 2,
                        split_at_row: 4,
                    }]
                } else {
                    vec![]
                },
            }),
        },
        _ => {
            return Err(Error::UnknownAttachment { id: id.to_string() });
        }
    };
    Ok(spec)
}
