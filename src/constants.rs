//! Shared constants for attachment processing.
//!
//! Field names, the null sentinel, month tokens and output file suffixes
//! used across parsing, assembly and serialization.

/// Region code column (Landesstelle, e.g. "W" or "ÖGK-W")
pub const FIELD_REGION: &str = "LST";

/// Reporting period column (e.g. "Jän.23", "2021", "Durchschnitt 23")
pub const FIELD_PERIOD: &str = "Period";

/// Numeric profession code (Fachrichtung code)
pub const FIELD_PROFESSION_CODE: &str = "ProfessionCode";

/// Profession label (Fachrichtung)
pub const FIELD_PROFESSION_LABEL: &str = "ProfessionLabel";

/// Postal application count or postal processing time
pub const FIELD_POSTAL: &str = "Postal";

/// Online application count
pub const FIELD_ONLINE: &str = "Online";

/// Reported (and recomputed) total of postal + online
pub const FIELD_TOTAL: &str = "Total";

/// Reimbursement amounts in EUR
pub const FIELD_REFUNDS: &str = "Refunds";

/// Invoiced amounts in EUR
pub const FIELD_INVOICE_AMOUNTS: &str = "InvoiceAmounts";

/// Processing time via the current online application channel
pub const FIELD_ONLINE_APP: &str = "OnlineApp";

/// Processing time via the legacy online channel (not available everywhere)
pub const FIELD_ONLINE_LEGACY: &str = "OnlineLegacy";

/// Label used by the source tables for the synthetic totals row
pub const TOTAL_ROW_LABEL: &str = "Gesamt";

/// Period prefix used by the source tables for the trailing average row
pub const AVERAGE_PERIOD_PREFIX: &str = "Durchschnitt";

/// Source convention for "no data"; parsed as an explicit null, never zero
pub const NULL_SENTINEL: &str = "-";

/// Output file suffix for the nested JSON document
pub const JSON_OUTPUT_SUFFIX: &str = "_data.json";

/// Output file suffix for the flat tabular file
pub const CSV_OUTPUT_SUFFIX: &str = "_combined_tables.csv";

/// File name of the consolidated run log written next to the outputs
pub const RUN_LOG_FILE: &str = "processing_run.log";

/// Austrian month abbreviations as they appear in period tokens ("Jän.23")
pub const MONTH_TOKENS: [(&str, u32); 12] = [
    ("Jän", 1),
    ("Feb", 2),
    ("Mär", 3),
    ("Apr", 4),
    ("Mai", 5),
    ("Jun", 6),
    ("Jul", 7),
    ("Aug", 8),
    ("Sep", 9),
    ("Okt", 10),
    ("Nov", 11),
    ("Dez", 12),
];

/// Resolve a month abbreviation to its 1-based month number
pub fn month_number(token: &str) -> Option<u32> {
    MONTH_TOKENS
        .iter()
        .find(|(name, _)| *name == token)
        .map(|(_, number)| *number)
}
