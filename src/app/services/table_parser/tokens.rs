//! Cell tokenization and layout disambiguation.
//!
//! Extraction output is lossy about column boundaries: a whole table row
//! often arrives as one space-joined cell, labels wrap across lines inside
//! a cell, and wide numbers are sometimes split into two adjacent tokens.
//! The helpers here recover token structure; the strategies decide what the
//! tokens mean.

/// Split a cell into whitespace-delimited tokens (newlines included)
pub fn split_cell(cell: &str) -> Vec<&str> {
    cell.split_whitespace().collect()
}

/// Split a cell into its stacked sub-lines
pub fn split_lines(cell: &str) -> Vec<&str> {
    cell.split('\n').collect()
}

/// First sub-line of a cell; the whole cell when it has no newline
pub fn first_line(cell: &str) -> &str {
    cell.split('\n').next().unwrap_or(cell)
}

/// Last sub-line of a cell; used where a wrapped label pushes the data
/// tokens onto the final line
pub fn last_line(cell: &str) -> &str {
    cell.split('\n').next_back().unwrap_or(cell)
}

/// Join a row's non-empty cells into one token stream.
///
/// Rows usually carry a single joined cell, but some layouts leave the
/// tail of a row in a second cell; joining makes both shapes uniform.
pub fn join_row(cells: &[String]) -> String {
    let parts: Vec<&str> = cells
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .collect();
    parts.join(" ")
}

/// Remove thousands-grouping dots from a token
pub fn degrouped(token: &str) -> String {
    token.replace('.', "")
}

/// Whether a token is all ASCII digits after removing grouping dots
pub fn is_degrouped_digits(token: &str) -> bool {
    let stripped = degrouped(token);
    !stripped.is_empty() && stripped.bytes().all(|b| b.is_ascii_digit())
}

/// Trailing column arity of a token stream.
///
/// Extraction sometimes splits one wide number into two tokens, turning
/// three trailing numeric columns into four trailing tokens. The layouts
/// are told apart by the 4th-from-last token: if it is all digits (after
/// removing grouping dots) the row is in the split form and the 3rd- and
/// 2nd-from-last tokens must be concatenated to recover the split number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrailingLayout {
    /// Three trailing tokens: postal, online, total
    Plain,
    /// Four trailing tokens: postal, online split across two tokens, total
    SplitNumber,
}

/// Classify the trailing layout of a monthly-count row
pub fn detect_trailing_layout(tokens: &[&str]) -> TrailingLayout {
    if tokens.len() >= 4 && is_degrouped_digits(tokens[tokens.len() - 4]) {
        TrailingLayout::SplitNumber
    } else {
        TrailingLayout::Plain
    }
}

/// Split a token of the form `<digits><label...>` into the numeric code
/// and the label remainder ("27FA für Radiologie" style merges)
pub fn split_leading_code(token: &str) -> Option<(i64, &str)> {
    let digits_end = token
        .char_indices()
        .take_while(|(_, c)| c.is_ascii_digit())
        .count();
    if digits_end == 0 {
        return None;
    }
    let (digits, remainder) = token.split_at(digits_end);
    digits.parse::<i64>().ok().map(|code| (code, remainder))
}

/// Last two characters of a period token; used to rebuild the period of a
/// trailing average row from the preceding data row ("Dez.23" -> "23")
pub fn period_year_suffix(period: &str) -> &str {
    let chars: Vec<(usize, char)> = period.char_indices().collect();
    if chars.len() <= 2 {
        period
    } else {
        &period[chars[chars.len() - 2].0..]
    }
}
