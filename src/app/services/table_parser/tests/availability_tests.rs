//! Tests for per-region availability windows.

use crate::app::services::table_parser::availability::{
    parse_period, ChannelAvailability, PeriodKey,
};

fn windows() -> ChannelAvailability {
    ChannelAvailability::new(vec![
        ("ÖGK-B", PeriodKey::new(2023, 5)),
        ("ÖGK-W", PeriodKey::new(2023, 7)),
    ])
}

#[test]
fn period_tokens_parse_to_month_keys() {
    assert_eq!(parse_period("Jän.23"), Some(PeriodKey::new(2023, 1)));
    assert_eq!(parse_period("Dez.23"), Some(PeriodKey::new(2023, 12)));
    assert_eq!(parse_period(" Mai.23 "), Some(PeriodKey::new(2023, 5)));
    assert_eq!(parse_period("Durchschnitt"), None);
    assert_eq!(parse_period("2023"), None);
}

#[test]
fn availability_starts_at_the_window_and_never_before() {
    let windows = windows();
    assert!(!windows.available("ÖGK-B", "Apr.23"));
    assert!(windows.available("ÖGK-B", "Mai.23"));
    assert!(windows.available("ÖGK-B", "Dez.23"));

    assert!(!windows.available("ÖGK-W", "Jun.23"));
    assert!(windows.available("ÖGK-W", "Jul.23"));
}

#[test]
fn regions_without_a_window_never_have_the_metric() {
    let windows = windows();
    assert!(!windows.available("ÖGK-V", "Dez.23"));
    assert!(!windows.available("ÖGK-V", "Durchschnitt"));
    assert!(!ChannelAvailability::never().available("ÖGK-B", "Dez.23"));
}

#[test]
fn average_rows_count_as_available_when_a_window_exists() {
    let windows = windows();
    assert!(windows.available("ÖGK-B", "Durchschnitt"));
    assert!(windows.available("ÖGK-W", "Durchschnitt 23"));
}
