use chrono::{Datelike, NaiveDate};

const REPORT_DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

/// Parse a date as written by the extraction pipeline.
///
/// Accepts `YYYY-MM-DD`, `MM/DD/YYYY`, `YYYY/MM/DD` and, for month-granular fields,
/// `YYYY-MM` (resolved to the first of the month).
pub fn parse_report_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    REPORT_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .or_else(|| parse_month(trimmed))
}

pub fn parse_optional(raw: Option<&str>) -> Option<NaiveDate> {
    raw.and_then(parse_report_date)
}

/// Parse a `YYYY-MM` reporting month to its first day.
pub fn parse_month(raw: &str) -> Option<NaiveDate> {
    let (year, month) = raw.trim().split_once('-')?;
    if year.len() != 4 || month.is_empty() || month.len() > 2 {
        return None;
    }
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Strict ISO-8601 calendar date, as required on the dispute wire format.
pub fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// Whole years elapsed between `from` and `to`, negative when `from` is later.
pub fn years_between(from: NaiveDate, to: NaiveDate) -> i32 {
    let mut years = to.year() - from.year();
    if (to.month(), to.day()) < (from.month(), from.day()) {
        years -= 1;
    }
    years
}

pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}
