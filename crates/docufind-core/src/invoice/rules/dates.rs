//! Date candidate parsing into ISO form.

use chrono::{DateTime, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NUMERIC: Regex =
        Regex::new(r"^([0-9]{1,4})[/.\-]([0-9]{1,2})[/.\-]([0-9]{1,4})$").unwrap();
    static ref SPANISH_LONG: Regex = Regex::new(
        r"(?i)^([0-9]{1,2})\s{1,3}de\s{1,3}([a-z\u{e1}\u{e9}\u{ed}\u{f3}\u{fa}]{3,12})(?:\s{1,3}de)?\s{1,3}([0-9]{4})$"
    )
    .unwrap();
    static ref MONTH_FIRST: Regex = Regex::new(
        r"(?i)^([a-z]{3,12})\.?\s{1,3}([0-9]{1,2})(?:st|nd|rd|th)?,?\s{1,3}([0-9]{4})$"
    )
    .unwrap();
    static ref DAY_FIRST: Regex =
        Regex::new(r"(?i)^([0-9]{1,2})\s{1,3}([a-z]{3,12})\.?,?\s{1,3}([0-9]{4})$").unwrap();
}

/// Parse a raw date candidate; returns `YYYY-MM-DD` on success.
pub fn to_iso_date(raw: &str) -> Option<String> {
    parse_date(raw).map(|date| date.format("%Y-%m-%d").to_string())
}

/// Parse the numeric and textual date forms invoices actually use.
///
/// Numeric day/month order is ambiguous; day-first is tried before
/// month-first, matching the Latin American mailboxes this feeds on.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(caps) = NUMERIC.captures(trimmed) {
        let first: i64 = caps[1].parse().ok()?;
        let second: u32 = caps[2].parse().ok()?;
        let third: i64 = caps[3].parse().ok()?;

        // Four leading digits: already year-month-day
        if first >= 1000 {
            return NaiveDate::from_ymd_opt(first as i32, second, third as u32);
        }

        let year = normalize_year(third);
        return NaiveDate::from_ymd_opt(year, second, first as u32)
            .or_else(|| NaiveDate::from_ymd_opt(year, first as u32, second));
    }

    if let Some(caps) = SPANISH_LONG.captures(trimmed) {
        let day: u32 = caps[1].parse().ok()?;
        let month = month_number(&caps[2])?;
        let year: i32 = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    if let Some(caps) = DAY_FIRST.captures(trimmed) {
        let day: u32 = caps[1].parse().ok()?;
        let month = month_number(&caps[2])?;
        let year: i32 = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    if let Some(caps) = MONTH_FIRST.captures(trimmed) {
        let month = month_number(&caps[1])?;
        let day: u32 = caps[2].parse().ok()?;
        let year: i32 = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    // Full mail-header timestamps
    DateTime::parse_from_rfc2822(trimmed)
        .ok()
        .map(|dt| dt.date_naive())
}

fn normalize_year(year: i64) -> i32 {
    if year < 100 {
        // Two-digit years: 00-50 land in the 2000s
        if year <= 50 {
            (2000 + year) as i32
        } else {
            (1900 + year) as i32
        }
    } else {
        year as i32
    }
}

fn month_number(name: &str) -> Option<u32> {
    let lower = name.to_lowercase();
    let month = match lower.as_str() {
        "enero" | "january" | "jan" | "ene" => 1,
        "febrero" | "february" | "feb" => 2,
        "marzo" | "march" | "mar" => 3,
        "abril" | "april" | "apr" | "abr" => 4,
        "mayo" | "may" => 5,
        "junio" | "june" | "jun" => 6,
        "julio" | "july" | "jul" => 7,
        "agosto" | "august" | "aug" | "ago" => 8,
        "septiembre" | "setiembre" | "september" | "sep" | "sept" => 9,
        "octubre" | "october" | "oct" => 10,
        "noviembre" | "november" | "nov" => 11,
        "diciembre" | "december" | "dec" | "dic" => 12,
        _ => return None,
    };
    Some(month)
}
