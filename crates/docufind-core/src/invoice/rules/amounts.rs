//! Locale-ambiguous amount parsing and total selection.

use tracing::debug;

use super::RawCandidate;
use crate::error::ExtractionError;

/// Parse a raw amount candidate into a canonical value.
///
/// Accepts both decimal-comma ("1.234,56") and decimal-point
/// ("1,234.56") conventions. When both separators appear, the one
/// closer to the end of the string is the decimal point. When only a
/// comma appears, it is the decimal point iff at most two digits follow
/// it; otherwise it separates thousands. Returns `None` for anything
/// that does not survive cleaning.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();

    if !cleaned.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    let comma = cleaned.rfind(',');
    let dot = cleaned.rfind('.');

    let normalized = match (comma, dot) {
        (Some(c), Some(d)) if c > d => cleaned.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => cleaned.replace(',', ""),
        (Some(c), None) => {
            if cleaned.len() - c - 1 <= 2 {
                cleaned.replace(',', ".")
            } else {
                cleaned.replace(',', "")
            }
        }
        _ => cleaned,
    };

    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Pick the invoice total from the raw candidates: the largest value
/// that parses.
///
/// "Largest number wins" is a deliberate heuristic, not a guarantee; a
/// quantity or a phone number that slips through the patterns can
/// outrank the true total.
pub fn select_amount(candidates: &[RawCandidate]) -> Option<f64> {
    let mut best: Option<f64> = None;

    for candidate in candidates {
        match parse_amount(&candidate.value) {
            Some(value) => {
                best = Some(match best {
                    Some(current) if current >= value => current,
                    _ => value,
                });
            }
            None => {
                debug!("{}", ExtractionError::AmountUnparsed(candidate.value.clone()));
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(value: &str) -> RawCandidate {
        RawCandidate {
            value: value.to_string(),
            pattern_index: 0,
            position: (0, value.len()),
        }
    }

    #[test]
    fn test_parse_decimal_comma() {
        assert_eq!(parse_amount("1.234,56"), Some(1234.56));
        assert_eq!(parse_amount("12.345.678,90"), Some(12_345_678.90));
    }

    #[test]
    fn test_parse_decimal_point() {
        assert_eq!(parse_amount("1,234.56"), Some(1234.56));
        assert_eq!(parse_amount("45.99"), Some(45.99));
    }

    #[test]
    fn test_parse_lone_comma() {
        // Two digits after the comma: decimal separator
        assert_eq!(parse_amount("1234,56"), Some(1234.56));
        // Three digits after the comma: thousands separator
        assert_eq!(parse_amount("12,345"), Some(12345.0));
        assert_eq!(parse_amount("1,234,567"), Some(1_234_567.0));
    }

    #[test]
    fn test_parse_plain_numbers() {
        assert_eq!(parse_amount("1234"), Some(1234.0));
        assert_eq!(parse_amount("0.5"), Some(0.5));
    }

    #[test]
    fn test_parse_ignores_currency_noise() {
        assert_eq!(parse_amount("$ 45.99 USD"), Some(45.99));
        assert_eq!(parse_amount("€1.234,56"), Some(1234.56));
    }

    #[test]
    fn test_parse_garbage_returns_none() {
        assert_eq!(parse_amount("garbage"), None);
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount(",.,"), None);
    }

    #[test]
    fn test_select_amount_picks_largest() {
        let candidates = vec![candidate("45.99"), candidate("1.234,56"), candidate("100")];
        assert_eq!(select_amount(&candidates), Some(1234.56));
    }

    #[test]
    fn test_select_amount_skips_unparseable() {
        let candidates = vec![candidate("n/a"), candidate("45.99")];
        assert_eq!(select_amount(&candidates), Some(45.99));
        assert_eq!(select_amount(&[candidate("n/a")]), None);
        assert_eq!(select_amount(&[]), None);
    }
}
