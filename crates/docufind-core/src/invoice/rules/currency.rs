//! Currency inference from symbols, ISO codes and keywords.

/// Default currency when no signal is found.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Regional default for a bare "peso" mention.
const DEFAULT_PESO: &str = "COP";

/// Currency symbols, compared by code point.
const SYMBOLS: [(char, &str); 4] = [('$', "USD"), ('\u{20ac}', "EUR"), ('\u{a3}', "GBP"), ('\u{a5}', "JPY")];

/// ISO codes recognized as whole words.
const CODES: [&str; 9] = ["USD", "EUR", "GBP", "COP", "MXN", "ARS", "PEN", "CLP", "JPY"];

/// Country keywords that disambiguate a "peso" mention.
const PESO_COUNTRIES: [(&str, &str); 6] = [
    ("colombia", "COP"),
    ("m\u{e9}xic", "MXN"),
    ("mexic", "MXN"),
    ("argentin", "ARS"),
    ("chile", "CLP"),
    ("urugua", "UYU"),
];

/// Detects the document currency.
///
/// Priority: explicit symbol, explicit ISO code, keyword inference,
/// global default. The lookup tables are fixed at construction.
#[derive(Debug, Clone)]
pub struct CurrencyDetector {
    symbols: Vec<(char, &'static str)>,
    codes: Vec<&'static str>,
}

impl CurrencyDetector {
    pub fn new() -> Self {
        Self {
            symbols: SYMBOLS.to_vec(),
            codes: CODES.to_vec(),
        }
    }

    pub fn detect(&self, text: &str) -> String {
        for (symbol, code) in &self.symbols {
            if text.contains(*symbol) {
                return (*code).to_string();
            }
        }

        let upper = text.to_uppercase();
        for code in &self.codes {
            if contains_word(&upper, code) {
                return (*code).to_string();
            }
        }

        let lower = text.to_lowercase();
        if lower.contains("peso") {
            for (country, code) in PESO_COUNTRIES {
                if lower.contains(country) {
                    return code.to_string();
                }
            }
            return DEFAULT_PESO.to_string();
        }
        if lower.contains("d\u{f3}lar") || lower.contains("dolar") || lower.contains("dollar") {
            return "USD".to_string();
        }
        if lower.contains("euro") {
            return "EUR".to_string();
        }

        DEFAULT_CURRENCY.to_string()
    }
}

impl Default for CurrencyDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Whole-word containment check without a regex.
fn contains_word(haystack: &str, needle: &str) -> bool {
    let mut start = 0;
    while let Some(offset) = haystack[start..].find(needle) {
        let begin = start + offset;
        let end = begin + needle.len();

        let boundary_before = haystack[..begin]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let boundary_after = haystack[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());

        if boundary_before && boundary_after {
            return true;
        }
        start = end;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_symbol_wins() {
        let detector = CurrencyDetector::new();
        assert_eq!(detector.detect("Total: $45.99"), "USD");
        assert_eq!(detector.detect("Importe: 45,99 \u{20ac}"), "EUR");
        assert_eq!(detector.detect("Amount due: \u{a3}12.50"), "GBP");
    }

    #[test]
    fn test_iso_code_detected_as_word() {
        let detector = CurrencyDetector::new();
        assert_eq!(detector.detect("Valor a pagar: 125.430 COP"), "COP");
        assert_eq!(detector.detect("total 1,200.00 MXN"), "MXN");
        // Substrings of longer words do not count
        assert_eq!(detector.detect("COPIA de la factura por 100 pesos"), "COP");
    }

    #[test]
    fn test_peso_keyword_uses_country() {
        let detector = CurrencyDetector::new();
        assert_eq!(detector.detect("pago de 5000 pesos, Bogota, Colombia"), "COP");
        assert_eq!(detector.detect("factura en pesos mexicanos"), "MXN");
        assert_eq!(detector.detect("500 pesos argentinos"), "ARS");
        // No country signal: regional default
        assert_eq!(detector.detect("el total son 100 pesos"), "COP");
    }

    #[test]
    fn test_keyword_fallbacks() {
        let detector = CurrencyDetector::new();
        assert_eq!(detector.detect("pague cien d\u{f3}lares"), "USD");
        assert_eq!(detector.detect("twenty euros in total"), "EUR");
    }

    #[test]
    fn test_global_default() {
        let detector = CurrencyDetector::new();
        assert_eq!(detector.detect("sin moneda alguna"), DEFAULT_CURRENCY);
        assert_eq!(detector.detect(""), DEFAULT_CURRENCY);
    }
}
