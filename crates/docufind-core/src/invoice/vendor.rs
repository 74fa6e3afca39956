//! Vendor label resolution from sender headers.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::UNKNOWN_VENDOR;

lazy_static! {
    static ref EMAIL_ADDR: Regex =
        Regex::new(r"[A-Za-z0-9._%+-]{1,64}@[A-Za-z0-9.-]{1,120}\.[A-Za-z]{2,24}").unwrap();
    static ref QUOTED_NAME: Regex = Regex::new(r#""([^"]{1,120})""#).unwrap();
    static ref ANGLE_SPAN: Regex = Regex::new(r"<[^>]{0,320}>").unwrap();
    static ref BARE_URL: Regex = Regex::new(r"(?i)(?:https?://|www\.)[^\s]{1,512}").unwrap();
    static ref NAMESPACE_TOKEN: Regex =
        Regex::new(r"(?:xmlns|rdf|xsi):[A-Za-z0-9._-]{0,64}").unwrap();
    static ref ALNUM_TOKEN: Regex =
        Regex::new(r"[\p{L}\p{N}][\p{L}\p{N}._-]{2,49}").unwrap();
    static ref MULTI_SPACE: Regex = Regex::new(r"\s{2,}").unwrap();
}

/// Subdomain prefixes that carry no vendor identity.
const GENERIC_SUBDOMAINS: &[&str] = &[
    "mail.",
    "smtp.",
    "email.",
    "mailer.",
    "noreply.",
    "no-reply.",
    "notifications.",
    "news.",
    "info.",
    "mx.",
];

/// Local parts that identify an automated mailbox rather than a vendor.
pub(crate) const GENERIC_LOCALS: &[&str] = &["noreply", "no-reply", "donotreply"];

const MAX_NAME_LEN: usize = 30;
const SUBJECT_WORDS: usize = 3;

/// Derives a human-usable vendor label from sender header and subject.
#[derive(Debug, Clone, Default)]
pub struct VendorResolver;

impl VendorResolver {
    pub fn new() -> Self {
        Self
    }

    /// Build a vendor label from the raw sender header.
    ///
    /// Preference order: domain plus display name, domain plus a subject
    /// excerpt, bare domain, a salvaged token from the header, and finally
    /// the unknown-sender fallback.
    pub fn resolve_from_sender(&self, sender: &str, subject: &str) -> String {
        let Some(address) = EMAIL_ADDR.find(sender) else {
            return self.salvage(sender);
        };

        let domain = clean_domain(address.as_str());
        let display = display_name(sender, address.start());

        let label = match display {
            Some(name) if !name.eq_ignore_ascii_case(&domain) => {
                format!("{} - {}", domain, ellipsize(&name, MAX_NAME_LEN))
            }
            _ => {
                let excerpt = subject_excerpt(subject);
                if excerpt.is_empty() {
                    domain.clone()
                } else {
                    format!("{} - {}", domain, excerpt)
                }
            }
        };

        let sanitized = sanitize_label(&label);
        if sanitized.is_empty() { domain } else { sanitized }
    }

    /// Bare sender domain, for minimal fallback records.
    pub fn domain_of(&self, sender: &str) -> Option<String> {
        EMAIL_ADDR
            .find(sender)
            .map(|address| clean_domain(address.as_str()))
    }

    /// Last resort when no address parses: pull a short alphanumeric
    /// token out of whatever the header contains.
    fn salvage(&self, sender: &str) -> String {
        let cleaned = sanitize_label(sender);
        ALNUM_TOKEN
            .find(&cleaned)
            .map(|token| token.as_str().to_string())
            .unwrap_or_else(|| UNKNOWN_VENDOR.to_string())
    }
}

/// Domain of an address, with generic subdomain prefixes peeled off.
fn clean_domain(address: &str) -> String {
    let domain = address
        .split('@')
        .nth(1)
        .unwrap_or(address)
        .to_ascii_lowercase();

    let mut rest = domain.as_str();
    loop {
        let stripped = GENERIC_SUBDOMAINS.iter().find_map(|prefix| {
            rest.strip_prefix(prefix)
                // Never strip down to a bare TLD
                .filter(|remainder| remainder.contains('.'))
        });
        match stripped {
            Some(remainder) => rest = remainder,
            None => break,
        }
    }

    rest.to_string()
}

/// Display name preceding the address, quoted or bare.
fn display_name(sender: &str, address_start: usize) -> Option<String> {
    let head = &sender[..address_start];

    if let Some(caps) = QUOTED_NAME.captures(head) {
        let name = caps[1].trim();
        if !name.is_empty() {
            return Some(name.to_string());
        }
    }

    let bare = head
        .trim_end()
        .trim_end_matches('<')
        .trim_matches(|c: char| c.is_whitespace() || c == '"' || c == '\'');
    if bare.is_empty() {
        None
    } else {
        Some(bare.to_string())
    }
}

/// First words of the subject, as a short excerpt.
fn subject_excerpt(subject: &str) -> String {
    let excerpt = subject
        .split_whitespace()
        .take(SUBJECT_WORDS)
        .collect::<Vec<_>>()
        .join(" ");
    ellipsize(&sanitize_label(&excerpt), MAX_NAME_LEN)
}

/// Remove markup artifacts a label must never leak: angle-bracket spans,
/// namespace tokens, bare URLs.
pub(crate) fn sanitize_label(label: &str) -> String {
    let cleaned = ANGLE_SPAN.replace_all(label, " ");
    let cleaned = BARE_URL.replace_all(&cleaned, " ");
    let cleaned = NAMESPACE_TOKEN.replace_all(&cleaned, " ");
    let cleaned = cleaned.replace(['<', '>'], " ");
    let cleaned = MULTI_SPACE.replace_all(cleaned.trim(), " ");
    cleaned
        .trim_matches(|c: char| c.is_whitespace() || c == '-' || c == ',' || c == ';')
        .to_string()
}

/// Cap a label fragment, marking the cut.
pub(crate) fn ellipsize(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars).collect();
    let trimmed = cut.trim_end().len();
    cut.truncate(trimmed);
    cut.push_str("...");
    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_display_name_with_generic_subdomain() {
        let resolver = VendorResolver::new();
        assert_eq!(
            resolver.resolve_from_sender(r#""Acme Corp" <billing@mail.acme.com>"#, "Invoice #123"),
            "acme.com - Acme Corp"
        );
    }

    #[test]
    fn test_unquoted_display_name() {
        let resolver = VendorResolver::new();
        assert_eq!(
            resolver.resolve_from_sender("Tech Services Inc. <billing@techservices.com>", ""),
            "techservices.com - Tech Services Inc."
        );
    }

    #[test]
    fn test_subject_excerpt_fallback() {
        let resolver = VendorResolver::new();
        assert_eq!(
            resolver.resolve_from_sender("noreply@cloudhost.io", "Your January Hosting Bill"),
            "cloudhost.io - Your January Hosting"
        );
    }

    #[test]
    fn test_bare_domain_when_nothing_else() {
        let resolver = VendorResolver::new();
        assert_eq!(
            resolver.resolve_from_sender("billing@acme.com", ""),
            "acme.com"
        );
    }

    #[test]
    fn test_display_name_equal_to_domain_is_ignored() {
        let resolver = VendorResolver::new();
        assert_eq!(
            resolver.resolve_from_sender("acme.com <billing@acme.com>", "Factura 99"),
            "acme.com - Factura 99"
        );
    }

    #[test]
    fn test_long_display_name_is_ellipsized() {
        let resolver = VendorResolver::new();
        let label = resolver.resolve_from_sender(
            r#""Compania Colombiana de Servicios Electricos del Caribe S.A. E.S.P." <pagos@cfe.com.co>"#,
            "",
        );
        assert!(label.starts_with("cfe.com.co - Compania"));
        assert!(label.ends_with("..."));
    }

    #[test]
    fn test_salvage_token_without_address() {
        let resolver = VendorResolver::new();
        assert_eq!(
            resolver.resolve_from_sender("Facturacion Electronica", ""),
            "Facturacion"
        );
    }

    #[test]
    fn test_unknown_sender_fallback() {
        let resolver = VendorResolver::new();
        assert_eq!(resolver.resolve_from_sender("", ""), UNKNOWN_VENDOR);
        assert_eq!(resolver.resolve_from_sender("<>", ""), UNKNOWN_VENDOR);
    }

    #[test]
    fn test_labels_never_leak_markup() {
        assert_eq!(
            sanitize_label("acme.com - <span style=\"x\">Acme</span> xmlns:rdf http://acme.com/ns"),
            "acme.com - Acme"
        );
        let resolver = VendorResolver::new();
        let label =
            resolver.resolve_from_sender("rdf:about <noreply@mailer.acme.com>", "xmlns:rdf factura");
        assert!(!label.contains("xmlns"));
        assert!(!label.contains("rdf:"));
        assert!(!label.contains('<'));
    }

    #[test]
    fn test_domain_of() {
        let resolver = VendorResolver::new();
        assert_eq!(
            resolver.domain_of("x <facturas@smtp.mail.empresa.co>"),
            Some("empresa.co".to_string())
        );
        assert_eq!(resolver.domain_of("sin correo"), None);
    }
}
