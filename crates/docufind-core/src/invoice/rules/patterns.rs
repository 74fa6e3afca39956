//! Default pattern cascades for invoice field extraction.
//!
//! Patterns are ordered: cascade position doubles as selection priority
//! for first-match fields. Sources stay Spanish/English bilingual because
//! that is what the processed mailboxes contain. Quantifiers are bounded
//! throughout so a hostile body cannot blow up match time.

use super::FieldKind;

/// Amount candidates: labeled totals, currency-symbol amounts, amounts
/// followed by an ISO code.
pub const AMOUNT: &[&str] = &[
    r"(?i)total(?:es)?\s{0,3}:?\s{0,8}[$€£¥]?\s{0,8}([0-9]{1,3}(?:[ ,.]?[0-9]{3}){0,4}(?:[,.][0-9]{1,2})?)",
    r"(?i)(?:amount|importe)\s{0,3}:?\s{0,8}[$€£¥]?\s{0,8}([0-9]{1,3}(?:[ ,.]?[0-9]{3}){0,4}(?:[,.][0-9]{1,2})?)",
    r"(?i)valor(?:\s{1,3}a\s{1,3}pagar)?\s{0,3}:?\s{0,8}[$€£¥]?\s{0,8}([0-9]{1,3}(?:[ ,.]?[0-9]{3}){0,4}(?:[,.][0-9]{1,2})?)",
    r"(?i)subtotal\s{0,3}:?\s{0,8}[$€£¥]?\s{0,8}([0-9]{1,3}(?:[ ,.]?[0-9]{3}){0,4}(?:[,.][0-9]{1,2})?)",
    r"(?i)(?:pagar|cobrar|facturar)\s{0,3}:?\s{0,8}[$€£¥]?\s{0,8}([0-9]{1,3}(?:[ ,.]?[0-9]{3}){0,4}(?:[,.][0-9]{1,2})?)",
    r"\$\s{0,8}([0-9]{1,3}(?:,[0-9]{3}){0,4}(?:\.[0-9]{1,2})?)",
    r"€\s{0,8}([0-9]{1,3}(?:[.,][0-9]{3}){0,4}(?:[.,][0-9]{1,2})?)",
    r"(?i)([0-9]{1,3}(?:[ ,.]?[0-9]{3}){0,4}(?:[,.][0-9]{1,2})?)\s{0,8}(?:USD|EUR|GBP|COP|MXN|ARS|PEN|CLP)\b",
];

/// Vendor candidates: labeled names, sender-style lines, bare addresses.
pub const VENDOR: &[&str] = &[
    r"(?i)from\s{0,3}:\s{0,8}([^<\n]{1,100}?)\s{0,4}(?:<|$)",
    r"(?i)\bde\s{0,3}:\s{0,8}([^<\n]{1,100}?)\s{0,4}(?:<|$)",
    r"(?i)(?:empresa|company|proveedor|supplier)\s{0,3}:?\s{0,8}([^\n]{1,120})",
    r"(?i)(?:factura\s{1,3}de|invoice\s{1,3}from)\s{0,3}:?\s{0,8}([^\n]{1,120})",
    r"([A-Za-z0-9._%+-]{1,64}@[A-Za-z0-9.-]{1,120}\.[A-Za-z]{2,24})",
];

/// Concept candidates: labeled descriptions, subject lines.
pub const CONCEPT: &[&str] = &[
    r"(?i)concepto\s{0,3}:?\s{0,8}([^\n]{1,200})",
    r"(?i)descripci[oó]n\s{0,3}:?\s{0,8}([^\n]{1,200})",
    r"(?i)description\s{0,3}:?\s{0,8}([^\n]{1,200})",
    r"(?i)(?:servicio|service)s?\s{0,3}:\s{0,8}([^\n]{1,200})",
    r"(?i)(?:producto|product)s?\s{0,3}:\s{0,8}([^\n]{1,200})",
    r"(?i)(?:detalles?|details?)\s{0,3}:\s{0,8}([^\n]{1,200})",
    r"(?i)(?:motivo|reason)\s{0,3}:\s{0,8}([^\n]{1,200})",
    r"(?i)(?:subject|asunto)\s{0,3}:\s{0,8}([^\n]{1,200})",
];

/// Invoice number candidates, labeled only.
pub const INVOICE_NUMBER: &[&str] = &[
    r"(?i)(?:invoice|factura|bill)\s{0,3}(?:no\.?|n[uú]mero|number|num\.?|#)?\s{0,3}:?\s{0,8}([A-Z0-9][A-Z0-9/_-]{1,30})",
    r"(?i)(?:no\.?|number|n[uú]mero|#)\s{0,3}(?:de\s{1,3})?(?:invoice|factura|bill)\s{0,3}:?\s{0,8}([A-Z0-9][A-Z0-9/_-]{1,30})",
    r"(?i)(?:referencia|reference|ref)(?:\s{0,3}no\.?)?\s{0,3}:\s{0,8}([A-Z0-9][A-Z0-9/_-]{1,30})",
];

/// Invoice date candidates: labeled dates first, standalone forms last.
pub const INVOICE_DATE: &[&str] = &[
    r"(?i)(?:invoice|factura|bill)\s{0,3}date\s{0,3}:?\s{0,8}([0-9]{1,2}[/.\-][0-9]{1,2}[/.\-][0-9]{2,4}|[0-9]{4}-[0-9]{1,2}-[0-9]{1,2}|[0-9]{1,2}\s{1,3}de\s{1,3}[a-záéíóú]{3,12}\s{1,3}de\s{1,3}[0-9]{4}|[a-z]{3,12}\.?\s{1,3}[0-9]{1,2}(?:st|nd|rd|th)?,?\s{1,3}[0-9]{4}|[0-9]{1,2}\s{1,3}[a-z]{3,12}\.?,?\s{1,3}[0-9]{4})",
    r"(?i)fecha(?:\s{1,3}de\s{1,3}(?:factura|emisi[oó]n|expedici[oó]n))?\s{0,3}:\s{0,8}([0-9]{1,2}[/.\-][0-9]{1,2}[/.\-][0-9]{2,4}|[0-9]{4}-[0-9]{1,2}-[0-9]{1,2}|[0-9]{1,2}\s{1,3}de\s{1,3}[a-záéíóú]{3,12}\s{1,3}de\s{1,3}[0-9]{4})",
    r"(?i)date\s{0,3}:\s{0,8}([0-9]{1,2}[/.\-][0-9]{1,2}[/.\-][0-9]{2,4}|[0-9]{4}-[0-9]{1,2}-[0-9]{1,2}|[a-z]{3,12}\.?\s{1,3}[0-9]{1,2}(?:st|nd|rd|th)?,?\s{1,3}[0-9]{4}|[0-9]{1,2}\s{1,3}[a-z]{3,12}\.?,?\s{1,3}[0-9]{4})",
    r"\b([0-9]{4}-[0-9]{1,2}-[0-9]{1,2})\b",
    r"(?i)\b([0-9]{1,2}\s{1,3}de\s{1,3}[a-záéíóú]{3,12}\s{1,3}de\s{1,3}[0-9]{4})\b",
];

/// Due date candidates.
pub const DUE_DATE: &[&str] = &[
    r"(?i)(?:due\s{0,3}date|vencimiento|vence)\s{0,3}:?\s{0,8}([0-9]{1,2}[/.\-][0-9]{1,2}[/.\-][0-9]{2,4}|[0-9]{4}-[0-9]{1,2}-[0-9]{1,2}|[0-9]{1,2}\s{1,3}de\s{1,3}[a-záéíóú]{3,12}\s{1,3}de\s{1,3}[0-9]{4}|[a-z]{3,12}\.?\s{1,3}[0-9]{1,2}(?:st|nd|rd|th)?,?\s{1,3}[0-9]{4}|[0-9]{1,2}\s{1,3}[a-z]{3,12}\.?,?\s{1,3}[0-9]{4})",
    r"(?i)(?:pay\s{1,3}by|pagar\s{1,3}antes(?:\s{1,3}del?)?|payment\s{1,3}due)\s{0,3}:?\s{0,8}([0-9]{1,2}[/.\-][0-9]{1,2}[/.\-][0-9]{2,4}|[0-9]{4}-[0-9]{1,2}-[0-9]{1,2}|[0-9]{1,2}\s{1,3}de\s{1,3}[a-záéíóú]{3,12}\s{1,3}de\s{1,3}[0-9]{4}|[a-z]{3,12}\.?\s{1,3}[0-9]{1,2}(?:st|nd|rd|th)?,?\s{1,3}[0-9]{4})",
];

/// Tax amount candidates.
pub const TAX: &[&str] = &[
    r"(?i)(?:iva|vat|tax)\s{0,3}(?:\([0-9]{1,2}\s{0,2}%\)|[0-9]{1,2}\s{0,2}%)?\s{0,3}:?\s{0,8}[$€£¥]?\s{0,8}([0-9]{1,3}(?:[ ,.]?[0-9]{3}){0,4}(?:[,.][0-9]{1,2})?)",
    r"(?i)impuestos?\s{0,3}:?\s{0,8}[$€£¥]?\s{0,8}([0-9]{1,3}(?:[ ,.]?[0-9]{3}){0,4}(?:[,.][0-9]{1,2})?)",
    r"(?i)(?:retenci[oó]n|retention)\s{0,3}:?\s{0,8}[$€£¥]?\s{0,8}([0-9]{1,3}(?:[ ,.]?[0-9]{3}){0,4}(?:[,.][0-9]{1,2})?)",
];

/// Fiscal identifier candidates (NIT, RFC, CUIT/CUIL, RUT, EIN).
pub const TAX_ID: &[&str] = &[
    r"(?i)(?:nit|rfc|tax\s{1,3}id)\s{0,3}\.?:?\s{0,8}([0-9][0-9.\-]{3,19}[0-9kK]?)",
    r"(?i)(?:cuit|cuil)\s{0,3}:?\s{0,8}([0-9][0-9\-]{3,19})",
    r"(?i)\brut\s{0,3}:?\s{0,8}([0-9][0-9.\-]{3,19}[0-9kK])",
    r"(?i)\bein\s{0,3}:?\s{0,8}([0-9][0-9\-]{3,19})",
];

/// The full default cascade table, in field order.
pub const DEFAULT_SOURCES: &[(FieldKind, &[&str])] = &[
    (FieldKind::Amount, AMOUNT),
    (FieldKind::Vendor, VENDOR),
    (FieldKind::Concept, CONCEPT),
    (FieldKind::InvoiceNumber, INVOICE_NUMBER),
    (FieldKind::InvoiceDate, INVOICE_DATE),
    (FieldKind::DueDate, DUE_DATE),
    (FieldKind::Tax, TAX),
    (FieldKind::TaxId, TAX_ID),
];
