//! Invoice record models produced by the extraction pipeline.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Vendor label used when no usable sender information exists.
pub const UNKNOWN_VENDOR: &str = "Remitente desconocido";

/// Spend category assigned by keyword lookup.
///
/// Variant order matters to the categorizer: it doubles as match priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Utilities,
    OfficeSupplies,
    Software,
    Services,
    Hosting,
    Transportation,
    Telecommunications,
    Financial,
    Miscellaneous,
    /// Only produced for the pipeline's fallback record.
    Error,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Utilities => "utilities",
            Category::OfficeSupplies => "office_supplies",
            Category::Software => "software",
            Category::Services => "services",
            Category::Hosting => "hosting",
            Category::Transportation => "transportation",
            Category::Telecommunications => "telecommunications",
            Category::Financial => "financial",
            Category::Miscellaneous => "miscellaneous",
            Category::Error => "error",
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Miscellaneous
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment method mentioned in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard,
    BankTransfer,
    Paypal,
    Cash,
}

impl PaymentMethod {
    /// Detect a payment method from free text.
    pub fn detect(text: &str) -> Option<Self> {
        let lower = text.to_lowercase();

        if ["credit card", "tarjeta", "visa", "mastercard"]
            .iter()
            .any(|kw| lower.contains(kw))
        {
            Some(PaymentMethod::CreditCard)
        } else if ["bank transfer", "transferencia", "wire transfer"]
            .iter()
            .any(|kw| lower.contains(kw))
        {
            Some(PaymentMethod::BankTransfer)
        } else if lower.contains("paypal") {
            Some(PaymentMethod::Paypal)
        } else if ["cash", "efectivo", "contado"]
            .iter()
            .any(|kw| lower.contains(kw))
        {
            Some(PaymentMethod::Cash)
        } else {
            None
        }
    }
}

/// Document language, decided by a keyword-count vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    Es,
    En,
}

impl Language {
    /// Detect the dominant language of the text, if any signal exists.
    pub fn detect(text: &str) -> Option<Self> {
        const SPANISH: [&str; 6] = ["factura", "importe", "empresa", "fecha", "vencimiento", "pagar"];
        const ENGLISH: [&str; 6] = ["invoice", "amount", "company", "date", "due", "payment"];

        let lower = text.to_lowercase();
        let spanish = SPANISH.iter().filter(|kw| lower.contains(*kw)).count();
        let english = ENGLISH.iter().filter(|kw| lower.contains(*kw)).count();

        if spanish == 0 && english == 0 {
            None
        } else if spanish > english {
            Some(Language::Es)
        } else {
            Some(Language::En)
        }
    }
}

/// A structured, confidence-scored invoice record.
///
/// One record is produced per extraction call; it is immutable afterwards
/// and handed to the filing collaborator. The core never persists records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    /// Canonical invoice total.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,

    /// ISO-like currency code.
    pub currency: String,

    /// Human-usable vendor label; never empty.
    pub vendor: String,

    /// Short description of what was billed.
    pub concept: String,

    /// Normalized invoice number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,

    /// Invoice date, `YYYY-MM-DD` when parseable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_date: Option<String>,

    /// Payment due date, `YYYY-MM-DD` when parseable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,

    /// Tax portion of the total.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_amount: Option<f64>,

    /// Fiscal identifier of the issuer (NIT, RFC, CUIT, RUT, EIN).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,

    /// Spend category.
    pub category: Category,

    /// Payment method mentioned in the document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,

    /// Dominant document language.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,

    /// Heuristic extraction reliability, always within `0.0..=1.0`.
    pub confidence: f32,

    /// How the record was produced (`pattern_matching` or `fallback`).
    pub extraction_method: String,

    /// Validation issues noticed while assembling the record.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl Default for InvoiceRecord {
    fn default() -> Self {
        Self {
            amount: None,
            currency: "USD".to_string(),
            vendor: UNKNOWN_VENDOR.to_string(),
            concept: String::new(),
            invoice_number: None,
            invoice_date: None,
            due_date: None,
            tax_amount: None,
            tax_id: None,
            category: Category::Miscellaneous,
            payment_method: None,
            language: None,
            confidence: 0.0,
            extraction_method: String::new(),
            warnings: Vec::new(),
        }
    }
}

impl InvoiceRecord {
    /// Check the assembled record for suspicious values.
    ///
    /// Issues are advisory; downstream systems decide what to do with
    /// low-quality records based on the confidence score.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if let Some(amount) = self.amount {
            if amount <= 0.0 {
                issues.push("amount is not positive".to_string());
            } else if amount > 100_000_000.0 {
                issues.push("amount looks implausibly large".to_string());
            }
        }

        if self.vendor.chars().count() < 2 {
            issues.push("vendor name is very short".to_string());
        }

        for (name, value) in [
            ("invoice_date", &self.invoice_date),
            ("due_date", &self.due_date),
        ] {
            if let Some(date) = value {
                if date.chars().count() < 8 {
                    issues.push(format!("{name} looks incomplete"));
                }
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_payment_method_detection() {
        assert_eq!(
            PaymentMethod::detect("Pagado con tarjeta Visa terminada en 1234"),
            Some(PaymentMethod::CreditCard)
        );
        assert_eq!(
            PaymentMethod::detect("Please settle via bank transfer"),
            Some(PaymentMethod::BankTransfer)
        );
        assert_eq!(
            PaymentMethod::detect("paid with PayPal"),
            Some(PaymentMethod::Paypal)
        );
        assert_eq!(
            PaymentMethod::detect("pago de contado"),
            Some(PaymentMethod::Cash)
        );
        assert_eq!(PaymentMethod::detect("sin forma de pago"), None);
    }

    #[test]
    fn test_language_detection() {
        assert_eq!(
            Language::detect("Factura con fecha de vencimiento, importe a pagar"),
            Some(Language::Es)
        );
        assert_eq!(
            Language::detect("Invoice amount due, payment date"),
            Some(Language::En)
        );
        assert_eq!(Language::detect("lorem ipsum dolor"), None);
    }

    #[test]
    fn test_default_record_is_well_formed() {
        let record = InvoiceRecord::default();
        assert_eq!(record.currency, "USD");
        assert_eq!(record.vendor, UNKNOWN_VENDOR);
        assert_eq!(record.category, Category::Miscellaneous);
        assert!(record.confidence >= 0.0 && record.confidence <= 1.0);
    }

    #[test]
    fn test_validate_flags_bad_amounts() {
        let record = InvoiceRecord {
            amount: Some(0.0),
            ..Default::default()
        };
        assert!(record.validate().iter().any(|w| w.contains("not positive")));

        let record = InvoiceRecord {
            amount: Some(2.0e9),
            ..Default::default()
        };
        assert!(record.validate().iter().any(|w| w.contains("implausibly")));
    }

    #[test]
    fn test_validate_flags_short_dates() {
        let record = InvoiceRecord {
            invoice_date: Some("1/2/24".to_string()),
            ..Default::default()
        };
        assert!(
            record
                .validate()
                .iter()
                .any(|w| w.contains("invoice_date"))
        );
    }

    #[test]
    fn test_record_serializes_to_snake_case() {
        let record = InvoiceRecord {
            amount: Some(45.99),
            category: Category::OfficeSupplies,
            payment_method: Some(PaymentMethod::CreditCard),
            ..Default::default()
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["category"], "office_supplies");
        assert_eq!(json["payment_method"], "credit_card");
        assert_eq!(json["amount"], 45.99);
        // Empty optionals stay out of the payload
        assert!(json.get("invoice_number").is_none());
    }
}
