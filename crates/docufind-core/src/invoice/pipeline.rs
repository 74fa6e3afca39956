//! End-to-end extraction: normalized text in, one invoice record out.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::content::ContentNormalizer;
use crate::error::{ExtractionError, Result};
use crate::invoice::categorize::Categorizer;
use crate::invoice::confidence::ConfidenceScorer;
use crate::invoice::rules::currency::CurrencyDetector;
use crate::invoice::rules::{FieldExtractor, FieldKind, PatternSet, RawCandidate, amounts, dates};
use crate::invoice::vendor::{self, VendorResolver};
use crate::models::{
    Attachment, Category, EmailContext, InvoiceRecord, Language, MediaType, PaymentMethod,
    SourceContent, UNKNOWN_VENDOR,
};

/// Visible per-attachment separator in the combined text.
const ATTACHMENT_SEPARATOR: &str = "--- ADJUNTO:";

/// Cap on the combined text handed to the extractor, in characters.
const MAX_COMBINED_LEN: usize = 120_000;

/// Concept length cap, in characters.
const MAX_CONCEPT_LEN: usize = 500;

/// The full extraction pipeline.
///
/// All lookup tables and patterns are compiled at construction and never
/// mutated, so one pipeline can serve any number of threads. Each call is
/// single-shot: no state survives between extractions.
///
/// Whatever happens internally, `extract` answers with a well-formed
/// record; the worst case is the fallback record with zero confidence.
/// The caller can always file the document.
pub struct ExtractionPipeline {
    normalizer: ContentNormalizer,
    extractor: FieldExtractor,
    currencies: CurrencyDetector,
    vendors: VendorResolver,
    categorizer: Categorizer,
    scorer: ConfidenceScorer,
}

impl ExtractionPipeline {
    pub fn new() -> Self {
        Self {
            normalizer: ContentNormalizer::new(),
            extractor: FieldExtractor::new(),
            currencies: CurrencyDetector::new(),
            vendors: VendorResolver::new(),
            categorizer: Categorizer::new(),
            scorer: ConfidenceScorer::new(),
        }
    }

    /// Replace the default pattern cascades.
    pub fn with_patterns(mut self, patterns: PatternSet) -> Self {
        self.extractor = FieldExtractor::with_patterns(patterns);
        self
    }

    /// Replace the default categorizer.
    pub fn with_categorizer(mut self, categorizer: Categorizer) -> Self {
        self.categorizer = categorizer;
        self
    }

    /// Replace the default confidence scorer.
    pub fn with_scorer(mut self, scorer: ConfidenceScorer) -> Self {
        self.scorer = scorer;
        self
    }

    /// Replace the default normalizer.
    pub fn with_normalizer(mut self, normalizer: ContentNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Extract one invoice record from an email body, its attachments and
    /// the envelope metadata.
    pub fn extract(
        &self,
        body: &SourceContent,
        attachments: &[Attachment],
        ctx: &EmailContext,
    ) -> InvoiceRecord {
        match self.try_extract(body, attachments, ctx) {
            Ok(record) => record,
            Err(err) => {
                warn!("extraction failed, producing fallback record: {err}");
                self.fallback_record(ctx)
            }
        }
    }

    fn try_extract(
        &self,
        body: &SourceContent,
        attachments: &[Attachment],
        ctx: &EmailContext,
    ) -> Result<InvoiceRecord> {
        let text = self.combined_text(body, attachments, ctx);
        if text.trim().is_empty() {
            return Err(ExtractionError::TotalExtractionFailure(
                "no extractable text in body or attachments".to_string(),
            ));
        }

        info!(
            "extracting invoice data from {} characters of text",
            text.chars().count()
        );

        let candidates = self.extractor.extract(&text);

        let amount = amounts::select_amount(field(&candidates, FieldKind::Amount));
        let currency = self.currencies.detect(&text);
        let vendor = self.resolve_vendor(ctx, &candidates);
        let concept = self.resolve_concept(&candidates, &text);
        let invoice_number = first_valid(&candidates, FieldKind::InvoiceNumber, valid_invoice_number)
            .map(|raw| normalize_invoice_number(&raw));
        let invoice_date = self.resolve_invoice_date(ctx, &candidates);
        let due_date = first_parseable_date(&candidates, FieldKind::DueDate);
        let tax_amount = field(&candidates, FieldKind::Tax)
            .iter()
            .find_map(|candidate| amounts::parse_amount(&candidate.value));
        let tax_id = first_valid(&candidates, FieldKind::TaxId, valid_tax_id);
        let category = self.categorizer.categorize(&vendor, &concept, &text);

        let mut record = InvoiceRecord {
            amount,
            currency,
            vendor,
            concept,
            invoice_number,
            invoice_date,
            due_date,
            tax_amount,
            tax_id,
            category,
            payment_method: PaymentMethod::detect(&text),
            language: Language::detect(&text),
            confidence: 0.0,
            extraction_method: "pattern_matching".to_string(),
            warnings: Vec::new(),
        };
        record.confidence = self.scorer.score(&record);
        record.warnings = record.validate();

        debug!(
            "extracted record for '{}' with confidence {:.2}",
            record.vendor, record.confidence
        );

        Ok(record)
    }

    /// Normalize and join every text source, with a visible separator per
    /// attachment. Opaque attachments contribute nothing.
    fn combined_text(
        &self,
        body: &SourceContent,
        attachments: &[Attachment],
        ctx: &EmailContext,
    ) -> String {
        let mut parts: Vec<String> = Vec::new();

        if let Some(text) = self.normalizer.normalize(body) {
            if !text.trim().is_empty() {
                parts.push(text);
            }
        }

        // The envelope sometimes carries a decoded body the source did not
        if parts.is_empty() {
            if let Some(context_body) = &ctx.body {
                if let Some(text) = self.normalizer.normalize_text(context_body, MediaType::Plain) {
                    if !text.trim().is_empty() {
                        parts.push(text);
                    }
                }
            }
        }

        for attachment in attachments {
            if let Some(text) = self.normalizer.normalize(&attachment.content) {
                if !text.trim().is_empty() {
                    parts.push(format!(
                        "{} {} ---\n{}",
                        ATTACHMENT_SEPARATOR, attachment.filename, text
                    ));
                }
            }
        }

        let combined = parts.join("\n\n");
        if combined.chars().count() > MAX_COMBINED_LEN {
            combined.chars().take(MAX_COMBINED_LEN).collect()
        } else {
            combined
        }
    }

    /// The sender header is the most reliable vendor signal; extracted
    /// candidates only fill in when the header yields nothing.
    fn resolve_vendor(
        &self,
        ctx: &EmailContext,
        candidates: &HashMap<FieldKind, Vec<RawCandidate>>,
    ) -> String {
        let from_sender = self.vendors.resolve_from_sender(&ctx.sender, &ctx.subject);
        if from_sender != UNKNOWN_VENDOR {
            return from_sender;
        }

        select_vendor_candidate(field(candidates, FieldKind::Vendor))
            .unwrap_or_else(|| UNKNOWN_VENDOR.to_string())
    }

    fn resolve_concept(
        &self,
        candidates: &HashMap<FieldKind, Vec<RawCandidate>>,
        text: &str,
    ) -> String {
        let explicit = field(candidates, FieldKind::Concept)
            .iter()
            .filter(|candidate| candidate.value.chars().count() > 10)
            .max_by_key(|candidate| candidate.value.chars().count())
            .map(|candidate| candidate.value.clone());

        let concept = explicit.or_else(|| infer_concept(text)).unwrap_or_default();
        clean_concept(&concept)
    }

    /// The email's own date wins whenever it parses; body dates only fill
    /// in when the envelope has nothing usable.
    fn resolve_invoice_date(
        &self,
        ctx: &EmailContext,
        candidates: &HashMap<FieldKind, Vec<RawCandidate>>,
    ) -> Option<String> {
        let context_date = ctx.date.trim();

        if !context_date.is_empty() {
            let parsed = dates::to_iso_date(context_date).or_else(|| {
                context_date
                    .split_whitespace()
                    .next()
                    .and_then(dates::to_iso_date)
            });
            if parsed.is_some() {
                return parsed;
            }
        }

        if let Some(iso) = first_parseable_date(candidates, FieldKind::InvoiceDate) {
            return Some(iso);
        }

        if !context_date.is_empty() {
            // An unparseable envelope date still beats nothing
            return context_date.split_whitespace().next().map(str::to_string);
        }

        None
    }

    /// Minimal record that still lets the caller file the document.
    fn fallback_record(&self, ctx: &EmailContext) -> InvoiceRecord {
        let vendor = self
            .vendors
            .domain_of(&ctx.sender)
            .unwrap_or_else(|| UNKNOWN_VENDOR.to_string());

        InvoiceRecord {
            vendor,
            category: Category::Error,
            confidence: 0.0,
            extraction_method: "fallback".to_string(),
            ..Default::default()
        }
    }
}

impl Default for ExtractionPipeline {
    fn default() -> Self {
        Self::new()
    }
}

fn field(
    candidates: &HashMap<FieldKind, Vec<RawCandidate>>,
    kind: FieldKind,
) -> &[RawCandidate] {
    candidates.get(&kind).map(Vec::as_slice).unwrap_or(&[])
}

fn first_valid(
    candidates: &HashMap<FieldKind, Vec<RawCandidate>>,
    kind: FieldKind,
    is_valid: fn(&str) -> bool,
) -> Option<String> {
    field(candidates, kind)
        .iter()
        .find(|candidate| is_valid(&candidate.value))
        .map(|candidate| candidate.value.clone())
}

fn first_parseable_date(
    candidates: &HashMap<FieldKind, Vec<RawCandidate>>,
    kind: FieldKind,
) -> Option<String> {
    field(candidates, kind)
        .iter()
        .find_map(|candidate| dates::to_iso_date(&candidate.value))
}

/// An address with a non-automated local part wins, then the longest
/// candidate containing any letters.
fn select_vendor_candidate(candidates: &[RawCandidate]) -> Option<String> {
    for candidate in candidates {
        if let Some((local, _)) = candidate.value.split_once('@') {
            let local = local.to_lowercase();
            if !vendor::GENERIC_LOCALS
                .iter()
                .any(|generic| local.contains(generic))
            {
                return finish_vendor(&candidate.value);
            }
        }
    }

    candidates
        .iter()
        .filter(|candidate| candidate.value.chars().any(char::is_alphabetic))
        .max_by_key(|candidate| candidate.value.chars().count())
        .and_then(|candidate| finish_vendor(&candidate.value))
}

fn finish_vendor(value: &str) -> Option<String> {
    let label = vendor::ellipsize(&vendor::sanitize_label(value), 100);
    if label.is_empty() { None } else { Some(label) }
}

/// Context fallback for the concept: the first line that reads like prose.
fn infer_concept(text: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .find(|line| {
            let len = line.chars().count();
            if !(10..=150).contains(&len) || line.contains('@') {
                return false;
            }
            if line
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_whitespace() || c.is_ascii_punctuation())
            {
                return false;
            }
            let words = line
                .split_whitespace()
                .filter(|word| word.chars().any(char::is_alphabetic))
                .count();
            words >= 2
        })
        .map(str::to_string)
}

fn clean_concept(concept: &str) -> String {
    let collapsed = concept.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= MAX_CONCEPT_LEN {
        return collapsed;
    }
    let mut cut: String = collapsed.chars().take(MAX_CONCEPT_LEN).collect();
    cut.push_str("...");
    cut
}

/// Uppercase and strip separators so "inv 2024 001" and "INV-2024-001"
/// file identically.
fn normalize_invoice_number(raw: &str) -> String {
    raw.to_uppercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '/' | '_'))
        .collect()
}

fn valid_invoice_number(value: &str) -> bool {
    value.chars().any(|c| c.is_ascii_digit()) && value.chars().count() >= 2
}

fn valid_tax_id(value: &str) -> bool {
    value.chars().filter(|c| c.is_ascii_digit()).count() >= 4
}
