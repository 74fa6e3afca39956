//! Weighted presence scoring for assembled records.

use crate::invoice::rules::currency::DEFAULT_CURRENCY;
use crate::models::{Category, InvoiceRecord, UNKNOWN_VENDOR};

/// Per-field weights. The sum is 1.0; the score is capped there anyway.
#[derive(Debug, Clone)]
pub struct ConfidenceWeights {
    pub amount: f32,
    pub vendor: f32,
    pub concept: f32,
    pub invoice_number: f32,
    pub invoice_date: f32,
    pub due_date: f32,
    pub tax_amount: f32,
    pub tax_id: f32,
    pub currency: f32,
    pub category: f32,
}

impl Default for ConfidenceWeights {
    fn default() -> Self {
        Self {
            amount: 0.25,
            vendor: 0.20,
            concept: 0.15,
            invoice_number: 0.15,
            invoice_date: 0.10,
            due_date: 0.05,
            tax_amount: 0.04,
            tax_id: 0.03,
            currency: 0.02,
            category: 0.01,
        }
    }
}

/// Scores how much of the record was actually extracted.
///
/// This is a presence heuristic, not a probability: each populated field
/// contributes its fixed weight, and the result is clamped to `0.0..=1.0`.
#[derive(Debug, Clone, Default)]
pub struct ConfidenceScorer {
    weights: ConfidenceWeights,
}

impl ConfidenceScorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weights(weights: ConfidenceWeights) -> Self {
        Self { weights }
    }

    pub fn score(&self, record: &InvoiceRecord) -> f32 {
        let w = &self.weights;
        let mut total = 0.0f32;

        if record.amount.is_some_and(|amount| amount > 0.0) {
            total += w.amount;
        }
        if !record.vendor.is_empty() && record.vendor != UNKNOWN_VENDOR {
            total += w.vendor;
        }
        if !record.concept.is_empty() {
            total += w.concept;
        }
        if record.invoice_number.is_some() {
            total += w.invoice_number;
        }
        if record.invoice_date.is_some() {
            total += w.invoice_date;
        }
        if record.due_date.is_some() {
            total += w.due_date;
        }
        if record.tax_amount.is_some_and(|tax| tax > 0.0) {
            total += w.tax_amount;
        }
        if record.tax_id.is_some() {
            total += w.tax_id;
        }
        // Currency only counts when detection found an actual signal
        if record.currency != DEFAULT_CURRENCY {
            total += w.currency;
        }
        if !matches!(record.category, Category::Miscellaneous | Category::Error) {
            total += w.category;
        }

        total.clamp(0.0, 1.0)
    }
}
