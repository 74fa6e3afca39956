//! Rule-based field extraction over normalized text.

pub mod amounts;
pub mod currency;
pub mod dates;
pub mod patterns;

use std::collections::HashMap;

use regex::{Regex, RegexBuilder};
use tracing::warn;

use crate::error::ExtractionError;

/// Fields the extractor collects candidates for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Amount,
    Vendor,
    Concept,
    InvoiceNumber,
    InvoiceDate,
    DueDate,
    Tax,
    TaxId,
}

impl FieldKind {
    pub const ALL: [FieldKind; 8] = [
        FieldKind::Amount,
        FieldKind::Vendor,
        FieldKind::Concept,
        FieldKind::InvoiceNumber,
        FieldKind::InvoiceDate,
        FieldKind::DueDate,
        FieldKind::Tax,
        FieldKind::TaxId,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FieldKind::Amount => "amount",
            FieldKind::Vendor => "vendor",
            FieldKind::Concept => "concept",
            FieldKind::InvoiceNumber => "invoice_number",
            FieldKind::InvoiceDate => "invoice_date",
            FieldKind::DueDate => "due_date",
            FieldKind::Tax => "tax",
            FieldKind::TaxId => "tax_id",
        }
    }
}

/// A single pattern match for a field, prior to validation or parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct RawCandidate {
    /// Captured text.
    pub value: String,
    /// Index of the pattern that produced the match.
    pub pattern_index: usize,
    /// Byte span in the source text.
    pub position: (usize, usize),
}

/// Ordered, compiled pattern cascades for every field.
///
/// Built once and handed to the pipeline. A source that fails to compile
/// is logged and skipped; it never takes down the rest of its field.
#[derive(Debug)]
pub struct PatternSet {
    cascades: Vec<(FieldKind, Vec<Regex>)>,
}

impl PatternSet {
    /// Compile cascades from pattern sources, keeping source order.
    pub fn from_sources(sources: &[(FieldKind, &[&str])]) -> Self {
        let mut cascades = Vec::with_capacity(sources.len());

        for (field, sources_for_field) in sources {
            let mut compiled = Vec::with_capacity(sources_for_field.len());
            for source in *sources_for_field {
                match compile_pattern(*field, source) {
                    Ok(regex) => compiled.push(regex),
                    Err(err) => warn!("{err}"),
                }
            }
            cascades.push((*field, compiled));
        }

        Self { cascades }
    }

    /// Compiled patterns for one field, in cascade order.
    pub fn patterns_for(&self, field: FieldKind) -> &[Regex] {
        self.cascades
            .iter()
            .find(|(kind, _)| *kind == field)
            .map(|(_, regexes)| regexes.as_slice())
            .unwrap_or(&[])
    }
}

impl Default for PatternSet {
    fn default() -> Self {
        Self::from_sources(patterns::DEFAULT_SOURCES)
    }
}

fn compile_pattern(field: FieldKind, source: &str) -> crate::error::Result<Regex> {
    RegexBuilder::new(source)
        .multi_line(true)
        .build()
        .map_err(|e| ExtractionError::PatternSkipped {
            field: field.name().to_string(),
            reason: e.to_string(),
        })
}

/// Runs every cascade against a text and collects all candidates.
#[derive(Debug, Default)]
pub struct FieldExtractor {
    patterns: PatternSet,
}

impl FieldExtractor {
    pub fn new() -> Self {
        Self {
            patterns: PatternSet::default(),
        }
    }

    /// Use a custom pattern set instead of the default cascades.
    pub fn with_patterns(patterns: PatternSet) -> Self {
        Self { patterns }
    }

    /// Collect every match of every pattern, grouped per field.
    ///
    /// Each pattern contributes all of its matches, not just the first;
    /// candidate order within a field follows cascade order, which doubles
    /// as priority for first-match fields.
    pub fn extract(&self, text: &str) -> HashMap<FieldKind, Vec<RawCandidate>> {
        let mut all: HashMap<FieldKind, Vec<RawCandidate>> = HashMap::new();

        for (field, regexes) in &self.patterns.cascades {
            let mut candidates = Vec::new();

            for (index, regex) in regexes.iter().enumerate() {
                for caps in regex.captures_iter(text) {
                    let Some(m) = caps.get(1).or_else(|| caps.get(0)) else {
                        continue;
                    };
                    let value = m.as_str().trim();
                    if value.is_empty() {
                        continue;
                    }
                    candidates.push(RawCandidate {
                        value: value.to_string(),
                        pattern_index: index,
                        position: (m.start(), m.end()),
                    });
                }
            }

            if !candidates.is_empty() {
                all.insert(*field, candidates);
            }
        }

        all
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_patterns_all_compile() {
        let set = PatternSet::default();
        for field in FieldKind::ALL {
            let expected = patterns::DEFAULT_SOURCES
                .iter()
                .find(|(kind, _)| *kind == field)
                .map(|(_, sources)| sources.len())
                .unwrap();
            assert_eq!(
                set.patterns_for(field).len(),
                expected,
                "field {} lost patterns at compile time",
                field.name()
            );
        }
    }

    #[test]
    fn test_malformed_pattern_is_skipped() {
        let sources: &[(FieldKind, &[&str])] = &[(
            FieldKind::Amount,
            &[r"total:\s{0,8}([0-9]{1,12})", r"([0-9]{1,3}", r"\$([0-9]{1,12})"],
        )];
        let set = PatternSet::from_sources(sources);
        // The broken middle pattern disappears, the other two survive
        assert_eq!(set.patterns_for(FieldKind::Amount).len(), 2);
    }

    #[test]
    fn test_extract_collects_all_matches() {
        let extractor = FieldExtractor::new();
        let candidates = extractor.extract("Subtotal: 40.00\nTotal: 45.99\nIVA: 5.99");

        let amounts = candidates.get(&FieldKind::Amount).unwrap();
        let values: Vec<&str> = amounts.iter().map(|c| c.value.as_str()).collect();
        assert!(values.contains(&"45.99"));
        assert!(values.contains(&"40.00"));

        let taxes = candidates.get(&FieldKind::Tax).unwrap();
        assert_eq!(taxes[0].value, "5.99");
    }

    #[test]
    fn test_extract_labeled_fields() {
        let extractor = FieldExtractor::new();
        let text = "Invoice #INV-2024-001\n\
                    Empresa: Electricidad del Caribe S.A.\n\
                    Concepto: Suministro de energia electrica\n\
                    NIT: 900123456-1";
        let candidates = extractor.extract(text);

        assert_eq!(
            candidates.get(&FieldKind::InvoiceNumber).unwrap()[0].value,
            "INV-2024-001"
        );
        assert_eq!(
            candidates.get(&FieldKind::Vendor).unwrap()[0].value,
            "Electricidad del Caribe S.A."
        );
        assert_eq!(
            candidates.get(&FieldKind::TaxId).unwrap()[0].value,
            "900123456-1"
        );
    }

    #[test]
    fn test_extract_empty_text_yields_nothing() {
        let extractor = FieldExtractor::new();
        assert!(extractor.extract("").is_empty());
    }
}
