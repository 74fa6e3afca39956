//! Core library for turning invoice emails into structured records.
//!
//! This crate provides:
//! - Content normalization (HTML stripping, charset decoding, structured input)
//! - Rule-based field extraction (amounts, dates, invoice numbers, tax data)
//! - Vendor resolution from sender headers
//! - Keyword categorization and confidence scoring
//!
//! Everything here is pure and in-memory: no network access, no
//! persistence, no I/O. Mail retrieval and filing live in separate
//! collaborators that exchange [`SourceContent`], [`EmailContext`] and
//! [`InvoiceRecord`] values with this core. The pipeline holds no mutable
//! state, so a single instance can be shared across threads.

pub mod content;
pub mod error;
pub mod invoice;
pub mod models;

pub use content::ContentNormalizer;
pub use error::{ExtractionError, Result};
pub use invoice::rules::{FieldExtractor, FieldKind, PatternSet, RawCandidate};
pub use invoice::{
    Categorizer, ConfidenceScorer, ConfidenceWeights, ExtractionPipeline, VendorResolver,
};
pub use models::{
    Attachment, Category, EmailContext, InvoiceRecord, Language, MediaType, PaymentMethod,
    SourceContent,
};
