//! Invoice extraction: pipeline, vendor resolution, categorization and
//! confidence scoring.

pub mod categorize;
pub mod confidence;
pub mod pipeline;
pub mod rules;
pub mod vendor;

pub use categorize::Categorizer;
pub use confidence::{ConfidenceScorer, ConfidenceWeights};
pub use pipeline::ExtractionPipeline;
pub use vendor::VendorResolver;
