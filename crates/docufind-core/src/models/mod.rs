//! Data models for extraction inputs and outputs.

pub mod content;
pub mod record;

pub use content::{Attachment, EmailContext, MediaType, SourceContent};
pub use record::{Category, InvoiceRecord, Language, PaymentMethod, UNKNOWN_VENDOR};
