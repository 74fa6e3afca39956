//! Input models handed to the extraction pipeline by the mail-retrieval layer.

use serde::{Deserialize, Serialize};

/// Declared shape of a content source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    /// Plain text (text/plain, .txt, .csv).
    Plain,
    /// HTML markup (text/html).
    Html,
    /// Anything the core does not look inside (PDF, Word, XML, images).
    Opaque,
}

impl MediaType {
    /// Classify a declared content type plus filename.
    ///
    /// PDF, Word and XML attachments are deliberately opaque: their bytes
    /// travel through the system unexamined.
    pub fn from_declared(content_type: &str, filename: &str) -> Self {
        let ct = content_type.trim().to_ascii_lowercase();
        let name = filename.trim().to_ascii_lowercase();

        if ct.starts_with("text/html") || name.ends_with(".html") || name.ends_with(".htm") {
            return MediaType::Html;
        }
        if ct.starts_with("text/") || name.ends_with(".txt") || name.ends_with(".csv") {
            return MediaType::Plain;
        }
        MediaType::Opaque
    }

    pub fn is_text_like(self) -> bool {
        !matches!(self, MediaType::Opaque)
    }
}

/// A single unit of raw input content.
///
/// Mail pipelines hand over a mix of decoded text, raw byte payloads and
/// loosely structured data; each shape gets its own variant and its own
/// normalization entry point instead of being guessed at downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceContent {
    /// Already-decoded text with a declared media type.
    Text { body: String, media_type: MediaType },

    /// Raw bytes with an optional charset hint from the transport layer.
    Bytes {
        data: Vec<u8>,
        media_type: MediaType,
        charset: Option<String>,
    },

    /// Structured content with named fields.
    Structured { fields: Vec<(String, String)> },
}

impl SourceContent {
    /// Plain-text content.
    pub fn plain(body: impl Into<String>) -> Self {
        SourceContent::Text {
            body: body.into(),
            media_type: MediaType::Plain,
        }
    }

    /// HTML content.
    pub fn html(body: impl Into<String>) -> Self {
        SourceContent::Text {
            body: body.into(),
            media_type: MediaType::Html,
        }
    }
}

/// An email attachment as delivered by the retrieval collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    /// Original filename.
    pub filename: String,

    /// Attachment payload.
    pub content: SourceContent,
}

/// Envelope metadata for the email being processed.
///
/// Owned by the caller; the core reads it and never retains it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmailContext {
    /// Raw sender header, e.g. `"Acme Corp" <billing@acme.com>`.
    pub sender: String,

    /// Subject line.
    pub subject: String,

    /// Date string as it appeared on the message.
    pub date: String,

    /// Plain-text body, when the retrieval layer already decoded one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_from_declared() {
        assert_eq!(
            MediaType::from_declared("text/html; charset=utf-8", "body.html"),
            MediaType::Html
        );
        assert_eq!(
            MediaType::from_declared("text/plain", "nota.txt"),
            MediaType::Plain
        );
        assert_eq!(
            MediaType::from_declared("", "listado.csv"),
            MediaType::Plain
        );
        assert_eq!(
            MediaType::from_declared("application/pdf", "factura.pdf"),
            MediaType::Opaque
        );
        assert_eq!(
            MediaType::from_declared(
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
                "contrato.docx"
            ),
            MediaType::Opaque
        );
        assert_eq!(
            MediaType::from_declared("application/xml", "cfdi.xml"),
            MediaType::Opaque
        );
    }

    #[test]
    fn test_opaque_is_not_text_like() {
        assert!(MediaType::Plain.is_text_like());
        assert!(MediaType::Html.is_text_like());
        assert!(!MediaType::Opaque.is_text_like());
    }
}
