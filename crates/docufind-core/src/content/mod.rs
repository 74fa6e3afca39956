//! Content normalization: raw text, HTML and byte payloads into clean plain text.

pub mod html;

use encoding_rs::Encoding;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, warn};

use crate::error::ExtractionError;
use crate::models::{MediaType, SourceContent};

/// Marker appended when normalized text hits the length cap.
pub const TRUNCATION_MARKER: &str = "... [contenido truncado]";

/// Default cap on normalized text length, in characters.
const DEFAULT_MAX_LEN: usize = 10_000;

lazy_static! {
    static ref HSPACE: Regex = Regex::new(r"[ \t\u{a0}]{2,}").unwrap();
}

/// Turns raw content into clean plain text.
///
/// Never fails: malformed markup, broken charsets and binary noise all
/// degrade to best-effort text. Opaque content yields `None` and is left
/// untouched for the filing layer.
#[derive(Debug, Clone)]
pub struct ContentNormalizer {
    max_len: usize,
}

impl ContentNormalizer {
    pub fn new() -> Self {
        Self {
            max_len: DEFAULT_MAX_LEN,
        }
    }

    /// Override the output length cap.
    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }

    /// Normalize any content variant. `None` means the content is opaque.
    pub fn normalize(&self, content: &SourceContent) -> Option<String> {
        match content {
            SourceContent::Text { body, media_type } => self.normalize_text(body, *media_type),
            SourceContent::Bytes {
                data,
                media_type,
                charset,
            } => self.normalize_bytes(data, *media_type, charset.as_deref()),
            SourceContent::Structured { fields } => Some(self.normalize_structured(fields)),
        }
    }

    /// Normalize already-decoded text.
    pub fn normalize_text(&self, raw: &str, media_type: MediaType) -> Option<String> {
        match media_type {
            MediaType::Opaque => None,
            MediaType::Html => Some(self.clean(&html::strip_html(raw))),
            MediaType::Plain => Some(self.clean(raw)),
        }
    }

    /// Decode raw bytes, then normalize as text.
    ///
    /// The declared charset label wins when it resolves; otherwise the
    /// encoding is sniffed from the payload.
    pub fn normalize_bytes(
        &self,
        data: &[u8],
        media_type: MediaType,
        charset: Option<&str>,
    ) -> Option<String> {
        if !media_type.is_text_like() {
            return None;
        }

        let encoding = charset
            .and_then(|label| Encoding::for_label(label.trim().as_bytes()))
            .unwrap_or_else(|| {
                let mut detector = chardetng::EncodingDetector::new();
                detector.feed(&data[..data.len().min(8192)], data.len() <= 8192);
                detector.guess(None, true)
            });

        let (decoded, actual, had_errors) = encoding.decode(data);
        if had_errors {
            warn!(
                "{}",
                ExtractionError::NormalizationDegraded(format!(
                    "lossy {} decode of {} bytes",
                    actual.name(),
                    data.len()
                ))
            );
        }

        self.normalize_text(&decoded, media_type)
    }

    /// Render structured fields as `name: value` lines, then clean.
    pub fn normalize_structured(&self, fields: &[(String, String)]) -> String {
        let joined = fields
            .iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect::<Vec<_>>()
            .join("\n");
        self.clean(&joined)
    }

    /// Shared cleanup: printable characters only, collapsed whitespace,
    /// capped length.
    fn clean(&self, text: &str) -> String {
        let printable: String = text
            .chars()
            .filter(|c| !c.is_control() || matches!(c, '\n' | '\t'))
            .collect();

        let collapsed = collapse_whitespace(&printable);
        self.truncate(collapsed)
    }

    fn truncate(&self, text: String) -> String {
        if text.chars().count() <= self.max_len {
            return text;
        }
        debug!("truncating normalized text to {} characters", self.max_len);
        let mut truncated: String = text.chars().take(self.max_len).collect();
        truncated.push_str(TRUNCATION_MARKER);
        truncated
    }
}

impl Default for ContentNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Collapse runs of horizontal whitespace and blank lines.
fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut blank_run = 0usize;

    for line in text.replace('\r', "\n").lines() {
        let line = HSPACE.replace_all(line.trim(), " ");
        if line.is_empty() {
            blank_run += 1;
            // At most one blank line survives between paragraphs
            if blank_run > 1 || out.is_empty() {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push_str(&line);
        out.push('\n');
    }

    out.trim_end().to_string()
}
