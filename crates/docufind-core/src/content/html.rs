//! Best-effort HTML to plain text conversion.
//!
//! Invoice emails arrive with wildly malformed markup; everything here is
//! tolerant of unbalanced tags and simply strips what it can recognize.

use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};

/// The bounded-repetition blocks below compile to automata larger than
/// regex's default 10 MB size limit, so build them with a raised ceiling.
const LARGE_REGEX_SIZE_LIMIT: usize = 64 * 1024 * 1024;

fn large_regex(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .size_limit(LARGE_REGEX_SIZE_LIMIT)
        .build()
        .unwrap()
}

lazy_static! {
    static ref SCRIPT_BLOCK: Regex =
        large_regex(r"(?is)<script\b[^>]{0,500}>.{0,60000}?</script[^>]{0,100}>");
    static ref STYLE_BLOCK: Regex =
        large_regex(r"(?is)<style\b[^>]{0,500}>.{0,60000}?</style[^>]{0,100}>");
    static ref HTML_COMMENT: Regex = large_regex(r"(?s)<!--.{0,20000}?-->");
    static ref BLOCK_BREAK: Regex = Regex::new(
        r"(?i)</(?:p|div|h[1-6]|li|tr|ul|ol|table|blockquote)\s{0,10}>|<br\s{0,10}/?\s{0,10}>"
    )
    .unwrap();
    static ref ANY_TAG: Regex = Regex::new(r"<[^>]{0,1000}>").unwrap();
}

/// HTML entities worth decoding in invoice bodies.
const ENTITIES: [(&str, &str); 13] = [
    ("&nbsp;", " "),
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&apos;", "'"),
    ("&ndash;", "-"),
    ("&mdash;", "-"),
    ("&hellip;", "..."),
    ("&copy;", "\u{a9}"),
    ("&reg;", "\u{ae}"),
    ("&trade;", "\u{2122}"),
];

/// Strip markup from an HTML fragment, keeping line structure.
///
/// Script and style blocks disappear wholesale, closing block tags become
/// newlines, every remaining tag becomes a space, then common entities are
/// decoded. Malformed markup degrades to whatever text survives stripping.
pub fn strip_html(html: &str) -> String {
    let text = SCRIPT_BLOCK.replace_all(html, " ");
    let text = STYLE_BLOCK.replace_all(&text, " ");
    let text = HTML_COMMENT.replace_all(&text, " ");
    let text = BLOCK_BREAK.replace_all(&text, "\n");
    let text = ANY_TAG.replace_all(&text, " ");
    decode_entities(&text)
}

fn decode_entities(text: &str) -> String {
    let mut decoded = text.to_string();
    for (entity, replacement) in ENTITIES {
        if decoded.contains(entity) {
            decoded = decoded.replace(entity, replacement);
        }
    }
    decoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_removes_script_and_style() {
        let html = "<script>alert(1)</script><style>body{color:red}</style><p>Hola</p>";
        let text = strip_html(html);
        assert!(text.contains("Hola"));
        assert!(!text.contains("alert"));
        assert!(!text.contains("color"));
    }

    #[test]
    fn test_block_tags_become_newlines() {
        let text = strip_html("<div>Total: 100</div><p>IVA: 19</p>Gracias<br>Saludos");
        assert!(text.contains("Total: 100\n"));
        assert!(text.contains("IVA: 19\n"));
        assert!(text.contains("Gracias\nSaludos"));
    }

    #[test]
    fn test_entities_are_decoded() {
        let text = strip_html("Tom&nbsp;&amp;&nbsp;Jerry &lt;SA&gt; &quot;Ltda&quot; &#39;ok&#39;");
        assert!(text.contains("Tom & Jerry"));
        assert!(text.contains("<SA>"));
        assert!(text.contains("\"Ltda\""));
        assert!(text.contains("'ok'"));
    }

    #[test]
    fn test_malformed_markup_degrades_gracefully() {
        let text = strip_html("<div <p>Importe: 45,99 <span>euros");
        assert!(text.contains("Importe: 45,99"));
        assert!(text.contains("euros"));
    }

    #[test]
    fn test_unterminated_script_keeps_going() {
        // No closing tag: the block regex gives up, the tag stripper still runs.
        let text = strip_html("<script>var x = 1; Total: 99</p>");
        assert!(!text.contains("<script>"));
    }
}
