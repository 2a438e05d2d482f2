//! XML text escaping for user-supplied strings.
//!
//! Credentials are embedded as element text in the request envelope, so they
//! must be entity-escaped, and characters the XML 1.0 grammar forbids
//! entirely (most C0 controls, non-characters) have no escaped form at all
//! and must be rejected.

use crate::error::Error;
use quick_xml::escape::escape;

/// True when `c` is allowed by the XML 1.0 `Char` production.
fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\u{9}' | '\u{A}' | '\u{D}'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

/// Escape a string for embedding as XML element text.
///
/// Fails if the input contains a character that cannot appear in an XML 1.0
/// document in any form.
pub fn escape_text(s: &str) -> Result<String, Error> {
    if let Some(c) = s.chars().find(|c| !is_xml_char(*c)) {
        return Err(Error::Escaping(format!(
            "character U+{:04X} cannot appear in XML text",
            c as u32
        )));
    }
    Ok(escape(s).into_owned())
}

/// Escape a batch of strings atomically.
///
/// Either every string escapes or the whole batch fails; no partial output
/// is ever produced.
pub fn escape_all(inputs: &[&str]) -> Result<Vec<String>, Error> {
    inputs.iter().map(|s| escape_text(s)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quick_xml::events::Event;
    use quick_xml::Reader;

    /// Parse `<t>{escaped}</t>` and return the unescaped text content.
    fn roundtrip(escaped: &str) -> String {
        let doc = format!("<t>{escaped}</t>");
        let mut reader = Reader::from_str(&doc);
        let mut text = String::new();
        loop {
            match reader.read_event().unwrap() {
                Event::Text(e) => text.push_str(&e.unescape().unwrap()),
                Event::Eof => break,
                _ => {}
            }
        }
        text
    }

    #[test]
    fn test_escapes_markup_characters() {
        assert_eq!(escape_text("a&b").unwrap(), "a&amp;b");
        assert_eq!(escape_text("<tag>").unwrap(), "&lt;tag&gt;");
        assert_eq!(escape_text("plain").unwrap(), "plain");
    }

    #[test]
    fn test_roundtrip_through_document() {
        for original in ["a&b", "<Child Name=\"A\"/>", "1 < 2 && 3 > 2", "ünïcøde ✓"] {
            let escaped = escape_text(original).unwrap();
            assert_eq!(roundtrip(&escaped), original);
        }
    }

    #[test]
    fn test_tab_and_newlines_allowed() {
        assert!(escape_text("a\tb\nc\rd").is_ok());
    }

    #[test]
    fn test_forbidden_control_characters_rejected() {
        for bad in ["nul\u{0}", "bell\u{7}", "esc\u{1B}"] {
            let err = escape_text(bad).unwrap_err();
            assert!(matches!(err, Error::Escaping(_)), "expected Escaping error for {bad:?}");
        }
    }

    #[test]
    fn test_noncharacters_rejected() {
        assert!(escape_text("x\u{FFFF}").is_err());
        assert!(escape_text("x\u{FFFE}").is_err());
    }

    #[test]
    fn test_batch_is_atomic() {
        let err = escape_all(&["fine", "broken\u{1}", "also fine"]).unwrap_err();
        assert!(matches!(err, Error::Escaping(_)));

        let ok = escape_all(&["a&b", "c<d"]).unwrap();
        assert_eq!(ok, vec!["a&amp;b".to_string(), "c&lt;d".to_string()]);
    }
}
