//! Han ideograph detection for model replies.
//!
//! Replies are expected in Hangul or Latin script only. Any character from the
//! CJK Unified Ideographs block or its Extension A is replaced with a
//! placeholder so the caller can show both the warning and the cleaned text.

use std::borrow::Cow;

/// Glyph substituted for each disallowed character.
pub const PLACEHOLDER: char = '?';

/// Result of scanning a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptScan<'a> {
    pub text: Cow<'a, str>,
    pub flagged: bool,
    /// Unique offending characters, in first-seen order.
    pub offending: Vec<char>,
}

#[must_use]
pub fn is_disallowed(c: char) -> bool {
    matches!(c, '\u{4E00}'..='\u{9FFF}' | '\u{3400}'..='\u{4DBF}')
}

/// Scan `text`, replacing every disallowed character.
///
/// Clean text is returned borrowed.
#[must_use]
pub fn scan(text: &str) -> ScriptScan<'_> {
    if !text.chars().any(is_disallowed) {
        return ScriptScan {
            text: Cow::Borrowed(text),
            flagged: false,
            offending: Vec::new(),
        };
    }

    let mut offending = Vec::new();
    let filtered = text
        .chars()
        .map(|c| {
            if is_disallowed(c) {
                if !offending.contains(&c) {
                    offending.push(c);
                }
                PLACEHOLDER
            } else {
                c
            }
        })
        .collect();

    ScriptScan {
        text: Cow::Owned(filtered),
        flagged: true,
        offending,
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::{is_disallowed, scan};

    #[test]
    fn clean_text_is_borrowed() {
        let scanned = scan("Hello, 안녕하세요!");
        assert!(!scanned.flagged);
        assert!(matches!(scanned.text, Cow::Borrowed(_)));
        assert!(scanned.offending.is_empty());
    }

    #[test]
    fn replaces_han_and_keeps_hangul() {
        let scanned = scan("안녕하세요 你好");
        assert!(scanned.flagged);
        assert_eq!(scanned.text, "안녕하세요 ??");
        assert_eq!(scanned.offending, vec!['你', '好']);
    }

    #[test]
    fn offending_is_deduplicated() {
        let scanned = scan("好好好");
        assert_eq!(scanned.text, "???");
        assert_eq!(scanned.offending, vec!['好']);
    }

    #[test]
    fn range_edges() {
        assert!(is_disallowed('\u{4E00}'));
        assert!(is_disallowed('\u{9FFF}'));
        assert!(is_disallowed('\u{3400}'));
        assert!(is_disallowed('\u{4DBF}'));
        assert!(!is_disallowed('\u{3399}'));
        assert!(!is_disallowed('\u{A000}'));
        // Hiragana and Hangul are allowed through.
        assert!(!is_disallowed('あ'));
        assert!(!is_disallowed('한'));
    }
}
