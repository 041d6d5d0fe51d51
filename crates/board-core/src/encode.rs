//! HTML element-content encoding.
//!
//! [`encode`] is the only sanctioned boundary between untrusted text and
//! emitted markup. Anything that reaches the markup builder from a request
//! parameter or the comment log goes through here first.

/// HTML-encode a string for embedding inside element content.
///
/// Replaces `&`, `<`, `>`, `"` and `'` with character references; every
/// other character is copied unchanged. Total for any input. Not
/// idempotent: encoding twice yields `&amp;lt;` and friends.
pub fn encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut copied = 0;
    for (i, ch) in s.char_indices() {
        if let Some(reference) = reference_for(ch) {
            out.push_str(&s[copied..i]);
            out.push_str(reference);
            copied = i + ch.len_utf8();
        }
    }
    out.push_str(&s[copied..]);
    out
}

fn reference_for(ch: char) -> Option<&'static str> {
    Some(match ch {
        '&' => "&amp;",
        '<' => "&lt;",
        '>' => "&gt;",
        '"' => "&quot;",
        '\'' => "&#39;",
        _ => return None,
    })
}

/// Encode an optional value, treating `None` as the empty string.
pub fn encode_opt(s: Option<&str>) -> String {
    s.map(encode).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const REFERENCES: [&str; 5] = ["&amp;", "&lt;", "&gt;", "&quot;", "&#39;"];

    /// Every `&` in `s` must start one of the references `encode` emits.
    fn ampersands_are_references(s: &str) -> bool {
        s.match_indices('&')
            .all(|(i, _)| REFERENCES.iter().any(|r| s[i..].starts_with(r)))
    }

    #[test]
    fn encodes_all_five_significant_characters() {
        assert_eq!(encode(r#"&<>"'"#), "&amp;&lt;&gt;&quot;&#39;");
    }

    #[test]
    fn passes_other_characters_through() {
        let s = "plain text, ünïcödé ✓ 100% /path?x=1";
        assert_eq!(encode(s), s);
    }

    #[test]
    fn keeps_multibyte_text_around_references() {
        assert_eq!(encode("ü<ö>✓"), "ü&lt;ö&gt;✓");
        assert_eq!(encode("<<"), "&lt;&lt;");
        assert_eq!(encode("tail&"), "tail&amp;");
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert_eq!(encode(""), "");
        assert_eq!(encode_opt(None), "");
        assert_eq!(encode_opt(Some("<b>")), "&lt;b&gt;");
    }

    #[test]
    fn output_never_contains_raw_markup() {
        let samples = [
            "<script>alert(1)</script>",
            "<img src=x onerror=alert(1)>",
            "x' OR '1'='1",
            "\"><svg onload=alert(1)>",
            "&&&;;&amp;&lt",
            "a < b && c > d",
            "'''\"\"\"",
            "&#x3C;script&#x3E;",
        ];
        for s in samples {
            let out = encode(s);
            assert!(!out.contains('<'), "raw '<' in {out:?}");
            assert!(!out.contains('>'), "raw '>' in {out:?}");
            assert!(!out.contains('"'), "raw '\"' in {out:?}");
            assert!(!out.contains('\''), "raw '\\'' in {out:?}");
            assert!(ampersands_are_references(&out), "stray '&' in {out:?}");
        }
    }

    #[test]
    fn double_encoding_is_not_suppressed() {
        assert_eq!(encode(&encode("<")), "&amp;lt;");
    }
}
