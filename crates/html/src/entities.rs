//! Entity decoding for parsed markup and escaping for serialized markup.
//!
//! Decoding covers a deliberately small set: `&amp;`, `&lt;`, `&gt;`, `&quot;`,
//! `&apos;`, `&#39;`, `&nbsp;`, plus well-formed, semicolon-terminated decimal
//! and hex numeric references. Anything else passes through untouched.

const MAX_HEX_DIGITS: usize = 6; // 0x10FFFF
const MAX_DEC_DIGITS: usize = 7; // 1114111

pub(crate) fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        match decode_one(rest) {
            Some((ch, consumed)) => {
                out.push(ch);
                rest = &rest[consumed..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

// `s` starts with '&'. Returns the decoded char and the byte length consumed.
fn decode_one(s: &str) -> Option<(char, usize)> {
    const NAMED: &[(&str, char)] = &[
        ("&amp;", '&'),
        ("&lt;", '<'),
        ("&gt;", '>'),
        ("&quot;", '"'),
        ("&apos;", '\''),
        ("&nbsp;", '\u{00A0}'),
    ];
    for (name, ch) in NAMED {
        if s.starts_with(name) {
            return Some((*ch, name.len()));
        }
    }

    let numeric = s.strip_prefix("&#")?;
    let (digits_start, radix, max_digits) = match numeric.as_bytes().first() {
        Some(b'x') | Some(b'X') => (3, 16, MAX_HEX_DIGITS),
        _ => (2, 10, MAX_DEC_DIGITS),
    };
    let body = &s[digits_start..];
    let semi = body.find(';')?;
    let digits = &body[..semi];
    if digits.is_empty() || digits.len() > max_digits {
        return None;
    }
    if !digits.bytes().all(|b| (b as char).is_digit(radix)) {
        return None;
    }
    let value = u32::from_str_radix(digits, radix).ok()?;
    let ch = char::from_u32(value)?;
    Some((ch, digits_start + semi + 1))
}

/// Escape character data for serialization outside raw-text elements.
pub fn escape_text(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

/// Escape a double-quoted attribute value.
pub fn escape_attr(value: &str, out: &mut String) {
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_entities_decodes_common_entities() {
        assert_eq!(decode_entities("a &amp; b &lt;c&gt;"), "a & b <c>");
        assert_eq!(decode_entities("&quot;x&apos;"), "\"x'");
    }

    #[test]
    fn decode_entities_decodes_numeric_entities() {
        assert_eq!(decode_entities("&#65;&#x42;&#X43;"), "ABC");
        assert_eq!(decode_entities("&#39;"), "'");
    }

    #[test]
    fn decode_entities_passes_through_unknown_and_malformed() {
        assert_eq!(decode_entities("&copy; &amp"), "&copy; &amp");
        assert_eq!(decode_entities("&#xZZ; &#; &#12345678;"), "&#xZZ; &#; &#12345678;");
        assert_eq!(decode_entities("&#xD800;"), "&#xD800;");
    }

    #[test]
    fn decode_entities_preserves_utf8() {
        assert_eq!(decode_entities("café &amp; 😊"), "café & 😊");
    }

    #[test]
    fn escaping_targets_only_significant_characters() {
        let mut out = String::new();
        escape_text("a<b & \"c\"", &mut out);
        assert_eq!(out, "a&lt;b &amp; \"c\"");

        let mut out = String::new();
        escape_attr("say \"hi\" & <go>", &mut out);
        assert_eq!(out, "say &quot;hi&quot; &amp; <go>");
    }
}
