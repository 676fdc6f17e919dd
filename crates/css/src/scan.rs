//! Byte-level helpers shared by the rule parser and the style formatter.

use memchr::{memchr2, memmem};

/// Index just past the closing quote of the string opening at `start`, or `None`
/// if the string runs to the end of input. Backslash escapes are honored.
pub(crate) fn skip_string(bytes: &[u8], start: usize) -> Option<usize> {
    let quote = bytes[start];
    let mut i = start + 1;
    while let Some(rel) = memchr2(quote, b'\\', &bytes[i..]) {
        let at = i + rel;
        if bytes[at] == b'\\' {
            i = at + 2;
            if i > bytes.len() {
                return None;
            }
            continue;
        }
        return Some(at + 1);
    }
    None
}

/// Index just past the `*/` closing the comment opening at `start`.
pub(crate) fn skip_comment(bytes: &[u8], start: usize) -> Option<usize> {
    memmem::find(&bytes[start + 2..], b"*/").map(|rel| start + 2 + rel + 2)
}

pub(crate) fn starts_comment(bytes: &[u8], i: usize) -> bool {
    bytes[i] == b'/' && bytes.get(i + 1) == Some(&b'*')
}

/// Remove comments outside strings. An unterminated comment swallows the rest.
pub(crate) fn strip_comments(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = String::with_capacity(input.len());
    let mut copied = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'"' | b'\'' => {
                i = skip_string(bytes, i).unwrap_or(bytes.len());
            }
            _ if starts_comment(bytes, i) => {
                out.push_str(&input[copied..i]);
                i = skip_comment(bytes, i).unwrap_or(bytes.len());
                copied = i;
                // Keep tokens on either side of the comment apart.
                out.push(' ');
            }
            _ => i += 1,
        }
    }
    out.push_str(&input[copied..]);
    out
}
