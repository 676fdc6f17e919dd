//! Shared helpers for formatter golden tests.

pub mod golden;

pub use golden::{GOLDEN_FORMAT_V1, GoldenCase, assert_golden, load_golden_cases};

/// Render control characters visibly so diffs of whitespace-sensitive output stay readable.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ch if ch < ' ' && ch != '\n' => {
                use std::fmt::Write;
                let _ = write!(&mut out, "\\u{{{:02X}}}", ch as u32);
            }
            // Trailing spaces are easy to miss in a failure report.
            ' ' => out.push('·'),
            _ => out.push(ch),
        }
    }
    out
}

pub fn diff_lines(expected: &str, actual: &str) -> String {
    let expected: Vec<String> = expected.split('\n').map(escape_text).collect();
    let actual: Vec<String> = actual.split('\n').map(escape_text).collect();
    let max = expected.len().max(actual.len());
    let missing = "<missing>";
    let mut out = String::new();
    use std::fmt::Write;

    let mismatch = (0..max).find(|&i| expected.get(i) != actual.get(i));
    if let Some(i) = mismatch {
        let start = i.saturating_sub(2);
        let end = (i + 3).min(max);
        let _ = writeln!(
            &mut out,
            "first mismatch at line {} (showing {}..={}):",
            i + 1,
            start + 1,
            end
        );
        for line_idx in start..end {
            let left = expected
                .get(line_idx)
                .map(String::as_str)
                .unwrap_or(missing);
            let right = actual.get(line_idx).map(String::as_str).unwrap_or(missing);
            let marker = if line_idx == i { ">" } else { " " };
            let _ = writeln!(&mut out, "{marker} {:>4}  expected: {left}", line_idx + 1);
            let _ = writeln!(&mut out, "{marker} {:>4}    actual: {right}", line_idx + 1);
        }
    }
    let _ = writeln!(
        &mut out,
        "expected {} lines, actual {} lines",
        expected.len(),
        actual.len()
    );
    out
}
