//! Line-oriented markup formatter.
//!
//! Contract:
//! - Whitespace between a `>` and the next `<` is dropped and every `><` boundary
//!   becomes a line break. Existing line breaks are kept; lines are trimmed and
//!   blank lines removed.
//! - Indentation is a running depth over the previous lines: +1 per opening tag
//!   that is not self-closing, -1 per self-closing tag, -1 per closing tag. A line
//!   that starts with `</` is outdented one extra level. Depth never renders below 0.
//! - Tag names are never matched against each other. Void elements written without
//!   a slash (`<br>`) count as opening tags.
//! - Output is a fixed point: formatting it again returns it unchanged.
//!
//! - A stray `<` with no closing `>` is plain text: it never counts as a tag.
//!
//! [`format_markup`] is total and never fails.

use memchr::memchr;

const INDENT: &str = "  ";

pub fn format_markup(input: &str) -> String {
    if input.trim().is_empty() {
        return input.to_string();
    }

    let lines = tag_lines(input);
    let mut out = String::with_capacity(input.len() + lines.len() * INDENT.len());
    let mut depth: i64 = 0;
    for (index, line) in lines.iter().enumerate() {
        let mut indent = depth;
        if line.starts_with("</") {
            indent = (indent - 1).max(0);
        }
        if index > 0 {
            out.push('\n');
        }
        for _ in 0..indent.max(0) {
            out.push_str(INDENT);
        }
        out.push_str(line);
        depth += line_delta(line);
    }
    log::trace!(target: "codepanel.format", "formatted {} markup lines", lines.len());
    out
}

/// Split into trimmed, non-empty lines, breaking at every `>`…`<` gap.
fn tag_lines(input: &str) -> Vec<&str> {
    let bytes = input.as_bytes();
    let mut lines = Vec::new();
    let mut piece_start = 0;
    let mut i = 0;
    while let Some(rel) = memchr(b'>', &bytes[i..]) {
        let gt = i + rel;
        let rest = &input[gt + 1..];
        let gap = rest.len() - rest.trim_start().len();
        i = gt + 1;
        if rest[gap..].starts_with('<') {
            push_lines(&input[piece_start..=gt], &mut lines);
            piece_start = gt + 1 + gap;
            i = piece_start;
        }
    }
    push_lines(&input[piece_start..], &mut lines);
    lines
}

fn push_lines<'a>(piece: &'a str, lines: &mut Vec<&'a str>) {
    lines.extend(piece.split('\n').map(str::trim).filter(|l| !l.is_empty()));
}

fn line_delta(line: &str) -> i64 {
    count_opening(line) - count_self_closing(line) - count_closing(line)
}

/// `<` + a char other than `/` or `!`, up to the first `>`, not ending in `/` plus
/// optional whitespace.
fn count_opening(line: &str) -> i64 {
    let b = line.as_bytes();
    let mut count = 0;
    let mut i = 0;
    while let Some(rel) = memchr(b'<', &b[i..]) {
        let lt = i + rel;
        let Some(&next) = b.get(lt + 1) else {
            break;
        };
        if next != b'/' && next != b'!' {
            if let Some(rel_gt) = memchr(b'>', &b[lt + 2..]) {
                let gt = lt + 2 + rel_gt;
                if !line[lt + 1..gt].trim_end().ends_with('/') {
                    count += 1;
                    i = gt + 1;
                    continue;
                }
            }
        }
        i = lt + 1;
    }
    count
}

/// `</` up to the next `>`.
fn count_closing(line: &str) -> i64 {
    let b = line.as_bytes();
    let mut count = 0;
    let mut i = 0;
    while let Some(rel) = memchr(b'<', &b[i..]) {
        let lt = i + rel;
        if b.get(lt + 1) == Some(&b'/') {
            let Some(rel_gt) = memchr(b'>', &b[lt + 2..]) else {
                break;
            };
            count += 1;
            i = lt + 2 + rel_gt + 1;
            continue;
        }
        i = lt + 1;
    }
    count
}

/// `<` up to the first `>`, where that `>` directly follows a `/`.
fn count_self_closing(line: &str) -> i64 {
    let b = line.as_bytes();
    let mut count = 0;
    let mut i = 0;
    while let Some(rel) = memchr(b'<', &b[i..]) {
        let lt = i + rel;
        let Some(rel_gt) = memchr(b'>', &b[lt + 1..]) else {
            break;
        };
        let gt = lt + 1 + rel_gt;
        if gt > lt + 1 && b[gt - 1] == b'/' {
            count += 1;
            i = gt + 1;
            continue;
        }
        i = lt + 1;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nests_children_and_outdents_closing_tags() {
        let out = format_markup("<div><p>a</p><section><span>b</span></section></div>");
        assert_eq!(
            out,
            "<div>\n  <p>a</p>\n  <section>\n    <span>b</span>\n  </section>\n</div>"
        );
    }

    #[test]
    fn collapses_whitespace_between_tags_only() {
        let out = format_markup("<ul>\n\n   <li> one  two </li>   <li>three</li>\n</ul>");
        assert_eq!(out, "<ul>\n  <li> one  two </li>\n  <li>three</li>\n</ul>");
    }

    #[test]
    fn self_closing_tags_decrement_depth() {
        let out = format_markup("<div><br/><p>x</p></div>");
        assert_eq!(out, "<div>\n  <br/>\n<p>x</p>\n</div>");
    }

    #[test]
    fn comments_and_doctype_do_not_indent() {
        let out = format_markup("<!DOCTYPE html><!-- note --><main>x</main>");
        assert_eq!(out, "<!DOCTYPE html>\n<!-- note -->\n<main>x</main>");
    }

    #[test]
    fn depth_never_renders_negative() {
        let out = format_markup("</a></b><c>x</c>");
        assert_eq!(out, "</a>\n</b>\n<c>x</c>");
    }

    #[test]
    fn multi_line_text_keeps_its_lines() {
        let out = format_markup("<p>first\n   second</p>");
        assert_eq!(out, "<p>first\n  second</p>");
    }

    #[test]
    fn whitespace_only_input_is_returned_unchanged() {
        assert_eq!(format_markup(""), "");
        assert_eq!(format_markup("  \n\t"), "  \n\t");
    }

    #[test]
    fn stray_open_bracket_is_text() {
        assert_eq!(
            format_markup("<div><p>x</p></div> a < b"),
            "<div>\n  <p>x</p>\n</div> a < b"
        );
        assert_eq!(format_markup("<div><p class=\"x\""), "<div>\n  <p class=\"x\"");
        assert_eq!(format_markup("<div>x</div><"), "<div>x</div>\n<");
    }

    #[test]
    fn tag_counters_follow_the_heuristic() {
        assert_eq!(count_opening("<div class=\"a\"><p>"), 2);
        assert_eq!(count_opening("<br/><img src=x / ><!-- c --></p>"), 0);
        assert_eq!(count_self_closing("<br/><img src=x /><p>"), 2);
        assert_eq!(count_closing("<p>a</p></div>"), 2);
        assert_eq!(line_delta("<p>a</p>"), 0);
    }

    #[test]
    fn formatting_is_idempotent() {
        let cases = [
            "<div><p>a</p><section><span>b</span></section></div>",
            "<div><br/><p>x</p></div>",
            "<ul>\n <li>a</li>\n\n <li>b</li></ul> tail <b>x</b>",
            "<p>first\n   second</p>",
            "text only",
            "<img src=a.png><input disabled><div>x</div>",
            "<!-- c --><div\nclass=\"a\">x</div>",
            "<a>x</a>\r\n<b>y</b>",
            "<<>>",
            "< >< / >",
            "<div><p>x</p></div> a < b",
            "<ul><li>1 < 2",
        ];
        for case in cases {
            let once = format_markup(case);
            let twice = format_markup(&once);
            assert_eq!(once, twice, "not idempotent for {case:?}");
        }
    }
}
