//! Brace/semicolon reflow for stylesheet text.
//!
//! The input is scanned into text runs and the punctuation `{`, `;`, `}`. Runs of
//! whitespace collapse to one space and runs are trimmed; quoted strings and
//! comments pass through untouched. The tokens are then joined with canonical
//! separators, so the output of one pass scans to the same tokens and the second
//! pass reproduces it exactly.

use crate::scan::{skip_comment, skip_string, starts_comment};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StyleFormatError {
    UnterminatedComment { offset: usize },
    UnterminatedString { offset: usize },
}

impl fmt::Display for StyleFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleFormatError::UnterminatedComment { offset } => {
                write!(f, "unterminated comment at byte {offset}")
            }
            StyleFormatError::UnterminatedString { offset } => {
                write!(f, "unterminated string at byte {offset}")
            }
        }
    }
}

impl std::error::Error for StyleFormatError {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Punct {
    Open,
    Semi,
    Close,
}

#[derive(Debug, PartialEq, Eq)]
enum StyleToken<'a> {
    Text(String),
    Punct(Punct, &'a str),
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Prev {
    None,
    Text,
    Punct(Punct),
}

/// Format stylesheet text, falling back to the input unchanged on failure.
pub fn format_style(input: &str) -> String {
    match try_format_style(input) {
        Ok(formatted) => formatted,
        Err(err) => {
            log::warn!(target: "codepanel.format", "style left unformatted: {err}");
            input.to_string()
        }
    }
}

pub fn try_format_style(input: &str) -> Result<String, StyleFormatError> {
    if input.trim().is_empty() {
        return Ok(input.to_string());
    }
    let tokens = scan(input)?;
    let mut out = String::with_capacity(input.len() + input.len() / 4);
    let mut prev = Prev::None;
    for token in &tokens {
        match token {
            StyleToken::Text(text) => {
                out.push_str(separator(prev, None));
                out.push_str(text);
                prev = Prev::Text;
            }
            StyleToken::Punct(punct, raw) => {
                out.push_str(separator(prev, Some(*punct)));
                out.push_str(raw);
                prev = Prev::Punct(*punct);
            }
        }
    }
    Ok(out)
}

/// Whitespace placed before a token (`None` is a text run) given the previous one.
fn separator(prev: Prev, next: Option<Punct>) -> &'static str {
    match (prev, next) {
        (Prev::None, _) => "",
        (Prev::Punct(Punct::Close), _) => "\n\n",
        (_, Some(Punct::Close)) => "\n",
        (Prev::Text, Some(Punct::Open)) => " ",
        (Prev::Text, _) => "",
        (Prev::Punct(_), _) => "\n  ",
    }
}

fn scan(input: &str) -> Result<Vec<StyleToken<'_>>, StyleFormatError> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut run = String::new();
    let mut i = 0;
    let mut copied = 0;
    let mut pending_space = false;

    // Text between `copied` and `i` is plain (no strings, comments or punctuation).
    fn flush_plain(run: &mut String, plain: &str, pending_space: &mut bool) {
        for ch in plain.chars() {
            if ch.is_whitespace() {
                *pending_space = !run.is_empty();
            } else {
                if *pending_space {
                    run.push(' ');
                    *pending_space = false;
                }
                run.push(ch);
            }
        }
    }

    fn end_run<'a>(run: &mut String, tokens: &mut Vec<StyleToken<'a>>, pending_space: &mut bool) {
        *pending_space = false;
        if !run.is_empty() {
            tokens.push(StyleToken::Text(std::mem::take(run)));
        }
    }

    while i < bytes.len() {
        let b = bytes[i];
        if b == b'"' || b == b'\'' {
            flush_plain(&mut run, &input[copied..i], &mut pending_space);
            let end = skip_string(bytes, i)
                .ok_or(StyleFormatError::UnterminatedString { offset: i })?;
            push_opaque(&mut run, &input[i..end], &mut pending_space);
            i = end;
            copied = i;
        } else if starts_comment(bytes, i) {
            flush_plain(&mut run, &input[copied..i], &mut pending_space);
            let end = skip_comment(bytes, i)
                .ok_or(StyleFormatError::UnterminatedComment { offset: i })?;
            push_opaque(&mut run, &input[i..end], &mut pending_space);
            i = end;
            copied = i;
        } else if let Some(punct) = punct_of(b) {
            flush_plain(&mut run, &input[copied..i], &mut pending_space);
            end_run(&mut run, &mut tokens, &mut pending_space);
            tokens.push(StyleToken::Punct(punct, &input[i..i + 1]));
            i += 1;
            copied = i;
        } else {
            i += 1;
        }
    }
    flush_plain(&mut run, &input[copied..], &mut pending_space);
    end_run(&mut run, &mut tokens, &mut pending_space);
    Ok(tokens)
}

fn push_opaque(run: &mut String, raw: &str, pending_space: &mut bool) {
    if *pending_space {
        run.push(' ');
        *pending_space = false;
    }
    run.push_str(raw);
}

fn punct_of(b: u8) -> Option<Punct> {
    match b {
        b'{' => Some(Punct::Open),
        b';' => Some(Punct::Semi),
        b'}' => Some(Punct::Close),
        _ => None,
    }
}
