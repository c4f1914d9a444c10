//! Diagnostic formatting for mismatched containers

use crate::config::FormatOptions;
use crate::element::ElementType;
use crate::multiset::MatchResult;
use std::fmt;

/// Render a string the way reports quote literals
///
/// Backquoted when the text can be shown raw, otherwise double-quoted with
/// escapes.
pub fn quote(s: &str) -> String {
    if can_backquote(s) {
        format!("`{}`", s)
    } else {
        format!("{:?}", s)
    }
}

/// True when `s` can be written between backquotes without escaping:
/// no backquote, no control characters other than tab, no DEL, no BOM
pub fn can_backquote(s: &str) -> bool {
    !s.chars()
        .any(|c| c == '`' || c == '\u{7f}' || c == '\u{feff}' || (c < ' ' && c != '\t'))
}

/// Render a value of `element_type`: strings quoted, everything else via `Debug`
pub fn stringify<T: fmt::Debug + ?Sized>(element_type: &ElementType, value: &T) -> String {
    let debug = format!("{:?}", value);
    if element_type.is_text() {
        if let Some(text) = unescape_literal(&debug) {
            return quote(&text);
        }
    }
    debug
}

/// Render a value with its type, e.g. ``(String) `abc` ``
pub fn typed<T: fmt::Debug + ?Sized>(element_type: &ElementType, value: &T) -> String {
    format!("({}) {}", element_type, stringify(element_type, value))
}

/// Recover the text of a `Debug`-formatted string literal
fn unescape_literal(literal: &str) -> Option<String> {
    let inner = literal.strip_prefix('"')?.strip_suffix('"')?;
    let mut text = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            text.push(c);
            continue;
        }
        match chars.next()? {
            't' => text.push('\t'),
            'r' => text.push('\r'),
            'n' => text.push('\n'),
            '0' => text.push('\0'),
            c @ ('\\' | '"' | '\'') => text.push(c),
            'u' => {
                if chars.next()? != '{' {
                    return None;
                }
                let hex: String = chars.by_ref().take_while(|&c| c != '}').collect();
                text.push(char::from_u32(u32::from_str_radix(&hex, 16).ok()?)?);
            }
            _ => return None,
        }
    }

    Some(text)
}

/// Render several listings of already-typed elements together
///
/// Each listing is `[a, b, c]`. If any of them is wider than
/// `max_line_width`, all of them are written one element per line so they
/// stay visually aligned with each other.
pub fn listings(rendered: &[Vec<String>], options: &FormatOptions) -> Vec<String> {
    let single_line: Vec<String> = rendered
        .iter()
        .map(|items| format!("[{}]", items.join(", ")))
        .collect();

    if single_line
        .iter()
        .all(|line| line.chars().count() <= options.max_line_width)
    {
        return single_line;
    }

    rendered
        .iter()
        .map(|items| {
            if items.is_empty() {
                "[]".to_string()
            } else {
                format!("[\n{}\n]", items.join(",\n"))
            }
        })
        .collect()
}

fn render_all<'a, T, I>(element_type: &ElementType, items: I) -> Vec<String>
where
    T: fmt::Debug + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items
        .into_iter()
        .map(|item| typed(element_type, item))
        .collect()
}

/// Explain why `got` and `want` are not the same multiset
///
/// Reports both sides in their original order with their lengths, followed by
/// the missing and extra elements when there are any.
pub fn format_mismatch<T: fmt::Debug>(
    element_type: &ElementType,
    got: &[T],
    want: &[T],
    result: &MatchResult<'_, T>,
    options: &FormatOptions,
) -> String {
    let sides = listings(
        &[render_all(element_type, got), render_all(element_type, want)],
        options,
    );

    let mut report = format!(
        "got {} (len {}), wanted {} (len {})",
        sides[0],
        got.len(),
        sides[1],
        want.len()
    );

    if !result.missing().is_empty() {
        let missing = render_all(element_type, result.missing().iter().copied());
        report.push_str("; missing elements: ");
        report.push_str(&listings(&[missing], options)[0]);
    }
    if !result.extra().is_empty() {
        let extra = render_all(element_type, result.extra().iter().copied());
        report.push_str("; extra elements: ");
        report.push_str(&listings(&[extra], options)[0]);
    }

    report
}

/// Explain a comparison where exactly one side is a nil sequence
pub fn format_nil_mismatch<T: fmt::Debug>(
    element_type: &ElementType,
    got_type: &str,
    got: Option<&[T]>,
    want_type: &str,
    want: Option<&[T]>,
    options: &FormatOptions,
) -> String {
    let render = |elements: Option<&[T]>| match elements {
        Some(elements) => listings(&[render_all(element_type, elements)], options).remove(0),
        None => "nil".to_string(),
    };

    format!(
        "got ({}) {}, want ({}) {}",
        got_type,
        render(got),
        want_type,
        render(want)
    )
}
