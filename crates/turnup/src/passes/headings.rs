//! ATX and setext heading passes.
//!
//! ATX takes precedence; a setext underline only promotes the previous line
//! when that line is plain text, so a lone `---` stays untouched for the
//! horizontal-rule pass.

use once_cell::sync::Lazy;
use regex::Regex;

static ATX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[-*+][ \t]+)?(#{1,6})[ \t]*(.*?)[ \t]*#*[ \t]*$").unwrap());

static SETEXT_H1_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^={2,}$").unwrap());
static SETEXT_H2_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-{2,}$").unwrap());

/// Rewrite ATX and setext headings to `<hN>` elements.
pub fn rewrite(text: &str) -> String {
    let mut out: Vec<String> = Vec::new();

    for line in text.split('\n') {
        if let Some(caps) = ATX_RE.captures(line) {
            let level = caps[1].len();
            let title = caps[2].trim();
            if !title.is_empty() {
                out.push(format!("<h{level}>{title}</h{level}>"));
                continue;
            }
        }

        if let Some(level) = setext_level(line) {
            if let Some(title) = promotable_title(out.last()) {
                out.pop();
                out.push(format!("<h{level}>{title}</h{level}>"));
                continue;
            }
        }

        out.push(line.to_string());
    }

    out.join("\n")
}

fn setext_level(line: &str) -> Option<usize> {
    let line = line.trim_end();
    if SETEXT_H1_RE.is_match(line) {
        Some(1)
    } else if SETEXT_H2_RE.is_match(line) {
        Some(2)
    } else {
        None
    }
}

/// The previous line, if it is non-blank plain text rather than an element
/// produced by an earlier rewrite.
fn promotable_title(previous: Option<&String>) -> Option<String> {
    let title = previous?.trim();
    if title.is_empty() || title.starts_with('<') {
        return None;
    }
    Some(title.to_string())
}
