//! Final output tidying.
//!
//! Removes artifacts the earlier passes can leave behind: line breaks glued
//! to headings or list tags, paragraphs with no visible content, runs of
//! whitespace between tags, and stray indentation. Content inside `<pre>`
//! is left byte-for-byte alone.

use once_cell::sync::Lazy;
use regex::Regex;

static BREAK_AFTER_HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(</h[1-6]>)\s*<br\s*/?>").unwrap());

static BREAK_BEFORE_LIST_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<br\s*/?>\s*(</?(?:ul|ol|li)>)").unwrap());

static BREAK_AFTER_LIST_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(</?(?:ul|ol|li)>)\s*<br\s*/?>").unwrap());

static EMPTY_PARAGRAPH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<p>(?:\s|<br\s*/?>|&nbsp;)*</p>").unwrap());

static INTERTAG_WS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r">[ \t]{2,}<").unwrap());

/// Tidy assembled HTML for display.
pub fn tidy(html: &str) -> String {
    let html = BREAK_AFTER_HEADING_RE.replace_all(html, "$1");
    let html = BREAK_BEFORE_LIST_RE.replace_all(&html, "$1");
    let html = BREAK_AFTER_LIST_RE.replace_all(&html, "$1");
    let html = EMPTY_PARAGRAPH_RE.replace_all(&html, "");
    let html = INTERTAG_WS_RE.replace_all(&html, "> <");

    let mut out: Vec<&str> = Vec::new();
    let mut open_pre = 0usize;
    for line in html.split('\n') {
        if open_pre > 0 {
            out.push(line);
        } else {
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                out.push(trimmed);
            }
        }
        open_pre += line.matches("<pre").count();
        open_pre = open_pre.saturating_sub(line.matches("</pre>").count());
    }
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_break_after_heading_is_dropped() {
        assert_eq!(tidy("<h1>T</h1><br>rest"), "<h1>T</h1>rest");
    }

    #[test]
    fn test_breaks_around_list_tags_are_dropped() {
        assert_eq!(tidy("x<br>\n<ul><li>a</li></ul>"), "x<ul><li>a</li></ul>");
        assert_eq!(tidy("<ul><li>a</li></ul><br>x"), "<ul><li>a</li></ul>x");
    }

    #[test]
    fn test_empty_paragraphs_are_removed() {
        assert_eq!(tidy("<p> <br> </p>"), "");
        assert_eq!(tidy("<p>&nbsp;</p>"), "");
        assert_eq!(tidy("<p>kept</p>"), "<p>kept</p>");
    }

    #[test]
    fn test_intertag_whitespace_collapses() {
        assert_eq!(tidy("<p>a</p>   <p>b</p>"), "<p>a</p> <p>b</p>");
    }

    #[test]
    fn test_lines_trimmed_and_blanks_dropped() {
        assert_eq!(tidy("  <p>a</p>  \n\n<p>b</p>"), "<p>a</p>\n<p>b</p>");
    }

    #[test]
    fn test_pre_interior_keeps_indentation() {
        let html = "<pre><code>line1\n  line2\n</code></pre>";
        assert_eq!(tidy(html), html);
    }

    #[test]
    fn test_content_after_closed_pre_is_trimmed() {
        let html = "<pre><code>x</code></pre>\n  tail  ";
        assert_eq!(tidy(html), "<pre><code>x</code></pre>\ntail");
    }
}
