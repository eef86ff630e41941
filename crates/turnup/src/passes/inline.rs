//! Inline formatting: emphasis, blockquotes, horizontal rules, links.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static DOUBLE_QUOTED_RE: Lazy<Regex> = Lazy::new(|| Regex::new("\"\"(.+?)\"\"").unwrap());

static BOLD_STAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(\S(?:.*?\S)?)\*\*").unwrap());
static BOLD_UNDER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"__(\S(?:.*?\S)?)__").unwrap());

// Guarded italics. `\b` around `_` rejects identifier-interior underscores
// (`snake_case`); the star pattern demands non-whitespace at both ends of
// the content instead, since `*` never sits inside a word.
static ITALIC_UNDER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b_([^_\n]+)_\b").unwrap());
static ITALIC_STAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*([^\s*][^*\n]*?[^\s*]|[^\s*])\*").unwrap());

// Relaxed variants used inside an already-matched bold span, where the
// surrounding delimiters have established the boundary.
static RELAXED_UNDER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"_([^_\n]+)_").unwrap());
static RELAXED_STAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*([^*\n]+)\*").unwrap());

static STRIKE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"~~(.+?)~~").unwrap());

static BLOCKQUOTE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^>[ \t]?(.*)$").unwrap());

static HR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*(?:-{3,}|\*{3,}|_{3,})[ \t]*$").unwrap());

static IMAGE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)\s]+)\)").unwrap());
static LINK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)\s]+)\)").unwrap());

// No lookbehind in the regex crate: the guard character is captured and
// reinserted. Quotes, `>`, `=` and word characters in front of a URL mean it
// already sits inside markup. The fragment delimiter is excluded from the
// URL so an autolink cannot swallow a protection token.
static AUTOLINK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(^|[^\w"'=>])(https?://[^\s<>"'\x1A]+)"#).unwrap()
});

/// Bold, italic, quoted-italic and strikethrough rewriting.
///
/// Emphasis never spans lines, so the pass runs per line. A rule-shaped
/// line (`*****`, `_____`) is skipped outright: it belongs to the
/// horizontal-rule pass, and a long run of `*` or `_` would otherwise read
/// as a bold delimiter pair.
pub fn emphasis(text: &str) -> String {
    text.split('\n')
        .map(|line| {
            if HR_RE.is_match(line) {
                line.to_string()
            } else {
                emphasize_line(line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Bold runs first and resolves italics inside its own span with relaxed
/// same-family matching, so `**a *b* c**` nests correctly.
fn emphasize_line(line: &str) -> String {
    let line = DOUBLE_QUOTED_RE.replace_all(line, "<em>\"$1\"</em>");
    let line = BOLD_STAR_RE.replace_all(&line, |caps: &Captures| {
        format!("<strong>{}</strong>", resolve_inner(&caps[1], true))
    });
    let line = BOLD_UNDER_RE.replace_all(&line, |caps: &Captures| {
        format!("<strong>{}</strong>", resolve_inner(&caps[1], false))
    });
    let line = ITALIC_UNDER_RE.replace_all(&line, "<em>$1</em>");
    let line = ITALIC_STAR_RE.replace_all(&line, "<em>$1</em>");
    STRIKE_RE.replace_all(&line, "<del>$1</del>").into_owned()
}

/// Italics inside a bold span: the other delimiter family keeps its strict
/// guards, the bold's own family is matched relaxed.
fn resolve_inner(content: &str, outer_star: bool) -> String {
    let (strict, relaxed) = if outer_star {
        (&*ITALIC_UNDER_RE, &*RELAXED_STAR_RE)
    } else {
        (&*ITALIC_STAR_RE, &*RELAXED_UNDER_RE)
    };
    let pass = strict.replace_all(content, "<em>$1</em>");
    relaxed.replace_all(&pass, "<em>$1</em>").into_owned()
}

/// `>` lines become blockquote elements; adjacent ones merge into a single
/// visual block joined by line breaks. Blockquotes are single-level.
pub fn blockquotes(text: &str) -> String {
    let quoted = BLOCKQUOTE_RE.replace_all(text, "<blockquote>$1</blockquote>");
    quoted.replace("</blockquote>\n<blockquote>", "<br>")
}

/// A line consisting solely of 3+ repeated `-`, `*` or `_` becomes `<hr>`.
pub fn horizontal_rules(text: &str) -> String {
    HR_RE.replace_all(text, "<hr>").into_owned()
}

/// Images, then links, then bare-URL autolinks.
///
/// Images must resolve first: the link pattern would otherwise swallow the
/// `![alt](url)` form from the `[` on.
pub fn links(text: &str) -> String {
    let text = IMAGE_RE.replace_all(text, "<img src=\"$2\" alt=\"$1\">");
    let text = LINK_RE.replace_all(&text, "<a href=\"$2\">$1</a>");
    AUTOLINK_RE
        .replace_all(&text, "${1}<a href=\"$2\">$2</a>")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_both_families() {
        assert_eq!(emphasis("**bold**"), "<strong>bold</strong>");
        assert_eq!(emphasis("__bold__"), "<strong>bold</strong>");
    }

    #[test]
    fn test_bold_nests_italic() {
        assert_eq!(
            emphasis("**a *b* c**"),
            "<strong>a <em>b</em> c</strong>"
        );
        assert_eq!(
            emphasis("__a _b_ c__"),
            "<strong>a <em>b</em> c</strong>"
        );
    }

    #[test]
    fn test_bold_requires_tight_delimiters() {
        assert_eq!(emphasis("** not bold **"), "** not bold **");
    }

    #[test]
    fn test_plain_italics() {
        assert_eq!(emphasis("an _aside_ here"), "an <em>aside</em> here");
        assert_eq!(emphasis("an *aside* here"), "an <em>aside</em> here");
    }

    #[test]
    fn test_snake_case_is_not_italic() {
        let input = "call snake_case and other_name today";
        assert_eq!(emphasis(input), input);
    }

    #[test]
    fn test_doubled_quotes_become_quoted_italic() {
        assert_eq!(emphasis("\"\"word\"\""), "<em>\"word\"</em>");
    }

    #[test]
    fn test_strikethrough() {
        assert_eq!(emphasis("~~gone~~"), "<del>gone</del>");
    }

    #[test]
    fn test_rule_lines_survive_emphasis() {
        assert_eq!(emphasis("*****"), "*****");
        assert_eq!(emphasis("_____"), "_____");
        assert_eq!(emphasis("  ____  "), "  ____  ");
    }

    #[test]
    fn test_rule_line_skip_is_per_line() {
        assert_eq!(
            emphasis("*****\n**bold**"),
            "*****\n<strong>bold</strong>"
        );
    }

    #[test]
    fn test_blockquote_merge() {
        assert_eq!(
            blockquotes("> one\n> two"),
            "<blockquote>one<br>two</blockquote>"
        );
    }

    #[test]
    fn test_blockquote_single_line() {
        assert_eq!(blockquotes("> only"), "<blockquote>only</blockquote>");
    }

    #[test]
    fn test_horizontal_rules() {
        assert_eq!(horizontal_rules("---"), "<hr>");
        assert_eq!(horizontal_rules("*****"), "<hr>");
        assert_eq!(horizontal_rules("___"), "<hr>");
        assert_eq!(horizontal_rules("--"), "--");
    }

    #[test]
    fn test_image_before_link() {
        assert_eq!(
            links("![alt text](img.png)"),
            "<img src=\"img.png\" alt=\"alt text\">"
        );
        assert_eq!(
            links("[click](https://example.com)"),
            "<a href=\"https://example.com\">click</a>"
        );
    }

    #[test]
    fn test_image_inside_link() {
        assert_eq!(
            links("[![badge](b.svg)](https://ci.example.com)"),
            "<a href=\"https://ci.example.com\"><img src=\"b.svg\" alt=\"badge\"></a>"
        );
    }

    #[test]
    fn test_autolink_plain_url() {
        assert_eq!(
            links("go to https://example.com now"),
            "go to <a href=\"https://example.com\">https://example.com</a> now"
        );
    }

    #[test]
    fn test_autolink_skips_quoted_and_tagged_urls() {
        let quoted = "path \"https://example.com\" stays";
        assert_eq!(links(quoted), quoted);
        let linked = links("[x](https://example.com)");
        assert_eq!(linked, "<a href=\"https://example.com\">x</a>");
    }
}
