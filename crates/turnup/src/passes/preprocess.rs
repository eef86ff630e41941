//! Input normalization and code-span protection.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use turnup_core::{escape, FragmentStore};

static TRAILING_WS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)[ \t]+$").unwrap());

static FENCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?ms)^[ \t]{0,3}```([^\n]*)$\n?(.*?)^[ \t]{0,3}```[ \t]*$").unwrap()
});

static INLINE_CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`\n]+)`").unwrap());

/// Normalize line endings, strip one layer of symmetric surrounding quotes,
/// and strip trailing horizontal whitespace per line. Blank lines between
/// paragraphs are structural and survive untouched.
pub fn normalize(text: &str) -> String {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");
    let stripped = strip_surrounding_quote(&unified);
    TRAILING_WS_RE.replace_all(stripped, "").into_owned()
}

/// One layer of `"`, `'` or backtick wrapping the whole document.
///
/// A doubled quote character at either end is left alone: that is fence or
/// quoted-italic syntax, not a stray wrapper.
fn strip_surrounding_quote(text: &str) -> &str {
    let trimmed = text.trim();
    for quote in ['"', '\'', '`'] {
        if trimmed.len() >= 2
            && trimmed.starts_with(quote)
            && trimmed.ends_with(quote)
            && !trimmed[1..].starts_with(quote)
            && !trimmed[..trimmed.len() - 1].ends_with(quote)
        {
            return &trimmed[1..trimmed.len() - 1];
        }
    }
    text
}

/// Replace fenced code blocks, then remaining inline code spans, with opaque
/// tokens, storing their escaped renderings.
///
/// Fences must go first: otherwise the inline-span pattern could claim a
/// backtick that belongs to a fence delimiter.
pub fn protect(text: &str) -> (String, FragmentStore) {
    let mut store = FragmentStore::for_document(text);

    let fenced = FENCE_RE.replace_all(text, |caps: &Captures| {
        let info = caps.get(1).map_or("", |m| m.as_str()).trim();
        let code = caps.get(2).map_or("", |m| m.as_str());
        let code = code.strip_suffix('\n').unwrap_or(code);
        store.insert(render_code_block(info, code))
    });

    let protected = INLINE_CODE_RE.replace_all(&fenced, |caps: &Captures| {
        let code = caps.get(1).map_or("", |m| m.as_str());
        store.insert(format!("<code>{}</code>", escape::escape_text(code)))
    });

    (protected.into_owned(), store)
}

fn render_code_block(info: &str, code: &str) -> String {
    let language = info
        .split_whitespace()
        .next()
        .filter(|token| token.chars().all(|c| c.is_ascii_alphanumeric() || "_+-".contains(c)));
    match language {
        Some(language) => format!(
            "<pre><code class=\"language-{}\">{}</code></pre>",
            escape::escape_attribute(language),
            escape::escape_text(code)
        ),
        None => format!("<pre><code>{}</code></pre>", escape::escape_text(code)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_line_endings() {
        assert_eq!(normalize("a\r\nb\rc\nd"), "a\nb\nc\nd");
    }

    #[test]
    fn test_normalize_strips_trailing_whitespace() {
        assert_eq!(normalize("line one   \nline two\t"), "line one\nline two");
    }

    #[test]
    fn test_normalize_keeps_blank_lines() {
        assert_eq!(normalize("a\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_strip_surrounding_quotes() {
        assert_eq!(normalize("\"quoted document\""), "quoted document");
        assert_eq!(normalize("'single'"), "single");
    }

    #[test]
    fn test_fence_delimiters_are_not_stripped_as_quotes() {
        let input = "```\ncode\n```";
        assert_eq!(normalize(input), input);
    }

    #[test]
    fn test_protect_fences_before_inline_spans() {
        let (protected, store) = protect("```\n`not inline`\n```");
        assert_eq!(store.len(), 1);
        assert!(!protected.contains('`'));
        let restored = store.restore(&protected).unwrap();
        assert!(restored.contains("<pre><code>`not inline`</code></pre>"));
    }

    #[test]
    fn test_protect_escapes_code_content() {
        let (protected, store) = protect("see `<b>` here");
        let restored = store.restore(&protected).unwrap();
        assert_eq!(restored, "see <code>&lt;b&gt;</code> here");
    }

    #[test]
    fn test_fence_language_class() {
        let (protected, store) = protect("```rust\nfn main() {}\n```");
        let restored = store.restore(&protected).unwrap();
        assert!(restored.contains("class=\"language-rust\""));
        assert!(restored.contains("fn main() {}"));
    }

    #[test]
    fn test_protected_content_is_opaque() {
        let (protected, _store) = protect("before\n```\n**bold?**\n```\nafter");
        assert!(!protected.contains("**bold?**"));
    }
}
