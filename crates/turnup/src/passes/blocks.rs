//! Paragraph assembly.
//!
//! By the time this pass runs, every structural rewrite has happened and the
//! buffer is a mix of HTML elements and leftover prose. Blank lines separate
//! blocks; prose blocks become paragraphs with `<br>` line breaks, blocks
//! that already carry block-level markup pass through untouched.

use once_cell::sync::Lazy;
use regex::Regex;

// A heading glued to following prose without a blank line between them.
static HEADING_LEAD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^(<h[1-6]>.*?</h[1-6]>)[ \t]*\n(.+)$").unwrap());

const BLOCK_OPEN_PREFIXES: &[&str] = &[
    "<h1", "<h2", "<h3", "<h4", "<h5", "<h6", "<ul", "<ol", "<li", "</ul", "</ol", "</li",
    "<blockquote", "<pre", "<hr", "<div", "<p",
];

const BLOCK_CLOSE_SUFFIXES: &[&str] = &[
    "</h1>", "</h2>", "</h3>", "</h4>", "</h5>", "</h6>", "</ul>", "</ol>", "</li>",
    "</blockquote>", "</pre>", "<hr>", "</div>", "</p>",
];

/// Group the buffer into blocks and wrap prose blocks in `<p>` elements.
///
/// Restored `<pre>` content may itself contain blank lines; a blank line
/// only ends a block while no `<pre>` is open.
pub fn assemble(text: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut pending: Vec<&str> = Vec::new();
    let mut open_pre = 0usize;

    for line in text.split('\n') {
        if open_pre == 0 && line.trim().is_empty() {
            push_block(&mut out, &mut pending);
            continue;
        }
        pending.push(line);
        open_pre += line.matches("<pre").count();
        open_pre = open_pre.saturating_sub(line.matches("</pre>").count());
    }
    push_block(&mut out, &mut pending);

    out.join("\n")
}

fn push_block(out: &mut Vec<String>, pending: &mut Vec<&str>) {
    let joined = pending.join("\n");
    pending.clear();
    let block = joined.trim();
    if block.is_empty() {
        return;
    }
    if let Some(caps) = HEADING_LEAD_RE.captures(block) {
        out.push(caps[1].to_string());
        let rest = caps[2].trim();
        if !rest.is_empty() {
            out.push(wrap(rest));
        }
        return;
    }
    out.push(wrap(block));
}

fn wrap(block: &str) -> String {
    let block_level = BLOCK_OPEN_PREFIXES
        .iter()
        .any(|prefix| block.starts_with(prefix))
        || BLOCK_CLOSE_SUFFIXES
            .iter()
            .any(|suffix| block.ends_with(suffix));
    if block_level {
        block.to_string()
    } else {
        format!("<p>{}</p>", block.replace('\n', "<br>\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prose_block_becomes_paragraph() {
        assert_eq!(assemble("just words"), "<p>just words</p>");
    }

    #[test]
    fn test_multi_line_prose_gets_breaks() {
        assert_eq!(assemble("one\ntwo"), "<p>one<br>\ntwo</p>");
    }

    #[test]
    fn test_blocks_split_on_blank_lines() {
        assert_eq!(assemble("a\n\nb"), "<p>a</p>\n<p>b</p>");
        assert_eq!(assemble("a\n \t\nb"), "<p>a</p>\n<p>b</p>");
    }

    #[test]
    fn test_element_block_passes_through() {
        assert_eq!(assemble("<h1>Title</h1>"), "<h1>Title</h1>");
        let list = "<ul>\n<li>one</li>\n</ul>";
        assert_eq!(assemble(list), list);
    }

    #[test]
    fn test_blank_lines_inside_pre_do_not_split() {
        let pre = "<pre><code>first\n\nmiddle\n\nlast</code></pre>";
        assert_eq!(assemble(pre), pre);
    }

    #[test]
    fn test_pre_block_with_neighbors() {
        let input = "before\n\n<pre><code>a\n\nb</code></pre>\n\nafter";
        assert_eq!(
            assemble(input),
            "<p>before</p>\n<pre><code>a\n\nb</code></pre>\n<p>after</p>"
        );
    }

    #[test]
    fn test_heading_glued_to_prose_is_split() {
        assert_eq!(
            assemble("<h1>Title</h1>\ndirectly below"),
            "<h1>Title</h1>\n<p>directly below</p>"
        );
    }

    #[test]
    fn test_repeated_blank_lines_produce_no_empty_blocks() {
        assert_eq!(assemble("a\n\n\n\nb"), "<p>a</p>\n<p>b</p>");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(assemble(""), "");
    }
}
