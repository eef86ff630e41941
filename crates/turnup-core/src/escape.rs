//! HTML escaping helpers shared by the passes.

/// Escape text for use inside an HTML element.
pub fn escape_text(raw: &str) -> String {
    html_escape::encode_text(raw).into_owned()
}

/// Escape text for use inside a double-quoted HTML attribute.
pub fn escape_attribute(raw: &str) -> String {
    html_escape::encode_double_quoted_attribute(raw).into_owned()
}

/// Render raw text as an escaped preformatted block.
pub fn preformatted(raw: &str) -> String {
    format!("<pre><code>{}</code></pre>", escape_text(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("<b> & </b>"), "&lt;b&gt; &amp; &lt;/b&gt;");
        assert_eq!(escape_text("plain"), "plain");
    }

    #[test]
    fn test_escape_attribute() {
        assert_eq!(escape_attribute("a\"b"), "a&quot;b");
    }

    #[test]
    fn test_preformatted() {
        assert_eq!(
            preformatted("<script>"),
            "<pre><code>&lt;script&gt;</code></pre>"
        );
    }
}
