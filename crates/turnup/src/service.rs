//! TurnupService - the main entry point for Markdown to HTML conversion.

use turnup_core::{degraded, RenderOutcome, Result};

use crate::passes::{blocks, cleanup, headings, inline, lists, preprocess};

/// The main service for converting loose Markdown to preview HTML.
///
/// The grammar is fixed; there is no configuration surface. The service
/// holds no state, so one instance may serve concurrent conversions.
pub struct TurnupService;

impl TurnupService {
    pub fn new() -> Self {
        Self
    }

    /// Convert Markdown to HTML.
    ///
    /// Total: on any internal failure the original input is returned
    /// escaped inside a preformatted block with a short diagnostic.
    pub fn render(&self, markdown: &str) -> String {
        self.render_outcome(markdown).into_html()
    }

    /// Convert, keeping the rendered/degraded distinction visible so a
    /// shell can surface a warning next to the preview.
    pub fn render_outcome(&self, markdown: &str) -> RenderOutcome {
        match self.try_render(markdown) {
            Ok(html) => RenderOutcome::Rendered(html),
            Err(err) => degraded(markdown, &err.to_string()),
        }
    }

    /// Run the pipeline, surfacing the error instead of the fallback.
    pub fn try_render(&self, markdown: &str) -> Result<String> {
        let text = preprocess::normalize(markdown);
        let (text, store) = preprocess::protect(&text);
        let text = headings::rewrite(&text);
        let text = inline::emphasis(&text);
        let text = inline::blockquotes(&text);
        let text = lists::restructure(&text);
        let text = inline::horizontal_rules(&text);
        let text = inline::links(&text);
        let text = store.restore(&text)?;
        let text = blocks::assemble(&text);
        Ok(cleanup::tidy(&text))
    }
}

impl Default for TurnupService {
    fn default() -> Self {
        Self::new()
    }
}
