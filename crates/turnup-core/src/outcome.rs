//! Conversion outcome type.
//!
//! A conversion either renders to HTML or degrades to an escaped,
//! preformatted copy of the raw input with a visible diagnostic. No error
//! crosses the conversion boundary; callers that want the raw error can use
//! `TurnupService::try_render` instead.

use crate::escape;

/// Result of one conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The pipeline completed and produced preview HTML.
    Rendered(String),
    /// A pass failed; the original input is shown verbatim, escaped, inside
    /// a preformatted block together with a short diagnostic.
    Degraded { html: String, reason: String },
}

impl RenderOutcome {
    pub fn html(&self) -> &str {
        match self {
            RenderOutcome::Rendered(html) => html,
            RenderOutcome::Degraded { html, .. } => html,
        }
    }

    pub fn into_html(self) -> String {
        match self {
            RenderOutcome::Rendered(html) => html,
            RenderOutcome::Degraded { html, .. } => html,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, RenderOutcome::Degraded { .. })
    }
}

/// Build the degraded rendering for `raw` with the given diagnostic.
pub fn degraded(raw: &str, reason: &str) -> RenderOutcome {
    let html = format!(
        "{}\n<p><em>Preview fell back to plain text: {}</em></p>",
        escape::preformatted(raw),
        escape::escape_text(reason),
    );
    RenderOutcome::Degraded {
        html,
        reason: reason.to_string(),
    }
}
