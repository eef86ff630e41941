//! # turnup
//!
//! Convert loosely formatted, extended-Markdown-like text to clean preview
//! HTML.
//!
//! ## Design
//!
//! There is no tokenizer and no AST. The converter is a fixed sequence of
//! text-rewriting passes over a single buffer:
//!
//! normalize → protect code spans → headings → emphasis → blockquotes →
//! lists → horizontal rules → links/images → restore code spans →
//! paragraphs → cleanup
//!
//! Code spans are replaced by opaque tokens up front so no later pass can
//! touch their content. The list pass infers nesting depth from the
//! *relative* indentation used in the document rather than fixed column
//! multiples, and uses contextual heuristics to tell a genuine ordinal
//! marker from prose that merely looks like one ("B. Spielberger").
//!
//! Conversion is total: any internal failure degrades to an escaped,
//! preformatted copy of the input with a diagnostic, never a partial
//! fragment.
//!
//! ## Example
//!
//! ```rust
//! let html = turnup::convert("# Hello World");
//! assert_eq!(html, "<h1>Hello World</h1>");
//! ```
//!
//! ## Example (service)
//!
//! ```rust
//! use turnup::TurnupService;
//!
//! let service = TurnupService::new();
//! let html = service.render("- one\n- two");
//! assert!(html.contains("<li>one</li>"));
//! ```

mod passes;
mod service;

pub use service::TurnupService;
pub use turnup_core::{RenderOutcome, Result, TurnupError};

/// Convert Markdown text to preview HTML.
///
/// Total and deterministic: identical input yields identical output, and no
/// error escapes past this boundary.
pub fn convert(markdown: &str) -> String {
    TurnupService::new().render(markdown)
}
