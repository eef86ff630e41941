//! The ordered rewriting passes of the conversion pipeline.
//!
//! Each pass consumes and produces a single text buffer. Ordering matters:
//! code spans are protected before anything else runs, images resolve before
//! links, lists before horizontal rules, restoration before paragraphs.

pub mod blocks;
pub mod cleanup;
pub mod headings;
pub mod inline;
pub mod lists;
pub mod preprocess;
