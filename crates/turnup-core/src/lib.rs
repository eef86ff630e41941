//! # turnup-core
//!
//! Shared primitives for the turnup Markdown-to-HTML converter.
//!
//! This crate provides the building blocks the pass pipeline in `turnup` is
//! written against, without knowing anything about the passes themselves:
//!
//! - HTML escaping helpers ([`escape`])
//! - the protected-fragment store ([`FragmentStore`]) that keeps code spans
//!   out of reach of the rewriting passes
//! - the conversion outcome type ([`RenderOutcome`]) and the fallback
//!   rendering used when a conversion degrades
//!
//! # Example
//!
//! ```rust
//! use turnup_core::FragmentStore;
//!
//! let mut store = FragmentStore::for_document("some `code` here");
//! let token = store.insert("<code>code</code>".to_string());
//! let restored = store.restore(&format!("some {token} here")).unwrap();
//! assert_eq!(restored, "some <code>code</code> here");
//! ```

pub mod escape;
mod fragments;
mod outcome;

pub use fragments::FragmentStore;
pub use outcome::{degraded, RenderOutcome};

/// Error type for turnup operations
#[derive(Debug, thiserror::Error)]
pub enum TurnupError {
    /// A protected code span's placeholder vanished from the buffer before
    /// restoration, so its content can no longer be put back.
    #[error("protected fragment {token:?} was lost during rewriting")]
    LostFragment { token: String },
}

pub type Result<T> = std::result::Result<T, TurnupError>;
