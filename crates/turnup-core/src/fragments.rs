//! Protected fragment store.
//!
//! Fenced code blocks and inline code spans are swapped for opaque tokens
//! before the rewriting passes run, and swapped back for their escaped HTML
//! renderings just before block assembly. Restoration is by exact key lookup,
//! never by pattern match, so a document that happens to contain
//! placeholder-shaped text cannot corrupt the result: the token namespace is
//! probed against the input until a substring is found that does not occur
//! in it.

use indexmap::IndexMap;

use crate::{Result, TurnupError};

const DELIMITER: char = '\u{1A}';

/// Ordered map from generated placeholder token to escaped HTML rendering.
///
/// Insertion order is restoration order. The protection pass inserts fenced
/// blocks before inline spans, so restoration replays them the same way.
pub struct FragmentStore {
    namespace: String,
    fragments: IndexMap<String, String>,
}

impl FragmentStore {
    /// Build a store whose token namespace does not occur anywhere in `text`.
    pub fn for_document(text: &str) -> Self {
        let mut salt = 0u32;
        let namespace = loop {
            let candidate = format!("{DELIMITER}tu{salt}{DELIMITER}");
            if !text.contains(&candidate) {
                break candidate;
            }
            salt += 1;
        };
        Self {
            namespace,
            fragments: IndexMap::new(),
        }
    }

    /// Store `rendering` and return the token that stands in for it.
    ///
    /// Every token carries the store's namespace plus a trailing delimiter,
    /// so no token is a prefix of another.
    pub fn insert(&mut self, rendering: String) -> String {
        let token = format!("{}{}{DELIMITER}", self.namespace, self.fragments.len());
        self.fragments.insert(token.clone(), rendering);
        token
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Replace every token with its stored rendering, in insertion order.
    ///
    /// A token that no longer occurs in `text` means a pass destroyed a
    /// protected region, which is reported rather than silently dropped.
    pub fn restore(&self, text: &str) -> Result<String> {
        let mut restored = text.to_string();
        for (token, rendering) in &self.fragments {
            if !restored.contains(token.as_str()) {
                return Err(TurnupError::LostFragment {
                    token: token.clone(),
                });
            }
            restored = restored.replace(token.as_str(), rendering);
        }
        Ok(restored)
    }
}
