//! Citation-to-excerpt lookup.

use std::sync::Arc;

use citechat_service::Excerpt;

/// Maps citation labels to the excerpts of one response.
///
/// A resolver is built from a single response's excerpt list and is never
/// merged with another one. Cloning is cheap, the excerpts are shared.
#[derive(Clone, Debug, Default)]
pub struct CitationResolver {
    excerpts: Arc<[Excerpt]>,
}

impl CitationResolver {
    /// Creates a resolver over the given excerpts.
    #[inline]
    pub fn new(excerpts: Vec<Excerpt>) -> Self {
        Self {
            excerpts: excerpts.into(),
        }
    }

    /// Looks up the excerpt whose source equals `label`.
    ///
    /// Duplicated labels are kept as the service sent them; the first one
    /// wins.
    #[inline]
    pub fn resolve(&self, label: &str) -> Option<&Excerpt> {
        self.excerpts.iter().find(|e| e.source == label)
    }

    /// Returns the excerpt text for `label`, or `not_found` if this
    /// resolver has none.
    #[inline]
    pub fn resolve_text<'a>(&'a self, label: &str, not_found: &'a str) -> &'a str {
        self.resolve(label)
            .map(|e| e.text.as_str())
            .unwrap_or(not_found)
    }

    /// Returns the number of excerpts.
    #[inline]
    pub fn len(&self) -> usize {
        self.excerpts.len()
    }

    /// Returns `true` if there are no excerpts.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.excerpts.is_empty()
    }
}
