/*!
 * Shape-preserving tree translation.
 *
 * The tree translator walks a catalog depth-first, left-to-right, and
 * produces a tree of identical shape: same keys in the same order, same
 * sequence lengths, same non-string leaf values. Only string leaves are
 * rewritten, each through a protect -> backend -> restore cycle.
 *
 * A backend failure on one leaf falls back to the original string and the
 * walk continues; a failed leaf never carries placeholder markers into the
 * output.
 */

use futures::future::{BoxFuture, FutureExt};
use log::{debug, warn};

use crate::catalog::CatalogNode;
use crate::placeholder::PlaceholderGuard;
use crate::session::LanguageSession;

/// Per-tree translation counters, reported per translation unit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// String leaves visited
    pub text_leaves: usize,
    /// Leaves translated by the backend
    pub translated: usize,
    /// Leaves that fell back to the source string after a backend error
    pub fallbacks: usize,
}

/// Callback fired once per visited string leaf, used for progress output
pub type LeafCallback = Box<dyn Fn() + Send + Sync>;

/// Translator for one catalog tree on one language session
pub struct TreeTranslator<'a> {
    session: &'a LanguageSession,
    guard: &'a PlaceholderGuard,
    on_leaf: Option<LeafCallback>,
    stats: TreeStats,
}

impl<'a> TreeTranslator<'a> {
    /// Create a translator bound to a session and a placeholder guard
    pub fn new(session: &'a LanguageSession, guard: &'a PlaceholderGuard) -> Self {
        Self {
            session,
            guard,
            on_leaf: None,
            stats: TreeStats::default(),
        }
    }

    /// Attach a per-leaf progress callback
    pub fn with_leaf_callback(mut self, callback: LeafCallback) -> Self {
        self.on_leaf = Some(callback);
        self
    }

    /// Translate a whole tree, returning the new tree and the leaf counters
    pub async fn translate(mut self, node: &CatalogNode) -> (CatalogNode, TreeStats) {
        let translated = self.translate_node(node).await;
        (translated, self.stats)
    }

    /// Structural recursion over one node.
    ///
    /// Mappings and sequences are rebuilt in order; sequence elements are
    /// only translated when they are strings, everything else is copied
    /// verbatim. Scalars are never sent to the backend.
    fn translate_node<'b>(&'b mut self, node: &'b CatalogNode) -> BoxFuture<'b, CatalogNode> {
        async move {
            match node {
                CatalogNode::Mapping(entries) => {
                    let mut translated = Vec::with_capacity(entries.len());
                    for (key, child) in entries {
                        let child = self.translate_node(child).await;
                        translated.push((key.clone(), child));
                    }
                    CatalogNode::Mapping(translated)
                }

                CatalogNode::Sequence(items) => {
                    let mut translated = Vec::with_capacity(items.len());
                    for item in items {
                        match item {
                            CatalogNode::Text(text) => {
                                let text = self.translate_text(text).await;
                                translated.push(CatalogNode::Text(text));
                            }
                            other => translated.push(other.clone()),
                        }
                    }
                    CatalogNode::Sequence(translated)
                }

                CatalogNode::Text(text) => CatalogNode::Text(self.translate_text(text).await),

                CatalogNode::Scalar(value) => CatalogNode::Scalar(value.clone()),
            }
        }
        .boxed()
    }

    /// Translate one string leaf through the placeholder guard.
    ///
    /// Degenerate strings (empty, whitespace, delimiter-only) skip the
    /// backend entirely. On backend failure the original string is returned
    /// unchanged so no masked marker can leak into the catalog.
    async fn translate_text(&mut self, text: &str) -> String {
        self.stats.text_leaves += 1;
        if let Some(callback) = &self.on_leaf {
            callback();
        }

        if self.guard.is_degenerate(text) {
            return text.to_string();
        }

        let (masked, tokens) = self.guard.protect(text);

        match self.session.translate(&masked).await {
            Ok(translated) => {
                self.stats.translated += 1;
                self.guard.restore(&translated, &tokens)
            }
            Err(e) => {
                warn!("Leaf translation failed, keeping source text: {}", e);
                debug!("Failed leaf content: {:?}", text);
                self.stats.fallbacks += 1;
                text.to_string()
            }
        }
    }
}
