//! The grounding engine: the one entry point callers use.
//!
//! [`GroundingEngine::build_grounded_context`] is total: it always
//! returns a context block, degrading to the ungrounded preamble when
//! extraction, resolution, and collection all come up empty or the store
//! is unreachable. The engine holds no mutable state; concurrent
//! requests are independent.

use crate::collect::{collect_articles, dedup_and_cap, MAX_CONTEXT_ARTICLES};
use crate::context::{render_context, GENERIC_AMBIENT_DESCRIPTION};
use crate::keywords::{extract_candidates, KeywordTable};
use crate::resolve::resolve_subject;
use crate::store::TaxonomyStore;

/// Query-grounding engine over a [`TaxonomyStore`].
pub struct GroundingEngine<S> {
    store: S,
    keywords: KeywordTable,
}

impl<S: TaxonomyStore> GroundingEngine<S> {
    /// Engine with the built-in keyword table.
    pub fn new(store: S) -> Self {
        Self::with_keywords(store, KeywordTable::default())
    }

    /// Engine with a caller-supplied keyword table.
    pub fn with_keywords(store: S, keywords: KeywordTable) -> Self {
        Self { store, keywords }
    }

    /// The underlying store, for surfaces outside the grounding pipeline.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Build the grounding context block for a raw user message.
    ///
    /// Sequential pipeline: extraction → resolution → collection →
    /// dedup/cap → assembly. Never fails; same message and store state
    /// always yield the same block.
    pub async fn build_grounded_context(&self, message: &str) -> String {
        let tokens = extract_candidates(&self.keywords, &self.store, message).await;
        let subject = resolve_subject(&self.store, &tokens).await;
        let articles = collect_articles(&self.store, subject.as_ref(), message).await;
        let articles = dedup_and_cap(articles, MAX_CONTEXT_ARTICLES);

        let ambient = match &subject {
            Some(s) if s.description.is_empty() => format!("Sujet : {}", s.title),
            Some(s) => format!("Sujet : {} - {}", s.title, s.description),
            None => GENERIC_AMBIENT_DESCRIPTION.to_string(),
        };

        render_context(&articles, Some(&ambient))
    }
}
