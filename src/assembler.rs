//! Context assembly for the answer pipeline.
//!
//! Retrieves top-K chunks and (optionally) one web snippet, then renders the
//! system prompt. Retrieval and web-search failures degrade to empty
//! sections and are recorded as typed outcomes instead of being swallowed,
//! so callers and tests can tell "no results" from "provider down".
//!
//! The rendered prompt always carries both the `Context:` and `Web:`
//! sections, even when empty. The structure stays deterministic.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::index::VectorIndex;
use crate::search::WebSearchClient;

/// What retrieval contributed to the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetrievalOutcome {
    /// `n` chunks were retrieved and joined into the context section.
    Retrieved(usize),
    /// The index had nothing relevant (or is empty).
    Empty,
    /// The index query failed; the context section is empty.
    Failed(String),
}

/// What web search contributed to the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebOutcome {
    /// A snippet was fetched.
    Snippet,
    /// Search ran but produced nothing, or no client is configured.
    Empty,
    /// Web augmentation was not requested.
    Disabled,
    /// The search failed; the web section is empty.
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct AssembledContext {
    pub system_prompt: String,
    pub retrieval: RetrievalOutcome,
    pub web: WebOutcome,
}

#[derive(Clone)]
pub struct ContextAssembler {
    index: Arc<VectorIndex>,
    search: Option<WebSearchClient>,
}

impl ContextAssembler {
    pub fn new(index: Arc<VectorIndex>, search: Option<WebSearchClient>) -> Self {
        Self { index, search }
    }

    /// Assemble the system prompt for one query.
    ///
    /// This path never fails: every degraded input becomes an empty section.
    pub async fn assemble(
        &self,
        query: &str,
        instruction: &str,
        top_k: usize,
        use_web: bool,
    ) -> AssembledContext {
        let (context, retrieval) = match self.index.query(query, top_k).await {
            Ok(hits) if hits.is_empty() => (String::new(), RetrievalOutcome::Empty),
            Ok(hits) => {
                let count = hits.len();
                let joined = hits
                    .into_iter()
                    .map(|hit| hit.text)
                    .collect::<Vec<_>>()
                    .join("\n\n");
                (joined, RetrievalOutcome::Retrieved(count))
            }
            Err(e) => {
                warn!(error = %e, "Index query failed, continuing with empty context");
                (String::new(), RetrievalOutcome::Failed(e.to_string()))
            }
        };

        let (snippet, web) = if !use_web {
            (String::new(), WebOutcome::Disabled)
        } else {
            match &self.search {
                None => {
                    debug!("Web augmentation requested but no search key is configured");
                    (String::new(), WebOutcome::Empty)
                }
                Some(client) => match client.first_snippet(query).await {
                    Ok(snippet) if snippet.is_empty() => (String::new(), WebOutcome::Empty),
                    Ok(snippet) => (snippet, WebOutcome::Snippet),
                    Err(e) => {
                        warn!(error = %e, "Web search failed, continuing with empty snippet");
                        (String::new(), WebOutcome::Failed(e.to_string()))
                    }
                },
            }
        };

        AssembledContext {
            system_prompt: render_system_prompt(instruction, &context, &snippet),
            retrieval,
            web,
        }
    }
}

/// Render the system prompt with its fixed section structure.
pub fn render_system_prompt(instruction: &str, context: &str, web: &str) -> String {
    format!("{instruction}\n\nContext:\n{context}\n\nWeb:\n{web}")
}
