use std::sync::Arc;
use tracing::info;

use crate::assembler::ContextAssembler;
use crate::config::Config;
use crate::embeddings::create_embedder;
use crate::index::VectorIndex;
use crate::llm::AnswerGenerator;
use crate::search::WebSearchClient;
use crate::storage::DocumentStore;
use crate::types::{AppResult, ChatMessage};

/// Default base instruction when the workflow supplies none.
pub const DEFAULT_PROMPT: &str = "You are a helpful PDF assistant. Use context if available.";
/// Default number of chunks retrieved per query.
pub const DEFAULT_TOP_K: usize = 4;

/// Shared per-process state, constructed once at startup.
///
/// Every provider decision (embedding backend, chat backend, search client)
/// is resolved here and never re-resolved per request.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub docs: DocumentStore,
    pub index: Arc<VectorIndex>,
    pub assembler: ContextAssembler,
    pub generator: AnswerGenerator,
}

impl AppState {
    pub fn initialize(config: Config) -> AppResult<Self> {
        let docs = DocumentStore::new(&config.storage.doc_dir)?;
        info!(dir = %docs.root().display(), "Document store ready");

        let embedder = create_embedder(&config.embedding)?;
        let index = Arc::new(VectorIndex::new(embedder));
        info!(model = index.embedding_model(), "Vector index ready");

        let search = WebSearchClient::from_config(&config.search);
        if search.is_none() {
            info!("No search key configured, web augmentation disabled");
        }

        let assembler = ContextAssembler::new(Arc::clone(&index), search);
        let generator = AnswerGenerator::from_config(&config.llm)?;

        Ok(Self {
            config,
            docs,
            index,
            assembler,
            generator,
        })
    }
}

// API request/response types

#[derive(Debug, serde::Deserialize)]
pub struct RunRequest {
    #[serde(default)]
    pub workflow: Workflow,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Default, serde::Deserialize)]
pub struct Workflow {
    #[serde(default)]
    pub configs: WorkflowConfigs,
}

/// Recognized workflow options. Unrecognized keys are ignored on
/// deserialization; missing keys fall back to the documented defaults.
#[derive(Debug, Default, serde::Deserialize)]
pub struct WorkflowConfigs {
    #[serde(default)]
    pub llm: LlmOptions,
    #[serde(default)]
    pub kb: KbOptions,
}

#[derive(Debug, Default, serde::Deserialize)]
pub struct LlmOptions {
    pub prompt: Option<String>,
    #[serde(rename = "useWeb", default)]
    pub use_web: bool,
}

impl LlmOptions {
    pub fn prompt(&self) -> &str {
        self.prompt.as_deref().unwrap_or(DEFAULT_PROMPT)
    }
}

#[derive(Debug, Default, serde::Deserialize)]
pub struct KbOptions {
    #[serde(rename = "topK")]
    pub top_k: Option<usize>,
}

impl KbOptions {
    pub fn top_k(&self) -> usize {
        self.top_k.unwrap_or(DEFAULT_TOP_K)
    }
}

#[derive(Debug, serde::Serialize)]
pub struct RunResponse {
    pub reply: String,
}

#[derive(Debug, serde::Serialize)]
pub struct UploadResponse {
    pub indexed_chunks: usize,
}

#[derive(Debug, serde::Serialize)]
pub struct HealthResponse {
    pub ok: bool,
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workflow_defaults_apply_when_missing() {
        let req: RunRequest = serde_json::from_str(r#"{"messages": []}"#).unwrap();
        assert_eq!(req.workflow.configs.llm.prompt(), DEFAULT_PROMPT);
        assert!(!req.workflow.configs.llm.use_web);
        assert_eq!(req.workflow.configs.kb.top_k(), DEFAULT_TOP_K);
    }

    #[test]
    fn recognized_options_are_parsed() {
        let req: RunRequest = serde_json::from_str(
            r#"{
                "workflow": {"configs": {
                    "llm": {"prompt": "Custom.", "useWeb": true},
                    "kb": {"topK": 7}
                }},
                "messages": [{"role": "user", "content": "hi"}]
            }"#,
        )
        .unwrap();
        assert_eq!(req.workflow.configs.llm.prompt(), "Custom.");
        assert!(req.workflow.configs.llm.use_web);
        assert_eq!(req.workflow.configs.kb.top_k(), 7);
        assert_eq!(req.messages.len(), 1);
    }

    #[test]
    fn unrecognized_keys_are_ignored() {
        let req: RunRequest = serde_json::from_str(
            r#"{
                "workflow": {"configs": {
                    "llm": {"prompt": "P", "mystery": 1},
                    "kb": {"topK": 2, "extra": "x"},
                    "unknown_section": {}
                }},
                "messages": []
            }"#,
        )
        .unwrap();
        assert_eq!(req.workflow.configs.llm.prompt(), "P");
        assert_eq!(req.workflow.configs.kb.top_k(), 2);
    }
}
