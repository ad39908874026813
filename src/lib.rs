// Ragstack - minimal retrieval-augmented generation backend

pub mod assembler;
pub mod chunker;
pub mod config;
pub mod embeddings;
pub mod extract;
pub mod index;
pub mod llm;
pub mod models;
pub mod routes;
pub mod search;
pub mod storage;
pub mod types;

// Re-exports for convenience
pub use config::Config;
pub use models::AppState;
pub use routes::create_router;
