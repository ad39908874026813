// Web search (SerpAPI)

pub mod serpapi;

pub use serpapi::{SearchError, WebSearchClient};
