pub mod chunking;
pub mod cleaning;
pub mod error;
pub mod extraction;
pub mod models;
pub mod orchestrator;
pub mod scrape;
pub mod traits;

pub use chunking::split_text;
pub use cleaning::{clean_body, extract_body};
pub use error::{ExtractError, ScrapeError};
pub use extraction::{build_prompt, OllamaModel};
pub use models::{
    ExtractionOptions, FetchOptions, PageCapture, DEFAULT_MAX_CHUNK_CHARS, DEFAULT_MODEL,
    DEFAULT_OLLAMA_ENDPOINT, DEFAULT_TEMPERATURE,
};
pub use orchestrator::ExtractionPipeline;
pub use scrape::PageFetcher;
pub use traits::ExtractionModel;
