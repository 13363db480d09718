use crate::error::ExtractError;
use async_trait::async_trait;

/// Seam between the orchestrator and the model service. One call per
/// chunk; implementations report failure through the typed error so the
/// orchestrator's degrade policy stays explicit.
#[async_trait]
pub trait ExtractionModel {
    async fn extract(&self, chunk: &str, instruction: &str) -> Result<String, ExtractError>;
}
