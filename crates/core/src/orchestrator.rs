use crate::chunking::split_text;
use crate::models::ExtractionOptions;
use crate::traits::ExtractionModel;
use tracing::{info, warn};

/// Drives the chunker and the extraction model across a whole request.
/// Chunks are processed strictly in order, one at a time; the aggregate
/// keeps one newline-joined segment per chunk.
pub struct ExtractionPipeline<M>
where
    M: ExtractionModel,
{
    model: M,
    options: ExtractionOptions,
}

impl<M> ExtractionPipeline<M>
where
    M: ExtractionModel + Send + Sync,
{
    pub fn new(model: M, options: ExtractionOptions) -> Self {
        Self { model, options }
    }

    pub fn options(&self) -> &ExtractionOptions {
        &self.options
    }

    pub async fn extract_from_text(&self, text: &str, instruction: &str) -> String {
        let chunks = split_text(text, self.options.max_chunk_chars);
        self.run_extraction(&chunks, instruction).await
    }

    pub async fn run_extraction(&self, chunks: &[String], instruction: &str) -> String {
        if chunks.is_empty() {
            return String::new();
        }

        let mut results = Vec::with_capacity(chunks.len());

        for (index, chunk) in chunks.iter().enumerate() {
            let batch = index + 1;
            match self.model.extract(chunk, instruction).await {
                Ok(text) => {
                    info!(batch, total = chunks.len(), "parsed batch");
                    results.push(text);
                }
                Err(error) => {
                    // Best-effort per chunk: one bad call must not abort
                    // the request. The segment stays, empty.
                    warn!(batch, total = chunks.len(), %error, "batch extraction failed");
                    results.push(String::new());
                }
            }
        }

        results.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::ExtractionPipeline;
    use crate::error::ExtractError;
    use crate::models::ExtractionOptions;
    use crate::traits::ExtractionModel;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct ConstantModel {
        answer: &'static str,
        calls: AtomicUsize,
    }

    impl ConstantModel {
        fn new(answer: &'static str) -> Self {
            Self {
                answer,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ExtractionModel for ConstantModel {
        async fn extract(&self, _chunk: &str, _instruction: &str) -> Result<String, ExtractError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.answer.to_string())
        }
    }

    struct FailingModel {
        fail_on_call: usize,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ExtractionModel for FailingModel {
        async fn extract(&self, chunk: &str, _instruction: &str) -> Result<String, ExtractError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call == self.fail_on_call {
                return Err(ExtractError::EmptyResponse);
            }
            Ok(format!("r{call}:{chunk}"))
        }
    }

    fn chunks(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[tokio::test]
    async fn empty_chunk_list_short_circuits_without_model_calls() {
        let model = ConstantModel::new("X");
        let pipeline = ExtractionPipeline::new(model, ExtractionOptions::default());

        let result = pipeline.run_extraction(&[], "anything").await;

        assert_eq!(result, "");
        assert_eq!(pipeline.model.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn result_has_one_segment_per_chunk() {
        let model = ConstantModel::new("X");
        let pipeline = ExtractionPipeline::new(model, ExtractionOptions::default());

        let result = pipeline
            .run_extraction(&chunks(&["a", "b", "c"]), "find x")
            .await;

        assert_eq!(result, "X\nX\nX");
        assert_eq!(pipeline.model.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn failed_chunk_leaves_empty_segment_and_later_chunks_still_run() {
        let model = FailingModel {
            fail_on_call: 2,
            calls: AtomicUsize::new(0),
        };
        let pipeline = ExtractionPipeline::new(model, ExtractionOptions::default());

        let result = pipeline
            .run_extraction(&chunks(&["a", "b", "c"]), "find x")
            .await;

        assert_eq!(result, "r1:a\n\nr3:c");
        assert_eq!(pipeline.model.calls.load(Ordering::SeqCst), 3);
        assert_eq!(result.split('\n').count(), 3);
    }

    #[tokio::test]
    async fn segments_preserve_chunk_order() {
        let model = FailingModel {
            fail_on_call: usize::MAX,
            calls: AtomicUsize::new(0),
        };
        let pipeline = ExtractionPipeline::new(model, ExtractionOptions::default());

        let result = pipeline
            .run_extraction(&chunks(&["first", "second"]), "find x")
            .await;

        assert_eq!(result, "r1:first\nr2:second");
    }

    #[tokio::test]
    async fn long_text_is_chunked_then_extracted_end_to_end() {
        let model = ConstantModel::new("X");
        let options = ExtractionOptions {
            max_chunk_chars: 6_000,
            ..ExtractionOptions::default()
        };
        let pipeline = ExtractionPipeline::new(model, options);

        let text = "y".repeat(13_000);
        let result = pipeline.extract_from_text(&text, "find y").await;

        assert_eq!(result, "X\nX\nX");
        assert_eq!(pipeline.model.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn empty_text_still_makes_exactly_one_model_call() {
        let model = ConstantModel::new("");
        let pipeline = ExtractionPipeline::new(model, ExtractionOptions::default());

        let result = pipeline.extract_from_text("", "find x").await;

        assert_eq!(result, "");
        assert_eq!(pipeline.model.calls.load(Ordering::SeqCst), 1);
    }
}
