use crate::error::ExtractError;
use crate::models::ExtractionOptions;
use crate::traits::ExtractionModel;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
    options: ChatOptions,
}

#[derive(Debug, Clone, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Clone, Serialize)]
struct ChatOptions {
    temperature: f32,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatResponse {
    message: Option<ChatResponseMessage>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

pub fn build_prompt(chunk: &str, instruction: &str) -> String {
    format!(
        "You are tasked with extracting specific information from the following text content: {chunk}. \
         Please follow these instructions carefully: \n\n\
         1. **Extract Information:** Only extract the information that directly matches the provided description: {instruction}. \
         2. **No Extra Content:** Do not include any additional text, comments, or explanations in your response. \
         3. **Empty Response:** If no information matches the description, return an empty string ('').\
         4. **Direct Data Only:** Your output should contain only the data that is explicitly requested, with no other text."
    )
}

/// Chat client for a local Ollama endpoint. One user message per call,
/// low temperature, no streaming, no retries.
pub struct OllamaModel {
    endpoint: String,
    model: String,
    temperature: f32,
    client: Client,
}

impl OllamaModel {
    pub fn new(options: &ExtractionOptions) -> Self {
        Self {
            endpoint: options.endpoint.trim_end_matches('/').to_string(),
            model: options.model.clone(),
            temperature: options.temperature,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl ExtractionModel for OllamaModel {
    async fn extract(&self, chunk: &str, instruction: &str) -> Result<String, ExtractError> {
        let url = format!("{}/api/chat", self.endpoint);

        let payload = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: build_prompt(chunk, instruction),
            }],
            stream: false,
            options: ChatOptions {
                temperature: self.temperature,
            },
        };

        let response = self.client.post(&url).json(&payload).send().await?;

        if !response.status().is_success() {
            return Err(ExtractError::BadStatus {
                endpoint: url,
                status: response.status().to_string(),
            });
        }

        let payload: ChatResponse = response.json().await?;
        response_text(payload)
    }
}

fn response_text(payload: ChatResponse) -> Result<String, ExtractError> {
    payload
        .message
        .and_then(|message| message.content)
        .map(|content| content.trim().to_string())
        .ok_or(ExtractError::EmptyResponse)
}
