use crate::api_types::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig};
use crate::llm::GenerationGateway;
use anyhow::{Context, Result};
use psitone_core::config::LlmConfig;
use reqwest::Client;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    generation_config: GenerationConfig,
}

impl GeminiClient {
    pub fn new(llm: &LlmConfig, api_key: &str) -> Result<Self> {
        let base_url = llm
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            client: Client::builder()
                .timeout(llm.timeout())
                .build()
                .context("Failed to build HTTP client")?,
            api_key: api_key.to_string(),
            base_url,
            model: llm.model.clone(),
            generation_config: GenerationConfig {
                temperature: Some(llm.temperature),
                max_output_tokens: Some(llm.max_output_tokens),
            },
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait::async_trait]
impl GenerationGateway for GeminiClient {
    #[tracing::instrument(skip(self, prompt), fields(model = %self.model, prompt_chars = prompt.len()))]
    async fn generate(&self, prompt: &str) -> Result<String> {
        let request_body = GenerateContentRequest {
            contents: vec![Content::user_text(prompt)],
            generation_config: Some(self.generation_config.clone()),
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await
            .context("Failed to send request to Gemini")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Gemini API Error ({}): {}", status, error_text);
        }

        let resp_text = response.text().await?;
        tracing::debug!(
            "Gemini raw response (first 2000 chars): {}",
            resp_text.chars().take(2000).collect::<String>()
        );
        let api_response: GenerateContentResponse =
            serde_json::from_str(&resp_text).context("Failed to parse Gemini response")?;

        match api_response.text() {
            Some(text) => Ok(text),
            None => anyhow::bail!("Gemini returned no usable text: {}", api_response.empty_reason()),
        }
    }

    fn name(&self) -> &str {
        "gemini"
    }
}
