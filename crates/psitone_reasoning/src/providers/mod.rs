//! Concrete generation gateways and the factory that picks one from config.

pub mod gemini;
pub mod mock;

pub use gemini::GeminiClient;
pub use mock::MockGateway;

use crate::llm::GenerationGateway;
use anyhow::{Context, Result};
use psitone_core::config::LlmConfig;
use psitone_core::{Credentials, LlmProvider};
use std::sync::Arc;

/// Build the gateway named by `llm.provider`.
pub fn create_gateway(llm: &LlmConfig, credentials: &Credentials) -> Result<Arc<dyn GenerationGateway>> {
    let gateway: Arc<dyn GenerationGateway> = match llm.provider {
        LlmProvider::Gemini => {
            let key = credentials
                .api_key()
                .context("Gemini provider selected but no API key was resolved")?;
            Arc::new(GeminiClient::new(llm, key)?)
        }
        LlmProvider::Mock => Arc::new(MockGateway::new(&llm.model)),
    };
    tracing::info!(provider = %llm.provider, model = %llm.model, "generation gateway ready");
    Ok(gateway)
}
