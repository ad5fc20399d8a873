//! Mock gateway: deterministic replies for offline runs and tests.

use crate::llm::GenerationGateway;
use anyhow::Result;

#[derive(Debug, Clone)]
pub struct MockGateway {
    model: String,
}

impl MockGateway {
    pub fn new(model: &str) -> Self {
        Self {
            model: model.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl GenerationGateway for MockGateway {
    async fn generate(&self, prompt: &str) -> Result<String> {
        Ok(format!(
            "(Mock {} Response) I received your prompt ({} chars).",
            self.model,
            prompt.chars().count()
        ))
    }

    fn name(&self) -> &str {
        "mock"
    }
}
