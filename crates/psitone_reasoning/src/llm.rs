use anyhow::Result;
use async_trait::async_trait;

/// The external text generator.
///
/// Takes a fully synthesized directive and returns the generated reply.
/// Any error, or a reply with no usable text, counts as a failed generation.
#[async_trait]
pub trait GenerationGateway: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Short name for logs.
    fn name(&self) -> &str;
}
