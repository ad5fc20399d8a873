//! The turn engine: validation, affect derivation, synthesis, generation and
//! memory update for one conversation turn.

use crate::llm::GenerationGateway;
use crate::prompts::PromptSynthesizer;
use psitone_core::{AffectParameters, EmotionLevels, PsiError, TurnRequest};
use psitone_limbic::AffectEngine;
use psitone_memory::Conversation;
use std::sync::Arc;
use std::time::Duration;

/// A generated reply and the emotion levels that shaped it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TunedResponse {
    pub response: String,
    pub emotions: EmotionLevels,
}

pub struct ResponseEngine {
    gateway: Arc<dyn GenerationGateway>,
    affect: AffectEngine,
    synthesizer: PromptSynthesizer,
    timeout: Duration,
}

impl ResponseEngine {
    pub fn new(
        gateway: Arc<dyn GenerationGateway>,
        synthesizer: PromptSynthesizer,
        timeout: Duration,
    ) -> Self {
        Self {
            gateway,
            affect: AffectEngine::default(),
            synthesizer,
            timeout,
        }
    }

    /// Swap in a different affect engine (e.g. one with custom cue detection).
    pub fn with_affect_engine(mut self, affect: AffectEngine) -> Self {
        self.affect = affect;
        self
    }

    /// Validate an inbound request, then run the turn.
    ///
    /// Validation happens before the conversation is touched, so a rejected
    /// request never waits on or observes another turn.
    pub async fn handle(
        &self,
        conversation: &Conversation,
        request: TurnRequest,
    ) -> Result<TunedResponse, PsiError> {
        let turn = request.validate().map_err(|e| {
            tracing::warn!(field = e.field(), "Rejected request: {}", e);
            e
        })?;
        self.respond(conversation, &turn.parameters, &turn.message).await
    }

    /// Run one turn against `conversation`.
    ///
    /// The conversation stays locked from history read to append, so turns
    /// are serialized and recorded in completion order. On any generation
    /// failure nothing is appended and the derived levels are dropped.
    #[tracing::instrument(skip_all, fields(conversation = %conversation.id(), gateway = self.gateway.name()))]
    pub async fn respond(
        &self,
        conversation: &Conversation,
        params: &AffectParameters,
        message: &str,
    ) -> Result<TunedResponse, PsiError> {
        let mut memory = conversation.begin_turn().await;
        let history = memory.flatten_history();

        let emotions = self.affect.derive(params, &history);
        let directive = self.synthesizer.build(params, emotions, &history, message);
        tracing::debug!(
            history_turns = memory.len(),
            directive_chars = directive.len(),
            sadness = emotions.sadness,
            anger = emotions.anger,
            "directive synthesized"
        );

        let response = match tokio::time::timeout(self.timeout, self.gateway.generate(&directive)).await
        {
            Ok(Ok(text)) if !text.trim().is_empty() => text,
            Ok(Ok(_)) => {
                tracing::error!("Generation returned empty text");
                return Err(PsiError::generation("generator returned no usable text"));
            }
            Ok(Err(e)) => {
                tracing::error!("Error generating response: {:#}", e);
                return Err(PsiError::generation(format!("{:#}", e)));
            }
            Err(_) => {
                tracing::error!("Generation timed out after {:?}", self.timeout);
                return Err(PsiError::generation(format!(
                    "generation timed out after {}s",
                    self.timeout.as_secs_f64()
                )));
            }
        };

        memory.append_turn(message, response.clone());
        tracing::info!(
            turns = memory.len(),
            sadness = emotions.sadness,
            anger = emotions.anger,
            "turn completed"
        );

        Ok(TunedResponse { response, emotions })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::MockGateway;

    #[tokio::test]
    async fn test_mock_turn_appends() {
        let engine = ResponseEngine::new(
            Arc::new(MockGateway::new("m")),
            PromptSynthesizer::new("Iris"),
            Duration::from_secs(1),
        );
        let conversation = Conversation::new();
        let params = AffectParameters::new(5, 5, 5, 5, 5, 5).unwrap();
        let out = engine.respond(&conversation, &params, "hello").await.unwrap();
        assert!(out.response.contains("Mock"));
        assert_eq!(conversation.len().await, 1);
    }

    #[tokio::test]
    async fn test_custom_cue_detector() {
        let cues = psitone_core::KeywordCues::new(&["gloom"], &[], &[], &[]);
        let engine = ResponseEngine::new(
            Arc::new(MockGateway::new("m")),
            PromptSynthesizer::new("Iris"),
            Duration::from_secs(1),
        )
        .with_affect_engine(AffectEngine::new(Arc::new(cues)));
        let conversation = Conversation::new();
        conversation.begin_turn().await.append_turn("such gloom", "sorry");

        let params = AffectParameters::new(5, 5, 5, 5, 5, 5).unwrap();
        let out = engine.respond(&conversation, &params, "hi").await.unwrap();
        assert_eq!(out.emotions.sadness, 2);
    }
}
