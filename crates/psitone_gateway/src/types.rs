use psitone_core::PsiError;
use psitone_memory::ConversationTurn;
use psitone_reasoning::TunedResponse;
use serde::{Deserialize, Serialize};

/// Body of a successful `POST /generate_response`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub response: String,
    pub sadness_level: u8,
    pub anger_level: u8,
}

impl From<TunedResponse> for GenerateResponse {
    fn from(t: TunedResponse) -> Self {
        Self {
            response: t.response,
            sadness_level: t.emotions.sadness,
            anger_level: t.emotions.anger,
        }
    }
}

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    /// `validation`, `generation` or `configuration`.
    pub kind: String,
}

/// Message shown to clients when generation fails. Details stay in the logs.
pub const GENERATION_FAILED: &str = "Failed to generate a response.";

/// Message shown to clients when the service itself is misconfigured.
pub const SERVICE_MISCONFIGURED: &str = "Service is not configured correctly.";

impl From<&PsiError> for ErrorBody {
    fn from(e: &PsiError) -> Self {
        let error = match e {
            PsiError::Validation(v) => v.to_string(),
            PsiError::Generation(_) => GENERATION_FAILED.to_string(),
            PsiError::Configuration(_) => SERVICE_MISCONFIGURED.to_string(),
        };
        Self {
            error,
            kind: e.kind().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub turns: Vec<ConversationTurn>,
}
