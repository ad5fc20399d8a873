//! The inbound turn request, as decoded from the wire.

use crate::affect::{AffectParameters, RawAffectParameters};
use crate::error::ValidationError;
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TurnRequest {
    #[serde(flatten)]
    pub parameters: RawAffectParameters,
    #[serde(default)]
    pub message: Option<String>,
}

/// A request whose parameters and message have all been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidTurn {
    pub parameters: AffectParameters,
    pub message: String,
}

impl TurnRequest {
    pub fn new(parameters: AffectParameters, message: impl Into<String>) -> Self {
        Self {
            parameters: parameters.into(),
            message: Some(message.into()),
        }
    }

    /// Parameters are checked before the message, so an out-of-range
    /// parameter is reported even when the message is also missing.
    pub fn validate(self) -> Result<ValidTurn, ValidationError> {
        let parameters = self.parameters.validate()?;
        let message = self.message.ok_or(ValidationError::MissingMessage)?;
        Ok(ValidTurn {
            parameters,
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_flat_wire_format() {
        let json = r#"{
            "valence_level": 2, "arousal_level": 6, "selection_threshold": 6,
            "resolution_level": 2, "goal_directedness": 3, "securing_rate": 4,
            "message": "hello"
        }"#;
        let req: TurnRequest = serde_json::from_str(json).unwrap();
        let turn = req.validate().unwrap();
        assert_eq!(turn.message, "hello");
        assert_eq!(turn.parameters.arousal(), 6);
        assert_eq!(turn.parameters.securing_rate(), 4);
    }

    #[test]
    fn test_missing_message() {
        let params = AffectParameters::new(3, 3, 3, 3, 3, 3).unwrap();
        let mut req = TurnRequest::new(params, "x");
        req.message = None;
        assert_eq!(req.validate().unwrap_err(), ValidationError::MissingMessage);
    }

    #[test]
    fn test_parameter_error_wins_over_missing_message() {
        let json = r#"{
            "valence_level": 9, "arousal_level": 6, "selection_threshold": 6,
            "resolution_level": 2, "goal_directedness": 3, "securing_rate": 4
        }"#;
        let req: TurnRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.validate().unwrap_err().field(), "valence_level");
    }

    #[test]
    fn test_oversized_integer_decodes_and_names_field() {
        let json = r#"{
            "valence_level": 9223372036854775808, "arousal_level": 6, "selection_threshold": 6,
            "resolution_level": 2, "goal_directedness": 3, "securing_rate": 4,
            "message": "hi"
        }"#;
        let req: TurnRequest = serde_json::from_str(json).unwrap();
        let err = req.validate().unwrap_err();
        assert_eq!(err.to_string(), "Parameter 'valence_level' must be between 0 and 7.");
    }

    #[test]
    fn test_empty_message_is_allowed() {
        let params = AffectParameters::new(3, 3, 3, 3, 3, 3).unwrap();
        assert!(TurnRequest::new(params, "").validate().is_ok());
    }
}
