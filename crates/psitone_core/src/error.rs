use thiserror::Error;

/// A rejected inbound parameter. Carries the wire name of the offending field.
///
/// The range in the messages mirrors `PARAM_MIN..=PARAM_MAX`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Parameter '{parameter}' must be between 0 and 7.")]
    OutOfRange { parameter: &'static str, value: i64 },

    /// A float, a string, or an integer too large to represent.
    #[error("Parameter '{parameter}' must be between 0 and 7.")]
    NotAnInteger { parameter: &'static str },

    #[error("Parameter '{parameter}' is required and must be between 0 and 7.")]
    Missing { parameter: &'static str },

    #[error("Field 'message' is required.")]
    MissingMessage,
}

impl ValidationError {
    /// Wire name of the field that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            Self::OutOfRange { parameter, .. }
            | Self::NotAnInteger { parameter }
            | Self::Missing { parameter } => *parameter,
            Self::MissingMessage => "message",
        }
    }
}

/// Every failure that can cross a component boundary.
#[derive(Debug, Error)]
pub enum PsiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The generation gateway failed, timed out, or returned no usable text.
    #[error("Generation failed: {0}")]
    Generation(String),

    /// Fatal at startup; never produced per request.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl PsiError {
    pub fn generation(msg: impl Into<String>) -> Self {
        Self::Generation(msg.into())
    }

    /// Stable machine-readable tag, used in error response bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Generation(_) => "generation",
            Self::Configuration(_) => "configuration",
        }
    }
}
