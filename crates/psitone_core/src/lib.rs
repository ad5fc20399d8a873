//! # Psitone Core
//!
//! Shared vocabulary for the Psitone workspace: the six Psi-Theory
//! parameters and their validator, the derived emotion levels, the lexical
//! cue detector used by the affect engine, configuration, and the error
//! taxonomy every boundary reports through.

pub mod affect;
pub mod config;
pub mod cues;
pub mod error;
pub mod request;

pub use affect::{
    AffectParameters, EmotionLevels, ParamValue, RawAffectParameters, PARAM_MAX, PARAM_MIN,
};
pub use config::{Credentials, LlmProvider, PsitoneConfig};
pub use cues::{CueDetector, KeywordCues, LexicalCues};
pub use error::{PsiError, ValidationError};
pub use request::{TurnRequest, ValidTurn};
