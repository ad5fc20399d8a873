//! # Psitone Limbic Engine
//!
//! Fast, deterministic affect derivation. Four of the six Psi-Theory
//! parameters (valence, arousal, selection threshold, resolution) set a
//! baseline of sadness and anger; lexical cues in the conversation so far
//! nudge it by at most one step per category; the result is clamped once,
//! at the end, to `[1, 5]`.

mod engine;

pub use engine::{derive_emotions, AffectEngine};
