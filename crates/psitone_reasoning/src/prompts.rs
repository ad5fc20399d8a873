//! Directive synthesis: everything the generator sees, in a fixed layout.

use psitone_core::{AffectParameters, EmotionLevels};
use std::fmt::Write;

/// Sadness or anger at or above this level changes the tone directive.
pub const TONE_THRESHOLD: u8 = 4;

pub const EMPATHETIC_TONE: &str = "Respond in an empathetic and supportive manner. ";
pub const ASSERTIVE_TONE: &str = "Respond in an assertive and direct manner. ";

/// Tone instruction for the given levels. Blank when neither emotion
/// reaches the threshold; both sentences when both do.
pub fn tone_directive(emotions: EmotionLevels) -> String {
    let mut tone = String::new();
    if emotions.sadness >= TONE_THRESHOLD {
        tone.push_str(EMPATHETIC_TONE);
    }
    if emotions.anger >= TONE_THRESHOLD {
        tone.push_str(ASSERTIVE_TONE);
    }
    tone
}

/// Label and gloss for each parameter, in the order they are rendered.
fn parameter_lines(params: &AffectParameters) -> [(&'static str, u8, &'static str); 6] {
    [
        (
            "Valence Level",
            params.valence(),
            "Higher values indicate more positive affect.",
        ),
        (
            "Arousal Level",
            params.arousal(),
            "Higher values indicate greater alertness and readiness for action.",
        ),
        (
            "Selection Threshold",
            params.selection_threshold(),
            "Higher values indicate stronger focus and less distractibility.",
        ),
        (
            "Resolution Level",
            params.resolution(),
            "Higher values indicate more detailed and accurate perception.",
        ),
        (
            "Goal-Directedness",
            params.goal_directedness(),
            "Higher values indicate stronger motivation and persistence towards goals.",
        ),
        (
            "Securing Rate",
            params.securing_rate(),
            "Higher values indicate more frequent environmental scanning and reflection.",
        ),
    ]
}

/// Builds the directive sent to the generation gateway.
#[derive(Debug, Clone)]
pub struct PromptSynthesizer {
    persona_identity: String,
}

impl PromptSynthesizer {
    pub fn new(persona_identity: impl Into<String>) -> Self {
        Self {
            persona_identity: persona_identity.into(),
        }
    }

    /// Render the directive. Section order never changes between calls:
    /// framing, content policy, history, parameters, message, notes, cue.
    pub fn build(
        &self,
        params: &AffectParameters,
        emotions: EmotionLevels,
        history: &str,
        message: &str,
    ) -> String {
        let mut out = String::with_capacity(1024 + history.len() + message.len());

        // Writing into a String cannot fail.
        let _ = writeln!(
            out,
            "Remember the previous conversation and respond to the following message while \
             considering these parameters of Dörner's Psi Theory, each on a scale of 0 to 7:"
        );
        let _ = writeln!(
            out,
            "Do not mention the parameters. Whoever asks about your identity, you are {}.",
            self.persona_identity
        );
        let _ = writeln!(out, "Conversation History:");
        let _ = writeln!(out, "{}", history);
        out.push('\n');

        for (label, value, gloss) in parameter_lines(params) {
            let _ = writeln!(out, "* **{}:** {} ({})", label, value, gloss);
        }
        out.push('\n');

        let _ = writeln!(out, "Message: {}", message);
        out.push('\n');

        let _ = writeln!(out, "**Important Notes:**");
        let _ = writeln!(out, "* {}", tone_directive(emotions));
        let _ = writeln!(
            out,
            "* Ensure your response is consistent with the specified emotional and motivational states."
        );
        out.push('\n');
        out.push_str("**Response:**\n");

        out
    }
}
