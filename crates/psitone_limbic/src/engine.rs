use psitone_core::{AffectParameters, CueDetector, EmotionLevels, KeywordCues};
use std::sync::Arc;

/// Parameters below this count as low; valence below it is a negative disposition.
const LOW: u8 = 4;
/// Parameters above this count as high.
const HIGH: u8 = 5;

/// Derives [`EmotionLevels`] from parameters and history text.
///
/// Holds only the cue detector, so it is cheap to clone and safe to share.
#[derive(Clone)]
pub struct AffectEngine {
    cues: Arc<dyn CueDetector>,
}

impl Default for AffectEngine {
    fn default() -> Self {
        Self::new(Arc::new(KeywordCues::default()))
    }
}

impl std::fmt::Debug for AffectEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AffectEngine").finish_non_exhaustive()
    }
}

impl AffectEngine {
    pub fn new(cues: Arc<dyn CueDetector>) -> Self {
        Self { cues }
    }

    pub fn derive(&self, params: &AffectParameters, history: &str) -> EmotionLevels {
        self.derive_raw(
            params.valence(),
            params.arousal(),
            params.selection_threshold(),
            params.resolution(),
            history,
        )
    }

    /// Core rule set. Inputs are assumed already validated.
    pub fn derive_raw(
        &self,
        valence: u8,
        arousal: u8,
        selection_threshold: u8,
        resolution: u8,
        history: &str,
    ) -> EmotionLevels {
        let mut sadness: i32 = 1;
        let mut anger: i32 = 1;

        // Arousal, selection and resolution only move anything under a
        // negative disposition.
        if valence < LOW {
            sadness += 1;
            if arousal < LOW {
                sadness += 1;
            }
            if resolution < LOW {
                sadness += 1;
            }

            if arousal > HIGH {
                anger += 2;
            }
            if selection_threshold > HIGH {
                anger += 1;
            }
            if resolution < LOW {
                anger += 1;
            }
        }

        let cues = self.cues.detect(history);
        sadness += cues.sadness_delta();
        anger += cues.anger_delta();

        let levels = EmotionLevels::clamped(sadness, anger);
        tracing::debug!(
            valence,
            arousal,
            selection_threshold,
            resolution,
            raw_sadness = sadness,
            raw_anger = anger,
            sadness = levels.sadness,
            anger = levels.anger,
            "derived emotion levels"
        );
        levels
    }
}

/// Derive `(sadness, anger)` with the default keyword cues.
pub fn derive_emotions(
    valence: u8,
    arousal: u8,
    selection_threshold: u8,
    resolution: u8,
    history: &str,
) -> (u8, u8) {
    let levels =
        AffectEngine::default().derive_raw(valence, arousal, selection_threshold, resolution, history);
    (levels.sadness, levels.anger)
}

#[cfg(test)]
mod tests {
    use super::*;
    use psitone_core::LexicalCues;

    #[test]
    fn test_neutral_floor() {
        assert_eq!(derive_emotions(7, 7, 7, 7, ""), (1, 1));
        assert_eq!(derive_emotions(4, 0, 7, 0, ""), (1, 1));
    }

    #[test]
    fn test_negative_valence_scenario() {
        // 1 + 1 (valence) + 1 (resolution); arousal 6 is not low.
        // 1 + 2 (arousal) + 1 (selection) + 1 (resolution) = 5.
        assert_eq!(derive_emotions(2, 6, 6, 2, ""), (3, 5));
    }

    #[test]
    fn test_max_sadness_before_cues() {
        assert_eq!(derive_emotions(0, 0, 0, 0, ""), (4, 2));
    }

    #[test]
    fn test_clamp_is_post_hoc() {
        // Raw anger reaches 6 (1 + 2 + 1 + 1 + 1) before clamping.
        assert_eq!(derive_emotions(0, 7, 7, 0, "an obstacle").1, 5);
        // Raw sadness 1 - 1 = 0 clamps up to 1; a later +1 is not lost
        // to an early clamp.
        assert_eq!(derive_emotions(7, 7, 7, 7, "success").0, 1);
        assert_eq!(derive_emotions(7, 7, 7, 7, "success and fail").0, 1);
        assert_eq!(derive_emotions(7, 7, 7, 7, "fail").0, 2);
    }

    #[test]
    fn test_lexical_adjustments() {
        assert_eq!(derive_emotions(5, 5, 5, 5, "I can't do this"), (2, 1));
        assert_eq!(derive_emotions(5, 5, 5, 5, "We hit a conflict"), (1, 2));
        assert_eq!(derive_emotions(2, 2, 2, 2, "finally achieved it"), (3, 2));
        assert_eq!(derive_emotions(0, 7, 7, 7, "all resolved now"), (2, 3));
    }

    #[test]
    fn test_uses_validated_parameters() {
        let params = AffectParameters::new(2, 6, 6, 2, 0, 0).unwrap();
        let levels = AffectEngine::default().derive(&params, "");
        assert_eq!(
            levels,
            EmotionLevels {
                sadness: 3,
                anger: 5
            }
        );
    }

    struct AlwaysObstacle;

    impl CueDetector for AlwaysObstacle {
        fn detect(&self, _history: &str) -> LexicalCues {
            LexicalCues {
                obstacle: true,
                ..LexicalCues::default()
            }
        }
    }

    #[test]
    fn test_pluggable_cue_detector() {
        let engine = AffectEngine::new(Arc::new(AlwaysObstacle));
        let levels = engine.derive_raw(7, 7, 7, 7, "");
        assert_eq!(levels.anger, 2);
        assert_eq!(levels.sadness, 1);
    }
}
