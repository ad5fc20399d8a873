//! Property-based tests for the affect engine.
//!
//! Verifies that derived emotion levels stay within `[1, 5]` for every valid
//! parameter combination, that derivation is deterministic, and that moving
//! into negative valence never lowers either emotion.

use proptest::prelude::*;
use psitone_limbic::{derive_emotions, AffectEngine};

const HISTORIES: &[&str] = &[
    "",
    "Human: hello\nAI: hi there",
    "Human: I keep failing and I can't stop\nAI: that sounds hard",
    "Human: we achieved a success today\nAI: congratulations",
    "Human: another obstacle, another conflict\nAI: let's look at it",
    "Human: it is all resolved, I feel calm\nAI: good",
    "FAIL SUCCESS OBSTACLE CALM",
    "fail obstacle",
    "success calm resolved achieved",
];

// ============================================================================
// Exhaustive bounds
// ============================================================================

#[test]
fn bounds_hold_over_full_parameter_space() {
    let engine = AffectEngine::default();
    for history in HISTORIES {
        for v in 0..=7u8 {
            for a in 0..=7u8 {
                for s in 0..=7u8 {
                    for r in 0..=7u8 {
                        let levels = engine.derive_raw(v, a, s, r, history);
                        assert!(
                            (1..=5).contains(&levels.sadness),
                            "sadness {} out of range for ({v},{a},{s},{r},{history:?})",
                            levels.sadness
                        );
                        assert!(
                            (1..=5).contains(&levels.anger),
                            "anger {} out of range for ({v},{a},{s},{r},{history:?})",
                            levels.anger
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn positive_valence_ignores_other_parameters() {
    for v in 4..=7u8 {
        for a in 0..=7u8 {
            for s in 0..=7u8 {
                for r in 0..=7u8 {
                    assert_eq!(derive_emotions(v, a, s, r, ""), (1, 1));
                }
            }
        }
    }
}

#[test]
fn opposing_cues_cancel() {
    // Same parameters; "fail" and "success" together must net to zero.
    for v in 0..=7u8 {
        let base = derive_emotions(v, 2, 2, 5, "");
        let both = derive_emotions(v, 2, 2, 5, "one fail, one success");
        assert_eq!(base, both);
    }
}

// ============================================================================
// Randomised properties
// ============================================================================

fn arb_history() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(HISTORIES).prop_map(str::to_string),
        ".{0,200}",
    ]
}

proptest! {
    #[test]
    fn derivation_is_deterministic(
        v in 0u8..=7, a in 0u8..=7, s in 0u8..=7, r in 0u8..=7,
        history in arb_history(),
    ) {
        prop_assert_eq!(
            derive_emotions(v, a, s, r, &history),
            derive_emotions(v, a, s, r, &history)
        );
    }

    #[test]
    fn negative_valence_is_monotone(
        hi in 4u8..=7, lo in 0u8..4,
        a in 0u8..=7, s in 0u8..=7, r in 0u8..=7,
        history in arb_history(),
    ) {
        let (sad_hi, anger_hi) = derive_emotions(hi, a, s, r, &history);
        let (sad_lo, anger_lo) = derive_emotions(lo, a, s, r, &history);
        prop_assert!(sad_lo >= sad_hi);
        prop_assert!(anger_lo >= anger_hi);
    }

    #[test]
    fn bounds_hold_for_arbitrary_text(
        v in 0u8..=7, a in 0u8..=7, s in 0u8..=7, r in 0u8..=7,
        history in ".*",
    ) {
        let (sadness, anger) = derive_emotions(v, a, s, r, &history);
        prop_assert!((1..=5).contains(&sadness));
        prop_assert!((1..=5).contains(&anger));
    }
}
