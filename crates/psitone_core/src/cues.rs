//! Keyword-based emotional cues in conversation history.
//!
//! A coarse heuristic kept behind [`CueDetector`] so the affect engine's
//! numeric rules never depend on how cues are found.

const FAILURE: &[&str] = &["fail", "can't"];
const SUCCESS: &[&str] = &["success", "achieved"];
const OBSTACLE: &[&str] = &["obstacle", "conflict"];
const CALM: &[&str] = &["calm", "resolved"];

/// Which cue categories were found in a block of text.
///
/// Each category contributes at most once, however many of its keywords match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LexicalCues {
    pub failure: bool,
    pub success: bool,
    pub obstacle: bool,
    pub calm: bool,
}

impl LexicalCues {
    /// Net sadness adjustment: +1 for failure, -1 for success. Both may apply.
    pub fn sadness_delta(&self) -> i32 {
        i32::from(self.failure) - i32::from(self.success)
    }

    /// Net anger adjustment: +1 for obstacle, -1 for calm. Both may apply.
    pub fn anger_delta(&self) -> i32 {
        i32::from(self.obstacle) - i32::from(self.calm)
    }
}

pub trait CueDetector: Send + Sync {
    fn detect(&self, history: &str) -> LexicalCues;
}

/// Case-insensitive substring matcher over fixed keyword lists.
#[derive(Debug, Clone)]
pub struct KeywordCues {
    failure: Vec<String>,
    success: Vec<String>,
    obstacle: Vec<String>,
    calm: Vec<String>,
}

impl Default for KeywordCues {
    fn default() -> Self {
        Self::new(FAILURE, SUCCESS, OBSTACLE, CALM)
    }
}

impl KeywordCues {
    pub fn new(failure: &[&str], success: &[&str], obstacle: &[&str], calm: &[&str]) -> Self {
        Self {
            failure: lowercased(failure),
            success: lowercased(success),
            obstacle: lowercased(obstacle),
            calm: lowercased(calm),
        }
    }
}

fn lowercased(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_lowercase()).collect()
}

fn contains_any(haystack: &str, words: &[String]) -> bool {
    words.iter().any(|w| haystack.contains(w.as_str()))
}

impl CueDetector for KeywordCues {
    fn detect(&self, history: &str) -> LexicalCues {
        if history.is_empty() {
            return LexicalCues::default();
        }
        let text = history.to_lowercase();
        LexicalCues {
            failure: contains_any(&text, &self.failure),
            success: contains_any(&text, &self.success),
            obstacle: contains_any(&text, &self.obstacle),
            calm: contains_any(&text, &self.calm),
        }
    }
}
