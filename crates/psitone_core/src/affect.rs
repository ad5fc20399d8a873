//! Psi-Theory parameters and the emotion levels derived from them.
//!
//! Dörner's Psi-Theory describes an agent's cognitive modulation with a small
//! set of dimensions. Six of them arrive with every request as integers on a
//! 0–7 scale; two discrete intensities (sadness, anger) on a 1–5 scale are
//! derived from them by the limbic engine.

use crate::error::ValidationError;
use serde::de::{Deserializer, IgnoredAny};
use serde::{Deserialize, Serialize};

/// Lowest accepted parameter value.
pub const PARAM_MIN: i64 = 0;
/// Highest accepted parameter value.
pub const PARAM_MAX: i64 = 7;

/// Neutral floor for a derived emotion.
pub const EMOTION_MIN: u8 = 1;
/// Ceiling for a derived emotion.
pub const EMOTION_MAX: u8 = 5;

/// The six validated Psi-Theory parameters, each in `[0, 7]`.
///
/// Only constructible through validation, so holding one means every field
/// is in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AffectParameters {
    /// Negative (0) to positive (7) disposition.
    valence: u8,
    /// Alertness and readiness for action.
    arousal: u8,
    /// Focus; resistance to distraction.
    selection_threshold: u8,
    /// Granularity and accuracy of perception.
    resolution: u8,
    /// Persistence toward active goals.
    goal_directedness: u8,
    /// Frequency of environmental re-scanning and reflection.
    securing_rate: u8,
}

impl AffectParameters {
    /// Validate six raw values in declaration order, failing on the first
    /// one outside `[0, 7]`.
    pub fn new(
        valence: i64,
        arousal: i64,
        selection_threshold: i64,
        resolution: i64,
        goal_directedness: i64,
        securing_rate: i64,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            valence: check_range("valence_level", valence)?,
            arousal: check_range("arousal_level", arousal)?,
            selection_threshold: check_range("selection_threshold", selection_threshold)?,
            resolution: check_range("resolution_level", resolution)?,
            goal_directedness: check_range("goal_directedness", goal_directedness)?,
            securing_rate: check_range("securing_rate", securing_rate)?,
        })
    }

    pub fn valence(&self) -> u8 {
        self.valence
    }

    pub fn arousal(&self) -> u8 {
        self.arousal
    }

    pub fn selection_threshold(&self) -> u8 {
        self.selection_threshold
    }

    pub fn resolution(&self) -> u8 {
        self.resolution
    }

    pub fn goal_directedness(&self) -> u8 {
        self.goal_directedness
    }

    pub fn securing_rate(&self) -> u8 {
        self.securing_rate
    }
}

/// Check a single parameter against `[PARAM_MIN, PARAM_MAX]`.
pub fn check_range(parameter: &'static str, value: i64) -> Result<u8, ValidationError> {
    if (PARAM_MIN..=PARAM_MAX).contains(&value) {
        Ok(value as u8)
    } else {
        Err(ValidationError::OutOfRange { parameter, value })
    }
}

/// A single parameter as it arrives on the wire.
///
/// Any JSON value decodes; whether it is acceptable is the validator's call,
/// so a float or an integer past `i64` is still reported against its field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamValue {
    Integer(i64),
    /// Present, but not an integer that fits `i64`.
    NotAnInteger,
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl<'de> Deserialize<'de> for ParamValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Integer(i64),
            Other(IgnoredAny),
        }

        Ok(match Wire::deserialize(deserializer)? {
            Wire::Integer(v) => Self::Integer(v),
            Wire::Other(_) => Self::NotAnInteger,
        })
    }
}

/// Parameters as they arrive on the wire. Any field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawAffectParameters {
    #[serde(default)]
    pub valence_level: Option<ParamValue>,
    #[serde(default)]
    pub arousal_level: Option<ParamValue>,
    #[serde(default)]
    pub selection_threshold: Option<ParamValue>,
    #[serde(default)]
    pub resolution_level: Option<ParamValue>,
    #[serde(default)]
    pub goal_directedness: Option<ParamValue>,
    #[serde(default)]
    pub securing_rate: Option<ParamValue>,
}

impl RawAffectParameters {
    /// Validate all six fields. A missing field and an out-of-range field
    /// are both rejected; nothing is clamped.
    pub fn validate(&self) -> Result<AffectParameters, ValidationError> {
        let fields = [
            ("valence_level", self.valence_level),
            ("arousal_level", self.arousal_level),
            ("selection_threshold", self.selection_threshold),
            ("resolution_level", self.resolution_level),
            ("goal_directedness", self.goal_directedness),
            ("securing_rate", self.securing_rate),
        ];
        let mut checked = [0u8; 6];
        // Walk in declaration order so the first bad field, missing or out of
        // range, is the one reported.
        for (slot, (parameter, value)) in checked.iter_mut().zip(fields) {
            *slot = match value {
                None => return Err(ValidationError::Missing { parameter }),
                Some(ParamValue::NotAnInteger) => {
                    return Err(ValidationError::NotAnInteger { parameter })
                }
                Some(ParamValue::Integer(v)) => check_range(parameter, v)?,
            };
        }

        let [valence, arousal, selection_threshold, resolution, goal_directedness, securing_rate] =
            checked;
        Ok(AffectParameters {
            valence,
            arousal,
            selection_threshold,
            resolution,
            goal_directedness,
            securing_rate,
        })
    }
}

impl From<AffectParameters> for RawAffectParameters {
    fn from(p: AffectParameters) -> Self {
        let wire = |v: u8| Some(ParamValue::Integer(v.into()));
        Self {
            valence_level: wire(p.valence),
            arousal_level: wire(p.arousal),
            selection_threshold: wire(p.selection_threshold),
            resolution_level: wire(p.resolution),
            goal_directedness: wire(p.goal_directedness),
            securing_rate: wire(p.securing_rate),
        }
    }
}

/// Derived (sadness, anger) intensities, each in `[1, 5]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionLevels {
    pub sadness: u8,
    pub anger: u8,
}

impl Default for EmotionLevels {
    fn default() -> Self {
        Self {
            sadness: EMOTION_MIN,
            anger: EMOTION_MIN,
        }
    }
}

impl EmotionLevels {
    /// Build from unbounded intermediate scores, clamping each independently.
    pub fn clamped(sadness: i32, anger: i32) -> Self {
        let clamp = |v: i32| v.clamp(EMOTION_MIN as i32, EMOTION_MAX as i32) as u8;
        Self {
            sadness: clamp(sadness),
            anger: clamp(anger),
        }
    }
}
