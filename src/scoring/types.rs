use serde::{Deserialize, Serialize};

use crate::scoring::error::{MatchError, Result};

/// Parallel onset/duration arrays for both melodies, in milliseconds.
///
/// Timing is all-or-nothing: either every array is present or the
/// comparison runs on pitch alone.
#[derive(Clone, Copy, Debug)]
pub struct Timing<'a> {
    pub target_onsets: &'a [f64],
    pub attempt_onsets: &'a [f64],
    pub target_durations: &'a [f64],
    pub attempt_durations: &'a [f64],
}

impl<'a> Timing<'a> {
    /// Check that every array matches the length of the melody it annotates.
    pub fn validate(&self, target_len: usize, attempt_len: usize) -> Result<()> {
        let checks = [
            ("target_onsets", self.target_onsets.len(), target_len),
            ("attempt_onsets", self.attempt_onsets.len(), attempt_len),
            ("target_durations", self.target_durations.len(), target_len),
            ("attempt_durations", self.attempt_durations.len(), attempt_len),
        ];
        for (field, actual, expected) in checks {
            if actual != expected {
                return Err(MatchError::ShapeMismatch {
                    field,
                    expected,
                    actual,
                });
            }
        }
        Ok(())
    }
}

// Request types (wasm boundary)

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ComparisonRequest {
    #[serde(alias = "melody1")]
    pub target: Vec<i32>,
    #[serde(alias = "melody2")]
    pub attempt: Vec<i32>,
    #[serde(default, alias = "timings1")]
    pub target_onsets: Option<Vec<f64>>,
    #[serde(default, alias = "timings2")]
    pub attempt_onsets: Option<Vec<f64>>,
    #[serde(default, alias = "durations1")]
    pub target_durations: Option<Vec<f64>>,
    #[serde(default, alias = "durations2")]
    pub attempt_durations: Option<Vec<f64>>,
}

impl ComparisonRequest {
    /// Borrow the timing arrays, if the request carries a complete set.
    ///
    /// Empty arrays count as absent for a non-empty melody, matching how the
    /// web client omits timing for pitch-only recordings. An empty melody
    /// takes whatever shape the other side's timing has, so it still scores
    /// zero instead of failing.
    pub fn timing(&self) -> Result<Option<Timing<'_>>> {
        enum Slot<'a> {
            Given(&'a [f64]),
            Empty,
            Missing,
        }

        fn slot<'a>(values: &'a Option<Vec<f64>>, melody: &[i32]) -> Slot<'a> {
            match values.as_deref() {
                Some(v) if !v.is_empty() => Slot::Given(v),
                _ if melody.is_empty() => Slot::Empty,
                _ => Slot::Missing,
            }
        }

        let fields = [
            ("target_onsets", slot(&self.target_onsets, &self.target)),
            ("attempt_onsets", slot(&self.attempt_onsets, &self.attempt)),
            ("target_durations", slot(&self.target_durations, &self.target)),
            ("attempt_durations", slot(&self.attempt_durations, &self.attempt)),
        ];

        if !fields.iter().any(|(_, s)| matches!(s, Slot::Given(_))) {
            return Ok(None);
        }

        let missing = fields
            .iter()
            .filter(|(_, s)| matches!(s, Slot::Missing))
            .map(|(name, _)| *name)
            .collect::<Vec<_>>();
        if !missing.is_empty() {
            return Err(MatchError::IncompleteTiming {
                missing: missing.join(", "),
            });
        }

        let [target_onsets, attempt_onsets, target_durations, attempt_durations] =
            fields.map(|(_, s)| match s {
                Slot::Given(v) => v,
                Slot::Empty | Slot::Missing => &[][..],
            });
        Ok(Some(Timing {
            target_onsets,
            attempt_onsets,
            target_durations,
            attempt_durations,
        }))
    }
}

// Alignment output

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TimingDetail {
    pub onset_error: f64,
    pub duration_error: f64,
    pub target_onset: f64,
    /// Attempt onset after shifting its first note onto the target's.
    pub attempt_onset: f64,
    pub target_duration: f64,
    pub attempt_duration: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NoteDetail {
    pub target_index: usize,
    pub attempt_index: usize,
    pub target_note: i32,
    pub target_name: String,
    pub attempt_note: i32,
    pub attempt_name: String,
    pub is_match: bool,
    pub timing: Option<TimingDetail>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct IndividualScores {
    pub dtw_combined: f64,
    pub dtw_pitch: f64,
    pub dtw_timing: f64,
    pub levenshtein: f64,
    pub lcs: f64,
    pub cosine: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ComparisonResult {
    pub final_score: f64, // 0-1
    pub pitch_accuracy: f64,
    pub timing_accuracy: f64, // 0 when no timing supplied
    pub has_timing: bool,
    pub onset_accuracy: Option<f64>,
    pub duration_accuracy: Option<f64>,
    pub individual_scores: IndividualScores,
    pub note_details: Vec<NoteDetail>,
}

// Difficulty

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DifficultyLevel {
    #[serde(rename = "Very Easy")]
    VeryEasy,
    Easy,
    Intermediate,
    Hard,
    #[serde(rename = "Very Hard")]
    VeryHard,
}

impl DifficultyLevel {
    pub fn from_score(score: f64) -> Self {
        if score < 0.2 {
            DifficultyLevel::VeryEasy
        } else if score < 0.4 {
            DifficultyLevel::Easy
        } else if score < 0.6 {
            DifficultyLevel::Intermediate
        } else if score < 0.8 {
            DifficultyLevel::Hard
        } else {
            DifficultyLevel::VeryHard
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyLevel::VeryEasy => "Very Easy",
            DifficultyLevel::Easy => "Easy",
            DifficultyLevel::Intermediate => "Intermediate",
            DifficultyLevel::Hard => "Hard",
            DifficultyLevel::VeryHard => "Very Hard",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct DifficultyFactors {
    pub length: f64,
    pub interval: f64,
    pub range: f64,
    pub uniqueness: f64,
}

/// Raw measurements behind the normalized factors.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct MelodyAnalysis {
    pub note_count: usize,
    pub avg_interval: f64,
    pub range_semitones: i64,
    pub unique_notes: usize,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct DifficultyResult {
    pub difficulty: f64,
    pub level: DifficultyLevel,
    pub factors: DifficultyFactors,
    pub analysis: MelodyAnalysis,
}
