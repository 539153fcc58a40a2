use tracing::debug;

use crate::scoring::alignment::{align, timing_goodness_means};
use crate::scoring::error::Result;
use crate::scoring::metrics::{cosine_similarity, lcs_length, levenshtein_distance};
use crate::scoring::types::{ComparisonResult, IndividualScores, Timing};

/// Discrimination curve shared by the edit-distance, LCS and cosine scores.
const METRIC_CURVE: f64 = 1.5;
/// Outermost curve applied to the weighted sum.
const FINAL_CURVE: f64 = 1.15;

/// Weights of the final score. The timing term drops out, and the rest are
/// renormalized, when no timing data is supplied.
#[derive(Debug, Clone, Copy)]
pub struct ScoreWeights {
    pub dtw_pitch: f64,
    pub dtw_timing: f64,
    pub levenshtein: f64,
    pub lcs: f64,
    pub cosine: f64,
}

impl ScoreWeights {
    pub const DEFAULT: ScoreWeights = ScoreWeights {
        dtw_pitch: 0.4,
        dtw_timing: 0.3,
        levenshtein: 0.15,
        lcs: 0.1,
        cosine: 0.05,
    };

    fn combine(&self, scores: &IndividualScores, with_timing: bool) -> f64 {
        if with_timing {
            self.dtw_pitch * scores.dtw_pitch
                + self.dtw_timing * scores.dtw_timing
                + self.levenshtein * scores.levenshtein
                + self.lcs * scores.lcs
                + self.cosine * scores.cosine
        } else {
            let pitch_only = self.dtw_pitch * scores.dtw_pitch
                + self.levenshtein * scores.levenshtein
                + self.lcs * scores.lcs
                + self.cosine * scores.cosine;
            let total = self.dtw_pitch + self.levenshtein + self.lcs + self.cosine;
            pitch_only / total
        }
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

fn levenshtein_score(target: &[i32], attempt: &[i32]) -> f64 {
    let max_len = target.len().max(attempt.len());
    if max_len == 0 {
        return 0.0;
    }
    let distance = levenshtein_distance(target, attempt);
    (1.0 - distance as f64 / max_len as f64).powf(METRIC_CURVE)
}

fn lcs_score(target: &[i32], attempt: &[i32]) -> f64 {
    let min_len = target.len().min(attempt.len());
    if min_len == 0 {
        return 0.0;
    }
    (lcs_length(target, attempt) as f64 / min_len as f64).powf(METRIC_CURVE)
}

fn cosine_score(target: &[i32], attempt: &[i32]) -> f64 {
    cosine_similarity(target, attempt).powf(METRIC_CURVE)
}

/// Score how well `attempt` reproduces `target`.
///
/// Empty melodies score zero. Timing arrays, when given, must match their
/// melodies' lengths; that is the only error case.
pub fn compare_melodies(
    target: &[i32],
    attempt: &[i32],
    timing: Option<&Timing>,
) -> Result<ComparisonResult> {
    if let Some(t) = timing {
        t.validate(target.len(), attempt.len())?;
    }

    let has_timing = timing.is_some();
    if target.is_empty() || attempt.is_empty() {
        debug!(
            target_len = target.len(),
            attempt_len = attempt.len(),
            "empty melody, returning zero score"
        );
        return Ok(ComparisonResult {
            has_timing,
            ..ComparisonResult::default()
        });
    }

    let alignment = align(target, attempt, timing)?;

    let individual_scores = IndividualScores {
        dtw_combined: alignment.combined_similarity,
        dtw_pitch: alignment.pitch_similarity,
        dtw_timing: alignment.timing_similarity,
        levenshtein: levenshtein_score(target, attempt),
        lcs: lcs_score(target, attempt),
        cosine: cosine_score(target, attempt),
    };

    let weighted = ScoreWeights::DEFAULT.combine(&individual_scores, has_timing);
    let final_score = weighted.clamp(0.0, 1.0).powf(FINAL_CURVE);

    let (onset_accuracy, duration_accuracy) = match timing_goodness_means(&alignment.note_details)
    {
        Some((onset, duration)) if has_timing => (Some(onset), Some(duration)),
        _ => (None, None),
    };

    debug!(
        target_len = target.len(),
        attempt_len = attempt.len(),
        has_timing,
        path_len = alignment.path.len(),
        final_score,
        "melodies compared"
    );

    Ok(ComparisonResult {
        final_score,
        pitch_accuracy: alignment.pitch_accuracy,
        timing_accuracy: if has_timing {
            alignment.timing_accuracy
        } else {
            0.0
        },
        has_timing,
        onset_accuracy,
        duration_accuracy,
        individual_scores,
        note_details: alignment.note_details,
    })
}
