use std::collections::HashSet;

use tracing::debug;

use crate::scoring::types::{DifficultyFactors, DifficultyLevel, DifficultyResult, MelodyAnalysis};

// Values at which each factor saturates.
const FULL_LENGTH_NOTES: f64 = 32.0;
const FULL_INTERVAL_SEMITONES: f64 = 12.0;
const FULL_RANGE_SEMITONES: f64 = 24.0;
const FULL_UNIQUE_NOTES: f64 = 12.0;

const LENGTH_WEIGHT: f64 = 0.3;
const INTERVAL_WEIGHT: f64 = 0.3;
const RANGE_WEIGHT: f64 = 0.2;
const UNIQUENESS_WEIGHT: f64 = 0.2;

/// Estimate how hard a melody is to play back, from its shape alone.
pub fn estimate_difficulty(melody: &[i32]) -> DifficultyResult {
    if melody.len() < 2 {
        return DifficultyResult {
            difficulty: 0.0,
            level: DifficultyLevel::VeryEasy,
            factors: DifficultyFactors::default(),
            analysis: MelodyAnalysis {
                note_count: melody.len(),
                ..MelodyAnalysis::default()
            },
        };
    }

    let intervals: Vec<f64> = melody
        .windows(2)
        .map(|pair| (pair[1] as f64 - pair[0] as f64).abs())
        .collect();
    let avg_interval = intervals.iter().sum::<f64>() / intervals.len() as f64;

    let (low, high) = melody
        .iter()
        .fold((i32::MAX, i32::MIN), |(lo, hi), &m| (lo.min(m), hi.max(m)));
    let range_semitones = high as i64 - low as i64;

    let unique_notes = melody.iter().collect::<HashSet<_>>().len();

    let factors = DifficultyFactors {
        length: (melody.len() as f64 / FULL_LENGTH_NOTES).min(1.0),
        interval: (avg_interval / FULL_INTERVAL_SEMITONES).min(1.0),
        range: (range_semitones as f64 / FULL_RANGE_SEMITONES).min(1.0),
        uniqueness: (unique_notes as f64 / FULL_UNIQUE_NOTES).min(1.0),
    };

    let difficulty = LENGTH_WEIGHT * factors.length
        + INTERVAL_WEIGHT * factors.interval
        + RANGE_WEIGHT * factors.range
        + UNIQUENESS_WEIGHT * factors.uniqueness;
    let level = DifficultyLevel::from_score(difficulty);

    debug!(notes = melody.len(), difficulty, level = level.as_str(), "difficulty estimated");

    DifficultyResult {
        difficulty,
        level,
        factors,
        analysis: MelodyAnalysis {
            note_count: melody.len(),
            avg_interval,
            range_semitones,
            unique_notes,
        },
    }
}
