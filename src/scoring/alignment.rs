//! Dynamic time warping between a target melody and an attempt.
//!
//! Three cost grids are filled side by side from the same step costs:
//! pitch alone, timing alone, and their weighted combination. The combined
//! grid drives path reconstruction; the pitch grid's corner feeds the pitch
//! similarity. Timing similarity comes from per-pair errors along the path
//! rather than from its grid.

use std::ops::{Index, IndexMut};

use tracing::trace;

use crate::notes::note_name;
use crate::scoring::error::Result;
use crate::scoring::types::{NoteDetail, Timing, TimingDetail};

/// Two octaves: a pitch error this large (after scaling) saturates the cost.
const PITCH_SPAN_SEMITONES: f64 = 24.0;
const PITCH_COST_SCALE: f64 = 1.5;

pub const MAX_ONSET_ERROR_MS: f64 = 600.0;
pub const MAX_DURATION_ERROR_MS: f64 = 350.0;
const TIMING_COST_SCALE: f64 = 1.2;

/// Onset vs duration share of the timing cost and of timing accuracy.
pub const ONSET_SHARE: f64 = 0.7;
pub const DURATION_SHARE: f64 = 0.3;

const PITCH_ACCURACY_CURVE: f64 = 1.3;
const TIMING_GOODNESS_CURVE: f64 = 1.2;
const SIMILARITY_CURVE: f64 = 1.5;

/// Corner distance that maps to zero similarity, as a fraction of the
/// shorter melody's length. Calibrated against historical scores.
const MAX_DISTANCE_RATIO: f64 = 0.5;

/// Per-step weights of the combined grid.
#[derive(Debug, Clone, Copy)]
pub struct AlignmentWeights {
    pub pitch: f64,
    pub timing: f64,
}

impl AlignmentWeights {
    pub const DEFAULT: AlignmentWeights = AlignmentWeights {
        pitch: 0.6,
        timing: 0.4,
    };
}

impl Default for AlignmentWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Row-major (rows x cols) grid of accumulated costs, initialized to +inf.
#[derive(Debug, Clone)]
pub struct CostGrid {
    cols: usize,
    cells: Vec<f64>,
}

impl CostGrid {
    pub fn new(rows: usize, cols: usize) -> Self {
        let mut cells = vec![f64::INFINITY; rows * cols];
        if let Some(origin) = cells.first_mut() {
            *origin = 0.0;
        }
        CostGrid { cols, cells }
    }

    /// Cheapest of the up, left and diagonal neighbours of (i, j).
    fn min_predecessor(&self, i: usize, j: usize) -> f64 {
        self[(i - 1, j)].min(self[(i, j - 1)]).min(self[(i - 1, j - 1)])
    }

    /// Classic DTW recurrence for one cell.
    fn accumulate(&mut self, i: usize, j: usize, step_cost: f64) {
        let best = self.min_predecessor(i, j);
        self[(i, j)] = step_cost + best;
    }
}

impl Index<(usize, usize)> for CostGrid {
    type Output = f64;

    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        &self.cells[i * self.cols + j]
    }
}

impl IndexMut<(usize, usize)> for CostGrid {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f64 {
        &mut self.cells[i * self.cols + j]
    }
}

/// Outcome of aligning an attempt against a target.
#[derive(Debug, Clone, Default)]
pub struct Alignment {
    /// Aligned (target index, attempt index) pairs in forward order.
    pub path: Vec<(usize, usize)>,
    pub note_details: Vec<NoteDetail>,
    pub combined_distance: f64,
    pub pitch_distance: f64,
    pub timing_distance: f64,
    pub combined_similarity: f64,
    pub pitch_similarity: f64,
    pub timing_similarity: f64,
    pub pitch_accuracy: f64,
    pub timing_accuracy: f64,
}

fn pitch_step_cost(target: i32, attempt: i32) -> f64 {
    let semitones = (target as f64 - attempt as f64).abs();
    (semitones / PITCH_SPAN_SEMITONES * PITCH_COST_SCALE).min(1.0)
}

fn timing_step_cost(onset_error: f64, duration_error: f64) -> f64 {
    let onset_cost = (onset_error / MAX_ONSET_ERROR_MS * TIMING_COST_SCALE).min(1.0);
    let duration_cost = (duration_error / MAX_DURATION_ERROR_MS * TIMING_COST_SCALE).min(1.0);
    ONSET_SHARE * onset_cost + DURATION_SHARE * duration_cost
}

/// Map an absolute error onto [0, 1], 1 being a perfect hit.
fn timing_goodness(error: f64, max_error: f64) -> f64 {
    (1.0 - (error / max_error).min(1.0)).powf(TIMING_GOODNESS_CURVE)
}

/// Mean onset and duration goodness over the aligned pairs that carry timing.
pub fn timing_goodness_means(details: &[NoteDetail]) -> Option<(f64, f64)> {
    let timed: Vec<&TimingDetail> = details.iter().filter_map(|d| d.timing.as_ref()).collect();
    if timed.is_empty() {
        return None;
    }
    let count = timed.len() as f64;
    let onset = timed
        .iter()
        .map(|t| timing_goodness(t.onset_error, MAX_ONSET_ERROR_MS))
        .sum::<f64>()
        / count;
    let duration = timed
        .iter()
        .map(|t| timing_goodness(t.duration_error, MAX_DURATION_ERROR_MS))
        .sum::<f64>()
        / count;
    Some((onset, duration))
}

fn distance_to_similarity(distance: f64, max_distance: f64) -> f64 {
    if max_distance <= 0.0 {
        return 0.0;
    }
    1.0 - (distance / max_distance).min(1.0)
}

/// Walk back from (n, m) along the cheapest combined-cost neighbour.
/// Ties prefer the diagonal, then up, then left.
fn backtrack(grid: &CostGrid, n: usize, m: usize) -> Vec<(usize, usize)> {
    let mut path = Vec::with_capacity(n + m);
    let (mut i, mut j) = (n, m);
    while i > 0 && j > 0 {
        path.push((i - 1, j - 1));
        let diagonal = grid[(i - 1, j - 1)];
        let up = grid[(i - 1, j)];
        let left = grid[(i, j - 1)];
        if diagonal <= up && diagonal <= left {
            i -= 1;
            j -= 1;
        } else if up <= left {
            i -= 1;
        } else {
            j -= 1;
        }
    }
    path.reverse();
    path
}

/// Attempt onsets shifted so the first attempt note starts with the first target note.
fn shifted_onsets(timing: &Timing) -> Vec<f64> {
    let offset = match (timing.attempt_onsets.first(), timing.target_onsets.first()) {
        (Some(attempt), Some(target)) => attempt - target,
        _ => 0.0,
    };
    timing.attempt_onsets.iter().map(|onset| onset - offset).collect()
}

/// Align `attempt` against `target`, optionally using note timing.
///
/// Timing arrays must match their melodies' lengths. An empty melody on
/// either side yields an empty alignment with zero similarities.
pub fn align(target: &[i32], attempt: &[i32], timing: Option<&Timing>) -> Result<Alignment> {
    let (n, m) = (target.len(), attempt.len());
    if let Some(t) = timing {
        t.validate(n, m)?;
    }
    if n == 0 || m == 0 {
        return Ok(Alignment::default());
    }

    let weights = AlignmentWeights::DEFAULT;
    let attempt_onsets = timing.map(shifted_onsets);

    let mut pitch_grid = CostGrid::new(n + 1, m + 1);
    let mut timing_grid = CostGrid::new(n + 1, m + 1);
    let mut combined_grid = CostGrid::new(n + 1, m + 1);

    for i in 1..=n {
        for j in 1..=m {
            let pitch_cost = pitch_step_cost(target[i - 1], attempt[j - 1]);

            let timing_cost = match (timing, &attempt_onsets) {
                (Some(t), Some(onsets)) => {
                    let onset_error = (t.target_onsets[i - 1] - onsets[j - 1]).abs();
                    let duration_error =
                        (t.target_durations[i - 1] - t.attempt_durations[j - 1]).abs();
                    let cost = timing_step_cost(onset_error, duration_error);
                    timing_grid.accumulate(i, j, cost);
                    cost
                }
                _ => {
                    timing_grid[(i, j)] = timing_grid[(i - 1, j - 1)];
                    0.0
                }
            };

            pitch_grid.accumulate(i, j, pitch_cost);
            combined_grid.accumulate(
                i,
                j,
                weights.pitch * pitch_cost + weights.timing * timing_cost,
            );
        }
    }

    let path = backtrack(&combined_grid, n, m);
    trace!(target_len = n, attempt_len = m, path_len = path.len(), "dtw path reconstructed");

    let note_details: Vec<NoteDetail> = path
        .iter()
        .map(|&(i, j)| NoteDetail {
            target_index: i,
            attempt_index: j,
            target_note: target[i],
            target_name: note_name(target[i]),
            attempt_note: attempt[j],
            attempt_name: note_name(attempt[j]),
            is_match: target[i] == attempt[j],
            timing: match (timing, &attempt_onsets) {
                (Some(t), Some(onsets)) => Some(TimingDetail {
                    onset_error: (t.target_onsets[i] - onsets[j]).abs(),
                    duration_error: (t.target_durations[i] - t.attempt_durations[j]).abs(),
                    target_onset: t.target_onsets[i],
                    attempt_onset: onsets[j],
                    target_duration: t.target_durations[i],
                    attempt_duration: t.attempt_durations[j],
                }),
                _ => None,
            },
        })
        .collect();

    let matches = note_details.iter().filter(|d| d.is_match).count();
    let pitch_accuracy = (matches as f64 / note_details.len() as f64).powf(PITCH_ACCURACY_CURVE);

    let timing_accuracy = timing_goodness_means(&note_details)
        .map(|(onset, duration)| ONSET_SHARE * onset + DURATION_SHARE * duration)
        .unwrap_or(0.0);

    let max_distance = MAX_DISTANCE_RATIO * n.min(m) as f64;
    let combined_distance = combined_grid[(n, m)];
    let pitch_distance = pitch_grid[(n, m)];

    Ok(Alignment {
        path,
        note_details,
        combined_distance,
        pitch_distance,
        timing_distance: timing_grid[(n, m)],
        combined_similarity: distance_to_similarity(combined_distance, max_distance)
            .powf(SIMILARITY_CURVE),
        pitch_similarity: distance_to_similarity(pitch_distance, max_distance)
            .powf(SIMILARITY_CURVE),
        timing_similarity: timing_accuracy,
        pitch_accuracy,
        timing_accuracy,
    })
}
