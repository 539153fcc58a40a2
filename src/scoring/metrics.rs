//! Pairwise sequence metrics over raw pitch values.

use std::collections::BTreeMap;

/// Levenshtein distance; pitches match only when numerically equal.
pub fn levenshtein_distance(seq1: &[i32], seq2: &[i32]) -> usize {
    let m = seq2.len();
    // Two rolling rows of the (n+1)x(m+1) table.
    let mut prev: Vec<usize> = (0..=m).collect();
    let mut curr = vec![0usize; m + 1];

    for (i, a) in seq1.iter().enumerate() {
        curr[0] = i + 1;
        for (j, b) in seq2.iter().enumerate() {
            curr[j + 1] = if a == b {
                prev[j]
            } else {
                1 + prev[j + 1].min(curr[j]).min(prev[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[m]
}

/// Length of the longest common subsequence.
pub fn lcs_length(seq1: &[i32], seq2: &[i32]) -> usize {
    let m = seq2.len();
    let mut prev = vec![0usize; m + 1];
    let mut curr = vec![0usize; m + 1];

    for a in seq1 {
        for (j, b) in seq2.iter().enumerate() {
            curr[j + 1] = if a == b {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[m]
}

fn pitch_histogram(seq: &[i32]) -> BTreeMap<i32, f64> {
    let mut hist = BTreeMap::new();
    for &note in seq {
        *hist.entry(note).or_insert(0.0) += 1.0;
    }
    hist
}

/// Raw cosine similarity of the two pitch histograms, in [0, 1].
///
/// Bins are visited in ascending pitch order, so the sums accumulate in the
/// same order as a dense histogram over `[0, max_pitch]` would.
pub fn cosine_similarity(seq1: &[i32], seq2: &[i32]) -> f64 {
    if seq1.is_empty() || seq2.is_empty() {
        return 0.0;
    }

    let hist1 = pitch_histogram(seq1);
    let hist2 = pitch_histogram(seq2);

    let dot: f64 = hist1
        .iter()
        .filter_map(|(note, c1)| hist2.get(note).map(|c2| c1 * c2))
        .sum();
    let norm1 = hist1.values().map(|c| c * c).sum::<f64>().sqrt();
    let norm2 = hist2.values().map(|c| c * c).sum::<f64>().sqrt();

    if norm1 == 0.0 || norm2 == 0.0 {
        return 0.0;
    }

    (dot / (norm1 * norm2)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_basic() {
        assert_eq!(levenshtein_distance(&[60, 62, 64], &[60, 62, 64]), 0);
        assert_eq!(levenshtein_distance(&[60, 62, 64], &[60, 63, 64]), 1);
        assert_eq!(levenshtein_distance(&[60, 62, 64], &[60, 64]), 1);
        assert_eq!(levenshtein_distance(&[60, 64], &[60, 62, 64]), 1);
        assert_eq!(levenshtein_distance(&[60, 62], &[70, 72, 74]), 3);
    }

    #[test]
    fn test_levenshtein_empty() {
        assert_eq!(levenshtein_distance(&[], &[]), 0);
        assert_eq!(levenshtein_distance(&[60, 62], &[]), 2);
        assert_eq!(levenshtein_distance(&[], &[60, 62, 64]), 3);
    }

    #[test]
    fn test_levenshtein_shifted_run() {
        // Chromatic run against itself shifted up two semitones:
        // drop two notes at the front, add two at the back.
        let run: Vec<i32> = (60..84).collect();
        let shifted: Vec<i32> = (62..86).collect();
        assert_eq!(levenshtein_distance(&run, &shifted), 4);
    }

    #[test]
    fn test_lcs_basic() {
        assert_eq!(lcs_length(&[60, 62, 64, 65], &[60, 64, 65]), 3);
        assert_eq!(lcs_length(&[60, 62, 64], &[64, 62, 60]), 1);
        assert_eq!(lcs_length(&[60, 62], &[70, 72]), 0);
        assert_eq!(lcs_length(&[], &[60]), 0);
    }

    #[test]
    fn test_lcs_bounded_by_shorter() {
        let a = [60, 60, 67, 67, 69, 69, 67];
        let b = [60, 67, 69];
        assert_eq!(lcs_length(&a, &b), 3);
    }

    #[test]
    fn test_cosine_identical() {
        let melody = [60, 60, 67, 67, 69, 69, 67];
        let sim = cosine_similarity(&melody, &melody);
        assert!((sim - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_disjoint() {
        assert_eq!(cosine_similarity(&[60, 62], &[72, 74]), 0.0);
    }

    #[test]
    fn test_cosine_empty() {
        assert_eq!(cosine_similarity(&[], &[60]), 0.0);
        assert_eq!(cosine_similarity(&[60], &[]), 0.0);
    }

    #[test]
    fn test_cosine_ignores_order() {
        let sim = cosine_similarity(&[60, 62, 64], &[64, 60, 62]);
        assert!((sim - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_partial_overlap() {
        // hist1 = {60:1, 62:1}, hist2 = {60:1, 64:1} -> 1 / 2
        let sim = cosine_similarity(&[60, 62], &[60, 64]);
        assert!((sim - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_out_of_range_pitches() {
        let sim = cosine_similarity(&[-5, 200], &[-5, 300]);
        assert!((sim - 0.5).abs() < 1e-12);
    }
}
