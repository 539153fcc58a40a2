/// Shift every pitch in a melody by a fixed number of semitones.
/// Results saturate at the `i32` bounds rather than wrapping.
pub fn transpose(melody: &[i32], semitones: i32) -> Vec<i32> {
    melody.iter().map(|&midi| midi.saturating_add(semitones)).collect()
}
