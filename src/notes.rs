const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Lowest and highest pitch with a display name (C3..B4, the on-screen keyboard).
pub const NAMED_LOW: i32 = 48;
pub const NAMED_HIGH: i32 = 71;

/// Display name for a MIDI pitch, e.g. 60 -> "C4".
/// Pitches off the two-octave keyboard come back as `Unknown(<value>)`.
pub fn note_name(midi: i32) -> String {
    if !(NAMED_LOW..=NAMED_HIGH).contains(&midi) {
        return format!("Unknown({})", midi);
    }
    let name = NOTE_NAMES[midi.rem_euclid(12) as usize];
    let octave = midi / 12 - 1;
    format!("{}{}", name, octave)
}

/// Whole MIDI pitches from raw numbers, truncating toward zero.
/// NaN becomes 0 and out-of-range values saturate.
pub fn truncate_pitches(values: &[f64]) -> Vec<i32> {
    values.iter().map(|&v| v as i32).collect()
}
