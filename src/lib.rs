use wasm_bindgen::prelude::*;

pub mod notes;
pub mod scoring;
pub mod transposition;

pub use scoring::error::MatchError;
pub use scoring::types::{
    ComparisonRequest, ComparisonResult, DifficultyResult, NoteDetail, Timing,
};

/// Compare an attempt against a target melody.
///
/// Takes a `ComparisonRequest` object; the web client's `melody1`/`melody2`,
/// `timings1`/`timings2` and `durations1`/`durations2` keys are accepted too.
#[wasm_bindgen]
pub fn compare_melodies(request_js: JsValue) -> Result<JsValue, JsValue> {
    let request: ComparisonRequest =
        serde_wasm_bindgen::from_value(request_js).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let timing = request
        .timing()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let result = scoring::compare::compare_melodies(&request.target, &request.attempt, timing.as_ref())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_wasm_bindgen::to_value(&result).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Estimate a melody's difficulty, returning the full `DifficultyResult`.
/// Accepts any JS numbers; fractional pitches are truncated.
#[wasm_bindgen]
pub fn estimate_difficulty(melody_js: JsValue) -> Result<JsValue, JsValue> {
    let numbers: Vec<f64> =
        serde_wasm_bindgen::from_value(melody_js).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let melody = notes::truncate_pitches(&numbers);
    let result = scoring::difficulty::estimate_difficulty(&melody);
    serde_wasm_bindgen::to_value(&result).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Difficulty as Float64Array [difficulty, length, interval, range, uniqueness].
#[wasm_bindgen]
pub fn difficulty_factors(melody: &[i32]) -> js_sys::Float64Array {
    let result = scoring::difficulty::estimate_difficulty(melody);

    let arr = js_sys::Float64Array::new_with_length(5);
    arr.set_index(0, result.difficulty);
    arr.set_index(1, result.factors.length);
    arr.set_index(2, result.factors.interval);
    arr.set_index(3, result.factors.range);
    arr.set_index(4, result.factors.uniqueness);
    arr
}

#[wasm_bindgen]
pub fn note_name(midi: i32) -> String {
    notes::note_name(midi)
}

#[wasm_bindgen]
pub fn transpose_melody(melody: &[i32], semitones: i32) -> Vec<i32> {
    transposition::transpose(melody, semitones)
}

#[wasm_bindgen]
pub fn letter_grade(score: f64) -> String {
    scoring::grade::letter_grade(score).as_str().to_string()
}
