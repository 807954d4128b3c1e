//! # Chord Transposition
//!
//! Shifts chord symbols by a signed number of semitones.
//!
//! Only the root (and the bass note of a slash chord) moves; the suffix is
//! copied verbatim. Output is always spelled with sharps from
//! [`PITCH_NOTES`]. Anything that does not start with a note letter is
//! returned untouched, so free-text annotations never break rendering.
//!
//! ## Rules
//! 1. A whole number of octaves (including 0) returns the input unchanged.
//! 2. The separator token `/` is returned unchanged.
//! 3. `base/bass` transposes both halves by the same amount.
//! 4. Symbols with more than one `/` are unsupported and pass through.
//! 5. Unrecognized roots pass through.

use tracing::trace;

use crate::chord::{parse_root, SEPARATOR};

/// Pitch class names, indexed by semitones above C.
pub const PITCH_NOTES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Shift a pitch class index by `semitones`, wrapping around the octave.
///
/// Defined for every `i32`, including negative and very large offsets.
pub fn shift_pitch_class(index: usize, semitones: i32) -> usize {
    let shift = semitones.rem_euclid(12) as usize;
    (index % 12 + shift) % 12
}

/// Transpose a chord symbol by `semitones`.
///
/// # Examples
/// ```
/// use chordsheet::transpose;
///
/// assert_eq!(transpose("Am7", 3), "Cm7");
/// assert_eq!(transpose("C/E", 2), "D/F#");
/// assert_eq!(transpose("G", -8), "B");
/// assert_eq!(transpose("Bb", 2), "C");
///
/// // Pass-through cases
/// assert_eq!(transpose("/", 5), "/");
/// assert_eq!(transpose("???", 5), "???");
/// assert_eq!(transpose("Bb", 0), "Bb");
/// assert_eq!(transpose("Bb", 12), "Bb");
/// ```
pub fn transpose(chord_symbol: &str, semitones: i32) -> String {
    if semitones.rem_euclid(12) == 0 || chord_symbol == SEPARATOR {
        return chord_symbol.to_string();
    }

    match chord_symbol.matches('/').count() {
        0 => transpose_simple(chord_symbol, semitones),
        1 => match chord_symbol.split_once('/') {
            Some((base, bass)) => format!(
                "{}/{}",
                transpose_simple(base, semitones),
                transpose_simple(bass, semitones)
            ),
            None => chord_symbol.to_string(),
        },
        _ => {
            trace!("multi-slash chord {:?} passed through", chord_symbol);
            chord_symbol.to_string()
        }
    }
}

/// Transpose a symbol without a slash.
fn transpose_simple(symbol: &str, semitones: i32) -> String {
    match parse_root(symbol) {
        Some((root, suffix)) => {
            let index = shift_pitch_class(root.pitch_class(), semitones);
            format!("{}{}", PITCH_NOTES[index], suffix)
        }
        None => {
            if !symbol.is_empty() {
                trace!("unrecognized chord {:?} passed through", symbol);
            }
            symbol.to_string()
        }
    }
}

/// Transpose every chord name in a sequence.
pub fn transpose_all<S: AsRef<str>>(names: &[S], semitones: i32) -> Vec<String> {
    names
        .iter()
        .map(|name| transpose(name.as_ref(), semitones))
        .collect()
}
