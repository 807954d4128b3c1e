//! Guitar fingerings for chord diagrams.
//!
//! Only a small table of open-position chords is built in. Anything else is
//! approximated from its root letter, and non-chords get the C diagram, so
//! every chord name shown gets some diagram.

use serde::Serialize;

use crate::chord::parse_root;

/// Fret per string, low E to high E. `-1` is muted, `0` is open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fingering {
    pub frets: [i8; 6],
    pub label: &'static str,
}

const FINGERINGS: &[(&str, Fingering)] = &[
    // Major
    ("C", Fingering { frets: [-1, 3, 2, 0, 1, 0], label: "C Major" }),
    ("D", Fingering { frets: [-1, -1, 0, 2, 3, 2], label: "D Major" }),
    ("E", Fingering { frets: [0, 2, 2, 1, 0, 0], label: "E Major" }),
    ("F", Fingering { frets: [1, 3, 3, 2, 1, 1], label: "F Major" }),
    ("G", Fingering { frets: [3, 2, 0, 0, 0, 3], label: "G Major" }),
    ("A", Fingering { frets: [0, 0, 2, 2, 2, 0], label: "A Major" }),
    ("B", Fingering { frets: [-1, 2, 4, 4, 4, 2], label: "B Major" }),
    // Minor
    ("Am", Fingering { frets: [0, 0, 2, 2, 1, 0], label: "A Minor" }),
    ("Bm", Fingering { frets: [-1, 2, 4, 4, 3, 2], label: "B Minor" }),
    ("Cm", Fingering { frets: [-1, 3, 5, 5, 4, 3], label: "C Minor" }),
    ("Dm", Fingering { frets: [-1, -1, 0, 2, 3, 1], label: "D Minor" }),
    ("Em", Fingering { frets: [0, 2, 2, 0, 0, 0], label: "E Minor" }),
    ("Fm", Fingering { frets: [1, 3, 3, 1, 1, 1], label: "F Minor" }),
    ("Gm", Fingering { frets: [3, 5, 5, 3, 3, 3], label: "G Minor" }),
    // Dominant 7th
    ("A7", Fingering { frets: [0, 0, 2, 0, 2, 0], label: "A7" }),
    ("B7", Fingering { frets: [-1, 2, 1, 2, 0, 2], label: "B7" }),
    ("C7", Fingering { frets: [0, 3, 2, 3, 1, 0], label: "C7" }),
    ("D7", Fingering { frets: [-1, -1, 0, 2, 1, 2], label: "D7" }),
    ("E7", Fingering { frets: [0, 2, 0, 1, 0, 0], label: "E7" }),
    ("F7", Fingering { frets: [1, 3, 1, 2, 1, 1], label: "F7" }),
    ("G7", Fingering { frets: [3, 2, 0, 0, 0, 1], label: "G7" }),
];

fn lookup(name: &str) -> Option<&'static Fingering> {
    FINGERINGS
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, fingering)| fingering)
}

/// Fingering to draw for `name`.
///
/// Names outside the table are approximated by their root letter: minor
/// qualities map to the minor chord, everything else to the major chord.
/// Accidentals are ignored for the approximation.
///
/// # Examples
/// ```
/// use chordsheet::diagram::fingering;
///
/// assert_eq!(fingering("Am").label, "A Minor");
/// assert_eq!(fingering("Dsus4").label, "D Major");
/// assert_eq!(fingering("F#m7").label, "F Minor");
/// assert_eq!(fingering("???").label, "C Major");
/// ```
pub fn fingering(name: &str) -> &'static Fingering {
    if let Some(found) = lookup(name) {
        return found;
    }

    let base = name.split('/').next().unwrap_or_default();
    let Some((root, suffix)) = parse_root(base) else {
        return &FINGERINGS[0].1;
    };

    let letter = root.letter.as_char();
    let minor = suffix.starts_with('m') && !suffix.starts_with("maj");
    let approximate = if minor {
        lookup(&format!("{}m", letter))
    } else {
        None
    };

    approximate
        .or_else(|| lookup(&letter.to_string()))
        .unwrap_or(&FINGERINGS[0].1)
}
