//! # Chord Symbol Parsing
//!
//! Splits a chord symbol such as `F#m7/A` into its root note, a free-form
//! suffix and an optional bass note.
//!
//! ## Grammar
//! ```text
//! chord  = root suffix [ "/" bass ]
//! bass   = root suffix
//! root   = letter [ accidental ]
//! letter = "A" | "B" | "C" | "D" | "E" | "F" | "G"
//! accidental = "#" | "b"
//! suffix = any text (quality, extensions), kept verbatim
//! ```
//!
//! Flats are recognized and normalized to their sharp equivalent when a
//! pitch class is computed (`Bb` is pitch class 10, spelled `A#`). The lone
//! separator token `/` is not a chord.
//!
//! The root matcher ([`parse_root`]) is the only place that decides what
//! counts as a root; `transpose` uses it too.

use std::fmt;

use crate::error::SheetError;

/// The literal separator token placed between chords while authoring.
pub const SEPARATOR: &str = "/";

/// Natural note letters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteLetter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl NoteLetter {
    fn from_char(c: char) -> Option<Self> {
        match c {
            'C' => Some(NoteLetter::C),
            'D' => Some(NoteLetter::D),
            'E' => Some(NoteLetter::E),
            'F' => Some(NoteLetter::F),
            'G' => Some(NoteLetter::G),
            'A' => Some(NoteLetter::A),
            'B' => Some(NoteLetter::B),
            _ => None,
        }
    }

    /// Semitones above C
    pub fn semitone(self) -> i32 {
        match self {
            NoteLetter::C => 0,
            NoteLetter::D => 2,
            NoteLetter::E => 4,
            NoteLetter::F => 5,
            NoteLetter::G => 7,
            NoteLetter::A => 9,
            NoteLetter::B => 11,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            NoteLetter::C => 'C',
            NoteLetter::D => 'D',
            NoteLetter::E => 'E',
            NoteLetter::F => 'F',
            NoteLetter::G => 'G',
            NoteLetter::A => 'A',
            NoteLetter::B => 'B',
        }
    }
}

/// Accidental written after the root letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Accidental {
    #[default]
    Natural,
    Sharp, // #
    Flat,  // b
}

impl Accidental {
    fn offset(self) -> i32 {
        match self {
            Accidental::Natural => 0,
            Accidental::Sharp => 1,
            Accidental::Flat => -1,
        }
    }
}

/// Root note of a chord, as written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Root {
    pub letter: NoteLetter,
    pub accidental: Accidental,
}

impl Root {
    /// Pitch class index (0 = C ... 11 = B)
    pub fn pitch_class(&self) -> usize {
        (self.letter.semitone() + self.accidental.offset()).rem_euclid(12) as usize
    }
}

impl fmt::Display for Root {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter.as_char())?;
        match self.accidental {
            Accidental::Natural => Ok(()),
            Accidental::Sharp => write!(f, "#"),
            Accidental::Flat => write!(f, "b"),
        }
    }
}

/// Match a root note at the start of `symbol`.
///
/// Returns the root and the remaining suffix, or `None` if the symbol does
/// not start with a note letter.
///
/// # Examples
/// ```
/// use chordsheet::chord::parse_root;
///
/// let (root, suffix) = parse_root("F#m7").unwrap();
/// assert_eq!(root.pitch_class(), 6);
/// assert_eq!(suffix, "m7");
///
/// let (root, suffix) = parse_root("Bbmaj7").unwrap();
/// assert_eq!(root.pitch_class(), 10);
/// assert_eq!(suffix, "maj7");
///
/// assert!(parse_root("N.C.").is_none());
/// ```
pub fn parse_root(symbol: &str) -> Option<(Root, &str)> {
    let letter = NoteLetter::from_char(symbol.chars().next()?)?;
    let rest = &symbol[1..];

    let (accidental, suffix) = if let Some(stripped) = rest.strip_prefix('#') {
        (Accidental::Sharp, stripped)
    } else if let Some(stripped) = rest.strip_prefix('b') {
        (Accidental::Flat, stripped)
    } else {
        (Accidental::Natural, rest)
    };

    Some((Root { letter, accidental }, suffix))
}

/// A parsed chord symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChordSymbol {
    pub root: Root,
    pub suffix: String,
    pub bass: Option<Box<ChordSymbol>>,
}

impl fmt::Display for ChordSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.root, self.suffix)?;
        if let Some(bass) = &self.bass {
            write!(f, "/{}", bass)?;
        }
        Ok(())
    }
}

fn invalid(chord: &str, reason: &str) -> SheetError {
    SheetError::InvalidChord {
        chord: chord.to_string(),
        reason: reason.to_string(),
    }
}

/// Parse a chord symbol strictly.
///
/// Unlike `transpose`, which passes anything it does not understand
/// through, this rejects the separator token, symbols without a root,
/// and symbols with more than one `/`.
///
/// # Examples
/// ```
/// use chordsheet::chord::parse_chord;
///
/// let chord = parse_chord("G#m7/B").unwrap();
/// assert_eq!(chord.suffix, "m7");
/// assert_eq!(chord.bass.as_ref().unwrap().root.pitch_class(), 11);
/// assert_eq!(chord.to_string(), "G#m7/B");
///
/// assert!(parse_chord("C/E/G").is_err());
/// ```
pub fn parse_chord(symbol: &str) -> Result<ChordSymbol, SheetError> {
    if symbol == SEPARATOR {
        return Err(invalid(symbol, "separator token is not a chord"));
    }

    let mut parts = symbol.split('/');
    let head = parts.next().unwrap_or_default();
    let bass = parts.next();
    if parts.next().is_some() {
        return Err(invalid(symbol, "more than one '/'"));
    }

    let (root, suffix) =
        parse_root(head).ok_or_else(|| invalid(symbol, "missing root note (A-G)"))?;

    let bass = match bass {
        Some(bass) => {
            let (bass_root, bass_suffix) = parse_root(bass)
                .ok_or_else(|| invalid(symbol, "missing bass note (A-G) after '/'"))?;
            Some(Box::new(ChordSymbol {
                root: bass_root,
                suffix: bass_suffix.to_string(),
                bass: None,
            }))
        }
        None => None,
    };

    Ok(ChordSymbol {
        root,
        suffix: suffix.to_string(),
        bass,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_root_naturals() {
        for (name, pc) in [("C", 0), ("D", 2), ("E", 4), ("F", 5), ("G", 7), ("A", 9), ("B", 11)] {
            let (root, suffix) = parse_root(name).unwrap();
            assert_eq!(root.pitch_class(), pc, "{}", name);
            assert_eq!(suffix, "");
        }
    }

    #[test]
    fn test_parse_root_accidentals() {
        let (root, _) = parse_root("C#").unwrap();
        assert_eq!(root.accidental, Accidental::Sharp);
        assert_eq!(root.pitch_class(), 1);

        let (root, _) = parse_root("Db").unwrap();
        assert_eq!(root.accidental, Accidental::Flat);
        assert_eq!(root.pitch_class(), 1);

        // Enharmonic edge cases wrap around the octave
        assert_eq!(parse_root("Cb").unwrap().0.pitch_class(), 11);
        assert_eq!(parse_root("B#").unwrap().0.pitch_class(), 0);
        assert_eq!(parse_root("E#").unwrap().0.pitch_class(), 5);
        assert_eq!(parse_root("Fb").unwrap().0.pitch_class(), 4);
    }

    #[test]
    fn test_parse_root_rejects_non_notes() {
        assert!(parse_root("").is_none());
        assert!(parse_root("am").is_none());
        assert!(parse_root("H7").is_none());
        assert!(parse_root("???").is_none());
        assert!(parse_root("/").is_none());
        assert!(parse_root("אקורד").is_none());
    }

    #[test]
    fn test_parse_chord_keeps_suffix_verbatim() {
        let chord = parse_chord("Asus4(add9)").unwrap();
        assert_eq!(chord.root.pitch_class(), 9);
        assert_eq!(chord.suffix, "sus4(add9)");
        assert!(chord.bass.is_none());
    }

    #[test]
    fn test_parse_chord_display_round_trip() {
        for symbol in ["C", "F#m7/A", "Bbmaj7", "Dsus2/F#", "Em/G"] {
            assert_eq!(parse_chord(symbol).unwrap().to_string(), symbol);
        }
    }

    #[test]
    fn test_parse_chord_errors() {
        assert!(matches!(
            parse_chord("/"),
            Err(SheetError::InvalidChord { .. })
        ));
        assert!(parse_chord("").is_err());
        assert!(parse_chord("xyz").is_err());
        assert!(parse_chord("C/").is_err());
        assert!(parse_chord("C/E/G").is_err());
    }
}
