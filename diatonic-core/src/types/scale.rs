//! Keys and diatonic scales.
//!
//! A scale degree is spelled with the letter `degree - 1` steps after the
//! root letter, so every degree gets its own letter and enharmonic twins
//! never appear (E# in F# major, never F).

use crate::error::{Result, TheoryError};
use crate::types::note::{self, PitchClass, SpelledNote, Spelling, SpellingStrategy};
use crate::types::roman_numeral::Numeral;
use std::fmt;
use std::str::FromStr;

const MAJOR_INTERVALS: [u8; 7] = [0, 2, 4, 5, 7, 9, 11];
const NATURAL_MINOR_INTERVALS: [u8; 7] = [0, 2, 3, 5, 7, 8, 10];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    #[default]
    Major,
    /// Natural minor only; harmonic and melodic alterations are not modelled.
    #[cfg_attr(feature = "serde", serde(alias = "NaturalMinor"))]
    Minor,
}

impl Mode {
    /// Semitone offsets of the seven degrees from the root
    pub fn intervals(self) -> &'static [u8; 7] {
        match self {
            Mode::Major => &MAJOR_INTERVALS,
            Mode::Minor => &NATURAL_MINOR_INTERVALS,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Mode::Major => "Major",
            Mode::Minor => "Minor",
        }
    }
}

impl FromStr for Mode {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "major" | "maj" | "ionian" => Ok(Mode::Major),
            "minor" | "min" | "natural minor" | "aeolian" => Ok(Mode::Minor),
            _ => Err(TheoryError::InvalidRequest(format!("Unknown mode: {}", s))),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A tonic spelling plus a mode. Only known spellings are accepted as roots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Key {
    root: SpelledNote,
    mode: Mode,
}

impl Key {
    pub fn new(root: SpelledNote, mode: Mode) -> Result<Self> {
        if !root.is_known() {
            return Err(TheoryError::InvalidKey(root.name()));
        }
        Ok(Key { root, mode })
    }

    /// Look up a root name such as "F#" or "Bb" exactly; anything outside
    /// the known spellings is `InvalidKey`.
    pub fn parse(root: &str, mode: Mode) -> Result<Self> {
        let root = note::lookup_spelling(root).map_err(TheoryError::into_key_error)?;
        Ok(Key { root, mode })
    }

    pub fn root(&self) -> SpelledNote {
        self.root
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Roots offered for key selection
    pub fn common_roots() -> &'static [&'static str] {
        &[
            "C", "C#", "Db", "D", "Eb", "E", "F", "F#", "Gb", "G", "Ab", "A", "Bb", "B",
        ]
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.root.name(), self.mode)
    }
}

/// The seven spelled degrees of a key, with their pitch classes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiatonicScale {
    key: Key,
    degrees: [Spelling; 7],
    pitch_classes: [PitchClass; 7],
}

impl DiatonicScale {
    pub fn key(&self) -> Key {
        self.key
    }

    /// Spelled note of a scale degree
    pub fn degree(&self, numeral: Numeral) -> SpelledNote {
        self.degrees[numeral.index()].note
    }

    /// Pitch class of a scale degree, as computed from the root (not re-parsed
    /// from the spelling).
    pub fn pitch_class(&self, numeral: Numeral) -> PitchClass {
        self.pitch_classes[numeral.index()]
    }

    /// Strategy used to spell a scale degree
    pub fn strategy(&self, numeral: Numeral) -> SpellingStrategy {
        self.degrees[numeral.index()].strategy
    }

    pub fn notes(&self) -> Vec<SpelledNote> {
        self.degrees.iter().map(|s| s.note).collect()
    }

    pub fn len(&self) -> usize {
        self.degrees.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

impl fmt::Display for DiatonicScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.degrees.iter().map(|s| s.note.to_string()).collect();
        write!(f, "{}: [{}]", self.key, names.join(", "))
    }
}

/// Build the seven spelled degrees of `key`.
pub fn build_diatonic_scale(key: Key) -> DiatonicScale {
    let root_pc = key.root.pitch_class();
    let root_letter = key.root.letter();
    let intervals = key.mode.intervals();

    let pitch_classes: [PitchClass; 7] = std::array::from_fn(|i| root_pc.transpose(intervals[i]));
    let degrees: [Spelling; 7] =
        std::array::from_fn(|i| note::resolve(pitch_classes[i], root_letter.advance(i)));

    DiatonicScale {
        key,
        degrees,
        pitch_classes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::note::Letter;

    fn scale_names(root: &str, mode: Mode) -> Vec<String> {
        let key = Key::parse(root, mode).unwrap();
        build_diatonic_scale(key)
            .notes()
            .iter()
            .map(|n| n.name())
            .collect()
    }

    #[test]
    fn test_major_scales() {
        assert_eq!(scale_names("C", Mode::Major), ["C", "D", "E", "F", "G", "A", "B"]);
        assert_eq!(
            scale_names("F#", Mode::Major),
            ["F#", "G#", "A#", "B", "C#", "D#", "E#"]
        );
        assert_eq!(
            scale_names("Gb", Mode::Major),
            ["Gb", "Ab", "Bb", "Cb", "Db", "Eb", "F"]
        );
    }

    #[test]
    fn test_minor_scales() {
        assert_eq!(scale_names("A", Mode::Minor), ["A", "B", "C", "D", "E", "F", "G"]);
        assert_eq!(
            scale_names("Eb", Mode::Minor),
            ["Eb", "F", "Gb", "Ab", "Bb", "Cb", "Db"]
        );
        assert_eq!(
            scale_names("Gb", Mode::Minor),
            ["Gb", "Ab", "Bbb", "Cb", "Db", "Ebb", "Fb"]
        );
    }

    #[test]
    fn test_scale_letters_are_consecutive() {
        for mode in [Mode::Major, Mode::Minor] {
            for root in Key::common_roots() {
                let key = Key::parse(root, mode).unwrap();
                let scale = build_diatonic_scale(key);
                let letters: Vec<Letter> = scale.notes().iter().map(|n| n.letter()).collect();
                for (i, letter) in letters.iter().enumerate() {
                    assert_eq!(*letter, key.root().letter().advance(i), "{}", key);
                }
                for (i, note) in scale.notes().iter().enumerate() {
                    assert_eq!(
                        note.pitch_class(),
                        key.root().pitch_class().transpose(mode.intervals()[i])
                    );
                }
            }
        }
    }

    #[test]
    fn test_invalid_key() {
        assert_eq!(
            Key::parse("H", Mode::Major),
            Err(TheoryError::InvalidKey("H".to_string()))
        );
        assert_eq!(
            Key::parse("E##", Mode::Major),
            Err(TheoryError::InvalidKey("E##".to_string()))
        );
        for root in ["c", "Fx", " C ", "bb"] {
            assert_eq!(
                Key::parse(root, Mode::Major),
                Err(TheoryError::InvalidKey(root.to_string()))
            );
        }
    }

    #[test]
    fn test_fallback_degree_is_recorded() {
        // D## major needs E## for its second degree, which has no table entry
        let key = Key::parse("D##", Mode::Major).unwrap();
        let scale = build_diatonic_scale(key);
        let two = Numeral::new(2).unwrap();
        assert_eq!(scale.strategy(two), SpellingStrategy::CanonicalDefault);
        assert_eq!(scale.degree(two).name(), "F#");
        assert_eq!(scale.pitch_class(two).value(), 6);
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("Major".parse::<Mode>().unwrap(), Mode::Major);
        assert_eq!("minor".parse::<Mode>().unwrap(), Mode::Minor);
        assert!("dorian".parse::<Mode>().is_err());
    }
}
