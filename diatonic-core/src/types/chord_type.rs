//! The chord-type registry.
//!
//! Each template lists its tones as (semitones above the root, chord degree)
//! pairs. The chord degree is the number of letter steps above the root
//! letter, so a minor third is always spelled with the letter two steps up
//! no matter what accidental that needs.

use crate::error::{Result, TheoryError};
use std::fmt;
use std::str::FromStr;

/// One template entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChordTone {
    pub semitones: u8,
    pub degree: u8,
}

const fn t(semitones: u8, degree: u8) -> ChordTone {
    ChordTone { semitones, degree }
}

const ROOT: ChordTone = t(0, 0);
const MAJ3: ChordTone = t(4, 2);
const MIN3: ChordTone = t(3, 2);
const P5: ChordTone = t(7, 4);
const DIM5: ChordTone = t(6, 4);
const MAJ2: ChordTone = t(2, 1);
const P4: ChordTone = t(5, 3);
const MAJ6: ChordTone = t(9, 5);
const MAJ7: ChordTone = t(11, 6);
const MIN7: ChordTone = t(10, 6);
const DIM7: ChordTone = t(9, 6);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub enum ChordType {
    MajorTriad,
    MinorTriad,
    DiminishedTriad,
    Sus2,
    Sus4,
    Six,
    MinorSix,
    Major7,
    Minor7,
    Dominant7,
    HalfDiminished7,
    Diminished7,
    Dominant7Sus4,
    Major9,
    Minor9,
    Dominant9,
    Add9,
    MinorAdd9,
    HalfDiminished9,
    Major11,
    Minor11,
    Dominant11,
    HalfDiminished11,
    Major13,
    Minor13,
    Dominant13,
    HalfDiminished13,
}

use ChordType::*;

impl ChordType {
    /// Every registered type, in report order
    pub const ALL: [ChordType; 27] = [
        MajorTriad,
        MinorTriad,
        DiminishedTriad,
        Sus2,
        Sus4,
        Six,
        MinorSix,
        Major7,
        Minor7,
        Dominant7,
        HalfDiminished7,
        Diminished7,
        Dominant7Sus4,
        Major9,
        Minor9,
        Dominant9,
        Add9,
        MinorAdd9,
        HalfDiminished9,
        Major11,
        Minor11,
        Dominant11,
        HalfDiminished11,
        Major13,
        Minor13,
        Dominant13,
        HalfDiminished13,
    ];

    /// Embellishments shown in analysis for every degree
    pub const ALWAYS_SHOWN: [ChordType; 7] =
        [Sus2, Sus4, Add9, MinorAdd9, Six, MinorSix, Dominant7Sus4];

    /// Canonical template name
    pub fn name(self) -> &'static str {
        match self {
            MajorTriad => "Triad (Major)",
            MinorTriad => "Triad (minor)",
            DiminishedTriad => "Triad (Diminished)",
            Sus2 => "sus2",
            Sus4 => "sus4",
            Six => "6",
            MinorSix => "m6",
            Major7 => "Major 7",
            Minor7 => "minor 7",
            Dominant7 => "Dominant 7",
            HalfDiminished7 => "Half-Diminished 7",
            Diminished7 => "Diminished 7",
            Dominant7Sus4 => "Dominant 7sus4",
            Major9 => "Major 9",
            Minor9 => "minor 9",
            Dominant9 => "Dominant 9",
            Add9 => "add9",
            MinorAdd9 => "madd9",
            HalfDiminished9 => "Half-Diminished 9",
            Major11 => "Major 11",
            Minor11 => "minor 11",
            Dominant11 => "Dominant 11",
            HalfDiminished11 => "Half-Diminished 11",
            Major13 => "Major 13",
            Minor13 => "minor 13",
            Dominant13 => "Dominant 13",
            HalfDiminished13 => "Half-Diminished 13",
        }
    }

    /// Symbol suffix appended to the root ("m7", "ø7", "M9", "" for a major triad)
    pub fn shorthand(self) -> &'static str {
        match self {
            MajorTriad => "",
            MinorTriad => "m",
            DiminishedTriad => "dim",
            Sus2 => "sus2",
            Sus4 => "sus4",
            Six => "6",
            MinorSix => "m6",
            Major7 => "M7",
            Minor7 => "m7",
            Dominant7 => "7",
            HalfDiminished7 => "ø7",
            Diminished7 => "dim7",
            Dominant7Sus4 => "7sus4",
            Major9 => "M9",
            Minor9 => "m9",
            Dominant9 => "9",
            Add9 => "add9",
            MinorAdd9 => "m add9",
            HalfDiminished9 => "ø9",
            Major11 => "M11",
            Minor11 => "m11",
            Dominant11 => "11",
            HalfDiminished11 => "ø11",
            Major13 => "M13",
            Minor13 => "m13",
            Dominant13 => "13",
            HalfDiminished13 => "ø13",
        }
    }

    /// Tones in template order (root first)
    pub fn template(self) -> &'static [ChordTone] {
        match self {
            MajorTriad => &[ROOT, MAJ3, P5],
            MinorTriad => &[ROOT, MIN3, P5],
            DiminishedTriad => &[ROOT, MIN3, DIM5],
            Sus2 => &[ROOT, MAJ2, P5],
            Sus4 => &[ROOT, P4, P5],
            Six => &[ROOT, MAJ3, P5, MAJ6],
            MinorSix => &[ROOT, MIN3, P5, MAJ6],
            Major7 => &[ROOT, MAJ3, P5, MAJ7],
            Minor7 => &[ROOT, MIN3, P5, MIN7],
            Dominant7 => &[ROOT, MAJ3, P5, MIN7],
            HalfDiminished7 => &[ROOT, MIN3, DIM5, MIN7],
            Diminished7 => &[ROOT, MIN3, DIM5, DIM7],
            Dominant7Sus4 => &[ROOT, P4, P5, MIN7],
            Major9 => &[ROOT, MAJ3, P5, MAJ7, MAJ2],
            Minor9 => &[ROOT, MIN3, P5, MIN7, MAJ2],
            Dominant9 => &[ROOT, MAJ3, P5, MIN7, MAJ2],
            Add9 => &[ROOT, MAJ3, P5, MAJ2],
            MinorAdd9 => &[ROOT, MIN3, P5, MAJ2],
            HalfDiminished9 => &[ROOT, MIN3, DIM5, MIN7, MAJ2],
            Major11 => &[ROOT, MAJ3, P5, MAJ7, MAJ2, P4],
            Minor11 => &[ROOT, MIN3, P5, MIN7, MAJ2, P4],
            Dominant11 => &[ROOT, MAJ3, P5, MIN7, MAJ2, P4],
            HalfDiminished11 => &[ROOT, MIN3, DIM5, MIN7, MAJ2, P4],
            Major13 => &[ROOT, MAJ3, P5, MAJ7, MAJ2, P4, MAJ6],
            Minor13 => &[ROOT, MIN3, P5, MIN7, MAJ2, P4, MAJ6],
            Dominant13 => &[ROOT, MAJ3, P5, MIN7, MAJ2, P4, MAJ6],
            HalfDiminished13 => &[ROOT, MIN3, DIM5, MIN7, MAJ2, P4, MAJ6],
        }
    }

    /// Seventh-family types are those whose name carries a "7"
    pub fn contains_seventh(self) -> bool {
        self.name().contains('7')
    }

    /// Diminished or half-diminished types
    pub fn is_diminished_family(self) -> bool {
        self.name().contains("Diminished")
    }

    pub fn is_always_shown(self) -> bool {
        Self::ALWAYS_SHOWN.contains(&self)
    }

    /// Look a type up by its canonical name
    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.name() == name)
            .ok_or_else(|| TheoryError::UnknownChordType(name.to_string()))
    }
}

impl FromStr for ChordType {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s.trim())
    }
}

impl TryFrom<String> for ChordType {
    type Error = TheoryError;

    fn try_from(s: String) -> Result<Self> {
        Self::from_name(&s)
    }
}

impl From<ChordType> for String {
    fn from(t: ChordType) -> String {
        t.name().to_string()
    }
}

impl fmt::Display for ChordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Root display name plus the type's shorthand. A double-sharp "x" in the
/// root is shown as "#".
pub fn chord_symbol(root: &str, chord_type: ChordType) -> String {
    format!("{}{}", root.replace('x', "#"), chord_type.shorthand())
}

/// [`chord_symbol`] keyed by template name
pub fn chord_symbol_shorthand(root: &str, type_name: &str) -> Result<String> {
    Ok(chord_symbol(root, ChordType::from_name(type_name)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_names_round_trip() {
        assert_eq!(ChordType::ALL.len(), 27);
        for t in ChordType::ALL {
            assert_eq!(ChordType::from_name(t.name()).unwrap(), t);
        }
    }

    #[test]
    fn test_unknown_chord_type() {
        assert_eq!(
            ChordType::from_name("Augmented 7"),
            Err(TheoryError::UnknownChordType("Augmented 7".to_string()))
        );
    }

    #[test]
    fn test_templates_are_well_formed() {
        for t in ChordType::ALL {
            let template = t.template();
            assert_eq!(template[0], ROOT, "{}", t);
            assert!(template.len() >= 3 && template.len() <= 7);
            for tone in template {
                assert!(tone.semitones < 12);
                assert!(tone.degree < 7);
            }
        }
    }

    #[test]
    fn test_shorthand() {
        assert_eq!(chord_symbol_shorthand("C", "Half-Diminished 7").unwrap(), "Cø7");
        assert_eq!(chord_symbol_shorthand("A", "Triad (minor)").unwrap(), "Am");
        assert_eq!(chord_symbol("G", Dominant7), "G7");
        assert_eq!(chord_symbol("F", Major9), "FM9");
        assert_eq!(chord_symbol("B", Diminished7), "Bdim7");
        assert_eq!(chord_symbol("D", MinorAdd9), "Dm add9");
        assert_eq!(chord_symbol("Fx", MajorTriad), "F#");
        assert!(chord_symbol_shorthand("C", "power").is_err());
    }

    #[test]
    fn test_families() {
        assert!(HalfDiminished7.contains_seventh());
        assert!(Dominant7Sus4.contains_seventh());
        assert!(!HalfDiminished9.contains_seventh());
        assert!(Diminished7.is_diminished_family());
        assert!(DiminishedTriad.is_diminished_family());
        assert!(!Minor7.is_diminished_family());
        assert!(MinorSix.is_always_shown());
        assert!(!Major7.is_always_shown());
    }
}
