// diatonic-core/src/types/roman_numeral.rs
use crate::error::{Result, TheoryError};
use crate::types::chord_type::ChordType;
use crate::types::scale::Mode;
use std::fmt;
use std::str::FromStr;

/// A scale-degree numeral, 1-7
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u8", into = "u8")
)]
pub struct Numeral(u8);

impl Numeral {
    pub const I: Numeral = Numeral(1);
    pub const II: Numeral = Numeral(2);
    pub const III: Numeral = Numeral(3);
    pub const IV: Numeral = Numeral(4);
    pub const V: Numeral = Numeral(5);
    pub const VI: Numeral = Numeral(6);
    pub const VII: Numeral = Numeral(7);

    pub fn new(degree: u8) -> Result<Self> {
        if !(1..=7).contains(&degree) {
            return Err(TheoryError::InvalidNumeral(degree));
        }
        Ok(Numeral(degree))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Zero-based scale position
    pub fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    /// Dominant family: 5 and 7
    pub fn is_dominant(self) -> bool {
        matches!(self.0, 5 | 7)
    }

    /// Tonic family: 1, 3 and 6
    pub fn is_tonic_family(self) -> bool {
        matches!(self.0, 1 | 3 | 6)
    }

    /// Roman numeral with case and symbol following the diatonic triad quality
    /// ("V", "ii", "vii°")
    pub fn roman(self, mode: Mode) -> String {
        let upper = match self.0 {
            1 => "I",
            2 => "II",
            3 => "III",
            4 => "IV",
            5 => "V",
            6 => "VI",
            _ => "VII",
        };
        match function_of(mode, self).quality {
            TriadQuality::Major => upper.to_string(),
            TriadQuality::Minor => upper.to_lowercase(),
            TriadQuality::Diminished => format!("{}°", upper.to_lowercase()),
        }
    }
}

impl TryFrom<u8> for Numeral {
    type Error = TheoryError;

    fn try_from(degree: u8) -> Result<Self> {
        Numeral::new(degree)
    }
}

impl From<Numeral> for u8 {
    fn from(numeral: Numeral) -> u8 {
        numeral.0
    }
}

impl FromStr for Numeral {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self> {
        let degree: u8 = s
            .trim()
            .parse()
            .map_err(|_| TheoryError::InvalidRequest(format!("Invalid numeral: {}", s)))?;
        Numeral::new(degree)
    }
}

impl fmt::Display for Numeral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Quality of the diatonic triad on a degree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TriadQuality {
    Major,
    Minor,
    Diminished,
}

impl TriadQuality {
    pub fn name(self) -> &'static str {
        match self {
            TriadQuality::Major => "Major",
            TriadQuality::Minor => "minor",
            TriadQuality::Diminished => "Diminished",
        }
    }

    /// Minor and diminished triads take minor-flavoured embellishments (madd9, m6)
    pub fn is_minor_like(self) -> bool {
        matches!(self, TriadQuality::Minor | TriadQuality::Diminished)
    }
}

impl fmt::Display for TriadQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HarmonicFunction {
    Tonic,
    Subdominant,
    Dominant,
    TonicSubdominant,
    TonicMediant,
}

impl HarmonicFunction {
    pub fn label(self) -> &'static str {
        match self {
            HarmonicFunction::Tonic => "Tonic",
            HarmonicFunction::Subdominant => "Subdominant",
            HarmonicFunction::Dominant => "Dominant",
            HarmonicFunction::TonicSubdominant => "Tonic/Subdominant",
            HarmonicFunction::TonicMediant => "Tonic/Mediant",
        }
    }
}

impl fmt::Display for HarmonicFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Diatonic quality, function and extension family of one degree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiatonicFunctionEntry {
    pub quality: TriadQuality,
    pub function: HarmonicFunction,
    /// [triad, seventh, ninth, eleventh, thirteenth]
    pub structure: [ChordType; 5],
}

impl DiatonicFunctionEntry {
    pub fn triad(&self) -> ChordType {
        self.structure[0]
    }

    pub fn seventh(&self) -> ChordType {
        self.structure[1]
    }

    pub fn includes(&self, chord_type: ChordType) -> bool {
        self.structure.contains(&chord_type)
    }
}

const MAJOR_FAMILY: [ChordType; 5] = [
    ChordType::MajorTriad,
    ChordType::Major7,
    ChordType::Major9,
    ChordType::Major11,
    ChordType::Major13,
];

const MINOR_FAMILY: [ChordType; 5] = [
    ChordType::MinorTriad,
    ChordType::Minor7,
    ChordType::Minor9,
    ChordType::Minor11,
    ChordType::Minor13,
];

const DOMINANT_FAMILY: [ChordType; 5] = [
    ChordType::MajorTriad,
    ChordType::Dominant7,
    ChordType::Dominant9,
    ChordType::Dominant11,
    ChordType::Dominant13,
];

const HALF_DIMINISHED_FAMILY: [ChordType; 5] = [
    ChordType::DiminishedTriad,
    ChordType::HalfDiminished7,
    ChordType::HalfDiminished9,
    ChordType::HalfDiminished11,
    ChordType::HalfDiminished13,
];

const fn entry(
    quality: TriadQuality,
    function: HarmonicFunction,
    structure: [ChordType; 5],
) -> DiatonicFunctionEntry {
    DiatonicFunctionEntry {
        quality,
        function,
        structure,
    }
}

use HarmonicFunction as F;
use TriadQuality as Q;

static MAJOR_TABLE: [DiatonicFunctionEntry; 7] = [
    entry(Q::Major, F::Tonic, MAJOR_FAMILY),
    entry(Q::Minor, F::Subdominant, MINOR_FAMILY),
    entry(Q::Minor, F::Tonic, MINOR_FAMILY),
    entry(Q::Major, F::Subdominant, MAJOR_FAMILY),
    entry(Q::Major, F::Dominant, DOMINANT_FAMILY),
    entry(Q::Minor, F::TonicSubdominant, MINOR_FAMILY),
    entry(Q::Diminished, F::Dominant, HALF_DIMINISHED_FAMILY),
];

// Natural minor throughout: v stays minor and VII stays major.
static MINOR_TABLE: [DiatonicFunctionEntry; 7] = [
    entry(Q::Minor, F::Tonic, MINOR_FAMILY),
    entry(Q::Diminished, F::Subdominant, HALF_DIMINISHED_FAMILY),
    entry(Q::Major, F::TonicMediant, MAJOR_FAMILY),
    entry(Q::Minor, F::Subdominant, MINOR_FAMILY),
    entry(Q::Minor, F::Dominant, MINOR_FAMILY),
    entry(Q::Major, F::Subdominant, MAJOR_FAMILY),
    entry(Q::Major, F::Dominant, DOMINANT_FAMILY),
];

/// Static diatonic entry for a degree in a mode
pub fn function_of(mode: Mode, numeral: Numeral) -> &'static DiatonicFunctionEntry {
    match mode {
        Mode::Major => &MAJOR_TABLE[numeral.index()],
        Mode::Minor => &MINOR_TABLE[numeral.index()],
    }
}

/// The degree whose diatonic triad is diminished: vii° in major, ii° in minor
pub fn diminished_degree(mode: Mode) -> Numeral {
    match mode {
        Mode::Major => Numeral::VII,
        Mode::Minor => Numeral::II,
    }
}
