use crate::error::{Result, TheoryError};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use Accidental as Acc;
use Letter as L;

/// Chromatic pitch class (0-11), independent of spelling.
/// 0=C, 1=C#/Db, 2=D, 3=D#/Eb, 4=E, 5=F, 6=F#/Gb, 7=G, 8=G#/Ab, 9=A, 10=A#/Bb, 11=B
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u8", into = "u8")
)]
pub struct PitchClass(u8);

impl PitchClass {
    pub const C: PitchClass = PitchClass(0);

    /// Wrap any semitone count into 0-11.
    pub fn from_semitones(semitones: i32) -> Self {
        PitchClass(semitones.rem_euclid(12) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Move up by a number of semitones, wrapping at the octave
    pub fn transpose(self, semitones: u8) -> Self {
        Self::from_semitones(self.0 as i32 + semitones as i32)
    }

    /// Shortest distance around the pitch-class circle: min(|a-b|, 12-|a-b|)
    pub fn circular_distance(self, other: PitchClass) -> u8 {
        let diff = (self.0 as i8 - other.0 as i8).unsigned_abs();
        diff.min(12 - diff)
    }

    pub fn all() -> impl Iterator<Item = PitchClass> {
        (0..12).map(PitchClass)
    }
}

impl TryFrom<u8> for PitchClass {
    type Error = TheoryError;

    fn try_from(value: u8) -> Result<Self> {
        if value > 11 {
            return Err(TheoryError::NoteNotRecognized(format!(
                "pitch class {}",
                value
            )));
        }
        Ok(PitchClass(value))
    }
}

impl From<PitchClass> for u8 {
    fn from(pc: PitchClass) -> u8 {
        pc.0
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Letter names in scale order. Advancing past B wraps back to C.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    pub const ALL: [Letter; 7] = [L::C, L::D, L::E, L::F, L::G, L::A, L::B];

    fn index(self) -> usize {
        self as usize
    }

    /// The letter `steps` positions later in the cycle C D E F G A B
    pub fn advance(self, steps: usize) -> Letter {
        Self::ALL[(self.index() + steps) % 7]
    }

    /// Pitch class of the unaltered letter
    pub fn natural_pitch_class(self) -> PitchClass {
        let pc = match self {
            L::C => 0,
            L::D => 2,
            L::E => 4,
            L::F => 5,
            L::G => 7,
            L::A => 9,
            L::B => 11,
        };
        PitchClass(pc)
    }

    pub fn from_char(c: char) -> Option<Letter> {
        match c.to_ascii_uppercase() {
            'C' => Some(L::C),
            'D' => Some(L::D),
            'E' => Some(L::E),
            'F' => Some(L::F),
            'G' => Some(L::G),
            'A' => Some(L::A),
            'B' => Some(L::B),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            L::C => 'C',
            L::D => 'D',
            L::E => 'E',
            L::F => 'F',
            L::G => 'G',
            L::A => 'A',
            L::B => 'B',
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Accidental {
    DoubleFlat,
    Flat,
    Natural,
    Sharp,
    DoubleSharp,
}

impl Accidental {
    /// Semitone offset from the natural letter
    pub fn offset(self) -> i32 {
        match self {
            Acc::DoubleFlat => -2,
            Acc::Flat => -1,
            Acc::Natural => 0,
            Acc::Sharp => 1,
            Acc::DoubleSharp => 2,
        }
    }

    /// Full theory spelling ("bb", "b", "", "#", "##")
    pub fn symbol(self) -> &'static str {
        match self {
            Acc::DoubleFlat => "bb",
            Acc::Flat => "b",
            Acc::Natural => "",
            Acc::Sharp => "#",
            Acc::DoubleSharp => "##",
        }
    }

    /// Single-character display marker. Double sharps become "x" and double
    /// flats collapse to "b"; this is lossy and only for display.
    pub fn display_marker(self) -> &'static str {
        match self {
            Acc::DoubleFlat | Acc::Flat => "b",
            Acc::Natural => "",
            Acc::Sharp => "#",
            Acc::DoubleSharp => "x",
        }
    }

    fn parse(s: &str) -> Option<Accidental> {
        match s {
            "" => Some(Acc::Natural),
            "#" => Some(Acc::Sharp),
            "##" | "x" => Some(Acc::DoubleSharp),
            "b" => Some(Acc::Flat),
            "bb" => Some(Acc::DoubleFlat),
            _ => None,
        }
    }
}

/// One enharmonic spelling of a pitch class: a letter plus an accidental.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct SpelledNote {
    letter: Letter,
    accidental: Accidental,
}

const fn sp(letter: Letter, accidental: Accidental) -> SpelledNote {
    SpelledNote { letter, accidental }
}

/// Every known spelling per pitch class. The first entry is the canonical
/// spelling used as the last-resort fallback.
static ENHARMONIC_SPELLINGS: [&[SpelledNote]; 12] = [
    &[sp(L::C, Acc::Natural), sp(L::B, Acc::Sharp), sp(L::D, Acc::DoubleFlat)],
    &[sp(L::C, Acc::Sharp), sp(L::D, Acc::Flat)],
    &[sp(L::D, Acc::Natural), sp(L::C, Acc::DoubleSharp), sp(L::E, Acc::DoubleFlat)],
    &[sp(L::D, Acc::Sharp), sp(L::E, Acc::Flat), sp(L::F, Acc::DoubleFlat)],
    &[sp(L::E, Acc::Natural), sp(L::F, Acc::Flat), sp(L::D, Acc::DoubleSharp)],
    &[sp(L::F, Acc::Natural), sp(L::E, Acc::Sharp), sp(L::G, Acc::DoubleFlat)],
    &[sp(L::F, Acc::Sharp), sp(L::G, Acc::Flat)],
    &[sp(L::G, Acc::Natural), sp(L::F, Acc::DoubleSharp), sp(L::A, Acc::DoubleFlat)],
    &[sp(L::G, Acc::Sharp), sp(L::A, Acc::Flat)],
    &[sp(L::A, Acc::Natural), sp(L::G, Acc::DoubleSharp), sp(L::B, Acc::DoubleFlat)],
    &[sp(L::A, Acc::Sharp), sp(L::B, Acc::Flat), sp(L::C, Acc::DoubleFlat)],
    &[sp(L::B, Acc::Natural), sp(L::C, Acc::Flat), sp(L::A, Acc::DoubleSharp)],
];

/// Letter-keyed spellings tried first. Narrower than ENHARMONIC_SPELLINGS:
/// D## (4) and A## (11) are only reachable through the enharmonic scan.
static PRIMARY_SPELLINGS: [&[SpelledNote]; 12] = [
    &[sp(L::C, Acc::Natural), sp(L::B, Acc::Sharp), sp(L::D, Acc::DoubleFlat)],
    &[sp(L::C, Acc::Sharp), sp(L::D, Acc::Flat)],
    &[sp(L::D, Acc::Natural), sp(L::C, Acc::DoubleSharp), sp(L::E, Acc::DoubleFlat)],
    &[sp(L::D, Acc::Sharp), sp(L::E, Acc::Flat), sp(L::F, Acc::DoubleFlat)],
    &[sp(L::E, Acc::Natural), sp(L::F, Acc::Flat)],
    &[sp(L::F, Acc::Natural), sp(L::E, Acc::Sharp), sp(L::G, Acc::DoubleFlat)],
    &[sp(L::F, Acc::Sharp), sp(L::G, Acc::Flat)],
    &[sp(L::G, Acc::Natural), sp(L::F, Acc::DoubleSharp), sp(L::A, Acc::DoubleFlat)],
    &[sp(L::G, Acc::Sharp), sp(L::A, Acc::Flat)],
    &[sp(L::A, Acc::Natural), sp(L::G, Acc::DoubleSharp), sp(L::B, Acc::DoubleFlat)],
    &[sp(L::A, Acc::Sharp), sp(L::B, Acc::Flat), sp(L::C, Acc::DoubleFlat)],
    &[sp(L::B, Acc::Natural), sp(L::C, Acc::Flat)],
];

impl SpelledNote {
    pub const fn new(letter: Letter, accidental: Accidental) -> Self {
        sp(letter, accidental)
    }

    pub fn letter(&self) -> Letter {
        self.letter
    }

    pub fn accidental(&self) -> Accidental {
        self.accidental
    }

    pub fn pitch_class(&self) -> PitchClass {
        PitchClass::from_semitones(
            self.letter.natural_pitch_class().value() as i32 + self.accidental.offset(),
        )
    }

    /// Exact spelling, e.g. "Dbb" or "C##"
    pub fn name(&self) -> String {
        format!("{}{}", self.letter, self.accidental.symbol())
    }

    /// Display spelling with single-character accidental markers ("Cx", "Db" for Dbb)
    pub fn display_name(&self) -> String {
        format!("{}{}", self.letter, self.accidental.display_marker())
    }

    /// Whether this spelling appears in the enharmonic table
    pub fn is_known(&self) -> bool {
        ENHARMONIC_SPELLINGS[self.pitch_class().value() as usize].contains(self)
    }

    /// All known spellings of a pitch class, canonical first
    pub fn enharmonics(pc: PitchClass) -> &'static [SpelledNote] {
        ENHARMONIC_SPELLINGS[pc.value() as usize]
    }

    /// Canonical (first-listed) spelling of a pitch class
    pub fn canonical(pc: PitchClass) -> SpelledNote {
        ENHARMONIC_SPELLINGS[pc.value() as usize][0]
    }
}

impl FromStr for SpelledNote {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let letter = chars
            .next()
            .and_then(Letter::from_char)
            .ok_or_else(|| TheoryError::NoteNotRecognized(s.to_string()))?;
        let accidental = Accidental::parse(chars.as_str())
            .ok_or_else(|| TheoryError::NoteNotRecognized(s.to_string()))?;
        Ok(SpelledNote { letter, accidental })
    }
}

impl TryFrom<String> for SpelledNote {
    type Error = TheoryError;

    fn try_from(s: String) -> Result<Self> {
        lookup_spelling(&s)
    }
}

impl From<SpelledNote> for String {
    fn from(note: SpelledNote) -> String {
        note.name()
    }
}

impl fmt::Display for SpelledNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letter, self.accidental.display_marker())
    }
}

/// Ordered fallbacks for spelling a pitch class with a required letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpellingStrategy {
    /// Letter-keyed lookup in the primary table
    PrimaryTable,
    /// Any known enharmonic spelling starting with the letter
    EnharmonicScan,
    /// Canonical spelling, ignoring the letter
    CanonicalDefault,
}

impl SpellingStrategy {
    pub const CASCADE: [SpellingStrategy; 3] = [
        SpellingStrategy::PrimaryTable,
        SpellingStrategy::EnharmonicScan,
        SpellingStrategy::CanonicalDefault,
    ];

    pub fn attempt(self, pc: PitchClass, letter: Letter) -> Option<SpelledNote> {
        let idx = pc.value() as usize;
        match self {
            SpellingStrategy::PrimaryTable => PRIMARY_SPELLINGS[idx]
                .iter()
                .find(|n| n.letter == letter)
                .copied(),
            SpellingStrategy::EnharmonicScan => ENHARMONIC_SPELLINGS[idx]
                .iter()
                .find(|n| n.letter == letter)
                .copied(),
            SpellingStrategy::CanonicalDefault => Some(SpelledNote::canonical(pc)),
        }
    }
}

/// A resolved spelling and the strategy that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spelling {
    pub note: SpelledNote,
    pub strategy: SpellingStrategy,
}

impl Spelling {
    /// True when the letter could not be honoured
    pub fn is_canonical_fallback(&self) -> bool {
        self.strategy == SpellingStrategy::CanonicalDefault
    }
}

/// Spell `pc` with `letter`, walking the strategy cascade until one succeeds.
///
/// Never fails: the canonical default always produces a note. Anything past
/// the primary table is logged.
pub fn resolve(pc: PitchClass, letter: Letter) -> Spelling {
    let spelling = SpellingStrategy::CASCADE
        .iter()
        .find_map(|&strategy| {
            strategy
                .attempt(pc, letter)
                .map(|note| Spelling { note, strategy })
        })
        .unwrap_or(Spelling {
            note: SpelledNote::canonical(pc),
            strategy: SpellingStrategy::CanonicalDefault,
        });

    match spelling.strategy {
        SpellingStrategy::PrimaryTable => {}
        SpellingStrategy::EnharmonicScan => warn!(
            pitch_class = pc.value(),
            letter = %letter,
            note = %spelling.note.name(),
            "spelling resolved by enharmonic scan"
        ),
        SpellingStrategy::CanonicalDefault => warn!(
            pitch_class = pc.value(),
            letter = %letter,
            note = %spelling.note.name(),
            "no spelling matches the required letter, using canonical spelling"
        ),
    }

    spelling
}

/// Spell `pc` with the required letter. See [`resolve`].
pub fn resolve_spelling(pc: PitchClass, letter: Letter) -> SpelledNote {
    resolve(pc, letter).note
}

/// Exact match against the known spellings ("C", "Db", "F##", "Ebb").
/// No case folding, no "x" alias, no surrounding whitespace.
pub fn lookup_spelling(name: &str) -> Result<SpelledNote> {
    ENHARMONIC_SPELLINGS
        .iter()
        .flat_map(|spellings| spellings.iter())
        .copied()
        .find(|note| note.name() == name)
        .ok_or_else(|| TheoryError::NoteNotRecognized(name.to_string()))
}

/// Pitch class of a known spelling. See [`lookup_spelling`].
pub fn chromatic_index_of(name: &str) -> Result<PitchClass> {
    lookup_spelling(name).map(|note| note.pitch_class())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(s: &str) -> SpelledNote {
        s.parse().unwrap()
    }

    #[test]
    fn test_note_parsing() {
        assert_eq!(note("C").pitch_class().value(), 0);
        assert_eq!(note("C#").pitch_class().value(), 1);
        assert_eq!(note("Db").pitch_class().value(), 1);
        assert_eq!(note("Dbb").pitch_class().value(), 0);
        assert_eq!(note("B#").pitch_class().value(), 0);
        assert_eq!(note("Cb").pitch_class().value(), 11);
        assert_eq!(note("Fx").accidental(), Accidental::DoubleSharp);

        assert!("H".parse::<SpelledNote>().is_err());
        assert!("C###".parse::<SpelledNote>().is_err());
        assert!("".parse::<SpelledNote>().is_err());
    }

    #[test]
    fn test_chromatic_index_of() {
        assert_eq!(chromatic_index_of("C").unwrap(), PitchClass::C);
        assert_eq!(chromatic_index_of("A##").unwrap().value(), 11);
        assert_eq!(chromatic_index_of("Cbb").unwrap().value(), 10);
        assert_eq!(chromatic_index_of("Gb").unwrap(), chromatic_index_of("F#").unwrap());

        // Parseable but not a known spelling
        assert_eq!(
            chromatic_index_of("E##"),
            Err(TheoryError::NoteNotRecognized("E##".to_string()))
        );
        assert!(matches!(
            chromatic_index_of("Q"),
            Err(TheoryError::NoteNotRecognized(_))
        ));
    }

    #[test]
    fn test_lookup_is_exact() {
        for name in ["c", "eb", "bb", "Fx", " C ", "C ", "f#"] {
            assert_eq!(
                chromatic_index_of(name),
                Err(TheoryError::NoteNotRecognized(name.to_string())),
                "{:?}",
                name
            );
        }
        assert_eq!(lookup_spelling("F##").unwrap(), note("F##"));
        assert_eq!(lookup_spelling("Bb").unwrap().pitch_class().value(), 10);

        let known: usize = PitchClass::all().map(|pc| SpelledNote::enharmonics(pc).len()).sum();
        assert_eq!(known, 33);
        for pc in PitchClass::all() {
            for spelling in SpelledNote::enharmonics(pc) {
                assert_eq!(chromatic_index_of(&spelling.name()).unwrap(), pc);
            }
        }
    }

    #[test]
    fn test_display_canonicalization() {
        assert_eq!(note("C##").to_string(), "Cx");
        assert_eq!(note("Ebb").to_string(), "Eb");
        assert_eq!(note("Ebb").name(), "Ebb");
        assert_eq!(note("F#").to_string(), "F#");
        assert_eq!(note("G").to_string(), "G");
    }

    #[test]
    fn test_letter_cycle() {
        assert_eq!(Letter::C.advance(2), Letter::E);
        assert_eq!(Letter::A.advance(2), Letter::C);
        assert_eq!(Letter::B.advance(7), Letter::B);
    }

    #[test]
    fn test_resolve_every_pitch_class_and_letter() {
        for pc in PitchClass::all() {
            for letter in Letter::ALL {
                let spelling = resolve(pc, letter);
                assert_eq!(spelling.note.pitch_class(), pc);
                if spelling.is_canonical_fallback() {
                    assert_eq!(spelling.note, SpelledNote::canonical(pc));
                } else {
                    assert_eq!(spelling.note.letter(), letter, "{} {}", pc, letter);
                }
            }
        }
    }

    #[test]
    fn test_resolve_cascade() {
        let primary = resolve(PitchClass::from_semitones(1), Letter::D);
        assert_eq!(primary.note.name(), "Db");
        assert_eq!(primary.strategy, SpellingStrategy::PrimaryTable);

        let scanned = resolve(PitchClass::from_semitones(4), Letter::D);
        assert_eq!(scanned.note.name(), "D##");
        assert_eq!(scanned.strategy, SpellingStrategy::EnharmonicScan);

        let fallback = resolve(PitchClass::from_semitones(1), Letter::B);
        assert_eq!(fallback.note.name(), "C#");
        assert!(fallback.is_canonical_fallback());
    }

    #[test]
    fn test_circular_distance() {
        let c = PitchClass::C;
        assert_eq!(c.circular_distance(PitchClass::from_semitones(1)), 1);
        assert_eq!(c.circular_distance(PitchClass::from_semitones(6)), 6);
        assert_eq!(c.circular_distance(PitchClass::from_semitones(11)), 1);
        assert_eq!(
            PitchClass::from_semitones(7).circular_distance(PitchClass::from_semitones(2)),
            5
        );
    }

    #[test]
    fn test_pitch_class_bounds() {
        assert!(PitchClass::try_from(11).is_ok());
        assert!(PitchClass::try_from(12).is_err());
        assert_eq!(PitchClass::from_semitones(-1).value(), 11);
        assert_eq!(PitchClass::from_semitones(9).transpose(5).value(), 2);
    }
}
