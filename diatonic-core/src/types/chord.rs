use crate::error::{Result, TheoryError};
use crate::types::chord_type::{chord_symbol, ChordType};
use crate::types::note::{self, PitchClass, SpelledNote};
use crate::types::roman_numeral::Numeral;
use crate::types::scale::DiatonicScale;
use crate::types::voice_leading::MAX_BASS_CANDIDATES;
use std::fmt;

/// How to treat chord tones that could only be spelled by the canonical
/// fallback (the required letter could not be honoured).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpellingPolicy {
    /// Accept the fallback and log a warning
    #[default]
    Lenient,
    /// Reject the chord with `SpellingFailure`
    Strict,
}

/// A chord built on one scale degree, spelled against the key's letters.
///
/// `notes` and `pitch_classes` are parallel and in template order, root first.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "ChordFields")
)]
pub struct Chord {
    numeral: Numeral,
    chord_type: ChordType,
    notes: Vec<SpelledNote>,
    pitch_classes: Vec<PitchClass>,
    bass_index: usize, // index into `notes` of the note placed in the bass
}

/// Unchecked wire form of a [`Chord`]
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct ChordFields {
    numeral: Numeral,
    chord_type: ChordType,
    notes: Vec<SpelledNote>,
    pitch_classes: Vec<PitchClass>,
    bass_index: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<ChordFields> for Chord {
    type Error = TheoryError;

    fn try_from(fields: ChordFields) -> Result<Self> {
        let expected = fields.chord_type.template().len();
        if fields.notes.len() != expected || fields.pitch_classes.len() != expected {
            return Err(TheoryError::InvalidRequest(format!(
                "{} needs {} notes, got {} notes and {} pitch classes",
                fields.chord_type,
                expected,
                fields.notes.len(),
                fields.pitch_classes.len()
            )));
        }
        if fields
            .notes
            .iter()
            .zip(&fields.pitch_classes)
            .any(|(note, pc)| note.pitch_class() != *pc)
        {
            return Err(TheoryError::InvalidRequest(
                "chord notes do not match their pitch classes".to_string(),
            ));
        }
        if fields.bass_index >= expected.min(MAX_BASS_CANDIDATES) {
            return Err(TheoryError::InvalidRequest(format!(
                "bass index {} out of range for {}",
                fields.bass_index, fields.chord_type
            )));
        }
        Ok(Chord {
            numeral: fields.numeral,
            chord_type: fields.chord_type,
            notes: fields.notes,
            pitch_classes: fields.pitch_classes,
            bass_index: fields.bass_index,
        })
    }
}

impl Chord {
    /// Build `chord_type` on the scale degree `numeral` of `scale`.
    pub fn build(scale: &DiatonicScale, numeral: Numeral, chord_type: ChordType) -> Result<Self> {
        Self::build_with_policy(scale, numeral, chord_type, SpellingPolicy::Lenient)
    }

    /// Build by template name; unregistered names are `UnknownChordType`.
    pub fn build_named(scale: &DiatonicScale, numeral: Numeral, type_name: &str) -> Result<Self> {
        Self::build(scale, numeral, ChordType::from_name(type_name)?)
    }

    pub fn build_with_policy(
        scale: &DiatonicScale,
        numeral: Numeral,
        chord_type: ChordType,
        policy: SpellingPolicy,
    ) -> Result<Self> {
        let root = scale.degree(numeral);
        let root_pc = scale.pitch_class(numeral);

        if policy == SpellingPolicy::Strict
            && scale.strategy(numeral) == note::SpellingStrategy::CanonicalDefault
        {
            return Err(TheoryError::SpellingFailure {
                pitch_class: root_pc,
                letter: scale.key().root().letter().advance(numeral.index()),
            });
        }

        let template = chord_type.template();
        let mut notes = Vec::with_capacity(template.len());
        let mut pitch_classes = Vec::with_capacity(template.len());

        for tone in template {
            let pc = root_pc.transpose(tone.semitones);
            // Letters count from the diatonic root's letter, never from a respelled tone
            let letter = root.letter().advance(tone.degree as usize);
            let spelling = note::resolve(pc, letter);

            if policy == SpellingPolicy::Strict && spelling.is_canonical_fallback() {
                return Err(TheoryError::SpellingFailure {
                    pitch_class: pc,
                    letter,
                });
            }

            notes.push(spelling.note);
            pitch_classes.push(pc);
        }

        Ok(Chord {
            numeral,
            chord_type,
            notes,
            pitch_classes,
            bass_index: 0,
        })
    }

    pub fn numeral(&self) -> Numeral {
        self.numeral
    }

    pub fn chord_type(&self) -> ChordType {
        self.chord_type
    }

    /// Spelled tones in template order
    pub fn notes(&self) -> &[SpelledNote] {
        &self.notes
    }

    pub fn pitch_classes(&self) -> &[PitchClass] {
        &self.pitch_classes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// The chord root (first template tone)
    pub fn root(&self) -> SpelledNote {
        self.notes[0]
    }

    pub fn root_pitch_class(&self) -> PitchClass {
        self.pitch_classes[0]
    }

    /// The note placed in the bass; the root unless voice leading chose otherwise
    pub fn bass(&self) -> SpelledNote {
        self.notes[self.bass_index]
    }

    pub fn bass_index(&self) -> usize {
        self.bass_index
    }

    /// Place the tone at `index` in the bass. Only the first four tones can
    /// take the bass; other indices are ignored.
    pub fn with_bass_index(mut self, index: usize) -> Self {
        if index < self.notes.len().min(MAX_BASS_CANDIDATES) {
            self.bass_index = index;
        }
        self
    }

    /// Display names of the tones ("G", "B", "D", "F")
    pub fn note_names(&self) -> Vec<String> {
        self.notes.iter().map(|n| n.to_string()).collect()
    }

    /// Chord symbol such as "G7" or "Bø7"
    pub fn symbol(&self) -> String {
        chord_symbol(&self.root().to_string(), self.chord_type)
    }

    /// Symbol with the bass after a slash ("G7/B"); the plain symbol when the
    /// root is in the bass
    pub fn slash_symbol(&self) -> String {
        if self.bass_index == 0 {
            self.symbol()
        } else {
            format!("{}/{}", self.symbol(), self.bass())
        }
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): [{}]",
            self.slash_symbol(),
            self.chord_type,
            self.note_names().join(", ")
        )
    }
}

/// Free-function form of [`Chord::build_named`].
pub fn build_chord(scale: &DiatonicScale, numeral: Numeral, type_name: &str) -> Result<Chord> {
    Chord::build_named(scale, numeral, type_name)
}
