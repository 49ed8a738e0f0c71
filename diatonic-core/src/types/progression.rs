use crate::types::chord::Chord;
use crate::types::roman_numeral::{function_of, HarmonicFunction, Numeral};
use crate::types::scale::{Key, Mode};
use std::fmt;
use std::ops::Index;

/// Default octave for the upper voices when a chord is voiced for playback
pub const DEFAULT_OCTAVE: i8 = 4;

/// One chord of a generated progression, with its functional label.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgressionChord {
    pub numeral: Numeral,
    pub function: HarmonicFunction,
    pub chord: Chord,
}

impl ProgressionChord {
    pub fn new(mode: Mode, chord: Chord) -> Self {
        let numeral = chord.numeral();
        ProgressionChord {
            numeral,
            function: function_of(mode, numeral).function,
            chord,
        }
    }

    /// Symbol with the chosen bass, e.g. "G7/B"
    pub fn slash_symbol(&self) -> String {
        self.chord.slash_symbol()
    }

    /// Shape handed to a playback layer: bass first, then the other tones
    pub fn playback(&self) -> PlaybackChord {
        let bass_index = self.chord.bass_index();
        let bass = self.chord.bass().to_string();

        let mut all_note_names = Vec::with_capacity(self.chord.len());
        all_note_names.push(bass.clone());
        all_note_names.extend(
            self.chord
                .notes()
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != bass_index)
                .map(|(_, n)| n.to_string()),
        );

        PlaybackChord {
            numeral: self.numeral,
            function_label: self.function.label().to_string(),
            type_name: self.chord.chord_type().name().to_string(),
            bass_note_name: bass,
            all_note_names,
        }
    }
}

/// Per-chord note layout for a playback layer.
///
/// `all_note_names[0]` is always the bass note.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlaybackChord {
    pub numeral: Numeral,
    pub function_label: String,
    pub type_name: String,
    pub bass_note_name: String,
    pub all_note_names: Vec<String>,
}

impl PlaybackChord {
    /// Note names with octave numbers, e.g. ["B3", "G4", "D4", "F4"].
    /// With `drop_bass` the bass sounds one octave below the upper voices.
    pub fn voiced_note_names(&self, octave: i8, drop_bass: bool) -> Vec<String> {
        let bass_octave = if drop_bass { octave - 1 } else { octave };
        self.all_note_names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let o = if i == 0 { bass_octave } else { octave };
                format!("{}{}", name, o)
            })
            .collect()
    }
}

/// An ordered sequence of chords in one key
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Progression {
    key: Key,
    chords: Vec<ProgressionChord>,
}

impl Progression {
    pub fn new(key: Key) -> Self {
        Progression {
            key,
            chords: Vec::new(),
        }
    }

    pub fn key(&self) -> Key {
        self.key
    }

    /// Append a chord, labelling it with its function in this key's mode
    pub fn push(&mut self, chord: Chord) {
        self.chords.push(ProgressionChord::new(self.key.mode(), chord));
    }

    pub fn len(&self) -> usize {
        self.chords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }

    pub fn chords(&self) -> &[ProgressionChord] {
        &self.chords
    }

    pub fn get(&self, index: usize) -> Option<&ProgressionChord> {
        self.chords.get(index)
    }

    pub fn last(&self) -> Option<&ProgressionChord> {
        self.chords.last()
    }

    pub fn numerals(&self) -> Vec<Numeral> {
        self.chords.iter().map(|c| c.numeral).collect()
    }

    /// Numerals without repeats, in first-seen order
    pub fn distinct_numerals(&self) -> Vec<Numeral> {
        let mut seen = Vec::new();
        for numeral in self.numerals() {
            if !seen.contains(&numeral) {
                seen.push(numeral);
            }
        }
        seen
    }

    pub fn symbols(&self) -> Vec<String> {
        self.chords.iter().map(|c| c.chord.symbol()).collect()
    }

    pub fn slash_symbols(&self) -> Vec<String> {
        self.chords.iter().map(|c| c.slash_symbol()).collect()
    }

    pub fn playback(&self) -> Vec<PlaybackChord> {
        self.chords.iter().map(|c| c.playback()).collect()
    }

    /// File-name friendly label for recorded output
    pub fn export_label(&self) -> String {
        export_label(&self.key, &self.numerals())
    }
}

impl Index<usize> for Progression {
    type Output = ProgressionChord;

    fn index(&self, index: usize) -> &Self::Output {
        &self.chords[index]
    }
}

impl fmt::Display for Progression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slash_symbols().join(" | "))
    }
}

/// `<root>_<mode>_<numerals>`, with "#" spelled "sharp" and "b" spelled "flat",
/// e.g. "Fsharp_Minor_1-4-5-1".
pub fn export_label(key: &Key, numerals: &[Numeral]) -> String {
    let root = key.root().name().replace('#', "sharp").replace('b', "flat");
    let sequence: Vec<String> = numerals.iter().map(|n| n.to_string()).collect();
    format!("{}_{}_{}", root, key.mode(), sequence.join("-"))
}
