// diatonic-core/src/types/mod.rs

pub mod chord;
pub mod chord_type;
pub mod note;
pub mod progression;
pub mod roman_numeral;
pub mod scale;
pub mod voice_leading;

pub use chord::{build_chord, Chord, SpellingPolicy};
pub use chord_type::{chord_symbol, chord_symbol_shorthand, ChordType};
pub use note::{
    chromatic_index_of, lookup_spelling, resolve_spelling, Accidental, Letter, PitchClass, SpelledNote,
    SpellingStrategy,
};
pub use progression::{export_label, PlaybackChord, Progression, ProgressionChord};
pub use roman_numeral::{function_of, HarmonicFunction, Numeral, TriadQuality};
pub use scale::{build_diatonic_scale, DiatonicScale, Key, Mode};
pub use voice_leading::choose_bass;
