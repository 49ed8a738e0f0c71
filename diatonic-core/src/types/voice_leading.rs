//! Bass-note selection between consecutive chords.
//!
//! Only the bass voice is led: among the first four tones of the incoming
//! chord, the one closest (around the pitch-class circle) to the previous
//! chord's root goes in the bass.

use crate::types::chord::Chord;
use crate::types::note::{PitchClass, SpelledNote};

/// Only the first four template tones are bass candidates
pub const MAX_BASS_CANDIDATES: usize = 4;

/// Shortest semitone distance between two pitch classes, 0-6
pub fn circular_distance(a: PitchClass, b: PitchClass) -> u8 {
    a.circular_distance(b)
}

/// Index of the candidate closest to `previous_root`. Ties keep the earliest
/// candidate. Returns 0 for an empty slice.
pub fn closest_candidate(previous_root: PitchClass, candidates: &[PitchClass]) -> usize {
    let mut best_index = 0;
    let mut best_distance = u8::MAX;

    for (i, &pc) in candidates
        .iter()
        .enumerate()
        .take(MAX_BASS_CANDIDATES)
    {
        let distance = circular_distance(previous_root, pc);
        if distance < best_distance {
            best_distance = distance;
            best_index = i;
        }
    }

    best_index
}

/// Index into `current.notes()` of the tone to put in the bass.
///
/// Distance is measured from the previous chord's root, not from whichever
/// tone that chord had in its bass.
pub fn choose_bass_index(previous: Option<&Chord>, current: &Chord) -> usize {
    match previous {
        Some(prev) if !current.is_empty() => {
            closest_candidate(prev.root_pitch_class(), current.pitch_classes())
        }
        _ => 0,
    }
}

/// The tone of `current` to put in the bass after `previous`.
pub fn choose_bass(previous: Option<&Chord>, current: &Chord) -> SpelledNote {
    current.notes()[choose_bass_index(previous, current)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::chord_type::ChordType;
    use crate::types::roman_numeral::Numeral;
    use crate::types::scale::{build_diatonic_scale, Key, Mode};

    fn pcs(values: &[u8]) -> Vec<PitchClass> {
        values.iter().map(|&v| PitchClass::try_from(v).unwrap()).collect()
    }

    #[test]
    fn test_exact_match_wins() {
        assert_eq!(closest_candidate(PitchClass::C, &pcs(&[7, 4, 0])), 2);
    }

    #[test]
    fn test_nearest_candidate() {
        assert_eq!(closest_candidate(PitchClass::C, &pcs(&[1, 6])), 0);
        assert_eq!(closest_candidate(PitchClass::C, &pcs(&[6, 11])), 1);
    }

    #[test]
    fn test_ties_keep_earliest() {
        // 2 and 10 are both two semitones from C
        assert_eq!(closest_candidate(PitchClass::C, &pcs(&[2, 10])), 0);
        assert_eq!(closest_candidate(PitchClass::C, &pcs(&[5, 10, 2])), 1);
    }

    #[test]
    fn test_only_first_four_tones_considered() {
        // The fifth tone (C) would be an exact match but is not a candidate
        assert_eq!(closest_candidate(PitchClass::C, &pcs(&[7, 11, 2, 5, 0])), 1);
    }

    #[test]
    fn test_choose_bass_between_chords() {
        let c_major = build_diatonic_scale(Key::parse("C", Mode::Major).unwrap());
        let tonic = Chord::build(&c_major, Numeral::I, ChordType::MajorTriad).unwrap();
        let dominant = Chord::build(&c_major, Numeral::V, ChordType::Dominant7).unwrap();

        assert_eq!(choose_bass(None, &tonic).name(), "C");
        // From C: G=5, B=1, D=2, F=5 -> B
        assert_eq!(choose_bass(Some(&tonic), &dominant).name(), "B");
        assert_eq!(choose_bass_index(Some(&tonic), &dominant), 1);
    }

    #[test]
    fn test_distance_uses_previous_root_not_bass() {
        let c_major = build_diatonic_scale(Key::parse("C", Mode::Major).unwrap());
        let dominant = Chord::build(&c_major, Numeral::V, ChordType::MajorTriad)
            .unwrap()
            .with_bass_index(1); // B in the bass, root still G
        let tonic = Chord::build(&c_major, Numeral::I, ChordType::MajorTriad).unwrap();

        // From G: C=5, E=3, G=0 -> G, even though B->C would be a half step
        assert_eq!(choose_bass(Some(&dominant), &tonic).name(), "G");
    }
}
