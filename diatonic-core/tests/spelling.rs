#[cfg(test)]
mod tests {
    use diatonic_core::types::note::resolve;
    use diatonic_core::{
        build_chord, build_diatonic_scale, chord_symbol_shorthand, chromatic_index_of, ChordType,
        Chord, Key, Letter, Mode, Numeral, PitchClass, SpellingStrategy, TheoryError,
    };

    #[test]
    fn test_resolve_matches_letter_or_reports_fallback() {
        for pc in PitchClass::all() {
            for letter in Letter::ALL {
                let spelling = resolve(pc, letter);
                assert_eq!(spelling.note.pitch_class(), pc);
                if spelling.note.letter() != letter {
                    assert_eq!(spelling.strategy, SpellingStrategy::CanonicalDefault);
                }
            }
        }
    }

    #[test]
    fn test_every_common_key_has_seven_distinct_letters() {
        for mode in [Mode::Major, Mode::Minor] {
            for root in Key::common_roots() {
                let key = Key::parse(root, mode).unwrap();
                let notes = build_diatonic_scale(key).notes();
                assert_eq!(notes.len(), 7);
                for (i, note) in notes.iter().enumerate() {
                    assert_eq!(note.letter(), key.root().letter().advance(i), "{}", key);
                }
            }
        }
    }

    #[test]
    fn test_scale_spellings() {
        let names = |root: &str, mode| -> Vec<String> {
            build_diatonic_scale(Key::parse(root, mode).unwrap())
                .notes()
                .iter()
                .map(|n| n.to_string())
                .collect()
        };
        assert_eq!(names("F#", Mode::Major), ["F#", "G#", "A#", "B", "C#", "D#", "E#"]);
        assert_eq!(names("Gb", Mode::Major), ["Gb", "Ab", "Bb", "Cb", "Db", "Eb", "F"]);
        assert_eq!(names("Eb", Mode::Minor), ["Eb", "F", "Gb", "Ab", "Bb", "Cb", "Db"]);
    }

    #[test]
    fn test_end_to_end_dominant_seventh() {
        let scale = build_diatonic_scale(Key::parse("C", Mode::Major).unwrap());
        let chord = build_chord(&scale, Numeral::V, "Dominant 7").unwrap();
        let names: Vec<String> = chord.notes().iter().map(|n| n.name()).collect();
        assert_eq!(names, ["G", "B", "D", "F"]);
        let pcs: Vec<u8> = chord.pitch_classes().iter().map(|p| p.value()).collect();
        assert_eq!(pcs, [7, 11, 2, 5]);
    }

    #[test]
    fn test_chord_pitch_classes_for_every_template() {
        for root in Key::common_roots() {
            let scale = build_diatonic_scale(Key::parse(root, Mode::Major).unwrap());
            for t in ChordType::ALL {
                let chord = Chord::build(&scale, Numeral::I, t).unwrap();
                let root_pc = chromatic_index_of(root).unwrap();
                for (tone, pc) in t.template().iter().zip(chord.pitch_classes()) {
                    assert_eq!(
                        pc.value(),
                        (root_pc.value() + tone.semitones) % 12,
                        "{} {}",
                        root,
                        t
                    );
                }
            }
        }
    }

    #[test]
    fn test_symbol_shorthand() {
        assert_eq!(chord_symbol_shorthand("C", "Half-Diminished 7").unwrap(), "Cø7");
        assert_eq!(chord_symbol_shorthand("A", "Triad (minor)").unwrap(), "Am");
    }

    #[test]
    fn test_lookup_errors() {
        assert!(matches!(
            chromatic_index_of("H"),
            Err(TheoryError::NoteNotRecognized(_))
        ));
        assert!(matches!(
            Key::parse("Z#", Mode::Minor),
            Err(TheoryError::InvalidKey(_))
        ));
        let scale = build_diatonic_scale(Key::parse("C", Mode::Major).unwrap());
        assert!(matches!(
            build_chord(&scale, Numeral::I, "Power"),
            Err(TheoryError::UnknownChordType(_))
        ));
    }
}
