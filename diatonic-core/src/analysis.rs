//! Per-degree listing of the chord types that sit diatonically on a numeral.

use crate::types::chord::Chord;
use crate::types::chord_type::ChordType;
use crate::types::roman_numeral::{
    diminished_degree, function_of, HarmonicFunction, Numeral, TriadQuality,
};
use crate::types::scale::{DiatonicScale, Mode};
use tracing::warn;

/// One chord type that qualifies on a degree
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnalyzedChord {
    pub symbol: String,
    pub type_name: String,
    pub note_names: Vec<String>,
}

/// Every qualifying chord type on one degree, in registry order
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DegreeAnalysis {
    pub numeral: Numeral,
    pub roman: String,
    pub root: String,
    pub quality: TriadQuality,
    pub function: HarmonicFunction,
    pub chords: Vec<AnalyzedChord>,
}

/// Whether `chord_type` is shown for `numeral`: part of the degree's own
/// extension family, one of the always-shown embellishments, or any
/// diminished-family type on the diminished degree.
pub fn is_diatonic_at(mode: Mode, numeral: Numeral, chord_type: ChordType) -> bool {
    function_of(mode, numeral).includes(chord_type)
        || chord_type.is_always_shown()
        || (numeral == diminished_degree(mode) && chord_type.is_diminished_family())
}

pub fn analyze_degree(scale: &DiatonicScale, numeral: Numeral) -> DegreeAnalysis {
    let mode = scale.key().mode();
    let entry = function_of(mode, numeral);

    let chords = ChordType::ALL
        .iter()
        .filter(|&&t| is_diatonic_at(mode, numeral, t))
        .filter_map(|&t| match Chord::build(scale, numeral, t) {
            Ok(chord) => Some(AnalyzedChord {
                symbol: chord.symbol(),
                type_name: t.name().to_string(),
                note_names: chord.note_names(),
            }),
            Err(e) => {
                warn!(numeral = numeral.value(), chord_type = %t, error = %e, "skipping chord in analysis");
                None
            }
        })
        .collect();

    DegreeAnalysis {
        numeral,
        roman: numeral.roman(mode),
        root: scale.degree(numeral).to_string(),
        quality: entry.quality,
        function: entry.function,
        chords,
    }
}

/// Analyze each distinct numeral once, in first-seen order.
pub fn analyze_numerals(scale: &DiatonicScale, numerals: &[Numeral]) -> Vec<DegreeAnalysis> {
    let mut seen: Vec<Numeral> = Vec::with_capacity(numerals.len());
    for &numeral in numerals {
        if !seen.contains(&numeral) {
            seen.push(numeral);
        }
    }
    seen.into_iter()
        .map(|numeral| analyze_degree(scale, numeral))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::scale::{build_diatonic_scale, Key};

    fn scale(root: &str, mode: Mode) -> DiatonicScale {
        build_diatonic_scale(Key::parse(root, mode).unwrap())
    }

    fn type_names(analysis: &DegreeAnalysis) -> Vec<&str> {
        analysis.chords.iter().map(|c| c.type_name.as_str()).collect()
    }

    #[test]
    fn test_dominant_degree_in_c_major() {
        let analysis = analyze_degree(&scale("C", Mode::Major), Numeral::V);
        assert_eq!(analysis.root, "G");
        assert_eq!(analysis.roman, "V");
        assert_eq!(analysis.quality, TriadQuality::Major);
        assert_eq!(analysis.function, HarmonicFunction::Dominant);

        let names = type_names(&analysis);
        assert!(names.contains(&"Dominant 7"));
        assert!(names.contains(&"Dominant 13"));
        assert!(names.contains(&"sus4"));
        assert!(names.contains(&"Dominant 7sus4"));
        assert!(!names.contains(&"Major 7"));
        assert!(!names.contains(&"Half-Diminished 7"));
        assert_eq!(names.len(), 5 + ChordType::ALWAYS_SHOWN.len());

        let g7 = analysis
            .chords
            .iter()
            .find(|c| c.type_name == "Dominant 7")
            .unwrap();
        assert_eq!(g7.symbol, "G7");
        assert_eq!(g7.note_names, ["G", "B", "D", "F"]);
    }

    #[test]
    fn test_diminished_degree_shows_whole_family() {
        let analysis = analyze_degree(&scale("C", Mode::Major), Numeral::VII);
        let names = type_names(&analysis);
        assert!(names.contains(&"Triad (Diminished)"));
        assert!(names.contains(&"Diminished 7"));
        assert!(names.contains(&"Half-Diminished 9"));

        let minor = analyze_degree(&scale("A", Mode::Minor), Numeral::II);
        assert_eq!(minor.roman, "ii°");
        assert!(type_names(&minor).contains(&"Diminished 7"));

        // Not on other degrees
        let tonic = analyze_degree(&scale("C", Mode::Major), Numeral::I);
        assert!(!type_names(&tonic).contains(&"Diminished 7"));
    }

    #[test]
    fn test_numerals_deduplicated_in_order() {
        let report = analyze_numerals(
            &scale("D", Mode::Major),
            &[Numeral::I, Numeral::V, Numeral::I, Numeral::VI, Numeral::V],
        );
        let numerals: Vec<Numeral> = report.iter().map(|d| d.numeral).collect();
        assert_eq!(numerals, [Numeral::I, Numeral::V, Numeral::VI]);
        assert_eq!(report[2].root, "B");
    }
}
