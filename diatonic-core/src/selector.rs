//! Random chord-type selection for a scale degree.
//!
//! A candidate pool is filled by independent coin flips, one type is drawn
//! from it uniformly, and the diminished degree's sevenths are then forced to
//! half-diminished.

use crate::random::RandomSource;
use crate::types::chord_type::ChordType;
use crate::types::roman_numeral::{diminished_degree, function_of, Numeral};
use crate::types::scale::Mode;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HarmonicStyle {
    /// Mostly triads, occasionally sevenths
    #[default]
    Simple,
    /// Sevenths, ninths and higher extensions
    Complex,
}

impl HarmonicStyle {
    pub fn name(self) -> &'static str {
        match self {
            HarmonicStyle::Simple => "Simple",
            HarmonicStyle::Complex => "Complex",
        }
    }
}

impl FromStr for HarmonicStyle {
    type Err = crate::error::TheoryError;

    fn from_str(s: &str) -> crate::error::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "simple" => Ok(HarmonicStyle::Simple),
            "complex" => Ok(HarmonicStyle::Complex),
            _ => Err(crate::error::TheoryError::InvalidRequest(format!(
                "Unknown harmonic style: {}",
                s
            ))),
        }
    }
}

impl fmt::Display for HarmonicStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Inclusion probabilities for the diatonic family
const SIMPLE_TRIAD: f64 = 0.7;
const SIMPLE_SEVENTH: f64 = 0.3;
const COMPLEX_TRIAD: f64 = 0.4;
const COMPLEX_SEVENTH: f64 = 0.6;
const COMPLEX_NINTH: f64 = 0.5;
const COMPLEX_HIGHER: f64 = 0.3;

/// Inclusion probabilities for embellishments
const SUSPENDED: f64 = 0.2;
const ADDED_NINTH: f64 = 0.15;
const DOMINANT_SUS: f64 = 0.1;
const SIXTH: f64 = 0.05;

/// Fill the candidate pool for `numeral`. The leading-tone degree (7) never
/// gets sus, add9 or sixth embellishments; only degree 5 can get 7sus4.
pub fn candidate_pool<R: RandomSource>(
    numeral: Numeral,
    mode: Mode,
    style: HarmonicStyle,
    rng: &mut R,
) -> Vec<ChordType> {
    let entry = function_of(mode, numeral);
    let minor_like = entry.quality.is_minor_like();
    let mut pool = Vec::new();

    match style {
        HarmonicStyle::Simple => {
            if rng.chance(SIMPLE_TRIAD) {
                pool.push(entry.structure[0]);
            }
            if rng.chance(SIMPLE_SEVENTH) {
                pool.push(entry.structure[1]);
            }
        }
        HarmonicStyle::Complex => {
            if rng.chance(COMPLEX_TRIAD) {
                pool.push(entry.structure[0]);
            }
            if rng.chance(COMPLEX_SEVENTH) {
                pool.push(entry.structure[1]);
            }
            if rng.chance(COMPLEX_NINTH) {
                pool.push(entry.structure[2]);
            }
            if rng.chance(COMPLEX_HIGHER) {
                pool.push(rng.pick(&entry.structure[3..]));
            }
        }
    }

    let leading_tone = numeral == Numeral::VII;

    if !leading_tone && rng.chance(SUSPENDED) {
        pool.push(rng.pick(&[ChordType::Sus2, ChordType::Sus4]));
    }
    if !leading_tone && rng.chance(ADDED_NINTH) {
        pool.push(if minor_like {
            ChordType::MinorAdd9
        } else {
            ChordType::Add9
        });
    }
    if numeral == Numeral::V && rng.chance(DOMINANT_SUS) {
        pool.push(ChordType::Dominant7Sus4);
    }
    if !leading_tone && rng.chance(SIXTH) {
        pool.push(if minor_like {
            ChordType::MinorSix
        } else {
            ChordType::Six
        });
    }

    pool
}

/// Force sevenths on the diminished degree to half-diminished.
pub fn correct_diminished_seventh(numeral: Numeral, mode: Mode, chosen: ChordType) -> ChordType {
    if numeral == diminished_degree(mode) && chosen.contains_seventh() {
        ChordType::HalfDiminished7
    } else {
        chosen
    }
}

/// Pick a concrete chord type for `numeral`.
pub fn choose_type<R: RandomSource>(
    numeral: Numeral,
    mode: Mode,
    style: HarmonicStyle,
    rng: &mut R,
) -> ChordType {
    let pool = candidate_pool(numeral, mode, style, rng);

    let chosen = if pool.is_empty() {
        function_of(mode, numeral).triad()
    } else {
        rng.pick(&pool)
    };
    let corrected = correct_diminished_seventh(numeral, mode, chosen);

    debug!(
        numeral = numeral.value(),
        pool = ?pool,
        chosen = %corrected,
        "chord type selected"
    );
    corrected
}
