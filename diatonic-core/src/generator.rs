//! Rule-based progression generation.
//!
//! Numerals come from a random walk over `PROGRESSION_RULES`, starting on a
//! tonic-family degree and forced to a cadence on the last step. Each numeral
//! is then given a chord type, spelled, and voiced against the chord before it.

use crate::analysis::{analyze_numerals, DegreeAnalysis};
use crate::error::{Result, TheoryError};
use crate::random::{RandomSource, StdRandom};
use crate::request::GenerationRequest;
use crate::selector::{choose_type, HarmonicStyle};
use crate::types::chord::{Chord, SpellingPolicy};
use crate::types::progression::Progression;
use crate::types::roman_numeral::Numeral;
use crate::types::scale::{build_diatonic_scale, DiatonicScale, Key};
use crate::types::voice_leading::choose_bass_index;
use tracing::{debug, warn};

/// Successor lists for each numeral, indexed by `numeral - 1`
pub static PROGRESSION_RULES: [&[Numeral]; 7] = [
    &[Numeral::IV, Numeral::V, Numeral::VI, Numeral::II, Numeral::III],
    &[Numeral::V, Numeral::VII],
    &[Numeral::VI, Numeral::IV],
    &[Numeral::V, Numeral::VII, Numeral::II, Numeral::VI],
    &[Numeral::I, Numeral::VI, Numeral::IV],
    &[Numeral::II, Numeral::IV, Numeral::V],
    &[Numeral::I, Numeral::VI],
];

/// Degrees a progression may start on
pub const TONIC_STARTS: [Numeral; 3] = [Numeral::I, Numeral::III, Numeral::VI];

/// Degrees a non-dominant final step resolves to
pub const RESOLUTIONS: [Numeral; 2] = [Numeral::I, Numeral::VI];

pub fn successors(numeral: Numeral) -> Option<&'static [Numeral]> {
    PROGRESSION_RULES
        .get(numeral.index())
        .copied()
        .filter(|list| !list.is_empty())
}

fn next_numeral<R: RandomSource>(
    current: Numeral,
    is_last: bool,
    deceptive: bool,
    rng: &mut R,
) -> Numeral {
    let Some(options) = successors(current) else {
        return Numeral::I;
    };

    let mut next = rng.pick(options);
    if next == current {
        let others: Vec<Numeral> = options.iter().copied().filter(|&n| n != current).collect();
        if !others.is_empty() {
            next = rng.pick(&others);
        }
    }

    if is_last {
        if current.is_dominant() {
            next = if deceptive { Numeral::VI } else { Numeral::I };
        } else if !RESOLUTIONS.contains(&next) {
            next = rng.pick(&RESOLUTIONS);
        }
    }

    next
}

/// Random walk of exactly `length` numerals. A length of 1 is just the
/// starting tonic-family degree; 0 yields nothing.
pub fn generate_numerals<R: RandomSource>(length: usize, deceptive: bool, rng: &mut R) -> Vec<Numeral> {
    let mut numerals = Vec::with_capacity(length);
    if length == 0 {
        return numerals;
    }

    let mut current = rng.pick(&TONIC_STARTS);
    numerals.push(current);

    while numerals.len() < length {
        let is_last = numerals.len() == length - 1;
        current = next_numeral(current, is_last, deceptive, rng);
        numerals.push(current);
    }

    debug!(numerals = ?numerals.iter().map(|n| n.value()).collect::<Vec<_>>(), "numerals generated");
    numerals
}

/// Build one progression over `numerals`: pick each chord type, spell it,
/// and choose its bass relative to the previous chord.
pub fn realize_progression<R: RandomSource>(
    scale: &DiatonicScale,
    numerals: &[Numeral],
    style: HarmonicStyle,
    policy: SpellingPolicy,
    rng: &mut R,
) -> Result<Progression> {
    let key = scale.key();
    let mut progression = Progression::new(key);
    let mut previous: Option<Chord> = None;

    for &numeral in numerals {
        let chord_type = choose_type(numeral, key.mode(), style, rng);
        let chord = Chord::build_with_policy(scale, numeral, chord_type, policy)?;
        let bass_index = choose_bass_index(previous.as_ref(), &chord);
        let chord = chord.with_bass_index(bass_index);

        debug!(numeral = numeral.value(), symbol = %chord.slash_symbol(), "chord realized");
        previous = Some(chord.clone());
        progression.push(chord);
    }

    Ok(progression)
}

/// Result of one requested example
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExampleOutcome {
    Generated(Progression),
    Failed { index: usize, error: TheoryError },
}

impl ExampleOutcome {
    pub fn progression(&self) -> Option<&Progression> {
        match self {
            ExampleOutcome::Generated(p) => Some(p),
            ExampleOutcome::Failed { .. } => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ExampleOutcome::Failed { .. })
    }
}

/// All examples of one request, plus the analysis of the first success
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgressionBatch {
    pub key: Key,
    pub progression_length: usize,
    pub deceptive_cadence: bool,
    pub style: HarmonicStyle,
    pub examples: Vec<ExampleOutcome>,
    pub analysis: Option<Vec<DegreeAnalysis>>,
}

impl ProgressionBatch {
    pub fn progressions(&self) -> impl Iterator<Item = &Progression> {
        self.examples.iter().filter_map(|e| e.progression())
    }

    pub fn failures(&self) -> usize {
        self.examples.iter().filter(|e| e.is_failed()).count()
    }
}

/// Generate every example of `request`. An invalid request fails as a whole;
/// a failure inside one example is recorded and the rest still run.
pub fn generate_batch<R: RandomSource>(
    request: &GenerationRequest,
    rng: &mut R,
) -> Result<ProgressionBatch> {
    let key = request.validate()?;
    let scale = build_diatonic_scale(key);

    let mut examples = Vec::with_capacity(request.num_examples);
    for index in 0..request.num_examples {
        let numerals = generate_numerals(request.progression_length, request.deceptive_cadence, rng);
        match realize_progression(&scale, &numerals, request.style, request.spelling, rng) {
            Ok(progression) => examples.push(ExampleOutcome::Generated(progression)),
            Err(error) => {
                warn!(example = index + 1, key = %key, error = %error, "example generation failed");
                examples.push(ExampleOutcome::Failed { index, error });
            }
        }
    }

    let analysis = examples
        .iter()
        .find_map(|e| e.progression())
        .map(|p| analyze_numerals(&scale, &p.numerals()));

    Ok(ProgressionBatch {
        key,
        progression_length: request.progression_length,
        deceptive_cadence: request.deceptive_cadence,
        style: request.style,
        examples,
        analysis,
    })
}

/// [`generate_batch`] with the standard generator, seeded from the request
/// when it carries a seed.
pub fn generate(request: &GenerationRequest) -> Result<ProgressionBatch> {
    let mut rng = StdRandom::from_seed_option(request.seed);
    generate_batch(request, &mut rng)
}
