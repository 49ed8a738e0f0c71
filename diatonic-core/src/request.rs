//! Generation request: everything a caller chooses before a batch is built.

use crate::error::{Result, TheoryError};
use crate::types::scale::{Key, Mode};

pub use crate::selector::HarmonicStyle;
pub use crate::types::chord::SpellingPolicy;

/// Settings for one batch of progressions.
///
/// With the `serde` feature, missing fields fall back to the defaults so a
/// request file only needs the fields it changes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct GenerationRequest {
    /// Root note name, e.g. "F#" or "Bb"
    pub root: String,
    pub mode: Mode,
    /// Chords per progression
    pub progression_length: usize,
    /// Progressions per batch
    pub num_examples: usize,
    /// Resolve a final dominant to vi instead of I
    pub deceptive_cadence: bool,
    pub style: HarmonicStyle,
    pub spelling: SpellingPolicy,
    /// Fixed seed for reproducible batches; entropy when absent
    pub seed: Option<u64>,
}

impl Default for GenerationRequest {
    fn default() -> Self {
        GenerationRequest {
            root: "C".to_string(),
            mode: Mode::Major,
            progression_length: 4,
            num_examples: 1,
            deceptive_cadence: false,
            style: HarmonicStyle::Simple,
            spelling: SpellingPolicy::Lenient,
            seed: None,
        }
    }
}

impl GenerationRequest {
    pub fn new(root: impl Into<String>, mode: Mode) -> Self {
        GenerationRequest {
            root: root.into(),
            mode,
            ..Default::default()
        }
    }

    pub fn with_length(mut self, progression_length: usize) -> Self {
        self.progression_length = progression_length;
        self
    }

    pub fn with_examples(mut self, num_examples: usize) -> Self {
        self.num_examples = num_examples;
        self
    }

    pub fn with_deceptive_cadence(mut self, enabled: bool) -> Self {
        self.deceptive_cadence = enabled;
        self
    }

    pub fn with_style(mut self, style: HarmonicStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_spelling(mut self, spelling: SpellingPolicy) -> Self {
        self.spelling = spelling;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check the request and resolve its key.
    pub fn validate(&self) -> Result<Key> {
        if self.progression_length < 1 {
            return Err(TheoryError::InvalidRequest(
                "progression length must be at least 1".to_string(),
            ));
        }
        if self.num_examples < 1 {
            return Err(TheoryError::InvalidRequest(
                "number of examples must be at least 1".to_string(),
            ));
        }
        Key::parse(&self.root, self.mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let request = GenerationRequest::default();
        assert_eq!(request.root, "C");
        assert_eq!(request.mode, Mode::Major);
        assert_eq!(request.progression_length, 4);
        assert_eq!(request.num_examples, 1);
        assert!(!request.deceptive_cadence);
        assert_eq!(request.style, HarmonicStyle::Simple);
        assert_eq!(request.spelling, SpellingPolicy::Lenient);
        assert_eq!(request.seed, None);
    }

    #[test]
    fn test_validate_resolves_key() {
        let key = GenerationRequest::new("F#", Mode::Minor).validate().unwrap();
        assert_eq!(key.root().name(), "F#");
        assert_eq!(key.mode(), Mode::Minor);
    }

    #[test]
    fn test_validate_rejects_unknown_root() {
        assert!(matches!(
            GenerationRequest::new("H", Mode::Major).validate(),
            Err(TheoryError::InvalidKey(_))
        ));
        assert!(matches!(
            GenerationRequest::new("E##", Mode::Major).validate(),
            Err(TheoryError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_validate_requires_exact_root_spelling() {
        for root in [" F#", "f#", "Fx"] {
            assert!(matches!(
                GenerationRequest::new(root, Mode::Major).validate(),
                Err(TheoryError::InvalidKey(_))
            ));
        }
    }

    #[test]
    fn test_validate_rejects_zero_lengths() {
        let request = GenerationRequest::default().with_length(0);
        assert!(matches!(
            request.validate(),
            Err(TheoryError::InvalidRequest(_))
        ));
        let request = GenerationRequest::default().with_examples(0);
        assert!(matches!(
            request.validate(),
            Err(TheoryError::InvalidRequest(_))
        ));
    }
}
