//! Error type shared by every theory operation.

use crate::types::note::{Letter, PitchClass};

/// Errors raised by the theory engine.
///
/// `InvalidKey` and `InvalidRequest` reject a whole generation request.
/// `SpellingFailure` only aborts the chord (and progression) being built.
/// `UnknownChordType` means a template name that is not registered, which is a
/// caller bug rather than something to recover from.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TheoryError {
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Note not recognized: {0}")]
    NoteNotRecognized(String),

    #[error("Unknown chord type: {0}")]
    UnknownChordType(String),

    #[error("Could not spell pitch class {pitch_class} with letter {letter}")]
    SpellingFailure { pitch_class: PitchClass, letter: Letter },

    #[error("Scale degree must be 1-7, got {0}")]
    InvalidNumeral(u8),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl TheoryError {
    /// Re-tag a lookup miss as a user-facing key error.
    pub fn into_key_error(self) -> Self {
        match self {
            TheoryError::NoteNotRecognized(name) => TheoryError::InvalidKey(name),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, TheoryError>;
