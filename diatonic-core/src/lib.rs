//! # Diatonic Core
//!
//! Music-theory engine for diatonic chord progressions. Builds correctly
//! spelled scales and chords, labels degrees by harmonic function, and
//! generates rule-based progressions with cadences and bass voice leading.
//! No terminal or filesystem access, so it also builds for WASM.
//!
//! ## Features
//!
//! - **serde**: Enable (de)serialization of requests, progressions and reports
//! - **wasm**: Enable WASM bindings via wasm-bindgen
//!
//! ## Example
//!
//! ```
//! use diatonic_core::{build_chord, build_diatonic_scale, Key, Mode, Numeral};
//!
//! let scale = build_diatonic_scale(Key::parse("C", Mode::Major).unwrap());
//! let g7 = build_chord(&scale, Numeral::V, "Dominant 7").unwrap();
//! assert_eq!(g7.note_names(), ["G", "B", "D", "F"]);
//! ```

pub mod analysis;
pub mod error;
pub mod generator;
pub mod random;
pub mod request;
pub mod selector;
pub mod types;
pub mod wasm;

pub use analysis::{analyze_numerals, AnalyzedChord, DegreeAnalysis};
pub use error::{Result, TheoryError};
pub use generator::{
    generate, generate_batch, generate_numerals, ExampleOutcome, ProgressionBatch,
};
pub use random::{RandomSource, ScriptedRandom, StdRandom};
pub use request::GenerationRequest;
pub use selector::{choose_type, HarmonicStyle};
pub use types::*;
