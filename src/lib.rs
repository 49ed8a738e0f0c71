//! # Diatonic
//!
//! Command-line front end for `diatonic-core`: one-shot subcommands and an
//! interactive REPL for generating diatonic chord progressions and inspecting
//! the chords available on each scale degree.
//!
//! ## Modules
//!
//! - `cli`: clap definitions and the one-shot subcommand runner.
//! - `commands`: the REPL command registry and its handlers.
//! - `render`: text and JSON rendering of progressions, analyses and chords.
//! - `repl`: the rustyline Read-Eval-Print Loop.

pub mod cli;
pub mod commands;
pub mod render;
pub mod repl;
