//! Text and JSON rendering of batches, analysis reports, scales and chords.

use anyhow::{Context, Result};
use colored::*;
use diatonic_core::types::progression::DEFAULT_OCTAVE;
use diatonic_core::{
    Chord, ChordType, DegreeAnalysis, DiatonicScale, ExampleOutcome, Key, Progression,
    ProgressionBatch,
};
use serde::Serialize;
use std::fmt::Write as _;
use std::str::FromStr;

/// How results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => anyhow::bail!("Unknown output format '{}' (use text or json)", other),
        }
    }
}

/// Pretty-printed JSON of any serializable result
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize output")
}

fn numeral_cell(numeral: u8) -> String {
    format!("{:<3}", numeral)
}

/// One progression as aligned rows: numeral, function, slash symbol, notes
pub fn render_progression(progression: &Progression) -> String {
    let mut out = String::new();
    for chord in progression.chords() {
        let _ = writeln!(
            out,
            "  {} {} {} [{}]",
            numeral_cell(chord.numeral.value()).bright_yellow().bold(),
            format!("{:<18}", chord.function.label()).green(),
            format!("{:<12}", chord.slash_symbol()).bright_cyan().bold(),
            chord.chord.note_names().join(", ")
        );
    }
    out
}

pub fn render_analysis(report: &[DegreeAnalysis]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "Chord analysis".bold().underline());
    for degree in report {
        let _ = writeln!(
            out,
            "{} ({} {}, Function: {})",
            format!("Numeral {} [{}]", degree.numeral, degree.roman)
                .bright_yellow()
                .bold(),
            degree.root,
            degree.quality,
            degree.function
        );
        for chord in &degree.chords {
            let _ = writeln!(
                out,
                "  {} ({}): {}",
                format!("{:<10}", chord.symbol).bright_cyan(),
                chord.type_name,
                chord.note_names.join(", ")
            );
        }
    }
    out
}

pub fn render_batch(batch: &ProgressionBatch) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}",
        format!(
            "Suggested progressions in {} ({} chords, {} style)",
            batch.key, batch.progression_length, batch.style
        )
        .bold()
    );
    if batch.deceptive_cadence {
        let _ = writeln!(
            out,
            "{}",
            "Deceptive cadence is on: a final chord after 5 or 7 resolves to 6.".dimmed()
        );
    }
    let _ = writeln!(out);

    for (i, outcome) in batch.examples.iter().enumerate() {
        match outcome {
            ExampleOutcome::Generated(progression) => {
                let _ = writeln!(
                    out,
                    "{} {}",
                    format!("Example {}:", i + 1).bold(),
                    progression.export_label().dimmed()
                );
                out.push_str(&render_progression(progression));
            }
            ExampleOutcome::Failed { error, .. } => {
                let _ = writeln!(
                    out,
                    "{} {}",
                    format!("Example {}:", i + 1).bold(),
                    format!("generation failed: {}", error).red()
                );
            }
        }
    }

    match &batch.analysis {
        Some(report) => {
            let _ = writeln!(out);
            out.push_str(&render_analysis(report));
        }
        None => {
            let _ = writeln!(
                out,
                "{}",
                "No progressions could be successfully generated.".red()
            );
        }
    }
    out
}

/// Bass-first voicings of one progression with octave numbers
pub fn render_voicing(progression: &Progression) -> String {
    let mut out = String::new();
    for playback in progression.playback() {
        let _ = writeln!(
            out,
            "  {} {} {}",
            numeral_cell(playback.numeral.value()).bright_yellow().bold(),
            format!("{:<20}", playback.type_name).green(),
            playback
                .voiced_note_names(DEFAULT_OCTAVE, true)
                .join(" ")
                .bright_cyan()
        );
    }
    out
}

pub fn render_scale(scale: &DiatonicScale) -> String {
    let key = scale.key();
    let mut out = String::new();
    let _ = writeln!(out, "{}", format!("{}", key).bold());
    for (i, note) in scale.notes().iter().enumerate() {
        let numeral = diatonic_core::Numeral::new((i + 1) as u8)
            .map(|n| n.roman(key.mode()))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "  {} {}",
            format!("{:<5}", numeral).bright_yellow(),
            note.to_string().bright_cyan()
        );
    }
    out
}

pub fn render_chord(chord: &Chord) -> String {
    format!(
        "{} ({}): [{}]",
        chord.symbol().bright_cyan().bold(),
        chord.chord_type(),
        chord.note_names().join(", ")
    )
}

pub fn render_keys() -> String {
    let roots = Key::common_roots().join("  ");
    format!("{} {}", "Keys:".bold(), roots)
}

pub fn render_chord_types() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "Chord types:".bold());
    for t in ChordType::ALL {
        let _ = writeln!(out, "  {} {}", format!("{:<20}", t.name()).cyan(), t.shorthand());
    }
    out
}
