//! CLI command definitions using clap

use crate::render::{self, OutputFormat};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use diatonic_core::analysis::analyze_numerals;
use diatonic_core::{
    build_diatonic_scale, generate, Chord, ChordType, GenerationRequest, HarmonicStyle, Key, Mode,
    Numeral, SpellingPolicy,
};
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "diatonic")]
#[command(about = "Diatonic chord progression generator with correctly spelled chords")]
#[command(version)]
pub struct Cli {
    /// Defaults to the interactive REPL
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Seed for repeatable output
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Key selection shared by several subcommands
#[derive(Args, Debug, Clone, Default)]
pub struct KeyArgs {
    /// Root note, e.g. C, F#, Bb
    #[arg(short, long)]
    pub key: Option<String>,

    /// major or minor
    #[arg(short, long)]
    pub mode: Option<Mode>,
}

impl KeyArgs {
    pub fn resolve(&self) -> Result<Key> {
        let root = self.key.as_deref().unwrap_or("C");
        Ok(Key::parse(root, self.mode.unwrap_or_default())?)
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub key: KeyArgs,

    /// Chords per progression
    #[arg(short, long)]
    pub length: Option<usize>,

    /// Number of progressions
    #[arg(short = 'n', long)]
    pub examples: Option<usize>,

    /// Resolve a final 5 or 7 to 6
    #[arg(long)]
    pub deceptive: bool,

    /// simple or complex
    #[arg(long)]
    pub style: Option<HarmonicStyle>,

    /// Fail chords that need a fallback spelling
    #[arg(long)]
    pub strict: bool,

    /// JSON request file; flags override its fields
    #[arg(long)]
    pub request: Option<PathBuf>,

    /// Also print bass-first voicings
    #[arg(long)]
    pub voicing: bool,
}

impl GenerateArgs {
    pub fn to_request(&self, seed: Option<u64>) -> Result<GenerationRequest> {
        let mut request = match &self.request {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read request file {}", path.display()))?;
                let request = serde_json::from_str::<GenerationRequest>(&text)
                    .with_context(|| format!("Invalid request file {}", path.display()))?;
                debug!(path = %path.display(), ?request, "request file loaded");
                request
            }
            None => GenerationRequest::default(),
        };

        if let Some(root) = &self.key.key {
            request.root = root.clone();
        }
        if let Some(mode) = self.key.mode {
            request.mode = mode;
        }
        if let Some(length) = self.length {
            request.progression_length = length;
        }
        if let Some(examples) = self.examples {
            request.num_examples = examples;
        }
        if self.deceptive {
            request.deceptive_cadence = true;
        }
        if let Some(style) = self.style {
            request.style = style;
        }
        if self.strict {
            request.spelling = SpellingPolicy::Strict;
        }
        if seed.is_some() {
            request.seed = seed;
        }
        Ok(request)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate chord progressions
    Generate(GenerateArgs),

    /// List the chord types available on scale degrees
    Analyze {
        #[command(flatten)]
        key: KeyArgs,

        /// Scale degrees 1-7
        #[arg(required = true)]
        numerals: Vec<Numeral>,
    },

    /// Spell the diatonic scale of a key
    Scale {
        #[command(flatten)]
        key: KeyArgs,
    },

    /// Spell one chord type on a scale degree
    Chord {
        #[command(flatten)]
        key: KeyArgs,

        /// Scale degree 1-7
        numeral: Numeral,

        /// Chord type name, e.g. "Dominant 7"
        #[arg(required = true, num_args = 1..)]
        type_name: Vec<String>,
    },

    /// List the offered key roots
    Keys,

    /// List every chord type
    Types,

    /// Interactive session
    Repl {
        #[command(flatten)]
        generate: GenerateArgs,
    },
}

fn output<T: serde::Serialize + ?Sized>(
    format: OutputFormat,
    value: &T,
    text: impl FnOnce() -> String,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text()),
        OutputFormat::Json => render::to_json(value),
    }
}

/// Run a one-shot subcommand and return what should be printed
pub fn execute(command: &Commands, format: OutputFormat, seed: Option<u64>) -> Result<String> {
    match command {
        Commands::Generate(args) => {
            let request = args.to_request(seed)?;
            let batch = generate(&request)?;
            debug!(
                key = %batch.key,
                examples = batch.examples.len(),
                failures = batch.failures(),
                "batch generated"
            );
            output(format, &batch, || {
                let mut text = render::render_batch(&batch);
                if args.voicing {
                    for (i, progression) in batch.progressions().enumerate() {
                        text.push_str(&format!("\nVoicing {}:\n", i + 1));
                        text.push_str(&render::render_voicing(progression));
                    }
                }
                text
            })
        }
        Commands::Analyze { key, numerals } => {
            let scale = build_diatonic_scale(key.resolve()?);
            let report = analyze_numerals(&scale, numerals);
            output(format, &report, || render::render_analysis(&report))
        }
        Commands::Scale { key } => {
            let scale = build_diatonic_scale(key.resolve()?);
            let names: Vec<String> = scale.notes().iter().map(|n| n.to_string()).collect();
            output(format, &names, || render::render_scale(&scale))
        }
        Commands::Chord {
            key,
            numeral,
            type_name,
        } => {
            let scale = build_diatonic_scale(key.resolve()?);
            let chord = Chord::build_named(&scale, *numeral, &type_name.join(" "))?;
            output(format, &chord, || render::render_chord(&chord))
        }
        Commands::Keys => output(format, Key::common_roots(), render::render_keys),
        Commands::Types => {
            let names: Vec<&str> = ChordType::ALL.iter().map(|t| t.name()).collect();
            output(format, &names, render::render_chord_types)
        }
        Commands::Repl { .. } => anyhow::bail!("The REPL is interactive and has no one-shot output"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("diatonic").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_no_subcommand_means_repl() {
        let cli = parse(&[]);
        assert!(cli.command.is_none());
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn test_generate_flags_build_request() {
        let cli = parse(&[
            "generate", "--key", "F#", "--mode", "minor", "-l", "6", "-n", "3", "--deceptive",
            "--style", "complex", "--strict", "--seed", "9",
        ]);
        let Some(Commands::Generate(args)) = &cli.command else {
            panic!("expected generate");
        };
        let request = args.to_request(cli.seed).unwrap();
        assert_eq!(request.root, "F#");
        assert_eq!(request.mode, Mode::Minor);
        assert_eq!(request.progression_length, 6);
        assert_eq!(request.num_examples, 3);
        assert!(request.deceptive_cadence);
        assert_eq!(request.style, HarmonicStyle::Complex);
        assert_eq!(request.spelling, SpellingPolicy::Strict);
        assert_eq!(request.seed, Some(9));
    }

    #[test]
    fn test_request_file_with_overrides() {
        let path = std::env::temp_dir().join(format!("diatonic-request-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"root": "Ab", "mode": "Minor", "num_examples": 2}"#).unwrap();

        let cli = parse(&["generate", "--request", path.to_str().unwrap(), "-l", "5"]);
        let Some(Commands::Generate(args)) = &cli.command else {
            panic!("expected generate");
        };
        let request = args.to_request(None).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(request.root, "Ab");
        assert_eq!(request.mode, Mode::Minor);
        assert_eq!(request.num_examples, 2);
        assert_eq!(request.progression_length, 5);
        assert_eq!(request.style, HarmonicStyle::Simple);
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_request_file_load_is_logged() {
        let path = std::env::temp_dir().join(format!("diatonic-logged-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"root": "Db"}"#).unwrap();
        let args = GenerateArgs {
            request: Some(path.clone()),
            ..Default::default()
        };

        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let request = tracing::subscriber::with_default(subscriber, || args.to_request(None).unwrap());
        std::fs::remove_file(&path).ok();

        assert_eq!(request.root, "Db");
        let text = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(text.contains("request file loaded"), "{}", text);
    }

    #[test]
    fn test_lowercase_key_is_rejected() {
        let cli = parse(&["scale", "--key", "f#"]);
        let err = execute(cli.command.as_ref().unwrap(), cli.format, None).unwrap_err();
        assert!(err.to_string().contains("Invalid key: f#"));
    }

    #[test]
    fn test_missing_request_file() {
        let args = GenerateArgs {
            request: Some(PathBuf::from("/nonexistent/diatonic.json")),
            ..Default::default()
        };
        assert!(args.to_request(None).is_err());
    }

    #[test]
    fn test_execute_chord_and_scale() {
        colored::control::set_override(false);
        let cli = parse(&["chord", "-k", "Eb", "7", "Diminished", "7"]);
        let out = execute(cli.command.as_ref().unwrap(), cli.format, None).unwrap();
        assert_eq!(out, "Ddim7 (Diminished 7): [D, F, Ab, Cb]");

        let cli = parse(&["scale", "--key", "Gb", "--format", "json"]);
        let out = execute(cli.command.as_ref().unwrap(), cli.format, None).unwrap();
        let names: Vec<String> = serde_json::from_str(&out).unwrap();
        assert_eq!(names, ["Gb", "Ab", "Bb", "Cb", "Db", "Eb", "F"]);
    }

    #[test]
    fn test_execute_rejects_bad_input() {
        assert!(Cli::try_parse_from(["diatonic", "analyze", "8"]).is_err());
        assert!(Cli::try_parse_from(["diatonic", "scale", "--mode", "lydian"]).is_err());

        let cli = parse(&["generate", "--key", "H"]);
        let err = execute(cli.command.as_ref().unwrap(), cli.format, None).unwrap_err();
        assert!(err.to_string().contains("Invalid key"));
    }

    #[test]
    fn test_execute_generate_json() {
        let cli = parse(&["generate", "-n", "2", "--seed", "4", "--format", "json"]);
        let out = execute(cli.command.as_ref().unwrap(), cli.format, cli.seed).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["examples"].as_array().unwrap().len(), 2);
        assert!(value["analysis"].is_array());
    }
}
