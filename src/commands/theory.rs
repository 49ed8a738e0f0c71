//! Theory commands: generate, analyze, scale, chord, keys, types, voicing, export

use crate::commands::{CommandContext, CommandResult};
use crate::render::{self, OutputFormat};
use diatonic_core::analysis::analyze_numerals;
use diatonic_core::{
    build_diatonic_scale, generate, Chord, Key, Mode, Numeral, Progression, Result as TheoryResult,
};
use serde::Serialize;

fn emit<T: Serialize + ?Sized>(ctx: &CommandContext, value: &T, text: impl FnOnce() -> String) -> CommandResult {
    match ctx.format {
        OutputFormat::Text => CommandResult::Message(text()),
        OutputFormat::Json => match render::to_json(value) {
            Ok(json) => CommandResult::Message(json),
            Err(e) => CommandResult::Error(e.to_string()),
        },
    }
}

/// Session key, or the key named by a leading "<root> [mode]" in `args`
fn key_from(args: &[&str], ctx: &CommandContext) -> TheoryResult<Key> {
    match args {
        [] => Key::parse(&ctx.request.root, ctx.request.mode),
        [root] => Key::parse(root, ctx.request.mode),
        [root, mode, ..] => Key::parse(root, mode.parse::<Mode>()?),
    }
}

fn parse_numerals(args: &[&str]) -> TheoryResult<Vec<Numeral>> {
    args.iter().map(|a| a.parse::<Numeral>()).collect()
}

/// Handle `generate` command
pub fn cmd_generate(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    match generate(&ctx.request) {
        Ok(batch) => {
            let result = emit(ctx, &batch, || render::render_batch(&batch));
            ctx.last_batch = Some(batch);
            result
        }
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

/// Handle `analyze <numerals...>` command, in the session key
pub fn cmd_analyze(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let words: Vec<&str> = args.split_whitespace().collect();
    if words.is_empty() {
        return CommandResult::Error("Usage: analyze <numeral> [numeral...]  (e.g. analyze 1 4 5)".to_string());
    }
    let result = parse_numerals(&words).and_then(|numerals| {
        let key = key_from(&[], ctx)?;
        Ok(analyze_numerals(&build_diatonic_scale(key), &numerals))
    });
    match result {
        Ok(report) => emit(ctx, &report, || render::render_analysis(&report)),
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

/// Handle `scale [root] [mode]` command
pub fn cmd_scale(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let words: Vec<&str> = args.split_whitespace().collect();
    match key_from(&words, ctx) {
        Ok(key) => {
            let scale = build_diatonic_scale(key);
            let names: Vec<String> = scale.notes().iter().map(|n| n.to_string()).collect();
            emit(ctx, &names, || render::render_scale(&scale))
        }
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

/// Handle `chord <numeral> <type name>` command, in the session key
pub fn cmd_chord(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let Some((numeral, type_name)) = args.split_once(' ') else {
        return CommandResult::Error(
            "Usage: chord <numeral> <type>  (e.g. chord 5 Dominant 7)".to_string(),
        );
    };
    let result = numeral.parse::<Numeral>().and_then(|numeral| {
        let scale = build_diatonic_scale(key_from(&[], ctx)?);
        Chord::build_named(&scale, numeral, type_name.trim())
    });
    match result {
        Ok(chord) => emit(ctx, &chord, || render::render_chord(&chord)),
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

/// Handle `keys` command
pub fn cmd_keys(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    emit(ctx, Key::common_roots(), render::render_keys)
}

/// Handle `types` command
pub fn cmd_types(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    let names: Vec<&str> = diatonic_core::ChordType::ALL.iter().map(|t| t.name()).collect();
    emit(ctx, &names, render::render_chord_types)
}

/// Example `n` (1-based, default 1) of the last batch
fn example_from_last(args: &str, ctx: &CommandContext) -> Result<Progression, String> {
    let batch = ctx
        .last_batch
        .as_ref()
        .ok_or_else(|| "Nothing generated yet. Run 'generate' first.".to_string())?;
    let n = if args.is_empty() {
        1
    } else {
        args.parse::<usize>()
            .map_err(|_| format!("Invalid example number: {}", args))?
    };
    match batch.examples.get(n.wrapping_sub(1)) {
        Some(outcome) => outcome
            .progression()
            .cloned()
            .ok_or_else(|| format!("Example {} failed to generate", n)),
        None => Err(format!(
            "Example {} does not exist (last batch has {})",
            n,
            batch.examples.len()
        )),
    }
}

/// Handle `voicing [n]` command
pub fn cmd_voicing(args: &str, ctx: &mut CommandContext) -> CommandResult {
    match example_from_last(args, ctx) {
        Ok(progression) => {
            let playback = progression.playback();
            emit(ctx, &playback, || render::render_voicing(&progression))
        }
        Err(e) => CommandResult::Error(e),
    }
}

/// Handle `export [n]` command
pub fn cmd_export(args: &str, ctx: &mut CommandContext) -> CommandResult {
    match example_from_last(args, ctx) {
        Ok(progression) => {
            let label = progression.export_label();
            emit(ctx, &label, || label.clone())
        }
        Err(e) => CommandResult::Error(e),
    }
}
