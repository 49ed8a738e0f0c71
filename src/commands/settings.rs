//! Session settings (key, mode, length, ...) applied to the next `generate`

use crate::commands::{CommandContext, CommandResult};
use crate::render::OutputFormat;
use colored::*;
use diatonic_core::{GenerationRequest, HarmonicStyle, Key, Mode, SpellingPolicy};

fn updated(label: &str, value: impl std::fmt::Display) -> CommandResult {
    CommandResult::Message(format!("{} set to {}", label, value).bright_green().to_string())
}

fn parse_switch(args: &str) -> Option<bool> {
    match args.trim().to_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Some(true),
        "off" | "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

fn parse_count(args: &str, what: &str) -> Result<usize, String> {
    match args.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(format!("{} must be a whole number of at least 1", what)),
    }
}

/// Handle `key [root]` command
pub fn cmd_key(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Message(format!(
            "Current key: {} {}",
            ctx.request.root, ctx.request.mode
        ));
    }

    // Allow "key F# minor" as well as "key F#"
    let mut parts = args.split_whitespace();
    let root = parts.next().unwrap_or_default();
    let mode = match parts.next() {
        Some(m) => match m.parse::<Mode>() {
            Ok(mode) => mode,
            Err(e) => return CommandResult::Error(e.to_string()),
        },
        None => ctx.request.mode,
    };

    match Key::parse(root, mode) {
        Ok(key) => {
            ctx.request.root = key.root().name();
            ctx.request.mode = mode;
            updated("Key", key)
        }
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

/// Handle `mode [major|minor]` command
pub fn cmd_mode(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Message(format!("Current mode: {}", ctx.request.mode));
    }
    match args.parse::<Mode>() {
        Ok(mode) => {
            ctx.request.mode = mode;
            updated("Mode", mode)
        }
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

/// Handle `length [n]` command
pub fn cmd_length(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Message(format!(
            "Progression length: {}",
            ctx.request.progression_length
        ));
    }
    match parse_count(args, "Length") {
        Ok(n) => {
            ctx.request.progression_length = n;
            updated("Progression length", n)
        }
        Err(e) => CommandResult::Error(e),
    }
}

/// Handle `examples [n]` command
pub fn cmd_examples(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Message(format!("Examples per batch: {}", ctx.request.num_examples));
    }
    match parse_count(args, "Examples") {
        Ok(n) => {
            ctx.request.num_examples = n;
            updated("Examples per batch", n)
        }
        Err(e) => CommandResult::Error(e),
    }
}

/// Handle `deceptive [on|off]` command
pub fn cmd_deceptive(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Message(format!(
            "Deceptive cadence: {}",
            if ctx.request.deceptive_cadence { "on" } else { "off" }
        ));
    }
    match parse_switch(args) {
        Some(on) => {
            ctx.request.deceptive_cadence = on;
            updated("Deceptive cadence", if on { "on" } else { "off" })
        }
        None => CommandResult::Error("Usage: deceptive on|off".to_string()),
    }
}

/// Handle `style [simple|complex]` command
pub fn cmd_style(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Message(format!("Harmonic style: {}", ctx.request.style));
    }
    match args.parse::<HarmonicStyle>() {
        Ok(style) => {
            ctx.request.style = style;
            updated("Harmonic style", style)
        }
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

/// Handle `strict [on|off]` command
pub fn cmd_strict(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Message(format!("Spelling policy: {:?}", ctx.request.spelling));
    }
    match parse_switch(args) {
        Some(on) => {
            ctx.request.spelling = if on {
                SpellingPolicy::Strict
            } else {
                SpellingPolicy::Lenient
            };
            updated("Spelling policy", format!("{:?}", ctx.request.spelling))
        }
        None => CommandResult::Error("Usage: strict on|off".to_string()),
    }
}

/// Handle `seed [n|off]` command
pub fn cmd_seed(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Message(match ctx.request.seed {
            Some(seed) => format!("Seed: {}", seed),
            None => "Seed: off (random)".to_string(),
        });
    }
    if args == "off" {
        ctx.request.seed = None;
        return updated("Seed", "off");
    }
    match args.parse::<u64>() {
        Ok(seed) => {
            ctx.request.seed = Some(seed);
            updated("Seed", seed)
        }
        Err(_) => CommandResult::Error("Usage: seed <number>|off".to_string()),
    }
}

/// Handle `format [text|json]` command
pub fn cmd_format(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Message(format!("Output format: {:?}", ctx.format));
    }
    match args.parse::<OutputFormat>() {
        Ok(format) => {
            ctx.format = format;
            updated("Output format", format!("{:?}", format))
        }
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

/// Handle `settings` command
pub fn cmd_settings(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    let r = &ctx.request;
    let lines = [
        format!("{} {} {}", "key".cyan(), r.root, r.mode),
        format!("{} {}", "length".cyan(), r.progression_length),
        format!("{} {}", "examples".cyan(), r.num_examples),
        format!(
            "{} {}",
            "deceptive".cyan(),
            if r.deceptive_cadence { "on" } else { "off" }
        ),
        format!("{} {}", "style".cyan(), r.style),
        format!("{} {:?}", "spelling".cyan(), r.spelling),
        format!(
            "{} {}",
            "seed".cyan(),
            r.seed.map(|s| s.to_string()).unwrap_or_else(|| "off".to_string())
        ),
        format!("{} {:?}", "format".cyan(), ctx.format),
    ];
    CommandResult::Message(lines.join("\n"))
}

/// Handle `reset` command
pub fn cmd_reset(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    ctx.request = GenerationRequest::default();
    CommandResult::Message("Settings reset to defaults".bright_green().to_string())
}
