//! General REPL commands (help, quit)

use crate::commands::{CommandContext, CommandResult};
use colored::*;

/// Handle `help` command
pub fn cmd_help(_args: &str, _ctx: &mut CommandContext) -> CommandResult {
    print_help();
    CommandResult::Success
}

/// Handle `quit` or `exit` command
pub fn cmd_quit(_args: &str, _ctx: &mut CommandContext) -> CommandResult {
    CommandResult::Exit
}

/// Print help information
fn print_help() {
    println!("{}", "🎵 Diatonic Help".bold());
    println!("{}", "================".bold());
    println!();
    println!("{}", "Generating:".green());
    println!("  {}             - Generate progressions with the current settings", "generate".cyan());
    println!("  {}          - Bass-first voicing of example n (default 1)", "voicing [n]".cyan());
    println!("  {}           - Recording label for example n", "export [n]".cyan());
    println!();
    println!("{}", "Settings:".green());
    println!("  {}  - Set the key, e.g. key F# minor", "key <root> [mode]".cyan());
    println!("  {}   - Major or natural minor", "mode major|minor".cyan());
    println!("  {}           - Chords per progression", "length <n>".cyan());
    println!("  {}         - Progressions per batch", "examples <n>".cyan());
    println!("  {}    - Resolve 5/7 to 6 at the end", "deceptive on|off".cyan());
    println!("  {} - Triads or extended chords", "style simple|complex".cyan());
    println!("  {}       - Reject chords that need a fallback spelling", "strict on|off".cyan());
    println!("  {}       - Fixed seed for repeatable results", "seed <n>|off".cyan());
    println!("  {}    - Output format", "format text|json".cyan());
    println!("  {}             - Show current settings", "settings".cyan());
    println!("  {}                - Restore defaults", "reset".cyan());
    println!();
    println!("{}", "Theory:".green());
    println!("  {}  - Chord options on scale degrees", "analyze <numerals>".cyan());
    println!("  {}   - Spell a scale", "scale [root] [mode]".cyan());
    println!("  {} - Spell one chord, e.g. chord 5 Dominant 7", "chord <numeral> <type>".cyan());
    println!("  {}                 - List key roots", "keys".cyan());
    println!("  {}                - List chord types", "types".cyan());
    println!();
    println!("{}", "Examples:".green());
    println!("  diatonic> {}", "key Eb minor".cyan());
    println!("  diatonic> {}", "deceptive on".cyan());
    println!("  diatonic> {}", "generate".cyan());
    println!("  diatonic> {}", "chord 2 Half-Diminished 7".cyan());
    println!("  Fø7 (Half-Diminished 7): [F, Ab, Cb, Eb]");
    println!();
    println!("  {}, {} or {} to exit", "quit".bright_red(), "exit".bright_red(), "Ctrl+C".bright_red());
}
