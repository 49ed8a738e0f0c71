//! Command registry for REPL commands
//!
//! Each command is a prefix plus a handler; the longest matching prefix wins.

pub mod general;
pub mod settings;
pub mod theory;

use crate::render::OutputFormat;
use diatonic_core::{GenerationRequest, ProgressionBatch};

/// Result of executing a command
#[derive(Debug)]
pub enum CommandResult {
    /// Command executed successfully, continue REPL
    Success,
    /// Command executed, show this message
    Message(String),
    /// Exit the REPL
    Exit,
    /// Input matched no registered command
    NotACommand,
    /// Error occurred
    Error(String),
}

/// Session state shared by command handlers
pub struct CommandContext {
    /// Settings used by the next `generate`
    pub request: GenerationRequest,
    pub format: OutputFormat,
    /// Most recent batch, for `voicing` and `export`
    pub last_batch: Option<ProgressionBatch>,
}

impl CommandContext {
    pub fn new(request: GenerationRequest, format: OutputFormat) -> Self {
        Self {
            request,
            format,
            last_batch: None,
        }
    }
}

impl Default for CommandContext {
    fn default() -> Self {
        Self::new(GenerationRequest::default(), OutputFormat::Text)
    }
}

/// A command handler function
pub type CommandHandler = fn(&str, &mut CommandContext) -> CommandResult;

/// Registry of available commands
pub struct CommandRegistry {
    /// Sorted by prefix length descending for longest-match-first lookup
    commands: Vec<(String, CommandHandler)>,
}

impl CommandRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Register a command with its prefix
    pub fn register(&mut self, prefix: &str, handler: CommandHandler) {
        self.commands.push((prefix.to_string(), handler));
        self.commands.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    }

    /// Execute a command, returning NotACommand if no match found
    pub fn execute(&self, input: &str, ctx: &mut CommandContext) -> CommandResult {
        for (prefix, handler) in &self.commands {
            if input == prefix || input.starts_with(&format!("{} ", prefix)) {
                let args = if input.len() > prefix.len() {
                    input[prefix.len()..].trim()
                } else {
                    ""
                };
                return handler(args, ctx);
            }
        }
        CommandResult::NotACommand
    }

    /// Get all registered command prefixes
    pub fn list_commands(&self) -> Vec<&str> {
        self.commands.iter().map(|(p, _)| p.as_str()).collect()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a fully populated command registry with all built-in commands
pub fn create_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();

    // Theory
    registry.register("generate", theory::cmd_generate);
    registry.register("gen", theory::cmd_generate);
    registry.register("analyze", theory::cmd_analyze);
    registry.register("scale", theory::cmd_scale);
    registry.register("chord", theory::cmd_chord);
    registry.register("keys", theory::cmd_keys);
    registry.register("types", theory::cmd_types);
    registry.register("voicing", theory::cmd_voicing);
    registry.register("export", theory::cmd_export);

    // Session settings
    registry.register("key", settings::cmd_key);
    registry.register("mode", settings::cmd_mode);
    registry.register("length", settings::cmd_length);
    registry.register("examples", settings::cmd_examples);
    registry.register("deceptive", settings::cmd_deceptive);
    registry.register("style", settings::cmd_style);
    registry.register("strict", settings::cmd_strict);
    registry.register("seed", settings::cmd_seed);
    registry.register("format", settings::cmd_format);
    registry.register("settings", settings::cmd_settings);
    registry.register("reset", settings::cmd_reset);

    // General commands
    registry.register("help", general::cmd_help);
    registry.register("quit", general::cmd_quit);
    registry.register("exit", general::cmd_quit);

    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_longest_prefix_wins() {
        let registry = create_registry();
        let mut ctx = CommandContext::default();

        // "keys" must not be swallowed by "key"
        match registry.execute("keys", &mut ctx) {
            CommandResult::Message(msg) => assert!(msg.contains("Bb")),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(ctx.request.root, "C");

        // "generate" must not be read as "gen" + "erate"
        assert!(matches!(
            registry.execute("generate", &mut ctx),
            CommandResult::Message(_)
        ));
    }

    #[test]
    fn test_unknown_input() {
        let registry = create_registry();
        let mut ctx = CommandContext::default();
        assert!(matches!(
            registry.execute("play it again", &mut ctx),
            CommandResult::NotACommand
        ));
        assert!(matches!(
            registry.execute("keysignature", &mut ctx),
            CommandResult::NotACommand
        ));
    }

    #[test]
    fn test_quit() {
        let registry = create_registry();
        let mut ctx = CommandContext::default();
        assert!(matches!(registry.execute("exit", &mut ctx), CommandResult::Exit));
        assert!(matches!(registry.execute("quit", &mut ctx), CommandResult::Exit));
    }

    #[test]
    fn test_list_commands_sorted_longest_first() {
        let registry = create_registry();
        let commands = registry.list_commands();
        assert!(commands.contains(&"deceptive"));
        for pair in commands.windows(2) {
            assert!(pair[0].len() >= pair[1].len());
        }
    }
}
