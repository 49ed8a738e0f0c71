//! REPL (Read-Eval-Print Loop) for exploring keys and generating progressions

use crate::commands::{create_registry, CommandContext, CommandRegistry, CommandResult};
use anyhow::Result;
use colored::*;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RustylineResult};
use tracing::debug;

/// Interactive REPL over the theory commands
pub struct Repl {
    editor: DefaultEditor,
    registry: CommandRegistry,
    ctx: CommandContext,
}

/// What the loop should do after one line
#[derive(Debug, PartialEq, Eq)]
pub enum LineOutcome {
    Continue,
    Exit,
}

impl Repl {
    /// Create a new REPL instance
    pub fn new(ctx: CommandContext) -> RustylineResult<Self> {
        Ok(Repl {
            editor: DefaultEditor::new()?,
            registry: create_registry(),
            ctx,
        })
    }

    /// Run one input line through the registry and print the result
    pub fn handle_line(registry: &CommandRegistry, ctx: &mut CommandContext, line: &str) -> LineOutcome {
        let result = registry.execute(line, ctx);
        debug!(input = line, result = ?result, "command handled");
        match result {
            CommandResult::Success => {}
            CommandResult::Message(msg) => println!("{}", msg),
            CommandResult::Exit => {
                println!("{} 🎵", "Goodbye!".bright_cyan());
                return LineOutcome::Exit;
            }
            CommandResult::Error(e) => {
                println!("{} {}", "Error:".bright_red().bold(), e.red());
            }
            CommandResult::NotACommand => {
                println!(
                    "{} Unknown command '{}'. Type '{}' for a list.",
                    "Error:".bright_red().bold(),
                    line,
                    "help".bright_green()
                );
            }
        }
        LineOutcome::Continue
    }

    /// Start the REPL loop
    pub fn run(&mut self) -> Result<()> {
        println!(
            "{} {}",
            "🎵".bright_yellow(),
            "Diatonic Progression Generator".bright_cyan().bold()
        );
        println!(
            "Try: {}, {}, {}",
            "key D minor".cyan(),
            "generate".cyan(),
            "analyze 1 4 5".cyan()
        );
        println!(
            "Type '{}' for more information, '{}' or {} to exit.\n",
            "help".bright_green(),
            "quit".bright_red(),
            "Ctrl+C".bright_red()
        );

        loop {
            let prompt = format!("{} ", "diatonic>".bright_magenta().bold());
            match self.editor.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    let _ = self.editor.add_history_entry(line);
                    if Self::handle_line(&self.registry, &mut self.ctx, line) == LineOutcome::Exit {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    println!("{} 🎵", "Goodbye!".bright_cyan());
                    break;
                }
                Err(err) => {
                    println!(
                        "{} {}",
                        "Error reading input:".bright_red().bold(),
                        err.to_string().red()
                    );
                }
            }
        }

        Ok(())
    }
}

/// Convenience function to start the REPL
pub fn start(ctx: CommandContext) -> Result<()> {
    let mut repl =
        Repl::new(ctx).map_err(|e| anyhow::anyhow!("Failed to initialize REPL: {}", e))?;
    repl.run()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_flow() {
        let registry = create_registry();
        let mut ctx = CommandContext::default();

        for line in ["key A minor", "length 3", "seed 1", "generate", "voicing 1"] {
            assert_eq!(
                Repl::handle_line(&registry, &mut ctx, line),
                LineOutcome::Continue
            );
        }
        let batch = ctx.last_batch.as_ref().unwrap();
        assert_eq!(batch.key.to_string(), "A Minor");
        assert_eq!(batch.progression_length, 3);

        assert_eq!(
            Repl::handle_line(&registry, &mut ctx, "nonsense"),
            LineOutcome::Continue
        );
        assert_eq!(
            Repl::handle_line(&registry, &mut ctx, "quit"),
            LineOutcome::Exit
        );
    }
}
