use anyhow::Result;
use clap::Parser;
use diatonic::cli::{Cli, Commands, GenerateArgs};
use diatonic::commands::CommandContext;
use diatonic::repl;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        None => {
            let request = GenerateArgs::default().to_request(cli.seed)?;
            repl::start(CommandContext::new(request, cli.format))
        }
        Some(Commands::Repl { generate }) => {
            let request = generate.to_request(cli.seed)?;
            repl::start(CommandContext::new(request, cli.format))
        }
        Some(command) => {
            let output = diatonic::cli::execute(command, cli.format, cli.seed)?;
            println!("{}", output.trim_end());
            Ok(())
        }
    }
}
