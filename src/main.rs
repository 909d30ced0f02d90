use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use keytrust::{
    cli::commands::{ensure::EnsureCommand, security::SecurityCommand, CommandHandler},
    cli::{Cli, Commands, LogLevel},
    SecurityTool, Subcommand, ToolPaths,
};

/// Initialize tracing from --log-level. Logs go to stderr; stdout carries
/// tool output only.
fn initialize_tracing(log_level: &LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_filter_directive()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    initialize_tracing(&cli.log_level);

    let tools = ToolPaths::discover_with_overrides(cli.security_path, cli.openssl_path);
    debug!("Resolved tools: {:?}", tools);
    let security = SecurityTool::from_paths(&tools);

    let handler: Box<dyn CommandHandler> = match cli.command {
        Commands::Verify(args) => Box::new(SecurityCommand::new(
            Subcommand::VerifyCert,
            args.to_settings(),
            security,
        )),
        Commands::Add(args) => Box::new(SecurityCommand::new(
            Subcommand::AddTrustedCert,
            args.to_settings(),
            security,
        )),
        Commands::Remove(args) => Box::new(SecurityCommand::new(
            Subcommand::RemoveTrustedCert,
            args.to_settings(),
            security,
        )),
        Commands::Ensure { cert_file, json } => {
            Box::new(EnsureCommand::new(cert_file, json, tools))
        }
    };

    handler
        .execute()
        .with_context(|| format!("keytrust {} failed", handler.name()))
}
