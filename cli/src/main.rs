//! LoginFlow CLI - Main Entry Point
//!
//! Resolves the one-time code a login scenario is waiting for and manages the
//! disposable mailbox the scenarios log in with.

use clap::{Parser, Subcommand};

mod commands;
mod logging;

use commands::{mailbox, resolve};

/// LoginFlow CLI - verification codes for login scenarios
#[derive(Parser, Debug)]
#[command(name = "loginflow")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve the verification code for a login
    Resolve(resolve::ResolveArgs),

    /// Manage the mailbox account
    #[command(subcommand)]
    Mailbox(mailbox::MailboxCommands),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = lf_infra::load_config();
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    logging::init_tracing(&config.logging)?;

    let services = lf_infra::InfrastructureServices::initialize(config)?;

    match cli.command {
        Commands::Resolve(args) => resolve::execute(args, &services).await?,
        Commands::Mailbox(cmd) => mailbox::execute(cmd, &services).await?,
    }

    Ok(())
}
