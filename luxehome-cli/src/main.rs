//! luxehome CLI - LuxeHome back office server and maintenance tooling
//!
//! - `serve`: run the HTTP API
//! - `migrate`: create the tables the API expects
//! - `sanitize`: repair legacy gallery and amenity data
//! - `seed`: insert the demo showcase listings
//! - `score`: try the lead scorer from the terminal
//! - `config`: inspect and validate configuration

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

mod commands;
mod config;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "luxehome",
    author,
    version,
    about = "LuxeHome real estate back office: API server and data maintenance",
    long_about = "Serve the LuxeHome listings, leads and agent API, run schema migrations, \
                  and repair legacy listing data."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Create tables and indexes if missing
    Migrate(commands::migrate::MigrateArgs),
    /// Normalize stored galleries and amenity maps
    Sanitize(commands::sanitize::SanitizeArgs),
    /// Insert the demo showcase listings
    Seed(commands::seed::SeedArgs),
    /// Score a lead message with the configured model
    Score(commands::score::ScoreArgs),
    /// Inspect configuration (show, path, validate, init)
    Config(config::ConfigArgs),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)] // PowerShell is a proper noun, not a suffix
enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();

    if let Err(e) = luxehome_core::config::load_dotenv() {
        tracing::debug!("dotenv not loaded: {e:#}");
    }

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Migrate(args) => commands::run_migrate(args).await?,
        Commands::Sanitize(args) => commands::run_sanitize(args).await?,
        Commands::Seed(args) => commands::run_seed(args).await?,
        Commands::Score(args) => commands::run_score(args).await?,
        Commands::Config(args) => config::run_config(args)?,
        Commands::Completions(args) => run_completions(args)?,
    }
    Ok(())
}

fn run_completions(args: CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::{generate, Shell as CompletionShell};
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    let shell = match args.shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    };

    generate(shell, &mut cmd, bin_name, &mut io::stdout());

    Ok(())
}
