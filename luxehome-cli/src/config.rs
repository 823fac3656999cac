use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use luxehome_core::config::{ensure_config_dir, global_config_path, LOCAL_CONFIG_FILE};
use luxehome_core::LuxeConfig;

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration (secrets masked)
    Show,
    /// Show config file paths
    Path,
    /// Check that the server has what it needs to start
    Validate,
    /// Write a default ~/.luxehome/config.toml
    Init(InitArgs),
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Force overwrite existing config
    #[arg(long, short)]
    pub force: bool,
}

pub fn run_config(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Show => run_show(),
        ConfigCommands::Path => run_path(),
        ConfigCommands::Validate => run_validate(),
        ConfigCommands::Init(args) => run_init(args),
    }
}

fn run_show() -> Result<()> {
    let config = LuxeConfig::load().masked();
    let rendered = toml::to_string_pretty(&config).context("Failed to render config")?;
    print!("{rendered}");
    Ok(())
}

fn run_path() -> Result<()> {
    match global_config_path() {
        Some(path) => println!("{}", path.display()),
        None => println!("(no home directory)"),
    }
    if Path::new(LOCAL_CONFIG_FILE).exists() {
        println!("{LOCAL_CONFIG_FILE} (local override)");
    }
    Ok(())
}

fn run_validate() -> Result<()> {
    println!("🔍 Validating configuration...");

    let config = LuxeConfig::load();
    let problems = config.problems();
    if problems.is_empty() {
        println!("   ✓ Configuration complete");
        return Ok(());
    }

    for problem in &problems {
        println!("   ✗ {problem}");
    }
    bail!("{} configuration problem(s)", problems.len())
}

fn run_init(args: InitArgs) -> Result<()> {
    ensure_config_dir()?;
    let path = global_config_path().context("Could not determine home directory")?;

    if path.exists() && !args.force {
        bail!("Config already exists at {}\n\nUse --force to overwrite", path.display());
    }

    let rendered = toml::to_string_pretty(&LuxeConfig::default()).context("Failed to render config")?;
    std::fs::write(&path, rendered).with_context(|| format!("Failed to write {}", path.display()))?;

    println!("✓ Wrote {}", path.display());
    println!("  Secrets belong in the environment or ~/.luxehome/.env");
    Ok(())
}
