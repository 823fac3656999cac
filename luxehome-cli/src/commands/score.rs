//! Lead scoring from the terminal

use anyhow::{bail, Context, Result};
use clap::Parser;

use luxehome_core::LuxeConfig;
use luxehome_server::ai::{self, GeminiClient};

#[derive(Parser, Debug)]
pub struct ScoreArgs {
    /// Lead message to score
    pub message: String,
}

/// Print the 0-100 score the contact form would assign
pub async fn run_score(args: ScoreArgs) -> Result<()> {
    let config = LuxeConfig::load();
    let Some(model) = GeminiClient::from_config(&config.ai).context("Failed to build Gemini client")? else {
        bail!("GEMINI_API_KEY not set. Set via env, luxehome.toml or ~/.luxehome/.env");
    };

    let score = ai::score_lead(&model, &args.message).await;
    println!("{score}");
    Ok(())
}
