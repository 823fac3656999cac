//! HTTP server command
//!
//! Wires the database pool, hosted auth and storage, and the language
//! model into the API router and serves until Ctrl+C or SIGTERM.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use luxehome_core::LuxeConfig;
use luxehome_server::ai::{DisabledModel, GeminiClient, LanguageModel};
use luxehome_server::baas::{BaasSettings, SupabaseAuth, SupabaseStorage};
use luxehome_server::{run_server, AppState, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: server.bind, 127.0.0.1:3030)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL (overrides config/environment)
    #[arg(long)]
    pub database_url: Option<String>,
}

/// Configured Gemini client, or the fallback model when no key is set.
fn language_model(config: &LuxeConfig) -> Result<Arc<dyn LanguageModel>> {
    match GeminiClient::from_config(&config.ai).context("Failed to build Gemini client")? {
        Some(client) => {
            tracing::info!(model = %config.ai.model, "AI assist enabled");
            Ok(Arc::new(client))
        }
        None => {
            tracing::warn!("GEMINI_API_KEY not set, AI features use fallbacks");
            Ok(Arc::new(DisabledModel))
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = LuxeConfig::load();

    let mut server_config =
        ServerConfig::from_section(&config.server).context("Invalid [server] configuration")?;
    if let Some(bind) = args.bind {
        server_config.bind_addr = bind;
    }
    server_config.cors_permissive |= args.cors_permissive;

    let pool = super::connect(&config, args.database_url.as_deref()).await?;

    let baas = BaasSettings::from_config(&config.baas)
        .context("Auth and storage need SUPABASE_URL and SUPABASE_ANON_KEY")?;
    let http = reqwest::Client::new();
    let auth = Arc::new(SupabaseAuth::new(http.clone(), baas.clone()));
    let storage = Arc::new(SupabaseStorage::new(http, baas));

    let state = AppState::new(pool, auth, storage, language_model(&config)?)
        .with_reset_secret(config.demo.reset_secret.clone());

    tracing::info!("Starting luxehome server on {}", server_config.bind_addr);
    run_server(state, server_config).await.context("Server error")?;

    Ok(())
}
