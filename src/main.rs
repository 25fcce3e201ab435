use anyhow::Result;
use clap::Parser;

use skimmer::config::Config;
use skimmer::web;

/// Skimmer: on-demand timeline toxicity gateway.
///
/// Accepts caller credentials over HTTP, fetches the home and mentions
/// timelines, and scores every post against a remote BERT classifier.
#[derive(Parser)]
#[command(name = "skimmer", version, about)]
struct Cli {
    /// Address to bind the HTTP server to
    #[arg(long, default_value = "0.0.0.0")]
    bind: String,

    /// Port to listen on
    #[arg(long, default_value = "8080")]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("skimmer=info")),
        )
        .init();

    let cli = Cli::parse();

    let config = Config::load()?;
    config.require_credentials()?;
    config.require_scorer()?;

    web::run_server(config, &cli.bind, cli.port).await
}
